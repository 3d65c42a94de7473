// Copyright 2018 The GeoRust Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;
use std::str::FromStr;

use geojson::Geometry;
use log::{debug, warn};
use serde::Serialize;

use crate::geometry::{GeometryFamily, GeometryType};
use crate::Error;

/// Name of the reserved geometry slot in an insert cursor's field list.
pub const GEOMETRY_SLOT: &str = "SHAPE@";

/// Default width of text attribute fields.
pub const DEFAULT_FIELD_WIDTH: usize = 100;

/// Coordinate system identifier, passed through to the containers as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpatialReference {
    pub srid: u32,
}

impl SpatialReference {
    /// Geographic WGS 1984.
    pub const WGS84: SpatialReference = SpatialReference { srid: 4326 };
}

impl Default for SpatialReference {
    fn default() -> Self {
        SpatialReference::WGS84
    }
}

impl FromStr for SpatialReference {
    type Err = Error;

    /// Accepts `4326` as well as `EPSG:4326`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = match trimmed.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("EPSG:") => &trimmed[5..],
            _ => trimmed,
        };
        code.parse()
            .map(|srid| SpatialReference { srid })
            .map_err(|_| Error::InvalidSpatialReference(s.to_owned()))
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EPSG:{}", self.srid)
    }
}

/// A text attribute field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub width: usize,
}

/// One stored feature: its geometry plus one text value per container field.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub geometry: Geometry,
    pub values: Vec<String>,
}

/// Records of a single geometry family sharing one attribute schema.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureContainer {
    family: GeometryFamily,
    spatial_reference: SpatialReference,
    fields: Vec<Field>,
    records: Vec<Record>,
}

impl FeatureContainer {
    pub fn new(family: GeometryFamily, spatial_reference: SpatialReference) -> Self {
        FeatureContainer {
            family,
            spatial_reference,
            fields: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Add a text field. Records already stored get an empty value for it.
    pub fn add_field(&mut self, name: &str, width: usize) {
        if self.field_position(name).is_some() {
            return;
        }
        self.fields.push(Field {
            name: name.to_owned(),
            width,
        });
        for record in &mut self.records {
            record.values.push(String::new());
        }
    }

    pub fn family(&self) -> GeometryFamily {
        self.family
    }

    pub fn name(&self) -> &'static str {
        self.family.name()
    }

    pub fn spatial_reference(&self) -> SpatialReference {
        self.spatial_reference
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn field_position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Open a cursor appending records with the given field layout.
    ///
    /// `field_names` must start with [`GEOMETRY_SLOT`]; the remaining names
    /// select container fields in the order values will be supplied. Fields
    /// left out receive empty text.
    pub fn insert_cursor(&mut self, field_names: &[&str]) -> Result<InsertCursor<'_>, Error> {
        let names = match field_names.split_first() {
            Some((&slot, names)) if slot == GEOMETRY_SLOT => names,
            _ => return Err(Error::ExpectedProperty(GEOMETRY_SLOT.to_owned())),
        };
        let mut positions = Vec::with_capacity(names.len());
        for name in names {
            match self.field_position(name) {
                Some(p) => positions.push(p),
                None => return Err(Error::UnknownField((*name).to_owned())),
            }
        }
        Ok(InsertCursor {
            container: self,
            positions,
        })
    }
}

/// Appends records to one container.
#[derive(Debug)]
pub struct InsertCursor<'a> {
    container: &'a mut FeatureContainer,
    positions: Vec<usize>,
}

impl<'a> InsertCursor<'a> {
    pub fn insert_row(&mut self, geometry: Geometry, values: Vec<String>) -> Result<(), Error> {
        if values.len() != self.positions.len() {
            return Err(Error::FieldMismatch {
                expected: self.positions.len(),
                actual: values.len(),
            });
        }
        let actual = GeometryType::of_value(&geometry.value)?.family();
        if actual != self.container.family {
            return Err(Error::FamilyMismatch {
                expected: self.container.family,
                actual,
            });
        }
        let mut row = vec![String::new(); self.container.fields.len()];
        for (&pos, value) in self.positions.iter().zip(values) {
            let field = &self.container.fields[pos];
            row[pos] = fit_to_width(value, field);
        }
        self.container.records.push(Record {
            geometry,
            values: row,
        });
        Ok(())
    }
}

fn fit_to_width(value: String, field: &Field) -> String {
    match value.char_indices().nth(field.width) {
        Some((cut, _)) => {
            warn!(
                "Value of field '{}' truncated to {} characters",
                field.name, field.width
            );
            value[..cut].to_owned()
        }
        None => value,
    }
}

/// Containers of one conversion run, indexed by geometry family.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Containers {
    slots: [Option<FeatureContainer>; 4],
}

impl Containers {
    /// Create one container per family, each with the same text fields.
    pub fn provision<'f, I>(
        families: I,
        fields: &[String],
        spatial_reference: SpatialReference,
        field_width: usize,
    ) -> Self
    where
        I: IntoIterator<Item = &'f GeometryFamily>,
    {
        let mut containers = Containers::default();
        for &family in families {
            let mut fc = FeatureContainer::new(family, spatial_reference);
            for field in fields {
                fc.add_field(field, field_width);
            }
            debug!(
                "Provisioned container {} ({}) with {} fields",
                family,
                spatial_reference,
                fc.fields().len()
            );
            containers.slots[family.index()] = Some(fc);
        }
        containers
    }

    pub fn get(&self, family: GeometryFamily) -> Option<&FeatureContainer> {
        self.slots[family.index()].as_ref()
    }

    pub fn get_mut(&mut self, family: GeometryFamily) -> Result<&mut FeatureContainer, Error> {
        self.slots[family.index()]
            .as_mut()
            .ok_or(Error::ContainerNotProvisioned(family))
    }

    /// Provisioned containers, in family order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureContainer> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value;
    use pretty_assertions::assert_eq;

    fn point() -> Geometry {
        Geometry::new(Value::Point(vec![1., 2.]))
    }

    #[test]
    fn spatial_reference_parsing() {
        assert_eq!(SpatialReference::default().srid, 4326);
        assert_eq!("3857".parse::<SpatialReference>().unwrap().srid, 3857);
        assert_eq!("epsg:2154".parse::<SpatialReference>().unwrap().srid, 2154);
        assert_eq!(SpatialReference::WGS84.to_string(), "EPSG:4326");
        assert!("wgs84".parse::<SpatialReference>().is_err());
    }

    #[test]
    fn cursor_fills_missing_fields_with_empty_text() {
        let mut fc = FeatureContainer::new(GeometryFamily::Point, SpatialReference::WGS84);
        fc.add_field("name", 100);
        fc.add_field("id", 100);
        {
            let mut cursor = fc.insert_cursor(&[GEOMETRY_SLOT, "id"]).unwrap();
            cursor.insert_row(point(), vec!["7".to_owned()]).unwrap();
        }
        assert_eq!(fc.len(), 1);
        assert_eq!(fc.records()[0].values, vec!["".to_owned(), "7".to_owned()]);
    }

    #[test]
    fn cursor_requires_geometry_slot_and_known_fields() {
        let mut fc = FeatureContainer::new(GeometryFamily::Point, SpatialReference::WGS84);
        fc.add_field("name", 100);
        assert!(matches!(
            fc.insert_cursor(&["name"]),
            Err(Error::ExpectedProperty(_))
        ));
        assert!(matches!(
            fc.insert_cursor(&[GEOMETRY_SLOT, "height"]),
            Err(Error::UnknownField(ref f)) if f == "height"
        ));
        let mut cursor = fc.insert_cursor(&[GEOMETRY_SLOT, "name"]).unwrap();
        assert!(matches!(
            cursor.insert_row(point(), vec![]),
            Err(Error::FieldMismatch {
                expected: 1,
                actual: 0
            })
        ));
    }

    #[test]
    fn cursor_rejects_foreign_family() {
        let mut fc = FeatureContainer::new(GeometryFamily::Polygon, SpatialReference::WGS84);
        let mut cursor = fc.insert_cursor(&[GEOMETRY_SLOT]).unwrap();
        assert!(matches!(
            cursor.insert_row(point(), vec![]),
            Err(Error::FamilyMismatch {
                expected: GeometryFamily::Polygon,
                actual: GeometryFamily::Point
            })
        ));
    }

    #[test]
    fn long_values_are_truncated_on_char_boundary() {
        let mut fc = FeatureContainer::new(GeometryFamily::Point, SpatialReference::WGS84);
        fc.add_field("name", 3);
        let mut cursor = fc.insert_cursor(&[GEOMETRY_SLOT, "name"]).unwrap();
        cursor.insert_row(point(), vec!["éèàü".to_owned()]).unwrap();
        cursor.insert_row(point(), vec!["abc".to_owned()]).unwrap();
        assert_eq!(fc.records()[0].values, vec!["éèà".to_owned()]);
        assert_eq!(fc.records()[1].values, vec!["abc".to_owned()]);
    }

    #[test]
    fn containers_are_indexed_by_family() {
        let fields = vec!["name".to_owned()];
        let mut containers = Containers::provision(
            &[GeometryFamily::Polygon, GeometryFamily::Point],
            &fields,
            SpatialReference::WGS84,
            DEFAULT_FIELD_WIDTH,
        );
        assert_eq!(containers.len(), 2);
        let names: Vec<&str> = containers.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["POINT", "POLYGON"]);
        assert!(containers.get(GeometryFamily::Polyline).is_none());
        assert!(matches!(
            containers.get_mut(GeometryFamily::MultiPoint),
            Err(Error::ContainerNotProvisioned(GeometryFamily::MultiPoint))
        ));
        assert_eq!(
            containers.get(GeometryFamily::Point).unwrap().fields(),
            &[Field {
                name: "name".to_owned(),
                width: DEFAULT_FIELD_WIDTH
            }]
        );
    }
}
