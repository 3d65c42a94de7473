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

use serde::Serialize;

use crate::{ArcIndexes, Error};

/// The six geometry types a feature or topology object may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match *self {
            GeometryType::Point => "Point",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::LineString => "LineString",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPolygon => "MultiPolygon",
        }
    }

    /// Output container receiving geometries of this type.
    pub fn family(&self) -> GeometryFamily {
        match *self {
            GeometryType::Point => GeometryFamily::Point,
            GeometryType::MultiPoint => GeometryFamily::MultiPoint,
            GeometryType::LineString | GeometryType::MultiLineString => GeometryFamily::Polyline,
            GeometryType::Polygon | GeometryType::MultiPolygon => GeometryFamily::Polygon,
        }
    }

    /// Nesting depth of the 'arcs' member of a topology object of this type.
    ///
    /// `None` for the point types, which carry literal coordinates.
    pub fn arc_depth(&self) -> Option<usize> {
        match *self {
            GeometryType::Point | GeometryType::MultiPoint => None,
            GeometryType::LineString => Some(1),
            GeometryType::MultiLineString | GeometryType::Polygon => Some(2),
            GeometryType::MultiPolygon => Some(3),
        }
    }

    /// Type of an already decoded GeoJSON geometry value.
    pub fn of_value(value: &geojson::Value) -> Result<Self, Error> {
        match *value {
            geojson::Value::Point(..) => Ok(GeometryType::Point),
            geojson::Value::MultiPoint(..) => Ok(GeometryType::MultiPoint),
            geojson::Value::LineString(..) => Ok(GeometryType::LineString),
            geojson::Value::MultiLineString(..) => Ok(GeometryType::MultiLineString),
            geojson::Value::Polygon(..) => Ok(GeometryType::Polygon),
            geojson::Value::MultiPolygon(..) => Ok(GeometryType::MultiPolygon),
            geojson::Value::GeometryCollection(..) => Err(Error::GeometryCollectionUnsupported),
        }
    }
}

impl FromStr for GeometryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(GeometryType::Point),
            "MultiPoint" => Ok(GeometryType::MultiPoint),
            "LineString" => Ok(GeometryType::LineString),
            "MultiLineString" => Ok(GeometryType::MultiLineString),
            "Polygon" => Ok(GeometryType::Polygon),
            "MultiPolygon" => Ok(GeometryType::MultiPolygon),
            "GeometryCollection" => Err(Error::GeometryCollectionUnsupported),
            _ => Err(Error::UnknownGeometryType(s.to_owned())),
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output container kind. Several geometry types collapse into one family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeometryFamily {
    Point,
    MultiPoint,
    Polyline,
    Polygon,
}

impl GeometryFamily {
    /// Position of the family in enum-indexed tables.
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Name of the container and of its persisted output.
    pub fn name(&self) -> &'static str {
        match *self {
            GeometryFamily::Point => "POINT",
            GeometryFamily::MultiPoint => "MULTIPOINT",
            GeometryFamily::Polyline => "POLYLINE",
            GeometryFamily::Polygon => "POLYGON",
        }
    }
}

impl fmt::Display for GeometryFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arc references of a topology object, nested as deep as its type requires.
///
/// The shape is fixed when the object is parsed, from the declared type:
/// a LineString is a single `Leaf`, a Polygon a `Nested` list of leaves (one
/// per ring) and a MultiPolygon a `Nested` list of such lists.
#[derive(Clone, Debug, PartialEq)]
pub enum ArcNode {
    Leaf(ArcIndexes),
    Nested(Vec<ArcNode>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_maps_to_a_family() {
        let cases = [
            ("Point", GeometryFamily::Point),
            ("MultiPoint", GeometryFamily::MultiPoint),
            ("LineString", GeometryFamily::Polyline),
            ("MultiLineString", GeometryFamily::Polyline),
            ("Polygon", GeometryFamily::Polygon),
            ("MultiPolygon", GeometryFamily::Polygon),
        ];
        for (name, family) in cases {
            let ty: GeometryType = name.parse().unwrap();
            assert_eq!(ty.as_str(), name);
            assert_eq!(ty.family(), family);
        }
    }

    #[test]
    fn unknown_type_is_rejected() {
        match "Circle".parse::<GeometryType>() {
            Err(Error::UnknownGeometryType(name)) => assert_eq!(name, "Circle"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            "GeometryCollection".parse::<GeometryType>(),
            Err(Error::GeometryCollectionUnsupported)
        ));
    }

    #[test]
    fn families_index_their_table_slot() {
        let families = [
            GeometryFamily::Point,
            GeometryFamily::MultiPoint,
            GeometryFamily::Polyline,
            GeometryFamily::Polygon,
        ];
        for (i, family) in families.iter().enumerate() {
            assert_eq!(family.index(), i);
        }
        assert_eq!(GeometryFamily::Polyline.to_string(), "POLYLINE");
    }
}
