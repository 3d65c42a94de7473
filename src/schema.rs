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

use std::collections::{BTreeSet, HashSet};

use geojson::Feature;
use log::debug;

use crate::geometry::{GeometryFamily, GeometryType};
use crate::{Document, Error, Topology};

/// Geometry types and attribute fields discovered in a document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    pub geometry_types: BTreeSet<GeometryType>,
    /// Union of the property keys of every feature, in first-seen order.
    /// Always empty for a Topology.
    pub fields: Vec<String>,
}

impl Schema {
    pub fn from_document(doc: &Document) -> Result<Self, Error> {
        let schema = match doc {
            Document::Features(features) => Schema::from_features(features)?,
            Document::Topology(topo) => Schema::from_topology(topo),
        };
        debug!(
            "Discovered geometry types {:?} and {} fields",
            schema.geometry_types,
            schema.fields.len()
        );
        Ok(schema)
    }

    /// Scan GeoJSON features for geometry types and property keys.
    ///
    /// A key missing from some features is still a field.
    pub fn from_features(features: &[Feature]) -> Result<Self, Error> {
        let mut schema = Schema::default();
        let mut seen = HashSet::new();
        for (index, feature) in features.iter().enumerate() {
            let ty = feature_type(feature).map_err(|e| e.at_feature(index))?;
            schema.geometry_types.insert(ty);
            if let Some(ref properties) = feature.properties {
                for key in properties.keys() {
                    if seen.insert(key.as_str()) {
                        schema.fields.push(key.to_owned());
                    }
                }
            }
        }
        Ok(schema)
    }

    pub fn from_topology(topo: &Topology) -> Self {
        Schema {
            geometry_types: topo.objects.iter().map(|o| o.geometry_type).collect(),
            fields: Vec::new(),
        }
    }

    /// Families needing a container, in family order.
    pub fn families(&self) -> BTreeSet<GeometryFamily> {
        self.geometry_types.iter().map(GeometryType::family).collect()
    }
}

/// Geometry type of a GeoJSON feature; features without geometry are rejected.
pub fn feature_type(feature: &Feature) -> Result<GeometryType, Error> {
    match feature.geometry {
        Some(ref geometry) => GeometryType::of_value(&geometry.value),
        None => Err(Error::FeatureWithoutGeometry),
    }
}
