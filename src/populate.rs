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

use geojson::Feature;
use log::{debug, info};

use crate::container::{Containers, GEOMETRY_SLOT};
use crate::json::JsonValue;
use crate::schema::feature_type;
use crate::to_geojson::materialize;
use crate::topology::TopoGeometry;
use crate::{Arc, Error, Topology, TransformParams};

/// Text stored for a property value: strings as they are, `null` as empty
/// text, anything else as compact JSON.
pub fn to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Append every GeoJSON feature, in input order, to its family's container.
///
/// Each record receives a value for every name in `fields`; keys a feature
/// lacks are stored as empty text.
pub fn populate_features(
    features: &[Feature],
    fields: &[String],
    containers: &mut Containers,
) -> Result<usize, Error> {
    let mut layout: Vec<&str> = Vec::with_capacity(fields.len() + 1);
    layout.push(GEOMETRY_SLOT);
    layout.extend(fields.iter().map(String::as_str));

    for (index, feature) in features.iter().enumerate() {
        insert_feature(feature, fields, &layout, containers).map_err(|e| e.at_feature(index))?;
    }
    info!("Inserted {} GeoJSON features", features.len());
    Ok(features.len())
}

fn insert_feature(
    feature: &Feature,
    fields: &[String],
    layout: &[&str],
    containers: &mut Containers,
) -> Result<(), Error> {
    let family = feature_type(feature)?.family();
    let geometry = feature.geometry.clone().ok_or(Error::FeatureWithoutGeometry)?;
    let values = fields
        .iter()
        .map(|field| {
            feature
                .properties
                .as_ref()
                .and_then(|p| p.get(field))
                .map(to_text)
                .unwrap_or_default()
        })
        .collect();
    containers
        .get_mut(family)?
        .insert_cursor(layout)?
        .insert_row(geometry, values)
}

/// Materialize every topology object, in input order, into its family's
/// container. Topology objects carry no attributes.
pub fn populate_topology(
    topo: &Topology,
    transform: Option<&TransformParams>,
    containers: &mut Containers,
) -> Result<usize, Error> {
    for (index, object) in topo.objects.iter().enumerate() {
        insert_object(object, &topo.arcs, transform, containers).map_err(|e| e.at_feature(index))?;
        debug!("Object #{} resolved as {}", index, object.geometry_type);
    }
    info!("Inserted {} topology objects", topo.objects.len());
    Ok(topo.objects.len())
}

fn insert_object(
    object: &TopoGeometry,
    arcs: &[Arc],
    transform: Option<&TransformParams>,
    containers: &mut Containers,
) -> Result<(), Error> {
    let geometry = materialize(object, arcs, transform)?;
    containers
        .get_mut(object.geometry_type.family())?
        .insert_cursor(&[GEOMETRY_SLOT])?
        .insert_row(geometry, Vec::new())
}
