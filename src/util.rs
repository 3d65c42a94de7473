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

use crate::geometry::ArcNode;
use crate::json::{JsonObject, JsonValue};
use crate::{Arc, Error, Position, TransformParams};

pub fn expect_type(object: &JsonObject) -> Result<&str, Error> {
    let prop = expect_property(object, "type")?;
    expect_string(prop)
}

pub fn expect_string(value: &JsonValue) -> Result<&str, Error> {
    match value.as_str() {
        Some(s) => Ok(s),
        None => Err(Error::ExpectedStringValue),
    }
}

pub fn expect_f64(value: &JsonValue) -> Result<f64, Error> {
    match value.as_f64() {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedF64Value),
    }
}

pub fn expect_i32(value: &JsonValue) -> Result<i32, Error> {
    match value.as_i64().map(i32::try_from) {
        Some(Ok(v)) => Ok(v),
        _ => Err(Error::Expectedi32Value),
    }
}

pub fn expect_array(value: &JsonValue) -> Result<&Vec<JsonValue>, Error> {
    match value.as_array() {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedArrayValue),
    }
}

pub fn expect_object(value: &JsonValue) -> Result<&JsonObject, Error> {
    match value.as_object() {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedObjectValue),
    }
}

pub fn expect_property<'a>(obj: &'a JsonObject, name: &'static str) -> Result<&'a JsonValue, Error> {
    match obj.get(name) {
        Some(v) => Ok(v),
        None => Err(Error::ExpectedProperty(name.to_string())),
    }
}

/// Retrieve the 'arcs' member of a Topology.
pub fn get_arcs(object: &JsonObject) -> Result<Vec<Arc>, Error> {
    match object.get("arcs") {
        Some(a) => json_to_arcs(a),
        None => Err(Error::TopologyExpectedArcs),
    }
}

/// Retrieve the transform declared by a Topology if any.
///
/// A `null` transform is handled as if there were no 'transform' member.
pub fn get_transform(object: &JsonObject) -> Result<Option<TransformParams>, Error> {
    let tr_json = match object.get("transform") {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(t) => expect_object(t)?,
    };
    let scale = match tr_json.get("scale") {
        Some(s) => numeric_pair(s).ok_or(Error::ScaleExpectedNumericPair)?,
        None => return Err(Error::TransformExpectedScale),
    };
    let translate = match tr_json.get("translate") {
        Some(t) => numeric_pair(t).ok_or(Error::TranslateExpectedNumericPair)?,
        None => return Err(Error::TransformExpectedTranslate),
    };
    Ok(Some(TransformParams { scale, translate }))
}

fn numeric_pair(json: &JsonValue) -> Option<[f64; 2]> {
    match json.as_array()?.as_slice() {
        [a, b] => Some([a.as_f64()?, b.as_f64()?]),
        _ => None,
    }
}

/// Read an arc reference structure nested `depth` levels deep.
///
/// Depth 1 is a flat list of arc references.
pub fn json_to_arc_node(json: &JsonValue, depth: usize) -> Result<ArcNode, Error> {
    let array = expect_array(json)?;
    if depth <= 1 {
        let mut refs = Vec::with_capacity(array.len());
        for item in array {
            refs.push(expect_i32(item)?);
        }
        Ok(ArcNode::Leaf(refs))
    } else {
        let mut children = Vec::with_capacity(array.len());
        for item in array {
            children.push(json_to_arc_node(item, depth - 1)?);
        }
        Ok(ArcNode::Nested(children))
    }
}

pub fn json_to_position(json: &JsonValue) -> Result<Position, Error> {
    let coords_array = expect_array(json)?;
    if coords_array.len() < 2 {
        return Err(Error::PositionTooShort);
    }
    let mut coords = Vec::with_capacity(coords_array.len());
    for position in coords_array {
        coords.push(expect_f64(position)?);
    }
    Ok(coords)
}

pub fn json_to_1d_positions(json: &JsonValue) -> Result<Vec<Position>, Error> {
    let coords_array = expect_array(json)?;
    let mut coords = Vec::with_capacity(coords_array.len());
    for item in coords_array {
        coords.push(json_to_position(item)?);
    }
    Ok(coords)
}

fn json_to_arcs(json: &JsonValue) -> Result<Vec<Arc>, Error> {
    let arcs_array = expect_array(json)?;
    let mut arcs = Vec::with_capacity(arcs_array.len());
    for item in arcs_array {
        arcs.push(json_to_1d_positions(item)?);
    }
    Ok(arcs)
}
