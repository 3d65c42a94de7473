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

use crate::geometry::{ArcNode, GeometryType};
use crate::json::{JsonObject, JsonValue};
use crate::{util, Arc, Error, Position};

/// Quantization parameters of a Topology.
///
/// [TopoJSON Format Specification § 2.1.2](https://github.com/topojson/topojson-specification#212-transforms)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformParams {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

/// Geometry carried by a topology object.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Literal (possibly quantized) positions of a Point or MultiPoint.
    Positions(Vec<Position>),
    /// Arc references of a line or polygon type.
    Arcs(ArcNode),
}

/// One geometry object of a Topology.
#[derive(Clone, Debug, PartialEq)]
pub struct TopoGeometry {
    /// Key of the enclosing member of 'objects', when 'objects' is a mapping.
    pub name: Option<String>,
    pub geometry_type: GeometryType,
    pub body: Body,
}

impl TopoGeometry {
    pub fn new(geometry_type: GeometryType, body: Body) -> Self {
        TopoGeometry {
            name: None,
            geometry_type,
            body,
        }
    }

    fn from_json_object(object: &JsonObject, name: Option<&str>) -> Result<Self, Error> {
        let geometry_type: GeometryType = util::expect_type(object)?.parse()?;
        let body = match geometry_type.arc_depth() {
            Some(depth) => Body::Arcs(util::json_to_arc_node(
                util::expect_property(object, "arcs")?,
                depth,
            )?),
            None => {
                let coords = util::expect_property(object, "coordinates")?;
                match geometry_type {
                    GeometryType::Point => Body::Positions(vec![util::json_to_position(coords)?]),
                    _ => Body::Positions(util::json_to_1d_positions(coords)?),
                }
            }
        };
        Ok(TopoGeometry {
            name: name.map(str::to_owned),
            geometry_type,
            body,
        })
    }
}

/// A decoded TopoJSON Topology.
///
/// [TopoJSON Format Specification § 2.1](https://github.com/topojson/topojson-specification#21-topology-objects)
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    pub arcs: Vec<Arc>,
    pub transform: Option<TransformParams>,
    /// Geometry objects in document order, GeometryCollections flattened.
    pub objects: Vec<TopoGeometry>,
}

impl Topology {
    pub fn from_json_object(object: &JsonObject) -> Result<Self, Error> {
        let ty = util::expect_type(object)?;
        if ty != "Topology" {
            return Err(Error::ExpectedType {
                expected: "Topology".to_owned(),
                actual: ty.to_owned(),
            });
        }
        let arcs = util::get_arcs(object)?;
        let transform = util::get_transform(object)?;
        let mut objects = Vec::new();
        match object.get("objects") {
            Some(JsonValue::Object(named)) => {
                for (name, value) in named {
                    push_objects(&mut objects, value, Some(name.as_str()))?;
                }
            }
            Some(JsonValue::Array(list)) => {
                for value in list {
                    push_objects(&mut objects, value, None)?;
                }
            }
            Some(_) | None => return Err(Error::TopologyExpectedObjects),
        }
        Ok(Topology {
            arcs,
            transform,
            objects,
        })
    }
}

fn push_objects(
    out: &mut Vec<TopoGeometry>,
    value: &JsonValue,
    name: Option<&str>,
) -> Result<(), Error> {
    let object = util::expect_object(value)?;
    if util::expect_type(object)? == "GeometryCollection" {
        for member in util::expect_array(util::expect_property(object, "geometries")?)? {
            push_objects(out, member, name)?;
        }
        return Ok(());
    }
    let index = out.len();
    let geometry = TopoGeometry::from_json_object(object, name).map_err(|e| e.at_feature(index))?;
    out.push(geometry);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: JsonValue) -> Result<Topology, Error> {
        Topology::from_json_object(value.as_object().unwrap())
    }

    #[test]
    fn invalid_topologies() {
        assert!(parse(json!({})).is_err());
        assert!(matches!(
            parse(json!({"type": "foo"})),
            Err(Error::ExpectedType { .. })
        ));
        assert!(matches!(
            parse(json!({"type": "Topology"})),
            Err(Error::TopologyExpectedArcs)
        ));
        assert!(matches!(
            parse(json!({"type": "Topology", "arcs": []})),
            Err(Error::TopologyExpectedObjects)
        ));
    }

    #[test]
    fn objects_as_sequence() {
        let topo = parse(json!({
            "type": "Topology",
            "arcs": [[[0, 0], [1, 0]], [[1, 0], [0, 1]], [[0, 1], [0, 0]]],
            "transform": {"scale": [1, 1], "translate": [0, 0]},
            "objects": [
                {"type": "Polygon", "arcs": [[0, 1, 2]]},
                {"type": "LineString", "arcs": [0, -2]}
            ]
        }))
        .unwrap();
        assert_eq!(topo.arcs.len(), 3);
        assert_eq!(
            topo.transform,
            Some(TransformParams {
                scale: [1., 1.],
                translate: [0., 0.]
            })
        );
        assert_eq!(
            topo.objects,
            vec![
                TopoGeometry::new(
                    GeometryType::Polygon,
                    Body::Arcs(ArcNode::Nested(vec![ArcNode::Leaf(vec![0, 1, 2])]))
                ),
                TopoGeometry::new(GeometryType::LineString, Body::Arcs(ArcNode::Leaf(vec![0, -2]))),
            ]
        );
    }

    #[test]
    fn named_geometry_collection_is_flattened() {
        // Example from https://github.com/topojson/topojson-specification#11-examples
        let topo = parse(json!({
            "type": "Topology",
            "objects": {"example": {"type": "GeometryCollection", "geometries": [
                {"type": "Point", "properties": {"prop0": "value0"}, "coordinates": [102, 0.5]},
                {"type": "LineString", "arcs": [0]},
                {"type": "Polygon", "arcs": [[-2]]}
            ]}},
            "arcs": [
                [[102, 0], [103, 1], [104, 0], [105, 1]],
                [[100, 0], [101, 0], [101, 1], [100, 1], [100, 0]]
            ]
        }))
        .unwrap();
        assert_eq!(topo.transform, None);
        let types: Vec<GeometryType> = topo.objects.iter().map(|o| o.geometry_type).collect();
        assert_eq!(
            types,
            vec![GeometryType::Point, GeometryType::LineString, GeometryType::Polygon]
        );
        assert!(topo.objects.iter().all(|o| o.name.as_deref() == Some("example")));
        assert_eq!(topo.objects[0].body, Body::Positions(vec![vec![102., 0.5]]));
    }

    #[test]
    fn unknown_object_type_names_the_object() {
        let err = parse(json!({
            "type": "Topology",
            "arcs": [],
            "objects": [
                {"type": "Point", "coordinates": [0, 0]},
                {"type": "Spiral", "arcs": [0]}
            ]
        }))
        .unwrap_err();
        match err {
            Error::Feature { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, Error::UnknownGeometryType(ref t) if t == "Spiral"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_arcs_member() {
        let err = parse(json!({
            "type": "Topology",
            "arcs": [],
            "objects": [{"type": "LineString", "coordinates": [[0, 0]]}]
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to decode feature #0: Expected property 'arcs'."
        );
    }
}
