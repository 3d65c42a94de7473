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

use geojson::{Geometry as GeoJsonGeometry, Value as GeoJsonGeomValue};

use crate::arcs::{resolve_arcs, transform_point};
use crate::geometry::{ArcNode, GeometryType};
use crate::topology::{Body, TopoGeometry};
use crate::{Arc, Error, Position, TransformParams};

/// Coordinates resolved from an [`ArcNode`], with the same nesting.
#[derive(Clone, Debug, PartialEq)]
pub enum Coordinates {
    Line(Vec<Position>),
    Nested(Vec<Coordinates>),
}

impl Coordinates {
    fn into_line(self) -> Result<Vec<Position>, Error> {
        match self {
            Coordinates::Line(line) => Ok(line),
            Coordinates::Nested(_) => Err(Error::NestingMismatch { expected: 1 }),
        }
    }

    fn into_lines(self) -> Result<Vec<Vec<Position>>, Error> {
        match self {
            Coordinates::Nested(children) => children.into_iter().map(Coordinates::into_line).collect(),
            Coordinates::Line(_) => Err(Error::NestingMismatch { expected: 2 }),
        }
    }

    fn into_polygons(self) -> Result<Vec<Vec<Vec<Position>>>, Error> {
        match self {
            Coordinates::Nested(children) => children.into_iter().map(Coordinates::into_lines).collect(),
            Coordinates::Line(_) => Err(Error::NestingMismatch { expected: 3 }),
        }
    }
}

/// Resolve a nested arc reference structure into nested coordinates.
///
/// A leaf becomes one line or ring; a nested node maps the assembler over its
/// children. Empty nodes are rejected at every level.
pub fn assemble(
    node: &ArcNode,
    arcs: &[Arc],
    transform: Option<&TransformParams>,
) -> Result<Coordinates, Error> {
    match node {
        ArcNode::Leaf(refs) => resolve_arcs(refs, arcs, transform).map(Coordinates::Line),
        ArcNode::Nested(children) => {
            if children.is_empty() {
                return Err(Error::EmptyArcNode);
            }
            let mut out = Vec::with_capacity(children.len());
            for child in children {
                out.push(assemble(child, arcs, transform)?);
            }
            Ok(Coordinates::Nested(out))
        }
    }
}

/// Convert a topology object into a GeoJSON geometry.
///
/// Points are transformed as quantized positions, every other type goes
/// through [`assemble`].
pub fn materialize(
    geom: &TopoGeometry,
    arcs: &[Arc],
    transform: Option<&TransformParams>,
) -> Result<GeoJsonGeometry, Error> {
    let value = match &geom.body {
        Body::Positions(positions) => {
            let mut points = positions.iter().map(|p| transform_point(p, transform));
            match geom.geometry_type {
                GeometryType::Point => GeoJsonGeomValue::Point(
                    points.next().ok_or(Error::NestingMismatch { expected: 0 })?,
                ),
                GeometryType::MultiPoint => GeoJsonGeomValue::MultiPoint(points.collect()),
                _ => return Err(Error::NestingMismatch { expected: 1 }),
            }
        }
        Body::Arcs(node) => {
            let coords = assemble(node, arcs, transform)?;
            match geom.geometry_type {
                GeometryType::LineString => GeoJsonGeomValue::LineString(coords.into_line()?),
                GeometryType::MultiLineString => {
                    GeoJsonGeomValue::MultiLineString(coords.into_lines()?)
                }
                GeometryType::Polygon => GeoJsonGeomValue::Polygon(coords.into_lines()?),
                GeometryType::MultiPolygon => {
                    GeoJsonGeomValue::MultiPolygon(coords.into_polygons()?)
                }
                GeometryType::Point | GeometryType::MultiPoint => {
                    return Err(Error::NestingMismatch { expected: 0 })
                }
            }
        }
    };
    Ok(GeoJsonGeometry::new(value))
}
