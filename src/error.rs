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
use std::io;

use crate::geometry::GeometryFamily;

/// Error raised while reading, decoding or loading a document.
///
/// Every variant is fatal for the conversion run: a single malformed feature
/// aborts the whole run.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    MalformedJson(String),
    Io(io::Error),
    UnsupportedDocumentType(String),
    ExpectedType { expected: String, actual: String },
    TopologyExpectedObjects,
    TopologyExpectedArcs,
    TransformExpectedScale,
    TransformExpectedTranslate,
    ScaleExpectedNumericPair,
    TranslateExpectedNumericPair,
    PositionTooShort,
    EmptyArcNode,
    ArcIndexOutOfBounds { index: i32, len: usize },
    NestingMismatch { expected: usize },
    UnknownGeometryType(String),
    GeometryCollectionUnsupported,
    FeatureWithoutGeometry,
    ContainerNotProvisioned(GeometryFamily),
    FieldMismatch { expected: usize, actual: usize },
    UnknownField(String),
    FamilyMismatch { expected: GeometryFamily, actual: GeometryFamily },
    InvalidSpatialReference(String),
    /// Wraps the error raised while handling one feature (GeoJSON) or
    /// object (Topology), identified by its position in the input.
    Feature { index: usize, source: Box<Error> },

    ExpectedStringValue,
    ExpectedProperty(String),
    Expectedi32Value,
    ExpectedF64Value,
    ExpectedArrayValue,
    ExpectedObjectValue,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach the input position of the feature being processed.
    pub fn at_feature(self, index: usize) -> Self {
        Error::Feature {
            index,
            source: Box::new(self),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MalformedJson(ref reason) => write!(f, "Encountered malformed JSON: {}", reason),
            Error::Io(ref e) => write!(f, "I/O error: {}", e),
            Error::UnsupportedDocumentType(ref ty) => write!(
                f,
                "Expected a Feature, FeatureCollection or Topology document, found '{}'.",
                ty
            ),
            Error::ExpectedType {
                ref expected,
                ref actual,
            } => write!(f, "Expected type '{}', found '{}'", expected, actual),
            Error::TopologyExpectedObjects => {
                write!(f, "Expected member with the name 'objects' in Topology.")
            }
            Error::TopologyExpectedArcs => {
                write!(f, "Expected member with the name 'arcs' in Topology.")
            }
            Error::TransformExpectedScale => {
                write!(f, "Transform must have a member with the name 'scale'.")
            }
            Error::TransformExpectedTranslate => {
                write!(f, "Transform must have a member with the name 'translate'.")
            }
            Error::ScaleExpectedNumericPair => {
                write!(f, "'scale' must be an array of two numbers.")
            }
            Error::TranslateExpectedNumericPair => {
                write!(f, "'translate' must be an array of two numbers.")
            }
            Error::PositionTooShort => write!(f, "A position must have at least two elements."),
            Error::EmptyArcNode => write!(
                f,
                "Encountered an empty 'arcs' list; nesting depth cannot be determined."
            ),
            Error::ArcIndexOutOfBounds { index, len } => write!(
                f,
                "Arc reference {} does not resolve to one of the {} arcs of the topology.",
                index, len
            ),
            Error::NestingMismatch { expected } => write!(
                f,
                "Resolved coordinates do not have the expected nesting depth {}.",
                expected
            ),
            Error::UnknownGeometryType(ref ty) => {
                write!(f, "Encountered unknown geometry type '{}'.", ty)
            }
            Error::GeometryCollectionUnsupported => write!(
                f,
                "GeometryCollection maps to no geometry family and cannot be loaded."
            ),
            Error::FeatureWithoutGeometry => write!(f, "Encountered a feature with no geometry."),
            Error::ContainerNotProvisioned(family) => {
                write!(f, "No container was provisioned for family {}.", family)
            }
            Error::FieldMismatch { expected, actual } => write!(
                f,
                "Insert cursor expects {} attribute values, got {}.",
                expected, actual
            ),
            Error::UnknownField(ref name) => write!(f, "Container has no field named '{}'.", name),
            Error::FamilyMismatch { expected, actual } => write!(
                f,
                "Cannot insert a {} geometry into the {} container.",
                actual, expected
            ),
            Error::InvalidSpatialReference(ref s) => {
                write!(f, "'{}' is not a valid spatial reference identifier.", s)
            }
            Error::Feature { index, ref source } => {
                write!(f, "Failed to decode feature #{}: {}", index, source)
            }
            Error::ExpectedStringValue => write!(f, "Expected a string value."),
            Error::ExpectedProperty(ref prop_name) => {
                write!(f, "Expected property '{}'.", prop_name)
            }
            Error::ExpectedF64Value => write!(f, "Expected a floating-point value."),
            Error::Expectedi32Value => write!(f, "Expected an integer arc reference."),
            Error::ExpectedArrayValue => write!(f, "Expected an array."),
            Error::ExpectedObjectValue => write!(f, "Expected an object."),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Io(ref e) => Some(e),
            Error::Feature { ref source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedJson(e.to_string())
    }
}

impl From<geojson::Error> for Error {
    fn from(e: geojson::Error) -> Self {
        Error::MalformedJson(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn feature_error_names_the_feature() {
        let e = Error::ArcIndexOutOfBounds { index: -4, len: 2 }.at_feature(7);
        assert_eq!(
            e.to_string(),
            "Failed to decode feature #7: Arc reference -4 does not resolve to one of the 2 arcs of the topology."
        );
    }

    #[test]
    fn feature_error_exposes_source() {
        use std::error::Error as StdError;
        let e = Error::EmptyArcNode.at_feature(0);
        assert!(e.source().is_some());
        assert!(Error::EmptyArcNode.source().is_none());
    }
}
