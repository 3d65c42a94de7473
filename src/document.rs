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

use std::fs;
use std::path::Path;
use std::str::FromStr;

use geojson::Feature;

use crate::geometry::GeometryType;
use crate::json::{JsonObject, JsonValue};
use crate::{util, Error, Topology};

/// An input document, either GeoJSON features or a TopoJSON Topology.
#[derive(Clone, Debug, PartialEq)]
pub enum Document {
    /// A single Feature or a FeatureCollection, in document order.
    Features(Vec<Feature>),
    Topology(Topology),
}

impl Document {
    pub fn from_json_object(object: JsonObject) -> Result<Self, Error> {
        let ty = util::expect_type(&object)?.to_owned();
        match ty.as_str() {
            "Topology" => Topology::from_json_object(&object).map(Document::Topology),
            "Feature" => {
                let feature = decode_feature(JsonValue::Object(object)).map_err(|e| e.at_feature(0))?;
                Ok(Document::Features(vec![feature]))
            }
            "FeatureCollection" => {
                let mut object = object;
                let members = match object.remove("features") {
                    Some(JsonValue::Array(members)) => members,
                    Some(_) => return Err(Error::ExpectedArrayValue),
                    None => return Err(Error::ExpectedProperty("features".to_owned())),
                };
                let mut features = Vec::with_capacity(members.len());
                for (index, member) in members.into_iter().enumerate() {
                    features.push(decode_feature(member).map_err(|e| e.at_feature(index))?);
                }
                Ok(Document::Features(features))
            }
            _ => Err(Error::UnsupportedDocumentType(ty)),
        }
    }

    /// Read and decode the whole document at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        contents.parse()
    }

    pub fn kind(&self) -> &'static str {
        match *self {
            Document::Features(..) => "GeoJSON",
            Document::Topology(..) => "TopoJSON",
        }
    }
}

/// Decode one GeoJSON feature. Geometry type names are checked first so an
/// unknown one is reported as such; GeometryCollections are left to the
/// schema builder.
fn decode_feature(value: JsonValue) -> Result<Feature, Error> {
    let object = match value {
        JsonValue::Object(object) => object,
        _ => return Err(Error::ExpectedObjectValue),
    };
    if let Some(JsonValue::Object(geometry)) = object.get("geometry") {
        match util::expect_type(geometry)?.parse::<GeometryType>() {
            Ok(_) | Err(Error::GeometryCollectionUnsupported) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(Feature::from_json_object(object)?)
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match serde_json::from_str::<JsonValue>(s)? {
            JsonValue::Object(object) => Document::from_json_object(object),
            _ => Err(Error::ExpectedObjectValue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::Error;

    #[test]
    fn detects_topology() {
        let doc: Document = r#"{"type":"Topology","arcs":[[[2.2,2.2],[3.3,3.3]]],"objects":{"example":{"arcs":[0],"type":"LineString"}}}"#
            .parse()
            .unwrap();
        assert_eq!(doc.kind(), "TopoJSON");
    }

    #[test]
    fn single_feature_is_a_one_element_list() {
        let doc: Document = r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1.1,2.1]},"properties":{"name":"a"}}"#
            .parse()
            .unwrap();
        match doc {
            Document::Features(features) => assert_eq!(features.len(), 1),
            _ => panic!("expected features"),
        }
    }

    #[test]
    fn feature_collection_keeps_order() {
        let doc: Document = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{"n":1}},
            {"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]},"properties":{"n":2}}
        ]}"#
        .parse()
        .unwrap();
        match doc {
            Document::Features(features) => {
                let ns: Vec<_> = features
                    .iter()
                    .map(|f| f.properties.as_ref().unwrap()["n"].clone())
                    .collect();
                assert_eq!(ns, vec![serde_json::json!(1), serde_json::json!(2)]);
            }
            _ => panic!("expected features"),
        }
    }

    #[test]
    fn unknown_geometry_type_names_the_feature() {
        let err = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":{"type":"Point","coordinates":[0,0]},"properties":{}},
            {"type":"Feature","geometry":{"type":"Circle","coordinates":[0,0]},"properties":{}}
        ]}"#
        .parse::<Document>()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to decode feature #1: Encountered unknown geometry type 'Circle'."
        );
        match err {
            Error::Feature { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, Error::UnknownGeometryType(ref t) if t == "Circle"));
            }
            other => panic!("unexpected {:?}", other),
        }

        let single = r#"{"type":"Feature","geometry":{"type":"Spiral"},"properties":null}"#
            .parse::<Document>()
            .unwrap_err();
        assert_eq!(
            single.to_string(),
            "Failed to decode feature #0: Encountered unknown geometry type 'Spiral'."
        );
    }

    #[test]
    fn malformed_member_names_the_feature() {
        let err = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","geometry":null,"properties":{}},
            {"type":"Feature","geometry":{"type":"Point","coordinates":"x"},"properties":{}}
        ]}"#
        .parse::<Document>()
        .unwrap_err();
        assert!(matches!(err, Error::Feature { index: 1, .. }));
        assert!(matches!(
            r#"{"type":"FeatureCollection"}"#.parse::<Document>(),
            Err(Error::ExpectedProperty(ref p)) if p == "features"
        ));
    }

    #[test]
    fn rejects_bare_geometry_and_garbage() {
        assert!(matches!(
            r#"{"type":"Point","coordinates":[0,0]}"#.parse::<Document>(),
            Err(Error::UnsupportedDocumentType(ref t)) if t == "Point"
        ));
        assert!(matches!(
            "[1, 2]".parse::<Document>(),
            Err(Error::ExpectedObjectValue)
        ));
        assert!(matches!(
            "{not json".parse::<Document>(),
            Err(Error::MalformedJson(_))
        ));
    }
}
