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

#![warn(missing_debug_implementations)]
//! Load [GeoJSON](https://geojson.org) and [TopoJSON](https://github.com/topojson/topojson-specification)
//! documents into feature containers, one per geometry family.
//!
//! GeoJSON features keep their properties as text fields; TopoJSON objects
//! are rebuilt from the shared, delta-encoded arcs of their Topology.
//!
//! # Example
//! ```
//! use json2fc::{load, Config, Document, GeometryFamily};
//!
//! let doc: Document = r#"{"type": "Topology",
//!     "arcs": [[[0, 0], [1, 0]], [[1, 0], [0, 1]], [[0, 1], [0, 0]]],
//!     "objects": [{"type": "Polygon", "arcs": [[0, 1, 2]]}]}"#
//!     .parse()
//!     .unwrap();
//! let (_, containers) = load(&doc, &Config::new("in.topojson", "out")).unwrap();
//! let polygons = containers.get(GeometryFamily::Polygon).unwrap();
//! assert_eq!(polygons.len(), 1);
//! ```

/// Position
///
/// [TopoJSON Format Specification § 2.1.1](https://github.com/topojson/topojson-specification#211-positions)
pub type Position = geojson::Position;

/// Arc
///
/// [TopoJSON Format Specification § 2.1.3](https://github.com/topojson/topojson-specification#213-arcs)
pub type Arc = Vec<Position>;

/// Arc indexes of a line or ring.
///
/// [TopoJSON Format Specification § 2.1.4](https://github.com/topojson/topojson-specification#214-arc-indexes)
pub type ArcIndexes = Vec<i32>;

mod json {
    pub use serde_json::{Map, Value as JsonValue};
    pub type JsonObject = Map<String, JsonValue>;
}

pub mod arcs;
pub mod config;
pub mod container;
mod convert;
mod document;
mod error;
pub mod export;
mod geometry;
pub mod populate;
mod schema;
pub mod to_geojson;
mod topology;
mod util;

pub use crate::config::{Config, TransformMode};
pub use crate::container::{Containers, FeatureContainer, Field, Record, SpatialReference};
pub use crate::convert::{convert, convert_document, load, ConversionReport};
pub use crate::document::Document;
pub use crate::error::{Error, Result};
pub use crate::export::{ContainerExport, DirectoryStore, ExportOutcome, ExportSink};
pub use crate::geometry::{ArcNode, GeometryFamily, GeometryType};
pub use crate::schema::Schema;
pub use crate::topology::{Body, TopoGeometry, Topology, TransformParams};
