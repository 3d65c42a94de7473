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

//! Settings of a conversion run.

use std::path::PathBuf;

use crate::container::{SpatialReference, DEFAULT_FIELD_WIDTH};

/// How a Topology's declared transform is used when resolving arcs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformMode {
    /// Arcs are delta-encoded and quantized whenever a transform is declared.
    Apply,
    /// Arcs are read as absolute positions even if a transform is declared.
    #[default]
    Ignore,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// GeoJSON or TopoJSON document to convert.
    pub input: PathBuf,
    /// Directory receiving one output per geometry family.
    pub output: PathBuf,
    pub spatial_reference: SpatialReference,
    /// Width of the text fields created for GeoJSON properties.
    pub field_width: usize,
    pub transform: TransformMode,
}

impl Config {
    pub fn new<I: Into<PathBuf>, O: Into<PathBuf>>(input: I, output: O) -> Self {
        Config {
            input: input.into(),
            output: output.into(),
            spatial_reference: SpatialReference::default(),
            field_width: DEFAULT_FIELD_WIDTH,
            transform: TransformMode::default(),
        }
    }
}
