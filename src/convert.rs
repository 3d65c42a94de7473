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

use log::info;
use serde::Serialize;

use crate::config::{Config, TransformMode};
use crate::container::Containers;
use crate::export::{ContainerExport, DirectoryStore, ExportOutcome, ExportSink};
use crate::geometry::GeometryFamily;
use crate::populate::{populate_features, populate_topology};
use crate::{Document, Error, Schema};

/// Summary of a conversion run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConversionReport {
    pub input_kind: &'static str,
    pub families: Vec<GeometryFamily>,
    pub fields: Vec<String>,
    pub records: usize,
    pub exports: Vec<ContainerExport>,
}

impl ConversionReport {
    /// True when every container was persisted.
    pub fn is_complete(&self) -> bool {
        !self
            .exports
            .iter()
            .any(|e| matches!(e.outcome, ExportOutcome::Failed { .. }))
    }
}

/// Build and fill the containers for a document.
///
/// Discovery, provisioning and population run in this order; the first
/// malformed feature aborts with an error naming it.
pub fn load(doc: &Document, config: &Config) -> Result<(Schema, Containers), Error> {
    let schema = Schema::from_document(doc)?;
    let families = schema.families();
    let mut containers = Containers::provision(
        &families,
        &schema.fields,
        config.spatial_reference,
        config.field_width,
    );
    match doc {
        Document::Features(features) => {
            populate_features(features, &schema.fields, &mut containers)?;
        }
        Document::Topology(topo) => {
            let transform = match config.transform {
                TransformMode::Apply => topo.transform.as_ref(),
                TransformMode::Ignore => None,
            };
            populate_topology(topo, transform, &mut containers)?;
        }
    }
    Ok((schema, containers))
}

/// Convert `config.input` into per-family outputs under `config.output`.
///
/// The store is only created once every feature has been loaded.
pub fn convert(config: &Config) -> Result<ConversionReport, Error> {
    let doc = Document::from_path(&config.input)?;
    info!("Read {} document {}", doc.kind(), config.input.display());
    let (schema, containers) = load(&doc, config)?;
    let mut store = DirectoryStore::create(&config.output)?;
    let exports = store.export(&containers);
    Ok(summarize(&doc, schema, &containers, exports))
}

/// Load `doc` and hand its containers to `sink`.
pub fn convert_document<S: ExportSink>(
    doc: &Document,
    config: &Config,
    sink: &mut S,
) -> Result<ConversionReport, Error> {
    let (schema, containers) = load(doc, config)?;
    let exports = sink.export(&containers);
    Ok(summarize(doc, schema, &containers, exports))
}

fn summarize(
    doc: &Document,
    schema: Schema,
    containers: &Containers,
    exports: Vec<ContainerExport>,
) -> ConversionReport {
    let report = ConversionReport {
        input_kind: doc.kind(),
        families: containers.iter().map(|c| c.family()).collect(),
        fields: schema.fields,
        records: containers.iter().map(|c| c.len()).sum(),
        exports,
    };
    info!(
        "Loaded {} records into {} containers",
        report.records,
        report.families.len()
    );
    report
}
