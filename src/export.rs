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
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, GeoJson};
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::json;

use crate::container::{Containers, FeatureContainer};
use crate::geometry::GeometryFamily;
use crate::json::{JsonObject, JsonValue};
use crate::Error;

/// What happened to one container during export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// No output with this name existed before.
    Created,
    /// A previous output with the same name was removed and replaced.
    Overwritten,
    Failed { reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContainerExport {
    pub family: GeometryFamily,
    pub path: PathBuf,
    pub records: usize,
    pub outcome: ExportOutcome,
}

/// Destination store for the containers of a run.
pub trait ExportSink {
    /// Persist one container under its family name, replacing any output
    /// already stored under that name.
    fn persist(&mut self, container: &FeatureContainer) -> ContainerExport;

    /// Persist every container. A failure on one container does not stop the
    /// others; it is reported in its [`ContainerExport`].
    fn export(&mut self, containers: &Containers) -> Vec<ContainerExport> {
        containers.iter().map(|c| self.persist(c)).collect()
    }
}

/// A directory holding one GeoJSON file per geometry family.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open the store at `root`, creating the directory if needed.
    pub fn create<P: Into<PathBuf>>(root: P) -> Result<Self, Error> {
        let root = root.into();
        if root.is_dir() {
            debug!("Store {} already exists", root.display());
        } else {
            fs::create_dir_all(&root)?;
            info!("Created store {}", root.display());
        }
        Ok(DirectoryStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, family: GeometryFamily) -> PathBuf {
        self.root.join(format!("{}.geojson", family.name()))
    }
}

impl ExportSink for DirectoryStore {
    fn persist(&mut self, container: &FeatureContainer) -> ContainerExport {
        let path = self.path_for(container.family());
        let outcome = write_container(&path, container);
        match outcome {
            ExportOutcome::Failed { ref reason } => {
                warn!("Export of {} failed: {}", container.name(), reason)
            }
            ExportOutcome::Overwritten => {
                warn!("Overwrote existing output {}", path.display())
            }
            ExportOutcome::Created => debug!("Wrote {}", path.display()),
        }
        ContainerExport {
            family: container.family(),
            path,
            records: container.len(),
            outcome,
        }
    }
}

fn write_container(path: &Path, container: &FeatureContainer) -> ExportOutcome {
    let existed = path.exists();
    if existed {
        if let Err(e) = fs::remove_file(path) {
            return ExportOutcome::Failed {
                reason: format!("cannot remove existing output: {}", e),
            };
        }
    }
    let contents = GeoJson::FeatureCollection(to_feature_collection(container)).to_string();
    match fs::write(path, contents) {
        Err(e) => ExportOutcome::Failed {
            reason: e.to_string(),
        },
        Ok(()) if existed => ExportOutcome::Overwritten,
        Ok(()) => ExportOutcome::Created,
    }
}

/// GeoJSON view of a container: every field becomes a string property and
/// the spatial reference is named in a `crs` member.
pub fn to_feature_collection(container: &FeatureContainer) -> FeatureCollection {
    let fields = container.fields();
    let features = container
        .records()
        .iter()
        .map(|record| {
            let properties: JsonObject = fields
                .iter()
                .zip(&record.values)
                .map(|(field, value)| (field.name.clone(), JsonValue::String(value.clone())))
                .collect();
            Feature {
                bbox: None,
                geometry: Some(record.geometry.clone()),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let mut foreign_members = JsonObject::new();
    foreign_members.insert(
        String::from("crs"),
        json!({
            "type": "name",
            "properties": {
                "name": format!("urn:ogc:def:crs:EPSG::{}", container.spatial_reference().srid)
            }
        }),
    );
    foreign_members.insert(
        String::from("name"),
        JsonValue::String(container.name().to_owned()),
    );
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{SpatialReference, GEOMETRY_SLOT};
    use geojson::{Geometry, Value};
    use pretty_assertions::assert_eq;

    fn point_container() -> Containers {
        let mut containers = Containers::provision(
            &[GeometryFamily::Point],
            &["name".to_owned()],
            SpatialReference::WGS84,
            100,
        );
        containers
            .get_mut(GeometryFamily::Point)
            .unwrap()
            .insert_cursor(&[GEOMETRY_SLOT, "name"])
            .unwrap()
            .insert_row(Geometry::new(Value::Point(vec![1., 2.])), vec!["a".to_owned()])
            .unwrap();
        containers
    }

    #[test]
    fn container_as_feature_collection() {
        let containers = point_container();
        let fc = to_feature_collection(containers.get(GeometryFamily::Point).unwrap());
        assert_eq!(
            serde_json::to_value(&fc).unwrap(),
            json!({
                "type": "FeatureCollection",
                "name": "POINT",
                "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::4326"}},
                "features": [{
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
                    "properties": {"name": "a"}
                }]
            })
        );
    }

    #[test]
    fn second_export_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("out.store");
        let containers = point_container();

        let mut store = DirectoryStore::create(&root).unwrap();
        assert!(store.root().is_dir());
        let first = store.export(&containers);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].outcome, ExportOutcome::Created);
        assert_eq!(first[0].records, 1);
        assert_eq!(first[0].path, root.join("POINT.geojson"));

        let mut again = DirectoryStore::create(&root).unwrap();
        let second = again.export(&containers);
        assert_eq!(second[0].outcome, ExportOutcome::Overwritten);

        let written = fs::read_to_string(root.join("POINT.geojson")).unwrap();
        match written.parse::<GeoJson>().unwrap() {
            GeoJson::FeatureCollection(fc) => assert_eq!(fc.features.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unremovable_output_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirectoryStore::create(dir.path()).unwrap();
        // A directory in place of the output file cannot be removed as a file.
        fs::create_dir(store.path_for(GeometryFamily::Point)).unwrap();
        let report = store.export(&point_container());
        assert!(matches!(report[0].outcome, ExportOutcome::Failed { .. }));
    }
}
