// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dataset manifest (`data.yaml`) consumed by YOLO training tools.

use crate::models::registry::ClassRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the manifest inside the dataset folder.
pub const MANIFEST_FILE: &str = "data.yaml";

/// Contents of `data.yaml`. Field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub path: String,
    pub train: String,
    pub val: String,
    pub nc: usize,
    pub names: Vec<String>,
}

impl Manifest {
    /// Build the manifest for `dataset_root` from the registry.
    pub fn new(dataset_root: &Path, classes: &ClassRegistry) -> Self {
        Self {
            path: dataset_root.to_string_lossy().replace('\\', "/"),
            train: "images/train".to_string(),
            val: "images/val".to_string(),
            nc: classes.len(),
            names: classes.names().to_vec(),
        }
    }
}

/// Rewrite `<dataset_root>/data.yaml`. Nothing is written while the
/// registry is empty.
pub fn write_manifest(dataset_root: &Path, classes: &ClassRegistry) -> Result<()> {
    if classes.is_empty() {
        return Ok(());
    }

    let manifest = Manifest::new(dataset_root, classes);
    let yaml = serde_yaml::to_string(&manifest)?;
    let path = dataset_root.join(MANIFEST_FILE);
    std::fs::write(&path, yaml).with_context(|| format!("Failed to write {}", path.display()))?;
    log::debug!("Wrote manifest with {} classes to {}", manifest.nc, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_manifest(path: &Path) -> Manifest {
        serde_yaml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_registry_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), &ClassRegistry::default()).unwrap();
        assert!(!dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_manifest_lists_names_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let classes = ClassRegistry::from_names(["dog", "cat"]);

        write_manifest(dir.path(), &classes).unwrap();

        let manifest = read_manifest(&dir.path().join(MANIFEST_FILE));
        assert_eq!(manifest.nc, 2);
        assert_eq!(manifest.names, vec!["dog".to_string(), "cat".to_string()]);
        assert_eq!(manifest.train, "images/train");
        assert_eq!(manifest.val, "images/val");

        let raw = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        let keys: Vec<&str> = raw
            .lines()
            .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(keys, vec!["path", "train", "val", "nc", "names"]);
    }
}
