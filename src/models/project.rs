// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! A project ties together the dataset being written (labels, manifest),
//! the project folder holding the shared class registry, and the split
//! currently being labelled.

use super::registry::ClassRegistry;
use super::store::AnnotationStore;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File name of the class registry inside the project folder.
pub const REGISTRY_FILE: &str = "classes.json";

/// Dataset split being labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Split {
    Train,
    Val,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
        }
    }
}

/// Project-level state shared by every image in a run.
#[derive(Debug)]
pub struct Project {
    pub dataset_root: PathBuf,
    pub project_root: PathBuf,
    pub split: Split,
    pub classes: ClassRegistry,
}

impl Project {
    /// Open a project, creating the label and project folders and loading
    /// the class registry if one exists.
    pub fn open(dataset_root: &Path, project_root: &Path, split: Split) -> Result<Self> {
        let labels_dir = labels_dir(dataset_root, split);
        std::fs::create_dir_all(&labels_dir)
            .with_context(|| format!("Failed to create {}", labels_dir.display()))?;
        std::fs::create_dir_all(project_root)
            .with_context(|| format!("Failed to create {}", project_root.display()))?;

        let classes = ClassRegistry::load(&project_root.join(REGISTRY_FILE))?;

        Ok(Self {
            dataset_root: dataset_root.to_path_buf(),
            project_root: project_root.to_path_buf(),
            split,
            classes,
        })
    }

    /// Folder holding this split's label files.
    pub fn labels_dir(&self) -> PathBuf {
        labels_dir(&self.dataset_root, self.split)
    }

    /// Folder this split's images are copied into.
    pub fn images_dir(&self) -> PathBuf {
        self.dataset_root.join("images").join(self.split.as_str())
    }

    /// Label file for `image`: same stem, `.txt`, in the labels folder.
    pub fn label_path(&self, image: &Path) -> PathBuf {
        let stem = image.file_stem().unwrap_or(image.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".txt");
        self.labels_dir().join(name)
    }

    /// Rewrite `data.yaml` from the current registry.
    pub fn write_manifest(&self) -> Result<()> {
        crate::io::manifest::write_manifest(&self.dataset_root, &self.classes)
    }

    /// Delete class `id` from the registry and every annotation in `store`,
    /// then refresh the manifest.
    ///
    /// Registry and store are updated back to back, before anything else
    /// can read either. Label files already saved for other images keep
    /// their old ids.
    pub fn delete_class(&mut self, id: usize, store: &mut AnnotationStore) -> Result<()> {
        if let Some(deleted) = self.classes.delete(id)? {
            store.reassign_for_class_deletion(deleted);
            self.write_manifest()?;
            log::warn!(
                "Deleted class {}; saved label files in {} still use the old ids",
                deleted,
                self.labels_dir().display()
            );
        }
        Ok(())
    }
}

fn labels_dir(dataset_root: &Path, split: Split) -> PathBuf {
    dataset_root.join("labels").join(split.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::{Annotation, Rect};

    #[test]
    fn test_open_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = dir.path().join("dataset");
        let project_dir = dir.path().join("project");

        let project = Project::open(&dataset, &project_dir, Split::Val).unwrap();

        assert!(dataset.join("labels/val").is_dir());
        assert!(project_dir.is_dir());
        assert!(project.classes.is_empty());
        assert_eq!(
            project.label_path(Path::new("/photos/cat.001.jpg")),
            dataset.join("labels/val/cat.001.txt")
        );
        assert_eq!(project.images_dir(), dataset.join("images/val"));
    }

    #[test]
    fn test_delete_class_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut project =
            Project::open(&dir.path().join("ds"), &dir.path().join("proj"), Split::Train).unwrap();
        for name in ["dog", "cat", "bird"] {
            project.classes.get_or_create(name).unwrap();
        }

        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let mut store = AnnotationStore::new(vec![
            Annotation::new_box(rect, 1),
            Annotation::new_box(rect, 2),
            Annotation::new_box(rect, 0),
        ]);

        project.delete_class(1, &mut store).unwrap();

        assert_eq!(project.classes.id_of("dog"), Some(0));
        assert_eq!(project.classes.id_of("bird"), Some(1));
        assert_eq!(project.classes.len(), 2);
        let classes: Vec<usize> = store.annotations().iter().map(|a| a.class_id).collect();
        assert_eq!(classes, vec![1, 0]);

        let manifest = std::fs::read_to_string(dir.path().join("ds/data.yaml")).unwrap();
        assert!(manifest.contains("nc: 2"));
    }

    #[test]
    fn test_delete_class_leaves_saved_labels_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut project =
            Project::open(&dir.path().join("ds"), &dir.path().join("proj"), Split::Train).unwrap();
        for name in ["dog", "cat"] {
            project.classes.get_or_create(name).unwrap();
        }
        let saved = project.labels_dir().join("other.txt");
        std::fs::write(&saved, "1 0.5 0.5 0.1 0.1\n").unwrap();

        let mut store = AnnotationStore::default();
        project.delete_class(0, &mut store).unwrap();

        assert_eq!(std::fs::read_to_string(&saved).unwrap(), "1 0.5 0.5 0.1 0.1\n");
        assert_eq!(project.classes.id_of("cat"), Some(0));
    }
}
