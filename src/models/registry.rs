// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class registry shared by every image in a run.
//!
//! The registry maps class names to dense integer ids `0..n`. Every
//! mutation is written straight back to `classes.json` so a crash never
//! loses a class that already labels a box on disk.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Bijection between class names and dense ids.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    /// Class names indexed by id.
    names: Vec<String>,
    /// Backing file, `None` for a registry that is never persisted.
    path: Option<PathBuf>,
}

impl ClassRegistry {
    /// Build an in-memory registry from names listed in id order.
    #[cfg(test)]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            path: None,
        }
    }

    /// Load the registry persisted at `path`, or start empty if the file
    /// doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        let mut registry = Self {
            names: Vec::new(),
            path: Some(path.to_path_buf()),
        };

        if !path.exists() {
            log::info!("No class registry at {}, starting empty", path.display());
            return Ok(registry);
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read class registry {}", path.display()))?;
        let map: HashMap<String, usize> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse class registry {}", path.display()))?;

        let mut entries: Vec<(String, usize)> = map.into_iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let dense = entries.iter().enumerate().all(|(i, (_, id))| i == *id);
        registry.names = entries.into_iter().map(|(name, _)| name).collect();

        if !dense {
            log::warn!(
                "Class ids in {} have gaps, renumbering {} classes",
                path.display(),
                registry.names.len()
            );
            registry.persist()?;
        }

        log::info!("Loaded {} classes from {}", registry.names.len(), path.display());
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name of class `id`.
    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Id of the class called `name`.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Class names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().enumerate().map(|(id, name)| (id, name.as_str()))
    }

    /// Largest valid id, or 0 for an empty registry.
    pub fn max_id(&self) -> usize {
        self.names.len().saturating_sub(1)
    }

    /// Return the id for `name`, registering it (and persisting) if new.
    pub fn get_or_create(&mut self, name: &str) -> Result<usize> {
        if let Some(id) = self.id_of(name) {
            return Ok(id);
        }

        let id = self.names.len();
        self.names.push(name.to_string());
        if let Err(e) = self.persist() {
            self.names.pop();
            return Err(e);
        }
        log::info!("Created class {} -> {}", name, id);
        Ok(id)
    }

    /// Remove class `id`; every later class moves down by one.
    ///
    /// Returns the removed id, or `None` if it didn't exist. If the file
    /// can't be rewritten the registry is left unchanged.
    pub fn delete(&mut self, id: usize) -> Result<Option<usize>> {
        if id >= self.names.len() {
            return Ok(None);
        }

        let name = self.names.remove(id);
        if let Err(e) = self.persist() {
            self.names.insert(id, name);
            return Err(e);
        }
        log::info!("Deleted class {} ({}), {} classes remain", name, id, self.names.len());
        Ok(Some(id))
    }

    /// Rewrite the backing file with the current mapping, entries in id
    /// order.
    pub fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let map: serde_json::Map<String, serde_json::Value> = self
            .iter()
            .map(|(id, name)| (name.to_string(), serde_json::Value::from(id)))
            .collect();
        let json = serde_json::to_string_pretty(&map)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write class registry {}", path.display()))?;
        Ok(())
    }
}
