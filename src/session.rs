// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editing state of the one image currently open.
//!
//! A session owns the image's annotations and history plus every
//! transient piece of interaction state (selection, in-progress box or
//! polygon, typed label, open dialogs). It is created when an image is
//! opened and flushed to the image's label file when the editor leaves it.

use crate::io::labels::{read_label_file, write_label_file, LabelError};
use crate::io::media::{ImageSource, LoadedImage};
use crate::models::annotation::{Annotation, Point, Rect};
use crate::models::project::Project;
use crate::models::registry::ClassRegistry;
use crate::models::store::AnnotationStore;
use crate::util::geometry::{aspect_fit, Corner};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Editing mode for pointer input.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Idle,
    /// Dragging out a new box from `anchor`.
    Drawing { anchor: Point },
    /// Dragging `corner` of the selected annotation; `origin` is the last
    /// pointer sample.
    Resizing { corner: Corner, origin: Point },
    /// Collecting polygon vertices for the selected annotation.
    PolygonCapture { points: Vec<Point> },
}

/// Right-click menu on a class list entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMenu {
    pub class_id: usize,
    pub pos: Point,
}

#[derive(Debug)]
pub struct Session {
    image_path: PathBuf,
    label_path: PathBuf,
    display_size: (u32, u32),
    warnings: Vec<LabelError>,

    pub(crate) store: AnnotationStore,
    pub(crate) mode: Mode,
    pub(crate) selected: Option<usize>,
    /// Drawn box waiting for Enter.
    pub(crate) draft: Option<Rect>,
    pub(crate) label_text: String,
    pub(crate) menu: Option<ClassMenu>,
    /// Class awaiting delete confirmation.
    pub(crate) confirm_delete: Option<usize>,
}

impl Session {
    /// Start a session with annotations already in memory.
    pub fn new(
        image_path: &Path,
        label_path: &Path,
        image_size: (u32, u32),
        bounds: (u32, u32),
        annotations: Vec<Annotation>,
    ) -> Self {
        let (scale, display_size) = aspect_fit(image_size, bounds);
        log::debug!(
            "Fitting {}x{} image at scale {:.4}",
            image_size.0,
            image_size.1,
            scale
        );
        Self {
            image_path: image_path.to_path_buf(),
            label_path: label_path.to_path_buf(),
            display_size,
            warnings: Vec::new(),
            store: AnnotationStore::new(annotations),
            mode: Mode::Idle,
            selected: None,
            draft: None,
            label_text: String::new(),
            menu: None,
            confirm_delete: None,
        }
    }

    /// Load `image_path` and its label file, fitting the image into `bounds`.
    pub fn open(
        project: &Project,
        image_path: &Path,
        source: &dyn ImageSource,
        bounds: (u32, u32),
    ) -> Result<(Self, LoadedImage)> {
        let image = source.load(image_path)?;
        if image.width == 0 || image.height == 0 {
            bail!("Image {} is empty", image_path.display());
        }

        let label_path = project.label_path(image_path);
        let mut session = Self::new(
            image_path,
            &label_path,
            (image.width, image.height),
            bounds,
            Vec::new(),
        );

        let decoded = read_label_file(&label_path, session.display_size)?;
        session.store = AnnotationStore::new(decoded.annotations);
        session.warnings = decoded.warnings;

        log::info!(
            "Opened {} ({}x{} shown at {}x{}) with {} annotations",
            image_path.display(),
            image.width,
            image.height,
            session.display_size.0,
            session.display_size.1,
            session.store.len()
        );
        Ok((session, image))
    }

    /// Write the annotations to the label file, normalized to this image's
    /// display size.
    pub fn flush(&self, classes: &ClassRegistry) -> Result<()> {
        let unknown = self
            .store
            .annotations()
            .iter()
            .filter(|a| a.class_id >= classes.len())
            .count();
        if unknown > 0 {
            log::warn!(
                "{} annotations in {} use class ids missing from the registry",
                unknown,
                self.label_path.display()
            );
        }

        write_label_file(&self.label_path, self.store.annotations(), self.display_size)?;
        log::info!(
            "Saved {} annotations to {}",
            self.store.len(),
            self.label_path.display()
        );
        Ok(())
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.display_size
    }

    /// Lines of the label file that could not be decoded.
    pub fn warnings(&self) -> &[LabelError] {
        &self.warnings
    }

    pub fn annotations(&self) -> &[Annotation] {
        self.store.annotations()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn draft(&self) -> Option<Rect> {
        self.draft
    }

    pub fn label_text(&self) -> &str {
        &self.label_text
    }

    pub fn menu(&self) -> Option<ClassMenu> {
        self.menu
    }

    pub fn confirm_delete(&self) -> Option<usize> {
        self.confirm_delete
    }

    /// Pull `pos` onto the displayed image, so nothing drawn can fall
    /// outside it.
    pub fn clamp_to_image(&self, pos: Point) -> Point {
        let (w, h) = self.display_size;
        Point::new(pos.x.clamp(0.0, w as f64), pos.y.clamp(0.0, h as f64))
    }

    /// Vertices captured so far, if polygon capture is active.
    pub fn polygon_points(&self) -> Option<&[Point]> {
        match &self.mode {
            Mode::PolygonCapture { points } => Some(points),
            _ => None,
        }
    }

    pub fn is_capturing_polygon(&self) -> bool {
        matches!(self.mode, Mode::PolygonCapture { .. })
    }

    /// A context menu or confirm dialog is open.
    pub fn modal_open(&self) -> bool {
        self.menu.is_some() || self.confirm_delete.is_some()
    }

    /// Drop state that no longer points at a valid annotation after the
    /// list was replaced wholesale (undo, redo, clear, class deletion).
    pub(crate) fn settle_selection(&mut self) {
        if self.selected.is_some_and(|i| i >= self.store.len()) {
            self.selected = None;
        }
        if self.selected.is_none()
            && matches!(self.mode, Mode::Resizing { .. } | Mode::PolygonCapture { .. })
        {
            self.mode = Mode::Idle;
        }
    }
}
