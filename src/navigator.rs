// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image-to-image navigation and persistence.
//!
//! The navigator walks the image list, opening a [`Session`] per image and
//! flushing it to disk whenever the editor moves to another image or
//! exits. Moving past either end of the list ends the run.

use crate::editor::{Editor, Flow};
use crate::input::InputEvent;
use crate::io::media::{ImageSource, LoadedImage};
use crate::models::project::Project;
use crate::session::Session;
use std::path::PathBuf;

/// Outcome of feeding input to the navigator.
#[derive(Debug)]
pub enum Status {
    /// Still editing the same image.
    Editing,
    /// A different image is now open.
    Opened(LoadedImage),
    /// The run is over and everything has been flushed.
    Finished,
}

pub struct Navigator {
    project: Project,
    editor: Editor,
    images: Vec<PathBuf>,
    index: usize,
    /// Bounds each image is fitted into.
    bounds: (u32, u32),
    session: Option<Session>,
    finished: bool,
}

impl Navigator {
    pub fn new(project: Project, images: Vec<PathBuf>, bounds: (u32, u32), handle_size: f64) -> Self {
        Self {
            project,
            editor: Editor::new(handle_size),
            images,
            index: 0,
            bounds,
            session: None,
            finished: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Index of the open image.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Open the first image that decodes.
    pub fn start(&mut self, source: &dyn ImageSource) -> Status {
        self.open_from(0, 1, source)
    }

    /// Apply a batch of events. Events queued behind a navigation or exit
    /// are dropped, since they belong to the image that was just left.
    pub fn handle_batch(&mut self, events: &[InputEvent], source: &dyn ImageSource) -> Status {
        for event in events {
            match self.handle(event, source) {
                Status::Editing => {}
                status => return status,
            }
        }
        Status::Editing
    }

    pub fn handle(&mut self, event: &InputEvent, source: &dyn ImageSource) -> Status {
        let Some(session) = self.session.as_mut() else {
            return Status::Finished;
        };

        match self.editor.handle(session, &mut self.project, event) {
            Flow::Continue => Status::Editing,
            Flow::PreviousImage => {
                self.close_session();
                self.open_from(self.index as isize - 1, -1, source)
            }
            Flow::NextImage => {
                self.close_session();
                self.open_from(self.index as isize + 1, 1, source)
            }
            Flow::Exit => {
                self.finish();
                Status::Finished
            }
        }
    }

    /// Flush the open image and the manifest. Safe to call more than once.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.close_session();
        if let Err(e) = self.project.write_manifest() {
            log::error!("Failed to write manifest: {:#}", e);
        }
        self.finished = true;
        log::info!("Labelling finished");
    }

    /// Open the image at `index`, skipping in `step` direction past images
    /// that fail to load. Leaving the list finishes the run.
    fn open_from(&mut self, mut index: isize, step: isize, source: &dyn ImageSource) -> Status {
        while index >= 0 && (index as usize) < self.images.len() {
            let path = &self.images[index as usize];
            match Session::open(&self.project, path, source, self.bounds) {
                Ok((session, image)) => {
                    self.index = index as usize;
                    self.session = Some(session);
                    return Status::Opened(image);
                }
                Err(e) => {
                    log::error!("Skipping {}: {:#}", path.display(), e);
                    index += step;
                }
            }
        }

        self.finish();
        Status::Finished
    }

    fn close_session(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(e) = session.flush(&self.project.classes) {
                log::error!("Failed to save labels: {:#}", e);
            }
        }
    }
}
