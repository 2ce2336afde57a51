// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction state machine.
//!
//! The editor turns [`InputEvent`]s into edits of the open [`Session`] and
//! the project's class registry. Dialogs (class menu, delete confirmation)
//! take every event ahead of the editing modes; the help overlay toggles
//! independently of everything else.

use crate::input::{InputEvent, Key, Modifiers, PointerButton, PointerTarget};
use crate::models::annotation::{Annotation, Point, Shape};
use crate::models::project::Project;
use crate::session::{ClassMenu, Mode, Session};
use crate::util::geometry::{hit_corner, rescale_polygon, resize, span_rect};

/// What the navigation layer should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    PreviousImage,
    NextImage,
    Exit,
}

/// Editor state that outlives a single image.
#[derive(Debug, Clone)]
pub struct Editor {
    /// Class assigned to the next committed box.
    active_class: usize,
    show_help: bool,
    handle_size: f64,
}

impl Editor {
    pub fn new(handle_size: f64) -> Self {
        Self {
            active_class: 0,
            show_help: true,
            handle_size,
        }
    }

    pub fn active_class(&self) -> usize {
        self.active_class
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn handle_size(&self) -> f64 {
        self.handle_size
    }

    /// Apply one input event.
    pub fn handle(&mut self, session: &mut Session, project: &mut Project, event: &InputEvent) -> Flow {
        match event {
            InputEvent::Key { key, modifiers } => {
                return self.key_pressed(session, project, *key, *modifiers);
            }
            InputEvent::Text(text) => type_label(session, text),
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Primary,
                target,
            } => self.primary_down(session, project, *pos, *target),
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Secondary,
                target,
            } => secondary_down(session, *pos, *target),
            InputEvent::PointerMove { pos } => pointer_moved(session, *pos),
            InputEvent::PointerUp {
                button: PointerButton::Primary,
                ..
            } => {
                if matches!(session.mode, Mode::Drawing { .. } | Mode::Resizing { .. }) {
                    session.mode = Mode::Idle;
                }
            }
            InputEvent::PointerUp { .. } => {}
        }
        Flow::Continue
    }

    fn key_pressed(&mut self, session: &mut Session, project: &mut Project, key: Key, mods: Modifiers) -> Flow {
        if key == Key::H && mods.ctrl {
            self.show_help = !self.show_help;
            return Flow::Continue;
        }
        if key == Key::Escape {
            return escape(session);
        }
        if session.modal_open() {
            return Flow::Continue;
        }

        match key {
            Key::Enter if session.is_capturing_polygon() => commit_polygon(session),
            Key::Enter => self.commit_box(session, project),
            Key::U if mods.ctrl => {
                if session.store.undo() {
                    log::debug!("Undo, {} annotations", session.store.len());
                }
                session.settle_selection();
            }
            Key::Y if mods.ctrl => {
                if session.store.redo() {
                    log::debug!("Redo, {} annotations", session.store.len());
                }
                session.settle_selection();
            }
            Key::C if mods.ctrl => {
                if !session.store.is_empty() {
                    session.store.clear();
                    session.settle_selection();
                    log::debug!("Cleared all annotations");
                }
            }
            Key::P if mods.ctrl => toggle_polygon_capture(session),
            Key::ArrowLeft => return Flow::PreviousImage,
            Key::ArrowRight => return Flow::NextImage,
            Key::N if mods.alt => return Flow::NextImage,
            Key::ArrowUp => self.step_class(session, project, -1),
            Key::ArrowDown => self.step_class(session, project, 1),
            Key::Delete => {
                if let Some(index) = session.selected.take() {
                    session.store.remove(index);
                    session.settle_selection();
                    log::debug!("Deleted annotation {}", index);
                }
            }
            Key::Backspace => {
                session.label_text.pop();
            }
            _ => {}
        }
        Flow::Continue
    }

    /// Commit the drawn box at the typed or active class.
    fn commit_box(&mut self, session: &mut Session, project: &mut Project) {
        let Some(rect) = session.draft else {
            return;
        };

        let label = session.label_text.trim().to_string();
        if !label.is_empty() {
            match project.classes.get_or_create(&label) {
                Ok(id) => self.active_class = id,
                Err(e) => {
                    log::error!("Failed to register class {}: {:#}", label, e);
                    return;
                }
            }
            if let Err(e) = project.write_manifest() {
                log::error!("Failed to write manifest: {:#}", e);
            }
        } else if project.classes.is_empty() {
            log::warn!("Type a class name before confirming the first box");
            return;
        } else {
            self.active_class = self.active_class.min(project.classes.max_id());
        }

        session.store.add(Annotation::new_box(rect, self.active_class));
        session.draft = None;
        session.label_text.clear();
        log::debug!("Added box with class {}", self.active_class);
    }

    /// Up/Down: change the active class while a box is pending, otherwise
    /// the selected annotation's class.
    fn step_class(&mut self, session: &mut Session, project: &Project, delta: isize) {
        let max_id = project.classes.max_id();

        if session.draft.is_some() {
            self.active_class = step_clamped(self.active_class, delta, max_id);
            return;
        }

        let Some(index) = session.selected else {
            return;
        };
        if let Some(mut annotation) = session.store.get(index).cloned() {
            annotation.class_id = step_clamped(annotation.class_id, delta, max_id);
            self.active_class = annotation.class_id;
            session.store.replace(index, annotation);
        }
    }

    fn primary_down(&mut self, session: &mut Session, project: &mut Project, pos: Point, target: PointerTarget) {
        if let Some(class_id) = session.confirm_delete {
            match target {
                PointerTarget::ConfirmYes => {
                    session.confirm_delete = None;
                    if let Err(e) = project.delete_class(class_id, &mut session.store) {
                        log::error!("Failed to delete class {}: {:#}", class_id, e);
                    }
                    session.selected = None;
                    session.settle_selection();
                    self.active_class = 0;
                }
                PointerTarget::ConfirmNo => session.confirm_delete = None,
                _ => {}
            }
            return;
        }

        if let Some(menu) = session.menu {
            if target == PointerTarget::MenuDelete {
                session.confirm_delete = Some(menu.class_id);
                session.menu = None;
                session.draft = None;
                if matches!(session.mode, Mode::Drawing { .. }) {
                    session.mode = Mode::Idle;
                }
            }
            return;
        }

        let on_image = session.clamp_to_image(pos);
        if let Mode::PolygonCapture { points } = &mut session.mode {
            points.push(on_image);
            return;
        }

        if target != PointerTarget::Canvas {
            return;
        }

        session.selected = None;
        session.mode = Mode::Idle;

        // First rectangle in list order wins.
        let hit = session
            .store
            .annotations()
            .iter()
            .position(|a| a.rect.contains(pos));

        match hit {
            Some(index) => {
                session.selected = Some(index);
                let rect = session.store.annotations()[index].rect;
                if let Some(corner) = hit_corner(pos, &rect, self.handle_size) {
                    session.store.checkpoint();
                    session.mode = Mode::Resizing {
                        corner,
                        origin: on_image,
                    };
                }
            }
            None => {
                session.mode = Mode::Drawing { anchor: on_image };
                session.draft = None;
            }
        }
    }
}

fn escape(session: &mut Session) -> Flow {
    if session.is_capturing_polygon() {
        session.mode = Mode::Idle;
        return Flow::Continue;
    }
    if session.confirm_delete.take().is_some() {
        return Flow::Continue;
    }
    if session.menu.take().is_some() {
        return Flow::Continue;
    }
    Flow::Exit
}

fn type_label(session: &mut Session, text: &str) {
    if session.modal_open() {
        return;
    }
    session
        .label_text
        .extend(text.chars().filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-'));
}

fn secondary_down(session: &mut Session, pos: Point, target: PointerTarget) {
    if session.confirm_delete.is_some() {
        return;
    }
    session.menu = match target {
        PointerTarget::ClassEntry(class_id) => Some(ClassMenu { class_id, pos }),
        _ => None,
    };
}

fn pointer_moved(session: &mut Session, pos: Point) {
    let pos = session.clamp_to_image(pos);
    match &mut session.mode {
        Mode::Drawing { anchor } => session.draft = Some(span_rect(*anchor, pos)),
        Mode::Resizing { corner, origin } => {
            let (dx, dy) = (pos.x - origin.x, pos.y - origin.y);
            let corner = *corner;
            *origin = pos;

            let Some(index) = session.selected else {
                return;
            };
            let Some(mut annotation) = session.store.get(index).cloned() else {
                return;
            };

            let rect = resize(&annotation.rect, corner, dx, dy);
            if let Shape::Polygon(points) = &annotation.shape {
                annotation.shape = Shape::Polygon(rescale_polygon(&annotation.rect, &rect, points));
            }
            annotation.rect = rect;
            session.store.update(index, annotation);
        }
        Mode::Idle | Mode::PolygonCapture { .. } => {}
    }
}

fn toggle_polygon_capture(session: &mut Session) {
    if session.selected.is_none() {
        return;
    }
    session.mode = if session.is_capturing_polygon() {
        Mode::Idle
    } else {
        Mode::PolygonCapture { points: Vec::new() }
    };
}

/// Replace the selected annotation's geometry with the captured polygon.
/// Fewer than three points commits nothing and keeps capturing.
fn commit_polygon(session: &mut Session) {
    let Mode::PolygonCapture { points } = &session.mode else {
        return;
    };
    let Some(index) = session.selected else {
        return;
    };
    if points.len() < 3 {
        return;
    }

    if let Some(mut annotation) = session.store.get(index).cloned() {
        annotation.set_polygon(points.clone());
        session.store.replace(index, annotation);
        log::debug!("Annotation {} is now a polygon", index);
    }
    session.mode = Mode::Idle;
}

fn step_clamped(id: usize, delta: isize, max_id: usize) -> usize {
    id.saturating_add_signed(delta).min(max_id)
}
