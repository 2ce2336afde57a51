// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! Each frame the app translates egui's raw input into [`InputEvent`]s,
//! feeds them to the [`Navigator`] as one batch, and then renders the
//! resulting state. Pointer targets are resolved against the layout
//! recorded by the previous frame.

use crate::config::SIDEBAR_WIDTH;
use crate::input::{InputEvent, Key, Modifiers, PointerButton};
use crate::io::media::{FileImageSource, LoadedImage};
use crate::models::annotation::Point;
use crate::navigator::{Navigator, Status};
use crate::ui::{canvas, overlays, sidebar, FrameLayout};

/// Main application state.
pub struct YolabelApp {
    navigator: Navigator,
    source: FileImageSource,
    /// Texture of the open image
    image_texture: Option<egui::TextureHandle>,
    /// Clickable regions from the last frame
    layout: FrameLayout,
    started: bool,
}

impl YolabelApp {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            source: FileImageSource,
            image_texture: None,
            layout: FrameLayout::default(),
            started: false,
        }
    }

    /// React to the navigator moving to another image or finishing.
    fn apply_status(&mut self, ctx: &egui::Context, status: Status) {
        match status {
            Status::Editing => {}
            Status::Opened(image) => self.upload_texture(ctx, image),
            Status::Finished => {
                self.image_texture = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context, image: LoadedImage) {
        let size = [image.width as usize, image.height as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
        self.image_texture = Some(ctx.load_texture("current_image", color_image, egui::TextureOptions::LINEAR));

        if let Some(session) = self.navigator.session() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                "YOLO Annotation Tool [{}] - {}",
                self.navigator.project().split.as_str(),
                session.image_path().display()
            )));
        }
    }

    /// Translate one egui event, or `None` if the editor doesn't care.
    fn translate(&self, event: &egui::Event) -> Option<InputEvent> {
        let to_display = |pos: egui::Pos2| {
            Point::new(
                (pos.x - self.layout.canvas.min.x) as f64,
                (pos.y - self.layout.canvas.min.y) as f64,
            )
        };

        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let button = match button {
                    egui::PointerButton::Primary => PointerButton::Primary,
                    egui::PointerButton::Secondary => PointerButton::Secondary,
                    _ => return None,
                };
                Some(if *pressed {
                    InputEvent::PointerDown {
                        pos: to_display(*pos),
                        button,
                        target: self.layout.target_at(*pos),
                    }
                } else {
                    InputEvent::PointerUp {
                        pos: to_display(*pos),
                        button,
                    }
                })
            }
            egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove { pos: to_display(*pos) }),
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => {
                let key = match key {
                    egui::Key::Enter => Key::Enter,
                    egui::Key::Escape => Key::Escape,
                    egui::Key::ArrowUp => Key::ArrowUp,
                    egui::Key::ArrowDown => Key::ArrowDown,
                    egui::Key::ArrowLeft => Key::ArrowLeft,
                    egui::Key::ArrowRight => Key::ArrowRight,
                    egui::Key::Delete => Key::Delete,
                    egui::Key::Backspace => Key::Backspace,
                    egui::Key::C => Key::C,
                    egui::Key::H => Key::H,
                    egui::Key::N => Key::N,
                    egui::Key::P => Key::P,
                    egui::Key::U => Key::U,
                    egui::Key::Y => Key::Y,
                    _ => return None,
                };
                Some(InputEvent::Key {
                    key,
                    modifiers: Modifiers {
                        ctrl: modifiers.ctrl || modifiers.command,
                        alt: modifiers.alt,
                    },
                })
            }
            // egui reports Ctrl+C as a copy request rather than a key press.
            egui::Event::Copy => Some(InputEvent::ctrl(Key::C)),
            egui::Event::Text(text) => Some(InputEvent::Text(text.clone())),
            _ => None,
        }
    }
}

impl eframe::App for YolabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.started {
            self.started = true;
            let status = self.navigator.start(&self.source);
            self.apply_status(ctx, status);
        }

        if self.navigator.is_finished() {
            return;
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            // Closing the window saves exactly like Escape does.
            self.navigator.finish();
            return;
        }

        let inputs: Vec<InputEvent> = ctx.input(|i| i.events.iter().filter_map(|e| self.translate(e)).collect());
        if !inputs.is_empty() {
            let status = self.navigator.handle_batch(&inputs, &self.source);
            self.apply_status(ctx, status);
        }

        let editor = self.navigator.editor();
        let classes = &self.navigator.project().classes;
        let session = self.navigator.session();

        let class_entries = egui::SidePanel::right("classes")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| sidebar::show(ui, classes, editor.active_class()))
            .inner;

        let position = (self.navigator.index(), self.navigator.image_count());
        let canvas_rect = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| canvas::show(ui, self.image_texture.as_ref(), session, editor, position))
            .inner;

        let mut layout = FrameLayout {
            canvas: canvas_rect,
            class_entries,
            ..Default::default()
        };

        if let Some(session) = session {
            if let Some(menu) = session.menu() {
                layout.menu_delete = Some(overlays::show_class_menu(ctx, canvas_rect, &menu));
            }
            if let Some(class_id) = session.confirm_delete() {
                let name = classes.name(class_id).unwrap_or("?");
                let (yes, no) = overlays::show_confirm(ctx, canvas_rect, name);
                layout.confirm_yes = Some(yes);
                layout.confirm_no = Some(no);
            }
        }
        if editor.show_help() {
            overlays::show_help(ctx, canvas_rect);
        }

        self.layout = layout;
    }
}
