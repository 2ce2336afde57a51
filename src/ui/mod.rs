// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the labelling window.
//!
//! Everything here is a pure read of editor state. Each pass records where
//! clickable things ended up in a [`FrameLayout`], which the app uses to
//! resolve the targets of the next frame's pointer presses.

pub mod canvas;
pub mod overlays;
pub mod sidebar;

use crate::input::PointerTarget;

/// Screen rectangles of everything clickable, from the last render pass.
#[derive(Debug, Clone)]
pub struct FrameLayout {
    /// Area of the canvas; the image is drawn at its top-left corner.
    pub canvas: egui::Rect,
    pub class_entries: Vec<(egui::Rect, usize)>,
    pub menu_delete: Option<egui::Rect>,
    pub confirm_yes: Option<egui::Rect>,
    pub confirm_no: Option<egui::Rect>,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            canvas: egui::Rect::NOTHING,
            class_entries: Vec::new(),
            menu_delete: None,
            confirm_yes: None,
            confirm_no: None,
        }
    }
}

impl FrameLayout {
    /// Work out what a press at `pos` landed on. Dialog controls sit on
    /// top, so they are tested first.
    pub fn target_at(&self, pos: egui::Pos2) -> PointerTarget {
        let hit = |rect: &Option<egui::Rect>| rect.is_some_and(|r| r.contains(pos));

        if hit(&self.confirm_yes) {
            PointerTarget::ConfirmYes
        } else if hit(&self.confirm_no) {
            PointerTarget::ConfirmNo
        } else if hit(&self.menu_delete) {
            PointerTarget::MenuDelete
        } else if let Some((_, id)) = self.class_entries.iter().find(|(r, _)| r.contains(pos)) {
            PointerTarget::ClassEntry(*id)
        } else if self.canvas.contains(pos) {
            PointerTarget::Canvas
        } else {
            PointerTarget::Elsewhere
        }
    }
}

/// Convert an 8-bit RGB class color for painting.
pub fn color32([r, g, b]: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_controls_take_precedence() {
        let canvas = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(900.0, 700.0));
        let yes = egui::Rect::from_min_size(egui::pos2(340.0, 360.0), egui::vec2(80.0, 30.0));
        let layout = FrameLayout {
            canvas,
            class_entries: vec![(
                egui::Rect::from_min_size(egui::pos2(910.0, 50.0), egui::vec2(200.0, 22.0)),
                0,
            )],
            confirm_yes: Some(yes),
            ..Default::default()
        };

        assert_eq!(layout.target_at(egui::pos2(350.0, 370.0)), PointerTarget::ConfirmYes);
        assert_eq!(layout.target_at(egui::pos2(100.0, 100.0)), PointerTarget::Canvas);
        assert_eq!(layout.target_at(egui::pos2(920.0, 60.0)), PointerTarget::ClassEntry(0));
        assert_eq!(layout.target_at(egui::pos2(1000.0, 600.0)), PointerTarget::Elsewhere);
    }
}
