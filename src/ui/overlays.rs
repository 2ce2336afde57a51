// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Dialogs and the help overlay, painted above the canvas.
//!
//! These are painted rather than built from egui windows so the editor,
//! not egui, decides which clicks they consume.

use crate::session::ClassMenu;

const HELP_LINES: &[&str] = &[
    "Mouse:",
    "  Drag          : Draw box",
    "  Click box     : Select box",
    "  Drag corner   : Resize box",
    "  Right click   : Class menu",
    "",
    "Keyboard:",
    "  Enter         : Confirm box / polygon",
    "  Backspace     : Delete typing",
    "  Delete        : Delete selected box",
    "  Ctrl + U / Y  : Undo / Redo",
    "  Ctrl + C      : Clear all boxes",
    "  Ctrl + P      : Polygon for selected box",
    "",
    "Class:",
    "  Type name     : Create new class",
    "  Up / Down     : Change class",
    "",
    "Images:",
    "  Left / Right  : Prev / Next image",
    "  Alt + N       : Next image",
    "",
    "  Esc           : Close dialog / exit",
    "  Ctrl + H      : Toggle help",
];

fn overlay_painter(ctx: &egui::Context) -> egui::Painter {
    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("editor_overlays"),
    ))
}

/// Help panel in the bottom-right corner of the canvas.
pub fn show_help(ctx: &egui::Context, canvas: egui::Rect) {
    let painter = overlay_painter(ctx);
    let padding = 8.0;
    let line_h = 20.0;
    let size = egui::vec2(340.0, line_h * HELP_LINES.len() as f32 + padding * 2.0);
    let rect = egui::Rect::from_min_size(canvas.max - size - egui::vec2(10.0, 10.0), size);

    painter.rect_filled(rect, 4.0, egui::Color32::from_black_alpha(170));
    for (i, line) in HELP_LINES.iter().enumerate() {
        painter.text(
            rect.min + egui::vec2(padding, padding + i as f32 * line_h),
            egui::Align2::LEFT_TOP,
            *line,
            egui::FontId::monospace(14.0),
            egui::Color32::from_gray(230),
        );
    }
}

/// Context menu of a class entry. Returns the "Delete" item's rectangle.
pub fn show_class_menu(ctx: &egui::Context, canvas: egui::Rect, menu: &ClassMenu) -> egui::Rect {
    let painter = overlay_painter(ctx);
    let pos = canvas.min + egui::vec2(menu.pos.x as f32, menu.pos.y as f32);
    let rect = egui::Rect::from_min_size(pos, egui::vec2(120.0, 30.0));

    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(40));
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(200)));
    painter.text(
        rect.left_center() + egui::vec2(10.0, 0.0),
        egui::Align2::LEFT_CENTER,
        "Delete",
        egui::FontId::proportional(16.0),
        egui::Color32::WHITE,
    );
    rect
}

/// Delete-class confirmation centred on the canvas. Returns the "Yes" and
/// "No" button rectangles.
pub fn show_confirm(ctx: &egui::Context, canvas: egui::Rect, class_name: &str) -> (egui::Rect, egui::Rect) {
    let painter = overlay_painter(ctx);
    let rect = egui::Rect::from_center_size(canvas.center(), egui::vec2(300.0, 120.0));
    let yes = egui::Rect::from_min_size(rect.min + egui::vec2(40.0, 70.0), egui::vec2(80.0, 30.0));
    let no = egui::Rect::from_min_size(rect.min + egui::vec2(180.0, 70.0), egui::vec2(80.0, 30.0));

    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(50));
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, egui::Color32::from_gray(220)));
    painter.text(
        rect.center_top() + egui::vec2(0.0, 30.0),
        egui::Align2::CENTER_CENTER,
        format!("Delete class \"{class_name}\"?"),
        egui::FontId::proportional(16.0),
        egui::Color32::WHITE,
    );

    for (button, label, fill) in [
        (yes, "Yes", egui::Color32::from_rgb(200, 50, 50)),
        (no, "No", egui::Color32::from_gray(80)),
    ] {
        painter.rect_filled(button, 0.0, fill);
        painter.text(
            button.center(),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(16.0),
            egui::Color32::WHITE,
        );
    }

    (yes, no)
}
