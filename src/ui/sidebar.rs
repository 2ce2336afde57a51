// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Class list shown beside the canvas.

use super::color32;
use crate::models::registry::ClassRegistry;
use crate::util::color::class_color;

/// Display the class list and return each entry's screen rectangle.
///
/// The active class is marked with an arrow; right-clicking an entry
/// opens its context menu.
pub fn show(ui: &mut egui::Ui, classes: &ClassRegistry, active_class: usize) -> Vec<(egui::Rect, usize)> {
    ui.add_space(10.0);
    ui.label(egui::RichText::new("CLASSES").strong().color(egui::Color32::WHITE));
    ui.add_space(8.0);

    if classes.is_empty() {
        ui.label(
            egui::RichText::new("Type a name and press Enter\nto create the first class")
                .italics()
                .weak(),
        );
        return Vec::new();
    }

    let width = ui.available_width();
    classes
        .iter()
        .map(|(id, name)| {
            let prefix = if id == active_class { "▶ " } else { "   " };
            let text = egui::RichText::new(format!("{prefix}{id}: {name}"))
                .size(16.0)
                .color(color32(class_color(id)));
            let response = ui.add_sized([width, 22.0], egui::Label::new(text).truncate());
            (response.rect, id)
        })
        .collect()
}
