// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the image and its annotations.
//!
//! Annotations live in display-pixel space with the origin at the image's
//! top-left corner, which is pinned to the canvas origin, so converting to
//! screen space is a plain offset.

use super::color32;
use crate::editor::Editor;
use crate::models::annotation::{AnnotationKind, Point, Rect};
use crate::session::{Mode, Session};
use crate::util::color::class_color;
use crate::util::geometry::Corner;

const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const CAPTURE_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);
const BOX_THICKNESS: f32 = 2.0;

/// Display the canvas and return the screen rectangle it occupies.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    session: Option<&Session>,
    editor: &Editor,
    position: (usize, usize),
) -> egui::Rect {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
    let canvas = response.rect;
    painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(30));

    let Some(session) = session else {
        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "No image open",
            egui::FontId::proportional(18.0),
            egui::Color32::from_gray(180),
        );
        return canvas;
    };

    let origin = canvas.min;
    let to_screen = |p: Point| origin + egui::vec2(p.x as f32, p.y as f32);
    let rect_to_screen = |r: &Rect| {
        egui::Rect::from_min_size(to_screen(Point::new(r.x, r.y)), egui::vec2(r.w as f32, r.h as f32))
    };

    if let Some(texture) = texture {
        let (w, h) = session.display_size();
        painter.image(
            texture.id(),
            egui::Rect::from_min_size(origin, egui::vec2(w as f32, h as f32)),
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    for (i, annotation) in session.annotations().iter().enumerate() {
        let class = color32(class_color(annotation.class_id));
        let selected = session.selected() == Some(i);
        let outline = if selected { SELECTED_COLOR } else { class };

        painter.rect_stroke(
            rect_to_screen(&annotation.rect),
            0.0,
            egui::Stroke::new(BOX_THICKNESS, outline),
        );

        if let Some(points) = annotation.polygon() {
            let screen: Vec<egui::Pos2> = points.iter().map(|p| to_screen(*p)).collect();
            painter.add(egui::Shape::closed_line(screen, egui::Stroke::new(BOX_THICKNESS, class)));
        }

        if selected {
            let half = editor.handle_size() as f32 / 2.0;
            for corner in Corner::ALL {
                let c = to_screen(corner.of(&annotation.rect));
                painter.rect_filled(
                    egui::Rect::from_center_size(c, egui::vec2(half * 2.0, half * 2.0)),
                    0.0,
                    egui::Color32::WHITE,
                );
            }
        }
    }

    if let Some(draft) = session.draft() {
        painter.rect_stroke(rect_to_screen(&draft), 0.0, egui::Stroke::new(1.0, SELECTED_COLOR));
    }

    if let Some(points) = session.polygon_points() {
        let screen: Vec<egui::Pos2> = points.iter().map(|p| to_screen(*p)).collect();
        if screen.len() >= 2 {
            painter.add(egui::Shape::line(screen.clone(), egui::Stroke::new(2.0, CAPTURE_COLOR)));
        }
        for p in screen {
            painter.circle_filled(p, 3.0, CAPTURE_COLOR);
        }
    }

    let (index, count) = position;
    let polygons = session
        .annotations()
        .iter()
        .filter(|a| a.kind() == AnnotationKind::Polygon)
        .count();
    let mut status = format!(
        "{}/{} | Boxes:{} | Typing:{}",
        index + 1,
        count,
        session.annotations().len(),
        session.label_text()
    );
    if polygons > 0 {
        status.push_str(&format!(" | Polygons:{}", polygons));
    }
    match session.mode() {
        Mode::PolygonCapture { points } => status.push_str(&format!(" | Polygon points:{}", points.len())),
        Mode::Resizing { .. } => status.push_str(" | Resizing"),
        Mode::Drawing { .. } | Mode::Idle => {}
    }
    if !session.warnings().is_empty() {
        status.push_str(&format!(" | Skipped lines:{}", session.warnings().len()));
    }
    painter.text(
        egui::pos2(canvas.min.x + 10.0, canvas.max.y - 10.0),
        egui::Align2::LEFT_BOTTOM,
        status,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(220),
    );

    canvas
}
