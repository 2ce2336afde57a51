// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides coordinate transformations between display pixels
//! and normalized coordinates, plus the hit-testing and resize math used by
//! the editor. Everything here is pure and works in display-pixel space.

use crate::models::annotation::{Point, Rect, MIN_SIZE};

/// Default half-width of a corner handle, in display pixels.
pub const DEFAULT_HANDLE_SIZE: f64 = 8.0;

/// Corner of a bounding rectangle, used as a resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Hit-test precedence order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Position of this corner on `rect`.
    pub fn of(self, rect: &Rect) -> Point {
        match self {
            Corner::TopLeft => Point::new(rect.x, rect.y),
            Corner::TopRight => Point::new(rect.x + rect.w, rect.y),
            Corner::BottomLeft => Point::new(rect.x, rect.y + rect.h),
            Corner::BottomRight => Point::new(rect.x + rect.w, rect.y + rect.h),
        }
    }
}

/// Convert normalized coordinates (0.0 to 1.0) to display pixels.
pub fn to_display(point: Point, (width, height): (u32, u32)) -> Point {
    Point::new(point.x * width as f64, point.y * height as f64)
}

/// Convert display pixels to normalized coordinates (0.0 to 1.0).
pub fn to_normalized(point: Point, (width, height): (u32, u32)) -> Point {
    Point::new(point.x / width as f64, point.y / height as f64)
}

/// Compute the uniform scale that fits an image inside `bounds`, and the
/// resulting display size in whole pixels.
pub fn aspect_fit((img_w, img_h): (u32, u32), (max_w, max_h): (u32, u32)) -> (f64, (u32, u32)) {
    let scale = (max_w as f64 / img_w as f64).min(max_h as f64 / img_h as f64);
    let size = (
        (img_w as f64 * scale) as u32,
        (img_h as f64 * scale) as u32,
    );
    (scale, size)
}

/// Tight axis-aligned bounding rectangle of a point sequence.
///
/// An empty sequence yields a zero-sized rectangle at the origin.
pub fn tight_bound(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::new(0.0, 0.0, 0.0, 0.0);
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Rectangle spanned between a drag anchor and the current pointer.
pub fn span_rect(anchor: Point, pointer: Point) -> Rect {
    Rect::new(
        anchor.x.min(pointer.x),
        anchor.y.min(pointer.y),
        (pointer.x - anchor.x).abs(),
        (pointer.y - anchor.y).abs(),
    )
}

/// Find the corner handle of `rect` under `pointer`.
///
/// Corners are tested in [`Corner::ALL`] order and the first one whose
/// axis distances are both strictly below `handle_size` wins.
pub fn hit_corner(pointer: Point, rect: &Rect, handle_size: f64) -> Option<Corner> {
    Corner::ALL.into_iter().find(|corner| {
        let c = corner.of(rect);
        (pointer.x - c.x).abs() < handle_size && (pointer.y - c.y).abs() < handle_size
    })
}

/// Move one corner of `rect` by `(dx, dy)`, keeping the opposite corner fixed.
///
/// Width and height are clamped to [`MIN_SIZE`] independently.
pub fn resize(rect: &Rect, corner: Corner, dx: f64, dy: f64) -> Rect {
    let Rect { mut x, mut y, mut w, mut h } = *rect;

    match corner {
        Corner::BottomRight => {
            w += dx;
            h += dy;
        }
        Corner::TopRight => {
            y += dy;
            h -= dy;
            w += dx;
        }
        Corner::BottomLeft => {
            x += dx;
            w -= dx;
            h += dy;
        }
        Corner::TopLeft => {
            x += dx;
            y += dy;
            w -= dx;
            h -= dy;
        }
    }

    // Clamp against the fixed edge so the anchor never moves.
    if w < MIN_SIZE {
        if matches!(corner, Corner::TopLeft | Corner::BottomLeft) {
            x = rect.x + rect.w - MIN_SIZE;
        }
        w = MIN_SIZE;
    }
    if h < MIN_SIZE {
        if matches!(corner, Corner::TopLeft | Corner::TopRight) {
            y = rect.y + rect.h - MIN_SIZE;
        }
        h = MIN_SIZE;
    }

    Rect::new(x, y, w, h)
}

/// Map polygon points from `old` to `new` so the outline keeps its
/// proportions relative to the bounding rectangle.
pub fn rescale_polygon(old: &Rect, new: &Rect, points: &[Point]) -> Vec<Point> {
    let sx = if old.w > 0.0 { new.w / old.w } else { 1.0 };
    let sy = if old.h > 0.0 { new.h / old.h } else { 1.0 };

    points
        .iter()
        .map(|p| Point::new(new.x + (p.x - old.x) * sx, new.y + (p.y - old.y) * sy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_denormalize_roundtrip() {
        let size = (900, 700);
        let p = Point::new(123.0, 456.0);

        let normalized = to_normalized(p, size);
        let back = to_display(normalized, size);

        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_corners() {
        let size = (1920, 1080);

        let tl = to_normalized(Point::new(0.0, 0.0), size);
        assert_eq!(tl, Point::new(0.0, 0.0));

        let br = to_normalized(Point::new(1920.0, 1080.0), size);
        assert_eq!(br, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_aspect_fit() {
        let (scale, size) = aspect_fit((1800, 1400), (900, 700));
        assert_eq!(scale, 0.5);
        assert_eq!(size, (900, 700));

        // Tall image is limited by height.
        let (scale, size) = aspect_fit((1400, 2800), (900, 700));
        assert_eq!(scale, 0.25);
        assert_eq!(size, (350, 700));
    }

    #[test]
    fn test_tight_bound() {
        let rect = tight_bound(&[
            Point::new(5.0, 40.0),
            Point::new(25.0, 10.0),
            Point::new(15.0, 30.0),
        ]);
        assert_eq!(rect, Rect::new(5.0, 10.0, 20.0, 30.0));
    }

    #[test]
    fn test_span_rect_any_direction() {
        let rect = span_rect(Point::new(300.0, 250.0), Point::new(100.0, 100.0));
        assert_eq!(rect, Rect::new(100.0, 100.0, 200.0, 150.0));
    }

    #[test]
    fn test_hit_corner_precedence() {
        // Small box: the pointer is within range of every corner, tl wins.
        let rect = Rect::new(0.0, 0.0, 6.0, 6.0);
        assert_eq!(hit_corner(Point::new(3.0, 3.0), &rect, 8.0), Some(Corner::TopLeft));

        let rect = Rect::new(100.0, 100.0, 200.0, 150.0);
        assert_eq!(hit_corner(Point::new(297.0, 103.0), &rect, 8.0), Some(Corner::TopRight));
        assert_eq!(hit_corner(Point::new(104.0, 246.0), &rect, 8.0), Some(Corner::BottomLeft));
        assert_eq!(hit_corner(Point::new(300.0, 250.0), &rect, 8.0), Some(Corner::BottomRight));
        assert_eq!(hit_corner(Point::new(200.0, 175.0), &rect, 8.0), None);
        // Distance must be strictly less than the handle size.
        assert_eq!(hit_corner(Point::new(108.0, 100.0), &rect, 8.0), None);
    }

    #[test]
    fn test_resize_moves_dragged_corner_only() {
        let rect = Rect::new(100.0, 100.0, 50.0, 40.0);

        assert_eq!(resize(&rect, Corner::BottomRight, 10.0, 5.0), Rect::new(100.0, 100.0, 60.0, 45.0));
        assert_eq!(resize(&rect, Corner::TopLeft, 10.0, 5.0), Rect::new(110.0, 105.0, 40.0, 35.0));
        assert_eq!(resize(&rect, Corner::TopRight, 10.0, 5.0), Rect::new(100.0, 105.0, 60.0, 35.0));
        assert_eq!(resize(&rect, Corner::BottomLeft, 10.0, 5.0), Rect::new(110.0, 100.0, 40.0, 45.0));
    }

    #[test]
    fn test_resize_floor_holds_for_any_deltas() {
        let deltas = [
            (-500.0, 30.0),
            (700.0, -900.0),
            (3.0, 3.0),
            (-1.0, 1000.0),
            (250.0, 250.0),
            (-2000.0, -2000.0),
        ];

        for corner in Corner::ALL {
            let mut rect = Rect::new(100.0, 100.0, 50.0, 40.0);
            for (dx, dy) in deltas {
                rect = resize(&rect, corner, dx, dy);
                assert!(rect.w >= MIN_SIZE, "{corner:?} width {}", rect.w);
                assert!(rect.h >= MIN_SIZE, "{corner:?} height {}", rect.h);
            }
        }
    }

    #[test]
    fn test_resize_clamp_keeps_anchor_fixed() {
        let rect = Rect::new(100.0, 100.0, 50.0, 40.0);
        let out = resize(&rect, Corner::TopLeft, 200.0, 200.0);

        assert_eq!(out.w, MIN_SIZE);
        assert_eq!(out.h, MIN_SIZE);
        assert_eq!(out.x + out.w, 150.0);
        assert_eq!(out.y + out.h, 140.0);
    }

    #[test]
    fn test_rescale_polygon_follows_rect() {
        let old = Rect::new(0.0, 0.0, 100.0, 50.0);
        let new = Rect::new(10.0, 20.0, 200.0, 25.0);
        let points = [Point::new(0.0, 0.0), Point::new(100.0, 50.0), Point::new(50.0, 0.0)];

        let scaled = rescale_polygon(&old, &new, &points);

        assert_eq!(scaled[0], Point::new(10.0, 20.0));
        assert_eq!(scaled[1], Point::new(210.0, 45.0));
        assert_eq!(scaled[2], Point::new(110.0, 20.0));
    }
}
