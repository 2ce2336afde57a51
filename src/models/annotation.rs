// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the labelled regions drawn on an image: a shared
//! bounding rectangle and class id, with polygon points carried only by
//! polygon annotations. All geometry is stored in display-pixel space.

/// Smallest width or height, in display pixels, any annotation may have.
pub const MIN_SIZE: f64 = 5.0;

/// A 2D point in display-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Check whether `p` lies inside the rectangle, edges included.
    pub fn contains(&self, p: Point) -> bool {
        self.x <= p.x && p.x <= self.x + self.w && self.y <= p.y && p.y <= self.y + self.h
    }

    /// Widen and/or heighten the rectangle so both sides are at least [`MIN_SIZE`].
    pub fn at_least_min_size(self) -> Self {
        Self {
            w: self.w.max(MIN_SIZE),
            h: self.h.max(MIN_SIZE),
            ..self
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Geometry specific to each kind of annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box,
    /// Outline with at least three vertices.
    Polygon(Vec<Point>),
}

/// Kind of annotation, without its geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Box,
    Polygon,
}

/// A labelled region on one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Tight bounding rectangle of the shape.
    pub rect: Rect,
    pub class_id: usize,
    pub shape: Shape,
}

impl Annotation {
    /// Create a box annotation.
    pub fn new_box(rect: Rect, class_id: usize) -> Self {
        Self {
            rect: rect.at_least_min_size(),
            class_id,
            shape: Shape::Box,
        }
    }

    /// Create a polygon annotation; the rectangle is derived from the points.
    pub fn new_polygon(points: Vec<Point>, class_id: usize) -> Self {
        let rect = crate::util::geometry::tight_bound(&points).at_least_min_size();
        Self {
            rect,
            class_id,
            shape: Shape::Polygon(points),
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        match self.shape {
            Shape::Box => AnnotationKind::Box,
            Shape::Polygon(_) => AnnotationKind::Polygon,
        }
    }

    /// Polygon vertices, if this is a polygon.
    pub fn polygon(&self) -> Option<&[Point]> {
        match &self.shape {
            Shape::Polygon(points) => Some(points),
            Shape::Box => None,
        }
    }

    /// Replace the geometry with a polygon outline, recomputing the bounding rectangle.
    pub fn set_polygon(&mut self, points: Vec<Point>) {
        self.rect = crate::util::geometry::tight_bound(&points).at_least_min_size();
        self.shape = Shape::Polygon(points);
    }
}
