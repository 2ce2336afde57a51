// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! YOLO label file encoding and decoding.
//!
//! One line per annotation, coordinates normalized to the image's display
//! size with six decimals:
//!
//! ```text
//! <class_id> <x_center> <y_center> <width> <height>   # box
//! <class_id> <x1> <y1> <x2> <y2> ... <xk> <yk>        # polygon, k >= 3
//! ```

use crate::models::annotation::{Annotation, Point, Rect, Shape};
use crate::util::geometry::{to_display, to_normalized};
use anyhow::{Context, Result};
use std::path::Path;
use thiserror::Error;

/// Why a single label line could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LabelError {
    #[error("line {line}: expected at least 5 values, found {found}")]
    TooFewValues { line: usize, found: usize },
    #[error("line {line}: polygon has an odd number of coordinates ({found})")]
    OddCoordinates { line: usize, found: usize },
    #[error("line {line}: invalid class id {value:?}")]
    InvalidClassId { line: usize, value: String },
    #[error("line {line}: invalid coordinate {value:?}")]
    InvalidCoordinate { line: usize, value: String },
}

/// Result of decoding a label file: every good line plus a warning for
/// every line that was skipped.
#[derive(Debug, Default)]
pub struct DecodedLabels {
    pub annotations: Vec<Annotation>,
    pub warnings: Vec<LabelError>,
}

/// Encode annotations into label-file text.
pub fn encode_labels(annotations: &[Annotation], display_size: (u32, u32)) -> String {
    let mut out = String::new();

    for annotation in annotations {
        out.push_str(&annotation.class_id.to_string());
        match &annotation.shape {
            Shape::Polygon(points) if points.len() >= 3 => {
                for p in points {
                    let n = to_normalized(*p, display_size);
                    out.push_str(&format!(" {:.6} {:.6}", n.x, n.y));
                }
            }
            _ => {
                let rect = &annotation.rect;
                let center = to_normalized(rect.center(), display_size);
                let size = to_normalized(Point::new(rect.w, rect.h), display_size);
                out.push_str(&format!(
                    " {:.6} {:.6} {:.6} {:.6}",
                    center.x, center.y, size.x, size.y
                ));
            }
        }
        out.push('\n');
    }

    out
}

/// Decode label-file text, skipping malformed lines.
pub fn decode_labels(text: &str, display_size: (u32, u32)) -> DecodedLabels {
    let mut decoded = DecodedLabels::default();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode_line(line, i + 1, display_size) {
            Ok(annotation) => decoded.annotations.push(annotation),
            Err(e) => decoded.warnings.push(e),
        }
    }

    decoded
}

fn decode_line(line: &str, line_no: usize, display_size: (u32, u32)) -> Result<Annotation, LabelError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(LabelError::TooFewValues {
            line: line_no,
            found: tokens.len(),
        });
    }

    let class_id = parse_class_id(tokens[0]).ok_or_else(|| LabelError::InvalidClassId {
        line: line_no,
        value: tokens[0].to_string(),
    })?;

    let values = tokens[1..]
        .iter()
        .map(|t| {
            t.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| LabelError::InvalidCoordinate {
                    line: line_no,
                    value: t.to_string(),
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    if values.len() == 4 {
        let (w, h) = display_size;
        let (xc, yc, bw, bh) = (values[0], values[1], values[2], values[3]);
        let rect = Rect::new(
            (xc - bw / 2.0) * w as f64,
            (yc - bh / 2.0) * h as f64,
            bw * w as f64,
            bh * h as f64,
        );
        return Ok(Annotation::new_box(rect, class_id));
    }

    if values.len() % 2 != 0 {
        return Err(LabelError::OddCoordinates {
            line: line_no,
            found: values.len(),
        });
    }

    let points = values
        .chunks_exact(2)
        .map(|xy| to_display(Point::new(xy[0], xy[1]), display_size))
        .collect();
    Ok(Annotation::new_polygon(points, class_id))
}

/// Class ids are written as integers, but tolerate `3.0` style values.
fn parse_class_id(token: &str) -> Option<usize> {
    if let Ok(id) = token.parse::<usize>() {
        return Some(id);
    }
    let value = token.parse::<f64>().ok()?;
    (value >= 0.0 && value.fract() == 0.0 && value.is_finite()).then_some(value as usize)
}

/// Read and decode the label file at `path`. A missing file yields no
/// annotations.
///
/// Bytes that aren't valid UTF-8 only spoil the lines they sit on.
pub fn read_label_file(path: &Path, display_size: (u32, u32)) -> Result<DecodedLabels> {
    if !path.exists() {
        return Ok(DecodedLabels::default());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read label file {}", path.display()))?;
    let decoded = decode_labels(&String::from_utf8_lossy(&bytes), display_size);
    for warning in &decoded.warnings {
        log::warn!("{}: {}", path.display(), warning);
    }
    Ok(decoded)
}

/// Encode and write `annotations` to `path`, replacing its contents.
pub fn write_label_file(path: &Path, annotations: &[Annotation], display_size: (u32, u32)) -> Result<()> {
    let text = encode_labels(annotations, display_size);
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write label file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::annotation::AnnotationKind;

    const DISPLAY: (u32, u32) = (900, 700);

    #[test]
    fn test_encode_box_line() {
        let ann = Annotation::new_box(Rect::new(100.0, 100.0, 200.0, 150.0), 0);
        assert_eq!(
            encode_labels(&[ann], DISPLAY),
            "0 0.222222 0.250000 0.222222 0.214286\n"
        );
    }

    #[test]
    fn test_encode_polygon_line() {
        let ann = Annotation::new_polygon(
            vec![Point::new(90.0, 70.0), Point::new(450.0, 70.0), Point::new(450.0, 350.0)],
            2,
        );
        assert_eq!(
            encode_labels(&[ann], DISPLAY),
            "2 0.100000 0.100000 0.500000 0.100000 0.500000 0.500000\n"
        );
    }

    #[test]
    fn test_decode_box_and_polygon() {
        let text = "1 0.5 0.5 0.2 0.1\n0 0.1 0.1 0.5 0.1 0.5 0.5\n";
        let decoded = decode_labels(text, DISPLAY);

        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.annotations.len(), 2);

        let bx = &decoded.annotations[0];
        assert_eq!(bx.kind(), AnnotationKind::Box);
        assert_eq!(bx.class_id, 1);
        assert!((bx.rect.x - 360.0).abs() < 1e-9);
        assert!((bx.rect.y - 315.0).abs() < 1e-9);
        assert!((bx.rect.w - 180.0).abs() < 1e-9);
        assert!((bx.rect.h - 70.0).abs() < 1e-9);

        let poly = &decoded.annotations[1];
        assert_eq!(poly.kind(), AnnotationKind::Polygon);
        assert!((poly.rect.x - 90.0).abs() < 1e-9);
        assert!((poly.rect.y - 70.0).abs() < 1e-9);
        assert!((poly.rect.w - 360.0).abs() < 1e-9);
        assert!((poly.rect.h - 280.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "0 0.5 0.5 0.2\n\
                    x 0.5 0.5 0.2 0.2\n\
                    \n\
                    1 0.5 abc 0.2 0.2\n\
                    2 0.1 0.1 0.2 0.2 0.3\n\
                    3 0.5 0.5 0.2 0.2\n";
        let decoded = decode_labels(text, DISPLAY);

        assert_eq!(decoded.annotations.len(), 1);
        assert_eq!(decoded.annotations[0].class_id, 3);
        assert_eq!(
            decoded.warnings,
            vec![
                LabelError::TooFewValues { line: 1, found: 4 },
                LabelError::InvalidClassId { line: 2, value: "x".to_string() },
                LabelError::InvalidCoordinate { line: 4, value: "abc".to_string() },
                LabelError::OddCoordinates { line: 5, found: 5 },
            ]
        );
    }

    #[test]
    fn test_roundtrip_within_tolerance() {
        let rect = Rect::new(123.4567, 77.891, 212.5, 49.25);
        let text = encode_labels(&[Annotation::new_box(rect, 4)], DISPLAY);
        let decoded = decode_labels(&text, DISPLAY);
        let back = decoded.annotations[0].rect;

        // Six decimals of a fraction of 900 px is ~1e-3 px.
        let tol = 1e-6 * 900.0;
        assert!((back.x - rect.x).abs() < tol);
        assert!((back.y - rect.y).abs() < tol);
        assert!((back.w - rect.w).abs() < tol);
        assert!((back.h - rect.h).abs() < tol);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let decoded = read_label_file(&dir.path().join("none.txt"), DISPLAY).unwrap();
        assert!(decoded.annotations.is_empty());
        assert!(decoded.warnings.is_empty());
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.txt");
        let anns = vec![
            Annotation::new_box(Rect::new(10.0, 20.0, 30.0, 40.0), 0),
            Annotation::new_polygon(
                vec![Point::new(0.0, 0.0), Point::new(90.0, 0.0), Point::new(45.0, 70.0)],
                1,
            ),
        ];

        write_label_file(&path, &anns, DISPLAY).unwrap();
        let decoded = read_label_file(&path, DISPLAY).unwrap();

        assert_eq!(decoded.annotations.len(), 2);
        assert_eq!(decoded.annotations[1].polygon().map(|p| p.len()), Some(3));
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.txt");
        std::fs::write(&path, b"0 0.5 0.5 0.2 0.2\n\xff\xfe garbage\n").unwrap();

        let decoded = read_label_file(&path, DISPLAY).unwrap();

        assert_eq!(decoded.annotations.len(), 1);
        let rect = decoded.annotations[0].rect;
        assert!((rect.x - 360.0).abs() < 1e-6 && (rect.y - 280.0).abs() < 1e-6);
        assert!((rect.w - 180.0).abs() < 1e-6 && (rect.h - 140.0).abs() < 1e-6);
        assert_eq!(decoded.warnings, vec![LabelError::TooFewValues { line: 2, found: 2 }]);
    }
}
