// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Deterministic class colors.

/// Golden-ratio hue step, so neighbouring ids land far apart on the wheel.
const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_894_9;
const SATURATION: f64 = 0.85;
const VALUE: f64 = 1.0;

/// Color of class `id` as an 8-bit RGB triple.
///
/// Always recomputed from the id; nothing is stored.
pub fn class_color(id: usize) -> [u8; 3] {
    let hue = (id as f64 * GOLDEN_RATIO_CONJUGATE).fract();
    let (r, g, b) = hsv_to_rgb(hue, SATURATION, VALUE);
    [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]
}

/// Convert HSV (all components in 0.0-1.0) to RGB in 0.0-1.0.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as i64 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_primaries() {
        let (r, g, b) = hsv_to_rgb(0.0, 1.0, 1.0);
        assert!((r - 1.0).abs() < 1e-9 && g.abs() < 1e-9 && b.abs() < 1e-9);

        let (r, g, b) = hsv_to_rgb(1.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && (g - 1.0).abs() < 1e-9 && b.abs() < 1e-9);

        let (r, g, b) = hsv_to_rgb(2.0 / 3.0, 1.0, 1.0);
        assert!(r.abs() < 1e-9 && g.abs() < 1e-9 && (b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_class_zero_is_red() {
        // hue 0, s 0.85: red stays at full, the others at 0.15 * 255.
        assert_eq!(class_color(0), [255, 38, 38]);
    }

    #[test]
    fn test_class_color_is_deterministic_and_distinct() {
        assert_eq!(class_color(7), class_color(7));
        assert_ne!(class_color(0), class_color(1));
        assert_ne!(class_color(1), class_color(2));
    }
}
