// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command-line configuration.

use crate::models::project::Split;
use crate::util::geometry::DEFAULT_HANDLE_SIZE;
use clap::Parser;
use std::path::PathBuf;

/// Width of the class list next to the canvas, in points.
pub const SIDEBAR_WIDTH: f32 = 220.0;

/// Label images with boxes and polygons for YOLO training.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Folder of images to label (a folder picker opens if omitted)
    pub images: Option<PathBuf>,

    /// Dataset folder receiving labels/<split> and data.yaml
    #[arg(short = 'd', long = "dataset")]
    pub dataset: PathBuf,

    /// Project folder holding the class registry shared across splits
    #[arg(short = 'p', long = "project")]
    pub project: PathBuf,

    /// Dataset split being labelled
    #[arg(short = 's', long = "split", value_enum, default_value = "train")]
    pub split: Split,

    /// Width of the canvas images are fitted into
    #[arg(long = "canvas-width", default_value_t = 900, value_parser = clap::value_parser!(u32).range(1..))]
    pub canvas_width: u32,

    /// Height of the canvas images are fitted into
    #[arg(long = "canvas-height", default_value_t = 700, value_parser = clap::value_parser!(u32).range(1..))]
    pub canvas_height: u32,

    /// Half-width of the corner resize handles, in pixels
    #[arg(long = "handle-size", default_value_t = DEFAULT_HANDLE_SIZE)]
    pub handle_size: f64,

    /// Copy the images into <dataset>/images/<split> before labelling
    #[arg(long = "prepare")]
    pub prepare: bool,
}

/// Settings the editor window runs with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Bounds each image is fitted into, in pixels.
    pub canvas: (u32, u32),
    pub handle_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas: (900, 700),
            handle_size: DEFAULT_HANDLE_SIZE,
        }
    }
}

impl From<&Args> for EditorConfig {
    fn from(args: &Args) -> Self {
        Self {
            canvas: (args.canvas_width, args.canvas_height),
            handle_size: args.handle_size,
        }
    }
}

impl EditorConfig {
    /// Initial window size: canvas plus class sidebar.
    pub fn window_size(&self) -> [f32; 2] {
        [self.canvas.0 as f32 + SIDEBAR_WIDTH, self.canvas.1 as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["yolabel", "imgs", "-d", "ds", "-p", "proj"]).unwrap();
        assert_eq!(args.split, Split::Train);
        assert!(!args.prepare);
        assert_eq!(EditorConfig::from(&args), EditorConfig::default());
        assert_eq!(EditorConfig::default().window_size(), [1120.0, 700.0]);
    }

    #[test]
    fn test_val_split_and_canvas() {
        let args = Args::try_parse_from([
            "yolabel", "-d", "ds", "-p", "proj", "--split", "val", "--canvas-width", "1280", "--prepare",
        ])
        .unwrap();
        assert!(args.images.is_none());
        assert_eq!(args.split, Split::Val);
        assert_eq!(args.canvas_width, 1280);
        assert!(args.prepare);
    }

    #[test]
    fn test_zero_canvas_is_rejected() {
        assert!(Args::try_parse_from(["yolabel", "-d", "ds", "-p", "proj", "--canvas-height", "0"]).is_err());
    }
}
