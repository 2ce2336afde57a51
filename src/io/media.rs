// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image file loading.
//!
//! This module handles enumerating and decoding image files, and copying
//! them into the dataset's `images/<split>` folder.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Extensions picked up when scanning a folder for images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// A decoded image as RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Source of decoded images, so the session logic can run without real files.
pub trait ImageSource {
    fn load(&self, path: &Path) -> Result<LoadedImage>;
}

/// Decodes images from disk with the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    fn load(&self, path: &Path) -> Result<LoadedImage> {
        load_image(path)
    }
}

/// Load an image file and convert it to RGBA8.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to decode image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// List the images directly inside `folder`, sorted by path.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Failed to read folder {}", folder.display()))?;

    let mut images: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && has_image_extension(p))
        .collect();
    images.sort();
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Copy `images` into `images_dir`, skipping files that already exist there.
///
/// Returns the number of files copied.
pub fn copy_into_dataset(images: &[PathBuf], images_dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(images_dir)
        .with_context(|| format!("Failed to create {}", images_dir.display()))?;

    let mut copied = 0;
    for image in images {
        let Some(name) = image.file_name() else {
            continue;
        };
        let dst = images_dir.join(name);
        if dst.exists() {
            continue;
        }
        std::fs::copy(image, &dst)
            .with_context(|| format!("Failed to copy {} to {}", image.display(), dst.display()))?;
        copied += 1;
    }

    log::info!("Copied {} images to {}", copied, images_dir.display());
    Ok(copied)
}
