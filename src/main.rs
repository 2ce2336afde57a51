// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! yolabel - box and polygon labelling for YOLO datasets
//!
//! A desktop tool for drawing bounding boxes and polygons over a folder of
//! images and writing them out as YOLO detection/segmentation labels, with
//! a class registry shared across dataset splits.

mod app;
mod config;
mod editor;
mod input;
mod io;
mod models;
mod navigator;
mod session;
mod ui;
mod util;

use anyhow::Result;
use app::YolabelApp;
use clap::Parser;
use config::{Args, EditorConfig};
use models::project::Project;
use navigator::Navigator;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = EditorConfig::from(&args);

    let folder = match &args.images {
        Some(folder) => folder.clone(),
        None => match rfd::FileDialog::new().set_title("Images to label").pick_folder() {
            Some(folder) => folder,
            None => {
                log::info!("No folder selected");
                return Ok(());
            }
        },
    };

    let images = io::media::list_images(&folder)?;
    if images.is_empty() {
        log::info!("No images to label in {}", folder.display());
        return Ok(());
    }
    log::info!("Found {} images in {}", images.len(), folder.display());

    let project = Project::open(&args.dataset, &args.project, args.split)?;
    log::info!(
        "Labelling into {} ({} split), classes in {}",
        project.dataset_root.display(),
        project.split.as_str(),
        project.project_root.join(models::project::REGISTRY_FILE).display()
    );
    if args.prepare {
        io::media::copy_into_dataset(&images, &project.images_dir())?;
    }

    let navigator = Navigator::new(project, images, config.canvas, config.handle_size);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size())
            .with_resizable(false)
            .with_title(format!("YOLO Annotation Tool [{}]", args.split.as_str())),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "yolabel",
        options,
        Box::new(|_cc| Ok(Box::new(YolabelApp::new(navigator)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
