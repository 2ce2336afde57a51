// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, label files and the dataset manifest.

pub mod labels;
pub mod manifest;
pub mod media;
