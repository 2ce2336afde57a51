// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pure helpers: geometry and class colors.

pub mod color;
pub mod geometry;
