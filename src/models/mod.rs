// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: annotations, their per-image store, the class registry and
//! the project they belong to.

pub mod annotation;
pub mod project;
pub mod registry;
pub mod store;
