// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for Polyframe Smoothing

pub mod batch;
pub mod reporter;

pub use batch::{discover_meshes, encode_all, flags_path, BatchResult};
pub use reporter::Reporter;
