// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh and flag files, OBJ import

mod json;
mod obj;

pub use json::{load_flags, load_mesh, save_flags, save_mesh, FlagsFile};
pub use obj::{import_obj, parse_obj};
