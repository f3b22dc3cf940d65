// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON mesh and smoothing flag files

use crate::mesh::PolyMesh;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of a flags file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagsFile {
    pub flags: Vec<u32>,
}

/// Load a mesh from a JSON file
pub fn load_mesh(path: impl AsRef<Path>) -> Result<PolyMesh> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mesh file: {:?}", path))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse mesh file: {:?}", path))
}

/// Save a mesh as pretty-printed JSON
pub fn save_mesh(mesh: &PolyMesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(mesh).context("Failed to serialize mesh")?;
    fs::write(path, json).with_context(|| format!("Failed to write mesh file: {:?}", path))?;
    Ok(())
}

/// Load per-face flags written by [`save_flags`]
pub fn load_flags(path: impl AsRef<Path>) -> Result<Vec<u32>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read flags file: {:?}", path))?;
    let file: FlagsFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse flags file: {:?}", path))?;
    Ok(file.flags)
}

/// Save per-face flags as `{ "flags": [...] }`
pub fn save_flags(flags: &[u32], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = FlagsFile { flags: flags.to_vec() };
    let json = serde_json::to_string_pretty(&file).context("Failed to serialize flags")?;
    fs::write(path, json).with_context(|| format!("Failed to write flags file: {:?}", path))?;
    Ok(())
}
