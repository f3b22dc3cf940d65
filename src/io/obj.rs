// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ importer
//!
//! Only `v` and `f` records are read. Everything else (normals, texture
//! coordinates, groups, materials) is skipped.

use crate::mesh::PolyMesh;
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Point3;
use std::fs;
use std::path::Path;

/// Import an OBJ file; every derived edge starts smooth
pub fn import_obj(path: impl AsRef<Path>) -> Result<PolyMesh> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read OBJ file: {:?}", path))?;

    parse_obj(&source).with_context(|| format!("Failed to parse OBJ file: {:?}", path))
}

/// Parse OBJ source into a mesh
pub fn parse_obj(source: &str) -> Result<PolyMesh> {
    let mut positions = Vec::new();
    let mut faces = Vec::new();

    for (number, text) in source.lines().enumerate() {
        let line = number + 1;
        let mut tokens = text.split_whitespace();

        match tokens.next() {
            Some("v") => {
                let mut coords = [0.0f64; 3];
                for coord in &mut coords {
                    let token = tokens
                        .next()
                        .ok_or_else(|| anyhow!("Line {}: vertex needs three coordinates", line))?;
                    *coord = token
                        .parse()
                        .with_context(|| format!("Line {}: invalid coordinate '{}'", line, token))?;
                }
                positions.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let face = tokens
                    .map(|token| resolve_index(token, positions.len(), line))
                    .collect::<Result<Vec<u32>>>()?;
                if face.len() < 3 {
                    bail!("Line {}: face needs at least three vertices", line);
                }
                faces.push(face);
            }
            _ => {}
        }
    }

    Ok(PolyMesh::new(positions, faces))
}

/// Zero-based vertex index of a face token (`7`, `7/1`, `7//3`, `-1`)
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<u32> {
    let vertex = token.split('/').next().unwrap_or_default();
    let index: i64 = vertex
        .parse()
        .with_context(|| format!("Line {}: invalid face index '{}'", line, token))?;

    let resolved = match index {
        0 => bail!("Line {}: face indices start at 1", line),
        i if i > 0 => i - 1,
        i => vertex_count as i64 + i,
    };

    if resolved < 0 || resolved >= vertex_count as i64 {
        bail!(
            "Line {}: face index {} out of range ({} vertices so far)",
            line,
            index,
            vertex_count
        );
    }
    Ok(resolved as u32)
}
