// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smoothing group encoding of a polygon mesh
//!
//! Pipeline: uniform-smoothness shortcut, reuse of a previous encoding that
//! still matches every edge, and otherwise a full recompute (adjacency,
//! crosstalk correction, colouring).

use super::crosstalk::add_cross_vertex_hard_edges;
use super::polymesh::PolyMesh;
use super::topology::{face_pair, get_edge_to_faces, EdgeFaces};
use crate::config::SmoothingConfig;
use crate::error::{SmoothingError, SmoothingResult};
use crate::graph::{check_coloring, color_graph, AdjacencyList, ColoringViolation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Name of the per-face channel holding smoothing groups
pub const SMOOTHING_GROUP_CHANNEL: &str = "SmoothingGroup";

/// How an encoding was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingSource {
    /// Every edge had the same smoothness
    Constant,
    /// The previous encoding still matched every edge
    Reused,
    /// Freshly coloured
    Computed,
}

/// Per-face smoothing flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingGroups {
    pub flags: Vec<u32>,
    pub source: EncodingSource,
}

/// Flag shared by every face when all edges agree: 0 if all hard, 1 if all
/// smooth, `None` if mixed or there are no edges.
pub fn try_get_constant_smoothing_group(mesh: &PolyMesh) -> Option<u32> {
    let mut has_soft = false;
    let mut has_hard = false;

    for edge in &mesh.edges {
        if edge.smooth {
            has_soft = true;
        } else {
            has_hard = true;
        }

        if has_soft && has_hard {
            return None;
        }
    }

    if has_hard != has_soft {
        Some(if has_hard { 0 } else { 1 })
    } else {
        None
    }
}

/// Whether `encoding` gives every two-sided edge the right smoothness
pub fn encoding_matches(mesh: &PolyMesh, edge_to_faces: &[EdgeFaces], encoding: &[u32]) -> bool {
    if encoding.len() != mesh.face_count() {
        return false;
    }

    mesh.edges.iter().zip(edge_to_faces).all(|(edge, faces)| match face_pair(faces) {
        Some((a, b)) => (encoding[a as usize] & encoding[b as usize] != 0) == edge.smooth,
        None => true,
    })
}

/// Face adjacency graph with one entry per two-sided edge
pub fn build_adjacency(mesh: &PolyMesh, edge_to_faces: &[EdgeFaces]) -> AdjacencyList {
    let mut inputs = AdjacencyList::with_capacity(mesh.face_count());
    for (edge, faces) in mesh.edges.iter().zip(edge_to_faces) {
        if let Some((a, b)) = face_pair(faces) {
            if edge.smooth {
                inputs.soft_insert(a, b);
            } else {
                inputs.hard_insert(a, b);
            }
        }
    }
    inputs
}

/// `(face_a, face_b, hard)` for every two-sided edge of the mesh
pub fn face_edges(mesh: &PolyMesh) -> Vec<(u32, u32, bool)> {
    let edge_to_faces = get_edge_to_faces(mesh);
    mesh.edges
        .iter()
        .zip(&edge_to_faces)
        .filter_map(|(edge, faces)| face_pair(faces).map(|(a, b)| (a, b, !edge.smooth)))
        .collect()
}

/// Edges of the mesh that `flags` gets wrong.
///
/// Fails if the mesh references a missing vertex or `flags` does not have
/// one entry per face.
pub fn verify_smoothing_groups(
    mesh: &PolyMesh,
    flags: &[u32],
) -> SmoothingResult<Vec<ColoringViolation>> {
    mesh.validate()?;
    if flags.len() != mesh.face_count() {
        return Err(SmoothingError::FaceCountMismatch {
            expected: mesh.face_count(),
            actual: flags.len(),
        });
    }

    Ok(check_coloring(&face_edges(mesh), flags))
}

/// Compute smoothing groups for `mesh`.
///
/// `prev` is a previous encoding used as a hint; pass an empty slice if
/// there is none. It is returned unchanged when it still matches every edge.
pub fn create_smoothing_groups(
    mesh: &PolyMesh,
    prev: &[u32],
    config: &SmoothingConfig,
) -> SmoothingResult<SmoothingGroups> {
    mesh.validate()?;
    let num_faces = mesh.face_count();

    if config.constant_shortcut {
        if let Some(flag) = try_get_constant_smoothing_group(mesh) {
            debug!(faces = num_faces, flag, "Uniform edge smoothness");
            return Ok(SmoothingGroups {
                flags: vec![flag; num_faces],
                source: EncodingSource::Constant,
            });
        }
    }

    let edge_to_faces = get_edge_to_faces(mesh);

    if config.reuse_previous_encoding && encoding_matches(mesh, &edge_to_faces, prev) {
        debug!(faces = num_faces, "Previous smoothing groups still valid");
        return Ok(SmoothingGroups {
            flags: prev.to_vec(),
            source: EncodingSource::Reused,
        });
    }

    let mut inputs = build_adjacency(mesh, &edge_to_faces);
    if config.crosstalk_correction {
        add_cross_vertex_hard_edges(mesh, &edge_to_faces, &mut inputs, config.crosstalk_threshold);
    }

    let flags = color_graph(&inputs, num_faces)?;
    info!(
        faces = num_faces,
        edges = mesh.edge_count(),
        "Computed smoothing groups"
    );

    Ok(SmoothingGroups {
        flags,
        source: EncodingSource::Computed,
    })
}

/// Compute smoothing groups and store them in the mesh's
/// [`SMOOTHING_GROUP_CHANNEL`] face channel
pub fn write_smoothing_groups(
    mesh: &mut PolyMesh,
    prev: &[u32],
    config: &SmoothingConfig,
) -> SmoothingResult<SmoothingGroups> {
    let groups = create_smoothing_groups(mesh, prev, config)?;
    // Same bits, signed channel type
    let channel = groups.flags.iter().map(|&flag| flag as i32).collect();
    mesh.add_face_channel(SMOOTHING_GROUP_CHANNEL, channel)?;
    Ok(groups)
}
