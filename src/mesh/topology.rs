// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Edge to face incidence for polygon meshes
//!
//! Faces adjacent to an edge are found by intersecting the incident face
//! lists of the edge's two endpoints.

use super::polymesh::PolyMesh;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Faces on either side of an edge; `[None, None]` for a loose edge and
/// `[Some(f), None]` for a boundary edge
pub type EdgeFaces = [Option<u32>; 2];

/// An edge's endpoints and every face it borders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeIncidence {
    pub vertices: [u32; 2],
    pub faces: Vec<u32>,
}

/// Incident faces of every vertex, each list in ascending face order
pub fn vertex_faces(mesh: &PolyMesh) -> Vec<Vec<u32>> {
    // Most vertices touch at most six faces
    let mut face_map: Vec<Vec<u32>> = (0..mesh.vertex_count())
        .map(|_| Vec::with_capacity(6))
        .collect();

    for (face, vertices) in mesh.faces.iter().enumerate() {
        for &vertex in vertices {
            face_map[vertex as usize].push(face as u32);
        }
    }

    face_map
}

/// Sorted intersection of two ascending lists, appended to `out`
fn intersect_sorted(left: &[u32], right: &[u32], out: &mut Vec<u32>) {
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        match left[i].cmp(&right[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(left[i]);
                i += 1;
                j += 1;
            }
        }
    }
}

/// Every face bordering each edge, indexed like `mesh.edges`.
///
/// A manifold mesh yields one or two faces per edge.
pub fn find_faces(mesh: &PolyMesh) -> Vec<EdgeIncidence> {
    let face_map = vertex_faces(mesh);

    mesh.edges
        .iter()
        .map(|edge| {
            let [one, two] = edge.vertices;
            let mut faces = Vec::with_capacity(3);
            intersect_sorted(&face_map[one as usize], &face_map[two as usize], &mut faces);
            EdgeIncidence {
                vertices: [one, two],
                faces,
            }
        })
        .collect()
}

/// Up to two faces bordering each edge, indexed like `mesh.edges`.
///
/// Non-manifold edges keep their two lowest-numbered faces.
pub fn get_edge_to_faces(mesh: &PolyMesh) -> Vec<EdgeFaces> {
    let face_map = vertex_faces(mesh);
    let mut common = Vec::with_capacity(3);
    let mut non_manifold = 0usize;

    let edge_to_faces = mesh
        .edges
        .iter()
        .map(|edge| {
            common.clear();
            let [one, two] = edge.vertices;
            intersect_sorted(&face_map[one as usize], &face_map[two as usize], &mut common);

            if common.len() > 2 {
                non_manifold += 1;
            }
            match common.as_slice() {
                [] => [None, None],
                [only] => [Some(*only), None],
                [first, second, ..] => [Some(*first), Some(*second)],
            }
        })
        .collect();

    if non_manifold > 0 {
        warn!(
            edges = non_manifold,
            "Non-manifold edges found, only two adjacent faces considered"
        );
    }

    edge_to_faces
}

/// Number of edges bordered by more than two faces.
///
/// [`get_edge_to_faces`] only keeps two faces for these edges.
///
/// # Panics
///
/// If a face or edge references a missing vertex; see [`PolyMesh::validate`].
pub fn non_manifold_edge_count(mesh: &PolyMesh) -> usize {
    find_faces(mesh)
        .iter()
        .filter(|incidence| incidence.faces.len() > 2)
        .count()
}

/// Whether the edge has exactly one adjacent face
#[inline]
pub fn is_boundary(faces: &EdgeFaces) -> bool {
    faces[0].is_some() && faces[1].is_none()
}

/// Both faces of a two-sided edge
#[inline]
pub fn face_pair(faces: &EdgeFaces) -> Option<(u32, u32)> {
    match *faces {
        [Some(a), Some(b)] => Some((a, b)),
        _ => None,
    }
}
