// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Hard edges between faces that only share a vertex
//!
//! Colouring only constrains faces that share an edge. When more than three
//! hard or boundary edges meet at a vertex, two faces touching only at that
//! vertex can end up with the same flag and smooth into each other
//! ("crosstalk"):
//!
//! ```text
//! +---+---+            +---+---+
//! | 1 | 2 |            | 1 | 2 |
//! +---+---+   becomes  +---+---+
//! | 2 | 1 |            | 3 | 4 |
//! +---+---+            +---+---+
//! ```
//!
//! For every such vertex the incident faces are split into smooth-connected
//! components and a hard edge is added between every pair of components.

use super::polymesh::PolyMesh;
use super::topology::{face_pair, is_boundary, EdgeFaces};
use crate::graph::AdjacencyList;
use std::collections::BTreeSet;
use tracing::debug;

/// Discontinuities above which a vertex is treated as a crosstalk source
pub const DEFAULT_CROSSTALK_THRESHOLD: usize = 3;

/// Could this vertex cause erroneous smoothing between incident faces?
#[inline]
pub fn may_have_crosstalk(discontinuities: &[usize], vertex: usize, threshold: usize) -> bool {
    discontinuities[vertex] > threshold
}

/// Number of hard or boundary edges incident to each vertex
pub fn vertex_discontinuities(mesh: &PolyMesh, edge_to_faces: &[EdgeFaces]) -> Vec<usize> {
    let mut discontinuities = vec![0usize; mesh.vertex_count()];
    for (edge, faces) in mesh.edges.iter().zip(edge_to_faces) {
        if is_boundary(faces) || !edge.smooth {
            for &vertex in &edge.vertices {
                discontinuities[vertex as usize] += 1;
            }
        }
    }
    discontinuities
}

/// Union-find over `0..len` with path compression and union by rank
struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSets {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root;
        }
        self.parent[x]
    }

    fn union(&mut self, x: usize, y: usize) {
        let px = self.find(x);
        let py = self.find(y);
        if px == py {
            return;
        }

        if self.rank[px] < self.rank[py] {
            self.parent[px] = py;
        } else if self.rank[px] > self.rank[py] {
            self.parent[py] = px;
        } else {
            self.parent[py] = px;
            self.rank[px] += 1;
        }
    }
}

/// Whether `face` has storage and at least one soft edge
#[inline]
fn has_soft_edges(inputs: &AdjacencyList, face: u32) -> bool {
    (face as usize) < inputs.len() && inputs.soft_count(face) > 0
}

/// Faces and edges gathered around one crosstalk vertex
#[derive(Default)]
struct CrosstalkVertex {
    faces: BTreeSet<u32>,
    edges: Vec<usize>,
}

/// Add hard edges between smooth components meeting at a crosstalk vertex.
///
/// Only faces that have soft edges take part, since the others never get a
/// smoothing flag. Returns the number of hard edges added.
pub fn add_cross_vertex_hard_edges(
    mesh: &PolyMesh,
    edge_to_faces: &[EdgeFaces],
    inputs: &mut AdjacencyList,
    threshold: usize,
) -> usize {
    let discontinuities = vertex_discontinuities(mesh, edge_to_faces);

    let crosstalk_vertices: Vec<usize> = (0..mesh.vertex_count())
        .filter(|&vertex| may_have_crosstalk(&discontinuities, vertex, threshold))
        .collect();
    if crosstalk_vertices.is_empty() {
        return 0;
    }

    let mut vertex_to_crosstalk = vec![usize::MAX; mesh.vertex_count()];
    for (index, &vertex) in crosstalk_vertices.iter().enumerate() {
        vertex_to_crosstalk[vertex] = index;
    }

    let mut info: Vec<CrosstalkVertex> = (0..crosstalk_vertices.len())
        .map(|_| CrosstalkVertex::default())
        .collect();
    for (edge_index, edge) in mesh.edges.iter().enumerate() {
        for &vertex in &edge.vertices {
            let crosstalk = vertex_to_crosstalk[vertex as usize];
            if crosstalk == usize::MAX {
                continue;
            }
            for face in edge_to_faces[edge_index].iter().flatten().copied() {
                if has_soft_edges(&*inputs, face) {
                    info[crosstalk].faces.insert(face);
                    info[crosstalk].edges.push(edge_index);
                }
            }
        }
    }

    let mut added = 0;
    let mut representatives = Vec::new();

    for vertex in &info {
        // Position in the ordered face list is the disjoint set index
        let faces: Vec<u32> = vertex.faces.iter().copied().collect();
        let mut sets = DisjointSets::new(faces.len());

        for &edge_index in &vertex.edges {
            if !mesh.edges[edge_index].smooth {
                continue;
            }
            if let Some((a, b)) = face_pair(&edge_to_faces[edge_index]) {
                // Both sides have soft edges since this edge is smooth
                if let (Ok(ia), Ok(ib)) = (faces.binary_search(&a), faces.binary_search(&b)) {
                    sets.union(ia, ib);
                }
            }
        }

        representatives.clear();
        for i in 0..faces.len() {
            if sets.find(i) == i {
                representatives.push(faces[i]);
            }
        }

        for b in 0..representatives.len() {
            for a in 0..b {
                let (face_a, face_b) = (representatives[a], representatives[b]);
                if !inputs.has_hard_edge(face_a, face_b) {
                    inputs.hard_insert(face_a, face_b);
                    added += 1;
                }
            }
        }
    }

    debug!(
        vertices = crosstalk_vertices.len(),
        hard_edges = added,
        "Added cross-vertex hard edges"
    );

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::generate::plane;
    use crate::mesh::topology::get_edge_to_faces;
    use nalgebra::Point3;

    #[test]
    fn test_disjoint_sets() {
        let mut sets = DisjointSets::new(5);
        sets.union(0, 1);
        sets.union(3, 4);
        sets.union(1, 4);

        assert_eq!(sets.find(0), sets.find(3));
        assert_ne!(sets.find(0), sets.find(2));
    }

    #[test]
    fn test_vertex_discontinuities_count_boundary_and_hard() {
        // Single quad: every edge is a boundary edge
        let mesh = PolyMesh::new(vec![Point3::origin(); 4], vec![vec![0, 1, 2, 3]]);
        let edge_to_faces = get_edge_to_faces(&mesh);
        assert_eq!(vertex_discontinuities(&mesh, &edge_to_faces), vec![2, 2, 2, 2]);
    }

    #[test]
    fn test_cross_of_hard_edges_separates_diagonals() {
        // 4x4 quads, hard edges along the middle row and column lines
        let split = |a: u32, b: u32, x: u32, _y: u32| {
            let (ra, ca) = (a / x, a % x);
            let (rb, cb) = (b / x, b % x);
            (ca < 2) == (cb < 2) && (ra < 2) == (rb < 2)
        };
        let mesh = plane(Point3::new(0.0, 4.0, 0.0), Point3::new(4.0, 0.0, 0.0), 4, 4, split);
        let edge_to_faces = get_edge_to_faces(&mesh);
        let mut inputs = crate::mesh::smoothing::build_adjacency(&mesh, &edge_to_faces);

        // Faces 5 and 10 (and 6 and 9) only touch at the centre vertex
        assert!(!inputs.has_hard_edge(5, 10));
        let added = add_cross_vertex_hard_edges(
            &mesh,
            &edge_to_faces,
            &mut inputs,
            DEFAULT_CROSSTALK_THRESHOLD,
        );

        assert_eq!(added, 2);
        assert!(inputs.has_hard_edge(5, 10));
        assert!(inputs.has_hard_edge(6, 9));
    }

    #[test]
    fn test_high_threshold_disables_correction() {
        let split = |a: u32, b: u32, x: u32, _y: u32| {
            (a % x < 2) == (b % x < 2) && (a / x < 2) == (b / x < 2)
        };
        let mesh = plane(Point3::new(0.0, 4.0, 0.0), Point3::new(4.0, 0.0, 0.0), 4, 4, split);
        let edge_to_faces = get_edge_to_faces(&mesh);
        let mut inputs = crate::mesh::smoothing::build_adjacency(&mesh, &edge_to_faces);

        assert_eq!(add_cross_vertex_hard_edges(&mesh, &edge_to_faces, &mut inputs, 4), 0);
    }
}
