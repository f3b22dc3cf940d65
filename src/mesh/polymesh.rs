// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon mesh with per-edge smoothness and per-face channels

use crate::error::{SmoothingError, SmoothingResult};
use ahash::AHashMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Edge between two vertices with its smooth/hard classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshEdge {
    pub vertices: [u32; 2],
    pub smooth: bool,
}

impl MeshEdge {
    pub fn new(a: u32, b: u32, smooth: bool) -> Self {
        Self {
            vertices: [a, b],
            smooth,
        }
    }
}

/// Polygon mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolyMesh {
    pub positions: Vec<Point3<f64>>,
    /// Ordered vertex indices of each polygon
    pub faces: Vec<Vec<u32>>,
    pub edges: Vec<MeshEdge>,
    /// Named per-face integer channels
    #[serde(default)]
    pub face_channels: BTreeMap<String, Vec<i32>>,
}

#[inline]
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl PolyMesh {
    /// Build a mesh, deriving its edges from the face boundaries.
    ///
    /// Edges are numbered in the order they are first seen and start smooth.
    pub fn new(positions: Vec<Point3<f64>>, faces: Vec<Vec<u32>>) -> Self {
        let mut seen: AHashMap<(u32, u32), usize> = AHashMap::new();
        let mut edges = Vec::new();

        for face in &faces {
            let n = face.len();
            for i in 0..n {
                let a = face[i];
                let b = face[(i + 1) % n];
                if a == b {
                    continue;
                }
                seen.entry(edge_key(a, b)).or_insert_with(|| {
                    edges.push(MeshEdge::new(a, b, true));
                    edges.len() - 1
                });
            }
        }

        Self {
            positions,
            faces,
            edges,
            face_channels: BTreeMap::new(),
        }
    }

    /// Build a mesh from an explicit edge list
    pub fn with_edges(
        positions: Vec<Point3<f64>>,
        faces: Vec<Vec<u32>>,
        edges: Vec<MeshEdge>,
    ) -> Self {
        Self {
            positions,
            faces,
            edges,
            face_channels: BTreeMap::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Total number of face corners
    pub fn face_vertex_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum()
    }

    /// Index of the edge joining `a` and `b`, in either direction
    pub fn find_edge(&self, a: u32, b: u32) -> Option<usize> {
        let key = edge_key(a, b);
        self.edges
            .iter()
            .position(|edge| edge_key(edge.vertices[0], edge.vertices[1]) == key)
    }

    pub fn set_edge_smooth(&mut self, edge: usize, smooth: bool) {
        self.edges[edge].smooth = smooth;
    }

    /// Set the smoothness of the edge joining `a` and `b`; false if there is none
    pub fn set_edge_smooth_between(&mut self, a: u32, b: u32, smooth: bool) -> bool {
        match self.find_edge(a, b) {
            Some(edge) => {
                self.edges[edge].smooth = smooth;
                true
            }
            None => false,
        }
    }

    /// Set every edge's smoothness
    pub fn set_all_smooth(&mut self, smooth: bool) {
        for edge in &mut self.edges {
            edge.smooth = smooth;
        }
    }

    /// Check that every face and edge references an existing vertex
    pub fn validate(&self) -> SmoothingResult<()> {
        let vertex_count = self.vertex_count();
        let indices = self
            .faces
            .iter()
            .flatten()
            .chain(self.edges.iter().flat_map(|edge| edge.vertices.iter()));

        for &vertex in indices {
            if vertex as usize >= vertex_count {
                return Err(SmoothingError::InvalidVertexIndex {
                    vertex,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Attach a per-face channel, replacing any channel with the same name
    pub fn add_face_channel(&mut self, name: &str, data: Vec<i32>) -> SmoothingResult<()> {
        if data.len() != self.face_count() {
            return Err(SmoothingError::FaceCountMismatch {
                expected: self.face_count(),
                actual: data.len(),
            });
        }
        self.face_channels.insert(name.to_string(), data);
        Ok(())
    }

    pub fn face_channel(&self, name: &str) -> Option<&[i32]> {
        self.face_channels.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> PolyMesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        PolyMesh::new(positions, vec![vec![0, 1, 2], vec![0, 2, 3]])
    }

    #[test]
    fn test_edges_are_derived_once() {
        let mesh = two_triangles();
        assert_eq!(mesh.edge_count(), 5);
        assert_eq!(mesh.face_vertex_count(), 6);
        assert!(mesh.edges.iter().all(|edge| edge.smooth));
        assert_eq!(mesh.edges[0].vertices, [0, 1]);
        assert_eq!(mesh.find_edge(2, 0), mesh.find_edge(0, 2));
        assert!(mesh.find_edge(1, 3).is_none());
    }

    #[test]
    fn test_set_edge_smooth_between() {
        let mut mesh = two_triangles();
        assert!(mesh.set_edge_smooth_between(2, 0, false));
        assert!(!mesh.set_edge_smooth_between(1, 3, false));

        let edge = mesh.find_edge(0, 2).unwrap();
        assert!(!mesh.edges[edge].smooth);
    }

    #[test]
    fn test_validate() {
        let mut mesh = two_triangles();
        assert!(mesh.validate().is_ok());

        mesh.faces.push(vec![1, 2, 9]);
        assert_eq!(
            mesh.validate(),
            Err(SmoothingError::InvalidVertexIndex {
                vertex: 9,
                vertex_count: 4
            })
        );
    }

    #[test]
    fn test_face_channel_length_checked() {
        let mut mesh = two_triangles();
        assert!(mesh.add_face_channel("SmoothingGroup", vec![1]).is_err());
        mesh.add_face_channel("SmoothingGroup", vec![1, 2]).unwrap();
        assert_eq!(mesh.face_channel("SmoothingGroup"), Some(&[1, 2][..]));
    }
}
