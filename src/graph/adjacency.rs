// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Soft/hard adjacency storage between integer-labelled graph nodes
//!
//! The same structure is used for the per-face graph extracted from a mesh
//! and for the collapsed graph between face groups.

/// Reserved neighbour slots per node when storage grows
const NEIGHBOUR_RESERVE: usize = 4;

/// Node-indexed soft and hard neighbour lists
///
/// Both containers always have the same length. Inserting `(a, b)` records
/// the edge in both directions; inserting the same pair twice records it twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyList {
    soft: Vec<Vec<u32>>,
    hard: Vec<Vec<u32>>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `capacity` nodes without creating entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            soft: Vec::with_capacity(capacity),
            hard: Vec::with_capacity(capacity),
        }
    }

    /// Build from `(a, b, hard)` triples
    pub fn from_edges(edges: &[(u32, u32, bool)]) -> Self {
        let mut list = Self::new();
        for &(a, b, hard) in edges {
            if hard {
                list.hard_insert(a, b);
            } else {
                list.soft_insert(a, b);
            }
        }
        list
    }

    /// Add a smooth edge between `left` and `right`
    pub fn soft_insert(&mut self, left: u32, right: u32) {
        self.grow_to(left.max(right) as usize + 1);
        self.soft[left as usize].push(right);
        self.soft[right as usize].push(left);
    }

    /// Add a hard edge between `left` and `right`
    pub fn hard_insert(&mut self, left: u32, right: u32) {
        self.grow_to(left.max(right) as usize + 1);
        self.hard[left as usize].push(right);
        self.hard[right as usize].push(left);
    }

    fn grow_to(&mut self, size: usize) {
        let current = self.soft.len();
        if size > current {
            self.soft
                .resize_with(size, || Vec::with_capacity(NEIGHBOUR_RESERVE));
            self.hard
                .resize_with(size, || Vec::with_capacity(NEIGHBOUR_RESERVE));
        }
    }

    /// Number of nodes with storage
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.soft.len(), self.hard.len(), "Entries must be same size");
        self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of soft neighbours of `node`.
    ///
    /// # Panics
    ///
    /// If `node` has no storage; call [`soft_ensure`](Self::soft_ensure) first
    /// when a node might have no edges at all.
    pub fn soft_count(&self, node: u32) -> usize {
        self.soft[node as usize].len()
    }

    /// Number of hard neighbours of `node`. Same precondition as `soft_count`.
    pub fn hard_count(&self, node: u32) -> usize {
        self.hard[node as usize].len()
    }

    /// Make sure there are at least `size` soft entries
    pub fn soft_ensure(&mut self, size: usize) {
        self.grow_to(size);
    }

    /// Make sure there are at least `size` hard entries
    pub fn hard_ensure(&mut self, size: usize) {
        self.grow_to(size);
    }

    /// Soft neighbours of `node`, order not significant
    pub fn soft(&self, node: u32) -> &[u32] {
        &self.soft[node as usize]
    }

    /// Hard neighbours of `node`, order not significant
    pub fn hard(&self, node: u32) -> &[u32] {
        &self.hard[node as usize]
    }

    /// Whether a hard edge between `a` and `b` has been inserted
    pub fn has_hard_edge(&self, a: u32, b: u32) -> bool {
        self.hard
            .get(a as usize)
            .map_or(false, |neighbours| neighbours.contains(&b))
    }

    /// Number of (soft, hard) edges, counting each inserted pair once
    pub fn edge_count(&self) -> (usize, usize) {
        let soft: usize = self.soft.iter().map(Vec::len).sum();
        let hard: usize = self.hard.iter().map(Vec::len).sum();
        (soft / 2, hard / 2)
    }
}
