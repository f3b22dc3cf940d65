// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face grouping used while collapsing the adjacency graph
//!
//! Group 0 is the default group: every face starts in it and none is left in
//! it once collapsing finishes.

use ahash::{AHashMap, AHashSet};

/// Neighbour set of a group
pub type NodeSet = AHashSet<u32>;

/// Face to group assignment plus per-group membership and neighbour sets
#[derive(Debug, Clone)]
pub struct GroupList {
    /// Group of each face, 0 for ungrouped
    pub(crate) groups: Vec<u32>,
    /// Faces of each group
    pub(crate) members: Vec<Vec<u32>>,
    /// Union of the soft neighbours of every member
    pub(crate) soft_nodes: AHashMap<u32, NodeSet>,
    /// Union of the hard neighbours of every member
    pub(crate) hard_nodes: AHashMap<u32, NodeSet>,
    min: u32,
    max: u32,
}

impl GroupList {
    pub fn new(num_faces: usize) -> Self {
        Self {
            groups: vec![0; num_faces],
            members: Vec::with_capacity(num_faces),
            soft_nodes: AHashMap::with_capacity(num_faces),
            hard_nodes: AHashMap::with_capacity(num_faces),
            min: 0,
            max: 0,
        }
    }

    /// Whether `node` has left the default group
    #[inline]
    pub fn has(&self, node: u32) -> bool {
        self.groups[node as usize] != 0
    }

    #[inline]
    pub fn get(&self, node: u32) -> u32 {
        self.groups[node as usize]
    }

    /// Assign `node` to `group`
    pub fn join(&mut self, node: u32, group: u32) {
        debug_assert!(group != 0, "group 0 is reserved");
        debug_assert!(!self.has(node), "a face is never moved between groups");

        self.groups[node as usize] = group;

        let required = group as usize + 1;
        if self.members.len() < required {
            self.members.resize_with(required, || Vec::with_capacity(4));
        }
        self.members[group as usize].push(node);

        if self.min == 0 && self.max == 0 {
            self.min = group;
            self.max = group;
        } else if self.min > group {
            self.min = group;
        } else if self.max < group {
            self.max = group;
        }
    }

    /// Smallest group id in use, 0 if nothing has been grouped
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest group id in use, 0 if nothing has been grouped
    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn num_faces(&self) -> usize {
        self.groups.len()
    }

    /// Faces belonging to `group`
    pub fn members(&self, group: u32) -> &[u32] {
        self.members
            .get(group as usize)
            .map_or(&[][..], Vec::as_slice)
    }

    /// Number of group ids in `min..=max`
    pub fn group_count(&self) -> usize {
        if self.max == 0 {
            0
        } else {
            (self.max - self.min + 1) as usize
        }
    }

    pub(crate) fn soft_nodes(&self, group: u32) -> Option<&NodeSet> {
        self.soft_nodes.get(&group)
    }

    pub(crate) fn hard_nodes(&self, group: u32) -> Option<&NodeSet> {
        self.hard_nodes.get(&group)
    }

    /// Fold a member's neighbours into the group's neighbour sets
    pub(crate) fn absorb_neighbours(&mut self, group: u32, soft: &[u32], hard: &[u32]) {
        self.soft_nodes
            .entry(group)
            .or_default()
            .extend(soft.iter().copied());
        self.hard_nodes
            .entry(group)
            .or_default()
            .extend(hard.iter().copied());
    }
}
