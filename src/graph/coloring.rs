// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Smoothing flag assignment
//!
//! Each collapsed group gets a 32-bit flag such that groups joined by a soft
//! edge share at least one bit and groups joined by a hard edge share none.
//! Groups are handled most-connected first, since they have the fewest legal
//! choices left if they are handled late.

use super::adjacency::AdjacencyList;
use super::collapse::collapse_graph;
use super::groups::GroupList;
use crate::error::{SmoothingError, SmoothingResult};
use std::cmp::Reverse;
use tracing::debug;

/// Lowest bit not set in `mask`, or 0 if all 32 bits are taken
#[inline]
pub fn next_flag(mask: u32) -> u32 {
    if mask != u32::MAX {
        1 << (!mask).trailing_zeros()
    } else {
        0
    }
}

/// Summary of one colouring run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColoringStats {
    pub faces: usize,
    pub groups: usize,
    pub soft_edges: usize,
    pub hard_edges: usize,
    /// Number of distinct flag bits used
    pub bits_used: u32,
}

/// Assign a smoothing flag to each of `num_faces` faces.
///
/// An empty `inputs` yields all zeros. Fails with
/// [`SmoothingError::TopologyTooComplex`] when a required pairing finds no free
/// bit, i.e. more than 32 mutually incompatible constraints meet at one group.
///
/// # Panics
///
/// If `inputs` references a face `>= num_faces`.
pub fn color_graph(inputs: &AdjacencyList, num_faces: usize) -> SmoothingResult<Vec<u32>> {
    color_graph_with_stats(inputs, num_faces).map(|(flags, _)| flags)
}

/// [`color_graph`] that also reports what the collapse and colouring did
pub fn color_graph_with_stats(
    inputs: &AdjacencyList,
    num_faces: usize,
) -> SmoothingResult<(Vec<u32>, ColoringStats)> {
    if inputs.is_empty() {
        // Also covers the zero face case
        let stats = ColoringStats {
            faces: num_faces,
            ..Default::default()
        };
        return Ok((vec![0; num_faces], stats));
    }

    let mut groups = GroupList::new(num_faces);
    let collapsed = collapse_graph(inputs, &mut groups);

    let offset = groups.min();
    let mut order: Vec<u32> = (groups.min()..=groups.max()).collect();
    order.sort_by_key(|&group| Reverse((collapsed.soft_count(group), collapsed.hard_count(group))));

    let mut flags = vec![0u32; order.len()];
    let mut result = vec![0u32; num_faces];

    // Flags the group cannot take because a hard neighbour already has them
    let banned_by = |flags: &[u32], group: u32| -> u32 {
        collapsed
            .hard(group)
            .iter()
            .fold(0, |banned, &other| banned | flags[(other - offset) as usize])
    };

    let split = order
        .iter()
        .position(|&group| collapsed.soft_count(group) == 0)
        .unwrap_or(order.len());
    let (soft_groups, hard_only_groups) = order.split_at(split);

    for &group in soft_groups {
        let current = (group - offset) as usize;
        let banned = banned_by(&flags, group);

        // Give each soft pair a common flag
        for &neighbour in collapsed.soft(group) {
            let visited = (neighbour - offset) as usize;
            if flags[visited] & flags[current] != 0 {
                continue;
            }

            let flag = next_flag(banned | banned_by(&flags, neighbour));
            if flag == 0 {
                return Err(SmoothingError::TopologyTooComplex { group, num_faces });
            }
            flags[current] |= flag;
            flags[visited] |= flag;
        }

        for &face in groups.members(group) {
            result[face as usize] = flags[current];
        }
    }

    for &group in hard_only_groups {
        let current = (group - offset) as usize;
        if groups.members(group).len() <= 1 {
            // Face on its own, all of its edges are hard
            flags[current] = 0;
        } else {
            let flag = next_flag(banned_by(&flags, group));
            if flag == 0 {
                return Err(SmoothingError::TopologyTooComplex { group, num_faces });
            }
            flags[current] = flag;
        }

        for &face in groups.members(group) {
            result[face as usize] = flags[current];
        }
    }

    let (soft_edges, hard_edges) = collapsed.edge_count();
    let stats = ColoringStats {
        faces: num_faces,
        groups: order.len(),
        soft_edges,
        hard_edges,
        bits_used: flags.iter().fold(0u32, |all, flag| all | flag).count_ones(),
    };
    debug!(
        faces = stats.faces,
        groups = stats.groups,
        soft_edges = stats.soft_edges,
        hard_edges = stats.hard_edges,
        bits_used = stats.bits_used,
        "Colored smoothing graph"
    );

    Ok((result, stats))
}
