// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Collapse soft-connected faces into groups
//!
//! Faces joined by soft edges are merged into one group as long as the merge
//! never puts a hard-edge separation inside a group. The result is a smaller
//! adjacency graph between group ids that the colouring pass works on.

use super::adjacency::AdjacencyList;
use super::groups::{GroupList, NodeSet};

/// Checks that none of `neighbours` (outside `group`) conflicts with `forbidden`.
///
/// A neighbour conflicts when it is itself in `forbidden`, or when it already
/// belongs to another group that has a member in `forbidden`.
fn is_compatible(
    neighbours: &[u32],
    forbidden: Option<&NodeSet>,
    group: u32,
    groups: &GroupList,
) -> bool {
    let forbidden = match forbidden {
        Some(set) if !set.is_empty() => set,
        // Every lookup would miss
        _ => return true,
    };

    for &current in neighbours {
        let current_group = groups.get(current);
        if current_group == group {
            continue;
        }

        if forbidden.contains(&current) {
            return false;
        }

        if current_group != 0
            && groups
                .members(current_group)
                .iter()
                .any(|member| forbidden.contains(member))
        {
            return false;
        }
    }

    true
}

/// Whether `node` can join `group` without hiding a hard edge.
///
/// `node` may not have a soft neighbour that is a hard neighbour of the group,
/// nor a hard neighbour that is a soft neighbour of the group.
pub fn node_check_merge(node: u32, group: u32, inputs: &AdjacencyList, groups: &GroupList) -> bool {
    is_compatible(inputs.soft(node), groups.hard_nodes(group), group, groups)
        && is_compatible(inputs.hard(node), groups.soft_nodes(group), group, groups)
}

/// Grow `group` from `node` with an explicit-stack depth first search over
/// soft edges, recording edges to already existing groups in `outputs`.
pub fn visit(
    node: u32,
    group: u32,
    inputs: &AdjacencyList,
    groups: &mut GroupList,
    outputs: &mut AdjacencyList,
) {
    let mut to_visit = vec![node];

    while let Some(current) = to_visit.pop() {
        if groups.has(current) {
            // Only ungrouped nodes are pushed, and the only group they can
            // have gained since is this one.
            debug_assert_eq!(groups.get(current), group, "node grouped while on the stack");
            continue;
        }

        if !node_check_merge(current, group, inputs, groups) {
            continue;
        }

        for &next in inputs.soft(current) {
            match groups.get(next) {
                0 => to_visit.push(next),
                other if other != group => outputs.soft_insert(group, other),
                _ => {}
            }
        }

        for &next in inputs.hard(current) {
            let other = groups.get(next);
            if other != 0 && other != group {
                outputs.hard_insert(group, other);
            }
        }

        groups.join(current, group);
        groups.absorb_neighbours(group, inputs.soft(current), inputs.hard(current));
    }
}

/// Collapse `inputs` into a graph between group ids.
///
/// Every face of `groups` ends up in exactly one group; faces past the end of
/// `inputs` get singleton groups. The returned graph has an entry for every
/// group id up to `groups.max()`.
///
/// # Panics
///
/// If `inputs` references a face `>= groups.num_faces()`.
pub fn collapse_graph(inputs: &AdjacencyList, groups: &mut GroupList) -> AdjacencyList {
    // 0 means no group
    let mut id: u32 = 1;
    let mut outputs = AdjacencyList::with_capacity(groups.num_faces());

    for node in 0..inputs.len() as u32 {
        if !groups.has(node) {
            visit(node, id, inputs, groups, &mut outputs);
            id += 1;
        }
    }

    for node in inputs.len()..groups.num_faces() {
        groups.join(node as u32, id);
        id += 1;
    }

    let num_groups = groups.max() as usize + 1;
    outputs.soft_ensure(num_groups);
    outputs.hard_ensure(num_groups);

    outputs
}
