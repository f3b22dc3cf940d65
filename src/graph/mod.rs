// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Graph module - soft/hard adjacency, face grouping and flag colouring

mod adjacency;
mod collapse;
mod coloring;
mod groups;
mod verify;

pub use adjacency::AdjacencyList;
pub use collapse::{collapse_graph, node_check_merge, visit};
pub use coloring::{color_graph, color_graph_with_stats, next_flag, ColoringStats};
pub use groups::{GroupList, NodeSet};
pub use verify::{check_coloring, describe_flags, ColoringViolation};
