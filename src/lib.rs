// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Smoothing
//!
//! Encodes per-edge hard/smooth classification of a polygon mesh as 32-bit
//! per-face smoothing group flags. Two faces across a smooth edge share at
//! least one bit; two faces across a hard edge share none.
//!
//! Faces connected by soft edges are merged into groups, the groups are
//! coloured greedily with single bits, and a crosstalk pass keeps faces that
//! only meet at a vertex from smoothing into each other.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod kernel;
pub mod mesh;

pub use config::SmoothingConfig;
pub use error::{SmoothingError, SmoothingResult};
pub use graph::{color_graph, AdjacencyList, GroupList};
pub use kernel::{CacheStats, SmoothingKernel};
pub use mesh::{create_smoothing_groups, EncodingSource, MeshEdge, PolyMesh, SmoothingGroups};

/// Smoothing groups for `mesh` with the default configuration and no
/// previous encoding
pub fn encode(mesh: &PolyMesh) -> SmoothingResult<Vec<u32>> {
    create_smoothing_groups(mesh, &[], &SmoothingConfig::default()).map(|groups| groups.flags)
}
