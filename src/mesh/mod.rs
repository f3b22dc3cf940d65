// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh module - polygon meshes, edge incidence and smoothing group encoding

mod crosstalk;
pub mod generate;
mod polymesh;
mod smoothing;
mod topology;

pub use crosstalk::{
    add_cross_vertex_hard_edges, may_have_crosstalk, vertex_discontinuities,
    DEFAULT_CROSSTALK_THRESHOLD,
};
pub use polymesh::{MeshEdge, PolyMesh};
pub use smoothing::{
    build_adjacency, create_smoothing_groups, encoding_matches, face_edges,
    try_get_constant_smoothing_group, verify_smoothing_groups, write_smoothing_groups,
    EncodingSource, SmoothingGroups, SMOOTHING_GROUP_CHANNEL,
};
pub use topology::{
    face_pair, find_faces, get_edge_to_faces, is_boundary, non_manifold_edge_count,
    vertex_faces, EdgeFaces, EdgeIncidence,
};
