// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for smoothing group computation

use thiserror::Error;

/// Errors that can occur while computing smoothing groups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmoothingError {
    /// No bit of the 32-bit flag word is free for a required pairing.
    #[error(
        "Current mesh's topology is too complicated to save smoothing groups \
         (group {group} of a {num_faces} face mesh ran out of flag bits)"
    )]
    TopologyTooComplex { group: u32, num_faces: usize },

    /// A face or edge references a vertex that does not exist.
    #[error("Vertex index {vertex} out of range (mesh has {vertex_count} vertices)")]
    InvalidVertexIndex { vertex: u32, vertex_count: usize },

    /// A per-face buffer does not have one entry per face.
    #[error("Face count mismatch: expected {expected}, got {actual}")]
    FaceCountMismatch { expected: usize, actual: usize },
}

/// Result type for smoothing group operations.
pub type SmoothingResult<T> = std::result::Result<T, SmoothingError>;
