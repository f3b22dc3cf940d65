// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Checks a flag assignment against the edges it was computed for

use serde::{Deserialize, Serialize};

/// An edge whose faces do not share (soft) or do share (hard) a flag bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoringViolation {
    pub a: u32,
    pub b: u32,
    pub hard: bool,
    pub flag_a: u32,
    pub flag_b: u32,
}

impl ColoringViolation {
    /// Bits the two faces have in common
    pub fn shared(&self) -> u32 {
        self.flag_a & self.flag_b
    }
}

/// Every `(a, b, hard)` edge that `flags` gets wrong.
///
/// # Panics
///
/// If an edge references a face `>= flags.len()`.
pub fn check_coloring(edges: &[(u32, u32, bool)], flags: &[u32]) -> Vec<ColoringViolation> {
    edges
        .iter()
        .filter_map(|&(a, b, hard)| {
            let flag_a = flags[a as usize];
            let flag_b = flags[b as usize];
            let shares = flag_a & flag_b != 0;
            if shares == hard {
                Some(ColoringViolation {
                    a,
                    b,
                    hard,
                    flag_a,
                    flag_b,
                })
            } else {
                None
            }
        })
        .collect()
}

/// 1-based indices of the bits set in `flag`
pub fn describe_flags(flag: u32) -> Vec<u32> {
    (0..32).filter(|bit| flag & (1 << bit) != 0).map(|bit| bit + 1).collect()
}
