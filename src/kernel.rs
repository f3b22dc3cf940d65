// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API for incremental smoothing group encoding

use crate::config::SmoothingConfig;
use crate::error::SmoothingResult;
use crate::mesh::{create_smoothing_groups, EncodingSource, PolyMesh, SmoothingGroups};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Main kernel for incremental encoding.
///
/// Remembers the last encoding of every named mesh and passes it back as the
/// previous encoding, so re-encoding an unchanged or compatibly edited mesh
/// keeps its flags stable.
pub struct SmoothingKernel {
    config: SmoothingConfig,
    cache: DashMap<String, Vec<u32>>,
    reused: AtomicUsize,
    computed: AtomicUsize,
}

impl SmoothingKernel {
    /// Create a new kernel
    pub fn new() -> Self {
        Self::with_config(SmoothingConfig::default())
    }

    pub fn with_config(config: SmoothingConfig) -> Self {
        Self {
            config,
            cache: DashMap::new(),
            reused: AtomicUsize::new(0),
            computed: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    /// Encode `mesh`, using the cached encoding stored under `name` as a hint
    pub fn encode(&self, name: &str, mesh: &PolyMesh) -> SmoothingResult<SmoothingGroups> {
        let prev = self.cache.get(name).map(|entry| entry.value().clone()).unwrap_or_default();
        let groups = create_smoothing_groups(mesh, &prev, &self.config)?;

        match groups.source {
            EncodingSource::Reused => {
                self.reused.fetch_add(1, Ordering::Relaxed);
            }
            EncodingSource::Constant | EncodingSource::Computed => {
                self.computed.fetch_add(1, Ordering::Relaxed);
            }
        }
        debug!(mesh = name, source = ?groups.source, "Encoded mesh");

        self.cache.insert(name.to_string(), groups.flags.clone());
        Ok(groups)
    }

    /// Store an encoding obtained elsewhere (e.g. read from disk) for `name`
    pub fn seed(&self, name: &str, flags: Vec<u32>) {
        self.cache.insert(name.to_string(), flags);
    }

    /// Cached encoding for `name`
    pub fn cached(&self, name: &str) -> Option<Vec<u32>> {
        self.cache.get(name).map(|entry| entry.value().clone())
    }

    /// Invalidate the cache for a specific mesh
    pub fn invalidate(&self, name: &str) {
        self.cache.remove(name);
    }

    pub fn clear(&self) {
        self.cache.clear();
        self.reused.store(0, Ordering::Relaxed);
        self.computed.store(0, Ordering::Relaxed);
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            cached_meshes: self.cache.len(),
            reused: self.reused.load(Ordering::Relaxed),
            computed: self.computed.load(Ordering::Relaxed),
        }
    }
}

impl Default for SmoothingKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub cached_meshes: usize,
    pub reused: usize,
    pub computed: usize,
}

impl CacheStats {
    /// Percentage of encodes answered from the cache
    pub fn hit_rate(&self) -> f32 {
        let total = self.reused + self.computed;
        if total == 0 {
            0.0
        } else {
            (self.reused as f32 / total as f32) * 100.0
        }
    }
}
