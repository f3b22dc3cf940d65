// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel encoding of every mesh file under a directory

use crate::config::SmoothingConfig;
use crate::io::{load_flags, load_mesh, save_flags};
use crate::mesh::{create_smoothing_groups, non_manifold_edge_count, EncodingSource};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::debug;
use walkdir::WalkDir;

/// Suffix of the flag files written next to each mesh
pub const FLAGS_SUFFIX: &str = ".flags.json";

/// Outcome of encoding one mesh file
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub path: PathBuf,
    pub faces: usize,
    pub source: Option<EncodingSource>,
    /// Highest flag bit used, 1-based
    pub bits_used: u32,
    /// Edges with more than two faces, of which only two were considered
    pub non_manifold_edges: usize,
    pub duration: Duration,
    pub error: Option<String>,
}

impl BatchResult {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Flags file path for a mesh file: `cube.json` becomes `cube.flags.json`
pub fn flags_path(mesh_path: &Path) -> PathBuf {
    let stem = mesh_path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("mesh");
    mesh_path.with_file_name(format!("{}{}", stem, FLAGS_SUFFIX))
}

/// Find mesh files (`*.json`, flag files excluded) under `path`
pub fn discover_meshes(path: &Path) -> Vec<PathBuf> {
    let is_mesh = |candidate: &Path| {
        candidate.is_file()
            && candidate.extension().is_some_and(|ext| ext == "json")
            && !candidate
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(FLAGS_SUFFIX))
    };

    let mut meshes = Vec::new();
    if is_mesh(path) {
        meshes.push(path.to_path_buf());
    } else if path.is_dir() {
        for entry in WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if is_mesh(entry.path()) {
                meshes.push(entry.path().to_path_buf());
            }
        }
    }

    // Sort for consistent ordering
    meshes.sort();
    meshes
}

/// Encode one mesh file, using its existing flags file as the previous encoding
fn encode_file(path: &Path, config: &SmoothingConfig) -> Result<BatchResult> {
    let mesh = load_mesh(path)?;
    let output = flags_path(path);
    let prev = if output.exists() {
        load_flags(&output).unwrap_or_else(|e| {
            debug!(path = ?output, error = %format!("{:#}", e), "Ignoring unreadable flags file");
            Vec::new()
        })
    } else {
        Vec::new()
    };

    let groups = create_smoothing_groups(&mesh, &prev, config)?;
    save_flags(&groups.flags, &output)?;

    let combined = groups.flags.iter().fold(0u32, |acc, &flag| acc | flag);
    Ok(BatchResult {
        path: path.to_path_buf(),
        faces: mesh.face_count(),
        source: Some(groups.source),
        bits_used: 32 - combined.leading_zeros(),
        // Mesh was validated by create_smoothing_groups
        non_manifold_edges: non_manifold_edge_count(&mesh),
        duration: Duration::ZERO,
        error: None,
    })
}

/// Encode every mesh in parallel, writing a flags file next to each
pub fn encode_all(
    paths: &[PathBuf],
    config: &SmoothingConfig,
    show_progress: bool,
) -> Vec<BatchResult> {
    let progress = if show_progress {
        let pb = ProgressBar::new(paths.len() as u64);
        let template =
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let results: Vec<BatchResult> = paths
        .par_iter()
        .map(|path| {
            let start = Instant::now();
            let outcome = encode_file(path, config);
            let duration = start.elapsed();

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            match outcome {
                Ok(result) => BatchResult { duration, ..result },
                Err(e) => BatchResult {
                    path: path.clone(),
                    faces: 0,
                    source: None,
                    bits_used: 0,
                    non_manifold_edges: 0,
                    duration,
                    error: Some(format!("{:#}", e)),
                },
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("Batch complete");
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save_mesh;
    use crate::mesh::generate::cube_with_hard_edge;
    use tempfile::tempdir;

    #[test]
    fn test_flags_path() {
        assert_eq!(
            flags_path(Path::new("meshes/cube.json")),
            PathBuf::from("meshes/cube.flags.json")
        );
    }

    #[test]
    fn test_discover_and_encode() -> Result<()> {
        let dir = tempdir()?;
        save_mesh(&cube_with_hard_edge(0), dir.path().join("a.json"))?;
        save_mesh(&cube_with_hard_edge(5), dir.path().join("b.json"))?;
        std::fs::write(dir.path().join("notes.txt"), "not a mesh")?;

        let meshes = discover_meshes(dir.path());
        assert_eq!(meshes.len(), 2);

        let config = SmoothingConfig::default();
        let results = encode_all(&meshes, &config, false);
        assert!(results.iter().all(BatchResult::passed));
        assert!(results.iter().all(|r| r.source == Some(EncodingSource::Computed)));
        assert!(dir.path().join("a.flags.json").exists());

        // Flag files are not picked up as meshes, and existing flags are reused
        assert_eq!(discover_meshes(dir.path()).len(), 2);
        let again = encode_all(&meshes, &config, false);
        assert!(again.iter().all(|r| r.source == Some(EncodingSource::Reused)));
        Ok(())
    }

    #[test]
    fn test_bad_file_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json")?;

        let results = encode_all(&[path], &SmoothingConfig::default(), false);
        assert!(!results[0].passed());
        let error = results[0].error.as_deref().unwrap_or_default();
        assert!(error.contains("Failed to parse mesh file"));
        Ok(())
    }

    #[test]
    fn test_unreadable_flags_file_is_recomputed() -> Result<()> {
        let dir = tempdir()?;
        let mesh_path = dir.path().join("cube.json");
        save_mesh(&cube_with_hard_edge(2), &mesh_path)?;
        std::fs::write(flags_path(&mesh_path), "{ corrupt")?;

        let results = encode_all(&[mesh_path.clone()], &SmoothingConfig::default(), false);
        assert!(results[0].passed());
        assert_eq!(results[0].source, Some(EncodingSource::Computed));
        assert_eq!(results[0].non_manifold_edges, 0);

        // The corrupt file was replaced with a readable one
        assert_eq!(load_flags(flags_path(&mesh_path))?.len(), 6);
        Ok(())
    }
}
