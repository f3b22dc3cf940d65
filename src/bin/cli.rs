// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyframe Smoothing CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Point3;
use polyframe_smoothing::cli::{discover_meshes, encode_all, flags_path, Reporter};
use polyframe_smoothing::mesh::generate::{cube_with_hard_edge, hash_hardness, plane};
use polyframe_smoothing::{config::SmoothingConfig, io, mesh, SmoothingKernel};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "polyframe-smooth")]
#[command(
    about = "Polyframe Smoothing - encode hard/soft edges as per-face smoothing groups",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to smoothing.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute smoothing groups for a mesh
    Encode {
        /// Input mesh (JSON)
        input: PathBuf,

        /// Output flags file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Previous flags to reuse when still valid
        #[arg(long, value_name = "FLAGS")]
        prev: Option<PathBuf>,
    },

    /// Check flags against a mesh's edge hardness
    Verify {
        /// Input mesh (JSON)
        mesh: PathBuf,

        /// Flags file
        flags: PathBuf,
    },

    /// Write a test mesh
    Generate {
        #[arg(value_enum)]
        shape: Shape,

        /// Output mesh file
        #[arg(short, long)]
        output: PathBuf,

        /// Quads along x (plane)
        #[arg(long, default_value = "8")]
        x: u32,

        /// Quads along y (plane)
        #[arg(long, default_value = "8")]
        y: u32,

        /// Hard edge index (cube)
        #[arg(long, default_value = "0")]
        hard_edge: usize,

        /// Fraction of edges to make hard (plane)
        #[arg(long, default_value = "0.0")]
        fraction_hard: f32,
    },

    /// Import an OBJ file with hashed edge hardness
    Obj {
        /// Input OBJ file
        input: PathBuf,

        /// Fraction of edges to make hard
        #[arg(long, default_value = "0.5")]
        fraction_hard: f32,

        /// Output mesh file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Encode every mesh under a directory in parallel
    Batch {
        /// Directory (or single mesh file)
        dir: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Plane,
    Cube,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Encode { input, output, prev } => {
            encode_command(input, output.as_deref(), prev.as_deref(), config, cli.verbose)?;
        }
        Commands::Verify { mesh, flags } => {
            verify_command(mesh, flags, cli.verbose)?;
        }
        Commands::Generate {
            shape,
            output,
            x,
            y,
            hard_edge,
            fraction_hard,
        } => {
            generate_command(*shape, output, *x, *y, *hard_edge, *fraction_hard)?;
        }
        Commands::Obj {
            input,
            fraction_hard,
            output,
        } => {
            obj_command(input, *fraction_hard, output.as_deref())?;
        }
        Commands::Batch { dir } => {
            batch_command(dir, &config, cli.verbose)?;
        }
        Commands::Version => {
            println!("Polyframe Smoothing v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SmoothingConfig> {
    match path {
        Some(path) => {
            let mut config = SmoothingConfig::from_file(path)?;
            config.apply_env_overrides();
            Ok(config)
        }
        None => SmoothingConfig::load(),
    }
}

fn require_file(path: &Path) {
    if !path.exists() {
        Reporter::report_error(&format!("Input file not found: {}", path.display()));
        std::process::exit(1);
    }
}

fn encode_command(
    input: &Path,
    output: Option<&Path>,
    prev: Option<&Path>,
    config: SmoothingConfig,
    verbose: bool,
) -> Result<()> {
    require_file(input);
    if verbose {
        Reporter::report_info(&format!("Encoding {}", input.display()));
    }

    let mesh = io::load_mesh(input)?;
    let name = input.display().to_string();
    let kernel = SmoothingKernel::with_config(config);

    let start = Instant::now();
    if let Some(prev) = prev {
        // Seed the kernel so the previous flags are offered as a hint
        let flags = io::load_flags(prev)?;
        kernel.seed(&name, flags);
    }
    let groups = kernel
        .encode(&name, &mesh)
        .with_context(|| format!("Failed to encode {}", name))?;
    let duration = start.elapsed();

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| flags_path(input));
    io::save_flags(&groups.flags, &output)?;

    Reporter::report_encoding(&name, &groups, mesh.edge_count(), duration);
    warn_non_manifold(&mesh);
    if verbose {
        Reporter::report_info(&format!("Flags written to {}", output.display()));
    }

    Ok(())
}

fn verify_command(mesh_path: &Path, flags_path: &Path, verbose: bool) -> Result<()> {
    require_file(mesh_path);
    require_file(flags_path);

    let mesh = io::load_mesh(mesh_path)?;
    let flags = io::load_flags(flags_path)?;

    let violations = match mesh::verify_smoothing_groups(&mesh, &flags) {
        Ok(violations) => violations,
        Err(e) => {
            Reporter::report_error(&format!("Cannot verify {}: {}", mesh_path.display(), e));
            std::process::exit(1);
        }
    };
    Reporter::report_verification(&mesh_path.display().to_string(), &violations, verbose);

    warn_non_manifold(&mesh);

    if !violations.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

/// Only call on a validated mesh
fn warn_non_manifold(mesh: &mesh::PolyMesh) {
    let count = mesh::non_manifold_edge_count(mesh);
    if count > 0 {
        Reporter::report_warning(&format!(
            "{} non-manifold edge(s); only two adjacent faces were considered for each",
            count
        ));
    }
}

fn generate_command(
    shape: Shape,
    output: &Path,
    x: u32,
    y: u32,
    hard_edge: usize,
    fraction_hard: f32,
) -> Result<()> {
    let mesh = match shape {
        Shape::Plane => {
            if x == 0 || y == 0 {
                Reporter::report_error("Plane needs at least one quad per side");
                std::process::exit(1);
            }
            let mut mesh = plane(
                Point3::new(0.0, y as f64, 0.0),
                Point3::new(x as f64, 0.0, 0.0),
                x,
                y,
                |_, _, _, _| true,
            );
            if fraction_hard > 0.0 {
                hash_hardness(&mut mesh, fraction_hard);
            }
            mesh
        }
        Shape::Cube => {
            if hard_edge >= 12 {
                Reporter::report_error("A cube has 12 edges");
                std::process::exit(1);
            }
            cube_with_hard_edge(hard_edge)
        }
    };

    io::save_mesh(&mesh, output)?;
    Reporter::success(&format!(
        "Wrote {} faces, {} edges to {}",
        mesh.face_count(),
        mesh.edge_count(),
        output.display()
    ));
    Ok(())
}

fn obj_command(input: &Path, fraction_hard: f32, output: Option<&Path>) -> Result<()> {
    require_file(input);
    if !(0.0..=1.0).contains(&fraction_hard) {
        Reporter::report_error("--fraction-hard must be between 0 and 1");
        std::process::exit(1);
    }

    let mut mesh = io::import_obj(input)?;
    hash_hardness(&mut mesh, fraction_hard);

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("json"));
    io::save_mesh(&mesh, &output)?;

    let hard = mesh.edges.iter().filter(|edge| !edge.smooth).count();
    Reporter::success(&format!(
        "Imported {} faces ({} of {} edges hard) to {}",
        mesh.face_count(),
        hard,
        mesh.edge_count(),
        output.display()
    ));
    Ok(())
}

fn batch_command(dir: &Path, config: &SmoothingConfig, verbose: bool) -> Result<()> {
    require_file(dir);

    let meshes = discover_meshes(dir);
    if meshes.is_empty() {
        Reporter::report_warning(&format!("No meshes found in {}", dir.display()));
        return Ok(());
    }
    if verbose {
        Reporter::report_info(&format!("Encoding {} meshes", meshes.len()));
    }

    let results = encode_all(&meshes, config, verbose);
    Reporter::report_batch(&results, verbose);

    if results.iter().any(|result| !result.passed()) {
        std::process::exit(1);
    }
    Ok(())
}
