// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::batch::BatchResult;
use crate::graph::{describe_flags, ColoringViolation};
use crate::mesh::{EncodingSource, SmoothingGroups};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report an encoded mesh
    pub fn report_encoding(file: &str, groups: &SmoothingGroups, edges: usize, duration: Duration) {
        let combined = groups.flags.iter().fold(0u32, |acc, &flag| acc | flag);

        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Encoded:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Faces:".bright_black(),
            groups.flags.len().to_string().cyan()
        );
        println!("  {} {}", "Edges:".bright_black(), edges.to_string().cyan());
        println!(
            "  {} {}",
            "Source:".bright_black(),
            Self::format_source(groups.source)
        );
        println!(
            "  {} {}",
            "Bits used:".bright_black(),
            Self::format_bits(combined).yellow()
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the result of checking flags against a mesh
    pub fn report_verification(file: &str, violations: &[ColoringViolation], verbose: bool) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if violations.is_empty() {
            println!(
                "{} {}",
                "✅".green(),
                "Every edge is encoded correctly".green().bold()
            );
        } else {
            println!(
                "{} {}",
                "❌".red(),
                format!("{} edge(s) encoded incorrectly", violations.len()).red().bold()
            );

            let shown = if verbose { violations.len() } else { violations.len().min(10) };
            for violation in &violations[..shown] {
                let expected = if violation.hard { "hard" } else { "smooth" };
                println!(
                    "  {} faces {} / {} should be {} (flags {:#x} / {:#x})",
                    "✗".red(),
                    violation.a,
                    violation.b,
                    expected.yellow(),
                    violation.flag_a,
                    violation.flag_b
                );
            }
            if shown < violations.len() {
                println!("  {}", format!("... {} more", violations.len() - shown).bright_black());
            }
        }

        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a batch run
    pub fn report_batch(results: &[BatchResult], verbose: bool) {
        let failed: Vec<_> = results.iter().filter(|r| !r.passed()).collect();
        let reused = results
            .iter()
            .filter(|r| r.source == Some(EncodingSource::Reused))
            .count();
        let faces: usize = results.iter().map(|r| r.faces).sum();
        let total_time: Duration = results.iter().map(|r| r.duration).sum();

        println!("\n{}", "═".repeat(80).bright_black());
        println!("{}", "Batch Summary".bold());
        println!("{}", "═".repeat(80).bright_black());
        println!(
            "  {} {}",
            "Meshes:".bright_black(),
            results.len().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Encoded:".bright_black(),
            (results.len() - failed.len()).to_string().green()
        );
        println!("  {} {}", "Reused:".bright_black(), reused.to_string().cyan());
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            if failed.is_empty() {
                failed.len().to_string().green()
            } else {
                failed.len().to_string().red()
            }
        );
        println!("  {} {}", "Faces:".bright_black(), faces.to_string().cyan());
        println!(
            "  {} {}",
            "CPU time:".bright_black(),
            Self::format_duration(total_time).yellow()
        );

        if verbose {
            for result in results.iter().filter(|r| r.passed()) {
                println!(
                    "    {} {} ({} faces, {} bits)",
                    "✓".green(),
                    result.path.display(),
                    result.faces,
                    result.bits_used
                );
            }
        }
        let non_manifold: Vec<_> = results.iter().filter(|r| r.non_manifold_edges > 0).collect();
        if !non_manifold.is_empty() {
            println!("\n  {}", "Non-manifold edges (two faces considered):".yellow().bold());
            for result in non_manifold {
                println!(
                    "    {} {} ({} edges)",
                    "⚠".yellow(),
                    result.path.display(),
                    result.non_manifold_edges
                );
            }
        }
        if !failed.is_empty() {
            println!("\n  {}", "Errors:".red().bold());
            for result in failed {
                println!("    {} {}", "❌".red(), result.path.display());
                println!(
                    "       {}",
                    result.error.as_deref().unwrap_or_default().bright_black()
                );
            }
        }

        println!("{}", "═".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn format_source(source: EncodingSource) -> ColoredString {
        match source {
            EncodingSource::Constant => "constant".green(),
            EncodingSource::Reused => "reused previous encoding".green(),
            EncodingSource::Computed => "computed".cyan(),
        }
    }

    /// Number of bits in use and their positions
    fn format_bits(combined: u32) -> String {
        if combined == 0 {
            return "none".to_string();
        }
        let bits: Vec<String> = describe_flags(combined).iter().map(u32::to_string).collect();
        format!("{} [{}]", combined.count_ones(), bits.join(", "))
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(Reporter::format_bits(0), "none");
        assert_eq!(Reporter::format_bits(0b1011), "3 [1, 2, 4]");
    }
}
