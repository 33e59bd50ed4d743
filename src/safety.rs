//! Safety checks for output files.
//!
//! `--output` must never point at a file the run reads from, or the lineup
//! or the reference table would be overwritten with the report.

use anyhow::{bail, Result};
use std::path::Path;

/// Validates that an output path is safe to write.
///
/// Checks:
/// - Output cannot be the same as any of the provided source paths
/// - Output cannot be a reference data file (`*seed_artists*.json`)
///
/// # Arguments
/// * `output` - The output path that will be created/overwritten
/// * `source_paths` - Input paths that must not match the output
pub fn validate_output_path(output: &Path, source_paths: &[&Path]) -> Result<()> {
    for source in source_paths {
        if same_file(output, source) {
            bail!(
                "Safety check failed: output '{}' cannot be the same as input '{}'",
                output.display(),
                source.display()
            );
        }
    }

    let output_name = output.file_name().and_then(|n| n.to_str()).unwrap_or("");
    if output_name.contains("seed_artists") && output_name.ends_with(".json") {
        bail!(
            "Safety check failed: output '{}' looks like a reference artist file",
            output.display()
        );
    }

    Ok(())
}

/// Path equality, resolving both sides when they exist on disk
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
