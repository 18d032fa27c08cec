//! Batch driver: convert every PDF found in a folder
//!
//! Thin wrapper around the N-up transform. Enumerates `*.pdf` files
//! non-recursively, derives output names, and isolates per-file failures so
//! one corrupt document cannot abort the run.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use crate::error::{Error, Result};
use crate::pdf::nup::{convert_to_nup, NupOptions};

/// Outcome of one folder run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files converted successfully
    pub converted: usize,
    /// Files that failed and were skipped
    pub failed: usize,
}

/// Derive the output filename: `report.pdf` becomes `report_6up.pdf` for a
/// 6-up grid
pub fn output_name(input: &Path, pages_per_sheet: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    PathBuf::from(format!("{}_{}up.pdf", stem, pages_per_sheet))
}

/// Convert every `*.pdf` in `input_dir` into `output_dir`
///
/// The output directory is created first, parents included. A failure on an
/// individual file is reported with its name and the batch moves on; a failed
/// conversion may leave a partial output file behind.
pub fn process_folder(
    input_dir: &Path,
    output_dir: &Path,
    options: &NupOptions,
) -> Result<BatchSummary> {
    fs::create_dir_all(output_dir)?;
    eprintln!("Output folder '{}' is ready.", output_dir.display());

    let inputs = find_pdfs(input_dir)?;
    if inputs.is_empty() {
        println!("No PDF files found in '{}'.", input_dir.display());
        return Ok(BatchSummary::default());
    }

    println!("Found {} PDF files to process.", inputs.len());

    let mut summary = BatchSummary::default();
    for input in &inputs {
        let file_name = input
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.display().to_string());
        let output = output_dir.join(output_name(input, options.grid.pages_per_sheet()));

        eprintln!("Processing file: {}", file_name);
        match convert_to_nup(input, &output, options) {
            Ok(()) => {
                println!("Converted to: {}", output.display());
                summary.converted += 1;
            }
            Err(e) => {
                eprintln!("An error occurred processing {}: {}", file_name, e);
                summary.failed += 1;
            }
        }
    }

    println!(
        "Conversion complete: {} converted, {} failed.",
        summary.converted, summary.failed
    );

    Ok(summary)
}

/// Non-recursive `*.pdf` scan, sorted for a deterministic processing order
fn find_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let dir_str = dir
        .to_str()
        .ok_or_else(|| Error::InvalidGlob(dir.display().to_string()))?;

    // The directory component is a literal path, not a pattern; only the
    // trailing *.pdf may match
    let pattern = Path::new(&Pattern::escape(dir_str))
        .join("*.pdf")
        .to_string_lossy()
        .into_owned();

    let mut paths = Vec::new();
    for entry in glob(&pattern).map_err(|e| Error::InvalidGlob(e.to_string()))? {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => eprintln!("Warning: glob error for {}: {}", pattern, e),
        }
    }
    paths.sort();

    Ok(paths)
}
