//! PDF N-up CLI tool
//!
//! Imposes every PDF found in an input folder onto landscape A4 sheets,
//! six source pages per sheet, writing one `<stem>_6up.pdf` per input.

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};

use pdf_nup::batch::process_folder;
use pdf_nup::layout::{NupGrid, SheetSize};
use pdf_nup::pdf::{create_dummy_pdf, NupOptions};

// Grid configuration is deliberately fixed rather than exposed as flags
const PAGES_PER_SHEET: usize = 6;
const COLUMNS: usize = 3;
const ROWS: usize = 2;

/// Batch-impose PDFs in an N-up grid (6 pages per landscape A4 sheet)
#[derive(Parser)]
#[command(name = "pdf-nup")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Convert every PDF in ./input into ./output as <name>_6up.pdf
    pdf-nup input output

    # Seed the input folder with two 12-page sample documents first
    pdf-nup --seed input output")]
struct Cli {
    /// Folder scanned (non-recursively) for *.pdf input files
    #[arg(default_value = "input")]
    input_dir: PathBuf,

    /// Folder receiving one output file per input (created if absent)
    #[arg(default_value = "output")]
    output_dir: PathBuf,

    /// Generate two 12-page sample documents into the input folder first
    #[arg(long)]
    seed: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // One up-front validation; every file shares the same configuration
    let grid = NupGrid::new(PAGES_PER_SHEET, COLUMNS, ROWS)
        .context("invalid grid configuration")?;
    let options = NupOptions {
        grid,
        sheet: SheetSize::a4_landscape(),
    };

    if cli.seed {
        seed_input_folder(&cli.input_dir)?;
    }

    // Per-file failures are reported inside the driver and do not change the
    // exit code; only a driver setup failure is fatal.
    process_folder(&cli.input_dir, &cli.output_dir, &options)
        .with_context(|| format!("failed to process folder {}", cli.input_dir.display()))?;

    Ok(())
}

/// Write two labeled 12-page sample documents into the input folder
fn seed_input_folder(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create input folder {}", dir.display()))?;

    for i in 1..=2 {
        let path = dir.join(format!("document_{}.pdf", i));
        create_dummy_pdf(&path, 12, &format!("Document {}", i))
            .with_context(|| format!("failed to create {}", path.display()))?;
        eprintln!("Seeded {}", path.display());
    }

    Ok(())
}
