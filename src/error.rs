//! Error types for the N-up imposition library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the N-up imposition library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Grid shape does not multiply out to the requested pages per sheet
    #[error("invalid grid: {columns} columns x {rows} rows != {pages_per_sheet} pages per sheet")]
    InvalidGrid {
        columns: usize,
        rows: usize,
        pages_per_sheet: usize,
    },

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Page carries neither a usable CropBox nor MediaBox
    #[error("page has no usable bounding box: {0}")]
    MissingPageBox(String),
}
