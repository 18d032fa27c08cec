//! PDF N-up Imposition Library
//!
//! Batch-converts PDFs so that several consecutive source pages share one
//! landscape output sheet. This library provides functionality to:
//! - Compute N-up grid placements (uniform scale, cell origin, centering)
//! - Composite source pages onto new sheets as form XObjects
//! - Batch-process a folder of PDFs with per-file failure isolation
//! - Generate labeled dummy PDFs for seeding input folders and tests
//!
//! # Example
//!
//! ```no_run
//! use pdf_nup::pdf::{convert_to_nup, NupOptions};
//! use std::path::Path;
//!
//! convert_to_nup(
//!     Path::new("slides.pdf"),
//!     Path::new("slides_6up.pdf"),
//!     &NupOptions::default(),
//! ).expect("Failed to convert");
//! ```

pub mod batch;
pub mod error;
pub mod layout;
pub mod pdf;

// Re-export commonly used items
pub use error::{Error, Result};
