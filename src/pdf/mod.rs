//! PDF manipulation module

pub mod create;
pub mod geometry;
pub mod nup;

// Re-export commonly used items
pub use create::create_dummy_pdf;
pub use geometry::{count_pages, page_box};
pub use nup::{convert_to_nup, NupOptions};
