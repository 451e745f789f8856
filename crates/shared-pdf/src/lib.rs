//! Shared PDF handling utilities
//!
//! This crate turns uploaded brand-kit bytes into ordered per-page text,
//! the only input shape the compliance engine consumes.

pub mod error;
pub mod text;

pub use error::PdfTextError;
pub use text::{is_pdf, load_brand_kit, LopdfTextSource, PageTextSource};
