//! Brand-kit field extractors
//!
//! Each extractor is a pure function over the ordered page texts of one
//! document. They share no state, so they can run in any order or in parallel.

pub mod colours;
pub mod fonts;
pub mod safezone;

pub use colours::{extract_colour_palette, extract_logo_colours};
pub use fonts::extract_font_styles;
pub use safezone::extract_logo_safezone;
