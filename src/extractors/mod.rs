//! HTML extraction modules
//!
//! Each module turns selector matches into a typed value.

mod image_extractor;
mod microdata_extractor;
mod text_extractor;

pub use image_extractor::*;
pub use microdata_extractor::*;
pub use text_extractor::*;
