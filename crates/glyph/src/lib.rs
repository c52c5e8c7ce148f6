//! Pixel fonts and the text → stitch bitmap composer.

pub mod bitmap;
pub mod font;

pub use bitmap::{compose, PatternBitmap};
pub use font::{FontDescriptor, Glyph};
