//! Crosspatch turns a line of text set in a pixel font into a printable
//! cross-stitch chart: true-to-scale grid pages, branded page chrome and a
//! materials legend, assembled into one PDF.
//!
//! ```no_run
//! use crosspatch::{GeneratorBuilder, PatternRequest};
//! use crosspatch::glyph::FontDescriptor;
//! use crosspatch::types::ThreadColor;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let font = FontDescriptor::from_json(&std::fs::read_to_string("pixel5.json")?)?;
//! let thread = ThreadColor::from_hex("310", "Black", "#000000")?;
//! let generator = GeneratorBuilder::new().build()?;
//! if let Some(mut doc) = generator.generate(&PatternRequest::new("Hello", &font, &thread))? {
//!     doc.save_in_dir(".")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod filename;
pub mod generator;

pub use config::{default_margins, GeneratorBuilder, GeneratorConfig, UnitPreference};
pub use error::PatternError;
pub use filename::{pattern_filename, FILENAME_TEXT_MAX};
pub use generator::{build_pattern, PatternDocument, PatternGenerator, PatternRequest};

pub use crosspatch_glyph as glyph;
pub use crosspatch_layout as layout;
pub use crosspatch_render_lopdf as render;
pub use crosspatch_types as types;
