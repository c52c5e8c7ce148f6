//! Value types shared by every stage of cross-stitch pattern generation.

pub mod color;
pub mod fabric;
pub mod geometry;
pub mod i18n;

pub use color::{luminance, Color, ThreadColor};
pub use fabric::{Dimensions, FabricCount, ThreadUsage, UnitSystem};
pub use geometry::{Margins, Orientation, PageFormat, PageGeometry, Rect, Size};
pub use i18n::{Localizer, TranslationError, Translator};
