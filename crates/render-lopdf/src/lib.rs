//! Pattern page rendering onto `lopdf` content streams.
//!
//! Page renderers draw onto a [`PageCanvas`] in millimeters; [`PdfWriter`]
//! collects finished canvases into a document.

mod canvas;
pub mod chrome;
mod context;
mod error;
mod fonts;
pub mod grid;
pub mod legend;
mod writer;

pub use canvas::{CapabilityError, PageCanvas, SurfaceCapabilities, TextAlign, TextStyle};
pub use chrome::{draw_footer, draw_header, draw_watermark, truncate_with_ellipsis, WatermarkMode};
pub use context::{Branding, PageHeader, RenderContext};
pub use error::RenderError;
pub use fonts::{encode_win_ansi, StandardFont};
pub use grid::{draw_grid_page, GridPageSummary};
pub use legend::{render_legend, render_upsell_page, LegendData, LegendLayout, RevealPolicy};
pub use writer::{DocumentInfo, PdfProfile, PdfWriter};
