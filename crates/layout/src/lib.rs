//! Pagination of a stitch grid across physical pages.
//!
//! The planner works in millimeters so that a printed cell measures exactly
//! `25.4 / fabric count` mm. A pattern too large for one page is split into
//! a grid of page tiles along both axes; tiles are visited row-major.

mod plan;

pub use plan::{plan_pages, LayoutPlan, PageTile, Tiles, LABEL_MARGIN_LEFT_MM, LABEL_MARGIN_TOP_MM};
