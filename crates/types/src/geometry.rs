//! Page geometry. All lengths in this module are millimeters measured from
//! the top-left corner of the page unless stated otherwise.
use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f32 = 25.4;
pub const PT_PER_INCH: f32 = 72.0;

/// Converts millimeters to PDF user-space points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_INCH / MM_PER_INCH
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_INCH / PT_PER_INCH
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
    Custom { width: f32, height: f32 },
}

impl PageFormat {
    /// Portrait dimensions in millimeters.
    pub fn portrait_size(&self) -> Size {
        match *self {
            PageFormat::A4 => Size::new(210.0, 297.0),
            PageFormat::Letter => Size::new(215.9, 279.4),
            PageFormat::Custom { width, height } => Size::new(width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Fixed vertical bands of a page: the branded header above the content
/// area and the footer (plus scale bar) below it.
pub const HEADER_ALLOWANCE_MM: f32 = 16.0;
pub const FOOTER_ALLOWANCE_MM: f32 = 14.0;

/// Resolved geometry of one page: its size, outer margins and the content
/// rectangle left over for the grid or legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub size: Size,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(format: PageFormat, orientation: Orientation, margins: Margins) -> Self {
        let portrait = format.portrait_size();
        let size = match orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => portrait.swapped(),
        };
        Self { size, margins }
    }

    /// The header band directly inside the top margin.
    pub fn header_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.size.width - self.margins.left - self.margins.right,
            HEADER_ALLOWANCE_MM,
        )
    }

    /// The footer band directly inside the bottom margin.
    pub fn footer_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.size.height - self.margins.bottom - FOOTER_ALLOWANCE_MM,
            self.size.width - self.margins.left - self.margins.right,
            FOOTER_ALLOWANCE_MM,
        )
    }

    /// Area between header and footer available to page content.
    pub fn content_rect(&self) -> Rect {
        let header = self.header_rect();
        let footer = self.footer_rect();
        Rect::new(
            header.x,
            header.bottom(),
            header.width.max(0.0),
            (footer.y - header.bottom()).max(0.0),
        )
    }

    pub fn usable_size(&self) -> Size {
        let content = self.content_rect();
        Size::new(content.width, content.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_swaps_page_dimensions() {
        let portrait = PageGeometry::new(PageFormat::A4, Orientation::Portrait, Margins::all(10.0));
        let landscape =
            PageGeometry::new(PageFormat::A4, Orientation::Landscape, Margins::all(10.0));
        assert_eq!(portrait.size, Size::new(210.0, 297.0));
        assert_eq!(landscape.size, Size::new(297.0, 210.0));
    }

    #[test]
    fn usable_area_subtracts_margins_and_bands() {
        let geometry = PageGeometry::new(
            PageFormat::A4,
            Orientation::Portrait,
            Margins::symmetric(10.0, 17.5),
        );
        let usable = geometry.usable_size();
        assert!((usable.width - 175.0).abs() < 1e-4);
        assert!((usable.height - (297.0 - 20.0 - HEADER_ALLOWANCE_MM - FOOTER_ALLOWANCE_MM)).abs() < 1e-4);
    }

    #[test]
    fn millimeter_point_conversion() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-4);
    }
}
