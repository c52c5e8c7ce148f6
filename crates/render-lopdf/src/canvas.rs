//! A page-sized drawing surface that records PDF content operations.
//!
//! Callers position everything in millimeters from the top-left corner of
//! the page; the canvas converts to PDF points with a bottom-left origin.
use crate::fonts::{encode_win_ansi, StandardFont};
use crosspatch_types::geometry::mm_to_pt;
use crosspatch_types::{Color, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use std::collections::BTreeMap;
use thiserror::Error;

/// What the output format allows beyond plain opaque painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceCapabilities {
    pub transparency: bool,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("the drawing surface does not support transparency")]
    TransparencyUnavailable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: StandardFont,
    pub size_pt: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn regular(size_pt: f32, color: Color) -> Self {
        Self {
            font: StandardFont::Helvetica,
            size_pt,
            color,
            align: TextAlign::Left,
        }
    }

    pub fn bold(size_pt: f32, color: Color) -> Self {
        Self {
            font: StandardFont::HelveticaBold,
            ..Self::regular(size_pt, color)
        }
    }

    pub fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct GraphicsState {
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

pub struct PageCanvas {
    size: Size,
    capabilities: SurfaceCapabilities,
    operations: Vec<Operation>,
    state: GraphicsState,
    state_stack: Vec<GraphicsState>,
    ext_gstates: BTreeMap<String, f32>,
}

impl PageCanvas {
    pub fn new(size: Size, capabilities: SurfaceCapabilities) -> Self {
        Self {
            size,
            capabilities,
            operations: Vec::new(),
            state: GraphicsState::default(),
            state_stack: Vec::new(),
            ext_gstates: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Graphics-state parameter dictionaries this page references, as
    /// resource name → constant alpha.
    pub fn ext_gstates(&self) -> &BTreeMap<String, f32> {
        &self.ext_gstates
    }

    pub fn into_parts(self) -> (Content, BTreeMap<String, f32>) {
        (
            Content {
                operations: self.operations,
            },
            self.ext_gstates,
        )
    }

    fn x(&self, mm: f32) -> Object {
        mm_to_pt(mm).into()
    }

    fn y(&self, mm: f32) -> Object {
        mm_to_pt(self.size.height - mm).into()
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    pub fn save_state(&mut self) {
        self.state_stack.push(self.state.clone());
        self.push("q", vec![]);
    }

    pub fn restore_state(&mut self) {
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
            self.push("Q", vec![]);
        }
    }

    pub fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.push("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
    }

    pub fn set_line_width(&mut self, width_mm: f32) {
        if self.state.line_width != Some(width_mm) {
            self.push("w", vec![mm_to_pt(width_mm).into()]);
            self.state.line_width = Some(width_mm);
        }
    }

    /// Applies a constant fill and stroke alpha for the rest of the current
    /// graphics state. Fails without touching the page when the surface
    /// cannot express transparency; callers pick an opaque fallback.
    pub fn set_opacity(&mut self, alpha: f32) -> Result<(), CapabilityError> {
        if !self.capabilities.transparency {
            return Err(CapabilityError::TransparencyUnavailable);
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let name = format!("GS{}", (alpha * 1000.0).round() as u32);
        self.ext_gstates.insert(name.clone(), alpha);
        self.push("gs", vec![Object::Name(name.into_bytes())]);
        Ok(())
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.set_fill_color(color);
        let (x, y) = (self.x(rect.x), self.y(rect.bottom()));
        self.push(
            "re",
            vec![x, y, mm_to_pt(rect.width).into(), mm_to_pt(rect.height).into()],
        );
        self.push("f", vec![]);
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color, width_mm: f32) {
        self.set_stroke_color(color);
        self.set_line_width(width_mm);
        let (x, y) = (self.x(rect.x), self.y(rect.bottom()));
        self.push(
            "re",
            vec![x, y, mm_to_pt(rect.width).into(), mm_to_pt(rect.height).into()],
        );
        self.push("S", vec![]);
    }

    /// Appends a straight segment to the current path; call [`Self::stroke`]
    /// to paint accumulated segments.
    pub fn segment(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let (mx, my) = (self.x(x1), self.y(y1));
        self.push("m", vec![mx, my]);
        let (lx, ly) = (self.x(x2), self.y(y2));
        self.push("l", vec![lx, ly]);
    }

    pub fn stroke(&mut self) {
        self.push("S", vec![]);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width_mm: f32) {
        self.set_stroke_color(color);
        self.set_line_width(width_mm);
        self.segment(x1, y1, x2, y2);
        self.stroke();
    }

    /// Draws a single line of text with its baseline at `baseline_mm`.
    /// `x_mm` is the left edge, center or right edge depending on alignment.
    pub fn text(&mut self, x_mm: f32, baseline_mm: f32, text: &str, style: TextStyle) {
        if text.is_empty() {
            return;
        }
        let width = style.font.measure_mm(text, style.size_pt);
        let left = match style.align {
            TextAlign::Left => x_mm,
            TextAlign::Center => x_mm - width / 2.0,
            TextAlign::Right => x_mm - width,
        };
        self.set_fill_color(style.color);
        let (x, y) = (self.x(left), self.y(baseline_mm));
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(style.font.resource_name().as_bytes().to_vec()),
                style.size_pt.into(),
            ],
        );
        self.push("Td", vec![x, y]);
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    /// Draws text centered on (`cx_mm`, `cy_mm`) and rotated counter-clockwise
    /// by `angle_deg`. With `outline` the glyphs are stroked, not filled.
    pub fn rotated_text(
        &mut self,
        cx_mm: f32,
        cy_mm: f32,
        angle_deg: f32,
        text: &str,
        style: TextStyle,
        outline: bool,
    ) {
        if text.is_empty() {
            return;
        }
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let half_width = mm_to_pt(style.font.measure_mm(text, style.size_pt)) / 2.0;
        let half_height = style.size_pt * 0.35;
        let cx = mm_to_pt(cx_mm);
        let cy = mm_to_pt(self.size.height - cy_mm);
        // Shift the origin back along the rotated baseline so the run is centered.
        let ox = cx - half_width * cos + half_height * sin;
        let oy = cy - half_width * sin - half_height * cos;

        if outline {
            self.set_stroke_color(style.color);
        } else {
            self.set_fill_color(style.color);
        }
        self.push("BT", vec![]);
        self.push(
            "Tf",
            vec![
                Object::Name(style.font.resource_name().as_bytes().to_vec()),
                style.size_pt.into(),
            ],
        );
        if outline {
            self.push("Tr", vec![1.into()]);
        }
        self.push(
            "Tm",
            vec![
                cos.into(),
                sin.into(),
                (-sin).into(),
                cos.into(),
                ox.into(),
                oy.into(),
            ],
        );
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        if outline {
            self.push("Tr", vec![0.into()]);
        }
        self.push("ET", vec![]);
    }
}
