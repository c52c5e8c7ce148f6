use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One character of a pixel font. Each bitmap row is a string of `'0'`/`'1'`
/// cells, top row first, `width` cells long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub width: usize,
    pub bitmap: Vec<String>,
}

impl Glyph {
    /// Builds a glyph from row literals, taking the width from the first row.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |row| row.chars().count());
        Self {
            width,
            bitmap: rows.iter().map(|row| row.to_string()).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.bitmap.len()
    }

    /// Whether the cell at (`row`, `col`) is stitched. Cells outside the
    /// stored rows read as empty.
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.bitmap
            .get(row)
            .and_then(|r| r.as_bytes().get(col))
            .is_some_and(|&cell| cell == b'1')
    }
}

/// A pixel font as supplied by the font-rasterization service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDescriptor {
    #[serde(default)]
    pub name: String,
    /// Declared line height in cells. When absent it is derived from the
    /// tallest glyph.
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub letter_spacing: usize,
    #[serde(default = "default_space_width")]
    pub space_width: usize,
    #[serde(default)]
    pub glyphs: BTreeMap<char, Glyph>,
}

fn default_space_width() -> usize {
    1
}

impl FontDescriptor {
    pub fn new(name: impl Into<String>, height: usize) -> Self {
        Self {
            name: name.into(),
            height: Some(height),
            letter_spacing: 0,
            space_width: default_space_width(),
            glyphs: BTreeMap::new(),
        }
    }

    pub fn with_letter_spacing(mut self, spacing: usize) -> Self {
        self.letter_spacing = spacing;
        self
    }

    pub fn with_space_width(mut self, width: usize) -> Self {
        self.space_width = width;
        self
    }

    pub fn with_glyph(mut self, ch: char, glyph: Glyph) -> Self {
        self.glyphs.insert(ch, glyph);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    pub fn has_glyphs(&self) -> bool {
        !self.glyphs.is_empty()
    }

    /// The number of rows every composed bitmap gets: the declared height,
    /// or the tallest glyph when none (or zero) is declared, never less than one.
    pub fn effective_height(&self) -> usize {
        self.height
            .filter(|&h| h > 0)
            .unwrap_or_else(|| self.glyphs.values().map(Glyph::row_count).max().unwrap_or(0))
            .max(1)
    }

    /// Space width with the `≥ 1` invariant enforced.
    pub fn space_columns(&self) -> usize {
        self.space_width.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_service_json() {
        let json = r#"{
            "name": "Pixel 5",
            "height": 5,
            "letterSpacing": 1,
            "spaceWidth": 3,
            "glyphs": {
                "I": { "width": 1, "bitmap": ["1", "1", "1", "1", "1"] }
            }
        }"#;
        let font = FontDescriptor::from_json(json).unwrap();
        assert_eq!(font.name, "Pixel 5");
        assert_eq!(font.letter_spacing, 1);
        assert_eq!(font.space_width, 3);
        assert_eq!(font.glyph('I').unwrap().row_count(), 5);
    }

    #[test]
    fn effective_height_falls_back_to_tallest_glyph() {
        let mut font = FontDescriptor::new("derived", 0)
            .with_glyph('a', Glyph::from_rows(&["1", "1"]))
            .with_glyph('b', Glyph::from_rows(&["1", "1", "1"]));
        font.height = None;
        assert_eq!(font.effective_height(), 3);

        let empty = FontDescriptor {
            height: None,
            ..FontDescriptor::new("empty", 0)
        };
        assert_eq!(empty.effective_height(), 1);
    }

    #[test]
    fn zero_declared_height_means_undeclared() {
        let font = FontDescriptor::new("zero", 0)
            .with_glyph('a', Glyph::from_rows(&["1", "1", "1", "1"]));
        assert_eq!(font.height, Some(0));
        assert_eq!(font.effective_height(), 4);

        let json = r#"{"name": "Z", "height": 0, "glyphs": {"I": {"width": 1, "bitmap": ["1", "1"]}}}"#;
        assert_eq!(FontDescriptor::from_json(json).unwrap().effective_height(), 2);
    }

    #[test]
    fn cells_outside_rows_are_empty() {
        let glyph = Glyph::from_rows(&["10", "0"]);
        assert!(glyph.is_set(0, 0));
        assert!(!glyph.is_set(1, 1));
        assert!(!glyph.is_set(5, 0));
    }
}
