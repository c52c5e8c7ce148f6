use slug::slugify;

/// Longest slug kept from the pattern text.
pub const FILENAME_TEXT_MAX: usize = 40;

/// Derives a filesystem-safe file name such as `hello-world_pixel-5.pdf`.
///
/// Both parts are lowercased with every run of other characters collapsed
/// to one hyphen. Text that slugs to nothing becomes `pattern`.
pub fn pattern_filename(text: &str, font_name: &str) -> String {
    let mut text_part = slugify(text);
    if text_part.len() > FILENAME_TEXT_MAX {
        // Slugs are ASCII, so byte truncation stays on a char boundary.
        text_part.truncate(FILENAME_TEXT_MAX);
        text_part.truncate(text_part.trim_end_matches('-').len());
    }
    if text_part.is_empty() {
        text_part = "pattern".to_string();
    }

    let font_part = slugify(font_name);
    if font_part.is_empty() {
        format!("{}.pdf", text_part)
    } else {
        format!("{}_{}.pdf", text_part, font_part)
    }
}
