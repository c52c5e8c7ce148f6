mod common;

use common::{black, generator, init_logging, pixel5, GeneratedPdf, TestResult};
use crosspatch::layout::plan_pages;
use crosspatch::types::{FabricCount, Margins, Orientation, PageFormat, PageGeometry};
use crosspatch::{build_pattern, PatternRequest};

#[test]
fn test_ai_scenario_dimensions() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let mut pattern = generator()
        .generate(&PatternRequest::new("AI", &font, &thread))?
        .ok_or("expected a document")?;

    assert_eq!((pattern.pattern_width, pattern.pattern_height), (7, 5));
    // A has 10 crosses, I has 9
    assert_eq!(pattern.stitch_count, 19);
    assert_eq!(pattern.grid_pages, 1);
    assert_eq!(pattern.page_count, 2);

    let pdf = GeneratedPdf::from_pattern(&mut pattern)?;
    assert_eq!(pdf.page_count(), 2);
    Ok(())
}

#[test]
fn test_long_text_spans_several_pages() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let text = "CROSS STITCH ".repeat(6);
    let mut pattern = generator()
        .generate(&PatternRequest::new(&text, &font, &thread))?
        .ok_or("expected a document")?;

    let geometry = PageGeometry::new(
        PageFormat::A4,
        Orientation::Portrait,
        Margins::symmetric(10.0, 17.5),
    );
    let plan = plan_pages(
        pattern.pattern_width,
        pattern.pattern_height,
        FabricCount::AIDA_14.cell_size_mm(),
        geometry.usable_size(),
    );
    assert_eq!(plan.cols_per_page, 94);
    assert!(plan.pages_x >= 2);
    assert_eq!(pattern.grid_pages, plan.total_pages);
    assert_eq!(pattern.page_count, plan.total_pages + 1);

    let pdf = GeneratedPdf::from_pattern(&mut pattern)?;
    assert_eq!(pdf.page_count(), pattern.page_count);
    let last = pattern.page_count as u32;
    let counter = format!("Page 1 / {}", last);
    assert!(pdf.page_text(1)?.contains(&counter));
    assert!(pdf.page_text(last)?.iter().any(|t| t == "Materials & Legend"));
    Ok(())
}

#[test]
fn test_second_page_labels_continue_absolute_numbering() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let text = "CROSS STITCH ".repeat(6);
    let mut pattern = generator()
        .generate(&PatternRequest::new(&text, &font, &thread))?
        .ok_or("expected a document")?;
    let pdf = GeneratedPdf::from_pattern(&mut pattern)?;

    let second = pdf.page_text(2)?;
    assert!(second.iter().any(|t| t == "100"));
    assert!(!second.iter().any(|t| t == "0"));
    Ok(())
}

#[test]
fn test_empty_inputs_produce_no_document() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let none = |text: &str, font, thread, count| {
        build_pattern(text, font, thread, count, Orientation::Portrait, false)
            .map(|doc| doc.is_none())
    };
    assert!(none("", Some(&font), Some(&thread), 14.0)?);
    assert!(none(" \t\n", Some(&font), Some(&thread), 14.0)?);
    assert!(none("AI", None, Some(&thread), 14.0)?);
    assert!(none("AI", Some(&font), None, 14.0)?);
    assert!(none("AI", Some(&font), Some(&thread), -14.0)?);
    assert!(none("AI", Some(&font), Some(&thread), f64::INFINITY)?);
    Ok(())
}

#[test]
fn test_unknown_glyphs_give_zero_stitch_legend() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let mut pattern = generator()
        .generate(&PatternRequest::new("@@", &font, &thread))?
        .ok_or("expected a document")?;
    assert_eq!(pattern.stitch_count, 0);

    let pdf = GeneratedPdf::from_pattern(&mut pattern)?;
    let legend = pdf.page_text(2)?;
    assert!(legend.iter().any(|t| t.starts_with("0.0 m")));
    assert!(legend.iter().any(|t| t == "Finished size"));
    Ok(())
}

#[test]
fn test_builds_are_deterministic() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let request = PatternRequest::new("Hello", &font, &thread).with_preview(true);
    let g = generator();
    let first = g.generate(&request)?.ok_or("expected a document")?.to_bytes()?;
    let second = g.generate(&request)?.ok_or("expected a document")?.to_bytes()?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_saves_under_derived_filename() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let dir = tempfile::tempdir()?;
    let mut pattern = generator()
        .generate(&PatternRequest::new("Hello World", &font, &thread))?
        .ok_or("expected a document")?;
    assert_eq!(pattern.filename, "hello-world_pixel-5.pdf");

    let path = pattern.save_in_dir(dir.path())?;
    assert_eq!(path, dir.path().join("hello-world_pixel-5.pdf"));
    let bytes = std::fs::read(&path)?;
    assert!(bytes.starts_with(b"%PDF-"));
    Ok(())
}

#[test]
fn test_document_info_carries_title() -> TestResult {
    init_logging();
    let (font, thread) = (pixel5(), black());
    let mut pattern = generator()
        .generate(&PatternRequest::new("AI", &font, &thread))?
        .ok_or("expected a document")?;
    let pdf = GeneratedPdf::from_pattern(&mut pattern)?;
    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_dictionary(info_id)?;
    assert!(info.has(b"Title"));
    assert_eq!(info.get(b"CreationDate")?.as_str()?, b"D:20240501");
    Ok(())
}
