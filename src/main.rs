use clap::Parser;
use crosspatch::glyph::FontDescriptor;
use crosspatch::render::PdfProfile;
use crosspatch::types::{Orientation, PageFormat, ThreadColor, UnitSystem};
use crosspatch::{GeneratorBuilder, PatternError, PatternRequest};
use std::fs;
use std::path::PathBuf;

// Many short-lived allocations per page; mimalloc keeps them cheap.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Generates a cross-stitch pattern PDF from text and a pixel font.
#[derive(Parser, Debug)]
#[command(name = "crosspatch", version, about)]
struct Args {
    /// Text to stitch.
    #[arg(long)]
    text: String,

    /// Pixel font descriptor (JSON).
    #[arg(long)]
    font: PathBuf,

    /// Thread color as #RRGGBB.
    #[arg(long, default_value = "#000000")]
    color: String,

    /// Thread code printed in the legend.
    #[arg(long, default_value = "310")]
    code: String,

    /// Thread color name printed in the legend.
    #[arg(long, default_value = "Black")]
    name: String,

    /// Fabric count in stitches per inch.
    #[arg(long, default_value_t = 14.0)]
    count: f64,

    #[arg(long)]
    landscape: bool,

    /// Watermarked preview with a redacted legend.
    #[arg(long)]
    preview: bool,

    /// Show yards and inches first.
    #[arg(long)]
    imperial: bool,

    /// US Letter paper instead of A4.
    #[arg(long)]
    letter: bool,

    /// Write PDF/X-3 (no transparency).
    #[arg(long)]
    pdfx: bool,

    /// Translation catalog (flat JSON object of key → text).
    #[arg(long)]
    translations: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

fn main() -> Result<(), PatternError> {
    env_logger::init();
    let args = Args::parse();

    let font_json = fs::read_to_string(&args.font)?;
    let font = FontDescriptor::from_json(&font_json)
        .map_err(|e| PatternError::Font(format!("{}: {}", args.font.display(), e)))?;
    let thread = ThreadColor::from_hex(args.code.as_str(), args.name.as_str(), &args.color)
        .map_err(PatternError::Config)?;

    let mut builder = GeneratorBuilder::new()
        .with_page_format(if args.letter { PageFormat::Letter } else { PageFormat::A4 })
        .with_units(if args.imperial { UnitSystem::Imperial } else { UnitSystem::Metric })
        .with_profile(if args.pdfx { PdfProfile::PdfX3 } else { PdfProfile::Standard });
    if let Some(path) = &args.translations {
        builder = builder.with_translation_file(path)?;
    }
    let generator = builder.build()?;

    let request = PatternRequest::new(&args.text, &font, &thread)
        .with_fabric_count(args.count)
        .with_orientation(if args.landscape { Orientation::Landscape } else { Orientation::Portrait })
        .with_preview(args.preview);

    let Some(mut document) = generator.generate(&request)? else {
        eprintln!("Nothing to stitch: check the text, font and fabric count.");
        std::process::exit(2);
    };

    fs::create_dir_all(&args.out)?;
    let path = document.save_in_dir(&args.out)?;
    println!("Wrote {}", path.display());
    println!(
        "  {} pages ({} chart), {} × {} stitches, {} crosses",
        document.page_count,
        document.grid_pages,
        document.pattern_width,
        document.pattern_height,
        document.stitch_count
    );
    Ok(())
}
