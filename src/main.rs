//! # Dotprint CLI
//!
//! Renders a captured printer job into PNG pages.
//!
//! ## Usage
//!
//! ```bash
//! # Render a job with the defaults (A4, ESC/P, CP437)
//! dotprint job.prn --output out/
//!
//! # Letter paper, coalesce driver paper feeds into page breaks
//! dotprint -p letter --newlines coalesce job.prn -o job.png
//!
//! # Draw with an installed font, or with explicit font files
//! dotprint -f "DejaVu Sans Mono" -s 10 job.prn -o out/
//! dotprint --font-file Mono.ttf --bold-font-file Mono-Bold.ttf job.prn -o out/
//!
//! # List known page sizes or interpreters
//! dotprint --page list
//! dotprint --preprocessor list
//!
//! # Show dropped bytes and unknown escapes
//! RUST_LOG=debug dotprint job.prn --output out/
//! ```

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use dotprint::{
    DotprintError,
    codepage::Codepage,
    config::{Emulation, EmulatorConfig, NewlineMode},
    document::Document,
    page::PageGeometry,
    render::{FixedPitchMetrics, GlyphMetrics, RasterRenderer, TrueTypeMetrics, fontdir},
};

/// Dotprint - ESC/P dot-matrix printer emulator
#[derive(Parser, Debug)]
#[command(name = "dotprint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Captured printer data
    input: Option<PathBuf>,

    /// Output directory, or file name whose stem names the pages
    #[arg(long, short, value_name = "DIR|FILE.png")]
    output: Option<PathBuf>,

    /// Paper size, or "list" to show the known sizes
    #[arg(long, short = 'p')]
    page: Option<String>,

    /// Rotate the paper
    #[arg(long, short = 'l')]
    landscape: bool,

    /// Stream interpreter, or "list" to show the interpreters
    #[arg(long, short = 'P')]
    preprocessor: Option<String>,

    /// Font family, looked up in the system font directories
    #[arg(long, short = 'f')]
    font_face: Option<String>,

    /// Font size in points
    #[arg(long, short = 's')]
    font_size: Option<f64>,

    /// TrueType font to draw with, instead of looking up the font face
    #[arg(long, value_name = "TTF")]
    font_file: Option<PathBuf>,

    /// TrueType font for bold text
    #[arg(long, value_name = "TTF", requires = "font_file")]
    bold_font_file: Option<PathBuf>,

    /// Output resolution
    #[arg(long, default_value_t = RasterRenderer::DEFAULT_DPI)]
    dpi: f64,

    /// Character set of the input
    #[arg(long, value_enum)]
    codepage: Option<Codepage>,

    /// CR/LF handling
    #[arg(long, value_enum)]
    newlines: Option<NewlineMode>,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "JSON")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DotprintError> {
    let cli = Cli::parse();

    if cli.page.as_deref() == Some("list") {
        println!("Available page sizes:");
        for name in PageGeometry::names() {
            println!("  {}", name);
        }
        return Ok(());
    }

    if cli.preprocessor.as_deref() == Some("list") {
        println!("Available preprocessors:");
        for emulation in Emulation::value_variants() {
            if let Some(value) = emulation.to_possible_value() {
                let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                println!("  {:<8} {}", value.get_name(), help);
            }
        }
        return Ok(());
    }

    let config = resolve_config(&cli)?;

    let input = cli
        .input
        .as_deref()
        .ok_or_else(|| DotprintError::Config("no input file given".to_string()))?;
    let output = cli
        .output
        .as_deref()
        .ok_or_else(|| DotprintError::Config("--output is required".to_string()))?;

    let faces = load_faces(&cli, &config)?;

    let written = render(input, output, cli.dpi, faces, &config)?;
    for path in &written {
        println!("Saved {}", path.display());
    }
    Ok(())
}

/// Merge the configuration file (if any) with the command-line flags.
fn resolve_config(cli: &Cli) -> Result<EmulatorConfig, DotprintError> {
    let mut config = match &cli.config {
        Some(path) => EmulatorConfig::from_json_file(path)?,
        None => EmulatorConfig::default(),
    };

    if let Some(page) = &cli.page {
        config.page = page.clone();
    }
    if cli.landscape {
        config.landscape = true;
    }
    if let Some(name) = &cli.preprocessor {
        config.preprocessor = <Emulation as ValueEnum>::from_str(name, true).map_err(|_| {
            DotprintError::Config(format!(
                "unknown preprocessor '{}'. Use --preprocessor list to see available options.",
                name
            ))
        })?;
    }
    if let Some(face) = &cli.font_face {
        config.font_face = face.clone();
    }
    if let Some(size) = cli.font_size {
        config.font_size = size;
    }
    if let Some(codepage) = cli.codepage {
        config.codepage = codepage;
    }
    if let Some(newlines) = cli.newlines {
        config.newlines = newlines;
    }

    config.validate()?;
    Ok(config)
}

/// The TrueType faces to draw with: the explicit font files, else the font
/// face found in the font directories. `None` selects the bitmap font.
fn load_faces(
    cli: &Cli,
    config: &EmulatorConfig,
) -> Result<Option<TrueTypeMetrics>, DotprintError> {
    if let Some(path) = &cli.font_file {
        let mut faces = TrueTypeMetrics::from_file(path)?;
        if let Some(bold) = &cli.bold_font_file {
            faces = faces.with_bold_file(bold)?;
        }
        return Ok(Some(faces));
    }

    match fontdir::load_family(&config.font_face) {
        Ok(Some(faces)) => Ok(Some(faces)),
        Ok(None) => {
            if cli.font_face.is_some() {
                log::warn!(
                    "no font file found for '{}', using the built-in bitmap font",
                    config.font_face
                );
            } else {
                log::debug!("no font file found for '{}'", config.font_face);
            }
            Ok(None)
        }
        Err(e) => {
            log::warn!("failed to load '{}': {}, using the built-in bitmap font", config.font_face, e);
            Ok(None)
        }
    }
}

/// Run the job through the interpreter and write one PNG per page.
fn render(
    input: &Path,
    output: &Path,
    dpi: f64,
    faces: Option<TrueTypeMetrics>,
    config: &EmulatorConfig,
) -> Result<Vec<PathBuf>, DotprintError> {
    if !(dpi > 0.0) {
        return Err(DotprintError::Config(format!("dpi must be positive, got {}", dpi)));
    }

    let data = std::fs::read(input)?;
    log::debug!("read {} bytes from {}", data.len(), input.display());

    // Glyphs are drawn from the faces that measure them.
    let (renderer, metrics): (RasterRenderer, Box<dyn GlyphMetrics>) = match faces {
        Some(faces) => (RasterRenderer::new(dpi).with_truetype(faces.clone()), Box::new(faces)),
        None => (RasterRenderer::new(dpi), Box::new(FixedPitchMetrics::COURIER)),
    };

    let mut doc = Document::new(renderer, metrics, config)?;
    doc.feed_all(&data);
    let renderer = doc.finish();

    renderer.save_pages(output)
}
