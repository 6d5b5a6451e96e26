//! Slides to PDF CLI tool
//!
//! Combines numbered slide images (`slide_<N>.png`) from a directory into one PDF.

use anyhow::Context;
use chrono::Local;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;

use slides_to_pdf::layout::{Length, PageSize};
use slides_to_pdf::output::write_pdf;
use slides_to_pdf::pdf::{count_pages_in_memory, images_to_pdf, EncodeOptions};
use slides_to_pdf::slides::{find_slides, SortOrder};
use slides_to_pdf::Error;

/// Slides to PDF - Combine numbered slide images into a single PDF
#[derive(Parser)]
#[command(name = "slides-to-pdf")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Combine deck/slide_01.png, deck/slide_02.png, ... into one PDF
    slides-to-pdf deck out/deck.pdf

    # Print on A4 paper with a 10mm margin
    slides-to-pdf deck deck.pdf --page-size a4 --margin 10

    # Keep plain file name order and open the result
    slides-to-pdf deck deck.pdf --sort lexicographic --open")]
struct Cli {
    /// Directory containing slide_<N>.png files
    input_dir: PathBuf,

    /// Output PDF file path (parent directories are created)
    output_path: PathBuf,

    /// Pixels per inch used to size pages from image pixels
    /// [default: the image's own density, or 96]
    #[arg(long)]
    dpi: Option<f64>,

    /// Page size slides are placed on
    #[arg(long, value_enum, default_value_t = PageSizeArg::Image)]
    page_size: PageSizeArg,

    /// Margin in millimeters (fixed page sizes only)
    #[arg(long, default_value_t = 0.0)]
    margin: f64,

    /// Document title stored in the PDF
    #[arg(long)]
    title: Option<String>,

    /// Slide ordering
    #[arg(long, value_enum, default_value_t = SortArg::Numeric)]
    sort: SortArg,

    /// Open the output file after creation
    #[arg(long)]
    open: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    /// Each page is the size of its image
    Image,
    A4,
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::Image => PageSize::Image,
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// By slide number, so slide_2 comes before slide_10
    Numeric,
    /// By file name (needs zero-padded numbers)
    Lexicographic,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Numeric => SortOrder::Numeric,
            SortArg::Lexicographic => SortOrder::Lexicographic,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Usage errors exit 1, not clap's default 2
                let _ = e.print();
                process::exit(1);
            }
        },
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let slides = match find_slides(&cli.input_dir, cli.sort.into()) {
        Ok(slides) => slides,
        Err(e @ Error::NoSlidesFound(_)) => return Err(e.into()),
        Err(e) => {
            return Err(e).with_context(|| {
                format!("Failed to list slides in {}", cli.input_dir.display())
            })
        }
    };

    println!("→ Combining {} slides into PDF...", slides.len());

    let options = EncodeOptions {
        dpi: cli.dpi,
        page_size: cli.page_size.into(),
        margin: Length::from_mm(cli.margin),
        title: cli.title,
        creation_date: Some(Local::now().naive_local()),
    };

    let paths: Vec<&Path> = slides.iter().map(|s| s.path.as_path()).collect();
    let pdf = images_to_pdf(&paths, &options).context("Failed to encode slides")?;
    let page_count = count_pages_in_memory(&pdf).context("Encoded PDF is unreadable")?;

    let written = write_pdf(&cli.output_path, &pdf)
        .with_context(|| format!("Failed to write {}", cli.output_path.display()))?;

    println!(
        "→ PDF written: {} ({:.1} MB, {} pages)",
        written.path.display(),
        written.size_mib(),
        page_count
    );

    if cli.open {
        open_file(&written.path)?;
    }

    Ok(())
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        process::Command::new("open")
            .arg(path)
            .spawn()
            .context("Failed to launch viewer")?;
    }
    #[cfg(target_os = "linux")]
    {
        process::Command::new("xdg-open")
            .arg(path)
            .spawn()
            .context("Failed to launch viewer")?;
    }
    #[cfg(target_os = "windows")]
    {
        process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()
            .context("Failed to launch viewer")?;
    }
    Ok(())
}
