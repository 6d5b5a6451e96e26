//! Error types for the slides-to-pdf library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the slides-to-pdf library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decoding error
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Input directory missing or not a directory
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// No slide images in the input directory
    #[error("no slide_*.png files found in {}", .0.display())]
    NoSlidesFound(PathBuf),

    /// Encoder called with an empty image list
    #[error("No input images provided")]
    NoInputImages,

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    /// Option value out of range
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// PDF with no pages
    #[error("PDF has no pages")]
    EmptyPdf,

    /// General error
    #[error("{0}")]
    General(String),
}
