//! Slides to PDF Library
//!
//! Combines numbered slide images into a single PDF, one page per slide.
//! This library provides functionality to:
//! - Find `slide_<N>.png` files in a directory and order them by number
//! - Encode an ordered list of images into a multi-page PDF
//! - Write the PDF, creating parent directories as needed
//! - Read page counts and sizes back from a PDF
//!
//! # Example
//!
//! ```no_run
//! use slides_to_pdf::pdf::{images_to_pdf, EncodeOptions};
//! use slides_to_pdf::slides::{find_slides, SortOrder};
//! use slides_to_pdf::output::write_pdf;
//! use std::path::Path;
//!
//! let slides = find_slides(Path::new("deck"), SortOrder::Numeric).expect("No slides");
//! let paths: Vec<_> = slides.iter().map(|s| s.path.as_path()).collect();
//! let pdf = images_to_pdf(&paths, &EncodeOptions::default()).expect("Failed to encode");
//! write_pdf(Path::new("out/deck.pdf"), &pdf).expect("Failed to write");
//! ```

pub mod error;
pub mod layout;
pub mod output;
pub mod pdf;
pub mod slides;

// Re-export commonly used items
pub use error::{Error, Result};
