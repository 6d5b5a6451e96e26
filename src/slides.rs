//! Slide discovery and ordering
//!
//! Slides are files named `slide_<N>.png` directly inside an input directory.
//! The default ordering is numeric on `<N>`, so `slide_2.png` comes before
//! `slide_10.png` whether or not the numbers are zero-padded.

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// File name pattern for slide images
pub const SLIDE_PATTERN: &str = "slide_*.png";

const SLIDE_PREFIX: &str = "slide_";

/// How discovered slides are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By the number in `slide_<N>.png`; unnumbered slides go last
    #[default]
    Numeric,
    /// Plain ascending file name order (only correct for zero-padded numbers)
    Lexicographic,
}

/// A slide image found in the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Full path to the image
    pub path: PathBuf,
    /// Parsed `<N>` from the file name, if it is all digits
    pub number: Option<u64>,
}

impl Slide {
    /// Build a slide from a path, parsing its number
    pub fn new(path: PathBuf) -> Self {
        let number = slide_number(&path);
        Self { path, number }
    }

    fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }
}

/// Parse the slide number from a `slide_<N>.png` path
///
/// Returns `None` when the stem does not start with `slide_` or the rest is
/// not made of ASCII digits.
pub fn slide_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let digits = stem.strip_prefix(SLIDE_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Find all slide images in `dir`, ordered by `order`
///
/// Only regular files directly inside `dir` whose names match
/// [`SLIDE_PATTERN`] are returned. An empty result is an error.
pub fn find_slides(dir: &Path, order: SortOrder) -> Result<Vec<Slide>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let pattern = Pattern::new(SLIDE_PATTERN)?;
    let match_options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: true,
    };

    let mut slides = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        // Non-UTF-8 bytes become U+FFFD, which `*` still matches
        let name = entry.file_name();
        if !pattern.matches_with(&name.to_string_lossy(), match_options) {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }
        slides.push(Slide::new(entry.path()));
    }

    if slides.is_empty() {
        return Err(Error::NoSlidesFound(dir.to_path_buf()));
    }

    sort_slides(&mut slides, order);
    Ok(slides)
}

/// Sort slides in place
pub fn sort_slides(slides: &mut [Slide], order: SortOrder) {
    match order {
        SortOrder::Lexicographic => slides.sort_by(|a, b| a.file_name().cmp(b.file_name())),
        SortOrder::Numeric => slides.sort_by(compare_numeric),
    }
}

fn compare_numeric(a: &Slide, b: &Slide) -> Ordering {
    match (a.number, b.number) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.file_name().cmp(b.file_name())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.file_name().cmp(b.file_name()),
    }
}
