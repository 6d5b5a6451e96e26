//! Integration tests for the slides-to-pdf library

use image::{Rgb, RgbImage};
use slides_to_pdf::layout::PageSize;
use slides_to_pdf::output::write_pdf;
use slides_to_pdf::pdf::{count_pages, extract_metadata, images_to_pdf, page_sizes, EncodeOptions};
use slides_to_pdf::slides::{find_slides, SortOrder};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a slide whose width encodes its position: slide `n` is `10 + n` px wide
fn write_slide(dir: &Path, name: &str, n: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(10 + n, 20, Rgb([(n * 20) as u8, 0, 0]))
        .save(&path)
        .expect("Failed to write slide");
    path
}

/// Encode at 72 dpi so page widths in points equal pixel widths
fn options_72dpi() -> EncodeOptions {
    EncodeOptions {
        dpi: Some(72.0),
        ..Default::default()
    }
}

fn encode_dir(dir: &Path, order: SortOrder) -> Vec<u8> {
    let slides = find_slides(dir, order).expect("Failed to find slides");
    let paths: Vec<&Path> = slides.iter().map(|s| s.path.as_path()).collect();
    images_to_pdf(&paths, &options_72dpi()).expect("Failed to encode slides")
}

fn page_widths(pdf: &[u8]) -> Vec<u32> {
    page_sizes(pdf)
        .expect("Failed to read page sizes")
        .into_iter()
        .map(|(w, _)| w.round() as u32)
        .collect()
}

#[test]
fn test_nine_zero_padded_slides_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for n in (1..=9).rev() {
        write_slide(temp_dir.path(), &format!("slide_{:02}.png", n), n);
    }

    let pdf = encode_dir(temp_dir.path(), SortOrder::Numeric);

    assert_eq!(page_widths(&pdf), (11..=19).collect::<Vec<_>>());
}

#[test]
fn test_unpadded_slides_numeric_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for n in 1..=12 {
        write_slide(temp_dir.path(), &format!("slide_{}.png", n), n);
    }

    let numeric = encode_dir(temp_dir.path(), SortOrder::Numeric);
    assert_eq!(page_widths(&numeric), (11..=22).collect::<Vec<_>>());

    // slide_1, slide_10, slide_11, slide_12, slide_2, ...
    let lexicographic = encode_dir(temp_dir.path(), SortOrder::Lexicographic);
    assert_eq!(
        page_widths(&lexicographic),
        vec![11, 20, 21, 22, 12, 13, 14, 15, 16, 17, 18, 19]
    );
}

#[test]
fn test_single_slide_single_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_slide(temp_dir.path(), "slide_1.png", 1);

    let pdf = encode_dir(temp_dir.path(), SortOrder::Numeric);
    let output_path = temp_dir.path().join("single.pdf");
    write_pdf(&output_path, &pdf).expect("Failed to write PDF");

    assert_eq!(count_pages(&output_path).expect("Failed to count pages"), 1);
}

#[test]
fn test_repeat_runs_same_page_count() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    for n in 1..=4 {
        write_slide(temp_dir.path(), &format!("slide_{}.png", n), n);
    }

    let first = encode_dir(temp_dir.path(), SortOrder::Numeric);
    let second = encode_dir(temp_dir.path(), SortOrder::Numeric);

    assert_eq!(
        extract_metadata(&first).unwrap().page_count,
        extract_metadata(&second).unwrap().page_count
    );
    assert_eq!(extract_metadata(&first).unwrap().page_count, 4);
}

#[test]
fn test_write_creates_nested_output_dirs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let slides_dir = temp_dir.path().join("deck");
    std::fs::create_dir(&slides_dir).unwrap();
    write_slide(&slides_dir, "slide_1.png", 1);
    write_slide(&slides_dir, "slide_2.png", 2);

    let pdf = encode_dir(&slides_dir, SortOrder::Numeric);
    let output_path = temp_dir.path().join("build").join("pdf").join("deck.pdf");
    let written = write_pdf(&output_path, &pdf).expect("Failed to write PDF");

    assert!(output_path.exists(), "PDF was not created");
    assert_eq!(written.bytes, pdf.len() as u64);
    assert_eq!(count_pages(&output_path).unwrap(), 2);
}

#[test]
fn test_fixed_page_size_and_title() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = write_slide(temp_dir.path(), "slide_1.png", 1);

    let options = EncodeOptions {
        page_size: PageSize::A4,
        title: Some("Résumé deck".to_string()),
        ..Default::default()
    };
    let pdf = images_to_pdf(&[&path], &options).expect("Failed to encode");

    let sizes = page_sizes(&pdf).unwrap();
    assert!((sizes[0].0 - 595.28).abs() < 0.1);
    assert!((sizes[0].1 - 841.89).abs() < 0.1);

    let metadata = extract_metadata(&pdf).unwrap();
    assert_eq!(metadata.title.as_deref(), Some("Résumé deck"));
    assert!(metadata.producer.unwrap().starts_with("slides-to-pdf"));
}
