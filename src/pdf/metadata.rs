//! PDF metadata extraction

use std::path::Path;
use lopdf::{Dictionary, Document, Object};
use crate::error::{Error, Result};

/// Count pages by reading the Count field from the Pages dictionary
fn count_pages_from_catalog(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = match catalog.get(b"Pages")? {
        Object::Reference(id) => *id,
        _ => return Err(Error::General("Pages is not a reference".to_string())),
    };

    let pages_dict = doc.get_object(pages_id)?.as_dict()?;

    match pages_dict.get(b"Count")? {
        Object::Integer(n) => Ok(*n as usize),
        _ => Err(Error::General("Count is not an integer".to_string())),
    }
}

/// PDF metadata
#[derive(Debug, Clone)]
pub struct PdfMetadata {
    /// Number of pages in the PDF
    pub page_count: usize,
    /// Document title (if present)
    pub title: Option<String>,
    /// Producing application (if present)
    pub producer: Option<String>,
}

/// Extract metadata from PDF bytes
pub fn extract_metadata(bytes: &[u8]) -> Result<PdfMetadata> {
    let doc = Document::load_mem(bytes)?;

    let page_count = count_pages_from_catalog(&doc)?;
    if page_count == 0 {
        return Err(Error::EmptyPdf);
    }

    let info = match doc.trailer.get(b"Info") {
        Ok(Object::Reference(id)) => doc.get_object(*id).and_then(Object::as_dict).ok(),
        _ => None,
    };

    Ok(PdfMetadata {
        page_count,
        title: info_text(info, b"Title"),
        producer: info_text(info, b"Producer"),
    })
}

fn info_text(info: Option<&Dictionary>, key: &[u8]) -> Option<String> {
    info.and_then(|dict| dict.get(key).ok())
        .and_then(decode_text_string)
}

/// Decode a PDF text string (UTF-16BE with BOM, or byte string)
fn decode_text_string(obj: &Object) -> Option<String> {
    let bytes = match obj {
        Object::String(bytes, _) => bytes,
        _ => return None,
    };

    if let Some(utf16) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16(&units).ok();
    }

    String::from_utf8(bytes.clone()).ok()
}

/// Count the number of pages in a PDF file
///
/// This is a quick operation that reads the Count field from the Pages dictionary.
pub fn count_pages(path: &Path) -> Result<usize> {
    let bytes = std::fs::read(path)?;
    count_pages_in_memory(&bytes)
}

/// Count the number of pages in in-memory PDF bytes
pub fn count_pages_in_memory(bytes: &[u8]) -> Result<usize> {
    let doc = Document::load_mem(bytes)?;
    let page_count = count_pages_from_catalog(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf);
    }

    Ok(page_count)
}

/// Width and height in points of every page, in document order
pub fn page_sizes(bytes: &[u8]) -> Result<Vec<(f64, f64)>> {
    let doc = Document::load_mem(bytes)?;

    let mut sizes = Vec::new();
    for (_, page_id) in doc.get_pages() {
        let media_box = doc.get_object(page_id)?.as_dict()?.get(b"MediaBox")?.as_array()?;
        let coords: Vec<f64> = media_box.iter().filter_map(number).collect();
        if coords.len() != 4 {
            return Err(Error::General(format!(
                "Malformed MediaBox on page object {:?}",
                page_id
            )));
        }
        sizes.push((coords[2] - coords[0], coords[3] - coords[1]));
    }

    Ok(sizes)
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(n) => Some(*n as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
