//! Assemble slide images into a multi-page PDF using lopdf

use std::io::Cursor;
use std::path::Path;

use chrono::NaiveDateTime;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::error::{Error, Result};
use crate::layout::{place_image, Dpi, Length, PageSize};
use crate::pdf::xobject::{load_image, PdfImage};

/// Resource name every page uses for its slide image
const IMAGE_NAME: &[u8] = b"Im0";

/// Options for encoding images into a PDF
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Pixels per inch used to size pages from image pixels
    ///
    /// `None` uses each image's own density, falling back to 96.
    pub dpi: Option<f64>,
    /// Page size images are placed on
    pub page_size: PageSize,
    /// Margin around the image on fixed page sizes
    pub margin: Length,
    /// Document title for the Info dictionary
    pub title: Option<String>,
    /// Creation date for the Info dictionary
    pub creation_date: Option<NaiveDateTime>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            dpi: None,
            page_size: PageSize::Image,
            margin: Length::default(),
            title: None,
            creation_date: None,
        }
    }
}

/// Encode an ordered list of images into PDF bytes
///
/// Produces one page per image, in the given order. Streams are
/// Flate-compressed.
///
/// # Example
///
/// ```no_run
/// use slides_to_pdf::pdf::{images_to_pdf, EncodeOptions};
///
/// let bytes = images_to_pdf(
///     &["deck/slide_01.png", "deck/slide_02.png"],
///     &EncodeOptions::default(),
/// ).expect("Failed to encode");
/// std::fs::write("deck.pdf", bytes).unwrap();
/// ```
pub fn images_to_pdf<P: AsRef<Path>>(paths: &[P], options: &EncodeOptions) -> Result<Vec<u8>> {
    if paths.is_empty() {
        return Err(Error::NoInputImages);
    }
    if let Some(dpi) = options.dpi {
        if !Dpi::uniform(dpi).is_valid() {
            return Err(Error::InvalidOption(format!(
                "DPI must be a positive number, got {}",
                dpi
            )));
        }
    }
    if !options.margin.mm().is_finite() || options.margin.mm() < 0.0 {
        return Err(Error::InvalidOption(format!(
            "Margin must not be negative, got {} mm",
            options.margin.mm()
        )));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(paths.len());
    for path in paths {
        let image = load_image(path.as_ref())?;
        let page_id = add_image_page(&mut doc, pages_id, image, options)?;
        kids.push(Object::Reference(page_id));
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set("Count", Object::Integer(kids.len() as i64));
    pages.set("Kids", Object::Array(kids));
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(info_dictionary(options));
    doc.trailer.set("Info", Object::Reference(info_id));

    doc.compress();

    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)?;
    Ok(output.into_inner())
}

/// Add one page showing `image` and return the page's id
fn add_image_page(
    doc: &mut Document,
    pages_id: ObjectId,
    image: PdfImage,
    options: &EncodeOptions,
) -> Result<ObjectId> {
    let dpi = options
        .dpi
        .map(Dpi::uniform)
        .or(image.density)
        .unwrap_or_default();
    let (page, placement) = place_image(
        image.width,
        image.height,
        dpi,
        options.page_size,
        options.margin,
    );
    let image_id = image.add_to(doc);

    // Image space is the unit square, so scale it to the placement rectangle
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    real(placement.width),
                    real(0.0),
                    real(0.0),
                    real(placement.height),
                    real(placement.x),
                    real(placement.y),
                ],
            ),
            Operation::new("Do", vec![Object::Name(IMAGE_NAME.to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));

    let mut xobjects = Dictionary::new();
    xobjects.set(IMAGE_NAME, Object::Reference(image_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            real(0.0),
            real(0.0),
            real(page.width.pt()),
            real(page.height.pt()),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(doc.add_object(page_dict))
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn info_dictionary(options: &EncodeOptions) -> Dictionary {
    let mut info = Dictionary::new();
    info.set(
        "Producer",
        Object::string_literal(format!("slides-to-pdf {}", env!("CARGO_PKG_VERSION"))),
    );
    if let Some(title) = &options.title {
        info.set("Title", text_string(title));
    }
    if let Some(date) = &options.creation_date {
        info.set("CreationDate", Object::string_literal(pdf_date(date)));
    }
    info
}

/// Format a timestamp as a PDF date string (`D:YYYYMMDDHHmmSS`)
pub fn pdf_date(date: &NaiveDateTime) -> String {
    date.format("D:%Y%m%d%H%M%S").to_string()
}

/// PDF text string: ASCII as a literal, anything else as UTF-16BE with a BOM
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
