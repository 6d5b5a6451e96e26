//! PDF encoding and inspection

pub mod encode;
pub mod metadata;
pub mod xobject;

// Re-export commonly used items
pub use encode::{images_to_pdf, pdf_date, EncodeOptions};
pub use metadata::{count_pages, count_pages_in_memory, extract_metadata, page_sizes, PdfMetadata};
pub use xobject::{load_image, ColorSpace, PdfImage};
