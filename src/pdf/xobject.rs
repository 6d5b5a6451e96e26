//! Decode slide images into PDF image XObjects

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::DynamicImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{Error, Result};
use crate::layout::Dpi;

/// PDF colour space of an image's colour samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRGB,
}

impl ColorSpace {
    fn name(&self) -> &'static [u8] {
        match self {
            ColorSpace::DeviceGray => b"DeviceGray",
            ColorSpace::DeviceRGB => b"DeviceRGB",
        }
    }

    /// Number of colour components per pixel
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }
}

/// Decoded image ready to be embedded in a PDF
///
/// Samples are 8 bits per component, rows top to bottom. Alpha, when present,
/// is kept apart so it can become a soft mask.
#[derive(Debug, Clone)]
pub struct PdfImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub samples: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
    /// Density recorded in the file, if any
    pub density: Option<Dpi>,
}

impl PdfImage {
    /// Split a decoded image into colour samples and an optional alpha channel
    ///
    /// Deeper images (16-bit, float) are reduced to 8 bits per component.
    /// An alpha channel that is fully opaque is dropped.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let color = img.color();

        let (color_space, samples, alpha) = match (color.has_color(), color.has_alpha()) {
            (false, false) => (ColorSpace::DeviceGray, img.into_luma8().into_raw(), None),
            (true, false) => (ColorSpace::DeviceRGB, img.into_rgb8().into_raw(), None),
            (false, true) => {
                let raw = img.into_luma_alpha8().into_raw();
                let (samples, alpha) = split_alpha(&raw, 1);
                (ColorSpace::DeviceGray, samples, Some(alpha))
            }
            (true, true) => {
                let raw = img.into_rgba8().into_raw();
                let (samples, alpha) = split_alpha(&raw, 3);
                (ColorSpace::DeviceRGB, samples, Some(alpha))
            }
        };

        let alpha = alpha.filter(|a| a.iter().any(|&v| v != u8::MAX));

        Self {
            width,
            height,
            color_space,
            samples,
            alpha,
            density: None,
        }
    }

    /// Add this image to `doc` as an image XObject
    ///
    /// The alpha channel, if any, is added first as a `DeviceGray` soft mask
    /// referenced from the image's `SMask` entry. Returns the image's id.
    pub fn add_to(self, doc: &mut Document) -> ObjectId {
        let smask = self.alpha.map(|alpha| {
            let dict = image_dict(self.width, self.height, ColorSpace::DeviceGray);
            doc.add_object(Stream::new(dict, alpha))
        });

        let mut dict = image_dict(self.width, self.height, self.color_space);
        if let Some(id) = smask {
            dict.set("SMask", Object::Reference(id));
        }
        doc.add_object(Stream::new(dict, self.samples))
    }
}

fn image_dict(width: u32, height: u32, color_space: ColorSpace) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.name().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

/// Split interleaved `components + 1` channel samples into colour and alpha
fn split_alpha(raw: &[u8], components: usize) -> (Vec<u8>, Vec<u8>) {
    let stride = components + 1;
    let pixels = raw.len() / stride;
    let mut samples = Vec::with_capacity(pixels * components);
    let mut alpha = Vec::with_capacity(pixels);

    for px in raw.chunks_exact(stride) {
        samples.extend_from_slice(&px[..components]);
        alpha.push(px[components]);
    }

    (samples, alpha)
}

/// Decode an image file, keeping any density it records
pub fn load_image(path: &Path) -> Result<PdfImage> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut pdf_image = PdfImage::from_dynamic(img);
    pdf_image.density = png_density(path);
    Ok(pdf_image)
}

/// Density from a PNG `pHYs` chunk
///
/// `None` for non-PNG files, files without `pHYs`, and chunks that only give
/// an aspect ratio (unit unspecified).
pub fn png_density(path: &Path) -> Option<Dpi> {
    let file = File::open(path).ok()?;
    let reader = png::Decoder::new(BufReader::new(file)).read_info().ok()?;
    let dims = reader.info().pixel_dims?;

    if !matches!(dims.unit, png::Unit::Meter) {
        return None;
    }
    let dpi = Dpi::from_pixels_per_meter(dims.xppu, dims.yppu);
    dpi.is_valid().then_some(dpi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::BufWriter;
    use tempfile::TempDir;

    fn write_png_with_phys(path: &Path, width: u32, height: u32, phys: png::PixelDimensions) {
        let file = File::create(path).unwrap();
        let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(phys));
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&vec![255; (width * height * 3) as usize])
            .unwrap();
    }

    fn stream(doc: &Document, id: ObjectId) -> &Stream {
        match doc.get_object(id).unwrap() {
            Object::Stream(stream) => stream,
            other => panic!("expected stream, got {:?}", other),
        }
    }

    #[test]
    fn test_rgb_image() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let pdf_image = PdfImage::from_dynamic(DynamicImage::ImageRgb8(img));

        assert_eq!(pdf_image.color_space, ColorSpace::DeviceRGB);
        assert_eq!(pdf_image.samples.len(), 3 * 2 * 3);
        assert_eq!(&pdf_image.samples[..3], &[10, 20, 30]);
        assert!(pdf_image.alpha.is_none());
    }

    #[test]
    fn test_gray_image_stays_gray() {
        let img = GrayImage::from_pixel(4, 4, Luma([128]));
        let pdf_image = PdfImage::from_dynamic(DynamicImage::ImageLuma8(img));

        assert_eq!(pdf_image.color_space, ColorSpace::DeviceGray);
        assert_eq!(pdf_image.color_space.components(), 1);
        assert_eq!(pdf_image.samples.len(), 16);
    }

    #[test]
    fn test_translucent_rgba_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        img.put_pixel(1, 1, Rgba([4, 5, 6, 0]));
        let pdf_image = PdfImage::from_dynamic(DynamicImage::ImageRgba8(img));

        assert_eq!(pdf_image.color_space, ColorSpace::DeviceRGB);
        assert_eq!(pdf_image.samples.len(), 12);
        assert_eq!(&pdf_image.samples[9..], &[4, 5, 6]);
        assert_eq!(pdf_image.alpha.as_deref(), Some(&[255, 255, 255, 0][..]));
    }

    #[test]
    fn test_opaque_alpha_dropped() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let pdf_image = PdfImage::from_dynamic(DynamicImage::ImageRgba8(img));

        assert!(pdf_image.alpha.is_none());
    }

    #[test]
    fn test_add_to_document() {
        let img = RgbImage::from_pixel(5, 7, Rgb([0, 0, 0]));
        let pdf_image = PdfImage::from_dynamic(DynamicImage::ImageRgb8(img));

        let mut doc = Document::with_version("1.5");
        let id = pdf_image.add_to(&mut doc);
        let image = stream(&doc, id);

        assert_eq!(image.dict.get(b"Width").unwrap().as_i64().unwrap(), 5);
        assert_eq!(image.dict.get(b"Height").unwrap().as_i64().unwrap(), 7);
        assert_eq!(image.dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceRGB");
        assert!(image.dict.get(b"SMask").is_err());
        assert_eq!(image.content.len(), 5 * 7 * 3);
    }

    #[test]
    fn test_add_to_document_with_soft_mask() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 100]));
        let pdf_image = PdfImage::from_dynamic(DynamicImage::ImageRgba8(img));

        let mut doc = Document::with_version("1.5");
        let id = pdf_image.add_to(&mut doc);

        let smask_id = stream(&doc, id).dict.get(b"SMask").unwrap().as_reference().unwrap();
        let smask = stream(&doc, smask_id);
        assert_eq!(smask.dict.get(b"ColorSpace").unwrap().as_name().unwrap(), b"DeviceGray");
        assert_eq!(smask.content, vec![100; 16]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_image(Path::new("nonexistent/slide_1.png"));
        assert!(matches!(result, Err(Error::Decode { .. })));
    }

    #[test]
    fn test_load_reads_png_density() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slide_1.png");
        write_png_with_phys(
            &path,
            8,
            4,
            png::PixelDimensions { xppu: 5669, yppu: 5669, unit: png::Unit::Meter },
        );

        let pdf_image = load_image(&path).unwrap();
        let density = pdf_image.density.expect("pHYs density should be read");
        assert!((density.x - 144.0).abs() < 0.01);
        assert!((density.y - 144.0).abs() < 0.01);
    }

    #[test]
    fn test_unspecified_unit_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slide_1.png");
        write_png_with_phys(
            &path,
            8,
            4,
            png::PixelDimensions { xppu: 2, yppu: 1, unit: png::Unit::Unspecified },
        );

        assert!(load_image(&path).unwrap().density.is_none());
    }

    #[test]
    fn test_no_phys_chunk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slide_1.png");
        RgbImage::from_pixel(3, 3, Rgb([1, 1, 1])).save(&path).unwrap();

        assert!(load_image(&path).unwrap().density.is_none());
    }
}
