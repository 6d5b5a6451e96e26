//! Page layout calculations

/// Pixel density assumed when an image carries none
pub const DEFAULT_DPI: f64 = 96.0;

/// Pixel density in pixels per inch, per axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dpi {
    pub x: f64,
    pub y: f64,
}

impl Dpi {
    /// Same density on both axes
    pub fn uniform(dpi: f64) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Density from pixels per meter, as stored in PNG `pHYs` chunks
    pub fn from_pixels_per_meter(x: u32, y: u32) -> Self {
        Self {
            x: x as f64 * 0.0254,
            y: y as f64 * 0.0254,
        }
    }

    /// Both axes finite and positive
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.x > 0.0 && self.y.is_finite() && self.y > 0.0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::uniform(DEFAULT_DPI)
    }
}

/// Simple length type in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Length(pub f64);

impl Length {
    /// Create a length from millimeters
    pub fn from_mm(mm: f64) -> Self {
        Length(mm)
    }

    /// Create a length from inches
    pub fn from_inches(inches: f64) -> Self {
        Length(inches * 25.4)
    }

    /// Create a length from points (1/72 inch)
    pub fn from_pt(pt: f64) -> Self {
        Length(pt * 25.4 / 72.0)
    }

    /// Length of `pixels` at `dpi` pixels per inch
    pub fn from_pixels(pixels: u32, dpi: f64) -> Self {
        Self::from_inches(pixels as f64 / dpi)
    }

    /// Get the value in millimeters
    pub fn mm(&self) -> f64 {
        self.0
    }

    /// Get the value in points (1/72 inch)
    pub fn pt(&self) -> f64 {
        self.0 * 72.0 / 25.4
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub width: Length,
    pub height: Length,
}

impl PageDimensions {
    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self {
            width: Length::from_mm(215.9),
            height: Length::from_mm(279.4),
        }
    }

    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self {
            width: Length::from_mm(210.0),
            height: Length::from_mm(297.0),
        }
    }

    /// Page exactly the size of an image at the given density
    pub fn from_pixels(width: u32, height: u32, dpi: Dpi) -> Self {
        Self {
            width: Length::from_pixels(width, dpi.x),
            height: Length::from_pixels(height, dpi.y),
        }
    }
}

/// Which page size slides are placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// Each page takes the size of its image
    #[default]
    Image,
    /// ISO A4, portrait
    A4,
    /// US Letter, portrait
    Letter,
}

/// Where an image is drawn on its page, in points from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Compute the page for an image and where the image sits on it
///
/// With [`PageSize::Image`] the image covers the whole page and `margin` is
/// ignored. Fixed page sizes scale the image to fit inside the margins,
/// keeping its aspect ratio, and center it.
pub fn place_image(
    pixel_width: u32,
    pixel_height: u32,
    dpi: Dpi,
    page_size: PageSize,
    margin: Length,
) -> (PageDimensions, Placement) {
    let natural = PageDimensions::from_pixels(pixel_width, pixel_height, dpi);

    let page = match page_size {
        PageSize::Image => {
            let placement = Placement {
                x: 0.0,
                y: 0.0,
                width: natural.width.pt(),
                height: natural.height.pt(),
            };
            return (natural, placement);
        }
        PageSize::A4 => PageDimensions::a4(),
        PageSize::Letter => PageDimensions::letter(),
    };

    let avail_w = (page.width.pt() - 2.0 * margin.pt()).max(0.0);
    let avail_h = (page.height.pt() - 2.0 * margin.pt()).max(0.0);
    let scale = (avail_w / natural.width.pt()).min(avail_h / natural.height.pt());

    let width = natural.width.pt() * scale;
    let height = natural.height.pt() * scale;
    let placement = Placement {
        x: (page.width.pt() - width) / 2.0,
        y: (page.height.pt() - height) / 2.0,
        width,
        height,
    };

    (page, placement)
}
