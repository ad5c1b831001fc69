use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, RgbaImage};

use crate::constants::MAX_SURFACE_DIMENSION;
use crate::error::{CompositeError, CompositeResult};
use crate::image_loader::load_image_with_exif_rotation;
use crate::layout::fit_within_frame;
use crate::selector::ImagePair;

/// Encoded snapshot of one frame+photo pairing. Replaced wholesale every cycle.
///
/// `pixels` is the flattened surface that was encoded, kept so the shell can
/// upload it without decoding `jpeg` again.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
    pub pixels: RgbaImage,
}

/// Turns a chosen pair into a composite. The session only talks to this trait.
pub trait Compositor {
    fn compose(&mut self, pair: &ImagePair) -> CompositeResult<Composite>;
}

pub struct FrameCompositor {
    quality: u8,
}

impl FrameCompositor {
    pub fn new(quality: u8) -> Self {
        Self { quality: quality.clamp(1, 100) }
    }
}

impl Compositor for FrameCompositor {
    fn compose(&mut self, pair: &ImagePair) -> CompositeResult<Composite> {
        let loaded = load_pair(pair)?;
        render(&loaded, self.quality)
    }
}

/// Both source images, decoded and ready to draw.
pub struct LoadedPair {
    pub frame: RgbaImage,
    pub photo: RgbaImage,
}

/// Loads frame and photo; drawing starts only once both are decoded. There
/// is no timeout: a stalled read stalls the cycle.
pub fn load_pair(pair: &ImagePair) -> CompositeResult<LoadedPair> {
    let frame = load_image_with_exif_rotation(&pair.frame)?;
    let photo = load_image_with_exif_rotation(&pair.photo)?;
    Ok(LoadedPair {
        frame: frame.to_rgba8(),
        photo: photo.to_rgba8(),
    })
}

/// Draws the photo into its placement, then the frame on top at full size,
/// and encodes the surface as JPEG.
pub fn render(loaded: &LoadedPair, quality: u8) -> CompositeResult<Composite> {
    let (width, height) = loaded.frame.dimensions();
    if width == 0 || height == 0 || width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(CompositeError::SurfaceUnavailable { width, height });
    }

    let mut surface = RgbaImage::new(width, height);

    let (photo_width, photo_height) = loaded.photo.dimensions();
    let placement = fit_within_frame(width, height, photo_width, photo_height);
    let (x, y, box_width, box_height) = placement.to_pixels();
    log::debug!("placing {}x{} photo at {:?} in {}x{} frame", photo_width, photo_height, placement, width, height);

    if photo_width > 0 && photo_height > 0 {
        let scaled = imageops::resize(&loaded.photo, box_width, box_height, FilterType::Triangle);
        imageops::overlay(&mut surface, &scaled, x, y);
    }
    // Frame always on top of the photo.
    imageops::overlay(&mut surface, &loaded.frame, 0, 0);

    let rgb = DynamicImage::ImageRgba8(surface).to_rgb8();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(CompositeError::Encode)?;

    let pixels = DynamicImage::ImageRgb8(rgb).to_rgba8();
    Ok(Composite { width, height, jpeg, pixels })
}
