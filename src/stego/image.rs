//! Image loading and saving for carriers and encoded images.
//!
//! Any format the `image` crate decodes can be read. Encoded output must be
//! saved losslessly (PNG or BMP); a lossy format destroys the hidden bytes.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb};
use thiserror::Error;

use super::layout;

/// Side of one checkerboard cell in [`StegoImage::test_pattern`].
const PATTERN_CELL: u32 = 20;

/// Errors that can occur while reading or writing images.
#[derive(Error, Debug)]
pub enum StegoImageError {
    #[error("Image load error: {0}")]
    ImageLoadError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),
}

/// A carrier or encoded image.
#[derive(Debug, Clone)]
pub struct StegoImage {
    image: DynamicImage,
}

impl StegoImage {
    /// Loads an image from a file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoImageError> {
        let image =
            image::open(path).map_err(|e| StegoImageError::ImageLoadError(e.to_string()))?;
        Ok(Self { image })
    }

    /// Loads an image from encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoImageError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| StegoImageError::ImageLoadError(e.to_string()))?;
        Ok(Self { image })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Checkerboard test carrier with 20px cells.
    ///
    /// Even cells run red along x and green along y over a fixed blue; odd
    /// cells hold red fixed and shift the gradients to green and blue.
    pub fn test_pattern(width: u32, height: u32) -> Self {
        let (w, h) = (width.max(1), height.max(1));
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let gx = (x * 255 / w) as u8;
            let gy = (y * 255 / h) as u8;
            if (x / PATTERN_CELL + y / PATTERN_CELL) % 2 == 0 {
                Rgb([gx, gy, 128])
            } else {
                Rgb([128, gx, gy])
            }
        });
        Self {
            image: DynamicImage::ImageRgb8(img),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Number of groups this image can hold without resizing.
    pub fn group_capacity(&self) -> usize {
        let (width, height) = self.dimensions();
        layout::capacity(width, height)
    }

    /// Saves the image; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StegoImageError> {
        self.image
            .save(path)
            .map_err(|e| StegoImageError::ImageSaveError(e.to_string()))
    }

    /// Returns the image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, StegoImageError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| StegoImageError::ImageSaveError(e.to_string()))?;
        Ok(bytes)
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

impl From<DynamicImage> for StegoImage {
    fn from(image: DynamicImage) -> Self {
        Self::from_image(image)
    }
}
