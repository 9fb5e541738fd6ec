//! Key seeds derived from key images.
//!
//! A key image is reduced to its decoded RGB pixel stream (raster order,
//! alpha and extra channels dropped) and hashed with SHA-256. The seed depends
//! only on pixel values, so the same picture saved as PNG or BMP, or under a
//! different name, gives the same seed.

use std::fmt;
use std::path::Path;

use image::{DynamicImage, GenericImageView};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::stego::StegoImageError;

/// Seed size in bytes.
pub const SEED_SIZE: usize = 32;

/// A 32-byte keystream seed. Zeroized on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeySeed([u8; SEED_SIZE]);

impl KeySeed {
    pub fn from_bytes(bytes: [u8; SEED_SIZE]) -> Self {
        Self(bytes)
    }

    /// SHA-256 of a flattened RGB pixel buffer.
    pub fn from_rgb_pixels(pixels: &[u8]) -> Self {
        let digest = Sha256::digest(pixels);
        let mut seed = [0u8; SEED_SIZE];
        seed.copy_from_slice(&digest);
        Self(seed)
    }

    /// Derives the seed from a decoded image.
    pub fn from_image(image: &DynamicImage) -> Self {
        let mut pixels = image.to_rgb8().into_raw();
        let seed = Self::from_rgb_pixels(&pixels);
        pixels.zeroize();
        seed
    }

    pub fn as_bytes(&self) -> &[u8; SEED_SIZE] {
        &self.0
    }

    /// Full seed as lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// First eight hex digits, for logs.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for KeySeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeySeed({}..)", self.fingerprint())
    }
}

/// Anything that can provide the seed for a keyed codec.
pub trait KeySource {
    /// Returns the seed. Called once per encode or decode.
    fn key_seed(&self) -> KeySeed;
}

impl KeySource for KeySeed {
    fn key_seed(&self) -> KeySeed {
        self.clone()
    }
}

impl<T: KeySource + ?Sized> KeySource for &T {
    fn key_seed(&self) -> KeySeed {
        (**self).key_seed()
    }
}

/// An image whose pixels seed the keystream.
pub struct KeyImage {
    image: DynamicImage,
}

impl KeyImage {
    /// Loads a key image from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StegoImageError> {
        let image =
            image::open(path).map_err(|e| StegoImageError::ImageLoadError(e.to_string()))?;
        Ok(Self { image })
    }

    /// Loads a key image from encoded bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StegoImageError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| StegoImageError::ImageLoadError(e.to_string()))?;
        Ok(Self { image })
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

impl KeySource for KeyImage {
    fn key_seed(&self) -> KeySeed {
        KeySeed::from_image(&self.image)
    }
}
