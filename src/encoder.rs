//! Message encoding into carrier images.
//!
//! This module orchestrates the encoding process:
//! 1. Normalize the message to `a..z` and pad with `x` to whole groups
//! 2. Transform each group (sum, or keystream XOR for the keyed scheme)
//! 3. Prepare the canvas (carrier, stretched carrier, or black image)
//! 4. Write group `g` into row `g / 3`, channel `g % 3`, columns `0..9`
//! 5. Return the image plus the parameters needed to decode it

use image::DynamicImage;
use thiserror::Error;
use tracing::{debug, info};

use crate::codec::{sum, Scheme, StreamCodec};
use crate::crypto::KeySource;
use crate::decoder::DecodeParams;
use crate::stego::{prepare_canvas, write_groups, LayoutError, ResizeFilter, StegoImage};
use crate::text::NormalizedText;

/// Errors that can occur during encoding.
#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Missing key image: the stream scheme needs a key")]
    MissingKeyImage,

    #[error("Layout error: {0}")]
    LayoutError(#[from] LayoutError),
}

/// Result of encoding a message.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// The image holding the message. Save it losslessly.
    pub image: StegoImage,
    /// What the decoder needs: scheme, group count and original length.
    pub params: DecodeParams,
    /// The normalized, padded text that was encoded.
    pub normalized: NormalizedText,
}

/// Configuration for the encoder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Transform to apply.
    pub scheme: Scheme,
    /// Whether an undersized carrier may be stretched to fit.
    pub resize: bool,
    /// Interpolation used when stretching.
    pub filter: ResizeFilter,
    /// Log stage summaries at info level instead of debug.
    pub verbose: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Sum,
            resize: true,
            filter: ResizeFilter::default(),
            verbose: false,
        }
    }
}

impl EncoderConfig {
    /// Keyed configuration with the remaining defaults.
    pub fn keyed() -> Self {
        Self {
            scheme: Scheme::Stream,
            ..Self::default()
        }
    }
}

/// Encodes a message with the key-less sum scheme.
///
/// # Arguments
/// * `message` - Any text; only its ASCII letters are kept
/// * `carrier` - Image to write into, or `None` for a black canvas
pub fn encode(message: &str, carrier: Option<&DynamicImage>) -> Result<EncodedImage, EncoderError> {
    encode_with_config(message, carrier, None, &EncoderConfig::default())
}

/// Encodes a message with the keyed stream scheme.
pub fn encode_keyed(
    message: &str,
    key: &dyn KeySource,
    carrier: Option<&DynamicImage>,
) -> Result<EncodedImage, EncoderError> {
    encode_with_config(message, carrier, Some(key), &EncoderConfig::keyed())
}

/// Encodes a message with custom configuration.
///
/// `key` is required for [`Scheme::Stream`] and ignored for [`Scheme::Sum`].
pub fn encode_with_config(
    message: &str,
    carrier: Option<&DynamicImage>,
    key: Option<&dyn KeySource>,
    config: &EncoderConfig,
) -> Result<EncodedImage, EncoderError> {
    // Step 1: Normalize
    let text = NormalizedText::new(message);
    if config.verbose {
        info!(
            letters = text.original_len(),
            padding = text.padding_len(),
            groups = text.group_count(),
            "normalized message"
        );
    } else {
        debug!(
            letters = text.original_len(),
            padding = text.padding_len(),
            groups = text.group_count(),
            "normalized message"
        );
    }

    // Step 2: Transform groups
    let groups = match config.scheme {
        Scheme::Sum => sum::encode_text(&text),
        Scheme::Stream => {
            let key = key.ok_or(EncoderError::MissingKeyImage)?;
            StreamCodec::new(key).encode(&text)
        }
    };

    // Step 3: Canvas
    let resize = config.resize.then_some(config.filter);
    let mut canvas = prepare_canvas(carrier, groups.len(), resize)?;

    // Step 4: Place groups
    write_groups(&mut canvas, &groups)?;

    if config.verbose {
        info!(
            scheme = %config.scheme,
            groups = groups.len(),
            width = canvas.width(),
            height = canvas.height(),
            "message encoded"
        );
    }

    Ok(EncodedImage {
        image: StegoImage::from_image(DynamicImage::ImageRgb8(canvas)),
        params: DecodeParams {
            scheme: config.scheme,
            group_count: Some(groups.len()),
            original_length: Some(text.original_len()),
        },
        normalized: text,
    })
}
