//! Message decoding from encoded images.
//!
//! This module orchestrates the decoding process:
//! 1. Extract groups from pixels (explicit count, or the all-zero sentinel
//!    for the key-less scheme)
//! 2. Invert the transform (sum, or keystream XOR with the same key image)
//! 3. Remove padding (exact with the original length, heuristic without)
//!
//! Unlike the encoder's inputs, a decoded image may have been modified.
//! The sum scheme detects most modifications; the stream scheme detects
//! nothing and a wrong key simply yields a different string.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::codec::{sum, CodecError, Scheme, StreamCodec};
use crate::crypto::KeySource;
use crate::stego::{read_groups, Extent, LayoutError};
use crate::text::strip_padding;

/// Errors that can occur during decoding.
#[derive(Error, Debug)]
pub enum DecoderError {
    #[error("Missing key image: the stream scheme needs a key")]
    MissingKeyImage,

    #[error("Missing group count: the stream scheme has no end-of-data marker; give the group count or original length")]
    MissingGroupCount,

    #[error("Group {group} could not be decoded: {source}")]
    CorruptGroup {
        group: usize,
        #[source]
        source: CodecError,
    },

    #[error("Layout error: {0}")]
    LayoutError(#[from] LayoutError),
}

/// Everything the decoder needs besides the images.
///
/// Returned by the encoder; serializable so callers can store it next to
/// the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeParams {
    pub scheme: Scheme,
    /// Groups written. Required for the stream scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_count: Option<usize>,
    /// Letters before padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_length: Option<usize>,
}

/// Result of decoding an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedMessage {
    /// The message with padding removed.
    pub message: String,
    /// Everything decoded, padding included.
    pub full: String,
    /// The padding that was removed.
    pub removed_padding: String,
    /// Groups read from the image.
    pub group_count: usize,
}

/// Configuration for the decoder.
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Transform the image was encoded with.
    pub scheme: Scheme,
    /// Groups to read. `None` uses the all-zero sentinel (sum scheme only).
    pub group_count: Option<usize>,
    /// Letters to keep. `None` strips trailing `x` instead.
    pub original_length: Option<usize>,
    /// Log stage summaries at info level instead of debug.
    pub verbose: bool,
}

impl From<DecodeParams> for DecoderConfig {
    fn from(params: DecodeParams) -> Self {
        Self {
            scheme: params.scheme,
            group_count: params.group_count,
            original_length: params.original_length,
            verbose: false,
        }
    }
}

/// Decodes a sum-scheme image.
///
/// With `original_length` the group count follows from it. Without it,
/// groups are read up to the all-zero sentinel, which only exists on a
/// black canvas; a carrier's own pixels never form one.
pub fn decode(
    image: &DynamicImage,
    original_length: Option<usize>,
) -> Result<DecodedMessage, DecoderError> {
    let config = DecoderConfig {
        original_length,
        ..DecoderConfig::default()
    };
    decode_with_config(image, None, &config)
}

/// Decodes a stream-scheme image with the key it was encoded with.
pub fn decode_keyed(
    image: &DynamicImage,
    key: &dyn KeySource,
    group_count: usize,
    original_length: Option<usize>,
) -> Result<DecodedMessage, DecoderError> {
    let config = DecoderConfig {
        scheme: Scheme::Stream,
        group_count: Some(group_count),
        original_length,
        verbose: false,
    };
    decode_with_config(image, Some(key), &config)
}

/// Decodes an image with custom configuration.
///
/// `key` is required for [`Scheme::Stream`] and ignored for [`Scheme::Sum`].
/// Groups are read by `group_count`, else by `original_length` rounded up to
/// whole groups, else (sum scheme only) up to the all-zero sentinel.
pub fn decode_with_config(
    image: &DynamicImage,
    key: Option<&dyn KeySource>,
    config: &DecoderConfig,
) -> Result<DecodedMessage, DecoderError> {
    if config.scheme.is_keyed() {
        if key.is_none() {
            return Err(DecoderError::MissingKeyImage);
        }
        if config.group_count.is_none() && config.original_length.is_none() {
            return Err(DecoderError::MissingGroupCount);
        }
    }

    // Step 1: Extract groups
    let extent = extent_for(config);
    let groups = read_groups(&image.to_rgb8(), extent)?;

    // Step 2: Invert the transform
    let full = match config.scheme {
        Scheme::Stream => {
            let key = key.ok_or(DecoderError::MissingKeyImage)?;
            StreamCodec::new(key).decode(&groups)
        }
        Scheme::Sum => {
            let mut text = String::with_capacity(groups.len() * crate::GROUP_SIZE);
            for (index, group) in groups.iter().enumerate() {
                let letters = sum::decode_group(group).map_err(|source| {
                    DecoderError::CorruptGroup {
                        group: index,
                        source,
                    }
                })?;
                text.extend(letters.letters());
            }
            text
        }
    };

    // Step 3: Remove padding
    if config.original_length.is_none() {
        debug!("no original length given, stripping trailing padding letters");
    }
    let unpadded = strip_padding(&full, config.original_length);

    if config.verbose {
        info!(
            scheme = %config.scheme,
            groups = groups.len(),
            letters = unpadded.message.chars().count(),
            removed = unpadded.removed.len(),
            "message decoded"
        );
    } else {
        debug!(
            scheme = %config.scheme,
            groups = groups.len(),
            letters = unpadded.message.chars().count(),
            "message decoded"
        );
    }

    Ok(DecodedMessage {
        message: unpadded.message,
        full,
        removed_padding: unpadded.removed,
        group_count: groups.len(),
    })
}

fn extent_for(config: &DecoderConfig) -> Extent {
    match (config.group_count, config.original_length) {
        (Some(count), _) => Extent::Count(count),
        (None, Some(length)) => Extent::Count(length.div_ceil(crate::GROUP_SIZE)),
        (None, None) => Extent::Sentinel,
    }
}
