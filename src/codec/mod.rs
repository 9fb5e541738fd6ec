//! Group transforms.
//!
//! Two invertible encodings map nine letters to nine byte values:
//! - [`sum`]: key-less, each value is the group total minus one letter
//! - [`stream`]: keyed, each letter is XORed with a keystream byte reduced mod 26

pub mod stream;
pub mod sum;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GROUP_SIZE;

pub use stream::StreamCodec;
pub use sum::{decode_group, encode_group, encode_text};

/// Errors raised by the group transforms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Invalid group length: expected 9, got {0}")]
    InvalidGroupLength(usize),

    #[error("Invalid letter {0:?}: groups hold lowercase a-z only")]
    InvalidLetter(char),

    #[error("Corrupt encoding: {0}")]
    CorruptEncoding(Corruption),
}

/// Why an encoded group could not be inverted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    #[error("group total {0} is not divisible by 8")]
    IndivisibleTotal(u32),

    #[error("letter number {value} at position {position} is outside 1..=26")]
    LetterOutOfRange { position: usize, value: i32 },
}

/// Which transform a message was encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Key-less sum transform.
    #[default]
    Sum,
    /// Keystream XOR transform keyed by a key image.
    Stream,
}

impl Scheme {
    pub fn is_keyed(self) -> bool {
        matches!(self, Scheme::Stream)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Sum => f.write_str("sum"),
            Scheme::Stream => f.write_str("stream"),
        }
    }
}

impl FromStr for Scheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(Scheme::Sum),
            "stream" => Ok(Scheme::Stream),
            other => Err(format!("unknown scheme '{other}' (expected 'sum' or 'stream')")),
        }
    }
}

/// Nine byte values produced from one letter group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedGroup([u8; GROUP_SIZE]);

impl EncodedGroup {
    pub fn new(values: [u8; GROUP_SIZE]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u8; GROUP_SIZE] {
        &self.0
    }

    /// True when every value is zero (the unkeyed end-of-data sentinel).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }
}

impl TryFrom<&[u8]> for EncodedGroup {
    type Error = CodecError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let values: [u8; GROUP_SIZE] = value
            .try_into()
            .map_err(|_| CodecError::InvalidGroupLength(value.len()))?;
        Ok(Self(values))
    }
}
