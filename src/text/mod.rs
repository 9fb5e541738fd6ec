//! Text processing for the group codecs.
//!
//! This module provides:
//! - Alphabet normalization and padding to whole groups
//! - Letter/number mappings for both codecs
//! - Padding removal after decoding

pub mod alphabet;
pub mod normalize;

pub use alphabet::{index_to_letter, letter_to_index, letter_to_ordinal, ordinal_to_letter};
pub use normalize::{strip_padding, LetterGroup, NormalizedText, Unpadded};
