//! Alphabet normalization, grouping and pad removal.
//!
//! Every message is reduced to lowercase `a..z`, then right-padded with
//! [`PAD_CHAR`] to a multiple of [`GROUP_SIZE`]. The pre-pad length is kept
//! alongside the text because padding cannot be told apart from a message
//! that really ends in `x`.

use std::fmt;

use tracing::warn;

use crate::codec::CodecError;
use crate::{GROUP_SIZE, PAD_CHAR};

/// Lowercase letters only, length a multiple of [`GROUP_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    text: String,
    original_len: usize,
}

impl NormalizedText {
    /// Normalizes arbitrary input.
    ///
    /// Non-letters are dropped, letters lowercased, and the result padded with
    /// `x`. Empty input (or input without letters) gives an empty text with
    /// zero groups.
    pub fn new(input: &str) -> Self {
        let mut text: String = input
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let original_len = text.len();

        let remainder = original_len % GROUP_SIZE;
        if remainder != 0 {
            text.extend(std::iter::repeat(PAD_CHAR).take(GROUP_SIZE - remainder));
        }

        Self { text, original_len }
    }

    /// The padded text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Letter count before padding. Needed later to truncate exactly.
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Padded length.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of pad letters appended.
    pub fn padding_len(&self) -> usize {
        self.text.len() - self.original_len
    }

    pub fn group_count(&self) -> usize {
        self.text.len() / GROUP_SIZE
    }

    /// Splits the text into consecutive groups of nine letters.
    pub fn groups(&self) -> impl Iterator<Item = LetterGroup> + '_ {
        self.text.as_bytes().chunks_exact(GROUP_SIZE).map(|chunk| {
            let mut letters = [0u8; GROUP_SIZE];
            letters.copy_from_slice(chunk);
            LetterGroup(letters)
        })
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Exactly nine lowercase letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LetterGroup([u8; GROUP_SIZE]);

impl LetterGroup {
    /// Letters in order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }

    /// Builds a group from letters already known to be in `a..z`.
    pub(crate) fn from_letters(letters: [char; GROUP_SIZE]) -> Self {
        Self(letters.map(|c| c as u8))
    }
}

impl TryFrom<&str> for LetterGroup {
    type Error = CodecError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let count = value.chars().count();
        if count != GROUP_SIZE {
            return Err(CodecError::InvalidGroupLength(count));
        }
        if let Some(bad) = value.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(CodecError::InvalidLetter(bad));
        }

        let mut letters = [0u8; GROUP_SIZE];
        letters.copy_from_slice(value.as_bytes());
        Ok(Self(letters))
    }
}

impl fmt::Display for LetterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letters().try_for_each(|c| fmt::Write::write_char(f, c))
    }
}

/// A decoded text split into the message and the padding that was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unpadded {
    pub message: String,
    pub removed: String,
}

/// Removes padding from a decoded text.
///
/// With a known `original_length` (in characters) the text is truncated
/// exactly. Without one, or when it is longer than the text, trailing `x`
/// letters are stripped instead. That fallback is best-effort: a message that
/// really ends in `x` loses those letters.
pub fn strip_padding(decoded: &str, original_length: Option<usize>) -> Unpadded {
    let total = decoded.chars().count();

    let keep = match original_length {
        Some(len) if len <= total => len,
        Some(len) => {
            warn!(
                original_length = len,
                decoded_length = total,
                "original length exceeds decoded text, stripping trailing padding instead"
            );
            decoded.trim_end_matches(PAD_CHAR).chars().count()
        }
        None => decoded.trim_end_matches(PAD_CHAR).chars().count(),
    };

    let split_at = decoded
        .char_indices()
        .nth(keep)
        .map_or(decoded.len(), |(idx, _)| idx);
    let (message, removed) = decoded.split_at(split_at);

    Unpadded {
        message: message.to_string(),
        removed: removed.to_string(),
    }
}
