//! Key-less sum transform.
//!
//! For letter numbers `n0..n8` (1-based), output value `k` is the group
//! total minus `n[8 - k]`. Each value leaves out exactly one term, so it lies
//! in `8..=208` and always fits a byte. This is why groups hold nine letters.
//!
//! Inverting: every letter is included in eight of the nine values, so the
//! sum of all values is eight times the group total. A sum that is not a
//! multiple of eight can only come from modified pixels and is reported.

use crate::text::{letter_to_ordinal, ordinal_to_letter, LetterGroup, NormalizedText};
use crate::GROUP_SIZE;

use super::{CodecError, Corruption, EncodedGroup};

/// Smallest value the sum transform produces.
pub const MIN_VALUE: u8 = 8;

/// Largest value the sum transform produces.
pub const MAX_VALUE: u8 = 208;

/// Encodes one group of nine letters.
pub fn encode_group(group: &LetterGroup) -> EncodedGroup {
    let mut numbers = [0u16; GROUP_SIZE];
    for (slot, letter) in numbers.iter_mut().zip(group.letters()) {
        *slot = u16::from(letter_to_ordinal(letter));
    }
    let total: u16 = numbers.iter().sum();

    let mut values = [0u8; GROUP_SIZE];
    for (k, value) in values.iter_mut().enumerate() {
        // at most 8 * 26 = 208
        *value = (total - numbers[GROUP_SIZE - 1 - k]) as u8;
    }
    EncodedGroup::new(values)
}

/// Inverts [`encode_group`].
///
/// Fails with [`CodecError::CorruptEncoding`] if the values do not sum to a
/// multiple of eight or a recovered letter number falls outside `1..=26`.
pub fn decode_group(group: &EncodedGroup) -> Result<LetterGroup, CodecError> {
    let values = group.values();
    let sum: u32 = values.iter().map(|&v| u32::from(v)).sum();
    if sum % 8 != 0 {
        return Err(CodecError::CorruptEncoding(Corruption::IndivisibleTotal(sum)));
    }
    let total = (sum / 8) as i32;

    let mut letters = ['a'; GROUP_SIZE];
    for (position, letter) in letters.iter_mut().enumerate() {
        let value = total - i32::from(values[GROUP_SIZE - 1 - position]);
        *letter = ordinal_to_letter(value).ok_or(CodecError::CorruptEncoding(
            Corruption::LetterOutOfRange { position, value },
        ))?;
    }
    Ok(LetterGroup::from_letters(letters))
}

/// Encodes a whole normalized text, one group at a time.
pub fn encode_text(text: &NormalizedText) -> Vec<EncodedGroup> {
    text.groups().map(|group| encode_group(&group)).collect()
}
