//! Letter/number mapping for the `a..z` alphabet.
//!
//! The two codecs number the alphabet differently and the offsets must stay
//! separate:
//! - Sum Codec: `a = 1 .. z = 26` ([`letter_to_ordinal`] / [`ordinal_to_letter`])
//! - Stream Codec: `a = 0 .. z = 25` ([`letter_to_index`] / [`index_to_letter`])
//!
//! A zero ordinal is never produced for a letter, which is what keeps every
//! Sum Codec output strictly positive.

/// Number of letters in the alphabet.
pub const ALPHABET_LEN: u8 = 26;

/// Maps a lowercase letter to its 1-based ordinal (`a = 1 .. z = 26`).
///
/// Callers pass normalized text only; anything else is a bug upstream.
pub fn letter_to_ordinal(letter: char) -> u8 {
    debug_assert!(letter.is_ascii_lowercase(), "not a normalized letter: {letter:?}");
    letter as u8 - b'a' + 1
}

/// Maps a 1-based ordinal back to its letter.
///
/// Returns `None` outside `1..=26`.
pub fn ordinal_to_letter(ordinal: i32) -> Option<char> {
    if (1..=i32::from(ALPHABET_LEN)).contains(&ordinal) {
        Some(char::from(b'a' + (ordinal as u8) - 1))
    } else {
        None
    }
}

/// Maps a lowercase letter to its 0-based index (`a = 0 .. z = 25`).
pub fn letter_to_index(letter: char) -> u8 {
    debug_assert!(letter.is_ascii_lowercase(), "not a normalized letter: {letter:?}");
    letter as u8 - b'a'
}

/// Maps a 0-based index to the character at that offset from `'a'`.
///
/// Indices `0..26` give `a..z`. Larger values land past `'z'` (`{`, `|`, ...)
/// and only appear when a stream is decoded with the wrong key or from a
/// modified image; they are rendered rather than rejected.
pub fn index_to_letter(index: u8) -> char {
    // 'a' + 255 is still a valid scalar value
    char::from_u32(u32::from(b'a') + u32::from(index)).unwrap_or(char::REPLACEMENT_CHARACTER)
}
