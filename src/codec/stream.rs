//! Keyed XOR transform.
//!
//! Letter `i` (0-based, `a = 0`) becomes `p_i ^ (k_i % 26)` where `k_i` is
//! byte `i` of the keystream derived from the key. Both operands fit in five
//! bits, so outputs stay in `0..=31`. XOR is its own inverse, so decoding with
//! the same keystream recovers every letter exactly.
//!
//! There is no integrity check. A wrong key yields a different, mostly
//! non-alphabetic string rather than an error.

use tracing::debug;

use crate::crypto::{KeySource, Keystream};
use crate::text::{index_to_letter, letter_to_index, NormalizedText};
use crate::GROUP_SIZE;

use super::EncodedGroup;

/// Largest value the stream transform produces.
pub const MAX_VALUE: u8 = 31;

const ALPHABET: u8 = 26;

/// Stream codec bound to one key source.
pub struct StreamCodec<K> {
    key: K,
}

impl<K: KeySource> StreamCodec<K> {
    pub fn new(key: K) -> Self {
        Self { key }
    }

    /// Encodes a normalized text into groups of nine cipher values.
    ///
    /// The keystream is derived once per call and consumed lazily.
    pub fn encode(&self, text: &NormalizedText) -> Vec<EncodedGroup> {
        let seed = self.key.key_seed();
        debug!(seed = %seed.fingerprint(), letters = text.len(), "encoding with keystream");

        let cipher: Vec<u8> = text
            .as_str()
            .chars()
            .zip(Keystream::new(&seed))
            .map(|(letter, k)| letter_to_index(letter) ^ (k % ALPHABET))
            .collect();

        cipher
            .chunks_exact(GROUP_SIZE)
            .map(|chunk| {
                let mut values = [0u8; GROUP_SIZE];
                values.copy_from_slice(chunk);
                EncodedGroup::new(values)
            })
            .collect()
    }

    /// Decodes cipher groups back to text, padding included.
    ///
    /// Never fails: values recovered outside `0..26` are rendered as the
    /// characters past `'z'`.
    pub fn decode(&self, groups: &[EncodedGroup]) -> String {
        let seed = self.key.key_seed();
        debug!(seed = %seed.fingerprint(), groups = groups.len(), "decoding with keystream");

        groups
            .iter()
            .flat_map(|group| group.values().iter().copied())
            .zip(Keystream::new(&seed))
            .map(|(c, k)| index_to_letter(c ^ (k % ALPHABET)))
            .collect()
    }
}
