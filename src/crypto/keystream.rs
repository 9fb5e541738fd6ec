//! Counter-mode keystream expansion.
//!
//! Block `n` is `HMAC-SHA256(key = seed, message = n as big-endian u32)`.
//! Blocks are concatenated in counter order and cut to the requested length.
//! The stream is a pure function of the seed, so decoding regenerates it
//! exactly.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use super::seed::KeySeed;

type HmacSha256 = Hmac<Sha256>;

/// Bytes produced per counter value.
pub const BLOCK_SIZE: usize = 32;

/// Lazy keystream. Yields bytes one at a time, computing one HMAC block per
/// 32 bytes consumed.
///
/// The counter is 32 bits wide, so the stream ends after `2^32` blocks.
#[derive(Clone)]
pub struct Keystream {
    mac: HmacSha256,
    counter: Option<u32>,
    block: [u8; BLOCK_SIZE],
    offset: usize,
}

impl Keystream {
    pub fn new(seed: &KeySeed) -> Self {
        let mac = HmacSha256::new_from_slice(seed.as_bytes())
            .expect("HMAC accepts any key length");
        Self {
            mac,
            counter: Some(0),
            block: [0u8; BLOCK_SIZE],
            offset: BLOCK_SIZE,
        }
    }

    /// Generates exactly `length` bytes.
    pub fn generate(seed: &KeySeed, length: usize) -> Vec<u8> {
        Self::new(seed).take(length).collect()
    }

    fn refill(&mut self) -> bool {
        let Some(counter) = self.counter else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(&counter.to_be_bytes());
        self.block.copy_from_slice(&mac.finalize().into_bytes());
        self.offset = 0;
        self.counter = counter.checked_add(1);
        true
    }
}

impl Iterator for Keystream {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.offset == BLOCK_SIZE && !self.refill() {
            return None;
        }
        let byte = self.block[self.offset];
        self.offset += 1;
        Some(byte)
    }
}

impl Drop for Keystream {
    fn drop(&mut self) {
        self.block.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> KeySeed {
        KeySeed::from_bytes([byte; 32])
    }

    fn block(seed: &KeySeed, counter: u32) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(seed.as_bytes()).unwrap();
        mac.update(&counter.to_be_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    #[test]
    fn test_exact_length() {
        for len in [0, 1, 31, 32, 33, 64, 100, 1000] {
            assert_eq!(Keystream::generate(&seed(1), len).len(), len);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = Keystream::generate(&seed(7), 333);
        let b = Keystream::generate(&seed(7), 333);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blocks_in_counter_order() {
        let s = seed(9);
        let stream = Keystream::generate(&s, 70);

        let mut expected = block(&s, 0);
        expected.extend(block(&s, 1));
        expected.extend(block(&s, 2));
        expected.truncate(70);

        assert_eq!(stream, expected);
    }

    #[test]
    fn test_prefix_stable() {
        let s = seed(3);
        let short = Keystream::generate(&s, 40);
        let long = Keystream::generate(&s, 400);
        assert_eq!(short, long[..40]);
    }

    #[test]
    fn test_seed_changes_stream() {
        assert_ne!(
            Keystream::generate(&seed(1), 64),
            Keystream::generate(&seed(2), 64)
        );
    }

    #[test]
    fn test_lazy_matches_eager() {
        let s = seed(5);
        let lazy: Vec<u8> = Keystream::new(&s).skip(10).take(50).collect();
        let eager = Keystream::generate(&s, 60);
        assert_eq!(lazy, eager[10..]);
    }
}
