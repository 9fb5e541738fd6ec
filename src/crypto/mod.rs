//! Key material for the keyed codec.
//!
//! This module provides:
//! - Seed derivation from a key image's pixels (SHA-256)
//! - Keystream expansion from a seed (HMAC-SHA256 in counter mode)
//! - The [`KeySource`] capability the Stream Codec is built on

pub mod keystream;
pub mod seed;

pub use keystream::Keystream;
pub use seed::{KeyImage, KeySeed, KeySource, SEED_SIZE};
