//! # Ninefold - letters in nine-pixel rows
//!
//! Ninefold hides short alphabetic messages in the pixel data of carrier
//! images. Messages are cut into groups of nine letters, each group becomes
//! nine byte values, and each group is written into one color channel of the
//! first nine pixels of an image row.
//!
//! ## Schemes
//!
//! - **Sum** (no key): value `k` of a group is the sum of all nine letter
//!   numbers except letter `8 - k`. Values stay in `8..=208`. Decoding divides
//!   the total by eight and subtracts; a total that is not a multiple of
//!   eight is reported as corruption.
//! - **Stream** (keyed): a second "key image" is hashed (SHA-256 of its RGB
//!   pixels) into a seed, the seed is expanded with HMAC-SHA256 in counter
//!   mode, and each letter is XORed with a keystream byte reduced mod 26.
//!   Values stay in `0..=31`. A wrong key is not detected; it decodes to a
//!   different string.
//!
//! ## Layout
//!
//! Group `g` lives in row `g / 3`, channel `g % 3` (R, G, B), columns `0..9`.
//! Other channels and columns keep the carrier's pixels. Without a carrier
//! a black 9-pixel-wide image is used; a carrier that is too small is
//! stretched.
//!
//! ## Example Usage
//!
//! ```rust
//! use ninefold::crypto::KeySeed;
//! use ninefold::{decode, decode_keyed, encode, encode_keyed};
//!
//! // Key-less: the decoder finds the end by itself
//! let encoded = encode("Hello, World!", None).unwrap();
//! let decoded = decode(encoded.image.image(), encoded.params.original_length).unwrap();
//! assert_eq!(decoded.message, "helloworld");
//!
//! // Keyed: the decoder needs the same key and the group count
//! let key = KeySeed::from_bytes([7; 32]);
//! let encoded = encode_keyed("Meet at noon", &key, None).unwrap();
//! let groups = encoded.params.group_count.unwrap();
//! let decoded = decode_keyed(encoded.image.image(), &key, groups, Some(10)).unwrap();
//! assert_eq!(decoded.message, "meetatnoon");
//! ```
//!
//! ## Modules
//!
//! - [`text`]: normalization, letter mappings, padding removal
//! - [`crypto`]: key seeds and keystream
//! - [`codec`]: the sum and stream group transforms
//! - [`stego`]: pixel layout and image I/O
//! - [`encoder`]: message to image
//! - [`decoder`]: image to message

/// Letters per group, and values per encoded group.
pub const GROUP_SIZE: usize = 9;

/// Letter appended to reach a whole number of groups.
pub const PAD_CHAR: char = 'x';

/// Groups stored per image row, one per color channel.
pub const GROUPS_PER_ROW: usize = 3;

pub mod codec;
pub mod crypto;
pub mod decoder;
pub mod encoder;
pub mod stego;
pub mod text;

// Re-export commonly used types at the crate root
pub use codec::{CodecError, Corruption, EncodedGroup, Scheme, StreamCodec};
pub use crypto::{KeyImage, KeySeed, KeySource, Keystream};
pub use decoder::{
    decode, decode_keyed, decode_with_config, DecodeParams, DecodedMessage, DecoderConfig,
    DecoderError,
};
pub use encoder::{
    encode, encode_keyed, encode_with_config, EncodedImage, EncoderConfig, EncoderError,
};
pub use stego::{LayoutError, ResizeFilter, StegoImage, StegoImageError};
pub use text::{LetterGroup, NormalizedText};
