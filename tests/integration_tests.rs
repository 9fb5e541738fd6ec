//! Integration tests for Ninefold
//!
//! Note: the stream scheme never reports a wrong key. Decoding with the
//! wrong key image yields a different string, not an error.

use image::{DynamicImage, Rgb, RgbImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tempfile::TempDir;

use ninefold::crypto::KeySeed;
use ninefold::stego::{read_groups, Extent};
use ninefold::{
    decode, decode_keyed, decode_with_config, encode, encode_keyed, encode_with_config, Corruption,
    CodecError, DecodeParams, DecoderConfig, DecoderError, EncoderConfig, EncoderError, KeyImage,
    KeySource, LayoutError, Scheme, StegoImage,
};

/// Random RGB image, reproducible from `seed`.
fn random_image(width: u32, height: u32, seed: u64) -> DynamicImage {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let img = RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]));
    DynamicImage::ImageRgb8(img)
}

/// Test key-less round trip without any parameters
#[test]
fn test_sum_roundtrip_sentinel() {
    let encoded = encode("Hello, World!", None).unwrap();
    assert_eq!(encoded.params.group_count, Some(2));

    // No length: trailing x letters are stripped
    let decoded = decode(encoded.image.image(), None).unwrap();
    assert_eq!(decoded.message, "helloworld");
    assert_eq!(decoded.full, "helloworldxxxxxxxx");
    assert_eq!(decoded.removed_padding, "xxxxxxxx");
    assert_eq!(decoded.group_count, 2);
}

/// Test that the original length keeps real trailing x letters
#[test]
fn test_original_length_preserves_trailing_x() {
    let encoded = encode("relax", None).unwrap();
    let length = encoded.params.original_length;
    assert_eq!(length, Some(5));

    let exact = decode(encoded.image.image(), length).unwrap();
    assert_eq!(exact.message, "relax");

    let heuristic = decode(encoded.image.image(), None).unwrap();
    assert_eq!(heuristic.message, "rela");
}

/// Test keyed round trip with a key image
#[test]
fn test_stream_roundtrip_key_image() {
    let key = KeyImage::from_image(random_image(16, 16, 1));
    let message = "Attack at dawn, bring snacks";

    let encoded = encode_keyed(message, &key, None).unwrap();
    let params = encoded.params;
    assert_eq!(params.scheme, Scheme::Stream);

    let decoded = decode_keyed(
        encoded.image.image(),
        &key,
        params.group_count.unwrap(),
        params.original_length,
    )
    .unwrap();
    assert_eq!(decoded.message, "attackatdawnbringsnacks");
}

/// Test that a wrong key decodes to a different string without error
#[test]
fn test_wrong_key_returns_garbage() {
    let key = KeyImage::from_image(random_image(16, 16, 2));
    let wrong = KeyImage::from_image(random_image(16, 16, 3));
    let message = "the treasure is buried under the old oak";

    let encoded = encode_keyed(message, &key, None).unwrap();
    let groups = encoded.params.group_count.unwrap();

    let decoded = decode_keyed(encoded.image.image(), &wrong, groups, None).unwrap();
    assert_ne!(decoded.full, encoded.normalized.as_str());
    assert_eq!(decoded.full.chars().count(), groups * 9);
}

/// Test that the stream scheme refuses to guess the group count
#[test]
fn test_stream_requires_group_count() {
    let key = KeySeed::from_bytes([9; 32]);
    let encoded = encode_keyed("hello", &key, None).unwrap();

    let config = DecoderConfig {
        scheme: Scheme::Stream,
        ..DecoderConfig::default()
    };
    let result = decode_with_config(encoded.image.image(), Some(&key), &config);
    assert!(matches!(result, Err(DecoderError::MissingGroupCount)));

    let config = DecoderConfig {
        scheme: Scheme::Stream,
        group_count: Some(1),
        ..DecoderConfig::default()
    };
    let result = decode_with_config(encoded.image.image(), None, &config);
    assert!(matches!(result, Err(DecoderError::MissingKeyImage)));
}

/// Test that untouched carrier pixels survive encoding
#[test]
fn test_carrier_pixels_preserved() {
    let carrier = random_image(20, 10, 4);
    let encoded = encode("abcdefghijklmnopqrstuvwxyz", Some(&carrier)).unwrap();

    let before = carrier.to_rgb8();
    let after = encoded.image.image().to_rgb8();
    assert_eq!(after.dimensions(), (20, 10));

    // 3 groups fill row 0; rows 1.. and columns 9.. are untouched
    for (x, y, pixel) in after.enumerate_pixels() {
        if y > 0 || x >= 9 {
            assert_eq!(pixel, before.get_pixel(x, y), "pixel ({x}, {y}) changed");
        }
    }
}

/// Test key-less round trip on a carrier with only the original length
#[test]
fn test_sum_roundtrip_on_carrier_by_length() {
    let carrier = random_image(20, 10, 8);
    let encoded = encode("Hello, World!", Some(&carrier)).unwrap();

    let decoded = decode(encoded.image.image(), encoded.params.original_length).unwrap();
    assert_eq!(decoded.message, "helloworld");
    assert_eq!(decoded.group_count, 2);
}

/// Test that a too-small carrier is stretched or rejected
#[test]
fn test_small_carrier() {
    let carrier = random_image(4, 1, 5);
    let message = "a".repeat(9 * 7);

    let encoded = encode(&message, Some(&carrier)).unwrap();
    assert_eq!(encoded.image.dimensions(), (9, 3));
    let decoded = decode(encoded.image.image(), encoded.params.original_length).unwrap();
    assert_eq!(decoded.message, message);

    let config = EncoderConfig {
        resize: false,
        ..EncoderConfig::default()
    };
    let result = encode_with_config(&message, Some(&carrier), None, &config);
    assert!(matches!(
        result,
        Err(EncoderError::LayoutError(LayoutError::ImageTooSmall { .. }))
    ));
}

/// Test that tampering with a pixel is detected by the sum scheme
#[test]
fn test_corrupt_pixel_detected() {
    let encoded = encode("abcdefghi", None).unwrap();
    let mut rgb = encoded.image.image().to_rgb8();
    rgb.get_pixel_mut(4, 0).0[0] += 1;
    let tampered = DynamicImage::ImageRgb8(rgb);

    let result = decode(&tampered, None);
    match result {
        Err(DecoderError::CorruptGroup {
            group: 0,
            source: CodecError::CorruptEncoding(Corruption::IndivisibleTotal(total)),
        }) => assert_eq!(total, 361),
        other => panic!("expected corrupt group, got {other:?}"),
    }
}

/// Test that asking for more groups than the image holds fails
#[test]
fn test_group_count_underflow() {
    let encoded = encode("short", None).unwrap();
    let config = DecoderConfig {
        group_count: Some(10),
        ..DecoderConfig::default()
    };
    let result = decode_with_config(encoded.image.image(), None, &config);
    assert!(matches!(
        result,
        Err(DecoderError::LayoutError(LayoutError::UnderflowGroupCount { .. }))
    ));
}

/// Test an empty message
#[test]
fn test_empty_message() {
    let encoded = encode("1234 !?", None).unwrap();
    assert_eq!(encoded.params.group_count, Some(0));
    assert_eq!(encoded.params.original_length, Some(0));

    let decoded = decode(encoded.image.image(), Some(0)).unwrap();
    assert!(decoded.message.is_empty());
    assert_eq!(decoded.group_count, 0);
}

/// Test round trip through files, with the key image reloaded from disk
#[test]
fn test_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("key.png");
    let carrier_path = dir.path().join("carrier.png");
    let out_path = dir.path().join("out.png");

    random_image(32, 32, 6).save(&key_path).unwrap();
    StegoImage::test_pattern(100, 60).save(&carrier_path).unwrap();

    let key = KeyImage::from_file(&key_path).unwrap();
    let carrier = StegoImage::from_file(&carrier_path).unwrap();
    let encoded = encode_keyed("Meet me by the river", &key, Some(carrier.image())).unwrap();
    encoded.image.save(&out_path).unwrap();

    let json = serde_json::to_string(&encoded.params).unwrap();
    let params: DecodeParams = serde_json::from_str(&json).unwrap();

    let reloaded_key = KeyImage::from_file(&key_path).unwrap();
    let reloaded = StegoImage::from_file(&out_path).unwrap();
    let decoded = decode_with_config(
        reloaded.image(),
        Some(&reloaded_key),
        &DecoderConfig::from(params),
    )
    .unwrap();
    assert_eq!(decoded.message, "meetmebytheriver");
}

/// Test that the seed depends on pixels, not on the file format
#[test]
fn test_seed_independent_of_format() {
    let dir = TempDir::new().unwrap();
    let png = dir.path().join("key.png");
    let bmp = dir.path().join("key.bmp");

    let image = random_image(24, 12, 7);
    image.save(&png).unwrap();
    image.save(&bmp).unwrap();

    let from_png = KeyImage::from_file(&png).unwrap().key_seed();
    let from_bmp = KeyImage::from_file(&bmp).unwrap().key_seed();
    assert_eq!(from_png.as_bytes(), from_bmp.as_bytes());

    // alpha is ignored
    let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
    let from_rgba = KeyImage::from_image(rgba).key_seed();
    assert_eq!(from_rgba.as_bytes(), from_png.as_bytes());
}

/// Test that an explicit count ignores the sentinel
#[test]
fn test_explicit_count_reads_zero_groups() {
    let encoded = encode("abcdefghi", None).unwrap();
    let rgb = encoded.image.image().to_rgb8();

    // A black canvas of one row: group 1 (green) is all zero
    let groups = read_groups(&rgb, Extent::Count(2)).unwrap();
    assert!(groups[1].is_zero());

    let config = DecoderConfig {
        group_count: Some(2),
        ..DecoderConfig::default()
    };
    let result = decode_with_config(encoded.image.image(), None, &config);
    assert!(matches!(
        result,
        Err(DecoderError::CorruptGroup { group: 1, .. })
    ));
}
