//! Integration tests for DDS encode/decode.
//!
//! These tests drive the public API end to end:
//! - Every registered format survives encode then decode with the right shape
//! - Lossless formats reproduce their input exactly
//! - Mip seeking and truncated streams behave as documented
//! - Header rejection paths surface the right error

use ddskit::dds::{DdsDecoder, DdsEncoder, HEADER_LEN};
use ddskit::mipmap::mip_level_size;
use ddskit::{decode_dds, encode_dds, DdsError, DdsFormat, MipChain, PixelBuffer, ProcessingConfig};

// =============================================================================
// Test Helpers
// =============================================================================

/// BGRA gradient with opaque pixels only.
fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(2).saturating_sub(1)) as u8,
                (y * 255 / height.max(2).saturating_sub(1)) as u8,
                ((x + y) % 256) as u8,
                255,
            ]);
        }
    }
    PixelBuffer::new(width, height, data).unwrap()
}

fn solid(width: u32, height: u32, bgra: [u8; 4]) -> PixelBuffer {
    let data = bgra
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    PixelBuffer::new(width, height, data).unwrap()
}

fn single_threaded() -> ProcessingConfig {
    ProcessingConfig::default().with_parallelism(1)
}

// =============================================================================
// Shape and size
// =============================================================================

#[test]
fn test_every_format_roundtrips_with_full_chain() {
    let image = gradient(32, 16);

    for format in DdsFormat::ALL {
        let bytes = DdsEncoder::new(format).encode(&image).unwrap();
        assert_eq!(
            bytes.len(),
            DdsEncoder::new(format).expected_size(32, 16),
            "{} size",
            format
        );

        let chain = DdsDecoder::new().decode(&bytes).unwrap();
        let dims: Vec<(u32, u32)> = chain.iter().map(|l| (l.width(), l.height())).collect();
        assert_eq!(
            dims,
            vec![(32, 16), (16, 8), (8, 4), (4, 2), (2, 1)],
            "{} chain",
            format
        );
    }
}

#[test]
fn test_non_multiple_of_four_dimensions() {
    let image = gradient(10, 6);
    let bytes = encode_dds(&MipChain::single(image), DdsFormat::Dxt5, false, &single_threaded())
        .unwrap();

    // 3×2 blocks of 16 bytes.
    assert_eq!(bytes.len(), HEADER_LEN + 3 * 2 * 16);

    let chain = decode_dds(&bytes, 0, &single_threaded()).unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!((chain.top().width(), chain.top().height()), (10, 6));
}

// =============================================================================
// Fidelity
// =============================================================================

#[test]
fn test_bitmask_formats_are_lossless_on_their_channels() {
    let image = gradient(16, 16);
    let config = single_threaded();

    let argb = encode_dds(&MipChain::single(image.clone()), DdsFormat::Argb8888, false, &config)
        .unwrap();
    assert_eq!(decode_dds(&argb, 0, &config).unwrap().top(), &image);

    let rgb = encode_dds(&MipChain::single(image.clone()), DdsFormat::Rgb888, false, &config)
        .unwrap();
    let decoded = decode_dds(&rgb, 0, &config).unwrap();
    for (src, dst) in image.data().chunks(4).zip(decoded.top().data().chunks(4)) {
        assert_eq!(&src[..3], &dst[..3]);
        assert_eq!(dst[3], 255);
    }
}

#[test]
fn test_solid_colour_survives_block_compression() {
    // 5:6:5 representable: 0x10 blue, 0x20 green, 0x40 red.
    let colour = [0x10, 0x20, 0x40, 255];
    let image = solid(8, 8, colour);

    for format in [DdsFormat::Dxt1, DdsFormat::Dxt3, DdsFormat::Dxt5] {
        let bytes = DdsEncoder::new(format).without_mipmaps().encode(&image).unwrap();
        let chain = DdsDecoder::new().decode(&bytes).unwrap();
        for px in chain.top().data().chunks(4) {
            for c in 0..4 {
                assert!(
                    (px[c] as i16 - colour[c] as i16).abs() <= 2,
                    "{}: {:?} vs {:?}",
                    format,
                    px,
                    colour
                );
            }
        }
    }
}

#[test]
fn test_dxt1_punches_out_transparent_pixels() {
    let mut image = solid(4, 4, [200, 100, 50, 255]);
    image.data_mut()[3] = 0;

    let bytes = DdsEncoder::new(DdsFormat::Dxt1)
        .without_mipmaps()
        .encode(&image)
        .unwrap();
    let chain = DdsDecoder::new().decode(&bytes).unwrap();

    assert_eq!(chain.top().pixel(0, 0)[3], 0);
    assert_eq!(chain.top().pixel(1, 0)[3], 255);
}

// =============================================================================
// Seeking and truncation
// =============================================================================

#[test]
fn test_seek_matches_full_decode_tail() {
    let image = gradient(64, 64);
    let bytes = DdsEncoder::new(DdsFormat::Dxt5).encode(&image).unwrap();

    let full = DdsDecoder::new().decode(&bytes).unwrap();
    let seeked = DdsDecoder::new().with_max_dimension(16).decode(&bytes).unwrap();

    assert_eq!(seeked.len(), full.len() - 2);
    assert_eq!(seeked.levels(), &full.levels()[2..]);
}

#[test]
fn test_seek_past_end_is_reported() {
    let image = gradient(64, 64);
    let bytes = DdsEncoder::new(DdsFormat::Dxt1).encode(&image).unwrap();
    let cut = &bytes[..HEADER_LEN + 100];

    let err = DdsDecoder::new()
        .with_max_dimension(8)
        .decode(cut)
        .unwrap_err();
    assert!(matches!(err, DdsError::RequestedMipNotPresent { .. }));
}

#[test]
fn test_truncated_stream_returns_complete_levels() {
    let image = gradient(32, 32);
    let bytes = DdsEncoder::new(DdsFormat::Dxt1).encode(&image).unwrap();

    let two_levels = mip_level_size(32, 32, DdsFormat::Dxt1) + mip_level_size(16, 16, DdsFormat::Dxt1);
    let cut = &bytes[..HEADER_LEN + two_levels + 3];

    let chain = DdsDecoder::new().decode(cut).unwrap();
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_header_only_stream_is_an_error() {
    let image = gradient(8, 8);
    let bytes = DdsEncoder::new(DdsFormat::Ati2).encode(&image).unwrap();

    let err = DdsDecoder::new().decode(&bytes[..HEADER_LEN]).unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(err, DdsError::TruncatedData { level: 0, .. }));
}

// =============================================================================
// Rejection
// =============================================================================

#[test]
fn test_rejects_bad_magic_and_short_input() {
    let image = gradient(4, 4);
    let mut bytes = DdsEncoder::new(DdsFormat::Dxt1).encode(&image).unwrap();

    assert!(matches!(
        DdsDecoder::new().decode(&bytes[..64]).unwrap_err(),
        DdsError::MalformedHeader(_)
    ));

    bytes[0] = b'X';
    assert!(matches!(
        DdsDecoder::new().decode(&bytes).unwrap_err(),
        DdsError::InvalidMagic { .. }
    ));
}

#[test]
fn test_dx10_header_is_unsupported() {
    let image = gradient(4, 4);
    let mut bytes = DdsEncoder::new(DdsFormat::Dxt1).encode(&image).unwrap();
    bytes[84..88].copy_from_slice(b"DX10");

    assert!(matches!(
        DdsDecoder::new().decode(&bytes).unwrap_err(),
        DdsError::UnsupportedFormat(_)
    ));
}

#[test]
fn test_parallel_and_single_threaded_agree() {
    let image = gradient(64, 48);
    for format in [DdsFormat::Dxt1, DdsFormat::Ati1, DdsFormat::A8L8] {
        let inline = DdsEncoder::new(format)
            .with_config(single_threaded())
            .encode(&image)
            .unwrap();
        let parallel = DdsEncoder::new(format)
            .with_config(ProcessingConfig::default().with_parallelism(4))
            .encode(&image)
            .unwrap();
        assert_eq!(inline, parallel, "{}", format);
    }
}
