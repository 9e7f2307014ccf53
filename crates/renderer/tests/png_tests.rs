//! Tests for PNG encoding.
//!
//! The encoded bytes are parsed back chunk by chunk and the IDAT stream is
//! inflated with flate2 to check the pixel data survives encoding.

use flate2::read::ZlibDecoder;
use renderer::png::{create_png, create_png_auto, encode_raster, write_png_file};
use renderer::{colorize, ColorRamp, Raster, RenderError};
use std::io::Read;

// ============================================================================
// Helper functions
// ============================================================================

struct Chunk {
    kind: [u8; 4],
    data: Vec<u8>,
}

/// Split a PNG into chunks, verifying signature and CRCs.
fn parse_chunks(png: &[u8]) -> Vec<Chunk> {
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    let mut chunks = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());

        let mut hasher = crc32fast::Hasher::new();
        hasher.update(&kind);
        hasher.update(&data);
        assert_eq!(hasher.finalize(), crc, "bad CRC in {:?}", kind);

        chunks.push(Chunk { kind, data });
        pos += 12 + len;
    }
    chunks
}

fn find<'a>(chunks: &'a [Chunk], kind: &[u8; 4]) -> Option<&'a Chunk> {
    chunks.iter().find(|c| &c.kind == kind)
}

/// Inflate IDAT and strip filter bytes, returning raw scanline bytes.
fn decode_scanlines(chunks: &[Chunk], row_bytes: usize) -> Vec<u8> {
    let idat: Vec<u8> = chunks
        .iter()
        .filter(|c| &c.kind == b"IDAT")
        .flat_map(|c| c.data.clone())
        .collect();
    let mut raw = Vec::new();
    ZlibDecoder::new(&idat[..]).read_to_end(&mut raw).unwrap();

    let mut out = Vec::new();
    for line in raw.chunks_exact(row_bytes + 1) {
        assert_eq!(line[0], 0, "unexpected filter type");
        out.extend_from_slice(&line[1..]);
    }
    out
}

/// Reconstruct RGB bytes from any PNG produced by the encoder.
fn decode_rgb(png: &[u8]) -> (usize, usize, Vec<u8>) {
    let chunks = parse_chunks(png);
    let ihdr = &find(&chunks, b"IHDR").unwrap().data;
    let width = u32::from_be_bytes(ihdr[0..4].try_into().unwrap()) as usize;
    let height = u32::from_be_bytes(ihdr[4..8].try_into().unwrap()) as usize;
    assert_eq!(ihdr[8], 8);

    let rgb = match ihdr[9] {
        2 => decode_scanlines(&chunks, width * 3),
        3 => {
            let plte = &find(&chunks, b"PLTE").unwrap().data;
            decode_scanlines(&chunks, width)
                .iter()
                .flat_map(|&i| plte[i as usize * 3..i as usize * 3 + 3].to_vec())
                .collect()
        }
        other => panic!("unexpected color type {}", other),
    };
    (width, height, rgb)
}

fn gradient_pixels(width: usize, height: usize, levels: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let level = ((x + y) * levels / (width + height)) as u8;
            pixels.extend_from_slice(&[level, 255 - level, 64]);
        }
    }
    pixels
}

// ============================================================================
// Format selection
// ============================================================================

#[test]
fn test_few_colors_use_indexed() {
    let pixels = gradient_pixels(16, 8, 20);
    let png = create_png_auto(&pixels, 16, 8).unwrap();
    let chunks = parse_chunks(&png);

    assert_eq!(find(&chunks, b"IHDR").unwrap().data[9], 3);
    assert!(find(&chunks, b"PLTE").is_some());
    assert_eq!(&chunks.last().unwrap().kind, b"IEND");
}

#[test]
fn test_many_colors_fall_back_to_rgb() {
    let mut pixels = Vec::with_capacity(300 * 3);
    for i in 0..300u32 {
        pixels.extend_from_slice(&[(i % 256) as u8, (i / 256) as u8, 9]);
    }
    let png = create_png_auto(&pixels, 300, 1).unwrap();
    let chunks = parse_chunks(&png);

    assert_eq!(find(&chunks, b"IHDR").unwrap().data[9], 2);
    assert!(find(&chunks, b"PLTE").is_none());
}

#[test]
fn test_indexed_smaller_than_rgb() {
    let pixels = gradient_pixels(256, 256, 20);
    let indexed = create_png_auto(&pixels, 256, 256).unwrap();
    let rgb = create_png(&pixels, 256, 256).unwrap();
    assert!(indexed.len() < rgb.len());
}

// ============================================================================
// Pixel fidelity
// ============================================================================

#[test]
fn test_indexed_roundtrip_pixels() {
    let pixels = gradient_pixels(90, 70, 40);
    let (w, h, decoded) = decode_rgb(&create_png_auto(&pixels, 90, 70).unwrap());
    assert_eq!((w, h), (90, 70));
    assert_eq!(decoded, pixels);
}

#[test]
fn test_rgb_roundtrip_pixels() {
    let pixels = gradient_pixels(12, 5, 200);
    let (w, h, decoded) = decode_rgb(&create_png(&pixels, 12, 5).unwrap());
    assert_eq!((w, h), (12, 5));
    assert_eq!(decoded, pixels);
}

#[test]
fn test_encode_colorized_raster() {
    let data: Vec<f64> = (0..200).map(|i| 10.0 + i as f64).collect();
    let raster = colorize(&data, 20, 10, &ColorRamp::aqi().unwrap()).unwrap();
    let (w, h, decoded) = decode_rgb(&encode_raster(&raster).unwrap());
    assert_eq!((w, h), (20, 10));
    assert_eq!(decoded, raster.pixels());
}

// ============================================================================
// Errors and file output
// ============================================================================

#[test]
fn test_shape_mismatch() {
    let err = create_png_auto(&[0, 0, 0, 1, 1, 1], 3, 1).unwrap_err();
    assert!(matches!(err, RenderError::ShapeMismatch { .. }));
}

#[test]
fn test_zero_dimensions() {
    assert!(matches!(
        create_png(&[], 0, 4),
        Err(RenderError::EmptyField)
    ));
}

#[test]
fn test_write_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heatmap_image.png");
    let raster = Raster::from_pixels(2, 1, vec![0, 128, 0, 128, 0, 0]).unwrap();

    let bytes = write_png_file(&raster, &path).unwrap();
    let written = std::fs::read(&path).unwrap();
    assert_eq!(written.len(), bytes);
    assert_eq!(decode_rgb(&written).2, raster.pixels());
}

#[test]
fn test_write_png_file_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.png");
    let raster = Raster::from_pixels(1, 1, vec![1, 2, 3]).unwrap();
    assert!(matches!(
        write_png_file(&raster, &path),
        Err(RenderError::Io { .. })
    ));
}
