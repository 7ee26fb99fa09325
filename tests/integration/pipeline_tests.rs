//! Full-pipeline tests: a decoded tile run through realistic transform
//! chains, with the shape invariant checked after every step.

use gigatile::{
    adjust_contrast, adjust_gamma, apply_colormap, convert_lab_to_srgb, crop, hillshade, invert,
    normalize, resample, rotate, to_greyscale, ColormapKind, PixelBuffer, RawTile, ResampleMethod,
    SampleFormat,
};

/// Assert the core shape invariant after an operation.
fn assert_consistent(tile: &RawTile, context: &str) {
    assert!(
        tile.is_consistent(),
        "{}: buffer length {} != {}x{}x{}",
        context,
        tile.data.len(),
        tile.width,
        tile.height,
        tile.channels
    );
    assert_eq!(
        tile.byte_len(),
        tile.sample_count() * tile.bits_per_channel() as usize / 8,
        "{}: byte length formula violated",
        context
    );
}

#[test]
fn test_scientific_visualisation_chain() {
    // A 16-bit elevation-style tile: normalize -> colormap -> contrast
    let data: Vec<u16> = (0..64).map(|i| i * 1000).collect();
    let mut tile = RawTile::new(8, 8, 1, PixelBuffer::U16(data));

    normalize(&mut tile, &[0.0], &[63_000.0]);
    assert_consistent(&tile, "normalize");
    assert_eq!(tile.sample_format(), SampleFormat::Float);

    apply_colormap(&mut tile, ColormapKind::Jet);
    assert_consistent(&tile, "colormap");
    assert_eq!(tile.channels, 3);

    adjust_contrast(&mut tile, 1.0);
    assert_consistent(&tile, "contrast");
    assert_eq!(tile.bits_per_channel(), 8);

    // First sample was 0.0 -> JET half blue -> bytes (0, 0, 127)
    let PixelBuffer::U8(out) = &tile.data else {
        panic!("expected 8-bit output");
    };
    assert_eq!(&out[0..3], &[0, 0, 127]);
}

#[test]
fn test_shaded_relief_chain() {
    // Normal-map shading: normalize -> hillshade -> gamma -> contrast
    let normals: Vec<u8> = vec![128; 4 * 4 * 3];
    let mut tile = RawTile::new(4, 4, 3, PixelBuffer::U8(normals));

    normalize(&mut tile, &[0.0, 0.0, 0.0], &[255.0, 255.0, 255.0]);
    assert_consistent(&tile, "normalize");

    hillshade(&mut tile, 45, 30);
    assert_consistent(&tile, "hillshade");
    assert_eq!(tile.channels, 1);

    adjust_gamma(&mut tile, 1.2);
    assert_consistent(&tile, "gamma");

    adjust_contrast(&mut tile, 1.5);
    assert_consistent(&tile, "contrast");
    assert_eq!(tile.bits_per_channel(), 8);
}

#[test]
fn test_viewport_chain_resample_rotate_crop() {
    let data: Vec<u8> = (0..=255).cycle().take(16 * 12 * 3).map(|v| v as u8).collect();
    let mut tile = RawTile::new(16, 12, 3, PixelBuffer::U8(data));

    resample(&mut tile, 8, 6, ResampleMethod::Bilinear);
    assert_consistent(&tile, "resample");
    assert_eq!((tile.width, tile.height), (8, 6));

    rotate(&mut tile, 90);
    assert_consistent(&tile, "rotate");
    assert_eq!((tile.width, tile.height), (6, 8));

    crop(&mut tile, 1, 2, 1, 2);
    assert_consistent(&tile, "crop");
    assert_eq!((tile.width, tile.height), (4, 4));
    assert_eq!(tile.byte_len(), 4 * 4 * 3);
}

#[test]
fn test_rotation_round_trip_preserves_pixels() {
    let data: Vec<f32> = (0..5 * 7 * 2).map(|v| v as f32).collect();
    let original = RawTile::new(5, 7, 2, PixelBuffer::F32(data));

    let mut tile = original.clone();
    rotate(&mut tile, 90);
    rotate(&mut tile, 270);
    assert_eq!(tile, original);

    let mut tile = original.clone();
    rotate(&mut tile, 180);
    rotate(&mut tile, 180);
    assert_eq!(tile, original);
}

#[test]
fn test_lab_source_chain() {
    // A Lab-encoded tile converted for display, then reduced to greyscale
    let lab: Vec<u8> = vec![
        255, 0, 0, // white
        0, 0, 0, // black
        128, 0, 0, // mid grey
        255, 0, 0, // white
    ];
    let mut tile = RawTile::new(2, 2, 3, PixelBuffer::U8(lab));

    convert_lab_to_srgb(&mut tile);
    assert_consistent(&tile, "lab2srgb");
    assert_eq!(tile.channels, 3);

    to_greyscale(&mut tile);
    assert_consistent(&tile, "greyscale");
    assert_eq!(tile.channels, 1);

    let PixelBuffer::U8(out) = &tile.data else {
        panic!("expected 8-bit output");
    };
    assert_eq!(out[0], 255);
    assert_eq!(out[1], 0);
    assert_eq!(out[3], 255);
}

#[test]
fn test_inversion_is_self_inverse() {
    let data: Vec<f32> = vec![0.0, 0.25, 0.5, 1.0];
    let original = RawTile::new(2, 2, 1, PixelBuffer::F32(data));

    let mut tile = original.clone();
    invert(&mut tile);
    invert(&mut tile);
    assert_eq!(tile, original);
}

#[test]
fn test_nearest_resample_identity_through_chain() {
    let data: Vec<u32> = (0..6 * 4).collect();
    let original = RawTile::new(6, 4, 1, PixelBuffer::U32(data));

    let mut tile = original.clone();
    resample(&mut tile, 6, 4, ResampleMethod::Nearest);
    assert_eq!(tile, original);
}
