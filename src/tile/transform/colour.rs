//! Colour operations: CIELAB to sRGB conversion, pseudo-colouring and
//! greyscale reduction.

use crate::tile::{PixelBuffer, RawTile};

// D65 reference white, temp 6504K
const D65_X0: f64 = 95.0470;
const D65_Y0: f64 = 100.0;
const D65_Z0: f64 = 108.8827;

/// XYZ to linear sRGB.
const SRGB_MATRIX: [[f64; 3]; 3] = [
    [3.240479, -1.537150, -0.498535],
    [-0.969256, 1.875992, 0.041556],
    [0.055648, -0.204043, 1.057311],
];

// =============================================================================
// CIELAB -> sRGB
// =============================================================================

/// Convert an 8-bit 3-channel CIELAB tile to sRGB in place.
///
/// L is packed as an unsigned byte scaled 0-255 for 0-100; a/b are signed
/// bytes for -127..127.
pub fn convert_lab_to_srgb(tile: &mut RawTile) {
    if tile.channels != 3 {
        return;
    }
    let PixelBuffer::U8(data) = &mut tile.data else {
        return;
    };

    for pixel in data.chunks_exact_mut(3) {
        let srgb = lab_pixel_to_srgb(pixel[0], pixel[1] as i8, pixel[2] as i8);
        pixel.copy_from_slice(&srgb);
    }
}

/// Convert one packed Lab pixel to 8-bit sRGB.
fn lab_pixel_to_srgb(l_byte: u8, a_byte: i8, b_byte: i8) -> [u8; 3] {
    let l = l_byte as f64 / 2.55;
    let a = a_byte as f64;
    let b = b_byte as f64;

    // Lab -> XYZ, piecewise cube/linear with breakpoint 0.2069
    let (y, cby) = if l < 8.0 {
        let y = (l * D65_Y0) / 903.3;
        (y, 7.787 * (y / D65_Y0) + 16.0 / 116.0)
    } else {
        let cby = (l + 16.0) / 116.0;
        (D65_Y0 * cby * cby * cby, cby)
    };

    let tmp = a / 500.0 + cby;
    let x = if tmp < 0.2069 {
        D65_X0 * (tmp - 0.13793) / 7.787
    } else {
        D65_X0 * tmp * tmp * tmp
    };

    let tmp = cby - b / 200.0;
    let z = if tmp < 0.2069 {
        D65_Z0 * (tmp - 0.13793) / 7.787
    } else {
        D65_Z0 * tmp * tmp * tmp
    };

    let xyz = [x / 100.0, y / 100.0, z / 100.0];

    let mut out = [0u8; 3];
    for (i, row) in SRGB_MATRIX.iter().enumerate() {
        let linear = (xyz[0] * row[0] + xyz[1] * row[1] + xyz[2] * row[2]).max(0.0);

        // sRGB transfer function
        let encoded = if linear <= 0.0031308 {
            linear * 12.92
        } else {
            1.055 * linear.powf(1.0 / 2.4) - 0.055
        };

        out[i] = (encoded * 255.0).min(255.0) as u8;
    }
    out
}

// =============================================================================
// Colormaps
// =============================================================================

/// Piecewise-linear pseudo-colour ramps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapKind {
    Hot,
    Cold,
    Jet,
}

/// Map a single-channel floating tile in `[0,1]` to a 3-channel floating
/// colour tile via the named ramp.
///
/// HOT and COLD break at 1/3 and 2/3 and saturate to their terminal colours
/// outside `[0,1]`. JET breaks at 1/8, 3/8, 5/8 and 7/8; values below 0 map
/// to black and values at or above 1 to the ramp's mid red (0.5, 0, 0).
pub fn apply_colormap(tile: &mut RawTile, kind: ColormapKind) {
    if tile.channels != 1 {
        return;
    }
    let PixelBuffer::F32(data) = &tile.data else {
        return;
    };

    let mut out = Vec::with_capacity(data.len() * 3);

    match kind {
        ColormapKind::Hot => {
            for &v in data {
                let rgb = if v > 1.0 {
                    [1.0, 1.0, 1.0]
                } else if v <= 0.0 {
                    [0.0, 0.0, 0.0]
                } else if v < 1.0 / 3.0 {
                    [3.0 * v, 0.0, 0.0]
                } else if v < 2.0 / 3.0 {
                    [1.0, 3.0 * v - 1.0, 0.0]
                } else if v < 1.0 {
                    [1.0, 1.0, 3.0 * v - 2.0]
                } else {
                    [1.0, 1.0, 1.0]
                };
                out.extend_from_slice(&rgb);
            }
        }
        ColormapKind::Cold => {
            for &v in data {
                let rgb = if v > 1.0 {
                    [1.0, 1.0, 1.0]
                } else if v <= 0.0 {
                    [0.0, 0.0, 0.0]
                } else if v < 1.0 / 3.0 {
                    [0.0, 0.0, 3.0 * v]
                } else if v < 2.0 / 3.0 {
                    [0.0, 3.0 * v - 1.0, 1.0]
                } else if v < 1.0 {
                    [3.0 * v - 2.0, 1.0, 1.0]
                } else {
                    [1.0, 1.0, 1.0]
                };
                out.extend_from_slice(&rgb);
            }
        }
        ColormapKind::Jet => {
            for &v in data {
                let rgb = if v < 0.0 {
                    [0.0, 0.0, 0.0]
                } else if v < 1.0 / 8.0 {
                    [0.0, 0.0, 4.0 * v + 0.5]
                } else if v < 3.0 / 8.0 {
                    [0.0, 4.0 * v - 0.5, 1.0]
                } else if v < 5.0 / 8.0 {
                    [4.0 * v - 1.5, 1.0, 2.5 - 4.0 * v]
                } else if v < 7.0 / 8.0 {
                    [1.0, 3.5 - 4.0 * v, 0.0]
                } else if v < 1.0 {
                    [4.5 - 4.0 * v, 0.0, 0.0]
                } else {
                    [0.5, 0.0, 0.0]
                };
                out.extend_from_slice(&rgb);
            }
        }
    }

    tile.data = PixelBuffer::F32(out);
    tile.channels = 3;
}

// =============================================================================
// Greyscale
// =============================================================================

/// Reduce a 3-channel 8-bit tile to 1-channel luminance.
///
/// Fixed-point integer weights, around 25% faster than the floating-point
/// equivalent. Other representations pass through untouched.
pub fn to_greyscale(tile: &mut RawTile) {
    if tile.channels != 3 {
        return;
    }
    let PixelBuffer::U8(data) = &tile.data else {
        return;
    };

    let grey: Vec<u8> = data
        .chunks_exact(3)
        .map(|px| {
            let r = px[0] as u32;
            let g = px[1] as u32;
            let b = px[2] as u32;
            ((1_254_097 * r + 2_462_056 * g + 478_151 * b) >> 22) as u8
        })
        .collect();

    tile.data = PixelBuffer::U8(grey);
    tile.channels = 1;
}

// =============================================================================
// Tests
// =============================================================================
