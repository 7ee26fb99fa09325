//! Tone and contrast operations: normalization, hillshading, inversion,
//! contrast and gamma adjustment.

use crate::tile::{PixelBuffer, RawTile};

/// Ranges narrower than this are treated as degenerate.
const NEAR_ZERO_RANGE: f32 = 1e-30;

/// Inverse scale substituted for a degenerate range.
const DEGENERATE_INVERSE_SCALE: f32 = 1e30;

// =============================================================================
// Normalization
// =============================================================================

/// Map every sample of channel `c` to `(v - min[c]) / (max[c] - min[c])` as
/// 32-bit floating point.
///
/// Non-finite floating-point inputs map to 0. Near-zero ranges use a very
/// large inverse scale instead of dividing by zero. The result is always a
/// floating-point tile; float input is normalised in place.
pub fn normalize(tile: &mut RawTile, min: &[f32], max: &[f32]) {
    let channels = tile.channels as usize;

    // Per-channel scale, precomputed once. `None` marks a degenerate range.
    let ranges: Vec<ChannelRange> = (0..channels)
        .map(|c| ChannelRange {
            min: min[c],
            diff: {
                let diff = max[c] - min[c];
                (diff.abs() > NEAR_ZERO_RANGE).then_some(diff)
            },
        })
        .collect();

    let normalized = match &mut tile.data {
        PixelBuffer::F32(data) => {
            // Already floating point, normalise in place
            for (n, v) in data.iter_mut().enumerate() {
                let range = &ranges[n % channels];
                *v = if v.is_finite() { range.apply(*v) } else { 0.0 };
            }
            return;
        }
        PixelBuffer::U8(data) => normalize_int(data, &ranges, channels),
        PixelBuffer::U16(data) => normalize_int(data, &ranges, channels),
        PixelBuffer::U32(data) => normalize_int(data, &ranges, channels),
    };
    tile.data = PixelBuffer::F32(normalized);
}

struct ChannelRange {
    min: f32,
    diff: Option<f32>,
}

impl ChannelRange {
    fn apply(&self, v: f32) -> f32 {
        match self.diff {
            Some(diff) => (v - self.min) / diff,
            None => (v - self.min) * DEGENERATE_INVERSE_SCALE,
        }
    }
}

fn normalize_int<T: super::Sample>(data: &[T], ranges: &[ChannelRange], channels: usize) -> Vec<f32> {
    data.iter()
        .enumerate()
        .map(|(n, v)| ranges[n % channels].apply(v.to_f32()))
        .collect()
}

// =============================================================================
// Hillshading
// =============================================================================

/// Shade a 3-channel floating tile of per-pixel surface normals in
/// `[0,1]^3`, collapsing it to one channel.
///
/// The illumination vector comes from the two view angles; a pure-zero
/// normal triple contributes zero. Otherwise the normal is remapped to
/// `[-1,1]`, negated, dotted with the light vector, scaled by 0.5 and
/// clamped to `[0,1]`.
pub fn hillshade(tile: &mut RawTile, h_angle: i32, v_angle: i32) {
    let PixelBuffer::F32(data) = &tile.data else {
        return;
    };
    if tile.channels != 3 {
        return;
    }

    let a = (h_angle as f32 * 2.0 * 3.14159) / 360.0;
    let s_y = a.cos();
    // Hypotenuse of 1, sign chosen by which half the azimuth is in
    let mut s_x = (1.0 - s_y * s_y).sqrt();
    if h_angle > 180 {
        s_x = -s_x;
    }

    let a = (v_angle as f32 * 2.0 * 3.14159) / 360.0;
    let s_z = -a.sin();

    let norm = (s_x * s_x + s_y * s_y + s_z * s_z).sqrt();
    let (s_x, s_y, s_z) = (s_x / norm, s_y / norm, s_z / norm);

    let mut shaded = Vec::with_capacity(data.len() / 3);
    for normal in data.chunks_exact(3) {
        let (o_x, o_y, o_z) = if normal[0] == 0.0 && normal[1] == 0.0 && normal[2] == 0.0 {
            (0.0, 0.0, 0.0)
        } else {
            (
                -(normal[0] - 0.5) * 2.0,
                -(normal[1] - 0.5) * 2.0,
                -(normal[2] - 0.5) * 2.0,
            )
        };

        let dot = (s_x * o_x + s_y * o_y + s_z * o_z) * 0.5;
        shaded.push(dot.clamp(0.0, 1.0));
    }

    tile.data = PixelBuffer::F32(shaded);
    tile.channels = 1;
}

// =============================================================================
// Inversion
// =============================================================================

/// Invert a floating tile in place: `v -> 1 - v`.
pub fn invert(tile: &mut RawTile) {
    if let PixelBuffer::F32(data) = &mut tile.data {
        for v in data.iter_mut() {
            *v = 1.0 - *v;
        }
    }
}

// =============================================================================
// Contrast
// =============================================================================

/// Apply a contrast factor to a floating tile and clip the result to 8 bits:
/// `out = clamp(v * 255 * factor, 0, 255)`.
pub fn adjust_contrast(tile: &mut RawTile, factor: f32) {
    let PixelBuffer::F32(data) = &tile.data else {
        return;
    };

    let out: Vec<u8> = data
        .iter()
        .map(|&v| (v * 255.0 * factor).clamp(0.0, 255.0) as u8)
        .collect();

    tile.data = PixelBuffer::U8(out);
}

// =============================================================================
// Gamma
// =============================================================================

/// Apply gamma correction in place on a floating tile:
/// `v -> pow(max(v, 0), exponent)`. An exponent of 1 is a no-op.
pub fn adjust_gamma(tile: &mut RawTile, exponent: f32) {
    if exponent == 1.0 {
        return;
    }

    if let PixelBuffer::F32(data) = &mut tile.data {
        for v in data.iter_mut() {
            *v = v.max(0.0).powf(exponent);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
