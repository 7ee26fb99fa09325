//! Geometric operations: resampling, rotation and cropping.

use crate::tile::{PixelBuffer, RawTile};

use super::Sample;

// =============================================================================
// Resampling
// =============================================================================

/// Interpolation method for [`resample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleMethod {
    Nearest,
    Bilinear,
}

/// Resize a tile to `new_width` x `new_height`, preserving channel count and
/// bit depth.
///
/// NEAREST maps each output pixel to one source pixel through 16-bit-fraction
/// fixed-point scale factors. BILINEAR averages the four neighbours; when the
/// mapped source index lands on the last row or column, the missing
/// neighbours contribute zero and the fractional offset collapses to zero.
/// That edge behaviour is long-served output, kept as is.
pub fn resample(tile: &mut RawTile, new_width: u32, new_height: u32, method: ResampleMethod) {
    let width = tile.width as usize;
    let height = tile.height as usize;
    let channels = tile.channels as usize;
    let (nw, nh) = (new_width as usize, new_height as usize);

    let resampled = match (&tile.data, method) {
        (PixelBuffer::U8(d), ResampleMethod::Nearest) => {
            PixelBuffer::U8(nearest(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::U16(d), ResampleMethod::Nearest) => {
            PixelBuffer::U16(nearest(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::U32(d), ResampleMethod::Nearest) => {
            PixelBuffer::U32(nearest(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::F32(d), ResampleMethod::Nearest) => {
            PixelBuffer::F32(nearest(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::U8(d), ResampleMethod::Bilinear) => {
            PixelBuffer::U8(bilinear(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::U16(d), ResampleMethod::Bilinear) => {
            PixelBuffer::U16(bilinear(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::U32(d), ResampleMethod::Bilinear) => {
            PixelBuffer::U32(bilinear(d, width, height, channels, nw, nh))
        }
        (PixelBuffer::F32(d), ResampleMethod::Bilinear) => {
            PixelBuffer::F32(bilinear(d, width, height, channels, nw, nh))
        }
    };

    tile.data = resampled;
    tile.width = new_width;
    tile.height = new_height;
}

fn nearest<T: Copy>(
    data: &[T],
    width: usize,
    height: usize,
    channels: usize,
    new_width: usize,
    new_height: usize,
) -> Vec<T> {
    // 16-bit-fraction fixed-point scale factors
    let x_scale = ((width as u64) << 16) / new_width as u64;
    let y_scale = ((height as u64) << 16) / new_height as u64;

    let mut out = Vec::with_capacity(new_width * new_height * channels);
    for j in 0..new_height {
        let jj = ((j as u64 * y_scale) >> 16) as usize;
        for i in 0..new_width {
            let ii = ((i as u64 * x_scale) >> 16) as usize;
            let src = channels * (ii + jj * width);
            out.extend_from_slice(&data[src..src + channels]);
        }
    }
    out
}

fn bilinear<T: Sample>(
    data: &[T],
    width: usize,
    height: usize,
    channels: usize,
    new_width: usize,
    new_height: usize,
) -> Vec<T> {
    let x_ratio = width as f32 / new_width as f32;
    let y_ratio = height as f32 / new_height as f32;

    let mut out = Vec::with_capacity(new_width * new_height * channels);
    for i in 0..new_height {
        let y = (y_ratio * i as f32) as usize;
        let mut y_diff = y_ratio * i as f32 - y as f32;
        let edge_y = y == height - 1;
        if edge_y {
            y_diff = 0.0;
        }

        for j in 0..new_width {
            let x = (x_ratio * j as f32) as usize;
            let mut x_diff = x_ratio * j as f32 - x as f32;
            let edge_x = x == width - 1;
            if edge_x {
                x_diff = 0.0;
            }

            let index = x + y * width;
            for k in 0..channels {
                let a = data[index * channels + k].to_f32();
                let b = if edge_x {
                    0.0
                } else {
                    data[(index + 1) * channels + k].to_f32()
                };
                let c = if edge_y {
                    0.0
                } else {
                    data[(index + width) * channels + k].to_f32()
                };
                let d = if edge_x || edge_y {
                    0.0
                } else {
                    data[(index + width + 1) * channels + k].to_f32()
                };

                let value = a * (1.0 - x_diff) * (1.0 - y_diff)
                    + b * x_diff * (1.0 - y_diff)
                    + c * (1.0 - x_diff) * y_diff
                    + d * x_diff * y_diff;
                out.push(T::from_f32(value));
            }
        }
    }
    out
}

// =============================================================================
// Rotation
// =============================================================================

/// Rotate a tile by a rectangular angle.
///
/// Active only for multiples of 90 degrees that are not multiples of 360:
/// 90 and 270 permute rows and columns into a fresh same-depth buffer and
/// swap width/height; 180 reverses pixel order. Any other angle is a no-op.
pub fn rotate(tile: &mut RawTile, angle: i32) {
    if angle % 90 != 0 || angle % 360 == 0 {
        return;
    }
    let quarter = angle.rem_euclid(360) as u32;

    let width = tile.width as usize;
    let height = tile.height as usize;
    let channels = tile.channels as usize;

    let rotated = match &tile.data {
        PixelBuffer::U8(d) => PixelBuffer::U8(rotate_quarter(d, width, height, channels, quarter)),
        PixelBuffer::U16(d) => {
            PixelBuffer::U16(rotate_quarter(d, width, height, channels, quarter))
        }
        PixelBuffer::U32(d) => {
            PixelBuffer::U32(rotate_quarter(d, width, height, channels, quarter))
        }
        PixelBuffer::F32(d) => {
            PixelBuffer::F32(rotate_quarter(d, width, height, channels, quarter))
        }
    };

    tile.data = rotated;
    if quarter % 180 == 90 {
        std::mem::swap(&mut tile.width, &mut tile.height);
    }
}

fn rotate_quarter<T: Copy>(
    data: &[T],
    width: usize,
    height: usize,
    channels: usize,
    quarter: u32,
) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());

    match quarter {
        90 => {
            // Clockwise: output rows are source columns read bottom-up
            for i in (1..=width).rev() {
                for j in (1..=height).rev() {
                    let index = (width * j - i) * channels;
                    out.extend_from_slice(&data[index..index + channels]);
                }
            }
        }
        270 => {
            // Counter-clockwise: output rows are source columns read top-down
            for i in (0..width).rev() {
                for j in 0..height {
                    let index = (width * j + i) * channels;
                    out.extend_from_slice(&data[index..index + channels]);
                }
            }
        }
        _ => {
            // 180: reverse pixel order, channel order within a pixel kept
            for i in (0..width * height).rev() {
                let index = i * channels;
                out.extend_from_slice(&data[index..index + channels]);
            }
        }
    }

    out
}

// =============================================================================
// Cropping
// =============================================================================

/// Crop margins off a tile in place.
///
/// The interior rectangle `[top, height-bottom) x [left, width-right)` is
/// compacted to the front of the existing buffer — no reallocation — and the
/// buffer is truncated to the new length.
pub fn crop(tile: &mut RawTile, left: u32, top: u32, right: u32, bottom: u32) {
    let width = tile.width as usize;
    let channels = tile.channels as usize;
    let new_width = width - left as usize - right as usize;
    let new_height = tile.height as usize - top as usize - bottom as usize;

    match &mut tile.data {
        PixelBuffer::U8(d) => crop_in_place(d, width, channels, left as usize, top as usize, new_width, new_height),
        PixelBuffer::U16(d) => crop_in_place(d, width, channels, left as usize, top as usize, new_width, new_height),
        PixelBuffer::U32(d) => crop_in_place(d, width, channels, left as usize, top as usize, new_width, new_height),
        PixelBuffer::F32(d) => crop_in_place(d, width, channels, left as usize, top as usize, new_width, new_height),
    }

    tile.width = new_width as u32;
    tile.height = new_height as u32;
}

fn crop_in_place<T: Copy>(
    data: &mut Vec<T>,
    width: usize,
    channels: usize,
    left: usize,
    top: usize,
    new_width: usize,
    new_height: usize,
) {
    let row_len = new_width * channels;
    let mut dst = 0;
    for row in 0..new_height {
        let src = ((top + row) * width + left) * channels;
        data.copy_within(src..src + row_len, dst);
        dst += row_len;
    }
    data.truncate(dst);
}

// =============================================================================
// Tests
// =============================================================================
