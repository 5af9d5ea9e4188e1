//! Low-level blit primitives.
//!
//! Tight nested loops over rows and columns, honoring independent source and
//! destination strides. The slice-based primitives perform no clipping: the
//! caller guarantees both regions fit. The one exception is [`blit_keyed`],
//! which clips a whole sprite against the destination on all four edges.
//!
//! All primitives mutate the destination in place and allocate nothing.
//! Bytes in the stride padding beyond `width` are never written.

use crate::{IndexedBuffer, TRANSPARENT_KEY};

/// Row-wise copy of a `width` x `height` region, no transparency.
///
/// `src` and `dst` point at the top-left pixel of their regions; rows
/// advance by the respective strides.
pub fn opaque_copy(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
) {
    debug_assert!(src_stride >= width && dst_stride >= width);
    for y in 0..height {
        let s = y * src_stride;
        let d = y * dst_stride;
        dst[d..d + width].copy_from_slice(&src[s..s + width]);
    }
}

/// As [`opaque_copy`], but source bytes equal to the transparency key leave
/// the destination pixel untouched.
pub fn keyed_copy(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
) {
    debug_assert!(src_stride >= width && dst_stride >= width);
    for y in 0..height {
        let s = y * src_stride;
        let d = y * dst_stride;
        for x in 0..width {
            let c = src[s + x];
            if c != TRANSPARENT_KEY {
                dst[d + x] = c;
            }
        }
    }
}

/// Writes a constant byte across `width` columns for `height` rows.
pub fn fill_rect(dst: &mut [u8], dst_stride: usize, width: usize, height: usize, color: u8) {
    debug_assert!(dst_stride >= width);
    for y in 0..height {
        let d = y * dst_stride;
        dst[d..d + width].fill(color);
    }
}

/// Single-row constant fill (the degenerate height=1 case).
pub fn fill_row(dst: &mut [u8], width: usize, color: u8) {
    dst[..width].fill(color);
}

/// Copies a whole sprite buffer onto `dst` at a signed position, skipping
/// transparent-key pixels and clipping on all four edges.
///
/// A placement with no visible overlap is not an error; nothing is written.
pub fn blit_keyed(dst: &mut IndexedBuffer, src: &IndexedBuffer, xpos: i32, ypos: i32) {
    let mut w = src.width() as i32;
    let mut h = src.height() as i32;
    let mut src_x = 0usize;
    let mut src_y = 0usize;
    let mut x = xpos;
    let mut y = ypos;

    if y < 0 {
        h += y;
        src_y = (-y) as usize;
        y = 0;
    }
    if x < 0 {
        w += x;
        src_x = (-x) as usize;
        x = 0;
    }
    w = w.min(dst.width() as i32 - x);
    h = h.min(dst.height() as i32 - y);
    if w <= 0 || h <= 0 {
        return;
    }

    let src_stride = src.stride();
    let dst_stride = dst.stride();
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for row in 0..h as usize {
        let s = (src_y + row) * src_stride + src_x;
        let d = (y as usize + row) * dst_stride + x as usize;
        for col in 0..w as usize {
            let c = src_data[s + col];
            if c != TRANSPARENT_KEY {
                dst_data[d + col] = c;
            }
        }
    }
}
