//! Isometric tile renderer - streamed decode with internal clipping.
//!
//! Ground tiles are diamond shaped and encoded per scanline as alternating
//! run pairs, each row covering the fixed tile width:
//!
//! ```text
//! +----------------+
//! | background_len |  1 byte: transparent skip (consumes width, draws nothing)
//! +----------------+
//! | foreground_len |  1 byte: literal pixel bytes follow
//! |   literals...  |
//! +----------------+
//! | ...pairs repeat until the accumulated width reaches TILE_WIDTH (64)
//! ```
//!
//! A tile never materializes as a standalone buffer: the rows are decoded
//! lazily while blitting straight onto the destination, with per-row
//! horizontal clipping and whole-tile vertical clipping. Rows clipped off
//! the top of the destination still walk the stream so later rows decode
//! from the right position, and a partially visible run always consumes its
//! full encoded length so horizontal tracking stays correct off either edge.
//!
//! The returned dirty rectangle is the union of spans actually written,
//! already clamped to the destination; it is empty when nothing was drawn.

use crate::CodecError;
use iso_common::{Rect, RectAccumulator};
use iso_pixelbuffer::{IndexedBuffer, TRANSPARENT_KEY};

/// Fixed pixel width of the isometric diamond tile format.
pub const TILE_WIDTH: i32 = 64;

/// Draws (or masks) one encoded tile onto `dst`.
///
/// `(x, y)` anchor the tile's horizontal center and its baseline; the top
/// row lands at `y - tile_height`. With `mask` set, every opaque pixel
/// writes the transparency key instead of its literal value, carving a hole
/// for occlusion cutouts while honoring the same decoded coverage.
///
/// Placement fully outside the destination is not an error and returns an
/// empty rectangle; an empty `runs` stream or non-positive `tile_height` is
/// a caller bug and fails.
pub fn draw_tile(
    dst: &mut IndexedBuffer,
    x: i32,
    y: i32,
    tile_height: i32,
    runs: &[u8],
    mask: bool,
) -> Result<Rect, CodecError> {
    if runs.is_empty() {
        return Err(CodecError::EmptyStream);
    }
    if tile_height <= 0 {
        return Err(CodecError::BadTileHeight(tile_height));
    }

    let dest_w = dst.width() as i32;
    let dest_h = dst.height() as i32;
    let left = x - TILE_WIDTH / 2;

    // Degenerate bounding test before touching the encoding.
    let top = y - tile_height;
    if left + TILE_WIDTH <= 0 || left >= dest_w || top >= dest_h {
        tracing::trace!(x, y, tile_height, "tile fully outside destination");
        return Ok(Rect::EMPTY);
    }

    let stride = dst.stride();
    let data = dst.data_mut();
    let mut acc = RectAccumulator::new();
    let mut pos = 0usize;
    let low_bound = (top + tile_height).min(dest_h);

    'rows: for row in top..low_bound {
        let mut width_count = 0i32;

        if row < 0 {
            // Above the destination top: advance the stream, draw nothing.
            loop {
                let Some(&bg) = runs.get(pos) else { break 'rows };
                pos += 1;
                width_count += bg as i32;
                if width_count >= TILE_WIDTH {
                    break;
                }
                let Some(&fg) = runs.get(pos) else { break 'rows };
                pos += 1;
                width_count += fg as i32;
                pos += fg as usize;
            }
            continue;
        }

        let mut col = left;
        loop {
            let Some(&bg) = runs.get(pos) else { break 'rows };
            pos += 1;
            width_count += bg as i32;
            if width_count >= TILE_WIDTH {
                break;
            }
            col += bg as i32;

            let Some(&fg) = runs.get(pos) else { break 'rows };
            pos += 1;
            let fg = fg as i32;
            width_count += fg;

            // Overlap of [col, col+fg) with [0, dest_w). The run's full
            // width is consumed from the stream either way.
            let skip = (-col).clamp(0, fg);
            let start = col + skip;
            let visible = (dest_w - start).clamp(0, fg - skip);
            if visible > 0 {
                let d = row as usize * stride + start as usize;
                if mask {
                    data[d..d + visible as usize].fill(TRANSPARENT_KEY);
                    acc.add_span(start, row, visible as u32);
                } else {
                    let s = pos + skip as usize;
                    let take = (visible as usize).min(runs.len().saturating_sub(s));
                    data[d..d + take].copy_from_slice(&runs[s..s + take]);
                    acc.add_span(start, row, take as u32);
                    if take < visible as usize {
                        // Literals truncated mid-run: the stream is spent.
                        break 'rows;
                    }
                }
            }
            pos += fg as usize;
            col += fg;
        }
    }

    let dirty = acc.bounds();
    tracing::debug!(
        x = dirty.x,
        y = dirty.y,
        width = dirty.width,
        height = dirty.height,
        mask,
        "tile dirty rect"
    );
    Ok(dirty)
}

/// Carves a tile-shaped hole: [`draw_tile`] with masking on.
pub fn mask_tile(
    dst: &mut IndexedBuffer,
    x: i32,
    y: i32,
    tile_height: i32,
    runs: &[u8],
) -> Result<Rect, CodecError> {
    draw_tile(dst, x, y, tile_height, runs, true)
}
