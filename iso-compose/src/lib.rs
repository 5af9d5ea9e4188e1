//! Palette-remapped sprite compositing.
//!
//! Merges a fully decoded sprite onto a scene buffer through a 256-entry
//! remap table, so one set of sprite pixels serves every recolored variant
//! (player colors, lighting tints) without duplicating the data. Pixels
//! equal to the transparency key leave the destination untouched.
//!
//! Unlike the tile renderer, these primitives perform no clipping: the
//! placement must keep the sprite fully inside the destination, and a
//! placement that does not fit is rejected as a caller bug. Pre-clip with
//! the blit layer if partial placements are needed.

use anyhow::{anyhow, Result};
use iso_pixelbuffer::{IndexedBuffer, TRANSPARENT_KEY};

/// A 256-entry palette index remap table.
pub type RemapTable = [u8; 256];

/// The identity remap table (every index maps to itself).
pub fn identity_table() -> RemapTable {
    let mut table = [0u8; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = i as u8;
    }
    table
}

fn validate_placement(dst: &IndexedBuffer, sprite: &IndexedBuffer, x: i32, y: i32) -> Result<()> {
    if x < 0
        || y < 0
        || x as usize + sprite.width() > dst.width()
        || y as usize + sprite.height() > dst.height()
    {
        return Err(anyhow!(
            "Sprite placement out of bounds: {}x{} at ({}, {}) in {}x{}",
            sprite.width(),
            sprite.height(),
            x,
            y,
            dst.width(),
            dst.height()
        ));
    }
    Ok(())
}

/// Composites `sprite` onto `dst` at `(x, y)`, remapping every non-key
/// pixel through `lookup`.
pub fn composite(
    dst: &mut IndexedBuffer,
    sprite: &IndexedBuffer,
    x: i32,
    y: i32,
    lookup: &RemapTable,
) -> Result<()> {
    validate_placement(dst, sprite, x, y)?;

    let width = sprite.width();
    let src_stride = sprite.stride();
    let dst_stride = dst.stride();
    let src_data = sprite.data();
    let dst_data = dst.data_mut();

    for row in 0..sprite.height() {
        let s = row * src_stride;
        let d = (y as usize + row) * dst_stride + x as usize;
        for col in 0..width {
            let c = src_data[s + col];
            if c != TRANSPARENT_KEY {
                dst_data[d + col] = lookup[c as usize];
            }
        }
    }

    Ok(())
}

/// As [`composite`], but draws the sprite vertically mirrored.
///
/// Source rows are consumed bottom to top with column order preserved, so
/// row `height-1-i` of the sprite lands where row `i` would; the sprite data
/// itself needs no mirrored copy. The destination footprint is the same
/// `(x, y)` rectangle as the forward variant.
pub fn composite_flipped(
    dst: &mut IndexedBuffer,
    sprite: &IndexedBuffer,
    x: i32,
    y: i32,
    lookup: &RemapTable,
) -> Result<()> {
    validate_placement(dst, sprite, x, y)?;

    let width = sprite.width();
    let height = sprite.height();
    let src_stride = sprite.stride();
    let dst_stride = dst.stride();
    let src_data = sprite.data();
    let dst_data = dst.data_mut();

    for row in 0..height {
        let s = (height - 1 - row) * src_stride;
        let d = (y as usize + row) * dst_stride + x as usize;
        for col in 0..width {
            let c = src_data[s + col];
            if c != TRANSPARENT_KEY {
                dst_data[d + col] = lookup[c as usize];
            }
        }
    }

    Ok(())
}
