//! Sprite codecs for the indexed-color compositing engine.
//!
//! This crate decodes the engine's compressed sprite and tile formats into
//! [`IndexedBuffer`] pixels. Three formats exist, none interchangeable:
//!
//! - **Packed image** ([`decode_packed_image`]): row-oriented PackBits-style
//!   scheme with signed control bytes, used for UI images and backgrounds.
//! - **Sprite runs** ([`decode_sprite_runs`]): flat alternating
//!   transparent/opaque run pairs, used for actor sprites.
//! - **Iso tile rows** ([`tile::draw_tile`]): per-scanline skip/draw run
//!   pairs for the fixed-width diamond ground tiles. Never materialized as a
//!   standalone buffer; decoded lazily while blitting against the
//!   destination with internal clipping.
//!
//! Callers that only carry a format tag with their resource go through the
//! single [`decode`] entry point with an [`Encoding`] variant instead of
//! picking a routine themselves.
//!
//! # Failure Policy
//!
//! Preconditions (empty stream, zero dimensions) fail with a [`CodecError`];
//! they indicate a caller bug. Malformed run data is never an error: runs
//! that would overshoot the destination are clamped and a truncated stream
//! simply ends decoding early, possibly with visually wrong content.

use iso_common::Rect;
use iso_pixelbuffer::IndexedBuffer;
use thiserror::Error;

pub mod packed_image;
pub mod sprite_runs;
pub mod tile;

pub use packed_image::decode_packed_image;
pub use sprite_runs::decode_sprite_runs;
pub use tile::{draw_tile, mask_tile, TILE_WIDTH};

/// Errors raised for caller precondition violations.
///
/// Malformed encoded data never surfaces here; see the crate-level failure
/// policy.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The encoded byte stream was empty.
    #[error("Empty encoded stream")]
    EmptyStream,

    /// A decode target or declared sprite size had zero area.
    #[error("Zero-area decode target: {width}x{height}")]
    EmptyTarget { width: usize, height: usize },

    /// The declared sprite size does not fit the destination view.
    #[error("Sprite {width}x{height} exceeds destination {dst_width}x{dst_height}")]
    TargetTooSmall {
        width: usize,
        height: usize,
        dst_width: usize,
        dst_height: usize,
    },

    /// Sprite-run decoding requires a packed destination.
    #[error("Sprite-run destination must be packed (stride {stride} != width {width})")]
    PaddedTarget { stride: usize, width: usize },

    /// Tile height must be positive.
    #[error("Non-positive tile height: {0}")]
    BadTileHeight(i32),
}

/// Tag identifying which codec an encoded resource uses.
///
/// Resources carry this tag from the loader; [`decode`] dispatches on it so
/// callers never name a decode routine directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Packed image, decoded into the top-left `width` x `rows` region.
    PackedImage { width: usize, rows: usize },
    /// Sprite runs, decoded into the whole (packed) buffer.
    SpriteRuns,
    /// Iso tile rows, streamed onto the destination at the given anchor.
    IsoTile {
        x: i32,
        y: i32,
        height: i32,
        mask_only: bool,
    },
}

/// Decodes `src` into `dst` according to `encoding`.
///
/// Returns the dirty rectangle: the full target region for the buffer
/// formats, or the spans actually written for a tile (possibly empty when
/// the tile is entirely off-screen).
pub fn decode(dst: &mut IndexedBuffer, src: &[u8], encoding: Encoding) -> Result<Rect, CodecError> {
    match encoding {
        Encoding::PackedImage { width, rows } => {
            let mut view = dst.view_mut();
            decode_packed_image(&mut view, width, rows, src)?;
            Ok(Rect::new(0, 0, width as u32, rows as u32))
        }
        Encoding::SpriteRuns => {
            let bounds = dst.bounds();
            decode_sprite_runs(&mut dst.view_mut(), src)?;
            Ok(bounds)
        }
        Encoding::IsoTile {
            x,
            y,
            height,
            mask_only,
        } => draw_tile(dst, x, y, height, src, mask_only),
    }
}
