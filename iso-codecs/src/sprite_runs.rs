//! Sprite run decoder - alternating transparent/opaque run pairs.
//!
//! # Wire Format
//!
//! A flat byte stream of alternating run lengths:
//!
//! ```text
//! +-----------------+
//! | transparent_len |  1 byte: write that many key (zero) pixels
//! +-----------------+
//! | opaque_len      |  1 byte: copy that many literal pixel bytes
//! |   literals...   |
//! +-----------------+
//! | ...pairs repeat |
//! ```
//!
//! Runs flow across row boundaries: the destination is treated as one flat
//! `width * height` pixel span, which is why a packed destination (stride ==
//! width) is required. The format is not explicitly framed; decoding ends
//! when the running remaining-pixel counter goes negative after a
//! transparent run, or once the opaque side has met the pixel count. The
//! final opaque run is clamped to the remaining capacity so an overshooting
//! stream cannot write past the buffer.

use crate::CodecError;
use iso_pixelbuffer::BufferViewMut;

/// Decodes sprite runs into a destination sized exactly `width` x `height`.
pub fn decode_sprite_runs(dst: &mut BufferViewMut<'_>, src: &[u8]) -> Result<(), CodecError> {
    if src.is_empty() {
        return Err(CodecError::EmptyStream);
    }
    let width = dst.width();
    let height = dst.height();
    if width == 0 || height == 0 {
        return Err(CodecError::EmptyTarget { width, height });
    }
    if dst.stride() != width {
        return Err(CodecError::PaddedTarget {
            stride: dst.stride(),
            width,
        });
    }

    let total = width * height;
    let out = dst.raw_mut();
    let mut remaining = total as i64;
    let mut at = 0usize;
    let mut pos = 0usize;

    loop {
        let Some(&trans) = src.get(pos) else { break };
        pos += 1;
        let zeros = (trans as usize).min(total - at);
        out[at..at + zeros].fill(0);
        at += zeros;
        remaining -= trans as i64;
        if remaining < 0 {
            break;
        }

        let Some(&run) = src.get(pos) else { break };
        pos += 1;
        let copy = (run as usize).min(total - at).min(src.len() - pos);
        out[at..at + copy].copy_from_slice(&src[pos..pos + copy]);
        at += copy;
        pos = (pos + run as usize).min(src.len());
        remaining -= run as i64;
        if remaining <= 0 {
            break;
        }
    }

    Ok(())
}
