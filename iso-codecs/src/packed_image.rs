//! Packed image decoder - signed-control-byte row compression.
//!
//! A PackBits-style scheme, row oriented. Each encoded row produces an even
//! number of bytes (the row's byte budget is the pixel width rounded up to
//! even; for an odd width the final byte is padding and is discarded).
//!
//! # Wire Format
//!
//! A stream of control bytes, each followed by its payload:
//!
//! ```text
//! control p (i8):
//!   p == -128   no-op, skip
//!   p >= 0      copy p+1 literal bytes from the stream
//!   p < 0       repeat the next single stream byte 1-p times
//! ```
//!
//! Rows are not length-prefixed: decoding a row continues until its byte
//! budget is exhausted, and the stream is consumed by however many bytes the
//! control codes cover. The caller must supply a correctly positioned stream
//! and cannot rely on a known consumed length.
//!
//! # Clamping
//!
//! A run that would overshoot the row's byte budget is consumed from the
//! stream in full but only the in-budget, in-width prefix is written, so
//! adversarial input can never write outside the destination view. A
//! truncated stream ends decoding early without error.

use crate::CodecError;
use iso_pixelbuffer::BufferViewMut;

/// Decodes a packed image into the top-left `width` x `rows` region of
/// `dst`, honoring the destination stride for row advance.
///
/// The destination may be a sub-region of a larger atlas (see
/// `IndexedBuffer::region_mut`); exactly `width * rows` meaningful bytes
/// are written.
pub fn decode_packed_image(
    dst: &mut BufferViewMut<'_>,
    width: usize,
    rows: usize,
    src: &[u8],
) -> Result<(), CodecError> {
    if src.is_empty() {
        return Err(CodecError::EmptyStream);
    }
    if width == 0 || rows == 0 {
        return Err(CodecError::EmptyTarget {
            width,
            height: rows,
        });
    }
    if width > dst.width() || rows > dst.height() {
        return Err(CodecError::TargetTooSmall {
            width,
            height: rows,
            dst_width: dst.width(),
            dst_height: dst.height(),
        });
    }

    // Row budget padded to an even byte count.
    let byte_budget = (width + 1) & !1;
    let mut pos = 0usize;

    for row in 0..rows {
        let out = dst.row_mut(row);
        let mut emitted = 0usize;

        while emitted < byte_budget {
            let Some(&ctl) = src.get(pos) else {
                tracing::trace!(row, emitted, "packed image stream truncated");
                return Ok(());
            };
            pos += 1;

            let p = ctl as i8;
            if p == -128 {
                continue;
            }

            if p >= 0 {
                // Literal run of p+1 bytes.
                let n = p as usize + 1;
                let take = n.min(src.len() - pos);
                let writable = take.min(width.saturating_sub(emitted));
                out[emitted..emitted + writable]
                    .copy_from_slice(&src[pos..pos + writable]);
                pos += take;
                emitted += n;
            } else {
                // Repeat the next byte 1-p times.
                let n = (1 - p as i32) as usize;
                let Some(&value) = src.get(pos) else {
                    tracing::trace!(row, emitted, "packed image stream truncated");
                    return Ok(());
                };
                pos += 1;
                let writable = n.min(width.saturating_sub(emitted));
                out[emitted..emitted + writable].fill(value);
                emitted += n;
            }
        }
    }

    Ok(())
}
