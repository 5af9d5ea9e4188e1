//! Round-trip and reference-model tests for the sprite codecs.
//!
//! Reference encoders live here, not in the crate: game data only ever
//! needs decoding, but encode-then-decode against arbitrary pixel grids is
//! the strongest check the decoders reproduce the exact source grid.

use iso_codecs::{decode_packed_image, decode_sprite_runs, draw_tile, TILE_WIDTH};
use iso_common::Rect;
use iso_pixelbuffer::IndexedBuffer;
use proptest::prelude::*;

/// Surfaces decoder trace output under RUST_LOG; safe to call from every
/// test, only the first init wins.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

/// Encodes a pixel grid in the packed-image format, choosing repeat runs
/// for stretches of 3+ equal bytes and literal runs otherwise.
fn encode_packed_image(pixels: &[u8], width: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::new();
    for row in 0..rows {
        let mut bytes = pixels[row * width..(row + 1) * width].to_vec();
        if width & 1 == 1 {
            bytes.push(0); // pad the row to an even byte count
        }

        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            let mut run = 1;
            while i + run < bytes.len() && bytes[i + run] == b && run < 128 {
                run += 1;
            }
            if run >= 3 {
                out.push((1 - run as i32) as i8 as u8);
                out.push(b);
                i += run;
            } else {
                // Literal chunk up to the next long repeat (or 128 bytes).
                let start = i;
                let mut len = 0;
                while i < bytes.len() && len < 128 {
                    let b = bytes[i];
                    let mut ahead = 1;
                    while i + ahead < bytes.len() && bytes[i + ahead] == b && ahead < 3 {
                        ahead += 1;
                    }
                    if ahead >= 3 {
                        break;
                    }
                    i += 1;
                    len += 1;
                }
                out.push((len - 1) as u8);
                out.extend_from_slice(&bytes[start..start + len]);
            }
        }
    }
    out
}

/// Encodes a flat pixel span in the sprite-run format: zeros become
/// transparent runs, everything else opaque literal runs.
fn encode_sprite_runs(pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < pixels.len() {
        let start = i;
        while i < pixels.len() && pixels[i] == 0 && i - start < 255 {
            i += 1;
        }
        out.push((i - start) as u8);

        let ostart = i;
        while i < pixels.len() && pixels[i] != 0 && i - ostart < 255 {
            i += 1;
        }
        out.push((i - ostart) as u8);
        out.extend_from_slice(&pixels[ostart..i]);
    }
    out
}

proptest! {
    #[test]
    fn packed_image_roundtrip(
        width in 1usize..32,
        rows in 1usize..16,
        seed in prop::collection::vec(0u8..=255, 32 * 16),
    ) {
        init_logging();
        let pixels: Vec<u8> = (0..width * rows).map(|i| seed[i % seed.len()]).collect();
        let encoded = encode_packed_image(&pixels, width, rows);

        let mut dst = IndexedBuffer::new(width as u32, rows as u32);
        decode_packed_image(&mut dst.view_mut(), width, rows, &encoded).unwrap();
        prop_assert_eq!(dst.data(), &pixels[..]);
    }

    #[test]
    fn packed_image_roundtrip_strided(
        width in 1usize..24,
        rows in 1usize..12,
        pad in 1usize..8,
        seed in prop::collection::vec(0u8..=255, 24 * 12),
    ) {
        init_logging();
        let pixels: Vec<u8> = (0..width * rows).map(|i| seed[i % seed.len()]).collect();
        let encoded = encode_packed_image(&pixels, width, rows);

        let mut dst = IndexedBuffer::with_stride(
            width as u32,
            rows as u32,
            width + pad,
        ).unwrap();
        dst.data_mut().fill(0xa5);
        decode_packed_image(&mut dst.view_mut(), width, rows, &encoded).unwrap();

        for row in 0..rows {
            let offset = row * (width + pad);
            prop_assert_eq!(
                &dst.data()[offset..offset + width],
                &pixels[row * width..(row + 1) * width]
            );
            // Stride padding keeps its pre-decode sentinel.
            prop_assert!(dst.data()[offset + width..offset + width + pad]
                .iter()
                .all(|&b| b == 0xa5));
        }
    }

    #[test]
    fn sprite_runs_roundtrip(
        width in 1usize..32,
        height in 1usize..16,
        seed in prop::collection::vec(0u8..=255, 32 * 16),
        zero_every in 2usize..6,
    ) {
        init_logging();
        // Mix transparent stretches into the grid.
        let pixels: Vec<u8> = (0..width * height)
            .map(|i| if (i / zero_every) % 2 == 0 { 0 } else { seed[i % seed.len()].max(1) })
            .collect();
        let encoded = encode_sprite_runs(&pixels);

        let mut dst = IndexedBuffer::new(width as u32, height as u32);
        dst.data_mut().fill(0x5a); // decoder must write the zeros too
        decode_sprite_runs(&mut dst.view_mut(), &encoded).unwrap();
        prop_assert_eq!(dst.data(), &pixels[..]);
    }
}

/// One tile row as (background skip, foreground bytes) spans.
type RowSpans = Vec<(u8, Vec<u8>)>;

fn arbitrary_tile_rows(height: usize) -> impl Strategy<Value = Vec<RowSpans>> {
    prop::collection::vec(
        prop::collection::vec(
            (0u8..10, prop::collection::vec(1u8..=255, 1..10)),
            1..4,
        ),
        height..=height,
    )
}

fn encode_tile(rows: &[RowSpans]) -> Vec<u8> {
    let mut out = Vec::new();
    for spans in rows {
        let mut covered = 0u32;
        for (bg, fg) in spans {
            out.push(*bg);
            out.push(fg.len() as u8);
            out.extend_from_slice(fg);
            covered += *bg as u32 + fg.len() as u32;
        }
        assert!(covered < TILE_WIDTH as u32);
        out.push((TILE_WIDTH as u32 - covered) as u8);
    }
    out
}

/// Paints the tile by direct arithmetic, the model the streamed renderer
/// must agree with.
fn reference_paint(
    dst: &mut IndexedBuffer,
    rows: &[RowSpans],
    x: i32,
    y: i32,
) -> Option<Rect> {
    let dest_w = dst.width() as i32;
    let dest_h = dst.height() as i32;
    let left = x - TILE_WIDTH / 2;
    // The renderer's coarse bounding test skips everything when the tile
    // cannot intersect the destination.
    let top = y - rows.len() as i32;
    if left + TILE_WIDTH <= 0 || left >= dest_w || top >= dest_h {
        return None;
    }

    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for (r, spans) in rows.iter().enumerate() {
        let screen_row = y - rows.len() as i32 + r as i32;
        if screen_row < 0 || screen_row >= dest_h {
            continue;
        }
        let mut col = left;
        for (bg, fg) in spans {
            col += *bg as i32;
            for &px in fg {
                if col >= 0 && col < dest_w {
                    dst.view_mut().row_mut(screen_row as usize)[col as usize] = px;
                    let b = bounds.get_or_insert((col, screen_row, col + 1, screen_row + 1));
                    b.0 = b.0.min(col);
                    b.1 = b.1.min(screen_row);
                    b.2 = b.2.max(col + 1);
                    b.3 = b.3.max(screen_row + 1);
                }
                col += 1;
            }
        }
    }
    bounds.map(|(x1, y1, x2, y2)| Rect::new(x1, y1, (x2 - x1) as u32, (y2 - y1) as u32))
}

proptest! {
    #[test]
    fn tile_matches_reference_model(
        rows in (1usize..6).prop_flat_map(arbitrary_tile_rows),
        x in -40i32..120,
        y in -5i32..30,
    ) {
        init_logging();
        let runs = encode_tile(&rows);

        let mut expected = IndexedBuffer::new(80, 20);
        let expected_dirty = reference_paint(&mut expected, &rows, x, y);

        let mut actual = IndexedBuffer::new(80, 20);
        let dirty = draw_tile(&mut actual, x, y, rows.len() as i32, &runs, false).unwrap();

        prop_assert_eq!(actual.data(), expected.data());
        prop_assert_eq!(dirty, expected_dirty.unwrap_or(Rect::EMPTY));
    }
}
