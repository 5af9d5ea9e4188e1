//! Indexed-color pixel buffer types and blit primitives.
//!
//! This crate provides the owned pixel store and borrowed view types that
//! every decode, blit, and composite operation in the engine works against,
//! plus the low-level blit primitives themselves.
//!
//! # Critical: Stride May Exceed Width!
//!
//! Buffers carry an explicit row stride that may be larger than the pixel
//! width (padding, or a view into a sub-region of a larger atlas). All row
//! accesses must use `row * stride`, never `row * width`, and operations
//! bounded by `width` must never write into the padding bytes.
//!
//! Pixels are 8-bit palette indices, so stride in pixels and stride in bytes
//! coincide throughout this workspace.

pub mod blit;
pub mod buffer;

pub use buffer::{BufferView, BufferViewMut, IndexedBuffer};

/// Reserved palette index meaning "do not overwrite the destination".
///
/// Fixed engine-wide; it is never a renderable color and is not configurable
/// per sprite.
pub const TRANSPARENT_KEY: u8 = 0;
