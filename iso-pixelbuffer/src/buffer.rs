//! Owned pixel storage and borrowed buffer views.
//!
//! [`IndexedBuffer`] owns a rectangular store of 8-bit palette indices in a
//! contiguous `Vec<u8>` with an explicit row stride. [`BufferView`] and
//! [`BufferViewMut`] are the non-owning handles (base slice + width + height
//! + stride) that decode and blit operations borrow for the duration of a
//! call; bounds arithmetic lives here rather than being repeated in every
//! inner loop.
//!
//! # Memory Layout
//!
//! Row-major with stride ≥ width. For a buffer of width W, height H, and
//! stride S:
//!
//! ```text
//! Total size = S * H bytes
//! Pixel at (x, y) is at offset: y * S + x
//! ```
//!
//! # Example
//!
//! ```
//! use iso_pixelbuffer::IndexedBuffer;
//!
//! let mut buffer = IndexedBuffer::new(320, 200);
//! assert_eq!(buffer.stride(), 320);
//!
//! let mut view = buffer.view_mut();
//! view.row_mut(10)[5] = 0x3f;
//! assert_eq!(buffer.view().pixel(5, 10), 0x3f);
//! ```

use anyhow::{anyhow, Result};
use iso_common::Rect;

/// An owned rectangular store of indexed-color pixels.
///
/// The invariant `stride >= width` always holds; the backing vector is
/// exactly `stride * height` bytes. Buffers are created zero-filled, which
/// is also the transparent key.
#[derive(Debug, Clone)]
pub struct IndexedBuffer {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl IndexedBuffer {
    /// Creates a tightly packed buffer (stride equals width), zero-filled.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = width as usize;
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height as usize],
        }
    }

    /// Creates a buffer with row padding (stride larger than width).
    ///
    /// Returns an error if `stride < width`.
    pub fn with_stride(width: u32, height: u32, stride: usize) -> Result<Self> {
        if stride < width as usize {
            return Err(anyhow!(
                "Stride {} smaller than width {}",
                stride,
                width
            ));
        }
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height as usize],
        })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Row stride in pixels (== bytes).
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Buffer dimensions as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw pixel data, `stride * height` bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel data.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bounding rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Read-only view of the whole buffer.
    pub fn view(&self) -> BufferView<'_> {
        BufferView {
            data: &self.data,
            width: self.width as usize,
            height: self.height as usize,
            stride: self.stride,
        }
    }

    /// Mutable view of the whole buffer.
    pub fn view_mut(&mut self) -> BufferViewMut<'_> {
        BufferViewMut {
            data: &mut self.data,
            width: self.width as usize,
            height: self.height as usize,
            stride: self.stride,
        }
    }

    /// Mutable view of a sub-region, carrying this buffer's stride.
    ///
    /// This is how a sprite is decoded directly into a cell of a larger
    /// atlas: the region's width is the sprite's width while row advance
    /// still uses the atlas stride.
    ///
    /// Returns an error if the rectangle does not lie within the buffer.
    pub fn region_mut(&mut self, rect: Rect) -> Result<BufferViewMut<'_>> {
        self.validate_rect(rect)?;
        let start = rect.y as usize * self.stride + rect.x as usize;
        Ok(BufferViewMut {
            data: &mut self.data[start..],
            width: rect.width as usize,
            height: rect.height as usize,
            stride: self.stride,
        })
    }

    fn validate_rect(&self, rect: Rect) -> Result<()> {
        if rect.x < 0
            || rect.y < 0
            || rect.x as u32 + rect.width > self.width
            || rect.y as u32 + rect.height > self.height
        {
            return Err(anyhow!(
                "Rectangle out of bounds: {:?} (buffer size: {}x{})",
                rect,
                self.width,
                self.height
            ));
        }
        Ok(())
    }
}

/// Read-only borrowed view: base slice + width + height + stride.
#[derive(Debug, Clone, Copy)]
pub struct BufferView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> BufferView<'a> {
    /// Wraps an externally owned slice as a view.
    ///
    /// Returns an error if `stride < width` or the slice is too short to
    /// hold `height` rows.
    pub fn wrap(data: &'a [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate_view(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` meaningful pixels of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }
}

/// Mutable borrowed view over a buffer or a sub-region of one.
#[derive(Debug)]
pub struct BufferViewMut<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> BufferViewMut<'a> {
    /// Wraps an externally owned slice as a mutable view.
    pub fn wrap(data: &'a mut [u8], width: usize, height: usize, stride: usize) -> Result<Self> {
        validate_view(data.len(), width, height, stride)?;
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The `width` meaningful pixels of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    /// Mutable access to the `width` meaningful pixels of row `y`.
    ///
    /// The stride padding beyond `width` is deliberately not reachable
    /// through this accessor.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.data[start..start + self.width]
    }

    /// Raw backing slice, stride-addressed.
    pub fn raw_mut(&mut self) -> &mut [u8] {
        self.data
    }
}

fn validate_view(len: usize, width: usize, height: usize, stride: usize) -> Result<()> {
    if stride < width {
        return Err(anyhow!("Stride {} smaller than width {}", stride, width));
    }
    // The final row only needs `width` bytes, not a full stride.
    let needed = if height == 0 {
        0
    } else {
        (height - 1) * stride + width
    };
    if len < needed {
        return Err(anyhow!(
            "Slice of {} bytes too short for {}x{} view with stride {}",
            len,
            width,
            height,
            stride
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_buffer() {
        let buffer = IndexedBuffer::new(100, 50);
        assert_eq!(buffer.dimensions(), (100, 50));
        assert_eq!(buffer.stride(), 100);
        assert_eq!(buffer.data().len(), 100 * 50);
        assert!(buffer.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_with_stride() {
        let buffer = IndexedBuffer::with_stride(100, 50, 128).unwrap();
        assert_eq!(buffer.stride(), 128);
        assert_eq!(buffer.data().len(), 128 * 50);

        assert!(IndexedBuffer::with_stride(100, 50, 99).is_err());
    }

    #[test]
    fn test_view_pixel_access() {
        let mut buffer = IndexedBuffer::with_stride(10, 4, 16).unwrap();
        buffer.view_mut().row_mut(2)[7] = 42;
        assert_eq!(buffer.view().pixel(7, 2), 42);
        assert_eq!(buffer.data()[2 * 16 + 7], 42);
    }

    #[test]
    fn test_region_mut_offsets() {
        let mut buffer = IndexedBuffer::new(20, 20);
        {
            let mut region = buffer.region_mut(Rect::new(5, 5, 4, 3)).unwrap();
            assert_eq!(region.width(), 4);
            assert_eq!(region.stride(), 20);
            region.row_mut(1).fill(9);
        }
        // Row 1 of the region is buffer row 6, columns 5..9.
        assert_eq!(buffer.view().pixel(5, 6), 9);
        assert_eq!(buffer.view().pixel(8, 6), 9);
        assert_eq!(buffer.view().pixel(4, 6), 0);
        assert_eq!(buffer.view().pixel(9, 6), 0);
    }

    #[test]
    fn test_region_mut_out_of_bounds() {
        let mut buffer = IndexedBuffer::new(20, 20);
        assert!(buffer.region_mut(Rect::new(15, 0, 10, 5)).is_err());
        assert!(buffer.region_mut(Rect::new(-1, 0, 5, 5)).is_err());
        assert!(buffer.region_mut(Rect::new(0, 18, 5, 5)).is_err());
    }

    #[test]
    fn test_wrap_validation() {
        let mut data = vec![0u8; 16 * 3 + 10];
        // 10-wide, 4 rows, stride 16: last row needs only 10 bytes.
        assert!(BufferViewMut::wrap(&mut data, 10, 4, 16).is_ok());
        let data2 = vec![0u8; 10];
        assert!(BufferView::wrap(&data2, 10, 2, 16).is_err());
        assert!(BufferView::wrap(&data2, 10, 1, 8).is_err());
    }
}
