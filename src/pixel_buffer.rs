//! Row-oriented access to a BGRA8 pixel buffer.
//!
//! The bytes either belong to the embedding application (borrowed, never
//! zeroed or freed here) or are allocated and zero-filled by the buffer
//! itself. Rows are `stride` bytes apart; only the first `width · 4` bytes
//! of each row are pixels, the remainder is padding that is never touched.

use crate::basics::POLY_SUBPIXEL_SHIFT;
use crate::error::{CanvasError, Result};

/// Bytes per pixel.
pub const BPP: usize = 4;

/// Largest width or height whose far edge is representable in the
/// rasterizer's 24.8 fixed-point coordinates.
pub const MAX_DIMENSION: u32 = (i32::MAX >> POLY_SUBPIXEL_SHIFT) as u32;

enum Storage<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Vec<u8>),
}

pub struct PixelBuffer<'a> {
    storage: Storage<'a>,
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap caller-owned memory. The pixels are used as they are.
    pub fn borrowed(data: &'a mut [u8], width: u32, height: u32, stride: usize) -> Result<Self> {
        let required = required_len(width, height, stride)?;
        if data.len() < required {
            return Err(CanvasError::BufferTooSmall {
                len: data.len(),
                required,
            });
        }
        Ok(Self {
            storage: Storage::Borrowed(data),
            width,
            height,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// The whole underlying byte slice, padding included.
    pub fn data(&self) -> &[u8] {
        match &self.storage {
            Storage::Borrowed(d) => d,
            Storage::Owned(v) => v,
        }
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Borrowed(d) => d,
            Storage::Owned(v) => v,
        }
    }

    #[inline]
    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        let start = y as usize * self.stride;
        start..start + self.width as usize * BPP
    }

    /// Pixel bytes of row `y`, without padding.
    ///
    /// # Panics
    /// If `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of bounds (height={})", self.height);
        let range = self.row_range(y);
        &self.data()[range]
    }

    /// Mutable pixel bytes of row `y`, without padding.
    ///
    /// # Panics
    /// If `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of bounds (height={})", self.height);
        let range = self.row_range(y);
        &mut self.data_mut()[range]
    }

    /// Bytes of pixel (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = x as usize * BPP;
        let row = self.row(y);
        Some([row[off], row[off + 1], row[off + 2], row[off + 3]])
    }

    /// Apply `f` to every pixel, row by row.
    pub fn for_each_pixel_mut(&mut self, mut f: impl FnMut(&mut [u8])) {
        for y in 0..self.height {
            for px in self.row_mut(y).chunks_exact_mut(BPP) {
                f(px);
            }
        }
    }
}

impl PixelBuffer<'static> {
    /// Allocate a zero-filled buffer with `stride = width · 4`.
    pub fn owned(width: u32, height: u32) -> Result<Self> {
        let stride = min_stride(width)?;
        let len = required_len(width, height, stride)?;
        Ok(Self {
            storage: Storage::Owned(vec![0; len]),
            width,
            height,
            stride,
        })
    }
}

fn min_stride(width: u32) -> Result<usize> {
    (width as usize)
        .checked_mul(BPP)
        .ok_or(CanvasError::SizeOverflow)
}

/// Smallest slice length that holds `height` rows of `width` pixels at
/// `stride`. The last row needs no padding.
fn required_len(width: u32, height: u32, stride: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(CanvasError::ZeroDimensions { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CanvasError::DimensionsTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    let min = min_stride(width)?;
    if stride < min {
        return Err(CanvasError::StrideTooSmall { stride, min });
    }
    stride
        .checked_mul(height as usize - 1)
        .and_then(|n| n.checked_add(min))
        .ok_or(CanvasError::SizeOverflow)
}
