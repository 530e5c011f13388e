//! Scanline containers filled by the rasterizer sweep.
//!
//! [`ScanlineU8`] keeps one coverage byte per pixel and suits span
//! generators that shade every pixel anyway. [`ScanlineP8`] stores runs of
//! equal coverage as a single byte, which is what solid fills want.

use crate::rasterizer::Scanline;

// ============================================================================
// ScanlineU8
// ============================================================================

/// A run of pixels with per-pixel coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: i32,
    pub len: u32,
    cover_offset: usize,
}

/// Unpacked scanline: covers are stored at `x - min_x`.
///
/// Call [`reset`](Self::reset) with the rasterizer's x range before the
/// first sweep.
pub struct ScanlineU8 {
    min_x: i32,
    last_x: i32,
    y: i32,
    covers: Vec<u8>,
    spans: Vec<Span>,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self {
            min_x: 0,
            last_x: i32::MIN,
            y: 0,
            covers: Vec::new(),
            spans: Vec::new(),
        }
    }

    pub fn reset(&mut self, min_x: i32, max_x: i32) {
        let max_len = (max_x - min_x + 2).max(0) as usize;
        if max_len > self.covers.len() {
            self.covers.resize(max_len, 0);
        }
        self.min_x = min_x;
        self.reset_spans();
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Coverage bytes of `span`, one per pixel.
    pub fn covers(&self, span: &Span) -> &[u8] {
        &self.covers[span.cover_offset..span.cover_offset + span.len as usize]
    }
}

impl Scanline for ScanlineU8 {
    fn reset_spans(&mut self) {
        self.last_x = i32::MIN;
        self.spans.clear();
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        self.add_span(x, 1, cover);
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let offset = (x - self.min_x) as usize;
        self.covers[offset..offset + len as usize].fill(cover as u8);
        let adjacent = x == self.last_x + 1;
        match self.spans.last_mut() {
            Some(span) if adjacent => span.len += len,
            _ => self.spans.push(Span {
                x,
                len,
                cover_offset: offset,
            }),
        }
        self.last_x = x + len as i32 - 1;
    }

    fn finalize(&mut self, y: i32) {
        self.y = y;
    }

    fn num_spans(&self) -> usize {
        self.spans.len()
    }

    fn y(&self) -> i32 {
        self.y
    }
}

impl Default for ScanlineU8 {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ScanlineP8
// ============================================================================

/// A packed span. A positive `len` has `len` coverage bytes; a negative
/// `len` is a solid run of `-len` pixels sharing one coverage byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedSpan {
    pub x: i32,
    pub len: i32,
    cover_offset: usize,
}

impl PackedSpan {
    #[inline]
    pub fn is_solid(&self) -> bool {
        self.len < 0
    }

    #[inline]
    pub fn pixel_len(&self) -> u32 {
        self.len.unsigned_abs()
    }
}

pub struct ScanlineP8 {
    last_x: i32,
    y: i32,
    covers: Vec<u8>,
    spans: Vec<PackedSpan>,
}

impl ScanlineP8 {
    pub fn new() -> Self {
        Self {
            last_x: i32::MIN,
            y: 0,
            covers: Vec::new(),
            spans: Vec::new(),
        }
    }

    pub fn spans(&self) -> &[PackedSpan] {
        &self.spans
    }

    /// Coverage bytes of `span`: one per pixel, or a single byte for a
    /// solid run.
    pub fn covers(&self, span: &PackedSpan) -> &[u8] {
        let n = if span.is_solid() { 1 } else { span.len as usize };
        &self.covers[span.cover_offset..span.cover_offset + n]
    }
}

impl Scanline for ScanlineP8 {
    fn reset_spans(&mut self) {
        self.last_x = i32::MIN;
        self.covers.clear();
        self.spans.clear();
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        let offset = self.covers.len();
        self.covers.push(cover as u8);
        let adjacent = x == self.last_x + 1;
        match self.spans.last_mut() {
            Some(span) if adjacent && span.len > 0 => span.len += 1,
            _ => self.spans.push(PackedSpan {
                x,
                len: 1,
                cover_offset: offset,
            }),
        }
        self.last_x = x;
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        let cover = cover as u8;
        let extends = x == self.last_x + 1
            && matches!(self.spans.last(),
                Some(span) if span.is_solid() && self.covers[span.cover_offset] == cover);
        match self.spans.last_mut() {
            Some(span) if extends => span.len -= len as i32,
            _ => {
                self.spans.push(PackedSpan {
                    x,
                    len: -(len as i32),
                    cover_offset: self.covers.len(),
                });
                self.covers.push(cover);
            }
        }
        self.last_x = x + len as i32 - 1;
    }

    fn finalize(&mut self, y: i32) {
        self.y = y;
    }

    fn num_spans(&self) -> usize {
        self.spans.len()
    }

    fn y(&self) -> i32 {
        self.y
    }
}

impl Default for ScanlineP8 {
    fn default() -> Self {
        Self::new()
    }
}
