//! Scanline renderers.
//!
//! [`RendererBase`] clips horizontal spans to an inclusive clip box and
//! hands them to a [`PixelFormat`]. The two drivers pull rows from the
//! rasterizer: [`render_scanlines_solid`] paints one color through the
//! packed scanline, [`render_scanlines_span`] asks a [`SpanGenerator`] for
//! per-pixel colors through the unpacked scanline.

use crate::basics::{CoverType, RectI};
use crate::color::Rgba8;
use crate::pixfmt::PixelFormat;
use crate::rasterizer::{RasterizerScanlineAa, Scanline};
use crate::scanline::{ScanlineP8, ScanlineU8};

// ============================================================================
// RendererBase
// ============================================================================

pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Wrap `ren`, clipping to its full extent.
    pub fn new(ren: PF) -> Self {
        let w = ren.width() as i32;
        let h = ren.height() as i32;
        Self {
            ren,
            clip_box: RectI::new(0, 0, w - 1, h - 1),
        }
    }

    /// Restrict output to the inclusive rectangle, intersected with the
    /// buffer. Returns `false` (and clips everything) when they don't meet.
    pub fn set_clip_box(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        let mut cb = RectI::new(x1, y1, x2, y2);
        cb.normalize();
        let bounds = RectI::new(0, 0, self.ren.width() as i32 - 1, self.ren.height() as i32 - 1);
        if cb.clip(&bounds) {
            self.clip_box = cb;
            true
        } else {
            self.clip_box = RectI::new(1, 1, 0, 0);
            false
        }
    }

    pub fn clip_box(&self) -> &RectI {
        &self.clip_box
    }

    pub fn ren(&self) -> &PF {
        &self.ren
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.clip_box.hit_test(x, y)
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        if self.inbox(x, y) {
            self.ren.blend_pixel(x, y, c, cover);
        }
    }

    /// Blend `c` over the inclusive range `x1..=x2` of row `y`.
    pub fn blend_hline(&mut self, x1: i32, y: i32, x2: i32, c: &Rgba8, cover: CoverType) {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let cb = self.clip_box;
        if y > cb.y2 || y < cb.y1 || x1 > cb.x2 || x2 < cb.x1 {
            return;
        }
        let x1 = x1.max(cb.x1);
        let x2 = x2.min(cb.x2);
        self.ren.blend_hline(x1, y, (x2 - x1 + 1) as u32, c, cover);
    }

    /// Clip the span `x..x + len` of row `y`. Returns the visible start and
    /// length plus how many leading pixels were cut.
    #[inline]
    fn clip_span(&self, x: i32, y: i32, len: i32) -> Option<(i32, i32, usize)> {
        let cb = &self.clip_box;
        if y > cb.y2 || y < cb.y1 {
            return None;
        }
        let (mut x, mut len, mut skip) = (x, len, 0usize);
        if x < cb.x1 {
            let d = cb.x1 - x;
            len -= d;
            skip = d as usize;
            x = cb.x1;
        }
        if x + len > cb.x2 + 1 {
            len = cb.x2 - x + 1;
        }
        (len > 0).then_some((x, len, skip))
    }

    pub fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: i32,
        c: &Rgba8,
        covers: &[CoverType],
    ) {
        if let Some((x, len, skip)) = self.clip_span(x, y, len) {
            self.ren
                .blend_solid_hspan(x, y, len as u32, c, &covers[skip..]);
        }
    }

    /// Per-pixel colors; an empty `covers` applies `cover` to every pixel.
    pub fn blend_color_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: i32,
        colors: &[Rgba8],
        covers: &[CoverType],
        cover: CoverType,
    ) {
        if let Some((x, len, skip)) = self.clip_span(x, y, len) {
            let covers = if covers.is_empty() {
                covers
            } else {
                &covers[skip..]
            };
            self.ren
                .blend_color_hspan(x, y, len as u32, &colors[skip..], covers, cover);
        }
    }
}

// ============================================================================
// Solid color
// ============================================================================

/// Paint every row of `ras` in `color`.
pub fn render_scanlines_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineP8,
    ren: &mut RendererBase<PF>,
    color: &Rgba8,
) {
    if !ras.rewind_scanlines() {
        return;
    }
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        for span in sl.spans() {
            let covers = sl.covers(span);
            if span.is_solid() {
                let x2 = span.x + span.pixel_len() as i32 - 1;
                ren.blend_hline(span.x, y, x2, color, covers[0]);
            } else {
                ren.blend_solid_hspan(span.x, y, span.len, color, covers);
            }
        }
    }
}

// ============================================================================
// Span generators
// ============================================================================

/// Producer of per-pixel colors for [`render_scanlines_span`].
pub trait SpanGenerator {
    /// Called once before the first row.
    fn prepare(&mut self) {}

    /// Fill `span` with the colors of pixels `x..x + span.len()` of row `y`.
    fn generate(&mut self, span: &mut [Rgba8], x: i32, y: i32);
}

/// Reusable color buffer for span generators. Grows in steps of 256 and
/// never shrinks.
pub struct SpanAllocator {
    span: Vec<Rgba8>,
}

impl SpanAllocator {
    pub fn new() -> Self {
        Self { span: Vec::new() }
    }

    pub fn allocate(&mut self, len: usize) -> &mut [Rgba8] {
        if len > self.span.len() {
            let size = ((len + 255) >> 8) << 8;
            self.span.resize(size, Rgba8::transparent());
        }
        &mut self.span[..len]
    }

    pub fn capacity(&self) -> usize {
        self.span.len()
    }
}

impl Default for SpanAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Paint every row of `ras` with colors from `span_gen`.
pub fn render_scanlines_span<PF, SG>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    ren: &mut RendererBase<PF>,
    alloc: &mut SpanAllocator,
    span_gen: &mut SG,
) where
    PF: PixelFormat,
    SG: SpanGenerator + ?Sized,
{
    if !ras.rewind_scanlines() {
        return;
    }
    sl.reset(ras.min_x(), ras.max_x());
    span_gen.prepare();
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        for span in sl.spans() {
            let colors = alloc.allocate(span.len as usize);
            span_gen.generate(colors, span.x, y);
            ren.blend_color_hspan(span.x, y, span.len as i32, colors, sl.covers(span), 0);
        }
    }
}
