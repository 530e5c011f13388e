//! Pre-multiplied BGRA8 pixel format and buffer compositing.
//!
//! Byte order inside a pixel is B, G, R, A. Every channel is stored
//! pre-multiplied by alpha, so blending a pre-multiplied source `s` over a
//! destination `d` is `d' = s + d · (1 - s.a)` per channel.

use crate::basics::{CoverType, COVER_FULL};
use crate::color::Rgba8;
use crate::paint::BlendMode;
use crate::pixel_buffer::{PixelBuffer, BPP};

const B: usize = 0;
const G: usize = 1;
const R: usize = 2;
const A: usize = 3;

/// Pixel access used by [`RendererBase`](crate::renderer::RendererBase).
///
/// Coordinates are trusted: the renderer clips before calling in.
pub trait PixelFormat {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn pixel(&self, x: i32, y: i32) -> Rgba8;

    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8);

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType);

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType);

    /// One color, per-pixel coverage.
    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]);

    /// Per-pixel colors. An empty `covers` means every pixel uses `cover`.
    fn blend_color_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        colors: &[Rgba8],
        covers: &[CoverType],
        cover: CoverType,
    );
}

/// Source-over of the pre-multiplied color (r, g, b, a) onto `p` at
/// `cover`.
#[inline]
fn blend_pix(p: &mut [u8], c: &Rgba8, cover: CoverType) {
    let s = if cover == COVER_FULL { *c } else { c.scaled(cover) };
    if s.a == 0 {
        return;
    }
    if s.a == COVER_FULL {
        p[R] = s.r;
        p[G] = s.g;
        p[B] = s.b;
        p[A] = s.a;
        return;
    }
    p[R] = Rgba8::prelerp(p[R], s.r, s.a);
    p[G] = Rgba8::prelerp(p[G], s.g, s.a);
    p[B] = Rgba8::prelerp(p[B], s.b, s.a);
    p[A] = Rgba8::prelerp(p[A], s.a, s.a);
}

#[inline]
fn set_pix(p: &mut [u8], c: &Rgba8) {
    p[R] = c.r;
    p[G] = c.g;
    p[B] = c.b;
    p[A] = c.a;
}

#[inline]
fn get_pix(p: &[u8]) -> Rgba8 {
    Rgba8::new(p[R], p[G], p[B], p[A])
}

/// Pre-multiplied BGRA8 view of a [`PixelBuffer`].
pub struct PixfmtBgra32Pre<'b, 'a> {
    buf: &'b mut PixelBuffer<'a>,
}

impl<'b, 'a> PixfmtBgra32Pre<'b, 'a> {
    pub fn new(buf: &'b mut PixelBuffer<'a>) -> Self {
        Self { buf }
    }

    #[inline]
    fn span_mut(&mut self, x: i32, y: i32, len: u32) -> &mut [u8] {
        let start = x as usize * BPP;
        &mut self.buf.row_mut(y as u32)[start..start + len as usize * BPP]
    }

    /// Overwrite every pixel with `c`.
    pub fn clear(&mut self, c: &Rgba8) {
        self.buf.for_each_pixel_mut(|p| set_pix(p, c));
    }

    /// Composite `src` onto this buffer with its top-left corner at
    /// (`dx`, `dy`). Only the overlap of both rectangles is touched.
    pub fn blend_from(
        &mut self,
        src: &PixelBuffer<'_>,
        mode: BlendMode,
        cover: CoverType,
        dx: i64,
        dy: i64,
    ) -> bool {
        let x1 = dx.max(0);
        let y1 = dy.max(0);
        let x2 = (dx + src.width() as i64).min(self.buf.width() as i64);
        let y2 = (dy + src.height() as i64).min(self.buf.height() as i64);
        if x1 >= x2 || y1 >= y2 {
            return false;
        }

        let len = (x2 - x1) as usize * BPP;
        let src_x = (x1 - dx) as usize * BPP;
        let dst_x = x1 as usize * BPP;
        for y in y1..y2 {
            let s = &src.row((y - dy) as u32)[src_x..src_x + len];
            let d = &mut self.buf.row_mut(y as u32)[dst_x..dst_x + len];
            let pixels = d.chunks_exact_mut(BPP).zip(s.chunks_exact(BPP));
            match mode {
                BlendMode::SrcOver => {
                    for (dp, sp) in pixels {
                        blend_pix(dp, &get_pix(sp), cover);
                    }
                }
                BlendMode::DstIn => {
                    for (dp, sp) in pixels {
                        let k = COVER_FULL - cover + Rgba8::multiply(sp[A], cover);
                        for c in dp.iter_mut() {
                            *c = Rgba8::multiply(*c, k);
                        }
                    }
                }
            }
        }
        true
    }

    /// Replace alpha with the luminosity `(2R + 3G + B) / 6`.
    pub fn update_luminance(&mut self) {
        self.buf.for_each_pixel_mut(|p| {
            let l = (2 * p[R] as u32 + 3 * p[G] as u32 + p[B] as u32) / 6;
            p[A] = l as u8;
        });
    }

    /// Un-premultiply and reorder every pixel to R, G, B, A.
    pub fn convert_to_rgba(&mut self) {
        self.buf.for_each_pixel_mut(|p| {
            let mut c = get_pix(p);
            c.demultiply();
            p.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        });
    }
}

impl PixelFormat for PixfmtBgra32Pre<'_, '_> {
    fn width(&self) -> u32 {
        self.buf.width()
    }

    fn height(&self) -> u32 {
        self.buf.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        let off = x as usize * BPP;
        get_pix(&self.buf.row(y as u32)[off..off + BPP])
    }

    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8) {
        for p in self.span_mut(x, y, len).chunks_exact_mut(BPP) {
            set_pix(p, c);
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        blend_pix(self.span_mut(x, y, 1), c, cover);
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType) {
        if c.a == 0 || cover == 0 {
            return;
        }
        for p in self.span_mut(x, y, len).chunks_exact_mut(BPP) {
            blend_pix(p, c, cover);
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        if c.a == 0 {
            return;
        }
        for (p, &cover) in self.span_mut(x, y, len).chunks_exact_mut(BPP).zip(covers) {
            blend_pix(p, c, cover);
        }
    }

    fn blend_color_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        colors: &[Rgba8],
        covers: &[CoverType],
        cover: CoverType,
    ) {
        let pixels = self.span_mut(x, y, len).chunks_exact_mut(BPP).zip(colors);
        if covers.is_empty() {
            for (p, c) in pixels {
                blend_pix(p, c, cover);
            }
        } else {
            for ((p, c), &cover) in pixels.zip(covers) {
                blend_pix(p, c, cover);
            }
        }
    }
}
