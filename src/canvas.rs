//! The drawing surface.
//!
//! A [`Canvas`] owns (or borrows) a pre-multiplied BGRA8 pixel buffer and
//! the scratch state of the rendering pipeline:
//!
//! ```text
//!   Path -> PathFlattener -> [DashGenerator] -> [StrokeGenerator]
//!        -> RasterizerScanlineAa (device transform, clip)
//!        -> scanlines -> RendererBase -> PixfmtBgra32Pre
//! ```
//!
//! All scratch state lives for the canvas lifetime and is reset, not
//! reallocated, between calls.

use log::{debug, trace, warn};

use crate::basics::{opacity_to_cover, FillingRule};
use crate::color::Rgb;
use crate::dash::DashGenerator;
use crate::error::{CanvasError, Result};
use crate::flatten::PathFlattener;
use crate::paint::{BlendMode, Paint, PaintKind, StrokeData, WindRule};
use crate::path::Path;
use crate::pixel_buffer::PixelBuffer;
use crate::pixfmt::PixfmtBgra32Pre;
use crate::polyline::Polyline;
use crate::rasterizer::RasterizerScanlineAa;
use crate::renderer::{
    render_scanlines_solid, render_scanlines_span, RendererBase, SpanAllocator,
};
use crate::scanline::{ScanlineP8, ScanlineU8};
use crate::span_gradient::{GradientLut, SpanGradient};
use crate::stroke::StrokeGenerator;
use crate::trans_affine::AffineTransform;

/// Blend offsets beyond this magnitude miss any representable buffer.
const OFFSET_LIMIT: f64 = (1u64 << 40) as f64;

/// Dash patterns repeating faster than this, in device pixels, are stroked
/// solid.
const MIN_DASH_PERIOD: f64 = 1.0 / 256.0;

/// A pre-multiplied BGRA8 drawing surface.
pub struct Canvas<'a> {
    buffer: PixelBuffer<'a>,
    rasterizer: RasterizerScanlineAa,
    sl_p8: ScanlineP8,
    sl_u8: ScanlineU8,
    alloc: SpanAllocator,
    lut: GradientLut,
    flattener: PathFlattener,
    dasher: DashGenerator,
    stroker: StrokeGenerator,
    flattened: Polyline,
    dashed: Polyline,
    outline: Polyline,
}

impl Canvas<'static> {
    /// Allocate a zero-filled (transparent black) canvas with
    /// `stride = width · 4`. Neither dimension may exceed
    /// [`MAX_DIMENSION`](crate::MAX_DIMENSION).
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self::with_buffer(PixelBuffer::owned(width, height)?))
    }
}

impl<'a> Canvas<'a> {
    /// Draw into caller-owned memory laid out as `height` rows of `stride`
    /// bytes. Existing pixels are kept and must already be pre-multiplied.
    pub fn from_buffer(data: &'a mut [u8], width: u32, height: u32, stride: usize) -> Result<Self> {
        Ok(Self::with_buffer(PixelBuffer::borrowed(
            data, width, height, stride,
        )?))
    }

    fn with_buffer(buffer: PixelBuffer<'a>) -> Self {
        let mut rasterizer = RasterizerScanlineAa::new();
        rasterizer.set_clip_box(0.0, 0.0, buffer.width() as f64, buffer.height() as f64);
        debug!(
            "canvas {}x{} stride {} ({})",
            buffer.width(),
            buffer.height(),
            buffer.stride(),
            if buffer.is_owned() { "owned" } else { "borrowed" }
        );
        Self {
            buffer,
            rasterizer,
            sl_p8: ScanlineP8::new(),
            sl_u8: ScanlineU8::new(),
            alloc: SpanAllocator::new(),
            lut: GradientLut::new(),
            flattener: PathFlattener::new(),
            dasher: DashGenerator::new(),
            stroker: StrokeGenerator::new(),
            flattened: Polyline::new(),
            dashed: Polyline::new(),
            outline: Polyline::new(),
        }
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn stride(&self) -> usize {
        self.buffer.stride()
    }

    pub fn is_owned(&self) -> bool {
        self.buffer.is_owned()
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.data()
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        self.buffer.data_mut()
    }

    /// Raw bytes of pixel (x, y) in the buffer's current channel order.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.buffer.pixel(x, y)
    }

    // ====================================================================
    // Operations
    // ====================================================================

    /// Overwrite every pixel with `color`.
    pub fn clear(&mut self, color: Rgb) {
        PixfmtBgra32Pre::new(&mut self.buffer).clear(&color.premultiplied());
    }

    /// Fill and then stroke `path` under `mtx`.
    ///
    /// The fill uses `rule`; the stroke is always filled non-zero. A
    /// [`PaintKind::None`] paint skips its pass, and with both paints
    /// `None` nothing is touched.
    pub fn draw(
        &mut self,
        path: &Path,
        mtx: &AffineTransform,
        rule: WindRule,
        fill: &Paint,
        stroke: &Paint,
        stroke_data: &StrokeData,
    ) -> Result<()> {
        if fill.is_none() && stroke.is_none() {
            debug!("draw without paint ignored");
            return Ok(());
        }
        if !mtx.is_finite() {
            return Err(CanvasError::NonFiniteTransform);
        }
        for paint in [fill, stroke] {
            if let Some(g) = paint.as_gradient() {
                if !g.matrix.is_finite() {
                    return Err(CanvasError::NonFiniteTransform);
                }
            }
        }

        let scale = mtx.scale();
        let approx = if scale > 0.0 { scale } else { 1.0 };
        self.flattener.set_approximation_scale(approx);
        self.flattener.flatten(path, &mut self.flattened);

        if !fill.is_none() {
            self.rasterizer.reset();
            self.rasterizer.set_filling_rule(rule.into());
            self.rasterizer.add_polyline(&self.flattened, mtx);
            trace!(
                "fill: {} vertices in {} contours, rows {}..={}",
                self.flattened.total_vertices(),
                self.flattened.num_contours(),
                self.rasterizer.min_y(),
                self.rasterizer.max_y()
            );
            self.render(fill, mtx);
        }

        if !stroke.is_none() {
            self.stroke_pass(stroke, stroke_data, mtx, approx);
        }
        Ok(())
    }

    fn stroke_pass(&mut self, paint: &Paint, data: &StrokeData, mtx: &AffineTransform, approx: f64) {
        if !(data.width > 0.0 && data.width.is_finite()) {
            debug!("stroke width {} skipped", data.width);
            return;
        }
        self.stroker.configure(data);
        self.stroker.set_approximation_scale(approx);

        let mut dashed = data.is_dashed();
        if dashed {
            self.dasher.set_dash_array(&data.dash);
            let period = self.dasher.total_dash_len() * approx;
            if period < MIN_DASH_PERIOD {
                debug!("dash period of {period} device pixels too short, stroking solid");
                dashed = false;
            }
        } else if !data.dash.is_empty() {
            debug!("dash pattern of zero length ignored");
        }
        let source = if dashed {
            self.dasher.set_dash_start(data.dash_offset);
            self.dasher.generate(&self.flattened, &mut self.dashed);
            &self.dashed
        } else {
            &self.flattened
        };
        self.stroker.generate(source, &mut self.outline);

        self.rasterizer.reset();
        self.rasterizer.set_filling_rule(FillingRule::NonZero);
        self.rasterizer.add_polyline(&self.outline, mtx);
        trace!(
            "stroke: {} outline vertices, rows {}..={}",
            self.outline.total_vertices(),
            self.rasterizer.min_y(),
            self.rasterizer.max_y()
        );
        self.render(paint, mtx);
    }

    /// Render the rasterizer's current coverage with `paint`.
    fn render(&mut self, paint: &Paint, mtx: &AffineTransform) {
        let mut ren = RendererBase::new(PixfmtBgra32Pre::new(&mut self.buffer));
        match paint.kind() {
            PaintKind::None => {}
            PaintKind::Color(c) => {
                let color = c.with_opacity(paint.opacity()).premultiplied();
                render_scanlines_solid(&mut self.rasterizer, &mut self.sl_p8, &mut ren, &color);
            }
            PaintKind::Gradient(gradient) => {
                if !self.lut.build(&gradient.stops, paint.opacity()) {
                    warn!(
                        "gradient with {} stop(s) rendered transparent",
                        gradient.stops.len()
                    );
                    return;
                }
                match SpanGradient::new(gradient, mtx, &self.lut) {
                    Some(mut span_gen) => render_scanlines_span(
                        &mut self.rasterizer,
                        &mut self.sl_u8,
                        &mut ren,
                        &mut self.alloc,
                        &mut span_gen,
                    ),
                    None => {
                        let last = self.lut.last();
                        render_scanlines_solid(&mut self.rasterizer, &mut self.sl_p8, &mut ren, &last);
                    }
                }
            }
        }
    }

    /// Composite `src` onto this canvas with its top-left corner at
    /// `(⌊dx⌋, ⌊dy⌋)`. `opacity` scales the source; the parts of `src`
    /// that fall outside this canvas are ignored.
    pub fn blend(&mut self, src: &Canvas<'_>, mode: BlendMode, opacity: f64, dx: f64, dy: f64) {
        let cover = opacity_to_cover(opacity);
        let (dx, dy) = (floor_offset(dx), floor_offset(dy));
        let hit = PixfmtBgra32Pre::new(&mut self.buffer).blend_from(&src.buffer, mode, cover, dx, dy);
        if !hit {
            debug!("blend at ({dx}, {dy}) misses the canvas");
        }
    }

    /// Replace every alpha with the pixel's luminosity, for use as a mask.
    pub fn update_luminance(&mut self) {
        PixfmtBgra32Pre::new(&mut self.buffer).update_luminance();
    }

    /// Un-premultiply in place and reorder to RGBA. The canvas must not
    /// be drawn into or blended afterwards.
    pub fn convert_to_rgba(&mut self) {
        PixfmtBgra32Pre::new(&mut self.buffer).convert_to_rgba();
    }
}

fn floor_offset(v: f64) -> i64 {
    if v.is_nan() {
        0
    } else {
        v.floor().clamp(-OFFSET_LIMIT, OFFSET_LIMIT) as i64
    }
}
