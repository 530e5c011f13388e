//! # agg-canvas
//!
//! Anti-aliased 2D vector rasterization onto a pre-multiplied BGRA8 pixel
//! buffer, in the Anti-Grain Geometry scanline tradition.
//!
//! A [`Canvas`] fills and strokes paths with solid colors or linear and
//! radial gradients, composites canvases onto each other, and finally
//! converts its pixels to straight-alpha RGBA.
//!
//! ## Architecture
//!
//! Drawing runs through explicit pipeline stages connected by a polyline
//! buffer:
//!
//! 1. **Flattening** turns Bézier segments into line segments
//! 2. **Dashing** (optional) splits the polyline into dashes
//! 3. **Stroking** (stroke pass only) builds the outline polygon
//! 4. **Rasterization** transforms, clips and accumulates coverage cells,
//!    then sweeps them into scanlines
//! 5. **Rendering** blends scanlines into the pixel buffer with a solid
//!    color or a span generator
//!
//! ```
//! use agg_canvas::{AffineTransform, Canvas, Paint, Path, Rgb, StrokeData, WindRule};
//!
//! let mut canvas = Canvas::new(64, 64)?;
//! let mut path = Path::new();
//! path.move_to(8.0, 8.0).line_to(56.0, 8.0).line_to(32.0, 56.0).close();
//! canvas.draw(
//!     &path,
//!     &AffineTransform::identity(),
//!     WindRule::NonZero,
//!     &Paint::color(Rgb::opaque(255, 0, 0)),
//!     &Paint::none(),
//!     &StrokeData::default(),
//! )?;
//! assert_eq!(canvas.pixel(32, 20), Some([0, 0, 255, 255]));
//! # Ok::<(), agg_canvas::CanvasError>(())
//! ```

// Foundation
pub mod basics;
pub mod color;
pub mod error;
pub mod math;
pub mod trans_affine;

// Drawing input
pub mod paint;
pub mod path;

// Geometry stages
pub mod curves;
pub mod dash;
pub mod flatten;
pub mod polyline;
pub mod stroke;
pub mod stroke_math;

// Scanline rasterizer
pub mod rasterizer;
pub mod rasterizer_cells;
pub mod rasterizer_clip;
pub mod scanline;

// Pixels and renderers
pub mod pixel_buffer;
pub mod pixfmt;
pub mod renderer;
pub mod span_gradient;

pub mod canvas;

pub use basics::{COVER_FULL, POLY_SUBPIXEL_SHIFT};
pub use canvas::Canvas;
pub use color::{Rgb, Rgba8};
pub use error::{CanvasError, Result};
pub use paint::{
    BlendMode, Gradient, GradientKind, GradientStop, LineCap, LineJoin, Paint, PaintKind,
    SpreadMethod, StrokeData, WindRule,
};
pub use path::{Path, PathCommand, PathSegment};
pub use pixel_buffer::MAX_DIMENSION;
pub use span_gradient::{GRADIENT_LUT_SIZE, GRADIENT_SCALE, GRADIENT_SUBPIXEL_SHIFT};
pub use trans_affine::AffineTransform;
