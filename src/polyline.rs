//! Polyline buffer connecting the geometry stages.
//!
//! Flattening, dashing and stroking each read one `Polyline` and write
//! another. A polyline is a flat vertex array split into contours; a
//! closed contour has an implicit edge from its last vertex back to its
//! first, which is never stored twice.

use crate::basics::PointD;
use crate::math::{calc_distance, VERTEX_DIST_EPSILON};

// ============================================================================
// Polyline
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContourSpan {
    start: usize,
    end: usize,
    closed: bool,
}

/// A borrowed view of one contour.
#[derive(Debug, Clone, Copy)]
pub struct Contour<'a> {
    pub points: &'a [PointD],
    pub closed: bool,
}

/// Vertices grouped into open or closed contours.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    points: Vec<PointD>,
    contours: Vec<ContourSpan>,
    open_start: Option<usize>,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all vertices, keeping allocations.
    pub fn clear(&mut self) {
        self.points.clear();
        self.contours.clear();
        self.open_start = None;
    }

    /// Start a new contour, ending any contour still open as unclosed.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.end_contour(false);
        self.open_start = Some(self.points.len());
        self.points.push(PointD::new(x, y));
    }

    /// Append a vertex to the current contour. Starts one if none is open.
    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.open_start.is_none() {
            self.open_start = Some(self.points.len());
        }
        self.points.push(PointD::new(x, y));
    }

    /// Finish the current contour. Empty contours are discarded.
    pub fn end_contour(&mut self, closed: bool) {
        if let Some(start) = self.open_start.take() {
            let end = self.points.len();
            if end > start {
                self.contours.push(ContourSpan { start, end, closed });
            }
        }
    }

    /// The last vertex of the open contour, if any.
    pub fn current_point(&self) -> Option<PointD> {
        self.open_start.and_then(|_| self.points.last().copied())
    }

    pub fn num_contours(&self) -> usize {
        self.contours.len()
    }

    pub fn total_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// Completed contours in insertion order.
    pub fn contours(&self) -> impl Iterator<Item = Contour<'_>> + '_ {
        self.contours.iter().map(move |c| Contour {
            points: &self.points[c.start..c.end],
            closed: c.closed,
        })
    }
}

// ============================================================================
// VertexDist / VertexSequence
// ============================================================================

/// A vertex with the distance to the following vertex of its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexDist {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
}

impl VertexDist {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, dist: 0.0 }
    }
}

/// A contour with coincident vertices removed and segment lengths cached.
///
/// After [`close`](Self::close), `self[i].dist` is the length of the edge
/// from vertex `i` to vertex `i + 1` (wrapping to vertex 0 when closed).
#[derive(Debug, Clone, Default)]
pub struct VertexSequence {
    vertices: Vec<VertexDist>,
}

impl VertexSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Append a vertex unless it coincides with the previous one.
    pub fn add(&mut self, x: f64, y: f64) {
        if let Some(last) = self.vertices.last() {
            if calc_distance(last.x, last.y, x, y) <= VERTEX_DIST_EPSILON {
                return;
            }
        }
        self.vertices.push(VertexDist::new(x, y));
    }

    /// Finish the sequence: drop a closing vertex that repeats the first one
    /// and compute edge lengths.
    pub fn close(&mut self, closed: bool) {
        if closed {
            while self.vertices.len() > 1 {
                let first = self.vertices[0];
                let last = self.vertices[self.vertices.len() - 1];
                if calc_distance(last.x, last.y, first.x, first.y) > VERTEX_DIST_EPSILON {
                    break;
                }
                self.vertices.pop();
            }
        }
        let n = self.vertices.len();
        for i in 0..n {
            let next = if i + 1 < n {
                self.vertices[i + 1]
            } else if closed {
                self.vertices[0]
            } else {
                self.vertices[i].dist = 0.0;
                continue;
            };
            let v = &mut self.vertices[i];
            v.dist = calc_distance(v.x, v.y, next.x, next.y);
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex at `i`, wrapping around in both directions.
    #[inline]
    pub fn cyclic(&self, i: isize) -> &VertexDist {
        let n = self.vertices.len() as isize;
        &self.vertices[i.rem_euclid(n) as usize]
    }
}

impl core::ops::Index<usize> for VertexSequence {
    type Output = VertexDist;

    fn index(&self, i: usize) -> &VertexDist {
        &self.vertices[i]
    }
}
