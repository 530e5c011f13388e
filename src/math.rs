//! Geometric helpers used by the flattening and stroking stages.

/// Points closer than this are treated as coincident.
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

/// Denominator threshold below which two lines are treated as parallel.
pub const INTERSECTION_EPSILON: f64 = 1.0e-30;

/// Cross product of (x2-x1, y2-y1) and (x-x2, y-y2).
///
/// The sign tells on which side of the directed line (x1,y1)→(x2,y2)
/// the point (x,y) lies.
#[inline]
pub fn cross_product(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> f64 {
    (x - x2) * (y2 - y1) - (y - y2) * (x2 - x1)
}

#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}

/// Intersection of the infinite lines A→B and C→D, or `None` when they are
/// parallel.
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn calc_intersection(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
) -> Option<(f64, f64)> {
    let num = (ay - cy) * (dx - cx) - (ax - cx) * (dy - cy);
    let den = (bx - ax) * (dy - cy) - (by - ay) * (dx - cx);
    if den.abs() < INTERSECTION_EPSILON {
        return None;
    }
    let r = num / den;
    Some((ax + r * (bx - ax), ay + r * (by - ay)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_product_sign() {
        // Point left of a line pointing along +x (y-down device space).
        assert!(cross_product(0.0, 0.0, 10.0, 0.0, 5.0, 5.0) < 0.0);
        assert!(cross_product(0.0, 0.0, 10.0, 0.0, 5.0, -5.0) > 0.0);
        assert_eq!(cross_product(0.0, 0.0, 10.0, 0.0, 20.0, 0.0), 0.0);
    }

    #[test]
    fn test_distances() {
        assert!((calc_distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-12);
        assert!((calc_sq_distance(1.0, 1.0, 4.0, 5.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersection() {
        let p = calc_intersection(0.0, 0.0, 10.0, 10.0, 0.0, 10.0, 10.0, 0.0);
        let (x, y) = p.unwrap();
        assert!((x - 5.0).abs() < 1e-12);
        assert!((y - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_lines_do_not_intersect() {
        assert!(calc_intersection(0.0, 0.0, 10.0, 0.0, 0.0, 1.0, 10.0, 1.0).is_none());
    }
}
