use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed vertex loop (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// Returns `1` for a left turn, `-1` for a right turn and `0` when the three
/// points are collinear. Collinearity is judged on the sine of the angle at
/// `a`, so the test does not depend on the scale of the input.
fn orientation(a: &Point2, b: &Point2, c: &Point2) -> i8 {
    let ab = b - a;
    let ac = c - a;
    let cross = ab.perp(&ac);
    if cross.abs() <= TOLERANCE * ab.norm() * ac.norm() {
        0
    } else if cross > 0.0 {
        1
    } else {
        -1
    }
}

/// Whether `p`, known to be collinear with `a -> b`, lies within its bounding box.
fn within_segment(a: &Point2, b: &Point2, p: &Point2) -> bool {
    p.x <= a.x.max(b.x) + TOLERANCE
        && p.x >= a.x.min(b.x) - TOLERANCE
        && p.y <= a.y.max(b.y) + TOLERANCE
        && p.y >= a.y.min(b.y) - TOLERANCE
}

/// Bounded segment-segment intersection test in 2D, endpoints included.
///
/// Collinear overlapping segments count as intersecting.
#[must_use]
pub fn segments_intersect_2d(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);

    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }

    (o1 == 0 && within_segment(a0, a1, b0))
        || (o2 == 0 && within_segment(a0, a1, b1))
        || (o3 == 0 && within_segment(b0, b1, a0))
        || (o4 == 0 && within_segment(b0, b1, a1))
}

/// Finds every pair of edges of a closed vertex loop that intersect where
/// they should not.
///
/// Edge `i` runs from `points[i]` to `points[(i + 1) % n]`. Non-adjacent edges
/// are reported when they touch at all; adjacent edges are reported when the
/// second folds back over the first. Each pair is returned as `(i, j)` with
/// `i < j`.
#[must_use]
pub fn self_intersections_2d(points: &[Point2]) -> Vec<(usize, usize)> {
    let n = points.len();
    let mut found = Vec::new();
    if n < 3 {
        return found;
    }

    let edge = |i: usize| (&points[i], &points[(i + 1) % n]);

    for i in 0..n {
        for j in (i + 1)..n {
            let (a0, a1) = edge(i);
            let (b0, b1) = edge(j);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                // Shared vertex is a1 == b0 for consecutive edges, b1 == a0 for the wrap.
                let (prev, shared, next) = if j == i + 1 { (a0, a1, b1) } else { (b0, a0, a1) };
                if folds_back(prev, shared, next) {
                    found.push((i, j));
                }
            } else if segments_intersect_2d(a0, a1, b0, b1) {
                found.push((i, j));
            }
        }
    }

    found
}

/// Whether the path `prev -> shared -> next` doubles back along itself.
fn folds_back(prev: &Point2, shared: &Point2, next: &Point2) -> bool {
    let incoming: Vector2 = prev - shared;
    let outgoing: Vector2 = next - shared;
    orientation(prev, shared, next) == 0 && incoming.dot(&outgoing) > 0.0
}

/// Whether a closed vertex loop encloses a convex region.
///
/// Collinear vertices are tolerated. Loops with fewer than three vertices,
/// and loops whose edges cross, are never convex.
#[must_use]
pub fn is_convex_2d(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }

    let mut turn = 0;
    for i in 0..n {
        let o = orientation(&points[i], &points[(i + 1) % n], &points[(i + 2) % n]);
        if o == 0 {
            continue;
        }
        if turn == 0 {
            turn = o;
        } else if o != turn {
            return false;
        }
    }

    turn != 0 && self_intersections_2d(points).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&square()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(1.0, 1.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        ));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        assert!(!segments_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(2.0, 1.0),
        ));
    }

    #[test]
    fn touching_endpoint_counts() {
        assert!(segments_intersect_2d(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, 3.0),
        ));
    }

    #[test]
    fn simple_square_has_no_self_intersections() {
        assert!(self_intersections_2d(&square()).is_empty());
    }

    #[test]
    fn bowtie_self_intersects() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert_eq!(self_intersections_2d(&pts), vec![(0, 2)]);
    }

    #[test]
    fn spike_folding_back_self_intersects() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
        ];
        assert!(!self_intersections_2d(&pts).is_empty());
    }

    #[test]
    fn convexity() {
        assert!(is_convex_2d(&square()));

        let l_shape = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert!(!is_convex_2d(&l_shape));
        assert!(!is_convex_2d(&square()[..2]));
    }

    #[test]
    fn tiny_triangle_is_simple_and_convex() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1e-6, 0.0),
            Point2::new(0.0, 1e-6),
        ];
        assert!(self_intersections_2d(&pts).is_empty());
        assert!(is_convex_2d(&pts));
    }

    #[test]
    fn large_spike_still_folds_back() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(2e6, 0.0),
            Point2::new(1e6, 0.0),
            Point2::new(1e6, 1e6),
        ];
        assert!(!self_intersections_2d(&pts).is_empty());
    }

    #[test]
    fn collinear_vertex_is_still_convex() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
        ];
        assert!(is_convex_2d(&pts));
    }
}
