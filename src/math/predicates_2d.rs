use super::{Point2, DEGENERATE_DETERMINANT};

/// Twice the signed area of triangle `(a, b, c)`.
///
/// Positive when `c` lies to the left of `a → b` (counter-clockwise turn).
#[must_use]
pub fn orient_2d(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// A circle that closes a beachline arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceCircle {
    /// Circumcenter: the future Voronoi vertex.
    pub center: Point2,
    /// Distance from the center to each of the three sites.
    pub radius: f64,
}

impl ConvergenceCircle {
    /// Sweep coordinate at which the circle event fires (top of the circle).
    #[must_use]
    pub fn sweep_y(&self) -> f64 {
        self.center.y + self.radius
    }
}

/// Circle through three consecutive beachline sites, if their break-points converge.
///
/// `middle` owns the arc that would vanish. Returns `None` for collinear triples
/// and for triples whose break-points diverge: in both cases no vertex is ever
/// created for this arc.
#[must_use]
pub fn converging_circle(
    left: &Point2,
    middle: &Point2,
    right: &Point2,
) -> Option<ConvergenceCircle> {
    let ax = left.x - middle.x;
    let ay = left.y - middle.y;
    let cx = right.x - middle.x;
    let cy = right.y - middle.y;

    let d = 2.0 * (ax * cy - ay * cx);
    if d >= -DEGENERATE_DETERMINANT {
        return None;
    }

    let ha = ax * ax + ay * ay;
    let hc = cx * cx + cy * cy;
    let x = (cy * ha - ay * hc) / d;
    let y = (ax * hc - cx * ha) / d;

    Some(ConvergenceCircle {
        center: Point2::new(x + middle.x, y + middle.y),
        radius: (x * x + y * y).sqrt(),
    })
}

/// Circumcenter of three points, or `None` if they are collinear.
#[must_use]
pub fn circumcenter(a: &Point2, b: &Point2, c: &Point2) -> Option<Point2> {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;

    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() < DEGENERATE_DETERMINANT {
        return None;
    }

    let hb = bx * bx + by * by;
    let hc = cx * cx + cy * cy;
    Some(Point2::new(
        (cy * hb - by * hc) / d + a.x,
        (bx * hc - cx * hb) / d + a.y,
    ))
}

/// X-coordinate of the break-point between the arc of `left` and the arc of
/// `right` (in that beachline order) when the sweep line is at `directrix`.
///
/// A site lying exactly on the sweep line has a degenerate, vertical arc; the
/// break-point is then that site's own x.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn break_point_x(left: &Point2, right: &Point2, directrix: f64) -> f64 {
    let pby2 = right.y - directrix;
    if pby2 == 0.0 {
        return right.x;
    }
    let plby2 = left.y - directrix;
    if plby2 == 0.0 {
        return left.x;
    }

    let hl = left.x - right.x;
    let aby2 = 1.0 / pby2 - 1.0 / plby2;
    let b = hl / plby2;
    if aby2 != 0.0 {
        let c = hl * hl / (-2.0 * plby2) - left.y + plby2 / 2.0 + right.y - pby2 / 2.0;
        let disc = (b * b - 2.0 * aby2 * c).max(0.0);
        return (-b + disc.sqrt()) / aby2 + right.x;
    }

    (left.x + right.x) / 2.0
}
