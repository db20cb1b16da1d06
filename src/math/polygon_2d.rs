use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{points_coincide, predicates_2d::orient_2d, Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
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

/// Area centroid of a simple polygon, or the vertex average when the polygon
/// has no area.
#[must_use]
pub fn centroid_2d(points: &[Point2]) -> Option<Point2> {
    if points.is_empty() {
        return None;
    }
    let n = points.len();
    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        area += cross;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }

    if area.abs() < TOLERANCE {
        return Some(vertex_average(points));
    }
    let factor = 1.0 / (3.0 * area);
    Some(Point2::new(cx * factor, cy * factor))
}

/// Plain average of the vertices.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn vertex_average(points: &[Point2]) -> Point2 {
    let n = points.len().max(1) as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point2::new(sx / n, sy / n)
}

/// Clockwise angle swept from the downward direction (−y) to `point`, seen from `pivot`.
///
/// The result lies in `[0, 2π)`. Directions within [`TOLERANCE`] of straight
/// down map to `0` so that rounding never moves them to the end of a sort.
#[must_use]
pub fn clockwise_key(pivot: &Point2, point: &Point2) -> f64 {
    let angle = (point.y - pivot.y).atan2(point.x - pivot.x);
    let key = (PI + FRAC_PI_2 - angle).rem_euclid(TAU);
    if TAU - key < TOLERANCE {
        0.0
    } else {
        key
    }
}

/// Orders the vertices of a convex cell clockwise around its site.
///
/// Ordering starts from the point first met when sweeping clockwise from
/// straight below the pivot. If the site coincides with one of the points
/// (a site sitting in a rectangle corner), the vertex average is used as the
/// pivot instead.
pub fn sort_clockwise(points: &mut [Point2], site: &Point2) {
    let pivot = if points.iter().any(|p| points_coincide(p, site)) {
        vertex_average(points)
    } else {
        *site
    };
    points.sort_by(|a, b| clockwise_key(&pivot, a).total_cmp(&clockwise_key(&pivot, b)));
}

/// Returns `true` if `point` lies inside or on the boundary of a convex polygon
/// given in clockwise order.
#[must_use]
pub fn convex_contains(points_cw: &[Point2], point: &Point2) -> bool {
    let n = points_cw.len();
    if n < 3 {
        return false;
    }
    (0..n).all(|i| {
        let a = &points_cw[i];
        let b = &points_cw[(i + 1) % n];
        let len = (b - a).norm().max(TOLERANCE);
        // Clockwise winding keeps the interior on the right.
        orient_2d(a, b, point) / len <= TOLERANCE
    })
}

/// Returns `true` if the closed polygon has no two non-adjacent edges crossing.
#[must_use]
pub fn is_simple(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = points[i];
        let a1 = points[(i + 1) % n];
        for j in (i + 1)..n {
            if (j + 1) % n == i || (i + 1) % n == j {
                continue;
            }
            let b0 = points[j];
            let b1 = points[(j + 1) % n];
            if segments_cross(&a0, &a1, &b0, &b1) {
                return false;
            }
        }
    }
    true
}

fn segments_cross(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let d1 = orient_2d(b0, b1, a0);
    let d2 = orient_2d(b0, b1, a1);
    let d3 = orient_2d(a0, a1, b0);
    let d4 = orient_2d(a0, a1, b1);
    ((d1 > TOLERANCE && d2 < -TOLERANCE) || (d1 < -TOLERANCE && d2 > TOLERANCE))
        && ((d3 > TOLERANCE && d4 < -TOLERANCE) || (d3 < -TOLERANCE && d4 > TOLERANCE))
}
