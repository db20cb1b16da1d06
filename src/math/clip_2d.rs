use super::{Point2, Vector2, TOLERANCE};

/// Parametric extent of a line to be clipped: `origin + t * dir` for `t` in `[t_min, t_max]`.
///
/// Segments use `[0, 1]` with `dir = end - start`, rays `[0, ∞)`, full lines `(-∞, ∞)`.
#[derive(Debug, Clone, Copy)]
pub struct ParametricLine {
    pub origin: Point2,
    pub dir: Vector2,
    pub t_min: f64,
    pub t_max: f64,
}

impl ParametricLine {
    /// A bounded segment from `start` to `end`.
    #[must_use]
    pub fn segment(start: Point2, end: Point2) -> Self {
        Self {
            origin: start,
            dir: end - start,
            t_min: 0.0,
            t_max: 1.0,
        }
    }

    /// A ray leaving `origin` along `dir`.
    #[must_use]
    pub fn ray(origin: Point2, dir: Vector2) -> Self {
        Self {
            origin,
            dir,
            t_min: 0.0,
            t_max: f64::INFINITY,
        }
    }

    /// An unbounded line through `origin` along `dir`.
    #[must_use]
    pub fn line(origin: Point2, dir: Vector2) -> Self {
        Self {
            origin,
            dir,
            t_min: f64::NEG_INFINITY,
            t_max: f64::INFINITY,
        }
    }

    /// Point at parameter `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.dir * t
    }
}

/// Liang–Barsky clipping against the axis-aligned box `[min, max]`.
///
/// Returns the clipped parameter interval `(t0, t1)` with `t0 <= t1`, or `None`
/// if the line misses the box. A line that only touches the box returns a
/// zero-length interval.
#[must_use]
pub fn clip_to_box(line: &ParametricLine, min: &Point2, max: &Point2) -> Option<(f64, f64)> {
    let mut t0 = line.t_min;
    let mut t1 = line.t_max;

    let constraints = [
        (-line.dir.x, line.origin.x - min.x),
        (line.dir.x, max.x - line.origin.x),
        (-line.dir.y, line.origin.y - min.y),
        (line.dir.y, max.y - line.origin.y),
    ];

    for (p, q) in constraints {
        if p.abs() < f64::MIN_POSITIVE {
            if q < -TOLERANCE {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    if t0.is_finite() && t1.is_finite() {
        Some((t0, t1))
    } else {
        None
    }
}

/// Pulls coordinates lying within [`TOLERANCE`] of a box side exactly onto it.
#[must_use]
pub fn snap_to_box(point: Point2, min: &Point2, max: &Point2) -> Point2 {
    let snap = |v: f64, lo: f64, hi: f64| {
        if (v - lo).abs() < TOLERANCE {
            lo
        } else if (v - hi).abs() < TOLERANCE {
            hi
        } else {
            v
        }
    };
    Point2::new(snap(point.x, min.x, max.x), snap(point.y, min.y, max.y))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> (Point2, Point2) {
        (Point2::new(0.0, 0.0), Point2::new(1000.0, 1000.0))
    }

    #[test]
    fn horizontal_line_spans_box() {
        let (min, max) = unit_box();
        let line = ParametricLine::line(Point2::new(500.0, 300.0), Vector2::new(-1.0, 0.0));
        let (t0, t1) = clip_to_box(&line, &min, &max).unwrap();
        let a = line.point_at(t0);
        let b = line.point_at(t1);
        assert_abs_diff_eq!(a.x, 1000.0);
        assert_abs_diff_eq!(b.x, 0.0);
        assert_abs_diff_eq!(a.y, 300.0);
    }

    #[test]
    fn ray_is_cut_at_exit() {
        let (min, max) = unit_box();
        let ray = ParametricLine::ray(Point2::new(400.0, 400.0), Vector2::new(-1.0, -1.0));
        let (t0, t1) = clip_to_box(&ray, &min, &max).unwrap();
        assert_abs_diff_eq!(t0, 0.0);
        let exit = ray.point_at(t1);
        assert_abs_diff_eq!(exit.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(exit.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn ray_starting_outside_enters_box() {
        let (min, max) = unit_box();
        let ray = ParametricLine::ray(Point2::new(500.0, -200.0), Vector2::new(0.0, 1.0));
        let (t0, t1) = clip_to_box(&ray, &min, &max).unwrap();
        assert_abs_diff_eq!(ray.point_at(t0).y, 0.0);
        assert_abs_diff_eq!(ray.point_at(t1).y, 1000.0);
    }

    #[test]
    fn segment_outside_is_rejected() {
        let (min, max) = unit_box();
        let seg = ParametricLine::segment(Point2::new(-10.0, -10.0), Point2::new(-5.0, 2000.0));
        assert!(clip_to_box(&seg, &min, &max).is_none());

        let away = ParametricLine::ray(Point2::new(1200.0, 500.0), Vector2::new(1.0, 0.2));
        assert!(clip_to_box(&away, &min, &max).is_none());
    }

    #[test]
    fn segment_inside_is_unchanged() {
        let (min, max) = unit_box();
        let seg = ParametricLine::segment(Point2::new(100.0, 100.0), Point2::new(900.0, 200.0));
        let (t0, t1) = clip_to_box(&seg, &min, &max).unwrap();
        assert_abs_diff_eq!(t0, 0.0);
        assert_abs_diff_eq!(t1, 1.0);
    }

    #[test]
    fn snapping_only_touches_near_sides() {
        let (min, max) = unit_box();
        let p = snap_to_box(Point2::new(1e-12, 999.999_999_999_9), &min, &max);
        assert_abs_diff_eq!(p.x, 0.0);
        assert_abs_diff_eq!(p.y, 1000.0);
        let q = snap_to_box(Point2::new(3.0, 4.0), &min, &max);
        assert_abs_diff_eq!(q.x, 3.0);
    }
}
