use rand::{rngs::StdRng, Rng};
use tracing_subscriber::EnvFilter;

use crate::geometry::Rectangle;
use crate::math::{points_coincide, Point2};

/// Installs a test-writer subscriber honouring `RUST_LOG`; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The rectangle (0, 0) – (1000, 1000).
pub fn thousand_square() -> Rectangle {
    Rectangle::new(0.0, 0.0, 1000.0, 1000.0)
}

/// `n` distinct sites drawn uniformly from the interior of `rect`.
pub fn random_sites(rng: &mut StdRng, n: usize, rect: &Rectangle) -> Vec<Point2> {
    let mut sites: Vec<Point2> = Vec::with_capacity(n);
    while sites.len() < n {
        let p = Point2::new(
            rng.gen_range(rect.min.x..rect.max.x),
            rng.gen_range(rect.min.y..rect.max.y),
        );
        if !sites.iter().any(|q| nalgebra::distance(q, &p) < 1e-3) {
            sites.push(p);
        }
    }
    sites
}

/// Rotates `point` a quarter turn clockwise around the centre of a square `rect`.
pub fn rotate_quarter(point: &Point2, rect: &Rectangle) -> Point2 {
    let c = rect.center();
    Point2::new(c.x + (point.y - c.y), c.y - (point.x - c.x))
}

/// Asserts both slices hold the same points, in any order.
pub fn assert_same_points(actual: &[Point2], expected: &[Point2]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    let close = |a: &Point2, b: &Point2| points_coincide(a, b) || nalgebra::distance(a, b) < 1e-6;
    for p in expected {
        assert!(
            actual.iter().any(|q| close(p, q)),
            "{p:?} missing from {actual:?}"
        );
    }
}
