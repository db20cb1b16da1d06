pub mod clip_2d;
pub mod polygon_2d;
pub mod predicates_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
///
/// Every coordinate coincidence test in the crate goes through this constant.
pub const TOLERANCE: f64 = 1e-9;

/// Circle-event determinants above `-DEGENERATE_DETERMINANT` are treated as
/// collinear (no converging break-points).
pub const DEGENERATE_DETERMINANT: f64 = 2e-12;

/// Returns `true` if two scalars are equal within [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Returns `true` if two points coincide within [`TOLERANCE`] on both axes.
#[must_use]
pub fn points_coincide(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Returns the vector rotated a quarter turn clockwise (y-up).
#[must_use]
pub fn perp_cw(v: Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}
