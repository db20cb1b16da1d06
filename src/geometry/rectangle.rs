use crate::error::InputError;
use crate::math::{Point2, TOLERANCE};

/// One of the four sides of the bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Left,
    Top,
    Right,
    Bottom,
}

/// Where a point sits relative to the rectangle perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderLocation {
    NotOnBorder,
    Left,
    Top,
    Right,
    Bottom,
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl BorderLocation {
    /// Returns `true` for the four corner locations.
    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Self::BottomLeft | Self::TopLeft | Self::TopRight | Self::BottomRight
        )
    }

    /// Returns `true` unless the location is [`BorderLocation::NotOnBorder`].
    #[must_use]
    pub fn is_on_border(self) -> bool {
        self != Self::NotOnBorder
    }

    /// Returns `true` if the location lies on `side` (corners lie on two sides).
    #[must_use]
    pub fn touches(self, side: BorderSide) -> bool {
        match side {
            BorderSide::Left => matches!(self, Self::Left | Self::BottomLeft | Self::TopLeft),
            BorderSide::Top => matches!(self, Self::Top | Self::TopLeft | Self::TopRight),
            BorderSide::Right => matches!(self, Self::Right | Self::TopRight | Self::BottomRight),
            BorderSide::Bottom => {
                matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
            }
        }
    }
}

/// The axis-aligned bounding region of a tessellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// Lower-left corner.
    pub min: Point2,
    /// Upper-right corner.
    pub max: Point2,
}

impl Rectangle {
    /// Creates a rectangle from `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    /// Checks that all bounds are finite and that both axes have positive extent.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NonFiniteRectangle` or `InputError::EmptyRectangle`.
    pub fn validate(&self) -> Result<(), InputError> {
        if ![self.min.x, self.min.y, self.max.x, self.max.y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(InputError::NonFiniteRectangle);
        }
        if self.min.x >= self.max.x {
            return Err(InputError::EmptyRectangle {
                axis: "x",
                min: self.min.x,
                max: self.max.x,
            });
        }
        if self.min.y >= self.max.y {
            return Err(InputError::EmptyRectangle {
                axis: "y",
                min: self.min.y,
                max: self.max.y,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns `true` if `point` lies inside or on the rectangle (within [`TOLERANCE`]).
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x - TOLERANCE
            && point.x <= self.max.x + TOLERANCE
            && point.y >= self.min.y - TOLERANCE
            && point.y <= self.max.y + TOLERANCE
    }

    /// The four corners, clockwise from the lower-left one.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.min.x, self.max.y),
            self.max,
            Point2::new(self.max.x, self.min.y),
        ]
    }

    /// Classifies `point` against the perimeter.
    #[must_use]
    pub fn border_location(&self, point: &Point2) -> BorderLocation {
        let left = (point.x - self.min.x).abs() < TOLERANCE;
        let right = (point.x - self.max.x).abs() < TOLERANCE;
        let bottom = (point.y - self.min.y).abs() < TOLERANCE;
        let top = (point.y - self.max.y).abs() < TOLERANCE;

        match (left, right, bottom, top) {
            (true, _, true, _) => BorderLocation::BottomLeft,
            (true, _, _, true) => BorderLocation::TopLeft,
            (_, true, _, true) => BorderLocation::TopRight,
            (_, true, true, _) => BorderLocation::BottomRight,
            (true, _, _, _) => BorderLocation::Left,
            (_, true, _, _) => BorderLocation::Right,
            (_, _, true, _) => BorderLocation::Bottom,
            (_, _, _, true) => BorderLocation::Top,
            _ => BorderLocation::NotOnBorder,
        }
    }

    /// The side both points lie on, if any.
    #[must_use]
    pub fn shared_side(&self, a: &Point2, b: &Point2) -> Option<BorderSide> {
        let la = self.border_location(a);
        let lb = self.border_location(b);
        [
            BorderSide::Left,
            BorderSide::Top,
            BorderSide::Right,
            BorderSide::Bottom,
        ]
        .into_iter()
        .find(|&side| la.touches(side) && lb.touches(side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rectangle {
        Rectangle::new(0.0, 0.0, 1000.0, 1000.0)
    }

    #[test]
    fn validation_rejects_empty_axes() {
        assert!(rect().validate().is_ok());
        assert_eq!(
            Rectangle::new(10.0, 0.0, 10.0, 5.0).validate(),
            Err(InputError::EmptyRectangle {
                axis: "x",
                min: 10.0,
                max: 10.0
            })
        );
        assert!(matches!(
            Rectangle::new(0.0, 5.0, 1.0, 2.0).validate(),
            Err(InputError::EmptyRectangle { axis: "y", .. })
        ));
        assert_eq!(
            Rectangle::new(0.0, 0.0, f64::INFINITY, 1.0).validate(),
            Err(InputError::NonFiniteRectangle)
        );
    }

    #[test]
    fn corners_run_clockwise() {
        let c = rect().corners();
        assert_eq!(c[0], Point2::new(0.0, 0.0));
        assert_eq!(c[1], Point2::new(0.0, 1000.0));
        assert_eq!(c[2], Point2::new(1000.0, 1000.0));
        assert_eq!(c[3], Point2::new(1000.0, 0.0));
    }

    #[test]
    fn border_locations() {
        let r = rect();
        assert_eq!(r.border_location(&Point2::new(0.0, 0.0)), BorderLocation::BottomLeft);
        assert_eq!(r.border_location(&Point2::new(1000.0, 1000.0)), BorderLocation::TopRight);
        assert_eq!(r.border_location(&Point2::new(0.0, 500.0)), BorderLocation::Left);
        assert_eq!(r.border_location(&Point2::new(500.0, 1000.0)), BorderLocation::Top);
        assert_eq!(r.border_location(&Point2::new(500.0, 500.0)), BorderLocation::NotOnBorder);
        assert!(r.border_location(&Point2::new(1000.0, 0.0)).is_corner());
    }

    #[test]
    fn shared_side_through_corner() {
        let r = rect();
        let corner = Point2::new(0.0, 1000.0);
        assert_eq!(
            r.shared_side(&Point2::new(0.0, 500.0), &corner),
            Some(BorderSide::Left)
        );
        assert_eq!(
            r.shared_side(&corner, &Point2::new(700.0, 1000.0)),
            Some(BorderSide::Top)
        );
        assert_eq!(
            r.shared_side(&Point2::new(0.0, 500.0), &Point2::new(500.0, 0.0)),
            None
        );
    }

    #[test]
    fn containment_is_inclusive() {
        let r = rect();
        assert!(r.contains(&Point2::new(0.0, 1000.0)));
        assert!(!r.contains(&Point2::new(-0.1, 10.0)));
        assert!((r.area() - 1_000_000.0).abs() < 1e-9);
        assert_eq!(r.center(), Point2::new(500.0, 500.0));
    }
}
