use crate::diagram::VoronoiDiagram;
use crate::math::Point2;

/// One step of Lloyd's relaxation: moves every site towards its cell centroid.
///
/// The result is a new site list in input order; tessellating it again is a
/// fresh, independent run.
pub struct LloydRelaxation<'a> {
    diagram: &'a VoronoiDiagram,
    strength: f64,
}

impl<'a> LloydRelaxation<'a> {
    /// Creates a relaxation that moves sites all the way to their centroids.
    #[must_use]
    pub fn new(diagram: &'a VoronoiDiagram) -> Self {
        Self {
            diagram,
            strength: 1.0,
        }
    }

    /// Fraction of the way each site moves, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength.clamp(0.0, 1.0);
        self
    }

    /// Returns the relaxed site positions.
    ///
    /// Cells without area (no boundary in [`DoNotMakeBorderEdges`] mode) keep
    /// their site where it is.
    ///
    /// [`DoNotMakeBorderEdges`]: crate::operations::BorderEdgeGeneration::DoNotMakeBorderEdges
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        self.diagram
            .sites()
            .map(|cell| {
                let site = cell.position();
                if cell.boundary_points().len() < 3 {
                    return site;
                }
                match cell.centroid() {
                    Some(c) => site + (c - site) * self.strength,
                    None => site,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::Tessellate;
    use crate::test_support::{random_sites, thousand_square};
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn lone_site_moves_to_rectangle_centre() {
        let sites = [Point2::new(100.0, 200.0)];
        let diagram = Tessellate::new(&sites, thousand_square()).execute().unwrap();
        let relaxed = LloydRelaxation::new(&diagram).execute();
        assert_relative_eq!(relaxed[0].x, 500.0, epsilon = 1e-9);
        assert_relative_eq!(relaxed[0].y, 500.0, epsilon = 1e-9);

        let half = LloydRelaxation::new(&diagram).with_strength(0.5).execute();
        assert_relative_eq!(half[0].x, 300.0, epsilon = 1e-9);
        assert_relative_eq!(half[0].y, 350.0, epsilon = 1e-9);
    }

    #[test]
    fn symmetric_pair_is_a_fixed_point() {
        let sites = [Point2::new(500.0, 750.0), Point2::new(500.0, 250.0)];
        let diagram = Tessellate::new(&sites, thousand_square()).execute().unwrap();
        let relaxed = LloydRelaxation::new(&diagram).execute();
        for (a, b) in relaxed.iter().zip(&sites) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn relaxed_sites_can_be_tessellated_again() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut sites = random_sites(&mut rng, 30, &thousand_square());
        for _ in 0..3 {
            let diagram = Tessellate::new(&sites, thousand_square()).execute().unwrap();
            sites = LloydRelaxation::new(&diagram).execute();
            assert_eq!(sites.len(), 30);
            assert!(sites.iter().all(|p| thousand_square().contains(p)));
        }
    }
}
