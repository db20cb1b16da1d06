use crate::diagram::VoronoiDiagram;
use crate::error::{InputError, Result};
use crate::geometry::Rectangle;
use crate::math::{points_coincide, Point2, TOLERANCE};
use crate::operations::{BorderEdgeGeneration, ClipBorder, Extract, TessellationParams};
use crate::sweep;
use crate::topology::VoronoiStore;

/// Builds the Voronoi diagram of a set of sites, clipped to a rectangle.
///
/// The whole diagram is computed in one call: the sweep, clipping and
/// extraction run back to back and all intermediate state is dropped when
/// `execute` returns. Independent calls share nothing.
///
/// # Example
///
/// ```
/// use tessellis::geometry::Rectangle;
/// use tessellis::math::Point2;
/// use tessellis::operations::Tessellate;
///
/// let sites = [Point2::new(500.0, 700.0), Point2::new(500.0, 300.0)];
/// let diagram = Tessellate::new(&sites, Rectangle::new(0.0, 0.0, 1000.0, 1000.0))
///     .execute()
///     .unwrap();
/// assert_eq!(diagram.site(0).unwrap().neighbours(), &[1]);
/// ```
pub struct Tessellate {
    sites: Vec<Point2>,
    rectangle: Rectangle,
    params: TessellationParams,
}

impl Tessellate {
    /// Creates a new `Tessellate` operation with default parameters.
    #[must_use]
    pub fn new(sites: &[Point2], rectangle: Rectangle) -> Self {
        Self {
            sites: sites.to_vec(),
            rectangle,
            params: TessellationParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_border_edges(mut self, border_edges: BorderEdgeGeneration) -> Self {
        self.params.border_edges = border_edges;
        self
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the rectangle is empty or non-finite, or if a
    /// site is non-finite, outside the rectangle or coincides with another
    /// site. Returns `TessellationError` if the graph cannot be closed.
    pub fn execute(&self) -> Result<VoronoiDiagram> {
        self.validate()?;

        let mut store = VoronoiStore::new();
        for &site in &self.sites {
            store.add_site(site);
        }
        if self.sites.is_empty() {
            return Ok(VoronoiDiagram::new(store, self.rectangle, self.params));
        }

        let sweep_stats = sweep::run(&mut store)?;
        let clip_stats =
            ClipBorder::new(&mut store, self.rectangle, self.params.border_edges).execute()?;
        Extract::new(&mut store).execute()?;

        tracing::debug!(
            sites = self.sites.len(),
            circle_events = sweep_stats.circle_events,
            edges = store.edge_count(),
            border_edges = clip_stats.border_edges,
            "tessellation finished"
        );
        Ok(VoronoiDiagram::new(store, self.rectangle, self.params))
    }

    fn validate(&self) -> std::result::Result<(), InputError> {
        self.rectangle.validate()?;

        for (index, site) in self.sites.iter().enumerate() {
            if !site.x.is_finite() || !site.y.is_finite() {
                return Err(InputError::NonFiniteSite { index });
            }
            if !self.rectangle.contains(site) {
                return Err(InputError::SiteOutsideRectangle {
                    index,
                    x: site.x,
                    y: site.y,
                });
            }
        }

        let mut order: Vec<usize> = (0..self.sites.len()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (&self.sites[a], &self.sites[b]);
            pa.y.total_cmp(&pb.y).then(pa.x.total_cmp(&pb.x))
        });
        // Coincident sites need not be adjacent in this order: another site's
        // y can fall between theirs.
        for (i, &a) in order.iter().enumerate() {
            let site = &self.sites[a];
            for &b in &order[i + 1..] {
                let later = &self.sites[b];
                if later.y - site.y >= TOLERANCE {
                    break;
                }
                if points_coincide(site, later) {
                    return Err(InputError::DuplicateSite {
                        first: a.min(b),
                        second: a.max(b),
                    });
                }
            }
        }
        Ok(())
    }
}
