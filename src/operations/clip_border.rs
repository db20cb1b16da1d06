use crate::error::{Result, TessellationError};
use crate::geometry::Rectangle;
use crate::math::{
    clip_2d::{clip_to_box, snap_to_box, ParametricLine},
    perp_cw,
    points_coincide,
    polygon_2d::sort_clockwise,
    Point2, TOLERANCE,
};
use crate::operations::BorderEdgeGeneration;
use crate::topology::{CellState, EdgeId, SiteId, VertexId, VertexKind, VoronoiStore};

/// Counters reported after clipping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClipStats {
    pub clipped_away: usize,
    pub border_edges: usize,
}

/// Turns the open sweep output into a subdivision bounded by the rectangle.
///
/// # Algorithm
///
/// 1. Every internal edge pair is completed along its known direction and
///    cut to the rectangle (Liang–Barsky). Pairs that miss the rectangle or
///    collapse to a point are removed.
/// 2. Each rectangle corner is attached to its nearest site(s).
/// 3. Each cell's points are ordered clockwise; consecutive points not joined
///    by an internal edge are joined by a border edge along their shared side.
///
/// Steps 2 and 3 only run with [`BorderEdgeGeneration::MakeBorderEdges`].
pub struct ClipBorder<'a> {
    store: &'a mut VoronoiStore,
    rectangle: Rectangle,
    border_edges: BorderEdgeGeneration,
}

impl<'a> ClipBorder<'a> {
    #[must_use]
    pub fn new(
        store: &'a mut VoronoiStore,
        rectangle: Rectangle,
        border_edges: BorderEdgeGeneration,
    ) -> Self {
        Self {
            store,
            rectangle,
            border_edges,
        }
    }

    /// Executes clipping; afterwards every remaining edge is complete.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::OpenCellBoundary` if a cell boundary has a
    /// gap that does not run along a rectangle side.
    pub fn execute(mut self) -> Result<ClipStats> {
        let mut stats = ClipStats::default();

        let on_perimeter: Vec<VertexId> = self
            .store
            .vertices()
            .filter(|(_, v)| self.rectangle.border_location(&v.point).is_on_border())
            .map(|(id, _)| id)
            .collect();
        for id in on_perimeter {
            self.store.mark_perimeter(id);
        }

        let pairs = self.store.internal_pairs().to_vec();
        for edge in pairs {
            if !self.clip_pair(edge)? {
                self.store.remove_edge_pair(edge)?;
                stats.clipped_away += 1;
            }
        }

        if self.border_edges == BorderEdgeGeneration::MakeBorderEdges {
            let corners = self.attach_corners()?;
            for (i, &site) in self.store.site_ids().to_vec().iter().enumerate() {
                stats.border_edges += self.close_cell(site, &corners[i])?;
            }
        }

        for site in self.store.site_ids().to_vec() {
            self.store.site_mut(site)?.state = CellState::Clipped;
        }

        tracing::debug!(
            clipped_away = stats.clipped_away,
            border_edges = stats.border_edges,
            "border clipping finished"
        );
        Ok(stats)
    }

    /// Completes one internal pair inside the rectangle.
    ///
    /// Returns `false` if nothing of the edge remains inside.
    fn clip_pair(&mut self, edge: EdgeId) -> Result<bool> {
        let data = self.store.edge(edge)?.clone();
        // Work on the half that carries a start vertex, if either does.
        let half = match data.twin {
            Some(twin) if data.start.is_none() && self.store.edge(twin)?.start.is_some() => twin,
            _ => edge,
        };
        let half_data = self.store.edge(half)?.clone();
        let Some(neighbour) = half_data.neighbour else {
            return Ok(true);
        };

        let site = self.store.site(half_data.site)?.position;
        let other = self.store.site(neighbour)?.position;
        let dir = perp_cw(other - site);

        let line = match (half_data.start, half_data.end) {
            (Some(a), Some(b)) => {
                ParametricLine::segment(self.store.point(a)?, self.store.point(b)?)
            }
            (Some(a), None) => ParametricLine::ray(self.store.point(a)?, dir),
            (None, None) => ParametricLine::line(nalgebra::center(&site, &other), dir),
            (None, Some(_)) => {
                return Err(TessellationError::Failed(
                    "half-edge has an end but no start".to_owned(),
                )
                .into())
            }
        };

        let Some((t0, t1)) = clip_to_box(&line, &self.rectangle.min, &self.rectangle.max) else {
            return Ok(false);
        };
        let p0 = snap_to_box(line.point_at(t0), &self.rectangle.min, &self.rectangle.max);
        let p1 = snap_to_box(line.point_at(t1), &self.rectangle.min, &self.rectangle.max);
        if points_coincide(&p0, &p1) {
            return Ok(false);
        }

        let start = match half_data.start {
            Some(a) if t0.abs() < TOLERANCE => a,
            _ => self.store.border_vertex(p0, VertexKind::Border),
        };
        let end = match half_data.end {
            Some(b) if (t1 - 1.0).abs() < TOLERANCE => b,
            _ => self.store.border_vertex(p1, VertexKind::Border),
        };
        self.store.set_edge_span(half, start, end)?;
        Ok(true)
    }

    /// For every site (in input order), the corner vertices its cell contains.
    fn attach_corners(&mut self) -> Result<Vec<Vec<VertexId>>> {
        let ids = self.store.site_ids().to_vec();
        let mut owned = vec![Vec::new(); ids.len()];
        if ids.is_empty() {
            return Ok(owned);
        }

        for corner in self.rectangle.corners() {
            let mut distances = Vec::with_capacity(ids.len());
            for &id in &ids {
                distances.push(nalgebra::distance_squared(
                    &self.store.site(id)?.position,
                    &corner,
                ));
            }
            let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
            let slack = TOLERANCE * nearest.max(1.0);
            let vertex = self.store.border_vertex(corner, VertexKind::Corner);
            for (i, d) in distances.iter().enumerate() {
                if *d - nearest <= slack {
                    owned[i].push(vertex);
                }
            }
        }
        Ok(owned)
    }

    /// Adds the border edges of one cell; returns how many were created.
    fn close_cell(&mut self, site: SiteId, corners: &[VertexId]) -> Result<usize> {
        let data = self.store.site(site)?.clone();

        let mut internal: Vec<(Point2, Point2)> = Vec::with_capacity(data.edges.len());
        let mut points: Vec<(VertexId, Point2)> = Vec::new();
        for &edge in &data.edges {
            let half = self.store.edge(edge)?;
            let (Some(a), Some(b)) = (half.start, half.end) else {
                continue;
            };
            let (pa, pb) = (self.store.point(a)?, self.store.point(b)?);
            internal.push((pa, pb));
            push_distinct(&mut points, a, pa);
            push_distinct(&mut points, b, pb);
        }
        for &corner in corners {
            push_distinct(&mut points, corner, self.store.point(corner)?);
        }

        if points.len() < 3 {
            return Err(TessellationError::OpenCellBoundary { site: data.index }.into());
        }

        let mut ordered: Vec<Point2> = points.iter().map(|&(_, p)| p).collect();
        sort_clockwise(&mut ordered, &data.position);
        let lookup = |p: &Point2| {
            points
                .iter()
                .find(|(_, q)| points_coincide(p, q))
                .map(|&(id, _)| id)
        };

        let mut created = 0;
        for i in 0..ordered.len() {
            let a = ordered[i];
            let b = ordered[(i + 1) % ordered.len()];
            let joined = internal.iter().any(|(p, q)| {
                (points_coincide(p, &a) && points_coincide(q, &b))
                    || (points_coincide(p, &b) && points_coincide(q, &a))
            });
            if joined {
                continue;
            }
            if self.rectangle.shared_side(&a, &b).is_none() {
                return Err(TessellationError::OpenCellBoundary { site: data.index }.into());
            }
            let (Some(va), Some(vb)) = (lookup(&a), lookup(&b)) else {
                return Err(TessellationError::OpenCellBoundary { site: data.index }.into());
            };
            self.store.add_border_edge(site, va, vb)?;
            created += 1;
        }
        Ok(created)
    }
}

fn push_distinct(points: &mut Vec<(VertexId, Point2)>, id: VertexId, point: Point2) {
    if !points.iter().any(|(_, q)| points_coincide(q, &point)) {
        points.push((id, point));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::BorderEdgeGeneration::{DoNotMakeBorderEdges, MakeBorderEdges};
    use crate::sweep;

    fn clipped(sites: &[(f64, f64)], border: BorderEdgeGeneration) -> (VoronoiStore, ClipStats) {
        let mut store = VoronoiStore::new();
        for &(x, y) in sites {
            store.add_site(Point2::new(x, y));
        }
        sweep::run(&mut store).unwrap();
        let rect = Rectangle::new(0.0, 0.0, 1000.0, 1000.0);
        let stats = ClipBorder::new(&mut store, rect, border).execute().unwrap();
        (store, stats)
    }

    fn internal_segments(store: &VoronoiStore) -> Vec<(Point2, Point2)> {
        store
            .internal_pairs()
            .iter()
            .map(|&e| store.edge_points(e).unwrap().unwrap())
            .collect()
    }

    fn same_segment(s: &(Point2, Point2), a: Point2, b: Point2) -> bool {
        (points_coincide(&s.0, &a) && points_coincide(&s.1, &b))
            || (points_coincide(&s.0, &b) && points_coincide(&s.1, &a))
    }

    #[test]
    fn full_line_spans_the_rectangle() {
        let (store, _) = clipped(&[(500.0, 700.0), (500.0, 300.0)], MakeBorderEdges);
        let segments = internal_segments(&store);
        assert_eq!(segments.len(), 1);
        let (left, right) = (Point2::new(0.0, 500.0), Point2::new(1000.0, 500.0));
        assert!(same_segment(&segments[0], left, right));
    }

    #[test]
    fn rays_end_on_the_border() {
        let (store, _) = clipped(&[(0.0, 0.0), (400.0, 0.0), (0.0, 400.0)], MakeBorderEdges);
        let segments = internal_segments(&store);
        assert_eq!(segments.len(), 3);
        let v = Point2::new(200.0, 200.0);
        assert!(segments.iter().any(|s| same_segment(s, v, Point2::new(200.0, 0.0))));
        assert!(segments.iter().any(|s| same_segment(s, v, Point2::new(0.0, 200.0))));
        assert!(segments.iter().any(|s| same_segment(s, v, Point2::new(1000.0, 1000.0))));
    }

    #[test]
    fn lone_site_gets_four_border_edges() {
        let (store, stats) = clipped(&[(500.0, 500.0)], MakeBorderEdges);
        assert_eq!(stats.border_edges, 4);
        let site = store.site(store.site_ids()[0]).unwrap();
        assert_eq!(site.edges.len(), 4);
        assert_eq!(site.state, CellState::Clipped);
        assert!(site.edges.iter().all(|&e| store.edge(e).unwrap().is_border()));
    }

    #[test]
    fn corner_vertices_are_shared() {
        let (store, _) = clipped(&[(300.0, 700.0), (700.0, 300.0)], MakeBorderEdges);
        let corners = store
            .vertices()
            .filter(|(_, v)| points_coincide(&v.point, &Point2::new(0.0, 0.0)))
            .count();
        assert_eq!(corners, 1);
    }

    #[test]
    fn voronoi_vertex_in_a_corner_is_reused() {
        // All three sites lie 500 from (0, 0), so their vertex is the corner.
        let (store, _) = clipped(&[(500.0, 0.0), (400.0, 300.0), (300.0, 400.0)], MakeBorderEdges);
        let at_corner: Vec<_> = store
            .vertices()
            .filter(|(_, v)| points_coincide(&v.point, &Point2::new(0.0, 0.0)))
            .collect();
        assert_eq!(at_corner.len(), 1);
        assert_eq!(at_corner[0].1.kind, VertexKind::Voronoi);
    }

    #[test]
    fn no_border_edges_when_disabled() {
        let (store, stats) = clipped(&[(500.0, 700.0), (500.0, 300.0)], DoNotMakeBorderEdges);
        assert_eq!(stats.border_edges, 0);
        assert!(store.edges().all(|(_, e)| !e.is_border()));
        assert!(store.edges().all(|(_, e)| e.is_complete()));
    }

    #[test]
    fn edge_outside_rectangle_is_removed() {
        // The outer sites' bisector starts at (500, 8005) and runs upwards.
        let (store, stats) = clipped(&[(100.0, 10.0), (500.0, 0.0), (900.0, 10.0)], MakeBorderEdges);
        assert_eq!(stats.clipped_away, 1);
        assert_eq!(store.internal_pairs().len(), 2);
    }
}
