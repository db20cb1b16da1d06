pub mod beachline;
pub mod event_queue;

use beachline::{Arc, Beachline, Landing, PendingCircle};
use event_queue::{EventKind, EventQueue};

use crate::error::{Result, TessellationError};
use crate::math::{
    points_coincide,
    predicates_2d::{circumcenter, converging_circle},
    Point2, TOLERANCE,
};
use crate::topology::{SiteId, VertexData, VertexKind, VoronoiStore};

/// Counters reported after a sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepStats {
    pub site_events: usize,
    pub circle_events: usize,
    pub skipped_events: usize,
}

/// Runs Fortune's sweep, leaving every internal edge of the diagram in `store`.
///
/// The sweep line moves towards increasing y. All sweep state lives in a
/// `SweepContext` owned by this call. Edges that reach infinity are left
/// open; the border clipper completes them.
///
/// # Errors
///
/// Returns an error if the graph becomes inconsistent (an internal invariant failure).
pub fn run(store: &mut VoronoiStore) -> Result<SweepStats> {
    let mut context = SweepContext::new(store)?;
    while let Some(event) = context.queue.pop() {
        match event.kind {
            EventKind::Site(site) => context.handle_site(site)?,
            EventKind::Circle { arc, center, token } => {
                let current = context.beachline.get(arc).and_then(|a| a.circle);
                if current.map(|c| c.token) != Some(token) {
                    continue;
                }
                context.handle_circle(arc, center)?;
            }
        }
    }
    context.stats.skipped_events = context.queue.skipped();
    tracing::debug!(
        sites = context.stats.site_events,
        vertices = context.stats.circle_events,
        skipped = context.stats.skipped_events,
        "sweep finished"
    );
    Ok(context.stats)
}

/// Mutable state of one sweep.
struct SweepContext<'a> {
    store: &'a mut VoronoiStore,
    queue: EventQueue,
    beachline: Beachline,
    stats: SweepStats,
}

impl<'a> SweepContext<'a> {
    fn new(store: &'a mut VoronoiStore) -> Result<Self> {
        let mut queue = EventQueue::new();
        for &site in store.site_ids() {
            queue.push_site(site, store.site(site)?.position);
        }
        Ok(Self {
            store,
            queue,
            beachline: Beachline::new(),
            stats: SweepStats::default(),
        })
    }

    fn failure(message: &str) -> TessellationError {
        TessellationError::Failed(message.to_owned())
    }

    fn arc_site(&self, index: usize) -> Result<(SiteId, Point2)> {
        self.beachline
            .at(index)
            .map(|a| (a.site, a.focus))
            .ok_or_else(|| Self::failure("beachline index out of range").into())
    }

    fn handle_site(&mut self, site: SiteId) -> Result<()> {
        self.stats.site_events += 1;
        let focus = self.store.site(site)?.position;
        tracing::trace!(x = focus.x, y = focus.y, "site event");

        match self.beachline.locate(focus.x, focus.y) {
            Landing::Empty => {
                self.beachline.insert(0, Arc::new(site, focus));
            }
            Landing::Inside(index) => {
                // Split the arc in two around the new one.
                self.detach_circle(index);
                let (split_site, split_focus) = self.arc_site(index)?;
                let edge = self.store.open_edge(split_site, site, None)?;

                let mut middle = Arc::new(site, focus);
                middle.edge = Some(edge);
                let mut right = Arc::new(split_site, split_focus);
                right.edge = Some(edge);
                self.beachline.insert(index + 1, middle);
                self.beachline.insert(index + 2, right);

                self.attach_circle(index);
                self.attach_circle(index + 2);
            }
            Landing::After(index) => {
                let (left_site, _) = self.arc_site(index)?;
                let edge = self.store.open_edge(left_site, site, None)?;
                let mut arc = Arc::new(site, focus);
                arc.edge = Some(edge);
                self.beachline.insert(index + 1, arc);
            }
            Landing::BreakPoint(left) => self.land_on_break_point(left, site, focus)?,
        }
        Ok(())
    }

    /// The new site sits exactly below the break-point between arcs `left`
    /// and `left + 1`: that break-point becomes a vertex right away.
    fn land_on_break_point(&mut self, left: usize, site: SiteId, focus: Point2) -> Result<()> {
        let right = left + 1;
        self.detach_circle(left);
        self.detach_circle(right);

        let (left_site, left_focus) = self.arc_site(left)?;
        let (right_site, right_focus) = self.arc_site(right)?;
        let center = circumcenter(&left_focus, &focus, &right_focus)
            .ok_or_else(|| Self::failure("site landed on a break-point of collinear arcs"))?;
        let right_edge = self
            .beachline
            .at(right)
            .and_then(|a| a.edge)
            .ok_or_else(|| Self::failure("inner arc without a left edge"))?;

        // A circle event at the same point may already have started this edge.
        let started = self
            .store
            .edge(self.store.half_for(right_edge, right_site)?)?
            .start
            .filter(|&v| {
                self.store
                    .point(v)
                    .is_ok_and(|p| points_coincide(&p, &center))
            });
        let vertex = match started {
            Some(v) => v,
            None => self
                .store
                .add_vertex(VertexData::new(center, VertexKind::Voronoi)),
        };
        self.store.set_edge_start(right_edge, left_site, vertex)?;

        let mut middle = Arc::new(site, focus);
        middle.edge = Some(self.store.open_edge(left_site, site, Some(vertex))?);
        let new_right_edge = self.store.open_edge(site, right_site, Some(vertex))?;
        self.beachline.insert(right, middle);
        if let Some(arc) = self.beachline.at_mut(right + 1) {
            arc.edge = Some(new_right_edge);
        }

        self.attach_circle(left);
        self.attach_circle(right + 1);
        Ok(())
    }

    fn handle_circle(&mut self, arc: beachline::ArcId, center: Point2) -> Result<()> {
        self.stats.circle_events += 1;
        tracing::trace!(x = center.x, y = center.y, "circle event");

        let index = self
            .beachline
            .index_of(arc)
            .ok_or_else(|| Self::failure("circle event for a vanished arc"))?;
        if let Some(fired) = self.beachline.at_mut(index) {
            fired.circle = None;
        }
        let vertex = self
            .store
            .add_vertex(VertexData::new(center, VertexKind::Voronoi));

        // Arcs whose circles meet at the same point vanish together, so a
        // vertex of degree > 3 is created once and no zero-length edge appears.
        let converges_here = |a: &Arc| {
            a.circle.is_some_and(|c| {
                (c.center.x - center.x).abs() < TOLERANCE
                    && (c.center.y - center.y).abs() < TOLERANCE
            })
        };
        let mut first = index;
        while first > 1 && self.beachline.at(first - 1).is_some_and(converges_here) {
            first -= 1;
        }
        let mut last = index;
        while last + 2 < self.beachline.len()
            && self.beachline.at(last + 1).is_some_and(converges_here)
        {
            last += 1;
        }
        if first == 0 || last + 1 >= self.beachline.len() {
            return Err(Self::failure("circle event on an outermost arc").into());
        }
        let left = first - 1;
        let right = last + 1;

        // Every break-point between `left` and `right` ends at the vertex.
        for k in first..=right {
            let (prev_site, _) = self.arc_site(k - 1)?;
            let edge = self
                .beachline
                .at(k)
                .and_then(|a| a.edge)
                .ok_or_else(|| Self::failure("inner arc without a left edge"))?;
            self.store.set_edge_start(edge, prev_site, vertex)?;
        }

        for k in first..=last {
            self.detach_circle(k);
        }
        self.detach_circle(left);
        self.detach_circle(right);
        for _ in first..=last {
            self.beachline.remove(first);
        }

        let (left_site, _) = self.arc_site(left)?;
        let (right_site, _) = self.arc_site(first)?;
        let edge = self.store.open_edge(left_site, right_site, Some(vertex))?;
        if let Some(arc) = self.beachline.at_mut(first) {
            arc.edge = Some(edge);
        }

        self.attach_circle(left);
        self.attach_circle(first);
        Ok(())
    }

    /// Schedules the circle event of the arc at `index`, if its neighbours converge.
    fn attach_circle(&mut self, index: usize) {
        self.detach_circle(index);
        if index == 0 || index + 1 >= self.beachline.len() {
            return;
        }
        let (Some(left), Some(middle), Some(right)) = (
            self.beachline.at(index - 1),
            self.beachline.at(index),
            self.beachline.at(index + 1),
        ) else {
            return;
        };
        if left.site == right.site {
            return;
        }
        let Some(circle) = converging_circle(&left.focus, &middle.focus, &right.focus) else {
            return;
        };
        let Some(id) = self.beachline.id_at(index) else {
            return;
        };
        let token = self.queue.push_circle(id, circle.center, circle.sweep_y());
        if let Some(arc) = self.beachline.at_mut(index) {
            arc.circle = Some(PendingCircle {
                token,
                center: circle.center,
            });
        }
    }

    /// Cancels the pending circle event of the arc at `index`, if any.
    fn detach_circle(&mut self, index: usize) {
        if let Some(pending) = self.beachline.at_mut(index).and_then(|a| a.circle.take()) {
            self.queue.invalidate(pending.token);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store_with(sites: &[(f64, f64)]) -> VoronoiStore {
        let mut store = VoronoiStore::new();
        for &(x, y) in sites {
            store.add_site(Point2::new(x, y));
        }
        store
    }

    fn voronoi_vertices(store: &VoronoiStore) -> Vec<Point2> {
        store
            .vertices()
            .filter(|(_, v)| v.kind == VertexKind::Voronoi)
            .map(|(_, v)| v.point)
            .collect()
    }

    #[test]
    fn single_site_has_no_edges() {
        let mut store = store_with(&[(500.0, 500.0)]);
        let stats = run(&mut store).unwrap();
        assert_eq!(stats.site_events, 1);
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn two_sites_open_one_full_line() {
        let mut store = store_with(&[(500.0, 700.0), (500.0, 300.0)]);
        run(&mut store).unwrap();
        assert_eq!(store.internal_pairs().len(), 1);
        let edge = store.edge(store.internal_pairs()[0]).unwrap();
        assert!(edge.start.is_none() && edge.end.is_none());
    }

    #[test]
    fn collinear_sites_create_no_vertex() {
        let mut store = store_with(&[(500.0, 900.0), (500.0, 500.0), (500.0, 100.0)]);
        let stats = run(&mut store).unwrap();
        assert_eq!(stats.circle_events, 0);
        assert_eq!(store.internal_pairs().len(), 2);
        assert!(voronoi_vertices(&store).is_empty());
    }

    #[test]
    fn triangle_creates_circumcenter() {
        let mut store = store_with(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
        let stats = run(&mut store).unwrap();
        assert_eq!(stats.circle_events, 1);
        let vertices = voronoi_vertices(&store);
        assert_eq!(vertices.len(), 1);
        assert!(points_coincide(&vertices[0], &Point2::new(2.0, 2.0)));
        assert_eq!(store.internal_pairs().len(), 3);
    }

    #[test]
    fn cocircular_square_makes_one_vertex() {
        let mut store = store_with(&[(250.0, 250.0), (750.0, 250.0), (250.0, 750.0), (750.0, 750.0)]);
        run(&mut store).unwrap();
        let vertices = voronoi_vertices(&store);
        assert_eq!(vertices.len(), 1);
        assert!(points_coincide(&vertices[0], &Point2::new(500.0, 500.0)));
        assert_eq!(store.internal_pairs().len(), 4);
    }

    #[test]
    fn every_half_edge_bounds_its_site() {
        let mut store = store_with(&[(300.0, 500.0), (500.0, 300.0), (700.0, 500.0), (500.0, 700.0), (500.0, 500.0)]);
        run(&mut store).unwrap();
        for &site in store.site_ids() {
            for &edge in &store.site(site).unwrap().edges {
                assert_eq!(store.edge(edge).unwrap().site, site);
            }
        }
    }
}
