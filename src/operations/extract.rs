use crate::error::Result;
use crate::math::{points_coincide, polygon_2d::sort_clockwise, Point2};
use crate::topology::{CellState, SiteId, VertexId, VoronoiStore};

/// Derives each cell's neighbour list and clockwise boundary from the clipped graph.
///
/// Only internal edges that survived clipping establish a neighbour; sites
/// whose cells meet only along the rectangle perimeter are not neighbours.
pub struct Extract<'a> {
    store: &'a mut VoronoiStore,
}

impl<'a> Extract<'a> {
    #[must_use]
    pub fn new(store: &'a mut VoronoiStore) -> Self {
        Self { store }
    }

    /// Finalizes every site.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge refers to a missing site or vertex.
    pub fn execute(mut self) -> Result<()> {
        for site in self.store.site_ids().to_vec() {
            let neighbours = self.neighbours_of(site)?;
            let boundary = self.boundary_of(site)?;
            let data = self.store.site_mut(site)?;
            data.neighbours = neighbours;
            data.boundary = boundary;
            data.state = CellState::Finalized;
        }
        tracing::debug!(sites = self.store.site_count(), "cells finalized");
        Ok(())
    }

    fn neighbours_of(&self, site: SiteId) -> Result<Vec<usize>> {
        let mut indices = Vec::new();
        for &edge in &self.store.site(site)?.edges {
            if let Some(other) = self.store.edge(edge)?.neighbour {
                indices.push(self.store.site(other)?.index);
            }
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(indices)
    }

    fn boundary_of(&self, site: SiteId) -> Result<Vec<VertexId>> {
        let data = self.store.site(site)?;
        let mut points: Vec<(VertexId, Point2)> = Vec::new();
        for &edge in &data.edges {
            let half = self.store.edge(edge)?;
            for id in [half.start, half.end].into_iter().flatten() {
                let point = self.store.point(id)?;
                if !points.iter().any(|(_, q)| points_coincide(q, &point)) {
                    points.push((id, point));
                }
            }
        }

        let mut ordered: Vec<Point2> = points.iter().map(|&(_, p)| p).collect();
        sort_clockwise(&mut ordered, &data.position);
        Ok(ordered
            .iter()
            .filter_map(|p| {
                points
                    .iter()
                    .find(|(_, q)| points_coincide(p, q))
                    .map(|&(id, _)| id)
            })
            .collect())
    }
}
