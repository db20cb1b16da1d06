use super::{EdgeData, EdgeId, SiteId, VertexData, VertexId, VertexKind, VoronoiStore};
use crate::error::TopologyError;
use crate::math::{points_coincide, Point2};

/// Graph construction used by the sweep and the border clipper.
impl VoronoiStore {
    /// Opens a new internal edge between the cells of `a` and `b`.
    ///
    /// Creates the twin half-edge pair, registers each half with its site and
    /// returns the half bounding `a`. When `origin` is given, it becomes the
    /// start of the half bounding `b` (and therefore the end of `a`'s half).
    ///
    /// # Errors
    ///
    /// Returns an error if either site is not in the store.
    pub fn open_edge(
        &mut self,
        a: SiteId,
        b: SiteId,
        origin: Option<VertexId>,
    ) -> Result<EdgeId, TopologyError> {
        self.site(a)?;
        self.site(b)?;

        let ha = self.edges.insert(EdgeData {
            start: None,
            end: origin,
            site: a,
            neighbour: Some(b),
            twin: None,
        });
        let hb = self.edges.insert(EdgeData {
            start: origin,
            end: None,
            site: b,
            neighbour: Some(a),
            twin: Some(ha),
        });
        self.edge_mut(ha)?.twin = Some(hb);

        self.site_mut(a)?.edges.push(ha);
        self.site_mut(b)?.edges.push(hb);
        self.internal_pairs.push(ha);
        Ok(ha)
    }

    /// Returns the half of `edge`'s pair that bounds `site`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither half bounds `site`.
    pub fn half_for(&self, edge: EdgeId, site: SiteId) -> Result<EdgeId, TopologyError> {
        let data = self.edge(edge)?;
        if data.site == site {
            return Ok(edge);
        }
        match data.twin {
            Some(twin) if self.edge(twin)?.site == site => Ok(twin),
            _ => Err(TopologyError::EntityNotFound("half-edge bounding site")),
        }
    }

    /// Pins `vertex` as the start of the half-edge bounding `site`; its twin ends there.
    ///
    /// # Errors
    ///
    /// Returns an error if the pair has no half bounding `site`.
    pub fn set_edge_start(
        &mut self,
        edge: EdgeId,
        site: SiteId,
        vertex: VertexId,
    ) -> Result<(), TopologyError> {
        let half = self.half_for(edge, site)?;
        let data = self.edge_mut(half)?;
        data.start = Some(vertex);
        if let Some(twin) = data.twin {
            self.edge_mut(twin)?.end = Some(vertex);
        }
        Ok(())
    }

    /// Sets both endpoints of `half` and mirrors them on its twin.
    ///
    /// # Errors
    ///
    /// Returns an error if `half` is not in the store.
    pub fn set_edge_span(
        &mut self,
        half: EdgeId,
        start: VertexId,
        end: VertexId,
    ) -> Result<(), TopologyError> {
        let data = self.edge_mut(half)?;
        data.start = Some(start);
        data.end = Some(end);
        if let Some(twin) = data.twin {
            let twin = self.edge_mut(twin)?;
            twin.start = Some(end);
            twin.end = Some(start);
        }
        Ok(())
    }

    /// Removes an internal edge pair from the graph and from both sites.
    ///
    /// # Errors
    ///
    /// Returns an error if `edge` is not in the store.
    pub fn remove_edge_pair(&mut self, edge: EdgeId) -> Result<(), TopologyError> {
        let data = self.edge(edge)?.clone();
        let mut halves = vec![(edge, data.site)];
        if let Some(twin) = data.twin {
            halves.push((twin, self.edge(twin)?.site));
        }
        for (half, site) in halves {
            self.site_mut(site)?.edges.retain(|&e| e != half);
            self.edges.remove(half);
        }
        self.internal_pairs
            .retain(|&e| e != edge && Some(e) != data.twin);
        Ok(())
    }

    /// Records that an existing vertex lies on the rectangle perimeter, so
    /// [`border_vertex`](Self::border_vertex) reuses it.
    pub fn mark_perimeter(&mut self, id: VertexId) {
        if !self.perimeter.contains(&id) {
            self.perimeter.push(id);
        }
    }

    /// Returns the perimeter vertex at `point`, creating one of `kind` if no
    /// perimeter vertex coincides with it.
    ///
    /// Only vertices on the perimeter are searched. Voronoi vertices on the
    /// perimeter must be registered with [`mark_perimeter`](Self::mark_perimeter)
    /// first, so a site in a corner never produces a duplicate point.
    pub fn border_vertex(&mut self, point: Point2, kind: VertexKind) -> VertexId {
        let existing = self.perimeter.iter().copied().find(|&id| {
            self.vertices
                .get(id)
                .is_some_and(|v| points_coincide(&v.point, &point))
        });
        if let Some(id) = existing {
            return id;
        }
        let id = self.vertices.insert(VertexData::new(point, kind));
        self.perimeter.push(id);
        id
    }

    /// Adds a border half-edge from `start` to `end` owned solely by `site`.
    ///
    /// # Errors
    ///
    /// Returns an error if `site` is not in the store.
    pub fn add_border_edge(
        &mut self,
        site: SiteId,
        start: VertexId,
        end: VertexId,
    ) -> Result<EdgeId, TopologyError> {
        self.site(site)?;
        let id = self.edges.insert(EdgeData {
            start: Some(start),
            end: Some(end),
            site,
            neighbour: None,
            twin: None,
        });
        self.site_mut(site)?.edges.push(id);
        Ok(id)
    }

    /// Endpoint positions of a complete half-edge, or `None` while it is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or one of its vertices is missing.
    pub fn edge_points(&self, edge: EdgeId) -> Result<Option<(Point2, Point2)>, TopologyError> {
        let data = self.edge(edge)?;
        match (data.start, data.end) {
            (Some(a), Some(b)) => Ok(Some((self.point(a)?, self.point(b)?))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn two_sites(store: &mut VoronoiStore) -> (SiteId, SiteId) {
        let a = store.add_site(Point2::new(0.0, 0.0));
        let b = store.add_site(Point2::new(2.0, 0.0));
        (a, b)
    }

    #[test]
    fn open_edge_creates_registered_twins() {
        let mut store = VoronoiStore::new();
        let (a, b) = two_sites(&mut store);
        let ha = store.open_edge(a, b, None).unwrap();
        let hb = store.edge(ha).unwrap().twin.unwrap();

        assert_eq!(store.edge(hb).unwrap().twin, Some(ha));
        assert_eq!(store.edge(hb).unwrap().site, b);
        assert_eq!(store.site(a).unwrap().edges, vec![ha]);
        assert_eq!(store.site(b).unwrap().edges, vec![hb]);
        assert_eq!(store.internal_pairs(), &[ha]);
        assert!(!store.edge(ha).unwrap().is_border());
    }

    #[test]
    fn origin_starts_the_second_half() {
        let mut store = VoronoiStore::new();
        let (a, b) = two_sites(&mut store);
        let v = store.add_vertex(VertexData::new(Point2::new(1.0, 0.0), VertexKind::Voronoi));
        let ha = store.open_edge(a, b, Some(v)).unwrap();
        let hb = store.half_for(ha, b).unwrap();

        assert_eq!(store.edge(hb).unwrap().start, Some(v));
        assert_eq!(store.edge(ha).unwrap().end, Some(v));
        assert_eq!(store.edge(ha).unwrap().start, None);
    }

    #[test]
    fn set_edge_start_mirrors_on_twin() {
        let mut store = VoronoiStore::new();
        let (a, b) = two_sites(&mut store);
        let ha = store.open_edge(a, b, None).unwrap();
        let v = store.add_vertex(VertexData::new(Point2::new(1.0, 5.0), VertexKind::Voronoi));
        store.set_edge_start(ha, a, v).unwrap();

        let hb = store.half_for(ha, b).unwrap();
        assert_eq!(store.edge(ha).unwrap().start, Some(v));
        assert_eq!(store.edge(hb).unwrap().end, Some(v));
    }

    #[test]
    fn remove_pair_detaches_both_sites() {
        let mut store = VoronoiStore::new();
        let (a, b) = two_sites(&mut store);
        let ha = store.open_edge(a, b, None).unwrap();
        store.remove_edge_pair(ha).unwrap();

        assert_eq!(store.edge_count(), 0);
        assert!(store.site(a).unwrap().edges.is_empty());
        assert!(store.site(b).unwrap().edges.is_empty());
        assert!(store.internal_pairs().is_empty());
    }

    #[test]
    fn border_vertices_are_deduplicated() {
        let mut store = VoronoiStore::new();
        let v1 = store.border_vertex(Point2::new(0.0, 500.0), VertexKind::Border);
        let v2 = store.border_vertex(Point2::new(1e-12, 500.0), VertexKind::Border);
        let v3 = store.border_vertex(Point2::new(0.0, 0.0), VertexKind::Corner);
        assert_eq!(v1, v2);
        assert_ne!(v1, v3);
        assert_eq!(store.vertex(v3).unwrap().kind, VertexKind::Corner);
    }

    #[test]
    fn marked_voronoi_vertex_is_reused_on_the_perimeter() {
        let mut store = VoronoiStore::new();
        let inner = store.add_vertex(VertexData::new(Point2::new(0.0, 0.0), VertexKind::Voronoi));
        let unmarked = store.border_vertex(Point2::new(0.0, 0.0), VertexKind::Corner);
        assert_ne!(inner, unmarked);

        let mut store = VoronoiStore::new();
        let on_edge = store.add_vertex(VertexData::new(Point2::new(0.0, 0.0), VertexKind::Voronoi));
        store.mark_perimeter(on_edge);
        store.mark_perimeter(on_edge);
        assert_eq!(store.border_vertex(Point2::new(0.0, 0.0), VertexKind::Corner), on_edge);
        assert_eq!(store.vertex(on_edge).unwrap().kind, VertexKind::Voronoi);
        assert_eq!(store.vertices().count(), 1);
    }

    #[test]
    fn half_for_unknown_site_fails() {
        let mut store = VoronoiStore::new();
        let (a, b) = two_sites(&mut store);
        let c = store.add_site(Point2::new(9.0, 9.0));
        let ha = store.open_edge(a, b, None).unwrap();
        assert!(store.half_for(ha, c).is_err());
    }
}
