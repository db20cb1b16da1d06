pub mod builder;
pub mod edge;
pub mod site;
pub mod vertex;

pub use edge::{EdgeData, EdgeId};
pub use site::{CellState, SiteData, SiteId};
pub use vertex::{VertexData, VertexId, VertexKind};

use crate::error::TopologyError;
use crate::math::Point2;
use slotmap::SlotMap;

/// Central arena that owns the sites, vertices and half-edges of one diagram.
///
/// Entities reference each other via typed IDs (generational indices), so the
/// cyclic site ↔ edge ↔ twin relations carry no ownership.
#[derive(Debug, Default)]
pub struct VoronoiStore {
    sites: SlotMap<SiteId, SiteData>,
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    /// Sites in input order.
    site_order: Vec<SiteId>,
    /// One half of every internal edge pair, in creation order.
    internal_pairs: Vec<EdgeId>,
    /// Vertices known to lie on the rectangle perimeter.
    perimeter: Vec<VertexId>,
}

impl VoronoiStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Site operations ---

    /// Inserts a site with the next input index and returns its ID.
    pub fn add_site(&mut self, position: Point2) -> SiteId {
        let id = self
            .sites
            .insert(SiteData::new(self.site_order.len(), position));
        self.site_order.push(id);
        id
    }

    /// Returns a reference to the site data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn site(&self, id: SiteId) -> Result<&SiteData, TopologyError> {
        self.sites
            .get(id)
            .ok_or(TopologyError::EntityNotFound("site"))
    }

    /// Returns a mutable reference to the site data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn site_mut(&mut self, id: SiteId) -> Result<&mut SiteData, TopologyError> {
        self.sites
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("site"))
    }

    /// Site IDs in input order.
    #[must_use]
    pub fn site_ids(&self) -> &[SiteId] {
        &self.site_order
    }

    #[must_use]
    pub fn site_count(&self) -> usize {
        self.site_order.len()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or(TopologyError::EntityNotFound("vertex"))
    }

    /// Position of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point(&self, id: VertexId) -> Result<Point2, TopologyError> {
        self.vertex(id).map(|v| v.point)
    }

    /// Iterates over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        self.vertices.iter()
    }

    // --- Edge operations ---

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or(TopologyError::EntityNotFound("edge"))
    }

    /// Iterates over all half-edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// One half of every internal edge pair, in creation order.
    #[must_use]
    pub fn internal_pairs(&self) -> &[EdgeId] {
        &self.internal_pairs
    }
}
