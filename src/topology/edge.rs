use super::site::SiteId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a half-edge in the Voronoi store.
    pub struct EdgeId;
}

/// A directed half-edge on the boundary of one cell.
///
/// The owning cell lies to the right of `start → end`, so the half-edges of a
/// cell wind clockwise. Internal edges come in twin pairs whose endpoints are
/// swapped; border edges have no twin and no neighbour.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex, `None` while the edge is still open towards infinity.
    pub start: Option<VertexId>,
    /// End vertex, `None` while the edge is still open towards infinity.
    pub end: Option<VertexId>,
    /// The site whose cell this half-edge bounds.
    pub site: SiteId,
    /// The site across the edge, or `None` for a rectangle border edge.
    pub neighbour: Option<SiteId>,
    /// The opposite half-edge of the same internal edge.
    pub twin: Option<EdgeId>,
}

impl EdgeData {
    /// Returns `true` for edges lying on the rectangle perimeter.
    #[must_use]
    pub fn is_border(&self) -> bool {
        self.neighbour.is_none()
    }

    /// Returns `true` once both endpoints are known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
