use super::edge::EdgeId;
use super::vertex::VertexId;
use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a site in the Voronoi store.
    pub struct SiteId;
}

/// Lifecycle of a cell. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CellState {
    /// Edges are still being attached by the sweep.
    Open,
    /// Edges are cut to the rectangle and border edges are in place.
    Clipped,
    /// Neighbours and clockwise boundary are computed.
    Finalized,
}

/// An input site and the cell it owns.
#[derive(Debug, Clone)]
pub struct SiteData {
    /// Position of the site in the input sequence.
    pub index: usize,
    pub position: Point2,
    /// Half-edges bounding this site's cell (internal and border).
    pub edges: Vec<EdgeId>,
    /// Input indices of the sites sharing an internal edge, sorted ascending.
    pub neighbours: Vec<usize>,
    /// Distinct cell vertices in clockwise order.
    pub boundary: Vec<VertexId>,
    pub state: CellState,
}

impl SiteData {
    /// Creates an open cell with no edges.
    #[must_use]
    pub fn new(index: usize, position: Point2) -> Self {
        Self {
            index,
            position,
            edges: Vec::new(),
            neighbours: Vec::new(),
            boundary: Vec::new(),
            state: CellState::Open,
        }
    }
}
