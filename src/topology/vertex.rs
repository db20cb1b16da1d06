use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the Voronoi store.
    pub struct VertexId;
}

/// How a vertex came into existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    /// Created by a circle event (or a site landing exactly on a break-point).
    Voronoi,
    /// Created where an edge was cut by the rectangle.
    Border,
    /// A rectangle corner attached to the cell that contains it.
    Corner,
}

/// Data associated with a vertex of the diagram.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// The 2D position of the vertex.
    pub point: Point2,
    /// Origin of the vertex.
    pub kind: VertexKind,
}

impl VertexData {
    /// Creates a new vertex at the given point.
    #[must_use]
    pub fn new(point: Point2, kind: VertexKind) -> Self {
        Self { point, kind }
    }
}
