use std::collections::HashSet;

use crate::geometry::{BorderLocation, Rectangle};
use crate::math::{
    polygon_2d::{centroid_2d, convex_contains, signed_area_2d},
    Point2,
};
use crate::operations::TessellationParams;
use crate::topology::{EdgeData, EdgeId, SiteData, VertexData, VertexId, VoronoiStore};

/// A Voronoi diagram clipped to a rectangle.
///
/// Sites keep their input order; `site(i)` is the cell of the `i`-th input
/// point.
#[derive(Debug)]
pub struct VoronoiDiagram {
    store: VoronoiStore,
    rectangle: Rectangle,
    params: TessellationParams,
}

impl VoronoiDiagram {
    pub(crate) fn new(store: VoronoiStore, rectangle: Rectangle, params: TessellationParams) -> Self {
        Self {
            store,
            rectangle,
            params,
        }
    }

    #[must_use]
    pub fn rectangle(&self) -> &Rectangle {
        &self.rectangle
    }

    #[must_use]
    pub fn params(&self) -> TessellationParams {
        self.params
    }

    /// The underlying arena, for callers that walk the half-edge graph directly.
    #[must_use]
    pub fn store(&self) -> &VoronoiStore {
        &self.store
    }

    #[must_use]
    pub fn site_count(&self) -> usize {
        self.store.site_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.site_count() == 0
    }

    /// The cell of the input site at `index`.
    #[must_use]
    pub fn site(&self, index: usize) -> Option<SiteView<'_>> {
        let id = *self.store.site_ids().get(index)?;
        let data = self.store.site(id).ok()?;
        Some(SiteView {
            diagram: self,
            data,
        })
    }

    /// All cells in input order.
    pub fn sites(&self) -> impl Iterator<Item = SiteView<'_>> {
        (0..self.site_count()).filter_map(|i| self.site(i))
    }

    /// Every half-edge that survived clipping.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.store.edges().map(|(id, data)| EdgeView {
            diagram: self,
            id,
            data,
        })
    }

    /// Every vertex used by at least one surviving edge.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &VertexData)> {
        let used: HashSet<VertexId> = self
            .store
            .edges()
            .flat_map(|(_, e)| [e.start, e.end])
            .flatten()
            .collect();
        self.store.vertices().filter(move |(id, _)| used.contains(id))
    }

    /// Where a vertex lies relative to the rectangle perimeter.
    #[must_use]
    pub fn vertex_location(&self, id: VertexId) -> Option<BorderLocation> {
        let vertex = self.store.vertex(id).ok()?;
        Some(self.rectangle.border_location(&vertex.point))
    }
}

/// Read-only view of one cell.
#[derive(Debug, Clone, Copy)]
pub struct SiteView<'a> {
    diagram: &'a VoronoiDiagram,
    data: &'a SiteData,
}

impl<'a> SiteView<'a> {
    /// Position of the site in the input sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        self.data.index
    }

    #[must_use]
    pub fn position(&self) -> Point2 {
        self.data.position
    }

    /// Input indices of the sites sharing an internal edge with this one, ascending.
    #[must_use]
    pub fn neighbours(&self) -> &'a [usize] {
        &self.data.neighbours
    }

    /// Distinct cell points in clockwise order, starting from the first point
    /// met when sweeping clockwise from straight below the site.
    #[must_use]
    pub fn boundary_points(&self) -> Vec<Point2> {
        self.data
            .boundary
            .iter()
            .filter_map(|&v| self.diagram.store.point(v).ok())
            .collect()
    }

    /// The half-edges bounding the cell, internal and border.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'a>> + 'a {
        let diagram = self.diagram;
        self.data.edges.iter().filter_map(move |&id| {
            let data = diagram.store.edge(id).ok()?;
            Some(EdgeView { diagram, id, data })
        })
    }

    /// Area of the cell.
    #[must_use]
    pub fn area(&self) -> f64 {
        -signed_area_2d(&self.boundary_points())
    }

    /// Area centroid of the cell, or `None` if it has no area.
    #[must_use]
    pub fn centroid(&self) -> Option<Point2> {
        centroid_2d(&self.boundary_points())
    }

    /// Returns `true` if `point` lies in the cell or on its boundary.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        convex_contains(&self.boundary_points(), point)
    }

    /// Where the site itself lies relative to the rectangle perimeter.
    #[must_use]
    pub fn border_location(&self) -> BorderLocation {
        self.diagram.rectangle.border_location(&self.data.position)
    }
}

/// Read-only view of one half-edge.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    diagram: &'a VoronoiDiagram,
    id: EdgeId,
    data: &'a EdgeData,
}

impl EdgeView<'_> {
    #[must_use]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    #[must_use]
    pub fn start(&self) -> Option<Point2> {
        self.data.start.and_then(|v| self.diagram.store.point(v).ok())
    }

    #[must_use]
    pub fn end(&self) -> Option<Point2> {
        self.data.end.and_then(|v| self.diagram.store.point(v).ok())
    }

    /// Input index of the cell this half-edge bounds.
    #[must_use]
    pub fn site(&self) -> Option<usize> {
        self.diagram.store.site(self.data.site).ok().map(|s| s.index)
    }

    /// Input index of the cell across the edge; `None` on the rectangle border.
    #[must_use]
    pub fn neighbour(&self) -> Option<usize> {
        let other = self.data.neighbour?;
        self.diagram.store.site(other).ok().map(|s| s.index)
    }

    #[must_use]
    pub fn twin(&self) -> Option<EdgeId> {
        self.data.twin
    }

    #[must_use]
    pub fn is_border(&self) -> bool {
        self.data.is_border()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        match (self.start(), self.end()) {
            (Some(a), Some(b)) => nalgebra::distance(&a, &b),
            _ => f64::INFINITY,
        }
    }

    #[must_use]
    pub fn midpoint(&self) -> Option<Point2> {
        Some(nalgebra::center(&self.start()?, &self.end()?))
    }
}
