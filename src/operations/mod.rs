mod clip_border;
mod extract;
mod relax;
mod tessellate;

pub use clip_border::{ClipBorder, ClipStats};
pub use extract::Extract;
pub use relax::LloydRelaxation;
pub use tessellate::Tessellate;

/// Whether the rectangle perimeter becomes part of the cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BorderEdgeGeneration {
    /// Attach corners and close every cell along the rectangle sides.
    #[default]
    MakeBorderEdges,
    /// Only clip internal edges; cells touching the border stay open there.
    DoNotMakeBorderEdges,
}

/// Parameters controlling tessellation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TessellationParams {
    pub border_edges: BorderEdgeGeneration,
}
