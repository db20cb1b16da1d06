pub mod diagram;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod sweep;
pub mod topology;

#[cfg(test)]
mod test_support;

pub use diagram::{EdgeView, SiteView, VoronoiDiagram};
pub use error::{Result, TessellisError};
