pub mod rectangle;

pub use rectangle::{BorderLocation, BorderSide, Rectangle};
