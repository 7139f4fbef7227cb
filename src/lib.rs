pub mod error;
pub mod geometry;
pub mod math;

pub use error::{Result, ShapeError};
pub use geometry::{
    Circle, ConvexShape, FinalConvexShape, FinalShape, Finalize, FinalizeConvex, Rectangle, Shape,
    SimplePolygon, Space,
};
