mod circle;
mod final_shape;
mod internal;
mod polygon;
mod rectangle;
mod shape;
mod space;

pub use circle::Circle;
pub use final_shape::{FinalConvexShape, FinalShape};
pub use internal::{CollisionGeometries, CollisionGeometry};
pub use polygon::SimplePolygon;
pub use rectangle::{Rectangle, EXTRUSION_HALF_HEIGHT};
pub use shape::{ConvexShape, Finalize, FinalizeConvex, Shape};
pub use space::Space;
