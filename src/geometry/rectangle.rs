use parry3d_f64::shape::SharedShape;

use crate::error::Result;

use super::final_shape::finalize_source;
use super::internal::{check_extent, CollisionGeometries, ShapeInternal};
use super::{ConvexShape, FinalConvexShape, FinalShape, Finalize, FinalizeConvex, Shape};

/// Half thickness of the cuboid that stands in for a planar rectangle in the
/// backend's 3D world.
pub const EXTRUSION_HALF_HEIGHT: f64 = 1e-3;

#[derive(Debug, Clone)]
struct RectangleInternal {
    width: f64,
    height: f64,
}

impl ShapeInternal for RectangleInternal {
    fn make_collision_geometries(&self) -> Result<CollisionGeometries> {
        let width = check_extent("width", self.width)?;
        let height = check_extent("height", self.height)?;
        Ok(vec![SharedShape::cuboid(
            width / 2.0,
            height / 2.0,
            EXTRUSION_HALF_HEIGHT,
        )])
    }

    fn characteristic_length(&self) -> f64 {
        self.width.hypot(self.height) / 2.0
    }

    fn finalize_variant(&self) -> Result<FinalShape> {
        Rectangle::from_internal(self.clone()).finalize()
    }
}

/// An axis-aligned rectangle centered on the origin.
///
/// `width` spans the x axis and `height` the y axis. Neither is checked until
/// the rectangle is finalized.
#[derive(Debug, Clone)]
pub struct Rectangle {
    shape: ConvexShape,
}

impl Rectangle {
    /// Creates a new rectangle from its full extents.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_internal(RectangleInternal { width, height })
    }

    fn from_internal(internal: RectangleInternal) -> Self {
        Self {
            shape: ConvexShape::from_internal(internal),
        }
    }

    fn internal(&self) -> &RectangleInternal {
        self.shape.as_shape().internal_as()
    }

    fn internal_mut(&mut self) -> &mut RectangleInternal {
        self.shape.as_shape_mut().internal_as_mut()
    }

    /// Returns the extent along the x axis.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.internal().width
    }

    /// Returns the extent along the y axis.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.internal().height
    }

    /// Sets the extent along the x axis.
    pub fn set_width(&mut self, width: f64) {
        self.internal_mut().width = width;
    }

    /// Sets the extent along the y axis.
    pub fn set_height(&mut self, height: f64) {
        self.internal_mut().height = height;
    }
}

impl PartialEq for Rectangle {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }
}

impl AsRef<Shape> for Rectangle {
    fn as_ref(&self) -> &Shape {
        self.shape.as_shape()
    }
}

impl AsRef<ConvexShape> for Rectangle {
    fn as_ref(&self) -> &ConvexShape {
        &self.shape
    }
}

impl From<Rectangle> for ConvexShape {
    fn from(rectangle: Rectangle) -> Self {
        rectangle.shape
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        rectangle.shape.into()
    }
}

impl Finalize for Rectangle {
    fn finalize(&self) -> Result<FinalShape> {
        finalize_source(self)
    }
}

impl FinalizeConvex for Rectangle {
    fn finalize_convex(&self) -> Result<FinalConvexShape> {
        finalize_source(self).map(FinalConvexShape::from_convex)
    }
}
