use parry3d_f64::shape::SharedShape;

use crate::error::Result;

use super::final_shape::finalize_source;
use super::internal::{check_extent, CollisionGeometries, ShapeInternal};
use super::{ConvexShape, FinalConvexShape, FinalShape, Finalize, FinalizeConvex, Shape};

#[derive(Debug, Clone)]
struct CircleInternal {
    radius: f64,
}

impl ShapeInternal for CircleInternal {
    fn make_collision_geometries(&self) -> Result<CollisionGeometries> {
        let radius = check_extent("radius", self.radius)?;
        Ok(vec![SharedShape::ball(radius)])
    }

    fn characteristic_length(&self) -> f64 {
        self.radius
    }

    fn finalize_variant(&self) -> Result<FinalShape> {
        Circle::from_internal(self.clone()).finalize()
    }
}

/// A circle centered on the origin, represented in the backend as a ball.
///
/// The radius is not checked until the circle is finalized.
#[derive(Debug, Clone)]
pub struct Circle {
    shape: ConvexShape,
}

impl Circle {
    /// Creates a new circle.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self::from_internal(CircleInternal { radius })
    }

    fn from_internal(internal: CircleInternal) -> Self {
        Self {
            shape: ConvexShape::from_internal(internal),
        }
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.shape.as_shape().internal_as::<CircleInternal>().radius
    }

    /// Sets the radius of the circle.
    pub fn set_radius(&mut self, radius: f64) {
        self.shape
            .as_shape_mut()
            .internal_as_mut::<CircleInternal>()
            .radius = radius;
    }
}

impl PartialEq for Circle {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        self.radius() == other.radius()
    }
}

impl AsRef<Shape> for Circle {
    fn as_ref(&self) -> &Shape {
        self.shape.as_shape()
    }
}

impl AsRef<ConvexShape> for Circle {
    fn as_ref(&self) -> &ConvexShape {
        &self.shape
    }
}

impl From<Circle> for ConvexShape {
    fn from(circle: Circle) -> Self {
        circle.shape
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        circle.shape.into()
    }
}

impl Finalize for Circle {
    fn finalize(&self) -> Result<FinalShape> {
        finalize_source(self)
    }
}

impl FinalizeConvex for Circle {
    fn finalize_convex(&self) -> Result<FinalConvexShape> {
        finalize_source(self).map(FinalConvexShape::from_convex)
    }
}
