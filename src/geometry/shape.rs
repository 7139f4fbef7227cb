use crate::error::Result;

use super::internal::ShapeInternal;
use super::{FinalConvexShape, FinalShape};

/// Finalization into an immutable, backend-bound [`FinalShape`].
pub trait Finalize {
    /// Builds the backend geometries for the current parameters.
    ///
    /// Each call produces a new, independent artifact; later mutation of
    /// `self` never affects artifacts already returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the current parameters cannot be represented by
    /// the collision backend.
    fn finalize(&self) -> Result<FinalShape>;
}

/// Finalization for shapes known to be convex.
pub trait FinalizeConvex: Finalize {
    /// Same as [`Finalize::finalize`], but yields an artifact that consumers
    /// requiring convexity accept.
    ///
    /// # Errors
    ///
    /// Returns an error if the current parameters cannot be represented by
    /// the collision backend.
    fn finalize_convex(&self) -> Result<FinalConvexShape>;
}

/// Value handle over one variant's backend conversion.
///
/// Cloning deep-copies the owned internal, so clones never share state.
/// `clone_from` replaces this handle's internal with a copy of the source's.
#[derive(Debug)]
pub struct Shape {
    internal: Box<dyn ShapeInternal>,
}

impl Shape {
    pub(crate) fn from_internal<I: ShapeInternal>(internal: I) -> Self {
        Self {
            internal: Box::new(internal),
        }
    }

    pub(crate) fn internal(&self) -> &dyn ShapeInternal {
        &*self.internal
    }

    /// Borrows the internal as the variant type that created it.
    ///
    /// Only the variant that constructed this handle may call this.
    pub(crate) fn internal_as<I: ShapeInternal>(&self) -> &I {
        match self.internal.as_any().downcast_ref::<I>() {
            Some(internal) => internal,
            None => unreachable!("shape accessed through a foreign variant"),
        }
    }

    /// Mutable counterpart of [`Shape::internal_as`].
    pub(crate) fn internal_as_mut<I: ShapeInternal>(&mut self) -> &mut I {
        match self.internal.as_any_mut().downcast_mut::<I>() {
            Some(internal) => internal,
            None => unreachable!("shape accessed through a foreign variant"),
        }
    }

    /// Returns the characteristic length of the shape.
    #[must_use]
    pub fn characteristic_length(&self) -> f64 {
        self.internal.characteristic_length()
    }
}

impl Clone for Shape {
    fn clone(&self) -> Self {
        Self {
            internal: self.internal.clone_internal(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.internal = source.internal.clone_internal();
    }
}

impl Finalize for Shape {
    fn finalize(&self) -> Result<FinalShape> {
        self.internal.finalize_variant()
    }
}

/// A [`Shape`] whose variant is known to be convex.
///
/// Only convex variants construct these, which is what makes
/// [`FinalizeConvex`] sound.
#[derive(Debug)]
pub struct ConvexShape {
    shape: Shape,
}

impl ConvexShape {
    pub(crate) fn from_internal<I: ShapeInternal>(internal: I) -> Self {
        Self {
            shape: Shape::from_internal(internal),
        }
    }

    /// Borrows this as a general [`Shape`].
    #[must_use]
    pub fn as_shape(&self) -> &Shape {
        &self.shape
    }

    pub(crate) fn as_shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }
}

impl Clone for ConvexShape {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.shape.clone_from(&source.shape);
    }
}

impl AsRef<Shape> for ConvexShape {
    fn as_ref(&self) -> &Shape {
        &self.shape
    }
}

impl From<ConvexShape> for Shape {
    fn from(convex: ConvexShape) -> Self {
        convex.shape
    }
}

impl Finalize for ConvexShape {
    fn finalize(&self) -> Result<FinalShape> {
        self.shape.finalize()
    }
}

impl FinalizeConvex for ConvexShape {
    fn finalize_convex(&self) -> Result<FinalConvexShape> {
        self.shape.finalize().map(FinalConvexShape::from_convex)
    }
}
