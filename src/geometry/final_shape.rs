use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

use parry3d_f64::shape::ShapeType;
use tracing::trace;

use crate::error::Result;

use super::internal::CollisionGeometries;
use super::Shape;

/// Compares the captured source against another artifact's source.
type EqualityComparator = Box<dyn Fn(&FinalShape) -> bool + Send + Sync>;

/// The originating variant value kept alive by a finalized artifact.
trait SourceShape: Any + fmt::Debug + Send + Sync {
    fn shape(&self) -> &Shape;
    fn as_any(&self) -> &dyn Any;
}

impl<T> SourceShape for T
where
    T: AsRef<Shape> + Any + fmt::Debug + Send + Sync,
{
    fn shape(&self) -> &Shape {
        self.as_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct FinalShapeData {
    source: Arc<dyn SourceShape>,
    geometries: CollisionGeometries,
    characteristic_length: f64,
    comparator: EqualityComparator,
}

/// An immutable shape bound to collision-backend geometries.
///
/// Cloning is cheap and shares the same backend handles. Two finalized
/// shapes are equal when their originating variants are the same type and
/// compare equal by their logical parameters; backend object identity is
/// never consulted.
#[derive(Clone)]
pub struct FinalShape {
    inner: Arc<FinalShapeData>,
}

impl FinalShape {
    /// Returns the backend geometries, in the order they were produced.
    #[must_use]
    pub fn collision_geometries(&self) -> &CollisionGeometries {
        &self.inner.geometries
    }

    /// Returns the characteristic length recorded at finalization.
    #[must_use]
    pub fn characteristic_length(&self) -> f64 {
        self.inner.characteristic_length
    }

    /// Returns the shape this artifact was finalized from.
    #[must_use]
    pub fn source(&self) -> &Shape {
        self.inner.source.shape()
    }

    /// Returns the originating variant if it is an `S`.
    #[must_use]
    pub fn source_as<S: Any>(&self) -> Option<&S> {
        self.inner.source.as_any().downcast_ref::<S>()
    }
}

impl PartialEq for FinalShape {
    fn eq(&self, other: &Self) -> bool {
        (self.inner.comparator)(other)
    }
}

impl fmt::Debug for FinalShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let geometries: Vec<ShapeType> = self
            .inner
            .geometries
            .iter()
            .map(|g| g.shape_type())
            .collect();
        f.debug_struct("FinalShape")
            .field("source", &self.inner.source)
            .field("geometries", &geometries)
            .field("characteristic_length", &self.inner.characteristic_length)
            .finish()
    }
}

/// A [`FinalShape`] produced from a variant known to be convex.
#[derive(Clone, Debug)]
pub struct FinalConvexShape {
    shape: FinalShape,
}

impl FinalConvexShape {
    /// Wraps an artifact finalized from a convex variant.
    pub(crate) fn from_convex(shape: FinalShape) -> Self {
        Self { shape }
    }

    /// Borrows this as a general [`FinalShape`].
    #[must_use]
    pub fn as_final_shape(&self) -> &FinalShape {
        &self.shape
    }

    /// Returns the backend geometries, in the order they were produced.
    #[must_use]
    pub fn collision_geometries(&self) -> &CollisionGeometries {
        self.shape.collision_geometries()
    }

    /// Returns the characteristic length recorded at finalization.
    #[must_use]
    pub fn characteristic_length(&self) -> f64 {
        self.shape.characteristic_length()
    }

    /// Returns the shape this artifact was finalized from.
    #[must_use]
    pub fn source(&self) -> &Shape {
        self.shape.source()
    }

    /// Returns the originating variant if it is an `S`.
    #[must_use]
    pub fn source_as<S: Any>(&self) -> Option<&S> {
        self.shape.source_as()
    }
}

impl AsRef<FinalShape> for FinalConvexShape {
    fn as_ref(&self) -> &FinalShape {
        &self.shape
    }
}

impl From<FinalConvexShape> for FinalShape {
    fn from(convex: FinalConvexShape) -> Self {
        convex.shape
    }
}

impl PartialEq for FinalConvexShape {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
    }
}

impl PartialEq<FinalShape> for FinalConvexShape {
    fn eq(&self, other: &FinalShape) -> bool {
        self.shape == *other
    }
}

impl PartialEq<FinalConvexShape> for FinalShape {
    fn eq(&self, other: &FinalConvexShape) -> bool {
        *self == other.shape
    }
}

/// Finalizes a variant: builds its backend geometries and captures its
/// equality so artifacts compare by logical parameters.
pub(crate) fn finalize_source<S>(source: &S) -> Result<FinalShape>
where
    S: AsRef<Shape> + Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    let internal = source.as_ref().internal();
    let geometries = internal.make_collision_geometries()?;
    let characteristic_length = internal.characteristic_length();

    trace!(
        variant = type_name::<S>(),
        geometries = geometries.len(),
        characteristic_length,
        "finalized shape"
    );

    let captured = Arc::new(source.clone());
    let source: Arc<dyn SourceShape> = captured.clone();
    let comparator: EqualityComparator = Box::new(move |other: &FinalShape| {
        other
            .source_as::<S>()
            .is_some_and(|other| *captured == *other)
    });

    Ok(FinalShape {
        inner: Arc::new(FinalShapeData {
            source,
            geometries,
            characteristic_length,
            comparator,
        }),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Circle, Finalize, FinalizeConvex, Rectangle};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn final_shapes_are_shareable() {
        assert_send_sync::<FinalShape>();
        assert_send_sync::<FinalConvexShape>();
    }

    #[test]
    fn equality_follows_logical_parameters() {
        let a = Circle::new(1.0).finalize().unwrap();
        let b = Circle::new(1.0).finalize().unwrap();
        let c = Circle::new(1.5).finalize().unwrap();
        assert_eq!(a, a.clone());
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_is_transitive() {
        let a = Rectangle::new(1.0, 2.0).finalize().unwrap();
        let b = Rectangle::new(1.0, 2.0).finalize().unwrap();
        let c = Rectangle::new(1.0, 2.0).finalize_convex().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a, c);
    }

    #[test]
    fn different_variants_never_compare_equal() {
        // Half-diagonal of this square equals the circle's radius.
        let side = std::f64::consts::SQRT_2;
        let square = Rectangle::new(side, side).finalize().unwrap();
        let circle = Circle::new(1.0).finalize().unwrap();
        assert!((square.characteristic_length() - circle.characteristic_length()).abs() < 1e-12);
        assert_ne!(square, circle);
        assert_ne!(circle, square);
    }

    #[test]
    fn clones_share_backend_handles() {
        let a = Circle::new(2.0).finalize().unwrap();
        let b = a.clone();
        assert!(Arc::ptr_eq(
            &a.collision_geometries()[0].0,
            &b.collision_geometries()[0].0
        ));
    }

    #[test]
    fn refinalizing_produces_independent_geometry() {
        let a = Circle::new(2.0).finalize().unwrap();
        let b = Circle::new(2.0).finalize().unwrap();
        assert!(!Arc::ptr_eq(
            &a.collision_geometries()[0].0,
            &b.collision_geometries()[0].0
        ));
        assert_eq!(a, b);
    }

    #[test]
    fn convex_artifact_converts_to_general() {
        let convex = Circle::new(3.0).finalize_convex().unwrap();
        let general: FinalShape = convex.clone().into();
        assert_eq!(general, convex);
        assert_eq!(convex.as_final_shape(), &general);
        assert!((general.characteristic_length() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn source_is_retained() {
        let finalized = Rectangle::new(4.0, 2.0).finalize().unwrap();
        let rect = finalized.source_as::<Rectangle>().unwrap();
        assert!((rect.width() - 4.0).abs() < 1e-12);
        assert!(finalized.source_as::<Circle>().is_none());
        assert!((finalized.source().characteristic_length() - 5.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn debug_lists_backend_shape_types() {
        let finalized = Circle::new(1.0).finalize().unwrap();
        let text = format!("{finalized:?}");
        assert!(text.contains("Ball"));
        assert!(text.contains("Circle"));
    }
}
