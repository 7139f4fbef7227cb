use std::any::Any;
use std::fmt::Debug;

use parry3d_f64::shape::SharedShape;
use tracing::debug;

use crate::error::{ParameterError, Result};

use super::FinalShape;

/// A single collision-backend geometry handle.
pub type CollisionGeometry = SharedShape;

/// The ordered backend geometries that together represent one shape.
pub type CollisionGeometries = Vec<CollisionGeometry>;

/// Backend conversion implemented privately by every shape variant.
///
/// A [`Shape`](super::Shape) owns exactly one of these. Only the variant that
/// constructed an internal ever downcasts it.
pub(crate) trait ShapeInternal: InternalClone + Debug + Send + Sync {
    /// Builds the backend geometries for the current parameters.
    ///
    /// Pure with respect to `self`: repeated calls yield equal geometries.
    fn make_collision_geometries(&self) -> Result<CollisionGeometries>;

    /// A length scale for the shape, used by planners to size search margins.
    fn characteristic_length(&self) -> f64;

    /// Rebuilds the owning variant around a copy of this internal and
    /// finalizes it.
    fn finalize_variant(&self) -> Result<FinalShape>;
}

/// Deep-copy and downcast support, provided for every cloneable internal.
pub(crate) trait InternalClone: Any {
    fn clone_internal(&self) -> Box<dyn ShapeInternal>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T> InternalClone for T
where
    T: ShapeInternal + Clone,
{
    fn clone_internal(&self) -> Box<dyn ShapeInternal> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Checks that a length-like parameter is finite and non-negative.
pub(crate) fn check_extent(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        debug!(parameter, value, "rejected non-finite shape parameter");
        return Err(ParameterError::NotFinite { parameter, value }.into());
    }
    if value < 0.0 {
        debug!(parameter, value, "rejected negative shape parameter");
        return Err(ParameterError::OutOfRange {
            parameter,
            value,
            min: 0.0,
            max: f64::INFINITY,
        }
        .into());
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    #[test]
    fn zero_and_positive_extents_pass() {
        assert!(check_extent("radius", 0.0).is_ok());
        assert!(check_extent("radius", 4.5).is_ok());
    }

    #[test]
    fn negative_extent_is_out_of_range() {
        let err = check_extent("radius", -1.0).unwrap_err();
        assert!(matches!(
            err,
            ShapeError::Parameter(ParameterError::OutOfRange { parameter: "radius", .. })
        ));
    }

    #[test]
    fn non_finite_extents_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = check_extent("width", value).unwrap_err();
            assert!(matches!(
                err,
                ShapeError::Parameter(ParameterError::NotFinite { parameter: "width", .. })
            ));
        }
    }
}
