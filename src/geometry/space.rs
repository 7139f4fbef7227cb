use parry3d_f64::na::{Isometry3 as BackendIsometry, Vector3 as BackendVector};

use crate::math::Isometry2;

use super::FinalShape;

/// A finalized shape placed at a planar pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    shape: FinalShape,
    pose: Isometry2,
}

impl Space {
    /// Creates a new space.
    #[must_use]
    pub fn new(shape: impl Into<FinalShape>, pose: Isometry2) -> Self {
        Self {
            shape: shape.into(),
            pose,
        }
    }

    /// Returns the placed shape.
    #[must_use]
    pub fn shape(&self) -> &FinalShape {
        &self.shape
    }

    /// Returns the planar pose of the shape.
    #[must_use]
    pub fn pose(&self) -> &Isometry2 {
        &self.pose
    }

    /// Moves the shape to a new pose.
    pub fn set_pose(&mut self, pose: Isometry2) {
        self.pose = pose;
    }

    /// Lifts the planar pose into the backend's 3D frame: translation in the
    /// xy-plane, rotation about z.
    #[must_use]
    pub fn backend_pose(&self) -> BackendIsometry<f64> {
        let t = self.pose.translation.vector;
        BackendIsometry::new(
            BackendVector::new(t.x, t.y, 0.0),
            BackendVector::z() * self.pose.rotation.angle(),
        )
    }
}
