use parry3d_f64::na::Point3 as BackendPoint;
use parry3d_f64::shape::SharedShape;
use tracing::debug;

use crate::error::{ParameterError, PolygonError, Result};
use crate::math::polygon_2d::{is_convex_2d, self_intersections_2d, signed_area_2d};
use crate::math::triangulate_2d::triangulate_simple_polygon;
use crate::math::Point2;

use super::final_shape::finalize_source;
use super::internal::{CollisionGeometries, ShapeInternal};
use super::{FinalShape, Finalize, Shape};

#[derive(Debug, Clone)]
struct PolygonInternal {
    points: Vec<Point2>,
}

impl PolygonInternal {
    /// The vertex loop without a trailing vertex that repeats the first.
    fn vertex_loop(&self) -> &[Point2] {
        match self.points.as_slice() {
            [first, .., last] if first == last => &self.points[..self.points.len() - 1],
            points => points,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(p) = self
            .points
            .iter()
            .find(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            let value = if p.x.is_finite() { p.y } else { p.x };
            debug!(value, "rejected non-finite polygon vertex");
            return Err(ParameterError::NotFinite {
                parameter: "polygon vertex",
                value,
            }
            .into());
        }

        let vertex_loop = self.vertex_loop();
        if vertex_loop.len() < 3 {
            return Err(PolygonError::TooFewVertices {
                count: vertex_loop.len(),
            }
            .into());
        }

        let crossings = self_intersections_2d(vertex_loop);
        if !crossings.is_empty() {
            debug!(edges = ?crossings, "rejected self-intersecting polygon");
            return Err(PolygonError::SelfIntersecting {
                count: crossings.len(),
            }
            .into());
        }

        Ok(())
    }
}

impl ShapeInternal for PolygonInternal {
    fn make_collision_geometries(&self) -> Result<CollisionGeometries> {
        self.validate()?;
        let lift = |p: Point2| BackendPoint::new(p.x, p.y, 0.0);
        Ok(triangulate_simple_polygon(self.vertex_loop())?
            .into_iter()
            .map(|[a, b, c]| SharedShape::triangle(lift(a), lift(b), lift(c)))
            .collect())
    }

    fn characteristic_length(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0, f64::max)
    }

    fn finalize_variant(&self) -> Result<FinalShape> {
        SimplePolygon::from_internal(self.clone()).finalize()
    }
}

/// A closed polygon whose edges must not cross each other.
///
/// The vertex loop is implicitly closed from the last point back to the
/// first, in either winding. A last point equal to the first is read as an
/// explicit closure and ignored by the geometric queries. It may be concave, so it only offers general
/// finalization. Vertices can be edited freely; validity is checked when the
/// polygon is finalized.
#[derive(Debug, Clone)]
pub struct SimplePolygon {
    shape: Shape,
}

impl SimplePolygon {
    /// Creates a polygon from its vertex loop.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self::from_internal(PolygonInternal { points })
    }

    fn from_internal(internal: PolygonInternal) -> Self {
        Self {
            shape: Shape::from_internal(internal),
        }
    }

    fn internal(&self) -> &PolygonInternal {
        self.shape.internal_as()
    }

    fn internal_mut(&mut self) -> &mut PolygonInternal {
        self.shape.internal_as_mut()
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.internal().points.len()
    }

    /// Returns whether the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.internal().points.is_empty()
    }

    /// Returns the vertex loop.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.internal().points
    }

    /// Returns the vertex at `index`, if any.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<&Point2> {
        self.internal().points.get(index)
    }

    /// Moves the vertex at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::IndexOutOfRange`] if there is no such vertex.
    pub fn update_point(&mut self, index: usize, point: Point2) -> Result<()> {
        let points = &mut self.internal_mut().points;
        let len = points.len();
        let slot = points
            .get_mut(index)
            .ok_or(PolygonError::IndexOutOfRange { index, len })?;
        *slot = point;
        Ok(())
    }

    /// Appends a vertex to the end of the loop.
    pub fn add_point(&mut self, point: Point2) {
        self.internal_mut().points.push(point);
    }

    /// Removes and returns the vertex at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::IndexOutOfRange`] if there is no such vertex.
    pub fn remove_point(&mut self, index: usize) -> Result<Point2> {
        let points = &mut self.internal_mut().points;
        if index >= points.len() {
            return Err(PolygonError::IndexOutOfRange {
                index,
                len: points.len(),
            }
            .into());
        }
        Ok(points.remove(index))
    }

    /// Returns the pairs of edges that intersect where they should not.
    ///
    /// Edge `i` runs from vertex `i` to vertex `i + 1`, wrapping around.
    #[must_use]
    pub fn self_intersections(&self) -> Vec<(usize, usize)> {
        self_intersections_2d(self.internal().vertex_loop())
    }

    /// Returns whether the vertex loop encloses a convex region.
    #[must_use]
    pub fn is_convex(&self) -> bool {
        is_convex_2d(self.internal().vertex_loop())
    }

    /// Returns the enclosed area, regardless of winding.
    ///
    /// Only meaningful when the loop has no self-intersections.
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(self.internal().vertex_loop()).abs()
    }
}

impl PartialEq for SimplePolygon {
    fn eq(&self, other: &Self) -> bool {
        self.points() == other.points()
    }
}

impl AsRef<Shape> for SimplePolygon {
    fn as_ref(&self) -> &Shape {
        &self.shape
    }
}

impl From<SimplePolygon> for Shape {
    fn from(polygon: SimplePolygon) -> Self {
        polygon.shape
    }
}

impl Finalize for SimplePolygon {
    fn finalize(&self) -> Result<FinalShape> {
        finalize_source(self)
    }
}
