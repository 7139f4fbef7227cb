use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};

use crate::error::{PolygonError, Result};

use super::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates the interior of a simple polygon.
///
/// The loop must be free of self-intersections; callers check this first.
/// Triangles are returned in the order the triangulation stores its faces,
/// each wound as the triangulation reports it.
///
/// # Errors
///
/// Returns [`PolygonError::Triangulation`] if a vertex cannot be inserted
/// (non-finite or out of the representable range) or a boundary edge
/// conflicts with an existing one.
pub fn triangulate_simple_polygon(points: &[Point2]) -> Result<Vec<[Point2; 3]>> {
    if points.len() < 3 {
        return Err(PolygonError::TooFewVertices {
            count: points.len(),
        }
        .into());
    }

    let loop_2d: Vec<_> = points.iter().map(|p| SpadePoint2::new(p.x, p.y)).collect();

    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, &loop_2d)?;

    let interior = classify_interior_faces(&cdt);

    let mut triangles = Vec::with_capacity(interior.len());
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let [a, b, c] = face.vertices().map(|v| {
            let pos = v.position();
            Point2::new(pos.x, pos.y)
        });
        triangles.push([a, b, c]);
    }

    Ok(triangles)
}

/// Inserts the loop's vertices and constrains each boundary edge, including
/// the closing one.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| PolygonError::Triangulation(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if !cdt.can_add_constraint(from, to) {
            return Err(PolygonError::Triangulation(format!(
                "boundary edge {i} crosses an earlier boundary edge"
            ))
            .into());
        }
        cdt.add_constraint(from, to);
    }

    Ok(())
}

/// Flood-fills from the outer face, counting boundary crossings. Faces at odd
/// depth are inside the polygon.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_map: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer_fix = cdt.outer_face().fix();

    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer_fix {
            continue;
        }
        let Some(inner) = edge.rev().face().as_inner() else {
            continue;
        };
        let idx = inner.fix().index();
        if depth_map.contains_key(&idx) {
            continue;
        }
        let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        depth_map.insert(idx, depth);
        if depth % 2 == 1 {
            interior.insert(idx);
        }
        queue.push_back((inner.fix(), depth));
    }

    while let Some((face_fix, depth)) = queue.pop_front() {
        let face = cdt.face(face_fix);
        for edge in face.adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let n_idx = neighbor.fix().index();
            if depth_map.contains_key(&n_idx) {
                continue;
            }
            let new_depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_map.insert(n_idx, new_depth);
            if new_depth % 2 == 1 {
                interior.insert(n_idx);
            }
            queue.push_back((neighbor.fix(), new_depth));
        }
    }

    interior
}
