//! Hull validation and cleanup
//!
//! Recomputes an authoritative convex hull over an arbitrary point group
//! with an independent quickhull implementation (parry3d's), with no
//! reliance on any merge state. Used at tree-internal checkpoints to
//! discard interior vertices accumulated across pairwise merges, and as a
//! correctness check on the merger's output: disagreement is surfaced as
//! [`HullError::ValidationMismatch`], never silently overwritten.

use std::ops::Range;

use glam::Vec3;
use parry3d::math::Point;
use parry3d::transformation;

use crate::error::{HullError, Result};
use crate::geometry;
use crate::hull::{Face, Hull};
use crate::partition;

/// Recompute the exact convex hull of a point group
///
/// Runs quickhull over the group and maps the resulting vertices back to
/// arena ids, so the returned hull speaks the same id language as the rest
/// of the tree. Fails with `DegenerateInput` if the group cannot support a
/// 3D hull (quickhull output is not trustworthy on flat groups).
pub fn recompute(points: &[Vec3], group: Range<usize>, epsilon: f32) -> Result<Hull> {
    partition::ensure_non_degenerate(&points[group.clone()], epsilon)?;

    let parry_points: Vec<Point<f32>> = group
        .clone()
        .map(|i| Point::new(points[i].x, points[i].y, points[i].z))
        .collect();
    let (vertices, triangles) = transformation::convex_hull(&parry_points);

    let vertex_ids: Vec<usize> = vertices
        .iter()
        .map(|v| nearest_id(points, group.clone(), Vec3::new(v.x, v.y, v.z)))
        .collect();

    let interior = geometry::centroid_of(
        vertices
            .iter()
            .map(|v| Vec3::new(v.x, v.y, v.z)),
    );

    let faces: Vec<Face> = triangles
        .iter()
        .map(|t| {
            Face::oriented(
                [
                    vertex_ids[t[0] as usize],
                    vertex_ids[t[1] as usize],
                    vertex_ids[t[2] as usize],
                ],
                points,
                interior,
                epsilon,
            )
        })
        .collect();

    Ok(Hull::from_faces(faces))
}

/// Compare a merger-produced hull against the authoritative recomputation
///
/// The two hulls must agree on the vertex set, compared by position within
/// `epsilon` (coincident input points may carry different ids). Divergence
/// indicates a merge defect and is returned as `ValidationMismatch` with
/// both vertex sets attached.
pub fn check_agreement(
    points: &[Vec3],
    authoritative: &Hull,
    candidate: &Hull,
    epsilon: f32,
) -> Result<()> {
    let covered = |ids: &[usize], others: &[usize]| {
        ids.iter().all(|&id| {
            others
                .iter()
                .any(|&o| geometry::approx_eq(points[id], points[o], epsilon))
        })
    };

    if covered(&authoritative.vertices, &candidate.vertices)
        && covered(&candidate.vertices, &authoritative.vertices)
    {
        Ok(())
    } else {
        Err(HullError::ValidationMismatch {
            expected: authoritative.vertices.clone(),
            actual: candidate.vertices.clone(),
        })
    }
}

/// Convexity test: does every given point lie on or behind every face?
///
/// Distances are measured against unit normals so `epsilon` keeps its
/// meaning regardless of triangle size.
pub fn is_convex_over<I>(hull: &Hull, test_points: I, epsilon: f32) -> bool
where
    I: IntoIterator<Item = Vec3>,
{
    let planes: Vec<(Vec3, Vec3)> = hull
        .faces
        .iter()
        .map(|f| (f.normal.normalize_or_zero(), f.centroid))
        .collect();

    test_points
        .into_iter()
        .all(|p| planes.iter().all(|(n, c)| n.dot(p - *c) <= epsilon))
}

/// Arena id in `group` whose point is closest to `target`
fn nearest_id(points: &[Vec3], group: Range<usize>, target: Vec3) -> usize {
    let mut best = group.start;
    let mut best_dist = f32::MAX;
    for id in group {
        let d = points[id].distance_squared(target);
        if d < best_dist {
            best = id;
            best_dist = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn cube_points() -> Vec<Vec3> {
        let mut pts = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    pts.push(Vec3::new(x, y, z));
                }
            }
        }
        pts
    }

    #[test]
    fn test_recompute_cube() {
        let points = cube_points();
        let hull = recompute(&points, 0..8, EPS).unwrap();

        assert_eq!(hull.vertex_count(), 8);
        assert_eq!(hull.face_count(), 12);
        assert_eq!(hull.edge_count(), 18);
        assert_eq!(hull.euler_characteristic(), 2);
        assert!(is_convex_over(&hull, points.iter().copied(), 10.0 * EPS));
    }

    #[test]
    fn test_recompute_excludes_interior() {
        let mut points = cube_points();
        points.push(Vec3::new(0.5, 0.5, 0.5));
        let hull = recompute(&points, 0..9, EPS).unwrap();

        assert_eq!(hull.vertex_count(), 8);
        assert!(!hull.has_vertex(8));
    }

    #[test]
    fn test_recompute_rejects_flat_group() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        assert!(matches!(
            recompute(&points, 0..4, EPS),
            Err(HullError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_check_agreement_accepts_equal_sets() {
        let points = cube_points();
        let a = recompute(&points, 0..8, EPS).unwrap();
        let b = recompute(&points, 0..8, EPS).unwrap();
        assert!(check_agreement(&points, &a, &b, EPS).is_ok());
    }

    #[test]
    fn test_check_agreement_flags_missing_vertex() {
        let points = cube_points();
        let auth = recompute(&points, 0..8, EPS).unwrap();

        let mut broken = auth.clone();
        broken.vertices.pop();

        match check_agreement(&points, &auth, &broken, EPS) {
            Err(HullError::ValidationMismatch { expected, actual }) => {
                assert_eq!(expected.len(), 8);
                assert_eq!(actual.len(), 7);
            }
            other => panic!("expected ValidationMismatch, got {:?}", other),
        }
    }
}
