//! Brute-force convex hull for leaf groups
//!
//! Enumerates every vertex triple in the group and keeps the triangles that
//! have the whole group on one closed side. Quartic in the group size, which
//! is fine for the leaf sizes the partitioner produces and nothing else.

use std::ops::Range;

use glam::Vec3;

use crate::geometry::{self, Side};
use crate::hull::{Face, Hull};

/// Exact convex hull of a small point group
///
/// `group` is an index range into the sorted arena. For every distinct
/// triple, the candidate plane is tested against the rest of the group: if
/// any other point lies strictly on each side the triple is interior and
/// rejected; otherwise the face is kept, oriented toward its empty side.
/// Triples are enumerated in canonical order, so no two accepted faces
/// share a vertex set.
///
/// For a coplanar group the "hull" degenerates to flat faces kept in both
/// orientations. That is acceptable here: leaf hulls only feed the merge
/// step, whose assembly discards whichever orientation ends up buried.
pub fn brute_hull(group: Range<usize>, points: &[Vec3], epsilon: f32) -> Hull {
    let ids: Vec<usize> = group.collect();
    let mut faces: Vec<Face> = Vec::new();

    for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            for k in (j + 1)..ids.len() {
                let (a, b, c) = (ids[i], ids[j], ids[k]);
                let normal = geometry::face_normal(points[a], points[b], points[c]);
                if normal.length_squared() <= epsilon * epsilon {
                    // Collinear triple, no plane
                    continue;
                }
                let centroid = (points[a] + points[b] + points[c]) / 3.0;

                let mut any_front = false;
                let mut any_back = false;
                for &other in &ids {
                    if other == a || other == b || other == c {
                        continue;
                    }
                    match geometry::orient_side(normal, centroid, points[other], epsilon) {
                        Side::Front => any_front = true,
                        Side::Back => any_back = true,
                        Side::OnPlane => {}
                    }
                }

                match (any_front, any_back) {
                    // Points on both sides: the triple cuts through the group
                    (true, true) => {}
                    // Group sits behind the constructed normal: already outward
                    (false, true) => faces.push(Face {
                        a,
                        b,
                        c,
                        normal,
                        centroid,
                    }),
                    // Group sits in front: outward is the flipped orientation
                    (true, false) => faces.push(Face {
                        a,
                        b: c,
                        c: b,
                        normal: -normal,
                        centroid,
                    }),
                    // Flat group: no outward side exists, so keep both
                    // orientations and let the merge assembly discard the
                    // one that ends up buried
                    (false, false) => {
                        faces.push(Face {
                            a,
                            b,
                            c,
                            normal,
                            centroid,
                        });
                        faces.push(Face {
                            a,
                            b: c,
                            c: b,
                            normal: -normal,
                            centroid,
                        });
                    }
                }
            }
        }
    }

    Hull::from_faces(faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_tetrahedron_hull() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let hull = brute_hull(0..4, &points, EPS);

        assert_eq!(hull.vertex_count(), 4);
        assert_eq!(hull.face_count(), 4);
        assert_eq!(hull.edge_count(), 6);
        assert_eq!(hull.euler_characteristic(), 2);
    }

    #[test]
    fn test_interior_point_excluded() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.4, 0.4, 0.4), // strictly inside
        ];
        let hull = brute_hull(0..5, &points, EPS);

        assert_eq!(hull.vertex_count(), 4);
        assert!(!hull.has_vertex(4));
        assert_eq!(hull.face_count(), 4);
    }

    #[test]
    fn test_faces_oriented_outward() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.1, 0.0),
            Vec3::new(0.2, 1.0, 0.1),
            Vec3::new(0.3, 0.2, 1.0),
            Vec3::new(1.1, 1.0, 1.2),
        ];
        let hull = brute_hull(0..5, &points, EPS);

        for face in &hull.faces {
            for &id in &hull.vertices {
                assert_ne!(
                    geometry::orient_side(face.normal, face.centroid, points[id], EPS),
                    Side::Front,
                    "point {} lies outside face ({}, {}, {})",
                    id,
                    face.a,
                    face.b,
                    face.c
                );
            }
        }
    }

    #[test]
    fn test_offset_fourth_point_is_vertex() {
        // Three base points plus one offset along the normal: non-coplanar,
        // so all four are hull vertices.
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(1.0, 0.7, 0.5),
        ];
        let hull = brute_hull(0..4, &points, EPS);
        assert_eq!(hull.vertex_count(), 4);
        assert!(hull.has_vertex(3));
    }

    #[test]
    fn test_coplanar_group_still_produces_faces() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let hull = brute_hull(0..4, &points, EPS);

        // Flat leaves keep their faces so the merge has geometry to draw;
        // the validator checkpoint discards them later.
        assert!(hull.face_count() > 0);
        assert_eq!(hull.vertex_count(), 4);
    }
}
