//! Hull merging: bridge discovery, convex wrap, and face assembly
//!
//! Combines two adjacent convex hulls into one. The two point groups must
//! be disjoint and separated along the partition axis: every left point
//! sorts strictly before every right point. Bridge discovery and the wrap
//! loop live in the submodules; this module drives them and assembles the
//! merged face list.

mod projection;
mod wrap;

use std::ops::Range;

use glam::Vec3;

use crate::config::HullConfig;
use crate::error::{HullError, Result};
use crate::geometry::{self, Side};
use crate::hull::{Edge, EdgeKind, Face, Hull};
use crate::trace::{Scene, StepRecorder};

const CAPTION_BRIDGE: &str = "For the next pair of hulls, project the hull vertices onto the \
     plane and create a 2D convex hull for each 3D hull. Find the anchor points of each 2D hull \
     and connect them to form a line to flip over.";

/// Merge two adjacent hulls, recording each wrap step
///
/// `left` and `right` are the index ranges of the two point groups in the
/// sorted arena; `level` is the tree level reported in convergence errors.
/// The recorder receives one snapshot for the bridge, then two per wrap
/// iteration (candidates evaluated, face committed).
pub fn merge_hulls(
    points: &[Vec3],
    left: Range<usize>,
    right: Range<usize>,
    left_hull: &Hull,
    right_hull: &Hull,
    level: usize,
    config: &HullConfig,
    recorder: &mut StepRecorder,
) -> Result<Hull> {
    let mut scene = Scene::new(left.clone().chain(right.clone()).collect());
    scene.extend_faces(left_hull.faces.iter().copied());
    scene.extend_faces(right_hull.faces.iter().copied());
    merge_into_scene(
        points, left, right, left_hull, right_hull, level, config, &mut scene, recorder,
    )
}

/// Merge implementation sharing the caller's running scene
#[allow(clippy::too_many_arguments)]
pub(crate) fn merge_into_scene(
    points: &[Vec3],
    left: Range<usize>,
    right: Range<usize>,
    left_hull: &Hull,
    right_hull: &Hull,
    level: usize,
    config: &HullConfig,
    scene: &mut Scene,
    recorder: &mut StepRecorder,
) -> Result<Hull> {
    debug_assert_eq!(left.end, right.start, "groups must be adjacent");

    let left_ids: Vec<usize> = left.clone().collect();
    let right_ids: Vec<usize> = right.clone().collect();
    let cap = config.wrap_cap(left_ids.len() + right_ids.len());
    let epsilon = config.epsilon;

    // Bridge discovery over the projected 2D hulls
    let left_ring2d = projection::planar_hull(&left_ids, points, epsilon);
    let right_ring2d = projection::planar_hull(&right_ids, points, epsilon);
    let (bridge_l, bridge_r) =
        projection::find_bridge(&left_ring2d, &right_ring2d, points, epsilon, cap).ok_or(
            HullError::MergeDidNotConverge { level, steps: cap },
        )?;

    recorder.record(scene.snapshot(
        vec![Edge::new(bridge_l, bridge_r, EdgeKind::Bridge)],
        CAPTION_BRIDGE,
    ));

    // Radial re-indexing: bridge vertex becomes index 0 on each side
    let left_ring = projection::radial_order(&left_ids, points, bridge_l);
    let right_ring = projection::radial_order(&right_ids, points, bridge_r);

    let wrap_faces = wrap::wrap_seam(
        points, &left_ring, &right_ring, level, cap, epsilon, scene, recorder,
    )?;

    Ok(assemble(
        points,
        left.start..right.end,
        left_hull,
        right_hull,
        wrap_faces,
        epsilon,
    ))
}

/// Assemble the merged hull from surviving child faces plus the wrap faces
///
/// A child face survives when no point of the combined group lies strictly
/// in front of it; faces buried by the wrap fail that test and drop out,
/// and with them every interior vertex.
fn assemble(
    points: &[Vec3],
    combined: Range<usize>,
    left_hull: &Hull,
    right_hull: &Hull,
    wrap_faces: Vec<Face>,
    epsilon: f32,
) -> Hull {
    let survives = |face: &Face| {
        combined.clone().all(|id| {
            geometry::orient_side(face.normal, face.centroid, points[id], epsilon) != Side::Front
        })
    };

    let mut faces = wrap_faces;
    faces.extend(
        left_hull
            .faces
            .iter()
            .chain(right_hull.faces.iter())
            .filter(|f| survives(f))
            .copied(),
    );

    // Drop duplicates by unordered vertex triple
    let mut seen: Vec<[usize; 3]> = Vec::with_capacity(faces.len());
    faces.retain(|f| {
        let key = f.key();
        if seen.contains(&key) {
            false
        } else {
            seen.push(key);
            true
        }
    });

    Hull::from_faces(faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brute;
    use crate::config::HullConfigBuilder;

    fn two_tetra_arena() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.5, 1.0, 0.2),
            Vec3::new(0.6, 0.4, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(5.0, 0.1, 0.0),
            Vec3::new(5.5, 1.0, 0.0),
            Vec3::new(5.6, 0.3, 1.1),
            Vec3::new(6.0, 0.0, 0.1),
        ]
    }

    #[test]
    fn test_merge_two_tetrahedra() {
        let points = two_tetra_arena();
        let config = HullConfigBuilder::new().build();

        let left_hull = brute::brute_hull(0..4, &points, config.epsilon);
        let right_hull = brute::brute_hull(4..8, &points, config.epsilon);

        let mut recorder = StepRecorder::new();
        let merged = merge_hulls(
            &points, 0..4, 4..8, &left_hull, &right_hull, 1, &config, &mut recorder,
        )
        .expect("merge must succeed");

        // All 8 points are extreme for this configuration
        assert_eq!(merged.vertex_count(), 8);
        assert_eq!(merged.euler_characteristic(), 2);

        // Merged hull is convex over the union
        for face in &merged.faces {
            let n = face.normal.normalize();
            for p in &points {
                assert!(n.dot(*p - face.centroid) <= 10.0 * config.epsilon);
            }
        }

        // Bridge snapshot first, then candidate/commit pairs
        assert!(recorder.len() >= 3);
        assert_eq!(recorder.steps()[0].edges().len(), 1);
        assert_eq!(recorder.steps()[0].edges()[0].kind, EdgeKind::Bridge);
    }

    #[test]
    fn test_merge_drops_buried_faces() {
        let points = two_tetra_arena();
        let config = HullConfigBuilder::new().build();

        let left_hull = brute::brute_hull(0..4, &points, config.epsilon);
        let right_hull = brute::brute_hull(4..8, &points, config.epsilon);
        let child_face_count = left_hull.face_count() + right_hull.face_count();

        let mut recorder = StepRecorder::new();
        let merged = merge_hulls(
            &points, 0..4, 4..8, &left_hull, &right_hull, 1, &config, &mut recorder,
        )
        .unwrap();

        // The faces each tetrahedron turned toward the other are buried by
        // the wrap, so the merged face list cannot keep every child face.
        let kept_child_faces = merged
            .faces
            .iter()
            .filter(|f| {
                let ids = [f.a, f.b, f.c];
                ids.iter().all(|&id| id < 4) || ids.iter().all(|&id| id >= 4)
            })
            .count();
        assert!(kept_child_faces < child_face_count);
    }
}
