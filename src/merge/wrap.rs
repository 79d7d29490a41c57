//! Incremental convex wrap: apex searches and the wrap loop
//!
//! Starting from the bridge edge, the wrap repeatedly finds each side's
//! extremal apex for the current edge, keeps the outermost of the two
//! candidate triangles, and advances the edge endpoint on the chosen side.
//! The seam closes when both endpoints return to the bridge pair.

use glam::Vec3;

use crate::error::{HullError, Result};
use crate::geometry::{self, Side};
use crate::hull::{Edge, EdgeKind, Face};
use crate::trace::{Scene, StepRecorder};

const CAPTION_CANDIDATES: &str = "Find the triangles adjacent to the current edge by rotating \
     around it. (You are essentially performing gift wrapping here.)";
const CAPTION_COMMITTED: &str = "Choose the outermost triangle to preserve convexity. Update \
     which edge is being flipped over to be the one you just made.";

/// Which side's candidate the wrap commits this iteration
enum Pick {
    /// Commit the left triangle, advance the left endpoint to this ring index
    Left(usize),
    /// Commit the right triangle, advance the right endpoint to this ring index
    Right(usize),
}

/// Extremal apex for the edge (r, l) within one side's group
///
/// Scans the whole ring (excluding the side's current edge endpoint) and
/// replaces the best candidate whenever another point lies strictly in
/// front of the raw-winding triangle (r, l, best). The fixed winding is
/// what makes the scan a monotone rotational search around the edge;
/// re-orienting the comparison plane per candidate would break that and
/// the wrap edge would cycle instead of closing. Returns the ring index of
/// the apex, or `None` if the ring has no candidate.
fn find_apex(
    ring: &[usize],
    points: &[Vec3],
    exclude_id: usize,
    r_id: usize,
    l_id: usize,
    epsilon: f32,
) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (idx, &id) in ring.iter().enumerate() {
        if id == exclude_id {
            continue;
        }
        match best {
            None => best = Some(idx),
            Some(b) => {
                let normal = geometry::face_normal(points[r_id], points[l_id], points[ring[b]]);
                let centroid = (points[r_id] + points[l_id] + points[ring[b]]) / 3.0;
                if geometry::orient_side(normal, centroid, points[id], epsilon) == Side::Front {
                    best = Some(idx);
                }
            }
        }
    }

    best
}

/// Run the wrap loop around the seam between two radially ordered groups
///
/// `left_ring` and `right_ring` must have their bridge vertex at index 0.
/// Every committed face is appended to the scene and returned; candidate
/// evaluations and commits are snapshotted into the recorder. Exceeding
/// `cap` iterations without returning to the bridge pair aborts the merge
/// with [`HullError::MergeDidNotConverge`].
pub(crate) fn wrap_seam(
    points: &[Vec3],
    left_ring: &[usize],
    right_ring: &[usize],
    level: usize,
    cap: usize,
    epsilon: f32,
    scene: &mut Scene,
    recorder: &mut StepRecorder,
) -> Result<Vec<Face>> {
    let left_center = geometry::centroid_of(left_ring.iter().map(|&id| points[id]));
    let right_center = geometry::centroid_of(right_ring.iter().map(|&id| points[id]));

    let mut l = 0;
    let mut r = 0;
    let mut committed = Vec::new();
    let mut steps = 0usize;

    loop {
        steps += 1;
        if steps > cap {
            return Err(HullError::MergeDidNotConverge {
                level,
                steps: steps - 1,
            });
        }

        let l_id = left_ring[l];
        let r_id = right_ring[r];

        let left_apex = find_apex(left_ring, points, l_id, r_id, l_id, epsilon);
        let right_apex = find_apex(right_ring, points, r_id, r_id, l_id, epsilon);

        let mut edges = vec![Edge::new(l_id, r_id, EdgeKind::Bridge)];
        if let Some(i) = left_apex {
            let apex = left_ring[i];
            edges.push(Edge::new(l_id, apex, EdgeKind::CandidateLeft));
            edges.push(Edge::new(apex, r_id, EdgeKind::CandidateLeft));
        }
        if let Some(i) = right_apex {
            let apex = right_ring[i];
            edges.push(Edge::new(l_id, apex, EdgeKind::CandidateRight));
            edges.push(Edge::new(apex, r_id, EdgeKind::CandidateRight));
        }
        recorder.record(scene.snapshot(edges, CAPTION_CANDIDATES));

        let pick = match (left_apex, right_apex) {
            (Some(li), Some(ri)) => {
                // Keep the right triangle exactly when the right apex pokes
                // through the left candidate's plane.
                let left_face =
                    Face::oriented([r_id, l_id, left_ring[li]], points, left_center, epsilon);
                let right_pt = points[right_ring[ri]];
                if geometry::orient_side(left_face.normal, left_face.centroid, right_pt, epsilon)
                    == Side::Front
                {
                    Pick::Right(ri)
                } else {
                    Pick::Left(li)
                }
            }
            (None, Some(ri)) => Pick::Right(ri),
            (Some(li), None) => Pick::Left(li),
            (None, None) => {
                return Err(HullError::DegenerateInput(
                    "merge group too small to wrap".to_string(),
                ))
            }
        };

        let face = match pick {
            Pick::Right(ri) => {
                r = ri;
                Face::oriented([r_id, l_id, right_ring[ri]], points, right_center, epsilon)
            }
            Pick::Left(li) => {
                l = li;
                Face::oriented([r_id, l_id, left_ring[li]], points, left_center, epsilon)
            }
        };

        committed.push(face);
        scene.push_face(face);

        let bridge = (left_ring[l], right_ring[r]);
        let mut edges = vec![Edge::new(bridge.0, bridge.1, EdgeKind::Bridge)];
        for (a, b) in [(face.a, face.b), (face.b, face.c), (face.c, face.a)] {
            if (a, b) != bridge && (b, a) != bridge {
                edges.push(Edge::new(a, b, EdgeKind::WrapFront));
            }
        }
        recorder.record(scene.snapshot(edges, CAPTION_COMMITTED));

        if l == 0 && r == 0 {
            return Ok(committed);
        }
    }
}
