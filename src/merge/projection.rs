//! Planar projection, 2D hulls, bridge tangents, and radial ordering
//!
//! Bridge discovery works in the projection that drops z: each side's group
//! is collapsed to (x, y), a 2D convex hull is built by monotone chain, and
//! the tangent rotation walks both hull rings until the connecting segment
//! is not crossed by any projected point. Radial ordering then gives each
//! side a cyclic structure with the bridge vertex at index 0.

use glam::{Vec2, Vec3};

use crate::geometry;

/// Projection used for bridge discovery: keep (x, y), drop z
#[inline]
fn project(p: Vec3) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// 2D convex hull of a group, by monotone chain over the projected points
///
/// Returns point ids forming the hull ring in clockwise order.
/// Duplicate projections (points stacked along z) collapse to a single ring
/// entry. A group whose projection is a segment yields a two-id ring.
pub(crate) fn planar_hull(ids: &[usize], points: &[Vec3], epsilon: f32) -> Vec<usize> {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable_by(|&i, &j| {
        points[i]
            .x
            .total_cmp(&points[j].x)
            .then(points[i].y.total_cmp(&points[j].y))
    });

    let n = sorted.len();
    let mut ring: Vec<usize> = Vec::new();

    // Forward sweep builds one chain, the reversed sweep continues it into
    // the other; the final entry duplicates the first and is dropped.
    for i in 0..2 * n {
        let j = if i < n { i } else { 2 * n - (i + 1) };
        let id = sorted[j];

        while ring.len() >= 2 {
            let a = project(points[ring[ring.len() - 2]]);
            let b = project(points[ring[ring.len() - 1]]);
            if geometry::chain_pops_middle(a, b, project(points[id]), epsilon) {
                ring.pop();
            } else {
                break;
            }
        }
        ring.push(id);
    }
    ring.pop();

    ring
}

/// Find the bridge edge between two projected hull rings
///
/// Seeds with the rightmost left vertex and the leftmost right vertex, then
/// rotates each endpoint along its ring while the tangency test finds the
/// opposite endpoint's neighbor on the wrong side of the segment. Returns
/// `(left_id, right_id)`, or `None` if the rotation fails to settle within
/// `cap` rounds (degenerate ring geometry).
pub(crate) fn find_bridge(
    left_ring: &[usize],
    right_ring: &[usize],
    points: &[Vec3],
    epsilon: f32,
    cap: usize,
) -> Option<(usize, usize)> {
    if left_ring.is_empty() || right_ring.is_empty() {
        return None;
    }

    let p2 = |id: usize| project(points[id]);

    let mut l = 0;
    for i in 0..left_ring.len() {
        if points[left_ring[i]].x > points[left_ring[l]].x {
            l = i;
        }
    }

    let mut r = 0;
    for i in 0..right_ring.len() {
        if points[right_ring[i]].x < points[right_ring[r]].x {
            r = i;
        }
    }

    let mut rounds = 0;
    loop {
        let mut change = false;

        let prev_l = (l + left_ring.len() - 1) % left_ring.len();
        if geometry::is_left(p2(right_ring[r]), p2(left_ring[prev_l]), p2(left_ring[l]), epsilon) {
            l = prev_l;
            change = true;
        }

        let next_r = (r + 1) % right_ring.len();
        if geometry::is_left(p2(right_ring[next_r]), p2(left_ring[l]), p2(right_ring[r]), epsilon) {
            r = next_r;
            change = true;
        }

        if !change {
            return Some((left_ring[l], right_ring[r]));
        }

        rounds += 1;
        if rounds > cap {
            return None;
        }
    }
}

/// Order a group's point ids radially, bridge vertex first
///
/// Points are sorted by angle around the group's (y, z) centroid, then the
/// cycle is rotated so the bridge id sits at index 0. The angular order is
/// what gives the wrap loop its `(0, 0)` termination anchor; the apex
/// searches scan the whole group and do not rely on adjacency.
pub(crate) fn radial_order(ids: &[usize], points: &[Vec3], bridge_id: usize) -> Vec<usize> {
    let center = geometry::centroid_of(ids.iter().map(|&id| points[id]));

    let angle = |id: usize| {
        let p = points[id];
        (p.z - center.z).atan2(p.y - center.y)
    };

    let mut ordered = ids.to_vec();
    ordered.sort_by(|&i, &j| angle(i).total_cmp(&angle(j)));

    if let Some(pos) = ordered.iter().position(|&id| id == bridge_id) {
        ordered.rotate_left(pos);
    }

    ordered
}
