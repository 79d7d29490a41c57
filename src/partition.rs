//! Partitioner: point ordering, leaf splitting, and the merge tree
//!
//! The input arena is sorted into a strict total order (x, then y, then z),
//! split into contiguous leaf groups, and organized into a binary merge tree
//! built bottom-up by pairing adjacent groups. The tree is a flat arena of
//! nodes holding index ranges into the one sorted point array; point data is
//! never copied into per-node lists.

use std::ops::Range;

use glam::Vec3;

use crate::config::MAX_LEAF_SIZE;
use crate::error::{HullError, Result};
use crate::geometry;
use crate::hull::Hull;

/// Sort the point arena into the partition order
///
/// The order is strict and total: by x, ties broken by y, then z, using
/// `f32::total_cmp`. Non-finite coordinates are rejected first — `total_cmp`
/// would happily place NaNs at one end and mask bad input, so they surface
/// as [`HullError::InvalidOrdering`] instead.
pub fn sort_points(points: &mut [Vec3]) -> Result<()> {
    for (i, p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(HullError::InvalidOrdering(format!(
                "point {} has a non-finite coordinate: ({}, {}, {})",
                i, p.x, p.y, p.z
            )));
        }
    }

    points.sort_unstable_by(|p, q| {
        p.x.total_cmp(&q.x)
            .then(p.y.total_cmp(&q.y))
            .then(p.z.total_cmp(&q.z))
    });

    Ok(())
}

/// Reject inputs that cannot support a 3D hull
///
/// Requires at least 4 points and at least one affinely independent
/// quadruple: a second point distinct from the first, a third off their
/// line, and a fourth off their plane, all within `epsilon`.
pub fn ensure_non_degenerate(points: &[Vec3], epsilon: f32) -> Result<()> {
    if points.len() < 4 {
        return Err(HullError::DegenerateInput(format!(
            "need at least 4 points (got {})",
            points.len()
        )));
    }

    let p0 = points[0];

    let p1 = points
        .iter()
        .copied()
        .find(|&p| !geometry::approx_eq(p, p0, epsilon))
        .ok_or_else(|| {
            HullError::DegenerateInput("all points coincident within tolerance".to_string())
        })?;

    let p2 = points
        .iter()
        .copied()
        .find(|&p| (p1 - p0).cross(p - p0).length() > epsilon)
        .ok_or_else(|| {
            HullError::DegenerateInput("all points collinear within tolerance".to_string())
        })?;

    let plane_normal = geometry::face_normal(p0, p1, p2);
    points
        .iter()
        .copied()
        .find(|&p| geometry::orient_side(plane_normal, p0, p, epsilon) != geometry::Side::OnPlane)
        .ok_or_else(|| {
            HullError::DegenerateInput("all points coplanar within tolerance".to_string())
        })?;

    Ok(())
}

/// One node of the merge tree
///
/// Owns a contiguous range of the sorted arena. Leaves are created by the
/// partitioner; internal nodes cover exactly their two children's ranges.
/// The hull is written once (by the brute-force base case for leaves, by
/// the merge checkpoint for internal nodes) and never replaced.
#[derive(Debug, Clone)]
pub struct MergeTreeNode {
    /// Index range into the sorted point arena
    pub range: Range<usize>,
    /// Child node indices for internal nodes, `None` for leaves
    pub children: Option<(usize, usize)>,
    hull: Option<Hull>,
}

impl MergeTreeNode {
    /// Is this a leaf group?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The hull computed for this node, if already processed
    pub fn hull(&self) -> Option<&Hull> {
        self.hull.as_ref()
    }
}

/// The full partition tree, leaves first
///
/// Nodes live in one flat arena; `levels` lists node indices per tree level
/// (level 0 = leaves). An unmatched trailing group at any level is carried
/// forward unpaired: the same node index simply appears in the next level.
#[derive(Debug)]
pub struct MergeTree {
    nodes: Vec<MergeTreeNode>,
    levels: Vec<Vec<usize>>,
}

impl MergeTree {
    /// Build the tree for `point_count` sorted points with the given leaf size
    ///
    /// Leaves are contiguous runs of `leaf_size` points; a trailing
    /// remainder too small to stand on its own (fewer than 4 points) is
    /// absorbed into the preceding leaf so every group can support the
    /// base case and the merge apex searches. Absorption never pushes a
    /// leaf past [`MAX_LEAF_SIZE`]; when it would, the final run is split
    /// evenly into two leaves instead.
    pub fn build(point_count: usize, leaf_size: usize) -> Self {
        debug_assert!(point_count >= 4);
        debug_assert!(leaf_size >= 4);

        let mut nodes = Vec::new();
        let mut level = Vec::new();

        let mut start = 0;
        while start < point_count {
            let mut end = (start + leaf_size).min(point_count);
            if end < point_count && point_count - end < 4 {
                let run = point_count - start;
                end = if run <= MAX_LEAF_SIZE {
                    point_count
                } else {
                    start + run / 2 + run % 2
                };
            }
            nodes.push(MergeTreeNode {
                range: start..end,
                children: None,
                hull: None,
            });
            level.push(nodes.len() - 1);
            start = end;
        }

        let mut levels = vec![level];
        while levels.last().map(Vec::len) > Some(1) {
            let prev = levels.last().cloned().unwrap_or_default();
            let mut next = Vec::new();
            for pair in prev.chunks(2) {
                match *pair {
                    [left, right] => {
                        let range = nodes[left].range.start..nodes[right].range.end;
                        nodes.push(MergeTreeNode {
                            range,
                            children: Some((left, right)),
                            hull: None,
                        });
                        next.push(nodes.len() - 1);
                    }
                    // Odd group out: carried forward unpaired
                    [single] => next.push(single),
                    _ => unreachable!(),
                }
            }
            levels.push(next);
        }

        Self { nodes, levels }
    }

    /// All nodes, leaves first
    pub fn nodes(&self) -> &[MergeTreeNode] {
        &self.nodes
    }

    /// Node indices grouped by level; level 0 holds the leaves
    pub fn levels(&self) -> &[Vec<usize>] {
        &self.levels
    }

    /// Node by arena index
    pub fn node(&self, index: usize) -> &MergeTreeNode {
        &self.nodes[index]
    }

    /// Index of the root node
    pub fn root(&self) -> usize {
        self.levels
            .last()
            .and_then(|level| level.first().copied())
            .unwrap_or(0)
    }

    /// Store a node's hull
    ///
    /// Each node's hull is written exactly once; the tree never edits an
    /// existing hull in place because earlier snapshots may refer to it.
    pub fn set_hull(&mut self, index: usize, hull: Hull) {
        debug_assert!(
            self.nodes[index].hull.is_none(),
            "node hull must only be written once"
        );
        self.nodes[index].hull = Some(hull);
    }
}
