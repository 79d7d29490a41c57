//! Top-level divide-and-conquer hull computation
//!
//! Drives the whole pipeline: sort and partition the input, brute-force the
//! leaf hulls, merge sibling hulls level by level with a validator
//! checkpoint after every merge, and record the step trace throughout.

use glam::Vec3;

use crate::brute;
use crate::config::HullConfig;
use crate::error::Result;
use crate::hull::Hull;
use crate::merge;
use crate::partition::{self, MergeTree};
use crate::trace::{HullState, Scene, StepRecorder};
use crate::validate;

const CAPTION_INTRO: &str = "Compute the convex hull of the point set by divide and conquer. \
     Step through the sequence to follow the construction.";
const CAPTION_LEAF: &str = "Sort the list of points by their x-positions. Separate the list of \
     points into smaller but approximately equal sized lists.\n\nBrute force create a convex \
     hull on each smaller list.";
const CAPTION_CLEANUP: &str = "Clean up all interior vertices and continue merging with the \
     next pair of hulls.";
const CAPTION_FINAL: &str = "Remove all interior vertices and the convex hull is complete.";

/// A finished divide-and-conquer hull computation
///
/// Owns the sorted point arena, the merge tree, the authoritative final
/// hull, and the full step trace. Everything is immutable once generated;
/// a renderer steps through [`HullComputation::steps`] and resolves point
/// ids against [`HullComputation::points`].
///
/// # Example
///
/// ```rust
/// use glam::Vec3;
/// use hullsteps::*;
///
/// let points = sample_box_points(24, Vec3::splat(10.0), 42);
/// let run = HullComputation::generate(points, HullConfig::default()).unwrap();
///
/// println!(
///     "{} hull vertices, {} trace steps",
///     run.hull().vertex_count(),
///     run.steps().len()
/// );
/// ```
#[derive(Debug)]
pub struct HullComputation {
    config: HullConfig,
    points: Vec<Vec3>,
    tree: MergeTree,
    hull: Hull,
    steps: Vec<HullState>,
}

impl HullComputation {
    /// Run the full computation over the given points
    ///
    /// The input order does not matter; points are sorted into the
    /// partition order first (the sorted arena is what all ids refer to).
    ///
    /// # Errors
    ///
    /// - [`InvalidOrdering`](crate::HullError::InvalidOrdering) for
    ///   non-finite coordinates
    /// - [`DegenerateInput`](crate::HullError::DegenerateInput) for fewer
    ///   than 4 points or an input without 4 affinely independent points
    /// - [`MergeDidNotConverge`](crate::HullError::MergeDidNotConverge) and
    ///   [`ValidationMismatch`](crate::HullError::ValidationMismatch) for
    ///   mid-algorithm failures on a subtree
    pub fn generate(points: Vec<Vec3>, config: HullConfig) -> Result<Self> {
        let mut points = points;
        partition::sort_points(&mut points)?;
        partition::ensure_non_degenerate(&points, config.epsilon)?;

        let mut tree = MergeTree::build(points.len(), config.leaf_size);
        let mut recorder = StepRecorder::new();
        let mut scene = Scene::new((0..points.len()).collect());

        recorder.record(scene.snapshot(Vec::new(), CAPTION_INTRO));

        // Leaf level: brute-force hull per group
        for idx in tree.levels()[0].clone() {
            let range = tree.node(idx).range.clone();
            let hull = brute::brute_hull(range, &points, config.epsilon);
            scene.extend_faces(hull.faces.iter().copied());
            recorder.record(scene.snapshot(Vec::new(), CAPTION_LEAF));
            tree.set_hull(idx, hull);
        }

        // Merge levels, bottom-up; carried nodes already have their hull
        let root = tree.root();
        for level in 1..tree.levels().len() {
            for idx in tree.levels()[level].clone() {
                if tree.node(idx).hull().is_some() {
                    continue;
                }
                let node = tree.node(idx);
                let range = node.range.clone();
                let (left_idx, right_idx) = node
                    .children
                    .expect("an unprocessed node above the leaves has children");

                let left_range = tree.node(left_idx).range.clone();
                let right_range = tree.node(right_idx).range.clone();
                let left_hull = tree
                    .node(left_idx)
                    .hull()
                    .expect("child hulls are computed before their parent")
                    .clone();
                let right_hull = tree
                    .node(right_idx)
                    .hull()
                    .expect("child hulls are computed before their parent")
                    .clone();

                let merged = merge::merge_into_scene(
                    &points,
                    left_range,
                    right_range,
                    &left_hull,
                    &right_hull,
                    level,
                    &config,
                    &mut scene,
                    &mut recorder,
                )?;

                // Checkpoint: the independent recomputation is authoritative
                let authoritative = validate::recompute(&points, range.clone(), config.epsilon)?;
                validate::check_agreement(&points, &authoritative, &merged, config.epsilon)?;

                scene.replace_group_faces(range, &authoritative.faces);
                let caption = if idx == root {
                    CAPTION_FINAL
                } else {
                    CAPTION_CLEANUP
                };
                recorder.record(scene.snapshot(Vec::new(), caption));

                tree.set_hull(idx, authoritative);
            }
        }

        // A single-leaf tree never merges; checkpoint the root directly
        let hull = if tree.node(root).is_leaf() {
            let range = tree.node(root).range.clone();
            let brute_hull = tree
                .node(root)
                .hull()
                .expect("leaf hulls are computed at level 0")
                .clone();
            let authoritative = validate::recompute(&points, range.clone(), config.epsilon)?;
            validate::check_agreement(&points, &authoritative, &brute_hull, config.epsilon)?;
            scene.replace_group_faces(range, &authoritative.faces);
            recorder.record(scene.snapshot(Vec::new(), CAPTION_FINAL));
            authoritative
        } else {
            tree.node(root)
                .hull()
                .expect("the root is checkpointed during the merge sweep")
                .clone()
        };

        Ok(Self {
            config,
            points,
            tree,
            hull,
            steps: recorder.into_steps(),
        })
    }

    /// Configuration used for this computation
    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// The sorted point arena all ids refer to
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position of a point id
    #[inline]
    pub fn position(&self, id: usize) -> Vec3 {
        self.points[id]
    }

    /// The authoritative final hull
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    /// The full step trace, in execution order
    pub fn steps(&self) -> &[HullState] {
        &self.steps
    }

    /// The partition tree the computation ran over
    pub fn tree(&self) -> &MergeTree {
        &self.tree
    }
}
