//! Divide-and-conquer 3D convex hull with step-by-step traces
//!
//! Computes the convex hull of a finite 3D point set using the classical
//! divide-and-conquer algorithm, and exposes the computation as an ordered
//! sequence of immutable geometric snapshots suitable for step-by-step
//! inspection by any renderer.
//!
//! # Quick Start
//!
//! ```rust
//! use glam::Vec3;
//! use hullsteps::*;
//!
//! // Deterministic random input
//! let points = sample_box_points(32, Vec3::splat(10.0), 42);
//!
//! let config = HullConfigBuilder::new()
//!     .leaf_size(4).unwrap()
//!     .build();
//!
//! let run = HullComputation::generate(points, config).unwrap();
//!
//! // The final hull and the full construction trace
//! println!("{} faces", run.hull().face_count());
//! for step in run.steps() {
//!     println!("{}", step.caption());
//! }
//! ```
//!
//! # Pipeline
//!
//! 1. Points are sorted along x (ties by y, then z) and split into small
//!    leaf groups.
//! 2. Each leaf group gets an exact brute-force hull.
//! 3. Adjacent hulls are merged bottom-up: a bridge edge is found between
//!    their planar projections, then an incremental convex wrap builds the
//!    seam faces around it.
//! 4. After every merge, an independent quickhull recomputation validates
//!    the result and discards interior vertices.
//!
//! Every transition is recorded as an immutable [`HullState`]; playback is
//! entirely the consumer's concern.

// Modules
pub mod error;
pub mod config;
pub mod geometry;
pub mod hull;
pub mod partition;
pub mod brute;
mod merge;
pub mod validate;
pub mod trace;
pub mod sample;
pub mod builder;

// Re-export core types for convenience
pub use builder::HullComputation;
pub use config::{HullConfig, HullConfigBuilder, MAX_LEAF_SIZE};
pub use error::{HullError, Result};
pub use hull::{Edge, EdgeKind, Face, Hull};
pub use merge::merge_hulls;
pub use partition::{MergeTree, MergeTreeNode};
pub use sample::sample_box_points;
pub use trace::{HullState, StepRecorder};

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
