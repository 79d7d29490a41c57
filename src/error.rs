//! Error types for convex hull computation

use std::fmt;

/// Errors that can occur during hull computation
#[derive(Debug, Clone, PartialEq)]
pub enum HullError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Input cannot support a 3D hull (too few points, or all points
    /// coincident/collinear/coplanar within tolerance)
    DegenerateInput(String),
    /// Input points cannot be placed in a strict total order
    /// (non-finite coordinates)
    InvalidOrdering(String),
    /// The wrap loop of a merge hit its iteration cap without closing
    MergeDidNotConverge {
        /// Tree level at which the merge was running (leaves are level 0)
        level: usize,
        /// Number of wrap iterations performed before giving up
        steps: usize,
    },
    /// The validator's recomputed hull disagrees with the merger's output
    ValidationMismatch {
        /// Vertex ids of the validator's authoritative hull
        expected: Vec<usize>,
        /// Vertex ids of the merger's hull
        actual: Vec<usize>,
    },
}

impl fmt::Display for HullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HullError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            HullError::DegenerateInput(msg) => write!(f, "degenerate input: {}", msg),
            HullError::InvalidOrdering(msg) => write!(f, "invalid ordering: {}", msg),
            HullError::MergeDidNotConverge { level, steps } => write!(
                f,
                "merge at tree level {} did not converge after {} wrap steps",
                level, steps
            ),
            HullError::ValidationMismatch { expected, actual } => write!(
                f,
                "validation mismatch: validator found {} hull vertices, merger produced {}",
                expected.len(),
                actual.len()
            ),
        }
    }
}

impl std::error::Error for HullError {}

/// Result type alias for hull operations
pub type Result<T> = std::result::Result<T, HullError>;
