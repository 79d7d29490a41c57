//! Hull computation configuration and builder
//!
//! This module provides configuration types for deterministic divide-and-conquer
//! hull computation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HullError, Result};

/// Largest leaf group the brute-force base case will accept
///
/// The base case enumerates every triple and re-checks every other point,
/// which is O(n⁴); leaf groups above this size make that cost noticeable.
pub const MAX_LEAF_SIZE: usize = 16;

/// Configuration for a divide-and-conquer hull computation
///
/// The same configuration over the same input point sequence always produces
/// the identical hull and the identical step trace.
///
/// # Example
///
/// ```rust
/// use hullsteps::*;
///
/// let config = HullConfigBuilder::new()
///     .epsilon(1e-4).unwrap()
///     .leaf_size(4).unwrap()
///     .build();
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Tolerance for all floating comparisons
    ///
    /// A point within `epsilon` of a face plane counts as on the plane, and
    /// two coordinates within `epsilon` of each other count as equal. Every
    /// comparison in the crate goes through the geometry kernel with this
    /// value; there are no ad hoc tolerances elsewhere.
    pub epsilon: f32,

    /// Maximum size of a leaf group handed to the brute-force base case
    ///
    /// The sorted input is split into contiguous runs of at most this many
    /// points. Must be at least 4 (a 3D hull needs 4 vertices) and at most
    /// [`MAX_LEAF_SIZE`].
    pub leaf_size: usize,

    /// Hard cap on wrap iterations for a single merge
    ///
    /// `None` derives the cap from the merge size (4 × the combined group
    /// size), which any non-degenerate wrap closes well inside. Hitting the
    /// cap is reported as [`HullError::MergeDidNotConverge`].
    pub max_wrap_steps: Option<usize>,
}

impl HullConfig {
    /// Wrap iteration cap for a merge over `group_len` points
    #[inline]
    pub fn wrap_cap(&self, group_len: usize) -> usize {
        self.max_wrap_steps.unwrap_or(4 * group_len.max(1))
    }
}

impl Default for HullConfig {
    fn default() -> Self {
        HullConfigBuilder::new().build()
    }
}

/// Builder for creating a [`HullConfig`] with validation
///
/// Setters that can reject a value return `Result<Self>` so invalid
/// configurations surface at construction, not mid-algorithm.
///
/// # Example
///
/// ```rust
/// use hullsteps::*;
///
/// // Defaults
/// let config = HullConfigBuilder::new().build();
///
/// // Customized
/// let config = HullConfigBuilder::new()
///     .leaf_size(6).unwrap()
///     .max_wrap_steps(128).unwrap()
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct HullConfigBuilder {
    epsilon: f32,
    leaf_size: usize,
    max_wrap_steps: Option<usize>,
}

impl HullConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - epsilon: 1e-4
    /// - leaf_size: 4 (matches the classical presentation of the algorithm)
    /// - max_wrap_steps: derived from merge size
    pub fn new() -> Self {
        Self {
            epsilon: 1e-4,
            leaf_size: 4,
            max_wrap_steps: None,
        }
    }

    /// Set the floating-comparison tolerance
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the value is not finite or not positive.
    pub fn epsilon(mut self, epsilon: f32) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(HullError::InvalidConfig(format!(
                "epsilon must be a positive finite value (got {})",
                epsilon
            )));
        }
        self.epsilon = epsilon;
        Ok(self)
    }

    /// Set the maximum leaf group size
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is below 4 or above
    /// [`MAX_LEAF_SIZE`].
    pub fn leaf_size(mut self, leaf_size: usize) -> Result<Self> {
        if !(4..=MAX_LEAF_SIZE).contains(&leaf_size) {
            return Err(HullError::InvalidConfig(format!(
                "leaf size must be between 4 and {} (got {})",
                MAX_LEAF_SIZE, leaf_size
            )));
        }
        self.leaf_size = leaf_size;
        Ok(self)
    }

    /// Set an explicit wrap iteration cap
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the cap is zero.
    pub fn max_wrap_steps(mut self, cap: usize) -> Result<Self> {
        if cap == 0 {
            return Err(HullError::InvalidConfig(
                "wrap step cap must be at least 1".to_string(),
            ));
        }
        self.max_wrap_steps = Some(cap);
        Ok(self)
    }

    /// Build the validated configuration
    pub fn build(self) -> HullConfig {
        HullConfig {
            epsilon: self.epsilon,
            leaf_size: self.leaf_size,
            max_wrap_steps: self.max_wrap_steps,
        }
    }
}

impl Default for HullConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HullConfig::default();
        assert_eq!(config.leaf_size, 4);
        assert!(config.epsilon > 0.0);
        assert_eq!(config.max_wrap_steps, None);
    }

    #[test]
    fn test_leaf_size_bounds() {
        assert!(HullConfigBuilder::new().leaf_size(3).is_err());
        assert!(HullConfigBuilder::new().leaf_size(MAX_LEAF_SIZE + 1).is_err());
        assert!(HullConfigBuilder::new().leaf_size(4).is_ok());
        assert!(HullConfigBuilder::new().leaf_size(MAX_LEAF_SIZE).is_ok());
    }

    #[test]
    fn test_epsilon_validation() {
        assert!(HullConfigBuilder::new().epsilon(0.0).is_err());
        assert!(HullConfigBuilder::new().epsilon(-1e-4).is_err());
        assert!(HullConfigBuilder::new().epsilon(f32::NAN).is_err());
        assert!(HullConfigBuilder::new().epsilon(1e-5).is_ok());
    }

    #[test]
    fn test_wrap_cap() {
        let config = HullConfig::default();
        assert_eq!(config.wrap_cap(10), 40);

        let config = HullConfigBuilder::new().max_wrap_steps(7).unwrap().build();
        assert_eq!(config.wrap_cap(10), 7);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_roundtrip() {
        let config = HullConfigBuilder::new().leaf_size(6).unwrap().build();
        let json = serde_json::to_string(&config).unwrap();
        let restored: HullConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
