//! Seeded random point generation
//!
//! Produces deterministic test inputs: uniform points inside a centered
//! axis-aligned box. Same seed, same sequence, every run.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `count` uniform random points in a centered box
///
/// Points are drawn componentwise from `[0, extent)` and shifted by
/// `-extent / 2`, so the box is centered on the origin. `extent` must be
/// positive in every component.
///
/// # Example
///
/// ```rust
/// use glam::Vec3;
/// use hullsteps::sample_box_points;
///
/// let points = sample_box_points(32, Vec3::splat(10.0), 42);
/// assert_eq!(points.len(), 32);
/// ```
pub fn sample_box_points(count: usize, extent: Vec3, seed: u32) -> Vec<Vec3> {
    debug_assert!(extent.x > 0.0 && extent.y > 0.0 && extent.z > 0.0);

    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(0.0..extent.x),
                rng.gen_range(0.0..extent.y),
                rng.gen_range(0.0..extent.z),
            ) - extent / 2.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count() {
        assert_eq!(sample_box_points(0, Vec3::splat(10.0), 1).len(), 0);
        assert_eq!(sample_box_points(17, Vec3::splat(10.0), 1).len(), 17);
    }

    #[test]
    fn test_points_inside_box() {
        let extent = Vec3::new(4.0, 6.0, 8.0);
        for p in sample_box_points(200, extent, 7) {
            assert!(p.x >= -2.0 && p.x < 2.0);
            assert!(p.y >= -3.0 && p.y < 3.0);
            assert!(p.z >= -4.0 && p.z < 4.0);
        }
    }

    #[test]
    fn test_determinism() {
        let a = sample_box_points(50, Vec3::splat(10.0), 42);
        let b = sample_box_points(50, Vec3::splat(10.0), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_differ() {
        let a = sample_box_points(50, Vec3::splat(10.0), 1);
        let b = sample_box_points(50, Vec3::splat(10.0), 2);
        assert_ne!(a, b);
    }
}
