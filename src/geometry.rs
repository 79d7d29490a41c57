//! Geometry kernel: orientation predicates and primitives
//!
//! Every floating comparison in the crate goes through this module with an
//! explicit tolerance. The higher layers (partitioner, brute-force base
//! case, merger, validator) never compare coordinates directly.
//!
//! All functions are pure: they take values, return values, and touch no
//! shared state, so they are safe to call from any number of threads.

use glam::{Vec2, Vec3};

/// Which side of an oriented plane a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Strictly on the side the normal points toward
    Front,
    /// Within tolerance of the plane
    OnPlane,
    /// Strictly on the side the normal points away from
    Back,
}

/// Unnormalized normal of the triangle (a, b, c)
///
/// Computed as `cross(a − b, a − c)`. The direction depends on vertex order;
/// callers that need an outward normal orient it against an interior
/// reference point (see [`crate::hull::Face::oriented`]).
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (a - b).cross(a - c)
}

/// Classify `p` against the plane through `centroid` with normal `normal`
///
/// Dot products within `epsilon` of zero collapse to [`Side::OnPlane`].
#[inline]
pub fn orient_side(normal: Vec3, centroid: Vec3, p: Vec3, epsilon: f32) -> Side {
    let d = normal.dot(p - centroid);
    if d > epsilon {
        Side::Front
    } else if d < -epsilon {
        Side::Back
    } else {
        Side::OnPlane
    }
}

/// Componentwise equality within `epsilon`
#[inline]
pub fn approx_eq(p: Vec3, q: Vec3, epsilon: f32) -> bool {
    (p.x - q.x).abs() <= epsilon && (p.y - q.y).abs() <= epsilon && (p.z - q.z).abs() <= epsilon
}

/// Arithmetic mean of a point set
///
/// Returns `Vec3::ZERO` for an empty set.
pub fn centroid_of<I>(points: I) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let mut sum = Vec3::ZERO;
    let mut count = 0u32;
    for p in points {
        sum += p;
        count += 1;
    }
    if count == 0 {
        Vec3::ZERO
    } else {
        sum / count as f32
    }
}

/// Is `p` strictly to the left of the directed segment `o → t`?
///
/// 2D counter-clockwise test used by the bridge tangent search. Directions
/// are normalized before the perp-dot so the tolerance is scale-free.
#[inline]
pub fn is_left(p: Vec2, o: Vec2, t: Vec2, epsilon: f32) -> bool {
    let a = (t - o).normalize_or_zero();
    let b = (p - t).normalize_or_zero();
    a.perp_dot(b) > epsilon
}

/// Monotone-chain pop test: does `b` fail to make a strict left turn on the
/// chain `a → b → c`?
///
/// Returns true when `b` must be removed from the chain: the turn is
/// clockwise, or the three points are collinear with `c` not extending past
/// `b`.
#[inline]
pub fn chain_pops_middle(a: Vec2, b: Vec2, c: Vec2, epsilon: f32) -> bool {
    let cross = (a.x - b.x) * (c.y - b.y) - (a.y - b.y) * (c.x - b.x);
    let dot = (a.x - b.x) * (c.x - b.x) + (a.y - b.y) * (c.y - b.y);
    cross < -epsilon || (cross.abs() <= epsilon && dot <= epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_face_normal_direction() {
        let n = face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        // (a-b) x (a-c) = (-1,0,0) x (0,-1,0) = (0,0,1)
        assert!(n.z > 0.0);
        assert_eq!(n.x, 0.0);
        assert_eq!(n.y, 0.0);
    }

    #[test]
    fn test_orient_side() {
        let normal = Vec3::Z;
        let centroid = Vec3::ZERO;

        assert_eq!(
            orient_side(normal, centroid, Vec3::new(0.0, 0.0, 1.0), EPS),
            Side::Front
        );
        assert_eq!(
            orient_side(normal, centroid, Vec3::new(0.0, 0.0, -1.0), EPS),
            Side::Back
        );
        assert_eq!(
            orient_side(normal, centroid, Vec3::new(5.0, -3.0, 0.0), EPS),
            Side::OnPlane
        );
        // Within tolerance of the plane
        assert_eq!(
            orient_side(normal, centroid, Vec3::new(0.0, 0.0, EPS / 2.0), EPS),
            Side::OnPlane
        );
    }

    #[test]
    fn test_approx_eq() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx_eq(p, p, EPS));
        assert!(approx_eq(p, p + Vec3::splat(EPS / 2.0), EPS));
        assert!(!approx_eq(p, p + Vec3::new(0.0, 10.0 * EPS, 0.0), EPS));
    }

    #[test]
    fn test_centroid_of() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ];
        let c = centroid_of(points);
        assert!(approx_eq(c, Vec3::new(0.5, 0.5, 0.5), EPS));

        assert_eq!(centroid_of(std::iter::empty()), Vec3::ZERO);
    }

    #[test]
    fn test_is_left() {
        let o = Vec2::new(0.0, 0.0);
        let t = Vec2::new(1.0, 0.0);
        assert!(is_left(Vec2::new(2.0, 1.0), o, t, EPS));
        assert!(!is_left(Vec2::new(2.0, -1.0), o, t, EPS));
        // Collinear continuation is not strictly left
        assert!(!is_left(Vec2::new(2.0, 0.0), o, t, EPS));
    }

    #[test]
    fn test_chain_pops_middle() {
        let a = Vec2::new(0.0, 0.0);
        let c = Vec2::new(2.0, 0.0);
        // Right turn: pop
        assert!(chain_pops_middle(a, Vec2::new(1.0, -1.0), c, EPS));
        // Left turn: keep
        assert!(!chain_pops_middle(a, Vec2::new(1.0, 1.0), c, EPS));
        // Collinear middle that c extends past: pop
        assert!(chain_pops_middle(a, Vec2::new(1.0, 0.0), c, EPS));
    }
}
