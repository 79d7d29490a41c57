//! Hull data model: faces, auxiliary edges, and per-node hulls
//!
//! Points live in one shared arena (`&[Vec3]`); everything here refers to
//! them by index. Faces carry their derived normal and centroid so a
//! consumer can render a snapshot without recomputing plane data.

use glam::Vec3;

use crate::geometry::{self, Side};

/// A triangular hull face
///
/// Three point ids plus the derived outward normal and centroid. The normal
/// is fixed at construction relative to an interior reference point and is
/// never re-derived afterwards, so a face copied into a snapshot stays
/// consistent even if later steps choose a different reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// First vertex id
    pub a: usize,
    /// Second vertex id
    pub b: usize,
    /// Third vertex id
    pub c: usize,
    /// Outward (unnormalized) face normal
    pub normal: Vec3,
    /// Triangle centroid
    pub centroid: Vec3,
}

impl Face {
    /// Build a face oriented away from `interior`
    ///
    /// The raw normal `cross(a−b, a−c)` is flipped, along with the winding,
    /// whenever it points toward the interior reference. If the reference
    /// lies on the face plane the constructed orientation is kept.
    pub fn oriented(ids: [usize; 3], points: &[Vec3], interior: Vec3, epsilon: f32) -> Self {
        let [a, b, c] = ids;
        let (pa, pb, pc) = (points[a], points[b], points[c]);
        let centroid = (pa + pb + pc) / 3.0;
        let normal = geometry::face_normal(pa, pb, pc);

        match geometry::orient_side(normal, interior, centroid, epsilon) {
            Side::Back => Self {
                a,
                b: c,
                c: b,
                normal: -normal,
                centroid,
            },
            _ => Self {
                a,
                b,
                c,
                normal,
                centroid,
            },
        }
    }

    /// Vertex ids in canonical (sorted) order, for unordered comparison
    pub fn key(&self) -> [usize; 3] {
        let mut key = [self.a, self.b, self.c];
        key.sort_unstable();
        key
    }

    /// Does this face use the given vertex id?
    #[inline]
    pub fn touches(&self, id: usize) -> bool {
        self.a == id || self.b == id || self.c == id
    }

    /// The three undirected edges of this face, each as a sorted id pair
    pub fn edge_keys(&self) -> [(usize, usize); 3] {
        let sorted = |x: usize, y: usize| if x < y { (x, y) } else { (y, x) };
        [
            sorted(self.a, self.b),
            sorted(self.b, self.c),
            sorted(self.c, self.a),
        ]
    }
}

/// Display role of an auxiliary edge in a snapshot
///
/// The core never assigns colors, but it preserves which role each helper
/// line played so a renderer can reproduce the classic presentation
/// (bridge, wrap front, and the two candidate triangles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// The current bridge edge between the two sides of a merge
    Bridge,
    /// An edge of the left-side candidate triangle
    CandidateLeft,
    /// An edge of the right-side candidate triangle
    CandidateRight,
    /// An edge of a face just committed by the wrap
    WrapFront,
}

/// An auxiliary visualization edge
///
/// Ordered pair of point ids; direction is meaningful for display only.
/// Edges never influence hull correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Start vertex id
    pub a: usize,
    /// End vertex id
    pub b: usize,
    /// Display role
    pub kind: EdgeKind,
}

impl Edge {
    /// Create an auxiliary edge
    #[inline]
    pub fn new(a: usize, b: usize, kind: EdgeKind) -> Self {
        Self { a, b, kind }
    }
}

/// The convex hull of one tree node's point group
///
/// Vertex ids are kept sorted ascending so two hulls over the same group
/// compare structurally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hull {
    /// Ids of points on the hull boundary, ascending
    pub vertices: Vec<usize>,
    /// Triangulated faces with outward orientation
    pub faces: Vec<Face>,
}

impl Hull {
    /// Build a hull from a face list, deriving the vertex set from the faces
    pub fn from_faces(faces: Vec<Face>) -> Self {
        let mut vertices: Vec<usize> = faces
            .iter()
            .flat_map(|f| [f.a, f.b, f.c])
            .collect();
        vertices.sort_unstable();
        vertices.dedup();
        Self { vertices, faces }
    }

    /// Number of hull vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangulated faces
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of unique undirected edges across all faces
    pub fn edge_count(&self) -> usize {
        let mut edges: Vec<(usize, usize)> = self
            .faces
            .iter()
            .flat_map(|f| f.edge_keys())
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges.len()
    }

    /// Euler characteristic V − E + F
    ///
    /// Equals 2 for any closed triangulated hull.
    pub fn euler_characteristic(&self) -> isize {
        self.vertex_count() as isize - self.edge_count() as isize + self.face_count() as isize
    }

    /// Is the given point id a hull vertex?
    #[inline]
    pub fn has_vertex(&self, id: usize) -> bool {
        self.vertices.binary_search(&id).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPS: f32 = 1e-4;

    fn tetra_points() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_face_oriented_away_from_interior() {
        let points = tetra_points();
        let interior = geometry::centroid_of(points.iter().copied());

        for ids in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
            let face = Face::oriented(ids, &points, interior, EPS);
            // Interior point must be behind the outward normal
            assert_eq!(
                geometry::orient_side(face.normal, face.centroid, interior, EPS),
                crate::geometry::Side::Back
            );
        }
    }

    #[test]
    fn test_face_key_is_unordered() {
        let points = tetra_points();
        let interior = geometry::centroid_of(points.iter().copied());
        let f1 = Face::oriented([0, 1, 2], &points, interior, EPS);
        let f2 = Face::oriented([2, 0, 1], &points, interior, EPS);
        assert_eq!(f1.key(), f2.key());
    }

    #[test]
    fn test_hull_counts_and_euler() {
        let points = tetra_points();
        let interior = geometry::centroid_of(points.iter().copied());
        let faces = vec![
            Face::oriented([0, 1, 2], &points, interior, EPS),
            Face::oriented([0, 1, 3], &points, interior, EPS),
            Face::oriented([0, 2, 3], &points, interior, EPS),
            Face::oriented([1, 2, 3], &points, interior, EPS),
        ];
        let hull = Hull::from_faces(faces);

        assert_eq!(hull.vertex_count(), 4);
        assert_eq!(hull.face_count(), 4);
        assert_eq!(hull.edge_count(), 6);
        assert_eq!(hull.euler_characteristic(), 2);
        assert!(hull.has_vertex(3));
        assert!(!hull.has_vertex(7));
    }
}
