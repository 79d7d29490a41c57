//! Step trace: immutable snapshots of the construction in progress
//!
//! Every meaningful geometric transition (leaf hull built, bridge found,
//! candidate evaluated, face committed, checkpoint cleanup) is captured as a
//! [`HullState`] and appended to a [`StepRecorder`]. The recorder is a pure
//! data sink: nothing in the algorithm reads it back, and no snapshot is
//! ever modified after it is appended. A renderer replays the finished
//! sequence at its own pace.

use crate::hull::{Edge, Face};

/// One immutable snapshot of the construction
///
/// Fields are private and only reachable through accessors, so a snapshot
/// handed to a consumer cannot alias in-progress algorithm state.
#[derive(Debug, Clone, PartialEq)]
pub struct HullState {
    vertices: Vec<usize>,
    faces: Vec<Face>,
    edges: Vec<Edge>,
    caption: String,
}

impl HullState {
    /// Create a snapshot
    pub fn new(
        vertices: Vec<usize>,
        faces: Vec<Face>,
        edges: Vec<Edge>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            vertices,
            faces,
            edges,
            caption: caption.into(),
        }
    }

    /// Point ids visible in this snapshot
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Faces visible in this snapshot, with outward normals and centroids
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Auxiliary display edges (bridges, candidate triangles, wrap fronts)
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Human-readable description of the operation just performed
    pub fn caption(&self) -> &str {
        &self.caption
    }
}

/// Append-only sequence of [`HullState`] snapshots
///
/// Snapshots appear in the exact order the operations were performed, so
/// stepping through them replays the whole computation.
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<HullState>,
}

impl StepRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot
    pub fn record(&mut self, state: HullState) {
        self.steps.push(state);
    }

    /// All snapshots recorded so far, in order
    pub fn steps(&self) -> &[HullState] {
        &self.steps
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Has nothing been recorded yet?
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consume the recorder, yielding the finished sequence
    pub fn into_steps(self) -> Vec<HullState> {
        self.steps
    }
}

/// Running display state the snapshots are cut from
///
/// Holds the vertices and faces currently "on screen" while the algorithm
/// runs. Snapshots clone the scene; the scene itself is the only thing that
/// mutates, so no snapshot ever aliases in-progress state.
#[derive(Debug, Clone)]
pub(crate) struct Scene {
    vertices: Vec<usize>,
    faces: Vec<Face>,
}

impl Scene {
    pub(crate) fn new(vertices: Vec<usize>) -> Self {
        Self {
            vertices,
            faces: Vec::new(),
        }
    }

    pub(crate) fn push_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub(crate) fn extend_faces<I>(&mut self, faces: I)
    where
        I: IntoIterator<Item = Face>,
    {
        self.faces.extend(faces);
    }

    /// Swap out every face owned by one point group
    ///
    /// Groups are disjoint index ranges, so a face belongs to a group
    /// exactly when all three of its vertices fall inside the range. Used
    /// by checkpoint cleanup to replace a group's working faces with the
    /// validator's authoritative ones.
    pub(crate) fn replace_group_faces(
        &mut self,
        range: std::ops::Range<usize>,
        faces: &[Face],
    ) {
        self.faces
            .retain(|f| !(range.contains(&f.a) && range.contains(&f.b) && range.contains(&f.c)));
        self.faces.extend_from_slice(faces);
    }

    /// Cut an immutable snapshot of the current scene
    pub(crate) fn snapshot(&self, edges: Vec<Edge>, caption: impl Into<String>) -> HullState {
        HullState::new(self.vertices.clone(), self.faces.clone(), edges, caption)
    }
}
