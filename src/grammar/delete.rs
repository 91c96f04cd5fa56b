//! Strip deletion.
//!
//! [`delete_strips`] collapses strips by merging the endpoint pairs of
//! every transverse edge: the strip faces disappear and the two boundary
//! polyedges on either side of each strip fuse into one. Merged vertex
//! groups survive as a single new vertex at their centroid, and the
//! many-to-one old→new mapping is returned.
//!
//! Deletion runs to completion even when the result breaks mesh invariants
//! (it does not roll back); exploratory callers apply it to a disposable
//! clone and check manifoldness, Euler characteristic and boundary-loop
//! count afterwards. [`strips_to_split_to_preserve_boundaries`] identifies,
//! ahead of time, strips whose deletion would merge or collapse boundary
//! loops; splitting them first makes their deletion safe.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::mesh::{FaceId, QuadMesh, StripId, VertexId};
use crate::strip::StripPartition;

/// The vertex relabeling produced by a strip deletion.
#[derive(Debug, Clone, Default)]
pub struct VertexMerge {
    map: BTreeMap<VertexId, VertexId>,
}

impl VertexMerge {
    /// Map an old vertex to its surviving vertex.
    ///
    /// Vertices untouched by the deletion map to themselves.
    pub fn resolve(&self, v: VertexId) -> VertexId {
        self.map.get(&v).copied().unwrap_or(v)
    }

    /// Iterate over the (removed old vertex, surviving new vertex) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.map.iter().map(|(&old, &new)| (old, new))
    }

    /// The number of removed vertices.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the deletion removed no vertices.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Minimal union-find over vertex ids.
struct DisjointSet {
    parent: BTreeMap<VertexId, VertexId>,
}

impl DisjointSet {
    fn new() -> Self {
        Self {
            parent: BTreeMap::new(),
        }
    }

    fn find(&mut self, v: VertexId) -> VertexId {
        let p = *self.parent.entry(v).or_insert(v);
        if p == v {
            return v;
        }
        let root = self.find(p);
        self.parent.insert(v, root);
        root
    }

    fn union(&mut self, a: VertexId, b: VertexId) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Deterministic: smaller id becomes the root
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent.insert(hi, lo);
        }
    }

    fn components(&mut self) -> BTreeMap<VertexId, Vec<VertexId>> {
        let members: Vec<VertexId> = self.parent.keys().copied().collect();
        let mut out: BTreeMap<VertexId, Vec<VertexId>> = BTreeMap::new();
        for v in members {
            let root = self.find(v);
            out.entry(root).or_default().push(v);
        }
        out
    }
}

/// Delete a single strip. See [`delete_strips`].
pub fn delete_strip(
    mesh: &mut QuadMesh,
    partition: &StripPartition,
    strip: StripId,
) -> Result<VertexMerge> {
    let mut set = BTreeSet::new();
    set.insert(strip);
    delete_strips(mesh, partition, &set)
}

/// Delete a set of strips in one pass.
///
/// Strip ids are invalidated by the first deletion, so removing several
/// strips of one partition is done atomically: the transverse edges of all
/// listed strips are merged together, their faces deleted, and every merged
/// vertex group replaced by one new vertex at the group centroid. Remaining
/// faces have the survivors substituted in; faces that degenerate below
/// three distinct consecutive vertices are dropped.
///
/// Deleting every strip crossing some region may leave zero faces; that is
/// reported by the resulting face count, not an error. The operation never
/// rolls back — validate the result on a clone when exploring.
pub fn delete_strips(
    mesh: &mut QuadMesh,
    partition: &StripPartition,
    strips: &BTreeSet<StripId>,
) -> Result<VertexMerge> {
    // Gather edges and faces up front; unknown ids fail before mutation.
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
    let mut faces: BTreeSet<FaceId> = BTreeSet::new();
    for &s in strips {
        let strip = partition.strip(s)?;
        edges.extend_from_slice(strip.edges());
        faces.extend(strip.faces(mesh));
    }

    let mut set = DisjointSet::new();
    for &(u, v) in &edges {
        set.union(u, v);
    }

    // One surviving vertex per merged component, at its centroid.
    let mut map = BTreeMap::new();
    for (_, members) in set.components() {
        let sum: Vector3<f64> = members.iter().map(|&v| mesh.position(v).coords).sum();
        let centroid = Point3::from(sum / members.len() as f64);
        let survivor = mesh.add_vertex(centroid);
        for v in members {
            map.insert(v, survivor);
        }
    }

    for &f in &faces {
        mesh.delete_face(f)?;
    }

    // Substitute survivors into the remaining incident faces.
    let mut affected: BTreeSet<FaceId> = BTreeSet::new();
    for &old in map.keys() {
        let neighbors: Vec<VertexId> = mesh.vertex_neighbors(old).collect();
        for n in neighbors {
            if let Some(f) = mesh.halfedge_face(old, n) {
                affected.insert(f);
            }
            if let Some(f) = mesh.halfedge_face(n, old) {
                affected.insert(f);
            }
        }
    }
    for f in affected {
        let face = mesh.face(f);
        let substituted: Vec<VertexId> = face
            .vertices
            .iter()
            .map(|&v| map.get(&v).copied().unwrap_or(v))
            .collect();
        let pole = face.pole.map(|p| map.get(&p).copied().unwrap_or(p));
        let vertices = collapse_consecutive(substituted);
        mesh.delete_face(f)?;
        if vertices.len() >= 3 {
            mesh.add_face_unchecked(vertices, pole);
        }
    }

    for &old in map.keys() {
        mesh.delete_vertex(old)?;
    }

    Ok(VertexMerge { map })
}

/// Remove cyclically consecutive duplicate vertices.
fn collapse_consecutive(vertices: Vec<VertexId>) -> Vec<VertexId> {
    let mut out: Vec<VertexId> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if out.last() != Some(&v) {
            out.push(v);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Identify strips whose deletion would change the boundary topology.
///
/// Two conservative rules:
///
/// 1. A strip owning an interior transverse edge with both endpoints on the
///    mesh boundary: collapsing that edge fuses two boundary points,
///    pinching one loop in two or merging two loops into one.
/// 2. A boundary loop all of whose crossing strips are marked for deletion
///    would collapse to a point; the smallest such strip (fewest faces,
///    then lowest id) is reported.
///
/// Callers split the reported strips with
/// [`split_strip`](crate::grammar::split_strip), recollect the partition,
/// re-derive the deletion set, and only then delete.
pub fn strips_to_split_to_preserve_boundaries(
    mesh: &QuadMesh,
    partition: &StripPartition,
    to_delete: &BTreeSet<StripId>,
) -> Result<BTreeSet<StripId>> {
    let mut to_split = BTreeSet::new();

    // Rule 1: boundary-to-boundary interior transverse edges.
    for &s in to_delete {
        let strip = partition.strip(s)?;
        for &(u, v) in strip.edges() {
            if !mesh.is_boundary_edge(u, v)
                && mesh.is_boundary_vertex(u)
                && mesh.is_boundary_vertex(v)
            {
                to_split.insert(s);
                break;
            }
        }
    }

    // Rule 2: boundary loops left without a surviving crossing strip.
    for cycle in mesh.boundary_loops() {
        let n = cycle.len();
        let mut loop_strips = BTreeSet::new();
        let mut survivor = false;
        for i in 0..n {
            let (u, v) = (cycle[i], cycle[(i + 1) % n]);
            if let Some(s) = partition.strip_of_edge(u, v) {
                loop_strips.insert(s);
                if !to_delete.contains(&s) {
                    survivor = true;
                }
            }
        }
        if !survivor && !loop_strips.is_empty() {
            let pick = loop_strips
                .iter()
                .copied()
                .min_by_key(|&s| {
                    let faces = partition
                        .strip(s)
                        .map(|strip| strip.faces(mesh).len())
                        .unwrap_or(usize::MAX);
                    (faces, s)
                })
                .expect("loop has at least one strip");
            to_split.insert(pick);
        }
    }

    Ok(to_split)
}
