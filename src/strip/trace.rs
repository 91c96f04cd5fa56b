//! Strip tracing and partitioning.
//!
//! A strip is a maximal chain of quad faces connected through mutually
//! opposite edges. Tracing starts from a seed edge and hops face to face
//! through the opposite-edge relation until it reaches a boundary, a pole,
//! or closes back onto the seed. Partitioning repeats the trace until every
//! edge of the mesh is assigned to exactly one strip.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{MeshError, Result};
use crate::mesh::{FaceId, QuadMesh, StripId, VertexId};

/// Canonical undirected key for an edge.
#[inline]
pub(crate) fn edge_key(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}

/// Compute the opposite edge of `(u, v)` in the face on its left.
///
/// For a quad `[u, v, w, x]` the opposite edge is `(w, x)`. For a
/// pseudo-quad the two edges meeting at the pole are opposite one another,
/// and the edge facing the pole has no opposite: the collapsed quad side is
/// reported as `None`, which terminates a strip trace exactly like a
/// boundary.
///
/// # Errors
/// Fails if `(u, v)` has no face on its left, or if that face is neither a
/// quad nor a valid pseudo-quad.
pub fn face_opposite_edge(
    mesh: &QuadMesh,
    u: VertexId,
    v: VertexId,
) -> Result<Option<(VertexId, VertexId)>> {
    let f = mesh
        .halfedge_face(u, v)
        .ok_or(MeshError::UnknownEdge { u, v })?;

    if mesh.is_quad(f) {
        let w = mesh.face_vertex_after(f, v).expect("v is in its face");
        let x = mesh.face_vertex_after(f, w).expect("w is in its face");
        return Ok(Some((w, x)));
    }
    if mesh.is_pseudo_quad(f) {
        let pole = mesh.face_pole(f).expect("pseudo-quad has a pole");
        let w = mesh.face_vertex_after(f, v).expect("v is in its face");
        if pole == u {
            return Ok(Some((w, u)));
        }
        if pole == v {
            return Ok(Some((v, w)));
        }
        // Pole faces the edge: the opposite quad side has zero length.
        return Ok(None);
    }
    Err(MeshError::NotQuadFace(f))
}

/// One strip: an ordered run of transverse edges.
#[derive(Debug, Clone)]
pub struct Strip {
    edges: Vec<(VertexId, VertexId)>,
    closed: bool,
}

impl Strip {
    /// The ordered transverse edges of the strip.
    ///
    /// Consecutive edges flank one strip face; for an open strip the first
    /// and last edges lie on the boundary (or against a pole).
    #[inline]
    pub fn edges(&self) -> &[(VertexId, VertexId)] {
        &self.edges
    }

    /// Whether the strip loops back onto itself.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The number of transverse edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the strip has no edges. Never true for a traced strip.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The faces of the strip, in traversal order, deduplicated.
    ///
    /// A self-crossing strip visits a face twice but reports it once.
    pub fn faces(&self, mesh: &QuadMesh) -> Vec<FaceId> {
        let mut seen = BTreeSet::new();
        let mut faces = Vec::new();
        for &(u, v) in &self.edges {
            if let Some(f) = mesh.halfedge_face(u, v) {
                if seen.insert(f) {
                    faces.push(f);
                }
            }
        }
        faces
    }
}

/// Trace the full strip containing the seed edge.
///
/// The trace extends forward from `(u0, v0)` until the far side of the
/// current edge has no face (boundary), the opposite edge degenerates at a
/// pole, or the seed edge is reached again (closed strip). If an end was
/// hit, the trace reverses and extends the other way so the returned strip
/// is maximal.
pub fn trace_strip(mesh: &QuadMesh, u0: VertexId, v0: VertexId) -> Result<Strip> {
    if !mesh.has_edge(u0, v0) {
        return Err(MeshError::UnknownEdge { u: u0, v: v0 });
    }

    let budget = mesh.num_edges() + 1;
    let mut edges = vec![(u0, v0)];
    let mut closed = false;

    let extend = |edges: &mut Vec<(VertexId, VertexId)>, closed: &mut bool| -> Result<()> {
        for _ in 0..budget {
            let (u, v) = *edges.last().expect("trace starts non-empty");
            if mesh.halfedge_face(u, v).is_none() {
                break;
            }
            let (w, x) = match face_opposite_edge(mesh, u, v)? {
                Some(edge) => edge,
                None => break,
            };
            let next = (x, w);
            if next == edges[0] {
                *closed = true;
                break;
            }
            edges.push(next);
        }
        Ok(())
    };

    extend(&mut edges, &mut closed)?;
    if !closed {
        edges.reverse();
        for edge in edges.iter_mut() {
            *edge = (edge.1, edge.0);
        }
        extend(&mut edges, &mut closed)?;
    }

    Ok(Strip { edges, closed })
}

/// The partition of a mesh's edges into strips.
///
/// Computed on demand by [`collect_strips`] and invalidated by any grammar
/// operation on the mesh it was computed from.
#[derive(Debug, Clone, Default)]
pub struct StripPartition {
    strips: BTreeMap<StripId, Strip>,
    edge_strip: BTreeMap<(VertexId, VertexId), StripId>,
}

impl StripPartition {
    /// The number of strips.
    #[inline]
    pub fn num_strips(&self) -> usize {
        self.strips.len()
    }

    /// Iterate over all strip ids in ascending order.
    pub fn strip_ids(&self) -> impl Iterator<Item = StripId> + '_ {
        self.strips.keys().copied()
    }

    /// Iterate over all strips with their ids.
    pub fn strips(&self) -> impl Iterator<Item = (StripId, &Strip)> + '_ {
        self.strips.iter().map(|(&id, s)| (id, s))
    }

    /// Get a strip by id.
    pub fn strip(&self, id: StripId) -> Result<&Strip> {
        self.strips.get(&id).ok_or(MeshError::UnknownStrip(id))
    }

    /// The strip containing the given edge, in either direction.
    pub fn strip_of_edge(&self, u: VertexId, v: VertexId) -> Option<StripId> {
        self.edge_strip.get(&edge_key(u, v)).copied()
    }
}

/// Partition all edges of the mesh into strips.
///
/// Every edge is assigned to exactly one strip; edges are seeded in
/// ascending order so the resulting strip ids are deterministic for a given
/// mesh. Runs in O(E) amortized: each edge is visited once across all
/// traces.
///
/// # Errors
/// Fails if any face is neither a quad nor a valid pseudo-quad.
pub fn collect_strips(mesh: &QuadMesh) -> Result<StripPartition> {
    for (f, _) in mesh.faces() {
        if !mesh.is_quad(f) && !mesh.is_pseudo_quad(f) {
            return Err(MeshError::NotQuadFace(f));
        }
    }

    let mut remaining: BTreeSet<(VertexId, VertexId)> = mesh.edges().into_iter().collect();
    let mut strips = BTreeMap::new();
    let mut edge_strip = BTreeMap::new();
    let mut count = 0;

    while let Some(&(u, v)) = remaining.iter().next() {
        let strip = trace_strip(mesh, u, v)?;
        let id = StripId::new(count);
        count += 1;
        for &(a, b) in strip.edges() {
            let key = edge_key(a, b);
            remaining.remove(&key);
            edge_strip.insert(key, id);
        }
        strips.insert(id, strip);
    }

    Ok(StripPartition { strips, edge_strip })
}
