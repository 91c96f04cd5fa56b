//! Quad mesh data structure.
//!
//! This module provides the mesh representation underlying the strip model:
//! vertices with 3D positions, faces as ordered cyclic vertex sequences, and
//! a derived halfedge adjacency mapping every directed vertex pair `(u, v)`
//! to the face on its left (`None` on the boundary).
//!
//! # Structure
//!
//! - Faces are stored counter-clockwise; the halfedge `(u, v)` belongs to
//!   the face listing `u` immediately before `v`
//! - Every edge of the mesh is present in the adjacency in both directions;
//!   a direction without a face maps to `None`
//! - Element ids are never reused, so ids of untouched elements survive
//!   destructive edits
//!
//! # Faces
//!
//! The strip model only requires quad faces and *pseudo-quads*: triangles
//! with one vertex flagged as a pole, standing in for a quad with two
//! consecutive corners merged. The mesh itself accepts any face with three
//! or more vertices; [`QuadMesh::is_quad_mesh`] reports whether every face
//! is usable by the strip operations.
//!
//! # Boundary Handling
//!
//! A vertex is on the boundary when one of its outgoing halfedges has no
//! face. Boundary loops can be walked by chaining such halfedges.

use std::collections::BTreeMap;

use nalgebra::Point3;

use super::index::{FaceId, VertexId};
use crate::error::{MeshError, Result};

/// A vertex in the mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self { position }
    }
}

/// A face in the mesh.
#[derive(Debug, Clone)]
pub struct Face {
    /// The vertices of this face in counter-clockwise cyclic order.
    pub vertices: Vec<VertexId>,

    /// The pole vertex, for pseudo-quad faces.
    ///
    /// `Some(v)` marks a triangle as a degenerate quad whose two corners at
    /// `v` coincide. `None` for ordinary faces.
    pub pole: Option<VertexId>,
}

impl Face {
    /// Create a new face from a counter-clockwise vertex cycle.
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self {
            vertices,
            pole: None,
        }
    }

    /// Create a new pseudo-quad face with the given pole.
    pub fn with_pole(vertices: Vec<VertexId>, pole: VertexId) -> Self {
        Self {
            vertices,
            pole: Some(pole),
        }
    }
}

/// A quad (or pseudo-quad) mesh with derived halfedge adjacency.
///
/// Vertices and faces are keyed by ids allocated from monotone counters:
/// deleting an element never shifts or recycles the ids of the others. The
/// halfedge adjacency is maintained incrementally by
/// [`add_face`](QuadMesh::add_face) and [`delete_face`](QuadMesh::delete_face).
///
/// The mesh is `Clone`; grammar operations mutate a single exclusively
/// owned instance, and exploratory search works on independent clones.
#[derive(Debug, Clone, Default)]
pub struct QuadMesh {
    vertices: BTreeMap<VertexId, Vertex>,
    faces: BTreeMap<FaceId, Face>,
    /// halfedge[u][v] = face on the left of u -> v, or None on the boundary.
    halfedge: BTreeMap<VertexId, BTreeMap<VertexId, Option<FaceId>>>,
    next_vertex: usize,
    next_face: usize,
}

impl QuadMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of undirected edges.
    pub fn num_edges(&self) -> usize {
        let directed: usize = self.halfedge.values().map(|row| row.len()).sum();
        directed / 2
    }

    /// Check whether a vertex id exists in the mesh.
    #[inline]
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains_key(&v)
    }

    /// Check whether a face id exists in the mesh.
    #[inline]
    pub fn has_face(&self, f: FaceId) -> bool {
        self.faces.contains_key(&f)
    }

    /// Get a vertex by id.
    ///
    /// # Panics
    /// Panics if the id is not in the mesh.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[&id]
    }

    /// Get a face by id.
    ///
    /// # Panics
    /// Panics if the id is not in the mesh.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[&id]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) -> Result<()> {
        match self.vertices.get_mut(&v) {
            Some(vertex) => {
                vertex.position = pos;
                Ok(())
            }
            None => Err(MeshError::UnknownVertex(v)),
        }
    }

    /// Get the vertices of a face in cyclic order.
    #[inline]
    pub fn face_vertices(&self, f: FaceId) -> &[VertexId] {
        &self.face(f).vertices
    }

    /// Get the pole of a face, if it is a pseudo-quad.
    #[inline]
    pub fn face_pole(&self, f: FaceId) -> Option<VertexId> {
        self.face(f).pole
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex ids in ascending order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.keys().copied()
    }

    /// Iterate over all vertices with their ids.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.vertices.iter().map(|(&id, v)| (id, v))
    }

    /// Iterate over all face ids in ascending order.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys().copied()
    }

    /// Iterate over all faces with their ids.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &Face)> + '_ {
        self.faces.iter().map(|(&id, f)| (id, f))
    }

    /// Collect all undirected edges as `(u, v)` pairs with `u < v`,
    /// in ascending order.
    pub fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut out = Vec::with_capacity(self.num_edges());
        for (&u, row) in &self.halfedge {
            for &v in row.keys() {
                if u < v {
                    out.push((u, v));
                }
            }
        }
        out
    }

    // ==================== Topology Queries ====================

    /// Get the face on the left of the directed edge `(u, v)`.
    ///
    /// Returns `None` both for boundary halfedges and for vertex pairs that
    /// are not edges of the mesh; use [`has_edge`](QuadMesh::has_edge) to
    /// distinguish.
    #[inline]
    pub fn halfedge_face(&self, u: VertexId, v: VertexId) -> Option<FaceId> {
        self.halfedge.get(&u).and_then(|row| row.get(&v)).copied().flatten()
    }

    /// Check whether `(u, v)` is an edge of the mesh (in either direction).
    #[inline]
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.halfedge
            .get(&u)
            .map(|row| row.contains_key(&v))
            .unwrap_or(false)
    }

    /// Get the vertex after `v` in the cyclic order of face `f`.
    pub fn face_vertex_after(&self, f: FaceId, v: VertexId) -> Option<VertexId> {
        let vertices = self.face_vertices(f);
        let i = vertices.iter().position(|&x| x == v)?;
        Some(vertices[(i + 1) % vertices.len()])
    }

    /// Get the vertex before `v` in the cyclic order of face `f`.
    pub fn face_vertex_before(&self, f: FaceId, v: VertexId) -> Option<VertexId> {
        let vertices = self.face_vertices(f);
        let i = vertices.iter().position(|&x| x == v)?;
        Some(vertices[(i + vertices.len() - 1) % vertices.len()])
    }

    /// Iterate over the neighbors of a vertex in ascending id order.
    pub fn vertex_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.halfedge
            .get(&v)
            .into_iter()
            .flat_map(|row| row.keys().copied())
    }

    /// Get the valence (degree) of a vertex.
    pub fn vertex_degree(&self, v: VertexId) -> usize {
        self.halfedge.get(&v).map(|row| row.len()).unwrap_or(0)
    }

    /// Get the neighbors of a vertex in counter-clockwise fan order.
    ///
    /// For a boundary vertex the walk starts just after the boundary gap,
    /// so the first and last neighbors are the two boundary neighbors. For
    /// an interior vertex the starting neighbor is the one with the lowest
    /// id. Returns an empty vector for an isolated vertex.
    pub fn vertex_neighbors_ordered(&self, v: VertexId) -> Vec<VertexId> {
        let row = match self.halfedge.get(&v) {
            Some(row) if !row.is_empty() => row,
            _ => return Vec::new(),
        };

        // The CW-most neighbor of a boundary vertex is the one whose
        // halfedge into v carries no face.
        let start = row
            .keys()
            .copied()
            .find(|&n| self.halfedge_face(n, v).is_none() && self.has_edge(n, v))
            .unwrap_or_else(|| *row.keys().next().expect("row is non-empty"));

        let mut ordered = Vec::with_capacity(row.len());
        ordered.push(start);
        let mut current = start;
        for _ in 0..row.len() {
            let face = match self.halfedge_face(v, current) {
                Some(f) => f,
                None => break,
            };
            let next = match self.face_vertex_before(face, v) {
                Some(n) => n,
                None => break,
            };
            if next == start {
                break;
            }
            ordered.push(next);
            current = next;
        }
        ordered
    }

    /// Get the faces around a vertex in counter-clockwise fan order.
    pub fn vertex_faces(&self, v: VertexId) -> Vec<FaceId> {
        self.vertex_neighbors_ordered(v)
            .into_iter()
            .filter_map(|n| self.halfedge_face(v, n))
            .collect()
    }

    /// Check if a vertex is on the boundary.
    pub fn is_boundary_vertex(&self, v: VertexId) -> bool {
        match self.halfedge.get(&v) {
            Some(row) => row.is_empty() || row.values().any(|f| f.is_none()),
            None => false,
        }
    }

    /// Check if an edge is on the boundary.
    pub fn is_boundary_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.has_edge(u, v)
            && (self.halfedge_face(u, v).is_none() || self.halfedge_face(v, u).is_none())
    }

    /// Check if a face is a quad.
    #[inline]
    pub fn is_quad(&self, f: FaceId) -> bool {
        let face = self.face(f);
        face.vertices.len() == 4 && face.pole.is_none()
    }

    /// Check if a face is a valid pseudo-quad: a triangle whose pole is one
    /// of its vertices.
    #[inline]
    pub fn is_pseudo_quad(&self, f: FaceId) -> bool {
        let face = self.face(f);
        face.vertices.len() == 3
            && matches!(face.pole, Some(p) if face.vertices.contains(&p))
    }

    /// Check if every face is a quad or a valid pseudo-quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.face_ids().all(|f| self.is_quad(f) || self.is_pseudo_quad(f))
    }

    // ==================== Global Topology ====================

    /// Compute the Euler characteristic `V - E + F`.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_edges() as i64 + self.num_faces() as i64
    }

    /// Collect the boundary loops of the mesh as cyclic vertex sequences.
    ///
    /// Each loop is reported once, starting from its lowest vertex id, and
    /// follows the boundary halfedges (face on the right of the walk).
    pub fn boundary_loops(&self) -> Vec<Vec<VertexId>> {
        // v -> next boundary vertex along the faceless halfedge out of v
        let mut outgoing: BTreeMap<VertexId, VertexId> = BTreeMap::new();
        for (&u, row) in &self.halfedge {
            for (&v, face) in row {
                if face.is_none() {
                    outgoing.insert(u, v);
                }
            }
        }

        let mut loops = Vec::new();
        while let Some((&start, _)) = outgoing.iter().next() {
            let mut cycle = Vec::new();
            let mut current = start;
            loop {
                cycle.push(current);
                let next = match outgoing.remove(&current) {
                    Some(n) => n,
                    None => break,
                };
                if next == start {
                    break;
                }
                current = next;
            }
            loops.push(cycle);
        }
        loops
    }

    /// Check if the mesh is manifold.
    ///
    /// Every vertex must have a single fan of incident faces, open at most
    /// once (at the boundary). The halfedge map guarantees by construction
    /// that each directed edge belongs to at most one face.
    pub fn is_manifold(&self) -> bool {
        for &v in self.vertices.keys() {
            let row = match self.halfedge.get(&v) {
                Some(row) => row,
                None => continue,
            };
            if row.is_empty() {
                continue;
            }
            let gaps = row.values().filter(|f| f.is_none()).count();
            if gaps > 1 {
                return false;
            }
            if self.vertex_neighbors_ordered(v).len() != row.len() {
                return false;
            }
        }
        true
    }

    // ==================== Geometry ====================

    /// Compute the length of an edge.
    pub fn edge_length(&self, u: VertexId, v: VertexId) -> f64 {
        (self.position(v) - self.position(u)).norm()
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, u: VertexId, v: VertexId) -> Point3<f64> {
        Point3::from((self.position(u).coords + self.position(v).coords) * 0.5)
    }

    /// Compute the centroid of a face.
    pub fn face_centroid(&self, f: FaceId) -> Point3<f64> {
        let vertices = self.face_vertices(f);
        let sum = vertices
            .iter()
            .map(|&v| self.position(v).coords)
            .sum::<nalgebra::Vector3<f64>>();
        Point3::from(sum / vertices.len() as f64)
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its id.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.next_vertex);
        self.next_vertex += 1;
        self.vertices.insert(id, Vertex::new(position));
        self.halfedge.insert(id, BTreeMap::new());
        id
    }

    /// Add a face from a counter-clockwise vertex cycle.
    ///
    /// Validates that the cycle has at least three vertices, repeats none of
    /// them, references existing vertices, that a declared pole is one of a
    /// triangle's vertices, and that no directed edge of the cycle already
    /// belongs to another face.
    pub fn add_face(
        &mut self,
        vertices: Vec<VertexId>,
        pole: Option<VertexId>,
    ) -> Result<FaceId> {
        let id = FaceId::new(self.next_face);

        if vertices.len() < 3 {
            return Err(MeshError::DegenerateFace { face: id.index() });
        }
        for i in 0..vertices.len() {
            let u = vertices[i];
            let v = vertices[(i + 1) % vertices.len()];
            if vertices[..i].contains(&u) {
                return Err(MeshError::DegenerateFace { face: id.index() });
            }
            if !self.has_vertex(u) {
                return Err(MeshError::UnknownVertex(u));
            }
            if self.halfedge_face(u, v).is_some() {
                return Err(MeshError::NonManifoldEdge { u, v });
            }
        }
        if let Some(p) = pole {
            if vertices.len() != 3 || !vertices.contains(&p) {
                return Err(MeshError::InvalidPole(id));
            }
        }

        self.next_face += 1;
        for i in 0..vertices.len() {
            let u = vertices[i];
            let v = vertices[(i + 1) % vertices.len()];
            self.halfedge.get_mut(&u).expect("vertex checked").insert(v, Some(id));
            self.halfedge
                .get_mut(&v)
                .expect("vertex checked")
                .entry(u)
                .or_insert(None);
        }
        self.faces.insert(id, Face { vertices, pole });
        Ok(id)
    }

    /// Add a face without manifoldness validation.
    ///
    /// Used by destructive surgery that must run to completion even when an
    /// edit produces an invalid mesh; the caller checks
    /// [`is_manifold`](QuadMesh::is_manifold) and the topological signature
    /// afterwards. A conflicting directed edge is overwritten.
    pub(crate) fn add_face_unchecked(
        &mut self,
        vertices: Vec<VertexId>,
        pole: Option<VertexId>,
    ) -> FaceId {
        let id = FaceId::new(self.next_face);
        self.next_face += 1;
        for i in 0..vertices.len() {
            let u = vertices[i];
            let v = vertices[(i + 1) % vertices.len()];
            self.halfedge.entry(u).or_default().insert(v, Some(id));
            self.halfedge.entry(v).or_default().entry(u).or_insert(None);
        }
        self.faces.insert(id, Face { vertices, pole });
        id
    }

    /// Delete a face, keeping the halfedge adjacency consistent.
    ///
    /// Edges left without a face on either side are removed entirely.
    pub fn delete_face(&mut self, f: FaceId) -> Result<()> {
        let face = self.faces.remove(&f).ok_or(MeshError::UnknownFace(f))?;
        let n = face.vertices.len();
        for i in 0..n {
            let u = face.vertices[i];
            let v = face.vertices[(i + 1) % n];
            if let Some(row) = self.halfedge.get_mut(&u) {
                row.insert(v, None);
            }
            let reverse_empty = self.halfedge_face(v, u).is_none();
            if reverse_empty {
                if let Some(row) = self.halfedge.get_mut(&u) {
                    row.remove(&v);
                }
                if let Some(row) = self.halfedge.get_mut(&v) {
                    row.remove(&u);
                }
            }
        }
        Ok(())
    }

    /// Delete a vertex.
    ///
    /// The vertex must no longer be referenced by any face; dangling
    /// faceless halfedges to it are cleaned up.
    pub fn delete_vertex(&mut self, v: VertexId) -> Result<()> {
        if !self.has_vertex(v) {
            return Err(MeshError::UnknownVertex(v));
        }
        let row = self.halfedge.get(&v).cloned().unwrap_or_default();
        for (n, face) in row {
            if face.is_some() || self.halfedge_face(n, v).is_some() {
                return Err(MeshError::invalid_param(
                    "vertex",
                    format!("{:?}", v),
                    "still referenced by a face",
                ));
            }
            if let Some(nrow) = self.halfedge.get_mut(&n) {
                nrow.remove(&v);
            }
        }
        self.halfedge.remove(&v);
        self.vertices.remove(&v);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::builder::{from_vertices_and_faces, grid};

    #[test]
    fn test_empty_mesh() {
        let mesh = QuadMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert!(mesh.is_manifold());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = QuadMesh::new();
        let v0 = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));

        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(v0.index(), 0);
        assert_eq!(v1.index(), 1);
    }

    #[test]
    fn test_single_quad_adjacency() {
        let mesh = grid(1, 1);
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 4);

        let f = mesh.face_ids().next().unwrap();
        let [a, b, c, d] = [
            mesh.face_vertices(f)[0],
            mesh.face_vertices(f)[1],
            mesh.face_vertices(f)[2],
            mesh.face_vertices(f)[3],
        ];
        assert_eq!(mesh.halfedge_face(a, b), Some(f));
        assert_eq!(mesh.halfedge_face(b, a), None);
        assert!(mesh.has_edge(b, a));
        assert_eq!(mesh.face_vertex_after(f, a), Some(b));
        assert_eq!(mesh.face_vertex_before(f, a), Some(d));
        assert!(mesh.is_boundary_edge(a, b));
        assert!(mesh.is_boundary_vertex(c));
    }

    #[test]
    fn test_grid_counts_and_euler() {
        let mesh = grid(2, 2);
        assert_eq!(mesh.num_vertices(), 9);
        assert_eq!(mesh.num_faces(), 4);
        assert_eq!(mesh.num_edges(), 12);
        // Disk topology
        assert_eq!(mesh.euler_characteristic(), 1);
        assert!(mesh.is_manifold());
        assert!(mesh.is_quad_mesh());
    }

    #[test]
    fn test_ordered_fan_interior_vertex() {
        let mesh = grid(2, 2);
        // Center vertex of the 3x3 grid of vertices
        let center = VertexId::new(4);
        assert!(!mesh.is_boundary_vertex(center));

        let fan = mesh.vertex_neighbors_ordered(center);
        assert_eq!(fan.len(), 4);
        // Each consecutive fan pair spans a face
        for i in 0..fan.len() {
            assert!(mesh.halfedge_face(center, fan[i]).is_some());
        }
        assert_eq!(mesh.vertex_faces(center).len(), 4);
    }

    #[test]
    fn test_ordered_fan_boundary_vertex() {
        let mesh = grid(2, 2);
        // Mid-edge boundary vertex
        let v = VertexId::new(1);
        assert!(mesh.is_boundary_vertex(v));

        let fan = mesh.vertex_neighbors_ordered(v);
        assert_eq!(fan.len(), 3);
        // The walk ends at the boundary gap
        assert_eq!(mesh.halfedge_face(v, fan[2]), None);
        assert_eq!(mesh.vertex_faces(v).len(), 2);
    }

    #[test]
    fn test_boundary_loops() {
        let mesh = grid(2, 2);
        let loops = mesh.boundary_loops();
        assert_eq!(loops.len(), 1);
        assert_eq!(loops[0].len(), 8);
    }

    #[test]
    fn test_non_manifold_edge_rejected() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.5, 0.0),
        ];
        // Second face claims the directed edge (0, 1) again
        let faces = vec![vec![0, 1, 2, 3], vec![0, 1, 4]];
        let result = from_vertices_and_faces(&vertices, &faces);
        assert!(matches!(result, Err(MeshError::NonManifoldEdge { .. })));
    }

    #[test]
    fn test_delete_face_cleans_edges() {
        let mut mesh = grid(1, 1);
        let f = mesh.face_ids().next().unwrap();
        mesh.delete_face(f).unwrap();

        assert_eq!(mesh.num_faces(), 0);
        assert_eq!(mesh.num_edges(), 0);
        assert_eq!(mesh.num_vertices(), 4);

        for v in mesh.vertex_ids().collect::<Vec<_>>() {
            mesh.delete_vertex(v).unwrap();
        }
        assert_eq!(mesh.num_vertices(), 0);
    }

    #[test]
    fn test_delete_vertex_in_use_rejected() {
        let mut mesh = grid(1, 1);
        let v = mesh.vertex_ids().next().unwrap();
        assert!(mesh.delete_vertex(v).is_err());
    }

    #[test]
    fn test_vertex_ids_stable_under_deletion() {
        let mut mesh = grid(2, 1);
        let all: Vec<_> = mesh.face_ids().collect();
        mesh.delete_face(all[0]).unwrap();

        let mut kept = QuadMesh::new();
        let v = kept.add_vertex(Point3::origin());
        assert_eq!(v.index(), 0);

        // New faces keep counting past deleted ids
        let before = all[1].index();
        let w0 = mesh.add_vertex(Point3::new(5.0, 5.0, 0.0));
        let w1 = mesh.add_vertex(Point3::new(6.0, 5.0, 0.0));
        let w2 = mesh.add_vertex(Point3::new(6.0, 6.0, 0.0));
        let f = mesh.add_face(vec![w0, w1, w2], None).unwrap();
        assert!(f.index() > before);
    }

    #[test]
    fn test_pseudo_quad_validity() {
        let mut mesh = QuadMesh::new();
        let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(0.5, 1.0, 0.0));
        let d = mesh.add_vertex(Point3::new(2.0, 1.0, 0.0));

        let f = mesh.add_face(vec![a, b, c], Some(a)).unwrap();
        assert!(mesh.is_pseudo_quad(f));
        assert!(!mesh.is_quad(f));
        assert!(mesh.is_quad_mesh());

        // Pole must belong to the face
        assert!(matches!(
            mesh.add_face(vec![a, c, b], Some(d)),
            Err(MeshError::InvalidPole(_))
        ));
    }

    #[test]
    fn test_geometry_helpers() {
        let mesh = grid(1, 1);
        let f = mesh.face_ids().next().unwrap();
        let vs = mesh.face_vertices(f).to_vec();

        assert!((mesh.edge_length(vs[0], vs[1]) - 1.0).abs() < 1e-12);
        let mid = mesh.edge_midpoint(vs[0], vs[1]);
        assert!((mid.x - 0.5).abs() < 1e-12);
        let centroid = mesh.face_centroid(f);
        assert!((centroid.x - 0.5).abs() < 1e-12);
        assert!((centroid.y - 0.5).abs() < 1e-12);
    }
}
