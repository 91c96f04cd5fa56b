//! Mesh construction utilities.
//!
//! This module provides the face-vertex ingestion path for building a
//! [`QuadMesh`] from raw coordinate and index lists, the inverse export, and
//! a planar grid constructor used throughout the tests and benchmarks.
//!
//! # Example
//!
//! ```
//! use quadrille::mesh::builder::from_vertices_and_faces;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2, 3]];
//!
//! let mesh = from_vertices_and_faces(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_vertices(), 4);
//! assert_eq!(mesh.num_faces(), 1);
//! ```

use nalgebra::Point3;

use super::index::VertexId;
use super::quad::QuadMesh;
use crate::error::{MeshError, Result};

/// Build a quad mesh from vertex positions and face index cycles.
///
/// Faces are counter-clockwise cyclic sequences of vertex indices into the
/// `vertices` slice. Input vertex indices map to [`VertexId`]s in order.
///
/// # Errors
/// Fails on an empty face list, an out-of-range vertex index, a face with
/// fewer than three vertices or a repeated consecutive vertex, or two faces
/// claiming the same directed edge.
pub fn from_vertices_and_faces(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
) -> Result<QuadMesh> {
    let poles = vec![None; faces.len()];
    from_vertices_and_faces_with_poles(vertices, faces, &poles)
}

/// Build a quad mesh admitting pseudo-quad faces.
///
/// `poles[i]` flags face `i` as a pseudo-quad with the given pole vertex
/// index; such a face must be a triangle containing its pole.
pub fn from_vertices_and_faces_with_poles(
    vertices: &[Point3<f64>],
    faces: &[Vec<usize>],
    poles: &[Option<usize>],
) -> Result<QuadMesh> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    for (fi, face) in faces.iter().enumerate() {
        for &vi in face {
            if vi >= vertices.len() {
                return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
            }
        }
    }

    let mut mesh = QuadMesh::new();
    let vertex_ids: Vec<VertexId> = vertices.iter().map(|&pos| mesh.add_vertex(pos)).collect();

    for (fi, face) in faces.iter().enumerate() {
        let cycle: Vec<VertexId> = face.iter().map(|&vi| vertex_ids[vi]).collect();
        let pole = poles.get(fi).copied().flatten().map(|vi| vertex_ids[vi]);
        mesh.add_face(cycle, pole)?;
    }

    Ok(mesh)
}

/// Convert a mesh back to a face-vertex representation.
///
/// Vertex ids are compacted to consecutive indices in ascending id order.
/// Returns `(positions, face index cycles, face poles)`.
pub fn to_vertices_and_faces(
    mesh: &QuadMesh,
) -> (Vec<Point3<f64>>, Vec<Vec<usize>>, Vec<Option<usize>>) {
    let ids: Vec<VertexId> = mesh.vertex_ids().collect();
    let positions: Vec<Point3<f64>> = ids.iter().map(|&v| *mesh.position(v)).collect();

    let index_of = |v: VertexId| ids.binary_search(&v).expect("face references mesh vertex");

    let mut faces = Vec::with_capacity(mesh.num_faces());
    let mut poles = Vec::with_capacity(mesh.num_faces());
    for (_, face) in mesh.faces() {
        faces.push(face.vertices.iter().map(|&v| index_of(v)).collect());
        poles.push(face.pole.map(index_of));
    }

    (positions, faces, poles)
}

/// Build a planar `nx` by `ny` grid of unit quads in the z = 0 plane.
///
/// Vertex `(i, j)` gets index `j * (nx + 1) + i`; faces are
/// counter-clockwise when viewed from +z.
pub fn grid(nx: usize, ny: usize) -> QuadMesh {
    assert!(nx > 0 && ny > 0, "grid must have at least one face");

    let mut vertices = Vec::with_capacity((nx + 1) * (ny + 1));
    for j in 0..=ny {
        for i in 0..=nx {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v00 = j * (nx + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (nx + 1);
            let v11 = v01 + 1;
            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    from_vertices_and_faces(&vertices, &faces).expect("grid input is valid")
}
