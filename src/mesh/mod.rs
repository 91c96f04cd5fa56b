//! Core mesh data structures.
//!
//! This module provides the quad-mesh representation the strip model is
//! built on, together with type-safe element ids and the face-vertex
//! construction path.
//!
//! # Overview
//!
//! The primary type is [`QuadMesh`]: vertices with 3D positions, faces as
//! counter-clockwise cyclic vertex sequences, and a derived halfedge
//! adjacency for O(1) "face left of (u, v)" queries. Triangular faces with a
//! designated pole vertex ([`Face::pole`]) act as degenerate quads so that
//! strip tracing extends to irregular regions.
//!
//! # Index Types
//!
//! Mesh elements are identified by the index wrappers [`VertexId`] and
//! [`FaceId`]; strips by [`StripId`]. Ids are allocated from monotone
//! counters and never reused, which keeps them meaningful across the
//! destructive edits performed by the grammar operations.
//!
//! # Construction
//!
//! Meshes are constructed from face-vertex lists:
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
//! assert!(mesh.is_quad_mesh());
//! ```

pub mod builder;
mod index;
mod polyedge;
mod quad;

pub use index::{FaceId, StripId, VertexId};
pub use polyedge::Polyedge;
pub use quad::{Face, QuadMesh, Vertex};
