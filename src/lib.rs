//! # Quadrille
//!
//! A quad-mesh strip toolkit for mesh-pattern design: the strip data
//! model, a grammar of topological edits over it, and densification of
//! coarse patterns into fine quad meshes.
//!
//! A *strip* is a maximal run of quad faces connected through opposite
//! edges. Partitioning a mesh into strips turns pattern design into a
//! combinatorial problem: inserting a strip along a vertex path or
//! collapsing an existing strip are local rewrites that preserve
//! manifoldness, and per-strip subdivision densities regenerate a fine,
//! conforming mesh from the coarse pattern.
//!
//! ## Features
//!
//! - **Strip model**: opposite-edge tracing, O(E) strip partitioning,
//!   pole-carrying pseudo-quads for irregular regions
//! - **Edit grammar**: strip addition along polyedges, strip deletion and
//!   splitting, boundary-preservation pre-checks
//! - **Densification**: per-strip densities, discrete Coons patches,
//!   tolerance welding
//! - **Exploration**: instruction-driven edit agents, parallel
//!   generate-and-evaluate search, two-colorability projection
//!
//! ## Quick Start
//!
//! ```
//! use quadrille::prelude::*;
//! use quadrille::mesh::builder::grid;
//!
//! // A 3x3 vertex grid: two horizontal and two vertical strips.
//! let mut mesh = grid(2, 2);
//! let partition = collect_strips(&mesh).unwrap();
//! assert_eq!(partition.num_strips(), 4);
//!
//! // Thicken the middle horizontal polyedge into a new strip.
//! let path = Polyedge::new((3..6).map(VertexId::new).collect()).unwrap();
//! let added = add_strip(&mut mesh, &path).unwrap();
//! assert_eq!(mesh.num_faces(), 6);
//!
//! // Collapse it again.
//! let partition = collect_strips(&mesh).unwrap();
//! delete_strip(&mut mesh, &partition, added.strip).unwrap();
//! assert_eq!(mesh.num_faces(), 4);
//! ```
//!
//! ## Densification
//!
//! ```
//! use quadrille::densify::CoarseMesh;
//! use quadrille::mesh::builder::grid;
//!
//! let mut coarse = CoarseMesh::new(grid(2, 2)).unwrap();
//! coarse.densities_from_target_length(0.5).unwrap();
//! let fine = coarse.densify().unwrap();
//! assert_eq!(fine.num_faces(), 16);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod densify;
pub mod error;
pub mod explore;
pub mod grammar;
pub mod mesh;
pub mod progress;
pub mod strip;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use quadrille::prelude::*;
/// ```
pub mod prelude {
    pub use crate::densify::CoarseMesh;
    pub use crate::error::{MeshError, Result};
    pub use crate::grammar::{add_strip, delete_strip, delete_strips, split_strip, AddedStrip};
    pub use crate::mesh::{Face, FaceId, Polyedge, QuadMesh, StripId, Vertex, VertexId};
    pub use crate::strip::{collect_strips, trace_strip, Strip, StripPartition};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
