//! The strip edit grammar.
//!
//! Topological rewrite operations over the strip model:
//!
//! - [`add_strip`]: insert a new parallel strip of quads along a polyedge
//! - [`delete_strip`] / [`delete_strips`]: collapse strips, merging their
//!   rails
//! - [`split_strip`]: subdivide a strip into two parallel strips
//! - [`strips_to_split_to_preserve_boundaries`]: pre-check for deletions
//!   that would merge or collapse boundary loops
//!
//! All operations mutate a single exclusively owned [`QuadMesh`] in place
//! and invalidate any previously collected strip partition. Precondition
//! violations are rejected with a typed error before any mutation; deeper
//! topological postconditions (manifoldness, Euler characteristic,
//! boundary-loop count) are the caller's responsibility and are checked by
//! the exploration layer on disposable clones.
//!
//! [`QuadMesh`]: crate::mesh::QuadMesh
//!
//! # Example
//!
//! ```
//! use quadrille::grammar::{add_strip, delete_strip};
//! use quadrille::mesh::builder::grid;
//! use quadrille::mesh::{Polyedge, VertexId};
//! use quadrille::strip::collect_strips;
//!
//! // Thicken the middle horizontal polyedge of a 3x3 vertex grid into a
//! // new strip, then collapse it again.
//! let mut mesh = grid(2, 2);
//! let path = Polyedge::new((3..6).map(VertexId::new).collect()).unwrap();
//!
//! let added = add_strip(&mut mesh, &path).unwrap();
//! assert_eq!(mesh.num_faces(), 6);
//!
//! let partition = collect_strips(&mesh).unwrap();
//! delete_strip(&mut mesh, &partition, added.strip).unwrap();
//! assert_eq!(mesh.num_faces(), 4);
//! ```

mod add;
mod delete;
mod split;

pub use add::{add_strip, AddedStrip};
pub use delete::{
    delete_strip, delete_strips, strips_to_split_to_preserve_boundaries, VertexMerge,
};
pub use split::split_strip;
