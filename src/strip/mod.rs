//! The strip model.
//!
//! This module partitions a quad mesh into strips: equivalence classes of
//! edges under the opposite-edge relation, traced face to face until a
//! boundary, a pole, or a closed loop is reached.
//!
//! # Overview
//!
//! - [`face_opposite_edge`]: the opposite edge of a directed edge within
//!   its quad or pseudo-quad face
//! - [`trace_strip`]: the maximal strip through a seed edge
//! - [`collect_strips`]: the full edge partition as a [`StripPartition`]
//! - [`crossing_graph`]: strip adjacency through shared faces
//!
//! Strip identity is stable under mesh cloning but is invalidated by any
//! topological edit; recompute the partition after every grammar operation.
//!
//! # Example
//!
//! ```
//! use quadrille::mesh::builder::grid;
//! use quadrille::strip::collect_strips;
//!
//! // A 3x3 vertex grid has two horizontal and two vertical strips.
//! let mesh = grid(2, 2);
//! let partition = collect_strips(&mesh).unwrap();
//! assert_eq!(partition.num_strips(), 4);
//! ```

mod graph;
mod trace;

pub(crate) use trace::edge_key;

pub use graph::crossing_graph;
pub use trace::{collect_strips, face_opposite_edge, trace_strip, Strip, StripPartition};
