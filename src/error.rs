//! Error types for quadrille.
//!
//! This module defines all error types used throughout the library.
//!
//! Precondition violations (an invalid polyedge, a non-quad face handed to a
//! strip operation, a zero density) fail fast with a typed error before any
//! mutation is applied. Topological postconditions are deliberately *not*
//! checked by the grammar operations themselves; exploration code validates
//! candidate edits on disposable clones instead.

use thiserror::Error;

use crate::mesh::{FaceId, StripId, VertexId};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh and strip operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index in the input list.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has too few vertices or repeats a vertex consecutively.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index in the input list.
        face: usize,
    },

    /// Two faces claim the same directed edge (inconsistent orientation or
    /// non-manifold input).
    #[error("directed edge ({u:?}, {v:?}) is claimed by more than one face")]
    NonManifoldEdge {
        /// First vertex of the edge.
        u: VertexId,
        /// Second vertex of the edge.
        v: VertexId,
    },

    /// A vertex id does not exist in the mesh.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(VertexId),

    /// A face id does not exist in the mesh.
    #[error("unknown face {0:?}")]
    UnknownFace(FaceId),

    /// A strip id does not exist in the partition.
    #[error("unknown strip {0:?}")]
    UnknownStrip(StripId),

    /// A vertex pair is not an edge of the mesh.
    #[error("({u:?}, {v:?}) is not an edge of the mesh")]
    UnknownEdge {
        /// First vertex of the pair.
        u: VertexId,
        /// Second vertex of the pair.
        v: VertexId,
    },

    /// A strip operation reached a face that is neither a quad nor a valid
    /// pseudo-quad.
    #[error("face {0:?} is not a quad or pseudo-quad")]
    NotQuadFace(FaceId),

    /// A face declares a pole that is not one of its vertices, or declares a
    /// pole without being a triangle.
    #[error("face {0:?} has an invalid pole")]
    InvalidPole(FaceId),

    /// A polyedge has fewer than two vertices.
    #[error("polyedge has fewer than one edge")]
    PolyedgeTooShort,

    /// A closed polyedge has fewer than three edges and cannot separate two
    /// sides.
    #[error("closed polyedge with {edges} edges is degenerate")]
    ClosedPolyedgeTooShort {
        /// The number of edges in the polyedge.
        edges: usize,
    },

    /// Two consecutive polyedge vertices are not connected by a mesh edge.
    #[error("polyedge vertices {u:?} and {v:?} are not connected by an edge")]
    PolyedgeNotConnected {
        /// The first vertex of the disconnected pair.
        u: VertexId,
        /// The second vertex of the disconnected pair.
        v: VertexId,
    },

    /// A polyedge repeats a vertex where repetition is not allowed.
    #[error("polyedge repeats vertex {0:?}")]
    PolyedgeRepeatedVertex(VertexId),

    /// An open polyedge for strip addition must start and end on the mesh
    /// boundary.
    #[error("open polyedge endpoint {0:?} is not on the mesh boundary")]
    PolyedgeEndpointNotOnBoundary(VertexId),

    /// A strip density must be a positive integer.
    #[error("strip {strip:?} has zero density")]
    ZeroDensity {
        /// The offending strip.
        strip: StripId,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// The agent cursor does not sit on a mesh edge.
    #[error("agent cursor ({tail:?}, {head:?}) is not on a mesh edge")]
    CursorOffMesh {
        /// Cursor tail vertex.
        tail: VertexId,
        /// Cursor head vertex.
        head: VertexId,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}
