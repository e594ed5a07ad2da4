//! Topology validation errors.
//!
//! The clipping core has no recoverable runtime errors: clipping pathological
//! input yields an empty polytope rather than failing. What *can* go wrong is
//! the caller handing over a vertex/neighbor graph that violates the
//! documented preconditions. [`Polygon::validate`](crate::Polygon::validate)
//! and [`Polyhedron::validate`](crate::Polyhedron::validate) check those
//! invariants and report the first violation found.

use crate::VertexIdx;

/// Inconsistencies in a polytope's vertex/neighbor graph.
///
/// These indicate invalid input or a bug upstream; the clipping and query
/// routines assume a graph for which `validate()` returns `Ok`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TopologyError {
    /// A neighbor index points outside the vertex array.
    NeighborOutOfBounds {
        vertex: VertexIdx,
        neighbor: VertexIdx,
    },
    /// `neighbor` appears in `vertex`'s neighbor list, but not vice versa.
    AsymmetricEdge {
        vertex: VertexIdx,
        neighbor: VertexIdx,
    },
    /// A 2D vertex whose `prev`/`next` links are not mutually inverse.
    BrokenLink { vertex: VertexIdx },
    /// Walking `next` pointers from `start` does not close into a simple
    /// loop over its connected component.
    UnclosedLoop { start: VertexIdx },
    /// A 3D vertex with fewer neighbors than a polyhedron vertex requires.
    DegreeTooSmall { vertex: VertexIdx, degree: usize },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NeighborOutOfBounds { vertex, neighbor } => {
                write!(
                    f,
                    "Vertex {vertex:?} references out-of-bounds neighbor {neighbor:?}"
                )
            }
            Self::AsymmetricEdge { vertex, neighbor } => {
                write!(
                    f,
                    "Edge {vertex:?} → {neighbor:?} has no reciprocal entry"
                )
            }
            Self::BrokenLink { vertex } => {
                write!(f, "Vertex {vertex:?} has non-inverse prev/next links")
            }
            Self::UnclosedLoop { start } => {
                write!(f, "Loop from {start:?} does not close over its component")
            }
            Self::DegreeTooSmall { vertex, degree } => {
                write!(f, "Vertex {vertex:?} has only {degree} neighbors (need ≥3)")
            }
        }
    }
}

impl std::error::Error for TopologyError {}
