//! # `planeclip`
//!
//! In-place clipping of faceted volumes — polygons in 2D, polyhedra in 3D —
//! against arbitrary half-space planes, with integrated moments and simplex
//! decomposition. Built for conservative remeshing and voxelization
//! pipelines, where source geometry is intersected with target mesh cells
//! and every fragment's volume and centroid must be carried forward exactly.
//!
//! ## What is this?
//!
//! A polytope here is an implicit graph of vertices: each vertex stores its
//! position and the indices of its neighbors, and in 3D the *cyclic order*
//! of each neighbor ring encodes the faces. Clipping against a plane
//! rewrites that graph destructively — classifying vertices, splicing
//! crossing vertices into straddling edges, sealing the cut with a cap, and
//! pruning everything below — using only finite-precision arithmetic and
//! caller-chosen tolerances.
//!
//! ## Quick Start
//!
//! ```rust
//! use planeclip::{Plane3, Polyhedron};
//! use glam::DVec3;
//!
//! // Unit cube: positions plus neighbor rings, counter-clockwise as seen
//! // from outside the solid.
//! let positions = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//!     DVec3::new(0.0, 0.0, 1.0),
//!     DVec3::new(1.0, 0.0, 1.0),
//!     DVec3::new(1.0, 1.0, 1.0),
//!     DVec3::new(0.0, 1.0, 1.0),
//! ];
//! let rings = vec![
//!     vec![1, 4, 3],
//!     vec![5, 0, 2],
//!     vec![3, 6, 1],
//!     vec![7, 2, 0],
//!     vec![5, 7, 0],
//!     vec![1, 6, 4],
//!     vec![5, 2, 7],
//!     vec![4, 6, 3],
//! ];
//! let mut cube = Polyhedron::new(&positions, &rings);
//!
//! // Keep the half with x >= 0.5.
//! cube.clip(&[Plane3::through_point(DVec3::new(0.5, 0.0, 0.0), DVec3::X)]);
//!
//! let (volume, first_moment) = cube.moments();
//! assert!((volume - 0.5).abs() < 1e-12);
//! let centroid = first_moment / volume;
//! assert!((centroid - DVec3::new(0.75, 0.5, 0.5)).length() < 1e-12);
//! ```
//!
//! ## Key Features
//!
//! - **In-place clipping** by ordered plane lists, 2D and 3D, convex or
//!   non-convex input; fully clipped-away volumes become empty polytopes
//!   rather than errors
//! - **Exact bookkeeping**: signed moments (area/volume + first moment) by
//!   the divergence-theorem sums, so fragment moments always add up
//! - **Clip labelling**: plane ids propagate into the vertices they create,
//!   and [`Polyhedron::common_face_clips`] identifies the cap faces a clip
//!   cut open
//! - **Degenerate collapse**: tolerance-driven edge contraction that scrubs
//!   coincident vertices and squeezed-shut faces, idempotently
//! - **Simplex decomposition** into triangles / tetrahedra with signed
//!   volumes preserved
//!
//! ## When NOT to Use
//!
//! - Exact (rational) arithmetic requirements — everything here is `f64`
//!   with tolerances
//! - Boolean operations between two arbitrary polyhedra — only plane
//!   half-space intersection is provided
//! - Self-intersecting input — the graph must describe a valid simple
//!   polytope
//!
//! ## Algorithm
//!
//! The clipping scheme follows the exact conservative-remeshing approach of
//! Powell & Abel (2015): per plane, classify vertices by signed distance,
//! interpolate crossing vertices on straddling edges, re-link the boundary
//! (2D) or walk the sliced faces to seal a cap (3D), then prune and compact.

#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod plane;
mod polygon;
mod polyhedron;

pub use error::TopologyError;
pub use plane::{Plane2, Plane3, UNLABELED};
pub use polygon::{Polygon, Vertex2};
pub use polyhedron::{Polyhedron, Vertex3};

/// Index into a polytope's vertex array.
///
/// Indices are stable while a single operation runs but may be remapped
/// between operations (clipping compacts the array); treat them as handles
/// into the polytope you got them from, at the time you got them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIdx(pub usize);

/// Re-export the glam types used in the public API.
pub mod math {
    pub use glam::{DVec2, DVec3};
}
