//! Half-space descriptors for plane clipping.
//!
//! A plane is stored as a unit normal `n` and a signed distance `d` from the
//! origin; the signed distance of a point `p` is `n·p + d`. Clipping retains
//! the **positive** half-space `{ p : n·p + d ≥ 0 }` — everything below the
//! plane is cut away.
//!
//! Planes carry an integer id. When a clip pass creates a vertex, the
//! clipping plane's id is recorded in that vertex's clip set, which lets
//! callers trace which cut produced which piece of boundary. The id defaults
//! to [`UNLABELED`], which is never written into clip sets.

use glam::{DVec2, DVec3};

/// Sentinel plane id meaning "no label". Never propagated into vertex clip
/// sets.
pub const UNLABELED: i32 = i32::MIN;

/// A clipping plane in two dimensions (a directed line).
///
/// The normal is assumed to be unit length; the constructors debug-assert
/// this but never renormalize.
#[derive(Clone, Copy, Debug)]
pub struct Plane2 {
    /// Unit normal pointing into the retained half-space.
    pub normal: DVec2,
    /// Signed distance from the origin to the plane.
    pub dist: f64,
    /// Label propagated into the clip sets of vertices this plane creates.
    pub id: i32,
}

impl Plane2 {
    /// Create an unlabeled plane from a signed origin distance and a unit
    /// normal.
    #[must_use]
    pub fn new(dist: f64, normal: DVec2) -> Self {
        debug_assert!(
            (normal.length() - 1.0).abs() < 1e-9,
            "plane normal must be unit length"
        );
        Self {
            normal,
            dist,
            id: UNLABELED,
        }
    }

    /// Create an unlabeled plane passing through `point` with the given unit
    /// normal, so that `signed_distance(point) == 0`.
    #[must_use]
    pub fn through_point(point: DVec2, normal: DVec2) -> Self {
        Self::new(-point.dot(normal), normal)
    }

    /// Attach an id to the plane.
    #[must_use]
    pub const fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Signed distance of `point` from the plane: positive above (retained),
    /// negative below (clipped).
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, point: DVec2) -> f64 {
        self.normal.dot(point) + self.dist
    }
}

/// Geometric equality: same normal and distance, bitwise on the doubles.
/// The id is a label and does not participate.
impl PartialEq for Plane2 {
    fn eq(&self, other: &Self) -> bool {
        self.normal == other.normal && self.dist == other.dist
    }
}

/// Planes order by signed origin distance, so a plane list can be sorted
/// nearest-cut-first.
impl PartialOrd for Plane2 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.dist.partial_cmp(&other.dist)
    }
}

/// A clipping plane in three dimensions.
///
/// Same conventions as [`Plane2`]: unit normal pointing into the retained
/// half-space, `signed_distance(p) = normal·p + dist`.
#[derive(Clone, Copy, Debug)]
pub struct Plane3 {
    /// Unit normal pointing into the retained half-space.
    pub normal: DVec3,
    /// Signed distance from the origin to the plane.
    pub dist: f64,
    /// Label propagated into the clip sets of vertices this plane creates.
    pub id: i32,
}

impl Plane3 {
    /// Create an unlabeled plane from a signed origin distance and a unit
    /// normal.
    #[must_use]
    pub fn new(dist: f64, normal: DVec3) -> Self {
        debug_assert!(
            (normal.length() - 1.0).abs() < 1e-9,
            "plane normal must be unit length"
        );
        Self {
            normal,
            dist,
            id: UNLABELED,
        }
    }

    /// Create an unlabeled plane passing through `point` with the given unit
    /// normal.
    #[must_use]
    pub fn through_point(point: DVec3, normal: DVec3) -> Self {
        Self::new(-point.dot(normal), normal)
    }

    /// Attach an id to the plane.
    #[must_use]
    pub const fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    /// Signed distance of `point` from the plane: positive above (retained),
    /// negative below (clipped).
    #[inline]
    #[must_use]
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) + self.dist
    }
}

impl PartialEq for Plane3 {
    fn eq(&self, other: &Self) -> bool {
        self.normal == other.normal && self.dist == other.dist
    }
}

impl PartialOrd for Plane3 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.dist.partial_cmp(&other.dist)
    }
}

/// Where the segment `a → b` crosses the plane, given the endpoints' signed
/// distances `da ≥ 0 > db` (or the reverse).
///
/// The interpolation parameter `t = da / (da − db)` is clamped to the
/// segment. When the denominator underflows relative to the endpoint
/// distances the segment lies in the plane to machine precision; the
/// crossing then degenerates to `a`, introducing no new geometry.
#[inline]
pub(crate) fn segment_crossing2(a: DVec2, b: DVec2, da: f64, db: f64) -> DVec2 {
    let denom = da - db;
    if denom.abs() <= f64::EPSILON * da.abs().max(db.abs()) {
        return a;
    }
    let t = (da / denom).clamp(0.0, 1.0);
    a + t * (b - a)
}

/// Three-dimensional counterpart of [`segment_crossing2`].
#[inline]
pub(crate) fn segment_crossing3(a: DVec3, b: DVec3, da: f64, db: f64) -> DVec3 {
    let denom = da - db;
    if denom.abs() <= f64::EPSILON * da.abs().max(db.abs()) {
        return a;
    }
    let t = (da / denom).clamp(0.0, 1.0);
    a + t * (b - a)
}
