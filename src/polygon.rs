//! Polygons as doubly linked vertex loops, clipped in place by half-planes.
//!
//! A [`Polygon`] stores its boundary as an index-linked cycle: every vertex
//! carries `prev`/`next` indices into the same vertex array, ordered
//! counter-clockwise. There is no separate face list — the loop *is* the
//! face, and non-convex polygons clipped into several pieces simply become
//! several disjoint loops in one vertex array.
//!
//! Clipping walks the loop once per plane: vertices are classified against
//! the plane, crossing vertices are spliced into the straddling edges, the
//! submerged chains are cut out, and the array is compacted. All of it is
//! O(vertices) per plane with no allocation beyond the new crossings.

use std::collections::BTreeSet;
use std::fmt;

use glam::DVec2;
use itertools::Itertools;

use crate::VertexIdx;
use crate::error::TopologyError;
use crate::plane::{Plane2, UNLABELED, segment_crossing2};

/// Placeholder for a link that has not been wired up yet. Only ever present
/// mid-way through a clip pass.
const UNLINKED: VertexIdx = VertexIdx(usize::MAX);

/// A polygon vertex.
///
/// `comp` is the clip classification flag: `+1` for a live vertex, `-1` for
/// one marked removed (only observable inside a mutation; the array is
/// compacted before any operation returns). `id` is a scratch field for
/// callers that need to number vertices during export; the core initializes
/// it to `-1` and never reads it. `clips` records the ids of the planes that
/// created this vertex.
#[derive(Clone, Debug)]
pub struct Vertex2 {
    pub position: DVec2,
    /// Incoming boundary edge: the vertex whose `next` is this one.
    pub prev: VertexIdx,
    /// Outgoing boundary edge.
    pub next: VertexIdx,
    pub comp: i32,
    pub id: i32,
    pub clips: BTreeSet<i32>,
}

/// Equality ignores the clip set: two vertices are the same if they agree on
/// position (bitwise), links, classification, and scratch id.
impl PartialEq for Vertex2 {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.prev == other.prev
            && self.next == other.next
            && self.comp == other.comp
            && self.id == other.id
    }
}

/// A polygon (or several disjoint polygon loops) held as one vertex array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    verts: Vec<Vertex2>,
}

impl Polygon {
    /// Build a polygon from positions and per-vertex `[prev, next]` links.
    ///
    /// The links must describe counter-clockwise loops covering every vertex.
    /// Beyond bounds checks (debug builds) no topological validation is
    /// performed; run [`validate`](Self::validate) when the input is suspect.
    ///
    /// # Panics
    /// Panics if `positions` and `neighbors` differ in length.
    #[must_use]
    pub fn new(positions: &[DVec2], neighbors: &[[usize; 2]]) -> Self {
        let verts = positions
            .iter()
            .zip_eq(neighbors)
            .map(|(&position, &[prev, next])| {
                debug_assert!(
                    prev < positions.len() && next < positions.len(),
                    "neighbor index out of bounds"
                );
                Vertex2 {
                    position,
                    prev: VertexIdx(prev),
                    next: VertexIdx(next),
                    comp: 1,
                    id: -1,
                    clips: BTreeSet::new(),
                }
            })
            .collect();
        Self { verts }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Returns `true` if the polygon has been clipped away entirely.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Returns the vertex at `idx`, or `None` if out of bounds.
    #[must_use]
    pub fn vertex(&self, idx: VertexIdx) -> Option<&Vertex2> {
        self.verts.get(idx.0)
    }

    /// Iterates over all vertices with their indices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexIdx, &Vertex2)> {
        self.verts
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexIdx(i), v))
    }

    // CLIPPING

    /// Intersect the polygon with each plane's positive half-space, in order.
    ///
    /// Planes are applied one at a time; a plane that all vertices already
    /// satisfy is a no-op, and a plane below which the whole polygon lies
    /// empties it. Plane order is part of the contract: results for
    /// different orders agree only to floating-point tolerance.
    pub fn clip(&mut self, planes: &[Plane2]) {
        for plane in planes {
            if self.verts.is_empty() {
                return;
            }
            self.clip_once(plane);
        }
    }

    fn clip_once(&mut self, plane: &Plane2) {
        // Classify. Ties (signed distance exactly 0) survive.
        let mut any_above = false;
        let mut any_below = false;
        let mut dist = Vec::with_capacity(self.verts.len());
        for v in &mut self.verts {
            let d = plane.signed_distance(v.position);
            v.comp = if d >= 0.0 { 1 } else { -1 };
            if v.comp == 1 {
                any_above = true;
            } else {
                any_below = true;
            }
            dist.push(d);
        }
        if !any_below {
            return;
        }
        if !any_above {
            self.verts.clear();
            return;
        }

        // Splice a crossing vertex into every straddling edge. Entries (the
        // boundary re-surfacing) get their `next` wired immediately; exits
        // (the boundary submerging) remember where the submerged chain
        // starts and are linked up afterwards.
        let nverts0 = self.verts.len();
        let mut exits: Vec<(VertexIdx, VertexIdx)> = Vec::new();
        for i in 0..nverts0 {
            if self.verts[i].comp < 0 {
                continue;
            }
            let prev = self.verts[i].prev;
            if self.verts[prev.0].comp < 0 {
                let n = self.push_crossing(VertexIdx(i), prev, plane, dist[i], dist[prev.0]);
                self.verts[n.0].next = VertexIdx(i);
                self.verts[i].prev = n;
            }
            let next = self.verts[i].next;
            if self.verts[next.0].comp < 0 {
                let n = self.push_crossing(VertexIdx(i), next, plane, dist[i], dist[next.0]);
                self.verts[n.0].prev = VertexIdx(i);
                self.verts[i].next = n;
                exits.push((n, next));
            }
        }

        // Each exit connects to the entry at the far end of its submerged
        // chain. Below-side vertices still hold their original links, so the
        // chain can be walked; the above-side vertex it surfaces at already
        // had its `prev` replaced by the entry crossing.
        for (exit, chain_start) in exits {
            let mut cur = chain_start;
            while self.verts[cur.0].comp < 0 {
                cur = self.verts[cur.0].next;
            }
            let entry = self.verts[cur.0].prev;
            self.verts[exit.0].next = entry;
            self.verts[entry.0].prev = exit;
        }

        self.compact();
    }

    /// Append the crossing vertex for the edge from `above` to `below`.
    ///
    /// The new vertex is seeded with the clipping plane's id (unless
    /// unlabeled) plus every id the two endpoints share, and classified
    /// above. Links are wired by the caller.
    fn push_crossing(
        &mut self,
        above: VertexIdx,
        below: VertexIdx,
        plane: &Plane2,
        d_above: f64,
        d_below: f64,
    ) -> VertexIdx {
        let position = segment_crossing2(
            self.verts[above.0].position,
            self.verts[below.0].position,
            d_above,
            d_below,
        );
        let mut clips = BTreeSet::new();
        if plane.id != UNLABELED {
            clips.insert(plane.id);
        }
        clips.extend(
            self.verts[above.0]
                .clips
                .intersection(&self.verts[below.0].clips),
        );
        let idx = VertexIdx(self.verts.len());
        self.verts.push(Vertex2 {
            position,
            prev: UNLINKED,
            next: UNLINKED,
            comp: 1,
            id: -1,
            clips,
        });
        idx
    }

    /// Erase vertices marked removed and rewrite the survivors' links
    /// through the index remap.
    fn compact(&mut self) {
        let mut remap = vec![usize::MAX; self.verts.len()];
        let mut n = 0;
        for (i, v) in self.verts.iter().enumerate() {
            if v.comp >= 0 {
                remap[i] = n;
                n += 1;
            }
        }
        self.verts.retain(|v| v.comp >= 0);
        for v in &mut self.verts {
            v.prev = VertexIdx(remap[v.prev.0]);
            v.next = VertexIdx(remap[v.next.0]);
        }
    }

    // DEGENERATE COLLAPSE

    /// Merge vertices joined by edges no longer than `tol`, dropping any
    /// loops that collapse entirely.
    ///
    /// The merged vertex keeps the smaller index, that endpoint's position,
    /// and the union of both clip sets. With `tol = 0` only coincident
    /// vertices (as produced by a clip plane passing exactly through a
    /// vertex) and self-loops are removed. The operation is idempotent.
    pub fn collapse_degenerates(&mut self, tol: f64) {
        let tol2 = tol * tol;
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.verts.len() {
                if self.verts[i].comp < 0 {
                    continue;
                }
                let j = self.verts[i].next;
                if j.0 == i {
                    self.verts[i].comp = -1;
                    changed = true;
                    continue;
                }
                let d2 =
                    (self.verts[j.0].position - self.verts[i].position).length_squared();
                if d2 > tol2 {
                    continue;
                }
                if self.verts[i].prev == j {
                    // Two-vertex loop with a short edge: nothing survives.
                    self.verts[i].comp = -1;
                    self.verts[j.0].comp = -1;
                    changed = true;
                    continue;
                }
                let (keep, drop) = if i < j.0 { (i, j.0) } else { (j.0, i) };
                let dropped = std::mem::take(&mut self.verts[drop].clips);
                self.verts[keep].clips.extend(dropped);
                if keep == i {
                    let b = self.verts[j.0].next;
                    self.verts[i].next = b;
                    self.verts[b.0].prev = VertexIdx(i);
                } else {
                    let a = self.verts[i].prev;
                    self.verts[j.0].prev = a;
                    self.verts[a.0].next = j;
                }
                self.verts[drop].comp = -1;
                changed = true;
            }
        }
        self.compact();
    }

    // MOMENTS & DECOMPOSITION

    /// Signed area and first moment (integral of position over the region).
    ///
    /// Dividing the first moment by the area gives the centroid. Both sums
    /// are accumulated relative to the first vertex and shifted back, which
    /// keeps the cancellation error small for polygons far from the origin.
    /// Counter-clockwise loops have positive area; holes and inverted loops
    /// contribute negatively, so multi-loop results stay consistent.
    #[must_use]
    pub fn moments(&self) -> (f64, DVec2) {
        if self.verts.is_empty() {
            return (0.0, DVec2::ZERO);
        }
        let origin = self.verts[0].position;
        let mut m0 = 0.0;
        let mut m1 = DVec2::ZERO;
        for v in &self.verts {
            let a = v.position - origin;
            let b = self.verts[v.next.0].position - origin;
            let cross = a.perp_dot(b);
            m0 += cross;
            m1 += cross * (a + b);
        }
        m0 *= 0.5;
        m1 /= 6.0;
        m1 += m0 * origin;
        (m0, m1)
    }

    /// Recover the boundary loops: one cyclic vertex sequence per connected
    /// component, in discovery order.
    #[must_use]
    pub fn extract_faces(&self) -> Vec<Vec<VertexIdx>> {
        let mut faces = Vec::new();
        let mut visited = vec![false; self.verts.len()];
        for start in 0..self.verts.len() {
            if visited[start] {
                continue;
            }
            let mut face = Vec::new();
            let mut cur = start;
            loop {
                visited[cur] = true;
                face.push(VertexIdx(cur));
                cur = self.verts[cur].next.0;
                if cur == start {
                    break;
                }
            }
            faces.push(face);
        }
        faces
    }

    /// For each face, the plane ids shared by *all* of its vertices.
    ///
    /// A face whose vertices were all cut by plane `P` reports a set
    /// containing `P` — the caller's signal that the face is a cap produced
    /// by that clip.
    #[must_use]
    pub fn common_face_clips(&self, faces: &[Vec<VertexIdx>]) -> Vec<BTreeSet<i32>> {
        faces
            .iter()
            .map(|face| {
                let mut vs = face.iter().map(|&v| &self.verts[v.0].clips);
                let first = vs.next().cloned().unwrap_or_default();
                vs.fold(first, |common, clips| {
                    common.intersection(clips).copied().collect()
                })
            })
            .collect()
    }

    /// Fan-triangulate every face loop from its first vertex, omitting
    /// triangles whose area magnitude is at most `tol`.
    ///
    /// The disjoint union of the triangles reproduces the polygon; signed
    /// areas are preserved, so the triangle areas sum to the polygon area
    /// even for non-convex loops.
    #[must_use]
    pub fn split_into_triangles(&self, tol: f64) -> Vec<[VertexIdx; 3]> {
        let mut tris = Vec::new();
        for face in self.extract_faces() {
            if face.len() < 3 {
                continue;
            }
            let p0 = self.verts[face[0].0].position;
            for k in 1..face.len() - 1 {
                let (b, c) = (face[k], face[k + 1]);
                let area = 0.5
                    * (self.verts[b.0].position - p0).perp_dot(self.verts[c.0].position - p0);
                if area.abs() > tol {
                    tris.push([face[0], b, c]);
                }
            }
        }
        tris
    }

    // VALIDATION

    /// Check the vertex/neighbor graph invariants: links in bounds,
    /// `prev`/`next` mutually inverse, and `next` pointers forming closed
    /// loops that partition the vertex set.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let n = self.verts.len();
        for (i, v) in self.verts.iter().enumerate() {
            for nb in [v.prev, v.next] {
                if nb.0 >= n {
                    return Err(TopologyError::NeighborOutOfBounds {
                        vertex: VertexIdx(i),
                        neighbor: nb,
                    });
                }
            }
            if self.verts[v.next.0].prev.0 != i || self.verts[v.prev.0].next.0 != i {
                return Err(TopologyError::BrokenLink {
                    vertex: VertexIdx(i),
                });
            }
        }
        let mut visited = vec![false; n];
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut cur = start;
            loop {
                visited[cur] = true;
                cur = self.verts[cur].next.0;
                if cur == start {
                    break;
                }
                if visited[cur] {
                    return Err(TopologyError::UnclosedLoop {
                        start: VertexIdx(start),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Deterministic per-vertex dump, one line per vertex, suitable for diffing
/// in tests.
impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Polygon[{}]", self.verts.len())?;
        for (i, v) in self.verts.iter().enumerate() {
            writeln!(
                f,
                "{i:4}: pos=({}, {}) prev={} next={} comp={} id={} clips={{{}}}",
                v.position.x,
                v.position.y,
                v.prev.0,
                v.next.0,
                v.comp,
                v.id,
                v.clips.iter().join(", "),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    /// Unit square, counter-clockwise.
    fn unit_square() -> Polygon {
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ];
        let neighbors = [[3, 1], [0, 2], [1, 3], [2, 0]];
        Polygon::new(&positions, &neighbors)
    }

    /// 4×2 rectangle with a triangular notch cut into its top edge
    /// (non-convex, 7 vertices).
    fn notched_rectangle() -> Polygon {
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 2.0),
            DVec2::new(3.0, 2.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 2.0),
            DVec2::new(0.0, 2.0),
        ];
        let neighbors = [[6, 1], [0, 2], [1, 3], [2, 4], [3, 5], [4, 6], [5, 0]];
        Polygon::new(&positions, &neighbors)
    }

    #[test]
    fn test_unit_square_moments() {
        let square = unit_square();
        square.validate().unwrap();
        let (area, first) = square.moments();
        assert!((area - 1.0).abs() < EPS);
        assert!((first - DVec2::new(0.5, 0.5)).length() < EPS);
    }

    #[test]
    fn test_clip_half_square() {
        let mut poly = unit_square();
        poly.clip(&[Plane2::through_point(DVec2::new(0.5, 0.0), DVec2::X)]);
        poly.validate().unwrap();
        assert_eq!(poly.len(), 4);
        let (area, first) = poly.moments();
        assert!((area - 0.5).abs() < EPS);
        assert!((first - DVec2::new(0.375, 0.25)).length() < EPS);
        // Every surviving vertex satisfies the half-plane.
        for (_, v) in poly.vertices() {
            assert!(v.position.x >= 0.5 - EPS);
        }
    }

    #[test]
    fn test_clip_diagonal_through_center() {
        let mut poly = unit_square();
        let nhat = DVec2::new(1.0, 1.0).normalize();
        poly.clip(&[Plane2::through_point(DVec2::new(0.5, 0.5), nhat)]);
        poly.validate().unwrap();
        let (area, first) = poly.moments();
        assert!((area - 0.5).abs() < EPS);
        let centroid = first / area;
        assert!((centroid - DVec2::new(2.0 / 3.0, 2.0 / 3.0)).length() < 1e-10);
    }

    #[test]
    fn test_clip_corner() {
        let mut poly = unit_square();
        let nhat = DVec2::new(1.0, 1.0).normalize();
        poly.clip(&[Plane2::through_point(DVec2::new(0.75, 0.75), nhat)]);
        poly.validate().unwrap();
        assert_eq!(poly.len(), 3);
        let (area, first) = poly.moments();
        assert!((area - 0.125).abs() < EPS);
        let centroid = first / area;
        assert!((centroid - DVec2::new(5.0 / 6.0, 5.0 / 6.0)).length() < 1e-10);
    }

    #[test]
    fn test_clip_miss_is_noop() {
        let mut poly = unit_square();
        let before = poly.clone();
        poly.clip(&[Plane2::through_point(DVec2::new(-1.0, 0.0), DVec2::X)]);
        assert_eq!(poly, before);
    }

    #[test]
    fn test_clip_everything_empties() {
        let mut poly = unit_square();
        poly.clip(&[Plane2::through_point(DVec2::new(2.0, 0.0), DVec2::X)]);
        assert!(poly.is_empty());
        assert_eq!(poly.moments(), (0.0, DVec2::ZERO));
        assert!(poly.extract_faces().is_empty());
        assert!(poly.split_into_triangles(0.0).is_empty());
    }

    #[test]
    fn test_clip_nonconvex_notch() {
        // The plane cuts across the notch; crossings pair up along the
        // boundary walk, leaving one pinched loop whose signed area is still
        // exact: strip 4 × 0.5 minus the notch part above the plane.
        let mut poly = notched_rectangle();
        poly.clip(&[Plane2::through_point(DVec2::new(0.0, 1.5), DVec2::Y)]);
        poly.validate().unwrap();
        let faces = poly.extract_faces();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].len(), 8);
        let (area, _) = poly.moments();
        assert!((area - 1.25).abs() < EPS);
    }

    #[test]
    fn test_clip_conserves_area_across_partition() {
        let poly = notched_rectangle();
        let (area0, first0) = poly.moments();
        let p = DVec2::new(1.7, 0.9);
        let nhat = DVec2::new(0.6, 0.8);
        let mut upper = poly.clone();
        let mut lower = poly.clone();
        upper.clip(&[Plane2::through_point(p, nhat)]);
        lower.clip(&[Plane2::through_point(p, -nhat)]);
        let (a1, f1) = upper.moments();
        let (a2, f2) = lower.moments();
        assert!((a1 + a2 - area0).abs() < 1e-10);
        assert!((f1 + f2 - first0).length() < 1e-10);
    }

    #[test]
    fn test_clip_labels_crossings() {
        let mut poly = unit_square();
        poly.clip(&[Plane2::through_point(DVec2::new(0.5, 0.0), DVec2::X).with_id(7)]);
        let labeled: Vec<_> = poly
            .vertices()
            .filter(|(_, v)| v.clips.contains(&7))
            .collect();
        assert_eq!(labeled.len(), 2);
        // Unlabeled planes must not leak the sentinel into clip sets.
        let mut poly = unit_square();
        poly.clip(&[Plane2::through_point(DVec2::new(0.5, 0.0), DVec2::X)]);
        assert!(poly.vertices().all(|(_, v)| v.clips.is_empty()));
    }

    #[test]
    fn test_crossing_inherits_shared_clips() {
        let mut poly = unit_square();
        poly.clip(&[
            Plane2::through_point(DVec2::new(0.25, 0.0), DVec2::X).with_id(1),
            Plane2::through_point(DVec2::new(0.0, 0.25), DVec2::Y).with_id(2),
        ]);
        poly.validate().unwrap();
        // The corner crossing on the second pass splits an edge whose
        // endpoints both came from plane 1, so it carries both labels.
        assert!(
            poly.vertices()
                .any(|(_, v)| v.clips.contains(&1) && v.clips.contains(&2))
        );
    }

    #[test]
    fn test_common_face_clips_on_fully_clipped_face() {
        let mut poly = unit_square();
        poly.clip(&[
            Plane2::through_point(DVec2::new(0.25, 0.0), DVec2::X).with_id(1),
            Plane2::through_point(DVec2::new(0.75, 0.0), -DVec2::X).with_id(2),
            Plane2::through_point(DVec2::new(0.0, 0.25), DVec2::Y).with_id(3),
            Plane2::through_point(DVec2::new(0.0, 0.75), -DVec2::Y).with_id(4),
        ]);
        poly.validate().unwrap();
        let faces = poly.extract_faces();
        assert_eq!(faces.len(), 1);
        // Every vertex of the inner square was created by some clip, but no
        // single plane created them all.
        let common = poly.common_face_clips(&faces);
        assert!(common[0].is_empty());
        assert!(poly.vertices().all(|(_, v)| !v.clips.is_empty()));
    }

    #[test]
    fn test_clip_through_vertex_then_collapse() {
        // Plane passes exactly through two corners: the on-plane corners
        // classify as above and spawn coincident crossings, which a
        // zero-tolerance collapse removes.
        let mut poly = unit_square();
        let nhat = DVec2::new(1.0, 1.0).normalize();
        poly.clip(&[Plane2::through_point(DVec2::new(1.0, 0.0), nhat)]);
        poly.validate().unwrap();
        let (area, _) = poly.moments();
        assert!((area - 0.5).abs() < EPS);
        poly.collapse_degenerates(0.0);
        poly.validate().unwrap();
        assert_eq!(poly.len(), 3);
        let (area, _) = poly.moments();
        assert!((area - 0.5).abs() < EPS);
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let mut poly = notched_rectangle();
        poly.clip(&[Plane2::through_point(DVec2::new(0.0, 1.999), DVec2::Y)]);
        poly.collapse_degenerates(0.05);
        let once = poly.clone();
        poly.collapse_degenerates(0.05);
        assert_eq!(poly, once);
    }

    #[test]
    fn test_collapse_merges_short_edge() {
        let positions = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1e-9),
            DVec2::new(0.0, 1.0),
        ];
        let neighbors = [[3, 1], [0, 2], [1, 3], [2, 0]];
        let mut poly = Polygon::new(&positions, &neighbors);
        poly.collapse_degenerates(1e-6);
        poly.validate().unwrap();
        assert_eq!(poly.len(), 3);
        // Smaller index wins the merged position.
        assert_eq!(poly.vertex(VertexIdx(1)).unwrap().position, positions[1]);
    }

    #[test]
    fn test_triangles_sum_to_area() {
        let poly = notched_rectangle();
        let (area, _) = poly.moments();
        let tris = poly.split_into_triangles(0.0);
        let sum: f64 = tris
            .iter()
            .map(|&[a, b, c]| {
                let pa = poly.vertex(a).unwrap().position;
                let pb = poly.vertex(b).unwrap().position;
                let pc = poly.vertex(c).unwrap().position;
                0.5 * (pb - pa).perp_dot(pc - pa)
            })
            .sum();
        assert!((sum - area).abs() < EPS);
    }

    #[test]
    fn test_display_is_deterministic() {
        let mut poly = unit_square();
        poly.clip(&[Plane2::through_point(DVec2::new(0.5, 0.0), DVec2::X).with_id(3)]);
        let a = poly.to_string();
        let b = poly.clone().to_string();
        assert_eq!(a, b);
        assert!(a.starts_with("Polygon[4]"));
        assert!(a.contains("clips={3}"));
    }

    #[test]
    fn test_validate_rejects_broken_links() {
        let mut poly = unit_square();
        poly.verts[2].next = VertexIdx(0);
        assert!(matches!(
            poly.validate(),
            Err(TopologyError::BrokenLink { .. })
        ));
        let mut poly = unit_square();
        poly.verts[1].next = VertexIdx(9);
        assert!(matches!(
            poly.validate(),
            Err(TopologyError::NeighborOutOfBounds { .. })
        ));
    }
}
