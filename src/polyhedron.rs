//! Polyhedra as vertex/neighbor graphs, clipped in place by half-spaces.
//!
//! A [`Polyhedron`] stores no face list. Each vertex carries a cyclically
//! ordered ring of neighbor indices — counter-clockwise as seen from outside
//! the solid — and every face is implied by that ordering: consecutive ring
//! entries bound one incident face. Faces are recovered on demand by
//! [`extract_faces`](Polyhedron::extract_faces), which traces each directed
//! edge with the rule "the next vertex is the neighbor just before the one
//! you arrived from".
//!
//! ## Clipping
//!
//! One plane pass works in three phases:
//!
//! 1. **Classify** every vertex by signed distance (ties survive).
//! 2. **Splice crossings**: each above-side neighbor slot pointing below is
//!    replaced by a new vertex on the crossing edge. The new vertices' own
//!    rings are wired by walking the sliced lateral faces through the
//!    submerged chain until they resurface; the walk results pair every
//!    crossing with its successors around the cap that the plane cut open.
//! 3. **Prune**: below-side vertices are marked removed and the array is
//!    compacted through an index remap.
//!
//! Everything is index-based; a clip pass never invalidates the indices it
//! hands to itself mid-flight, and compaction only happens at the end of a
//! pass.

use std::collections::BTreeSet;
use std::fmt;

use glam::DVec3;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::VertexIdx;
use crate::error::TopologyError;
use crate::plane::{Plane3, UNLABELED, segment_crossing3};

/// A polyhedron vertex.
///
/// `neighbors` is the cyclic ring described in the module docs; its order is
/// load-bearing and must be preserved by any mutation. `comp` is the clip
/// classification flag (`+1` live, `-1` marked removed; transient within a
/// mutation only). `id` is a caller scratch field initialized to `-1` and
/// never read by the core. `clips` records the ids of the planes that
/// created this vertex.
#[derive(Clone, Debug)]
pub struct Vertex3 {
    pub position: DVec3,
    pub neighbors: Vec<VertexIdx>,
    pub comp: i32,
    pub id: i32,
    pub clips: BTreeSet<i32>,
}

/// Equality ignores the clip set: position (bitwise), ring, classification,
/// and scratch id must agree.
impl PartialEq for Vertex3 {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.neighbors == other.neighbors
            && self.comp == other.comp
            && self.id == other.id
    }
}

/// A faceted volume held as one vertex array with ring-encoded topology.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyhedron {
    verts: Vec<Vertex3>,
}

impl Polyhedron {
    /// Build a polyhedron from positions and per-vertex neighbor rings.
    ///
    /// Rings must list each vertex's neighbors counter-clockwise as seen
    /// from outside the solid. Beyond bounds checks (debug builds) no
    /// topological validation is performed; run [`validate`](Self::validate)
    /// when the input is suspect.
    ///
    /// # Panics
    /// Panics if `positions` and `neighbors` differ in length.
    #[must_use]
    pub fn new(positions: &[DVec3], neighbors: &[Vec<usize>]) -> Self {
        let verts = positions
            .iter()
            .zip_eq(neighbors)
            .map(|(&position, ring)| {
                debug_assert!(
                    ring.iter().all(|&n| n < positions.len()),
                    "neighbor index out of bounds"
                );
                Vertex3 {
                    position,
                    neighbors: ring.iter().map(|&n| VertexIdx(n)).collect(),
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

    /// Returns `true` if the polyhedron has been clipped away entirely.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Returns the vertex at `idx`, or `None` if out of bounds.
    #[must_use]
    pub fn vertex(&self, idx: VertexIdx) -> Option<&Vertex3> {
        self.verts.get(idx.0)
    }

    /// Iterates over all vertices with their indices.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexIdx, &Vertex3)> {
        self.verts
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexIdx(i), v))
    }

    /// The ring entry cyclically *before* `from` in `at`'s neighbor list.
    ///
    /// This is the face-traversal step: arriving at `at` along the directed
    /// edge `from → at`, the face continues toward the returned vertex.
    fn prev_neighbor(&self, at: usize, from: usize) -> usize {
        let ring = &self.verts[at].neighbors;
        let k = ring
            .iter()
            .position(|&x| x.0 == from)
            .expect("neighbor rings are symmetric");
        ring[(k + ring.len() - 1) % ring.len()].0
    }

    // CLIPPING

    /// Intersect the polyhedron with each plane's positive half-space, in
    /// order.
    ///
    /// A plane every vertex already satisfies is a no-op; a plane below
    /// which the whole solid lies empties it. Plane order is part of the
    /// contract: results for different orders agree only to floating-point
    /// tolerance.
    pub fn clip(&mut self, planes: &[Plane3]) {
        for plane in planes {
            if self.verts.is_empty() {
                return;
            }
            self.clip_once(plane);
        }
    }

    fn clip_once(&mut self, plane: &Plane3) {
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

        // Splice a crossing vertex into every above-side slot that points
        // below. Below-side rings keep their original indices so the cap
        // walks can still traverse them.
        let nverts0 = self.verts.len();
        let mut crossing: FxHashMap<(usize, usize), usize> = FxHashMap::default();
        let mut crossings: Vec<(usize, usize, usize)> = Vec::new(); // (new, above, below)
        for i in 0..nverts0 {
            if self.verts[i].comp < 0 {
                continue;
            }
            for s in 0..self.verts[i].neighbors.len() {
                let j = self.verts[i].neighbors[s].0;
                if self.verts[j].comp >= 0 {
                    continue;
                }
                let n = self.push_crossing(i, j, plane, dist[i], dist[j]);
                self.verts[i].neighbors[s] = VertexIdx(n);
                crossing.insert((i, j), n);
                crossings.push((n, i, j));
            }
        }

        // Walk each sliced lateral face from its crossing through the
        // submerged chain until the face resurfaces at another crossing.
        // That successor is both the crossing's follower in the clipped
        // lateral face and its ring-mate around the new cap.
        let mut cap_next: Vec<usize> = Vec::with_capacity(crossings.len());
        for &(_, i, j) in &crossings {
            let (mut u, mut v) = (i, j);
            let succ = loop {
                let w = self.prev_neighbor(v, u);
                if self.verts[w].comp >= 0 {
                    break crossing[&(w, v)];
                }
                u = v;
                v = w;
            };
            cap_next.push(succ);
        }

        // The walk results form a permutation of the crossings (one cycle
        // per cap loop); invert it to find each crossing's cap predecessor,
        // then wire the rings: successor in the lateral face, the above
        // endpoint, then the cap predecessor.
        let mut cap_prev: FxHashMap<usize, usize> = FxHashMap::default();
        for (&(n, _, _), &m) in crossings.iter().zip(&cap_next) {
            cap_prev.insert(m, n);
        }
        debug_assert_eq!(cap_prev.len(), crossings.len());
        for (&(n, i, _), &m) in crossings.iter().zip(&cap_next) {
            self.verts[n].neighbors =
                vec![VertexIdx(m), VertexIdx(i), VertexIdx(cap_prev[&n])];
        }

        self.compact();
    }

    /// Append the crossing vertex for the edge from `above` to `below`.
    ///
    /// The new vertex is seeded with the clipping plane's id (unless
    /// unlabeled) plus every id the two endpoints share, and classified
    /// above. Its ring is wired by the caller.
    fn push_crossing(
        &mut self,
        above: usize,
        below: usize,
        plane: &Plane3,
        d_above: f64,
        d_below: f64,
    ) -> usize {
        let position = segment_crossing3(
            self.verts[above].position,
            self.verts[below].position,
            d_above,
            d_below,
        );
        let mut clips = BTreeSet::new();
        if plane.id != UNLABELED {
            clips.insert(plane.id);
        }
        clips.extend(
            self.verts[above]
                .clips
                .intersection(&self.verts[below].clips),
        );
        let idx = self.verts.len();
        self.verts.push(Vertex3 {
            position,
            neighbors: Vec::new(),
            comp: 1,
            id: -1,
            clips,
        });
        idx
    }

    /// Erase vertices marked removed and rewrite the survivors' rings
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
            for nb in &mut v.neighbors {
                *nb = VertexIdx(remap[nb.0]);
            }
        }
    }

    // DEGENERATE COLLAPSE

    /// Merge vertices joined by edges no longer than `tol` and scrub the
    /// topological debris clipping can leave behind.
    ///
    /// Edge contraction keeps the smaller index, that endpoint's position,
    /// and the union of both clip sets; the dropped vertex's ring is
    /// spliced into the kept one so cyclic face order survives. After each
    /// contraction the rings are scrubbed: self-references and collapsed
    /// two-edge faces are removed, and vertices left with fewer than three
    /// neighbors are spliced out of the graph. Runs to a fixpoint, so the
    /// operation is idempotent; `tol = 0` removes only coincident vertices
    /// and the purely topological degeneracies.
    pub fn collapse_degenerates(&mut self, tol: f64) {
        let tol2 = tol * tol;
        loop {
            if self.scrub_rings() {
                continue;
            }
            if self.contract_one_edge(tol2) {
                continue;
            }
            break;
        }
        self.compact();
    }

    /// One cleanup sweep. Returns `true` if anything changed.
    fn scrub_rings(&mut self) -> bool {
        let mut changed = false;
        for i in 0..self.verts.len() {
            if self.verts[i].comp < 0 {
                continue;
            }
            // Drop entries pointing at this vertex itself or at removed
            // vertices, then collapse cyclically consecutive duplicates
            // (a two-edge face squeezed shut).
            let before = self.verts[i].neighbors.len();
            let live = |x: VertexIdx, verts: &[Vertex3]| x.0 != i && verts[x.0].comp >= 0;
            let ring: Vec<VertexIdx> = self.verts[i]
                .neighbors
                .iter()
                .copied()
                .filter(|&x| live(x, &self.verts))
                .collect();
            let ring = dedup_cyclic(ring);
            if ring.len() != before {
                changed = true;
            }
            match ring.len() {
                0 | 1 => {
                    // Nothing left to hold the vertex in the graph.
                    self.verts[i].comp = -1;
                    self.verts[i].neighbors.clear();
                    changed = true;
                }
                2 => {
                    // Pass-through vertex: connect its neighbors directly.
                    let (a, b) = (ring[0], ring[1]);
                    for nb in &mut self.verts[a.0].neighbors {
                        if nb.0 == i {
                            *nb = b;
                        }
                    }
                    for nb in &mut self.verts[b.0].neighbors {
                        if nb.0 == i {
                            *nb = a;
                        }
                    }
                    self.verts[i].comp = -1;
                    self.verts[i].neighbors.clear();
                    changed = true;
                }
                _ => {
                    self.verts[i].neighbors = ring;
                }
            }
        }
        changed
    }

    /// Contract the first edge not longer than `tol` (squared). Returns
    /// `true` if an edge was contracted.
    fn contract_one_edge(&mut self, tol2: f64) -> bool {
        for i in 0..self.verts.len() {
            if self.verts[i].comp < 0 {
                continue;
            }
            for s in 0..self.verts[i].neighbors.len() {
                let j = self.verts[i].neighbors[s].0;
                if j == i || self.verts[j].comp < 0 {
                    continue;
                }
                let d2 =
                    (self.verts[j].position - self.verts[i].position).length_squared();
                if d2 > tol2 {
                    continue;
                }
                let (keep, drop) = if i < j { (i, j) } else { (j, i) };
                self.contract(keep, drop);
                return true;
            }
        }
        false
    }

    /// Merge `drop` into `keep` along their shared edge, splicing `drop`'s
    /// ring into `keep`'s at the edge slot so the combined ring stays in
    /// face order.
    fn contract(&mut self, keep: usize, drop: usize) {
        let kpos = self.verts[keep]
            .neighbors
            .iter()
            .position(|&x| x.0 == drop)
            .expect("contracted edge must be present in both rings");
        let dpos = self.verts[drop]
            .neighbors
            .iter()
            .position(|&x| x.0 == keep)
            .expect("contracted edge must be present in both rings");

        // drop's ring, rotated to start just past keep and excluding it.
        let dropped_ring = std::mem::take(&mut self.verts[drop].neighbors);
        let splice = dropped_ring[dpos + 1..]
            .iter()
            .chain(&dropped_ring[..dpos])
            .copied()
            .collect::<Vec<_>>();
        self.verts[keep]
            .neighbors
            .splice(kpos..=kpos, splice);

        // Everything that pointed at drop now points at keep; stale
        // self-references and doubled entries are scrubbed afterwards.
        for &t in &dropped_ring {
            if t.0 == keep || self.verts[t.0].comp < 0 {
                continue;
            }
            for nb in &mut self.verts[t.0].neighbors {
                if nb.0 == drop {
                    *nb = VertexIdx(keep);
                }
            }
        }

        let dropped_clips = std::mem::take(&mut self.verts[drop].clips);
        self.verts[keep].clips.extend(dropped_clips);
        self.verts[drop].comp = -1;
    }

    // MOMENTS & DECOMPOSITION

    /// Signed volume and first moment (integral of position over the
    /// solid).
    ///
    /// Faces are fan-triangulated and each triangle forms a signed
    /// tetrahedron against the first vertex; outward-oriented faces make
    /// the signed contributions cancel correctly even for non-convex
    /// solids. Accumulation happens relative to the first vertex and is
    /// shifted back, keeping cancellation error small far from the origin.
    /// Fewer than four vertices bound no volume and give `(0, 0)`.
    #[must_use]
    pub fn moments(&self) -> (f64, DVec3) {
        if self.verts.len() < 4 {
            return (0.0, DVec3::ZERO);
        }
        let origin = self.verts[0].position;
        let mut m0 = 0.0;
        let mut m1 = DVec3::ZERO;
        for face in self.extract_faces() {
            let p0 = self.verts[face[0].0].position - origin;
            for k in 1..face.len() - 1 {
                let p1 = self.verts[face[k].0].position - origin;
                let p2 = self.verts[face[k + 1].0].position - origin;
                let dv = p0.dot(p1.cross(p2));
                m0 += dv;
                m1 += dv * (p0 + p1 + p2);
            }
        }
        m0 /= 6.0;
        m1 /= 24.0;
        m1 += m0 * origin;
        (m0, m1)
    }

    /// Recover the face loops from the neighbor rings, in discovery order.
    ///
    /// Every directed edge belongs to exactly one face; each unvisited
    /// directed edge is traced with the previous-neighbor rule until it
    /// recurs.
    #[must_use]
    pub fn extract_faces(&self) -> Vec<Vec<VertexIdx>> {
        let mut faces = Vec::new();
        let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
        for i in 0..self.verts.len() {
            for &first in &self.verts[i].neighbors {
                if visited.contains(&(i, first.0)) {
                    continue;
                }
                let mut face = Vec::new();
                let (mut u, mut v) = (i, first.0);
                loop {
                    face.push(VertexIdx(u));
                    visited.insert((u, v));
                    let w = self.prev_neighbor(v, u);
                    (u, v) = (v, w);
                    if (u, v) == (i, first.0) {
                        break;
                    }
                }
                faces.push(face);
            }
        }
        faces
    }

    /// For each face, the plane ids shared by *all* of its vertices.
    ///
    /// The cap face cut open by clipping against plane `P` consists solely
    /// of vertices `P` created, so its set contains `P`'s id.
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

    /// Decompose the solid into tetrahedra sharing vertex 0, omitting those
    /// whose volume magnitude is at most `tol`.
    ///
    /// Each face is fan-triangulated from its first vertex and joined to
    /// vertex 0. Signed volumes are preserved — for non-convex solids some
    /// tetrahedra are negatively oriented, and only the signed sum
    /// reproduces the polyhedron's volume.
    #[must_use]
    pub fn split_into_tetrahedra(&self, tol: f64) -> Vec<[VertexIdx; 4]> {
        if self.verts.len() < 4 {
            return Vec::new();
        }
        let apex = VertexIdx(0);
        let origin = self.verts[0].position;
        let mut tets = Vec::new();
        for face in self.extract_faces() {
            if face.len() < 3 {
                continue;
            }
            let a = face[0];
            let pa = self.verts[a.0].position - origin;
            for k in 1..face.len() - 1 {
                let (b, c) = (face[k], face[k + 1]);
                let pb = self.verts[b.0].position - origin;
                let pc = self.verts[c.0].position - origin;
                let vol = pa.dot(pb.cross(pc)) / 6.0;
                if vol.abs() > tol {
                    tets.push([apex, a, b, c]);
                }
            }
        }
        tets
    }

    // VALIDATION

    /// Check the vertex/neighbor graph invariants: ring entries in bounds,
    /// every edge reciprocated, and every vertex of degree at least three.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let n = self.verts.len();
        for (i, v) in self.verts.iter().enumerate() {
            if v.neighbors.len() < 3 {
                return Err(TopologyError::DegreeTooSmall {
                    vertex: VertexIdx(i),
                    degree: v.neighbors.len(),
                });
            }
            for &nb in &v.neighbors {
                if nb.0 >= n {
                    return Err(TopologyError::NeighborOutOfBounds {
                        vertex: VertexIdx(i),
                        neighbor: nb,
                    });
                }
                if !self.verts[nb.0].neighbors.iter().any(|&x| x.0 == i) {
                    return Err(TopologyError::AsymmetricEdge {
                        vertex: VertexIdx(i),
                        neighbor: nb,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Remove cyclically consecutive duplicates from a ring.
fn dedup_cyclic(mut ring: Vec<VertexIdx>) -> Vec<VertexIdx> {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Deterministic per-vertex dump, one line per vertex, suitable for diffing
/// in tests.
impl fmt::Display for Polyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Polyhedron[{}]", self.verts.len())?;
        for (i, v) in self.verts.iter().enumerate() {
            writeln!(
                f,
                "{i:4}: pos=({}, {}, {}) neighbors=[{}] comp={} id={} clips={{{}}}",
                v.position.x,
                v.position.y,
                v.position.z,
                v.neighbors.iter().map(|n| n.0).join(", "),
                v.comp,
                v.id,
                v.clips.iter().join(", "),
            )?;
        }
        Ok(())
    }
}
