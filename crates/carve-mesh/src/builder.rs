//! Shared per-island meshing state: face dedup map, edge use counts,
//! interned corner points, and the debug overlay.

use carve_geom::Vec3;
use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::key::{EdgeKey, FaceKey, PointKey};
use crate::tri::Tri;

/// Face slot state. Absence from the map means unseen. A face added
/// twice is an internal face and stays discarded forever.
#[derive(Clone, Copy, Debug)]
pub enum FaceSlot {
    Kept(Tri),
    Discarded,
}

/// Live edge of the box lattice with its registration count.
#[derive(Clone, Copy, Debug)]
pub struct EdgeRecord {
    pub a: PointKey,
    pub b: PointKey,
    pub count: u8,
}

impl EdgeRecord {
    /// The endpoint opposite `k`.
    #[inline]
    pub fn other(&self, k: PointKey) -> PointKey {
        if self.a == k { self.b } else { self.a }
    }
}

/// Marker points and segments collected for inspection; markers are
/// nudged by +0.01 per axis so they render clear of the surface.
#[derive(Clone, Debug, Default)]
pub struct DebugOverlay {
    pub points: Vec<Vec3>,
    pub segments: Vec<(Vec3, Vec3)>,
}

impl DebugOverlay {
    const NUDGE: f32 = 0.01;

    pub fn add_point(&mut self, p: Vec3) {
        self.points.push(p + Vec3::splat(Self::NUDGE));
    }

    pub fn add_segment(&mut self, a: Vec3, b: Vec3) {
        self.segments
            .push((a + Vec3::splat(Self::NUDGE), b + Vec3::splat(Self::NUDGE)));
    }
}

/// Meshing context for one island. Maps are paired with insertion-order
/// key vectors so iteration (and therefore output) is deterministic.
#[derive(Debug, Default)]
pub struct IslandBuilder {
    faces: HashMap<FaceKey, FaceSlot>,
    face_order: Vec<FaceKey>,
    edges: HashMap<EdgeKey, EdgeRecord>,
    edge_order: Vec<EdgeKey>,
    corners: HashMap<PointKey, u32>,
    pub debug: DebugOverlay,
}

impl IslandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triangle through the dedup map. First add keeps the
    /// winding-corrected triangle; a second add of the same corner set
    /// discards it; later adds are ignored.
    pub fn add_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, center: Vec3) {
        let key = FaceKey::of(p1, p2, p3);
        match self.faces.entry(key) {
            Entry::Vacant(e) => {
                e.insert(FaceSlot::Kept(Tri::new(p1, p2, p3, center)));
                self.face_order.push(key);
            }
            Entry::Occupied(mut e) => {
                if let FaceSlot::Kept(_) = e.get() {
                    e.insert(FaceSlot::Discarded);
                }
            }
        }
    }

    /// Add a quad split on its p1-p3 diagonal.
    pub fn add_quad(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3, center: Vec3) {
        self.add_triangle(p1, p2, p3, center);
        self.add_triangle(p3, p4, p1, center);
    }

    /// Discard a previously added triangle. Unknown keys are a no-op.
    pub fn delete_triangle(&mut self, p1: Vec3, p2: Vec3, p3: Vec3) {
        if let Some(slot) = self.faces.get_mut(&FaceKey::of(p1, p2, p3)) {
            *slot = FaceSlot::Discarded;
        }
    }

    /// Discard a quad whichever diagonal it was split on.
    pub fn delete_quad(&mut self, p1: Vec3, p2: Vec3, p3: Vec3, p4: Vec3) {
        self.delete_triangle(p1, p2, p3);
        self.delete_triangle(p3, p4, p1);
        self.delete_triangle(p2, p3, p4);
        self.delete_triangle(p4, p1, p2);
    }

    /// Register one use of a lattice edge and intern both endpoints.
    /// The fourth registration removes the edge: all four flanking
    /// cells exist, so the edge is fully interior.
    pub fn add_edge(&mut self, a: Vec3, b: Vec3) {
        let ka = PointKey::of(a);
        let kb = PointKey::of(b);
        *self.corners.entry(ka).or_insert(0) += 1;
        *self.corners.entry(kb).or_insert(0) += 1;
        let key = EdgeKey::new(ka, kb);
        match self.edges.entry(key) {
            Entry::Occupied(mut e) => {
                e.get_mut().count += 1;
                if e.get().count >= 4 {
                    e.remove();
                }
            }
            Entry::Vacant(e) => {
                e.insert(EdgeRecord {
                    a: key.0,
                    b: key.1,
                    count: 1,
                });
                self.edge_order.push(key);
            }
        }
    }

    #[inline]
    pub fn has_corner(&self, k: PointKey) -> bool {
        self.corners.contains_key(&k)
    }

    #[inline]
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeRecord> {
        self.edges.get(&key)
    }

    /// Registration count of the edge `(a, b)`, if still live.
    pub fn edge_count(&self, a: Vec3, b: Vec3) -> Option<u8> {
        self.edges.get(&EdgeKey::of(a, b)).map(|r| r.count)
    }

    /// Live edges in registration order. Keys of removed edges are
    /// skipped.
    pub fn live_edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeRecord)> {
        self.edge_order
            .iter()
            .filter_map(|k| self.edges.get(k).map(|r| (*k, r)))
    }

    pub fn live_edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Kept faces in first-add order.
    pub fn kept_faces(&self) -> impl Iterator<Item = &Tri> {
        self.face_order.iter().filter_map(|k| match self.faces.get(k) {
            Some(FaceSlot::Kept(t)) => Some(t),
            _ => None,
        })
    }

    pub fn kept_face_count(&self) -> usize {
        self.kept_faces().count()
    }
}
