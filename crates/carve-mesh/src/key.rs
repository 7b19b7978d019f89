//! Order-independent keys for lattice points, edges, and faces.
//!
//! All mesh geometry lives on the half-integer lattice (box corners sit
//! 0.5 off the cell centers), so coordinates quantize exactly at twice
//! their value. One lattice step is a key delta of 2.

use carve_geom::Vec3;

/// Quantized lattice point, `round(coord * 2)` per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(pub i32, pub i32, pub i32);

#[inline]
fn quant(c: f32) -> i32 {
    (c * 2.0).round() as i32
}

impl PointKey {
    #[inline]
    pub fn of(v: Vec3) -> Self {
        PointKey(quant(v.x), quant(v.y), quant(v.z))
    }

    #[inline]
    pub fn vector(self) -> Vec3 {
        Vec3::new(
            self.0 as f32 * 0.5,
            self.1 as f32 * 0.5,
            self.2 as f32 * 0.5,
        )
    }

    /// Neighbor key one lattice step away per axis of `d`.
    #[inline]
    pub fn step(self, d: (i32, i32, i32)) -> Self {
        PointKey(self.0 + 2 * d.0, self.1 + 2 * d.1, self.2 + 2 * d.2)
    }

    /// Per-axis lattice-step delta to `other` (other - self, in steps).
    #[inline]
    pub fn delta_to(self, other: PointKey) -> (i32, i32, i32) {
        (
            (other.0 - self.0) / 2,
            (other.1 - self.1) / 2,
            (other.2 - self.2) / 2,
        )
    }
}

/// Undirected edge key: endpoint keys in sorted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey(pub PointKey, pub PointKey);

impl EdgeKey {
    #[inline]
    pub fn new(a: PointKey, b: PointKey) -> Self {
        if a <= b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }

    #[inline]
    pub fn of(a: Vec3, b: Vec3) -> Self {
        Self::new(PointKey::of(a), PointKey::of(b))
    }
}

/// Orientation-independent triangle key: corner keys in sorted order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FaceKey([PointKey; 3]);

impl FaceKey {
    pub fn of(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let mut k = [PointKey::of(a), PointKey::of(b), PointKey::of(c)];
        k.sort_unstable();
        FaceKey(k)
    }
}
