//! Per-vertex classification of incident lattice edges.
//!
//! Counts map to shape: one registration is an outer corner (convex),
//! three is a crease (concave). Two is ambiguous; a flat surface seam
//! and a diagonal notch both register twice, so the perpendicular
//! cross-edge probe disambiguates them.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::builder::IslandBuilder;
use crate::key::{EdgeKey, PointKey};

/// Incident edges of one vertex, bucketed by classification.
#[derive(Clone, Debug, Default)]
pub struct EdgeBuckets {
    pub convex: Vec<EdgeKey>,
    pub flat: Vec<EdgeKey>,
    pub concave: Vec<EdgeKey>,
    pub others: Vec<EdgeKey>,
}

/// Classification of every vertex touched by a live edge, in
/// deterministic first-touch order.
#[derive(Debug, Default)]
pub struct Classification {
    buckets: HashMap<PointKey, EdgeBuckets>,
    order: Vec<PointKey>,
}

impl Classification {
    #[inline]
    pub fn get(&self, k: PointKey) -> Option<&EdgeBuckets> {
        self.buckets.get(&k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointKey, &EdgeBuckets)> {
        self.order.iter().map(|k| (*k, &self.buckets[k]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn push(&mut self, k: PointKey, edge: EdgeKey, kind: Kind) {
        let buckets = match self.buckets.entry(k) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.order.push(k);
                e.insert(EdgeBuckets::default())
            }
        };
        match kind {
            Kind::Convex => buckets.convex.push(edge),
            Kind::Flat => buckets.flat.push(edge),
            Kind::Concave => buckets.concave.push(edge),
            Kind::Others => buckets.others.push(edge),
        }
    }
}

#[derive(Clone, Copy)]
enum Kind {
    Convex,
    Flat,
    Concave,
    Others,
}

const AXIS_DIRS: [(i32, i32, i32); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Classify every live edge at both of its endpoints.
pub fn classify(builder: &IslandBuilder) -> Classification {
    let mut classes = Classification::default();
    for (key, rec) in builder.live_edges() {
        let kind = match rec.count {
            1 => Kind::Convex,
            2 => {
                if count2_is_flat(builder, rec.a, rec.b) {
                    Kind::Flat
                } else {
                    Kind::Concave
                }
            }
            3 => Kind::Concave,
            _ => Kind::Others,
        };
        classes.push(rec.a, key, kind);
        classes.push(rec.b, key, kind);
    }
    classes
}

/// Cross-edge probe for a count-2 edge `(a, b)`.
///
/// A flat seam has open air on some side: a perpendicular direction
/// where a shifted corner is missing, or where the shifted parallel
/// edge was never registered (or died interior). A notch is enclosed
/// on every perpendicular side.
fn count2_is_flat(builder: &IslandBuilder, a: PointKey, b: PointKey) -> bool {
    let along = a.delta_to(b);
    for d in AXIS_DIRS {
        if d == along || d == (-along.0, -along.1, -along.2) {
            continue;
        }
        let ca = a.step(d);
        let cb = b.step(d);
        if !builder.has_corner(ca) || !builder.has_corner(cb) {
            return true;
        }
        if builder.edge(EdgeKey::new(ca, cb)).is_none() {
            return true;
        }
    }
    false
}
