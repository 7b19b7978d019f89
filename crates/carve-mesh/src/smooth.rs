//! Crease smoothing: rewrites the blocky surface around concave edges
//! with bridge, chamfer, and pocket faces.
//!
//! The edge map is read-only here; smoothing only adds or discards
//! faces, so classification stays valid for the whole pass.

use hashbrown::HashSet;

use crate::builder::IslandBuilder;
use crate::classify::{Classification, EdgeBuckets, classify};
use crate::key::{EdgeKey, PointKey};

/// The 12 edge-diagonal offsets (two axes differ by one step).
const DIAG_OFFSETS: [(i32, i32, i32); 12] = [
    (1, 1, 0),
    (1, -1, 0),
    (-1, 1, 0),
    (-1, -1, 0),
    (1, 0, 1),
    (1, 0, -1),
    (-1, 0, 1),
    (-1, 0, -1),
    (0, 1, 1),
    (0, 1, -1),
    (0, -1, 1),
    (0, -1, -1),
];

#[inline]
fn dot3(a: (i32, i32, i32), b: (i32, i32, i32)) -> i32 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Split a diagonal offset into its two single-axis components, in
/// x, y, z order.
fn split_diag(d: (i32, i32, i32)) -> ((i32, i32, i32), (i32, i32, i32)) {
    let mut comps = [(0, 0, 0); 2];
    let mut n = 0;
    for (axis, c) in [d.0, d.1, d.2].into_iter().enumerate() {
        if c != 0 {
            comps[n] = match axis {
                0 => (c, 0, 0),
                1 => (0, c, 0),
                _ => (0, 0, c),
            };
            n += 1;
        }
    }
    (comps[0], comps[1])
}

fn far_end(builder: &IslandBuilder, edge: EdgeKey, near: PointKey) -> Option<PointKey> {
    builder.edge(edge).map(|r| r.other(near))
}

/// Run the smoothing pass over every classified vertex.
pub fn smooth(builder: &mut IslandBuilder, debug_overlay: bool) {
    let classes = classify(builder);
    let mut visited: HashSet<EdgeKey> = HashSet::new();

    for (k6, point6) in classes.iter() {
        if !point6.concave.is_empty() {
            let unvisited = point6
                .concave
                .iter()
                .copied()
                .find(|e| !visited.contains(e));
            let can_bridge = point6.concave.len() == 1
                && ((point6.convex.len() == 2 && point6.flat.len() == 2)
                    || (point6.convex.len() == 4 && point6.flat.is_empty()));
            if can_bridge {
                add_bridge(builder, k6, point6, unvisited, &visited);
            }
            if let Some(e46) = unvisited {
                visited.insert(e46);
                if let Some(k4) = far_end(builder, e46, k6) {
                    let pocket_end = |b: &EdgeBuckets| {
                        b.convex.is_empty() && b.concave.len() == 3 && b.flat.is_empty()
                    };
                    let blocked = pocket_end(point6)
                        || classes.get(k4).is_some_and(pocket_end);
                    if !blocked {
                        add_chamfer(builder, k4, k6, debug_overlay);
                    }
                }
            }
        }

        if point6.concave.len() == 2 {
            two_concave(builder, &classes, k6, point6);
        }

        if point6.concave.len() == 3 {
            three_concave(builder, k6, point6, debug_overlay);
        }

        if point6.concave.len() == 5 {
            five_concave(builder, k6, point6, debug_overlay);
        }
    }
}

/// Bridge triangle across the end of a crease: the far points of two
/// perpendicular convex edges joined through the vertex, oriented away
/// from the crease's far endpoint.
fn add_bridge(
    builder: &mut IslandBuilder,
    k6: PointKey,
    point6: &EdgeBuckets,
    unvisited: Option<EdgeKey>,
    visited: &HashSet<EdgeKey>,
) {
    // Anchor on the unvisited crease edge if there is one, otherwise
    // the crease was already handled from its other end.
    let anchor = unvisited.or_else(|| {
        point6
            .concave
            .iter()
            .copied()
            .find(|e| visited.contains(e))
    });
    let Some(anchor) = anchor else { return };
    let Some(k4) = far_end(builder, anchor, k6) else {
        return;
    };

    let mut fars: Vec<PointKey> = Vec::with_capacity(point6.convex.len());
    for e in &point6.convex {
        if let Some(k) = far_end(builder, *e, k6) {
            fars.push(k);
        }
    }
    // First mutually perpendicular pair; a collinear pair would span a
    // degenerate triangle.
    let mut pair = None;
    'outer: for i in 0..fars.len() {
        for j in (i + 1)..fars.len() {
            let di = k6.delta_to(fars[i]);
            let dj = k6.delta_to(fars[j]);
            if dot3(di, dj) == 0 {
                pair = Some((fars[i], fars[j]));
                break 'outer;
            }
        }
    }
    let Some((k2, k5)) = pair else {
        log::trace!("skip bridge at {:?}: no perpendicular convex pair", k6);
        return;
    };

    let center = k4.vector();
    builder.add_triangle(k2.vector(), k6.vector(), k5.vector(), center);
}

/// Chamfer quad along a crease `(k4, k6)`: where a diagonal offset is
/// open at both endpoints, span the 45-degree quad between the two
/// flanking strips and discard the blocky strips it replaces.
fn add_chamfer(builder: &mut IslandBuilder, k4: PointKey, k6: PointKey, debug_overlay: bool) {
    // Canonical endpoint order: the quad's internal diagonal must not
    // depend on which end of the crease was classified first.
    let (k4, k6) = if k4 <= k6 { (k4, k6) } else { (k6, k4) };
    let p4 = k4.vector();
    let p6 = k6.vector();
    let center = p4.midpoint(p6);
    for d in DIAG_OFFSETS {
        if builder.has_corner(k6.step(d)) || builder.has_corner(k4.step(d)) {
            continue;
        }
        let (u, v) = split_diag(d);
        let p1 = k4.step(u).vector();
        let p3 = k4.step(v).vector();
        let p2 = k6.step(u).vector();
        let p5 = k6.step(v).vector();
        builder.add_triangle(p1, p3, p5, center);
        builder.add_triangle(p5, p2, p1, center);
        // The two strips flanking the crease are now behind the quad.
        builder.delete_quad(p4, p6, p5, p3);
        builder.delete_quad(p4, p6, p2, p1);
        if debug_overlay {
            builder.debug.add_segment(p4, p6);
        }
    }
}

/// Two perpendicular creases meeting at a vertex: cut the corner with
/// one triangle, or two when the reflected corner is a sharp apex
/// (three convex edges).
fn two_concave(
    builder: &mut IslandBuilder,
    classes: &Classification,
    k6: PointKey,
    point6: &EdgeBuckets,
) {
    let (Some(k4), Some(k9)) = (
        far_end(builder, point6.concave[0], k6),
        far_end(builder, point6.concave[1], k6),
    ) else {
        return;
    };
    if dot3(k6.delta_to(k4), k6.delta_to(k9)) != 0 {
        // Collinear creases continue through the vertex; the chamfer
        // rule covers them.
        return;
    }
    let Some(e2) = point6.convex.first() else {
        log::trace!("skip corner cut at {:?}: no convex edge", k6);
        return;
    };
    let Some(k2) = far_end(builder, *e2, k6) else {
        return;
    };

    let p6 = k6.vector();
    let p2 = k2.vector();
    let pe = k4.vector().reflect_through(p6);
    let p5 = k9.vector().reflect_through(p6);
    let pj = p6.reflect_through(p5.midpoint(pe));
    let kj = PointKey::of(pj);

    let apex = classes.get(kj).is_some_and(|b| b.convex.len() == 3);
    if apex {
        if builder.has_corner(kj) {
            builder.add_triangle(p2, p5, pj, p6);
            builder.add_triangle(p2, pe, pj, p6);
        }
    } else if builder.has_corner(PointKey::of(pe))
        && builder.has_corner(PointKey::of(p5))
        && builder.has_corner(k2)
    {
        builder.add_triangle(p2, p5, pe, p6);
    }
}

/// Three creases meeting at a vertex: an outward bump or an inward
/// pocket, mutually exclusive. The bump candidate reflects the far
/// points through the vertex; the pocket candidate reflects the vertex
/// through the pairwise midpoints of the far points.
fn three_concave(
    builder: &mut IslandBuilder,
    k6: PointKey,
    point6: &EdgeBuckets,
    debug_overlay: bool,
) {
    let mut fars = [PointKey(0, 0, 0); 3];
    for (slot, e) in point6.concave.iter().enumerate() {
        let Some(k) = far_end(builder, *e, k6) else {
            return;
        };
        fars[slot] = k;
    }
    let [k4, k9, k7] = fars;
    let p6 = k6.vector();
    let (p4, p9, p7) = (k4.vector(), k9.vector(), k7.vector());

    if debug_overlay {
        builder.debug.add_point(p6);
    }

    let pe = p4.reflect_through(p6);
    let p5 = p9.reflect_through(p6);
    let p2 = p7.reflect_through(p6);
    if builder.has_corner(PointKey::of(pe))
        && builder.has_corner(PointKey::of(p5))
        && builder.has_corner(PointKey::of(p2))
    {
        builder.add_triangle(p2, p5, pe, p6);
        return;
    }

    let pe = p6.reflect_through(p4.midpoint(p9));
    let p2 = p6.reflect_through(p9.midpoint(p7));
    let p5 = p6.reflect_through(p7.midpoint(p4));
    if builder.has_corner(PointKey::of(pe))
        && builder.has_corner(PointKey::of(p5))
        && builder.has_corner(PointKey::of(p2))
    {
        builder.add_triangle(p2, p5, pe, p6);
    }
}

/// Five creases at one vertex is a lattice singularity. Identify the
/// odd one out (the axis used by exactly one crease direction) and
/// leave the geometry alone.
fn five_concave(
    builder: &mut IslandBuilder,
    k6: PointKey,
    point6: &EdgeBuckets,
    debug_overlay: bool,
) {
    let mut axis_uses = [0u8; 3];
    let mut dirs = Vec::with_capacity(5);
    for e in &point6.concave {
        let Some(k) = far_end(builder, *e, k6) else {
            continue;
        };
        let d = k6.delta_to(k);
        if d.0 != 0 {
            axis_uses[0] += 1;
        }
        if d.1 != 0 {
            axis_uses[1] += 1;
        }
        if d.2 != 0 {
            axis_uses[2] += 1;
        }
        dirs.push((k, d));
    }
    let Some(axis) = axis_uses.iter().position(|&c| c == 1) else {
        return;
    };
    let singular = dirs.iter().find(|(_, d)| match axis {
        0 => d.0 != 0,
        1 => d.1 != 0,
        _ => d.2 != 0,
    });
    if let Some((far, _)) = singular {
        log::trace!("five creases at {:?}, singular edge toward {:?}", k6, far);
        if debug_overlay {
            builder.debug.add_point(k6.vector());
            builder.debug.add_segment(k6.vector(), far.vector());
        }
    }
}
