//! Unit-cube emission for occupied cells.
//!
//! Each cell turns into a box centered on its sample point (corners at
//! the surrounding half-integer lattice). Faces toward an occupied
//! directional neighbor are skipped up front; coincident faces from
//! adjacent boxes that do get emitted cancel through the dedup map.

use carve_geom::Vec3;
use carve_grid::{GridPoint, Island};

use crate::builder::IslandBuilder;

// Corner offsets from the box origin (min corner).
//   E———————H
//   |\      |\
//   | F———————G
//   A—|—————D |
//    \|      \|
//     B———————C
const CORNERS: [Vec3; 8] = [
    Vec3::new(1.0, 0.0, 0.0), // A
    Vec3::new(0.0, 0.0, 0.0), // B
    Vec3::new(0.0, 0.0, 1.0), // C
    Vec3::new(1.0, 0.0, 1.0), // D
    Vec3::new(1.0, 1.0, 0.0), // E
    Vec3::new(0.0, 1.0, 0.0), // F
    Vec3::new(0.0, 1.0, 1.0), // G
    Vec3::new(1.0, 1.0, 1.0), // H
];

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;
const E: usize = 4;
const F: usize = 5;
const G: usize = 6;
const H: usize = 7;

// Quad corner cycle per face, paired with the directional neighbor slot
// (FACE_DIRS order) whose occupied cell hides the face.
const FACES: [([usize; 4], usize); 6] = [
    ([A, B, F, E], 4), // -z
    ([B, C, G, F], 0), // -x
    ([C, D, H, G], 5), // +z
    ([D, A, E, H], 1), // +x
    ([A, D, C, B], 2), // -y
    ([F, G, H, E], 3), // +y
];

// The 12 cube edges: bottom ring, top ring, verticals.
const EDGES: [(usize, usize); 12] = [
    (A, B),
    (B, C),
    (C, D),
    (D, A),
    (E, F),
    (F, G),
    (G, H),
    (H, E),
    (A, E),
    (B, F),
    (C, G),
    (D, H),
];

/// Emit the box for one cell: visible faces through the dedup pipeline
/// and all 12 edges into the use-count map (exactly once per box, face
/// visibility notwithstanding).
pub fn emit_box(builder: &mut IslandBuilder, island: &Island, point: &GridPoint) {
    let origin = point.vector - Vec3::splat(0.5);
    let center = point.vector;
    let corner = |i: usize| origin + CORNERS[i];

    for (cycle, slot) in FACES {
        let hidden = matches!(point.face_neighbors[slot], Some(c) if island.contains(c));
        if hidden {
            continue;
        }
        builder.add_quad(
            corner(cycle[0]),
            corner(cycle[1]),
            corner(cycle[2]),
            corner(cycle[3]),
            center,
        );
    }

    for (i, j) in EDGES {
        builder.add_edge(corner(i), corner(j));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_edge_tables_are_consistent() {
        // Every corner appears in exactly 3 faces and 3 edges
        let mut face_uses = [0usize; 8];
        for (cycle, _) in FACES {
            for i in cycle {
                face_uses[i] += 1;
            }
        }
        assert_eq!(face_uses, [3; 8]);

        let mut edge_uses = [0usize; 8];
        for (i, j) in EDGES {
            assert_ne!(i, j);
            edge_uses[i] += 1;
            edge_uses[j] += 1;
        }
        assert_eq!(edge_uses, [3; 8]);

        // Edges connect corners one unit apart
        for (i, j) in EDGES {
            assert_eq!(CORNERS[i].distance_to(CORNERS[j]), 1.0);
        }
    }
}
