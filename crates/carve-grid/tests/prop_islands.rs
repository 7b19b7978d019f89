use std::collections::HashSet;

use carve_grid::{VoxelField, iso_band, split_islands};
use proptest::prelude::*;

fn values(side: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(0.0f32..2.0, side * side * side)
}

proptest! {
    // Islands partition the suitable cells: every suitable cell lands
    // in exactly one island, and nothing else does
    #[test]
    fn islands_partition_the_suitable_cells(values in values(4)) {
        let field = VoxelField::from_values(4, values);
        let pred = iso_band(1.0, 0.25);
        let islands = split_islands(&field, iso_band(1.0, 0.25));

        let mut seen: HashSet<(i32, i32, i32)> = HashSet::new();
        for island in &islands {
            prop_assert!(!island.is_empty());
            for p in island.points() {
                prop_assert_eq!(field.index_of(p.coord), Some(p.index));
                prop_assert!(pred(field.value(p.index)));
                prop_assert!(seen.insert(p.coord));
            }
        }
        let suitable = (0..field.len()).filter(|&i| pred(field.value(i))).count();
        prop_assert_eq!(seen.len(), suitable);
    }

    // The per-distance neighbor lists cover all in-bounds neighbors,
    // and is_surface flags exactly the cells with an open slot
    #[test]
    fn neighbor_lists_and_surface_flag_agree(values in values(4)) {
        let field = VoxelField::from_values(4, values);
        for island in split_islands(&field, iso_band(1.0, 0.25)) {
            for p in island.points() {
                let faces = p.face_neighbors.iter().flatten().count();
                let split = faces + p.edge_neighbors.len() + p.corner_neighbors.len();
                prop_assert_eq!(split, p.all_neighbors.len());

                let enclosed = p.all_neighbors.len() == 26
                    && p
                        .all_neighbors
                        .iter()
                        .all(|&j| island.contains(field.coord_of(j)));
                prop_assert_eq!(p.is_surface, !enclosed);
            }
        }
    }
}
