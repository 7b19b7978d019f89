use carve_grid::{FACE_DIRS, VoxelField, iso_band, split_islands};

fn field_from_coords(side: usize, coords: &[(i32, i32, i32)]) -> VoxelField {
    let mut f = VoxelField::empty(side);
    for &c in coords {
        f.set(c, 1.0);
    }
    f
}

fn solid(v: f32) -> bool {
    v > 0.5
}

#[test]
fn short_input_is_padded() {
    let f = VoxelField::from_values(4, vec![1.0; 3]);
    assert_eq!(f.len(), 64);
    assert_eq!(f.value(3), 0.0);
}

#[test]
fn index_decomposition_round_trips() {
    let f = VoxelField::empty(5);
    for i in 0..f.len() {
        let c = f.coord_of(i);
        assert_eq!(f.index_of(c), Some(i));
    }
    assert_eq!(f.index_of((-1, 0, 0)), None);
    assert_eq!(f.index_of((0, 5, 0)), None);
}

#[test]
fn single_cell_is_one_island_of_one_surface_point() {
    let f = field_from_coords(3, &[(1, 1, 1)]);
    let islands = split_islands(&f, solid);
    assert_eq!(islands.len(), 1);
    assert_eq!(islands[0].len(), 1);
    let p = &islands[0].points()[0];
    assert_eq!(p.coord, (1, 1, 1));
    assert!(p.is_surface);
    // Interior cell of a 3x3x3 grid: every neighbor slot is in bounds
    assert!(p.face_neighbors.iter().all(|n| n.is_some()));
    assert_eq!(p.edge_neighbors.len(), 12);
    assert_eq!(p.corner_neighbors.len(), 8);
    assert_eq!(p.all_neighbors.len(), 26);
}

#[test]
fn face_neighbor_slots_follow_direction_order() {
    let f = field_from_coords(3, &[(1, 1, 1)]);
    let islands = split_islands(&f, solid);
    let p = &islands[0].points()[0];
    for (slot, d) in FACE_DIRS.iter().enumerate() {
        assert_eq!(p.face_neighbors[slot], Some((1 + d.0, 1 + d.1, 1 + d.2)));
    }
}

#[test]
fn corner_cell_neighbors_are_clipped() {
    let f = field_from_coords(3, &[(0, 0, 0)]);
    let islands = split_islands(&f, solid);
    let p = &islands[0].points()[0];
    // Only the +x/+y/+z slots survive clipping
    assert_eq!(p.face_neighbors[0], None);
    assert_eq!(p.face_neighbors[1], Some((1, 0, 0)));
    assert_eq!(p.face_neighbors[2], None);
    assert_eq!(p.face_neighbors[3], Some((0, 1, 0)));
    assert_eq!(p.face_neighbors[4], None);
    assert_eq!(p.face_neighbors[5], Some((0, 0, 1)));
    assert_eq!(p.edge_neighbors.len(), 3);
    assert_eq!(p.corner_neighbors.len(), 1);
    assert_eq!(p.all_neighbors.len(), 7);
}

#[test]
fn diagonal_cells_connect_into_one_island() {
    // 26-connectivity joins cells sharing only a corner
    let f = field_from_coords(4, &[(0, 0, 0), (1, 1, 1)]);
    let islands = split_islands(&f, solid);
    assert_eq!(islands.len(), 1);
    assert_eq!(islands[0].len(), 2);
}

#[test]
fn separated_cells_split_into_two_islands() {
    let f = field_from_coords(5, &[(0, 0, 0), (3, 3, 3)]);
    let islands = split_islands(&f, solid);
    assert_eq!(islands.len(), 2);
    assert!(islands.iter().all(|i| i.len() == 1));
}

#[test]
fn solid_cube_marks_only_the_shell_as_surface() {
    // 3x3x3 solid block inside a 5x5x5 grid: center cell is interior
    let mut coords = Vec::new();
    for z in 1..4 {
        for y in 1..4 {
            for x in 1..4 {
                coords.push((x, y, z));
            }
        }
    }
    let f = field_from_coords(5, &coords);
    let islands = split_islands(&f, solid);
    assert_eq!(islands.len(), 1);
    let island = &islands[0];
    assert_eq!(island.len(), 27);
    assert_eq!(island.surface_points().count(), 26);
    let center = island.get((2, 2, 2)).unwrap();
    assert!(!center.is_surface);
}

#[test]
fn iso_band_selects_values_near_iso() {
    let pred = iso_band(1.0, 0.1);
    assert!(pred(1.0));
    assert!(pred(1.05));
    assert!(!pred(1.2));
    assert!(!pred(0.0));

    let f = VoxelField::from_values(2, vec![1.0, 0.0, 0.95, 2.0, 0.0, 0.0, 0.0, 1.08]);
    let islands = split_islands(&f, iso_band(1.0, 0.1));
    let total: usize = islands.iter().map(|i| i.len()).sum();
    assert_eq!(total, 3);
}
