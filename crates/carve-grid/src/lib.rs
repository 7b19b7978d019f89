//! Scalar voxel field, island splitting, and the per-voxel neighbor graph.
#![forbid(unsafe_code)]

use carve_geom::Vec3;
use hashbrown::HashMap;

pub type Coord = (i32, i32, i32);

/// Directional distance-1 neighbor order: `[-x, +x, -y, +y, -z, +z]`.
pub const FACE_DIRS: [Coord; 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Cubic scalar field stored as a flat array, `side` cells per axis.
/// Linear layout: `i = x + y * side + z * side * side`.
#[derive(Clone, Debug)]
pub struct VoxelField {
    side: usize,
    values: Vec<f32>,
}

impl VoxelField {
    /// Build a field from raw values. Inputs of the wrong length are
    /// normalized to `side^3` (short inputs padded with 0.0).
    pub fn from_values(side: usize, mut values: Vec<f32>) -> Self {
        let expected = side * side * side;
        if values.len() != expected {
            values.resize(expected, 0.0);
        }
        Self { side, values }
    }

    pub fn empty(side: usize) -> Self {
        Self::from_values(side, Vec::new())
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn value(&self, index: usize) -> f32 {
        self.values[index]
    }

    #[inline]
    pub fn set(&mut self, coord: Coord, value: f32) {
        if let Some(i) = self.index_of(coord) {
            self.values[i] = value;
        }
    }

    #[inline]
    pub fn coord_of(&self, index: usize) -> Coord {
        let s = self.side;
        (
            (index % s) as i32,
            ((index / s) % s) as i32,
            (index / (s * s)) as i32,
        )
    }

    #[inline]
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        let s = self.side as i32;
        let (x, y, z) = coord;
        if x < 0 || y < 0 || z < 0 || x >= s || y >= s || z >= s {
            return None;
        }
        Some(x as usize + y as usize * self.side + z as usize * self.side * self.side)
    }
}

/// Iso-band membership predicate: a cell is suitable when its value is
/// within `precision` of `iso`.
pub fn iso_band(iso: f32, precision: f32) -> impl Fn(f32) -> bool {
    move |v| (v - iso).abs() < precision
}

/// One occupied cell of an island, with its clipped 3x3x3 neighborhood
/// pre-classified by how many axes differ from the center.
#[derive(Clone, Debug)]
pub struct GridPoint {
    pub index: usize,
    pub coord: Coord,
    /// Cell position in world units (unit grid gap).
    pub vector: Vec3,
    /// Distance-1 neighbors in `FACE_DIRS` order; None when clipped by
    /// the grid bounds.
    pub face_neighbors: [Option<Coord>; 6],
    /// Distance-2 diagonal neighbors (two axes differ), in-bounds only.
    pub edge_neighbors: Vec<Coord>,
    /// Distance-3 diagonal neighbors (three axes differ), in-bounds only.
    pub corner_neighbors: Vec<Coord>,
    /// Linear indices of all in-bounds neighbors (up to 26).
    pub all_neighbors: Vec<usize>,
    /// True when any of the 26 neighbor slots is unoccupied (clipped
    /// slots count as unoccupied).
    pub is_surface: bool,
}

/// A connected component of suitable cells (26-connectivity).
#[derive(Clone, Debug, Default)]
pub struct Island {
    points: Vec<GridPoint>,
    by_coord: HashMap<Coord, usize>,
}

impl Island {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        self.by_coord.contains_key(&coord)
    }

    #[inline]
    pub fn get(&self, coord: Coord) -> Option<&GridPoint> {
        self.by_coord.get(&coord).map(|&i| &self.points[i])
    }

    pub fn surface_points(&self) -> impl Iterator<Item = &GridPoint> {
        self.points.iter().filter(|p| p.is_surface)
    }
}

/// Split the suitable cells of `field` into connected islands with an
/// explicit-stack flood fill over the 26-neighborhood. Island point
/// order follows discovery order, which is deterministic for a given
/// field.
pub fn split_islands<F>(field: &VoxelField, suitable: F) -> Vec<Island>
where
    F: Fn(f32) -> bool,
{
    let n = field.len();
    let mut visited = vec![false; n];
    let mut islands: Vec<Island> = Vec::new();

    for start in 0..n {
        if visited[start] || !suitable(field.value(start)) {
            continue;
        }
        let mut cells: Vec<usize> = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(i) = stack.pop() {
            cells.push(i);
            let (x, y, z) = field.coord_of(i);
            for dz in -1..=1 {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 && dz == 0 {
                            continue;
                        }
                        let Some(j) = field.index_of((x + dx, y + dy, z + dz)) else {
                            continue;
                        };
                        if !visited[j] && suitable(field.value(j)) {
                            visited[j] = true;
                            stack.push(j);
                        }
                    }
                }
            }
        }
        islands.push(build_island(field, cells, &suitable));
    }

    log::debug!(
        "islands={} sizes=[{}]",
        islands.len(),
        islands
            .iter()
            .map(|i| i.len().to_string())
            .collect::<Vec<_>>()
            .join(",")
    );
    islands
}

fn build_island<F>(field: &VoxelField, cells: Vec<usize>, suitable: &F) -> Island
where
    F: Fn(f32) -> bool,
{
    let mut by_coord: HashMap<Coord, usize> = HashMap::with_capacity(cells.len());
    for (slot, &i) in cells.iter().enumerate() {
        by_coord.insert(field.coord_of(i), slot);
    }

    let mut points = Vec::with_capacity(cells.len());
    for &i in &cells {
        let coord = field.coord_of(i);
        let (x, y, z) = coord;

        let mut face_neighbors = [None; 6];
        for (slot, d) in FACE_DIRS.iter().enumerate() {
            let c = (x + d.0, y + d.1, z + d.2);
            if field.index_of(c).is_some() {
                face_neighbors[slot] = Some(c);
            }
        }

        let mut edge_neighbors = Vec::new();
        let mut corner_neighbors = Vec::new();
        let mut all_neighbors = Vec::new();
        let mut occupied = 0usize;
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1i32 {
                    let diff = (dx != 0) as u8 + (dy != 0) as u8 + (dz != 0) as u8;
                    if diff == 0 {
                        continue;
                    }
                    let c = (x + dx, y + dy, z + dz);
                    let Some(j) = field.index_of(c) else { continue };
                    match diff {
                        2 => edge_neighbors.push(c),
                        3 => corner_neighbors.push(c),
                        _ => {}
                    }
                    all_neighbors.push(j);
                    if suitable(field.value(j)) && by_coord.contains_key(&c) {
                        occupied += 1;
                    }
                }
            }
        }
        // A full interior cell has all 26 slots occupied in-island.
        let is_surface = occupied < 26;

        points.push(GridPoint {
            index: i,
            coord,
            vector: Vec3::new(x as f32, y as f32, z as f32),
            face_neighbors,
            edge_neighbors,
            corner_neighbors,
            all_neighbors,
            is_surface,
        });
    }

    Island { points, by_coord }
}
