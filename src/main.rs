use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fastnoise_lite::{FastNoiseLite, NoiseType};
use serde::Deserialize;

use carve_grid::{VoxelField, iso_band, split_islands};
use carve_mesh::{MeshOptions, SurfaceMesh, mesh_island};

#[derive(Parser, Debug)]
#[command(name = "carve", about = "Blocky surface mesher with crease smoothing")]
struct Args {
    /// Field side length in cells
    #[arg(long)]
    side: Option<usize>,
    /// Sample shape to mesh
    #[arg(long, value_enum, default_value = "blob")]
    shape: Shape,
    /// Iso level the blob field is sampled against
    #[arg(long)]
    iso: Option<f32>,
    /// Acceptance band half-width around the iso level
    #[arg(long)]
    precision: Option<f32>,
    /// Noise seed for the blob shape
    #[arg(long)]
    seed: Option<i32>,
    /// Skip the crease smoothing pass
    #[arg(long)]
    no_smoothing: bool,
    /// Collect smoothing debug markers and report them
    #[arg(long)]
    debug_overlay: bool,
    /// Optional TOML config file; explicit flags win over it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write all island meshes into one Wavefront OBJ file
    #[arg(long)]
    obj: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Shape {
    /// Iso band of 3D OpenSimplex noise
    Blob,
    /// Three-cell staircase row
    Steps,
    /// Solid cube with one corner cell removed
    Pocket,
    /// Plate with a single cell sitting on it
    Bump,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    side: Option<usize>,
    iso: Option<f32>,
    precision: Option<f32>,
    seed: Option<i32>,
    smoothing: Option<bool>,
}

fn load_config(path: &PathBuf) -> FileConfig {
    match fs::read_to_string(path) {
        Ok(text) => match toml::from_str(&text) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("config parse failed ({}): {}", path.display(), e);
                FileConfig::default()
            }
        },
        Err(e) => {
            log::error!("config read failed ({}): {}", path.display(), e);
            FileConfig::default()
        }
    }
}

fn blob_field(side: usize, seed: i32) -> VoxelField {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(0.09));
    let mut field = VoxelField::empty(side);
    for z in 0..side {
        for y in 0..side {
            for x in 0..side {
                let v = noise.get_noise_3d(x as f32, y as f32, z as f32);
                field.set((x as i32, y as i32, z as i32), v);
            }
        }
    }
    field
}

fn fixture_field(side: usize, cells: &[(i32, i32, i32)]) -> VoxelField {
    let mut field = VoxelField::empty(side);
    for &c in cells {
        field.set(c, 1.0);
    }
    field
}

fn steps_field(side: usize) -> VoxelField {
    let mut cells = Vec::new();
    for x in 1..(side as i32 - 1) {
        cells.push((x, 2, 2));
        cells.push((x, 2, 3));
        cells.push((x, 3, 3));
    }
    fixture_field(side, &cells)
}

fn pocket_field(side: usize) -> VoxelField {
    let mut cells = Vec::new();
    for z in 1..4 {
        for y in 1..4 {
            for x in 1..4 {
                if (x, y, z) != (3, 3, 3) {
                    cells.push((x, y, z));
                }
            }
        }
    }
    fixture_field(side, &cells)
}

fn bump_field(side: usize) -> VoxelField {
    let mut cells = Vec::new();
    for z in 1..4 {
        for x in 1..4 {
            cells.push((x, 1, z));
        }
    }
    cells.push((2, 2, 2));
    fixture_field(side, &cells)
}

fn write_obj(path: &PathBuf, meshes: &[SurfaceMesh]) -> std::io::Result<()> {
    let mut out = fs::File::create(path)?;
    writeln!(out, "o carve")?;
    let mut base = 1usize;
    for mesh in meshes {
        let b = &mesh.build;
        for p in b.pos.chunks_exact(3) {
            writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
        }
        for n in b.norm.chunks_exact(3) {
            writeln!(out, "vn {} {} {}", n[0], n[1], n[2])?;
        }
        for tri in b.idx.chunks_exact(3) {
            let (a, b2, c) = (
                base + tri[0] as usize,
                base + tri[1] as usize,
                base + tri[2] as usize,
            );
            writeln!(out, "f {a}//{a} {b2}//{b2} {c}//{c}")?;
        }
        base += b.vertex_count();
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let cfg = args.config.as_ref().map(load_config).unwrap_or_default();

    let default_side = match args.shape {
        Shape::Blob => 48,
        _ => 8,
    };
    let side = args.side.or(cfg.side).unwrap_or(default_side);
    let seed = args.seed.or(cfg.seed).unwrap_or(1337);
    let (iso, precision) = match args.shape {
        Shape::Blob => (
            args.iso.or(cfg.iso).unwrap_or(0.0),
            args.precision.or(cfg.precision).unwrap_or(0.6),
        ),
        // Fixtures store 1.0 in occupied cells
        _ => (1.0, 0.5),
    };
    let smoothing = if args.no_smoothing {
        false
    } else {
        cfg.smoothing.unwrap_or(true)
    };

    let field = match args.shape {
        Shape::Blob => blob_field(side, seed),
        Shape::Steps => steps_field(side),
        Shape::Pocket => pocket_field(side),
        Shape::Bump => bump_field(side),
    };

    let opts = MeshOptions {
        smoothing,
        debug_overlay: args.debug_overlay,
    };
    let islands = split_islands(&field, iso_band(iso, precision));
    log::info!(
        "shape={:?} side={} islands={} smoothing={}",
        args.shape,
        side,
        islands.len(),
        smoothing
    );

    let mut meshes = Vec::with_capacity(islands.len());
    for (i, island) in islands.iter().enumerate() {
        let mesh = mesh_island(island, &opts);
        log::info!(
            "island={} cells={} surface={} tris={} verts={}",
            i,
            island.len(),
            island.surface_points().count(),
            mesh.build.triangle_count(),
            mesh.build.vertex_count(),
        );
        if args.debug_overlay {
            log::info!(
                "island={} debug points={} segments={}",
                i,
                mesh.debug.points.len(),
                mesh.debug.segments.len(),
            );
        }
        meshes.push(mesh);
    }

    if let Some(path) = &args.obj {
        match write_obj(path, &meshes) {
            Ok(()) => log::info!("wrote {}", path.display()),
            Err(e) => {
                log::error!("obj write failed ({}): {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }
}
