//! CPU meshing for blocky scalar-field surfaces.
//!
//! Pipeline per island: emit a unit box for every occupied cell with
//! shared-face cancellation, count edge registrations across boxes,
//! classify each lattice vertex's incident edges, smooth creases with
//! bridge/chamfer/pocket faces, then expand kept faces into flat-shaded
//! buffers.
#![forbid(unsafe_code)]

mod boxgen;
mod builder;
mod classify;
mod emit;
mod key;
mod smooth;
mod tri;

use std::time::Instant;

use carve_grid::{Island, VoxelField, split_islands};

pub use crate::boxgen::emit_box;
pub use crate::builder::{DebugOverlay, EdgeRecord, FaceSlot, IslandBuilder};
pub use crate::classify::{Classification, EdgeBuckets, classify};
pub use crate::emit::{MeshBuild, build_buffers};
pub use crate::key::{EdgeKey, FaceKey, PointKey};
pub use crate::smooth::smooth;
pub use crate::tri::Tri;

/// Meshing knobs.
#[derive(Clone, Copy, Debug)]
pub struct MeshOptions {
    /// Run the crease smoothing pass after box generation.
    pub smoothing: bool,
    /// Collect marker points and segments while smoothing.
    pub debug_overlay: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            smoothing: true,
            debug_overlay: false,
        }
    }
}

/// Finished island mesh plus any collected debug markers.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh {
    pub build: MeshBuild,
    pub debug: DebugOverlay,
}

/// Run box generation for every cell of `island` into a fresh builder.
pub fn build_island(island: &Island) -> IslandBuilder {
    let mut builder = IslandBuilder::new();
    for point in island.points() {
        emit_box(&mut builder, island, point);
    }
    builder
}

/// Mesh one island end to end.
pub fn mesh_island(island: &Island, opts: &MeshOptions) -> SurfaceMesh {
    let t_boxes = Instant::now();
    let mut builder = build_island(island);
    log::info!(
        target: "perf",
        "ms={} boxgen cells={} faces={} edges={}",
        t_boxes.elapsed().as_millis(),
        island.len(),
        builder.kept_face_count(),
        builder.live_edge_count(),
    );

    if opts.smoothing {
        let t_smooth = Instant::now();
        smooth(&mut builder, opts.debug_overlay);
        log::info!(
            target: "perf",
            "ms={} smooth faces={}",
            t_smooth.elapsed().as_millis(),
            builder.kept_face_count(),
        );
    }

    let t_emit = Instant::now();
    let build = build_buffers(&builder);
    log::info!(
        target: "perf",
        "ms={} emit tris={} verts={}",
        t_emit.elapsed().as_millis(),
        build.triangle_count(),
        build.vertex_count(),
    );

    SurfaceMesh {
        build,
        debug: std::mem::take(&mut builder.debug),
    }
}

/// Split `field` into islands and mesh each one.
pub fn mesh_field<F>(field: &VoxelField, suitable: F, opts: &MeshOptions) -> Vec<SurfaceMesh>
where
    F: Fn(f32) -> bool,
{
    let t_split = Instant::now();
    let islands = split_islands(field, suitable);
    log::info!(
        target: "perf",
        "ms={} split islands={}",
        t_split.elapsed().as_millis(),
        islands.len(),
    );
    islands.iter().map(|i| mesh_island(i, opts)).collect()
}
