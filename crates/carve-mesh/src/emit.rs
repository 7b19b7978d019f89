//! Flat-shaded buffer assembly from kept faces.

use crate::builder::IslandBuilder;

/// CPU-side mesh buffers: positions and normals as packed xyz floats,
/// indices as one entry per triangle corner. Vertices are not shared
/// between faces so each face keeps its own normal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    #[inline]
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }
}

/// Walk kept faces in first-add order and expand them into buffers:
/// three fresh vertices per triangle, the face normal repeated per
/// corner.
pub fn build_buffers(builder: &IslandBuilder) -> MeshBuild {
    let mut out = MeshBuild::default();
    for tri in builder.kept_faces() {
        let n = tri.normal;
        for p in tri.points() {
            let i = (out.pos.len() / 3) as u32;
            out.pos.extend_from_slice(&[p.x, p.y, p.z]);
            out.norm.extend_from_slice(&[n.x, n.y, n.z]);
            out.idx.push(i);
        }
    }
    out
}
