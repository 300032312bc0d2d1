use strata_blocks::Face;

use crate::face::face_vertices;

/// Position (3), atlas UV (2), face-normal index (1), texture index (1).
pub const FLOATS_PER_VERTEX: usize = 7;
/// Two unindexed triangles.
pub const VERTICES_PER_FACE: usize = 6;

const FLOATS_PER_FACE: usize = FLOATS_PER_VERTEX * VERTICES_PER_FACE;

/// Vertex stream for one material class of one chunk.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub verts: Vec<f32>,
}

impl MeshBuild {
    /// Clears the vertex data but retains capacity for the next rebuild.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.verts.clear();
    }

    #[inline]
    pub fn reserve_faces(&mut self, n_faces: usize) {
        self.verts.reserve(n_faces * FLOATS_PER_FACE);
    }

    /// Appends one face of the voxel at chunk-local `(x, y, z)`.
    pub fn push_face(&mut self, face: Face, x: usize, y: usize, z: usize, texture: u16) {
        let normal = face.index() as f32;
        let texture = f32::from(texture);
        let (fx, fy, fz) = (x as f32, y as f32, z as f32);
        for [px, py, pz, u, v] in face_vertices(face) {
            self.verts
                .extend_from_slice(&[fx + px, fy + py, fz + pz, *u, *v, normal, texture]);
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.verts
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.verts.len() / FLOATS_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }
}
