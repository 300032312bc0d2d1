//! CPU meshing crate: face-culled chunk meshes split by material class.
#![forbid(unsafe_code)]

mod build;
mod chunk;
mod face;
mod mesh_build;

pub use build::{build_chunk_mesh, emit_chunk_faces, visible_face};
pub use chunk::ChunkMeshCPU;
pub use face::{FACE_VERTICES, face_vertices};
pub use mesh_build::{FLOATS_PER_VERTEX, MeshBuild, VERTICES_PER_FACE};
