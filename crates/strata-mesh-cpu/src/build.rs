use std::cell::Cell;
use std::time::Instant;

use strata_blocks::types::AIR;
use strata_blocks::{BlockId, BlockRegistry, Face, MaterialClass};
use strata_chunk::{ChunkBuf, ChunkNeighbors};

use crate::chunk::ChunkMeshCPU;
use crate::mesh_build::MeshBuild;

thread_local! {
    // Faces to pre-reserve per material class, sized from this thread's last mesh.
    static LAST_MESH_RESERVE: Cell<[usize; 2]> = const { Cell::new([64; 2]) };
}

/// Whether the face of `here` that touches `there` is drawn.
///
/// Identical blocks never draw the shared face. Otherwise the face shows when
/// the neighbor is air or translucent, or when `here` is itself translucent,
/// so a water/stone boundary is drawn from both sides.
#[inline]
pub fn visible_face(reg: &BlockRegistry, here: BlockId, there: BlockId) -> bool {
    if here == there {
        return false;
    }
    if there == AIR || reg.is_translucent(there) {
        return true;
    }
    reg.is_translucent(here)
}

/// Runs the visibility pass over every non-air voxel of `buf`, appending to
/// the builder of each voxel's material class. Builders are not cleared.
pub fn emit_chunk_faces(
    buf: &ChunkBuf,
    nb: &ChunkNeighbors<'_>,
    reg: &BlockRegistry,
    parts: &mut [MeshBuild; 2],
) {
    let dims = buf.dims;
    for z in 0..dims.sz {
        for y in 0..dims.sy {
            for x in 0..dims.sx {
                let here = buf.get_local(x, y, z);
                if here == AIR {
                    continue;
                }
                let class = reg.material_class(here);
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    let there = buf.block_at(nb, x as i32 + dx, y as i32 + dy, z as i32 + dz);
                    if visible_face(reg, here, there) {
                        parts[class.index()].push_face(
                            face,
                            x,
                            y,
                            z,
                            reg.texture_index(here, face),
                        );
                    }
                }
            }
        }
    }
}

/// Builds a fresh mesh for a populated chunk.
pub fn build_chunk_mesh(
    buf: &ChunkBuf,
    nb: &ChunkNeighbors<'_>,
    reg: &BlockRegistry,
) -> ChunkMeshCPU {
    let mut mesh = ChunkMeshCPU::new(buf.coord);
    mesh.regenerate(buf, nb, reg);
    mesh
}

pub(crate) fn rebuild_parts(
    parts: &mut [MeshBuild; 2],
    buf: &ChunkBuf,
    nb: &ChunkNeighbors<'_>,
    reg: &BlockRegistry,
) {
    debug_assert!(buf.is_populated(), "meshing unpopulated chunk {:?}", buf.coord);
    let start = Instant::now();
    let caps = LAST_MESH_RESERVE.get();
    for (part, cap) in parts.iter_mut().zip(caps) {
        part.clear_keep_capacity();
        part.reserve_faces(cap);
    }
    if buf.has_non_air() {
        emit_chunk_faces(buf, nb, reg, parts);
        update_last_mesh_reserve(parts);
    }
    log::trace!(
        target: "perf",
        "ms mesh={} opaque_faces={} translucent_faces={} cx={} cz={}",
        start.elapsed().as_millis(),
        parts[MaterialClass::Opaque.index()].face_count(),
        parts[MaterialClass::Translucent.index()].face_count(),
        buf.coord.x,
        buf.coord.z
    );
}

fn update_last_mesh_reserve(parts: &[MeshBuild; 2]) {
    LAST_MESH_RESERVE.set(parts.each_ref().map(|mb| {
        let faces = mb.face_count();
        faces + faces / 4 + 64
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_build::FLOATS_PER_VERTEX;
    use strata_world::{ChunkCoord, ChunkDims};

    #[test]
    fn next_build_reserves_from_previous_face_count() {
        let reg = BlockRegistry::builtin();
        let stone = reg.id_by_name("stone").unwrap();
        let dims = ChunkDims::new(16, 4, 16);
        let coord = ChunkCoord::new(0, 0);
        // Checkerboard: every stone voxel shows all six faces.
        let blocks = (0..dims.volume())
            .map(|i| {
                let (x, y, z) = (i % 16, (i / 16) % 4, i / 64);
                if (x + y + z) % 2 == 0 { stone } else { AIR }
            })
            .collect();
        let busy = ChunkBuf::from_blocks_local(coord, dims, blocks);
        let first = build_chunk_mesh(&busy, &ChunkNeighbors::none(), &reg);
        let faces = first.part(MaterialClass::Opaque).face_count();
        assert_eq!(faces, 6 * dims.volume() / 2);

        let mut lone = vec![AIR; dims.volume()];
        lone[0] = stone;
        let sparse = ChunkBuf::from_blocks_local(coord, dims, lone);
        let second = build_chunk_mesh(&sparse, &ChunkNeighbors::none(), &reg);
        let opaque = second.part(MaterialClass::Opaque);
        assert_eq!(opaque.face_count(), 6);
        assert!(opaque.verts.capacity() >= faces * FLOATS_PER_VERTEX * 6);
    }
}
