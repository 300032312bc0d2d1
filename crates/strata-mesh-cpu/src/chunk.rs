use strata_blocks::{BlockRegistry, MaterialClass};
use strata_chunk::{ChunkBuf, ChunkNeighbors};
use strata_world::ChunkCoord;

use crate::build::rebuild_parts;
use crate::mesh_build::MeshBuild;

/// CPU-side mesh of one chunk, one vertex stream per [`MaterialClass`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub parts: [MeshBuild; 2],
}

impl ChunkMeshCPU {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            parts: Default::default(),
        }
    }

    #[inline]
    pub fn part(&self, class: MaterialClass) -> &MeshBuild {
        &self.parts[class.index()]
    }

    /// Clears both streams, keeping their allocations, and reruns the
    /// visibility pass against the current voxels and neighbors.
    pub fn regenerate(&mut self, buf: &ChunkBuf, nb: &ChunkNeighbors<'_>, reg: &BlockRegistry) {
        debug_assert_eq!(self.coord, buf.coord);
        rebuild_parts(&mut self.parts, buf, nb, reg);
    }

    pub fn face_count(&self) -> usize {
        self.parts.iter().map(MeshBuild::face_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(MeshBuild::is_empty)
    }
}
