//! Chunk voxel storage, terrain population and cross-chunk block lookup.
#![forbid(unsafe_code)]

mod neighbors;
mod populate;

pub use neighbors::{ChunkNeighbors, NeighborLinks};

use strata_blocks::BlockId;
use strata_blocks::types::AIR;
use strata_world::{ChunkCoord, ChunkDims, LocalPos, WorldContext};

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub dims: ChunkDims,
    pub blocks: Vec<BlockId>,
    populated: bool,
    links: NeighborLinks,
}

impl ChunkBuf {
    /// All-air chunk with no terrain yet.
    pub fn new_empty(coord: ChunkCoord, dims: ChunkDims) -> Self {
        Self {
            coord,
            dims,
            blocks: vec![AIR; dims.volume()],
            populated: false,
            links: NeighborLinks::default(),
        }
    }

    /// Allocates the voxel grid and fills it from the world's density field.
    pub fn generate(ctx: &WorldContext, coord: ChunkCoord) -> Self {
        let mut buf = Self::new_empty(coord, ctx.dims);
        buf.populate(ctx);
        buf
    }

    /// Wraps caller-provided voxels; wrong-length input is padded or cut to
    /// the chunk volume. The result counts as populated.
    pub fn from_blocks_local(coord: ChunkCoord, dims: ChunkDims, blocks: Vec<BlockId>) -> Self {
        let mut b = blocks;
        if b.len() != dims.volume() {
            b.resize(dims.volume(), AIR);
        }
        Self {
            coord,
            dims,
            blocks: b,
            populated: true,
            links: NeighborLinks::default(),
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.dims.sx * (y + self.dims.sy * z)
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockId {
        debug_assert!(
            x < self.dims.sx && y < self.dims.sy && z < self.dims.sz,
            "local ({x}, {y}, {z}) outside chunk {:?}",
            self.dims
        );
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn get(&self, p: LocalPos) -> BlockId {
        self.get_local(p.x, p.y, p.z)
    }

    /// In-place write. Remeshing is the caller's job.
    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        debug_assert!(
            x < self.dims.sx && y < self.dims.sy && z < self.dims.sz,
            "local ({x}, {y}, {z}) outside chunk {:?}",
            self.dims
        );
        let i = self.idx(x, y, z);
        self.blocks[i] = id;
    }

    #[inline]
    pub fn set(&mut self, p: LocalPos, id: BlockId) {
        self.set_local(p.x, p.y, p.z, id);
    }

    #[inline]
    pub fn world_offset(&self) -> [i32; 3] {
        self.coord.world_offset(self.dims)
    }

    #[inline]
    pub fn contains_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        let [bx, _, bz] = self.world_offset();
        self.dims.contains(wx - bx, wy, wz - bz)
    }

    #[inline]
    pub fn get_world(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        if !self.contains_world(wx, wy, wz) {
            return None;
        }
        let [bx, _, bz] = self.world_offset();
        Some(self.get_local((wx - bx) as usize, wy as usize, (wz - bz) as usize))
    }

    #[inline]
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    /// Runs terrain population unless it already happened.
    pub fn ensure_populated(&mut self, ctx: &WorldContext) {
        if !self.populated {
            self.populate(ctx);
        }
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.blocks.iter().any(|b| *b != AIR)
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }

    pub fn links(&self) -> &NeighborLinks {
        &self.links
    }

    /// Replaces the neighbor table. Vertical entries are always dropped.
    pub fn set_neighbors(&mut self, links: NeighborLinks) {
        self.links = links.horizontal_only();
    }
}
