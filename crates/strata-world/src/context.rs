use std::sync::Arc;

use strata_blocks::BlockRegistry;

use crate::chunk_coord::ChunkDims;
use crate::density::DensityField;
use crate::palette::{MissingBlock, TerrainPalette};
use crate::worldgen::TerrainConfig;

/// Everything chunk generation and meshing read but never mutate. Built once
/// by the application and shared by `Arc`.
#[derive(Clone)]
pub struct WorldContext {
    pub dims: ChunkDims,
    pub registry: Arc<BlockRegistry>,
    pub palette: TerrainPalette,
    pub density: Arc<dyn DensityField>,
    pub terrain: TerrainConfig,
}

impl WorldContext {
    pub fn new(
        dims: ChunkDims,
        registry: Arc<BlockRegistry>,
        density: Arc<dyn DensityField>,
        terrain: TerrainConfig,
    ) -> Result<Self, MissingBlock> {
        let palette = TerrainPalette::resolve(&registry)?;
        Ok(Self {
            dims,
            registry,
            palette,
            density,
            terrain,
        })
    }
}
