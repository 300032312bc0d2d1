//! World sizing, chunk coordinates, terrain parameters and the density field.
#![forbid(unsafe_code)]

mod chunk_coord;
mod context;
pub mod density;
mod palette;
pub mod worldgen;

pub use chunk_coord::{ChunkCoord, ChunkDims, LocalPos, WORLD_LIMIT};
pub use context::WorldContext;
pub use density::{DensityField, NoiseDensity};
pub use palette::{MissingBlock, TerrainPalette};
pub use worldgen::{TerrainConfig, WorldSection};
