use serde::Deserialize;

use crate::chunk_coord::ChunkDims;

/// The `[world]` table: chunk extent in blocks.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default = "default_chunk_size_x")]
    pub chunk_size_x: usize,
    #[serde(default = "default_chunk_size_y")]
    pub chunk_size_y: usize,
    #[serde(default = "default_chunk_size_z")]
    pub chunk_size_z: usize,
}
fn default_chunk_size_x() -> usize {
    16
}
fn default_chunk_size_y() -> usize {
    128
}
fn default_chunk_size_z() -> usize {
    16
}
impl Default for WorldSection {
    fn default() -> Self {
        Self {
            chunk_size_x: default_chunk_size_x(),
            chunk_size_y: default_chunk_size_y(),
            chunk_size_z: default_chunk_size_z(),
        }
    }
}

impl WorldSection {
    pub fn dims(&self) -> ChunkDims {
        ChunkDims::new(
            self.chunk_size_x.max(1),
            self.chunk_size_y.max(1),
            self.chunk_size_z.max(1),
        )
    }
}

/// Column fill and noise shaping parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_seed")]
    pub seed: i32,
    /// Mean surface height in blocks.
    #[serde(default = "default_base_height")]
    pub base_height: f32,
    /// Surface height swing around `base_height`.
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_detail_frequency")]
    pub detail_frequency: f32,
    /// Weight of the 3D detail term relative to the height term.
    #[serde(default = "default_detail_weight")]
    pub detail_weight: f32,
    /// Highest y that fills with water when not solid.
    #[serde(default = "default_water_baseline")]
    pub water_baseline: i32,
    /// Dirt cells under the surface block before stone starts.
    #[serde(default = "default_dirt_depth")]
    pub dirt_depth: i32,
}
fn default_seed() -> i32 {
    1337
}
fn default_base_height() -> f32 {
    64.0
}
fn default_amplitude() -> f32 {
    20.0
}
fn default_frequency() -> f32 {
    0.01
}
fn default_octaves() -> i32 {
    5
}
fn default_detail_frequency() -> f32 {
    0.05
}
fn default_detail_weight() -> f32 {
    0.15
}
fn default_water_baseline() -> i32 {
    59
}
fn default_dirt_depth() -> i32 {
    3
}
impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            base_height: default_base_height(),
            amplitude: default_amplitude(),
            frequency: default_frequency(),
            octaves: default_octaves(),
            detail_frequency: default_detail_frequency(),
            detail_weight: default_detail_weight(),
            water_baseline: default_water_baseline(),
            dirt_depth: default_dirt_depth(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tables_use_defaults() {
        let world: WorldSection = toml::from_str("").unwrap();
        let terrain: TerrainConfig = toml::from_str("").unwrap();
        assert_eq!(world.dims(), ChunkDims::new(16, 128, 16));
        assert_eq!(terrain.water_baseline, 59);
        assert_eq!(terrain.dirt_depth, 3);
    }

    #[test]
    fn partial_tables_override_fields() {
        let world: WorldSection = toml::from_str("chunk_size_y = 64").unwrap();
        let terrain: TerrainConfig = toml::from_str("seed = 7\nwater_baseline = 20").unwrap();
        assert_eq!(world.dims(), ChunkDims::new(16, 64, 16));
        assert_eq!(terrain.seed, 7);
        assert_eq!(terrain.water_baseline, 20);
        assert_eq!(terrain.octaves, 5);
    }

    #[test]
    fn zero_sizes_clamp_to_one() {
        let world: WorldSection = toml::from_str("chunk_size_x = 0").unwrap();
        assert_eq!(world.dims(), ChunkDims::new(1, 128, 16));
    }
}
