use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use strata_runtime::StreamConfig;
use strata_world::TerrainConfig;
use strata_world::worldgen::WorldSection;

/// Top-level driver config file.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub terrain: TerrainConfig,
    #[serde(default)]
    pub streaming: StreamConfig,
    #[serde(default)]
    pub driver: DriverConfig,
    /// Block registry TOML; the built-in set when absent.
    #[serde(default)]
    pub blocks: Option<PathBuf>,
}

/// Scripted viewer and edit cadence for the headless run.
#[derive(Clone, Debug, Deserialize)]
pub struct DriverConfig {
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    /// Viewer speed along +X in blocks per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Frames between break commands; 0 disables edits.
    #[serde(default = "default_break_every")]
    pub break_every: u32,
}

fn default_frames() -> u32 {
    600
}
fn default_frame_ms() -> u64 {
    16
}
fn default_speed() -> f32 {
    12.0
}
fn default_break_every() -> u32 {
    30
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_ms: default_frame_ms(),
            speed: default_speed(),
            break_every: default_break_every(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        // A relative blocks path is relative to the config file.
        if let (Some(blocks), Some(dir)) = (cfg.blocks.as_mut(), path.parent()) {
            if blocks.is_relative() {
                *blocks = dir.join(&*blocks);
            }
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.streaming.render_distance, 4);
        assert_eq!(cfg.driver.frames, 600);
        assert_eq!(cfg.terrain.water_baseline, 59);
        assert!(cfg.blocks.is_none());
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/strata.toml");
        let cfg = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.world.dims().sy, 128);
        assert_eq!(cfg.streaming.step, 0.05);
        assert_eq!(cfg.driver.break_every, 30);
    }

    #[test]
    fn shipped_blocks_cover_the_terrain_palette() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/blocks.toml");
        let reg = strata_blocks::BlockRegistry::load_from_path(path).unwrap();
        assert!(strata_world::TerrainPalette::resolve(&reg).is_ok());
        let glass = reg.id_by_name("glass").unwrap();
        assert!(reg.is_solid(glass) && reg.is_translucent(glass));
    }

    #[test]
    fn unknown_value_types_are_rejected() {
        assert!(AppConfig::from_toml_str("[streaming]\nrender_distance = \"far\"").is_err());
    }
}
