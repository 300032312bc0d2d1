use serde::Deserialize;
use strata_blocks::MaterialClass;
use strata_edit::MarchParams;

use crate::render::MaterialHandle;

/// `[streaming]` table of the application config.
#[derive(Clone, Debug, Deserialize)]
pub struct StreamConfig {
    /// Chebyshev radius, in chunks, kept loaded around the viewer.
    #[serde(default = "default_render_distance")]
    pub render_distance: i32,
    /// World thread sleep when there is nothing to do.
    #[serde(default = "default_idle_sleep_ms")]
    pub idle_sleep_ms: u64,
    #[serde(default = "default_reach")]
    pub reach: f32,
    #[serde(default = "default_step")]
    pub step: f32,
    /// Chunk generation workers; 0 picks the available parallelism.
    #[serde(default)]
    pub gen_threads: usize,
    #[serde(default = "default_opaque_material")]
    pub opaque_material: u32,
    #[serde(default = "default_translucent_material")]
    pub translucent_material: u32,
}

fn default_render_distance() -> i32 {
    4
}
fn default_idle_sleep_ms() -> u64 {
    5
}
fn default_reach() -> f32 {
    8.0
}
fn default_step() -> f32 {
    0.05
}
fn default_opaque_material() -> u32 {
    1
}
fn default_translucent_material() -> u32 {
    2
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            render_distance: default_render_distance(),
            idle_sleep_ms: default_idle_sleep_ms(),
            reach: default_reach(),
            step: default_step(),
            gen_threads: 0,
            opaque_material: default_opaque_material(),
            translucent_material: default_translucent_material(),
        }
    }
}

impl StreamConfig {
    pub fn march_params(&self) -> MarchParams {
        MarchParams {
            step: self.step,
            reach: self.reach,
        }
    }

    pub fn material_for(&self, class: MaterialClass) -> MaterialHandle {
        match class {
            MaterialClass::Opaque => MaterialHandle(self.opaque_material),
            MaterialClass::Translucent => MaterialHandle(self.translucent_material),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let cfg: StreamConfig = toml::from_str("render_distance = 2\nstep = 0.1").unwrap();
        assert_eq!(cfg.render_distance, 2);
        assert_eq!(cfg.idle_sleep_ms, 5);
        assert_eq!(cfg.march_params().steps(), 80);
        assert_eq!(cfg.material_for(MaterialClass::Translucent), MaterialHandle(2));
    }
}
