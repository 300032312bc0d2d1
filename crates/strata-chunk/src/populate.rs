use strata_world::{DensityField, TerrainConfig, TerrainPalette, WorldContext};

use crate::ChunkBuf;

impl ChunkBuf {
    /// Fills every column from `ctx.density`. Overwrites whatever was there.
    pub fn populate(&mut self, ctx: &WorldContext) {
        self.populate_with(ctx.density.as_ref(), &ctx.terrain, &ctx.palette);
    }

    /// Column fill, top down: the first cell with positive density is the
    /// surface (grass at or above the water baseline, sand below), then
    /// `dirt_depth` cells of dirt, then stone down to y = 0. Cells above the
    /// surface are water up to the baseline and air above it.
    pub fn populate_with(
        &mut self,
        density: &dyn DensityField,
        terrain: &TerrainConfig,
        palette: &TerrainPalette,
    ) {
        let [bx, _, bz] = self.world_offset();
        let sy = self.dims.sy;
        let baseline = terrain.water_baseline;
        let dirt_depth = terrain.dirt_depth.max(0) as usize;
        let above_surface = |y: usize| {
            if (y as i32) <= baseline {
                palette.water
            } else {
                palette.air
            }
        };

        for z in 0..self.dims.sz {
            for x in 0..self.dims.sx {
                let wx = (bx + x as i32) as f32;
                let wz = (bz + z as i32) as f32;
                let surface = (0..sy)
                    .rev()
                    .find(|&y| density.density(wx, y as f32, wz) > 0.0);

                let Some(top) = surface else {
                    for y in 0..sy {
                        self.set_local(x, y, z, above_surface(y));
                    }
                    continue;
                };

                for y in (top + 1)..sy {
                    self.set_local(x, y, z, above_surface(y));
                }
                let cap = if (top as i32) >= baseline {
                    palette.grass
                } else {
                    palette.sand
                };
                self.set_local(x, top, z, cap);
                let dirt_floor = top.saturating_sub(dirt_depth);
                for y in dirt_floor..top {
                    self.set_local(x, y, z, palette.dirt);
                }
                for y in 0..dirt_floor {
                    self.set_local(x, y, z, palette.stone);
                }
            }
        }
        self.populated = true;
    }
}
