//! Block edit commands, ray marching and edit dirty-region rules.
#![forbid(unsafe_code)]

use strata_blocks::BlockId;
use strata_blocks::types::AIR;
use strata_geom::{Ray, Vec3};
use strata_world::{ChunkCoord, ChunkDims, LocalPos};

/// A request from the input side. Target air breaks the first solid block
/// along the ray; any other target is placed in front of it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditCommand {
    pub origin: Vec3,
    pub direction: Vec3,
    pub target: BlockId,
}

impl EditCommand {
    pub fn break_block(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            target: AIR,
        }
    }

    pub fn place_block(origin: Vec3, direction: Vec3, target: BlockId) -> Self {
        Self {
            origin,
            direction,
            target,
        }
    }

    #[inline]
    pub fn is_break(&self) -> bool {
        self.target == AIR
    }
}

/// Fixed-step march settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarchParams {
    pub step: f32,
    pub reach: f32,
}

impl Default for MarchParams {
    fn default() -> Self {
        Self {
            step: 0.05,
            reach: 8.0,
        }
    }
}

impl MarchParams {
    /// Number of samples taken along the ray.
    pub fn steps(&self) -> usize {
        if !(self.step > 0.0) || !(self.reach > 0.0) {
            return 0;
        }
        (self.reach / self.step).round() as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayHit {
    /// World voxel of the first solid sample.
    pub block: (i32, i32, i32),
    /// Last distinct voxel sampled before `block`, if any.
    pub prev: Option<(i32, i32, i32)>,
}

/// Samples `origin + dir * step * i` for `i = 1..=steps` and returns the
/// first voxel for which `is_solid` holds. Degenerate directions never hit.
pub fn march_first_solid<F>(
    origin: Vec3,
    dir: Vec3,
    params: MarchParams,
    mut is_solid: F,
) -> Option<RayHit>
where
    F: FnMut(i32, i32, i32) -> bool,
{
    let ray = Ray::new(origin, dir)?;
    let mut prev: Option<(i32, i32, i32)> = None;
    for p in ray.march(params.step, params.steps()) {
        let v = p.voxel();
        if prev == Some(v) {
            continue;
        }
        if is_solid(v.0, v.1, v.2) {
            return Some(RayHit { block: v, prev });
        }
        prev = Some(v);
    }
    None
}

/// World voxel an edit command writes to, and the id it writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditTarget {
    pub world: (i32, i32, i32),
    pub id: BlockId,
}

/// Resolves where `cmd` lands. Breaks write air into the hit voxel; places
/// write the target into the cell sampled just before the hit.
pub fn resolve_edit<F>(cmd: &EditCommand, params: MarchParams, is_solid: F) -> Option<EditTarget>
where
    F: FnMut(i32, i32, i32) -> bool,
{
    let hit = march_first_solid(cmd.origin, cmd.direction, params, is_solid)?;
    if cmd.is_break() {
        return Some(EditTarget {
            world: hit.block,
            id: AIR,
        });
    }
    hit.prev.map(|world| EditTarget {
        world,
        id: cmd.target,
    })
}

/// Chunks whose meshes an edit at `local` in `coord` invalidates: the owner,
/// then one neighbor per chunk boundary the voxel touches.
pub fn affected_chunks(coord: ChunkCoord, local: LocalPos, dims: ChunkDims) -> Vec<ChunkCoord> {
    let mut affected = vec![coord];
    affected.extend(local.boundary_faces(dims).filter_map(|f| coord.neighbor(f)));
    affected
}
