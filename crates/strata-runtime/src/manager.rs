use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Sender;
use hashbrown::{HashMap, HashSet};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use strata_blocks::{BlockId, Face, MaterialClass};
use strata_chunk::{ChunkBuf, ChunkNeighbors, NeighborLinks};
use strata_edit::{EditCommand, EditTarget, affected_chunks, resolve_edit};
use strata_geom::Vec3;
use strata_mesh_cpu::{ChunkMeshCPU, build_chunk_mesh};
use strata_world::{ChunkCoord, WorldContext};

use crate::config::StreamConfig;
use crate::render::{ChunkRenderable, RenderCmd};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub generated: u64,
    pub evicted: u64,
    pub meshed: u64,
    pub edits_applied: u64,
}

struct ChunkEntry {
    buf: ChunkBuf,
    mesh: Option<ChunkMeshCPU>,
    uploaded: [bool; 2],
}

/// Owns every loaded chunk. Streams chunks around the viewer, applies edits
/// and pushes mesh changes to the renderer over `render_tx`.
pub struct ChunkManager {
    ctx: Arc<WorldContext>,
    cfg: StreamConfig,
    loaded: HashMap<ChunkCoord, ChunkEntry>,
    dirty: HashSet<ChunkCoord>,
    fresh: HashSet<ChunkCoord>,
    center: Option<ChunkCoord>,
    pool: ThreadPool,
    render_tx: Sender<RenderCmd>,
    stats: StreamStats,
}

impl ChunkManager {
    pub fn new(
        ctx: Arc<WorldContext>,
        cfg: StreamConfig,
        render_tx: Sender<RenderCmd>,
    ) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(cfg.gen_threads)
            .thread_name(|i| format!("strata-gen-{i}"))
            .build()?;
        Ok(Self {
            ctx,
            cfg,
            loaded: HashMap::new(),
            dirty: HashSet::new(),
            fresh: HashSet::new(),
            center: None,
            pool,
            render_tx,
            stats: StreamStats::default(),
        })
    }

    pub fn context(&self) -> &Arc<WorldContext> {
        &self.ctx
    }

    pub fn config(&self) -> &StreamConfig {
        &self.cfg
    }

    /// Streams around `viewer` if it entered a new chunk, then remeshes
    /// everything dirty. Returns whether the loaded set was recomputed.
    pub fn update(&mut self, viewer: Vec3) -> bool {
        let streamed = self.update_viewer(viewer);
        self.process_dirty();
        streamed
    }

    /// Loads and evicts around the viewer's chunk. Movement inside the
    /// current chunk is a no-op.
    pub fn update_viewer(&mut self, viewer: Vec3) -> bool {
        let center = ChunkCoord::from_world_f32(viewer.x, viewer.z, self.ctx.dims);
        if self.center == Some(center) {
            return false;
        }
        self.stream_around(center);
        true
    }

    /// Makes the loaded set equal the square of radius `render_distance`
    /// around `center`. New chunks are populated on the generation pool and
    /// left fresh and dirty; evicted chunks are removed before any linking.
    pub fn stream_around(&mut self, center: ChunkCoord) {
        let start = Instant::now();
        self.center = Some(center);
        let r = self.cfg.render_distance.max(0);
        let desired: HashSet<ChunkCoord> = center.square_around(r).collect();

        let mut to_create: Vec<ChunkCoord> = desired
            .iter()
            .copied()
            .filter(|c| !self.loaded.contains_key(c))
            .collect();
        to_create.sort_unstable();
        let mut to_unload: Vec<ChunkCoord> = self
            .loaded
            .keys()
            .copied()
            .filter(|c| !desired.contains(c))
            .collect();
        to_unload.sort_unstable();

        let ctx = self.ctx.as_ref();
        let generated: Vec<ChunkBuf> = self.pool.install(|| {
            to_create
                .par_iter()
                .map(|&coord| ChunkBuf::generate(ctx, coord))
                .collect()
        });
        for buf in generated {
            let coord = buf.coord;
            self.loaded.insert(
                coord,
                ChunkEntry {
                    buf,
                    mesh: None,
                    uploaded: [false; 2],
                },
            );
            self.fresh.insert(coord);
            self.dirty.insert(coord);
            self.stats.generated += 1;
        }
        for &coord in &to_create {
            self.mark_neighbors_dirty(coord);
        }

        for coord in &to_unload {
            self.unload(*coord);
        }

        log::info!(
            target: "stream",
            "center=({}, {}) created={} evicted={} loaded={} ms={}",
            center.x,
            center.z,
            to_create.len(),
            to_unload.len(),
            self.loaded.len(),
            start.elapsed().as_millis()
        );
    }

    /// Drops a loaded chunk, retracts its renderables and dirties the loaded
    /// chunks that linked to it.
    pub fn unload(&mut self, coord: ChunkCoord) {
        debug_assert!(
            self.loaded.contains_key(&coord),
            "unload of chunk ({}, {}) that is not loaded",
            coord.x,
            coord.z
        );
        let Some(entry) = self.loaded.remove(&coord) else {
            return;
        };
        for class in MaterialClass::ALL {
            if entry.uploaded[class.index()] {
                let _ = self.render_tx.send(RenderCmd::Remove { coord, class });
            }
        }
        self.dirty.remove(&coord);
        self.fresh.remove(&coord);
        self.mark_neighbors_dirty(coord);
        self.stats.evicted += 1;
    }

    /// Links and meshes every dirty chunk still loaded, then clears the dirty
    /// and fresh sets. Returns how many chunks were meshed.
    pub fn process_dirty(&mut self) -> usize {
        if self.dirty.is_empty() {
            return 0;
        }
        let mut work: Vec<ChunkCoord> = self.dirty.drain().collect();
        work.sort_unstable();
        let mut meshed = 0;
        for coord in work {
            if self.remesh(coord) {
                meshed += 1;
            }
        }
        self.fresh.clear();
        log::debug!(target: "stream", "meshed {meshed} dirty chunk(s)");
        meshed
    }

    fn link(&mut self, coord: ChunkCoord) {
        let links = NeighborLinks::from_loaded(coord, |c| self.loaded.contains_key(&c));
        if let Some(entry) = self.loaded.get_mut(&coord) {
            entry.buf.set_neighbors(links);
        }
    }

    fn remesh(&mut self, coord: ChunkCoord) -> bool {
        self.link(coord);
        // Taken out of the map so its neighbors can be borrowed from it.
        let Some(mut entry) = self.loaded.remove(&coord) else {
            return false;
        };
        entry.buf.ensure_populated(&self.ctx);
        {
            let loaded = &self.loaded;
            let nb = ChunkNeighbors::resolve(entry.buf.links(), |c| {
                loaded.get(&c).map(|e| &e.buf)
            });
            let reg = &self.ctx.registry;
            match entry.mesh.as_mut() {
                Some(mesh) => mesh.regenerate(&entry.buf, &nb, reg),
                None => entry.mesh = Some(build_chunk_mesh(&entry.buf, &nb, reg)),
            }
        }
        if let Some(mesh) = entry.mesh.as_ref() {
            let offset = entry.buf.world_offset();
            for class in MaterialClass::ALL {
                let r = ChunkRenderable::from_build(
                    coord,
                    class,
                    self.cfg.material_for(class),
                    offset,
                    mesh.part(class),
                );
                let cmd = if entry.uploaded[class.index()] {
                    RenderCmd::Update(r)
                } else {
                    RenderCmd::Add(r)
                };
                let _ = self.render_tx.send(cmd);
                entry.uploaded[class.index()] = true;
            }
        }
        self.loaded.insert(coord, entry);
        self.stats.meshed += 1;
        true
    }

    fn mark_neighbors_dirty(&mut self, coord: ChunkCoord) {
        for face in Face::HORIZONTAL {
            if let Some(n) = coord.neighbor(face) {
                if self.loaded.contains_key(&n) {
                    self.dirty.insert(n);
                }
            }
        }
    }

    fn is_solid_world(&self, wx: i32, wy: i32, wz: i32) -> bool {
        self.block_at_world(wx, wy, wz)
            .is_some_and(|id| self.ctx.registry.is_solid(id))
    }

    /// Applies one edit command. Returns what was written, or `None` when the
    /// ray hit nothing or the target cell is not in a loaded chunk.
    pub fn apply_edit(&mut self, cmd: &EditCommand) -> Option<EditTarget> {
        let params = self.cfg.march_params();
        let target = resolve_edit(cmd, params, |x, y, z| self.is_solid_world(x, y, z))?;
        let (wx, wy, wz) = target.world;
        let dims = self.ctx.dims;
        let (coord, local) = dims.split_world(wx, wy, wz)?;
        let entry = self.loaded.get_mut(&coord)?;
        let previous = entry.buf.get(local);
        entry.buf.set(local, target.id);

        for c in affected_chunks(coord, local, dims) {
            if self.loaded.contains_key(&c) {
                self.dirty.insert(c);
            }
        }
        self.stats.edits_applied += 1;
        log::info!(
            target: "edit",
            "({wx}, {wy}, {wz}) {} -> {} in chunk ({}, {})",
            self.ctx.registry.props(previous).name,
            self.ctx.registry.props(target.id).name,
            coord.x,
            coord.z
        );
        Some(target)
    }

    /// Turns the first solid block along the ray into air.
    pub fn break_block(&mut self, origin: Vec3, direction: Vec3) -> Option<EditTarget> {
        self.apply_edit(&EditCommand::break_block(origin, direction))
    }

    /// Applies every command; returns how many changed a block.
    pub fn apply_edits(&mut self, cmds: impl IntoIterator<Item = EditCommand>) -> usize {
        cmds.into_iter()
            .filter(|cmd| self.apply_edit(cmd).is_some())
            .count()
    }

    pub fn block_at_world(&self, wx: i32, wy: i32, wz: i32) -> Option<BlockId> {
        let (coord, local) = self.ctx.dims.split_world(wx, wy, wz)?;
        self.loaded.get(&coord).map(|e| e.buf.get(local))
    }

    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.loaded.contains_key(&coord)
    }

    pub fn is_dirty(&self, coord: ChunkCoord) -> bool {
        self.dirty.contains(&coord)
    }

    pub fn is_fresh(&self, coord: ChunkCoord) -> bool {
        self.fresh.contains(&coord)
    }

    pub fn loaded_len(&self) -> usize {
        self.loaded.len()
    }

    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    pub fn loaded_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.loaded.keys().copied()
    }

    pub fn dirty_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.dirty.iter().copied()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&ChunkBuf> {
        self.loaded.get(&coord).map(|e| &e.buf)
    }

    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMeshCPU> {
        self.loaded.get(&coord).and_then(|e| e.mesh.as_ref())
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }
}
