use hashbrown::HashMap;
use strata_blocks::MaterialClass;
use strata_mesh_cpu::FLOATS_PER_VERTEX;
use strata_runtime::{ChunkRenderable, RenderCmd};
use strata_world::ChunkCoord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub adds: u64,
    pub updates: u64,
    pub removes: u64,
    pub empty_uploads: u64,
}

/// Vertices submitted per pass in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub opaque_draws: usize,
    pub opaque_vertices: usize,
    pub translucent_draws: usize,
    pub translucent_vertices: usize,
}

/// Render-thread consumer standing in for a GPU backend: keeps the current
/// renderable per chunk and class and "draws" them in two passes.
#[derive(Default)]
pub struct HeadlessRenderer {
    renderables: HashMap<(ChunkCoord, MaterialClass), ChunkRenderable>,
    stats: RenderStats,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, cmd: RenderCmd) {
        match cmd {
            RenderCmd::Add(r) => {
                self.stats.adds += 1;
                self.upload(r);
            }
            RenderCmd::Update(r) => {
                self.stats.updates += 1;
                self.upload(r);
            }
            RenderCmd::Remove { coord, class } => {
                self.stats.removes += 1;
                self.renderables.remove(&(coord, class));
            }
        }
    }

    pub fn apply_all(&mut self, cmds: impl IntoIterator<Item = RenderCmd>) {
        for cmd in cmds {
            self.apply(cmd);
        }
    }

    fn upload(&mut self, r: ChunkRenderable) {
        let key = (r.coord, r.class);
        if r.is_empty() {
            log::debug!(
                "empty upload for chunk ({}, {}) {:?}; nothing to draw",
                r.coord.x,
                r.coord.z,
                r.class
            );
            self.stats.empty_uploads += 1;
            self.renderables.remove(&key);
            return;
        }
        self.renderables.insert(key, r);
    }

    /// Opaque pass first, then translucent.
    pub fn draw(&self) -> FrameStats {
        let mut frame = FrameStats::default();
        for class in MaterialClass::ALL {
            for r in self.renderables.values().filter(|r| r.class == class) {
                let verts = r.vertices.len() / FLOATS_PER_VERTEX;
                match class {
                    MaterialClass::Opaque => {
                        frame.opaque_draws += 1;
                        frame.opaque_vertices += verts;
                    }
                    MaterialClass::Translucent => {
                        frame.translucent_draws += 1;
                        frame.translucent_vertices += verts;
                    }
                }
            }
        }
        frame
    }

    pub fn len(&self) -> usize {
        self.renderables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderables.is_empty()
    }

    pub fn contains(&self, coord: ChunkCoord, class: MaterialClass) -> bool {
        self.renderables.contains_key(&(coord, class))
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }
}
