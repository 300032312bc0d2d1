use std::sync::Arc;

use strata_blocks::MaterialClass;
use strata_mesh_cpu::MeshBuild;
use strata_world::ChunkCoord;

/// Opaque shader/material slot chosen by the application per material class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct MaterialHandle(pub u32);

/// Snapshot of one material class of one chunk mesh, ready for upload.
#[derive(Clone, Debug)]
pub struct ChunkRenderable {
    pub coord: ChunkCoord,
    pub class: MaterialClass,
    pub material: MaterialHandle,
    /// World-space origin of the chunk; vertex positions are relative to it.
    pub offset: [i32; 3],
    pub vertices: Arc<[f32]>,
}

impl ChunkRenderable {
    pub fn from_build(
        coord: ChunkCoord,
        class: MaterialClass,
        material: MaterialHandle,
        offset: [i32; 3],
        mb: &MeshBuild,
    ) -> Self {
        Self {
            coord,
            class,
            material,
            offset,
            vertices: Arc::from(mb.vertices()),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// World thread to render thread.
#[derive(Clone, Debug)]
pub enum RenderCmd {
    Add(ChunkRenderable),
    Update(ChunkRenderable),
    Remove { coord: ChunkCoord, class: MaterialClass },
}

impl RenderCmd {
    pub fn coord(&self) -> ChunkCoord {
        match self {
            RenderCmd::Add(r) | RenderCmd::Update(r) => r.coord,
            RenderCmd::Remove { coord, .. } => *coord,
        }
    }

    pub fn class(&self) -> MaterialClass {
        match self {
            RenderCmd::Add(r) | RenderCmd::Update(r) => r.class,
            RenderCmd::Remove { class, .. } => *class,
        }
    }
}
