//! Chunk streaming runtime: chunk manager, world thread and render queue.
#![forbid(unsafe_code)]

mod config;
mod manager;
mod render;
mod viewer;
mod world_thread;

pub use config::StreamConfig;
pub use manager::{ChunkManager, StreamStats};
pub use render::{ChunkRenderable, MaterialHandle, RenderCmd};
pub use viewer::ViewerPosition;
pub use world_thread::WorldThread;
