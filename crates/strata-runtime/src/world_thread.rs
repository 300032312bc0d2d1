use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use strata_edit::EditCommand;
use strata_world::WorldContext;

use crate::config::StreamConfig;
use crate::manager::{ChunkManager, StreamStats};
use crate::render::RenderCmd;
use crate::viewer::ViewerPosition;

/// State both threads touch directly. Everything else crosses through the
/// edit and render channels.
#[derive(Debug)]
struct WorldShared {
    viewer: ViewerPosition,
    running: AtomicBool,
}

impl WorldShared {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

/// Handle to the streaming thread that owns the [`ChunkManager`].
pub struct WorldThread {
    edit_tx: Sender<EditCommand>,
    render_rx: Receiver<RenderCmd>,
    shared: Arc<WorldShared>,
    handle: Option<JoinHandle<StreamStats>>,
}

impl WorldThread {
    pub fn spawn(
        ctx: Arc<WorldContext>,
        cfg: StreamConfig,
        viewer: (f32, f32),
    ) -> Result<Self, Box<dyn Error>> {
        let (edit_tx, edit_rx) = unbounded::<EditCommand>();
        let (render_tx, render_rx) = unbounded::<RenderCmd>();
        let shared = Arc::new(WorldShared {
            viewer: ViewerPosition::new(viewer.0, viewer.1),
            running: AtomicBool::new(true),
        });
        let idle = Duration::from_millis(cfg.idle_sleep_ms);
        let manager = ChunkManager::new(ctx, cfg, render_tx)?;
        let handle = {
            let shared = shared.clone();
            thread::Builder::new()
                .name("strata-world".into())
                .spawn(move || run_world_loop(manager, &shared, &edit_rx, idle))?
        };
        log::info!(target: "stream", "world thread started at ({}, {})", viewer.0, viewer.1);
        Ok(Self {
            edit_tx,
            render_rx,
            shared,
            handle: Some(handle),
        })
    }

    #[inline]
    pub fn set_viewer(&self, x: f32, z: f32) {
        self.shared.viewer.store(x, z);
    }

    pub fn submit_edit(&self, cmd: EditCommand) {
        let _ = self.edit_tx.send(cmd);
    }

    /// Everything the world thread has published since the last drain.
    pub fn drain_render_cmds(&self) -> Vec<RenderCmd> {
        self.render_rx.try_iter().collect()
    }

    /// Signals the loop to exit and joins it. `None` if the thread panicked.
    pub fn stop(mut self) -> Option<StreamStats> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<StreamStats> {
        self.shared.running.store(false, Ordering::Release);
        let handle = self.handle.take()?;
        match handle.join() {
            Ok(stats) => Some(stats),
            Err(_) => {
                log::warn!(target: "stream", "world thread panicked");
                None
            }
        }
    }
}

impl Drop for WorldThread {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

fn run_world_loop(
    mut manager: ChunkManager,
    shared: &WorldShared,
    edits: &Receiver<EditCommand>,
    idle: Duration,
) -> StreamStats {
    while shared.is_running() {
        let mut busy = false;
        let pending: Vec<EditCommand> = edits.try_iter().collect();
        if !pending.is_empty() {
            manager.apply_edits(pending);
            busy = true;
        }
        if manager.update_viewer(shared.viewer.as_vec3()) {
            busy = true;
        }
        if manager.process_dirty() > 0 {
            busy = true;
        }
        if !busy {
            thread::sleep(idle);
        }
    }
    let stats = manager.stats();
    log::info!(
        target: "stream",
        "world thread stopped: generated={} evicted={} meshed={} edits={}",
        stats.generated,
        stats.evicted,
        stats.meshed,
        stats.edits_applied
    );
    stats
}
