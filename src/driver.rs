use std::thread;
use std::time::Duration;

use strata_edit::EditCommand;
use strata_geom::Vec3;
use strata_runtime::{StreamStats, WorldThread};

use crate::config::DriverConfig;
use crate::renderer::{FrameStats, HeadlessRenderer, RenderStats};

/// Viewer path: a straight walk along +X at fixed speed.
pub struct ScriptedViewer {
    pos: Vec3,
    velocity: Vec3,
}

impl ScriptedViewer {
    pub fn new(start: Vec3, speed: f32) -> Self {
        Self {
            pos: start,
            velocity: Vec3::new(speed, 0.0, 0.0),
        }
    }

    pub fn advance(&mut self, dt: f32) -> Vec3 {
        self.pos += self.velocity * dt;
        self.pos
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }
}

/// Whether `frame` issues a break command under a `break_every` cadence.
pub fn is_edit_frame(frame: u32, break_every: u32) -> bool {
    break_every > 0 && frame > 0 && frame % break_every == 0
}

/// Straight down onto the column under the viewer, starting just above the
/// expected ground height.
pub fn dig_command(viewer: Vec3, ground: f32) -> EditCommand {
    let origin = Vec3::new(viewer.x, ground + 2.0, viewer.z);
    EditCommand::break_block(origin, Vec3::DOWN)
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub frames: u32,
    pub edits_sent: u32,
    pub last_frame: FrameStats,
    pub render: RenderStats,
    pub stream: Option<StreamStats>,
}

/// Render-thread loop: move the viewer, send edits, drain the world's
/// commands into the renderer and draw.
pub fn run_frames(
    world: WorldThread,
    cfg: &DriverConfig,
    start: Vec3,
    ground: impl Fn(f32, f32) -> f32,
) -> RunSummary {
    let mut viewer = ScriptedViewer::new(start, cfg.speed);
    let mut renderer = HeadlessRenderer::new();
    let mut summary = RunSummary::default();
    let dt = cfg.frame_ms as f32 / 1000.0;

    for frame in 0..cfg.frames {
        let p = viewer.advance(dt);
        world.set_viewer(p.x, p.z);
        if is_edit_frame(frame, cfg.break_every) {
            world.submit_edit(dig_command(p, ground(p.x, p.z)));
            summary.edits_sent += 1;
        }
        renderer.apply_all(world.drain_render_cmds());
        summary.last_frame = renderer.draw();
        if frame % 60 == 0 {
            log::debug!(
                "frame {frame} viewer=({:.1}, {:.1}) draws={}+{} verts={}+{}",
                p.x,
                p.z,
                summary.last_frame.opaque_draws,
                summary.last_frame.translucent_draws,
                summary.last_frame.opaque_vertices,
                summary.last_frame.translucent_vertices
            );
        }
        summary.frames += 1;
        thread::sleep(Duration::from_millis(cfg.frame_ms));
    }

    summary.stream = world.stop();
    summary.render = renderer.stats();
    log::info!(
        "ran {} frame(s), viewer ended at ({:.1}, {:.1})",
        summary.frames,
        viewer.position().x,
        viewer.position().z
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_cadence_skips_first_frame() {
        let frames: Vec<u32> = (0..100).filter(|f| is_edit_frame(*f, 30)).collect();
        assert_eq!(frames, vec![30, 60, 90]);
        assert!(!(0..100).any(|f| is_edit_frame(f, 0)));
    }

    #[test]
    fn viewer_walks_along_x() {
        let mut v = ScriptedViewer::new(Vec3::new(0.5, 0.0, 0.5), 10.0);
        let p = v.advance(0.5);
        assert_eq!(p, Vec3::new(5.5, 0.0, 0.5));
    }

    #[test]
    fn dig_starts_above_ground() {
        let cmd = dig_command(Vec3::new(3.0, 0.0, -2.0), 64.5);
        assert!(cmd.is_break());
        assert_eq!(cmd.origin, Vec3::new(3.0, 66.5, -2.0));
        assert_eq!(cmd.direction, Vec3::DOWN);
    }
}
