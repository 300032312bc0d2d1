//! Headless driver for the strata chunk engine.
#![forbid(unsafe_code)]

mod config;
mod driver;
mod renderer;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use strata_blocks::BlockRegistry;
use strata_geom::Vec3;
use strata_runtime::WorldThread;
use strata_world::{NoiseDensity, WorldContext};

use crate::config::AppConfig;

const DEFAULT_CONFIG: &str = "config/strata.toml";

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Stream and mesh voxel chunks around a scripted viewer")]
struct Cli {
    /// Config file; `config/strata.toml` is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Block registry TOML, overriding the config file.
    #[arg(long)]
    blocks: Option<PathBuf>,
    /// Render distance in chunks.
    #[arg(long)]
    radius: Option<i32>,
    #[arg(long)]
    frames: Option<u32>,
    #[arg(long)]
    seed: Option<i32>,
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, Box<dyn Error>> {
    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG);
            if path.exists() {
                AppConfig::load_from_path(&path)?
            } else {
                log::info!("no {DEFAULT_CONFIG}; using defaults");
                AppConfig::default()
            }
        }
    };
    if let Some(r) = cli.radius {
        cfg.streaming.render_distance = r;
    }
    if let Some(f) = cli.frames {
        cfg.driver.frames = f;
    }
    if let Some(s) = cli.seed {
        cfg.terrain.seed = s;
    }
    if cli.blocks.is_some() {
        cfg.blocks = cli.blocks.clone();
    }
    Ok(cfg)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let cfg = load_config(&cli)?;
    let reg = match &cfg.blocks {
        Some(path) => {
            let reg = BlockRegistry::load_from_path(path)?;
            log::info!("loaded {} block(s) from {}", reg.len(), path.display());
            reg
        }
        None => BlockRegistry::builtin(),
    };
    let dims = cfg.world.dims();
    let density = Arc::new(NoiseDensity::new(&cfg.terrain));
    let ctx = WorldContext::new(dims, Arc::new(reg), density.clone(), cfg.terrain.clone())?;
    log::info!(
        "chunks {}x{}x{}, seed {}, render distance {}",
        dims.sx,
        dims.sy,
        dims.sz,
        cfg.terrain.seed,
        cfg.streaming.render_distance
    );

    let start = Vec3::new(0.5, 0.0, 0.5);
    let world = WorldThread::spawn(Arc::new(ctx), cfg.streaming.clone(), (start.x, start.z))?;
    let summary = driver::run_frames(world, &cfg.driver, start, |x, z| {
        density.surface_height(x, z)
    });

    log::info!(
        "render: adds={} updates={} removes={} empty={} last frame draws={}+{}",
        summary.render.adds,
        summary.render.updates,
        summary.render.removes,
        summary.render.empty_uploads,
        summary.last_frame.opaque_draws,
        summary.last_frame.translucent_draws
    );
    match summary.stream {
        Some(s) => log::info!(
            "stream: generated={} evicted={} meshed={} edits={}/{}",
            s.generated,
            s.evicted,
            s.meshed,
            s.edits_applied,
            summary.edits_sent
        ),
        None => return Err("world thread exited abnormally".into()),
    }
    Ok(())
}
