#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line entry point for the Starweave demo client.
//!
//! Boots the renderer against a seeded demo host and hands both to the
//! macroquad backend. The host is a test double, not a game: it exists to
//! exercise the full snapshot → scene → intent loop interactively.

mod demo;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use starweave_renderer::config::RendererConfig;
use starweave_renderer::Renderer;
use starweave_renderer_macroquad::MacroquadBackend;

use crate::demo::DemoHost;

/// Interactive universe viewer running against a seeded demo host.
#[derive(Debug, Parser)]
#[command(name = "starweave", version, about)]
struct Args {
    /// Synchronise presentation with the display refresh rate (default).
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    no_vsync: bool,

    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,

    /// Seed for the procedural demo universe.
    #[arg(long, default_value_t = 2177)]
    seed: u64,

    /// Path to a TOML renderer configuration overriding the defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between simulation ticks of the demo host.
    #[arg(long, default_value_t = 500)]
    tick_interval_ms: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RendererConfig::from_path(path)
            .with_context(|| format!("loading renderer config from {}", path.display()))?,
        None => RendererConfig::default(),
    };
    let renderer = Renderer::new(config).context("invalid renderer configuration")?;
    let host = DemoHost::new(args.seed, Duration::from_millis(args.tick_interval_ms));

    let vsync = args.vsync || !args.no_vsync;
    log::info!(
        "starting demo universe (seed {}, tick interval {}ms)",
        args.seed,
        args.tick_interval_ms
    );
    MacroquadBackend::new()
        .with_vsync(vsync)
        .with_show_fps(args.show_fps)
        .run(renderer, host)
}
