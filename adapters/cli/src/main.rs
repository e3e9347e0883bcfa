#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that opens the Fermi Planet viewer.

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use fermi_planet_rendering::{Color, FramePacer, Presentation, RenderingBackend, Scene};
use fermi_planet_rendering_macroquad::MacroquadBackend;
use fermi_planet_system_bootstrap::{Bootstrap, Config};
use fermi_planet_system_camera::CameraConfig;
use tracing_subscriber::EnvFilter;

const WINDOW_TITLE: &str = "Fermi Planet";
const INIT_FAILURE: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "fermi-planet", about = "Pan and zoom across a generated tile field")]
struct Cli {
    /// Number of tile rows
    #[arg(long, default_value_t = 64)]
    rows: u32,

    /// Number of tile columns
    #[arg(long, default_value_t = 64)]
    columns: u32,

    /// Tile side length in pixels at the default zoom
    #[arg(long, default_value_t = 32.0)]
    tile_size: f32,

    /// Terrain seed; a random one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Asset manifest naming the spritesheet and font
    #[arg(long, default_value = "assets/manifest.toml")]
    manifest: PathBuf,

    /// Ticks per second; zero removes the cap
    #[arg(long, default_value_t = FramePacer::DEFAULT_TICK_RATE)]
    tick_rate: u32,

    /// World units panned per tick while an arrow key is held
    #[arg(long, default_value_t = 8.0, value_parser = parse_pan_speed)]
    pan_speed: f32,

    /// Hide the frame rate overlay
    #[arg(long)]
    hide_fps: bool,

    /// Synchronise presentation with the display refresh rate
    #[arg(long)]
    vsync: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_pan_speed(value: &str) -> Result<f32, String> {
    let speed: f32 = value
        .parse()
        .map_err(|error| format!("`{value}` is not a number: {error}"))?;
    if speed.is_finite() && speed > 0.0 {
        Ok(speed)
    } else {
        Err(format!("pan speed must be finite and positive, got {value}"))
    }
}

impl Cli {
    fn session_config(&self, seed: u64) -> Config {
        Config {
            rows: self.rows,
            columns: self.columns,
            tile_length: self.tile_size,
            seed,
            camera: CameraConfig {
                speed: self.pan_speed,
                ..CameraConfig::default()
            },
            ..Config::default()
        }
    }
}

/// Entry point for the Fermi Planet command-line interface.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error:#}");
            ExitCode::from(INIT_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let bootstrap = Bootstrap;
    println!("{}", bootstrap.welcome_banner());

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "terrain seed");

    let config = cli.session_config(seed);
    let mut session = bootstrap
        .session(&config)
        .context("failed to create viewing session")?;

    let viewport_width = config.viewport_width;
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Color::WHITE,
        config.viewport_width as u32,
        config.viewport_height as u32,
        Scene::new(),
    );

    let backend = MacroquadBackend::new()
        .with_manifest_path(cli.manifest)
        .with_tick_rate(cli.tick_rate)
        .with_show_fps(!cli.hide_fps);
    let backend = if cli.vsync {
        backend.with_vsync(true)
    } else {
        backend
    };

    backend.run(presentation, move |_frame_dt, input, scene| {
        let summary = session.tick(&input.commands);
        scene.populate(summary.view_rect, viewport_width, session.visible_tiles());
    })
}
