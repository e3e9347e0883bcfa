#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Fermi Planet.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Spritesheet and font locations come from a TOML asset manifest read when
//! the window opens. Failing to load either aborts the run with an error.

mod assets;

use self::assets::{AssetManifest, Assets};
use anyhow::{Context, Result};
use fermi_planet_core::{Command, Direction, ZoomDelta};
use fermi_planet_rendering::{
    Color, FrameInput, FramePacer, Presentation, RenderingBackend, Scene,
};
use macroquad::{
    input::{is_key_pressed, is_key_released, mouse_wheel, KeyCode},
    math::{vec2, Rect as MacroquadRect},
    text::{draw_text_ex, TextParams},
    texture::{draw_texture_ex, DrawTextureParams},
};
use std::{
    collections::VecDeque,
    path::PathBuf,
    sync::mpsc,
    time::{Duration, Instant},
};

const DEFAULT_MANIFEST_PATH: &str = "assets/manifest.toml";

/// Arrow keys and the pan direction each one drives.
const PAN_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
];

/// Edge transitions of one pan key observed during a frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyObservation {
    /// Direction bound to the key.
    pub direction: Direction,
    /// Whether the key went down this frame.
    pub pressed: bool,
    /// Whether the key came up this frame.
    pub released: bool,
}

/// Translates raw keyboard and wheel observations into camera commands.
///
/// Pan commands come first in key order. A key both pressed and released
/// within one frame yields the press followed by the release. Any non-zero
/// vertical wheel motion produces a single zoom command last.
#[doc(hidden)]
#[must_use]
pub fn frame_input_from_observations(keys: &[KeyObservation], wheel_y: f32) -> FrameInput {
    let mut commands = Vec::with_capacity(keys.len() + 1);
    for key in keys {
        if key.pressed {
            commands.push(Command::Pan {
                direction: key.direction,
                pressed: true,
            });
        }
        if key.released {
            commands.push(Command::Pan {
                direction: key.direction,
                pressed: false,
            });
        }
    }

    let delta = ZoomDelta::from_wheel(wheel_y);
    if delta.is_nonzero() {
        commands.push(Command::Zoom { delta });
    }

    FrameInput { commands }
}

fn gather_frame_input() -> FrameInput {
    let observations = PAN_KEYS.map(|(key, direction)| KeyObservation {
        direction,
        pressed: is_key_pressed(key),
        released: is_key_released(key),
    });
    let (_, wheel_y) = mouse_wheel();
    frame_input_from_observations(&observations, wheel_y)
}

#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    manifest_path: PathBuf,
    pacer: FramePacer,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: true,
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            pacer: FramePacer::default(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the frame rate overlay is drawn.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Selects the asset manifest loaded when the window opens.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    /// Caps the tick rate. Zero disables the cap.
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.pacer = FramePacer::new(tick_rate);
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            match self.frame_times.pop_front() {
                Some(removed) => {
                    self.window_duration = self.window_duration.saturating_sub(removed);
                }
                None => break,
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };

        self.elapsed = Duration::ZERO;
        self.frames = 0;

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

/// Paces frames from one frame start to the next, so presentation counts
/// against the tick budget.
#[derive(Clone, Copy, Debug)]
struct FrameClock {
    pacer: FramePacer,
    previous_start: Option<Instant>,
}

impl FrameClock {
    fn new(pacer: FramePacer) -> Self {
        Self {
            pacer,
            previous_start: None,
        }
    }

    /// Sleep owed before a frame may start at `now`.
    fn owed_before(&self, now: Instant) -> Option<Duration> {
        let previous = self.previous_start?;
        self.pacer
            .remaining(now.saturating_duration_since(previous))
    }

    fn start_frame(&mut self, now: Instant) {
        self.previous_start = Some(now);
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            manifest_path,
            pacer,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            viewport_width,
            viewport_height,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: i32::try_from(viewport_width).context("viewport width too large")?,
            window_height: i32::try_from(viewport_height).context("viewport height too large")?,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let assets = match AssetManifest::from_path(&manifest_path)
                .and_then(|manifest| manifest.load())
                .context("failed to initialise assets")
            {
                Ok(assets) => {
                    let _ = init_sender.send(Ok(()));
                    assets
                }
                Err(error) => {
                    let _ = init_sender.send(Err(error));
                    return;
                }
            };

            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let mut fps_label = String::from("FPS: 0.0");

            let mut clock = FrameClock::new(pacer);

            loop {
                if let Some(rest) = clock.owed_before(Instant::now()) {
                    std::thread::sleep(rest);
                }
                clock.start_frame(Instant::now());

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                if KeyboardShortcuts::poll().quit_requested {
                    break;
                }

                update_scene(frame_dt, gather_frame_input(), &mut scene);

                macroquad::window::clear_background(to_macroquad_color(clear_color));
                draw_scene(&scene, &assets);

                if let Some(metrics) = fps_counter.record_frame(frame_dt) {
                    tracing::debug!(
                        fps = metrics.per_second,
                        fps_10s = metrics.trailing_ten_seconds,
                        tiles = scene.tiles.len(),
                        "frame rate"
                    );
                    fps_label = format!("FPS: {:.1}", metrics.per_second);
                }
                if show_fps {
                    draw_fps_overlay(&fps_label, &assets);
                }

                macroquad::window::next_frame().await;
            }
        });

        init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn draw_scene(scene: &Scene, assets: &Assets) {
    let tint = macroquad::color::WHITE;
    for tile in &scene.tiles {
        let region = assets.clips.region(tile.kind);
        draw_texture_ex(
            assets.spritesheet,
            tile.rect.x,
            tile.rect.y,
            tint,
            DrawTextureParams {
                dest_size: Some(vec2(tile.rect.width, tile.rect.height)),
                source: Some(MacroquadRect::new(
                    region.x(),
                    region.y(),
                    region.width(),
                    region.height(),
                )),
                ..DrawTextureParams::default()
            },
        );
    }
}

fn draw_fps_overlay(label: &str, assets: &Assets) {
    let _ = draw_text_ex(
        label,
        0.0,
        f32::from(assets.font_size),
        TextParams {
            font: assets.font,
            font_size: assets.font_size,
            color: to_macroquad_color(Color::YELLOW),
            ..TextParams::default()
        },
    );
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
