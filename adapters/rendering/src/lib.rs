#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Fermi Planet adapters.
//!
//! Backends receive a [`Scene`] made of screen-space tiles and never see the
//! camera or the tile field. The projection from world to screen space lives
//! here so every backend draws the same picture.

use anyhow::Result as AnyResult;
use fermi_planet_core::{Command, Rect, TileKind};
use fermi_planet_world::VisibleTile;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, the frame clear color.
    pub const WHITE: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);

    /// Opaque yellow, the FPS overlay color.
    pub const YELLOW: Color = Color::from_rgb_u8(0xff, 0xff, 0x00);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Pixel region of the spritesheet that holds one tile image.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawSourceRegion")]
pub struct SourceRegion {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawSourceRegion {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl TryFrom<RawSourceRegion> for SourceRegion {
    type Error = RenderingError;

    fn try_from(raw: RawSourceRegion) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl SourceRegion {
    /// Creates a region, rejecting empty or negative extents and negative offsets.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, RenderingError> {
        let valid_offset = |value: f32| value.is_finite() && value >= 0.0;
        let valid_extent = |value: f32| value.is_finite() && value > 0.0;
        if !valid_offset(x) || !valid_offset(y) || !valid_extent(width) || !valid_extent(height) {
            return Err(RenderingError::InvalidSourceRegion {
                x,
                y,
                width,
                height,
            });
        }

        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Left edge in spritesheet pixels.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge in spritesheet pixels.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Width in spritesheet pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height in spritesheet pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Lookup table from tile kind to spritesheet region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileClips {
    regions: [SourceRegion; TileKind::ALL.len()],
}

impl Default for TileClips {
    fn default() -> Self {
        // Both images are 32x32, stacked vertically in the sheet.
        Self {
            regions: [
                SourceRegion {
                    x: 0.0,
                    y: 0.0,
                    width: 32.0,
                    height: 32.0,
                },
                SourceRegion {
                    x: 0.0,
                    y: 32.0,
                    width: 32.0,
                    height: 32.0,
                },
            ],
        }
    }
}

impl TileClips {
    /// Region drawn for `kind`.
    #[must_use]
    pub const fn region(&self, kind: TileKind) -> SourceRegion {
        self.regions[kind.index()]
    }

    /// Returns the table with the region for `kind` replaced.
    #[must_use]
    pub fn with_region(mut self, kind: TileKind, region: SourceRegion) -> Self {
        self.regions[kind.index()] = region;
        self
    }
}

/// Projects a world rectangle onto the screen.
///
/// The rectangle is translated by the view's origin and then scaled by
/// `viewport_width / view.width`. A degenerate view leaves the scale at one.
#[must_use]
pub fn project_to_screen(view: Rect, viewport_width: f32, world_rect: Rect) -> Rect {
    let scale = if view.width <= f32::EPSILON {
        1.0
    } else {
        viewport_width / view.width
    };

    world_rect.translate(-view.x, -view.y).scale(scale)
}

/// Tile ready to be drawn at a screen position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTile {
    /// Material selecting the spritesheet region.
    pub kind: TileKind,
    /// Destination rectangle in screen pixels.
    pub rect: Rect,
}

/// Scene description handed to the backend each tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Tiles to draw, back to front.
    pub tiles: Vec<ScreenTile>,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the scene's tiles with `visible` projected through `view`.
    ///
    /// The tile buffer is reused across ticks.
    pub fn populate(
        &mut self,
        view: Rect,
        viewport_width: f32,
        visible: impl IntoIterator<Item = VisibleTile>,
    ) {
        self.tiles.clear();
        self.tiles
            .extend(visible.into_iter().map(|tile| ScreenTile {
                kind: tile.kind,
                rect: project_to_screen(view, viewport_width, tile.world_rect),
            }));
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Window width in pixels.
    pub viewport_width: u32,
    /// Window height in pixels.
    pub viewport_height: u32,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        viewport_width: u32,
        viewport_height: u32,
        scene: Scene,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            viewport_width,
            viewport_height,
            scene,
        }
    }
}

/// Input gathered by the backend before the scene is updated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Camera commands observed this tick, in arrival order.
    pub commands: Vec<Command>,
}

/// Rendering backend capable of presenting Fermi Planet scenes.
pub trait RenderingBackend {
    /// Runs the backend until the operator quits.
    ///
    /// `update_scene` is called once per tick with the elapsed frame time and
    /// the input gathered for the tick, and may rewrite the scene before it is
    /// drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Caps the tick rate by reporting how long a finished tick should sleep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePacer {
    frame_budget: Option<Duration>,
}

impl FramePacer {
    /// Default target tick rate in ticks per second.
    pub const DEFAULT_TICK_RATE: u32 = 60;

    /// Creates a pacer targeting `tick_rate` ticks per second.
    ///
    /// A rate of zero disables pacing.
    #[must_use]
    pub fn new(tick_rate: u32) -> Self {
        let frame_budget = if tick_rate == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / tick_rate)
        };
        Self { frame_budget }
    }

    /// Time allotted to a single tick, if pacing is enabled.
    #[must_use]
    pub const fn frame_budget(&self) -> Option<Duration> {
        self.frame_budget
    }

    /// Sleep owed by a tick that took `elapsed`; `None` when it overran.
    #[must_use]
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        let budget = self.frame_budget?;
        let remaining = budget.checked_sub(elapsed)?;
        if remaining.is_zero() {
            None
        } else {
            Some(remaining)
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TICK_RATE)
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Spritesheet regions need a non-negative offset and a positive size.
    #[error("invalid spritesheet region {width}x{height} at ({x}, {y})")]
    InvalidSourceRegion {
        /// Requested left edge.
        x: f32,
        /// Requested top edge.
        y: f32,
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}
