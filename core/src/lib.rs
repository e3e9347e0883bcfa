#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fermi Planet viewer.
//!
//! This crate defines the value types that connect adapters, the tile world,
//! and the camera system. Adapters translate device input into [`Command`]
//! values, the session applies those commands to the camera once per tick,
//! and the tile world answers visibility queries with plain [`Rect`] values.
//! Nothing in here knows about windows, textures or fonts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the viewer boots.
pub const WELCOME_BANNER: &str = "Welcome to Fermi Planet.";

/// Commands that express every permissible camera mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Reports that a pan key changed state.
    Pan {
        /// Direction bound to the key.
        direction: Direction,
        /// `true` on the press edge, `false` on the release edge.
        pressed: bool,
    },
    /// Reports a single scroll-wheel notch.
    Zoom {
        /// Signed zoom request carried by the notch.
        delta: ZoomDelta,
    },
}

/// Cardinal pan directions understood by the camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards negative world y.
    Up,
    /// Towards positive world y.
    Down,
    /// Towards negative world x.
    Left,
    /// Towards positive world x.
    Right,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Axis the direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Sign of the movement along [`Direction::axis`].
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Up | Self::Left => -1.0,
            Self::Down | Self::Right => 1.0,
        }
    }
}

/// World axis a direction belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

/// Discrete zoom request produced by one scroll-wheel notch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ZoomDelta {
    /// Scroll up, enlarge tiles.
    In,
    /// Scroll down, shrink tiles.
    Out,
    /// No zoom requested.
    #[default]
    None,
}

impl ZoomDelta {
    /// Derives a zoom request from a raw vertical wheel reading.
    ///
    /// Only the sign matters; platforms disagree on notch magnitudes.
    #[must_use]
    pub fn from_wheel(amount: f32) -> Self {
        if amount > 0.0 {
            Self::In
        } else if amount < 0.0 {
            Self::Out
        } else {
            Self::None
        }
    }

    /// Signed step count: `+1`, `-1` or `0`.
    #[must_use]
    pub const fn step(self) -> i8 {
        match self {
            Self::In => 1,
            Self::Out => -1,
            Self::None => 0,
        }
    }

    /// Returns `true` when the delta requests a change.
    #[must_use]
    pub const fn is_nonzero(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Axis-aligned rectangle in either world or screen space.
///
/// The type does not track which space it lives in; callers convert between
/// the two only through the screen projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent, never negative.
    pub width: f32,
    /// Vertical extent, never negative.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle, clamping negative extents to zero.
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Right edge (exclusive).
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner as an `(x, y)` pair.
    #[must_use]
    pub const fn origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Returns `true` when the two rectangles share interior area.
    ///
    /// Edges are half-open: rectangles that merely touch do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the rectangle moved by the provided offset.
    #[must_use]
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns the rectangle with every component multiplied by `factor`.
    #[must_use]
    pub fn scale(self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Visual material assigned to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Grass ground cover.
    Grass,
    /// Metal plating.
    Metal,
}

impl TileKind {
    /// Every tile kind, ordered by [`TileKind::index`].
    pub const ALL: [TileKind; 2] = [Self::Grass, Self::Metal];

    /// Stable index used by lookup tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Grass => 0,
            Self::Metal => 1,
        }
    }
}

/// Fixed location of a tile inside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    row: u32,
    column: u32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Positive per-tile extent in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSize {
    width: f32,
    height: f32,
}

impl TileSize {
    /// Creates a tile size, rejecting non-positive or non-finite extents.
    pub fn new(width: f32, height: f32) -> Result<Self, DimensionError> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(DimensionError::InvalidTileSize { width, height });
        }

        Ok(Self { width, height })
    }

    /// Creates a square tile size.
    pub fn square(length: f32) -> Result<Self, DimensionError> {
        Self::new(length, length)
    }

    /// Horizontal extent of a tile.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of a tile.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Returns the size multiplied by `factor`.
    ///
    /// Factors that are not positive and finite saturate at the smallest
    /// positive size instead of producing a degenerate tile.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        let factor = if factor.is_finite() && factor > 0.0 {
            factor
        } else {
            f32::MIN_POSITIVE
        };

        Self {
            width: (self.width * factor).max(f32::MIN_POSITIVE),
            height: (self.height * factor).max(f32::MIN_POSITIVE),
        }
    }
}

/// Reasons a tile grid description may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum DimensionError {
    /// The grid must contain at least one row.
    #[error("tile grid must have at least one row")]
    ZeroRows,
    /// The grid must contain at least one column.
    #[error("tile grid must have at least one column")]
    ZeroColumns,
    /// Tile extents must be positive and finite.
    #[error("tile size must be positive and finite (received {width}x{height})")]
    InvalidTileSize {
        /// Requested tile width.
        width: f32,
        /// Requested tile height.
        height: f32,
    },
    /// Zoom levels used as scale anchors must be positive and finite.
    #[error("reference zoom must be positive and finite (received {zoom})")]
    InvalidReferenceZoom {
        /// Requested reference zoom.
        zoom: f32,
    },
}
