#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative tile world for Fermi Planet.
//!
//! The world is a fixed grid of tiles laid out row-major without gaps. Tiles
//! never move between grid slots; only their world-space rectangles are
//! recomputed when the per-tile size changes. Visibility is a pure query over
//! an immutable borrow of the field.

use fermi_planet_core::{DimensionError, GridPosition, Rect, TileKind, TileSize};

/// Source of tile kinds consulted once per tile while a field is built.
pub trait TileKindSource {
    /// Chooses the kind for the tile at `position`.
    fn next_kind(&mut self, position: GridPosition) -> TileKind;
}

impl<F> TileKindSource for F
where
    F: FnMut(GridPosition) -> TileKind,
{
    fn next_kind(&mut self, position: GridPosition) -> TileKind {
        self(position)
    }
}

/// Single grid slot with its material and current world rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    kind: TileKind,
    position: GridPosition,
    world_rect: Rect,
}

impl Tile {
    fn new(kind: TileKind, position: GridPosition, tile_size: TileSize) -> Self {
        Self {
            kind,
            position,
            world_rect: placement(position, tile_size),
        }
    }

    /// Material of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Grid slot occupied by the tile.
    #[must_use]
    pub const fn position(&self) -> GridPosition {
        self.position
    }

    /// Rectangle covered by the tile in world units.
    #[must_use]
    pub const fn world_rect(&self) -> Rect {
        self.world_rect
    }
}

fn placement(position: GridPosition, tile_size: TileSize) -> Rect {
    Rect::new(
        position.column() as f32 * tile_size.width(),
        position.row() as f32 * tile_size.height(),
        tile_size.width(),
        tile_size.height(),
    )
}

/// Tile reported by a visibility query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleTile {
    /// Material of the tile.
    pub kind: TileKind,
    /// Grid slot occupied by the tile.
    pub position: GridPosition,
    /// Rectangle covered by the tile in world units.
    pub world_rect: Rect,
}

/// Fixed-size grid of tiles stored in row-major order.
#[derive(Clone, Debug)]
pub struct TileField {
    rows: u32,
    columns: u32,
    tile_size: TileSize,
    tiles: Vec<Tile>,
}

impl TileField {
    /// Allocates `rows * columns` tiles, drawing each kind from `source`.
    ///
    /// Kinds are requested in row-major order, so a deterministic source
    /// always yields the same field.
    pub fn new(
        rows: u32,
        columns: u32,
        tile_size: TileSize,
        source: &mut impl TileKindSource,
    ) -> Result<Self, DimensionError> {
        if rows == 0 {
            return Err(DimensionError::ZeroRows);
        }
        if columns == 0 {
            return Err(DimensionError::ZeroColumns);
        }

        let mut tiles = Vec::with_capacity(rows as usize * columns as usize);
        for row in 0..rows {
            for column in 0..columns {
                let position = GridPosition::new(row, column);
                tiles.push(Tile::new(source.next_kind(position), position, tile_size));
            }
        }

        tracing::debug!(rows, columns, tiles = tiles.len(), "tile field allocated");

        Ok(Self {
            rows,
            columns,
            tile_size,
            tiles,
        })
    }

    /// Recomputes every tile rectangle for a new per-tile size.
    ///
    /// Grid placement is preserved; only positions and extents change.
    pub fn rescale(&mut self, tile_size: TileSize) {
        self.tile_size = tile_size;
        for tile in &mut self.tiles {
            tile.world_rect = placement(tile.position, tile_size);
        }

        tracing::debug!(
            width = tile_size.width(),
            height = tile_size.height(),
            "tile field rescaled"
        );
    }

    /// Yields, in row-major order, every tile whose rectangle intersects `view`.
    pub fn visible_tiles(&self, view: Rect) -> impl Iterator<Item = VisibleTile> + '_ {
        self.tiles
            .iter()
            .filter(move |tile| tile.world_rect.intersects(&view))
            .map(|tile| VisibleTile {
                kind: tile.kind,
                position: tile.position,
                world_rect: tile.world_rect,
            })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Current per-tile size.
    #[must_use]
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Total number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`; a field holds at least one tile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Looks up the tile stored at `position`.
    #[must_use]
    pub fn tile(&self, position: GridPosition) -> Option<&Tile> {
        if position.row() >= self.rows || position.column() >= self.columns {
            return None;
        }

        let index = position.row() as usize * self.columns as usize + position.column() as usize;
        self.tiles.get(index)
    }

    /// Every tile in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Rectangle spanned by the whole grid at the current tile size.
    #[must_use]
    pub fn world_extent(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.columns as f32 * self.tile_size.width(),
            self.rows as f32 * self.tile_size.height(),
        )
    }
}

/// Maps a camera zoom level onto a per-tile size.
///
/// The mapping is `base * zoom / reference_zoom`: strictly increasing in
/// zoom and equal to `base` at the reference zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileScale {
    base: TileSize,
    reference_zoom: f32,
}

impl TileScale {
    /// Creates a scale anchored so that `reference_zoom` maps to `base`.
    pub fn new(base: TileSize, reference_zoom: f32) -> Result<Self, DimensionError> {
        if !reference_zoom.is_finite() || reference_zoom <= 0.0 {
            return Err(DimensionError::InvalidReferenceZoom {
                zoom: reference_zoom,
            });
        }

        Ok(Self {
            base,
            reference_zoom,
        })
    }

    /// Tile size at the reference zoom.
    #[must_use]
    pub const fn base(&self) -> TileSize {
        self.base
    }

    /// Zoom level that maps onto [`TileScale::base`].
    #[must_use]
    pub const fn reference_zoom(&self) -> f32 {
        self.reference_zoom
    }

    /// Tile size to use at `zoom`.
    #[must_use]
    pub fn tile_size_for(&self, zoom: f32) -> TileSize {
        self.base.scaled(zoom / self.reference_zoom)
    }
}
