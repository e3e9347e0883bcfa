#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that assembles a Fermi Planet viewing session.
//!
//! A [`Session`] owns the camera, the tile field and the zoom-to-tile-size
//! policy side by side. Neither the camera nor the field references the
//! other; the session reads the camera's view rectangle and hands it to the
//! field's visibility query once per tick.

use fermi_planet_core::{Command, DimensionError, Rect, TileSize, WELCOME_BANNER};
use fermi_planet_system_camera::{Camera, CameraConfig};
use fermi_planet_system_terrain::SeededTerrain;
use fermi_planet_world::{TileField, TileScale, VisibleTile};

/// Parameters required to build a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Number of tile rows in the field.
    pub rows: u32,
    /// Number of tile columns in the field.
    pub columns: u32,
    /// Side length of a tile at the camera's default zoom.
    pub tile_length: f32,
    /// Width of the window in pixels.
    pub viewport_width: f32,
    /// Height of the window in pixels.
    pub viewport_height: f32,
    /// Seed for the terrain generator.
    pub seed: u64,
    /// Camera motion and zoom tuning.
    pub camera: CameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 64,
            columns: 64,
            tile_length: 32.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            seed: 0,
            camera: CameraConfig::default(),
        }
    }
}

/// Produces the data required to start viewing.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Banner shown when the viewer starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        WELCOME_BANNER
    }

    /// Builds a session from `config`, generating the field from its seed.
    pub fn session(&self, config: &Config) -> Result<Session, DimensionError> {
        let tile_size = TileSize::square(config.tile_length)?;
        let camera = Camera::with_config(
            config.viewport_width,
            config.viewport_height,
            config.camera,
        );
        let scale = TileScale::new(tile_size, camera.zoom())?;
        let field = TileField::new(
            config.rows,
            config.columns,
            tile_size,
            &mut SeededTerrain::new(config.seed),
        )?;

        tracing::info!(
            rows = config.rows,
            columns = config.columns,
            tile_length = config.tile_length,
            seed = config.seed,
            "session created"
        );

        Ok(Session {
            camera,
            field,
            scale,
        })
    }
}

/// Outcome of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSummary {
    /// Whether the tiles were rescaled during the tick.
    pub zoom_changed: bool,
    /// Camera view after integration.
    pub view_rect: Rect,
}

/// Camera and tile field advanced together once per tick.
#[derive(Clone, Debug)]
pub struct Session {
    camera: Camera,
    field: TileField,
    scale: TileScale,
}

impl Session {
    /// Assembles a session from parts built elsewhere.
    #[must_use]
    pub fn from_parts(camera: Camera, field: TileField, scale: TileScale) -> Self {
        Self {
            camera,
            field,
            scale,
        }
    }

    /// Applies the tick's commands in order, integrates the camera and
    /// rescales the field when the zoom changed.
    pub fn tick(&mut self, commands: &[Command]) -> TickSummary {
        self.camera.begin_tick();
        for command in commands {
            self.camera.apply(*command);
        }
        self.camera.integrate();

        let zoom_changed = self.camera.zoom_changed_this_tick();
        if zoom_changed {
            self.field
                .rescale(self.scale.tile_size_for(self.camera.zoom()));
        }

        TickSummary {
            zoom_changed,
            view_rect: self.camera.view_rect(),
        }
    }

    /// Tiles intersecting the camera's current view, in row-major order.
    pub fn visible_tiles(&self) -> impl Iterator<Item = VisibleTile> + '_ {
        self.field.visible_tiles(self.camera.view_rect())
    }

    /// Camera owned by the session.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Tile field owned by the session.
    #[must_use]
    pub const fn field(&self) -> &TileField {
        &self.field
    }

    /// Zoom-to-tile-size policy used on rescale.
    #[must_use]
    pub const fn scale(&self) -> TileScale {
        self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_matches_core_constant() {
        assert_eq!(Bootstrap.welcome_banner(), WELCOME_BANNER);
    }

    #[test]
    fn scale_is_anchored_at_the_default_zoom() {
        let session = Bootstrap
            .session(&Config::default())
            .expect("default config is valid");

        assert_eq!(session.scale().reference_zoom(), 0.5);
        assert_eq!(session.scale().base(), session.field().tile_size());
    }

    #[test]
    fn invalid_dimensions_are_reported() {
        let zero_rows = Config {
            rows: 0,
            ..Config::default()
        };
        let bad_tile = Config {
            tile_length: -32.0,
            ..Config::default()
        };

        assert_eq!(
            Bootstrap.session(&zero_rows).unwrap_err(),
            DimensionError::ZeroRows
        );
        assert!(matches!(
            Bootstrap.session(&bad_tile).unwrap_err(),
            DimensionError::InvalidTileSize { .. }
        ));
    }
}
