#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Panning camera that observes a rectangle of the tile world.
//!
//! The camera owns a continuous position, a velocity driven by the pan keys
//! and a zoom level driven by the scroll wheel. It integrates once per tick
//! without delta-time scaling; the tick rate is fixed by the frame pacer.
//!
//! Zoom is applied to the world by rescaling tiles, not by widening the view,
//! so [`Camera::view_rect`] always spans exactly the viewport.

use fermi_planet_core::{Axis, Command, Direction, Rect, ZoomDelta};
use glam::Vec2;

/// Tuning knobs for camera motion and zoom bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// World units travelled per tick while a pan key is held.
    pub speed: f32,
    /// Zoom level assigned at construction.
    pub default_zoom: f32,
    /// Zoom change applied per scroll notch.
    pub zoom_step: f32,
    /// Smallest reachable zoom; kept above zero.
    pub min_zoom: f32,
    /// Largest reachable zoom.
    pub max_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            default_zoom: 0.5,
            zoom_step: 0.025,
            min_zoom: 0.025,
            max_zoom: 1.0,
        }
    }
}

impl CameraConfig {
    /// Replaces unusable values with the defaults and orders the zoom bounds.
    ///
    /// Zoom bounds and step must be finite and positive, the speed finite and
    /// non-negative. Swapped bounds are exchanged rather than rejected.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive_or = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        let min_zoom = positive_or(self.min_zoom, defaults.min_zoom);
        let max_zoom = positive_or(self.max_zoom, defaults.max_zoom);
        let speed = if self.speed.is_finite() && self.speed >= 0.0 {
            self.speed
        } else {
            defaults.speed
        };
        let default_zoom = if self.default_zoom.is_finite() {
            self.default_zoom
        } else {
            defaults.default_zoom
        };

        Self {
            speed,
            default_zoom,
            zoom_step: positive_or(self.zoom_step, defaults.zoom_step),
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: min_zoom.max(max_zoom),
        }
    }
}

/// Camera state advanced once per simulation tick.
#[derive(Clone, Debug)]
pub struct Camera {
    config: CameraConfig,
    viewport: Vec2,
    position: Vec2,
    velocity: Vec2,
    zoom: f32,
    zoom_changed: bool,
}

impl Camera {
    /// Creates a camera at the world origin using the default tuning.
    #[must_use]
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self::with_config(viewport_width, viewport_height, CameraConfig::default())
    }

    /// Creates a camera at the world origin using the provided tuning.
    ///
    /// The tuning is passed through [`CameraConfig::sanitized`] first.
    #[must_use]
    pub fn with_config(viewport_width: f32, viewport_height: f32, config: CameraConfig) -> Self {
        let config = config.sanitized();
        let zoom = config.default_zoom.clamp(config.min_zoom, config.max_zoom);
        Self {
            config,
            viewport: Vec2::new(viewport_width.max(0.0), viewport_height.max(0.0)),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            zoom,
            zoom_changed: false,
        }
    }

    /// Clears per-tick state. Must run before any input of the tick.
    pub fn begin_tick(&mut self) {
        self.zoom_changed = false;
    }

    /// Routes a command to the matching input handler.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Pan { direction, pressed } => {
                self.handle_directional_input(direction, pressed);
            }
            Command::Zoom { delta } => self.handle_zoom_input(delta),
        }
    }

    /// Starts or stops panning along the direction's axis.
    ///
    /// A release zeroes the whole axis even if the opposite key is still held.
    pub fn handle_directional_input(&mut self, direction: Direction, pressed: bool) {
        let value = if pressed {
            direction.sign() * self.config.speed
        } else {
            0.0
        };

        match direction.axis() {
            Axis::Horizontal => self.velocity.x = value,
            Axis::Vertical => self.velocity.y = value,
        }
    }

    /// Steps the zoom level, saturating at the configured bounds.
    pub fn handle_zoom_input(&mut self, delta: ZoomDelta) {
        if !delta.is_nonzero() {
            return;
        }

        let requested = self.zoom + f32::from(delta.step()) * self.config.zoom_step;
        self.zoom = requested.clamp(self.config.min_zoom, self.config.max_zoom);
        self.zoom_changed = true;
        tracing::debug!(zoom = self.zoom, "camera zoom changed");
    }

    /// Advances the position by one tick of velocity.
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// World-space rectangle observed by the camera.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.viewport.x,
            self.viewport.y,
        )
    }

    /// Returns `true` when a zoom notch was handled since the last
    /// [`Camera::begin_tick`].
    #[must_use]
    pub const fn zoom_changed_this_tick(&self) -> bool {
        self.zoom_changed
    }

    /// Current zoom level.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Current world-space position of the view's top-left corner.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in world units per tick.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Screen-space size fixed at construction.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Tuning the camera was built with.
    #[must_use]
    pub const fn config(&self) -> CameraConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_origin_with_default_zoom() {
        let camera = Camera::new(1280.0, 720.0);

        assert_eq!(camera.position(), Vec2::ZERO);
        assert_eq!(camera.velocity(), Vec2::ZERO);
        assert_eq!(camera.zoom(), 0.5);
        assert!(!camera.zoom_changed_this_tick());
        assert_eq!(camera.view_rect(), Rect::new(0.0, 0.0, 1280.0, 720.0));
    }

    #[test]
    fn out_of_range_default_zoom_is_clamped() {
        let config = CameraConfig {
            default_zoom: 4.0,
            ..CameraConfig::default()
        };
        let camera = Camera::with_config(10.0, 10.0, config);

        assert_eq!(camera.zoom(), 1.0);
    }

    #[test]
    fn swapped_zoom_bounds_are_reordered() {
        let config = CameraConfig {
            min_zoom: 2.0,
            max_zoom: 0.25,
            ..CameraConfig::default()
        };
        let mut camera = Camera::with_config(10.0, 10.0, config);

        assert_eq!(camera.config().min_zoom, 0.25);
        assert_eq!(camera.config().max_zoom, 2.0);
        assert_eq!(camera.zoom(), 0.5);

        for _ in 0..100 {
            camera.handle_zoom_input(ZoomDelta::Out);
        }
        assert_eq!(camera.zoom(), 0.25);
    }

    #[test]
    fn non_finite_tuning_falls_back_to_defaults() {
        let config = CameraConfig {
            speed: f32::NAN,
            default_zoom: f32::INFINITY,
            zoom_step: -0.1,
            min_zoom: f32::NAN,
            max_zoom: 0.0,
        };
        let camera = Camera::with_config(10.0, 10.0, config);

        assert_eq!(camera.config(), CameraConfig::default());
        assert_eq!(camera.zoom(), 0.5);
    }

    #[test]
    fn valid_tuning_is_kept_verbatim() {
        let config = CameraConfig {
            speed: 0.0,
            default_zoom: 0.3,
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 3.0,
        };

        assert_eq!(Camera::with_config(10.0, 10.0, config).config(), config);
    }

    #[test]
    fn commands_route_to_handlers() {
        let mut camera = Camera::new(100.0, 100.0);
        camera.apply(Command::Pan {
            direction: Direction::Left,
            pressed: true,
        });
        camera.apply(Command::Zoom {
            delta: ZoomDelta::In,
        });

        assert_eq!(camera.velocity(), Vec2::new(-8.0, 0.0));
        assert!(camera.zoom_changed_this_tick());
        assert!((camera.zoom() - 0.525).abs() < 1e-6);
    }

    #[test]
    fn zero_zoom_delta_leaves_state_untouched() {
        let mut camera = Camera::new(100.0, 100.0);
        camera.handle_zoom_input(ZoomDelta::None);

        assert_eq!(camera.zoom(), 0.5);
        assert!(!camera.zoom_changed_this_tick());
    }
}
