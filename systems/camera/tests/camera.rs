use fermi_planet_core::{Direction, Rect, ZoomDelta};
use fermi_planet_system_camera::{Camera, CameraConfig};
use glam::Vec2;

#[test]
fn pressing_then_releasing_up_returns_vertical_velocity_to_zero() {
    let mut camera = Camera::new(1280.0, 720.0);

    camera.handle_directional_input(Direction::Up, true);
    assert_eq!(camera.velocity().y, -8.0);

    camera.handle_directional_input(Direction::Up, false);
    assert_eq!(camera.velocity().y, 0.0);
}

#[test]
fn releasing_one_direction_zeroes_the_axis_even_if_the_opposite_is_held() {
    let mut camera = Camera::new(1280.0, 720.0);

    camera.handle_directional_input(Direction::Down, true);
    camera.handle_directional_input(Direction::Up, true);
    assert_eq!(camera.velocity().y, -8.0);

    camera.handle_directional_input(Direction::Up, false);
    assert_eq!(camera.velocity().y, 0.0, "down is still held but the axis stops");
}

#[test]
fn releasing_a_vertical_key_keeps_horizontal_motion() {
    let mut camera = Camera::new(1280.0, 720.0);

    camera.handle_directional_input(Direction::Right, true);
    camera.handle_directional_input(Direction::Up, true);
    camera.handle_directional_input(Direction::Up, false);

    assert_eq!(camera.velocity(), Vec2::new(8.0, 0.0));
}

#[test]
fn integration_is_a_plain_euler_step_per_tick() {
    let mut camera = Camera::new(1280.0, 720.0);
    camera.handle_directional_input(Direction::Right, true);
    camera.handle_directional_input(Direction::Down, true);

    for _ in 0..3 {
        camera.integrate();
    }

    assert_eq!(camera.position(), Vec2::new(24.0, 24.0));
    assert_eq!(camera.view_rect(), Rect::new(24.0, 24.0, 1280.0, 720.0));

    camera.handle_directional_input(Direction::Right, false);
    camera.handle_directional_input(Direction::Down, false);
    camera.integrate();
    assert_eq!(camera.position(), Vec2::new(24.0, 24.0), "no inertial drift");
}

#[test]
fn repeated_zoom_in_saturates_at_the_maximum() {
    let mut camera = Camera::new(1280.0, 720.0);

    for _ in 0..100 {
        camera.handle_zoom_input(ZoomDelta::In);
        assert!(camera.zoom() <= 1.0);
    }

    assert_eq!(camera.zoom(), 1.0);
}

#[test]
fn repeated_zoom_out_saturates_above_zero() {
    let mut camera = Camera::new(1280.0, 720.0);

    for _ in 0..100 {
        camera.handle_zoom_input(ZoomDelta::Out);
        assert!(camera.zoom() > 0.0);
    }

    assert_eq!(camera.zoom(), 0.025);
}

#[test]
fn zoom_flag_is_cleared_at_the_start_of_each_tick() {
    let mut camera = Camera::new(1280.0, 720.0);

    camera.begin_tick();
    camera.handle_zoom_input(ZoomDelta::Out);
    assert!(camera.zoom_changed_this_tick());

    camera.begin_tick();
    assert!(!camera.zoom_changed_this_tick());
}

#[test]
fn zoom_flag_set_even_when_clamped_at_a_bound() {
    let config = CameraConfig {
        default_zoom: 1.0,
        ..CameraConfig::default()
    };
    let mut camera = Camera::with_config(1280.0, 720.0, config);

    camera.begin_tick();
    camera.handle_zoom_input(ZoomDelta::In);

    assert_eq!(camera.zoom(), 1.0);
    assert!(camera.zoom_changed_this_tick());
}

#[test]
fn zoom_does_not_change_the_view_extent() {
    let mut camera = Camera::new(1280.0, 720.0);
    camera.handle_zoom_input(ZoomDelta::In);
    camera.handle_zoom_input(ZoomDelta::In);

    let view = camera.view_rect();
    assert_eq!(view.width, 1280.0);
    assert_eq!(view.height, 720.0);
}

#[test]
fn custom_speed_is_respected() {
    let config = CameraConfig {
        speed: 2.5,
        ..CameraConfig::default()
    };
    let mut camera = Camera::with_config(320.0, 240.0, config);
    camera.handle_directional_input(Direction::Left, true);
    camera.integrate();

    assert_eq!(camera.position(), Vec2::new(-2.5, 0.0));
}
