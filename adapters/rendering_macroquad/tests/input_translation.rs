use fermi_planet_core::{Command, Direction, ZoomDelta};
use fermi_planet_rendering_macroquad::{frame_input_from_observations, KeyObservation};

fn idle(direction: Direction) -> KeyObservation {
    KeyObservation {
        direction,
        pressed: false,
        released: false,
    }
}

#[test]
fn quiet_frame_produces_no_commands() {
    let keys = Direction::ALL.map(idle);

    assert!(frame_input_from_observations(&keys, 0.0)
        .commands
        .is_empty());
}

#[test]
fn presses_and_releases_follow_key_order() {
    let keys = [
        KeyObservation {
            pressed: true,
            ..idle(Direction::Up)
        },
        idle(Direction::Down),
        KeyObservation {
            released: true,
            ..idle(Direction::Left)
        },
    ];

    let input = frame_input_from_observations(&keys, 0.0);

    assert_eq!(
        input.commands,
        vec![
            Command::Pan {
                direction: Direction::Up,
                pressed: true,
            },
            Command::Pan {
                direction: Direction::Left,
                pressed: false,
            },
        ]
    );
}

#[test]
fn tapped_key_yields_press_then_release() {
    let keys = [KeyObservation {
        direction: Direction::Right,
        pressed: true,
        released: true,
    }];

    let input = frame_input_from_observations(&keys, 0.0);

    assert_eq!(
        input.commands,
        vec![
            Command::Pan {
                direction: Direction::Right,
                pressed: true,
            },
            Command::Pan {
                direction: Direction::Right,
                pressed: false,
            },
        ]
    );
}

#[test]
fn wheel_motion_appends_one_zoom_notch() {
    let keys = [KeyObservation {
        pressed: true,
        ..idle(Direction::Down)
    }];

    let zoom_in = frame_input_from_observations(&keys, 3.0);
    let zoom_out = frame_input_from_observations(&[], -0.5);

    assert_eq!(
        zoom_in.commands.last(),
        Some(&Command::Zoom {
            delta: ZoomDelta::In
        })
    );
    assert_eq!(zoom_in.commands.len(), 2);
    assert_eq!(
        zoom_out.commands,
        vec![Command::Zoom {
            delta: ZoomDelta::Out
        }]
    );
}
