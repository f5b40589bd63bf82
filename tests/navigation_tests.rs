use gallery_nav::camera::CameraState;
use gallery_nav::core::{
    Direction, FrameOutcome, InputEvent, NavCommand, NavState, NavigationController, OrbitInput,
};
use gallery_nav::traits::{InteractionEvent, OrbitPrimitive};
use gallery_nav::{Exhibit, NavigationConfig};
use glam::{Vec2, Vec3};

const DT: f32 = 1.0 / 60.0;

fn exhibits(count: usize) -> Vec<Exhibit> {
    (0..count)
        .map(|i| Exhibit::new(format!("art-{i}"), format!("Artwork {i}")))
        .collect()
}

fn controller() -> NavigationController {
    NavigationController::new(NavigationConfig::default(), &exhibits(5)).unwrap()
}

/// Mock orbit that spins the camera at a fixed rate while a drag is held
struct SpinningOrbit {
    rotating: bool,
    step: f32,
}

impl SpinningOrbit {
    fn new(step: f32) -> Self {
        Self {
            rotating: false,
            step,
        }
    }
}

impl OrbitPrimitive for SpinningOrbit {
    fn handle_input(&mut self, input: OrbitInput) -> Option<InteractionEvent> {
        match input {
            OrbitInput::DragStart(_) if !self.rotating => {
                self.rotating = true;
                Some(InteractionEvent::Start)
            }
            OrbitInput::DragEnd if self.rotating => {
                self.rotating = false;
                Some(InteractionEvent::End)
            }
            _ => None,
        }
    }

    fn update(&mut self, camera: &mut CameraState, _delta_time: f32) {
        if self.rotating {
            let mut spherical = camera.spherical();
            spherical.azimuth += self.step;
            camera.set_spherical(spherical);
        }
    }

    fn is_rotating(&self) -> bool {
        self.rotating
    }

    fn reset(&mut self) {
        self.rotating = false;
    }
}

// ============================================================================
// Bounds and Discrete Moves
// ============================================================================

#[test]
fn test_bounds_for_five_targets() {
    let nav = controller();
    let bounds = nav.bounds();
    assert_eq!(bounds.min, -2.0);
    assert_eq!(bounds.max, 18.0);
}

#[test]
fn test_move_by_saturates_at_bounds() {
    let mut nav = controller();

    for _ in 0..15 {
        nav.move_by(Direction::Right);
    }
    assert_eq!(nav.target_lateral(), 18.0);

    for _ in 0..30 {
        nav.move_by(Direction::Left);
    }
    assert_eq!(nav.target_lateral(), -2.0);
}

#[test]
fn test_twenty_left_moves_stop_at_lower_bound() {
    let mut nav = controller();
    for _ in 0..20 {
        nav.move_by(Direction::Left);
        assert!(nav.bounds().contains(nav.target_lateral()));
    }
    assert_eq!(nav.target_lateral(), -2.0);
}

#[test]
fn test_move_by_matches_clamped_running_sum() {
    let mut nav = controller();
    let mut expected = 0.0f32;
    let mut seed = 0x2545_f491u32;

    for _ in 0..200 {
        // xorshift keeps the sequence deterministic without extra crates
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let direction = if seed % 3 == 0 {
            Direction::Left
        } else {
            Direction::Right
        };

        nav.move_by(direction);
        expected = (expected + direction.sign() * 2.0).clamp(-2.0, 18.0);
        assert_eq!(nav.target_lateral(), expected);
        assert!(nav.bounds().contains(nav.target_lateral()));
    }
}

#[test]
fn test_camera_converges_to_target() {
    let mut nav = controller();
    nav.move_by(Direction::Right);
    nav.move_by(Direction::Right);

    for _ in 0..600 {
        nav.tick(DT);
    }

    assert!((nav.camera().lateral() - 4.0).abs() < 0.01);
    assert_eq!(nav.state(), NavState::Idle);
    assert!(!nav.is_transitioning());
    assert_eq!(nav.current_index(), 1);
}

// ============================================================================
// Reset and Jump
// ============================================================================

#[test]
fn test_reset_to_home_is_idempotent() {
    let mut nav = controller();
    nav.move_by(Direction::Right);
    nav.handle_input(&InputEvent::JoystickMove {
        pointer: Vec2::new(30.0, 0.0),
        center: Vec2::ZERO,
    });
    for _ in 0..10 {
        nav.tick(DT);
    }

    assert!(nav.reset_to_home());
    let first = (nav.camera(), nav.target_lateral(), nav.state());
    assert!(nav.reset_to_home());
    let second = (nav.camera(), nav.target_lateral(), nav.state());

    assert_eq!(first, second);
    assert_eq!(first.0.position, Vec3::new(0.0, 1.0, 5.0));
    assert_eq!(first.0.look_at, Vec3::new(0.0, 0.5, 0.0));
    assert_eq!(first.1, 0.0);
    assert!(!nav.is_rotating());
}

#[test]
fn test_jump_to_snaps_immediately() {
    let mut nav = controller();

    assert_eq!(nav.jump_to(2), Some(2));
    assert_eq!(nav.target_lateral(), 8.0);
    assert_eq!(nav.camera().position, Vec3::new(8.0, 1.0, 5.0));
    assert_eq!(nav.camera().look_at, Vec3::new(8.0, 0.5, 0.0));

    assert_eq!(nav.tick(DT), FrameOutcome::Settled);
}

#[test]
fn test_jump_to_clamps_out_of_range_index() {
    let mut nav = controller();
    assert_eq!(nav.jump_to(99), Some(4));
    assert_eq!(nav.target_lateral(), 16.0);
}

#[test]
fn test_jump_cancels_continuous_move() {
    let mut nav = controller();
    nav.start_moving(Direction::Right);
    nav.jump_to(1);

    assert!(!nav.is_moving());
    for _ in 0..60 {
        nav.tick(DT);
    }
    assert_eq!(nav.target_lateral(), 4.0);
}

#[test]
fn test_digit_key_jumps_through_command_throttle() {
    use gallery_nav::core::NavKey;

    let mut nav = controller();
    nav.handle_input(&InputEvent::Key {
        key: NavKey::Digit(3),
    });
    assert_eq!(nav.target_lateral(), 8.0);

    // Second shortcut in the same instant is a duplicate
    nav.handle_input(&InputEvent::Key {
        key: NavKey::Digit(5),
    });
    assert_eq!(nav.target_lateral(), 8.0);
    assert_eq!(nav.stats().dropped_commands, 1);
}

#[test]
fn test_step_command_moves_one_step() {
    let mut nav = controller();
    assert!(nav.command(NavCommand::Step {
        direction: Direction::Right
    }));
    assert_eq!(nav.target_lateral(), 2.0);
}

// ============================================================================
// Rotation Reconciliation
// ============================================================================

#[test]
fn test_target_unchanged_while_user_rotating() {
    let config = NavigationConfig::default();
    let mut nav =
        NavigationController::with_orbit(config, &exhibits(5), SpinningOrbit::new(0.05)).unwrap();

    nav.handle_input(&InputEvent::DragStart {
        position: Vec2::ZERO,
    });
    for _ in 0..200 {
        nav.tick(DT);
        assert_eq!(nav.state(), NavState::UserRotating);
        assert_eq!(nav.target_lateral(), 0.0);
        assert!(nav.camera().lateral().abs() < 1e-4);
    }

    nav.handle_input(&InputEvent::DragEnd);
    nav.tick(DT);
    assert_eq!(nav.state(), NavState::Idle);
}

#[test]
fn test_scrolling_during_rotation_still_walks() {
    let config = NavigationConfig::default();
    let mut nav =
        NavigationController::with_orbit(config, &exhibits(5), SpinningOrbit::new(0.05)).unwrap();

    nav.handle_input(&InputEvent::DragStart {
        position: Vec2::ZERO,
    });
    nav.move_by(Direction::Right);
    nav.tick(DT);

    assert_eq!(nav.state(), NavState::AutoScrolling);
    assert_eq!(nav.target_lateral(), 2.0);
}

#[test]
fn test_joystick_decays_within_bounded_frames() {
    let mut nav = controller();
    nav.handle_input(&InputEvent::JoystickMove {
        pointer: Vec2::new(50.0, 0.0),
        center: Vec2::ZERO,
    });
    for _ in 0..30 {
        nav.tick(DT);
        assert_eq!(nav.state(), NavState::JoystickActive);
    }

    nav.handle_input(&InputEvent::JoystickRelease);
    assert!(nav.is_rotating());

    let mut frames = 0;
    while nav.is_rotating() {
        nav.tick(DT);
        frames += 1;
        assert!(frames <= 100, "joystick never came to rest");
    }
    assert!(frames > 1);
    assert_ne!(nav.state(), NavState::JoystickActive);
}

#[test]
fn test_joystick_rotation_does_not_walk() {
    let mut nav = controller();
    let start = nav.camera();

    nav.handle_input(&InputEvent::JoystickMove {
        pointer: Vec2::new(-50.0, 20.0),
        center: Vec2::ZERO,
    });
    for _ in 0..120 {
        nav.tick(DT);
    }

    assert!((nav.camera().lateral() - start.lateral()).abs() < 1e-4);
    assert_ne!(nav.camera().look_at, start.look_at);
}

// ============================================================================
// Long-Run Stability
// ============================================================================

#[test]
fn test_orbit_drag_has_no_lateral_drift_after_10k_frames() {
    let mut nav = controller();
    let radius = {
        // First rotation frame clamps the polar angle; measure after it
        nav.handle_input(&InputEvent::DragStart {
            position: Vec2::ZERO,
        });
        nav.handle_input(&InputEvent::DragMove {
            position: Vec2::new(4.0, 0.0),
        });
        nav.tick(DT);
        nav.camera().distance()
    };

    let mut x = 4.0;
    for _ in 0..10_000 {
        x += 4.0;
        nav.handle_input(&InputEvent::DragMove {
            position: Vec2::new(x, 0.0),
        });
        nav.tick(DT);
    }

    let camera = nav.camera();
    assert!(camera.position.is_finite());
    assert_eq!(nav.target_lateral(), 0.0);
    assert!(camera.lateral().abs() < 1e-3);
    assert!((camera.distance() - radius).abs() < 1e-2);
    assert_eq!(nav.state(), NavState::UserRotating);
}

#[test]
fn test_joystick_has_no_lateral_drift_after_10k_frames() {
    let mut nav = controller();
    nav.jump_to(2);

    for frame in 0..10_000 {
        // Sweep the stick around so both axes are exercised
        let angle = frame as f32 * 0.01;
        nav.handle_input(&InputEvent::JoystickMove {
            pointer: Vec2::new(angle.cos(), angle.sin()) * 50.0,
            center: Vec2::ZERO,
        });
        nav.tick(DT);
    }

    let camera = nav.camera();
    let polar = camera.spherical().polar;
    assert!(camera.position.is_finite());
    assert!((camera.lateral() - 8.0).abs() < 1e-2);
    assert_eq!(nav.target_lateral(), 8.0);
    assert!(polar >= nav.config().min_polar - 1e-3);
    assert!(polar <= nav.config().max_polar + 1e-3);
}
