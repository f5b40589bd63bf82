use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::NavigationConfig;

/// Travel direction along the walk axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Modifier keys held during a wheel event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift
    }
}

/// What the pointer was over when the event fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTarget {
    #[default]
    Canvas,
    /// Non-interactive overlay drawn on top of the canvas
    Overlay,
    /// Button, text field or other interactive widget
    Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Home,
    Digit(u8),
}

/// Why a held direction button was let go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseCause {
    PointerUp,
    PointerCancel,
    PointerLeave,
    TouchEnd,
    TouchCancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_x: f32,
    pub delta_y: f32,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub target: EventTarget,
}

/// Raw input as delivered by the host window or overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    Wheel(WheelInput),
    Key { key: NavKey },
    /// Primary-button drag on the canvas, owned by the orbit primitive
    DragStart { position: Vec2 },
    DragMove { position: Vec2 },
    DragEnd,
    /// Virtual joystick, `pointer` and `center` in the same screen space
    JoystickMove { pointer: Vec2, center: Vec2 },
    JoystickRelease,
    PressStart { direction: Direction },
    PressRelease { cause: ReleaseCause },
}

/// Gestures handed over to the orbit primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitInput {
    DragStart(Vec2),
    DragMove(Vec2),
    DragEnd,
    Zoom(f32),
    Pan(Vec2),
}

/// Result of normalizing one input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Normalized {
    /// Add to the lateral intent and keep scrolling for `debounce` seconds
    Lateral { delta: f32, debounce: f32 },
    /// Instantaneous joystick vector in `[-1, 1]`
    Rotation(Vec2),
    RotationRelease,
    Orbit(OrbitInput),
    StartMoving(Direction),
    StopMoving(ReleaseCause),
    Home,
    Jump(usize),
    /// Event does not concern navigation; let it through untouched
    Ignored,
}

impl Normalized {
    /// True when the host should suppress the event's default action
    pub fn consumes_event(&self) -> bool {
        !matches!(self, Normalized::Ignored | Normalized::Orbit(_))
    }
}

/// Stateless mapping from raw input to navigation intent
#[derive(Debug, Clone)]
pub struct InputNormalizer {
    wheel_sensitivity: f32,
    pan_dominance_ratio: f32,
    key_step: f32,
    wheel_debounce: f32,
    key_debounce: f32,
    joystick_radius: f32,
}

impl InputNormalizer {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            wheel_sensitivity: config.wheel_sensitivity,
            pan_dominance_ratio: config.pan_dominance_ratio,
            key_step: config.key_step,
            wheel_debounce: config.wheel_debounce,
            key_debounce: config.key_debounce,
            joystick_radius: config.joystick_radius,
        }
    }

    pub fn normalize(&self, event: &InputEvent) -> Normalized {
        match *event {
            InputEvent::Wheel(wheel) => self.wheel(&wheel),
            InputEvent::Key { key } => self.key(key),
            InputEvent::DragStart { position } => Normalized::Orbit(OrbitInput::DragStart(position)),
            InputEvent::DragMove { position } => Normalized::Orbit(OrbitInput::DragMove(position)),
            InputEvent::DragEnd => Normalized::Orbit(OrbitInput::DragEnd),
            InputEvent::JoystickMove { pointer, center } => {
                Normalized::Rotation(self.joystick_vector(pointer, center))
            }
            InputEvent::JoystickRelease => Normalized::RotationRelease,
            InputEvent::PressStart { direction } => Normalized::StartMoving(direction),
            InputEvent::PressRelease { cause } => Normalized::StopMoving(cause),
        }
    }

    fn wheel(&self, wheel: &WheelInput) -> Normalized {
        if wheel.target == EventTarget::Control {
            return Normalized::Ignored;
        }

        let modifiers = wheel.modifiers;
        if modifiers.ctrl || modifiers.meta {
            return Normalized::Orbit(OrbitInput::Zoom(wheel.delta_y));
        }
        if modifiers.shift || wheel.delta_x.abs() > wheel.delta_y.abs() * self.pan_dominance_ratio
        {
            return Normalized::Orbit(OrbitInput::Pan(Vec2::new(wheel.delta_x, wheel.delta_y)));
        }
        if wheel.delta_y == 0.0 {
            return Normalized::Ignored;
        }

        Normalized::Lateral {
            delta: wheel.delta_y * self.wheel_sensitivity,
            debounce: self.wheel_debounce,
        }
    }

    fn key(&self, key: NavKey) -> Normalized {
        match key {
            NavKey::ArrowLeft => Normalized::Lateral {
                delta: -self.key_step,
                debounce: self.key_debounce,
            },
            NavKey::ArrowRight => Normalized::Lateral {
                delta: self.key_step,
                debounce: self.key_debounce,
            },
            NavKey::Home => Normalized::Home,
            NavKey::Digit(n @ 1..=9) => Normalized::Jump(usize::from(n - 1)),
            NavKey::Digit(_) => Normalized::Ignored,
        }
    }

    /// Offset from the stick centre, clamped to the radius and scaled to `[-1, 1]`
    pub fn joystick_vector(&self, pointer: Vec2, center: Vec2) -> Vec2 {
        let offset = (pointer - center).clamp_length_max(self.joystick_radius);
        offset / self.joystick_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> InputNormalizer {
        InputNormalizer::new(&NavigationConfig::default())
    }

    fn wheel(dx: f32, dy: f32) -> InputEvent {
        InputEvent::Wheel(WheelInput {
            delta_x: dx,
            delta_y: dy,
            modifiers: Modifiers::default(),
            target: EventTarget::Canvas,
        })
    }

    #[test]
    fn vertical_wheel_scales_by_sensitivity() {
        match normalizer().normalize(&wheel(0.0, 100.0)) {
            Normalized::Lateral { delta, debounce } => {
                assert!((delta - 2.5).abs() < 1e-6);
                assert_eq!(debounce, 0.2);
            }
            other => panic!("expected lateral, got {other:?}"),
        }
    }

    #[test]
    fn ctrl_wheel_is_zoom() {
        let event = InputEvent::Wheel(WheelInput {
            delta_x: 0.0,
            delta_y: 40.0,
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
            target: EventTarget::Canvas,
        });
        assert_eq!(
            normalizer().normalize(&event),
            Normalized::Orbit(OrbitInput::Zoom(40.0))
        );
    }

    #[test]
    fn horizontal_dominant_wheel_is_pan() {
        let result = normalizer().normalize(&wheel(60.0, 30.0));
        assert!(matches!(result, Normalized::Orbit(OrbitInput::Pan(_))));
    }

    #[test]
    fn mildly_diagonal_wheel_still_navigates() {
        // 40 < 30 * 1.5, so vertical still wins
        let result = normalizer().normalize(&wheel(40.0, 30.0));
        assert!(matches!(result, Normalized::Lateral { .. }));
    }

    #[test]
    fn wheel_over_control_is_ignored() {
        let event = InputEvent::Wheel(WheelInput {
            delta_x: 0.0,
            delta_y: 100.0,
            modifiers: Modifiers::default(),
            target: EventTarget::Control,
        });
        let result = normalizer().normalize(&event);
        assert_eq!(result, Normalized::Ignored);
        assert!(!result.consumes_event());
    }

    #[test]
    fn wheel_over_overlay_navigates() {
        let event = InputEvent::Wheel(WheelInput {
            delta_x: 0.0,
            delta_y: -40.0,
            modifiers: Modifiers::default(),
            target: EventTarget::Overlay,
        });
        assert!(matches!(
            normalizer().normalize(&event),
            Normalized::Lateral { delta, .. } if delta < 0.0
        ));
    }

    #[test]
    fn arrow_keys_step_and_consume() {
        let left = normalizer().normalize(&InputEvent::Key {
            key: NavKey::ArrowLeft,
        });
        assert_eq!(
            left,
            Normalized::Lateral {
                delta: -2.0,
                debounce: 0.15
            }
        );
        assert!(left.consumes_event());
    }

    #[test]
    fn digit_keys_jump_zero_based() {
        let n = normalizer();
        assert_eq!(
            n.normalize(&InputEvent::Key {
                key: NavKey::Digit(3)
            }),
            Normalized::Jump(2)
        );
        assert_eq!(
            n.normalize(&InputEvent::Key {
                key: NavKey::Digit(0)
            }),
            Normalized::Ignored
        );
    }

    #[test]
    fn joystick_vector_is_clamped_to_unit_disc() {
        let n = normalizer();
        let center = Vec2::new(100.0, 100.0);

        let half = n.joystick_vector(Vec2::new(125.0, 100.0), center);
        assert!((half - Vec2::new(0.5, 0.0)).length() < 1e-6);

        let far = n.joystick_vector(Vec2::new(100.0, 400.0), center);
        assert!((far - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn drag_events_go_to_orbit() {
        let result = normalizer().normalize(&InputEvent::DragStart {
            position: Vec2::new(10.0, 20.0),
        });
        assert_eq!(
            result,
            Normalized::Orbit(OrbitInput::DragStart(Vec2::new(10.0, 20.0)))
        );
        assert!(!result.consumes_event());
    }

    #[test]
    fn input_event_round_trips_through_json() {
        let json = r#"{ "kind": "press_start", "direction": "right" }"#;
        let event: InputEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InputEvent::PressStart {
                direction: Direction::Right
            }
        );
    }
}
