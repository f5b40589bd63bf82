use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use super::input::{
    Direction, EventTarget, InputEvent, Modifiers, NavKey, ReleaseCause, WheelInput,
};

/// Pixels per wheel line, matching what browsers report for line scrolling
pub const LINE_HEIGHT: f32 = 40.0;

/// Adapter that bridges Winit events to navigation input events
///
/// Left drag (or touch) orbits, right drag works the virtual joystick
/// around the press point, A/D hold behaves like the on-screen direction
/// buttons.
#[derive(Debug, Clone, Default)]
pub struct WinitInputAdapter {
    modifiers: Modifiers,
    /// Current mouse position (relative to window)
    cursor: Option<Vec2>,
    dragging: bool,
    joystick_center: Option<Vec2>,
    held_key: Option<KeyCode>,
}

impl WinitInputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. `target` says whether the pointer is over
    /// an interactive overlay control.
    pub fn process_event(&mut self, event: &WindowEvent, target: EventTarget) -> Vec<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers_from_state(modifiers.state());
                Vec::new()
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return Vec::new();
                };
                self.key(code, event.state, event.repeat)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                vec![InputEvent::Wheel(wheel_input(*delta, self.modifiers, target))]
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pointer = Vec2::new(position.x as f32, position.y as f32);
                self.cursor = Some(pointer);
                self.pointer_moved(pointer)
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if target == EventTarget::Control && state.is_pressed() {
                    return Vec::new();
                }
                self.mouse_button(*button, *state)
            }
            WindowEvent::Touch(touch) => {
                let pointer = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.touch(touch.phase, pointer, target)
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.release_all(ReleaseCause::PointerLeave)
            }
            WindowEvent::Focused(false) => self.release_all(ReleaseCause::PointerCancel),
            _ => Vec::new(),
        }
    }

    fn key(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> Vec<InputEvent> {
        if let Some(direction) = hold_direction(code) {
            return match state {
                ElementState::Pressed if !repeat && self.held_key.is_none() => {
                    self.held_key = Some(code);
                    vec![InputEvent::PressStart { direction }]
                }
                ElementState::Released if self.held_key == Some(code) => {
                    self.held_key = None;
                    vec![InputEvent::PressRelease {
                        cause: ReleaseCause::PointerUp,
                    }]
                }
                _ => Vec::new(),
            };
        }

        if !state.is_pressed() {
            return Vec::new();
        }
        keycode_to_nav_key(code)
            .map(|key| vec![InputEvent::Key { key }])
            .unwrap_or_default()
    }

    fn pointer_moved(&mut self, pointer: Vec2) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if self.dragging {
            events.push(InputEvent::DragMove { position: pointer });
        }
        if let Some(center) = self.joystick_center {
            events.push(InputEvent::JoystickMove { pointer, center });
        }
        events
    }

    fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> Vec<InputEvent> {
        let Some(pointer) = self.cursor else {
            return Vec::new();
        };

        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                self.dragging = true;
                vec![InputEvent::DragStart { position: pointer }]
            }
            (MouseButton::Left, ElementState::Released) if self.dragging => {
                self.dragging = false;
                vec![InputEvent::DragEnd]
            }
            (MouseButton::Right, ElementState::Pressed) => {
                self.joystick_center = Some(pointer);
                Vec::new()
            }
            (MouseButton::Right, ElementState::Released) if self.joystick_center.is_some() => {
                self.joystick_center = None;
                vec![InputEvent::JoystickRelease]
            }
            _ => Vec::new(),
        }
    }

    fn touch(&mut self, phase: TouchPhase, pointer: Vec2, target: EventTarget) -> Vec<InputEvent> {
        match phase {
            TouchPhase::Started if target != EventTarget::Control => {
                self.dragging = true;
                vec![InputEvent::DragStart { position: pointer }]
            }
            TouchPhase::Moved if self.dragging => vec![InputEvent::DragMove { position: pointer }],
            TouchPhase::Ended => self.release_all(ReleaseCause::TouchEnd),
            TouchPhase::Cancelled => self.release_all(ReleaseCause::TouchCancel),
            _ => Vec::new(),
        }
    }

    /// End every gesture in progress; a held button must never outlive its pointer
    fn release_all(&mut self, cause: ReleaseCause) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if std::mem::take(&mut self.dragging) {
            events.push(InputEvent::DragEnd);
        }
        if self.joystick_center.take().is_some() {
            events.push(InputEvent::JoystickRelease);
        }
        self.held_key = None;
        events.push(InputEvent::PressRelease { cause });
        events
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

pub fn modifiers_from_state(state: ModifiersState) -> Modifiers {
    Modifiers {
        ctrl: state.control_key(),
        meta: state.super_key(),
        shift: state.shift_key(),
    }
}

/// Convert a winit scroll into browser-style deltas (positive y scrolls down)
pub fn wheel_input(delta: MouseScrollDelta, modifiers: Modifiers, target: EventTarget) -> WheelInput {
    let (delta_x, delta_y) = match delta {
        MouseScrollDelta::LineDelta(x, y) => (-x * LINE_HEIGHT, -y * LINE_HEIGHT),
        MouseScrollDelta::PixelDelta(position) => (-position.x as f32, -position.y as f32),
    };
    WheelInput {
        delta_x,
        delta_y,
        modifiers,
        target,
    }
}

/// Map Winit KeyCode to a navigation key
pub fn keycode_to_nav_key(code: KeyCode) -> Option<NavKey> {
    let key = match code {
        KeyCode::ArrowLeft => NavKey::ArrowLeft,
        KeyCode::ArrowRight => NavKey::ArrowRight,
        KeyCode::Home => NavKey::Home,
        KeyCode::Digit1 => NavKey::Digit(1),
        KeyCode::Digit2 => NavKey::Digit(2),
        KeyCode::Digit3 => NavKey::Digit(3),
        KeyCode::Digit4 => NavKey::Digit(4),
        KeyCode::Digit5 => NavKey::Digit(5),
        KeyCode::Digit6 => NavKey::Digit(6),
        KeyCode::Digit7 => NavKey::Digit(7),
        KeyCode::Digit8 => NavKey::Digit(8),
        KeyCode::Digit9 => NavKey::Digit(9),
        _ => return None,
    };
    Some(key)
}

/// Keys that act as held direction buttons
pub fn hold_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::KeyA => Some(Direction::Left),
        KeyCode::KeyD => Some(Direction::Right),
        _ => None,
    }
}
