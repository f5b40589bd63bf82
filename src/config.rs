use std::f32::consts::PI;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{self, NavError, Result};

/// Tuning constants for the navigation controller.
///
/// Defaults match the stock gallery viewer. Every field may be
/// overridden from JSON; missing fields fall back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Distance between neighbouring exhibits along the walk axis
    pub spacing: f32,
    /// Slack allowed past the first and last exhibit
    pub edge_margin: f32,

    pub wheel_sensitivity: f32,
    /// Wheel events with `|dx| > |dy| * ratio` are treated as pans
    pub pan_dominance_ratio: f32,
    pub key_step: f32,
    pub move_step: f32,
    /// Share of the remaining distance applied instantly by `move_by`
    pub nudge_fraction: f32,

    pub scroll_lerp: f32,
    pub idle_lerp: f32,
    pub settle_threshold: f32,

    /// Seconds after the last wheel event before scrolling ends
    pub wheel_debounce: f32,
    pub key_debounce: f32,
    pub move_debounce: f32,

    pub joystick_radius: f32,
    /// Radians per frame at full stick deflection
    pub joystick_speed: f32,
    pub joystick_decay: f32,
    pub joystick_epsilon: f32,

    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping: f32,

    /// Repeat interval of a held direction button, in seconds
    pub press_interval: f32,
    /// Discrete commands closer together than this are dropped
    pub min_command_interval: f32,
    /// Frame deltas are clamped to this to survive hitches
    pub max_frame_delta: f32,

    pub home_position: Vec3,
    pub home_look_at: Vec3,
    /// Camera offset from a focal target's lateral anchor
    pub focus_eye_offset: Vec3,
    pub focus_look_offset: Vec3,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            spacing: 4.0,
            edge_margin: 2.0,
            wheel_sensitivity: 0.025,
            pan_dominance_ratio: 1.5,
            key_step: 2.0,
            move_step: 2.0,
            nudge_fraction: 0.3,
            scroll_lerp: 0.1,
            idle_lerp: 0.05,
            settle_threshold: 0.001,
            wheel_debounce: 0.2,
            key_debounce: 0.15,
            move_debounce: 0.2,
            joystick_radius: 50.0,
            joystick_speed: 0.04,
            joystick_decay: 0.9,
            joystick_epsilon: 0.001,
            min_polar: PI / 6.0,
            max_polar: PI / 2.2,
            min_distance: 3.0,
            max_distance: 12.0,
            rotate_speed: 0.8,
            zoom_speed: 0.8,
            pan_speed: 0.8,
            damping: 0.05,
            press_interval: 0.15,
            min_command_interval: 0.25,
            max_frame_delta: 0.1,
            home_position: Vec3::new(0.0, 1.0, 5.0),
            home_look_at: Vec3::new(0.0, 0.5, 0.0),
            focus_eye_offset: Vec3::new(0.0, 1.0, 5.0),
            focus_look_offset: Vec3::new(0.0, 0.5, 0.0),
        }
    }
}

impl NavigationConfig {
    /// Load overrides from a JSON file and validate them
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = error::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break clamping, smoothing or decay
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("spacing", self.spacing),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("pan_dominance_ratio", self.pan_dominance_ratio),
            ("key_step", self.key_step),
            ("move_step", self.move_step),
            ("settle_threshold", self.settle_threshold),
            ("joystick_radius", self.joystick_radius),
            ("joystick_epsilon", self.joystick_epsilon),
            ("press_interval", self.press_interval),
            ("max_frame_delta", self.max_frame_delta),
            ("min_distance", self.min_distance),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(NavError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("edge_margin", self.edge_margin),
            ("wheel_debounce", self.wheel_debounce),
            ("key_debounce", self.key_debounce),
            ("move_debounce", self.move_debounce),
            ("joystick_speed", self.joystick_speed),
            ("rotate_speed", self.rotate_speed),
            ("zoom_speed", self.zoom_speed),
            ("pan_speed", self.pan_speed),
            ("min_command_interval", self.min_command_interval),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(NavError::invalid(field, format!("must be >= 0, got {value}")));
            }
        }

        let unit = [
            ("nudge_fraction", self.nudge_fraction, true),
            ("scroll_lerp", self.scroll_lerp, false),
            ("idle_lerp", self.idle_lerp, false),
            ("damping", self.damping, false),
        ];
        for (field, value, zero_ok) in unit {
            let low_ok = if zero_ok { value >= 0.0 } else { value > 0.0 };
            if !value.is_finite() || !low_ok || value > 1.0 {
                return Err(NavError::invalid(field, format!("must lie in (0, 1], got {value}")));
            }
        }

        // Decay must be strictly below one or the stick never settles
        if !(self.joystick_decay >= 0.0 && self.joystick_decay < 1.0) {
            return Err(NavError::invalid(
                "joystick_decay",
                format!("must lie in [0, 1), got {}", self.joystick_decay),
            ));
        }

        if !(0.0 < self.min_polar && self.min_polar < self.max_polar && self.max_polar < PI) {
            return Err(NavError::invalid(
                "max_polar",
                format!(
                    "polar range must satisfy 0 < min < max < pi, got [{}, {}]",
                    self.min_polar, self.max_polar
                ),
            ));
        }

        if !(self.max_distance.is_finite() && self.max_distance >= self.min_distance) {
            return Err(NavError::invalid(
                "max_distance",
                format!("must be >= min_distance ({})", self.min_distance),
            ));
        }

        let vectors = [
            ("home_position", self.home_position),
            ("home_look_at", self.home_look_at),
            ("focus_eye_offset", self.focus_eye_offset),
            ("focus_look_offset", self.focus_look_offset),
        ];
        for (field, v) in vectors {
            if !v.is_finite() {
                return Err(NavError::invalid(field, "must be finite"));
            }
        }

        Ok(())
    }
}
