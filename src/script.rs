//! Headless replay of recorded navigation sessions.
//!
//! A script lists actions keyed by frame number; `run` applies them at a
//! fixed frame delta and records the camera after every tick, so a session
//! can be reproduced exactly without a window.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, FrameOutcome, InputEvent, NavCommand, NavState, NavigationController};
use crate::error::{self, NavError, Result};
use crate::frame::FixedFrames;
use crate::traits::OrbitPrimitive;

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_record_every() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptAction {
    Input { event: InputEvent },
    Command { command: NavCommand },
    MoveBy { direction: Direction },
    ResetToHome,
    JumpTo { index: usize },
    JumpToId { id: String },
    StartMoving { direction: Direction },
    StopMoving,
    ContextLost,
    ContextRestored,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frame: u64,
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default = "default_dt")]
    pub dt: f32,
    pub frames: u64,
    /// Keep every n-th sample in the trajectory
    #[serde(default = "default_record_every")]
    pub record_every: u64,
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub frame: u64,
    pub time: f32,
    pub position: Vec3,
    pub look_at: Vec3,
    pub target_lateral: f32,
    pub state: NavState,
    pub paused: bool,
}

impl Script {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = error::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let script: Script = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(NavError::invalid("dt", format!("must be positive, got {}", self.dt)));
        }
        if self.record_every == 0 {
            return Err(NavError::invalid("record_every", "must be at least 1"));
        }
        Ok(())
    }
}

/// Replay `script` against `nav`, returning the recorded trajectory
pub fn run<O: OrbitPrimitive>(
    script: &Script,
    nav: &mut NavigationController<O>,
) -> Vec<TrajectorySample> {
    let mut steps: Vec<&ScriptStep> = script.steps.iter().collect();
    steps.sort_by_key(|step| step.frame);

    let late = steps.iter().filter(|step| step.frame >= script.frames).count();
    if late > 0 {
        log::warn!("{} script steps fall after the last frame and are skipped", late);
    }

    let mut pending = steps.into_iter().peekable();
    let mut samples = Vec::new();
    let mut moved_frames = 0u64;

    for frame in FixedFrames::new(script.dt, script.frames) {
        while let Some(step) = pending.next_if(|step| step.frame == frame.number) {
            apply(nav, &step.action);
        }

        if nav.tick(frame.delta) == FrameOutcome::Moved {
            moved_frames += 1;
        }

        if frame.number % script.record_every == 0 {
            let camera = nav.camera();
            samples.push(TrajectorySample {
                frame: frame.number,
                time: frame.time,
                position: camera.position,
                look_at: camera.look_at,
                target_lateral: nav.target_lateral(),
                state: nav.state(),
                paused: nav.is_paused(),
            });
        }
    }

    log::info!(
        "replayed {} frames ({} moved), {} samples",
        script.frames,
        moved_frames,
        samples.len()
    );
    samples
}

fn apply<O: OrbitPrimitive>(nav: &mut NavigationController<O>, action: &ScriptAction) {
    log::trace!("script action {:?}", action);
    match action {
        ScriptAction::Input { event } => {
            nav.handle_input(event);
        }
        ScriptAction::Command { command } => {
            nav.command(*command);
        }
        ScriptAction::MoveBy { direction } => {
            nav.move_by(*direction);
        }
        ScriptAction::ResetToHome => {
            nav.reset_to_home();
        }
        ScriptAction::JumpTo { index } => {
            nav.jump_to(*index);
        }
        ScriptAction::JumpToId { id } => {
            nav.jump_to_id(id);
        }
        ScriptAction::StartMoving { direction } => {
            nav.start_moving(*direction);
        }
        ScriptAction::StopMoving => {
            nav.stop_moving();
        }
        ScriptAction::ContextLost => nav.on_context_lost(),
        ScriptAction::ContextRestored => nav.on_context_restored(),
    }
}
