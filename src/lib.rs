pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod frame;
pub mod gallery;
pub mod math;
pub mod overlay;
pub mod renderer;
pub mod script;
pub mod traits;

pub use camera::CameraState;
pub use config::NavigationConfig;
pub use core::{
    Direction, FrameOutcome, InputEvent, NavCommand, NavState, NavigationController,
    OrbitControls,
};
pub use error::{NavError, Result};
pub use gallery::{Exhibit, Gallery};
