pub mod clock;
pub mod context_guard;
pub mod gpu_context;
pub mod input;
pub mod input_adapter;
pub mod navigation;
pub mod orbit;
pub mod press;
pub mod timer;

pub use clock::Clock;
pub use context_guard::*;
pub use gpu_context::{create_instance, probe_render_backend, GpuContext};
pub use input::*;
pub use input_adapter::WinitInputAdapter;
pub use navigation::*;
pub use orbit::OrbitControls;
pub use press::PressDriver;
pub use timer::{Countdown, Repeating, Throttled};
