pub mod orbit;

pub use orbit::*;
