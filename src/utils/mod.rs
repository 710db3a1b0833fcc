//! Utility Module
//!
//! - [`OrbitControls`]: free-orbit camera controller
//! - [`Input`]: pointer state fed by the windowing host
//! - [`FpsCounter`]: frame rate and frame time statistics
//! - [`Timer`]: wall-clock or fixed-step frame clock

pub mod fps_counter;
pub mod input;
pub mod orbit_control;
pub mod time;

pub use fps_counter::{FpsCounter, FrameReport};
pub use input::{Input, PointerButton};
pub use orbit_control::OrbitControls;
pub use time::{TimeSource, Timer};
