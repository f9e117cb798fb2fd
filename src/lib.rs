//! A cart riding the track `y = x^2` under thrust, gravity and drag,
//! integrated one explicit Euler step per animation frame.
//!
//! Modules:
//! - `state`: cart state and the integration step
//! - `driver`: frame sequencing and the `RenderSink` seam
//! - `widget`: terminal view built on crossterm
//! - `trace`: CSV output of the trajectory

pub mod driver;
pub mod error;
pub mod graphics;
pub mod math;
pub mod state;
pub mod trace;
pub mod vertex;
pub mod widget;

pub use driver::{run, Control, DriverConfig, RenderSink, RunSummary};
pub use error::{Error, Result};
pub use state::KinematicState;
