//! Motion control module
//!
//! [`MotionCtrl`] owns the actuator bank, the clock and the oscillator bank, and provides the two
//! blocking motion primitives everything else is built from:
//!
//! - [`MotionCtrl::run_gait`] - runs the six oscillators in lock-step for a number of cycles,
//! - [`MotionCtrl::move_to`] - moves all joints linearly to a target pose.
//!
//! It also tracks whether the robot is parked ([`RestState`]).

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod gait_engine;
mod params;
mod pose_interp;
mod rest;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use gait_engine::*;
pub use params::*;
pub use rest::*;
pub use state::*;

use crate::actuator::ActuatorError;
use crate::gait_lib::GaitError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during MotionCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    #[error("Gait period must be positive, got {0} ms")]
    InvalidPeriod(u32),

    #[error("Gait cycle count must be finite and non-negative, got {0}")]
    InvalidCycles(f64),

    #[error("Actuator failure: {0}")]
    Actuator(#[from] ActuatorError),

    #[error("Rejected gait: {0}")]
    Gait(#[from] GaitError),
}
