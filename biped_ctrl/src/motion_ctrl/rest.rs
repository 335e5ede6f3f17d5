//! Rest state machine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info};
use serde::Serialize;

// Internal
use super::{MotionCtrl, MotionError};
use crate::actuator::JointDriver;
use crate::clock::Clock;
use crate::pose::Pose;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Whether the robot is parked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RestState {
    /// Actuators detached, joints in the rest pose.
    Resting,
    /// Actuators attached, last commanded pose held.
    Active,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D: JointDriver, C: Clock> MotionCtrl<D, C> {

    /// Park the robot.
    ///
    /// If active, moves to the rest pose over the home duration, detaches every joint and
    /// becomes `Resting`. Does nothing if already resting.
    pub fn home(&mut self) -> Result<(), MotionError> {
        if self.rest_state == RestState::Resting {
            debug!("Already resting, home skipped");
            return Ok(())
        }

        let duration_ms = self.params.home_duration_ms;
        self.move_to(&Pose::REST, duration_ms)?;
        self.bank.detach_all()?;
        self.rest_state = RestState::Resting;

        info!("Homed, now resting");

        Ok(())
    }

    pub fn rest_state(&self) -> RestState {
        self.rest_state
    }

    /// Whether the robot is resting.
    pub fn is_resting(&self) -> bool {
        self.rest_state == RestState::Resting
    }

    /// Override the rest state flag.
    ///
    /// Only the flag changes; the joints are neither moved nor (de)attached.
    pub fn set_rest_state(&mut self, resting: bool) {
        self.rest_state = if resting {
            RestState::Resting
        } else {
            RestState::Active
        };
    }
}
