//! Implementations for the MotionCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::info;

// Internal
use super::{MotionError, Params, ParamsError, RestState};
use crate::actuator::{ActuatorBank, ActuatorError, JointDriver, Trims, NUM_JOINTS};
use crate::clock::Clock;
use crate::oscillator::Oscillator;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Motion control state.
///
/// All motion operations block until complete. There is exactly one owner of the joints, so
/// nothing can interrupt or run alongside a motion once started.
pub struct MotionCtrl<D: JointDriver, C: Clock> {

    pub(crate) params: Params,

    pub(crate) bank: ActuatorBank<D>,

    pub(crate) clock: C,

    pub(crate) oscillators: [Oscillator; NUM_JOINTS],

    pub(crate) rest_state: RestState,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D: JointDriver, C: Clock> MotionCtrl<D, C> {

    /// Create a new controller.
    ///
    /// The robot is assumed to boot parked: detached, in the rest pose.
    pub fn new(params: Params, driver: D, clock: C) -> Result<Self, ParamsError> {
        params.are_valid()?;

        Ok(Self {
            params,
            bank: ActuatorBank::new(driver),
            clock,
            oscillators: [Oscillator::default(); NUM_JOINTS],
            rest_state: RestState::Resting,
        })
    }

    /// Enable drive to every joint.
    pub fn attach_all(&mut self) -> Result<(), ActuatorError> {
        self.bank.attach_all()
    }

    /// Disable drive to every joint.
    ///
    /// This does not change the rest state, use [`MotionCtrl::home`] to park the robot.
    pub fn detach_all(&mut self) -> Result<(), ActuatorError> {
        self.bank.detach_all()
    }

    /// Set the calibration trims of all joints.
    pub fn set_trims(&mut self, trims: Trims) {
        self.bank.set_trims(trims)
    }

    pub fn trims(&self) -> Trims {
        self.bank.trims()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn bank(&self) -> &ActuatorBank<D> {
        &self.bank
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Block for `duration_ms` without moving.
    pub fn pause(&mut self, duration_ms: u64) {
        self.clock.sleep_ms(duration_ms)
    }

    /// Prepare the joints for a motion command.
    ///
    /// Re-attaches any detached joint and leaves the rest state if parked. Every motion
    /// primitive calls this before its first command.
    pub(crate) fn ensure_active(&mut self) -> Result<(), MotionError> {
        self.bank.attach_all()?;

        if self.rest_state == RestState::Resting {
            info!("Leaving rest");
            self.rest_state = RestState::Active;
        }

        Ok(())
    }
}
