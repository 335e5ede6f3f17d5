//! # Mechanisms Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

use biped_lib::actuator::NUM_JOINTS;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Number of PWM channels on one PCA9685 board.
pub const NUM_PWM_CHANNELS: u8 = 16;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct MechExecParams {

    /// I2C address of the PCA9685 board
    pub i2c_address: u8,

    /// PCA9685 prescale value, sets the PWM frequency
    pub pwm_prescale: u8,

    /// Period of the PWM signal produced with `pwm_prescale`.
    ///
    /// Units: microseconds
    pub pwm_period_us: f64,

    /// Pulse width commanding 0 degrees.
    ///
    /// Units: microseconds
    pub min_pulse_us: f64,

    /// Pulse width commanding 180 degrees.
    ///
    /// Units: microseconds
    pub max_pulse_us: f64,

    /// PWM channel driving each joint, in joint order
    pub joint_channels: [u8; NUM_JOINTS],

    /// Path to the trim file, relative to the software root unless absolute
    pub trim_file: String,

    /// Load the trim file when starting up
    pub load_trims_at_boot: bool,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum MechParamsError {
    #[error("PWM period must be positive")]
    InvalidPeriod,

    #[error("Pulse range {0} - {1} us is empty or doesn't fit in the PWM period")]
    InvalidPulseRange(f64, f64),

    #[error("Channel {0} doesn't exist on the PWM board")]
    ChannelOutOfRange(u8),

    #[error("Channel {0} is assigned to more than one joint")]
    DuplicateChannel(u8),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl MechExecParams {
    pub fn are_valid(&self) -> Result<(), MechParamsError> {
        if !(self.pwm_period_us > 0.0) {
            return Err(MechParamsError::InvalidPeriod)
        }

        if !(self.min_pulse_us >= 0.0
            && self.min_pulse_us < self.max_pulse_us
            && self.max_pulse_us <= self.pwm_period_us)
        {
            return Err(MechParamsError::InvalidPulseRange(self.min_pulse_us, self.max_pulse_us))
        }

        for (i, channel) in self.joint_channels.iter().enumerate() {
            if *channel >= NUM_PWM_CHANNELS {
                return Err(MechParamsError::ChannelOutOfRange(*channel))
            }
            if self.joint_channels[..i].contains(channel) {
                return Err(MechParamsError::DuplicateChannel(*channel))
            }
        }

        Ok(())
    }
}
