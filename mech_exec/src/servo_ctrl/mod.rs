//! # Servo Controller Module
//!
//! This module drives the joints of the robot through a PWM servo driver board. The
//! [`ServoDriver`] trait abstracts over the board, while [`ServoJointDriver`] converts joint angles
//! into pulse widths and implements the controller's [`JointDriver`].

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ServoDriver`] implementation for the Adafruit PCA9685 16 channel servo driver board.
pub mod pca9685;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::debug;

use biped_lib::actuator::{
    ActuatorError, JointDriver, JointId, MAX_ANGLE_DEG, MIN_ANGLE_DEG, NUM_JOINTS
};
use util::maths::{clamp, lin_map};

use crate::params::MechExecParams;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Resolution of the PWM counter.
pub const PWM_COUNTS: u16 = 4096;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for accessing servo driver boards.
pub trait ServoDriver {

    /// Set the duty cycle of a channel.
    ///
    /// ## Arguments
    /// - `channel` - The channel to set the duty cycle for
    /// - `duty_cycle` - The duty cycle to set. Must be a value between 0.0 and 1.0. Values outside
    ///   this range will be rejected.
    fn set_duty_cycle(&mut self, channel: u8, duty_cycle: f64) -> Result<(), ServoError>;

    /// Turn a channel fully off, so the servo is no longer driven.
    fn set_off(&mut self, channel: u8) -> Result<(), ServoError>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Drives the joints through a servo board.
///
/// Attaching a joint doesn't move it, the servo starts holding position at the next angle command.
pub struct ServoJointDriver<S: ServoDriver> {
    servos: S,

    config: ServoConfig,

    attached: [bool; NUM_JOINTS],
}

/// Mapping from joints to servo channels and pulse widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ServoConfig {
    pub joint_channels: [u8; NUM_JOINTS],

    pub min_duty_cycle: f64,

    pub max_duty_cycle: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ServoError {
    #[error("An I2C error occured")]
    I2c,

    #[error("Duty cycle must be between 0.0 and 1.0")]
    InvalidDutyCycle,

    #[error("Channel {0} doesn't exist")]
    InvalidChannel(u8),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ServoConfig {
    pub fn from_params(params: &MechExecParams) -> Self {
        Self {
            joint_channels: params.joint_channels,
            min_duty_cycle: params.min_pulse_us / params.pwm_period_us,
            max_duty_cycle: params.max_pulse_us / params.pwm_period_us,
        }
    }

    /// Duty cycle commanding `angle_deg`, which is clamped to the servo travel.
    pub fn duty_cycle(&self, angle_deg: f64) -> f64 {
        lin_map(
            (MIN_ANGLE_DEG, MAX_ANGLE_DEG),
            (self.min_duty_cycle, self.max_duty_cycle),
            clamp(angle_deg, MIN_ANGLE_DEG, MAX_ANGLE_DEG),
        )
    }
}

impl<S: ServoDriver> ServoJointDriver<S> {
    pub fn new(servos: S, config: ServoConfig) -> Self {
        Self {
            servos,
            config,
            attached: [false; NUM_JOINTS],
        }
    }

    pub fn servos(&self) -> &S {
        &self.servos
    }

    fn channel(&self, joint: JointId) -> u8 {
        self.config.joint_channels[joint.index()]
    }
}

impl<S: ServoDriver> JointDriver for ServoJointDriver<S> {
    fn attach(&mut self, joint: JointId) -> Result<(), ActuatorError> {
        debug!("Attaching {:?} on channel {}", joint, self.channel(joint));
        self.attached[joint.index()] = true;
        Ok(())
    }

    fn detach(&mut self, joint: JointId) -> Result<(), ActuatorError> {
        let channel = self.channel(joint);
        debug!("Detaching {:?} on channel {}", joint, channel);

        self.servos
            .set_off(channel)
            .map_err(|e| ActuatorError::Driver(joint, e.to_string()))?;
        self.attached[joint.index()] = false;

        Ok(())
    }

    fn write_angle(&mut self, joint: JointId, angle_deg: f64) -> Result<(), ActuatorError> {
        if !self.attached[joint.index()] {
            return Ok(())
        }

        let duty_cycle = self.config.duty_cycle(angle_deg);
        self.servos
            .set_duty_cycle(self.channel(joint), duty_cycle)
            .map_err(|e| ActuatorError::Driver(joint, e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Default)]
    struct MockServos {
        duty: Vec<(u8, f64)>,
        off: Vec<u8>,
    }

    impl ServoDriver for MockServos {
        fn set_duty_cycle(&mut self, channel: u8, duty_cycle: f64) -> Result<(), ServoError> {
            self.duty.push((channel, duty_cycle));
            Ok(())
        }

        fn set_off(&mut self, channel: u8) -> Result<(), ServoError> {
            self.off.push(channel);
            Ok(())
        }
    }

    fn config() -> ServoConfig {
        ServoConfig {
            joint_channels: [5, 4, 3, 2, 1, 0],
            min_duty_cycle: 0.025,
            max_duty_cycle: 0.125,
        }
    }

    #[test]
    fn test_duty_cycle_mapping() {
        let config = config();
        assert!((config.duty_cycle(0.0) - 0.025).abs() < 1e-12);
        assert!((config.duty_cycle(90.0) - 0.075).abs() < 1e-12);
        assert!((config.duty_cycle(180.0) - 0.125).abs() < 1e-12);

        // Clamped to the travel
        assert!((config.duty_cycle(200.0) - 0.125).abs() < 1e-12);
        assert!((config.duty_cycle(-10.0) - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_detached_joint_not_driven() {
        let mut driver = ServoJointDriver::new(MockServos::default(), config());

        driver.write_angle(JointId::HipYawL, 90.0).unwrap();
        assert!(driver.servos().duty.is_empty());

        driver.attach(JointId::HipYawL).unwrap();
        driver.write_angle(JointId::HipYawL, 90.0).unwrap();
        assert_eq!(driver.servos().duty.len(), 1);
        assert_eq!(driver.servos().duty[0].0, 5);

        driver.detach(JointId::HipYawL).unwrap();
        assert_eq!(driver.servos().off, vec![5]);
    }
}
