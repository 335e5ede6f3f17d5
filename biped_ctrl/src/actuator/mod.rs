//! # Actuator module
//!
//! Provides the [`ActuatorBank`], which owns the six joints of the robot, and the [`JointDriver`]
//! trait that hardware (or simulated) servo drivers implement.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod bank;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

pub use bank::*;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The number of actuated joints on the robot.
pub const NUM_JOINTS: usize = 6;

/// Lower limit of the servo travel.
///
/// Units: degrees
pub const MIN_ANGLE_DEG: f64 = 0.0;

/// Upper limit of the servo travel.
///
/// Units: degrees
pub const MAX_ANGLE_DEG: f64 = 180.0;

// ------------------------------------------------------------------------------------------------
// TYPES
// ------------------------------------------------------------------------------------------------

/// Calibration trim of every joint, in joint index order.
///
/// Units: degrees
pub type Trims = [i8; NUM_JOINTS];

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for driving the joint servos.
///
/// Implementations receive the trimmed angle and are responsible for clamping it into whatever
/// range the physical servo accepts.
pub trait JointDriver {
    /// Enable the PWM output of a joint.
    fn attach(&mut self, joint: JointId) -> Result<(), ActuatorError>;

    /// Disable the PWM output of a joint, letting the servo go limp.
    fn detach(&mut self, joint: JointId) -> Result<(), ActuatorError>;

    /// Command the servo of a joint to an absolute angle.
    ///
    /// ## Arguments
    /// - `joint` - The joint to command
    /// - `angle_deg` - The trimmed angle in degrees, nominally between 0 and 180.
    fn write_angle(&mut self, joint: JointId, angle_deg: f64) -> Result<(), ActuatorError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// IDs of the robot's joints, in their fixed command order.
#[derive(Serialize, Deserialize, Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum JointId {
    HipYawL,
    HipYawR,
    HipRollL,
    HipRollR,
    AnkleL,
    AnkleR,
}

#[derive(thiserror::Error, Debug)]
pub enum ActuatorError {
    #[error("Joint index {0} is out of range, there are only {n} joints", n = NUM_JOINTS)]
    InvalidJointIndex(usize),

    #[error("Driver error on joint {0:?}: {1}")]
    Driver(JointId, String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl JointId {
    /// All joints in command order.
    pub const ALL: [JointId; NUM_JOINTS] = [
        JointId::HipYawL,
        JointId::HipYawR,
        JointId::HipRollL,
        JointId::HipRollR,
        JointId::AnkleL,
        JointId::AnkleR,
    ];

    /// Index of the joint in the bank.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get the joint at the given index.
    pub fn from_index(index: usize) -> Result<Self, ActuatorError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ActuatorError::InvalidJointIndex(index))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_joint_index() {
        for (i, joint) in JointId::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
            assert_eq!(JointId::from_index(i).unwrap(), *joint);
        }

        assert!(matches!(
            JointId::from_index(6),
            Err(ActuatorError::InvalidJointIndex(6))
        ));
    }
}
