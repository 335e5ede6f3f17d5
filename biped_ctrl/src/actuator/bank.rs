//! Implementation of the actuator bank

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use log::{debug, trace};

// Internal
use super::{ActuatorError, JointDriver, JointId, Trims, NUM_JOINTS};
use crate::pose::{Pose, REST_ANGLE_DEG};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The six joints of the robot, driven through a single [`JointDriver`].
///
/// The bank is the only owner of the joints' remembered positions. Every command goes through
/// [`ActuatorBank::set_angle`], which applies the joint's trim before handing the angle to the
/// driver.
pub struct ActuatorBank<D: JointDriver> {
    driver: D,

    joints: [JointState; NUM_JOINTS],
}

#[derive(Clone, Copy, Debug)]
struct JointState {
    /// Calibration offset added to every command.
    trim_deg: i8,

    /// Last commanded angle, before trim.
    current_angle_deg: f64,

    attached: bool,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for JointState {
    fn default() -> Self {
        Self {
            trim_deg: 0,
            current_angle_deg: REST_ANGLE_DEG,
            attached: false,
        }
    }
}

impl<D: JointDriver> ActuatorBank<D> {
    /// Create a new bank around a driver.
    ///
    /// All joints start detached, untrimmed and assumed to be at the rest pose.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            joints: [JointState::default(); NUM_JOINTS],
        }
    }

    /// Enable drive to all joints which are not already attached.
    pub fn attach_all(&mut self) -> Result<(), ActuatorError> {
        for joint in JointId::ALL.iter() {
            let state = &mut self.joints[joint.index()];
            if !state.attached {
                self.driver.attach(*joint)?;
                state.attached = true;
            }
        }

        Ok(())
    }

    /// Disable drive to all joints which are currently attached.
    pub fn detach_all(&mut self) -> Result<(), ActuatorError> {
        for joint in JointId::ALL.iter() {
            let state = &mut self.joints[joint.index()];
            if state.attached {
                self.driver.detach(*joint)?;
                state.attached = false;
            }
        }

        Ok(())
    }

    /// Command a joint to an angle.
    ///
    /// The joint's trim is added before the command reaches the driver, and the untrimmed angle
    /// is remembered as the joint's current position. Out of range angles are passed through for
    /// the driver to clamp.
    pub fn set_angle(&mut self, joint: JointId, angle_deg: f64) -> Result<(), ActuatorError> {
        let state = &mut self.joints[joint.index()];
        let trimmed_deg = angle_deg + state.trim_deg as f64;

        trace!("{:?} -> {:.2} deg (trimmed {:.2})", joint, angle_deg, trimmed_deg);

        self.driver.write_angle(joint, trimmed_deg)?;
        state.current_angle_deg = angle_deg;

        Ok(())
    }

    /// Set the calibration trim of a joint.
    pub fn set_trim(&mut self, joint: JointId, trim_deg: i8) {
        debug!("Trim of {:?} set to {} deg", joint, trim_deg);
        self.joints[joint.index()].trim_deg = trim_deg;
    }

    /// Get the calibration trim of a joint.
    pub fn trim(&self, joint: JointId) -> i8 {
        self.joints[joint.index()].trim_deg
    }

    /// Set the trims of all joints, in joint order.
    pub fn set_trims(&mut self, trims: Trims) {
        for (joint, trim) in JointId::ALL.iter().zip(trims.iter()) {
            self.set_trim(*joint, *trim);
        }
    }

    /// Get the trims of all joints, in joint order.
    pub fn trims(&self) -> Trims {
        let mut trims = [0i8; NUM_JOINTS];
        for (trim, state) in trims.iter_mut().zip(self.joints.iter()) {
            *trim = state.trim_deg;
        }
        trims
    }

    /// Last commanded angle of a joint, without trim.
    pub fn current_angle(&self, joint: JointId) -> f64 {
        self.joints[joint.index()].current_angle_deg
    }

    /// Last commanded angles of all joints, without trim.
    pub fn current_pose(&self) -> Pose {
        let mut angles = [0f64; NUM_JOINTS];
        for (angle, state) in angles.iter_mut().zip(self.joints.iter()) {
            *angle = state.current_angle_deg;
        }
        Pose::new(angles)
    }

    pub fn is_attached(&self, joint: JointId) -> bool {
        self.joints[joint.index()].attached
    }

    /// Reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable reference to the underlying driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::{SimClock, SimDriver};

    fn bank() -> ActuatorBank<SimDriver> {
        ActuatorBank::new(SimDriver::new(SimClock::new()))
    }

    #[test]
    fn test_trim_applied_to_command() {
        let mut bank = bank();
        bank.set_trim(JointId::HipRollR, -7);
        bank.set_angle(JointId::HipRollR, 100.0).unwrap();

        let cmd = bank.driver().commands().last().unwrap();
        assert_eq!(cmd.joint, JointId::HipRollR);
        assert_eq!(cmd.angle_deg, 93.0);

        // The remembered position is the untrimmed one
        assert_eq!(bank.current_angle(JointId::HipRollR), 100.0);
    }

    #[test]
    fn test_attach_detach_idempotent() {
        let mut bank = bank();
        bank.attach_all().unwrap();
        bank.attach_all().unwrap();
        assert_eq!(bank.driver().attach_count(), NUM_JOINTS);
        assert!(JointId::ALL.iter().all(|j| bank.is_attached(*j)));

        bank.detach_all().unwrap();
        bank.detach_all().unwrap();
        assert_eq!(bank.driver().detach_count(), NUM_JOINTS);
        assert!(JointId::ALL.iter().all(|j| !bank.is_attached(*j)));
    }

    #[test]
    fn test_trims_round_trip() {
        let mut bank = bank();
        let trims = [3, -4, 0, 127, -127, 1];
        bank.set_trims(trims);
        assert_eq!(bank.trims(), trims);
        assert_eq!(bank.trim(JointId::HipRollR), 127);
    }

    #[test]
    fn test_starts_at_rest() {
        let bank = bank();
        assert_eq!(bank.current_pose(), Pose::REST);
    }
}
