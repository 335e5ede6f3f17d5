//! Joint-space poses

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::actuator::{JointId, NUM_JOINTS};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Angle of every joint in the rest pose, the centre of the servo travel.
///
/// Units: degrees
pub const REST_ANGLE_DEG: f64 = 90.0;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A target angle for each of the six joints, in joint order.
///
/// Units: degrees
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Pose(pub [f64; NUM_JOINTS]);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Pose {
    /// The canonical parked pose, all joints centred.
    pub const REST: Pose = Pose([REST_ANGLE_DEG; NUM_JOINTS]);

    pub const fn new(angles_deg: [f64; NUM_JOINTS]) -> Self {
        Pose(angles_deg)
    }

    /// Build a pose from whole-degree angles, as the preset tables are written.
    pub fn from_degrees(angles_deg: [i32; NUM_JOINTS]) -> Self {
        let mut angles = [0f64; NUM_JOINTS];
        for (a, d) in angles.iter_mut().zip(angles_deg.iter()) {
            *a = *d as f64;
        }
        Pose(angles)
    }

    pub fn angles(&self) -> &[f64; NUM_JOINTS] {
        &self.0
    }
}

impl Default for Pose {
    fn default() -> Self {
        Pose::REST
    }
}

impl Index<JointId> for Pose {
    type Output = f64;

    fn index(&self, joint: JointId) -> &f64 {
        &self.0[joint.index()]
    }
}
