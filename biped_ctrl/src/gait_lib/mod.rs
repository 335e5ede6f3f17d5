//! # Gait library
//!
//! Named motion presets. Each preset is a pure function from a handful of semantic parameters
//! (steps, period, direction, height) to a [`GaitPlan`]: either one oscillator invocation for
//! periodic gaits, or a short fixed sequence of pose moves for one-off motions such as jumping.
//!
//! Plans are checked against the servo travel before anything moves, see [`GaitPlan::validate`].
//!
//! Joint order in every table is `[hip yaw L, hip yaw R, hip roll L, hip roll R, ankle L,
//! ankle R]`, and phases are written in degrees.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod locomotion;
mod poses;
mod sway;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use structopt::StructOpt;
use thiserror::Error;

use crate::actuator::{JointDriver, JointId, Trims, MAX_ANGLE_DEG, MIN_ANGLE_DEG, NUM_JOINTS};
use crate::clock::Clock;
use crate::motion_ctrl::{GaitInvocation, MotionCtrl, MotionError};
use crate::oscillator::OscillatorParams;
use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Direction of travel for walking-type gaits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

/// Side of the robot, used for turns and one-legged moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// What a preset resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum GaitPlan {
    /// A periodic gait run by the oscillator bank.
    Oscillate(GaitInvocation),

    /// A fixed sequence of pose moves.
    Poses(Vec<PoseStep>),
}

/// One step of a pose sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoseStep {
    /// Interpolate to `pose` over `duration_ms`.
    Move { pose: Pose, duration_ms: u64 },

    /// Hold still.
    Pause(u64),
}

/// A gait preset with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, StructOpt)]
pub enum GaitCmd {
    /// Walk forwards or backwards.
    ///
    /// Hips and feet are a quarter period out of phase, the sign of the lag sets the direction.
    #[structopt(name = "walk")]
    Walk {
        /// Number of steps, may be fractional.
        steps: f64,
        /// Period of one step in milliseconds.
        period_ms: u32,
        /// `forward` or `backward`.
        #[structopt(default_value = "forward")]
        dir: Direction,
    },

    /// Walk in an arc, turning to the given side.
    #[structopt(name = "turn")]
    Turn {
        steps: f64,
        period_ms: u32,
        /// `left` or `right`.
        #[structopt(default_value = "left")]
        side: Side,
    },

    /// Crouch and spring back up.
    #[structopt(name = "jump")]
    Jump {
        /// Number of jumps, rounded to a whole number.
        steps: f64,
        period_ms: u32,
    },

    /// Lean over onto one foot and back.
    #[structopt(name = "bend")]
    Bend {
        steps: u32,
        period_ms: u32,
        #[structopt(default_value = "left")]
        side: Side,
    },

    /// Stand on one foot and shake the other leg.
    #[structopt(name = "shake-leg")]
    ShakeLeg {
        steps: u32,
        period_ms: u32,
        #[structopt(default_value = "left")]
        side: Side,
    },

    /// Rise onto the feet edges and back down, both feet together.
    #[structopt(name = "updown")]
    UpDown {
        steps: f64,
        period_ms: u32,
        /// Height of the movement in degrees.
        #[structopt(default_value = "20")]
        height_deg: f64,
    },

    /// Rock from side to side.
    #[structopt(name = "swing")]
    Swing {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "20")]
        height_deg: f64,
    },

    /// Rock from side to side without the heels touching the floor.
    #[structopt(name = "tiptoe-swing")]
    TiptoeSwing {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "20")]
        height_deg: f64,
    },

    /// Twist the hips back and forth. Height is limited to 25 degrees.
    #[structopt(name = "jitter")]
    Jitter {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "20")]
        height_deg: f64,
    },

    /// Jitter while moving up and down. Height is limited to 13 degrees.
    #[structopt(name = "ascending-turn")]
    AscendingTurn {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "10")]
        height_deg: f64,
    },

    /// Slide sideways with a travelling wave through the feet.
    #[structopt(name = "moonwalker")]
    Moonwalker {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "25")]
        height_deg: f64,
        #[structopt(default_value = "left")]
        side: Side,
    },

    /// A mix of walking and moonwalking.
    #[structopt(name = "crusaito")]
    Crusaito {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "25")]
        height_deg: f64,
        #[structopt(default_value = "left")]
        side: Side,
    },

    /// Flap the feet while shuffling forwards or backwards.
    #[structopt(name = "flapping")]
    Flapping {
        steps: f64,
        period_ms: u32,
        #[structopt(default_value = "20")]
        height_deg: f64,
        #[structopt(default_value = "forward")]
        dir: Direction,
    },
}

/// Reasons a preset cannot be run.
#[derive(Debug, Error)]
pub enum GaitError {
    #[error("Step count must be finite and non-negative, got {0}")]
    InvalidSteps(f64),

    #[error("Period must be positive")]
    InvalidPeriod,

    #[error("Height must be finite, got {0}")]
    InvalidHeight(f64),

    #[error(
        "{joint:?} would swing {excursion_deg:.1} deg from rest (including trim), \
         more than the {max_deg:.1} deg allowed"
    )]
    ExcursionTooLarge {
        joint: JointId,
        excursion_deg: f64,
        max_deg: f64,
    },

    #[error("{joint:?} target of {angle_deg:.1} deg (including trim) is outside the servo travel")]
    PoseOutOfRange { joint: JointId, angle_deg: f64 },

    #[error("Unknown direction \"{0}\", expected forward or backward")]
    UnknownDirection(String),

    #[error("Unknown side \"{0}\", expected left or right")]
    UnknownSide(String),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Direction {
    /// `+1` forward, `-1` backward.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

impl Side {
    /// `+1` left, `-1` right.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

impl FromStr for Direction {
    type Err = GaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "fwd" | "f" => Ok(Direction::Forward),
            "backward" | "back" | "b" => Ok(Direction::Backward),
            _ => Err(GaitError::UnknownDirection(s.into())),
        }
    }
}

impl FromStr for Side {
    type Err = GaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            _ => Err(GaitError::UnknownSide(s.into())),
        }
    }
}

impl GaitCmd {
    /// Resolve the preset into a plan.
    pub fn plan(&self) -> Result<GaitPlan, GaitError> {
        let (steps, period_ms) = self.steps_and_period();
        if !steps.is_finite() || steps < 0.0 {
            return Err(GaitError::InvalidSteps(steps))
        }
        if period_ms == 0 {
            return Err(GaitError::InvalidPeriod)
        }
        if let Some(height_deg) = self.height_deg() {
            if !height_deg.is_finite() {
                return Err(GaitError::InvalidHeight(height_deg))
            }
        }

        let plan = match *self {
            GaitCmd::Walk { steps, period_ms, dir } => locomotion::walk(steps, period_ms, dir),
            GaitCmd::Turn { steps, period_ms, side } => locomotion::turn(steps, period_ms, side),
            GaitCmd::Moonwalker { steps, period_ms, height_deg, side } =>
                locomotion::moonwalker(steps, period_ms, height_deg, side),
            GaitCmd::Crusaito { steps, period_ms, height_deg, side } =>
                locomotion::crusaito(steps, period_ms, height_deg, side),
            GaitCmd::Jump { steps, period_ms } => poses::jump(steps, period_ms),
            GaitCmd::Bend { steps, period_ms, side } => poses::bend(steps, period_ms, side),
            GaitCmd::ShakeLeg { steps, period_ms, side } =>
                poses::shake_leg(steps, period_ms, side),
            GaitCmd::UpDown { steps, period_ms, height_deg } =>
                sway::updown(steps, period_ms, height_deg),
            GaitCmd::Swing { steps, period_ms, height_deg } =>
                sway::swing(steps, period_ms, height_deg),
            GaitCmd::TiptoeSwing { steps, period_ms, height_deg } =>
                sway::tiptoe_swing(steps, period_ms, height_deg),
            GaitCmd::Jitter { steps, period_ms, height_deg } =>
                sway::jitter(steps, period_ms, height_deg),
            GaitCmd::AscendingTurn { steps, period_ms, height_deg } =>
                sway::ascending_turn(steps, period_ms, height_deg),
            GaitCmd::Flapping { steps, period_ms, height_deg, dir } =>
                sway::flapping(steps, period_ms, height_deg, dir),
        };

        Ok(plan)
    }

    fn steps_and_period(&self) -> (f64, u32) {
        match *self {
            GaitCmd::Walk { steps, period_ms, .. }
            | GaitCmd::Turn { steps, period_ms, .. }
            | GaitCmd::Jump { steps, period_ms }
            | GaitCmd::UpDown { steps, period_ms, .. }
            | GaitCmd::Swing { steps, period_ms, .. }
            | GaitCmd::TiptoeSwing { steps, period_ms, .. }
            | GaitCmd::Jitter { steps, period_ms, .. }
            | GaitCmd::AscendingTurn { steps, period_ms, .. }
            | GaitCmd::Moonwalker { steps, period_ms, .. }
            | GaitCmd::Crusaito { steps, period_ms, .. }
            | GaitCmd::Flapping { steps, period_ms, .. } => (steps, period_ms),
            GaitCmd::Bend { steps, period_ms, .. }
            | GaitCmd::ShakeLeg { steps, period_ms, .. } => (steps as f64, period_ms),
        }
    }

    fn height_deg(&self) -> Option<f64> {
        match *self {
            GaitCmd::UpDown { height_deg, .. }
            | GaitCmd::Swing { height_deg, .. }
            | GaitCmd::TiptoeSwing { height_deg, .. }
            | GaitCmd::Jitter { height_deg, .. }
            | GaitCmd::AscendingTurn { height_deg, .. }
            | GaitCmd::Moonwalker { height_deg, .. }
            | GaitCmd::Crusaito { height_deg, .. }
            | GaitCmd::Flapping { height_deg, .. } => Some(height_deg),
            GaitCmd::Walk { .. }
            | GaitCmd::Turn { .. }
            | GaitCmd::Jump { .. }
            | GaitCmd::Bend { .. }
            | GaitCmd::ShakeLeg { .. } => None,
        }
    }
}

impl GaitPlan {

    /// Check that the plan keeps every joint inside the servo travel once trims are applied.
    ///
    /// Oscillating joints may not deviate from the rest angle by more than `max_excursion_deg`
    /// (`|amplitude| + |offset| + |trim|`), and pose targets plus trim must lie within the
    /// servo's 0-180 degree travel. Non-finite angles never pass.
    pub fn validate(&self, trims: &Trims, max_excursion_deg: f64) -> Result<(), GaitError> {
        match self {
            GaitPlan::Oscillate(gait) => {
                for (joint, params) in JointId::ALL.iter().zip(gait.params.iter()) {
                    let trim = trims[joint.index()] as f64;
                    let excursion_deg = params.max_excursion_deg() + trim.abs();
                    if excursion_deg.is_nan() || excursion_deg > max_excursion_deg {
                        return Err(GaitError::ExcursionTooLarge {
                            joint: *joint,
                            excursion_deg,
                            max_deg: max_excursion_deg,
                        })
                    }
                }
            }
            GaitPlan::Poses(steps) => {
                for step in steps.iter() {
                    if let PoseStep::Move { pose, .. } = step {
                        for joint in JointId::ALL.iter() {
                            let angle_deg = pose[*joint] + trims[joint.index()] as f64;
                            if !(MIN_ANGLE_DEG..=MAX_ANGLE_DEG).contains(&angle_deg) {
                                return Err(GaitError::PoseOutOfRange {
                                    joint: *joint,
                                    angle_deg,
                                })
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Build an oscillating plan from amplitude, offset and phase tables.
///
/// Phases are given in degrees.
pub(crate) fn oscillate(
    amplitude_deg: [f64; NUM_JOINTS],
    offset_deg: [f64; NUM_JOINTS],
    phase_deg: [f64; NUM_JOINTS],
    period_ms: u32,
    steps: f64,
) -> GaitPlan {
    let mut params = [OscillatorParams::default(); NUM_JOINTS];
    for (i, p) in params.iter_mut().enumerate() {
        *p = OscillatorParams::new(amplitude_deg[i], offset_deg[i], phase_deg[i].to_radians());
    }

    GaitPlan::Oscillate(GaitInvocation {
        params,
        period_ms,
        cycles: steps,
    })
}

impl<D: JointDriver, C: Clock> MotionCtrl<D, C> {

    /// Plan, validate and execute a gait preset.
    ///
    /// Nothing moves if the plan would take a joint out of its travel.
    pub fn perform(&mut self, cmd: &GaitCmd) -> Result<(), MotionError> {
        let plan = cmd.plan()?;

        if let Err(e) = plan.validate(&self.bank.trims(), self.params.max_excursion_deg) {
            warn!("Rejecting {:?}: {}", cmd, e);
            return Err(e.into())
        }

        debug!("Performing {:?}", cmd);
        self.execute_plan(&plan)
    }

    /// Execute an already validated plan.
    pub fn execute_plan(&mut self, plan: &GaitPlan) -> Result<(), MotionError> {
        match plan {
            GaitPlan::Oscillate(gait) => {
                self.run_gait(gait)?;
            }
            GaitPlan::Poses(steps) => {
                for step in steps.iter() {
                    match step {
                        PoseStep::Move { pose, duration_ms } => self.move_to(pose, *duration_ms)?,
                        PoseStep::Pause(duration_ms) => self.pause(*duration_ms),
                    }
                }
            }
        }

        Ok(())
    }

    pub fn walk(&mut self, steps: f64, period_ms: u32, dir: Direction) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Walk { steps, period_ms, dir })
    }

    pub fn turn(&mut self, steps: f64, period_ms: u32, side: Side) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Turn { steps, period_ms, side })
    }

    pub fn jump(&mut self, steps: f64, period_ms: u32) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Jump { steps, period_ms })
    }

    pub fn bend(&mut self, steps: u32, period_ms: u32, side: Side) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Bend { steps, period_ms, side })
    }

    pub fn shake_leg(&mut self, steps: u32, period_ms: u32, side: Side) -> Result<(), MotionError> {
        self.perform(&GaitCmd::ShakeLeg { steps, period_ms, side })
    }

    pub fn updown(&mut self, steps: f64, period_ms: u32, height_deg: f64) -> Result<(), MotionError> {
        self.perform(&GaitCmd::UpDown { steps, period_ms, height_deg })
    }

    pub fn swing(&mut self, steps: f64, period_ms: u32, height_deg: f64) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Swing { steps, period_ms, height_deg })
    }

    pub fn tiptoe_swing(
        &mut self,
        steps: f64,
        period_ms: u32,
        height_deg: f64
    ) -> Result<(), MotionError> {
        self.perform(&GaitCmd::TiptoeSwing { steps, period_ms, height_deg })
    }

    pub fn jitter(&mut self, steps: f64, period_ms: u32, height_deg: f64) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Jitter { steps, period_ms, height_deg })
    }

    pub fn ascending_turn(
        &mut self,
        steps: f64,
        period_ms: u32,
        height_deg: f64
    ) -> Result<(), MotionError> {
        self.perform(&GaitCmd::AscendingTurn { steps, period_ms, height_deg })
    }

    pub fn moonwalker(
        &mut self,
        steps: f64,
        period_ms: u32,
        height_deg: f64,
        side: Side
    ) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Moonwalker { steps, period_ms, height_deg, side })
    }

    pub fn crusaito(
        &mut self,
        steps: f64,
        period_ms: u32,
        height_deg: f64,
        side: Side
    ) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Crusaito { steps, period_ms, height_deg, side })
    }

    pub fn flapping(
        &mut self,
        steps: f64,
        period_ms: u32,
        height_deg: f64,
        dir: Direction
    ) -> Result<(), MotionError> {
        self.perform(&GaitCmd::Flapping { steps, period_ms, height_deg, dir })
    }
}
