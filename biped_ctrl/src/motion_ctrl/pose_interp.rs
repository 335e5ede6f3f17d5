//! Point-to-point pose interpolation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;

// Internal
use super::{MotionCtrl, MotionError};
use crate::actuator::{JointDriver, JointId, NUM_JOINTS};
use crate::clock::Clock;
use crate::pose::Pose;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<D: JointDriver, C: Clock> MotionCtrl<D, C> {

    /// Move all joints linearly from their current angles to `target` over `duration_ms`.
    ///
    /// Moves no longer than one control tick are commanded in a single step. Longer moves are
    /// sampled once per tick. Whatever the intermediate rounding, the move finishes by commanding
    /// `target` exactly, so the remembered pose equals the target on return.
    ///
    /// Blocks for `duration_ms`.
    pub fn move_to(&mut self, target: &Pose, duration_ms: u64) -> Result<(), MotionError> {
        self.ensure_active()?;

        let tick_ms = self.params.tick_ms;

        if duration_ms > tick_ms {
            debug!("Moving to {:?} over {} ms", target.angles(), duration_ms);

            let from = self.bank.current_pose();
            let num_ticks = duration_ms as f64 / tick_ms as f64;

            let mut increment = [0f64; NUM_JOINTS];
            for (i, inc) in increment.iter_mut().enumerate() {
                *inc = (target.0[i] - from.0[i]) / num_ticks;
            }

            let start_ms = self.clock.now_ms();
            let final_ms = start_ms + duration_ms;

            let mut iteration: u64 = 1;
            while self.clock.now_ms() < final_ms {
                // A duration which isn't a whole number of ticks must not overshoot the target
                let progress = (iteration as f64).min(num_ticks);

                for joint in JointId::ALL.iter() {
                    let i = joint.index();
                    self.bank.set_angle(*joint, from.0[i] + progress * increment[i])?;
                }

                self.clock.sleep_until((start_ms + iteration * tick_ms).min(final_ms));
                iteration += 1;
            }
        }

        for joint in JointId::ALL.iter() {
            self.bank.set_angle(*joint, target[*joint])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::motion_ctrl::{Params, RestState};
    use crate::sim::{SimClock, SimDriver};

    fn ctrl() -> MotionCtrl<SimDriver, SimClock> {
        let clock = SimClock::new();
        MotionCtrl::new(Params::default(), SimDriver::new(clock.clone()), clock).unwrap()
    }

    #[test]
    fn test_short_move_single_step() {
        for duration in [0u64, 5, 10].iter() {
            let mut ctrl = ctrl();
            let target = Pose::from_degrees([100, 80, 60, 120, 90, 90]);
            ctrl.move_to(&target, *duration).unwrap();

            let cmds = ctrl.bank().driver().commands();
            assert_eq!(cmds.len(), NUM_JOINTS);
            for (cmd, joint) in cmds.iter().zip(JointId::ALL.iter()) {
                assert_eq!(cmd.joint, *joint);
                assert_eq!(cmd.angle_deg, target[*joint]);
                assert_eq!(cmd.t_ms, 0);
            }
            assert_eq!(ctrl.clock().now_ms(), 0);
        }
    }

    #[test]
    fn test_ends_exactly_on_target() {
        // Durations that don't divide into ticks and awkward increments
        for duration in [11u64, 300, 333, 505, 700].iter() {
            let mut ctrl = ctrl();
            ctrl.move_to(&Pose::from_degrees([97, 13, 144, 35, 71, 102]), 130).unwrap();

            let target = Pose::new([110.3, 70.0, 20.7, 160.0, 90.1, 89.9]);
            ctrl.move_to(&target, *duration).unwrap();

            assert_eq!(ctrl.bank().current_pose(), target);
            let last = &ctrl.bank().driver().commands()[ctrl.bank().driver().commands().len() - NUM_JOINTS..];
            for cmd in last.iter() {
                assert_eq!(cmd.angle_deg, target[cmd.joint]);
            }
        }
    }

    #[test]
    fn test_linear_ticks() {
        let mut ctrl = ctrl();
        let target = Pose::from_degrees([140, 90, 90, 90, 90, 40]);
        ctrl.move_to(&target, 500).unwrap();

        assert_eq!(ctrl.clock().now_ms(), 500);

        // 50 interpolated ticks plus the final exact command
        let yaw: Vec<_> = ctrl.bank().driver().joint_commands(JointId::HipYawL).collect();
        assert_eq!(yaw.len(), 51);
        assert_eq!(yaw[0].t_ms, 0);
        assert!((yaw[0].angle_deg - 91.0).abs() < 1e-9);
        assert_eq!(yaw[24].t_ms, 240);
        assert!((yaw[24].angle_deg - 115.0).abs() < 1e-9);

        // Monotonic and never past the target
        for pair in yaw.windows(2) {
            assert!(pair[1].angle_deg >= pair[0].angle_deg);
            assert!(pair[1].angle_deg <= 140.0);
        }

        let ankle: Vec<_> = ctrl.bank().driver().joint_commands(JointId::AnkleR).collect();
        assert!((ankle[9].angle_deg - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_commands_in_joint_order() {
        let mut ctrl = ctrl();
        ctrl.move_to(&Pose::from_degrees([110, 110, 90, 90, 90, 90]), 200).unwrap();

        for chunk in ctrl.bank().driver().commands().chunks(NUM_JOINTS) {
            let order: Vec<_> = chunk.iter().map(|c| c.joint).collect();
            assert_eq!(order, JointId::ALL.to_vec());
        }
    }

    #[test]
    fn test_move_from_rest_activates() {
        let mut ctrl = ctrl();
        assert_eq!(ctrl.rest_state(), RestState::Resting);

        ctrl.move_to(&Pose::REST, 500).unwrap();

        // Activated and attached before the first command
        assert_eq!(ctrl.rest_state(), RestState::Active);
        assert_eq!(ctrl.bank().driver().attach_count(), NUM_JOINTS);

        // Zero net displacement
        assert!(ctrl.bank().driver().commands().iter().all(|c| c.angle_deg == 90.0));
        assert_eq!(ctrl.bank().current_pose(), Pose::REST);

        // Stays active
        ctrl.move_to(&Pose::REST, 500).unwrap();
        assert_eq!(ctrl.rest_state(), RestState::Active);
        assert_eq!(ctrl.bank().driver().attach_count(), NUM_JOINTS);
    }

    #[test]
    fn test_trim_does_not_drift_remembered_pose() {
        let mut ctrl = ctrl();
        ctrl.set_trims([5, -5, 0, 0, 2, -2]);
        let target = Pose::from_degrees([100, 80, 90, 90, 90, 90]);
        ctrl.move_to(&target, 250).unwrap();

        assert_eq!(ctrl.bank().current_pose(), target);
        let last = ctrl.bank().driver().joint_commands(JointId::HipYawL).last().unwrap();
        assert_eq!(last.angle_deg, 105.0);
    }
}
