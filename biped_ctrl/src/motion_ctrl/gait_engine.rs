//! Gait engine, running the oscillator bank in lock-step

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::{Deserialize, Serialize};

// Internal
use super::{MotionCtrl, MotionError};
use crate::actuator::{JointDriver, JointId, NUM_JOINTS};
use crate::clock::Clock;
use crate::oscillator::OscillatorParams;
use crate::pose::REST_ANGLE_DEG;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One periodic gait to execute.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GaitInvocation {
    /// Oscillation of each joint, in joint order.
    pub params: [OscillatorParams; NUM_JOINTS],

    /// Period shared by all joints.
    ///
    /// Units: milliseconds
    pub period_ms: u32,

    /// Number of periods to run. A fractional part runs as a final, shorter traversal.
    pub cycles: f64,
}

/// Summary of a completed gait run.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct GaitReport {
    /// Duration of each traversal of the oscillators, in order.
    ///
    /// Units: milliseconds
    pub traversals_ms: Vec<u64>,

    /// Number of times the oscillator bank was sampled and commanded.
    pub num_samples: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl GaitInvocation {

    /// Check that the period and cycle count can be executed.
    pub fn check(&self) -> Result<(), MotionError> {
        if self.period_ms == 0 {
            return Err(MotionError::InvalidPeriod(self.period_ms))
        }

        if !self.cycles.is_finite() || self.cycles < 0.0 {
            return Err(MotionError::InvalidCycles(self.cycles))
        }

        Ok(())
    }

    /// Durations of the traversals this invocation is split into: one full period per whole
    /// cycle, then the fractional remainder if there is one.
    ///
    /// Produced lazily, the number of whole cycles is unbounded.
    pub fn traversal_durations_ms(&self) -> impl Iterator<Item = u64> {
        let whole = self.cycles.trunc();
        let period_ms = self.period_ms as u64;
        let partial_ms = (self.period_ms as f64 * (self.cycles - whole)).round() as u64;

        (0..whole as u64)
            .map(move |_| period_ms)
            .chain(Some(partial_ms).filter(|ms| *ms > 0))
    }
}

impl GaitReport {
    /// Total time spent oscillating.
    pub fn elapsed_ms(&self) -> u64 {
        self.traversals_ms.iter().sum()
    }
}

impl<D: JointDriver, C: Clock> MotionCtrl<D, C> {

    /// Run a gait.
    ///
    /// Whole cycles are executed as repeated full-period traversals and any fractional remainder
    /// as one more traversal of proportionally reduced duration, with the same parameters.
    /// Each traversal restarts the oscillators. Joints are left where the last sample put them.
    ///
    /// Blocks for `period_ms * cycles`.
    pub fn run_gait(&mut self, gait: &GaitInvocation) -> Result<GaitReport, MotionError> {
        gait.check()?;

        let mut report = GaitReport::default();

        let mut durations = gait.traversal_durations_ms().peekable();
        if durations.peek().is_none() {
            debug!("Zero cycle gait, nothing to do");
            return Ok(report)
        }

        self.ensure_active()?;

        debug!("Running gait: {} cycles of {} ms", gait.cycles, gait.period_ms);

        for duration_ms in durations {
            let start_ms = self.clock.now_ms();
            report.num_samples += self.oscillate(gait, duration_ms)?;
            report.traversals_ms.push(self.clock.now_ms() - start_ms);
        }

        Ok(report)
    }

    /// Run one traversal of the oscillators for `duration_ms`, returning the number of samples.
    ///
    /// The bank is sampled once per control tick, on tick boundaries measured from the start of
    /// the traversal, with the last sample taken at the end of the traversal.
    fn oscillate(
        &mut self,
        gait: &GaitInvocation,
        duration_ms: u64
    ) -> Result<usize, MotionError> {
        let tick_ms = self.params.tick_ms;

        let start_ms = self.clock.now_ms();
        let end_ms = start_ms + duration_ms;

        for (osc, params) in self.oscillators.iter_mut().zip(gait.params.iter()) {
            osc.configure(*params, gait.period_ms as f64);
            osc.start(start_ms);
        }

        let mut num_samples = 0;
        let mut tick: u64 = 1;

        loop {
            let now_ms = self.clock.now_ms();
            if now_ms > end_ms {
                break
            }

            for joint in JointId::ALL.iter() {
                let angle_deg = REST_ANGLE_DEG + self.oscillators[joint.index()].sample(now_ms);
                self.bank.set_angle(*joint, angle_deg)?;
            }
            num_samples += 1;

            if now_ms == end_ms {
                break
            }

            self.clock.sleep_until((start_ms + tick * tick_ms).min(end_ms));
            tick += 1;
        }

        trace!("Traversal of {} ms took {} samples", duration_ms, num_samples);

        Ok(num_samples)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::motion_ctrl::{Params, RestState};
    use crate::sim::{SimClock, SimDriver};
    use std::f64::consts::FRAC_PI_2;

    fn ctrl() -> MotionCtrl<SimDriver, SimClock> {
        let clock = SimClock::new();
        MotionCtrl::new(Params::default(), SimDriver::new(clock.clone()), clock).unwrap()
    }

    fn walk_like(period_ms: u32, cycles: f64) -> GaitInvocation {
        let mut params = [OscillatorParams::default(); NUM_JOINTS];
        params[0] = OscillatorParams::new(30.0, 0.0, 0.0);
        params[1] = OscillatorParams::new(30.0, 0.0, 0.0);
        params[2] = OscillatorParams::new(20.0, 4.0, -FRAC_PI_2);
        params[3] = OscillatorParams::new(20.0, -4.0, -FRAC_PI_2);

        GaitInvocation {
            params,
            period_ms,
            cycles,
        }
    }

    #[test]
    fn test_fractional_cycles_runtime() {
        let mut ctrl = ctrl();
        let report = ctrl.run_gait(&walk_like(1000, 2.5)).unwrap();

        assert_eq!(report.traversals_ms, vec![1000, 1000, 500]);
        let tick = ctrl.params().tick_ms;
        let runtime = ctrl.clock().now_ms();
        assert!(runtime >= 2500 - tick && runtime <= 2500 + tick);
        assert_eq!(report.elapsed_ms(), runtime);
    }

    #[test]
    fn test_integer_cycles() {
        for n in 1..4u32 {
            let mut ctrl = ctrl();
            let report = ctrl.run_gait(&walk_like(800, n as f64)).unwrap();

            assert_eq!(report.traversals_ms.len(), n as usize);
            assert!(report.traversals_ms.iter().all(|t| *t == 800));

            // Each traversal samples every tick including both ends
            assert_eq!(report.num_samples, n as usize * 81);
            assert_eq!(
                ctrl.bank().driver().commands().len(),
                report.num_samples * NUM_JOINTS
            );
        }
    }

    #[test]
    fn test_partial_cycle_shorter_than_tick() {
        let mut ctrl = ctrl();
        let report = ctrl.run_gait(&walk_like(1000, 1.004)).unwrap();
        assert_eq!(report.traversals_ms, vec![1000, 4]);
    }

    #[test]
    fn test_huge_cycle_count_is_lazy() {
        let gait = walk_like(1000, 1e12 + 0.5);
        let mut durations = gait.traversal_durations_ms();

        assert_eq!(durations.next(), Some(1000));
        assert_eq!(durations.nth(1_000_000), Some(1000));
        assert_eq!(walk_like(1000, 2.5).traversal_durations_ms().last(), Some(500));
    }

    #[test]
    fn test_zero_cycles_no_motion() {
        let mut ctrl = ctrl();
        let report = ctrl.run_gait(&walk_like(1000, 0.0)).unwrap();

        assert!(report.traversals_ms.is_empty());
        assert!(ctrl.bank().driver().commands().is_empty());
        assert_eq!(ctrl.rest_state(), RestState::Resting);
        assert_eq!(ctrl.clock().now_ms(), 0);
    }

    #[test]
    fn test_invalid_invocations() {
        let mut ctrl = ctrl();
        assert!(matches!(
            ctrl.run_gait(&walk_like(0, 1.0)),
            Err(MotionError::InvalidPeriod(0))
        ));
        assert!(matches!(
            ctrl.run_gait(&walk_like(1000, -1.0)),
            Err(MotionError::InvalidCycles(_))
        ));
        assert!(matches!(
            ctrl.run_gait(&walk_like(1000, std::f64::NAN)),
            Err(MotionError::InvalidCycles(_))
        ));
        assert!(ctrl.bank().driver().commands().is_empty());
    }

    #[test]
    fn test_samples_follow_oscillators() {
        let mut ctrl = ctrl();
        ctrl.run_gait(&walk_like(1000, 1.0)).unwrap();

        assert_eq!(ctrl.rest_state(), RestState::Active);

        let hip: Vec<_> = ctrl.bank().driver().joint_commands(JointId::HipYawL).collect();
        // Quarter period: hip at the top of its swing
        assert_eq!(hip[25].t_ms, 250);
        assert!((hip[25].angle_deg - 120.0).abs() < 1e-9);

        let roll: Vec<_> = ctrl.bank().driver().joint_commands(JointId::HipRollR).collect();
        // Roll lags by a quarter period, starting at its trough
        assert!((roll[0].angle_deg - (90.0 - 4.0 - 20.0)).abs() < 1e-9);

        // Untouched joints stay centred
        assert!(ctrl
            .bank()
            .driver()
            .joint_commands(JointId::AnkleL)
            .all(|c| (c.angle_deg - 90.0).abs() < 1e-9));

        // Joints are not homed at the end
        assert!((ctrl.bank().current_angle(JointId::HipYawL) - 90.0).abs() < 1e-9);
        assert!((ctrl.bank().current_angle(JointId::HipRollL) - (90.0 + 4.0 - 20.0)).abs() < 1e-9);
    }
}
