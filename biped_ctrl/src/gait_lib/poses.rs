//! One-off moves built from fixed pose sequences.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::{GaitPlan, PoseStep, Side};
use crate::pose::Pose;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Time to lean over in a bend.
const BEND_LEAN_MS: u64 = 800;

/// Time to get onto one foot before shaking the other.
const SHAKE_LEAN_MS: u64 = 1000;

/// Number of shakes per shake_leg step.
const SHAKES_PER_STEP: usize = 2;

/// Shortest time spent shaking.
const SHAKE_MIN_MS: i64 = 400;

/// Time to return to rest between repetitions.
const RECOVER_MS: u64 = 500;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn move_to(pose: [i32; 6], duration_ms: u64) -> PoseStep {
    PoseStep::Move {
        pose: Pose::from_degrees(pose),
        duration_ms,
    }
}

/// Crouch onto the feet edges and return to rest, `steps` times.
pub(super) fn jump(steps: f64, period_ms: u32) -> GaitPlan {
    let period_ms = period_ms as u64;
    let mut seq = Vec::new();

    for _ in 0..(steps.round() as usize) {
        seq.push(move_to([90, 90, 160, 20, 160, 20], period_ms));
        seq.push(PoseStep::Move { pose: Pose::REST, duration_ms: period_ms });
    }

    GaitPlan::Poses(seq)
}

pub(super) fn bend(steps: u32, period_ms: u32, side: Side) -> GaitPlan {
    let (lean, lift) = match side {
        Side::Left => ([90, 90, 62, 35, 20, 60], [90, 90, 62, 105, 60, 20]),
        Side::Right => ([90, 90, 145, 120, 20, 60], [90, 90, 75, 120, 60, 20]),
    };

    let hold_ms = (period_ms as f64 * 0.8) as u64;
    let mut seq = Vec::new();

    for _ in 0..steps {
        seq.push(move_to(lean, BEND_LEAN_MS / 2));
        seq.push(move_to(lift, BEND_LEAN_MS / 2));
        seq.push(PoseStep::Pause(hold_ms));
        seq.push(PoseStep::Move { pose: Pose::REST, duration_ms: RECOVER_MS });
    }

    GaitPlan::Poses(seq)
}

/// Lean onto one foot, shake the other leg twice, then recover.
///
/// The period covers the lean as well as the shaking, so shaking takes `period - 1000` ms but
/// never less than 400 ms.
pub(super) fn shake_leg(steps: u32, period_ms: u32, side: Side) -> GaitPlan {
    let (lean, lift, shake) = match side {
        Side::Left => (
            [90, 90, 58, 35, 90, 90],
            [90, 90, 58, 120, 100, 80],
            [90, 90, 58, 60, 80, 100],
        ),
        Side::Right => (
            [90, 90, 145, 122, 90, 90],
            [90, 90, 60, 122, 100, 80],
            [90, 90, 120, 122, 80, 100],
        ),
    };

    let shake_ms = (period_ms as i64 - SHAKE_LEAN_MS as i64).max(SHAKE_MIN_MS) as u64;
    let mut seq = Vec::new();

    for _ in 0..steps {
        seq.push(move_to(lean, SHAKE_LEAN_MS / 2));
        seq.push(move_to(lift, SHAKE_LEAN_MS / 2));

        for _ in 0..SHAKES_PER_STEP {
            seq.push(move_to(shake, shake_ms / 4));
            seq.push(move_to(lift, shake_ms / 4));
        }

        seq.push(PoseStep::Move { pose: Pose::REST, duration_ms: RECOVER_MS });
    }

    seq.push(PoseStep::Pause(shake_ms));

    GaitPlan::Poses(seq)
}

#[cfg(test)]
mod test {
    use super::*;

    fn steps(plan: GaitPlan) -> Vec<PoseStep> {
        match plan {
            GaitPlan::Poses(s) => s,
            _ => panic!("Expected a pose plan"),
        }
    }

    fn total_ms(seq: &[PoseStep]) -> u64 {
        seq.iter()
            .map(|s| match s {
                PoseStep::Move { duration_ms, .. } => *duration_ms,
                PoseStep::Pause(ms) => *ms,
            })
            .sum()
    }

    #[test]
    fn test_jump_returns_to_rest() {
        let seq = steps(jump(2.0, 500));
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[3], PoseStep::Move { pose: Pose::REST, duration_ms: 500 });
        assert!(steps(jump(0.0, 500)).is_empty());
    }

    #[test]
    fn test_bend_timing() {
        let seq = steps(bend(1, 1000, Side::Right));
        assert_eq!(seq.len(), 4);
        assert_eq!(seq[2], PoseStep::Pause(800));
        assert_eq!(total_ms(&seq), 800 + 800 + 500);
    }

    #[test]
    fn test_shake_leg_short_period_clamped() {
        let seq = steps(shake_leg(1, 1200, Side::Left));
        // Two lean moves, four shakes, recover, final pause
        assert_eq!(seq.len(), 8);
        assert_eq!(seq[2], PoseStep::Move {
            pose: Pose::from_degrees([90, 90, 58, 60, 80, 100]),
            duration_ms: 100,
        });
        assert_eq!(*seq.last().unwrap(), PoseStep::Pause(400));
    }

    #[test]
    fn test_shake_leg_long_period() {
        let seq = steps(shake_leg(2, 2000, Side::Right));
        assert_eq!(seq.len(), 2 * 7 + 1);
        assert_eq!(*seq.last().unwrap(), PoseStep::Pause(1000));
        assert_eq!(total_ms(&seq), 2 * (1000 + 1000 + 500) + 1000);
    }
}
