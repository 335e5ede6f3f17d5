//! Gaits which move the body in place.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::{oscillate, Direction, GaitPlan};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Largest jitter height, beyond which the hips collide.
pub const JITTER_MAX_HEIGHT_DEG: f64 = 25.0;

/// Largest ascending turn height.
pub const ASCENDING_TURN_MAX_HEIGHT_DEG: f64 = 13.0;

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

pub(super) fn updown(steps: f64, period_ms: u32, height_deg: f64) -> GaitPlan {
    let h = height_deg;

    oscillate(
        [0.0, 0.0, h, h, h, h],
        [0.0, 0.0, h, -h, h, -h],
        [0.0, 0.0, -90.0, 90.0, -90.0, 90.0],
        period_ms,
        steps,
    )
}

pub(super) fn swing(steps: f64, period_ms: u32, height_deg: f64) -> GaitPlan {
    let h = height_deg;

    oscillate(
        [0.0, 0.0, h, h, h, h],
        [0.0, 0.0, h / 2.0, -h / 2.0, h, -h],
        [0.0; 6],
        period_ms,
        steps,
    )
}

pub(super) fn tiptoe_swing(steps: f64, period_ms: u32, height_deg: f64) -> GaitPlan {
    let h = height_deg;

    oscillate(
        [0.0, 0.0, h, h, h, h],
        [0.0, 0.0, h, -h, h, -h],
        [0.0; 6],
        period_ms,
        steps,
    )
}

pub(super) fn jitter(steps: f64, period_ms: u32, height_deg: f64) -> GaitPlan {
    let h = height_deg.min(JITTER_MAX_HEIGHT_DEG);

    oscillate(
        [h, h, 0.0, 0.0, 0.0, 0.0],
        [0.0; 6],
        [-90.0, 90.0, 0.0, 0.0, 0.0, 0.0],
        period_ms,
        steps,
    )
}

pub(super) fn ascending_turn(steps: f64, period_ms: u32, height_deg: f64) -> GaitPlan {
    let h = height_deg.min(ASCENDING_TURN_MAX_HEIGHT_DEG);

    oscillate(
        [h, h, h, h, 40.0, 40.0],
        [0.0, 0.0, h + 4.0, -h + 4.0, 0.0, 0.0],
        [-90.0, 90.0, -90.0, 90.0, 0.0, 0.0],
        period_ms,
        steps,
    )
}

/// Hips in anti-phase, rolls a quarter period either side depending on direction.
pub(super) fn flapping(steps: f64, period_ms: u32, height_deg: f64, dir: Direction) -> GaitPlan {
    let h = height_deg;

    oscillate(
        [12.0, 12.0, h, h, 0.0, 0.0],
        [0.0, 0.0, h - 10.0, -h + 10.0, 0.0, 0.0],
        [0.0, 180.0, -90.0 * dir.sign(), 90.0 * dir.sign(), 0.0, 0.0],
        period_ms,
        steps,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn amplitudes(plan: GaitPlan) -> Vec<f64> {
        match plan {
            GaitPlan::Oscillate(g) => g.params.iter().map(|p| p.amplitude_deg).collect(),
            _ => panic!("Expected an oscillating plan"),
        }
    }

    #[test]
    fn test_jitter_height_clamped() {
        assert_eq!(amplitudes(jitter(1.0, 500, 40.0))[0], 25.0);
        assert_eq!(amplitudes(jitter(1.0, 500, 10.0))[1], 10.0);
    }

    #[test]
    fn test_ascending_turn_height_clamped() {
        let amps = amplitudes(ascending_turn(1.0, 500, 30.0));
        assert_eq!(amps, vec![13.0, 13.0, 13.0, 13.0, 40.0, 40.0]);
    }

    #[test]
    fn test_updown_symmetric() {
        match updown(2.0, 1000, 20.0) {
            GaitPlan::Oscillate(g) => {
                assert_eq!(g.params[2].offset_deg, -g.params[3].offset_deg);
                assert_eq!(g.params[4].offset_deg, -g.params[5].offset_deg);
                assert_eq!(g.params[0].amplitude_deg, 0.0);
            }
            _ => panic!("Expected an oscillating plan"),
        }
    }
}
