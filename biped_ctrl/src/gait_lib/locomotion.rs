//! Travelling gaits: walking, turning and the sideways slides.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use super::{oscillate, Direction, GaitPlan, Side};

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Hip rolls lead or lag the hip yaws by a quarter period depending on direction.
pub(super) fn walk(steps: f64, period_ms: u32, dir: Direction) -> GaitPlan {
    let roll_phase = -90.0 * dir.sign();

    oscillate(
        [30.0, 30.0, 20.0, 20.0, 20.0, 20.0],
        [0.0, 0.0, 4.0, -4.0, 0.0, 0.0],
        [0.0, 0.0, roll_phase, roll_phase, 0.0, 0.0],
        period_ms,
        steps,
    )
}

/// Walking with one hip swinging further than the other.
pub(super) fn turn(steps: f64, period_ms: u32, side: Side) -> GaitPlan {
    let (yaw_l, yaw_r) = match side {
        Side::Left => (30.0, 10.0),
        Side::Right => (10.0, 30.0),
    };

    oscillate(
        [yaw_l, yaw_r, 20.0, 20.0, 15.0, 15.0],
        [0.0, 0.0, 4.0, -4.0, 0.0, 0.0],
        [0.0, 0.0, -90.0, -90.0, 0.0, 0.0],
        period_ms,
        steps,
    )
}

pub(super) fn moonwalker(steps: f64, period_ms: u32, height_deg: f64, side: Side) -> GaitPlan {
    let h = height_deg;
    let phi = -90.0 * side.sign();

    oscillate(
        [0.0, 0.0, h, h, h, h],
        [0.0, 0.0, h / 2.0 + 2.0, -h / 2.0 - 2.0, -h, h],
        [0.0, 0.0, phi, -60.0 * side.sign() + phi, phi, phi],
        period_ms,
        steps,
    )
}

/// Hips swing a quarter period ahead of the rolls while the rolls moonwalk.
pub(super) fn crusaito(steps: f64, period_ms: u32, height_deg: f64, side: Side) -> GaitPlan {
    let h = height_deg;

    oscillate(
        [25.0, 25.0, h, h, 0.0, 0.0],
        [0.0, 0.0, h / 2.0 + 4.0, -h / 2.0 - 4.0, 0.0, 0.0],
        [90.0, 90.0, 0.0, -60.0 * side.sign(), 0.0, 0.0],
        period_ms,
        steps,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn unwrap_gait(plan: GaitPlan) -> crate::motion_ctrl::GaitInvocation {
        match plan {
            GaitPlan::Oscillate(g) => g,
            _ => panic!("Expected an oscillating plan"),
        }
    }

    #[test]
    fn test_walk_direction_flips_roll_phase() {
        let fwd = unwrap_gait(walk(4.0, 1000, Direction::Forward));
        let back = unwrap_gait(walk(4.0, 1000, Direction::Backward));

        assert!((fwd.params[2].phase_rad + FRAC_PI_2).abs() < 1e-12);
        assert!((back.params[2].phase_rad - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(fwd.params[0], back.params[0]);
        assert_eq!(fwd.cycles, 4.0);
        assert_eq!(fwd.period_ms, 1000);
    }

    #[test]
    fn test_crusaito_hip_phase_is_quarter_turn() {
        let g = unwrap_gait(crusaito(1.0, 900, 25.0, Side::Left));
        assert!((g.params[0].phase_rad - FRAC_PI_2).abs() < 1e-12);
        assert!((g.params[3].phase_rad + 60f64.to_radians()).abs() < 1e-12);
        assert!((g.params[2].offset_deg - 16.5).abs() < 1e-12);
    }

    #[test]
    fn test_moonwalker_offsets() {
        let g = unwrap_gait(moonwalker(1.0, 900, 20.0, Side::Right));
        assert_eq!(g.params[4].offset_deg, -20.0);
        assert_eq!(g.params[5].offset_deg, 20.0);
        // phi = +90, roll R = 60 + 90
        assert!((g.params[3].phase_rad - 150f64.to_radians()).abs() < 1e-12);
    }
}
