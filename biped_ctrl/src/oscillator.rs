//! # Joint oscillator
//!
//! A sinusoidal angle generator. Six of these sharing a period, differing only in amplitude,
//! offset and phase, are enough to reproduce every periodic gait of the robot.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Shape of one joint's oscillation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct OscillatorParams {
    /// Peak deviation from the offset.
    ///
    /// Units: degrees
    pub amplitude_deg: f64,

    /// Centre of the oscillation, relative to the rest angle.
    ///
    /// Units: degrees
    pub offset_deg: f64,

    /// Phase at the start of the invocation.
    ///
    /// Units: radians
    pub phase_rad: f64,
}

/// A restartable oscillator.
///
/// Stateless apart from its configuration and the time `t0` at which the current invocation
/// started.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    params: OscillatorParams,

    period_ms: f64,

    t0_ms: u64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl OscillatorParams {
    pub const fn new(amplitude_deg: f64, offset_deg: f64, phase_rad: f64) -> Self {
        Self {
            amplitude_deg,
            offset_deg,
            phase_rad,
        }
    }

    /// Largest deviation from the rest angle this oscillation can reach.
    pub fn max_excursion_deg(&self) -> f64 {
        self.amplitude_deg.abs() + self.offset_deg.abs()
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            params: OscillatorParams::default(),
            period_ms: 1000.0,
            t0_ms: 0,
        }
    }
}

impl Oscillator {
    /// Set the shape and period. Takes effect on the next sample.
    pub fn configure(&mut self, params: OscillatorParams, period_ms: f64) {
        self.params = params;
        self.period_ms = period_ms;
    }

    /// Start a fresh invocation at `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.t0_ms = now_ms;
    }

    /// Angle of the oscillation at `now_ms`, relative to the rest angle.
    ///
    /// Units: degrees
    pub fn sample(&self, now_ms: u64) -> f64 {
        let elapsed_ms = now_ms as f64 - self.t0_ms as f64;
        let phase = TAU * elapsed_ms / self.period_ms + self.params.phase_rad;

        self.params.amplitude_deg * phase.sin() + self.params.offset_deg
    }

    pub fn params(&self) -> &OscillatorParams {
        &self.params
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_sample_is_periodic() {
        let shapes = [
            (30.0, 0.0, 0.0, 1000.0),
            (20.0, 4.0, -FRAC_PI_2, 800.0),
            (13.0, -9.0, 1.234, 333.0),
            (0.0, 12.0, 3.0, 50.0),
        ];

        for (a, o, ph, t) in shapes.iter() {
            let mut osc = Oscillator::default();
            osc.configure(OscillatorParams::new(*a, *o, *ph), *t);
            osc.start(1_000);

            for now in (1_000u64..5_000).step_by(37) {
                let later = now as f64 + *t;
                // Only integral periods can be sampled on the millisecond grid
                if later.fract() == 0.0 {
                    let diff = osc.sample(now) - osc.sample(later as u64);
                    assert!(diff.abs() < TOL, "not periodic at {} ({})", now, diff);
                }
            }
        }
    }

    #[test]
    fn test_sample_shape() {
        let mut osc = Oscillator::default();
        osc.configure(OscillatorParams::new(30.0, 4.0, 0.0), 1000.0);
        osc.start(200);

        // Quarter period in: peak
        assert!((osc.sample(450) - 34.0).abs() < TOL);
        // Half period in: back to offset
        assert!((osc.sample(700) - 4.0).abs() < TOL);
        // Three quarters: trough
        assert!((osc.sample(950) + 26.0).abs() < TOL);
    }

    #[test]
    fn test_restart_resets_t0() {
        let mut osc = Oscillator::default();
        osc.configure(OscillatorParams::new(10.0, 0.0, FRAC_PI_2), 400.0);
        osc.start(0);
        let first = osc.sample(0);

        osc.start(123);
        assert!((osc.sample(123) - first).abs() < TOL);
        assert!((first - 10.0).abs() < TOL);
    }
}
