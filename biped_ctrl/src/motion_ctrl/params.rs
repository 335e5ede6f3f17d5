//! Parameters structure for MotionCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use thiserror::Error;

use crate::actuator::{MAX_ANGLE_DEG, MIN_ANGLE_DEG};
use crate::pose::REST_ANGLE_DEG;
use util::params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Motion control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- TIMING ----

    /// Control tick used by both the pose interpolator and the gait engine.
    /// Moves no longer than one tick are commanded in a single step.
    ///
    /// Units: milliseconds
    pub tick_ms: u64,

    /// Duration of the move back to the rest pose when homing.
    ///
    /// Units: milliseconds
    pub home_duration_ms: u64,

    // ---- SAFETY ----

    /// Largest deviation from the rest angle, including trim, which an oscillator may reach.
    ///
    /// Units: degrees
    pub max_excursion_deg: f64,
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("The control tick must be at least 1 ms")]
    ZeroTick,

    #[error("Maximum excursion of {0} deg leaves the servo travel")]
    ExcursionTooLarge(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            tick_ms: 10,
            home_duration_ms: 500,
            max_excursion_deg: REST_ANGLE_DEG - MIN_ANGLE_DEG,
        }
    }
}

impl Params {

    /// Load the parameters from the given file in the params directory.
    pub fn load(file: &str) -> Result<Self, params::LoadError> {
        params::load(file)
    }

    /// Determines if the parameters are valid.
    pub fn are_valid(&self) -> Result<(), ParamsError> {
        if self.tick_ms == 0 {
            return Err(ParamsError::ZeroTick)
        }

        let travel = (MAX_ANGLE_DEG - REST_ANGLE_DEG).min(REST_ANGLE_DEG - MIN_ANGLE_DEG);
        if !(0.0..=travel).contains(&self.max_excursion_deg) {
            return Err(ParamsError::ExcursionTooLarge(self.max_excursion_deg))
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let p = Params::default();
        assert_eq!(p.tick_ms, 10);
        assert_eq!(p.home_duration_ms, 500);
        assert!(p.are_valid().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let p: Params = params::from_str("home_duration_ms = 800").unwrap();
        assert_eq!(p.home_duration_ms, 800);
        assert_eq!(p.tick_ms, 10);
    }

    #[test]
    fn test_invalid() {
        let mut p = Params::default();
        p.tick_ms = 0;
        assert!(matches!(p.are_valid(), Err(ParamsError::ZeroTick)));

        let mut p = Params::default();
        p.max_excursion_deg = 120.0;
        assert!(matches!(p.are_valid(), Err(ParamsError::ExcursionTooLarge(_))));
    }
}
