//! # Biped controller library.
//!
//! Motion generation for a six-joint bipedal robot: an oscillator bank that
//! synthesises periodic gaits and a point-to-point interpolator for static
//! poses, plus the preset gaits and gestures built on top of them.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Actuator bank - owns the six joints, their trims and the hardware driver
pub mod actuator;

/// Monotonic millisecond clock abstraction used by every blocking operation
pub mod clock;

/// Named gait presets - converts semantic parameters into oscillator or pose plans
pub mod gait_lib;

/// Gestures - declarative sequences of poses, gaits, expressions and tones
pub mod gesture;

/// Motion control - gait engine, pose interpolator and rest state
pub mod motion_ctrl;

/// Sinusoidal joint oscillator
pub mod oscillator;

/// Joint-space poses
pub mod pose;

/// Simulated clock and drivers, used for dry runs and tests
pub mod sim;
