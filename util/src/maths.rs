//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Map a value from one range into another.
pub fn lin_map<T>(source_range: (T, T), target_range: (T, T), value: T) -> T
where
    T: Float
{
    target_range.0
        + ((value - source_range.0)
        * (target_range.1 - target_range.0)
        / (source_range.1 - source_range.0))
}

/// Limit a value to the inclusive range `[min, max]`.
pub fn clamp<T>(value: T, min: T, max: T) -> T
where
    T: Float
{
    value.max(min).min(max)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lin_map() {
        // Servo angle into a 1-2 ms pulse
        assert_eq!(lin_map((0f64, 180f64), (1f64, 2f64), 90f64), 1.5);
        assert_eq!(lin_map((0f64, 180f64), (1f64, 2f64), 0f64), 1.0);

        // Reversed target range
        assert_eq!(lin_map((-1f64, 1f64), (1f64, -1f64), 0.5f64), -0.5);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(190f64, 0.0, 180.0), 180.0);
        assert_eq!(clamp(-3f64, 0.0, 180.0), 0.0);
        assert_eq!(clamp(45f64, 0.0, 180.0), 45.0);
    }
}
