//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value between a minimum and a maximum.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Clamp a value into `[-limit, limit]`.
///
/// Non-finite values which cannot be clamped (NaN) are mapped to zero, so the result is always
/// safe to send to an actuator.
pub fn saturate<T>(value: T, limit: T) -> T
where
    T: Float
{
    if value.is_nan() {
        return T::zero()
    }

    let limit = limit.abs();
    clamp(&value, &-limit, &limit)
}

/// Zero any value whose magnitude is below the given band.
pub fn deadband<T>(value: T, band: T) -> T
where
    T: Float
{
    if value.abs() < band {
        T::zero()
    }
    else {
        value
    }
}

/// Get the signed angular distance from `from` to `to` in degrees.
///
/// The result is the shortest rotation accounting for wrapping, in the range (-180, 180].
pub fn get_ang_dist_deg<T>(from: T, to: T) -> T
where
    T: Float
{
    let half_turn: T = T::from(180.0).unwrap();
    let full_turn: T = T::from(360.0).unwrap();

    let d = rem_euclid(to - from + half_turn, full_turn) - half_turn;

    if d <= -half_turn {
        d + full_turn
    }
    else {
        d
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()`, violating the mathematical definition, if
/// `self` is much smaller than `rhs.abs()` in magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_ang_dist_deg() {
        assert_eq!(get_ang_dist_deg(10f64, 20f64), 10f64);
        assert_eq!(get_ang_dist_deg(20f64, 10f64), -10f64);
        assert_eq!(get_ang_dist_deg(350f64, 10f64), 20f64);
        assert_eq!(get_ang_dist_deg(10f64, 350f64), -20f64);
        assert_eq!(get_ang_dist_deg(0f64, 180f64), 180f64);
        assert_eq!(get_ang_dist_deg(180f64, 0f64), 180f64);
        assert_eq!(get_ang_dist_deg(720f64, 90f64), 90f64);
        assert_eq!(get_ang_dist_deg(-90f64, 90f64), 180f64);
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(0.5f64, 1.0), 0.5);
        assert_eq!(saturate(1.5f64, 1.0), 1.0);
        assert_eq!(saturate(-3.0f64, 1.0), -1.0);
        assert_eq!(saturate(f64::NAN, 1.0), 0.0);
        assert_eq!(saturate(f64::INFINITY, 0.5), 0.5);
        assert_eq!(saturate(0.7f64, -0.5), 0.5);
    }

    #[test]
    fn test_deadband() {
        assert_eq!(deadband(0.05f64, 0.1), 0.0);
        assert_eq!(deadband(-0.05f64, 0.1), 0.0);
        assert_eq!(deadband(0.2f64, 0.1), 0.2);
    }
}
