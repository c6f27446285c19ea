//! Type definitions of Float and Spectrum, otherwise constants and
//! functions which can be used almost everywhere else in the code.

// std
use std::f32::consts::PI;
use std::ops::{Add, Mul, Sub};
// others
use num;
// crate
use crate::core::spectrum::RGBSpectrum;

pub type Spectrum = RGBSpectrum;

pub type Float = f32;

/// Minimum accepted hit distance along a ray.
pub const RAY_EPSILON: Float = 1.0e-4;
/// Fraction of a shadow segment trimmed at the light end.
pub const SHADOW_EPSILON: Float = 1.0e-4;
pub const INV_PI: Float = 0.318_309_886_183_790_671_54;
pub const INV_4_PI: Float = 0.079_577_471_545_947_667_88;
pub const PI_OVER_2: Float = 1.570_796_326_794_896_619_23;
pub const PI_OVER_4: Float = 0.785_398_163_397_448_309_61;

/// Convert a linear value into sRGB space.
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.003_130_8 {
        12.92 * value
    } else {
        1.055 as Float * value.powf((1.0 / 2.4) as Float) - 0.055
    }
}

/// Clamp the given value *val* to lie between the values *low* and *high*.
pub fn clamp_t<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Convert from angles expressed in degrees to radians.
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

/// Interpolate linearly between two provided values.
pub fn lerp<S, T>(t: S, a: T, b: T) -> T
where
    S: num::One,
    S: Sub<S, Output = S>,
    S: Copy,
    T: Add<T, Output = T>,
    T: Mul<S, Output = T>,
{
    let one: S = num::One::one();
    a * (one - t) + b * t
}

/// Find solution(s) of the quadratic equation at<sup>2</sup> + bt +
/// c = 0, returned in ascending order.
pub fn quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    // find quadratic discriminant
    let discrim: f64 = (b as f64) * (b as f64) - 4.0 * (a as f64) * (c as f64);
    if discrim < 0.0 || a == 0.0 as Float {
        return None;
    }
    let root_discrim: f64 = discrim.sqrt();
    // compute quadratic _t_ values
    let q: f64 = if b < 0.0 {
        -0.5 * (b as f64 - root_discrim)
    } else {
        -0.5 * (b as f64 + root_discrim)
    };
    let mut t0: Float = (q / a as f64) as Float;
    let mut t1: Float = if q != 0.0 {
        (c as f64 / q) as Float
    } else {
        t0
    };
    if t0 > t1 {
        std::mem::swap(&mut t0, &mut t1);
    }
    Some((t0, t1))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quadratic_roots_are_sorted() {
        // (t - 1)(t - 4) = t^2 - 5t + 4
        let (t0, t1) = quadratic(1.0, -5.0, 4.0).unwrap();
        assert!((t0 - 1.0).abs() < 1e-6);
        assert!((t1 - 4.0).abs() < 1e-6);
        assert!(quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn gamma_correct_end_points() {
        assert_eq!(gamma_correct(0.0), 0.0);
        assert!((gamma_correct(1.0) - 1.0).abs() < 1e-6);
    }
}
