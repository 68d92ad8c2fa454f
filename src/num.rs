//! Numbers and numerics.

use nalgebra as na;
use std::fmt;

/// Gathers traits useful for working with generic floating point types.
///
/// The arithmetic and elementary functions come from [`na::RealField`]. The
/// classification methods and constants below fill in what it lacks.
pub trait Float: Copy + Default + fmt::Debug + fmt::Display + na::RealField + na::Scalar {
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const TWO: Self;
    const ONE_HALF: Self;
    const PI: Self;
    const FRAC_PI_2: Self;
    /// The difference between 1.0 and the next larger representable number.
    const EPSILON: Self;
    /// The smallest positive normal value.
    const MIN_POSITIVE: Self;

    fn is_nan(self) -> bool;

    fn is_infinite(self) -> bool;

    /// Whether the value is neither zero, infinite, subnormal nor NaN.
    fn is_normal(self) -> bool;

    /// Converts the value to `f64`. Never loses precision for `f32` and
    /// `f64`.
    fn to_f64_exact(self) -> f64;

    /// Converts the given `f64` to this type, rounding to the nearest
    /// representable value.
    fn from_f64_rounded(value: f64) -> Self;
}

macro_rules! impl_float {
    ($f:tt) => {
        impl Float for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
            const TWO: Self = 2.0;
            const ONE_HALF: Self = 0.5;
            const PI: Self = std::$f::consts::PI;
            const FRAC_PI_2: Self = std::$f::consts::FRAC_PI_2;
            const EPSILON: Self = $f::EPSILON;
            const MIN_POSITIVE: Self = $f::MIN_POSITIVE;

            #[inline]
            fn is_nan(self) -> bool {
                $f::is_nan(self)
            }

            #[inline]
            fn is_infinite(self) -> bool {
                $f::is_infinite(self)
            }

            #[inline]
            fn is_normal(self) -> bool {
                $f::is_normal(self)
            }

            #[inline]
            fn to_f64_exact(self) -> f64 {
                f64::from(self)
            }

            #[inline]
            #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
            fn from_f64_rounded(value: f64) -> Self {
                value as $f
            }
        }
    };
}

impl_float!(f32);
impl_float!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f32_survives_round_trip_through_f64() {
        for value in [1.0_f32, -3.5, f32::MIN_POSITIVE, f32::MAX, 1e-45] {
            assert_eq!(f32::from_f64_rounded(value.to_f64_exact()), value);
        }
    }

    #[test]
    fn narrowing_f64_rounds_to_nearest_f32() {
        assert_eq!(f32::from_f64_rounded(0.1), 0.1_f32);
        assert_eq!(f32::from_f64_rounded(1e300), f32::INFINITY);
    }

    #[test]
    fn constants_match_std() {
        assert_eq!(<f32 as Float>::EPSILON, f32::EPSILON);
        assert_eq!(<f64 as Float>::MIN_POSITIVE, f64::MIN_POSITIVE);
    }

    #[test]
    fn classification_matches_std() {
        fn classify<F: Float>(value: F) -> (bool, bool, bool) {
            (value.is_nan(), value.is_infinite(), value.is_normal())
        }
        assert_eq!(classify(f32::NAN), (true, false, false));
        assert_eq!(classify(f64::NEG_INFINITY), (false, true, false));
        assert_eq!(classify(f64::MIN_POSITIVE / 2.0), (false, false, false));
        assert_eq!(classify(1.5_f32), (false, false, true));
    }
}
