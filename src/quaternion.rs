//! Quaternions.

mod axis_angle;
mod rotation;

pub use rotation::{extract_quaternion, extract_quaternion_from_matrix3};

use crate::{
    num::Float,
    vector::{self, Vector3},
};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;

/// A quaternion `r + v.x i + v.y j + v.z k` with real part `r` and imaginary
/// (vector) part `v`.
///
/// A quaternion of unit length represents a rotation. Arithmetic freely
/// produces quaternions of other lengths, and nothing renormalizes them
/// implicitly; use [`Self::normalize`] or [`Self::normalized`] when needed.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion<F: Float> {
    pub r: F,
    pub v: Vector3<F>,
}

impl<F: Float> Quaternion<F> {
    /// Creates a quaternion with the given real part and imaginary
    /// components.
    #[inline]
    pub const fn new(r: F, x: F, y: F, z: F) -> Self {
        Self::from_parts(r, Vector3::new(x, y, z))
    }

    /// Creates a quaternion with the given real and imaginary parts.
    #[inline]
    pub const fn from_parts(r: F, v: Vector3<F>) -> Self {
        Self { r, v }
    }

    #[inline]
    pub const fn from_real(r: F) -> Self {
        Self::from_parts(r, Vector3::zeros())
    }

    #[inline]
    pub const fn from_imag(v: Vector3<F>) -> Self {
        Self::from_parts(F::ZERO, v)
    }

    /// The identity rotation `(1, 0, 0, 0)`.
    #[inline]
    pub const fn identity() -> Self {
        Self::from_real(F::ONE)
    }

    /// Computes the 4D dot product `r1 r2 + v1 . v2`.
    #[inline]
    pub fn dot(&self, other: &Self) -> F {
        self.r * other.r + self.v.dot(&other.v)
    }

    #[inline]
    pub fn length_squared(&self) -> F {
        self.dot(self)
    }

    /// Computes the length `sqrt(r^2 + |v|^2)`.
    ///
    /// Like [`Vector3::norm`], this rescales the components when the squared
    /// length falls outside the normal range.
    pub fn length(&self) -> F {
        let length_squared = self.length_squared();
        if vector::is_well_scaled(length_squared) || length_squared.is_nan() {
            return length_squared.sqrt();
        }

        let max_component = self.max_abs_component();
        if max_component == F::ZERO || max_component.is_infinite() {
            return max_component;
        }
        (self / max_component).length_squared().sqrt() * max_component
    }

    /// Returns the quaternion scaled to unit length. A zero quaternion gives
    /// the identity.
    ///
    /// Quaternions whose length is not representable are divided by their
    /// largest component first, so every finite non-zero quaternion gives a
    /// unit quaternion.
    pub fn normalized(&self) -> Self {
        let length_squared = self.length_squared();
        if vector::is_well_scaled(length_squared) {
            return self / length_squared.sqrt();
        }
        if length_squared.is_nan() {
            return self / length_squared;
        }

        let max_component = self.max_abs_component();
        if max_component == F::ZERO {
            return Self::identity();
        }
        if max_component.is_infinite() {
            return self / self.length();
        }
        let scaled = self / max_component;
        &scaled / scaled.length_squared().sqrt()
    }

    /// Scales the quaternion to unit length in place. A zero quaternion
    /// becomes the identity.
    #[inline]
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Returns the conjugate `(r, -v)`. For a unit quaternion this is the
    /// inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::from_parts(self.r, -self.v)
    }

    /// Returns the multiplicative inverse `conjugate / |q|^2`. The inverse of
    /// a zero quaternion is taken to be the identity.
    pub fn inverse(&self) -> Self {
        let conjugate = self.conjugate();
        let length_squared = self.length_squared();
        if length_squared.is_normal() {
            return conjugate / length_squared;
        }

        let max_component = self.max_abs_component();
        if max_component == F::ZERO {
            return Self::identity();
        }
        if max_component.is_infinite() || length_squared.is_nan() {
            return conjugate / length_squared;
        }
        // conjugate / |q|^2 = (conjugate / m) / |q / m|^2 / m
        let scaled = conjugate / max_component;
        scaled / scaled.length_squared() / max_component
    }

    /// Replaces the quaternion with its inverse.
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverse();
    }

    /// Converts the quaternion to another scalar type, rounding to the nearest
    /// representable value when narrowing.
    #[inline]
    pub fn cast<G: Float>(&self) -> Quaternion<G> {
        Quaternion::from_parts(G::from_f64_rounded(self.r.to_f64_exact()), self.v.cast())
    }

    /// The largest absolute value among the four components.
    fn max_abs_component(&self) -> F {
        self.r.abs().max(self.v.max_abs_component())
    }
}

impl<F: Float> Default for Quaternion<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl_binop!(Add, add, <F>, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::from_parts(a.r + b.r, a.v + b.v)
});

impl_binop!(Sub, sub, <F>, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::from_parts(a.r - b.r, a.v - b.v)
});

impl_binop!(Mul, mul, <F>, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::from_parts(
        a.r * b.r - a.v.dot(&b.v),
        b.v * a.r + a.v * b.r + a.v.cross(&b.v),
    )
});

impl_binop!(Div, div, <F>, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    a * b.inverse()
});

impl_binop!(Mul, mul, <F>, Quaternion<F>, F, Quaternion<F>, |a, b| {
    Quaternion::from_parts(a.r * *b, a.v * *b)
});

impl_binop!(Div, div, <F>, Quaternion<F>, F, Quaternion<F>, |a, b| {
    Quaternion::from_parts(a.r / *b, a.v / *b)
});

impl_binop!(Mul, mul, f32, Quaternion<f32>, Quaternion<f32>, |a, b| { b * a });
impl_binop!(Mul, mul, f64, Quaternion<f64>, Quaternion<f64>, |a, b| { b * a });

impl_binop_assign!(AddAssign, add_assign, <F>, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = *a + b;
});

impl_binop_assign!(SubAssign, sub_assign, <F>, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = *a - b;
});

impl_binop_assign!(MulAssign, mul_assign, <F>, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(DivAssign, div_assign, <F>, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = *a / b;
});

impl_binop_assign!(MulAssign, mul_assign, <F>, Quaternion<F>, F, |a, b| {
    *a = *a * b;
});

impl_binop_assign!(DivAssign, div_assign, <F>, Quaternion<F>, F, |a, b| {
    *a = *a / b;
});

impl_unary_op!(Neg, neg, <F>, Quaternion<F>, Quaternion<F>, |val| {
    Quaternion::from_parts(-val.r, -val.v)
});

impl_pod_for_scalar_type!(Quaternion);

impl_abs_diff_eq!(<F>, Quaternion<F>, |a, b, epsilon| {
    a.r.abs_diff_eq(&b.r, epsilon) && a.v.abs_diff_eq(&b.v, epsilon)
});

impl_relative_eq!(<F>, Quaternion<F>, |a, b, epsilon, max_relative| {
    a.r.relative_eq(&b.r, epsilon, max_relative) && a.v.relative_eq(&b.v, epsilon, max_relative)
});

impl<F: Float> fmt::Display for Quaternion<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {} {})", self.r, self.v.x(), self.v.y(), self.v.z())
    }
}

impl From<Quaternion<f32>> for Quaternion<f64> {
    fn from(quaternion: Quaternion<f32>) -> Self {
        quaternion.cast()
    }
}

impl From<Quaternion<f64>> for Quaternion<f32> {
    fn from(quaternion: Quaternion<f64>) -> Self {
        quaternion.cast()
    }
}

impl<F: Float> From<Quaternion<F>> for nalgebra::Quaternion<F> {
    fn from(quaternion: Quaternion<F>) -> Self {
        nalgebra::Quaternion::from_parts(quaternion.r, nalgebra::Vector3::from(quaternion.v))
    }
}

impl<F: Float> From<nalgebra::Quaternion<F>> for Quaternion<F> {
    fn from(quaternion: nalgebra::Quaternion<F>) -> Self {
        Self::from_parts(quaternion.scalar(), quaternion.imag().into())
    }
}

impl<F: Float> From<nalgebra::UnitQuaternion<F>> for Quaternion<F> {
    fn from(quaternion: nalgebra::UnitQuaternion<F>) -> Self {
        quaternion.into_inner().into()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::{abs_diff_eq, assert_abs_diff_eq};
    use proptest::prelude::*;

    /// Creates a quaternion of any precision from `f64` literals.
    fn quat<F: Float>(r: f64, x: f64, y: f64, z: f64) -> Quaternion<F> {
        Quaternion::new(
            F::from_f64_rounded(r),
            F::from_f64_rounded(x),
            F::from_f64_rounded(y),
            F::from_f64_rounded(z),
        )
    }

    fn vec3<F: Float>(x: f64, y: f64, z: f64) -> Vector3<F> {
        Vector3::new(
            F::from_f64_rounded(x),
            F::from_f64_rounded(y),
            F::from_f64_rounded(z),
        )
    }

    fn scalar<F: Float>(value: f64) -> F {
        F::from_f64_rounded(value)
    }

    macro_rules! test_both_precisions {
        ($($name:ident => $generic:ident),* $(,)?) => {
            $(
                mod $name {
                    #[test]
                    fn single_precision() {
                        super::$generic::<f32>();
                    }

                    #[test]
                    fn double_precision() {
                        super::$generic::<f64>();
                    }
                }
            )*
        };
    }

    test_both_precisions! {
        constructors_set_fields_directly => check_constructors,
        inverse_of_worked_example_is_exact => check_inverse,
        normalizing_pure_real_and_pure_imaginary_works => check_normalize,
        length_of_worked_example_is_exact => check_length,
        arithmetic_operators_match_worked_examples => check_arithmetic,
        compound_assignment_matches_binary_operators => check_compound_assignment,
    }

    fn check_constructors<F: Float>() {
        let q = Quaternion::<F>::default();
        assert!(q.r == F::ONE && q.v == Vector3::zeros());

        let q = quat::<F>(2.0, 3.0, 4.0, 5.0);
        assert!(q.r == scalar(2.0) && q.v == vec3(3.0, 4.0, 5.0));

        let q = Quaternion::from_parts(scalar::<F>(6.0), vec3(7.0, 8.0, 9.0));
        assert!(q.r == scalar(6.0) && q.v == vec3(7.0, 8.0, 9.0));

        let q1 = q;
        assert!(q1.r == scalar(6.0) && q1.v == vec3(7.0, 8.0, 9.0));

        assert_eq!(Quaternion::identity(), quat::<F>(1.0, 0.0, 0.0, 0.0));
        assert_eq!(Quaternion::from_real(scalar::<F>(3.0)), quat(3.0, 0.0, 0.0, 0.0));
        assert_eq!(
            Quaternion::from_imag(vec3::<F>(1.0, 2.0, 3.0)),
            quat(0.0, 1.0, 2.0, 3.0)
        );
    }

    fn check_inverse<F: Float>() {
        let mut q = quat::<F>(1.0, 0.0, 0.0, 1.0);
        assert_eq!(q.inverse(), quat(0.5, 0.0, 0.0, -0.5));

        q.invert();
        assert_eq!(q, quat(0.5, 0.0, 0.0, -0.5));
    }

    fn check_normalize<F: Float>() {
        let mut q = Quaternion::from_parts(scalar::<F>(2.0), Vector3::zeros());
        assert_eq!(q.normalized(), quat(1.0, 0.0, 0.0, 0.0));

        q.normalize();
        assert_eq!(q, quat(1.0, 0.0, 0.0, 0.0));

        let mut q = Quaternion::from_parts(F::ZERO, vec3(0.0, 2.0, 0.0));
        assert_eq!(q.normalized(), quat(0.0, 0.0, 1.0, 0.0));

        q.normalize();
        assert_eq!(q, quat(0.0, 0.0, 1.0, 0.0));
    }

    fn check_length<F: Float>() {
        assert_eq!(quat::<F>(3.0, 0.0, 4.0, 0.0).length(), scalar(5.0));
    }

    fn check_arithmetic<F: Float>() {
        assert_eq!(
            quat::<F>(1.0, 2.0, 3.0, 4.0) + quat(5.0, 6.0, 7.0, 8.0),
            quat(6.0, 8.0, 10.0, 12.0)
        );
        assert_eq!(
            quat::<F>(-1.0, -2.0, -3.0, -4.0) - quat(5.0, 6.0, 7.0, 8.0),
            quat(-6.0, -8.0, -10.0, -12.0)
        );
        assert_eq!(-quat::<F>(1.0, 2.0, 3.0, 4.0), quat(-1.0, -2.0, -3.0, -4.0));
        assert_eq!(
            quat::<F>(1.0, 2.0, 3.0, 4.0).conjugate(),
            quat(1.0, -2.0, -3.0, -4.0)
        );
        assert_eq!(
            quat::<F>(1.0, 2.0, 3.0, 4.0) * scalar::<F>(2.0),
            quat(2.0, 4.0, 6.0, 8.0)
        );
        assert_eq!(
            quat::<F>(1.0, 0.0, 0.0, 1.0) * quat(1.0, 1.0, 0.0, 0.0),
            quat(1.0, 1.0, 1.0, 1.0)
        );
        assert_eq!(
            quat::<F>(1.0, 1.0, 0.0, 0.0) * quat(1.0, 0.0, 0.0, 1.0),
            quat(1.0, 1.0, -1.0, 1.0)
        );
        assert_eq!(
            quat::<F>(1.0, 0.0, 0.0, 1.0) / quat(0.5, -0.5, 0.0, 0.0),
            quat(1.0, 1.0, 1.0, 1.0)
        );
        assert_eq!(
            quat::<F>(2.0, 4.0, 6.0, 8.0) / scalar::<F>(2.0),
            quat(1.0, 2.0, 3.0, 4.0)
        );
        assert_eq!(
            quat::<F>(1.0, 2.0, 3.0, 4.0).dot(&quat(2.0, 2.0, 2.0, 2.0)),
            scalar(20.0)
        );
    }

    fn check_compound_assignment<F: Float>() {
        let a = quat::<F>(1.0, 0.0, 0.0, 1.0);
        let b = quat::<F>(1.0, 1.0, 0.0, 0.0);

        let mut q = a;
        q *= b;
        assert_eq!(q, a * b);
        q /= b;
        assert_abs_diff_eq!(q, a, epsilon = scalar::<F>(4.0) * F::EPSILON);
        q += b;
        assert_abs_diff_eq!(q, a + b, epsilon = scalar::<F>(4.0) * F::EPSILON);
        q -= b;
        q *= scalar::<F>(4.0);
        q /= scalar::<F>(2.0);
        assert_abs_diff_eq!(q, a * scalar::<F>(2.0), epsilon = scalar::<F>(8.0) * F::EPSILON);
    }

    #[test]
    fn scalar_multiplication_commutes() {
        let q = Quaternion::new(1.0_f32, 2.0, 3.0, 4.0);
        assert_eq!(2.0 * q, q * 2.0);
        assert_eq!(2.0 * q, Quaternion::new(2.0, 4.0, 6.0, 8.0));

        let q = Quaternion::new(1.0_f64, 2.0, 3.0, 4.0);
        assert_eq!(2.0 * &q, &q * 2.0);
    }

    #[test]
    fn operations_with_different_reference_combinations_work() {
        let q1 = Quaternion::new(1.0_f64, 0.0, 0.0, 1.0);
        let q2 = Quaternion::new(1.0, 1.0, 0.0, 0.0);

        assert_eq!(&q1 * &q2, q1 * q2);
        assert_eq!(&q1 * q2, q1 * &q2);
        assert_eq!(&q1 + &q2, q1 + q2);
        assert_eq!(&q1 - q2, q1 - &q2);
        assert_eq!(&q1 / &q2, q1 / q2);
        assert_eq!(-&q1, -q1);
    }

    #[test]
    fn normalizing_zero_quaternion_gives_identity() {
        let zero = Quaternion::new(0.0_f64, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalized(), Quaternion::identity());

        let mut zero = Quaternion::new(0.0_f32, 0.0, 0.0, 0.0);
        zero.normalize();
        assert_eq!(zero, Quaternion::identity());
    }

    #[test]
    fn inverting_zero_quaternion_gives_identity() {
        let mut zero = Quaternion::new(0.0_f64, 0.0, 0.0, 0.0);
        zero.invert();
        assert_eq!(zero, Quaternion::identity());
    }

    #[test]
    fn normalizing_tiny_quaternion_gives_unit_quaternion() {
        let tiny = f32::MIN_POSITIVE * 1e-3;
        let q = Quaternion::new(0.0, 0.0, tiny, 0.0);
        assert_eq!(q.length(), tiny);
        assert_eq!(q.normalized(), Quaternion::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn inverting_tiny_quaternion_gives_finite_result() {
        let tiny = f64::MIN_POSITIVE.sqrt() * 1e-3;
        let q = Quaternion::new(tiny, tiny, 0.0, 0.0);
        let product = q * q.inverse();
        assert!(product.r.is_finite());
        assert_abs_diff_eq!(product, Quaternion::identity(), epsilon = 8.0 * f64::EPSILON);
    }

    #[test]
    fn length_of_huge_quaternion_is_finite() {
        let huge = f32::MAX / 2.0;
        let q = Quaternion::new(huge, huge, 0.0, 0.0);
        assert_abs_diff_eq!(q.length() / huge, 2.0_f32.sqrt(), epsilon = 4.0 * f32::EPSILON);
    }

    #[test]
    fn normalizing_quaternion_with_unrepresentable_length_gives_unit_quaternion() {
        let q = Quaternion::new(f32::MAX, f32::MAX, 0.0, 0.0);
        assert!(q.length().is_infinite());

        let half_sqrt_2 = std::f32::consts::FRAC_1_SQRT_2;
        let normalized = q.normalized();
        assert_abs_diff_eq!(
            normalized,
            Quaternion::new(half_sqrt_2, half_sqrt_2, 0.0, 0.0),
            epsilon = 4.0 * f32::EPSILON
        );
        assert_abs_diff_eq!(normalized.length(), 1.0, epsilon = 4.0 * f32::EPSILON);
    }

    #[test]
    fn inverting_huge_quaternion_gives_nonzero_result() {
        let q = Quaternion::new(f64::MAX, -f64::MAX, 0.0, 0.0);
        let inverse = q.inverse();
        assert!(inverse.r > 0.0 && inverse.r.is_finite());

        let half_sqrt_2 = std::f64::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(
            inverse.normalized(),
            Quaternion::new(half_sqrt_2, half_sqrt_2, 0.0, 0.0),
            epsilon = 4.0 * f64::EPSILON
        );
    }

    #[test]
    fn converting_single_to_double_precision_preserves_fields() {
        let q = Quaternion::from_parts(1.0_f32, Vector3::new(2.0, 3.0, 4.0));
        let q1 = Quaternion::<f64>::from(q);
        assert!(q1.r == 1.0 && q1.v == Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(Quaternion::<f32>::from(q1), q);
    }

    #[test]
    fn converting_double_to_single_precision_preserves_fields() {
        let q = Quaternion::from_parts(1.0_f64, Vector3::new(2.0, 3.0, 4.0));
        let q1: Quaternion<f32> = q.into();
        assert!(q1.r == 1.0 && q1.v == Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(q1.cast::<f64>(), q);
    }

    #[test]
    fn converting_to_and_from_nalgebra_preserves_components() {
        let q = Quaternion::new(1.0_f64, 2.0, 3.0, 4.0);
        let converted: nalgebra::Quaternion<f64> = q.into();
        assert_eq!(converted.w, 1.0);
        assert_eq!(converted.k, 4.0);
        assert_eq!(Quaternion::from(converted), q);
    }

    #[test]
    fn hamilton_product_matches_nalgebra() {
        let a = Quaternion::new(0.5_f64, -1.5, 2.0, 0.25);
        let b = Quaternion::new(-2.0, 0.75, 1.0, -3.0);
        let expected: Quaternion<f64> =
            (nalgebra::Quaternion::from(a) * nalgebra::Quaternion::from(b)).into();
        assert_abs_diff_eq!(a * b, expected, epsilon = 1e-14);
    }

    #[test]
    fn display_lists_real_part_first() {
        assert_eq!(
            Quaternion::new(1.0_f64, 2.0, -3.0, 0.5).to_string(),
            "(1 2 -3 0.5)"
        );
    }

    #[test]
    fn quaternion_can_be_viewed_as_bytes() {
        let q = Quaternion::new(1.0_f64, 2.0, 3.0, 4.0);
        assert_eq!(bytemuck::cast::<_, [f64; 4]>(q), [1.0, 2.0, 3.0, 4.0]);
    }

    prop_compose! {
        fn quaternion_strategy()(
            r in -1e2..1e2,
            x in -1e2..1e2,
            y in -1e2..1e2,
            z in -1e2..1e2,
        ) -> Quaternion<f64> {
            Quaternion::new(r, x, y, z)
        }
    }

    proptest! {
        #[test]
        fn conjugation_and_negation_are_involutions(q in quaternion_strategy()) {
            prop_assert_eq!(q.conjugate().conjugate(), q);
            prop_assert_eq!(-(-q), q);
        }
    }

    proptest! {
        #[test]
        fn product_with_inverse_is_identity(q in quaternion_strategy()) {
            prop_assume!(q.length() > 1e-3);
            prop_assert!(abs_diff_eq!(q * q.inverse(), Quaternion::identity(), epsilon = 1e-12));
            prop_assert!(abs_diff_eq!(q.inverse() * q, Quaternion::identity(), epsilon = 1e-12));
        }
    }

    proptest! {
        #[test]
        fn inverse_of_inverse_is_original(q in quaternion_strategy()) {
            prop_assume!(q.length() > 1e-3);
            prop_assert!(abs_diff_eq!(q.inverse().inverse(), q, epsilon = 1e-12 * q.length()));
        }
    }

    proptest! {
        #[test]
        fn scaling_then_dividing_gives_original(q in quaternion_strategy(), s in 1e-3_f64..1e3) {
            prop_assert!(abs_diff_eq!((s * q) / s, q, epsilon = 1e-12 * q.length()));
            prop_assert!(abs_diff_eq!((-s * q) / -s, q, epsilon = 1e-12 * q.length()));
        }
    }

    proptest! {
        #[test]
        fn normalized_quaternion_has_unit_length(q in quaternion_strategy()) {
            prop_assume!(q.length() > 1e-3);
            prop_assert!(abs_diff_eq!(q.normalized().length(), 1.0, epsilon = 4.0 * f64::EPSILON));
        }
    }

    proptest! {
        #[test]
        fn division_is_multiplication_by_inverse(a in quaternion_strategy(), b in quaternion_strategy()) {
            prop_assume!(b.length() > 1e-3);
            prop_assert_eq!(a / b, a * b.inverse());
            prop_assert!(abs_diff_eq!((a / b) * b, a, epsilon = 1e-10 * a.length().max(1.0)));
        }
    }

    #[test]
    fn multiplication_does_not_commute() {
        let a = Quaternion::new(1.0_f64, 0.0, 0.0, 1.0);
        let b = Quaternion::new(1.0, 1.0, 0.0, 0.0);
        assert_ne!(a * b, b * a);
    }
}
