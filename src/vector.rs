//! Vectors.

use crate::num::Float;
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;

/// A 3-dimensional vector.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector3<F: Float> {
    inner: nalgebra::Vector3<F>,
}

impl<F: Float> Vector3<F> {
    /// Creates a new vector with the given components.
    #[inline]
    pub const fn new(x: F, y: F, z: F) -> Self {
        Self::wrap(nalgebra::Vector3::from_array_storage(
            nalgebra::ArrayStorage([[x, y, z]]),
        ))
    }

    /// Creates a new vector with all zeros.
    #[inline]
    pub const fn zeros() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO)
    }

    /// Creates a new vector with the same value for all components.
    #[inline]
    pub fn same(value: F) -> Self {
        Self::new(value, value, value)
    }

    #[inline]
    pub const fn unit_x() -> Self {
        Self::new(F::ONE, F::ZERO, F::ZERO)
    }

    #[inline]
    pub const fn unit_y() -> Self {
        Self::new(F::ZERO, F::ONE, F::ZERO)
    }

    #[inline]
    pub const fn unit_z() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ONE)
    }

    /// Creates a vector from the given array of components.
    #[inline]
    pub fn from_array(components: [F; 3]) -> Self {
        Self::wrap(components.into())
    }

    /// Returns the components of the vector as an array.
    #[inline]
    pub fn to_array(&self) -> [F; 3] {
        self.inner.into()
    }

    #[inline]
    pub fn x(&self) -> F {
        self.inner.x
    }

    #[inline]
    pub fn y(&self) -> F {
        self.inner.y
    }

    #[inline]
    pub fn z(&self) -> F {
        self.inner.z
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> F {
        self.inner.dot(&other.inner)
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self::wrap(self.inner.cross(&other.inner))
    }

    #[inline]
    pub fn norm_squared(&self) -> F {
        self.inner.norm_squared()
    }

    /// Computes the Euclidean length of the vector.
    ///
    /// When the squared length would underflow below the normal range or
    /// overflow to infinity, the components are first divided by the largest
    /// absolute component, so the result stays accurate over the whole
    /// exponent range, subnormal components included. The result is only
    /// infinite if the length itself exceeds the largest finite value.
    pub fn norm(&self) -> F {
        let norm_squared = self.norm_squared();
        if is_well_scaled(norm_squared) || norm_squared.is_nan() {
            return norm_squared.sqrt();
        }
        match self.scaled_to_max_component() {
            Some((scaled, max_component)) => scaled.norm_squared().sqrt() * max_component,
            None => self.max_abs_component(),
        }
    }

    /// Returns the vector scaled to unit length. The zero vector is returned
    /// unchanged.
    ///
    /// Vectors whose length is not representable, tiny or huge, are rescaled
    /// before normalization, so every finite non-zero vector gives a unit
    /// vector.
    pub fn normalized(&self) -> Self {
        let norm_squared = self.norm_squared();
        if is_well_scaled(norm_squared) {
            return self / norm_squared.sqrt();
        }
        if self.is_zero() {
            return *self;
        }
        match self.scaled_to_max_component() {
            Some((scaled, _)) => &scaled / scaled.norm_squared().sqrt(),
            None => self / self.norm(),
        }
    }

    /// Divides the vector by its largest absolute component, returning the
    /// scaled vector and the component. Gives [`None`] if the component is
    /// zero or not finite.
    fn scaled_to_max_component(&self) -> Option<(Self, F)> {
        let max_component = self.max_abs_component();
        (max_component != F::ZERO && max_component.is_finite())
            .then(|| (self / max_component, max_component))
    }

    /// Whether all components are exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.inner.iter().all(|&component| component == F::ZERO)
    }

    #[inline]
    pub fn component_mul(&self, other: &Self) -> Self {
        Self::wrap(self.inner.component_mul(&other.inner))
    }

    #[inline]
    pub fn max_abs_component(&self) -> F {
        self.inner.amax()
    }

    /// Converts the vector to another scalar type.
    #[inline]
    pub fn cast<G: Float>(&self) -> Vector3<G> {
        Vector3::wrap(
            self.inner
                .map(|component| G::from_f64_rounded(component.to_f64_exact())),
        )
    }

    #[inline]
    pub(crate) const fn wrap(inner: nalgebra::Vector3<F>) -> Self {
        Self { inner }
    }

    #[inline]
    pub(crate) const fn _inner(&self) -> &nalgebra::Vector3<F> {
        &self.inner
    }
}

/// Whether a squared length lies where taking the square root directly is
/// accurate, which excludes the subnormal range and infinity.
#[inline]
pub(crate) fn is_well_scaled<F: Float>(length_squared: F) -> bool {
    length_squared >= F::TWO * F::MIN_POSITIVE && length_squared.is_finite()
}

impl_binop!(Add, add, <F>, Vector3<F>, Vector3<F>, Vector3<F>, |a, b| {
    Vector3::wrap(a.inner + b.inner)
});

impl_binop!(Sub, sub, <F>, Vector3<F>, Vector3<F>, Vector3<F>, |a, b| {
    Vector3::wrap(a.inner - b.inner)
});

impl_binop!(Mul, mul, <F>, Vector3<F>, F, Vector3<F>, |a, b| {
    Vector3::wrap(a.inner * *b)
});

impl_binop!(Div, div, <F>, Vector3<F>, F, Vector3<F>, |a, b| {
    Vector3::wrap(a.inner / *b)
});

impl_binop!(Mul, mul, f32, Vector3<f32>, Vector3<f32>, |a, b| { b * a });
impl_binop!(Mul, mul, f64, Vector3<f64>, Vector3<f64>, |a, b| { b * a });

impl_binop_assign!(AddAssign, add_assign, <F>, Vector3<F>, Vector3<F>, |a, b| {
    a.inner += b.inner;
});

impl_binop_assign!(SubAssign, sub_assign, <F>, Vector3<F>, Vector3<F>, |a, b| {
    a.inner -= b.inner;
});

impl_binop_assign!(MulAssign, mul_assign, <F>, Vector3<F>, F, |a, b| {
    a.inner *= *b;
});

impl_binop_assign!(DivAssign, div_assign, <F>, Vector3<F>, F, |a, b| {
    a.inner /= *b;
});

impl_unary_op!(Neg, neg, <F>, Vector3<F>, Vector3<F>, |val| {
    Vector3::wrap(-val.inner)
});

impl_pod_for_scalar_type!(Vector3);

impl_abs_diff_eq!(<F>, Vector3<F>, |a, b, epsilon| {
    a.inner.abs_diff_eq(&b.inner, epsilon)
});

impl_relative_eq!(<F>, Vector3<F>, |a, b, epsilon, max_relative| {
    a.inner.relative_eq(&b.inner, epsilon, max_relative)
});

impl<F: Float> Default for Vector3<F> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<F: Float> fmt::Display for Vector3<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.x(), self.y(), self.z())
    }
}

impl From<Vector3<f32>> for Vector3<f64> {
    fn from(vector: Vector3<f32>) -> Self {
        vector.cast()
    }
}

impl From<Vector3<f64>> for Vector3<f32> {
    fn from(vector: Vector3<f64>) -> Self {
        vector.cast()
    }
}

impl<F: Float> From<Vector3<F>> for nalgebra::Vector3<F> {
    fn from(vector: Vector3<F>) -> Self {
        vector.inner
    }
}

impl<F: Float> From<nalgebra::Vector3<F>> for Vector3<F> {
    fn from(vector: nalgebra::Vector3<F>) -> Self {
        Self::wrap(vector)
    }
}
