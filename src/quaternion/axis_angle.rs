//! Conversion between quaternions and axis-angle rotations.

use super::Quaternion;
use crate::{num::Float, vector::Vector3};

impl<F: Float> Quaternion<F> {
    /// Creates the unit quaternion rotating by `angle` radians about `axis`,
    /// which does not have to be normalized.
    #[inline]
    pub fn from_axis_angle(axis: &Vector3<F>, angle: F) -> Self {
        let mut quaternion = Self::identity();
        quaternion.set_axis_angle(axis, angle);
        quaternion
    }

    /// Sets the quaternion to the rotation by `angle` radians about `axis`,
    /// which does not have to be normalized.
    ///
    /// A zero axis defines no rotation, and the quaternion is set to the
    /// identity whatever the angle.
    pub fn set_axis_angle(&mut self, axis: &Vector3<F>, angle: F) {
        let axis = axis.normalized();
        if axis.is_zero() {
            *self = Self::identity();
            return;
        }
        let (sin_half_angle, cos_half_angle) = (angle * F::ONE_HALF).sin_cos();
        self.r = cos_half_angle;
        self.v = axis * sin_half_angle;
    }

    /// Returns the rotation angle in radians, in the range `[0, 2 pi]`.
    ///
    /// The angle is obtained as `2 atan2(|v|, r)`, which depends only on the
    /// ratio between the vector and real parts. It is therefore unaffected by
    /// the quaternion having drifted away from unit length, and stays accurate
    /// for angles down to the square root of the smallest normal value, where
    /// `2 acos(r)` would have lost all precision. Components too large for
    /// `|v|` to be represented are scaled down first.
    pub fn angle(&self) -> F {
        let v_norm = self.v.norm();
        if v_norm.is_finite() {
            return F::TWO * v_norm.atan2(self.r);
        }

        let max_component = self.max_abs_component();
        if max_component.is_finite() {
            F::TWO * (self.v / max_component).norm().atan2(self.r / max_component)
        } else {
            F::TWO * v_norm.atan2(self.r)
        }
    }

    /// Returns the unit rotation axis.
    ///
    /// If the vector part is exactly zero, the rotation has no defined axis
    /// and the x-axis is returned.
    pub fn axis(&self) -> Vector3<F> {
        if self.v.is_zero() {
            Vector3::unit_x()
        } else {
            self.v.normalized()
        }
    }

    /// Returns the rotation axis and angle, as given by [`Self::axis`] and
    /// [`Self::angle`].
    #[inline]
    pub fn axis_angle(&self) -> (Vector3<F>, F) {
        (self.axis(), self.angle())
    }

    /// Computes the logarithm of the rotation, the pure quaternion
    /// `(0, theta n)` where `n` is the unit axis and `theta` half the rotation
    /// angle.
    ///
    /// The length of the quaternion does not enter the result.
    pub fn log(&self) -> Self {
        let sin_theta = self.v.norm();
        if sin_theta == F::ZERO {
            return Self::from_imag(self.v);
        }
        let theta = sin_theta.atan2(self.r);
        Self::from_imag(self.v * (theta / sin_theta))
    }

    /// Computes the exponential `(cos |v|, sin |v| v / |v|)` of the vector
    /// part, inverting [`Self::log`] for unit quaternions. The real part is
    /// ignored.
    pub fn exp(&self) -> Self {
        let theta = self.v.norm();
        let (sin_theta, cos_theta) = theta.sin_cos();
        let scale = if theta == F::ZERO {
            F::ONE
        } else {
            sin_theta / theta
        };
        Self::from_parts(cos_theta, self.v * scale)
    }
}
