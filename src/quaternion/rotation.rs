//! Rotations between directions and conversion to and from rotation
//! matrices.

use super::Quaternion;
use crate::{
    matrix::{Matrix3, Matrix4},
    num::Float,
    vector::Vector3,
};

impl<F: Float> Quaternion<F> {
    /// Creates the unit quaternion for the shortest-arc rotation taking the
    /// direction of `from` to the direction of `to`. See
    /// [`Self::set_rotation`].
    #[inline]
    pub fn from_rotation(from: &Vector3<F>, to: &Vector3<F>) -> Self {
        let mut quaternion = Self::identity();
        quaternion.set_rotation(from, to);
        quaternion
    }

    /// Sets the quaternion to the shortest-arc rotation taking the direction
    /// of `from` to the direction of `to`. Neither vector needs to be
    /// normalized.
    ///
    /// Rotations by more than 90 degrees are composed of two rotations via
    /// the halfway direction. For exactly opposite directions the rotation
    /// axis is arbitrary, and a rotation by 180 degrees about an axis
    /// perpendicular to `from` is chosen. If either vector is zero the
    /// quaternion is set to the identity.
    pub fn set_rotation(&mut self, from: &Vector3<F>, to: &Vector3<F>) {
        let from = from.normalized();
        let to = to.normalized();

        if from.is_zero() || to.is_zero() {
            *self = Self::identity();
        } else if from.dot(&to) >= F::ZERO {
            *self = Self::rotation_within_right_angle(&from, &to);
        } else {
            let halfway = (from + to).normalized();

            if halfway.is_zero() {
                *self = Self::half_turn_perpendicular_to(&from);
            } else {
                *self = Self::rotation_within_right_angle(&from, &halfway)
                    * Self::rotation_within_right_angle(&halfway, &to);
            }
        }
    }

    /// Rotation between unit vectors at most 90 degrees apart, built from the
    /// halfway vector `h` as `(from . h, from x h)`. This stays accurate for
    /// nearly parallel vectors, where the rotation angle is tiny.
    fn rotation_within_right_angle(from: &Vector3<F>, to: &Vector3<F>) -> Self {
        let halfway = (from + to).normalized();
        Self::from_parts(from.dot(&halfway), from.cross(&halfway))
    }

    /// Rotation by 180 degrees about an axis perpendicular to the given unit
    /// vector. The axis is taken perpendicular to the coordinate axis least
    /// aligned with the vector.
    fn half_turn_perpendicular_to(direction: &Vector3<F>) -> Self {
        let [x, y, z] = direction.component_mul(direction).to_array();

        let least_aligned_axis = if x <= y && x <= z {
            Vector3::unit_x()
        } else if y <= z {
            Vector3::unit_y()
        } else {
            Vector3::unit_z()
        };

        Self::from_imag(direction.cross(&least_aligned_axis).normalized())
    }

    /// Computes the rotation matrix corresponding to the quaternion, which is
    /// assumed to have unit length.
    pub fn to_matrix3(&self) -> Matrix3<F> {
        let Self { r, v } = *self;
        let [x, y, z] = v.to_array();
        let one = F::ONE;
        let two = F::TWO;

        Matrix3::from_columns([
            [
                one - two * (y * y + z * z),
                two * (x * y + z * r),
                two * (z * x - y * r),
            ],
            [
                two * (x * y - z * r),
                one - two * (z * z + x * x),
                two * (y * z + x * r),
            ],
            [
                two * (z * x + y * r),
                two * (y * z - x * r),
                one - two * (y * y + x * x),
            ],
        ])
    }

    /// Computes the 4x4 homogeneous rotation matrix corresponding to the
    /// quaternion, which is assumed to have unit length.
    #[inline]
    pub fn to_matrix4(&self) -> Matrix4<F> {
        Matrix4::from_upper_left(&self.to_matrix3())
    }

    /// Rotates the given vector by the rotation the quaternion represents,
    /// computed as the vector part of `q (0, v) q^-1`. The quaternion does
    /// not need to be normalized.
    pub fn rotate_vector(&self, vector: &Vector3<F>) -> Vector3<F> {
        (self * Self::from_imag(*vector) * self.inverse()).v
    }
}

/// Extracts the unit quaternion for the rotation in the upper-left 3x3 block
/// of the given matrix, which must not contain scaling or shear.
pub fn extract_quaternion<F: Float>(matrix: &Matrix4<F>) -> Quaternion<F> {
    quaternion_from_rotation_elements(|row, col| matrix.element(row, col))
}

/// Extracts the unit quaternion for the rotation represented by the given
/// matrix, which must not contain scaling or shear.
pub fn extract_quaternion_from_matrix3<F: Float>(matrix: &Matrix3<F>) -> Quaternion<F> {
    quaternion_from_rotation_elements(|row, col| matrix.element(row, col))
}

/// Trace-based extraction. When the trace is not positive, the largest
/// diagonal element selects which component is computed from the square root
/// so that the divisions stay well conditioned.
fn quaternion_from_rotation_elements<F: Float>(
    element: impl Fn(usize, usize) -> F,
) -> Quaternion<F> {
    const NEXT: [usize; 3] = [1, 2, 0];

    let trace = element(0, 0) + element(1, 1) + element(2, 2);

    if trace > F::ZERO {
        let s = (trace + F::ONE).sqrt();
        let r = s * F::ONE_HALF;
        let s = F::ONE_HALF / s;
        Quaternion::new(
            r,
            (element(2, 1) - element(1, 2)) * s,
            (element(0, 2) - element(2, 0)) * s,
            (element(1, 0) - element(0, 1)) * s,
        )
    } else {
        let mut i = 0;
        if element(1, 1) > element(0, 0) {
            i = 1;
        }
        if element(2, 2) > element(i, i) {
            i = 2;
        }
        let j = NEXT[i];
        let k = NEXT[j];

        let mut s = ((element(i, i) - (element(j, j) + element(k, k))) + F::ONE).sqrt();

        let mut v = [F::ZERO; 3];
        v[i] = s * F::ONE_HALF;
        if s != F::ZERO {
            s = F::ONE_HALF / s;
        }
        v[j] = (element(j, i) + element(i, j)) * s;
        v[k] = (element(k, i) + element(i, k)) * s;
        let r = (element(k, j) - element(j, k)) * s;

        Quaternion::from_parts(r, Vector3::from_array(v))
    }
}
