//! Matrices.
//!
//! Matrices act on column vectors (`v' = M v`) and are stored in column-major
//! order.

use crate::{num::Float, quaternion::Quaternion, vector::Vector3};
use approx::{AbsDiffEq, RelativeEq};
use std::fmt;

/// A 3x3 matrix.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3<F: Float> {
    inner: nalgebra::Matrix3<F>,
}

/// A 4x4 matrix.
#[repr(transparent)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4<F: Float> {
    inner: nalgebra::Matrix4<F>,
}

impl<F: Float> Matrix3<F> {
    /// Creates a matrix from the given columns.
    #[inline]
    pub const fn from_columns(columns: [[F; 3]; 3]) -> Self {
        Self::wrap(nalgebra::Matrix3::from_array_storage(
            nalgebra::ArrayStorage(columns),
        ))
    }

    /// Creates a matrix whose element at each (row, column) is given by the
    /// closure.
    #[inline]
    pub fn from_fn(element: impl FnMut(usize, usize) -> F) -> Self {
        Self::wrap(nalgebra::Matrix3::from_fn(element))
    }

    #[inline]
    pub fn identity() -> Self {
        Self::wrap(nalgebra::Matrix3::identity())
    }

    /// Returns the element at the given row and column.
    ///
    /// # Panics
    /// If the row or column is out of bounds.
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> F {
        self.inner[(row, col)]
    }

    /// Returns the given column as a vector.
    ///
    /// # Panics
    /// If the column is out of bounds.
    #[inline]
    pub fn column(&self, col: usize) -> Vector3<F> {
        Vector3::wrap(self.inner.column(col).into_owned())
    }

    #[inline]
    pub fn transposed(&self) -> Self {
        Self::wrap(self.inner.transpose())
    }

    #[inline]
    pub fn trace(&self) -> F {
        self.inner.trace()
    }

    #[inline]
    pub(crate) const fn wrap(inner: nalgebra::Matrix3<F>) -> Self {
        Self { inner }
    }
}

impl<F: Float> Matrix4<F> {
    /// Creates a matrix from the given columns.
    #[inline]
    pub const fn from_columns(columns: [[F; 4]; 4]) -> Self {
        Self::wrap(nalgebra::Matrix4::from_array_storage(
            nalgebra::ArrayStorage(columns),
        ))
    }

    /// Creates a matrix whose element at each (row, column) is given by the
    /// closure.
    #[inline]
    pub fn from_fn(element: impl FnMut(usize, usize) -> F) -> Self {
        Self::wrap(nalgebra::Matrix4::from_fn(element))
    }

    #[inline]
    pub fn identity() -> Self {
        Self::wrap(nalgebra::Matrix4::identity())
    }

    /// Embeds the given 3x3 matrix in the upper-left block of a 4x4 identity
    /// matrix.
    #[inline]
    pub fn from_upper_left(matrix: &Matrix3<F>) -> Self {
        Self::wrap(matrix.inner.to_homogeneous())
    }

    /// Returns the upper-left 3x3 block of the matrix.
    #[inline]
    pub fn upper_left(&self) -> Matrix3<F> {
        Matrix3::wrap(self.inner.fixed_view::<3, 3>(0, 0).into_owned())
    }

    /// Returns the element at the given row and column.
    ///
    /// # Panics
    /// If the row or column is out of bounds.
    #[inline]
    pub fn element(&self, row: usize, col: usize) -> F {
        self.inner[(row, col)]
    }

    #[inline]
    pub fn transposed(&self) -> Self {
        Self::wrap(self.inner.transpose())
    }

    /// Applies the matrix to the given vector treated as a direction, so the
    /// translation column is ignored.
    #[inline]
    pub fn transform_vector(&self, vector: &Vector3<F>) -> Vector3<F> {
        Vector3::wrap(self.inner.transform_vector(vector._inner()))
    }

    #[inline]
    pub(crate) const fn wrap(inner: nalgebra::Matrix4<F>) -> Self {
        Self { inner }
    }
}

impl_binop!(Mul, mul, <F>, Matrix3<F>, Vector3<F>, Vector3<F>, |a, b| {
    Vector3::wrap(a.inner * b._inner())
});

impl_binop!(Mul, mul, <F>, Matrix3<F>, Matrix3<F>, Matrix3<F>, |a, b| {
    Matrix3::wrap(a.inner * b.inner)
});

impl_binop!(Mul, mul, <F>, Matrix4<F>, Matrix4<F>, Matrix4<F>, |a, b| {
    Matrix4::wrap(a.inner * b.inner)
});

impl_pod_for_scalar_type!(Matrix3);
impl_pod_for_scalar_type!(Matrix4);

impl_abs_diff_eq!(<F>, Matrix3<F>, |a, b, epsilon| {
    a.inner.abs_diff_eq(&b.inner, epsilon)
});

impl_relative_eq!(<F>, Matrix3<F>, |a, b, epsilon, max_relative| {
    a.inner.relative_eq(&b.inner, epsilon, max_relative)
});

impl_abs_diff_eq!(<F>, Matrix4<F>, |a, b, epsilon| {
    a.inner.abs_diff_eq(&b.inner, epsilon)
});

impl_relative_eq!(<F>, Matrix4<F>, |a, b, epsilon, max_relative| {
    a.inner.relative_eq(&b.inner, epsilon, max_relative)
});

impl<F: Float> fmt::Display for Matrix3<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.inner.row_iter() {
            writeln!(f, "[{} {} {}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

impl<F: Float> fmt::Display for Matrix4<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.inner.row_iter() {
            writeln!(f, "[{} {} {} {}]", row[0], row[1], row[2], row[3])?;
        }
        Ok(())
    }
}

impl<F: Float> From<Matrix3<F>> for nalgebra::Matrix3<F> {
    fn from(matrix: Matrix3<F>) -> Self {
        matrix.inner
    }
}

impl<F: Float> From<nalgebra::Matrix3<F>> for Matrix3<F> {
    fn from(matrix: nalgebra::Matrix3<F>) -> Self {
        Self::wrap(matrix)
    }
}

impl<F: Float> From<Matrix4<F>> for nalgebra::Matrix4<F> {
    fn from(matrix: Matrix4<F>) -> Self {
        matrix.inner
    }
}

impl<F: Float> From<nalgebra::Matrix4<F>> for Matrix4<F> {
    fn from(matrix: nalgebra::Matrix4<F>) -> Self {
        Self::wrap(matrix)
    }
}

/// Computes the 4x4 matrix for the shortest-arc rotation taking the direction
/// of `from` to the direction of `to`. Neither vector needs to be normalized.
///
/// The matrix is built directly from the two directions with the Rodrigues
/// formula `R = c I + [k]x + k k^T / (1 + c)`, where `k = from x to` and
/// `c = from . to`. For angles above 120 degrees, where the last term loses
/// accuracy, the rotation goes through [`Quaternion::from_rotation`] instead.
/// If either vector is zero the identity is returned.
pub fn rotation_matrix<F: Float>(from: &Vector3<F>, to: &Vector3<F>) -> Matrix4<F> {
    let from = from.normalized();
    let to = to.normalized();

    if from.is_zero() || to.is_zero() {
        return Matrix4::identity();
    }

    let cos_angle = from.dot(&to);
    if cos_angle < -F::ONE_HALF {
        return Quaternion::from_rotation(&from, &to).to_matrix4();
    }

    let k = from.cross(&to).to_array();
    let scale = F::ONE / (F::ONE + cos_angle);

    let rotation = Matrix3::from_fn(|row, col| {
        let diagonal = if row == col { cos_angle } else { F::ZERO };
        let skew = match (row, col) {
            (1, 0) => k[2],
            (2, 0) => -k[1],
            (0, 1) => -k[2],
            (2, 1) => k[0],
            (0, 2) => k[1],
            (1, 2) => -k[0],
            _ => F::ZERO,
        };
        diagonal + skew + k[row] * k[col] * scale
    });

    Matrix4::from_upper_left(&rotation)
}
