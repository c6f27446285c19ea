//! In general, transformations make it possible to work in the most
//! convenient coordinate space.
//!
//! ## Matrices
//!
//! **Matrix4x4** and **Matrix3x3** store their entries
//! **column-major**: `cols[c][r]` is the entry in row `r` and column
//! `c`, and a matrix-vector product is the sum of the columns
//! weighted by the vector's components. The layout is shared with
//! anything consuming `to_cols_array()`, so never index the storage
//! as rows. The constructors `new()` take their arguments in the
//! usual row-by-row reading order.
//!
//! ## Transformations
//!
//! A **Transform** keeps a matrix and its inverse. Points use the
//! matrix including translation, vectors ignore the translation and
//! normals use the inverse transpose of the upper-left 3x3 block.
//!
//! ```rust
//! use rs_pathtracer::core::geometry::{Point3f, Vector3f};
//! use rs_pathtracer::core::transform::Transform;
//!
//! let t = Transform::translate(&Vector3f::new(0.0, 2.5, -1.5))
//!     * Transform::rotate_x(-90.0)
//!     * Transform::scale(0.5, 0.3, 1.0);
//! let p = t.transform_point(&Point3f::default());
//! assert_eq!(p, Point3f::new(0.0, 2.5, -1.5));
//! ```

// std
use std::ops::Mul;
// crate
use crate::core::common::{radians, Float};
use crate::core::geometry::{Normal3f, Point3f, Vector3f};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix4x4 {
    pub cols: [[Float; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Matrix4x4::identity()
    }
}

impl Matrix4x4 {
    /// Entries are given row by row.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        t00: Float,
        t01: Float,
        t02: Float,
        t03: Float,
        t10: Float,
        t11: Float,
        t12: Float,
        t13: Float,
        t20: Float,
        t21: Float,
        t22: Float,
        t23: Float,
        t30: Float,
        t31: Float,
        t32: Float,
        t33: Float,
    ) -> Self {
        Matrix4x4 {
            cols: [
                [t00, t10, t20, t30],
                [t01, t11, t21, t31],
                [t02, t12, t22, t32],
                [t03, t13, t23, t33],
            ],
        }
    }
    pub fn identity() -> Self {
        Matrix4x4::new(
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        )
    }
    pub fn from_cols(cols: [[Float; 4]; 4]) -> Self {
        Matrix4x4 { cols }
    }
    pub fn from_cols_array(a: &[Float; 16]) -> Self {
        let mut cols: [[Float; 4]; 4] = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            col.copy_from_slice(&a[c * 4..c * 4 + 4]);
        }
        Matrix4x4 { cols }
    }
    /// Flat column-major copy of the entries.
    pub fn to_cols_array(&self) -> [Float; 16] {
        let mut a: [Float; 16] = [0.0; 16];
        for (c, col) in self.cols.iter().enumerate() {
            a[c * 4..c * 4 + 4].copy_from_slice(col);
        }
        a
    }
    /// Entry in row `r` and column `c`.
    pub fn get(&self, r: usize, c: usize) -> Float {
        self.cols[c][r]
    }
    pub fn transpose(&self) -> Matrix4x4 {
        let mut cols: [[Float; 4]; 4] = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = self.cols[r][c];
            }
        }
        Matrix4x4 { cols }
    }
    /// Matrix-vector product with column-major storage.
    pub fn mul_vec4(&self, v: &[Float; 4]) -> [Float; 4] {
        let mut out: [Float; 4] = [0.0; 4];
        for (c, col) in self.cols.iter().enumerate() {
            for r in 0..4 {
                out[r] += col[r] * v[c];
            }
        }
        out
    }
    pub fn upper_left(&self) -> Matrix3x3 {
        Matrix3x3 {
            cols: [
                [self.cols[0][0], self.cols[0][1], self.cols[0][2]],
                [self.cols[1][0], self.cols[1][1], self.cols[1][2]],
                [self.cols[2][0], self.cols[2][1], self.cols[2][2]],
            ],
        }
    }
    /// Gauss-Jordan elimination with full pivoting. Returns `None`
    /// for singular (or non-finite) matrices.
    pub fn inverse(&self) -> Option<Matrix4x4> {
        let mut indxc: [usize; 4] = [0; 4];
        let mut indxr: [usize; 4] = [0; 4];
        let mut ipiv: [u8; 4] = [0; 4];
        // row-major working copy, minv[r][c]
        let mut minv: [[Float; 4]; 4] = [[0.0; 4]; 4];
        for (r, row) in minv.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = self.get(r, c);
            }
        }
        for i in 0..4 {
            let mut irow: usize = 0;
            let mut icol: usize = 0;
            let mut big: Float = 0.0;
            // choose pivot
            for j in 0..4 {
                if ipiv[j] != 1 {
                    for k in 0..4 {
                        if ipiv[k] == 0 {
                            let abs: Float = minv[j][k].abs();
                            if abs >= big {
                                big = abs;
                                irow = j;
                                icol = k;
                            }
                        } else if ipiv[k] > 1 {
                            return None;
                        }
                    }
                }
            }
            ipiv[icol] += 1;
            // swap rows _irow_ and _icol_ for pivot
            if irow != icol {
                minv.swap(irow, icol);
            }
            indxr[i] = irow;
            indxc[i] = icol;
            if minv[icol][icol] == 0.0 || !minv[icol][icol].is_finite() {
                return None;
            }
            // set $m[icol][icol]$ to one by scaling row _icol_ appropriately
            let pivinv: Float = 1.0 / minv[icol][icol];
            minv[icol][icol] = 1.0;
            for j in 0..4 {
                minv[icol][j] *= pivinv;
            }
            // subtract this row from others to zero out their columns
            for j in 0..4 {
                if j != icol {
                    let save: Float = minv[j][icol];
                    minv[j][icol] = 0.0;
                    for k in 0..4 {
                        minv[j][k] -= minv[icol][k] * save;
                    }
                }
            }
        }
        // swap columns to reflect permutation
        for j in (0..4).rev() {
            if indxr[j] != indxc[j] {
                for row in minv.iter_mut() {
                    row.swap(indxr[j], indxc[j]);
                }
            }
        }
        Some(Matrix4x4::new(
            minv[0][0], minv[0][1], minv[0][2], minv[0][3], minv[1][0], minv[1][1], minv[1][2],
            minv[1][3], minv[2][0], minv[2][1], minv[2][2], minv[2][3], minv[3][0], minv[3][1],
            minv[3][2], minv[3][3],
        ))
    }
}

impl Mul for Matrix4x4 {
    type Output = Matrix4x4;
    fn mul(self, rhs: Matrix4x4) -> Matrix4x4 {
        let mut cols: [[Float; 4]; 4] = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            *col = self.mul_vec4(&rhs.cols[c]);
        }
        Matrix4x4 { cols }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix3x3 {
    pub cols: [[Float; 3]; 3],
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Matrix3x3 {
            cols: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }
}

impl Matrix3x3 {
    pub fn get(&self, r: usize, c: usize) -> Float {
        self.cols[c][r]
    }
    pub fn transpose(&self) -> Matrix3x3 {
        let mut cols: [[Float; 3]; 3] = [[0.0; 3]; 3];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = self.cols[r][c];
            }
        }
        Matrix3x3 { cols }
    }
    pub fn determinant(&self) -> Float {
        let m = |r: usize, c: usize| self.get(r, c);
        m(0, 0) * (m(1, 1) * m(2, 2) - m(1, 2) * m(2, 1))
            - m(0, 1) * (m(1, 0) * m(2, 2) - m(1, 2) * m(2, 0))
            + m(0, 2) * (m(1, 0) * m(2, 1) - m(1, 1) * m(2, 0))
    }
    pub fn mul_vec3(&self, v: &Vector3f) -> Vector3f {
        Vector3f {
            x: self.cols[0][0] * v.x + self.cols[1][0] * v.y + self.cols[2][0] * v.z,
            y: self.cols[0][1] * v.x + self.cols[1][1] * v.y + self.cols[2][1] * v.z,
            z: self.cols[0][2] * v.x + self.cols[1][2] * v.y + self.cols[2][2] * v.z,
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Transform {
    pub m: Matrix4x4,
    pub m_inv: Matrix4x4,
}

impl Transform {
    /// Returns `None` if `m` can't be inverted.
    pub fn new(m: Matrix4x4) -> Option<Transform> {
        m.inverse().map(|m_inv| Transform { m, m_inv })
    }
    pub fn inverse(t: &Transform) -> Transform {
        Transform {
            m: t.m_inv,
            m_inv: t.m,
        }
    }
    pub fn translate(delta: &Vector3f) -> Transform {
        Transform {
            m: Matrix4x4::new(
                1.0, 0.0, 0.0, delta.x, 0.0, 1.0, 0.0, delta.y, 0.0, 0.0, 1.0, delta.z, 0.0, 0.0,
                0.0, 1.0,
            ),
            m_inv: Matrix4x4::new(
                1.0, 0.0, 0.0, -delta.x, 0.0, 1.0, 0.0, -delta.y, 0.0, 0.0, 1.0, -delta.z, 0.0,
                0.0, 0.0, 1.0,
            ),
        }
    }
    pub fn scale(x: Float, y: Float, z: Float) -> Transform {
        Transform {
            m: Matrix4x4::new(
                x, 0.0, 0.0, 0.0, 0.0, y, 0.0, 0.0, 0.0, 0.0, z, 0.0, 0.0, 0.0, 0.0, 1.0,
            ),
            m_inv: Matrix4x4::new(
                1.0 / x,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0 / y,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0 / z,
                0.0,
                0.0,
                0.0,
                0.0,
                1.0,
            ),
        }
    }
    /// Rotation about the x axis, `theta` in degrees.
    pub fn rotate_x(theta: Float) -> Transform {
        let sin_theta: Float = radians(theta).sin();
        let cos_theta: Float = radians(theta).cos();
        let m = Matrix4x4::new(
            1.0, 0.0, 0.0, 0.0, 0.0, cos_theta, -sin_theta, 0.0, 0.0, sin_theta, cos_theta, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform {
            m,
            m_inv: m.transpose(),
        }
    }
    /// Rotation about the y axis, `theta` in degrees.
    pub fn rotate_y(theta: Float) -> Transform {
        let sin_theta: Float = radians(theta).sin();
        let cos_theta: Float = radians(theta).cos();
        let m = Matrix4x4::new(
            cos_theta, 0.0, sin_theta, 0.0, 0.0, 1.0, 0.0, 0.0, -sin_theta, 0.0, cos_theta, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform {
            m,
            m_inv: m.transpose(),
        }
    }
    pub fn rotate_z(theta: Float) -> Transform {
        let sin_theta: Float = radians(theta).sin();
        let cos_theta: Float = radians(theta).cos();
        let m = Matrix4x4::new(
            cos_theta, -sin_theta, 0.0, 0.0, sin_theta, cos_theta, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform {
            m,
            m_inv: m.transpose(),
        }
    }
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        let [xp, yp, zp, wp] = self.m.mul_vec4(&[p.x, p.y, p.z, 1.0]);
        if wp == 1.0 as Float {
            Point3f {
                x: xp,
                y: yp,
                z: zp,
            }
        } else {
            Point3f {
                x: xp / wp,
                y: yp / wp,
                z: zp / wp,
            }
        }
    }
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        let [x, y, z, _] = self.m.mul_vec4(&[v.x, v.y, v.z, 0.0]);
        Vector3f { x, y, z }
    }
    /// Uses the inverse transpose; the result is not normalized.
    pub fn transform_normal(&self, n: &Normal3f) -> Normal3f {
        Normal3f::from(self.normal_matrix().mul_vec3(&Vector3f::from(*n)))
    }
    /// Inverse transpose of the upper-left 3x3 block.
    pub fn normal_matrix(&self) -> Matrix3x3 {
        self.m_inv.upper_left().transpose()
    }
}

impl Mul for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            m: self.m * rhs.m,
            m_inv: rhs.m_inv * self.m_inv,
        }
    }
}
