/// Matrices: 3×3 and 4×4, single and double precision.
///
/// Storage is a flat column-major array: entry `(row, col)` lives at
/// `col * N + row`. For a 4×4 transform the translation sits in entries
/// 12, 13 and 14, which is the layout shader uniforms expect. Products read
/// left to right in application order: `a * b` applies `b` first.
///
/// Degenerate input never panics. A zero-length rotation axis yields the
/// identity, and inverting a singular matrix fills the result with
/// `Infinity`/NaN so the anomaly stays visible to the caller.

use std::fmt;
use std::ops::{Index, IndexMut, Mul};
use bytemuck::{Pod, Zeroable};
use super::vector::{Vector3d, Vector3f, Vector4d, Vector4f};

macro_rules! define_matrix33 {
    ($(#[$meta:meta])* $name:ident, $t:ty, $v3:ident, $glam:ty) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
        pub struct $name {
            a: [$t; 9],
        }

        impl $name {
            pub const ZERO: Self = Self { a: [0.0; 9] };

            pub const IDENTITY: Self = Self {
                a: [
                    1.0, 0.0, 0.0,
                    0.0, 1.0, 0.0,
                    0.0, 0.0, 1.0,
                ],
            };

            /// Build from a column-major array.
            pub const fn from_cols_array(a: [$t; 9]) -> Self {
                Self { a }
            }

            /// Build from three column vectors.
            pub fn from_columns(c0: $v3, c1: $v3, c2: $v3) -> Self {
                Self { a: [c0.x, c0.y, c0.z, c1.x, c1.y, c1.z, c2.x, c2.y, c2.z] }
            }

            /// Column-major entries.
            pub fn as_array(&self) -> &[$t; 9] {
                &self.a
            }

            pub fn get(&self, row: usize, col: usize) -> $t {
                self.a[col * 3 + row]
            }

            pub fn set(&mut self, row: usize, col: usize, value: $t) {
                self.a[col * 3 + row] = value;
            }

            pub fn column(&self, col: usize) -> $v3 {
                $v3::new(self.a[col * 3], self.a[col * 3 + 1], self.a[col * 3 + 2])
            }

            pub fn set_column(&mut self, column: $v3, col: usize) {
                self.a[col * 3] = column.x;
                self.a[col * 3 + 1] = column.y;
                self.a[col * 3 + 2] = column.z;
            }

            /// Per-axis scaling.
            pub fn scaling(x: $t, y: $t, z: $t) -> Self {
                let mut m = Self::IDENTITY;
                m.a[0] = x;
                m.a[4] = y;
                m.a[8] = z;
                m
            }

            pub fn scaling_vector(scale: $v3) -> Self {
                Self::scaling(scale.x, scale.y, scale.z)
            }

            pub fn uniform_scaling(factor: $t) -> Self {
                Self::scaling(factor, factor, factor)
            }

            /// Rotation of `angle` radians around the axis `(x, y, z)`.
            ///
            /// The axis need not be unit length. A zero-length axis gives
            /// the identity.
            pub fn rotation(angle: $t, x: $t, y: $t, z: $t) -> Self {
                let mag = (x * x + y * y + z * z).sqrt();
                if mag == 0.0 {
                    return Self::IDENTITY;
                }
                let r = rodrigues(angle, x / mag, y / mag, z / mag);

                let mut m = Self::ZERO;
                for row in 0..3 {
                    for col in 0..3 {
                        m.set(row, col, r[row][col]);
                    }
                }
                m
            }

            pub fn transpose(&self) -> Self {
                let mut m = Self::ZERO;
                for row in 0..3 {
                    for col in 0..3 {
                        m.set(col, row, self.get(row, col));
                    }
                }
                m
            }

            pub fn determinant(&self) -> $t {
                let g = |r, c| self.get(r, c);
                g(0, 0) * (g(1, 1) * g(2, 2) - g(2, 1) * g(1, 2))
                    - g(0, 1) * (g(1, 0) * g(2, 2) - g(2, 0) * g(1, 2))
                    + g(0, 2) * (g(1, 0) * g(2, 1) - g(2, 0) * g(1, 1))
            }

            /// Apply this matrix to a direction.
            pub fn rotate_vector(&self, v: &$v3) -> $v3 {
                let a = &self.a;
                $v3::new(
                    a[0] * v.x + a[3] * v.y + a[6] * v.z,
                    a[1] * v.x + a[4] * v.y + a[7] * v.z,
                    a[2] * v.x + a[5] * v.y + a[8] * v.z,
                )
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                let mut product = Self::ZERO;
                for row in 0..3 {
                    for col in 0..3 {
                        let mut sum = 0.0;
                        for k in 0..3 {
                            sum += self.get(row, k) * rhs.get(k, col);
                        }
                        product.set(row, col, sum);
                    }
                }
                product
            }
        }

        impl Mul<$v3> for $name {
            type Output = $v3;

            fn mul(self, v: $v3) -> $v3 {
                self.rotate_vector(&v)
            }
        }

        impl Index<usize> for $name {
            type Output = $t;

            fn index(&self, index: usize) -> &$t {
                &self.a[index]
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut $t {
                &mut self.a[index]
            }
        }

        impl From<$glam> for $name {
            fn from(m: $glam) -> Self {
                Self { a: m.to_cols_array() }
            }
        }

        impl From<$name> for $glam {
            fn from(m: $name) -> Self {
                <$glam>::from_cols_array(&m.a)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_columns(f, &self.a, 3)
            }
        }
    };
}

macro_rules! define_matrix44 {
    ($(#[$meta:meta])* $name:ident, $t:ty, $m33:ident, $v3:ident, $v4:ident, $glam:ty) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
        pub struct $name {
            a: [$t; 16],
        }

        impl $name {
            pub const ZERO: Self = Self { a: [0.0; 16] };

            pub const IDENTITY: Self = Self {
                a: [
                    1.0, 0.0, 0.0, 0.0,
                    0.0, 1.0, 0.0, 0.0,
                    0.0, 0.0, 1.0, 0.0,
                    0.0, 0.0, 0.0, 1.0,
                ],
            };

            /// Build from a column-major array.
            pub const fn from_cols_array(a: [$t; 16]) -> Self {
                Self { a }
            }

            /// Build from four column vectors.
            pub fn from_columns(c0: $v4, c1: $v4, c2: $v4, c3: $v4) -> Self {
                let mut m = Self::ZERO;
                m.set_column(c0, 0);
                m.set_column(c1, 1);
                m.set_column(c2, 2);
                m.set_column(c3, 3);
                m
            }

            /// Column-major entries, ready for upload.
            pub fn as_array(&self) -> &[$t; 16] {
                &self.a
            }

            pub fn get(&self, row: usize, col: usize) -> $t {
                self.a[col * 4 + row]
            }

            pub fn set(&mut self, row: usize, col: usize, value: $t) {
                self.a[col * 4 + row] = value;
            }

            pub fn column(&self, col: usize) -> $v4 {
                let i = col * 4;
                $v4::new(self.a[i], self.a[i + 1], self.a[i + 2], self.a[i + 3])
            }

            pub fn set_column(&mut self, column: $v4, col: usize) {
                let i = col * 4;
                self.a[i] = column.x;
                self.a[i + 1] = column.y;
                self.a[i + 2] = column.z;
                self.a[i + 3] = column.w;
            }

            /// Write the first three entries of a column; the fourth is kept.
            pub fn set_column3(&mut self, column: $v3, col: usize) {
                let i = col * 4;
                self.a[i] = column.x;
                self.a[i + 1] = column.y;
                self.a[i + 2] = column.z;
            }

            pub fn scaling(x: $t, y: $t, z: $t) -> Self {
                let mut m = Self::IDENTITY;
                m.a[0] = x;
                m.a[5] = y;
                m.a[10] = z;
                m
            }

            pub fn scaling_vector(scale: $v3) -> Self {
                Self::scaling(scale.x, scale.y, scale.z)
            }

            pub fn uniform_scaling(factor: $t) -> Self {
                Self::scaling(factor, factor, factor)
            }

            /// Rotation of `angle` radians around the axis `(x, y, z)`.
            ///
            /// A zero-length axis gives the identity.
            pub fn rotation(angle: $t, x: $t, y: $t, z: $t) -> Self {
                let mag = (x * x + y * y + z * z).sqrt();
                if mag == 0.0 {
                    return Self::IDENTITY;
                }
                let r = rodrigues(angle, x / mag, y / mag, z / mag);

                let mut m = Self::IDENTITY;
                for row in 0..3 {
                    for col in 0..3 {
                        m.set(row, col, r[row][col]);
                    }
                }
                m
            }

            pub fn translation(x: $t, y: $t, z: $t) -> Self {
                let mut m = Self::IDENTITY;
                m.a[12] = x;
                m.a[13] = y;
                m.a[14] = z;
                m
            }

            /// Orthographic projection onto the given box.
            pub fn orthographic(
                x_min: $t, x_max: $t,
                y_min: $t, y_max: $t,
                z_min: $t, z_max: $t,
            ) -> Self {
                let mut m = Self::IDENTITY;
                m.a[0] = 2.0 / (x_max - x_min);
                m.a[5] = 2.0 / (y_max - y_min);
                m.a[10] = -2.0 / (z_max - z_min);
                m.a[12] = -((x_max + x_min) / (x_max - x_min));
                m.a[13] = -((y_max + y_min) / (y_max - y_min));
                m.a[14] = -((z_max + z_min) / (z_max - z_min));
                m.a[15] = 1.0;
                m
            }

            /// Perspective projection with explicit near-plane bounds.
            ///
            /// The bounds may be asymmetric; the off-centre terms land in
            /// entries 8 and 9.
            pub fn frustum(
                x_min: $t, x_max: $t,
                y_min: $t, y_max: $t,
                near: $t, far: $t,
            ) -> Self {
                let mut m = Self::ZERO;
                m.a[0] = (2.0 * near) / (x_max - x_min);
                m.a[5] = (2.0 * near) / (y_max - y_min);
                m.a[8] = (x_max + x_min) / (x_max - x_min);
                m.a[9] = (y_max + y_min) / (y_max - y_min);
                m.a[10] = -((far + near) / (far - near));
                m.a[11] = -1.0;
                m.a[14] = -((2.0 * far * near) / (far - near));
                m.a[15] = 0.0;
                m
            }

            /// Symmetric perspective projection.
            ///
            /// `fov` is the vertical field of view in radians.
            pub fn perspective(fov: $t, aspect: $t, near: $t, far: $t) -> Self {
                let y_max = near * (fov * 0.5).tan();
                let y_min = -y_max;
                let x_min = y_min * aspect;
                let x_max = -x_min;
                Self::frustum(x_min, x_max, y_min, y_max, near, far)
            }

            pub fn transpose(&self) -> Self {
                let mut m = Self::ZERO;
                for row in 0..4 {
                    for col in 0..4 {
                        m.set(col, row, self.get(row, col));
                    }
                }
                m
            }

            /// Determinant of the 3×3 block left after removing `row` and `col`.
            fn minor(&self, row: usize, col: usize) -> $t {
                let mut sub = [0.0; 9];
                let mut i = 0;
                for c in (0..4).filter(|&c| c != col) {
                    for r in (0..4).filter(|&r| r != row) {
                        sub[i] = self.get(r, c);
                        i += 1;
                    }
                }
                $m33::from_cols_array(sub).determinant()
            }

            fn cofactor(&self, row: usize, col: usize) -> $t {
                let minor = self.minor(row, col);
                if (row + col) % 2 == 1 { -minor } else { minor }
            }

            pub fn determinant(&self) -> $t {
                let mut det = 0.0;
                for col in 0..4 {
                    det += self.get(0, col) * self.cofactor(0, col);
                }
                det
            }

            /// Inverse by the adjugate method.
            ///
            /// A singular matrix is not rejected: `1 / det` becomes infinite
            /// and the entries come out as `Infinity` or NaN.
            pub fn inverse(&self) -> Self {
                let inv_det = 1.0 / self.determinant();
                let mut m = Self::ZERO;
                for row in 0..4 {
                    for col in 0..4 {
                        // adj(A)[col][row] = C[row][col]
                        m.set(col, row, self.cofactor(row, col) * inv_det);
                    }
                }
                m
            }

            /// Upper-left 3×3 block.
            pub fn rotation_matrix(&self) -> $m33 {
                let mut m = $m33::ZERO;
                for row in 0..3 {
                    for col in 0..3 {
                        m.set(row, col, self.get(row, col));
                    }
                }
                m
            }

            /// Replace the upper-left 3×3 block, keeping everything else.
            pub fn set_rotation(&mut self, rotation: &$m33) {
                for row in 0..3 {
                    for col in 0..3 {
                        self.set(row, col, rotation.get(row, col));
                    }
                }
            }

            /// Copy of the rotation block with translation and projection
            /// terms cleared.
            pub fn rotation_only(&self) -> Self {
                let mut m = Self::IDENTITY;
                m.set_rotation(&self.rotation_matrix());
                m
            }

            /// Transform a point (implicit `w = 1`, output `w` dropped).
            pub fn transform_point(&self, p: &$v3) -> $v3 {
                let a = &self.a;
                $v3::new(
                    a[0] * p.x + a[4] * p.y + a[8] * p.z + a[12],
                    a[1] * p.x + a[5] * p.y + a[9] * p.z + a[13],
                    a[2] * p.x + a[6] * p.y + a[10] * p.z + a[14],
                )
            }

            /// Transform a direction by the upper-left 3×3 block only.
            pub fn rotate_vector(&self, v: &$v3) -> $v3 {
                let a = &self.a;
                $v3::new(
                    a[0] * v.x + a[4] * v.y + a[8] * v.z,
                    a[1] * v.x + a[5] * v.y + a[9] * v.z,
                    a[2] * v.x + a[6] * v.y + a[10] * v.z,
                )
            }

            pub fn transform_vector4(&self, v: &$v4) -> $v4 {
                let a = &self.a;
                $v4::new(
                    a[0] * v.x + a[4] * v.y + a[8] * v.z + a[12] * v.w,
                    a[1] * v.x + a[5] * v.y + a[9] * v.z + a[13] * v.w,
                    a[2] * v.x + a[6] * v.y + a[10] * v.z + a[14] * v.w,
                    a[3] * v.x + a[7] * v.y + a[11] * v.z + a[15] * v.w,
                )
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                let mut product = Self::ZERO;
                for row in 0..4 {
                    for col in 0..4 {
                        let mut sum = 0.0;
                        for k in 0..4 {
                            sum += self.get(row, k) * rhs.get(k, col);
                        }
                        product.set(row, col, sum);
                    }
                }
                product
            }
        }

        impl Mul<$v4> for $name {
            type Output = $v4;

            fn mul(self, v: $v4) -> $v4 {
                self.transform_vector4(&v)
            }
        }

        impl Index<usize> for $name {
            type Output = $t;

            fn index(&self, index: usize) -> &$t {
                &self.a[index]
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut $t {
                &mut self.a[index]
            }
        }

        impl From<$glam> for $name {
            fn from(m: $glam) -> Self {
                Self { a: m.to_cols_array() }
            }
        }

        impl From<$name> for $glam {
            fn from(m: $name) -> Self {
                <$glam>::from_cols_array(&m.a)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_columns(f, &self.a, 4)
            }
        }
    };
}

/// Rodrigues rotation for a unit axis, as `[row][col]`.
fn rodrigues<T>(angle: T, x: T, y: T, z: T) -> [[T; 3]; 3]
where
    T: Float,
{
    let s = angle.sin();
    let c = angle.cos();
    let one_c = T::ONE - c;

    let (xx, yy, zz) = (x * x, y * y, z * z);
    let (xy, yz, zx) = (x * y, y * z, z * x);
    let (xs, ys, zs) = (x * s, y * s, z * s);

    [
        [(one_c * xx) + c, (one_c * xy) - zs, (one_c * zx) + ys],
        [(one_c * xy) + zs, (one_c * yy) + c, (one_c * yz) - xs],
        [(one_c * zx) - ys, (one_c * yz) + xs, (one_c * zz) + c],
    ]
}

/// The few float operations `rodrigues` needs from both precisions.
trait Float:
    Copy
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
{
    const ONE: Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
}

impl Float for f32 {
    const ONE: Self = 1.0;
    fn sin(self) -> Self {
        f32::sin(self)
    }
    fn cos(self) -> Self {
        f32::cos(self)
    }
}

impl Float for f64 {
    const ONE: Self = 1.0;
    fn sin(self) -> Self {
        f64::sin(self)
    }
    fn cos(self) -> Self {
        f64::cos(self)
    }
}

/// `[c0r0,c0r1,.., c1r0,..]`: columns separated by ", ".
fn write_columns<T: fmt::Debug>(f: &mut fmt::Formatter<'_>, a: &[T], n: usize) -> fmt::Result {
    write!(f, "[")?;
    for (i, value) in a.iter().enumerate() {
        if i > 0 {
            if i % n == 0 {
                write!(f, ", ")?;
            } else {
                write!(f, ",")?;
            }
        }
        write!(f, "{:?}", value)?;
    }
    write!(f, "]")
}

define_matrix33!(
    /// Single-precision 3×3 matrix (rotation and scale).
    Matrix33f, f32, Vector3f, glam::Mat3
);
define_matrix33!(
    /// Double-precision 3×3 matrix.
    Matrix33d, f64, Vector3d, glam::DMat3
);
define_matrix44!(
    /// Single-precision 4×4 matrix (affine transforms and projections).
    Matrix44f, f32, Matrix33f, Vector3f, Vector4f, glam::Mat4
);
define_matrix44!(
    /// Double-precision 4×4 matrix.
    Matrix44d, f64, Matrix33d, Vector3d, Vector4d, glam::DMat4
);

#[cfg(test)]
#[path = "matrix_tests.rs"]
mod tests;
