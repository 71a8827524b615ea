/// Vectors: fixed-size 2, 3 and 4 component tuples.
///
/// Every vector exists in a single-precision (`f`) and a double-precision
/// (`d`) flavour generated from the same macro, so both behave identically.
///
/// Vectors are plain `Copy` values. In-place mutation goes through
/// `normalize`, `scale`, `set` and the compound assignment operators
/// (`+=`, `-=`, `*=`). The binary operators and `normalized`/`cross`
/// return new values.
///
/// Layout is `#[repr(C)]` and `bytemuck::Pod`, so a slice of vectors can be
/// handed to a GPU buffer as raw bytes without conversion.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};
use bytemuck::{Pod, Zeroable};

macro_rules! define_vector {
    (
        $(#[$meta:meta])*
        $name:ident, $t:ty, $len:literal, $glam:ty, [$($field:ident),+]
    ) => {
        $(#[$meta])*
        #[repr(C)]
        #[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            $(pub $field: $t,)+
        }

        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self { $($field: 0.0,)+ };

            /// Create a vector from its components.
            pub const fn new($($field: $t),+) -> Self {
                Self { $($field,)+ }
            }

            /// Create a vector with every component set to `value`.
            pub const fn splat(value: $t) -> Self {
                Self { $($field: value,)+ }
            }

            /// Create a vector from an array in component order.
            pub fn from_array(array: [$t; $len]) -> Self {
                bytemuck::cast(array)
            }

            /// Components as an array.
            pub fn to_array(&self) -> [$t; $len] {
                bytemuck::cast(*self)
            }

            /// Overwrite every component.
            pub fn set(&mut self, $($field: $t),+) {
                $(self.$field = $field;)+
            }

            pub fn dot(&self, other: &Self) -> $t {
                let mut sum = 0.0;
                $(sum += self.$field * other.$field;)+
                sum
            }

            pub fn length_squared(&self) -> $t {
                self.dot(self)
            }

            pub fn length(&self) -> $t {
                self.length_squared().sqrt()
            }

            /// Scale to unit length in place.
            ///
            /// Returns the length before normalization. A zero-length
            /// vector is left untouched and 0 is returned.
            pub fn normalize(&mut self) -> $t {
                let length = self.length();
                if length != 0.0 {
                    $(self.$field /= length;)+
                }
                length
            }

            /// Unit-length copy (a zero vector stays zero).
            pub fn normalized(&self) -> Self {
                let mut result = *self;
                result.normalize();
                result
            }

            /// Multiply every component by `factor` in place.
            pub fn scale(&mut self, factor: $t) {
                $(self.$field *= factor;)+
            }

            pub fn distance_squared(&self, other: &Self) -> $t {
                (*self - *other).length_squared()
            }

            pub fn distance(&self, other: &Self) -> $t {
                self.distance_squared(other).sqrt()
            }

            /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
            pub fn lerp(&self, other: &Self, t: $t) -> Self {
                Self { $($field: self.$field + (other.$field - self.$field) * t,)+ }
            }

            /// True when no component is NaN or infinite.
            pub fn is_valid(&self) -> bool {
                true $(&& self.$field.is_finite())+
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, other: Self) -> Self {
                Self { $($field: self.$field + other.$field,)+ }
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, other: Self) -> Self {
                Self { $($field: self.$field - other.$field,)+ }
            }
        }

        impl Mul<$t> for $name {
            type Output = Self;

            fn mul(self, factor: $t) -> Self {
                Self { $($field: self.$field * factor,)+ }
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                Self { $($field: -self.$field,)+ }
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, other: Self) {
                $(self.$field += other.$field;)+
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, other: Self) {
                $(self.$field -= other.$field;)+
            }
        }

        impl MulAssign<$t> for $name {
            fn mul_assign(&mut self, factor: $t) {
                self.scale(factor);
            }
        }

        impl Index<usize> for $name {
            type Output = $t;

            fn index(&self, index: usize) -> &$t {
                &bytemuck::cast_ref::<Self, [$t; $len]>(self)[index]
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut $t {
                &mut bytemuck::cast_mut::<Self, [$t; $len]>(self)[index]
            }
        }

        impl From<[$t; $len]> for $name {
            fn from(array: [$t; $len]) -> Self {
                Self::from_array(array)
            }
        }

        impl From<$name> for [$t; $len] {
            fn from(vector: $name) -> Self {
                vector.to_array()
            }
        }

        impl From<$glam> for $name {
            fn from(v: $glam) -> Self {
                Self { $($field: v.$field,)+ }
            }
        }

        impl From<$name> for $glam {
            fn from(v: $name) -> Self {
                <$glam>::new($(v.$field),+)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let components = [$(self.$field),+];
                for (i, value) in components.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", value)?;
                }
                Ok(())
            }
        }
    };
}

/// 3-D extras: cross product and angle.
macro_rules! impl_vector3_extras {
    ($name:ident, $v4:ident, $t:ty) => {
        impl $name {
            pub const X: Self = Self::new(1.0, 0.0, 0.0);
            pub const Y: Self = Self::new(0.0, 1.0, 0.0);
            pub const Z: Self = Self::new(0.0, 0.0, 1.0);

            /// Right-handed cross product `u × v`.
            pub fn cross(u: &Self, v: &Self) -> Self {
                Self {
                    x: u.y * v.z - v.y * u.z,
                    y: -u.x * v.z + v.x * u.z,
                    z: u.x * v.y - v.x * u.y,
                }
            }

            /// Angle in radians between two directions.
            ///
            /// The dot product of the normalized inputs is passed to `acos`
            /// unclamped: rounding can push it just outside `[-1, 1]` and
            /// the result is then NaN.
            pub fn angle_between(u: &Self, v: &Self) -> $t {
                u.normalized().dot(&v.normalized()).acos()
            }

            /// Extend to homogeneous coordinates.
            pub fn extend(&self, w: $t) -> $v4 {
                $v4::new(self.x, self.y, self.z, w)
            }
        }

        impl $v4 {
            /// Drop the `w` component.
            pub fn truncate(&self) -> $name {
                $name::new(self.x, self.y, self.z)
            }
        }
    };
}

define_vector!(
    /// Single-precision 2-D vector.
    Vector2f, f32, 2, glam::Vec2, [x, y]
);
define_vector!(
    /// Double-precision 2-D vector.
    Vector2d, f64, 2, glam::DVec2, [x, y]
);
define_vector!(
    /// Single-precision 3-D vector (also used for points).
    Vector3f, f32, 3, glam::Vec3, [x, y, z]
);
define_vector!(
    /// Double-precision 3-D vector.
    Vector3d, f64, 3, glam::DVec3, [x, y, z]
);
define_vector!(
    /// Single-precision 4-D vector. Plane equations are stored as
    /// `(a, b, c, d)` in one of these.
    Vector4f, f32, 4, glam::Vec4, [x, y, z, w]
);
define_vector!(
    /// Double-precision 4-D vector.
    Vector4d, f64, 4, glam::DVec4, [x, y, z, w]
);

impl_vector3_extras!(Vector3f, Vector4f, f32);
impl_vector3_extras!(Vector3d, Vector4d, f64);

impl From<Vector3f> for Vector3d {
    fn from(v: Vector3f) -> Self {
        Vector3d::new(v.x as f64, v.y as f64, v.z as f64)
    }
}

#[cfg(test)]
#[path = "vector_tests.rs"]
mod tests;
