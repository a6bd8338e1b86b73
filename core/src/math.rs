//! Linear algebra and other useful mathematics.
//!
//! Includes [vectors][self::vec], [matrices][mat], [angles][angle] and
//! grayscale [colors][color], as well as utilities such as approximate
//! equality comparisons.
//!
//! Vectors are tagged with a type that represents the *space* they're
//! embedded in, and values in different spaces cannot be mixed without
//! explicit conversion (transformation). Matrices, similarly, are tagged by
//! both source and destination space, and can only be applied to matching
//! vectors. A normal computed in model space cannot accidentally be dotted
//! with a light direction in view space.

pub use {
    angle::{Angle, SphericalVec, degs, rads, spherical, turns},
    approx::ApproxEq,
    color::{Color3f, gray},
    mat::{
        Mat4, Matrix, ProjMat4, look_at, perspective, rotate_y, scale,
        translate,
    },
    vec::{ProjVec4, Vec3, Vector, splat, vec3},
};

pub mod angle;
pub mod approx;
pub mod color;
pub mod float;
pub mod mat;
pub mod vec;

/// Trait for linear interpolation between two values.
pub trait Lerp: Sized {
    /// Linearly interpolates between `self` and `other`.
    ///
    /// if `t` = 0, returns `self`; if `t` = 1, returns `other`.
    /// For 0 < `t` < 1, returns the weighted average of `self` and `other`.
    fn lerp(&self, other: &Self, t: f32) -> Self;

    /// Returns the (unweighted) average of `self` and `other`.
    ///
    /// # Examples
    /// ```
    /// use geosphere_core::math::{Lerp, vec3, Vec3};
    ///
    /// let a: Vec3 = vec3(-1.0, 2.0, 0.0);
    /// let b = vec3(3.0, -2.0, 4.0);
    /// assert_eq!(a.midpoint(&b), vec3(1.0, 0.0, 2.0));
    /// ```
    fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }
}

/// Linearly interpolates between two values.
///
/// For more information, see [`Lerp::lerp`].
#[inline]
pub fn lerp<T: Lerp>(t: f32, from: T, to: T) -> T {
    from.lerp(&to, t)
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + t * (other - self)
    }
}
