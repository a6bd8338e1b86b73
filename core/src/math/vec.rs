//! Real and projective vectors.

use core::fmt::{self, Debug, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

use super::{Lerp, approx::ApproxEq, float};

//
// Types
//

/// A generic vector type, tagged with the space it is embedded in.
///
/// `Repr` is the underlying storage, typically an array of scalars.
/// `Space` is a zero-sized tag type; vectors in different spaces cannot be
/// mixed without an explicit [`to`][Vector::to] conversion or a
/// transformation by a matching [matrix][super::Matrix].
#[repr(transparent)]
pub struct Vector<Repr, Space = ()>(pub Repr, PhantomData<Space>);

/// Tag type for a real vector space of dimension `DIM` with basis `B`.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Real<const DIM: usize, Basis = ()>(PhantomData<Basis>);

/// Tag type for the four-dimensional projective space that perspective
/// projection maps into, also called *clip space*.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Proj4;

/// A 3-vector with `f32` components in basis `B`.
pub type Vec3<B = ()> = Vector<[f32; 3], Real<3, B>>;

/// A homogeneous 4-vector in clip space.
pub type ProjVec4 = Vector<[f32; 4], Proj4>;

//
// Free fns
//

/// Returns a 3-vector with components `x`, `y`, and `z`.
#[inline]
pub const fn vec3<B>(x: f32, y: f32, z: f32) -> Vec3<B> {
    Vector::new([x, y, z])
}

/// Returns a 3-vector with all components equal to `s`.
#[inline]
pub const fn splat<B>(s: f32) -> Vec3<B> {
    vec3(s, s, s)
}

//
// Inherent impls
//

impl<R, Sp> Vector<R, Sp> {
    /// Returns a new vector with representation `repr`.
    #[inline]
    pub const fn new(repr: R) -> Self {
        Self(repr, PhantomData)
    }

    /// Returns `self` reinterpreted in another space.
    ///
    /// This is a type-level cast only; the components are unchanged.
    #[inline]
    pub fn to<S>(self) -> Vector<R, S> {
        Vector::new(self.0)
    }
}

impl<Sp, const N: usize> Vector<[f32; N], Sp> {
    /// Returns the dot product of `self` and `other`.
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut res = 0.0;
        for i in 0..N {
            res += self.0[i] * other.0[i];
        }
        res
    }

    /// Returns the squared length of `self`.
    #[inline]
    pub fn len_sqr(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the Euclidean length of `self`.
    #[inline]
    pub fn len(&self) -> f32 {
        float::sqrt(self.len_sqr())
    }

    /// Returns `self` scaled to unit length.
    ///
    /// The result is non-finite if `self` is the zero vector.
    #[inline]
    pub fn normalize(&self) -> Self {
        *self / self.len()
    }

    /// Returns whether every component of `self` is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Returns a vector with `f` applied to each component of `self`.
    #[inline]
    pub fn map(self, f: impl FnMut(f32) -> f32) -> Self {
        Self::new(self.0.map(f))
    }
}

impl<B> Vec3<B> {
    /// Unit vector in the direction of the positive x-axis.
    pub const X: Self = vec3(1.0, 0.0, 0.0);
    /// Unit vector in the direction of the positive y-axis.
    pub const Y: Self = vec3(0.0, 1.0, 0.0);
    /// Unit vector in the direction of the positive z-axis.
    pub const Z: Self = vec3(0.0, 0.0, 1.0);

    /// Returns the zero vector.
    #[inline]
    pub const fn zero() -> Self {
        splat(0.0)
    }

    #[inline]
    pub const fn x(&self) -> f32 {
        self.0[0]
    }
    #[inline]
    pub const fn y(&self) -> f32 {
        self.0[1]
    }
    #[inline]
    pub const fn z(&self) -> f32 {
        self.0[2]
    }

    /// Returns the cross product of `self` and `other`.
    ///
    /// The result is orthogonal to both inputs, and its direction follows
    /// the right-hand rule.
    pub fn cross(&self, other: &Self) -> Self {
        let [a, b, c] = self.0;
        let [d, e, f] = other.0;
        vec3(b * f - c * e, c * d - a * f, a * e - b * d)
    }
}

impl ProjVec4 {
    #[inline]
    pub const fn w(&self) -> f32 {
        self.0[3]
    }

    /// Divides the x, y, and z components of `self` by w.
    ///
    /// The result is in normalized device coordinates if `self` is inside
    /// the view frustum.
    #[inline]
    pub fn project_to_real<B>(&self) -> Vec3<B> {
        let [x, y, z, w] = self.0;
        vec3(x / w, y / w, z / w)
    }
}

//
// Local trait impls
//

impl<Sp, const N: usize> ApproxEq<Self, f32> for Vector<[f32; N], Sp> {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

impl<Sp, const N: usize> Lerp for Vector<[f32; N], Sp> {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

// SAFETY: `Vector` is `repr(transparent)` over `[f32; N]`, which is `Pod`,
// and `PhantomData` is zero-sized.
unsafe impl<Sp: 'static, const N: usize> bytemuck::Zeroable
    for Vector<[f32; N], Sp>
{
}
// SAFETY: see above.
unsafe impl<Sp: 'static, const N: usize> bytemuck::Pod
    for Vector<[f32; N], Sp>
{
}

//
// Foreign trait impls
//

// Manual impls to avoid bounds on the space tag.

impl<R: Copy, Sp> Copy for Vector<R, Sp> {}

impl<R: Clone, Sp> Clone for Vector<R, Sp> {
    fn clone(&self) -> Self {
        Self::new(self.0.clone())
    }
}

impl<R: PartialEq, Sp> PartialEq for Vector<R, Sp> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Default, Sp> Default for Vector<R, Sp> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R: Debug, Sp: Debug + Default> Debug for Vector<R, Sp> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Vec<{:?}>{:?}", Sp::default(), self.0)
    }
}

impl<const DIM: usize, B: Debug + Default> Debug for Real<DIM, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "R{DIM}<{:?}>", B::default())
    }
}

impl<R, Sp> From<R> for Vector<R, Sp> {
    #[inline]
    fn from(repr: R) -> Self {
        Self::new(repr)
    }
}

impl<Sp, const N: usize> Index<usize> for Vector<[f32; N], Sp> {
    type Output = f32;
    #[inline]
    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<Sp, const N: usize> AddAssign for Vector<[f32; N], Sp> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<Sp, const N: usize> SubAssign for Vector<[f32; N], Sp> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        for i in 0..N {
            self.0[i] -= rhs.0[i];
        }
    }
}

impl<Sp, const N: usize> Add for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<Sp, const N: usize> Sub for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<Sp, const N: usize> Neg for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<Sp, const N: usize> Mul<f32> for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.map(|c| c * rhs)
    }
}

impl<Sp, const N: usize> Mul<Vector<[f32; N], Sp>> for f32 {
    type Output = Vector<[f32; N], Sp>;
    #[inline]
    fn mul(self, rhs: Vector<[f32; N], Sp>) -> Self::Output {
        rhs * self
    }
}

impl<Sp, const N: usize> Div<f32> for Vector<[f32; N], Sp> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f32) -> Self {
        self.map(|c| c / rhs)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn length() {
        assert_eq!(vec3::<()>(3.0, 4.0, 0.0).len(), 5.0);
        assert_eq!(vec3::<()>(1.0, 2.0, 2.0).len_sqr(), 9.0);
    }

    #[test]
    fn normalize_yields_unit_length() {
        let v: Vec3 = vec3(-2.0, 5.0, 1.5).normalize();
        assert_approx_eq!(v.len(), 1.0);
    }

    #[test]
    fn vector_arithmetic() {
        let v: Vec3 = vec3(1.0, 2.0, 0.0);
        let w = vec3(-2.0, 1.0, -1.0);
        assert_eq!(v + w, vec3(-1.0, 3.0, -1.0));
        assert_eq!(v - w, vec3(3.0, 1.0, 1.0));
        assert_eq!(-v, vec3(-1.0, -2.0, -0.0));
        assert_eq!(v * 3.0, vec3(3.0, 6.0, 0.0));
        assert_eq!(2.0 * w, vec3(-4.0, 2.0, -2.0));
        assert_eq!(w / 2.0, vec3(-1.0, 0.5, -0.5));
    }

    #[test]
    fn dot_product() {
        let v: Vec3 = vec3(0.5, 0.5, 0.0);
        assert_eq!(v.dot(&vec3(-2.0, 2.0, 7.0)), 0.0);
        assert_eq!(v.dot(&vec3(-4.0, -4.0, 1.0)), -4.0);
    }

    #[test]
    fn cross_product() {
        assert_eq!(Vec3::<()>::X.cross(&Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::<()>::Z.cross(&Vec3::Y), -Vec3::X);
    }

    #[test]
    fn project_to_real_divides_by_w() {
        let v = ProjVec4::new([2.0, -4.0, 1.0, 2.0]);
        assert_eq!(v.project_to_real::<()>(), vec3(1.0, -2.0, 0.5));
    }

    #[test]
    fn cast_to_f32_slice() {
        let vs: [Vec3; 2] = [vec3(1.0, 2.0, 3.0), vec3(4.0, 5.0, 6.0)];
        let flat: &[f32] = bytemuck::cast_slice(&vs);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", vec3::<()>(1.0, -2.0, 3.0)),
            "Vec<R3<()>>[1.0, -2.0, 3.0]"
        );
    }
}
