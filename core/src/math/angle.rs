//! Angular quantities and spherical coordinate vectors.

use core::f32::consts::{PI, TAU};
use core::fmt::{self, Debug, Display, Formatter};
use core::marker::PhantomData;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use super::{
    approx::ApproxEq,
    float,
    vec::{Vec3, Vector, vec3},
};

//
// Types
//

/// A scalar angular quantity.
///
/// Prevents confusion between degrees and radians by requiring the use of
/// one of the named constructors to create an `Angle`, as well as one of
/// the named getter methods to obtain the angle as a raw `f32` value.
#[derive(Copy, Clone, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Angle(f32);

/// Tag type for a spherical coordinate space whose Cartesian counterpart
/// has basis `B`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Spherical<B>(PhantomData<B>);

/// A spherical coordinate vector, with radius, azimuth, and polar angle
/// components.
///
/// The azimuth θ is measured in the xy-plane from the positive x-axis
/// towards the positive y-axis. The polar angle φ is measured from the
/// positive z-axis, so that φ = 0 is the "north pole" and φ = π the
/// "south pole".
pub type SphericalVec<B = ()> = Vector<[f32; 3], Spherical<B>>;

//
// Free fns and consts
//

const RADS_PER_DEG: f32 = PI / 180.0;
const RADS_PER_TURN: f32 = TAU;

/// Returns an angle of `a` radians.
pub const fn rads(a: f32) -> Angle {
    Angle(a)
}

/// Returns an angle of `a` degrees.
pub const fn degs(a: f32) -> Angle {
    Angle(a * RADS_PER_DEG)
}

/// Returns an angle of `a` turns.
pub const fn turns(a: f32) -> Angle {
    Angle(a * RADS_PER_TURN)
}

/// Returns a spherical coordinate vector with radius `r`, azimuth `az`,
/// and polar angle `pol`.
pub const fn spherical<B>(r: f32, az: Angle, pol: Angle) -> SphericalVec<B> {
    Vector::new([r, az.0, pol.0])
}

//
// Inherent impls
//

impl Angle {
    /// A zero angle.
    pub const ZERO: Self = Self(0.0);

    /// Returns the value of `self` in radians.
    #[inline]
    pub const fn to_rads(self) -> f32 {
        self.0
    }
    /// Returns the value of `self` in degrees.
    #[inline]
    pub const fn to_degs(self) -> f32 {
        self.0 / RADS_PER_DEG
    }
    /// Returns the value of `self` in turns.
    #[inline]
    pub const fn to_turns(self) -> f32 {
        self.0 / RADS_PER_TURN
    }

    /// Returns the sine of `self`.
    #[inline]
    pub fn sin(self) -> f32 {
        float::sin(self.0)
    }
    /// Returns the cosine of `self`.
    #[inline]
    pub fn cos(self) -> f32 {
        float::cos(self.0)
    }
    /// Returns the tangent of `self`.
    #[inline]
    pub fn tan(self) -> f32 {
        float::tan(self.0)
    }

    /// Returns `self` clamped to the range `min..=max`.
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0))
    }

    /// Returns `self` wrapped to the range `[0, 2π)`.
    ///
    /// # Examples
    /// ```
    /// # use geosphere_core::math::angle::*;
    /// assert_eq!(degs(-90.0).wrap_full(), degs(270.0));
    /// ```
    #[inline]
    pub fn wrap_full(self) -> Self {
        Self(float::rem_euclid(self.0, TAU))
    }
}

impl<B> SphericalVec<B> {
    /// Returns the radial component of `self`.
    #[inline]
    pub fn r(&self) -> f32 {
        self.0[0]
    }
    /// Returns the azimuthal component of `self`.
    #[inline]
    pub fn az(&self) -> Angle {
        rads(self.0[1])
    }
    /// Returns the polar component of `self`.
    #[inline]
    pub fn pol(&self) -> Angle {
        rads(self.0[2])
    }

    /// Returns the Cartesian equivalent of `self`.
    ///
    /// ```text
    /// x = r · sin φ · cos θ
    /// y = r · sin φ · sin θ
    /// z = r · cos φ
    /// ```
    pub fn to_cart(&self) -> Vec3<B> {
        let (az, pol) = (self.az(), self.pol());
        let sin_pol = pol.sin();
        vec3(sin_pol * az.cos(), sin_pol * az.sin(), pol.cos()) * self.r()
    }
}

//
// Local trait impls
//

impl ApproxEq<Self, f32> for Angle {
    fn approx_eq_eps(&self, other: &Self, eps: &f32) -> bool {
        self.0.approx_eq_eps(&other.0, eps)
    }
    fn relative_epsilon() -> f32 {
        f32::relative_epsilon()
    }
}

//
// Foreign trait impls
//

impl Debug for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.to_degs())
    }
}

impl Display for Angle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_degs(), f)?;
        f.write_str("°")
    }
}

impl Add for Angle {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Angle {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f32> for Angle {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<f32> for Angle {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::{FRAC_PI_2, PI};

    use crate::assert_approx_eq;

    use super::*;

    #[test]
    fn units() {
        assert_approx_eq!(degs(180.0).to_rads(), PI);
        assert_approx_eq!(turns(0.25).to_degs(), 90.0);
        assert_approx_eq!(rads(PI).to_turns(), 0.5);
    }

    #[test]
    fn trig() {
        assert_approx_eq!(degs(90.0).sin(), 1.0);
        assert_approx_eq!(degs(60.0).cos(), 0.5);
        assert_approx_eq!(degs(45.0).tan(), 1.0);
    }

    #[test]
    fn wrap_and_clamp() {
        assert_approx_eq!(degs(370.0).wrap_full(), degs(10.0), eps = 1e-5);
        assert_eq!(degs(200.0).clamp(degs(0.0), degs(180.0)), degs(180.0));
    }

    #[test]
    fn spherical_to_cart_on_equator() {
        let v: Vec3 = spherical(5.0, rads(0.0), rads(FRAC_PI_2)).to_cart();
        assert_approx_eq!(v, vec3(5.0, 0.0, 0.0), eps = 1e-6);

        let v: Vec3 = spherical(2.0, rads(FRAC_PI_2), rads(FRAC_PI_2)).to_cart();
        assert_approx_eq!(v, vec3(0.0, 2.0, 0.0), eps = 1e-6);
    }

    #[test]
    fn spherical_to_cart_at_poles_ignores_azimuth() {
        for az in [0.0, 1.0, 2.5, 6.0] {
            let n: Vec3 = spherical(3.0, rads(az), rads(0.0)).to_cart();
            assert_approx_eq!(n, vec3(0.0, 0.0, 3.0), eps = 1e-6);
            let s: Vec3 = spherical(3.0, rads(az), rads(PI)).to_cart();
            assert_approx_eq!(s, vec3(0.0, 0.0, -3.0), eps = 1e-6);
        }
    }
}
