//! Cameras and camera transforms.

use core::f32::consts::{PI, TAU};
use core::ops::{Range, RangeInclusive};

use crate::math::{
    Angle, Mat4, ProjMat4, Vec3, look_at, perspective, rads, spherical, vec3,
};

use super::{View, World};

/// Parameters of an orbiting camera.
///
/// The camera is positioned on a sphere around its target: `theta` is the
/// azimuth measured in the xy-plane from the x-axis, `phi` the polar angle
/// measured from the z-axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CameraParams {
    /// Distance from the target, in [`RADIUS`][Self::RADIUS].
    pub radius: f32,
    /// Horizontal angle, in [`THETA`][Self::THETA].
    pub theta: Angle,
    /// Vertical angle, in [`PHI`][Self::PHI].
    pub phi: Angle,
}

/// Orbiting camera transform.
///
/// Keeps the camera pointed at a **world-space** target point from a
/// position given by [`CameraParams`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Orbit {
    /// The point the camera looks at.
    pub target: Vec3<World>,
    /// The direction considered "up" in the rendered image.
    pub up: Vec3<World>,
    /// The up direction used when the view direction is parallel to `up`.
    pub fallback_up: Vec3<World>,
}

/// Perspective projection parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    /// Vertical angle of view.
    pub fov: Angle,
    /// Distances of the near and far clipping planes.
    pub near_far: Range<f32>,
}

impl CameraParams {
    /// Valid range of `radius`.
    pub const RADIUS: RangeInclusive<f32> = 2.0..=10.0;
    /// Valid range of `theta`, in radians.
    pub const THETA: RangeInclusive<f32> = 0.0..=TAU;
    /// Valid range of `phi`, in radians.
    pub const PHI: RangeInclusive<f32> = 0.0..=PI;

    /// Returns the position of the camera relative to its target.
    ///
    /// ```text
    /// eye = radius · (sin φ cos θ, sin φ sin θ, cos φ)
    /// ```
    pub fn eye(&self) -> Vec3<World> {
        spherical(self.radius, self.theta, self.phi).to_cart()
    }

    /// Returns whether all parameters are within their valid ranges.
    pub fn is_valid(&self) -> bool {
        Self::RADIUS.contains(&self.radius)
            && Self::THETA.contains(&self.theta.to_rads())
            && Self::PHI.contains(&self.phi.to_rads())
    }
}

impl Default for CameraParams {
    /// Returns a camera at distance 5 on the positive x-axis.
    fn default() -> Self {
        Self {
            radius: 5.0,
            theta: Angle::ZERO,
            phi: rads(PI / 2.0),
        }
    }
}

impl Orbit {
    /// Squared sine of the smallest angle between the view direction and
    /// `up` before `fallback_up` is used instead.
    const PARALLEL_EPS: f32 = 1e-8;

    /// Returns the world-to-view transform for a camera at `params`.
    ///
    /// Always returns a finite matrix for finite parameters with a
    /// positive radius, even at the poles of the orbit.
    pub fn view(&self, params: &CameraParams) -> Mat4<World, View> {
        let eye = self.target + params.eye();
        let fwd = (self.target - eye).normalize();
        let up = if fwd.cross(&self.up).len_sqr() < Self::PARALLEL_EPS {
            log::trace!("view direction parallel to up, using fallback");
            self.fallback_up
        } else {
            self.up
        };
        look_at(eye, self.target, up)
    }

    /// Returns the world-to-view transform for a camera at `params`, and
    /// the matching transform for surface normals.
    pub fn compute_view(
        &self,
        params: &CameraParams,
    ) -> (Mat4<World, View>, Mat4<World, View>) {
        let view = self.view(params);
        (view, view.normal_matrix())
    }
}

impl Default for Orbit {
    /// Returns an orbit around the origin with the y-axis up.
    fn default() -> Self {
        Self {
            target: Vec3::zero(),
            up: Vec3::Y,
            fallback_up: vec3(0.0, 0.0, -1.0),
        }
    }
}

impl Projection {
    /// Returns the projection matrix for a viewport with the given
    /// width-to-height ratio.
    pub fn matrix(&self, aspect: f32) -> ProjMat4<View> {
        perspective(self.fov, aspect, self.near_far.clone())
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov: crate::math::degs(45.0),
            near_far: 0.1..100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts::FRAC_PI_2;

    use crate::assert_approx_eq;
    use crate::math::{degs, turns};

    use super::*;

    fn params(radius: f32, theta: f32, phi: f32) -> CameraParams {
        CameraParams {
            radius,
            theta: rads(theta),
            phi: rads(phi),
        }
    }

    #[test]
    fn eye_on_equator() {
        let eye = params(5.0, 0.0, FRAC_PI_2).eye();
        assert_approx_eq!(eye, vec3(5.0, 0.0, 0.0), eps = 1e-6);
    }

    #[test]
    fn eye_at_pole_ignores_theta() {
        for theta in [0.0, 1.0, 3.0, 6.2] {
            let eye = params(4.0, theta, 0.0).eye();
            assert_approx_eq!(eye, vec3(0.0, 0.0, 4.0), eps = 1e-6);
        }
    }

    #[test]
    fn view_puts_target_straight_ahead() {
        let orbit = Orbit::default();
        for p in [
            params(5.0, 0.0, FRAC_PI_2),
            params(2.0, 1.2, 0.7),
            params(10.0, 4.0, 2.9),
        ] {
            let view = orbit.view(&p);
            let t = view.apply(&Vec3::zero());
            assert_approx_eq!(t, vec3(0.0, 0.0, -p.radius), eps = 1e-5);
        }
    }

    #[test]
    fn view_is_finite_at_poles() {
        let orbit = Orbit::default();
        for p in [
            params(5.0, 0.0, 0.0),
            params(5.0, 2.0, PI),
            // Looking straight down the y-axis
            params(5.0, FRAC_PI_2, FRAC_PI_2),
            params(3.0, 3.0 * FRAC_PI_2, FRAC_PI_2),
        ] {
            let (view, normal) = orbit.compute_view(&p);
            assert!(view.0.iter().flatten().all(|e| e.is_finite()), "{p:?}");
            assert!(normal.0.iter().flatten().all(|e| e.is_finite()));
            let t = view.apply(&Vec3::zero());
            assert_approx_eq!(t, vec3(0.0, 0.0, -p.radius), eps = 1e-5);
        }
    }

    #[test]
    fn pole_fallback_is_deterministic() {
        let orbit = Orbit::default();
        let p = params(5.0, FRAC_PI_2, FRAC_PI_2);
        assert_eq!(orbit.view(&p), orbit.view(&p));
        // The fallback up maps to view-space up
        let up = orbit.view(&p).apply_linear(&vec3(0.0, 0.0, -1.0));
        assert_approx_eq!(up, Vec3::Y, eps = 1e-6);
    }

    #[test]
    fn normal_matrix_of_view_is_rotation_part() {
        let (view, normal) = Orbit::default().compute_view(&params(3.0, 0.5, 1.0));
        let n = vec3(0.3, -0.2, 0.9);
        assert_approx_eq!(view.apply_linear(&n), normal.apply_linear(&n), eps = 1e-5);
    }

    #[test]
    fn param_validity() {
        assert!(CameraParams::default().is_valid());
        assert!(params(2.0, 0.0, 0.0).is_valid());
        assert!(!params(1.9, 0.0, 0.0).is_valid());
        assert!(!CameraParams { theta: turns(1.5), ..Default::default() }.is_valid());
        assert!(!CameraParams { phi: degs(-1.0), ..Default::default() }.is_valid());
    }

    #[test]
    fn projection_depends_on_aspect() {
        let proj = Projection::default();
        let wide = proj.matrix(2.0);
        let square = proj.matrix(1.0);
        assert_approx_eq!(wide.0[0][0] * 2.0, square.0[0][0]);
        assert_eq!(wide.0[1][1], square.0[1][1]);
    }
}
