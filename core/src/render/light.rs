//! Light sources and the lighting model.

use core::fmt::{self, Debug, Formatter};

use crate::math::{Color3f, Mat4, Vec3, gray, vec3};

/// Coefficients of the ambient + diffuse lighting model.
///
/// The lighting of a surface point with normal **N**, lit from direction
/// **L** by a light of intensity *i*, is
/// ```text
/// (ambient + diffuse · max(N · L, 0)) · i
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shading {
    /// Fraction of light reaching every surface regardless of facing.
    pub ambient: f32,
    /// Weight of the Lambertian term.
    pub diffuse: f32,
}

/// A light source radiating omnidirectionally from a single point.
#[derive(Copy, Clone, PartialEq)]
pub struct PointLight<B> {
    /// Position of the light in basis `B`.
    pub pos: Vec3<B>,
    /// Intensity of the light, in [0, 1].
    pub intensity: f32,
}

impl Shading {
    /// Returns the scalar lighting of a point with surface normal `normal`,
    /// lit from the direction `to_light` by a light of the given intensity.
    ///
    /// `normal` need not be normalized; `to_light` must be. A zero normal
    /// receives ambient light only.
    pub fn lighting<B>(
        &self,
        normal: Vec3<B>,
        to_light: Vec3<B>,
        intensity: f32,
    ) -> f32 {
        let len = normal.len();
        let lambert = if len > 0.0 {
            (normal.dot(&to_light) / len).max(0.0)
        } else {
            0.0
        };
        (self.ambient + self.diffuse * lambert) * intensity
    }

    /// Returns the gray color of a point at `pos` with surface normal
    /// `normal`, lit by `light`.
    pub fn shade<B>(
        &self,
        pos: Vec3<B>,
        normal: Vec3<B>,
        light: &PointLight<B>,
    ) -> Color3f {
        let l = light.direction(pos);
        gray(self.lighting(normal, l, light.intensity))
    }
}

impl Default for Shading {
    fn default() -> Self {
        Self { ambient: 0.2, diffuse: 0.8 }
    }
}

impl<B> PointLight<B> {
    /// Returns a light at `pos` with the given intensity.
    pub const fn new(pos: Vec3<B>, intensity: f32) -> Self {
        Self { pos, intensity }
    }

    /// Returns the unit direction from `pt` towards `self`.
    ///
    /// Returns the zero vector if `pt` coincides with the light.
    pub fn direction(&self, pt: Vec3<B>) -> Vec3<B> {
        let d = self.pos - pt;
        let len = d.len();
        if len > 0.0 { d / len } else { vec3(0.0, 0.0, 0.0) }
    }

    /// Returns `self` transformed into basis `C`.
    pub fn transform<C>(&self, m: &Mat4<B, C>) -> PointLight<C> {
        PointLight::new(m.apply(&self.pos), self.intensity)
    }
}

impl<B: Debug + Default> Debug for PointLight<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointLight")
            .field("pos", &self.pos)
            .field("intensity", &self.intensity)
            .finish()
    }
}
