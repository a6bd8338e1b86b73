//! Frame-stepped rotation of the model.

use crate::math::{Angle, Mat4, rads, rotate_y};

use super::{Model, View, World, scene::SceneState};

/// Advances the rotation of the model once per frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneClock {
    /// Rotation per frame.
    pub step: Angle,
}

impl SceneClock {
    /// Returns a clock rotating by `step` per frame.
    pub const fn new(step: Angle) -> Self {
        Self { step }
    }

    /// Returns the model-to-view and normal transforms for this frame.
    ///
    /// If auto-rotation is enabled in `scene`, advances the rotation by one
    /// step and rotates the model about its y-axis before `view` is applied:
    /// ```text
    /// final_view = view · rotate_y(rotation)
    /// ```
    /// Otherwise, `final_view` equals `view` and the rotation is left as is.
    /// The normal transform is always derived from `final_view`.
    pub fn tick(
        &self,
        scene: &mut SceneState,
        view: &Mat4<World, View>,
    ) -> (Mat4<Model, View>, Mat4<Model, View>) {
        let final_view = if scene.auto_rotate {
            scene.rotation = (scene.rotation + self.step).wrap_full();
            let model: Mat4<Model, World> = rotate_y(scene.rotation).to();
            view.compose(&model)
        } else {
            view.to()
        };
        (final_view, final_view.normal_matrix())
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new(rads(0.01))
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_approx_eq;
    use crate::math::{Vec3, degs, translate, vec3};

    use super::*;

    fn view() -> Mat4<World, View> {
        translate(vec3(0.0, 0.0, -5.0)).to()
    }

    #[test]
    fn advances_only_when_rotating() {
        let clock = SceneClock::default();
        let mut scene = SceneState { auto_rotate: true, ..Default::default() };

        clock.tick(&mut scene, &view());
        clock.tick(&mut scene, &view());
        assert_approx_eq!(scene.rotation(), rads(0.02));

        let rot: Mat4<Model, World> = rotate_y(rads(0.03)).to();
        let (mv, _) = clock.tick(&mut scene, &view());
        assert_approx_eq!(mv, view().compose(&rot));

        scene.auto_rotate = false;
        let (mv, _) = clock.tick(&mut scene, &view());
        assert_approx_eq!(scene.rotation(), rads(0.03));
        assert_eq!(mv, view().to());
    }

    #[test]
    fn without_rotation_view_is_unchanged() {
        let clock = SceneClock::default();
        let mut scene = SceneState { auto_rotate: false, ..Default::default() };
        let (mv, _) = clock.tick(&mut scene, &view());
        assert_eq!(mv, view().to());
        assert_eq!(scene.rotation(), Angle::ZERO);
    }

    #[test]
    fn rotation_is_applied_in_model_space() {
        let clock = SceneClock::new(degs(90.0));
        let mut scene = SceneState { auto_rotate: true, ..Default::default() };
        let (mv, normal) = clock.tick(&mut scene, &view());

        // Model x-axis is rotated to -z, then translated
        assert_approx_eq!(mv.apply(&Vec3::X), vec3(0.0, 0.0, -6.0), eps = 1e-6);
        // Normals rotate but don't translate
        assert_approx_eq!(normal.apply_linear(&Vec3::X), -Vec3::Z, eps = 1e-6);
    }

    #[test]
    fn rotation_wraps_around() {
        let clock = SceneClock::new(degs(100.0));
        let mut scene = SceneState { auto_rotate: true, ..Default::default() };
        for _ in 0..4 {
            clock.tick(&mut scene, &view());
        }
        assert_approx_eq!(scene.rotation(), degs(40.0), eps = 1e-5);
    }
}
