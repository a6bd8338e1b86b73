//! User-controllable scene state and the events that change it.

use alloc::collections::VecDeque;
use core::ops::RangeInclusive;

use crate::math::{Angle, rads};

use super::cam::CameraParams;

/// Everything the user can change about the rendered scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct State {
    pub camera: CameraParams,
    pub scene: SceneState,
}

/// Scene parameters other than the camera.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneState {
    /// Subdivision level of the sphere, in [`LEVELS`][Self::LEVELS].
    pub level: u32,
    /// Light intensity, in [0, 1].
    pub light_intensity: f32,
    /// Whether to draw triangle outlines instead of filled triangles.
    pub wireframe: bool,
    /// Whether the sphere spins about the y-axis.
    pub auto_rotate: bool,
    // Advanced only by the scene clock
    pub(crate) rotation: Angle,
}

/// A change to the [`State`], usually triggered by user input.
///
/// Values outside their valid range are clamped when applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Control {
    /// Sets the camera distance.
    Distance(f32),
    /// Sets the horizontal camera angle.
    Azimuth(Angle),
    /// Sets the vertical camera angle.
    Polar(Angle),
    /// Sets the subdivision level.
    Level(u32),
    /// Sets the light intensity.
    LightIntensity(f32),
    /// Moves the camera by the given angles. The azimuth wraps around.
    Orbit { az: Angle, pol: Angle },
    /// Changes the camera distance by the given amount.
    Zoom(f32),
    /// Changes the light intensity by the given amount.
    AdjustLight(f32),
    /// Starts or stops the rotation of the sphere.
    ToggleRotation,
    /// Switches between filled and wireframe drawing.
    ToggleWireframe,
}

/// A first-in first-out queue of pending [`Control`]s.
///
/// Input handlers push controls as they arrive; the pipeline applies them
/// all at the start of the next frame.
#[derive(Clone, Debug, Default)]
pub struct Controls(VecDeque<Control>);

impl SceneState {
    /// Valid range of `level`.
    pub const LEVELS: RangeInclusive<u32> = 1..=5;
    /// Valid range of `light_intensity`.
    pub const INTENSITY: RangeInclusive<f32> = 0.0..=1.0;

    /// Returns the current rotation angle of the sphere.
    ///
    /// The angle accumulates by one clock step per frame while rotating,
    /// but is kept wrapped to [0, 2π); a full turn renders identically to
    /// no turn at all.
    #[inline]
    pub fn rotation(&self) -> Angle {
        self.rotation
    }
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            level: 3,
            light_intensity: 1.0,
            wireframe: false,
            auto_rotate: true,
            rotation: Angle::ZERO,
        }
    }
}

impl Control {
    /// Applies `self` to `st`.
    pub fn apply(self, st: &mut State) {
        use Control::*;
        let State { camera: cam, scene } = st;
        match self {
            Distance(r) => {
                cam.radius = clamp("distance", r, CameraParams::RADIUS);
            }
            Azimuth(a) => {
                let a = clamp("azimuth", a.to_rads(), CameraParams::THETA);
                cam.theta = rads(a);
            }
            Polar(a) => {
                let a = clamp("polar angle", a.to_rads(), CameraParams::PHI);
                cam.phi = rads(a);
            }
            Level(l) => {
                let (min, max) = SceneState::LEVELS.into_inner();
                if !(min..=max).contains(&l) {
                    log::warn!("level {l} clamped to {min}..={max}");
                }
                scene.level = l.clamp(min, max);
            }
            LightIntensity(i) => {
                scene.light_intensity =
                    clamp("light intensity", i, SceneState::INTENSITY);
            }
            Orbit { az, pol } => {
                cam.theta = (cam.theta + az).wrap_full();
                let (min, max) = CameraParams::PHI.into_inner();
                cam.phi = (cam.phi + pol).clamp(rads(min), rads(max));
            }
            Zoom(d) => {
                let (min, max) = CameraParams::RADIUS.into_inner();
                cam.radius = (cam.radius + d).clamp(min, max);
            }
            AdjustLight(d) => {
                let (min, max) = SceneState::INTENSITY.into_inner();
                scene.light_intensity =
                    (scene.light_intensity + d).clamp(min, max);
            }
            ToggleRotation => scene.auto_rotate = !scene.auto_rotate,
            ToggleWireframe => scene.wireframe = !scene.wireframe,
        }
    }
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a control to be applied later.
    pub fn push(&mut self, ctl: Control) {
        self.0.push_back(ctl);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Applies all queued controls to `st` in the order they were pushed,
    /// leaving the queue empty.
    ///
    /// Returns the number of controls applied.
    pub fn apply(&mut self, st: &mut State) -> usize {
        let n = self.0.len();
        for ctl in self.0.drain(..) {
            log::trace!("applying {ctl:?}");
            ctl.apply(st);
        }
        n
    }
}

impl Extend<Control> for Controls {
    fn extend<I: IntoIterator<Item = Control>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

fn clamp(what: &str, val: f32, range: RangeInclusive<f32>) -> f32 {
    let (min, max) = range.into_inner();
    let res = val.clamp(min, max);
    if res != val {
        log::warn!("{what} {val} clamped to {min}..={max}");
    }
    res
}
