//! TOML configuration of the frontends.
//!
//! Every section and field is optional; missing values take their
//! defaults, which match the defaults of the core types.
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//!
//! [camera]
//! radius = 5.0
//! phi = 1.2
//!
//! [scene]
//! level = 4
//! wireframe = true
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use gs::math::{degs, rads, vec3};
use gs::render::{
    Settings,
    cam::{CameraParams, Orbit, Projection},
    clock::SceneClock,
    light::Shading,
    scene::{SceneState, State},
};

use crate::{Dims, dims::SVGA_800_600};
use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub render: RenderConfig,
}

/// The `[window]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Frame rate cap; 0 means unlimited.
    pub target_fps: u32,
}

/// The `[camera]` section. Angles are in radians, except the field of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

/// The `[scene]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub level: u32,
    pub light_intensity: f32,
    pub wireframe: bool,
    pub auto_rotate: bool,
}

/// The `[render]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Rotation of the sphere per frame, in radians.
    pub rotation_step: f32,
    /// Light position in view space.
    pub light_position: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        let (width, height) = SVGA_800_600;
        Self {
            width,
            height,
            title: "geosphere".into(),
            target_fps: 60,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        let cam = CameraParams::default();
        let proj = Projection::default();
        Self {
            radius: cam.radius,
            theta: cam.theta.to_rads(),
            phi: cam.phi.to_rads(),
            fov_degrees: proj.fov.to_degs(),
            near: proj.near_far.start,
            far: proj.near_far.end,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let sc = SceneState::default();
        Self {
            level: sc.level,
            light_intensity: sc.light_intensity,
            wireframe: sc.wireframe,
            auto_rotate: sc.auto_rotate,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let s = Settings::default();
        Self {
            rotation_step: s.clock.step.to_rads(),
            light_position: s.light_pos.0,
            ambient: s.shading.ambient,
            diffuse: s.shading.diffuse,
        }
    }
}

impl Config {
    /// Loads and validates the configuration in the TOML file at `path`.
    ///
    /// # Errors
    /// If the file does not exist or cannot be read, is not valid TOML,
    /// or contains out-of-range values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|e| {
            ConfigError::Parse(format!("{}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all values are within their valid ranges.
    ///
    /// # Errors
    /// Returns [`ConfigError::Validation`] listing every offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let Self { window, camera, scene, render } = self;

        if window.width == 0 || window.height == 0 {
            errors.push(format!(
                "window size must be nonzero, got {}x{}",
                window.width, window.height
            ));
        }
        validate_range(&mut errors, "camera.radius", camera.radius, CameraParams::RADIUS);
        validate_range(&mut errors, "camera.theta", camera.theta, CameraParams::THETA);
        validate_range(&mut errors, "camera.phi", camera.phi, CameraParams::PHI);
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            errors.push(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                camera.fov_degrees
            ));
        }
        if !(0.0 < camera.near && camera.near < camera.far) {
            errors.push(format!(
                "camera.near and camera.far must satisfy 0 < near < far, got {} and {}",
                camera.near, camera.far
            ));
        }
        let (min, max) = SceneState::LEVELS.into_inner();
        if !(min..=max).contains(&scene.level) {
            errors.push(format!(
                "scene.level must be in {min}..={max}, got {}",
                scene.level
            ));
        }
        validate_range(
            &mut errors,
            "scene.light_intensity",
            scene.light_intensity,
            SceneState::INTENSITY,
        );
        if !render.rotation_step.is_finite() {
            errors.push("render.rotation_step must be finite".into());
        }
        if !render.light_position.iter().all(|c| c.is_finite()) {
            errors.push("render.light_position must be finite".into());
        }
        validate_range(&mut errors, "render.ambient", render.ambient, 0.0..=1.0);
        validate_range(&mut errors, "render.diffuse", render.diffuse, 0.0..=1.0);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }

    /// Returns the window width and height.
    pub fn dims(&self) -> Dims {
        (self.window.width, self.window.height)
    }

    /// Returns the frame rate cap, or `None` if unlimited.
    pub fn target_fps(&self) -> Option<u32> {
        Some(self.window.target_fps).filter(|&fps| fps > 0)
    }

    /// Converts `self` into the initial scene state and pipeline settings.
    pub fn into_parts(self) -> (State, Settings) {
        let Self { camera, scene: sc, render, .. } = self;

        let mut scene = SceneState::default();
        scene.level = sc.level;
        scene.light_intensity = sc.light_intensity;
        scene.wireframe = sc.wireframe;
        scene.auto_rotate = sc.auto_rotate;

        let state = State {
            camera: CameraParams {
                radius: camera.radius,
                theta: rads(camera.theta),
                phi: rads(camera.phi),
            },
            scene,
        };
        let [x, y, z] = render.light_position;
        let settings = Settings {
            clock: SceneClock::new(rads(render.rotation_step)),
            orbit: Orbit::default(),
            projection: Projection {
                fov: degs(camera.fov_degrees),
                near_far: camera.near..camera.far,
            },
            shading: Shading {
                ambient: render.ambient,
                diffuse: render.diffuse,
            },
            light_pos: vec3(x, y, z),
        };
        (state, settings)
    }
}

fn validate_range(
    errors: &mut Vec<String>,
    name: &str,
    value: f32,
    range: std::ops::RangeInclusive<f32>,
) {
    if !range.contains(&value) {
        errors.push(format!(
            "{name} must be in {}..={}, got {value}",
            range.start(),
            range.end()
        ));
    }
}
