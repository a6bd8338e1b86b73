//! Core functionality of the `geosphere` project.
//!
//! Includes a small, strongly typed math library with vectors, matrices,
//! and angles; flat-shaded triangle meshes; and the per-frame rendering
//! pipeline that drives an orbiting camera and a single point light over
//! a [`Backend`][render::Backend] supplied by the caller.
//!
//! # Crate features
//!
//! * `std`:
//!   Uses the floating-point functions of `std` and enables `std` support
//!   in the `log` and `thiserror` dependencies. Enabled by default.
//!
//! * `libm`:
//!   Provides software implementations of floating-point functions via the
//!   [libm](https://crates.io/crates/libm) crate, for `no_std` targets.
//!
//! One of the two features must be enabled. Without `std`, the crate only
//! depends on `alloc`.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;
extern crate core;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("either the `std` or the `libm` feature must be enabled");

pub mod geom;
pub mod math;
pub mod render;

pub mod prelude {
    pub use crate::math::{
        Angle, ApproxEq, Color3f, Mat4, ProjMat4, Vec3, degs, gray, rads,
        rotate_y, translate, turns, vec3,
    };

    pub use crate::geom::{Mesh, MeshBuffer, Normal3, Tri, tri};

    pub use crate::render::{
        Backend, Model, Pipeline, Primitive, Settings, Uniforms, View, World,
        cam::{CameraParams, Orbit, Projection},
        clock::SceneClock,
        light::{PointLight, Shading},
        scene::{Control, Controls, SceneState, State},
    };
}
