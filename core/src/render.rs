//! Driving a camera and a light over a tessellated sphere, frame by frame.
//!
//! This module contains the per-frame [pipeline], the [orbiting camera][cam]
//! and [rotation clock][clock] that feed it, the [lighting model][light],
//! the user-controllable [scene] state, and the [`Backend`] trait through
//! which all drawing happens.

use alloc::string::String;
use core::fmt::{self, Display, Formatter};


pub use backend::{Backend, Primitive, Uniforms};
pub use pipeline::{Pipeline, Settings};
pub use stats::Stats;

pub mod backend;
pub mod cam;
pub mod clock;
pub mod light;
pub mod pipeline;
pub mod scene;
pub mod stats;

/// Model space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Model;

/// World space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct World;

/// View (camera) space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct View;

/// Screen space coordinate basis.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Screen;

/// Errors raised by a [`Backend`] while setting up or drawing a frame.
///
/// All of these are fatal when returned from [`Pipeline::init`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The graphics context could not be acquired.
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    /// A shader failed to compile.
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: Stage, log: String },
    /// The shader program failed to link.
    #[error("failed to link shader program: {0}")]
    ProgramLink(String),
    /// A GPU buffer could not be created or filled.
    #[error("buffer error: {0}")]
    Buffer(String),
    /// The finished frame could not be presented.
    #[error("failed to present frame: {0}")]
    Present(String),
}

/// A shader stage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
}

pub type Result<T = (), E = Error> = core::result::Result<T, E>;

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertex => "vertex",
            Self::Fragment => "fragment",
        })
    }
}
