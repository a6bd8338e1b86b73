//! Error types of the frontends.

use std::{io, path::PathBuf};

use gs::render;

/// Error loading or validating a [`Config`][crate::config::Config].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Error starting or running a frontend.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Render(#[from] render::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("window error: {0}")]
    Window(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T = (), E = Error> = core::result::Result<T, E>;

#[cfg(feature = "minifb")]
impl From<minifb::Error> for Error {
    fn from(e: minifb::Error) -> Self {
        Self::Window(e.to_string())
    }
}
