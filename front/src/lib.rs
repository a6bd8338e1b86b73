//! Frontends for running `geosphere` in a window, in the browser, or
//! headless.
//!
//! The [`soft`] backend renders on the CPU and is always available; the
//! native window frontend is behind the `minifb` feature, and the WebGL2
//! frontend behind `wasm`. Either takes its initial state from a
//! [`Config`][config::Config].

pub mod config;
pub mod error;
pub mod pnm;
pub mod soft;

#[cfg(feature = "minifb")]
pub mod minifb;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ConfigError, Error, Result};

/// Width and height of a window or buffer, in pixels.
pub type Dims = (u32, u32);

/// Common window and buffer sizes.
pub mod dims {
    use super::Dims;

    pub const SVGA_800_600: Dims = (800, 600);
}
