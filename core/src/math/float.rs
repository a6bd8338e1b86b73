//! Floating-point compatibility API.
//!
//! Most floating-point functions are unavailable in `no_std`. This module
//! exposes the handful the crate needs as free functions, backed either by
//! `std` or, if only the `libm` feature is enabled, by the `libm` crate.

#[cfg(feature = "std")]
mod imp {
    #[inline]
    pub fn sqrt(x: f32) -> f32 {
        x.sqrt()
    }
    #[inline]
    pub fn sin(x: f32) -> f32 {
        x.sin()
    }
    #[inline]
    pub fn cos(x: f32) -> f32 {
        x.cos()
    }
    #[inline]
    pub fn tan(x: f32) -> f32 {
        x.tan()
    }
    #[inline]
    pub fn abs(x: f32) -> f32 {
        x.abs()
    }
    #[inline]
    pub fn rem_euclid(x: f32, m: f32) -> f32 {
        x.rem_euclid(m)
    }
}

#[cfg(all(feature = "libm", not(feature = "std")))]
mod imp {
    pub use libm::cosf as cos;
    pub use libm::fabsf as abs;
    pub use libm::sinf as sin;
    pub use libm::sqrtf as sqrt;
    pub use libm::tanf as tan;

    /// Returns the least non-negative remainder of `x` (mod `m`).
    #[inline]
    pub fn rem_euclid(x: f32, m: f32) -> f32 {
        let r = x % m;
        if r < 0.0 { r + abs(m) } else { r }
    }
}

pub use imp::*;
