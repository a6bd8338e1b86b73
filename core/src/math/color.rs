//! Colors in the linear RGB space.

use core::fmt::{self, Debug, Formatter};

use super::vec::Vector;

/// Tag type for the RGB color space.
#[derive(Copy, Clone, Default, Eq, PartialEq)]
pub struct Rgb;

/// An RGB color with `f32` channels, nominally in the range [0, 1].
pub type Color3f = Vector<[f32; 3], Rgb>;

/// Returns an RGB color with red, green, and blue channels.
#[inline]
pub const fn rgb(r: f32, g: f32, b: f32) -> Color3f {
    Vector::new([r, g, b])
}

/// Returns a gray color with all channels equal to `lum`.
///
/// # Examples
/// ```
/// use geosphere_core::math::color::{gray, rgb};
/// assert_eq!(gray(0.5), rgb(0.5, 0.5, 0.5));
/// ```
#[inline]
pub const fn gray(lum: f32) -> Color3f {
    rgb(lum, lum, lum)
}

impl Color3f {
    /// Returns `self` quantized to 8 bits per channel.
    ///
    /// Channels are clamped to [0, 1] before scaling to [0, 255].
    pub fn to_rgb8(&self) -> [u8; 3] {
        self.0.map(|c| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
    }

    /// Returns `self` packed as a `0x00_RR_GG_BB` word.
    pub fn to_xrgb8888(&self) -> u32 {
        let [r, g, b] = self.to_rgb8();
        u32::from_be_bytes([0, r, g, b])
    }
}

impl Debug for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("RGB")
    }
}
