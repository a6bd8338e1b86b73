//! Output of color buffers as binary PPM (P6) images.
//!
//! PPM is one of the NetPBM formats: a short textual header followed by
//! raw 8-bit RGB triplets, one per pixel, in row-major order.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::Dims;

/// Writes `pixels`, in `0x00_RR_GG_BB` format, as a binary PPM image.
///
/// # Errors
/// If writing to `out` fails, or if `pixels` does not contain exactly
/// `dims.0 * dims.1` pixels.
pub fn write_ppm(mut out: impl Write, dims: Dims, pixels: &[u32]) -> io::Result<()> {
    let (w, h) = dims;
    if pixels.len() != w as usize * h as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("expected {w}x{h} pixels, got {}", pixels.len()),
        ));
    }
    write!(out, "P6 {w} {h} 255\n")?;
    let bytes: Vec<u8> = pixels
        .iter()
        .flat_map(|p| {
            let [_, r, g, b] = p.to_be_bytes();
            [r, g, b]
        })
        .collect();
    out.write_all(&bytes)?;
    out.flush()
}

/// Saves `pixels` as a binary PPM image to the file at `path`.
///
/// Overwrites the file if it exists.
pub fn save_ppm(path: impl AsRef<Path>, dims: Dims, pixels: &[u32]) -> io::Result<()> {
    let path = path.as_ref();
    let out = BufWriter::new(File::create(path)?);
    write_ppm(out, dims, pixels)?;
    log::info!("saved {}x{} image to {}", dims.0, dims.1, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_pixels() {
        let mut out = Vec::new();
        write_ppm(&mut out, (2, 1), &[0x00_12_34_56, 0xFF_FF_00_80]).unwrap();
        assert_eq!(out, b"P6 2 1 255\n\x12\x34\x56\xFF\x00\x80");
    }

    #[test]
    fn wrong_pixel_count_is_error() {
        let mut out = Vec::new();
        let err = write_ppm(&mut out, (2, 2), &[0; 3]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(out.is_empty());
    }
}
