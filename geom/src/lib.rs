//! Geodesic sphere generation for `geosphere`.
//!
//! The sphere is approximated by recursively [subdividing][solids::subdivide]
//! the faces of a regular [icosahedron][solids::Icosahedron] and projecting
//! the new vertices onto the unit sphere.

#![no_std]

extern crate alloc;
extern crate core;
#[cfg(feature = "std")]
extern crate std;

pub mod solids;
