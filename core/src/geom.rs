//! Basic geometric primitives.

use crate::math::{Vec3, vec3};
use crate::render::Model;

pub use mesh::{Mesh, MeshBuffer};

pub mod mesh;

/// Triangle, defined by three vertices.
///
/// The order of the vertices determines the *winding* of the triangle,
/// and thus which of its two sides faces "outward".
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub struct Tri<V>(pub [V; 3]);

/// A surface normal in 3D.
pub type Normal3<B = Model> = Vec3<B>;

/// Creates a `Tri` with the given vertices.
#[inline]
pub const fn tri<V>(a: V, b: V, c: V) -> Tri<V> {
    Tri([a, b, c])
}

impl<B> Tri<Vec3<B>> {
    /// Returns the unit normal of `self`.
    ///
    /// The normal points towards the side from which the vertices appear
    /// in counter-clockwise order:
    /// ```text
    /// n = normalize((v2 - v1) × (v3 - v1))
    /// ```
    /// # Examples
    /// ```
    /// use geosphere_core::geom::tri;
    /// use geosphere_core::math::{Vec3, vec3};
    ///
    /// let t = tri::<Vec3>(Vec3::zero(), Vec3::X, Vec3::Y);
    /// assert_eq!(t.normal(), Vec3::Z);
    /// ```
    ///
    /// The result is non-finite if `self` is degenerate, that is, if its
    /// vertices are collinear.
    pub fn normal(&self) -> Normal3<B> {
        let [a, b, c] = self.0;
        (b - a).cross(&(c - a)).normalize()
    }

    /// Returns the centroid, or the average of the vertices, of `self`.
    pub fn centroid(&self) -> Vec3<B> {
        let [a, b, c] = self.0;
        let [x, y, z] = [0, 1, 2].map(|i| (a[i] + b[i] + c[i]) / 3.0);
        vec3(x, y, z)
    }

    /// Returns whether `self` faces away from the origin.
    ///
    /// A triangle on a closed surface around the origin faces away from
    /// the origin exactly when its normal points outward.
    pub fn faces_outward(&self) -> bool {
        self.normal().dot(&self.centroid()) > 0.0
    }
}
