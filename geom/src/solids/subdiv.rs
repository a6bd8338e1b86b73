//! Geodesic subdivision.

use alloc::vec::Vec;

use gs::geom::{Mesh, Tri, tri};
use gs::math::{Lerp, Vec3};
use gs::render::Model;

use super::{Build, Icosahedron};

/// Spherical mesh created by recursively subdividing an icosahedron.
///
/// Level 0 is the icosahedron itself; every level quadruples the number
/// of triangles, for a total of 20·4<sup>level</sup>.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Geosphere {
    pub level: u32,
}

impl Build for Geosphere {
    /// Builds the flat-shaded geodesic sphere mesh.
    fn build(self) -> Mesh {
        geosphere(self.level)
    }
}

/// Returns the number of triangles in a geodesic sphere of level `level`.
pub const fn tri_count(level: u32) -> usize {
    20 << (2 * level)
}

/// Returns the flat-shaded unit geodesic sphere of level `level`.
///
/// The triangles of each icosahedron face are emitted in face order,
/// each subdivided as by [`subdivide`].
pub fn geosphere(level: u32) -> Mesh {
    let mut mesh = Mesh::with_capacity(tri_count(level));
    for t in Icosahedron::tris() {
        subdivide(t, level, &mut mesh);
    }
    log::trace!("built geosphere of level {level}: {mesh:?}");
    mesh
}

/// Returns the triangles of the unit geodesic sphere of level `level`.
pub fn tessellate(level: u32) -> Vec<Tri<Vec3<Model>>> {
    let mut tris: Vec<Tri<Vec3<Model>>> =
        Vec::with_capacity(tri_count(level));
    for t in Icosahedron::tris() {
        subdivide(t, level, &mut tris);
    }
    tris
}

/// Recursively subdivides a triangle on the unit sphere, emitting the
/// resulting triangles into `out`.
///
/// If `depth` is zero, emits `t` unchanged. Otherwise, splits `t` into
/// four by adding a vertex at the midpoint of each edge, pushed outward
/// onto the unit sphere, and subdivides each of the four to `depth - 1`:
///
/// ```text
///              v1
///              /\
///             /  \
///        m31 /____\ m12
///           /\    /\
///          /  \  /  \
///         /____\/____\
///       v3     m23    v2
/// ```
/// The children are emitted in the order (v1, m12, m31), (v2, m23, m12),
/// (v3, m31, m23), (m12, m23, m31), all with the same winding as `t`.
pub fn subdivide<B, E>(t: Tri<Vec3<B>>, depth: u32, out: &mut E)
where
    E: Extend<Tri<Vec3<B>>>,
{
    if depth == 0 {
        out.extend([t]);
        return;
    }
    let [v1, v2, v3] = t.0;
    let mid = |a: Vec3<B>, b: Vec3<B>| a.midpoint(&b).normalize();
    let (m12, m23, m31) = (mid(v1, v2), mid(v2, v3), mid(v3, v1));

    for child in [
        tri(v1, m12, m31),
        tri(v2, m23, m12),
        tri(v3, m31, m23),
        tri(m12, m23, m31),
    ] {
        subdivide(child, depth - 1, out);
    }
}
