//! The regular icosahedron.

use gs::{
    geom::{Mesh, Tri, tri},
    math::{Vec3, vec3},
    render::Model,
};

use super::Build;

/// The golden ratio φ = (1 + √5) / 2.
const PHI: f32 = 1.618_034;

/// Regular icosahedron.
///
/// A Platonic solid with twelve vertices and twenty equilateral triangle
/// faces. Five edges meet at every vertex.
///
/// `Icosahedron`'s vertices are at:
/// * (±φ, 0, ±1)
/// * (±1, ±φ, 0)
/// * (0, ±1, ±φ),
///
/// where φ ≈ 1.618 is the golden ratio constant, scaled to lie on the
/// unit sphere.
#[derive(Copy, Clone, Debug, Default)]
pub struct Icosahedron;

impl Icosahedron {
    /// The vertices, before normalization.
    #[rustfmt::skip]
    pub const COORDS: [Vec3<Model>; 12] = [
        vec3(-PHI, 0.0, -1.0), vec3(-PHI, 0.0, 1.0), // -X
        vec3( PHI, 0.0, -1.0), vec3( PHI, 0.0, 1.0), // +X

        vec3(-1.0, -PHI, 0.0), vec3(1.0, -PHI, 0.0), // -Y
        vec3(-1.0,  PHI, 0.0), vec3(1.0,  PHI, 0.0), // +Y

        vec3(0.0, -1.0, -PHI), vec3(0.0, 1.0, -PHI), // -Z
        vec3(0.0, -1.0,  PHI), vec3(0.0, 1.0,  PHI), // +Z
    ];

    /// The faces, as triplets of indices into [`COORDS`][Self::COORDS].
    ///
    /// Every face is wound counter-clockwise when seen from outside.
    #[rustfmt::skip]
    pub const FACES: [[usize; 3]; 20] = [
        [0,  4,  1], [0,  1,  6], // -X
        [2,  3,  5], [2,  7,  3], // +X
        [4,  8,  5], [4,  5, 10], // -Y
        [6,  7,  9], [6, 11,  7], // +Y
        [8,  0,  9], [8,  9,  2], // -Z
        [10, 11, 1], [10, 3, 11], // +Z

        // Corner faces, one per octant
        [0, 8, 4], [1,  4, 10], // -X-Y -Z,+Z
        [0, 6, 9], [1, 11,  6], // -X+Y   "
        [2, 5, 8], [3, 10,  5], // +X-Y   "
        [2, 9, 7], [3,  7, 11], // +X+Y   "
    ];

    /// Returns the vertices, normalized to unit length.
    pub fn verts() -> [Vec3<Model>; 12] {
        Self::COORDS.map(|v| v.normalize())
    }

    /// Returns an iterator over the faces as triangles with unit-length
    /// vertices, in the order of [`FACES`][Self::FACES].
    pub fn tris() -> impl Iterator<Item = Tri<Vec3<Model>>> {
        let vs = Self::verts();
        Self::FACES
            .into_iter()
            .map(move |[a, b, c]| tri(vs[a], vs[b], vs[c]))
    }
}

impl Build for Icosahedron {
    /// Builds the flat-shaded icosahedral mesh.
    fn build(self) -> Mesh {
        Self::tris().collect()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use gs::assert_approx_eq;

    use super::*;

    #[test]
    fn verts_are_unit() {
        for v in Icosahedron::verts() {
            assert_approx_eq!(v.len(), 1.0);
        }
    }

    #[test]
    fn every_vertex_has_five_faces() {
        let mut valence = [0; 12];
        for i in Icosahedron::FACES.into_iter().flatten() {
            valence[i] += 1;
        }
        assert_eq!(valence, [5; 12]);
    }

    #[test]
    fn edges_are_shared_with_opposite_direction() {
        let edges: Vec<_> = Icosahedron::FACES
            .into_iter()
            .flat_map(|[a, b, c]| [(a, b), (b, c), (c, a)])
            .collect();
        assert_eq!(edges.len(), 60);
        for &(a, b) in &edges {
            assert!(edges.contains(&(b, a)), "unpaired edge {a}-{b}");
            assert_eq!(edges.iter().filter(|&&e| e == (a, b)).count(), 1);
        }
    }

    #[test]
    fn faces_wind_outward() {
        for t in Icosahedron::tris() {
            assert!(t.faces_outward(), "{t:?}");
        }
    }

    #[test]
    fn faces_are_equilateral() {
        for Tri([a, b, c]) in Icosahedron::tris() {
            let ab = (b - a).len();
            assert_approx_eq!((c - b).len(), ab, eps = 1e-5);
            assert_approx_eq!((a - c).len(), ab, eps = 1e-5);
        }
    }

    #[test]
    fn build_has_flat_normals() {
        let m = Icosahedron.build();
        assert_eq!(m.tri_count(), 20);
        assert_eq!(m.vert_count(), 60);
        for (t, ns) in m.tris().zip(m.normals.chunks_exact(3)) {
            assert_eq!(ns, [t.normal(); 3]);
        }
    }
}
