//! Flat-shaded triangle meshes.

use core::fmt::{self, Debug, Formatter};

use alloc::vec::Vec;

use crate::math::Vec3;
use crate::render::Model;

use super::{Normal3, Tri};

/// A flat-shaded triangle mesh in basis `B`.
///
/// The triangles are stored unindexed, as two parallel sequences: one
/// vertex position per triangle corner, and the triangle's face normal
/// repeated for each of its three corners. This is exactly the layout
/// a graphics API expects for non-indexed triangle-list drawing.
#[derive(Clone)]
pub struct Mesh<B = Model> {
    /// Vertex positions, three per triangle, in winding order.
    pub positions: Vec<Vec3<B>>,
    /// Vertex normals, the same for each vertex of a triangle.
    pub normals: Vec<Normal3<B>>,
}

/// Owns the current mesh and regenerates it on demand.
///
/// The mesh is produced by a generator function from a *level* parameter,
/// and is fully replaced, never patched, whenever the requested level
/// differs from that of the current mesh.
pub struct MeshBuffer<G> {
    generate: G,
    mesh: Mesh,
    level: Option<u32>,
    generation: u32,
}

impl<B> Mesh<B> {
    /// Returns a new, empty mesh.
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Returns an empty mesh with room for `n` triangles.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(3 * n),
            normals: Vec::with_capacity(3 * n),
        }
    }

    /// Appends a triangle to `self`, assigning it its face normal.
    pub fn push_tri(&mut self, tri: Tri<Vec3<B>>) {
        let n = tri.normal();
        self.positions.extend(tri.0);
        self.normals.extend([n; 3]);
    }

    /// Returns the number of triangles in `self`.
    #[inline]
    pub fn tri_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Returns the number of vertices in `self`, three per triangle.
    #[inline]
    pub fn vert_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns an iterator over the triangles of `self`.
    pub fn tris(&self) -> impl Iterator<Item = Tri<Vec3<B>>> + '_ {
        self.positions
            .chunks_exact(3)
            .map(|vs| Tri([vs[0], vs[1], vs[2]]))
    }
}

impl<B: 'static> Mesh<B> {
    /// Returns the vertex positions of `self` as a flat slice of floats,
    /// suitable for uploading into a vertex buffer.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Returns the vertex normals of `self` as a flat slice of floats.
    pub fn flat_normals(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }
}

impl<G: FnMut(u32) -> Mesh> MeshBuffer<G> {
    /// Returns a new buffer using `generate` to produce meshes.
    ///
    /// The buffer is initially empty; the first call to
    /// [`ensure`][Self::ensure] generates the initial mesh.
    pub fn new(generate: G) -> Self {
        Self {
            generate,
            mesh: Mesh::new(),
            level: None,
            generation: 0,
        }
    }

    /// Ensures that the current mesh is that of `level`, regenerating it
    /// if necessary.
    ///
    /// Returns whether the mesh was regenerated. Regeneration discards
    /// the previous mesh entirely.
    pub fn ensure(&mut self, level: u32) -> bool {
        if self.level == Some(level) {
            return false;
        }
        self.mesh = (self.generate)(level);
        self.level = Some(level);
        self.generation += 1;
        log::debug!(
            "generated mesh for level {level}: {} triangles",
            self.mesh.tri_count()
        );
        true
    }
}

impl<G> MeshBuffer<G> {
    /// Forgets the level of the current mesh, so that the next call to
    /// [`ensure`][MeshBuffer::ensure] regenerates it whatever the level.
    pub fn invalidate(&mut self) {
        self.level = None;
    }

    /// Returns the current mesh.
    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Returns the level of the current mesh, or `None` if no mesh has
    /// been generated yet.
    #[inline]
    pub fn level(&self) -> Option<u32> {
        self.level
    }

    /// Returns the number of times a mesh has been generated.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

//
// Foreign trait impls
//

impl<B> Default for Mesh<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> FromIterator<Tri<Vec3<B>>> for Mesh<B> {
    fn from_iter<I: IntoIterator<Item = Tri<Vec3<B>>>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<B> Extend<Tri<Vec3<B>>> for Mesh<B> {
    fn extend<I: IntoIterator<Item = Tri<Vec3<B>>>>(&mut self, iter: I) {
        for tri in iter {
            self.push_tri(tri);
        }
    }
}

impl<B> Debug for Mesh<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("tris", &self.tri_count())
            .field("verts", &self.vert_count())
            .finish()
    }
}

impl<G> Debug for MeshBuffer<G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshBuffer")
            .field("mesh", &self.mesh)
            .field("level", &self.level)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, vec};

    use crate::geom::tri;
    use crate::math::vec3;

    use super::*;

    fn quad() -> Mesh {
        [
            tri(Vec3::zero(), Vec3::X, vec3(1.0, 1.0, 0.0)),
            tri(Vec3::zero(), vec3(1.0, 1.0, 0.0), Vec3::Y),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn push_tri_repeats_face_normal() {
        let mut m: Mesh = Mesh::new();
        m.push_tri(tri(Vec3::X, Vec3::Y, Vec3::Z));

        assert_eq!(m.tri_count(), 1);
        assert_eq!(m.vert_count(), 3);
        assert_eq!(m.normals.len(), 3);
        assert_eq!(m.normals[0], m.normals[1]);
        assert_eq!(m.normals[0], m.normals[2]);
    }

    #[test]
    fn tris_preserve_winding() {
        let m = quad();
        let tris: Vec<_> = m.tris().collect();
        assert_eq!(tris.len(), 2);
        assert_eq!(tris[1].0, [Vec3::zero(), vec3(1.0, 1.0, 0.0), Vec3::Y]);
    }

    #[test]
    fn flat_slices() {
        let m = quad();
        assert_eq!(m.flat_positions().len(), 18);
        assert_eq!(&m.flat_positions()[3..6], &[1.0, 0.0, 0.0]);
        assert_eq!(&m.flat_normals()[..3], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn mesh_debug() {
        assert_eq!(format!("{:?}", quad()), "Mesh { tris: 2, verts: 6 }");
    }

    #[test]
    fn buffer_regenerates_only_on_level_change() {
        let mut calls = vec![];
        let mut buf = MeshBuffer::new(|level: u32| {
            calls.push(level);
            let mut m: Mesh = Mesh::new();
            for _ in 0..=level {
                m.push_tri(tri(Vec3::X, Vec3::Y, Vec3::Z));
            }
            m
        });
        assert_eq!(buf.level(), None);
        assert!(buf.mesh().is_empty());

        assert!(buf.ensure(2));
        assert!(!buf.ensure(2));
        assert_eq!(buf.mesh().tri_count(), 3);

        assert!(buf.ensure(0));
        assert_eq!(buf.mesh().tri_count(), 1);
        assert_eq!(buf.level(), Some(0));
        assert_eq!(buf.generation(), 2);

        drop(buf);
        assert_eq!(calls, [2, 0]);
    }

    #[test]
    fn invalidated_buffer_regenerates_same_level() {
        let mut buf = MeshBuffer::new(|_| quad());
        assert!(buf.ensure(3));
        buf.invalidate();
        assert_eq!(buf.level(), None);

        assert!(buf.ensure(3));
        assert_eq!(buf.level(), Some(3));
        assert_eq!(buf.generation(), 2);
    }
}
