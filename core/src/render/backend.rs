//! The interface between the pipeline and a graphics API.

use alloc::vec::Vec;

use crate::math::{Mat4, ProjMat4, Vec3};

use super::{Model, Result, View, light::Shading};

/// The primitive mode of a draw call.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Primitive {
    /// Every three consecutive vertices form a filled triangle.
    Triangles,
    /// The vertices form a closed outline, the last connecting to the first.
    LineLoop,
}

/// Per-frame shader inputs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    /// Model-to-view transform of vertex positions.
    pub view: Mat4<Model, View>,
    /// View-to-clip projection.
    pub project: ProjMat4<View>,
    /// Model-to-view transform of vertex normals.
    pub normal: Mat4<Model, View>,
    /// Light position in view space.
    pub light_pos: Vec3<View>,
    /// Light intensity, in [0, 1].
    pub light_intensity: f32,
    /// Lighting coefficients.
    pub shading: Shading,
}

/// A graphics API capable of drawing flat-shaded meshes.
///
/// The pipeline calls [`link_program`][Self::link_program] and
/// [`enable_depth_test`][Self::enable_depth_test] once at startup, then
/// each frame binds the mesh, uploads uniforms, and issues draw calls.
/// Draw calls index into the most recently uploaded mesh, in vertices.
pub trait Backend {
    /// Compiles and links the shader program.
    ///
    /// # Errors
    /// If compilation or linking fails. The error is fatal.
    fn link_program(&mut self) -> Result;

    /// Enables depth testing, so that nearer fragments occlude farther ones.
    fn enable_depth_test(&mut self);

    /// Uploads vertex positions and normals, three floats per vertex,
    /// replacing any previous mesh.
    fn upload_mesh(&mut self, positions: &[f32], normals: &[f32]) -> Result;

    /// Binds the uploaded mesh as the source of vertex attributes.
    fn bind_mesh(&mut self);

    /// Sets the shader uniforms for subsequent draw calls.
    fn set_uniforms(&mut self, uniforms: &Uniforms);

    /// Clears the color and depth buffers.
    fn clear(&mut self);

    /// Draws `count` vertices starting from vertex `first`.
    fn draw(&mut self, prim: Primitive, first: usize, count: usize);

    /// Presents the finished frame.
    fn present(&mut self) -> Result {
        Ok(())
    }

    /// Returns the width-to-height ratio of the drawing surface.
    fn aspect_ratio(&self) -> f32;
}

/// A call made to a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    LinkProgram,
    EnableDepthTest,
    UploadMesh { verts: usize },
    BindMesh,
    SetUniforms(Uniforms),
    Clear,
    Draw(Primitive, usize, usize),
    Present,
}

/// A backend that draws nothing, only recording the calls made to it.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    /// Returns the draw calls recorded so far.
    pub fn draws(&self) -> impl Iterator<Item = (Primitive, usize, usize)> {
        self.calls.iter().filter_map(|c| match c {
            &Call::Draw(p, first, count) => Some((p, first, count)),
            _ => None,
        })
    }

    /// Returns the most recently set uniforms, if any.
    pub fn last_uniforms(&self) -> Option<&Uniforms> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::SetUniforms(u) => Some(u),
            _ => None,
        })
    }
}

impl Backend for Recorder {
    fn link_program(&mut self) -> Result {
        self.calls.push(Call::LinkProgram);
        Ok(())
    }
    fn enable_depth_test(&mut self) {
        self.calls.push(Call::EnableDepthTest);
    }
    fn upload_mesh(&mut self, positions: &[f32], normals: &[f32]) -> Result {
        debug_assert_eq!(positions.len(), normals.len());
        self.calls.push(Call::UploadMesh { verts: positions.len() / 3 });
        Ok(())
    }
    fn bind_mesh(&mut self) {
        self.calls.push(Call::BindMesh);
    }
    fn set_uniforms(&mut self, uniforms: &Uniforms) {
        self.calls.push(Call::SetUniforms(*uniforms));
    }
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }
    fn draw(&mut self, prim: Primitive, first: usize, count: usize) {
        self.calls.push(Call::Draw(prim, first, count));
    }
    fn present(&mut self) -> Result {
        self.calls.push(Call::Present);
        Ok(())
    }
    fn aspect_ratio(&self) -> f32 {
        1.0
    }
}
