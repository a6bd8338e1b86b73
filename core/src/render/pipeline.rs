//! The per-frame rendering pipeline.

use core::ops::ControlFlow::{self, Break, Continue};

use crate::geom::{Mesh, MeshBuffer};
use crate::math::{Vec3, vec3};

use super::{
    Backend, Primitive, Result, Stats, Uniforms, View,
    cam::{Orbit, Projection},
    clock::SceneClock,
    light::Shading,
    scene::{Control, Controls, State},
};

/// Fixed parameters of a [`Pipeline`].
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Rotation of the model per frame.
    pub clock: SceneClock,
    /// Camera orbit around the model.
    pub orbit: Orbit,
    /// Camera projection.
    pub projection: Projection,
    /// Lighting coefficients.
    pub shading: Shading,
    /// Position of the light, fixed relative to the camera.
    pub light_pos: Vec3<View>,
}

/// Renders a mesh with an orbiting camera and a point light, one frame
/// at a time, through a [`Backend`].
///
/// The mesh is produced by a generator function taking the subdivision
/// level of the scene, and regenerated whenever that level changes.
pub struct Pipeline<B, G> {
    backend: B,
    meshes: MeshBuffer<G>,
    settings: Settings,
    controls: Controls,
    stats: Stats,
    animating: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            clock: SceneClock::default(),
            orbit: Orbit::default(),
            projection: Projection::default(),
            shading: Shading::default(),
            light_pos: vec3(2.0, 2.0, 2.0),
        }
    }
}

impl<B: Backend, G: FnMut(u32) -> Mesh> Pipeline<B, G> {
    /// Creates a new pipeline drawing to `backend` meshes produced by
    /// `generate`.
    ///
    /// Call [`init`][Self::init] before rendering any frames.
    pub fn new(backend: B, settings: Settings, generate: G) -> Self {
        Self {
            backend,
            meshes: MeshBuffer::new(generate),
            settings,
            controls: Controls::new(),
            stats: Stats::new(),
            animating: true,
        }
    }

    /// Prepares the backend for rendering and uploads the initial mesh.
    ///
    /// # Errors
    /// If the shader program fails to link or the mesh cannot be uploaded.
    /// Either error is fatal; no frames should be rendered afterwards.
    pub fn init(&mut self, st: &State) -> Result {
        self.backend.link_program()?;
        self.backend.enable_depth_test();
        self.update_mesh(st.scene.level)?;
        log::info!(
            "pipeline initialized at level {}: {:?}",
            st.scene.level,
            self.meshes.mesh()
        );
        Ok(())
    }

    /// Renders a single frame.
    ///
    /// Applies pending controls to `st`, regenerating the mesh if the
    /// subdivision level changed, then advances the scene clock and draws
    /// the mesh with the current camera and light.
    ///
    /// Returns `Continue` if the pipeline is still animating and the caller
    /// should schedule another frame, `Break` if it has been
    /// [stopped][Self::stop]. A stopped pipeline draws nothing.
    ///
    /// # Errors
    /// If the mesh cannot be uploaded or the frame cannot be presented.
    pub fn frame(&mut self, st: &mut State) -> Result<ControlFlow<()>> {
        if !self.animating {
            return Ok(Break(()));
        }
        let mut frame = Stats::start();

        self.controls.apply(st);
        self.update_mesh(st.scene.level)?;

        let Settings {
            clock, orbit, projection, shading, light_pos,
        } = &self.settings;

        let (view, _) = orbit.compute_view(&st.camera);
        let (view, normal) = clock.tick(&mut st.scene, &view);
        let uniforms = Uniforms {
            view,
            project: projection.matrix(self.backend.aspect_ratio()),
            normal,
            light_pos: *light_pos,
            light_intensity: st.scene.light_intensity,
            shading: *shading,
        };

        let mesh = self.meshes.mesh();
        let b = &mut self.backend;
        b.clear();
        b.bind_mesh();
        b.set_uniforms(&uniforms);

        let calls = if st.scene.wireframe {
            for i in 0..mesh.tri_count() {
                b.draw(Primitive::LineLoop, 3 * i, 3);
            }
            mesh.tri_count()
        } else {
            b.draw(Primitive::Triangles, 0, mesh.vert_count());
            1
        };
        b.present()?;

        frame = frame.finish();
        frame.frames = 1;
        frame.calls = calls as u64;
        frame.tris = mesh.tri_count() as u64;
        frame.verts = mesh.vert_count() as u64;
        self.stats += frame;

        Ok(Continue(()))
    }

    fn update_mesh(&mut self, level: u32) -> Result {
        if !self.meshes.ensure(level) {
            return Ok(());
        }
        let mesh = self.meshes.mesh();
        let res = self
            .backend
            .upload_mesh(mesh.flat_positions(), mesh.flat_normals());
        if let Err(e) = res {
            // The backend still holds the previous buffer
            self.meshes.invalidate();
            return Err(e);
        }
        self.stats.regens += 1;
        log::debug!("uploaded {} vertices", mesh.vert_count());
        Ok(())
    }
}

impl<B, G> Pipeline<B, G> {
    /// Queues a control to be applied at the start of the next frame.
    pub fn push(&mut self, ctl: Control) {
        self.controls.push(ctl);
    }

    /// Returns the queue of pending controls.
    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    /// Stops the animation. Subsequent frames return `Break`.
    pub fn stop(&mut self) {
        if self.animating {
            self.animating = false;
            log::info!("pipeline stopped after {} frames", self.stats.frames);
        }
    }

    /// Returns whether the pipeline is still animating.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Returns the current mesh.
    pub fn mesh(&self) -> &Mesh {
        self.meshes.mesh()
    }

    /// Returns the statistics accumulated so far.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes `self`, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
