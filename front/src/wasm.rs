//! Frontend using WebAssembly and WebGL2 to render to a canvas element.

use std::cell::RefCell;
use std::ops::ControlFlow::{Break, Continue};
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::js_sys::Float32Array;
use web_sys::{
    Document, HtmlCanvasElement as Canvas, WebGl2RenderingContext as Gl,
    WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use gs::geom::Mesh;
use gs::render::{
    Backend, Error, Pipeline, Primitive, Result, Stage, Uniforms,
    scene::{Control, State},
};

use crate::Dims;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = log)]
    fn console_log(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(msg: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(msg: &str);

    #[wasm_bindgen]
    fn requestAnimationFrame(cb: &Closure<dyn FnMut(f32)>);
}

const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 a_pos;
in vec3 a_normal;

uniform mat4 u_view;
uniform mat4 u_project;
uniform mat4 u_normal;

out vec3 v_pos;
out vec3 v_normal;

void main() {
    vec4 pos = u_view * vec4(a_pos, 1.0);
    v_pos = pos.xyz;
    v_normal = (u_normal * vec4(a_normal, 0.0)).xyz;
    gl_Position = u_project * pos;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision mediump float;

in vec3 v_pos;
in vec3 v_normal;

uniform vec3 u_light_pos;
uniform float u_light_intensity;
uniform float u_ambient;
uniform float u_diffuse;

out vec4 frag_color;

void main() {
    vec3 n = normalize(v_normal);
    vec3 l = normalize(u_light_pos - v_pos);
    float lum = u_ambient + u_diffuse * max(dot(n, l), 0.0);
    frag_color = vec4(vec3(lum * u_light_intensity), 1.0);
}
"#;

/// A `log` logger writing to the browser console.
struct Console;

static CONSOLE: Console = Console;

impl Log for Console {
    fn enabled(&self, meta: &Metadata) -> bool {
        meta.level() <= log::max_level()
    }

    fn log(&self, rec: &Record) {
        if !self.enabled(rec.metadata()) {
            return;
        }
        let msg = format!("[{}][{}] {}", rec.level(), rec.target(), rec.args());
        match rec.level() {
            Level::Error => console_error(&msg),
            Level::Warn => console_warn(&msg),
            _ => console_log(&msg),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger with the given maximum level, and with the
/// `wasm-dev` feature, a panic hook printing panics to the console.
///
/// Has no effect on the logger if one is already installed.
pub fn init_logger(level: LevelFilter) {
    #[cfg(feature = "wasm-dev")]
    console_error_panic_hook::set_once();

    if log::set_logger(&CONSOLE).is_ok() {
        log::set_max_level(level);
    }
}

/// User input collected between frames by event handlers.
#[derive(Debug, Default)]
pub struct Input {
    pending: Vec<Control>,
    quit: bool,
}

impl Input {
    /// Queues a control for the next frame.
    pub fn push(&mut self, ctl: Control) {
        self.pending.push(ctl);
    }
    /// Requests the render loop to stop.
    pub fn quit(&mut self) {
        self.quit = true;
    }
    /// Returns the controls queued since the last frame.
    pub fn pending(&self) -> &[Control] {
        &self.pending
    }
    /// Returns whether the render loop has been asked to stop.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

#[derive(Debug)]
struct Locations {
    view: Option<WebGlUniformLocation>,
    project: Option<WebGlUniformLocation>,
    normal: Option<WebGlUniformLocation>,
    light_pos: Option<WebGlUniformLocation>,
    light_intensity: Option<WebGlUniformLocation>,
    ambient: Option<WebGlUniformLocation>,
    diffuse: Option<WebGlUniformLocation>,
}

#[derive(Debug)]
struct GpuMesh {
    vao: WebGlVertexArrayObject,
    positions: WebGlBuffer,
    normals: WebGlBuffer,
}

/// A [`Backend`] drawing with WebGL2 to a canvas element.
#[derive(Debug)]
pub struct WebGl {
    gl: Gl,
    canvas: Canvas,
    program: Option<WebGlProgram>,
    locs: Option<Locations>,
    mesh: Option<GpuMesh>,
}

impl WebGl {
    /// Creates a canvas of the given size, appends it to the document body,
    /// and acquires its WebGL2 context.
    ///
    /// # Errors
    /// If there is no document, or WebGL2 is not supported.
    pub fn new(dims: Dims) -> Result<Self> {
        let unavailable = |what: &str| Error::ContextUnavailable(what.into());

        let doc = document().ok_or_else(|| unavailable("no document"))?;
        let body = doc.body().ok_or_else(|| unavailable("no body element"))?;
        let canvas = create_canvas(&doc, dims)
            .ok_or_else(|| unavailable("could not create canvas"))?;
        body.append_child(&canvas)
            .map_err(|_| unavailable("could not append canvas"))?;

        let gl: Gl = canvas
            .get_context("webgl2")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into().ok())
            .ok_or_else(|| unavailable("WebGL2 not supported"))?;
        gl.viewport(0, 0, dims.0 as i32, dims.1 as i32);

        log::info!("created {}x{} WebGL2 canvas", dims.0, dims.1);
        Ok(Self {
            gl,
            canvas,
            program: None,
            locs: None,
            mesh: None,
        })
    }

    fn compile(&self, stage: Stage, src: &str) -> Result<WebGlShader> {
        let gl = &self.gl;
        let ty = match stage {
            Stage::Vertex => Gl::VERTEX_SHADER,
            Stage::Fragment => Gl::FRAGMENT_SHADER,
        };
        let shader = gl.create_shader(ty).ok_or_else(|| Error::ShaderCompile {
            stage,
            log: "could not create shader".into(),
        })?;
        gl.shader_source(&shader, src);
        gl.compile_shader(&shader);

        let ok = gl
            .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if ok {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(&shader).unwrap_or_default();
            gl.delete_shader(Some(&shader));
            Err(Error::ShaderCompile { stage, log })
        }
    }

    fn attrib_buffer(
        &self,
        prog: &WebGlProgram,
        name: &str,
        data: &[f32],
    ) -> Result<WebGlBuffer> {
        let gl = &self.gl;
        let loc = gl.get_attrib_location(prog, name);
        let loc = u32::try_from(loc)
            .map_err(|_| Error::Buffer(format!("attribute {name} not found")))?;
        let buf = gl
            .create_buffer()
            .ok_or_else(|| Error::Buffer(format!("could not create {name} buffer")))?;

        gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&buf));
        let arr = Float32Array::from(data);
        gl.buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &arr, Gl::STATIC_DRAW);
        gl.enable_vertex_attrib_array(loc);
        gl.vertex_attrib_pointer_with_i32(loc, 3, Gl::FLOAT, false, 0, 0);
        Ok(buf)
    }

    fn delete_mesh(&mut self) {
        if let Some(GpuMesh { vao, positions, normals }) = self.mesh.take() {
            self.gl.delete_buffer(Some(&positions));
            self.gl.delete_buffer(Some(&normals));
            self.gl.delete_vertex_array(Some(&vao));
        }
    }
}

impl Backend for WebGl {
    fn link_program(&mut self) -> Result {
        let vs = self.compile(Stage::Vertex, VERTEX_SHADER)?;
        let fs = self.compile(Stage::Fragment, FRAGMENT_SHADER)?;

        let gl = &self.gl;
        let prog = gl
            .create_program()
            .ok_or_else(|| Error::ProgramLink("could not create program".into()))?;
        gl.attach_shader(&prog, &vs);
        gl.attach_shader(&prog, &fs);
        gl.link_program(&prog);

        let ok = gl
            .get_program_parameter(&prog, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !ok {
            let log = gl.get_program_info_log(&prog).unwrap_or_default();
            gl.delete_program(Some(&prog));
            return Err(Error::ProgramLink(log));
        }
        gl.use_program(Some(&prog));

        let loc = |name| gl.get_uniform_location(&prog, name);
        self.locs = Some(Locations {
            view: loc("u_view"),
            project: loc("u_project"),
            normal: loc("u_normal"),
            light_pos: loc("u_light_pos"),
            light_intensity: loc("u_light_intensity"),
            ambient: loc("u_ambient"),
            diffuse: loc("u_diffuse"),
        });
        self.program = Some(prog);
        log::debug!("linked shader program");
        Ok(())
    }

    fn enable_depth_test(&mut self) {
        self.gl.enable(Gl::DEPTH_TEST);
    }

    fn upload_mesh(&mut self, positions: &[f32], normals: &[f32]) -> Result {
        let Some(prog) = self.program.clone() else {
            return Err(Error::Buffer("no shader program linked".into()));
        };
        self.delete_mesh();

        let vao = self
            .gl
            .create_vertex_array()
            .ok_or_else(|| Error::Buffer("could not create vertex array".into()))?;
        self.gl.bind_vertex_array(Some(&vao));

        let bufs = self.attrib_buffer(&prog, "a_pos", positions).and_then(|pos| {
            match self.attrib_buffer(&prog, "a_normal", normals) {
                Ok(norm) => Ok((pos, norm)),
                Err(e) => {
                    self.gl.delete_buffer(Some(&pos));
                    Err(e)
                }
            }
        });
        match bufs {
            Ok((positions, normals)) => {
                self.mesh = Some(GpuMesh { vao, positions, normals });
                Ok(())
            }
            Err(e) => {
                self.gl.bind_vertex_array(None);
                self.gl.delete_vertex_array(Some(&vao));
                Err(e)
            }
        }
    }

    fn bind_mesh(&mut self) {
        self.gl
            .bind_vertex_array(self.mesh.as_ref().map(|m| &m.vao));
    }

    fn set_uniforms(&mut self, u: &Uniforms) {
        let (gl, Some(l)) = (&self.gl, &self.locs) else {
            return;
        };
        gl.uniform_matrix4fv_with_f32_array(l.view.as_ref(), false, &u.view.to_cols());
        gl.uniform_matrix4fv_with_f32_array(
            l.project.as_ref(),
            false,
            &u.project.to_cols(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            l.normal.as_ref(),
            false,
            &u.normal.to_cols(),
        );
        let [x, y, z] = u.light_pos.0;
        gl.uniform3f(l.light_pos.as_ref(), x, y, z);
        gl.uniform1f(l.light_intensity.as_ref(), u.light_intensity);
        gl.uniform1f(l.ambient.as_ref(), u.shading.ambient);
        gl.uniform1f(l.diffuse.as_ref(), u.shading.diffuse);
    }

    fn clear(&mut self) {
        self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    fn draw(&mut self, prim: Primitive, first: usize, count: usize) {
        let mode = match prim {
            Primitive::Triangles => Gl::TRIANGLES,
            Primitive::LineLoop => Gl::LINE_LOOP,
        };
        self.gl.draw_arrays(mode, first as i32, count as i32);
    }

    fn aspect_ratio(&self) -> f32 {
        self.canvas.width() as f32 / self.canvas.height().max(1) as f32
    }
}

/// Starts rendering frames with `pipeline` on every animation frame.
///
/// Controls pushed to `input` are applied at the start of the next frame.
/// The loop ends when [`Input::quit`] is called or a frame fails.
///
/// # Errors
/// If the pipeline fails to initialize. No frames are scheduled then.
pub fn run<G>(
    mut pipeline: Pipeline<WebGl, G>,
    mut st: State,
    input: Rc<RefCell<Input>>,
) -> Result
where
    G: FnMut(u32) -> Mesh + 'static,
{
    pipeline.init(&st).inspect_err(|e| {
        log::error!("failed to initialize pipeline: {e}");
    })?;

    let outer: Rc<RefCell<Option<Closure<dyn FnMut(f32)>>>> = Rc::default();
    let inner = outer.clone();
    outer.borrow_mut().replace(Closure::new(move |_ms: f32| {
        {
            let mut input = input.borrow_mut();
            if input.quit {
                pipeline.stop();
            }
            pipeline.controls_mut().extend(input.pending.drain(..));
        }
        // Not rescheduling ends the loop
        match pipeline.frame(&mut st) {
            Ok(Continue(())) => {
                if let Some(cb) = inner.borrow().as_ref() {
                    requestAnimationFrame(cb);
                }
            }
            Ok(Break(())) => log::info!("\n{}", pipeline.stats()),
            Err(e) => log::error!("frame failed: {e}"),
        }
    }));
    if let Some(cb) = outer.borrow().as_ref() {
        requestAnimationFrame(cb);
    }
    Ok(())
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn create_canvas(doc: &Document, dims: Dims) -> Option<Canvas> {
    doc.create_element("canvas")
        .ok()?
        .dyn_into()
        .map(|cvs: Canvas| {
            cvs.set_width(dims.0);
            cvs.set_height(dims.1);
            cvs
        })
        .ok()
}
