//! A software rendering backend.
//!
//! [`Softbuf`] implements [`Backend`] on the CPU, rasterizing into a
//! color buffer of `0x00_RR_GG_BB` pixels and a depth buffer of NDC depth
//! values. It needs no graphics context, which makes it suitable for
//! headless rendering and for tests, and it is what the native window
//! frontend presents.

use gs::math::{Color3f, Lerp, Vec3, vec3};
use gs::render::{
    Backend, Error, Model, Primitive, Result, Screen, Uniforms, View,
    light::{PointLight, Shading},
};

use crate::Dims;

/// Software rasterizer with its own color and depth buffers.
#[derive(Clone)]
pub struct Softbuf {
    dims: Dims,
    color: Vec<u32>,
    depth: Vec<f32>,
    clear_color: u32,
    depth_test: bool,

    positions: Vec<Vec3<Model>>,
    normals: Vec<Vec3<Model>>,
    bound: bool,
    uniforms: Option<Uniforms>,
}

/// A vertex after transformation.
#[derive(Copy, Clone, Debug)]
struct Vertex {
    /// Pixel coordinates in x and y, NDC depth in z.
    screen: Vec3<Screen>,
    pos: Vec3<View>,
    normal: Vec3<View>,
    /// Whether the vertex is in front of the camera.
    front: bool,
}

impl Softbuf {
    /// Creates a new backend with buffers of the given size.
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(dims: Dims) -> Self {
        assert!(dims.0 > 0 && dims.1 > 0, "zero-sized buffer: {dims:?}");
        let len = dims.0 as usize * dims.1 as usize;
        Self {
            dims,
            color: vec![0; len],
            depth: vec![f32::INFINITY; len],
            clear_color: 0,
            depth_test: false,
            positions: Vec::new(),
            normals: Vec::new(),
            bound: false,
            uniforms: None,
        }
    }

    /// Sets the color the color buffer is cleared to.
    pub fn with_clear_color(self, c: Color3f) -> Self {
        Self { clear_color: c.to_xrgb8888(), ..self }
    }

    /// Returns the width and height of the buffers.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Returns the color buffer, in row-major order.
    pub fn color_buf(&self) -> &[u32] {
        &self.color
    }

    /// Returns the depth buffer, in row-major order.
    pub fn depth_buf(&self) -> &[f32] {
        &self.depth
    }

    /// Returns the color of the pixel at (`x`, `y`).
    ///
    /// # Panics
    /// If the pixel is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.dims.0 && y < self.dims.1, "({x}, {y}) out of bounds");
        self.color[self.index(x as usize, y as usize)]
    }

    /// Returns the number of pixels differing from the clear color.
    pub fn covered(&self) -> usize {
        self.color.iter().filter(|&&c| c != self.clear_color).count()
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.dims.0 as usize + x
    }

    fn vertex(&self, u: &Uniforms, i: usize) -> Vertex {
        let pos = u.view.apply(&self.positions[i]);
        let normal = u.normal.apply_linear(&self.normals[i]);
        let clip = u.project.apply(&pos);
        let ndc: Vec3 = clip.project_to_real();
        let (w, h) = (self.dims.0 as f32, self.dims.1 as f32);
        Vertex {
            screen: vec3(
                (ndc.x() + 1.0) * 0.5 * w,
                (1.0 - ndc.y()) * 0.5 * h,
                ndc.z(),
            ),
            pos,
            normal,
            front: clip.w() > 0.0,
        }
    }

    /// Writes a fragment if it is within the depth range and passes the
    /// depth test.
    fn fragment(&mut self, x: usize, y: usize, z: f32, c: Color3f) {
        if !(-1.0..=1.0).contains(&z) {
            return;
        }
        let i = self.index(x, y);
        if self.depth_test {
            if z >= self.depth[i] {
                return;
            }
            self.depth[i] = z;
        }
        self.color[i] = c.to_xrgb8888();
    }

    fn fill_tri(
        &mut self,
        [a, b, c]: [Vertex; 3],
        sh: &Shading,
        light: &PointLight<View>,
    ) {
        // No near-plane clipping; triangles crossing it are dropped
        if !(a.front && b.front && c.front) {
            return;
        }
        let (sa, sb, sc) = (a.screen, b.screen, c.screen);
        let area = edge(sa, sb, sc);
        if area == 0.0 || !area.is_finite() {
            return;
        }
        let (w, h) = (self.dims.0 as f32, self.dims.1 as f32);
        let x0 = sa.x().min(sb.x()).min(sc.x()).floor().max(0.0) as usize;
        let x1 = sa.x().max(sb.x()).max(sc.x()).ceil().min(w) as usize;
        let y0 = sa.y().min(sb.y()).min(sc.y()).floor().max(0.0) as usize;
        let y1 = sa.y().max(sb.y()).max(sc.y()).ceil().min(h) as usize;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = vec3(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                // Dividing by the signed area makes the weights positive
                // inside the triangle regardless of winding
                let wa = edge(sb, sc, p) / area;
                let wb = edge(sc, sa, p) / area;
                let wc = edge(sa, sb, p) / area;
                if wa < 0.0 || wb < 0.0 || wc < 0.0 {
                    continue;
                }
                let z = wa * sa.z() + wb * sb.z() + wc * sc.z();
                let pos = a.pos * wa + b.pos * wb + c.pos * wc;
                let n = a.normal * wa + b.normal * wb + c.normal * wc;
                self.fragment(x, y, z, sh.shade(pos, n, light));
            }
        }
    }

    fn line(
        &mut self,
        a: Vertex,
        b: Vertex,
        sh: &Shading,
        light: &PointLight<View>,
    ) {
        if !(a.front && b.front) {
            return;
        }
        let (w, h) = (self.dims.0 as f32, self.dims.1 as f32);
        let d = b.screen - a.screen;
        let steps = d.x().abs().max(d.y().abs()).ceil();
        if !steps.is_finite() {
            return;
        }
        let steps = steps.clamp(1.0, 4.0 * (w + h));
        for i in 0..=steps as usize {
            let t = i as f32 / steps;
            let s = a.screen.lerp(&b.screen, t);
            let (x, y) = (s.x().floor(), s.y().floor());
            if x < 0.0 || y < 0.0 || x >= w || y >= h {
                continue;
            }
            let pos = a.pos.lerp(&b.pos, t);
            let n = a.normal.lerp(&b.normal, t);
            self.fragment(x as usize, y as usize, s.z(), sh.shade(pos, n, light));
        }
    }
}

/// Returns twice the signed area of the triangle `abc` in the xy-plane.
fn edge(a: Vec3<Screen>, b: Vec3<Screen>, c: Vec3<Screen>) -> f32 {
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

impl Backend for Softbuf {
    fn link_program(&mut self) -> Result {
        log::debug!("software backend: {}x{}", self.dims.0, self.dims.1);
        Ok(())
    }

    fn enable_depth_test(&mut self) {
        self.depth_test = true;
    }

    fn upload_mesh(&mut self, positions: &[f32], normals: &[f32]) -> Result {
        if positions.len() % 3 != 0 || positions.len() != normals.len() {
            return Err(Error::Buffer(format!(
                "expected equal-length xyz arrays, got {} positions and {} normals",
                positions.len(),
                normals.len()
            )));
        }
        let to_vecs = |fs: &[f32]| -> Vec<Vec3<Model>> {
            fs.chunks_exact(3)
                .map(|v| vec3(v[0], v[1], v[2]))
                .collect()
        };
        self.positions = to_vecs(positions);
        self.normals = to_vecs(normals);
        self.bound = false;
        Ok(())
    }

    fn bind_mesh(&mut self) {
        self.bound = true;
    }

    fn set_uniforms(&mut self, uniforms: &Uniforms) {
        self.uniforms = Some(*uniforms);
    }

    fn clear(&mut self) {
        self.color.fill(self.clear_color);
        self.depth.fill(f32::INFINITY);
    }

    fn draw(&mut self, prim: Primitive, first: usize, count: usize) {
        let Some(u) = self.uniforms else {
            log::warn!("draw call before uniforms were set");
            return;
        };
        if !self.bound {
            log::warn!("draw call without a bound mesh");
            return;
        }
        let end = first + count;
        if end > self.positions.len() {
            log::warn!(
                "draw call past end of mesh: {first}..{end} of {}",
                self.positions.len()
            );
            return;
        }
        let vs: Vec<_> = (first..end).map(|i| self.vertex(&u, i)).collect();
        let light = PointLight::new(u.light_pos, u.light_intensity);
        match prim {
            Primitive::Triangles => {
                for t in vs.chunks_exact(3) {
                    self.fill_tri([t[0], t[1], t[2]], &u.shading, &light);
                }
            }
            Primitive::LineLoop => {
                let n = vs.len();
                for i in 0..n {
                    self.line(vs[i], vs[(i + 1) % n], &u.shading, &light);
                }
            }
        }
    }

    fn aspect_ratio(&self) -> f32 {
        self.dims.0 as f32 / self.dims.1 as f32
    }
}

#[cfg(test)]
mod tests {
    use gs::math::{Mat4, degs, perspective, translate};
    use gs::render::light::Shading;

    use super::*;

    // A triangle facing +z, three units in front of the camera
    const TRI: [f32; 9] = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0];
    const NORMALS: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];

    fn uniforms(dist: f32) -> Uniforms {
        Uniforms {
            view: translate(vec3(0.0, 0.0, -dist)).to(),
            project: perspective(degs(90.0), 1.0, 0.1..10.0),
            normal: Mat4::identity(),
            light_pos: Vec3::zero(),
            light_intensity: 1.0,
            shading: Shading::default(),
        }
    }

    fn backend() -> Softbuf {
        let mut b = Softbuf::new((16, 16));
        b.link_program().unwrap();
        b.enable_depth_test();
        b.upload_mesh(&TRI, &NORMALS).unwrap();
        b.bind_mesh();
        b.clear();
        b
    }

    #[test]
    fn clear_fills_buffers() {
        let mut b = Softbuf::new((4, 2)).with_clear_color(gs::math::gray(1.0));
        b.clear();
        assert!(b.color_buf().iter().all(|&c| c == 0xFF_FF_FF));
        assert!(b.depth_buf().iter().all(|&z| z == f32::INFINITY));
        assert_eq!(b.covered(), 0);
        assert_eq!(b.aspect_ratio(), 2.0);
    }

    #[test]
    fn mismatched_upload_is_error() {
        let mut b = Softbuf::new((4, 4));
        let res = b.upload_mesh(&TRI, &NORMALS[..6]);
        assert!(matches!(res, Err(Error::Buffer(_))), "{res:?}");
        let res = b.upload_mesh(&TRI[..4], &NORMALS[..4]);
        assert!(matches!(res, Err(Error::Buffer(_))), "{res:?}");
    }

    #[test]
    fn filled_triangle_covers_center_only() {
        let mut b = backend();
        b.set_uniforms(&uniforms(3.0));
        b.draw(Primitive::Triangles, 0, 3);

        let center = b.pixel(8, 8);
        assert_ne!(center, 0);
        // Facing the light head-on, nearly fully lit
        assert!(center & 0xFF > 240, "{center:#08x}");
        assert_eq!(center >> 16 & 0xFF, center & 0xFF);

        assert_eq!(b.pixel(0, 0), 0);
        assert_eq!(b.pixel(15, 0), 0);
        assert!(b.depth_buf()[8 * 16 + 8] < 1.0);
    }

    #[test]
    fn nearer_fragments_win() {
        let mut b = backend();
        b.set_uniforms(&uniforms(3.0));
        b.draw(Primitive::Triangles, 0, 3);
        let near = b.depth_buf()[8 * 16 + 8];

        b.set_uniforms(&uniforms(5.0));
        b.draw(Primitive::Triangles, 0, 3);
        assert_eq!(b.depth_buf()[8 * 16 + 8], near);
    }

    #[test]
    fn later_fragments_overdraw_without_depth_test() {
        let mut b = Softbuf::new((16, 16));
        b.upload_mesh(&TRI, &NORMALS).unwrap();
        b.bind_mesh();
        b.clear();

        let mut dim = uniforms(3.0);
        dim.light_intensity = 0.5;
        b.set_uniforms(&uniforms(3.0));
        b.draw(Primitive::Triangles, 0, 3);
        b.set_uniforms(&dim);
        b.draw(Primitive::Triangles, 0, 3);
        assert!(b.pixel(8, 8) & 0xFF < 140);
    }

    #[test]
    fn line_loop_draws_outline() {
        let mut b = backend();
        b.set_uniforms(&uniforms(3.0));
        b.draw(Primitive::LineLoop, 0, 3);
        assert!(b.covered() > 0);
        assert_eq!(b.pixel(8, 8), 0);
    }

    #[test]
    fn triangle_behind_camera_is_dropped() {
        let mut b = backend();
        b.set_uniforms(&uniforms(-3.0));
        b.draw(Primitive::Triangles, 0, 3);
        assert_eq!(b.covered(), 0);
    }

    #[test]
    fn invalid_draws_are_ignored() {
        let mut b = Softbuf::new((8, 8));
        b.upload_mesh(&TRI, &NORMALS).unwrap();
        b.bind_mesh();
        // No uniforms
        b.draw(Primitive::Triangles, 0, 3);
        b.set_uniforms(&uniforms(3.0));
        // Out of bounds
        b.draw(Primitive::Triangles, 0, 6);
        assert_eq!(b.covered(), 0);
    }
}
