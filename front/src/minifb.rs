//! Frontend using the `minifb` crate for window creation and event handling.

use std::ops::ControlFlow::{Break, Continue};

use minifb::{Key, KeyRepeat, WindowOptions};

use gs::geom::Mesh;
use gs::math::degs;
use gs::render::{
    Error as RenderError, Pipeline,
    scene::{Control, State},
};

use crate::{Dims, Result, dims::SVGA_800_600, soft::Softbuf};

/// A lightweight wrapper of a `minifb` window.
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: Dims,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: SVGA_800_600,
            title: "geosphere",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate (the main loop runs as fast as possible).
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }
    /// Sets other `minifb` options.
    pub fn options(mut self, opts: WindowOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Creates the window.
    ///
    /// # Errors
    /// If the window cannot be opened.
    pub fn build(self) -> Result<Window> {
        let Self { dims, title, target_fps, opts } = self;
        let mut imp =
            minifb::Window::new(title, dims.0 as usize, dims.1 as usize, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps as usize);
        }
        log::info!("opened {}x{} window", dims.0, dims.1);
        Ok(Window { imp, dims })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Updates the window content with pixel data from `fb`.
    ///
    /// The data is interpreted as colors in `0x00_RR_GG_BB` format.
    ///
    /// # Errors
    /// If `fb.len() < self.dims.0 * self.dims.1`, or updating the window
    /// otherwise fails.
    pub fn present(&mut self, fb: &[u32]) -> Result {
        let (w, h) = self.dims;
        self.imp
            .update_with_buffer(fb, w as usize, h as usize)
            .map_err(|e| RenderError::Present(e.to_string()))?;
        Ok(())
    }

    /// Returns the controls triggered by keys pressed since the last frame.
    ///
    /// Camera keys repeat while held; the others fire once per press.
    pub fn controls(&self) -> impl Iterator<Item = Control> + use<> {
        let held = self.imp.get_keys_pressed(KeyRepeat::Yes);
        let once = self.imp.get_keys_pressed(KeyRepeat::No);
        held.into_iter()
            .filter(|&k| repeats(k))
            .chain(once.into_iter().filter(|&k| !repeats(k)))
            .filter_map(key_control)
    }

    /// Runs the main loop of the program, rendering frames with `pipeline`
    /// and presenting them in the window until the pipeline stops.
    ///
    /// The pipeline is stopped, and this function returns, when:
    /// * the user closes the window via the GUI (e.g. titlebar close button);
    /// * the Esc key is pressed; or
    /// * rendering a frame fails, in which case the error is returned.
    pub fn run<G>(
        &mut self,
        pipeline: &mut Pipeline<Softbuf, G>,
        st: &mut State,
    ) -> Result
    where
        G: FnMut(u32) -> Mesh,
    {
        pipeline.init(st).inspect_err(|e| {
            log::error!("failed to initialize pipeline: {e}");
        })?;
        loop {
            if self.should_quit() {
                pipeline.stop();
            }
            pipeline.controls_mut().extend(self.controls());

            match pipeline.frame(st) {
                Ok(Continue(())) => {}
                Ok(Break(())) => break,
                Err(e) => {
                    log::error!("frame failed: {e}");
                    return Err(e.into());
                }
            }
            self.present(pipeline.backend().color_buf())?;
        }
        println!("{}", pipeline.stats());
        Ok(())
    }

    fn should_quit(&self) -> bool {
        !self.imp.is_open() || self.imp.is_key_down(Key::Escape)
    }
}

/// Returns whether `key` should keep firing while held down.
fn repeats(key: Key) -> bool {
    use Key::*;
    matches!(
        key,
        Left | Right | Up | Down | Equal | Minus | NumPadPlus | NumPadMinus
    )
}

/// Returns the control bound to `key`, if any.
///
/// | Key            | Control                   |
/// |----------------|---------------------------|
/// | ← →            | orbit horizontally        |
/// | ↑ ↓            | orbit vertically          |
/// | + −            | zoom in and out           |
/// | 1–5            | set subdivision level     |
/// | [ ]            | dim and brighten light    |
/// | R              | toggle rotation           |
/// | W              | toggle wireframe          |
pub fn key_control(key: Key) -> Option<Control> {
    use Control::*;
    const STEP: f32 = 2.0;
    const ZOOM: f32 = 0.25;
    const LIGHT: f32 = 0.1;

    let zero = degs(0.0);
    Some(match key {
        Key::Left => Orbit { az: degs(-STEP), pol: zero },
        Key::Right => Orbit { az: degs(STEP), pol: zero },
        Key::Up => Orbit { az: zero, pol: degs(-STEP) },
        Key::Down => Orbit { az: zero, pol: degs(STEP) },
        Key::Equal | Key::NumPadPlus => Zoom(-ZOOM),
        Key::Minus | Key::NumPadMinus => Zoom(ZOOM),
        Key::Key1 => Level(1),
        Key::Key2 => Level(2),
        Key::Key3 => Level(3),
        Key::Key4 => Level(4),
        Key::Key5 => Level(5),
        Key::LeftBracket => AdjustLight(-LIGHT),
        Key::RightBracket => AdjustLight(LIGHT),
        Key::R => ToggleRotation,
        Key::W => ToggleWireframe,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_keys() {
        assert_eq!(key_control(Key::Key1), Some(Control::Level(1)));
        assert_eq!(key_control(Key::Key5), Some(Control::Level(5)));
        assert_eq!(key_control(Key::Key6), None);
    }

    #[test]
    fn toggles_do_not_repeat() {
        assert!(!repeats(Key::R));
        assert!(!repeats(Key::W));
        assert!(repeats(Key::Left));
        assert_eq!(key_control(Key::W), Some(Control::ToggleWireframe));
    }

    #[test]
    fn plus_zooms_in() {
        let Some(Control::Zoom(d)) = key_control(Key::Equal) else {
            panic!("expected zoom");
        };
        assert!(d < 0.0);
        assert_eq!(key_control(Key::Escape), None);
    }
}
