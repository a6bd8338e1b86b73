//! Browser entry point rendering a rotating geodesic sphere with WebGL2.
//!
//! The exported functions are meant to be wired to HTML sliders and
//! buttons; each queues a control applied at the start of the next frame.

use std::cell::RefCell;
use std::rc::Rc;

use log::LevelFilter;
use wasm_bindgen::prelude::*;

use gs::math::rads;
use gs::render::{
    Pipeline, Settings,
    scene::{Control, State},
};
use gs_front::dims::SVGA_800_600;
use gs_front::wasm::{self, Input, WebGl};
use gs_geom::solids::geosphere;

thread_local! {
    static INPUT: Rc<RefCell<Input>> = Rc::default();
}

// Entry point from JS
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm::init_logger(LevelFilter::Info);

    let to_js = |e: gs::render::Error| JsValue::from_str(&e.to_string());
    let backend = WebGl::new(SVGA_800_600).map_err(to_js)?;
    let pipeline = Pipeline::new(backend, Settings::default(), geosphere);
    wasm::run(pipeline, State::default(), input()).map_err(to_js)
}

/// Returns the input shared by the exported functions and the render loop.
pub fn input() -> Rc<RefCell<Input>> {
    INPUT.with(Rc::clone)
}

fn push(ctl: Control) {
    input().borrow_mut().push(ctl);
}

/// Sets the camera distance, from 2 to 10.
#[wasm_bindgen]
pub fn set_distance(r: f32) {
    push(Control::Distance(r));
}

/// Sets the horizontal camera angle, in radians from 0 to 2π.
#[wasm_bindgen]
pub fn set_azimuth(rad: f32) {
    push(Control::Azimuth(rads(rad)));
}

/// Sets the vertical camera angle, in radians from 0 to π.
#[wasm_bindgen]
pub fn set_polar(rad: f32) {
    push(Control::Polar(rads(rad)));
}

/// Sets the subdivision level, from 1 to 5.
#[wasm_bindgen]
pub fn set_level(level: u32) {
    push(Control::Level(level));
}

/// Sets the light intensity, from 0 to 1.
#[wasm_bindgen]
pub fn set_light_intensity(i: f32) {
    push(Control::LightIntensity(i));
}

#[wasm_bindgen]
pub fn toggle_rotation() {
    push(Control::ToggleRotation);
}

#[wasm_bindgen]
pub fn toggle_wireframe() {
    push(Control::ToggleWireframe);
}

/// Stops the render loop.
#[wasm_bindgen]
pub fn stop() {
    input().borrow_mut().quit();
}
