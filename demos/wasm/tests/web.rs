#![cfg(target_arch = "wasm32")]

use gs::math::rads;
use gs::render::scene::Control;
use wasm_bindgen_test::*;

use geosphere_wasm_demo as demo;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn exported_functions_queue_controls() {
    demo::set_level(2);
    demo::set_azimuth(1.5);
    demo::set_polar(0.25);
    demo::toggle_wireframe();

    let input = demo::input();
    assert_eq!(
        input.borrow().pending(),
        [
            Control::Level(2),
            Control::Azimuth(rads(1.5)),
            Control::Polar(rads(0.25)),
            Control::ToggleWireframe,
        ]
    );
    assert!(!input.borrow().quit_requested());

    demo::stop();
    assert!(input.borrow().quit_requested());
}

#[wasm_bindgen_test]
fn webgl_upload_needs_program_and_replaces_mesh() {
    use gs::render::{Backend, Error};
    use gs_front::wasm::WebGl;
    use gs_geom::solids::geosphere;

    let mut gl = WebGl::new((64, 48)).unwrap();
    let mesh = geosphere(1);
    let res = gl.upload_mesh(mesh.flat_positions(), mesh.flat_normals());
    assert!(matches!(res, Err(Error::Buffer(_))));

    gl.link_program().unwrap();
    gl.upload_mesh(mesh.flat_positions(), mesh.flat_normals()).unwrap();
    let mesh = geosphere(2);
    gl.upload_mesh(mesh.flat_positions(), mesh.flat_normals()).unwrap();
}
