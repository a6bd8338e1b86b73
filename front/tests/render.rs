use std::ops::ControlFlow::Continue;

use geosphere_front::{pnm::write_ppm, soft::Softbuf};
use gs::geom::Mesh;
use gs::math::rads;
use gs::render::{
    Pipeline, Settings,
    scene::{Control, State},
};
use gs_geom::solids::geosphere;

type Generate = fn(u32) -> Mesh;

fn pipeline(dims: (u32, u32)) -> Pipeline<Softbuf, Generate> {
    let generate: Generate = geosphere;
    Pipeline::new(Softbuf::new(dims), Settings::default(), generate)
}

#[test]
fn sphere_is_centered_and_lit() {
    let mut p = pipeline((64, 48));
    let mut st = State::default();
    p.init(&st).unwrap();
    assert_eq!(p.frame(&mut st).unwrap(), Continue(()));

    let b = p.backend();
    // Radius 1 at distance 5 with a 45° vertical field of view covers
    // roughly a fifth of the image height
    let covered = b.covered();
    assert!(covered > 50 && covered < 64 * 48 / 4, "covered: {covered}");
    assert_ne!(b.pixel(32, 24), 0);
    assert_eq!(b.pixel(0, 0), 0);
    assert_eq!(b.pixel(63, 47), 0);
}

#[test]
fn zero_intensity_is_black() {
    let mut p = pipeline((32, 32));
    let mut st = State::default();
    st.scene.light_intensity = 0.0;
    p.init(&st).unwrap();
    assert_eq!(p.frame(&mut st).unwrap(), Continue(()));
    assert_eq!(p.backend().covered(), 0);
}

#[test]
fn lit_side_is_brighter() {
    let mut p = pipeline((64, 64));
    let mut st = State::default();
    st.scene.auto_rotate = false;
    p.init(&st).unwrap();
    assert_eq!(p.frame(&mut st).unwrap(), Continue(()));

    // The light is up and to the right of the camera
    let b = p.backend();
    let upper_right = b.pixel(35, 28) & 0xFF;
    let lower_left = b.pixel(28, 35) & 0xFF;
    assert!(upper_right > lower_left, "{upper_right} <= {lower_left}");
}

#[test]
fn wireframe_covers_less_than_solid() {
    let mut p = pipeline((256, 256));
    let mut st = State::default();
    p.init(&st).unwrap();
    assert_eq!(p.frame(&mut st).unwrap(), Continue(()));
    let solid = p.backend().covered();

    p.push(Control::ToggleWireframe);
    p.push(Control::Level(1));
    assert_eq!(p.frame(&mut st).unwrap(), Continue(()));
    let wire = p.backend().covered();
    assert!(wire > 0 && wire < solid, "{wire} vs {solid}");
}

#[test]
fn views_along_up_axis_render() {
    use std::f32::consts::FRAC_PI_2;
    for theta in [FRAC_PI_2, 3.0 * FRAC_PI_2] {
        let mut p = pipeline((32, 32));
        let mut st = State::default();
        st.camera.theta = rads(theta);
        st.camera.phi = rads(FRAC_PI_2);
        p.init(&st).unwrap();
        assert_eq!(p.frame(&mut st).unwrap(), Continue(()));
        assert!(p.backend().covered() > 0, "theta = {theta}");
        assert_ne!(p.backend().pixel(16, 16), 0);
    }
}

#[test]
fn frame_to_ppm() {
    let mut p = pipeline((8, 6));
    let mut st = State::default();
    p.init(&st).unwrap();
    assert_eq!(p.frame(&mut st).unwrap(), Continue(()));

    let mut out = Vec::new();
    write_ppm(&mut out, (8, 6), p.backend().color_buf()).unwrap();
    assert!(out.starts_with(b"P6 8 6 255\n"));
    assert_eq!(out.len(), b"P6 8 6 255\n".len() + 8 * 6 * 3);
}
