use geosphere_core::assert_approx_eq;
use geosphere_core::prelude::*;

fn orbit_params() -> impl Iterator<Item = CameraParams> {
    (0..=8).flat_map(|i| {
        (0..=4).map(move |j| CameraParams {
            radius: 2.0 + i as f32,
            theta: turns(i as f32 / 8.0),
            phi: turns(j as f32 / 8.0),
        })
    })
}

#[test]
fn target_is_always_straight_ahead() {
    let orbit = Orbit::default();
    let proj = Projection::default().matrix(4.0 / 3.0);

    for cam in orbit_params() {
        assert!(cam.is_valid(), "{cam:?}");
        let view = orbit.view(&cam);

        let target = view.apply(&orbit.target);
        assert!(target.is_finite(), "{cam:?}");
        assert_approx_eq!(target, vec3(0.0, 0.0, -cam.radius), eps = 1e-4);

        let ndc: Vec3 = proj.apply(&target).project_to_real();
        assert_approx_eq!(ndc.x(), 0.0, eps = 1e-5);
        assert_approx_eq!(ndc.y(), 0.0, eps = 1e-5);
        assert!(-1.0 < ndc.z() && ndc.z() < 1.0, "{cam:?}: {ndc:?}");
    }
}

#[test]
fn orbit_view_is_rigid() {
    let orbit = Orbit::default();
    for cam in orbit_params() {
        let (view, normal) = orbit.compute_view(&cam);
        assert_approx_eq!(view.determinant(), 1.0, eps = 1e-5);
        for v in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert_approx_eq!(
                normal.apply_linear(&v),
                view.apply_linear(&v),
                eps = 1e-5
            );
        }
    }
}

#[test]
fn eye_distance_is_radius() {
    let orbit = Orbit::default();
    for cam in orbit_params() {
        let view = orbit.view(&cam);
        let eye = orbit.target + cam.eye();
        assert_approx_eq!(cam.eye().len(), cam.radius, eps = 1e-5);
        assert_approx_eq!(view.apply(&eye).len(), 0.0, eps = 1e-4);
    }
}

#[test]
fn light_follows_camera() {
    // A light fixed in view space lights the side of the sphere facing
    // the camera, wherever the camera is
    let orbit = Orbit::default();
    let light = PointLight::<View>::new(vec3(0.0, 0.0, 0.0), 1.0);
    let sh = Shading::default();

    for cam in orbit_params() {
        let view = orbit.view(&cam);
        let toward_cam = cam.eye().normalize();
        let (pt, n) = (view.apply(&toward_cam), view.apply_linear(&toward_cam));
        let lum = sh.lighting(n, light.direction(pt), light.intensity);
        assert_approx_eq!(lum, 1.0, eps = 1e-4);
    }
}
