use std::path::Path;

use gs_front::config::Config;

#[test]
fn sample_config_is_valid() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("geosphere.toml");
    let c = Config::load(&path).unwrap();
    assert_eq!(c.dims(), (800, 600));
    assert_eq!(c.scene.level, 3);

    let (st, _) = c.into_parts();
    assert!(st.camera.is_valid());
}
