use std::process::ExitCode;

use clap::Parser;

use gs::render::Pipeline;
use gs_front::{Result, minifb::Window, soft::Softbuf};
use gs_geom::solids::geosphere;

use geosphere_demos::{Common, setup_logger};

/// Renders a rotating geodesic sphere in a window.
///
/// Arrow keys orbit the camera, + and - zoom, 1 to 5 set the subdivision
/// level, [ and ] adjust the light, R toggles rotation, W toggles
/// wireframe, and Esc quits.
#[derive(Parser, Debug)]
#[command(name = "sphere", version, about)]
struct Cli {
    #[command(flatten)]
    common: Common,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logger(cli.common.log_level) {
        eprintln!("failed to set up logger: {e}");
        return ExitCode::FAILURE;
    }
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result {
    let config = cli.common.config()?;
    let mut win = Window::builder()
        .title(&config.window.title)
        .dims(config.dims())
        .target_fps(config.target_fps())
        .build()?;

    let backend = Softbuf::new(config.dims());
    let (mut st, settings) = config.into_parts();
    let mut pipeline = Pipeline::new(backend, settings, geosphere);
    win.run(&mut pipeline, &mut st)
}
