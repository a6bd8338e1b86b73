use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use gs::render::Pipeline;
use gs_front::{Result, pnm::save_ppm, soft::Softbuf};
use gs_geom::solids::geosphere;

use geosphere_demos::{Common, setup_logger};

/// Renders a geodesic sphere without a window and saves the last frame
/// as a PPM image.
#[derive(Parser, Debug)]
#[command(name = "snapshot", version, about)]
struct Cli {
    #[command(flatten)]
    common: Common,

    /// Number of frames to render before saving.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Path of the output image.
    out: PathBuf,
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
    let dims = config.dims();
    let (mut st, settings) = config.into_parts();

    let mut pipeline = Pipeline::new(Softbuf::new(dims), settings, geosphere);
    pipeline.init(&st)?;
    for _ in 0..cli.frames {
        if pipeline.frame(&mut st)?.is_break() {
            break;
        }
    }
    save_ppm(&cli.out, dims, pipeline.backend().color_buf())?;
    println!("{}", pipeline.stats());
    Ok(())
}
