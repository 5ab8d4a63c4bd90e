use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use raytracer_scene::ppm::{self, PpmError};
use raytracer_scene::raytracer::{self, GradientError, ParseError};

/// `<config> <scene> <output>`, taken verbatim: no argument is treated as a
/// flag, so paths may start with `-`.
#[derive(Clone, Debug)]
struct Args {
    config: PathBuf,
    scene: PathBuf,
    output: PathBuf,
}

impl Args {
    /// Expects exactly three arguments after the program name; otherwise
    /// returns how many were given.
    fn from_args_os(args: impl Iterator<Item = OsString>) -> Result<Self, usize> {
        let args: Vec<OsString> = args.skip(1).collect();
        match <[OsString; 3]>::try_from(args) {
            Ok([config, scene, output]) => Ok(Args {
                config: config.into(),
                scene: scene.into(),
                output: output.into(),
            }),
            Err(args) => Err(args.len()),
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Gradient(#[from] GradientError),
    #[error(transparent)]
    Output(#[from] PpmError),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Parse(_) | CliError::Gradient(_) => ExitCode::from(2),
            CliError::Output(_) => ExitCode::from(3),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match Args::from_args_os(std::env::args_os()) {
        Ok(args) => args,
        Err(count) => {
            eprintln!("Error: Invalid number of arguments: {count}");
            return ExitCode::from(1);
        }
    };

    match run(&args) {
        Ok((width, height)) => {
            println!("Wrote {} ({width}x{height})", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    }
}

fn run(args: &Args) -> Result<(u32, u32), CliError> {
    let config = raytracer::parse_config(&args.config)?;
    let scene = raytracer::parse_scene(&args.scene)?;
    log::info!("configuration:\n{}", config.summary());
    log::info!(
        "scene: {} materials, {} objects",
        scene.materials().len(),
        scene.objects().len()
    );

    let image = raytracer::generate_gradient(&config)?;
    ppm::save_ppm(&image, &args.output)?;
    Ok(image.dimensions())
}
