//! Parses a configuration and a scene file and lists what they declare.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use raytracer_scene::raytracer::{self, ParseError};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<PathBuf> = std::env::args_os().map(PathBuf::from).collect();
    let [_, config, scene] = args.as_slice() else {
        let program = args
            .first()
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "parse_check".to_string());
        eprintln!("Usage: {program} <config.txt> <scene.txt>");
        return ExitCode::from(1);
    };

    match check(config, scene) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}

fn check(config: &Path, scene: &Path) -> Result<(), ParseError> {
    let config = raytracer::parse_config(config)?;
    let scene = raytracer::parse_scene(scene)?;

    println!(
        "Config loaded. image_width={}, gamma={}",
        config.image_width, config.gamma
    );
    println!("Materials: {}", scene.materials().len());
    for material in scene.materials() {
        println!(" - {}", material.name);
    }
    println!("Objects: {}", scene.objects().len());
    for object in scene.objects() {
        println!(" - {} material={}", object.kind, object.material);
    }
    Ok(())
}
