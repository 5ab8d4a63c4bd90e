use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use nalgebra::Vector3;

use super::error::{ParseError, Result};
use super::lines::{split_arguments, Line, LineReader};
use super::scalar::{
    is_unit_color, parse_float_strict, parse_positive_int, parse_vector, InvalidNumber,
};

/// Global rendering configuration.
///
/// Every field starts at its documented default and is only overwritten by a
/// matching key in the configuration file.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub image_width: u32,
    /// `(numerator, denominator)`, e.g. `(16, 9)`.
    pub aspect_ratio: (u32, u32),
    pub gamma: f64,
    pub camera_position: Vector3<f64>,
    pub camera_target: Vector3<f64>,
    pub camera_north: Vector3<f64>,
    /// Degrees, strictly between 0 and 180.
    pub field_of_view: f64,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub material_rng_seed: u32,
    pub ray_rng_seed: u32,
    pub background_dark_color: Vector3<f64>,
    pub background_light_color: Vector3<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            image_width: 1920,
            aspect_ratio: (16, 9),
            gamma: 2.2,
            camera_position: Vector3::new(0.0, 0.0, -10.0),
            camera_target: Vector3::zeros(),
            camera_north: Vector3::new(0.0, 1.0, 0.0),
            field_of_view: 90.0,
            samples_per_pixel: 20,
            max_depth: 5,
            material_rng_seed: 13,
            ray_rng_seed: 19,
            background_dark_color: Vector3::new(0.25, 0.5, 1.0),
            background_light_color: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Config {
    /// Image height derived from the width and the aspect ratio, rounded down.
    /// `None` when the aspect ratio numerator is zero.
    pub fn image_height(&self) -> Option<u64> {
        let (numerator, denominator) = self.aspect_ratio;
        (u64::from(self.image_width) * u64::from(denominator)).checked_div(u64::from(numerator))
    }

    pub fn summary(&self) -> String {
        let p = &self.camera_position;
        let t = &self.camera_target;
        let n = &self.camera_north;
        format!(
            "Image Size: {}x{} (aspect {}:{}, gamma {})\n\
             Camera Position: ({}, {}, {}), Target: ({}, {}, {}), North: ({}, {}, {}), FOV: {}\n\
             Sampling: {} samples per pixel, max depth {}, seeds {}/{}",
            self.image_width,
            self.image_height().map_or_else(|| "?".to_string(), |h| h.to_string()),
            self.aspect_ratio.0,
            self.aspect_ratio.1,
            self.gamma,
            p.x,
            p.y,
            p.z,
            t.x,
            t.y,
            t.z,
            n.x,
            n.y,
            n.z,
            self.field_of_view,
            self.samples_per_pixel,
            self.max_depth,
            self.material_rng_seed,
            self.ray_rng_seed,
        )
    }
}

/// Writes the configuration back in file syntax, one key per line.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn vector(v: &Vector3<f64>) -> String {
            format!("{} {} {}", v.x, v.y, v.z)
        }

        writeln!(f, "image_width: {}", self.image_width)?;
        writeln!(
            f,
            "aspect_ratio: {} {}",
            self.aspect_ratio.0, self.aspect_ratio.1
        )?;
        writeln!(f, "gamma: {}", self.gamma)?;
        writeln!(f, "camera_position: {}", vector(&self.camera_position))?;
        writeln!(f, "camera_target: {}", vector(&self.camera_target))?;
        writeln!(f, "camera_north: {}", vector(&self.camera_north))?;
        writeln!(f, "field_of_view: {}", self.field_of_view)?;
        writeln!(f, "samples_per_pixel: {}", self.samples_per_pixel)?;
        writeln!(f, "max_depth: {}", self.max_depth)?;
        writeln!(f, "material_rng_seed: {}", self.material_rng_seed)?;
        writeln!(f, "ray_rng_seed: {}", self.ray_rng_seed)?;
        writeln!(
            f,
            "background_dark_color: {}",
            vector(&self.background_dark_color)
        )?;
        writeln!(
            f,
            "background_light_color: {}",
            vector(&self.background_light_color)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ConfigKey {
    ImageWidth,
    AspectRatio,
    Gamma,
    CameraPosition,
    CameraTarget,
    CameraNorth,
    FieldOfView,
    SamplesPerPixel,
    MaxDepth,
    MaterialRngSeed,
    RayRngSeed,
    BackgroundDarkColor,
    BackgroundLightColor,
}

/// A value that failed to parse or fell outside its allowed domain.
struct Rejected;

impl From<InvalidNumber> for Rejected {
    fn from(_: InvalidNumber) -> Self {
        Rejected
    }
}

impl ConfigKey {
    fn from_token(token: &str) -> Option<Self> {
        let key = match token {
            "image_width:" => ConfigKey::ImageWidth,
            "aspect_ratio:" => ConfigKey::AspectRatio,
            "gamma:" => ConfigKey::Gamma,
            "camera_position:" => ConfigKey::CameraPosition,
            "camera_target:" => ConfigKey::CameraTarget,
            "camera_north:" => ConfigKey::CameraNorth,
            "field_of_view:" => ConfigKey::FieldOfView,
            "samples_per_pixel:" => ConfigKey::SamplesPerPixel,
            "max_depth:" => ConfigKey::MaxDepth,
            "material_rng_seed:" => ConfigKey::MaterialRngSeed,
            "ray_rng_seed:" => ConfigKey::RayRngSeed,
            "background_dark_color:" => ConfigKey::BackgroundDarkColor,
            "background_light_color:" => ConfigKey::BackgroundLightColor,
            _ => return None,
        };
        Some(key)
    }

    fn as_str(self) -> &'static str {
        match self {
            ConfigKey::ImageWidth => "image_width:",
            ConfigKey::AspectRatio => "aspect_ratio:",
            ConfigKey::Gamma => "gamma:",
            ConfigKey::CameraPosition => "camera_position:",
            ConfigKey::CameraTarget => "camera_target:",
            ConfigKey::CameraNorth => "camera_north:",
            ConfigKey::FieldOfView => "field_of_view:",
            ConfigKey::SamplesPerPixel => "samples_per_pixel:",
            ConfigKey::MaxDepth => "max_depth:",
            ConfigKey::MaterialRngSeed => "material_rng_seed:",
            ConfigKey::RayRngSeed => "ray_rng_seed:",
            ConfigKey::BackgroundDarkColor => "background_dark_color:",
            ConfigKey::BackgroundLightColor => "background_light_color:",
        }
    }

    /// Number of values following the key.
    fn arity(self) -> usize {
        match self {
            ConfigKey::ImageWidth
            | ConfigKey::Gamma
            | ConfigKey::FieldOfView
            | ConfigKey::SamplesPerPixel
            | ConfigKey::MaxDepth
            | ConfigKey::MaterialRngSeed
            | ConfigKey::RayRngSeed => 1,
            ConfigKey::AspectRatio => 2,
            ConfigKey::CameraPosition
            | ConfigKey::CameraTarget
            | ConfigKey::CameraNorth
            | ConfigKey::BackgroundDarkColor
            | ConfigKey::BackgroundLightColor => 3,
        }
    }

    /// Validates `values` (already of the right arity) and stores them.
    fn apply(self, config: &mut Config, values: &[&str]) -> std::result::Result<(), Rejected> {
        match self {
            ConfigKey::ImageWidth => config.image_width = parse_positive_int(values[0])?,
            ConfigKey::AspectRatio => {
                let numerator = parse_positive_int(values[0])?;
                let denominator = parse_positive_int(values[1])?;
                config.aspect_ratio = (numerator, denominator);
            }
            ConfigKey::Gamma => config.gamma = parse_float_strict(values[0])?,
            ConfigKey::CameraPosition => config.camera_position = parse_vector(values)?,
            ConfigKey::CameraTarget => config.camera_target = parse_vector(values)?,
            ConfigKey::CameraNorth => config.camera_north = parse_vector(values)?,
            ConfigKey::FieldOfView => {
                let fov = parse_float_strict(values[0])?;
                if !(fov > 0.0 && fov < 180.0) {
                    return Err(Rejected);
                }
                config.field_of_view = fov;
            }
            ConfigKey::SamplesPerPixel => config.samples_per_pixel = parse_positive_int(values[0])?,
            ConfigKey::MaxDepth => config.max_depth = parse_positive_int(values[0])?,
            ConfigKey::MaterialRngSeed => config.material_rng_seed = parse_positive_int(values[0])?,
            ConfigKey::RayRngSeed => config.ray_rng_seed = parse_positive_int(values[0])?,
            ConfigKey::BackgroundDarkColor => config.background_dark_color = parse_color(values)?,
            ConfigKey::BackgroundLightColor => {
                config.background_light_color = parse_color(values)?
            }
        }
        Ok(())
    }
}

fn parse_color(values: &[&str]) -> std::result::Result<Vector3<f64>, Rejected> {
    let color = parse_vector(values)?;
    if !is_unit_color(&color) {
        return Err(Rejected);
    }
    Ok(color)
}

/// Loads and parses a configuration file.
///
/// The file is read top to bottom and the first invalid line aborts the whole
/// parse; no partially filled configuration is ever returned.
pub fn parse_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config_from(BufReader::new(file))?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
}

/// Parses configuration directives from any buffered reader.
pub fn parse_config_from<R: BufRead>(reader: R) -> Result<Config> {
    let mut config = Config::default();
    let mut seen = HashSet::new();
    for line in LineReader::new(reader) {
        let line = line?;
        if let Some(key) = parse_line(&line, &mut config)? {
            if !seen.insert(key) {
                log::warn!("configuration key {} given more than once", key.as_str());
            }
        }
    }
    Ok(config)
}

fn parse_line(line: &Line, config: &mut Config) -> Result<Option<ConfigKey>> {
    let tokens = line.tokens();
    let Some(&first) = tokens.first() else {
        return Ok(None);
    };
    let key = ConfigKey::from_token(first).ok_or_else(|| ParseError::UnknownKey {
        key: first.to_string(),
    })?;
    let invalid = || ParseError::InvalidValue {
        key: key.as_str().to_string(),
        line: line.raw.clone(),
    };
    let values = split_arguments(&tokens, key.arity(), &line.raw, invalid)?;
    key.apply(config, values).map_err(|_| invalid())?;
    log::debug!("accepted {}", line.raw.trim());
    Ok(Some(key))
}
