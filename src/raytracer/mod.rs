pub mod config;
mod gradient;

pub use config::{parse_config, parse_scene, Config, ParseError, Scene};
pub use gradient::{generate_gradient, GradientError};
