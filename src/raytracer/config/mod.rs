mod config_builder;
mod error;
mod lines;
mod material;
mod scalar;
mod scene_builder;
mod shape;

pub use config_builder::{parse_config, parse_config_from, Config};
pub use error::{ParseError, Result};
pub use lines::{Line, LineReader};
pub use material::{Material, MaterialKind};
pub use scalar::{parse_float_strict, parse_int_strict, InvalidNumber};
pub use scene_builder::{parse_scene, parse_scene_from, Scene};
pub use shape::{Object, ShapeKind};
