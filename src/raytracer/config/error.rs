use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::material::MaterialKind;

/// Result type alias for description file parsing
pub type Result<T> = std::result::Result<T, ParseError>;

/// Everything that can abort the parse of a configuration or scene file.
///
/// The rendered messages are consumed verbatim by whoever runs the tool, so
/// their text (including the quoted source line) must not drift.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Error: Could not open file: {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error: Could not read input: {source}")]
    Read {
        #[from]
        source: io::Error,
    },

    #[error("Error: Unknown configuration key: [{key}]")]
    UnknownKey { key: String },

    #[error("Error: Unknown scene entity: {name}")]
    UnknownEntity { name: String },

    #[error("Error: Invalid value for key: [{key}]\nLine: \"{line}\"")]
    InvalidValue { key: String, line: String },

    #[error(
        "Error: Extra data after configuration value for key: [{key}]\nExtra: \"{extra}\"\nLine: \"{line}\""
    )]
    ExtraData {
        key: String,
        extra: String,
        line: String,
    },

    #[error("Error: Material with name [{name}] already exists\nLine: \"{line}\"")]
    DuplicateMaterial { name: String, line: String },

    #[error("Error: Invalid {kind} material parameters\nLine: \"{line}\"")]
    InvalidMaterialParams { kind: MaterialKind, line: String },

    #[error("Error: Invalid sphere parameters\nLine: \"{line}\"")]
    InvalidSphereParams { line: String },

    #[error("Error: Invalid cylinder parameters\nLine: \"{line}\"")]
    InvalidCylinderParams { line: String },

    #[error("Error: Material not found: [{name}]\nLine: \"{line}\"")]
    MaterialNotFound { name: String, line: String },
}
