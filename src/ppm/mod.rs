use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PpmError {
    #[error("Error: Could not open output file: {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error: Could not write output file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes `img` as a plain-text (P3) image.
///
/// The size line lists the number of rows before the number of columns, and
/// every pixel is written on its own line as `r g b`.
pub fn write_ppm<W: Write>(mut out: W, img: &RgbImage) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", img.height(), img.width())?;
    writeln!(out, "255")?;
    for pixel in img.pixels() {
        let [r, g, b] = pixel.0;
        writeln!(out, "{r} {g} {b}")?;
    }
    out.flush()
}

pub fn save_ppm(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), PpmError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| PpmError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_ppm(BufWriter::new(file), img).map_err(|source| PpmError::Write {
        path: path.to_path_buf(),
        source,
    })
}
