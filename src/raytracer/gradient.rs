use image::{Rgb, RgbImage};
use nalgebra::Vector3;
use rayon::prelude::*;
use thiserror::Error;

use crate::raytracer::config::Config;

#[derive(Debug, Error, PartialEq)]
pub enum GradientError {
    #[error("Error: Image size {width}x{height} is too large")]
    TooLarge { width: u32, height: u64 },

    #[error("Error: Invalid image dimensions: width {width}, aspect ratio {numerator}:{denominator}")]
    InvalidDimensions {
        width: u32,
        numerator: u32,
        denominator: u32,
    },
}

/// Fills an image with a vertical background gradient.
///
/// The top row is `background_light_color`, the bottom row
/// `background_dark_color`; every channel is gamma corrected.
pub fn generate_gradient(config: &Config) -> Result<RgbImage, GradientError> {
    let width = config.image_width;
    let (numerator, denominator) = config.aspect_ratio;
    let height = config
        .image_height()
        .filter(|_| width > 0)
        .ok_or(GradientError::InvalidDimensions {
            width,
            numerator,
            denominator,
        })?;
    let too_large = || GradientError::TooLarge { width, height };
    let rows = u32::try_from(height).map_err(|_| too_large())?;
    let row_len = usize::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(3))
        .ok_or_else(too_large)?;
    if row_len.checked_mul(rows as usize).is_none() {
        return Err(too_large());
    }

    let mut image = RgbImage::new(width, rows);
    let light = config.background_light_color;
    let dark = config.background_dark_color;
    let gamma = config.gamma;

    image
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| {
            let t = if rows == 1 {
                0.0
            } else {
                y as f64 / f64::from(rows - 1)
            };
            let color = light * (1.0 - t) + dark * t;
            let pixel = to_rgb(&color, gamma);
            for chunk in row.chunks_exact_mut(3) {
                chunk.copy_from_slice(&pixel.0);
            }
        });

    log::debug!("generated {width}x{rows} gradient");
    Ok(image)
}

fn to_rgb(color: &Vector3<f64>, gamma: f64) -> Rgb<u8> {
    Rgb([
        to_u8(color.x, gamma),
        to_u8(color.y, gamma),
        to_u8(color.z, gamma),
    ])
}

/// Maps a channel in [0, 1] to 0..=255 after gamma correction.
fn to_u8(value: f64, gamma: f64) -> u8 {
    let corrected = value.clamp(0.0, 1.0).powf(1.0 / gamma);
    (corrected * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
}
