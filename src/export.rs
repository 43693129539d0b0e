use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::surface::Surface;

/// Errors that can occur while snapshotting the surface
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Surface buffer does not match its dimensions")]
    InvalidDimensions,

    #[error("Failed to encode PNG: {0}")]
    PngEncode(#[from] image::ImageError),
}

/// Snapshot the surface's pixels as a `data:image/png;base64,...` string.
///
/// Produced fresh at the end of every stroke; each snapshot replaces the
/// previous one.
pub fn surface_to_png_data_url(surface: &Surface) -> Result<String, ExportError> {
    let mut rgba = Vec::with_capacity(surface.pixels().len() * 4);
    for pixel in surface.pixels() {
        rgba.extend_from_slice(&pixel.to_array());
    }

    let image = image::RgbaImage::from_raw(surface.width() as u32, surface.height() as u32, rgba)
        .ok_or(ExportError::InvalidDimensions)?;

    let mut png_bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut png_bytes), image::ImageFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(png_bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn export_round_trips_through_png() {
        let mut surface = Surface::new(5, 4).unwrap();
        surface.put_pixel(2, 1, Color32::from_rgb(255, 0, 0));

        let url = surface_to_png_data_url(&surface).unwrap();
        let b64 = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = STANDARD.decode(b64).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (5, 4));
        assert_eq!(decoded.get_pixel(2, 1), &image::Rgba([255, 0, 0, 255]));
        assert_eq!(decoded.get_pixel(0, 0), &image::Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn untouched_surface_still_exports() {
        let surface = Surface::new(2, 2).unwrap();
        let url = surface_to_png_data_url(&surface).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        assert!(url.len() > "data:image/png;base64,".len());
    }
}
