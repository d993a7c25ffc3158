//! Exporting the drawing as an encoded image

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;
use tracing::warn;

use super::DrawingSurface;

/// Prefix of the data URLs produced by [`DrawingSurface::export_image`]
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

impl DrawingSurface {
    /// The live raster encoded as PNG
    ///
    /// Returns None if the surface has not been sized yet.
    pub fn export_png(&self) -> Option<Vec<u8>> {
        let image = self.raster.as_ref()?.to_image()?;
        let mut bytes = Vec::new();
        if let Err(e) = image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png) {
            warn!("Failed to encode surface as PNG: {}", e);
            return None;
        }
        Some(bytes)
    }

    /// The live raster as a `data:image/png;base64,` URL
    pub fn export_image(&self) -> Option<String> {
        let png = self.export_png()?;
        Some(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)))
    }
}
