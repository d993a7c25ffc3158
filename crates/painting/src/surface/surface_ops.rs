//! Read-only surface queries

use crate::raster::Snapshot;
use crate::types::Rgba;

use super::DrawingSurface;

impl DrawingSurface {
    /// Whether the surface has been sized and can be drawn on
    pub fn is_sized(&self) -> bool {
        self.raster.is_some()
    }

    /// Raster width in device pixels (0 if unsized)
    pub fn width(&self) -> u32 {
        self.raster.as_ref().map_or(0, |r| r.width())
    }

    /// Raster height in device pixels (0 if unsized)
    pub fn height(&self) -> u32 {
        self.raster.as_ref().map_or(0, |r| r.height())
    }

    /// Get a single pixel's color
    ///
    /// Returns None if unsized or out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.raster.as_ref()?.get_pixel(x, y)
    }

    /// Copy of the current raster
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.raster.as_ref().map(|r| r.capture())
    }

    /// Whether the live raster matches a snapshot pixel for pixel
    pub fn pixels_eq(&self, snapshot: &Snapshot) -> bool {
        self.raster.as_ref().is_some_and(|r| {
            r.width() == snapshot.width()
                && r.height() == snapshot.height()
                && r.pixels() == snapshot.pixels()
        })
    }
}
