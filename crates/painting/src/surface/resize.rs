//! Resizing the surface to follow the host layout
//!
//! The raster is reallocated at `display_width x display_width / ratio`
//! logical pixels times the device scale. Existing content is copied to the
//! new raster at the origin without rescaling, so enlarging keeps every
//! drawn pixel and shrinking crops the right and bottom edges. Resizing is
//! not an edit: history is never touched. An active stroke carries on in
//! the new raster's device coordinates.

use flagdraw_config::SurfaceConfig;
use tracing::debug;

use crate::brush::LineBrush;
use crate::constants::MAX_SURFACE_SIZE;
use crate::raster::RasterBuffer;
use crate::validation::{ValidationError, validate_aspect_ratio, validate_scale};

use super::DrawingSurface;

impl DrawingSurface {
    /// Size the surface for a display width and aspect ratio
    ///
    /// Returns `Ok(false)` when nothing changed.
    pub fn resize(
        &mut self,
        display_width: u32,
        aspect_ratio: f32,
    ) -> Result<bool, ValidationError> {
        if display_width == 0 {
            return Err(ValidationError::InvalidDisplayWidth(display_width));
        }
        validate_aspect_ratio(aspect_ratio)?;

        let next = SurfaceConfig::for_width(display_width, aspect_ratio, self.config.scale);
        self.apply_size(next)
    }

    /// Change the device pixel scale, re-sizing the raster if already sized
    pub fn set_device_scale(&mut self, scale: f32) -> Result<bool, ValidationError> {
        validate_scale(scale)?;
        if !self.config.is_sized() {
            self.config.scale = scale;
            return Ok(false);
        }
        let next = SurfaceConfig::for_width(self.config.width, self.config.aspect_ratio, scale);
        self.apply_size(next)
    }

    fn apply_size(&mut self, next: SurfaceConfig) -> Result<bool, ValidationError> {
        if self.raster.is_some() && next == self.config {
            return Ok(false);
        }

        let (width, height) = (next.scaled_width(), next.scaled_height());
        if width == 0 || height == 0 {
            return Err(ValidationError::EmptySurface { width, height });
        }
        if width > MAX_SURFACE_SIZE || height > MAX_SURFACE_SIZE {
            return Err(ValidationError::SurfaceTooLarge {
                width,
                height,
                max: MAX_SURFACE_SIZE,
            });
        }

        let mut raster = RasterBuffer::new(width, height, self.background);
        match self.raster.take() {
            Some(previous) => {
                raster.copy_from(&previous);
                debug!(
                    "Resized surface {}x{} -> {}x{}",
                    previous.width(),
                    previous.height(),
                    width,
                    height
                );
            }
            None => debug!("Sized surface to {}x{}", width, height),
        }

        if let Some(stroke) = self.stroke.as_mut() {
            if next.scale != self.config.scale {
                stroke.last *= next.scale / self.config.scale;
                stroke.radius =
                    LineBrush::new(stroke.paint, stroke.width as f32 * next.scale / 2.0).radius();
            }
        }

        self.raster = Some(raster);
        self.config = next;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::constants::BACKGROUND_COLOR;

    #[test]
    fn test_first_sizing() {
        let mut surface = DrawingSurface::default();
        assert!(surface.resize(300, 1.5).unwrap());
        assert_eq!((surface.width(), surface.height()), (300, 200));
        assert_eq!(surface.config().height, 200);
        assert!(surface.snapshot().unwrap().pixels().iter().all(|p| *p == BACKGROUND_COLOR));
    }

    #[test]
    fn test_resize_preserves_content() {
        let mut surface = sized(100);
        stroke(&mut surface, RED, 6, &[(10.0, 10.0), (90.0, 45.0)]);
        let before = surface.snapshot().unwrap();

        assert!(surface.resize(200, 2.0).unwrap());
        assert_eq!((surface.width(), surface.height()), (200, 100));

        for y in 0..before.height() {
            for x in 0..before.width() {
                assert_eq!(surface.pixel(x, y), before.get_pixel(x, y));
            }
        }
        assert_eq!(surface.pixel(150, 80), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_shrink_crops() {
        let mut surface = sized(100);
        stroke(&mut surface, RED, 4, &[(10.0, 10.0)]);
        stroke(&mut surface, BLUE, 4, &[(90.0, 40.0)]);

        surface.resize(50, 2.0).unwrap();
        assert_eq!(surface.pixel(10, 10), Some(RED.to_rgba()));
        assert_eq!(surface.pixel(90, 40), None);
    }

    #[test]
    fn test_resize_idempotent() {
        let mut surface = sized(100);
        stroke(&mut surface, RED, 4, &[(10.0, 10.0)]);
        let before = surface.snapshot().unwrap();

        assert!(!surface.resize(100, 2.0).unwrap());
        assert!(surface.pixels_eq(&before));
        assert_eq!(surface.undo_count(), 1);
    }

    #[test]
    fn test_resize_not_undoable() {
        let mut plain = sized(100);
        let mut resized = sized(100);
        for surface in [&mut plain, &mut resized] {
            stroke(surface, RED, 4, &[(10.0, 10.0), (40.0, 10.0)]);
            stroke(surface, BLUE, 4, &[(10.0, 30.0), (40.0, 30.0)]);
        }

        resized.resize(160, 2.0).unwrap();
        assert_eq!(resized.undo_count(), plain.undo_count());
        assert_eq!(resized.redo_count(), 0);

        assert!(plain.undo());
        assert!(resized.undo());
        let expected = plain.snapshot().unwrap();
        for y in 0..expected.height() {
            for x in 0..expected.width() {
                assert_eq!(resized.pixel(x, y), expected.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_resize_mid_stroke_keeps_drawing() {
        let mut surface = sized(100);
        surface
            .begin_stroke(glam::Vec2::new(10.0, 10.0), crate::types::Tool::Pen, RED, 4)
            .unwrap();
        surface.resize(150, 2.0).unwrap();
        surface.continue_stroke(glam::Vec2::new(130.0, 10.0));
        surface.end_stroke();

        assert_eq!(surface.pixel(120, 10), Some(RED.to_rgba()));
        assert_eq!(surface.undo_count(), 1);
    }

    #[test]
    fn test_device_scale_change() {
        let mut surface = sized(100);
        assert!(surface.set_device_scale(2.0).unwrap());
        assert_eq!((surface.width(), surface.height()), (200, 100));
        assert!(!surface.set_device_scale(2.0).unwrap());
    }

    #[test]
    fn test_scale_change_mid_stroke() {
        let mut surface = sized(100);
        surface
            .begin_stroke(glam::Vec2::new(10.0, 10.0), crate::types::Tool::Pen, RED, 2)
            .unwrap();
        surface.set_device_scale(2.0).unwrap();
        surface.continue_stroke(glam::Vec2::new(20.0, 10.0));
        surface.end_stroke();

        // Segment runs from device (20,20) to (40,20) at the new scale
        assert_eq!(surface.pixel(30, 20), Some(RED.to_rgba()));
        assert_eq!(surface.pixel(15, 15), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_oversized_surface_refused() {
        let mut surface = DrawingSurface::default();
        assert!(matches!(
            surface.resize(200_000, 0.0001),
            Err(ValidationError::SurfaceTooLarge { .. })
        ));
        assert!(matches!(
            surface.resize(MAX_SURFACE_SIZE + 1, 1.0),
            Err(ValidationError::SurfaceTooLarge { .. })
        ));
        assert!(!surface.is_sized());

        let mut sized_surface = sized(100);
        stroke(&mut sized_surface, RED, 4, &[(10.0, 10.0)]);
        assert!(sized_surface.set_device_scale(1000.0).is_err());
        assert_eq!((sized_surface.width(), sized_surface.height()), (100, 50));
        assert_eq!(sized_surface.pixel(10, 10), Some(RED.to_rgba()));
        assert!(surface.resize(MAX_SURFACE_SIZE, 64.0).unwrap());
        assert_eq!((surface.width(), surface.height()), (MAX_SURFACE_SIZE, 128));
    }

    #[test]
    fn test_invalid_resize() {
        let mut surface = DrawingSurface::default();
        assert_eq!(surface.resize(0, 1.5), Err(ValidationError::InvalidDisplayWidth(0)));
        assert!(surface.resize(100, 0.0).is_err());
        assert!(surface.resize(100, f32::NAN).is_err());
        assert!(matches!(
            surface.resize(1, 4.0),
            Err(ValidationError::EmptySurface { .. })
        ));
        assert!(surface.set_device_scale(-1.0).is_err());
        assert!(!surface.is_sized());
    }
}
