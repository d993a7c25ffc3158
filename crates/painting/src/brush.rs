//! Round line brush
//!
//! Strokes are rasterized as capsules: every segment between two pointer
//! samples is painted with round caps, so consecutive segments join
//! smoothly no matter how sparse the samples are. Paint is an opaque
//! overwrite; the eraser is the same brush loaded with the background color.

use glam::Vec2;
use tracing::trace;

use crate::constants::MIN_BRUSH_RADIUS;
use crate::raster::RasterBuffer;
use crate::types::Rgba;

/// Region of the raster touched by one brush operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Brush that paints solid round-capped lines
#[derive(Debug, Clone, Copy)]
pub struct LineBrush {
    color: Rgba,
    radius: f32,
}

impl LineBrush {
    /// Brush with the given color and radius in device pixels
    pub fn new(color: Rgba, radius: f32) -> Self {
        Self {
            color,
            radius: radius.max(MIN_BRUSH_RADIUS),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Paint a single round dab
    pub fn dab(&self, raster: &mut RasterBuffer, at: Vec2) -> Option<DirtyRect> {
        self.segment(raster, at, at)
    }

    /// Paint a straight segment with round caps
    ///
    /// Only pixels inside the segment's bounding box are visited. Returns
    /// `None` if the segment lies entirely off the raster.
    pub fn segment(&self, raster: &mut RasterBuffer, from: Vec2, to: Vec2) -> Option<DirtyRect> {
        let r = self.radius;
        let min = from.min(to) - Vec2::splat(r);
        let max = from.max(to) + Vec2::splat(r);

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(raster.width());
        let y1 = (max.y.ceil().max(0.0) as u32).min(raster.height());
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        let axis = to - from;
        let length_sq = axis.length_squared();
        let r_sq = r * r;

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if length_sq > f32::EPSILON {
                    ((center - from).dot(axis) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let nearest = from + axis * t;
                if center.distance_squared(nearest) <= r_sq {
                    raster.set_pixel(x, y, self.color);
                }
            }
        }

        trace!(
            "segment ({:.1}, {:.1}) -> ({:.1}, {:.1}) r={:.1}",
            from.x, from.y, to.x, to.y, r
        );

        Some(DirtyRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba = [255, 255, 255, 255];
    const RED: Rgba = [255, 0, 0, 255];

    fn painted(raster: &RasterBuffer) -> usize {
        raster.pixels().iter().filter(|p| **p == RED).count()
    }

    #[test]
    fn test_dab_is_round() {
        let mut raster = RasterBuffer::new(64, 64, WHITE);
        let brush = LineBrush::new(RED, 10.0);
        brush.dab(&mut raster, Vec2::new(32.0, 32.0)).unwrap();

        assert_eq!(raster.get_pixel(32, 32), Some(RED));
        assert_eq!(raster.get_pixel(40, 32), Some(RED));
        // Corner of the bounding box lies outside the circle
        assert_eq!(raster.get_pixel(23, 23), Some(WHITE));

        let area = painted(&raster) as f32;
        let expected = std::f32::consts::PI * 100.0;
        assert!((area - expected).abs() / expected < 0.1);
    }

    #[test]
    fn test_thin_dab_is_visible() {
        let mut raster = RasterBuffer::new(8, 8, WHITE);
        LineBrush::new(RED, 0.5).dab(&mut raster, Vec2::new(3.0, 3.0));
        assert!(painted(&raster) >= 1);
    }

    #[test]
    fn test_segment_round_caps() {
        let mut raster = RasterBuffer::new(100, 40, WHITE);
        let brush = LineBrush::new(RED, 4.0);
        let rect = brush
            .segment(&mut raster, Vec2::new(20.0, 20.0), Vec2::new(80.0, 20.0))
            .unwrap();

        assert_eq!(raster.get_pixel(50, 20), Some(RED));
        // Cap extends past the end point
        assert_eq!(raster.get_pixel(82, 20), Some(RED));
        assert_eq!(raster.get_pixel(90, 20), Some(WHITE));
        assert_eq!(raster.get_pixel(50, 30), Some(WHITE));
        assert_eq!(rect.x, 16);
        assert_eq!(rect.width, 68);
    }

    #[test]
    fn test_segment_clipped_to_raster() {
        let mut raster = RasterBuffer::new(10, 10, WHITE);
        let brush = LineBrush::new(RED, 3.0);
        let rect = brush
            .segment(&mut raster, Vec2::new(-5.0, 5.0), Vec2::new(20.0, 5.0))
            .unwrap();
        assert_eq!((rect.x, rect.width), (0, 10));

        assert!(
            brush
                .segment(&mut raster, Vec2::new(-50.0, -50.0), Vec2::new(-40.0, -40.0))
                .is_none()
        );
    }
}
