//! Stroke handling for the drawing surface

use glam::Vec2;
use tracing::debug;

use crate::brush::LineBrush;
use crate::types::{HexColor, StrokeState, Tool};
use crate::validation::{ValidationError, validate_line_width};

use super::DrawingSurface;

impl DrawingSurface {
    /// Begin a stroke at `point` (logical pixels)
    ///
    /// Records the current raster for undo, clears redo and paints a round
    /// dot at the start point. A second begin while a stroke is active is
    /// ignored, as is a begin on an unsized surface.
    pub fn begin_stroke(
        &mut self,
        point: Vec2,
        tool: Tool,
        color: HexColor,
        width: u32,
    ) -> Result<(), ValidationError> {
        validate_line_width(width)?;

        if self.stroke.is_some() {
            debug!("begin_stroke: stroke already active, ignoring");
            return Ok(());
        }
        let Some(raster) = self.raster.as_mut() else {
            debug!("begin_stroke: surface not sized yet, ignoring");
            return Ok(());
        };

        self.history.open(raster.capture());

        let paint = match tool {
            Tool::Pen => color.to_rgba(),
            Tool::Eraser => self.background,
        };
        let scale = self.config.scale;
        let start = point * scale;
        let brush = LineBrush::new(paint, width as f32 * scale / 2.0);
        brush.dab(raster, start);

        self.stroke = Some(StrokeState {
            tool,
            paint,
            width,
            radius: brush.radius(),
            last: start,
        });

        debug!(
            "Began {:?} stroke at ({:.1}, {:.1}), width={}",
            tool, point.x, point.y, width
        );
        self.notify_history();
        Ok(())
    }

    /// Extend the active stroke with a straight segment to `point`
    pub fn continue_stroke(&mut self, point: Vec2) {
        let Some(stroke) = self.stroke.as_mut() else {
            debug!("continue_stroke: no active stroke, ignoring");
            return;
        };
        let Some(raster) = self.raster.as_mut() else {
            return;
        };

        let next = point * self.config.scale;
        LineBrush::new(stroke.paint, stroke.radius).segment(raster, stroke.last, next);
        stroke.last = next;
    }

    /// Finish the active stroke; does nothing if none is active
    pub fn end_stroke(&mut self) {
        if let Some(stroke) = self.stroke.take() {
            self.history.commit();
            debug!("Ended {:?} stroke (width {})", stroke.tool, stroke.width);
        }
    }

    /// Abandon the active stroke and erase what it painted
    ///
    /// The history entry recorded by `begin_stroke` is consumed to restore
    /// the raster, and the redo entries the begin cleared come back. History
    /// ends up exactly as it was before the stroke.
    pub fn cancel_stroke(&mut self) {
        if self.stroke.take().is_none() {
            return;
        }
        if let (Some(raster), Some(before)) = (self.raster.as_mut(), self.history.rollback()) {
            raster.restore(&before, self.background);
            debug!("Cancelled stroke, raster restored");
        }
        self.notify_history();
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }
}
