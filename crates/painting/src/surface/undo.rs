//! Undo, redo and reset for the drawing surface

use tracing::debug;

use super::DrawingSurface;

impl DrawingSurface {
    /// Undo the last stroke
    ///
    /// Returns true if an undo was performed, false if no undo available.
    /// An active stroke is ended first so it becomes the undone one.
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        let Some(raster) = self.raster.as_mut() else {
            return false;
        };
        let Some(previous) = self.history.undo(|| raster.capture()) else {
            debug!("Undo: no entries available");
            return false;
        };

        raster.restore(&previous, self.background);
        debug!(
            "Undo: {} left, {} redoable",
            self.history.undo_count(),
            self.history.redo_count()
        );
        self.notify_history();
        true
    }

    /// Redo the last undone stroke
    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        let Some(raster) = self.raster.as_mut() else {
            return false;
        };
        let Some(next) = self.history.redo(|| raster.capture()) else {
            debug!("Redo: no entries available");
            return false;
        };

        raster.restore(&next, self.background);
        debug!(
            "Redo: {} undoable, {} left",
            self.history.undo_count(),
            self.history.redo_count()
        );
        self.notify_history();
        true
    }

    /// Blank the surface and forget all history
    ///
    /// Brush settings are not surface state and are unaffected.
    pub fn reset(&mut self) {
        self.end_stroke();
        self.history.clear();
        if let Some(raster) = self.raster.as_mut() {
            raster.fill(self.background);
        }
        debug!("Surface reset");
        self.notify_history();
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::super::test_support::*;
    use crate::constants::BACKGROUND_COLOR;
    use crate::types::{Tool, UndoRedoState};

    #[test]
    fn test_undo_restores_previous() {
        let mut surface = sized(100);
        stroke(&mut surface, RED, 4, &[(10.0, 10.0), (40.0, 10.0)]);
        stroke(&mut surface, BLUE, 4, &[(10.0, 30.0), (40.0, 30.0)]);

        assert!(surface.undo());
        assert_eq!(surface.pixel(25, 30), Some(BACKGROUND_COLOR));
        assert_eq!(surface.pixel(25, 10), Some(RED.to_rgba()));

        assert!(surface.undo());
        assert_eq!(surface.pixel(25, 10), Some(BACKGROUND_COLOR));
        assert!(!surface.undo());
    }

    #[test]
    fn test_redo_invalidated_by_new_stroke() {
        let mut surface = sized(100);
        stroke(&mut surface, RED, 4, &[(10.0, 10.0), (40.0, 10.0)]);
        stroke(&mut surface, BLUE, 4, &[(10.0, 30.0), (40.0, 30.0)]);
        surface.undo();

        stroke(&mut surface, RED, 4, &[(60.0, 40.0)]);
        let before = surface.snapshot().unwrap();

        assert!(!surface.redo());
        assert!(surface.pixels_eq(&before));
        assert_eq!(surface.pixel(25, 30), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_reset_idempotent() {
        let mut surface = sized(100);
        stroke(&mut surface, RED, 4, &[(10.0, 10.0), (40.0, 10.0)]);
        surface.undo();

        surface.reset();
        let first = surface.snapshot().unwrap();
        assert_eq!(surface.undo_redo_state(), UndoRedoState::default());

        surface.reset();
        assert!(surface.pixels_eq(&first));
        assert!(first.pixels().iter().all(|p| *p == BACKGROUND_COLOR));
        assert_eq!(surface.undo_redo_state(), UndoRedoState::default());
    }

    #[test]
    fn test_undo_mid_stroke_ends_it() {
        let mut surface = sized(100);
        surface
            .begin_stroke(Vec2::new(10.0, 10.0), Tool::Pen, RED, 4)
            .unwrap();
        surface.continue_stroke(Vec2::new(30.0, 10.0));

        assert!(surface.undo());
        assert!(!surface.is_stroking());
        assert_eq!(surface.pixel(20, 10), Some(BACKGROUND_COLOR));

        // Late moves from the same gesture are dropped
        surface.continue_stroke(Vec2::new(50.0, 10.0));
        assert_eq!(surface.pixel(40, 10), Some(BACKGROUND_COLOR));
    }

    #[test]
    fn test_unsized_history_ops() {
        let mut surface = crate::surface::DrawingSurface::default();
        assert!(!surface.undo());
        assert!(!surface.redo());
        surface.reset();
        assert_eq!(surface.undo_redo_state(), UndoRedoState::default());
    }
}
