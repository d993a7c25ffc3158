//! Pointer routing - turns raw pointer events into surface strokes
//!
//! This module handles:
//! - Primary-pointer selection (secondary touches never start or extend strokes)
//! - The stroke lifecycle: down -> begin, move -> continue, up -> end
//! - Releases outside the surface, via a temporary "released anywhere"
//!   listener that is armed on leave and disarmed on re-entry
//! - The current brush settings chosen in the UI

use flagdraw_ipc::PointerEvent;
use glam::Vec2;
use tracing::debug;

use crate::surface::DrawingSurface;
use crate::types::{BrushSettings, HexColor, Tool};
use crate::validation::ValidationError;

/// Feeds pointer events from one surface's host into a [`DrawingSurface`]
#[derive(Debug, Default)]
pub struct PointerRouter {
    settings: BrushSettings,
    /// Pointer driving the active stroke
    active: Option<u32>,
    /// Pointer whose release we are listening for outside the surface
    release_listener: Option<u32>,
}

impl PointerRouter {
    pub fn new(settings: BrushSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.settings
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.settings.color = color;
    }

    pub fn set_width(&mut self, width: u32) -> Result<(), ValidationError> {
        self.settings.set_width(width)
    }

    /// Whether the host should currently deliver releases that happen
    /// outside the surface as [`PointerEvent::ReleasedOutside`]
    pub fn wants_release_outside(&self) -> bool {
        self.release_listener.is_some()
    }

    /// Pointer currently drawing, if any
    pub fn active_pointer(&self) -> Option<u32> {
        self.active
    }

    /// Route one event to the surface
    pub fn handle(
        &mut self,
        surface: &mut DrawingSurface,
        event: PointerEvent,
    ) -> Result<(), ValidationError> {
        match event {
            PointerEvent::Down {
                id,
                kind,
                primary,
                x,
                y,
            } => {
                if self.active.is_some() || !primary {
                    debug!("Ignoring {:?} pointer {} down while busy or secondary", kind, id);
                    return Ok(());
                }
                surface.begin_stroke(
                    Vec2::new(x, y),
                    self.settings.tool,
                    self.settings.color,
                    self.settings.width(),
                )?;
                if surface.is_stroking() {
                    self.active = Some(id);
                }
            }
            PointerEvent::Move { id, x, y, .. } => {
                if self.active == Some(id) {
                    surface.continue_stroke(Vec2::new(x, y));
                }
            }
            PointerEvent::Up { id } => {
                if self.active == Some(id) {
                    self.finish(surface);
                }
            }
            PointerEvent::Leave { id } => {
                if self.active == Some(id) && self.release_listener.is_none() {
                    debug!("Pointer {} left while drawing, listening for release", id);
                    self.release_listener = Some(id);
                }
            }
            PointerEvent::Enter { id } => {
                if self.release_listener == Some(id) {
                    debug!("Pointer {} re-entered, dropping release listener", id);
                    self.release_listener = None;
                }
            }
            PointerEvent::ReleasedOutside { id } => {
                if self.release_listener == Some(id) {
                    self.finish(surface);
                }
            }
            PointerEvent::Cancel { id } => {
                if self.active == Some(id) {
                    surface.cancel_stroke();
                    self.active = None;
                    self.release_listener = None;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self, surface: &mut DrawingSurface) {
        surface.end_stroke();
        self.active = None;
        self.release_listener = None;
    }
}
