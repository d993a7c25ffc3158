//! Commands from the UI to a drawing surface.

use serde::{Deserialize, Serialize};

use crate::types::Tool;

/// Commands accepted by a drawing surface.
///
/// Coordinates are logical pixels relative to the surface's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SurfaceCommand {
    BeginStroke {
        x: f32,
        y: f32,
        tool: Tool,
        /// `#rrggbb`
        color: String,
        width: u32,
    },
    ContinueStroke { x: f32, y: f32 },
    EndStroke,
    Undo,
    Redo,
    Reset,
    /// Request the current drawing as a PNG data URL
    Export,
    /// Layout width or target ratio changed
    Resize { display_width: u32, aspect_ratio: f32 },
}
