//! Pointer input events delivered by the host.

use serde::{Deserialize, Serialize};

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Mouse,
    Pen,
    Touch,
}

/// Pointer events in surface-local logical pixels.
///
/// `ReleasedOutside` is a release observed by a document-wide listener,
/// i.e. outside the surface's own event target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        id: u32,
        kind: PointerKind,
        primary: bool,
        x: f32,
        y: f32,
    },
    Move {
        id: u32,
        kind: PointerKind,
        primary: bool,
        x: f32,
        y: f32,
    },
    Up { id: u32 },
    Leave { id: u32 },
    Enter { id: u32 },
    ReleasedOutside { id: u32 },
    /// The platform took the pointer away (e.g. a touch turned into a scroll)
    Cancel { id: u32 },
}
