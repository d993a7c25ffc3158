//! Messages from the core back to the UI.

use serde::{Deserialize, Serialize};

use crate::types::{ComparisonResult, UndoRedoState};

/// Notifications sent from the core to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CoreToUi {
    /// Fired after every history mutation
    UndoRedoChanged(UndoRedoState),

    /// Reply to `SurfaceCommand::Export`; `None` if the surface is unsized
    Exported { data_url: Option<String> },

    /// Score for a finished round
    Scored {
        country: String,
        result: ComparisonResult,
    },

    /// Caller misuse reported back to the UI
    Error { code: String, message: String },
}
