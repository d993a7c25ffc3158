//! Shared value types used across the protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Drawing tool selected in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

/// Availability of undo/redo, for button enablement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UndoRedoState {
    pub undo: bool,
    pub redo: bool,
}

/// Outcome of scoring one drawing against its reference flag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Percentage of matching pixels, 0.0..=100.0, unrounded
    pub accuracy: f64,
    /// Pixels whose color distance exceeded the threshold
    pub differing_pixel_count: u64,
}

impl ComparisonResult {
    /// The result reported when scoring could not be carried out
    pub const ZERO: Self = Self {
        accuracy: 0.0,
        differing_pixel_count: 0,
    };

    /// Build a result from a diff count over a grid of `total` pixels
    pub fn from_counts(differing: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let differing = differing.min(total);
        let accuracy = (1.0 - differing as f64 / total as f64) * 100.0;
        Self {
            accuracy: accuracy.clamp(0.0, 100.0),
            differing_pixel_count: differing,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.accuracy == 0.0 && self.differing_pixel_count == 0
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.accuracy)
    }
}

/// One country from the flag dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagEntry {
    /// Common country name
    pub name: String,
    /// Raster image of the flag
    pub reference_image_url: String,
    /// Accessible description of the flag, when the dataset has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Flag emoji
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}
