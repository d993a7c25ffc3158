//! flagdraw painting - the raster drawing surface
//!
//! This crate provides:
//! - [`raster`] - RGBA raster buffers and immutable snapshots
//! - [`brush`] - Round line brush used for pen and eraser strokes
//! - [`history`] - Bounded undo/redo stacks of snapshots
//! - [`surface`] - The drawing surface: strokes, history, resizing, export
//! - [`input`] - Pointer routing from host events to strokes
//! - [`validation`] - Checks for caller-supplied values

pub mod brush;
pub mod constants;
pub mod history;
pub mod input;
pub mod raster;
pub mod surface;
pub mod types;
pub mod validation;

pub use brush::*;
pub use constants::*;
pub use history::*;
pub use input::*;
pub use raster::*;
pub use surface::{DrawingSurface, HistoryListener, PNG_DATA_URL_PREFIX, SharedSurface};
pub use types::*;
pub use validation::*;
