//! Drawing surface
//!
//! [`DrawingSurface`] owns the live raster, the stroke state machine and the
//! undo/redo history. Callers drive it through a narrow command set:
//! - `begin_stroke`, `continue_stroke`, `end_stroke`, `cancel_stroke`
//! - `undo`, `redo`, `reset`
//! - `resize`, `set_device_scale`
//! - `export_image`, `export_png`
//!
//! The raster itself is never handed out; readers get pixels or a
//! [`Snapshot`] copy. Every operation here is synchronous.

mod commands;
mod export;
mod resize;
mod stroke;
mod surface_ops;
mod undo;

pub use export::PNG_DATA_URL_PREFIX;

use std::sync::{Arc, Mutex};

use flagdraw_config::{DEFAULT_HISTORY_DEPTH, FlagdrawConfig, SurfaceConfig};

use crate::constants::BACKGROUND_COLOR;
use crate::history::UndoRedoStack;
use crate::raster::RasterBuffer;
use crate::types::{HexColor, Rgba, StrokeState, UndoRedoState};

/// Callback fired after every history mutation
pub type HistoryListener = Box<dyn Fn(UndoRedoState) + Send + Sync>;

/// A surface shared with a multi-threaded host
///
/// Strokes and resizes must not interleave; the mutex serializes them.
pub type SharedSurface = Arc<Mutex<DrawingSurface>>;

/// Raster drawing surface with reversible stroke history
pub struct DrawingSurface {
    /// Sizing state, only changed by the resize operations
    pub(crate) config: SurfaceConfig,
    /// Live raster; `None` until the first resize
    pub(crate) raster: Option<RasterBuffer>,
    pub(crate) background: Rgba,
    /// Active stroke (None if not drawing)
    pub(crate) stroke: Option<StrokeState>,
    pub(crate) history: UndoRedoStack,
    pub(crate) listeners: Vec<HistoryListener>,
}

impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("config", &self.config)
            .field("sized", &self.raster.is_some())
            .field("stroking", &self.stroke.is_some())
            .field("undo", &self.history.undo_count())
            .field("redo", &self.history.redo_count())
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_HISTORY_DEPTH)
    }
}

impl DrawingSurface {
    /// Create an unsized surface
    ///
    /// Nothing can be drawn until [`DrawingSurface::resize`] gives it a size.
    pub fn new(device_scale: f32, history_depth: usize) -> Self {
        Self {
            config: SurfaceConfig::with_scale(device_scale),
            raster: None,
            background: BACKGROUND_COLOR,
            stroke: None,
            history: UndoRedoStack::new(history_depth),
            listeners: Vec::new(),
        }
    }

    /// Create an unsized surface from application config
    pub fn with_config(config: &FlagdrawConfig) -> Self {
        Self::new(config.device_scale, config.history_depth)
    }

    /// Use a background other than white; must be set before the first resize
    pub fn with_background(mut self, background: HexColor) -> Self {
        self.background = background.to_rgba();
        self
    }

    /// Wrap for use from several threads
    pub fn into_shared(self) -> SharedSurface {
        Arc::new(Mutex::new(self))
    }

    /// Register a listener for undo/redo availability changes
    pub fn on_history_change<F>(&mut self, listener: F)
    where
        F: Fn(UndoRedoState) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn notify_history(&self) {
        let state = self.history.state();
        for listener in &self.listeners {
            listener(state);
        }
    }

    pub fn undo_redo_state(&self) -> UndoRedoState {
        self.history.state()
    }

    pub fn undo_count(&self) -> usize {
        self.history.undo_count()
    }

    pub fn redo_count(&self) -> usize {
        self.history.redo_count()
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn background(&self) -> Rgba {
        self.background
    }
}
