//! Linear undo/redo history of raster snapshots

use std::collections::VecDeque;

use tracing::debug;

use crate::raster::Snapshot;
use crate::types::UndoRedoState;

/// Undo and redo stacks of full-raster snapshots
///
/// The undo side is bounded; once full, the oldest entry is dropped.
/// Recording a new action clears the redo side.
///
/// An action in progress is recorded with [`UndoRedoStack::open`] and is
/// only made permanent by [`UndoRedoStack::commit`]. Until then the undo
/// side may hold one entry over the limit and the cleared redo entries are
/// kept aside, so [`UndoRedoStack::rollback`] loses nothing.
#[derive(Debug)]
pub struct UndoRedoStack {
    /// Oldest at the front, most recent at the back
    undo: VecDeque<Snapshot>,
    /// Most recent at the end
    redo: Vec<Snapshot>,
    /// Redo entries set aside by an open action
    pending_redo: Option<Vec<Snapshot>>,
    max_depth: usize,
}

impl UndoRedoStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            pending_redo: None,
            max_depth: max_depth.max(1),
        }
    }

    /// Record the state before a new action and commit it at once
    pub fn push(&mut self, before: Snapshot) {
        self.open(before);
        self.commit();
    }

    /// Record the state before an action that may still be rolled back
    pub fn open(&mut self, before: Snapshot) {
        self.commit();
        self.pending_redo = Some(std::mem::take(&mut self.redo));
        self.undo.push_back(before);
    }

    /// Make the open action permanent
    pub fn commit(&mut self) {
        self.pending_redo = None;
        self.trim();
    }

    /// Undo the open action as if it never happened
    ///
    /// Returns the snapshot recorded by [`UndoRedoStack::open`], or None if
    /// no action is open.
    pub fn rollback(&mut self) -> Option<Snapshot> {
        let redo = self.pending_redo.take()?;
        self.redo = redo;
        self.undo.pop_back()
    }

    pub fn is_open(&self) -> bool {
        self.pending_redo.is_some()
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        self.trim();
    }

    fn trim(&mut self) {
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
            debug!("Undo history full, dropped oldest entry");
        }
    }

    /// Step back one action
    ///
    /// `current` is only called when there is something to undo; its result
    /// goes onto the redo stack. Returns the snapshot to restore. An open
    /// action is committed first.
    pub fn undo(&mut self, current: impl FnOnce() -> Snapshot) -> Option<Snapshot> {
        self.commit();
        let previous = self.undo.pop_back()?;
        self.redo.push(current());
        Some(previous)
    }

    /// Step forward one undone action
    pub fn redo(&mut self, current: impl FnOnce() -> Snapshot) -> Option<Snapshot> {
        self.commit();
        let next = self.redo.pop()?;
        self.push_undo(current());
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.pending_redo = None;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn state(&self) -> UndoRedoState {
        UndoRedoState {
            undo: self.can_undo(),
            redo: self.can_redo(),
        }
    }
}
