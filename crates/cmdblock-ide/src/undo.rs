//! Snapshot-based undo/redo.
//!
//! Each entry is a full copy of the text plus the caret, so restoring never has to replay edits.
//! Command text is short enough for that to stay cheap.

use std::collections::VecDeque;
use tracing::debug;

/// Default capacity of each stack.
pub const DEFAULT_UNDO_DEPTH: usize = 100;

/// Immutable capture of the editor state at an undo boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// Caret column on the focused line (0 without focus).
    pub cursor: usize,
    /// Focused line.
    pub line: Option<usize>,
    /// Full text, lines joined with `\n`.
    pub text: String,
}

/// Edits of the same class coalesce into one undo step while they follow each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditClass {
    /// Enter.
    Newline,
    /// Backspace and Delete.
    Erase,
    /// Typed characters and Tab.
    Insert,
}

/// Two bounded snapshot stacks. When a stack is full the oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct UndoRedoManager {
    undo_stack: VecDeque<EditorSnapshot>,
    redo_stack: VecDeque<EditorSnapshot>,
    capacity: usize,
}

impl UndoRedoManager {
    /// Create a manager keeping at most `capacity` entries per stack (at least one).
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo entries, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &EditorSnapshot> {
        self.undo_stack.iter()
    }

    /// Push an undo boundary.
    ///
    /// The redo stack is cleared unless the snapshot comes from a redo. A snapshot equal to the
    /// current top is not pushed twice.
    pub fn record(&mut self, snapshot: EditorSnapshot, from_redo: bool) {
        if !from_redo {
            self.redo_stack.clear();
        }
        if self.undo_stack.back() == Some(&snapshot) {
            return;
        }
        push_bounded(&mut self.undo_stack, snapshot, self.capacity, "undo");
    }

    /// Pop the latest undo entry, saving `current` for redo. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        let snapshot = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.capacity, "redo");
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "undo"
        );
        Some(snapshot)
    }

    /// Pop the latest redo entry, saving `current` as a redo-sourced undo boundary.
    pub fn redo(&mut self, current: EditorSnapshot) -> Option<EditorSnapshot> {
        let snapshot = self.redo_stack.pop_back()?;
        self.record(current, true);
        debug!(
            undo = self.undo_stack.len(),
            redo = self.redo_stack.len(),
            "redo"
        );
        Some(snapshot)
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

fn push_bounded(
    stack: &mut VecDeque<EditorSnapshot>,
    snapshot: EditorSnapshot,
    capacity: usize,
    name: &'static str,
) {
    if stack.len() >= capacity {
        stack.pop_front();
        debug!(stack = name, capacity, "evicted oldest snapshot");
    }
    stack.push_back(snapshot);
}
