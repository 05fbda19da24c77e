use crate::drawing::Drawing;
use crate::error::HistoryError;

/// Default number of undo steps that are kept
pub const DEFAULT_MAX_DEPTH: usize = 50;

/// Undo/redo history made of drawing snapshots.
///
/// The history lives next to the drawing rather than inside it: call
/// [`DrawingHistory::record`] with the drawing *before* mutating it, then
/// [`DrawingHistory::undo`] / [`DrawingHistory::redo`] swap snapshots in and out.
#[derive(Debug, Clone)]
pub struct DrawingHistory {
    /// Snapshots that can be restored by undo, oldest first
    undo_stack: Vec<Drawing>,
    /// Snapshots that can be restored by redo
    redo_stack: Vec<Drawing>,
    max_depth: usize,
}

impl Default for DrawingHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl DrawingHistory {
    /// Creates a new empty history keeping at most `max_depth` undo steps
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Remember the state of `drawing` before it gets changed
    pub fn record(&mut self, drawing: &Drawing) {
        self.undo_stack.push(drawing.clone());
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        // A new change invalidates whatever was undone before
        self.redo_stack.clear();
    }

    /// Restore the previous snapshot into `drawing`
    pub fn undo(&mut self, drawing: &mut Drawing) -> Result<(), HistoryError> {
        let previous = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        let current = std::mem::replace(drawing, previous);
        self.redo_stack.push(current);
        Ok(())
    }

    /// Re-apply the last undone snapshot
    pub fn redo(&mut self, drawing: &mut Drawing) -> Result<(), HistoryError> {
        let next = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        let current = std::mem::replace(drawing, next);
        self.undo_stack.push(current);
        Ok(())
    }

    /// Returns true if there are snapshots that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are snapshots that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
