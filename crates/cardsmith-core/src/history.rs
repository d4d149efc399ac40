//! Bounded undo/redo history over immutable snapshots.

use std::collections::VecDeque;

/// Maximum number of entries kept on each of the undo and redo stacks.
pub const MAX_HISTORY: usize = 10;

/// Options for a single commit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitOptions {
    /// Replace the present value without recording an undo step.
    /// Used for derived corrections that are not user edits.
    pub skip_history: bool,
}

impl CommitOptions {
    pub fn skip_history() -> Self {
        Self { skip_history: true }
    }
}

/// Undo/redo history with a present value.
///
/// The front of `past` and `future` holds the most recent entry.
#[derive(Debug, Clone)]
pub struct History<T> {
    past: VecDeque<T>,
    present: T,
    future: VecDeque<T>,
}

impl<T: Clone + PartialEq> History<T> {
    /// Create a history whose present is `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            past: VecDeque::with_capacity(MAX_HISTORY + 1),
            present: initial,
            future: VecDeque::with_capacity(MAX_HISTORY + 1),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Commit a new present value.
    /// Returns true if the present changed.
    pub fn commit(&mut self, value: T, options: CommitOptions) -> bool {
        if options.skip_history {
            let changed = value != self.present;
            self.present = value;
            return changed;
        }
        if value == self.present {
            log::debug!("History: suppressed no-op commit");
            return false;
        }
        let previous = std::mem::replace(&mut self.present, value);
        push_bounded(&mut self.past, previous);
        self.future.clear();
        true
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.past.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, snapshot);
        push_bounded(&mut self.future, current);
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, snapshot);
        push_bounded(&mut self.past, current);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Drop all history and start over from `value`.
    pub fn reset(&mut self, value: T) {
        self.past.clear();
        self.future.clear();
        self.present = value;
    }
}

fn push_bounded<T>(stack: &mut VecDeque<T>, value: T) {
    stack.push_front(value);
    stack.truncate(MAX_HISTORY);
}
