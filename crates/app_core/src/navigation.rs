//! Navigation state: logical index, history stack and index normalization
//!
//! The stored index is *logical*: steps and random jumps move it freely, and
//! it may sit far outside the catalog. It is only mapped into range by
//! [`normalize_index`] when an item is resolved for display, and that mapped
//! value is never written back.

use std::collections::VecDeque;

/// Maximum number of entries kept in the history stack
pub const HISTORY_CAPACITY: usize = 10;

/// Direction of a sequential step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Map a logical index onto a catalog of `len` items.
///
/// Returns `None` for an empty catalog. Negative indices wrap from the end
/// (`-1` is the last item); everything else is reduced modulo `len`. The
/// result is always in `[0, len)`, including for indices far below `-len`.
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let n = i64::try_from(len).ok().filter(|n| *n > 0)?;

    let mut i = index;
    if i < 0 {
        // Cannot overflow: i < 0 < n
        i += n;
    }

    // rem_euclid is never negative for n > 0
    Some(i.rem_euclid(n) as usize)
}

/// Bounded LIFO of previously visited logical indices.
///
/// Pushing past capacity evicts the oldest entry; popping returns the newest.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<i64>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record an index, evicting the oldest entry if full
    pub fn push(&mut self, index: i64) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(index);
    }

    /// Take the most recent entry
    pub fn pop(&mut self) -> Option<i64> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &i64> {
        self.entries.iter()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// Current logical position plus back-navigation history
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    index: i64,
    history: History,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logical (unnormalized) index
    pub fn index(&self) -> i64 {
        self.index
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Record the current index, then move one step
    pub fn step(&mut self, direction: Direction) {
        self.history.push(self.index);
        self.index = self.index.wrapping_add(direction.delta());
    }

    /// Jump to a raw index, optionally recording the current one first
    pub fn jump_to(&mut self, index: i64, record_history: bool) {
        if record_history {
            self.history.push(self.index);
        }
        self.index = index;
    }

    /// Restore the most recently recorded index.
    ///
    /// Returns `false` and leaves the index alone when history is empty.
    pub fn go_back(&mut self) -> bool {
        match self.history.pop() {
            Some(prev) => {
                self.index = prev;
                true
            }
            None => false,
        }
    }

    /// Forget history and return to the first position
    pub fn reset(&mut self) {
        self.history.clear();
        self.index = 0;
    }

    /// Display index for a catalog of `len` items
    pub fn display_index(&self, len: usize) -> Option<usize> {
        normalize_index(self.index, len)
    }
}
