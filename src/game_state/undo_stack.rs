/// LIFO of prior-state values written by `Move::make` and consumed by `Move::unmake`.
///
/// One stack is owned by each search and passed down the recursion by `&mut`,
/// so nested makes never allocate once the stack has grown to search depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoStack {
    values: Vec<i32>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, value: i32) {
        self.values.push(value);
    }

    /// Pop the most recent value. Popping an empty stack is a caller bug:
    /// debug builds panic, release builds return 0 (which `unmake` writes
    /// back as an empty square). Do not rely on the release value.
    #[inline]
    pub fn pop(&mut self) -> i32 {
        debug_assert!(!self.values.is_empty(), "undo stack underflow");
        self.values.pop().unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
