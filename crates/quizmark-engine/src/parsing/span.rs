/// A byte range `[start, end)` into the text being parsed.
///
/// Scanners store spans rather than copied text; slicing the source with a
/// span reproduces the exact bytes it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Borrows the covered text out of `src`.
    ///
    /// Spans produced by the scanners always fall on char boundaries.
    pub fn slice(self, src: &str) -> &str {
        &src[self.start..self.end]
    }
}
