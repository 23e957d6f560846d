use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Half-open interval `[start, start + size)` addressing part of a sequence.
///
/// Windows produced by the event samplers may reach past the end of the
/// sequence they refer to. Operators call [`Window::clamp`] before touching
/// any bases, so reads never go out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: usize,
    pub size: usize,
}

impl Window {
    #[inline]
    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// Exclusive end coordinate.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.size)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Truncate the window to a sequence of length `len`.
    ///
    /// A window starting at or beyond `len` becomes empty (anchored at `len`).
    #[inline]
    pub fn clamp(&self, len: usize) -> Self {
        let start = self.start.min(len);
        let size = self.size.min(len - start);
        Self { start, size }
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_within_bounds_unchanged() {
        let w = Window::new(2, 3);
        assert_eq!(w.clamp(10), w);
        assert_eq!(w.range(), 2..5);
    }

    #[test]
    fn test_window_clamp_truncates_tail() {
        assert_eq!(Window::new(6, 10).clamp(8), Window::new(6, 2));
    }

    #[test]
    fn test_window_clamp_start_past_end() {
        let w = Window::new(12, 4).clamp(8);
        assert_eq!(w, Window::new(8, 0));
        assert!(w.is_empty());
    }

    #[test]
    fn test_window_end_saturates() {
        assert_eq!(Window::new(usize::MAX - 1, 5).end(), usize::MAX);
    }

    #[test]
    fn test_window_display() {
        assert_eq!(Window::new(3, 4).to_string(), "[3, 7)");
    }
}
