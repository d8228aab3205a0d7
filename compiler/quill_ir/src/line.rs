//! Source line numbers.

use std::fmt;

/// A 1-based source line number.
///
/// Quill diagnostics point at lines rather than byte ranges: every list in a
/// program records the line of its first token, and errors carry that line.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Line(u32);

impl Line {
    /// The first line of a source file.
    pub const FIRST: Line = Line(1);

    /// Create a line number. Zero is clamped to the first line.
    #[inline]
    pub const fn new(line: u32) -> Self {
        if line == 0 {
            Line(1)
        } else {
            Line(line)
        }
    }

    /// The raw 1-based line number.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Zero-based index, for slicing `source.lines()`.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Line;
    crate::static_assert_size!(Line, 4);
}
