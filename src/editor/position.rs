//! Line/column coordinates and half-open ranges over the edit buffer.

use std::fmt;

/// A position in the buffer: zero-based line and byte column within the line.
/// The default is the buffer origin `0:0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub line: usize,
    pub ch: usize,
}

impl Pos {
    pub fn new(line: usize, ch: usize) -> Self {
        Pos { line, ch }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.ch)
    }
}

/// A half-open span `[from, to)` in line-column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub from: Pos,
    pub to: Pos,
}

impl Range {
    pub fn new(from: Pos, to: Pos) -> Self {
        Range { from, to }
    }

    /// The same range with its endpoints in ascending order.
    pub fn normalized(self) -> Self {
        if self.to < self.from {
            Range {
                from: self.to,
                to: self.from,
            }
        } else {
            self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.from, self.to)
    }
}
