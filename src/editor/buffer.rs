//! Line-based edit buffer with ranged replace and grouped undo.
//!
//! Mutations go through [`EditBuffer::replace_range`]. Each call records an
//! inverse change; [`EditBuffer::operation`] groups every change made inside
//! the closure into a single undo step, so multi-step edits (reformat,
//! comment toggle, reindent) undo atomically. Operations nest: inner groups
//! fold into the outermost one.

use std::fmt;

use super::position::{Pos, Range};

/// Errors from buffer access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    OutOfBounds(Pos),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::OutOfBounds(pos) => write!(f, "Position {} is out of bounds", pos),
        }
    }
}

impl std::error::Error for EditError {}

/// One applied change, kept in terms of the post-change buffer so the inverse
/// is a plain replace.
#[derive(Debug, Clone)]
struct Change {
    /// Span the inserted text occupies after the change.
    range: Range,
    /// Text that the change removed.
    replaced: String,
    /// Text that the change inserted.
    inserted: String,
}

type Transaction = Vec<Change>;

/// An in-memory text buffer addressed by line/column positions.
#[derive(Debug, Default)]
pub struct EditBuffer {
    lines: Vec<String>,
    cursor: Pos,
    undo: Vec<Transaction>,
    redo: Vec<Transaction>,
    open: Vec<Change>,
    txn_depth: usize,
}

impl EditBuffer {
    pub fn new() -> Self {
        EditBuffer {
            lines: vec![String::new()],
            ..Default::default()
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.lines = text.split('\n').map(|l| l.to_string()).collect();
        if buffer.lines.is_empty() {
            buffer.lines.push(String::new());
        }
        buffer
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Result<&str, EditError> {
        self.lines
            .get(index)
            .map(|l| l.as_str())
            .ok_or(EditError::OutOfBounds(Pos::new(index, 0)))
    }

    /// The whole buffer as one string.
    pub fn value(&self) -> String {
        self.lines.join("\n")
    }

    /// Position just past the last character.
    pub fn end_pos(&self) -> Pos {
        let line = self.lines.len() - 1;
        Pos::new(line, self.lines[line].len())
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// Move the cursor, clamping to the buffer contents.
    pub fn set_cursor(&mut self, pos: Pos) {
        let line = pos.line.min(self.lines.len() - 1);
        let ch = pos.ch.min(self.lines[line].len());
        self.cursor = Pos::new(line, ch);
    }

    fn check(&self, pos: Pos) -> Result<(), EditError> {
        let line = self
            .lines
            .get(pos.line)
            .ok_or(EditError::OutOfBounds(pos))?;
        if pos.ch > line.len() || !line.is_char_boundary(pos.ch) {
            return Err(EditError::OutOfBounds(pos));
        }
        Ok(())
    }

    /// Read the text covered by `range`.
    pub fn get_range(&self, range: Range) -> Result<String, EditError> {
        let range = range.normalized();
        self.check(range.from)?;
        self.check(range.to)?;
        if range.from.line == range.to.line {
            return Ok(self.lines[range.from.line][range.from.ch..range.to.ch].to_string());
        }
        let mut out = String::new();
        out.push_str(&self.lines[range.from.line][range.from.ch..]);
        for line in &self.lines[range.from.line + 1..range.to.line] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(&self.lines[range.to.line][..range.to.ch]);
        Ok(out)
    }

    /// Replace `range` with `text`, returning the end position of the inserted
    /// text. Records the change for undo.
    pub fn replace_range(&mut self, range: Range, text: &str) -> Result<Pos, EditError> {
        let range = range.normalized();
        let replaced = self.get_range(range)?;

        let prefix = self.lines[range.from.line][..range.from.ch].to_string();
        let suffix = self.lines[range.to.line][range.to.ch..].to_string();

        let mut new_lines: Vec<String> = text.split('\n').map(|l| l.to_string()).collect();
        let end = if new_lines.len() == 1 {
            Pos::new(range.from.line, range.from.ch + new_lines[0].len())
        } else {
            Pos::new(
                range.from.line + new_lines.len() - 1,
                new_lines[new_lines.len() - 1].len(),
            )
        };
        new_lines[0] = format!("{}{}", prefix, new_lines[0]);
        let last = new_lines.len() - 1;
        new_lines[last] = format!("{}{}", new_lines[last], suffix);

        self.lines
            .splice(range.from.line..=range.to.line, new_lines);

        let change = Change {
            range: Range::new(range.from, end),
            replaced,
            inserted: text.to_string(),
        };
        if self.txn_depth > 0 {
            self.open.push(change);
        } else {
            self.undo.push(vec![change]);
            self.redo.clear();
        }
        self.set_cursor(end);
        Ok(end)
    }

    /// Insert `text` at `pos`.
    pub fn insert(&mut self, pos: Pos, text: &str) -> Result<Pos, EditError> {
        self.replace_range(Range::new(pos, pos), text)
    }

    /// Run `f` with every buffer change it makes grouped into one undo step.
    pub fn operation<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.txn_depth += 1;
        let result = f(self);
        self.txn_depth -= 1;
        if self.txn_depth == 0 && !self.open.is_empty() {
            let txn = std::mem::take(&mut self.open);
            self.undo.push(txn);
            self.redo.clear();
        }
        result
    }

    /// Undo the most recent transaction. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        let Some(txn) = self.undo.pop() else {
            return false;
        };
        let mut inverse = Vec::with_capacity(txn.len());
        for change in txn.into_iter().rev() {
            // Applying the stored inverse cannot fail: the range is valid in
            // the current buffer by construction.
            let end = self
                .replace_without_record(change.range, &change.replaced)
                .unwrap_or_else(|_| change.range.from);
            inverse.push(Change {
                range: Range::new(change.range.from, end),
                replaced: change.inserted,
                inserted: change.replaced,
            });
        }
        self.redo.push(inverse);
        true
    }

    /// Redo the most recently undone transaction.
    pub fn redo(&mut self) -> bool {
        let Some(txn) = self.redo.pop() else {
            return false;
        };
        let mut inverse = Vec::with_capacity(txn.len());
        for change in txn.into_iter().rev() {
            let end = self
                .replace_without_record(change.range, &change.replaced)
                .unwrap_or_else(|_| change.range.from);
            inverse.push(Change {
                range: Range::new(change.range.from, end),
                replaced: change.inserted,
                inserted: change.replaced,
            });
        }
        self.undo.push(inverse);
        true
    }

    fn replace_without_record(&mut self, range: Range, text: &str) -> Result<Pos, EditError> {
        let range = range.normalized();
        self.get_range(range)?;
        let prefix = self.lines[range.from.line][..range.from.ch].to_string();
        let suffix = self.lines[range.to.line][range.to.ch..].to_string();
        let mut new_lines: Vec<String> = text.split('\n').map(|l| l.to_string()).collect();
        let end = if new_lines.len() == 1 {
            Pos::new(range.from.line, range.from.ch + new_lines[0].len())
        } else {
            Pos::new(
                range.from.line + new_lines.len() - 1,
                new_lines[new_lines.len() - 1].len(),
            )
        };
        new_lines[0] = format!("{}{}", prefix, new_lines[0]);
        let last = new_lines.len() - 1;
        new_lines[last] = format!("{}{}", new_lines[last], suffix);
        self.lines
            .splice(range.from.line..=range.to.line, new_lines);
        self.set_cursor(end);
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_replace() {
        let mut buffer = EditBuffer::from_text("hello world");
        let end = buffer
            .replace_range(Range::new(Pos::new(0, 6), Pos::new(0, 11)), "there")
            .unwrap();
        assert_eq!(buffer.value(), "hello there");
        assert_eq!(end, Pos::new(0, 11));
    }

    #[test]
    fn test_multi_line_replace_and_end_position() {
        let mut buffer = EditBuffer::from_text("abc\ndef\nghi");
        let end = buffer
            .replace_range(Range::new(Pos::new(0, 1), Pos::new(2, 1)), "X\nY")
            .unwrap();
        assert_eq!(buffer.value(), "aX\nYhi");
        assert_eq!(end, Pos::new(1, 1));
    }

    #[test]
    fn test_get_range_multi_line() {
        let buffer = EditBuffer::from_text("abc\ndef\nghi");
        let text = buffer
            .get_range(Range::new(Pos::new(0, 2), Pos::new(2, 1)))
            .unwrap();
        assert_eq!(text, "c\ndef\ng");
    }

    #[test]
    fn test_out_of_bounds_is_reported() {
        let buffer = EditBuffer::from_text("abc");
        let result = buffer.get_range(Range::new(Pos::new(0, 0), Pos::new(5, 0)));
        assert_eq!(result, Err(EditError::OutOfBounds(Pos::new(5, 0))));
    }

    #[test]
    fn test_operation_groups_changes_into_one_undo_step() {
        let mut buffer = EditBuffer::from_text("abc");
        buffer.operation(|b| {
            b.insert(Pos::new(0, 3), "!").unwrap();
            b.insert(Pos::new(0, 0), "?").unwrap();
        });
        assert_eq!(buffer.value(), "?abc!");

        assert!(buffer.undo());
        assert_eq!(buffer.value(), "abc");
        assert!(!buffer.undo());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut buffer = EditBuffer::from_text("one\ntwo");
        buffer
            .replace_range(Range::new(Pos::new(0, 0), Pos::new(1, 3)), "three")
            .unwrap();
        assert_eq!(buffer.value(), "three");

        buffer.undo();
        assert_eq!(buffer.value(), "one\ntwo");
        buffer.redo();
        assert_eq!(buffer.value(), "three");
    }

    #[test]
    fn test_nested_operations_fold_into_outer() {
        let mut buffer = EditBuffer::from_text("x");
        buffer.operation(|b| {
            b.insert(Pos::new(0, 1), "a").unwrap();
            b.operation(|inner| {
                inner.insert(Pos::new(0, 2), "b").unwrap();
            });
        });
        assert_eq!(buffer.value(), "xab");
        buffer.undo();
        assert_eq!(buffer.value(), "x");
    }

    #[test]
    fn test_new_buffer_starts_at_origin() {
        let buffer = EditBuffer::new();
        assert_eq!(buffer.cursor(), Pos::default());
        assert_eq!(Pos::default(), Pos::new(0, 0));
        assert_eq!(buffer.value(), "");
    }

    #[test]
    fn test_cursor_clamps() {
        let mut buffer = EditBuffer::from_text("ab");
        buffer.set_cursor(Pos::new(9, 9));
        assert_eq!(buffer.cursor(), Pos::new(0, 2));
    }
}
