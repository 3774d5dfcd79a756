//! Range transformations: reformatting, comment toggling, reindentation.
//!
//! All three operate on an [`EditBuffer`] through one undo-grouped
//! transaction and never touch parse state other than a private snapshot
//! computed at the start of the operation. Errors from the buffer
//! (out-of-bounds ranges) propagate to the caller unchanged; there is no
//! partial-edit recovery and no retry.

pub mod comment;
pub mod reformat;

pub use comment::comment_range;
pub use reformat::{auto_indent_range, reformat_range};

use crate::editor::buffer::{EditBuffer, EditError};
use crate::editor::position::Pos;
use crate::modes::{Mode, ParseState, StringStream};

/// Compute the parse state at `pos` by tokenizing from the start of the
/// buffer. The returned state is owned by the caller; the buffer holds no
/// live state that could be perturbed.
pub fn state_at(
    buffer: &EditBuffer,
    mode: &Mode,
    tab_size: usize,
    pos: Pos,
) -> Result<ParseState, EditError> {
    if pos.line >= buffer.line_count() {
        return Err(EditError::OutOfBounds(pos));
    }
    let mut state = mode.start_state();
    for line_idx in 0..=pos.line {
        let line = buffer.line(line_idx)?;
        let stop = if line_idx == pos.line {
            if pos.ch > line.len() {
                return Err(EditError::OutOfBounds(pos));
            }
            pos.ch
        } else {
            line.len()
        };
        let mut stream = StringStream::new(line, tab_size);
        while !stream.eol() && stream.pos() < stop {
            mode.token(&mut stream, &mut state);
        }
        if line.is_empty() {
            mode.blank_line(&mut state);
        }
    }
    Ok(state)
}
