//! Comment/uncomment a range with the innermost mode's delimiters.

use crate::editor::buffer::{EditBuffer, EditError};
use crate::editor::position::{Pos, Range};
use crate::modes::Mode;

use super::state_at;

/// Wrap or unwrap `range` in the comment delimiters of the innermost mode at
/// `range.from`, as one undo step.
///
/// Commenting inserts the end delimiter first so the start insertion cannot
/// shift it; an empty range leaves the cursor between the two delimiters.
/// Uncommenting splices out the first start delimiter through the last end
/// delimiter, inclusive, and is a no-op when no ordered pair is present.
pub fn comment_range(
    buffer: &mut EditBuffer,
    mode: &Mode,
    tab_size: usize,
    is_comment: bool,
    range: Range,
) -> Result<(), EditError> {
    let range = range.normalized();
    let state = state_at(buffer, mode, tab_size, range.from)?;
    let (inner_mode, _) = mode.innermost(&state);
    let delims = inner_mode.comment_delimiters();

    buffer.operation(|b| -> Result<(), EditError> {
        if is_comment {
            b.insert(range.to, delims.end)?;
            b.insert(range.from, delims.start)?;
            if range.is_empty() {
                b.set_cursor(Pos::new(range.from.line, range.from.ch + delims.start.len()));
            }
            Ok(())
        } else {
            let text = b.get_range(range)?;
            let spliced = match (text.find(delims.start), text.rfind(delims.end)) {
                (Some(start_idx), Some(end_idx)) if end_idx > start_idx => {
                    format!("{}{}", &text[..start_idx], &text[end_idx + delims.end.len()..])
                }
                _ => text,
            };
            b.replace_range(range, &spliced)?;
            Ok(())
        }
    })
}
