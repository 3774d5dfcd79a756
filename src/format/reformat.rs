//! Token-driven range reformatting and smart reindentation.

use crate::editor::buffer::{EditBuffer, EditError};
use crate::editor::position::{Pos, Range};
use crate::modes::indent::indent_for;
use crate::modes::{Mode, ParseState, StringStream};

use super::state_at;

/// The nested (mode, state) pair when a markup-hosted script/css region is
/// live.
fn nested_pair(state: &ParseState) -> Option<(&Mode, &ParseState)> {
    match state {
        ParseState::Markup(markup) => markup
            .inner
            .as_deref()
            .map(|inner| (&inner.mode, &inner.state)),
        _ => None,
    }
}

/// Re-derive the line breaks of `range` from its token stream and the
/// innermost mode's newline rules, then reindent the produced lines and move
/// the cursor to the end of the transformed region.
///
/// The judging mode for each token is resolved before the token is read, so
/// the token that opens or closes a nested script/css region is judged by the
/// mode that was active on its near side.
///
/// The parse state is snapshotted at `range.from`; the live buffer state is
/// never mutated. The whole transformation is one undo step.
pub fn reformat_range(
    buffer: &mut EditBuffer,
    mode: &Mode,
    tab_size: usize,
    range: Range,
) -> Result<(), EditError> {
    let range = range.normalized();
    let text = buffer.get_range(range)?;
    let lines: Vec<&str> = text.split('\n').collect();

    // Private deep copy of the state; token reads below never perturb anything
    // the caller holds.
    let mut state = state_at(buffer, mode, tab_size, range.from)?;

    let mut out = String::new();
    let mut at_sol = range.from.ch == 0;
    let mut breaks = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let mut stream = StringStream::new(line, tab_size);
        while !stream.eol() {
            // The rule that judges a token belongs to the mode that was
            // innermost when the read started; the state it sees is the
            // post-read one. A token that closes a nested region is still
            // judged by that region's rule, so keep a copy of the pair in
            // case the read drops it.
            let pre = nested_pair(&state).map(|(m, s)| (m.clone(), s.clone()));
            let kind = mode.token(&mut stream, &mut state);
            let cur = stream.current();
            // Leading whitespace right after an emitted newline is dropped.
            if !at_sol || cur.chars().any(|c| !c.is_whitespace()) {
                out.push_str(cur);
                at_sol = false;
            }
            if !at_sol {
                let rest = stream.remainder();
                let text_after = if rest.is_empty() {
                    lines.get(i + 1).copied().unwrap_or("")
                } else {
                    rest
                };
                let wants_break = match (&pre, nested_pair(&state)) {
                    (Some(_), Some((inner_mode, inner_state))) => {
                        inner_mode.newline_after_token(kind, cur, text_after, inner_state)
                    }
                    (Some((pre_mode, pre_state)), None) => {
                        pre_mode.newline_after_token(kind, cur, text_after, pre_state)
                    }
                    (None, _) => mode.newline_after_token(kind, cur, text_after, &state),
                };
                if wants_break {
                    out.push('\n');
                    at_sol = true;
                    breaks += 1;
                }
            }
        }
        if stream.pos() == 0 {
            mode.blank_line(&mut state);
        }
        if !at_sol && i + 1 < lines.len() {
            out.push('\n');
            at_sol = true;
            breaks += 1;
        }
    }

    // The text after `range.to` on its line survives the edit untouched; its
    // length locates the end of the transformed region after reindentation.
    let suffix_len = buffer.line(range.to.line)?.len() - range.to.ch;
    let end_line = range.from.line + breaks;

    buffer.operation(|b| -> Result<(), EditError> {
        b.replace_range(range, &out)?;
        indent_lines(b, mode, tab_size, range.from.line, end_line)?;
        let end_ch = b.line(end_line)?.len() - suffix_len;
        b.set_cursor(Pos::new(end_line, end_ch));
        Ok(())
    })
}

/// Smart-reindent every line of `range` as one undo step.
pub fn auto_indent_range(
    buffer: &mut EditBuffer,
    mode: &Mode,
    tab_size: usize,
    range: Range,
) -> Result<(), EditError> {
    let range = range.normalized();
    if range.to.line >= buffer.line_count() {
        return Err(EditError::OutOfBounds(range.to));
    }
    buffer.operation(|b| indent_lines(b, mode, tab_size, range.from.line, range.to.line))
}

fn indent_lines(
    buffer: &mut EditBuffer,
    mode: &Mode,
    tab_size: usize,
    first: usize,
    last: usize,
) -> Result<(), EditError> {
    let last = last.min(buffer.line_count() - 1);
    let mut state = state_at(buffer, mode, tab_size, Pos::new(first, 0))?;
    for line_idx in first..=last {
        let line = buffer.line(line_idx)?.to_string();
        let trimmed = line.trim_start_matches([' ', '\t']);
        let ws_len = line.len() - trimmed.len();
        let target = if trimmed.is_empty() {
            0
        } else {
            indent_for(mode, &state, &line, tab_size)
        };
        if target != ws_len || line[..ws_len].contains('\t') {
            buffer.replace_range(
                Range::new(Pos::new(line_idx, 0), Pos::new(line_idx, ws_len)),
                &" ".repeat(target),
            )?;
        }
        // Advance the state across the line as it now reads.
        let current = buffer.line(line_idx)?.to_string();
        let mut stream = StringStream::new(&current, tab_size);
        while !stream.eol() {
            mode.token(&mut stream, &mut state);
        }
        if current.is_empty() {
            mode.blank_line(&mut state);
        }
    }
    Ok(())
}
