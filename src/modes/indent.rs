//! Smart per-mode indentation.
//!
//! Indentation is derived from the parse state at the start of a line plus
//! the line's own text: the open-context depth sets the base level, and a
//! line that begins by closing its context dedents one level.

use super::{Mode, ParseState};

/// Number of leading spaces a line should carry, given the parse state at its
/// start and the line's text.
pub fn indent_for(mode: &Mode, state: &ParseState, text_after: &str, tab_size: usize) -> usize {
    let trimmed = text_after.trim_start();
    match (mode, state) {
        (Mode::Css, ParseState::Css(s)) => {
            let mut depth = s.depth;
            if trimmed.starts_with('}') {
                depth = depth.saturating_sub(1);
            }
            depth * tab_size
        }
        (Mode::Script { .. }, ParseState::Script(s)) => {
            let mut depth = s.context.len();
            if trimmed.starts_with([')', ']', '}']) {
                depth = depth.saturating_sub(1);
            }
            depth * tab_size
        }
        (Mode::Markup { .. }, ParseState::Markup(s)) => {
            if let Some(inner) = &s.inner {
                // A line closing the host element dedents back to markup.
                if trimmed.starts_with("</") {
                    return s.context.len().saturating_sub(1) * tab_size;
                }
                return s.context.len() * tab_size
                    + indent_for(&inner.mode, &inner.state, text_after, tab_size);
            }
            let mut depth = s.context.len();
            if trimmed.starts_with("</") {
                depth = depth.saturating_sub(1);
            }
            depth * tab_size
        }
        _ => unreachable!("parse state paired with the wrong mode"),
    }
}
