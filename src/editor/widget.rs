//! The composed editor widget.

use crate::format;
use crate::modes::{Mode, ModeError, ModeRegistry, ParseState};

use super::buffer::{EditBuffer, EditError};
use super::options::EditorOptions;
use super::position::{Pos, Range};

/// An editor: an [`EditBuffer`] paired with a resolved mode and options,
/// exposing the named range operations.
#[derive(Debug)]
pub struct CodeEditor {
    buffer: EditBuffer,
    mode: Mode,
    options: EditorOptions,
}

impl CodeEditor {
    /// Build an editor from options, resolving the mode name against the
    /// global registry.
    pub fn new(options: EditorOptions) -> Result<Self, ModeError> {
        ModeRegistry::init_defaults();
        let mode = ModeRegistry::global()
            .lock()
            .unwrap()
            .resolve(&options.mode)?;
        Ok(CodeEditor {
            buffer: EditBuffer::new(),
            mode,
            options,
        })
    }

    pub fn with_value(options: EditorOptions, value: &str) -> Result<Self, ModeError> {
        let mut editor = Self::new(options)?;
        editor.buffer = EditBuffer::from_text(value);
        Ok(editor)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut EditBuffer {
        &mut self.buffer
    }

    pub fn get_value(&self) -> String {
        self.buffer.value()
    }

    /// Replace the whole buffer. Empty input is ignored; use a fresh editor to
    /// clear a document.
    pub fn set_value(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        self.buffer = EditBuffer::from_text(value);
    }

    /// The parse state at `pos`, computed fresh (a private copy by
    /// construction).
    pub fn state_at(&self, pos: Pos) -> Result<ParseState, EditError> {
        format::state_at(&self.buffer, &self.mode, self.options.tab_size, pos)
    }

    /// The innermost mode active at `pos`.
    pub fn mode_at(&self, pos: Pos) -> Result<Mode, EditError> {
        let state = self.state_at(pos)?;
        let (mode, _) = self.mode.innermost(&state);
        Ok(mode.clone())
    }

    /// See [`format::reformat_range`].
    pub fn reformat_range(&mut self, range: Range) -> Result<(), EditError> {
        format::reformat_range(&mut self.buffer, &self.mode, self.options.tab_size, range)
    }

    /// See [`format::comment_range`].
    pub fn comment_range(&mut self, is_comment: bool, from: Pos, to: Pos) -> Result<(), EditError> {
        format::comment_range(
            &mut self.buffer,
            &self.mode,
            self.options.tab_size,
            is_comment,
            Range::new(from, to),
        )
    }

    /// See [`format::auto_indent_range`].
    pub fn auto_indent_range(&mut self, from: Pos, to: Pos) -> Result<(), EditError> {
        format::auto_indent_range(
            &mut self.buffer,
            &self.mode,
            self.options.tab_size,
            Range::new(from, to),
        )
    }

    /// Range covering the whole buffer.
    pub fn whole_range(&self) -> Range {
        Range::new(Pos::new(0, 0), self.buffer.end_pos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modes::MarkupConfig;

    #[test]
    fn test_new_resolves_mode() {
        let editor = CodeEditor::new(EditorOptions {
            mode: "css".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(editor.mode(), &Mode::Css);
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let result = CodeEditor::new(EditorOptions {
            mode: "cobol".to_string(),
            ..Default::default()
        });
        assert_eq!(result.err(), Some(ModeError::ModeNotFound("cobol".into())));
    }

    #[test]
    fn test_set_value_ignores_empty() {
        let mut editor = CodeEditor::with_value(EditorOptions::default(), "keep me").unwrap();
        editor.set_value("");
        assert_eq!(editor.get_value(), "keep me");
        editor.set_value("new");
        assert_eq!(editor.get_value(), "new");
    }

    #[test]
    fn test_mode_at_resolves_nested_script() {
        let options = EditorOptions {
            mode: "html".to_string(),
            ..Default::default()
        };
        let editor = CodeEditor::with_value(options, "<script>var x=1;").unwrap();
        let inner = editor.mode_at(Pos::new(0, 12)).unwrap();
        assert_eq!(inner, Mode::Script { json: false });

        let outer = editor.mode_at(Pos::new(0, 2)).unwrap();
        assert_eq!(
            outer,
            Mode::Markup {
                config: MarkupConfig::Html
            }
        );
    }
}
