//! Application state and key handling for the terminal editor.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use modefmt::{CodeEditor, EditorOptions, Pos, Range};

pub struct App {
    pub editor: CodeEditor,
    pub path: PathBuf,
    pub file_name: String,
    pub status: String,
    /// First buffer line shown in the editor pane.
    pub scroll: usize,
    pub dirty: bool,
}

impl App {
    pub fn open(path: &Path, mode: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let mode = mode.unwrap_or_else(|| mode_for_path(path).to_string());
        let options = EditorOptions {
            mode,
            ..Default::default()
        };
        let editor = CodeEditor::with_value(options, &content)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Ok(App {
            editor,
            path: path.to_path_buf(),
            file_name,
            status: String::from("^S save  ^F format  ^R reindent  ^K comment  ^U uncomment  ^Q quit"),
            scroll: 0,
            dirty: false,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.save(),
                KeyCode::Char('z') => self.undo(),
                KeyCode::Char('y') => self.redo(),
                KeyCode::Char('f') => self.reformat(),
                KeyCode::Char('r') => self.reindent(),
                KeyCode::Char('k') => self.toggle_comment(true),
                KeyCode::Char('u') => self.toggle_comment(false),
                _ => {}
            }
            return;
        }
        match key.code {
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Home => {
                let cursor = self.editor.buffer().cursor();
                self.editor.buffer_mut().set_cursor(Pos::new(cursor.line, 0));
            }
            KeyCode::End => {
                let cursor = self.editor.buffer().cursor();
                self.editor
                    .buffer_mut()
                    .set_cursor(Pos::new(cursor.line, usize::MAX));
            }
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Tab => {
                let width = self.editor.options().tab_size;
                self.insert_text(&" ".repeat(width));
            }
            KeyCode::Char(c) => self.insert_text(&c.to_string()),
            _ => {}
        }
    }

    fn insert_text(&mut self, text: &str) {
        let cursor = self.editor.buffer().cursor();
        if self.editor.buffer_mut().insert(cursor, text).is_ok() {
            self.dirty = true;
        }
    }

    /// Insert a line break, then reindent the fresh line.
    fn insert_newline(&mut self) {
        let cursor = self.editor.buffer().cursor();
        if self.editor.buffer_mut().insert(cursor, "\n").is_err() {
            return;
        }
        self.dirty = true;
        let line = self.editor.buffer().cursor().line;
        let start = Pos::new(line, 0);
        if let Err(e) = self.editor.auto_indent_range(start, start) {
            self.status = format!("Indent error: {}", e);
        }
    }

    fn backspace(&mut self) {
        let cursor = self.editor.buffer().cursor();
        let from = if cursor.ch > 0 {
            let line = self.editor.buffer().line(cursor.line).unwrap_or("");
            let prev = line[..cursor.ch]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            Pos::new(cursor.line, prev)
        } else if cursor.line > 0 {
            let prev_len = self
                .editor
                .buffer()
                .line(cursor.line - 1)
                .map(|l| l.len())
                .unwrap_or(0);
            Pos::new(cursor.line - 1, prev_len)
        } else {
            return;
        };
        if self
            .editor
            .buffer_mut()
            .replace_range(Range::new(from, cursor), "")
            .is_ok()
        {
            self.dirty = true;
        }
    }

    fn move_cursor(&mut self, dy: isize, dx: isize) {
        let cursor = self.editor.buffer().cursor();
        let line = cursor.line.saturating_add_signed(dy);
        let ch = if dx < 0 && cursor.ch == 0 {
            0
        } else {
            cursor.ch.saturating_add_signed(dx)
        };
        self.editor.buffer_mut().set_cursor(Pos::new(line, ch));
    }

    fn save(&mut self) {
        match std::fs::write(&self.path, self.editor.get_value()) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", self.file_name);
            }
            Err(e) => self.status = format!("Save error: {}", e),
        }
    }

    fn undo(&mut self) {
        if self.editor.buffer_mut().undo() {
            self.dirty = true;
            self.status = "Undid change".to_string();
        } else {
            self.status = "Nothing to undo".to_string();
        }
    }

    fn redo(&mut self) {
        if self.editor.buffer_mut().redo() {
            self.dirty = true;
            self.status = "Redid change".to_string();
        } else {
            self.status = "Nothing to redo".to_string();
        }
    }

    fn reformat(&mut self) {
        let range = self.editor.whole_range();
        match self.editor.reformat_range(range) {
            Ok(()) => {
                self.dirty = true;
                self.status = "Reformatted buffer".to_string();
            }
            Err(e) => self.status = format!("Reformat error: {}", e),
        }
    }

    fn reindent(&mut self) {
        let range = self.editor.whole_range();
        match self.editor.auto_indent_range(range.from, range.to) {
            Ok(()) => {
                self.dirty = true;
                self.status = "Reindented buffer".to_string();
            }
            Err(e) => self.status = format!("Indent error: {}", e),
        }
    }

    /// Comment or uncomment the cursor line.
    fn toggle_comment(&mut self, is_comment: bool) {
        let line = self.editor.buffer().cursor().line;
        let len = self
            .editor
            .buffer()
            .line(line)
            .map(|l| l.len())
            .unwrap_or(0);
        let from = Pos::new(line, 0);
        let to = Pos::new(line, len);
        match self.editor.comment_range(is_comment, from, to) {
            Ok(()) => self.dirty = true,
            Err(e) => self.status = format!("Comment error: {}", e),
        }
    }

    /// Keep the cursor line inside a viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        let line = self.editor.buffer().cursor().line;
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }
}

/// Pick a mode from the file extension; script is the fallback.
fn mode_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "css",
        Some("json") => "json",
        Some("xml") | Some("svg") => "xml",
        Some("html") | Some("htm") => "html",
        _ => "script",
    }
}
