//! Per-line character stream consumed by the mode tokenizers.
//!
//! Tokenization is line-oriented: a stream wraps exactly one physical line
//! (without its trailing newline) and tracks a consumption position plus the
//! start of the token currently being read. Anything that spans lines (block
//! comments, open tags) is carried across streams by the mode's parse state,
//! never by the stream itself.

/// A consumable view over a single line of input.
///
/// `start..pos` always delimits the token most recently read; `begin_token`
/// collapses the window before the next read.
#[derive(Debug)]
pub struct StringStream<'a> {
    line: &'a str,
    pos: usize,
    start: usize,
    tab_size: usize,
}

impl<'a> StringStream<'a> {
    pub fn new(line: &'a str, tab_size: usize) -> Self {
        StringStream {
            line,
            pos: 0,
            start: 0,
            tab_size,
        }
    }

    /// True when the whole line has been consumed.
    pub fn eol(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// Byte offset of the consumption position.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn tab_size(&self) -> usize {
        self.tab_size
    }

    /// The text of the token read since the last `begin_token`.
    pub fn current(&self) -> &'a str {
        &self.line[self.start..self.pos]
    }

    /// The unconsumed remainder of the line.
    pub fn remainder(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Mark the current position as the start of the next token.
    pub fn begin_token(&mut self) {
        self.start = self.pos;
    }

    /// Consume `n` bytes. Callers pass lengths obtained from the remainder, so
    /// the advance always lands on a character boundary.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.line.len());
    }

    /// Consume the rest of the line.
    pub fn skip_to_end(&mut self) {
        self.pos = self.line.len();
    }

    /// Consume up to and including `needle` if present; otherwise consume the
    /// rest of the line. Returns whether the needle was found.
    pub fn skip_past(&mut self, needle: &str) -> bool {
        match self.remainder().find(needle) {
            Some(idx) => {
                self.advance(idx + needle.len());
                true
            }
            None => {
                self.skip_to_end();
                false
            }
        }
    }

    /// Whether the remainder starts with `prefix`, ignoring ASCII case.
    /// Compared byte-wise so a multibyte character in the remainder can never
    /// split a slice.
    pub fn looking_at_ignore_case(&self, prefix: &str) -> bool {
        let rest = self.remainder().as_bytes();
        let prefix = prefix.as_bytes();
        rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix)
    }
}
