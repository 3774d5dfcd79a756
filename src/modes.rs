//! Language modes: per-language tokenizers with threaded parse state.
//!
//! A mode is a named token-production ruleset. Each mode carries a comment
//! delimiter pair, a newline-decision rule used by the reformatter, and a
//! smart-indentation rule, all keyed off an opaque parse state that is
//! threaded through successive token reads.
//!
//! Modes form a closed set of variants rather than an open registry of
//! injected properties: dispatch happens by matching on [`Mode`], and the
//! string-keyed [`ModeRegistry`] only resolves configuration names (such as
//! "html" or "json") to concrete variants.
//!
//! Nesting: the markup mode under its HTML configuration hosts script and
//! css sub-modes inside `<script>` and `<style>` elements. The active chain
//! is resolved explicitly through [`Mode::innermost`]; rules and comment
//! delimiters always come from the innermost pair.

pub mod css;
pub mod indent;
pub mod markup;
pub mod script;
pub mod stream;

pub use stream::StringStream;

use std::collections::HashMap;
use std::fmt;

/// Coarse classification of a produced token, shared across modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Atom,
    Number,
    String,
    Comment,
    Operator,
    Punctuation,
    Tag,
    AttrName,
    AttrValue,
    Text,
    Whitespace,
    Error,
}

/// The comment delimiter pair a mode wraps ranges with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentDelimiters {
    pub start: &'static str,
    pub end: &'static str,
}

/// Markup dialect selection. The HTML configuration enables the inline-element
/// set, void elements, and nested script/css modes; plain XML has none of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupConfig {
    Xml,
    Html,
}

/// The closed set of language modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Css,
    /// Script language; `json` selects the data-literal sub-mode.
    Script { json: bool },
    Markup { config: MarkupConfig },
}

/// Mode-specific state threaded across token reads. Cloning yields a deep,
/// independent copy, which is how the reformatter snapshots the live state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseState {
    Css(css::CssState),
    Script(script::ScriptState),
    Markup(markup::MarkupState),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Css => "css",
            Mode::Script { json: false } => "script",
            Mode::Script { json: true } => "json",
            Mode::Markup {
                config: MarkupConfig::Xml,
            } => "xml",
            Mode::Markup {
                config: MarkupConfig::Html,
            } => "html",
        }
    }

    pub fn comment_delimiters(&self) -> CommentDelimiters {
        match self {
            Mode::Css | Mode::Script { .. } => CommentDelimiters {
                start: "/*",
                end: "*/",
            },
            Mode::Markup { .. } => CommentDelimiters {
                start: "<!--",
                end: "-->",
            },
        }
    }

    /// Fresh state for tokenizing from the start of a document.
    pub fn start_state(&self) -> ParseState {
        match self {
            Mode::Css => ParseState::Css(css::CssState::default()),
            Mode::Script { .. } => ParseState::Script(script::ScriptState::default()),
            Mode::Markup { .. } => ParseState::Markup(markup::MarkupState::default()),
        }
    }

    /// Read one token from the stream, advancing it and updating the state.
    ///
    /// The state must originate from this mode's `start_state` (or a clone of
    /// one); the pairing is maintained by construction everywhere in the crate.
    pub fn token(&self, stream: &mut StringStream<'_>, state: &mut ParseState) -> TokenKind {
        stream.begin_token();
        match (self, state) {
            (Mode::Css, ParseState::Css(s)) => css::token(stream, s),
            (Mode::Script { .. }, ParseState::Script(s)) => script::token(stream, s),
            (Mode::Markup { config }, ParseState::Markup(s)) => markup::token(stream, s, *config),
            _ => unreachable!("parse state paired with the wrong mode"),
        }
    }

    /// Hook invoked for input lines that produce no tokens at all. None of the
    /// built-in modes carries per-blank-line context, so this only exists to
    /// keep the reformatter's contract explicit.
    pub fn blank_line(&self, _state: &mut ParseState) {}

    /// Resolve the innermost active (mode, state) pair. For markup with a live
    /// nested script/css region this is the nested pair; otherwise it is
    /// `(self, state)` itself.
    pub fn innermost<'a>(&'a self, state: &'a ParseState) -> (&'a Mode, &'a ParseState) {
        if let ParseState::Markup(markup_state) = state {
            if let Some(inner) = &markup_state.inner {
                return (&inner.mode, &inner.state);
            }
        }
        (self, state)
    }

    /// Should a line break follow the token just read? Must be called on the
    /// innermost mode with its own state, after the state was updated by the
    /// token read.
    pub fn newline_after_token(
        &self,
        kind: TokenKind,
        text: &str,
        text_after: &str,
        state: &ParseState,
    ) -> bool {
        match (self, state) {
            (Mode::Css, ParseState::Css(_)) => css::newline_after_token(text),
            (Mode::Script { json }, ParseState::Script(s)) => {
                script::newline_after_token(*json, text, text_after, s)
            }
            (Mode::Markup { config }, ParseState::Markup(s)) => {
                markup::newline_after_token(*config, kind, text, text_after, s)
            }
            _ => unreachable!("parse state paired with the wrong mode"),
        }
    }
}

/// Errors from mode resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    ModeNotFound(String),
}

impl fmt::Display for ModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeError::ModeNotFound(name) => write!(f, "Mode '{}' not found", name),
        }
    }
}

impl std::error::Error for ModeError {}

/// Registry resolving configuration names to mode variants.
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: HashMap<String, Mode>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        ModeRegistry {
            modes: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, mode: Mode) {
        self.modes.insert(name.to_string(), mode);
    }

    pub fn get(&self, name: &str) -> Option<Mode> {
        self.modes.get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.modes.contains_key(name)
    }

    /// Sorted list of registered mode names.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<_> = self.modes.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn resolve(&self, name: &str) -> Result<Mode, ModeError> {
        self.get(name)
            .ok_or_else(|| ModeError::ModeNotFound(name.to_string()))
    }

    /// Get the global mode registry.
    pub fn global() -> &'static std::sync::Mutex<ModeRegistry> {
        use std::sync::OnceLock;
        static REGISTRY: OnceLock<std::sync::Mutex<ModeRegistry>> = OnceLock::new();
        REGISTRY.get_or_init(|| std::sync::Mutex::new(ModeRegistry::new()))
    }

    /// Initialize the global registry with the built-in modes.
    pub fn init_defaults() {
        let mut registry = Self::global().lock().unwrap();
        if registry.available().is_empty() {
            registry.register("css", Mode::Css);
            registry.register("script", Mode::Script { json: false });
            registry.register("json", Mode::Script { json: true });
            registry.register(
                "xml",
                Mode::Markup {
                    config: MarkupConfig::Xml,
                },
            );
            registry.register(
                "html",
                Mode::Markup {
                    config: MarkupConfig::Html,
                },
            );
        }
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
