//! # modefmt
//!
//! Mode-aware code reformatting and editor behaviors.
//!
//! The crate bundles three layers:
//!
//! - an edit buffer with line/column positions and grouped undo
//!   ([`editor`]),
//! - pluggable language modes (css, script/json, xml/html) whose token
//!   streams drive range reformatting, comment toggling, and smart
//!   indentation ([`modes`], [`format`]),
//! - behavioral components for host UIs: bounded reverse list, polling
//!   runner, drop-target router, settings toggle, and a search filter
//!   ([`behaviors`], [`search`]).

pub mod behaviors;
pub mod editor;
pub mod format;
pub mod modes;
pub mod search;

pub use editor::{CodeEditor, EditBuffer, EditError, EditorOptions, Pos, Range};
pub use modes::{Mode, ModeError, ModeRegistry, ParseState, TokenKind};
