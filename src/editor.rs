//! The code editor surface: buffer, positions, options, and the composed
//! widget.
//!
//! The widget is built by explicit composition: the buffer, the resolved
//! mode, and the range operations are plain parts wired together in
//! [`CodeEditor`], not capabilities injected into a shared prototype. Host
//! applications that only need one piece (say, the buffer plus the
//! reformatter) can use the parts directly.

pub mod buffer;
pub mod options;
pub mod position;
pub mod widget;

pub use buffer::{EditBuffer, EditError};
pub use options::EditorOptions;
pub use position::{Pos, Range};
pub use widget::CodeEditor;
