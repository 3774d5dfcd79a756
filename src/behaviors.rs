//! Behavioral components attachable to host UI pieces.
//!
//! Each component here is an independently testable capability meant to be
//! composed into a widget at construction time: a bounded newest-first
//! list, a visibility-gated polling task, a drop-target router, and a
//! settings-panel toggle. None of them knows about the others or about the
//! editor.

pub mod bounded_list;
pub mod drop_router;
pub mod polling;
pub mod settings;

pub use bounded_list::BoundedReverseList;
pub use drop_router::{DropContext, DropHandler, DropTargetRouter};
pub use polling::PollingRunner;
pub use settings::{Panel, SettingsToggle};
