//! Generic undo/redo history
//!
//! An [`EditHistory`] stores [`EditRecord`]s for one editable owner and a
//! cursor marking the last applied record. Recording after an undo discards
//! every record past the cursor. Listeners are told about every structural
//! change after it took effect.

mod edit_history;
mod event;
mod record;

pub use edit_history::{EditHistory, ListenerId};
pub use event::{HistoryEvent, HistoryEventKind, HistoryListener};
pub use record::EditRecord;
