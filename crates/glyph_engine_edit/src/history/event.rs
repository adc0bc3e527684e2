use super::EditRecord;

/// Kind of structural change reported to history listeners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HistoryEventKind {
    /// A record was added at the tail
    Append,
    /// A record was added after discarding the redo branch
    Insert,
    /// The record at `position` was undone
    Undo,
    /// The record at `position` was redone
    Redo,
}

/// Notification delivered after a history mutation completed.
#[derive(Debug)]
pub struct HistoryEvent<'a, E> {
    pub kind: HistoryEventKind,
    pub edit: &'a E,
    /// Position of `edit` in the history
    pub position: isize,
}

/// Observer of an [`super::EditHistory`].
///
/// Listeners only see the event, never the history itself, so they cannot
/// record, undo or redo from inside a notification. Queue follow-up work
/// instead.
pub trait HistoryListener<E: EditRecord> {
    fn history_changed(&mut self, event: &HistoryEvent<'_, E>);
}

impl<E, F> HistoryListener<E> for F
where
    E: EditRecord,
    F: FnMut(&HistoryEvent<'_, E>),
{
    fn history_changed(&mut self, event: &HistoryEvent<'_, E>) {
        self(event)
    }
}
