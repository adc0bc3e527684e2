use crate::{EngineError, Result};

use super::{EditRecord, HistoryEvent, HistoryEventKind, HistoryListener};

/// Handle returned by [`EditHistory::add_listener`], used for removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Cursor-navigable sequence of edits for a single owner.
///
/// The cursor points at the last applied record; `position() == -1` means
/// nothing is applied. `undo` is legal while `position() >= 0`, `redo` while
/// `position() < len() - 1`.
pub struct EditHistory<E: EditRecord> {
    owner: E::Key,
    records: Vec<E>,
    cursor: Option<usize>,
    listeners: Vec<(ListenerId, Box<dyn HistoryListener<E>>)>,
    next_listener_id: u64,
}

impl<E: EditRecord> EditHistory<E> {
    /// Create an empty history for `owner`
    pub fn new(owner: E::Key) -> Self {
        Self {
            owner,
            records: Vec::new(),
            cursor: None,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn owner(&self) -> &E::Key {
        &self.owner
    }

    /// Current cursor, `-1` when empty or fully undone
    pub fn position(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.next_index() < self.records.len()
    }

    /// Description of the record `undo` would revert
    pub fn undo_description(&self) -> Option<String> {
        self.cursor.map(|c| self.records[c].description())
    }

    /// Description of the record `redo` would re-apply
    pub fn redo_description(&self) -> Option<String> {
        self.records.get(self.next_index()).map(|e| e.description())
    }

    /// Record at `position`, if any
    pub fn get(&self, position: usize) -> Option<&E> {
        self.records.get(position)
    }

    fn next_index(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// Add an already applied edit after the cursor.
    ///
    /// Records past the cursor are dropped first; the notification kind is
    /// [`HistoryEventKind::Insert`] in that case and
    /// [`HistoryEventKind::Append`] otherwise.
    pub fn record(&mut self, edit: E) -> Result<()> {
        if edit.owner() != self.owner {
            return Err(EngineError::invalid_argument(format!(
                "edit for owner {:?} recorded into history of {:?}",
                edit.owner(),
                self.owner
            )));
        }
        if edit.is_empty() {
            return Err(EngineError::invalid_argument("edit has no effect"));
        }

        let index = self.next_index();
        let kind = if index < self.records.len() {
            let discarded = self.records.len() - index;
            self.records.truncate(index);
            log::debug!("discarded {} redo record(s) of {:?}", discarded, self.owner);
            HistoryEventKind::Insert
        } else {
            HistoryEventKind::Append
        };

        self.records.push(edit);
        self.cursor = Some(index);
        log::debug!("{:?} '{}' at {}", kind, self.records[index].description(), index);

        let event = HistoryEvent {
            kind,
            edit: &self.records[index],
            position: index as isize,
        };
        notify(&mut self.listeners, &event);
        Ok(())
    }

    /// Revert the record at the cursor and move the cursor back.
    pub fn undo(&mut self, owner: &mut E::Owner) -> Result<()> {
        let Some(index) = self.cursor else {
            log::warn!("undo requested on {:?} with nothing to undo", self.owner);
            return Err(EngineError::no_pending("undo"));
        };

        self.records[index].undo(owner)?;
        self.cursor = index.checked_sub(1);

        let event = HistoryEvent {
            kind: HistoryEventKind::Undo,
            edit: &self.records[index],
            position: index as isize,
        };
        notify(&mut self.listeners, &event);
        Ok(())
    }

    /// Move the cursor forward and re-apply the record there.
    pub fn redo(&mut self, owner: &mut E::Owner) -> Result<()> {
        let index = self.next_index();
        if index >= self.records.len() {
            log::warn!("redo requested on {:?} with nothing to redo", self.owner);
            return Err(EngineError::no_pending("redo"));
        }

        self.records[index].redo(owner)?;
        self.cursor = Some(index);

        let event = HistoryEvent {
            kind: HistoryEventKind::Redo,
            edit: &self.records[index],
            position: index as isize,
        };
        notify(&mut self.listeners, &event);
        Ok(())
    }

    /// Drop all records without touching the owner. Listeners stay registered.
    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = None;
    }

    /// Subscribe to history changes. Listeners run in registration order.
    pub fn add_listener(&mut self, listener: impl HistoryListener<E> + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unsubscribe; returns `false` if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        before != self.listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn notify<E: EditRecord>(listeners: &mut [(ListenerId, Box<dyn HistoryListener<E>>)], event: &HistoryEvent<'_, E>) {
    for (_, listener) in listeners.iter_mut() {
        listener.history_changed(event);
    }
}
