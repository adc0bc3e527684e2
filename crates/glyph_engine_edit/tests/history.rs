//! Tests for the generic edit history

use std::cell::RefCell;
use std::rc::Rc;

use glyph_engine_edit::{EditHistory, EditRecord, EngineError, HistoryEvent, HistoryEventKind, Result};
use pretty_assertions::assert_eq;

/// Sets an integer to a new value
#[derive(Clone, Debug, PartialEq)]
struct SetValue {
    owner: u32,
    old: i32,
    new: i32,
}

impl EditRecord for SetValue {
    type Owner = i32;
    type Key = u32;

    fn owner(&self) -> u32 {
        self.owner
    }

    fn description(&self) -> String {
        format!("set {}", self.new)
    }

    fn redo(&self, owner: &mut i32) -> Result<()> {
        *owner = self.new;
        Ok(())
    }

    fn undo(&self, owner: &mut i32) -> Result<()> {
        *owner = self.old;
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.old == self.new
    }
}

const OWNER: u32 = 7;

/// Apply `new` to `state` and record it, the way an editor commits a change.
fn commit(history: &mut EditHistory<SetValue>, state: &mut i32, new: i32) -> Result<()> {
    let edit = SetValue { owner: OWNER, old: *state, new };
    edit.redo(state)?;
    history.record(edit)
}

type Log = Rc<RefCell<Vec<(HistoryEventKind, isize, i32)>>>;

fn logging_history() -> (EditHistory<SetValue>, Log) {
    let mut history = EditHistory::new(OWNER);
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    history.add_listener(move |event: &HistoryEvent<'_, SetValue>| sink.borrow_mut().push((event.kind, event.position, event.edit.new)));
    (history, log)
}

#[test]
fn test_empty_history() {
    let history = EditHistory::<SetValue>::new(OWNER);
    assert_eq!(history.position(), -1);
    assert!(history.is_empty());
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_description(), None);
}

#[test]
fn test_branch_discards_redo_records() {
    let (mut history, log) = logging_history();
    let mut state = 0;

    commit(&mut history, &mut state, 1).unwrap(); // A
    assert_eq!(history.position(), 0);
    commit(&mut history, &mut state, 2).unwrap(); // B
    assert_eq!(history.position(), 1);

    history.undo(&mut state).unwrap();
    assert_eq!(history.position(), 0);
    assert_eq!(state, 1);

    commit(&mut history, &mut state, 3).unwrap(); // C
    assert_eq!(history.position(), 1);
    assert_eq!(history.len(), 2);
    assert_eq!(history.get(1).map(|e| e.new), Some(3));

    assert!(matches!(history.redo(&mut state), Err(EngineError::NoPendingOperation { operation: "redo" })));
    assert_eq!(state, 3);

    assert_eq!(
        *log.borrow(),
        vec![
            (HistoryEventKind::Append, 0, 1),
            (HistoryEventKind::Append, 1, 2),
            (HistoryEventKind::Undo, 1, 2),
            (HistoryEventKind::Insert, 1, 3),
        ]
    );
}

#[test]
fn test_round_trip_law() {
    let mut history = EditHistory::new(OWNER);
    let mut state = 42;
    for value in [5, -3, 9, 9000, 1] {
        commit(&mut history, &mut state, value).unwrap();
    }
    for _ in 0..5 {
        history.undo(&mut state).unwrap();
    }
    assert_eq!(state, 42);
    assert_eq!(history.position(), -1);
    assert!(matches!(history.undo(&mut state), Err(EngineError::NoPendingOperation { operation: "undo" })));
}

#[test]
fn test_redo_replays_exact_state() {
    let mut history = EditHistory::new(OWNER);
    let mut state = 0;
    commit(&mut history, &mut state, 10).unwrap();
    commit(&mut history, &mut state, 20).unwrap();

    history.undo(&mut state).unwrap();
    history.undo(&mut state).unwrap();
    assert_eq!(state, 0);

    history.redo(&mut state).unwrap();
    assert_eq!(state, 10);
    assert_eq!(history.position(), 0);
    history.redo(&mut state).unwrap();
    assert_eq!(state, 20);
    assert_eq!(history.position(), 1);
    assert!(!history.can_redo());
}

#[test]
fn test_undo_on_empty_history_fails() {
    let mut history = EditHistory::<SetValue>::new(OWNER);
    let mut state = 0;
    let err = history.undo(&mut state).unwrap_err();
    assert!(err.is_contract_violation());
    assert!(matches!(history.redo(&mut state), Err(EngineError::NoPendingOperation { .. })));
}

#[test]
fn test_record_rejects_foreign_owner() {
    let mut history = EditHistory::new(OWNER);
    let edit = SetValue { owner: OWNER + 1, old: 0, new: 1 };
    assert!(matches!(history.record(edit), Err(EngineError::InvalidArgument { .. })));
    assert!(history.is_empty());
}

#[test]
fn test_record_rejects_empty_edit() {
    let (mut history, log) = logging_history();
    let edit = SetValue { owner: OWNER, old: 4, new: 4 };
    assert!(matches!(history.record(edit), Err(EngineError::InvalidArgument { .. })));
    assert_eq!(history.position(), -1);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_descriptions_follow_cursor() {
    let mut history = EditHistory::new(OWNER);
    let mut state = 0;
    commit(&mut history, &mut state, 1).unwrap();
    commit(&mut history, &mut state, 2).unwrap();
    history.undo(&mut state).unwrap();

    assert_eq!(history.undo_description().as_deref(), Some("set 1"));
    assert_eq!(history.redo_description().as_deref(), Some("set 2"));
}

#[test]
fn test_listeners_run_in_registration_order() {
    let mut history = EditHistory::new(OWNER);
    let order = Rc::new(RefCell::new(Vec::new()));

    let first = order.clone();
    history.add_listener(move |_: &HistoryEvent<'_, SetValue>| first.borrow_mut().push("first"));
    let second = order.clone();
    let second_id = history.add_listener(move |_: &HistoryEvent<'_, SetValue>| second.borrow_mut().push("second"));
    assert_eq!(history.listener_count(), 2);

    let mut state = 0;
    commit(&mut history, &mut state, 1).unwrap();
    assert_eq!(*order.borrow(), vec!["first", "second"]);

    assert!(history.remove_listener(second_id));
    assert!(!history.remove_listener(second_id));
    commit(&mut history, &mut state, 2).unwrap();
    assert_eq!(*order.borrow(), vec!["first", "second", "first"]);
}

#[test]
fn test_listener_sees_applied_state() {
    // the record passed to the listener is already stored at `position`
    let mut history = EditHistory::new(OWNER);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    history.add_listener(move |event: &HistoryEvent<'_, SetValue>| sink.borrow_mut().push(event.position));

    let mut state = 0;
    commit(&mut history, &mut state, 1).unwrap();
    commit(&mut history, &mut state, 2).unwrap();
    history.undo(&mut state).unwrap();
    history.redo(&mut state).unwrap();
    assert_eq!(*seen.borrow(), vec![0, 1, 1, 1]);
}

#[test]
fn test_clear_resets_cursor() {
    let (mut history, log) = logging_history();
    let mut state = 0;
    commit(&mut history, &mut state, 1).unwrap();
    history.clear();

    assert_eq!(history.position(), -1);
    assert!(history.is_empty());
    assert_eq!(history.listener_count(), 1);
    assert_eq!(log.borrow().len(), 1);
}
