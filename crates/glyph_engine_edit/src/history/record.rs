use crate::Result;

/// One reversible mutation of an owner object.
///
/// Records are immutable once created. The owner is not stored in the
/// record; it is handed in on every replay, the record only remembers which
/// owner it belongs to via [`EditRecord::owner`].
pub trait EditRecord {
    /// The object this record mutates
    type Owner: ?Sized;

    /// Identity of the owner, used to reject records meant for another history
    type Key: Clone + PartialEq + std::fmt::Debug;

    /// The owner this record was created for
    fn owner(&self) -> Self::Key;

    /// Human readable description for undo/redo menu entries
    fn description(&self) -> String;

    /// Re-apply the mutation
    fn redo(&self, owner: &mut Self::Owner) -> Result<()>;

    /// Revert the mutation
    fn undo(&self, owner: &mut Self::Owner) -> Result<()>;

    /// Records without any effect are refused by [`super::EditHistory::record`].
    fn is_empty(&self) -> bool {
        false
    }
}
