//! Staged writes awaiting a unit-of-work commit.

use parking_lot::Mutex;

/// A single staged write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T, ID> {
    /// Insert a new row.
    Insert(T),
    /// Replace an existing row.
    Update(T),
    /// Remove a row by key.
    Delete(ID),
}

/// Ordered buffer of staged writes for one repository.
///
/// Changes are applied in the order they were staged.
#[derive(Debug)]
pub struct ChangeSet<T, ID> {
    pending: Mutex<Vec<Change<T, ID>>>,
}

impl<T, ID> ChangeSet<T, ID> {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Stages a change.
    pub fn stage(&self, change: Change<T, ID>) {
        self.pending.lock().push(change);
    }

    /// Number of staged changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Returns true when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Takes every staged change, leaving the set empty.
    pub fn drain(&self) -> Vec<Change<T, ID>> {
        std::mem::take(&mut *self.pending.lock())
    }
}

impl<T, ID> Default for ChangeSet<T, ID> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_change_set_is_empty() {
        let changes: ChangeSet<String, u32> = ChangeSet::new();
        assert!(changes.is_empty());
        assert_eq!(changes.len(), 0);
    }

    #[test]
    fn test_drain_preserves_staging_order() {
        let changes = ChangeSet::new();
        changes.stage(Change::Insert("a".to_string()));
        changes.stage(Change::Update("a2".to_string()));
        changes.stage(Change::Delete(7_u32));
        assert_eq!(changes.len(), 3);

        let drained = changes.drain();
        assert_eq!(
            drained,
            vec![
                Change::Insert("a".to_string()),
                Change::Update("a2".to_string()),
                Change::Delete(7),
            ]
        );
        assert!(changes.is_empty());
    }

    #[test]
    fn test_drain_twice_yields_nothing_second_time() {
        let changes = ChangeSet::new();
        changes.stage(Change::<String, u32>::Delete(1));
        assert_eq!(changes.drain().len(), 1);
        assert!(changes.drain().is_empty());
    }
}
