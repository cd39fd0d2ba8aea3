//! Optimistic edits to fetched records.
//!
//! A record moves `Idle -> Pending -> Applied | Rejected`. The change is shown
//! as soon as it begins; a rejection restores the record exactly as it was.

use types::Keyed;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Applied,
    Rejected(String),
}

impl MutationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationState::Pending)
    }
}

/// The optimistic effect of a mutation.
pub enum Change<T> {
    Update(Box<dyn FnOnce(&mut T)>),
    Remove,
}

impl<T> Change<T> {
    pub fn update(f: impl FnOnce(&mut T) + 'static) -> Self {
        Change::Update(Box::new(f))
    }
}

struct Entry<T> {
    record: T,
    state: MutationState,
    snapshot: Option<T>,
    removed: bool,
}

impl<T> Entry<T> {
    fn idle(record: T) -> Self {
        Self {
            record,
            state: MutationState::Idle,
            snapshot: None,
            removed: false,
        }
    }
}

pub struct RecordSet<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Keyed + Clone> RecordSet<T> {
    pub fn new(records: Vec<T>) -> Self {
        let mut set = Self::default();
        set.replace_all(records);
        set
    }

    /// Take fresh fetch results. Every record starts over as idle.
    pub fn replace_all(&mut self, records: Vec<T>) {
        self.entries = records.into_iter().map(Entry::idle).collect();
    }

    /// Records not optimistically removed, in fetch order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.entries
            .iter()
            .filter(|e| !e.removed)
            .map(|e| &e.record)
    }

    pub fn len(&self) -> usize {
        self.visible().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entry(key).filter(|e| !e.removed).map(|e| &e.record)
    }

    pub fn state(&self, key: &str) -> MutationState {
        self.entry(key)
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.entry(key).is_some_and(|e| e.state.is_pending())
    }

    /// Start a mutation. Refused, returning `false`, when the record is
    /// unknown or already has one in flight.
    pub fn begin(&mut self, key: &str, change: Change<T>) -> bool {
        let Some(entry) = self.entry_mut(key) else {
            return false;
        };
        if entry.state.is_pending() {
            return false;
        }

        entry.snapshot = Some(entry.record.clone());
        match change {
            Change::Update(f) => f(&mut entry.record),
            Change::Remove => entry.removed = true,
        }
        entry.state = MutationState::Pending;
        true
    }

    /// The backend accepted the mutation.
    pub fn apply(&mut self, key: &str) {
        let Some(index) = self.position(key) else {
            return;
        };
        let entry = &mut self.entries[index];
        if !entry.state.is_pending() {
            return;
        }

        if entry.removed {
            self.entries.remove(index);
        } else {
            entry.snapshot = None;
            entry.state = MutationState::Applied;
        }
    }

    /// The backend refused the mutation. The record is restored.
    pub fn reject(&mut self, key: &str, reason: impl Into<String>) {
        let Some(entry) = self.entry_mut(key) else {
            return;
        };
        if !entry.state.is_pending() {
            return;
        }

        if let Some(snapshot) = entry.snapshot.take() {
            entry.record = snapshot;
        }
        entry.removed = false;
        entry.state = MutationState::Rejected(reason.into());
    }

    /// A change that never reaches a backend.
    pub fn modify(&mut self, key: &str, f: impl FnOnce(&mut T)) {
        if let Some(entry) = self.entry_mut(key) {
            f(&mut entry.record);
        }
    }

    pub fn modify_all(&mut self, mut f: impl FnMut(&mut T)) {
        for entry in self.entries.iter_mut().filter(|e| !e.removed) {
            f(&mut entry.record);
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.record.key() == key)
    }

    fn entry(&self, key: &str) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| e.record.key() == key)
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut Entry<T>> {
        self.entries.iter_mut().find(|e| e.record.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        read: bool,
    }

    impl Keyed for Row {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn rows() -> RecordSet<Row> {
        RecordSet::new(
            ["a", "b", "c"]
                .into_iter()
                .map(|id| Row {
                    id: id.into(),
                    read: false,
                })
                .collect(),
        )
    }

    fn ids(set: &RecordSet<Row>) -> Vec<&str> {
        set.visible().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn update_shows_immediately_and_sticks_on_apply() {
        let mut set = rows();
        assert!(set.begin("b", Change::update(|r: &mut Row| r.read = true)));
        assert!(set.get("b").unwrap().read);
        assert!(set.is_pending("b"));

        set.apply("b");
        assert_eq!(set.state("b"), MutationState::Applied);
        assert!(set.get("b").unwrap().read);
    }

    #[test]
    fn rejected_update_restores_the_snapshot() {
        let mut set = rows();
        let before = set.get("a").cloned();
        set.begin("a", Change::update(|r: &mut Row| r.read = true));
        set.reject("a", "offline");

        assert_eq!(set.get("a").cloned(), before);
        assert_eq!(set.state("a"), MutationState::Rejected("offline".into()));
    }

    #[test]
    fn remove_hides_then_drops_on_apply() {
        let mut set = rows();
        set.begin("b", Change::Remove);
        assert_eq!(ids(&set), ["a", "c"]);
        assert_eq!(set.get("b"), None);

        set.apply("b");
        assert_eq!(ids(&set), ["a", "c"]);
        assert_eq!(set.state("b"), MutationState::Idle);
    }

    #[test]
    fn rejected_remove_puts_the_row_back_in_place() {
        let mut set = rows();
        set.begin("b", Change::Remove);
        set.reject("b", "409");
        assert_eq!(ids(&set), ["a", "b", "c"]);
    }

    #[test]
    fn one_mutation_in_flight_per_record() {
        let mut set = rows();
        assert!(set.begin("a", Change::update(|r: &mut Row| r.read = true)));
        assert!(!set.begin("a", Change::Remove));
        assert!(!set.begin("zzz", Change::Remove));
        assert_eq!(set.len(), 3);

        set.reject("a", "nope");
        assert!(set.begin("a", Change::Remove), "rejected records can retry");
    }

    #[test]
    fn apply_and_reject_ignore_idle_records() {
        let mut set = rows();
        set.apply("a");
        set.reject("b", "late");
        assert_eq!(set.state("a"), MutationState::Idle);
        assert_eq!(set.state("b"), MutationState::Idle);
    }

    #[test]
    fn refetch_resets_everything() {
        let mut set = rows();
        set.begin("a", Change::Remove);
        set.replace_all(vec![Row {
            id: "a".into(),
            read: true,
        }]);
        assert_eq!(ids(&set), ["a"]);
        assert_eq!(set.state("a"), MutationState::Idle);
    }

    #[test]
    fn local_changes_skip_the_state_machine() {
        let mut set = rows();
        set.modify_all(|r| r.read = true);
        set.modify("c", |r| r.read = false);
        let read: Vec<bool> = set.visible().map(|r| r.read).collect();
        assert_eq!(read, [true, true, false]);
        assert_eq!(set.state("c"), MutationState::Idle);
    }
}
