use std::{cell::RefCell, collections::HashMap};

/// Somewhere to keep the local snapshot between visits.
///
/// Saving is fire-and-forget: implementations log their own failures.
pub trait Store {
    fn save(&self, key: &str, value: String);
}

/// Keeps snapshots in memory. Used when nothing outlives the page, and in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl Store for MemoryStore {
    fn save(&self, key: &str, value: String) {
        self.entries.borrow_mut().insert(key.to_string(), value);
    }
}
