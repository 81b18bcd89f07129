use std::rc::Rc;

use crate::record::RecordRef;

/// Records acted upon during the current session, in the order it happened.
/// Not a live view: deleting a file from the index leaves it here.
#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<RecordRef>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: &RecordRef) {
        self.entries.push(Rc::clone(record));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RecordRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
