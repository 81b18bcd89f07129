//! Client-side mirror of the user's files.
//!
//! [`FileIndex`] only holds state. The network half of resynchronisation and
//! deletion lives in [`crate::client::FlinkClient`], which applies server
//! replies here once they arrive.

use std::rc::Rc;

use crate::record::{FileRecord, RecordRef};
use crate::FileData;

/// Aggregate counters over every entry of the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub total_bytes: u64,
    pub total_downloads: u64,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct FileIndex {
    entries: Vec<RecordRef>,
    usage: Usage,
    visible: bool,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[RecordRef] {
        &self.entries
    }

    pub fn usage(&self) -> Usage {
        self.usage
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, key: &str) -> Option<&RecordRef> {
        self.entries.iter().find(|record| record.key() == key)
    }

    /// Replaces the whole entry set with a fresh server listing.
    pub fn replace_all(&mut self, files: Vec<FileData>) {
        self.clear();
        for data in files {
            self.insert(data);
        }
        self.visible = true;
    }

    /// Appends a server-confirmed file. A record already holding the same key
    /// is dropped first so keys stay unique.
    pub fn insert(&mut self, data: FileData) -> RecordRef {
        if self.find(&data.key).is_some() {
            log::warn!("file {} already indexed, replacing it", data.key);
            self.remove(&data.key);
        }

        let record = Rc::new(FileRecord::new(data));
        self.usage.total_bytes = self.usage.total_bytes.saturating_add(record.bytes());
        self.usage.total_downloads = self.usage.total_downloads.saturating_add(record.downloads());
        self.entries.push(Rc::clone(&record));
        self.usage.count = self.entries.len();
        self.visible = true;
        record
    }

    /// Removes the record with `key`. `None` means the index no longer holds
    /// it and the caller should resynchronise.
    pub fn remove(&mut self, key: &str) -> Option<RecordRef> {
        let position = self.entries.iter().position(|record| record.key() == key)?;
        let record = self.entries.remove(position);
        self.recount();
        Some(record)
    }

    // Totals saturate at u64::MAX, so they are rebuilt rather than subtracted.
    fn recount(&mut self) {
        let mut usage = Usage {
            count: self.entries.len(),
            ..Usage::default()
        };
        for record in &self.entries {
            usage.total_bytes = usage.total_bytes.saturating_add(record.bytes());
            usage.total_downloads = usage.total_downloads.saturating_add(record.downloads());
        }
        self.usage = usage;
    }

    /// Empties the index. Visibility is left to the caller.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.usage = Usage::default();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Soft-hides every record whose name does not contain `query`, ignoring
    /// case. Returns how many records remain visible.
    pub fn filter(&self, query: &str) -> usize {
        let needle = query.trim().to_lowercase();
        let mut shown = 0;
        for record in &self.entries {
            let visible = needle.is_empty() || record.name().to_lowercase().contains(&needle);
            record.set_visible(visible);
            if visible {
                shown += 1;
            }
        }
        shown
    }

    pub fn show_all(&self) {
        for record in &self.entries {
            record.set_visible(true);
        }
    }
}
