use std::cell::Cell;
use std::rc::Rc;

use crate::size::HumanSize;
use crate::FileData;

/// Shared handle to a record. The index owns the entry; the activity log keeps
/// another handle to the same record.
pub type RecordRef = Rc<FileRecord>;

/// Client-side view of one server-confirmed file.
#[derive(Debug)]
pub struct FileRecord {
    data: FileData,
    size: HumanSize,
    visible: Cell<bool>,
}

impl FileRecord {
    pub fn new(data: FileData) -> Self {
        let size = HumanSize::from_bytes(data.bytes);
        Self {
            data,
            size,
            visible: Cell::new(true),
        }
    }

    pub fn key(&self) -> &str {
        &self.data.key
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn bytes(&self) -> u64 {
        self.data.bytes
    }

    pub fn downloads(&self) -> u64 {
        self.data.downloads
    }

    pub fn meta(&self) -> &str {
        &self.data.meta
    }

    pub fn upload_date(&self) -> Option<&str> {
        self.data.upload_date.as_deref()
    }

    pub fn delete_date(&self) -> Option<&str> {
        self.data.delete_date.as_deref()
    }

    pub fn human_size(&self) -> HumanSize {
        self.size
    }

    pub fn data(&self) -> &FileData {
        &self.data
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Soft hide; the record stays in the index and in `usage`.
    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Path of the public download page, relative to the share domain.
    pub fn rel_link(&self) -> String {
        format!("/f/{}", self.data.key)
    }
}
