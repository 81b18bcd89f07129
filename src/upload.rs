/// Access mode sent with a new upload unless the user picks another one.
pub const DEFAULT_META: &str = "w";

/// A file chosen in the local picker.
pub trait LocalFile: Clone {
    fn name(&self) -> String;
    fn size(&self) -> u64;
}

/// The selection waiting for `commit`, and the multipart fields it becomes.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpload<F> {
    pub file: F,
    pub name: String,
    pub meta: String,
}

#[derive(Debug)]
pub struct UploadStage<F> {
    staged: Option<StagedUpload<F>>,
    in_progress: bool,
}

impl<F> Default for UploadStage<F> {
    fn default() -> Self {
        Self {
            staged: None,
            in_progress: false,
        }
    }
}

impl<F: LocalFile> UploadStage<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> Option<&StagedUpload<F>> {
        self.staged.as_ref()
    }

    pub fn is_staged(&self) -> bool {
        self.staged.is_some()
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Stages `file` under its own name. Returns false, and keeps the current
    /// selection, when the picker reported nothing.
    pub fn select(&mut self, file: Option<F>) -> bool {
        let Some(file) = file else {
            log::info!("upload: nothing selected");
            return false;
        };

        let meta = self
            .staged
            .take()
            .map(|previous| previous.meta)
            .unwrap_or_else(|| DEFAULT_META.to_string());
        log::info!("upload: staging {} ({} bytes)", file.name(), file.size());
        self.staged = Some(StagedUpload {
            name: file.name(),
            file,
            meta,
        });
        true
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        match self.staged.as_mut() {
            Some(staged) => {
                staged.name = name.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_meta(&mut self, meta: &str) -> bool {
        match self.staged.as_mut() {
            Some(staged) => {
                staged.meta = meta.to_string();
                true
            }
            None => false,
        }
    }

    /// Marks the stage as in flight and returns a copy of what to send.
    pub fn begin_commit(&mut self) -> Option<StagedUpload<F>> {
        let staged = self.staged.clone()?;
        self.in_progress = true;
        Some(staged)
    }

    /// Keeps the selection so the user can retry without picking again.
    pub fn abort_commit(&mut self) {
        self.in_progress = false;
    }

    pub fn cancel(&mut self) {
        self.staged = None;
        self.in_progress = false;
    }
}
