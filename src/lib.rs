use std::fmt;

use serde::{Deserialize, Serialize};

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod index;
pub mod record;
pub mod session;
pub mod size;
pub mod upload;

pub use api::{ApiFuture, FileApi};
pub use client::{ClientEvent, FlinkClient, Removal, Route};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorClass};
pub use history::ActivityLog;
pub use index::{FileIndex, Usage};
pub use record::{FileRecord, RecordRef};
pub use session::{AuthState, SessionState};
pub use size::{HumanSize, SizeUnit};
pub use upload::{LocalFile, StagedUpload, UploadStage};

/// One file as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileData {
    pub key: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub meta: String,
    #[serde(alias = "val")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_date: Option<String>,
}

impl FileData {
    pub fn new(key: &str, name: &str, bytes: u64) -> Self {
        Self {
            key: key.to_string(),
            bytes,
            downloads: 0,
            meta: upload::DEFAULT_META.to_string(),
            name: name.to_string(),
            upload_date: None,
            delete_date: None,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of both the login reply and the session status probe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub name: String,
}

#[cfg(feature = "frontend")]
pub mod frontend;

#[cfg(feature = "frontend")]
pub use frontend::*;
