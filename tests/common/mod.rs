//! Scripted in-memory stand-in for the flink HTTP API.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use flink::{ApiError, ApiFuture, ClientConfig, Credentials, FileApi, FileData, FlinkClient, LocalFile, StagedUpload, UserInfo};
use futures::channel::oneshot;
use futures::FutureExt;

#[derive(Debug, Clone, PartialEq)]
pub struct MemFile {
    pub name: String,
    pub bytes: u64,
}

impl MemFile {
    pub fn new(name: &str, bytes: u64) -> Self {
        Self {
            name: name.to_string(),
            bytes,
        }
    }
}

impl LocalFile for MemFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.bytes
    }
}

pub type Gate<T> = oneshot::Sender<Result<T, ApiError>>;

/// Each endpoint answers from its queue when one is scripted, otherwise with a
/// default reply. Listing and create requests first take a gate when one is
/// queued, and stay pending until the test sends through it. Every call is
/// recorded as `"METHOD path"`.
#[derive(Default)]
pub struct MockApi {
    pub listing: RefCell<Vec<FileData>>,
    pub list_replies: RefCell<VecDeque<Result<Vec<FileData>, ApiError>>>,
    pub list_gates: RefCell<VecDeque<oneshot::Receiver<Result<Vec<FileData>, ApiError>>>>,
    pub create_gates: RefCell<VecDeque<oneshot::Receiver<Result<FileData, ApiError>>>>,
    pub fetch_replies: RefCell<VecDeque<Result<(), ApiError>>>,
    pub create_replies: RefCell<VecDeque<Result<FileData, ApiError>>>,
    pub delete_replies: RefCell<VecDeque<Result<(), ApiError>>>,
    pub login_replies: RefCell<VecDeque<Result<UserInfo, ApiError>>>,
    pub logout_replies: RefCell<VecDeque<Result<(), ApiError>>>,
    pub status_replies: RefCell<VecDeque<Result<UserInfo, ApiError>>>,
    pub calls: RefCell<Vec<String>>,
    pub uploads: RefCell<Vec<(String, String, String)>>,
    pub logins: RefCell<Vec<Credentials>>,
}

impl MockApi {
    pub fn with_listing(files: Vec<FileData>) -> Self {
        let api = Self::default();
        *api.listing.borrow_mut() = files;
        api
    }

    /// Holds the next listing reply until the returned sender fires.
    pub fn gate_listing(&self) -> Gate<Vec<FileData>> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.borrow_mut().push_back(rx);
        tx
    }

    /// Holds the next create reply until the returned sender fires.
    pub fn gate_create(&self) -> Gate<FileData> {
        let (tx, rx) = oneshot::channel();
        self.create_gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls_to(&self, call: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.as_str() == call).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn called(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn gated<'a, T: 'a>(gate: oneshot::Receiver<Result<T, ApiError>>) -> ApiFuture<'a, T> {
    async move {
        gate.await
            .unwrap_or_else(|_| Err(ApiError::Network("reply dropped".to_string())))
    }
    .boxed_local()
}

fn next<T>(queue: &RefCell<VecDeque<Result<T, ApiError>>>, fallback: impl FnOnce() -> Result<T, ApiError>) -> Result<T, ApiError> {
    queue.borrow_mut().pop_front().unwrap_or_else(fallback)
}

impl FileApi for MockApi {
    type File = MemFile;

    fn list_files(&self) -> ApiFuture<'_, Vec<FileData>> {
        self.called("GET /api/file".to_string());
        let gate = self.list_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            return gated(gate);
        }
        let reply = next(&self.list_replies, || Ok(self.listing.borrow().clone()));
        async move { reply }.boxed_local()
    }

    fn fetch_file<'a>(&'a self, key: &'a str) -> ApiFuture<'a, ()> {
        self.called(format!("GET /api/file/{}", key));
        let reply = next(&self.fetch_replies, || Ok(()));
        async move { reply }.boxed_local()
    }

    fn create_file<'a>(&'a self, upload: &'a StagedUpload<MemFile>) -> ApiFuture<'a, FileData> {
        self.called("POST /api/file".to_string());
        self.uploads
            .borrow_mut()
            .push((upload.name.clone(), upload.file.name.clone(), upload.meta.clone()));
        let gate = self.create_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            return gated(gate);
        }
        let reply = next(&self.create_replies, || {
            let key = format!("new{}", self.uploads.borrow().len());
            Ok(FileData {
                meta: upload.meta.clone(),
                ..FileData::new(&key, &upload.name, upload.file.bytes)
            })
        });
        async move { reply }.boxed_local()
    }

    fn delete_file<'a>(&'a self, key: &'a str) -> ApiFuture<'a, ()> {
        self.called(format!("DELETE /api/file/{}", key));
        let reply = next(&self.delete_replies, || Ok(()));
        async move { reply }.boxed_local()
    }

    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApiFuture<'a, UserInfo> {
        self.called("POST /api/auth/login".to_string());
        self.logins.borrow_mut().push(credentials.clone());
        let reply = next(&self.login_replies, || {
            Ok(UserInfo {
                name: credentials.username.clone(),
            })
        });
        async move { reply }.boxed_local()
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        self.called("DELETE /api/auth/login".to_string());
        let reply = next(&self.logout_replies, || Ok(()));
        async move { reply }.boxed_local()
    }

    fn status(&self) -> ApiFuture<'_, UserInfo> {
        self.called("GET /api/auth/login".to_string());
        let reply = next(&self.status_replies, || Err(ApiError::Forbidden));
        async move { reply }.boxed_local()
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn client(api: MockApi) -> FlinkClient<MockApi> {
    init_logging();
    FlinkClient::new(api, ClientConfig::default())
}

pub fn file(key: &str, name: &str, bytes: u64, downloads: u64) -> FileData {
    FileData {
        downloads,
        ..FileData::new(key, name, bytes)
    }
}

pub fn user(name: &str) -> Result<UserInfo, ApiError> {
    Ok(UserInfo {
        name: name.to_string(),
    })
}

pub fn assert_usage_consistent(client: &FlinkClient<MockApi>) {
    let index = client.index();
    let usage = index.usage();
    assert_eq!(usage.total_bytes, index.entries().iter().map(|r| r.bytes()).sum::<u64>());
    assert_eq!(usage.total_downloads, index.entries().iter().map(|r| r.downloads()).sum::<u64>());
    assert_eq!(usage.count, index.len());
}
