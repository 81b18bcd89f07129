//! The client core: owns the session, index, activity log and upload stage,
//! and applies server replies to them.
//!
//! Every operation borrows state only between suspension points, so requests
//! issued from separate tasks may interleave freely. Replies are applied in the
//! order they arrive; two overlapping resynchronisations end with the later
//! reply's listing.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;

use crate::api::FileApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ErrorClass};
use crate::history::ActivityLog;
use crate::index::FileIndex;
use crate::record::{FileRecord, RecordRef};
use crate::session::SessionState;
use crate::upload::UploadStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Login,
}

/// Things the rendering layer has to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    Navigate(Route),
    /// The staged selection is gone; reset any native file input.
    SelectionCleared,
    /// An upload was committed and indexed under this key.
    UploadComplete(String),
}

/// How a confirmed deletion reached the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The record was already gone locally or the server no longer knew it,
    /// so the index was rebuilt from the listing instead.
    Resynchronized,
}

pub struct FlinkClient<A: FileApi> {
    api: A,
    config: ClientConfig,
    session: RefCell<SessionState>,
    index: RefCell<FileIndex>,
    history: RefCell<ActivityLog>,
    upload: RefCell<UploadStage<A::File>>,
    events: RefCell<VecDeque<ClientEvent>>,
}

impl<A: FileApi> FlinkClient<A> {
    pub fn new(api: A, config: ClientConfig) -> Self {
        Self {
            api,
            config,
            session: RefCell::new(SessionState::new()),
            index: RefCell::new(FileIndex::new()),
            history: RefCell::new(ActivityLog::new()),
            upload: RefCell::new(UploadStage::new()),
            events: RefCell::new(VecDeque::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read guard; drop it before awaiting, or a reply landing meanwhile
    /// panics on its `borrow_mut`.
    pub fn session(&self) -> Ref<'_, SessionState> {
        self.session.borrow()
    }

    /// Read guard; drop it before awaiting, or a reply landing meanwhile
    /// panics on its `borrow_mut`.
    pub fn index(&self) -> Ref<'_, FileIndex> {
        self.index.borrow()
    }

    /// Read guard; drop it before awaiting, or a reply landing meanwhile
    /// panics on its `borrow_mut`.
    pub fn history(&self) -> Ref<'_, ActivityLog> {
        self.history.borrow()
    }

    /// Read guard; drop it before awaiting, or a reply landing meanwhile
    /// panics on its `borrow_mut`.
    pub fn upload(&self) -> Ref<'_, UploadStage<A::File>> {
        self.upload.borrow()
    }

    /// Drains pending events in the order they were raised.
    pub fn take_events(&self) -> Vec<ClientEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn share_link(&self, record: &FileRecord) -> String {
        self.config.share_link(record.key())
    }

    fn emit(&self, event: ClientEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Routes a 403 through [`Self::forbidden`] and hands the error back.
    fn fail(&self, err: ApiError) -> ApiError {
        if err.is_forbidden() {
            self.forbidden();
        } else {
            log::warn!("request failed: {}", err);
        }
        err
    }

    fn end_session(&self) {
        self.session.borrow_mut().clear();
        self.index.borrow_mut().clear();
        self.history.borrow_mut().clear();
        self.emit(ClientEvent::Navigate(Route::Login));
    }

    /// Drops the session and every cached file, hides the index and sends the
    /// user to the login surface.
    pub fn forbidden(&self) {
        log::warn!("access forbidden, clearing session");
        self.index.borrow_mut().hide();
        self.end_session();
    }

    // Files

    /// Replaces the index with the server's current listing. Non-403 failures
    /// leave the index as it was.
    pub async fn resynchronize(&self) -> Result<(), ApiError> {
        log::info!("updating file list");
        match self.api.list_files().await {
            Ok(files) => {
                log::debug!("{} files listed", files.len());
                self.index.borrow_mut().replace_all(files);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Deletes `key` on the server, then from the index. Nothing changes
    /// locally before the server confirms.
    pub async fn delete(&self, key: &str) -> Result<Removal, ApiError> {
        log::info!("deleting file {}", key);
        match self.api.delete_file(key).await {
            Ok(()) => {
                let removed = self.index.borrow_mut().remove(key);
                if removed.is_some() {
                    return Ok(Removal::Removed);
                }
                log::warn!("file {} already gone from index, resynchronizing", key);
                self.resynchronize().await?;
                Ok(Removal::Resynchronized)
            }
            Err(err) => match err.class() {
                ErrorClass::Unauthorized => Err(self.fail(err)),
                ErrorClass::Rejected => {
                    log::warn!("delete of {} rejected ({}), resynchronizing", key, err);
                    self.resynchronize().await?;
                    Ok(Removal::Resynchronized)
                }
                ErrorClass::Transient => Err(self.fail(err)),
            },
        }
    }

    /// Asks the server for `key`, which registers a download there. Local
    /// counters catch up on the next resynchronisation.
    pub async fn register_download(&self, key: &str) -> Result<(), ApiError> {
        log::info!("registering download of {}", key);
        self.api.fetch_file(key).await.map_err(|err| self.fail(err))
    }

    // Upload

    pub fn select_local_file(&self, file: Option<A::File>) -> bool {
        self.upload.borrow_mut().select(file)
    }

    pub fn set_upload_name(&self, name: &str) -> bool {
        self.upload.borrow_mut().set_name(name)
    }

    pub fn set_upload_meta(&self, meta: &str) -> bool {
        self.upload.borrow_mut().set_meta(meta)
    }

    pub fn cancel_upload(&self) {
        self.upload.borrow_mut().cancel();
        self.emit(ClientEvent::SelectionCleared);
    }

    /// Sends the staged selection. `Ok(None)` means nothing was staged and no
    /// request went out. On failure the selection stays staged for a retry.
    pub async fn commit(&self) -> Result<Option<RecordRef>, ApiError> {
        let Some(staged) = self.upload.borrow_mut().begin_commit() else {
            log::warn!("upload: no file staged");
            return Ok(None);
        };

        log::info!("upload: sending {} ({})", staged.name, staged.meta);
        match self.api.create_file(&staged).await {
            Ok(data) => {
                log::info!("upload: stored as {}", data.key);
                self.upload.borrow_mut().cancel();
                self.emit(ClientEvent::SelectionCleared);

                let record = self.index.borrow_mut().insert(data);
                self.history.borrow_mut().record(&record);
                self.emit(ClientEvent::UploadComplete(record.key().to_string()));
                Ok(Some(record))
            }
            Err(err) => {
                self.upload.borrow_mut().abort_commit();
                Err(self.fail(err))
            }
        }
    }

    // Session

    pub fn set_credentials(&self, username: &str, password: &str) {
        self.session.borrow_mut().set_credentials(username, password);
    }

    pub async fn submit_login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        self.set_credentials(username, password);
        self.accept_login().await
    }

    /// Submits the staged credentials. They leave the session before the
    /// request is issued and are dropped once it settles.
    pub async fn accept_login(&self) -> Result<(), ApiError> {
        let credentials = self.session.borrow_mut().begin_login();
        log::info!("sending login request for {}", credentials.username);
        let reply = self.api.login(&credentials).await;
        drop(credentials);

        match reply {
            Ok(user) => {
                log::info!("logged in as {}", user.name);
                self.session.borrow_mut().authorize(user.name);
                self.emit(ClientEvent::Navigate(Route::Index));
                Ok(())
            }
            Err(err) => {
                self.session.borrow_mut().reject();
                Err(self.fail(err))
            }
        }
    }

    /// Confirms who is logged in. A known identity is trusted as is.
    pub async fn query_status(&self) -> Result<(), ApiError> {
        if self.session.borrow().identity().is_some() {
            return Ok(());
        }

        self.session.borrow_mut().begin_query();
        log::info!("sending status query");
        match self.api.status().await {
            Ok(user) => {
                self.session.borrow_mut().authorize(user.name);
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Ends the session on the server. Local state is cleared whether or not
    /// the server acknowledged it; the error is still returned.
    pub async fn logout(&self) -> Result<(), ApiError> {
        log::info!("sending logout request");
        match self.api.logout().await {
            Ok(()) => {
                self.end_session();
                Ok(())
            }
            Err(err) => {
                if !err.is_forbidden() {
                    self.end_session();
                }
                Err(self.fail(err))
            }
        }
    }

    /// Runs the work that belongs to entering `route`.
    pub async fn enter(&self, route: Route) -> Result<(), ApiError> {
        match route {
            Route::Login => {
                if self.session.borrow().is_authorized() {
                    self.emit(ClientEvent::Navigate(Route::Index));
                }
                Ok(())
            }
            Route::Index => {
                let status = self.query_status().await;
                if let Err(ApiError::Forbidden) = status {
                    return status;
                }
                let synced = self.resynchronize().await;
                status.and(synced)
            }
        }
    }
}
