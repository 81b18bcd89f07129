//! Transport contract for the flink HTTP API.

use futures::future::LocalBoxFuture;

use crate::error::ApiError;
use crate::upload::{LocalFile, StagedUpload};
use crate::{Credentials, FileData, UserInfo};

/// Boxed, non-`Send` future returned by every [`FileApi`] method.
pub type ApiFuture<'a, T> = LocalBoxFuture<'a, Result<T, ApiError>>;

/// One method per endpoint. Implementations map non-2xx replies through
/// [`ApiError::from_status`] and do not retry.
pub trait FileApi {
    /// The handle a local file picker yields on this platform.
    type File: LocalFile;

    /// `GET {base}/file`
    fn list_files(&self) -> ApiFuture<'_, Vec<FileData>>;

    /// `GET {base}/file/:key`; the server counts this as a download.
    fn fetch_file<'a>(&'a self, key: &'a str) -> ApiFuture<'a, ()>;

    /// `POST {base}/file` as multipart `{name, file, meta}`.
    fn create_file<'a>(&'a self, upload: &'a StagedUpload<Self::File>) -> ApiFuture<'a, FileData>;

    /// `DELETE {base}/file/:key`
    fn delete_file<'a>(&'a self, key: &'a str) -> ApiFuture<'a, ()>;

    /// `POST {base}/auth/login`
    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApiFuture<'a, UserInfo>;

    /// `DELETE {base}/auth/login`
    fn logout(&self) -> ApiFuture<'_, ()>;

    /// `GET {base}/auth/login`
    fn status(&self) -> ApiFuture<'_, UserInfo>;
}
