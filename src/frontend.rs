use gloo_net::http::{Request, Response};
use log::{LevelFilter, Log, Metadata, Record};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::FormData;

use crate::api::{ApiFuture, FileApi};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::upload::{LocalFile, StagedUpload};
use crate::{Credentials, FileData, UserInfo};

impl LocalFile for gloo_file::File {
    fn name(&self) -> String {
        gloo_file::File::name(self)
    }

    fn size(&self) -> u64 {
        gloo_file::Blob::size(self)
    }
}

/// Browser transport over `fetch`.
#[derive(Debug, Clone, Default)]
pub struct GlooApi {
    config: ClientConfig,
}

impl GlooApi {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

fn js(e: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status, message))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(format!("{:?}", e)))
}

impl FileApi for GlooApi {
    type File = gloo_file::File;

    fn list_files(&self) -> ApiFuture<'_, Vec<FileData>> {
        Box::pin(async move {
            let response = Request::get(&self.config.files_url())
                .send()
                .await
                .map_err(network)?;
            decode(response).await
        })
    }

    fn fetch_file<'a>(&'a self, key: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let response = Request::get(&self.config.file_url(key))
                .send()
                .await
                .map_err(network)?;
            check(response).await.map(|_| ())
        })
    }

    fn create_file<'a>(&'a self, upload: &'a StagedUpload<Self::File>) -> ApiFuture<'a, FileData> {
        Box::pin(async move {
            let form = FormData::new().map_err(js)?;
            form.append_with_str("name", &upload.name).map_err(js)?;
            let blob: &web_sys::Blob = upload.file.as_ref();
            form.append_with_blob_and_filename("file", blob, &upload.file.name())
                .map_err(js)?;
            form.append_with_str("meta", &upload.meta).map_err(js)?;

            let response = Request::post(&self.config.files_url())
                .body(form)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            decode(response).await
        })
    }

    fn delete_file<'a>(&'a self, key: &'a str) -> ApiFuture<'a, ()> {
        Box::pin(async move {
            let response = Request::delete(&self.config.file_url(key))
                .send()
                .await
                .map_err(network)?;
            check(response).await.map(|_| ())
        })
    }

    fn login<'a>(&'a self, credentials: &'a Credentials) -> ApiFuture<'a, UserInfo> {
        Box::pin(async move {
            let response = Request::post(&self.config.login_url())
                .json(credentials)
                .map_err(network)?
                .send()
                .await
                .map_err(network)?;
            decode(response).await
        })
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        Box::pin(async move {
            let response = Request::delete(&self.config.login_url())
                .send()
                .await
                .map_err(network)?;
            check(response).await.map(|_| ())
        })
    }

    fn status(&self) -> ApiFuture<'_, UserInfo> {
        Box::pin(async move {
            let response = Request::get(&self.config.login_url())
                .send()
                .await
                .map_err(network)?;
            decode(response).await
        })
    }
}

struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line.into()),
            log::Level::Warn => web_sys::console::warn_1(&line.into()),
            _ => web_sys::console::log_1(&line.into()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Installs the panic hook and routes `log` output to the browser console.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}
