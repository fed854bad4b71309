use crate::config::UploaderConfig;
use crate::error::{rejection_message, UploadError};
use crate::history::UploadHistory;
use crate::models::{ErrorPayload, SelectedFile, UploadResult, UploadStatus};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Multipart field the server reads the file from.
pub const FILE_FIELD: &str = "file";

/// Owns the selection, the current status and the session history.
///
/// All mutation goes through `&mut self`, so at most one submission can be
/// pending at any time.
pub struct UploadController {
    client: Client,
    config: UploaderConfig,
    selected: Option<SelectedFile>,
    status: UploadStatus,
    history: UploadHistory,
}

impl UploadController {
    pub fn new(config: UploaderConfig) -> Result<Self, UploadError> {
        let client_builder = match &config.proxy {
            Some(proxy_url) => Client::builder()
                .proxy(reqwest::Proxy::all(proxy_url).map_err(UploadError::Client)?),
            None => Client::builder().no_proxy(),
        };

        let client = client_builder.build().map_err(UploadError::Client)?;

        Ok(Self {
            client,
            config,
            selected: None,
            status: UploadStatus::Idle,
            history: UploadHistory::new(),
        })
    }

    /// Replaces the selection and drops any feedback from a previous submit.
    pub fn select_file(&mut self, file: SelectedFile) {
        debug!(file = %file.file_name, bytes = file.size(), "file selected");
        self.selected = Some(file);
        self.status = UploadStatus::Idle;
    }

    pub fn select_path(&mut self, path: impl AsRef<Path>) -> Result<(), UploadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.select_file(SelectedFile::new(file_name, bytes));
        Ok(())
    }

    /// Uploads the selected file and returns the resulting status.
    ///
    /// Only `NoFileSelected` is returned as an error; every request failure
    /// ends up in `UploadStatus::Failed`. `Loading` is held for at least
    /// `config.min_loading`.
    pub async fn submit(&mut self, pb: &ProgressBar) -> Result<&UploadStatus, UploadError> {
        let file = self.selected.clone().ok_or(UploadError::NoFileSelected)?;

        self.status = UploadStatus::Loading;
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Uploading {}...", file.file_name));
        pb.enable_steady_tick(Duration::from_millis(100));

        info!(file = %file.file_name, bytes = file.size(), url = %self.config.upload_url(), "upload started");
        let start = Instant::now();

        let outcome = self.send(file).await;

        let elapsed = start.elapsed();
        debug!(elapsed_ms = elapsed.as_millis() as u64, "upload request finished");
        if let Some(remaining) = self.config.min_loading.checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
        pb.finish_and_clear();

        self.status = match outcome {
            Ok(result) => {
                info!(file = %result.filename, size_mb = result.size, "upload succeeded");
                self.history.record(result.clone());
                UploadStatus::Succeeded(result)
            }
            Err(err) => {
                match &err {
                    UploadError::Network(source) => error!(error = %source, "upload failed"),
                    other => warn!(error = %other, "upload failed"),
                }
                UploadStatus::Failed(err.display_message())
            }
        };

        Ok(&self.status)
    }

    async fn send(&self, file: SelectedFile) -> Result<UploadResult, UploadError> {
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(UploadError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<ErrorPayload>().await.unwrap_or_default();
            return Err(UploadError::Rejected {
                status,
                message: rejection_message(status, &payload),
            });
        }

        let body = response.bytes().await.map_err(UploadError::Network)?;
        let result = serde_json::from_slice::<UploadResult>(&body)?;

        Ok(result)
    }

    pub fn status(&self) -> &UploadStatus {
        &self.status
    }

    pub fn history(&self) -> &UploadHistory {
        &self.history
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }
}

#[cfg(test)]
#[path = "tests/uploader_tests.rs"]
mod tests;
