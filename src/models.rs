use serde::{Deserialize, Serialize};

/// A file picked for upload. Holds the whole payload in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Server acknowledgment of a stored file. `size` is reported in megabytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    pub size: f64,
}

/// Optional body of a rejected upload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded(UploadResult),
    Failed(String),
}

impl UploadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, UploadStatus::Loading)
    }
}
