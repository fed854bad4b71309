use crate::models::UploadResult;

/// Successful uploads of the current session, oldest first. Append-only.
#[derive(Debug, Clone, Default)]
pub struct UploadHistory {
    entries: Vec<UploadResult>,
}

impl UploadHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: UploadResult) {
        self.entries.push(result);
    }

    pub fn entries(&self) -> &[UploadResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
