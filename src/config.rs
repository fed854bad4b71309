use anyhow::{Context, Result};
use std::time::Duration;

pub const BASE_URL_ENV: &str = "UPLOAD_API_URL";
pub const DEFAULT_MIN_LOADING: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub base_url: String,
    /// Floor on how long `Loading` is shown for a single submission.
    pub min_loading: Duration,
    pub proxy: Option<String>,
}

impl UploaderConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            min_loading: DEFAULT_MIN_LOADING,
            proxy: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .with_context(|| format!("{} is not set", BASE_URL_ENV))?;
        Ok(Self::new(base_url))
    }

    pub fn with_min_loading(mut self, min_loading: Duration) -> Self {
        self.min_loading = min_loading;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url.trim_end_matches('/'))
    }
}
