use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SessionMode {
    /// Upload every given file, one after another
    Batch,
    /// Read commands from stdin
    Interactive,
}

#[derive(Parser, Debug)]
#[command(name = "horizon-upload")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Files to upload (batch mode) or preselect (interactive mode)
    pub files: Vec<PathBuf>,

    /// Base URL of the upload service (default: $UPLOAD_API_URL)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Session mode
    #[arg(short, long, value_enum, default_value = "batch")]
    pub mode: SessionMode,

    /// Minimum time the upload spinner stays visible, in milliseconds
    #[arg(long, default_value = "1000")]
    pub min_loading_ms: u64,

    /// HTTP proxy (e.g., http://127.0.0.1:7890)
    #[arg(long)]
    pub proxy: Option<String>,
}
