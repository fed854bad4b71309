use crate::error::UploadError;
use crate::history::UploadHistory;
use crate::models::UploadStatus;
use crate::uploader::UploadController;
use anyhow::{anyhow, Context, Result};
use indicatif::ProgressBar;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::warn;

const HELP: &str = "\
Commands:
  select <path>   choose the file to upload
  upload          upload the selected file
  status          show the result of the last upload
  history         list uploads of this session
  help            show this message
  quit            leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Upload,
    Status,
    History,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "select" if rest.is_empty() => Err(anyhow!("usage: select <path>")),
            "select" => Ok(Command::Select(PathBuf::from(rest))),
            "upload" => Ok(Command::Upload),
            "status" => Ok(Command::Status),
            "history" => Ok(Command::History),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(anyhow!("Unknown command: {} (try 'help')", other)),
        }
    }
}

pub fn render_status(status: &UploadStatus) -> String {
    match status {
        UploadStatus::Idle => "Ready.".to_string(),
        UploadStatus::Loading => "Uploading...".to_string(),
        UploadStatus::Succeeded(result) => format!(
            "✅ Upload successful!\nFilename: {}\nSize: {} MBs",
            result.filename, result.size
        ),
        UploadStatus::Failed(message) => format!("❌ Upload failed: {}", message),
    }
}

pub fn render_history(history: &UploadHistory) -> String {
    let mut out = format!("Upload History ({})\n", history.len());
    if history.is_empty() {
        out.push_str("No uploads yet this session.");
        return out;
    }

    let lines: Vec<String> = history
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("[{:>2}] {}  Size: {} MBs", idx + 1, item.filename, item.size))
        .collect();
    out.push_str(&lines.join("\n"));
    out
}

fn progress_bar(interactive: bool) -> ProgressBar {
    if interactive {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    }
}

async fn upload_selected<W: Write>(
    controller: &mut UploadController,
    pb: &ProgressBar,
    out: &mut W,
) -> Result<()> {
    match controller.submit(pb).await {
        Ok(status) => writeln!(out, "{}", render_status(status))?,
        Err(UploadError::NoFileSelected) => {
            warn!("upload requested without a selected file");
            writeln!(out, "⚠️  {}", UploadError::NoFileSelected)?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Uploads each path in order and prints the history at the end.
pub async fn run_batch<W: Write>(
    controller: &mut UploadController,
    files: &[PathBuf],
    show_progress: bool,
    out: &mut W,
) -> Result<()> {
    if files.is_empty() {
        return Err(anyhow!("No files given to upload"));
    }

    let mut success = 0;
    let mut failed = 0;

    for path in files {
        writeln!(out, "{}", path.display())?;
        if let Err(e) = controller.select_path(path) {
            writeln!(out, "❌ {}", e)?;
            failed += 1;
            continue;
        }

        upload_selected(controller, &progress_bar(show_progress), out).await?;
        match controller.status() {
            UploadStatus::Succeeded(_) => success += 1,
            _ => failed += 1,
        }
    }

    writeln!(out, "\n{}", render_history(controller.history()))?;
    writeln!(out, "\nDone: {} success, {} failed", success, failed)?;

    Ok(())
}

/// Line-oriented session: one command per line until `quit` or end of input.
pub async fn run_interactive<R: BufRead, W: Write>(
    controller: &mut UploadController,
    input: R,
    show_progress: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Upload target: {}", controller.config().upload_url())?;
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Select(path) => match controller.select_path(&path) {
                Ok(()) => {
                    if let Some(file) = controller.selected() {
                        writeln!(out, "Selected {} ({} bytes)", file.file_name, file.size())?;
                    }
                }
                Err(e) => writeln!(out, "❌ {}", e)?,
            },
            Command::Upload if !controller.can_submit() => {
                writeln!(out, "Upload already in progress")?;
            }
            Command::Upload => {
                upload_selected(controller, &progress_bar(show_progress), out).await?;
            }
            Command::Status => {
                if let Some(file) = controller.selected() {
                    writeln!(out, "Selected: {}", file.file_name)?;
                }
                writeln!(out, "{}", render_status(controller.status()))?;
            }
            Command::History => writeln!(out, "{}", render_history(controller.history()))?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploaderConfig;
    use crate::models::UploadResult;
    use axum::{routing::post, Router};
    use std::io::Cursor;
    use std::time::Duration;
    use tokio::net::TcpListener;

    async fn spawn_echo_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new().route(
            "/upload",
            post(|| async { r#"{"filename":"notes.txt","size":0.5}"# }),
        );
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn fast_controller(base_url: &str) -> UploadController {
        UploadController::new(UploaderConfig::new(base_url).with_min_loading(Duration::ZERO))
            .unwrap()
    }

    fn fixture(name: &str, contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_commands() {
        assert_eq!(
            Command::parse("select  ./data/my file.csv ").unwrap(),
            Command::Select(PathBuf::from("./data/my file.csv"))
        );
        assert_eq!(Command::parse("upload").unwrap(), Command::Upload);
        assert_eq!(Command::parse("  history").unwrap(), Command::History);
        assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
        assert!(Command::parse("select").is_err());
        assert!(Command::parse("delete a.txt").is_err());
    }

    #[test]
    fn renders_status_variants() {
        let ok = UploadStatus::Succeeded(UploadResult {
            filename: "a.txt".into(),
            size: 10.0,
        });
        assert_eq!(
            render_status(&ok),
            "✅ Upload successful!\nFilename: a.txt\nSize: 10 MBs"
        );
        assert_eq!(
            render_status(&UploadStatus::Failed("dup".into())),
            "❌ Upload failed: dup"
        );
    }

    #[test]
    fn renders_history_in_order() {
        let mut history = UploadHistory::new();
        assert_eq!(
            render_history(&history),
            "Upload History (0)\nNo uploads yet this session."
        );

        history.record(UploadResult {
            filename: "first.csv".into(),
            size: 1.25,
        });
        history.record(UploadResult {
            filename: "second.pdf".into(),
            size: 0.01,
        });
        assert_eq!(
            render_history(&history),
            "Upload History (2)\n[ 1] first.csv  Size: 1.25 MBs\n[ 2] second.pdf  Size: 0.01 MBs"
        );
    }

    #[tokio::test]
    async fn interactive_session_uploads_and_lists_history() {
        let base_url = spawn_echo_server().await;
        let path = fixture("notes.txt", b"remember");
        let mut controller = fast_controller(&base_url);

        let script = format!(
            "upload\nselect {}\nupload\nhistory\nquit\nupload\n",
            path.display()
        );
        let mut out = Vec::new();
        run_interactive(&mut controller, Cursor::new(script), false, &mut out)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Please select a file first"));
        assert!(out.contains("✅ Upload successful!"));
        assert!(out.contains("[ 1] notes.txt  Size: 0.5 MBs"));
        assert_eq!(controller.history().len(), 1);
    }

    #[tokio::test]
    async fn batch_reports_unreadable_paths_and_keeps_going() {
        let base_url = spawn_echo_server().await;
        let path = fixture("batch.txt", b"payload");
        let mut controller = fast_controller(&base_url);

        let files = vec![PathBuf::from("/no/such/file.txt"), path.clone()];
        let mut out = Vec::new();
        run_batch(&mut controller, &files, false, &mut out)
            .await
            .unwrap();
        std::fs::remove_file(&path).ok();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("failed to read /no/such/file.txt"));
        assert!(out.contains("Done: 1 success, 1 failed"));
        assert_eq!(controller.history().len(), 1);
    }

    #[tokio::test]
    async fn batch_requires_files() {
        let mut controller = fast_controller("http://127.0.0.1:9");
        let mut out = Vec::new();
        assert!(run_batch(&mut controller, &[], false, &mut out).await.is_err());
    }
}
