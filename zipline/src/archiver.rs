//! Launching the external archiver process.
//!
//! The archive is produced by the system `zip` tool writing to its standard
//! output; no archive file ever touches the disk. The child's working
//! directory is the storage directory itself, so entry paths inside the
//! produced archive are relative to the archive key only.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};

use crate::error::{ArchiveError, Result};
use crate::request::ArchiveRequest;

/// Configuration for the external archiver invocation.
#[derive(Debug, Clone)]
pub struct ArchiverSettings {
    /// Program to execute. The default relies on `zip` being on `PATH`.
    pub program: String,

    /// Compression level passed to the archiver (0-9).
    pub compression_level: u8,

    /// Label attached to spawned transfers in log lines. Unused by the
    /// command line itself; kept for future archive naming schemes.
    pub label: String,
}

impl Default for ArchiverSettings {
    fn default() -> Self {
        Self {
            program: "zip".to_string(),
            compression_level: 9,
            label: "test".to_string(),
        }
    }
}

/// Build the archiver argument list for `path`.
///
/// The produced command recursively archives `path` into standard output at
/// the given compression level.
pub fn zip_args(path: &str, compression_level: u8) -> Vec<String> {
    vec![
        "-r".to_string(),
        format!("-{}", compression_level),
        "-".to_string(),
        path.to_string(),
    ]
}

/// A running archiver child process.
///
/// Owned exclusively by a single transfer; never shared across requests. The
/// child is spawned with `kill_on_drop`, so even an abandoned handle cannot
/// leave an orphaned archiver behind.
#[derive(Debug)]
pub struct ArchiveProcess {
    child: Child,
    stdout: Option<ChildStdout>,
}

impl ArchiveProcess {
    /// Spawn the archiver for `request`.
    ///
    /// Standard output is captured as the archive byte stream. Standard error
    /// is drained line by line in a background task so the child can never
    /// block on a full diagnostics pipe.
    pub fn spawn(request: &ArchiveRequest, settings: &ArchiverSettings) -> Result<Self> {
        let mut child = Command::new(&settings.program)
            .args(zip_args(request.key(), settings.compression_level))
            .current_dir(request.storage_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| ArchiveError::spawn_error(&settings.program, err.to_string()))?;

        log::info!(
            "Archiver spawned for archive {} (pid {:?}, label {})",
            request.key(),
            child.id(),
            settings.label
        );

        if let Some(stderr) = child.stderr.take() {
            let key = request.key().to_string();
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    log::debug!("archiver[{}]: {}", key, line);
                }
            });
        }

        let stdout = child.stdout.take();
        Ok(Self { child, stdout })
    }

    /// Take the archive byte stream. Returns `None` after the first call.
    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    /// OS process id, while the child is running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Force-kill the child.
    ///
    /// Idempotent: killing an already-exited or already-killed child is
    /// ignored, never an error.
    pub fn kill(&mut self) {
        if let Err(err) = self.child.start_kill() {
            log::debug!("Archiver kill skipped: {}", err);
        }
    }

    /// Wait for the child to exit and collect its status.
    ///
    /// A non-success status is an anomaly worth observing, not a transfer
    /// failure: whatever bytes the archiver produced were already relayed.
    pub async fn reap(&mut self) -> Option<std::process::ExitStatus> {
        match self.child.wait().await {
            Ok(status) => {
                if !status.success() {
                    log::warn!("Archiver exited with {}", status);
                }
                Some(status)
            }
            Err(err) => {
                log::warn!("Failed to reap archiver: {}", err);
                None
            }
        }
    }
}
