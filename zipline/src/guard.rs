//! Scoped teardown for a running transfer.
//!
//! Rather than repeating "kill the archiver, close the response" in every
//! error branch, one guard is entered per request and every exit path of the
//! relay goes through [`TransferGuard::finish`]. The response channel closes
//! after teardown because its sender outlives the guard and is dropped by the
//! caller once `finish` returns.

use tokio::process::ChildStdout;

use crate::archiver::ArchiveProcess;
use crate::error::{ArchiveError, Result};

/// Owns the archiver process for the duration of one transfer.
///
/// `finish` kills (idempotently) and reaps the child exactly once. If the
/// guard is dropped without finishing, because the relay task was aborted,
/// the child is still killed through the process handle's kill-on-drop
/// backstop, though without a reap.
pub struct TransferGuard {
    process: ArchiveProcess,
}

impl TransferGuard {
    pub fn new(process: ArchiveProcess) -> Self {
        Self { process }
    }

    /// Byte stream of the guarded archiver.
    pub fn stdout(&mut self) -> Result<ChildStdout> {
        self.process
            .take_stdout()
            .ok_or_else(|| ArchiveError::child_stream("archiver stdout already taken".to_string()))
    }

    /// Kill and reap the guarded process.
    ///
    /// Safe on every exit path: a child that already exited on its own is
    /// reaped without complaint.
    pub async fn finish(mut self) -> Option<std::process::ExitStatus> {
        self.process.kill();
        self.process.reap().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stdout_taken_once() {
        let storage = tempfile::tempdir().unwrap();
        std::fs::create_dir(storage.path().join("vacation")).unwrap();
        let request = crate::request::ArchiveRequest::resolve(storage.path(), "vacation")
            .await
            .unwrap();

        // `true` exits immediately and produces no output, which is all this
        // test needs from the child.
        let settings = crate::archiver::ArchiverSettings {
            program: "true".to_string(),
            ..Default::default()
        };
        let process = ArchiveProcess::spawn(&request, &settings).unwrap();

        let mut guard = TransferGuard::new(process);
        assert!(guard.stdout().is_ok());
        assert!(matches!(
            guard.stdout(),
            Err(ArchiveError::ChildStreamError(_))
        ));
        guard.finish().await;
    }
}
