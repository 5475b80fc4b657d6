//! Chunk relay between the archiver's output stream and the HTTP response.
//!
//! The relay reads one bounded chunk at a time, forwards it through a bounded
//! channel toward the response body, then waits out the pacing delay before
//! the next read. Draining the archiver slowly backs up its stdout pipe and
//! throttles the archiver itself. Both suspension points watch the receiving
//! side, so a client disconnect unblocks the loop within one iteration.

use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc::Sender;

use crate::archiver::ArchiveProcess;
use crate::error::{ArchiveError, Result};
use crate::guard::TransferGuard;

/// Tuning knobs for the relay loop.
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Largest chunk moved per iteration.
    pub chunk_size: usize,

    /// Pause after each chunk before the next read.
    pub delay: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            chunk_size: crate::DEFAULT_CHUNK_SIZE,
            delay: Duration::from_secs(crate::DEFAULT_DELAY_SECS),
        }
    }
}

/// One chunk travelling to the HTTP response. An `Err` item aborts the
/// connection, the only signal available once headers are out.
pub type ChunkResult = std::result::Result<Bytes, ArchiveError>;

/// Totals for a completed transfer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    pub chunks: u64,
    pub bytes: u64,
}

/// Pump chunks from `source` into `tx` until end-of-stream.
///
/// Each iteration reads at most `chunk_size` bytes and forwards them as one
/// chunk; a zero-length read ends the loop without forwarding anything. The
/// channel is expected to be bounded, so a full channel exerts backpressure
/// on the read side. Returns [`ArchiveError::Interrupted`] as soon as the
/// receiving side is gone, whether that happens during a read, a send, or the
/// pacing sleep.
pub async fn pump_chunks<R>(
    source: &mut R,
    tx: &Sender<ChunkResult>,
    settings: &RelaySettings,
) -> Result<TransferSummary>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = vec![0u8; settings.chunk_size];
    let mut summary = TransferSummary::default();

    loop {
        let read = tokio::select! {
            read = source.read(&mut buffer) => read,
            _ = tx.closed() => return Err(ArchiveError::Interrupted),
        };

        let read = match read {
            Ok(count) => count,
            Err(err) => {
                // Abort the response abruptly; the status line is long gone.
                let _ = tx
                    .send(Err(ArchiveError::child_stream(err.to_string())))
                    .await;
                return Err(ArchiveError::from(err));
            }
        };

        if read == 0 {
            // End-of-stream. The empty chunk is never forwarded.
            break;
        }

        let chunk = Bytes::copy_from_slice(&buffer[..read]);
        if tx.send(Ok(chunk)).await.is_err() {
            return Err(ArchiveError::Interrupted);
        }

        summary.chunks += 1;
        summary.bytes += read as u64;
        log::debug!("Relayed chunk {} ({} bytes)", summary.chunks, read);

        tokio::select! {
            _ = tokio::time::sleep(settings.delay) => {}
            _ = tx.closed() => return Err(ArchiveError::Interrupted),
        }
    }

    Ok(summary)
}

/// Drive a full transfer: relay every chunk, then tear the process down.
///
/// The archiver is killed and reaped on every exit path (completion,
/// interruption, stream error) before the sender is dropped and the response
/// closes. Callers get the completed summary or the distinct
/// [`ArchiveError::Interrupted`] condition for auditing.
pub async fn run_transfer(
    process: ArchiveProcess,
    tx: Sender<ChunkResult>,
    settings: RelaySettings,
) -> Result<TransferSummary> {
    let mut guard = TransferGuard::new(process);

    let result = match guard.stdout() {
        Ok(mut stdout) => pump_chunks(&mut stdout, &tx, &settings).await,
        Err(err) => Err(err),
    };

    guard.finish().await;
    drop(tx);

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn fast_settings(chunk_size: usize) -> RelaySettings {
        RelaySettings {
            chunk_size,
            delay: Duration::from_millis(1),
        }
    }

    /// Collect every successful chunk from the receiving side.
    fn spawn_collector(
        mut rx: mpsc::Receiver<ChunkResult>,
    ) -> tokio::task::JoinHandle<Vec<Bytes>> {
        tokio::spawn(async move {
            let mut chunks = Vec::new();
            while let Some(Ok(chunk)) = rx.recv().await {
                chunks.push(chunk);
            }
            chunks
        })
    }

    #[tokio::test]
    async fn test_relays_chunks_in_order() {
        let data: Vec<u8> = (0..2560u32).map(|i| (i % 251) as u8).collect();
        let mut source = data.as_slice();
        let (tx, rx) = mpsc::channel(1);
        let collector = spawn_collector(rx);

        let summary = pump_chunks(&mut source, &tx, &fast_settings(1024))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(summary.chunks, 3);
        assert_eq!(summary.bytes, 2560);

        let chunks = collector.await.unwrap();
        assert_eq!(
            chunks.iter().map(|c| c.len()).collect::<Vec<_>>(),
            vec![1024, 1024, 512]
        );
        let relayed: Vec<u8> = chunks.iter().flat_map(|c| c.to_vec()).collect();
        assert_eq!(relayed, data);
    }

    #[tokio::test]
    async fn test_chunk_size_bound() {
        let data = vec![7u8; 35];
        let mut source = data.as_slice();
        let (tx, rx) = mpsc::channel(1);
        let collector = spawn_collector(rx);

        let summary = pump_chunks(&mut source, &tx, &fast_settings(10))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(summary.chunks, 4);
        let chunks = collector.await.unwrap();
        assert!(chunks.iter().all(|chunk| chunk.len() <= 10));
        assert_eq!(chunks.last().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_empty_source_relays_nothing() {
        let mut source: &[u8] = &[];
        let (tx, rx) = mpsc::channel(1);
        let collector = spawn_collector(rx);

        let summary = pump_chunks(&mut source, &tx, &fast_settings(1024))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(summary, TransferSummary::default());
        assert!(collector.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_while_waiting_for_chunk() {
        // A duplex stream that never produces more data keeps the relay
        // suspended in its read; dropping the receiver must unblock it.
        let (_writer, mut reader) = tokio::io::duplex(64);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let result = timeout(
            Duration::from_secs(1),
            pump_chunks(&mut reader, &tx, &fast_settings(1024)),
        )
        .await
        .expect("relay did not notice the dropped receiver");
        assert!(matches!(result, Err(ArchiveError::Interrupted)));
    }

    #[tokio::test]
    async fn test_interrupted_during_pacing_delay() {
        let data = vec![1u8; 16];
        let mut source = data.as_slice();
        let (tx, mut rx) = mpsc::channel(1);
        let settings = RelaySettings {
            chunk_size: 16,
            delay: Duration::from_secs(30),
        };

        let consumer = tokio::spawn(async move {
            let first = rx.recv().await;
            assert!(matches!(first, Some(Ok(_))));
            // Dropping the receiver mid-delay simulates the disconnect.
        });

        let result = timeout(
            Duration::from_secs(2),
            pump_chunks(&mut source, &tx, &settings),
        )
        .await
        .expect("relay slept through the disconnect");
        assert!(matches!(result, Err(ArchiveError::Interrupted)));
        consumer.await.unwrap();
    }

    #[tokio::test]
    async fn test_read_error_aborts_response() {
        struct FailingReader;

        impl AsyncRead for FailingReader {
            fn poll_read(
                self: std::pin::Pin<&mut Self>,
                _cx: &mut std::task::Context<'_>,
                _buf: &mut tokio::io::ReadBuf<'_>,
            ) -> std::task::Poll<std::io::Result<()>> {
                std::task::Poll::Ready(Err(std::io::Error::other("pipe burst")))
            }
        }

        let mut source = FailingReader;
        let (tx, mut rx) = mpsc::channel(1);

        let result = pump_chunks(&mut source, &tx, &fast_settings(1024)).await;
        assert!(matches!(result, Err(ArchiveError::ChildStreamError(_))));
        assert!(matches!(rx.recv().await, Some(Err(_))));
    }
}
