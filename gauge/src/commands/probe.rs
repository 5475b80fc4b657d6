//! Probe subcommand: run the archiver locally and measure its chunked output.
//!
//! The probe resolves an archive key exactly like the server does, launches
//! the archiver, then drains its standard output chunk by chunk, printing the
//! size of every chunk and a final total. An optional delay between reads
//! reproduces the server's pacing, which makes the backpressure on the
//! archiver observable from the process list.

use std::path::PathBuf;

use clap::Args;
use tokio::io::AsyncReadExt;

use crate::CommandHandler;

/// Archiver probe subcommand arguments.
#[derive(Debug, Clone, Args)]
#[command(name = "probe")]
pub struct ProbeSubCommand {
    /// Directory containing the archivable folders
    #[arg(long = "storage-dir", default_value = "storage")]
    storage_dir: PathBuf,

    /// Folder to archive
    #[arg(short = 'k', long = "key", required = true)]
    key: String,

    /// Delay between chunk reads (in milliseconds)
    #[arg(long = "delay", required = false, default_value_t = 0)]
    delay: u64,

    /// Chunk size in bytes
    #[arg(long = "chunk-size", required = false, default_value_t = zipline::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
}

impl CommandHandler for ProbeSubCommand {
    /// Execute the probe flow.
    ///
    /// 1. Resolve the key under the storage directory.
    /// 2. Spawn the archiver with its stdout captured.
    /// 3. Read chunks of at most `chunk_size` bytes, printing each size,
    ///    sleeping `delay` milliseconds between reads.
    /// 4. Tear the process down through the transfer guard and print totals.
    ///
    /// A temporary Tokio runtime is created for the lifetime of the
    /// operation; the binary itself stays synchronous.
    fn handle(self) -> crate::error::Result<()> {
        println!("[*] Probing archive {}", self.key);

        let tokio_runtime = tokio::runtime::Runtime::new()?;
        tokio_runtime.block_on(async {
            let request =
                zipline::request::ArchiveRequest::resolve(&self.storage_dir, &self.key).await?;
            let process = zipline::archiver::ArchiveProcess::spawn(
                &request,
                &zipline::archiver::ArchiverSettings::default(),
            )?;

            let mut guard = zipline::guard::TransferGuard::new(process);
            let mut stdout = guard.stdout()?;
            let mut buffer = vec![0u8; self.chunk_size];
            let mut chunks: u64 = 0;
            let mut total_bytes: u64 = 0;

            loop {
                let read = stdout.read(&mut buffer).await?;
                if read == 0 {
                    break;
                }

                chunks += 1;
                total_bytes += read as u64;
                println!("[*] Chunk {}: {} bytes", chunks, read);

                if self.delay > 0 {
                    tokio::time::sleep(std::time::Duration::from_millis(self.delay)).await;
                }
            }

            let status = guard.finish().await;
            println!(
                "[*] Archive {}: {} chunks, {} bytes (archiver exit: {:?})",
                self.key, chunks, total_bytes, status
            );

            Ok(())
        })
    }
}
