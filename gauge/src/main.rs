//! Gauge binary entrypoint.
//!
//! Parses CLI arguments and dispatches to command handlers in the `gauge`
//! crate. The binary is intentionally a thin wrapper: argument parsing and
//! dispatch happen here, while the real work (resolving the key, launching
//! the archiver, draining chunks) is performed by the command implementations
//! found in `gauge::commands`.
//!
//! Examples
//!
//! Probe the `vacation` folder under the default storage directory:
//!
//! $ gauge probe -k vacation
//!
//! The command above will:
//! 1. Verify `storage/vacation` exists and is a directory.
//! 2. Launch `zip -r -9 - vacation` with `storage` as its working directory.
//! 3. Print the size of every chunk read from the archiver and a final
//!    summary with the chunk count, byte total and archiver exit status.
//!
//! Reproduce the server's pacing with 1 MiB chunks and a one second delay:
//!
//! $ gauge probe -k vacation --chunk-size 1048576 --delay 1000
//!
//! Notes
//! - Set `RUST_LOG=debug` to also see the archiver's stderr diagnostics,
//!   which are drained and logged by the core library.

use clap::Parser;

fn main() -> gauge::error::Result<()> {
    env_logger::init();

    // Parse command-line arguments and execute the selected operation.
    gauge::commands::base::Cli::parse().handle()
}
