//! Top-level CLI wiring for the `gauge` binary.
//!
//! Defines the `Cli` struct parsed by `clap`, an `Operations` enum for the
//! supported subcommands and a small dispatch mechanism that calls into the
//! concrete command implementations.

use clap::{Parser, Subcommand};

use crate::CommandHandler;

/// Top-level CLI structure parsed from program arguments.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// The operation/subcommand to execute.
    #[command(subcommand)]
    pub operation_type: Operations,
}

impl Cli {
    /// Dispatch and execute the selected subcommand.
    pub fn handle(self) -> crate::error::Result<()> {
        self.operation_type.handle()
    }
}

/// Supported top-level operations/subcommands.
#[derive(Debug, Subcommand)]
pub enum Operations {
    /// Run the archiver locally and measure its chunked output.
    #[command(name = "probe")]
    Probe(super::probe::ProbeSubCommand),
}

impl CommandHandler for Operations {
    fn handle(self) -> crate::error::Result<()> {
        match self {
            Operations::Probe(probe_sub_cmd) => probe_sub_cmd.handle()?,
        };

        Ok(())
    }
}
