//! CLI command definitions and dispatch for gauge.
//!
//! This module groups the command-line argument parsing and the probe
//! subcommand used by the `gauge` binary. The `base` module holds the
//! top-level clap wiring; `probe` implements the archiver measurement flow.
pub mod base;
pub mod probe;
