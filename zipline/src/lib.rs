//! Core library for the `zipline` project.
//!
//! This crate provides the pieces shared by the `depot` server and the `gauge`
//! probe binary:
//! - The `request` module validates archive keys and resolves them against the
//!   storage directory before anything else happens.
//! - The `archiver` module builds the external `zip` command line and launches
//!   it as a child process with its output captured.
//! - The `relay` module pumps bounded chunks from the archiver's output into a
//!   response channel, pacing itself between chunks.
//! - The `guard` module owns the child process for the duration of a transfer
//!   and guarantees it is killed and reaped on every exit path.
//! - The `error` module defines the error types used across the library.
//!
//! Design notes:
//! - The archiver's output is modeled as a byte-stream source, never read to
//!   completion: the relay holds at most one chunk in memory, and a bounded
//!   channel toward the HTTP layer keeps the memory ceiling at two chunks per
//!   transfer regardless of archive size.
//! - A slow consumer slows the relay, which fills the child's stdout pipe and
//!   stalls the archiver. That backpressure chain is the intended throttling
//!   mechanism, along with the explicit pacing delay between chunks.
//! - Cancellation is observed at every suspension point through the response
//!   channel: once the receiving side is gone, the in-flight read and the
//!   pacing sleep both unblock within one loop iteration.
pub mod archiver;
pub mod error;
pub mod guard;
pub mod relay;
pub mod request;

/// Largest number of bytes moved from the archiver to the response in one
/// relay iteration.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Default pause between relayed chunks, in seconds.
pub const DEFAULT_DELAY_SECS: u64 = 1;
