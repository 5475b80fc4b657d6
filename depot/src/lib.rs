//! Server library for the `depot` binary.
//!
//! `depot` is the HTTP face of the zipline workspace: it registers the routes,
//! converts archive errors into HTTP responses and hands validated requests to
//! the core library's relay. The `http` module contains the request handlers,
//! the `error` module the HTTP-facing error type.

pub mod error;
pub mod http;

use std::path::PathBuf;

use zipline::archiver::ArchiverSettings;
use zipline::relay::RelaySettings;

/// Runtime configuration shared with every request handler.
///
/// Built once in `main` from the CLI flags and injected through
/// `actix_web::web::Data`; handlers never reach for ambient globals.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory whose child directories are downloadable as archives.
    pub storage_dir: PathBuf,

    /// External archiver invocation settings.
    pub archiver: ArchiverSettings,

    /// Chunk size and pacing for the relay loop.
    pub relay: RelaySettings,
}
