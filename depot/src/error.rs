//! HTTP error types and conversions for the download endpoints.
//!
//! The HTTP layer sits at the boundary between the network and the core
//! library. Errors raised before the response headers are sent can still
//! become proper HTTP status codes and are converted here:
//!
//! - **Missing archives** (`ArchiveError::NotFound`): HTTP 404 Not Found.
//!   The body carries the human-readable message so the client knows which
//!   key failed to resolve.
//! - **Everything else** (archiver could not be launched, stdout missing):
//!   HTTP 500 Internal Server Error with a deliberately vague body; details
//!   are logged server-side.
//!
//! Errors after streaming has begun never pass through this module: once
//! headers are out the status code is fixed, and the only remaining signal is
//! aborting the connection, which the relay does by erroring the body stream.

use zipline::error::ArchiveError;

/// HTTP error response variants for the download service.
#[derive(Debug)]
pub enum DownloadError {
    /// The archive key does not resolve to an existing directory (HTTP 404).
    NotFound(String),
    /// The archiver process could not be started or wired up (HTTP 500).
    InternalError,
}

impl std::fmt::Display for DownloadError {
    /// Produce the plain-text HTTP response body.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "{}", msg),
            Self::InternalError => write!(f, "Internal server error."),
        }
    }
}

impl actix_web::error::ResponseError for DownloadError {
    /// Map the error variant to an HTTP status code.
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            Self::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            Self::InternalError => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build a plain-text HTTP response containing the error message.
    fn error_response(&self) -> actix_web::HttpResponse<actix_web::body::BoxBody> {
        actix_web::HttpResponse::build(self.status_code())
            .content_type(actix_web::http::header::ContentType::plaintext())
            .body(self.to_string())
    }
}

impl From<ArchiveError> for DownloadError {
    /// Convert a core archive error into an HTTP-friendly variant.
    ///
    /// Only errors raised before headers are sent reach this conversion;
    /// mid-stream conditions (`Interrupted`, stream errors) are handled by
    /// aborting the connection instead and map to 500 here.
    fn from(value: ArchiveError) -> Self {
        match value {
            ArchiveError::NotFound(_) => {
                log::warn!("{}", value);
                Self::NotFound(value.to_string())
            }
            _ => {
                log::error!("Archive request failed: {}", value);
                Self::InternalError
            }
        }
    }
}
