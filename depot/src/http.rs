//! HTTP handlers for the archive download service.

use std::pin::Pin;
use std::task::{Context, Poll};

use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use futures::Stream;
use tokio::sync::mpsc;
use zipline::archiver::ArchiveProcess;
use zipline::relay::{run_transfer, ChunkResult};
use zipline::request::ArchiveRequest;

use crate::error::DownloadError;
use crate::ServiceConfig;

/// Adapts the relay channel into the streaming response body.
///
/// Dropping the stream (actix does so when the client disconnects) closes
/// the receiver, which the relay observes as its cancellation signal.
pub struct ChunkStream {
    rx: mpsc::Receiver<ChunkResult>,
}

impl ChunkStream {
    pub fn new(rx: mpsc::Receiver<ChunkResult>) -> Self {
        Self { rx }
    }
}

impl Stream for ChunkStream {
    type Item = ChunkResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// GET endpoint handler that streams a zip archive of the requested folder.
///
/// Validates the archive key against the storage directory, spawns the
/// archiver with the storage directory as its working directory, and returns
/// a chunked attachment response backed by the relay. The relay itself runs
/// in a spawned task holding the process guard; its outcome (completion
/// summary, interruption, failure) is reported through log lines since the
/// response headers are long gone by the time it is known.
pub async fn archive_handler(
    path: web::Path<String>,
    config: web::Data<ServiceConfig>,
) -> actix_web::Result<HttpResponse, DownloadError> {
    let key = path.into_inner();
    let request = ArchiveRequest::resolve(&config.storage_dir, &key).await?;
    let process = ArchiveProcess::spawn(&request, &config.archiver)?;

    // Capacity 1: at most one chunk sits between the relay and the response.
    let (tx, rx) = mpsc::channel(1);
    let settings = config.relay.clone();
    let filename = request.attachment_name();

    tokio::spawn(async move {
        match run_transfer(process, tx, settings).await {
            Ok(summary) => log::info!(
                "Archive {} sent: {} bytes in {} chunks",
                request.key(),
                summary.bytes,
                summary.chunks
            ),
            Err(err) if err.is_interrupted() => {
                log::warn!("Download of archive {} was interrupted", request.key())
            }
            Err(err) => log::error!("Download of archive {} failed: {}", request.key(), err),
        }
    });

    Ok(HttpResponse::Ok()
        .content_type("application/zip")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .streaming(ChunkStream::new(rx)))
}

/// Serve the static index page from the working directory.
pub async fn index_handler() -> actix_web::Result<HttpResponse> {
    let contents = tokio::fs::read_to_string("index.html").await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(contents))
}
