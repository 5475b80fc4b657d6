// TODO! Add TLS support
// TODO! Add a config-file alternative to the CLI flags

use actix_web::{web, App, HttpServer};
use clap::Parser;
use tracing_subscriber::prelude::*;

#[derive(clap::Parser)]
#[command(version)]
pub struct Cli {
    #[arg(long = "http-server", default_value = "127.0.0.1:8080")]
    pub http_server: std::net::SocketAddr,

    /// Directory whose child directories are downloadable as archives
    #[arg(long = "storage-dir", default_value = "storage")]
    pub storage_dir: std::path::PathBuf,

    /// Pause between relayed chunks (in seconds)
    #[arg(long = "delay", default_value_t = zipline::DEFAULT_DELAY_SECS)]
    pub delay: u64,

    /// Largest chunk relayed per iteration (in bytes)
    #[arg(long = "chunk-size", default_value_t = zipline::DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Only log warnings and errors
    #[arg(long = "quiet", default_value_t = false)]
    pub quiet: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli_args = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", if cli_args.quiet { "warn" } else { "info" });
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let config = depot::ServiceConfig {
        storage_dir: cli_args.storage_dir,
        archiver: zipline::archiver::ArchiverSettings::default(),
        relay: zipline::relay::RelaySettings {
            chunk_size: cli_args.chunk_size,
            delay: std::time::Duration::from_secs(cli_args.delay),
        },
    };

    log::info!("Launching depot application on {}", cli_args.http_server);

    HttpServer::new(move || {
        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(web::Data::new(config.clone()))
            .route("/", web::get().to(depot::http::index_handler))
            .route(
                "/archive/{archive_key}/",
                web::get().to(depot::http::archive_handler),
            )
    })
    .workers(1)
    .bind(&cli_args.http_server)?
    .run()
    .await
}
