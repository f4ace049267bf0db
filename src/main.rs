//! Image Splitter - cut an image into a grid of tiles.
//!
//! This binary runs the HTTP server or splits a local file.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_splitter::{
    command::split_file,
    config::{Cli, Command, ServeConfig, SplitConfig},
    server::{create_router, RouterConfig},
    tile::{EncodeOptions, SplitService},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Split(config) => run_split(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Image Splitter v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Max upload: {}MB", config.max_upload_bytes / (1024 * 1024));
    info!("  JPEG quality: {}", config.jpeg_quality);
    match config.cors_origins {
        Some(ref origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    let service = SplitService::with_options(EncodeOptions::with_jpeg_quality(config.jpeg_quality));
    let router = create_router(service, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Split an image:");
    info!(
        "    curl --data-binary @photo.jpg -o photo_split.zip \"http://{}/split?grid=2x5&filename=photo.jpg\"",
        addr
    );
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Build RouterConfig from the serve options.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new()
        .with_max_upload_bytes(config.max_upload_bytes)
        .with_tracing(!config.no_tracing);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "image_splitter=debug,tower_http=debug"
    } else {
        "image_splitter=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// =============================================================================
// Split Command
// =============================================================================

fn run_split(config: SplitConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    match split_file(&config) {
        Ok(output) => {
            for entry in output.archive.entries() {
                info!("  {}", entry);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Split failed ({}): {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
