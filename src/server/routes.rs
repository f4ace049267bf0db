//! Router configuration for the image splitter.
//!
//! This module defines the HTTP routes and applies middleware for upload
//! limits, CORS and tracing.
//!
//! # Route Structure
//!
//! ```text
//! /health            - Health check
//! /grids             - Grid presets
//! /split    (POST)   - Split an image into a ZIP of tiles
//! /preview  (POST)   - Grid overlay preview (PNG)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use image_splitter::server::routes::{create_router, RouterConfig};
//! use image_splitter::tile::SplitService;
//!
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(SplitService::new(), config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Router,
};
use http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use http::{HeaderName, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{grids_handler, health_handler, preview_handler, split_handler, AppState};
use crate::tile::SplitService;

/// Default maximum upload size: 32MB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Largest accepted request body in bytes
    pub max_upload_bytes: usize,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with defaults.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Uploads are limited to 32MB
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Set the upload size limit in bytes.
    pub fn with_max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// # Arguments
///
/// * `split_service` - The service performing splits and previews
/// * `config` - Router configuration
pub fn create_router(split_service: SplitService, config: RouterConfig) -> Router {
    let app_state = AppState::new(split_service);
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/grids", get(grids_handler))
        .route("/split", post(split_handler))
        .route("/preview", post(preview_handler))
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .expose_headers([CONTENT_DISPOSITION, HeaderName::from_static("x-tile-count")])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
