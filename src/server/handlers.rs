//! HTTP request handlers for the image splitter API.
//!
//! # Endpoints
//!
//! - `POST /split` - Split an uploaded image into a ZIP of tiles
//! - `POST /preview` - Render the grid over the uploaded image
//! - `GET /grids` - List the grid presets
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::SplitError;
use crate::grid::{GridPreset, GridSpec};
use crate::tile::{SplitRequest, SplitService, ARCHIVE_CONTENT_TYPE};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the split service.
///
/// This is passed to all handlers via Axum's State extractor. It carries no
/// per-request data.
#[derive(Clone)]
pub struct AppState {
    /// The service that performs splits and previews
    pub split_service: Arc<SplitService>,
}

impl AppState {
    /// Create a new application state with the given split service.
    pub fn new(split_service: SplitService) -> Self {
        Self {
            split_service: Arc::new(split_service),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters shared by `/split` and `/preview`.
///
/// The grid is chosen by `grid` (e.g. `2x5`) or by `rows` and `cols`
/// together. With neither, the default preset is used.
#[derive(Debug, Default, Deserialize)]
pub struct SplitQueryParams {
    /// Grid shape as `ROWSxCOLS`
    #[serde(default)]
    pub grid: Option<String>,

    /// Row count, used together with `cols`
    #[serde(default)]
    pub rows: Option<u32>,

    /// Column count, used together with `rows`
    #[serde(default)]
    pub cols: Option<u32>,

    /// Original upload name, used to name tiles and the archive
    #[serde(default)]
    pub filename: Option<String>,
}

impl SplitQueryParams {
    /// Work out the requested grid shape.
    pub fn resolve_grid(&self) -> Result<GridSpec, HandlerError> {
        match (self.rows, self.cols, self.grid.as_deref()) {
            (Some(rows), Some(cols), _) => Ok(GridSpec::new(rows, cols)?),
            (Some(_), None, _) | (None, Some(_), _) => Err(HandlerError::bad_request(
                "invalid_grid",
                "rows and cols must be given together",
            )),
            (None, None, Some(grid)) => grid
                .parse()
                .map_err(|e: String| HandlerError::bad_request("invalid_grid", e)),
            (None, None, None) => Ok(GridPreset::default().spec()),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type identifier (e.g., "decode_error", "invalid_grid")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code (included for convenience)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: None,
        }
    }

    /// Create a new error response with status code.
    pub fn with_status(
        error: impl Into<String>,
        message: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status: Some(status.as_u16()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// One entry of the grid preset list.
#[derive(Debug, Serialize)]
pub struct GridPresetResponse {
    /// Identifier accepted by the `grid` query parameter
    pub name: &'static str,
    pub rows: u32,
    pub cols: u32,
    pub label: &'static str,

    /// Whether this preset applies when no grid is given
    pub default: bool,
}

/// Response from the grid presets endpoint.
#[derive(Debug, Serialize)]
pub struct GridsResponse {
    pub grids: Vec<GridPresetResponse>,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Log an error response at a level matching its status and build the body.
fn error_response(status: StatusCode, error_type: &str, message: String) -> Response {
    if status.is_server_error() {
        error!(
            error_type = error_type,
            status = status.as_u16(),
            "Server error: {}",
            message
        );
    } else if status.is_client_error() {
        warn!(
            error_type = error_type,
            status = status.as_u16(),
            "Client error: {}",
            message
        );
    }

    let error_response = ErrorResponse::with_status(error_type, message, status);
    (status, Json(error_response)).into_response()
}

/// Convert SplitError to HTTP response.
///
/// - `Decode` maps to 415: the upload is not an image we can read
/// - `InvalidGrid` maps to 400
/// - `Encode` and `Io` map to 500: the download could not be built
impl IntoResponse for SplitError {
    fn into_response(self) -> Response {
        let status = match &self {
            SplitError::Decode { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            SplitError::InvalidGrid { .. } => StatusCode::BAD_REQUEST,
            SplitError::Encode { .. } | SplitError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.kind(), self.to_string())
    }
}

/// Errors returned by handlers.
#[derive(Debug)]
pub enum HandlerError {
    /// The split pipeline failed
    Split(SplitError),

    /// A request parameter was malformed
    BadRequest {
        error: &'static str,
        message: String,
    },

    /// The worker task died
    Internal(String),
}

impl HandlerError {
    pub fn bad_request(error: &'static str, message: impl Into<String>) -> Self {
        HandlerError::BadRequest {
            error,
            message: message.into(),
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::Split(err) => err.into_response(),
            HandlerError::BadRequest { error, message } => {
                error_response(StatusCode::BAD_REQUEST, error, message)
            }
            HandlerError::Internal(message) => {
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        }
    }
}

impl From<SplitError> for HandlerError {
    fn from(err: SplitError) -> Self {
        HandlerError::Split(err)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Build a `Content-Disposition: attachment` header for `filename`.
///
/// The plain `filename` parameter is restricted to printable ASCII; the
/// exact name goes into the RFC 5987 `filename*` parameter.
pub fn content_disposition(filename: &str) -> HeaderValue {
    let ascii: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii,
        urlencoding::encode(filename)
    );

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Unwrap the query string, reporting malformed values (e.g. `rows=abc`)
/// as a JSON `invalid_grid` error.
fn query_params(
    query: Result<Query<SplitQueryParams>, QueryRejection>,
) -> Result<SplitQueryParams, HandlerError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| HandlerError::bad_request("invalid_grid", rejection.body_text()))
}

fn reject_empty(body: &Bytes) -> Result<(), HandlerError> {
    if body.is_empty() {
        return Err(HandlerError::bad_request(
            "empty_body",
            "Request body must contain the image data",
        ));
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle split requests.
///
/// # Endpoint
///
/// `POST /split`
///
/// # Query Parameters
///
/// - `grid`: Grid shape such as `2x5` (default: `2x5`)
/// - `rows`, `cols`: Explicit grid shape, instead of `grid`
/// - `filename`: Original file name, e.g. `photo.jpg`
///
/// # Body
///
/// Raw image bytes (PNG, JPEG, WebP, GIF, BMP or TIFF).
///
/// # Response
///
/// - `200 OK`: ZIP archive with `Content-Type: application/zip`
/// - `400 Bad Request`: Invalid grid or empty body
/// - `413 Payload Too Large`: Upload exceeds the configured limit
/// - `415 Unsupported Media Type`: Body is not a readable image
/// - `500 Internal Server Error`: A tile or the archive could not be written
///
/// # Headers
///
/// - `Content-Disposition: attachment; filename="{stem}_split.zip"`
/// - `X-Tile-Count`: number of tiles in the archive
pub async fn split_handler(
    State(state): State<AppState>,
    query: Result<Query<SplitQueryParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, HandlerError> {
    let query = query_params(query)?;

    // Grid errors are reported before any image work
    let grid = query.resolve_grid()?;
    reject_empty(&body)?;

    let request = SplitRequest {
        data: body,
        filename: query.filename,
        grid,
    };

    let service = Arc::clone(&state.split_service);
    let archive = tokio::task::spawn_blocking(move || service.split(&request))
        .await
        .map_err(|e| HandlerError::Internal(format!("split task failed: {}", e)))??;

    debug!(
        tiles = archive.tile_count(),
        filename = archive.filename(),
        "Sending archive"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(ARCHIVE_CONTENT_TYPE),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(archive.filename()),
    );
    headers.insert("x-tile-count", HeaderValue::from(archive.tile_count()));

    Ok((StatusCode::OK, headers, archive.into_data()).into_response())
}

/// Handle preview requests.
///
/// # Endpoint
///
/// `POST /preview`
///
/// Takes the same query parameters and body as `/split` and responds with a
/// PNG of the image with the grid lines drawn on it.
pub async fn preview_handler(
    State(state): State<AppState>,
    query: Result<Query<SplitQueryParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, HandlerError> {
    let grid = query_params(query)?.resolve_grid()?;
    reject_empty(&body)?;

    let service = Arc::clone(&state.split_service);
    let png = tokio::task::spawn_blocking(move || service.preview(&body, grid))
        .await
        .map_err(|e| HandlerError::Internal(format!("preview task failed: {}", e)))??;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/png"))],
        png,
    )
        .into_response())
}

/// Handle grid preset list requests.
///
/// # Endpoint
///
/// `GET /grids`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "grids": [
///     { "name": "2x5", "rows": 2, "cols": 5, "label": "...", "default": true },
///     { "name": "3x3", "rows": 3, "cols": 3, "label": "...", "default": false }
///   ]
/// }
/// ```
pub async fn grids_handler() -> Json<GridsResponse> {
    let grids = GridPreset::ALL
        .into_iter()
        .map(|preset| {
            let spec = preset.spec();
            GridPresetResponse {
                name: preset.name(),
                rows: spec.rows(),
                cols: spec.cols(),
                label: preset.label(),
                default: preset == GridPreset::default(),
            }
        })
        .collect();

    Json(GridsResponse { grids })
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
