//! HTTP server layer for the image splitter.
//!
//! This module exposes the split pipeline over HTTP. The upload form or any
//! other client posts raw image bytes and receives the ZIP archive back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │        POST /split?grid=2x5&filename=photo.jpg                  │
//! │                                                                 │
//! │  ┌──────────────────────────┐  ┌─────────────────────────────┐  │
//! │  │        handlers          │  │           routes            │  │
//! │  │ (split, preview, grids)  │  │ (limits, CORS, tracing)     │  │
//! │  └──────────────────────────┘  └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    content_disposition, grids_handler, health_handler, preview_handler, split_handler, AppState,
    ErrorResponse, GridPresetResponse, GridsResponse, HandlerError, HealthResponse,
    SplitQueryParams,
};
pub use routes::{create_router, RouterConfig, DEFAULT_MAX_UPLOAD_BYTES};
