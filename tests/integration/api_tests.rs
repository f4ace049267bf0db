//! API integration tests for the HTTP layer.
//!
//! Tests verify:
//! - Split responses (archive body, headers)
//! - Preview and preset endpoints
//! - Error cases (bad grid, empty body, non-image upload, oversize upload)

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use image_splitter::tile::SplitService;
use image_splitter::{create_router, RouterConfig};

use super::test_utils::{decode, is_valid_png, jpeg_bytes, png_bytes, read_zip};

fn router() -> Router {
    create_router(SplitService::new(), RouterConfig::new().with_tracing(false))
}

fn post(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/octet-stream")
        .body(Body::from(body))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn error_type(response: axum::response::Response) -> String {
    let body = body_bytes(response).await;
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    error["error"].as_str().unwrap_or_default().to_string()
}

// =============================================================================
// Split Endpoint
// =============================================================================

#[tokio::test]
async fn test_split_success() {
    let request = post("/split?grid=2x5&filename=photo.jpg", jpeg_bytes(1000, 600));
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/zip"
    );
    assert_eq!(response.headers().get("x-tile-count").unwrap(), "10");

    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filename=\"photo_split.zip\""));

    let entries = read_zip(&body_bytes(response).await);
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0].0, "photo_part_1.jpg");
    assert_eq!(entries[9].0, "photo_part_10.jpg");
}

#[tokio::test]
async fn test_split_default_grid() {
    let response = router()
        .oneshot(post("/split?filename=a.png", png_bytes(50, 20)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-tile-count").unwrap(), "10");
}

#[tokio::test]
async fn test_split_rows_and_cols() {
    let response = router()
        .oneshot(post("/split?rows=3&cols=4&filename=a.png", png_bytes(40, 30)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let entries = read_zip(&body_bytes(response).await);
    assert_eq!(entries.len(), 12);
    assert_eq!(decode(&entries[0].1).width(), 10);
}

#[tokio::test]
async fn test_split_without_filename_uses_format() {
    let response = router()
        .oneshot(post("/split?grid=3x3", png_bytes(30, 30)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let entries = read_zip(&body_bytes(response).await);
    assert_eq!(entries[0].0, "image_part_1.png");
}

// =============================================================================
// Split Errors
// =============================================================================

#[tokio::test]
async fn test_split_zero_rows_rejected() {
    let response = router()
        .oneshot(post("/split?rows=0&cols=3", png_bytes(10, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_type(response).await, "invalid_grid");
}

#[tokio::test]
async fn test_split_malformed_grid_rejected() {
    let response = router()
        .oneshot(post("/split?grid=banana", png_bytes(10, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_type(response).await, "invalid_grid");
}

#[tokio::test]
async fn test_split_non_numeric_rows_rejected_as_json() {
    let response = router()
        .oneshot(post("/split?rows=abc&cols=3", png_bytes(10, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(error_type(response).await, "invalid_grid");
}

#[tokio::test]
async fn test_preview_negative_cols_rejected_as_json() {
    let response = router()
        .oneshot(post("/preview?rows=2&cols=-1", png_bytes(10, 10)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_type(response).await, "invalid_grid");
}

#[tokio::test]
async fn test_split_grid_checked_before_body() {
    // Empty body and invalid grid: the grid error wins
    let response = router()
        .oneshot(post("/split?rows=2&cols=0", Vec::new()))
        .await
        .unwrap();

    assert_eq!(error_type(response).await, "invalid_grid");
}

#[tokio::test]
async fn test_split_empty_body() {
    let response = router()
        .oneshot(post("/split?grid=2x5", Vec::new()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_type(response).await, "empty_body");
}

#[tokio::test]
async fn test_split_non_image() {
    let response = router()
        .oneshot(post("/split?filename=notes.txt", b"hello world".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(error_type(response).await, "decode_error");
}

#[tokio::test]
async fn test_split_upload_limit() {
    let router = create_router(
        SplitService::new(),
        RouterConfig::new()
            .with_tracing(false)
            .with_max_upload_bytes(1024),
    );

    let response = router
        .oneshot(post("/split", vec![0u8; 4096]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_split_requires_post() {
    let request = Request::builder()
        .uri("/split")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Preview & Presets
// =============================================================================

#[tokio::test]
async fn test_preview_returns_png() {
    let response = router()
        .oneshot(post("/preview?grid=3x3", jpeg_bytes(90, 90)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "image/png");

    let body = body_bytes(response).await;
    assert!(is_valid_png(&body));
    assert_eq!(decode(&body).width(), 90);
}

#[tokio::test]
async fn test_grids_endpoint() {
    let request = Request::builder()
        .uri("/grids")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    let grids = json["grids"].as_array().unwrap();
    assert_eq!(grids.len(), 2);
    assert_eq!(grids[0]["name"], "2x5");
    assert_eq!(grids[0]["default"], true);
    assert_eq!(grids[1]["rows"], 3);
    assert_eq!(grids[1]["cols"], 3);
}

#[tokio::test]
async fn test_health_endpoint() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}
