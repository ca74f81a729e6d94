// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{client, spawn_app, FakeUpstream};
use axum::http::StatusCode;
use serde_json::Value;

const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0 not a real jpeg";

#[tokio::test]
async fn test_download_relays_binary_with_attachment_headers() {
    let upstream = FakeUpstream::start(200, Some("image/jpeg"), JPEG_BYTES).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/download", app))
        .query(&[("url", format!("{}/files/full/pic.jpg", upstream.address))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"pic.jpg\""
    );
    assert_eq!(response.bytes().await.unwrap().as_ref(), JPEG_BYTES);
    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn test_download_derives_jpg_filename_for_extensionless_path() {
    let upstream = FakeUpstream::start(200, None, JPEG_BYTES).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/download", app))
        .query(&[("url", format!("{}/gallery/42", upstream.address))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // No upstream content type: fall back to a generic binary type
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"42.jpg\""
    );
}

#[tokio::test]
async fn test_download_rejects_foreign_host_without_fetch() {
    let upstream = FakeUpstream::start(200, Some("image/jpeg"), JPEG_BYTES).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/download", app))
        .query(&[("url", "https://evil.example.com/wallpaper.jpg")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_download_rejects_malformed_url_without_fetch() {
    let upstream = FakeUpstream::start(200, Some("image/jpeg"), JPEG_BYTES).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/download", app))
        .query(&[("url", "not a url at all")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_download_without_url_returns_400() {
    let upstream = FakeUpstream::start(200, Some("image/jpeg"), JPEG_BYTES).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/download", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_download_maps_upstream_failure_to_500() {
    let upstream = FakeUpstream::start(404, None, b"").await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/download", app))
        .query(&[("url", format!("{}/files/full/missing.jpg", upstream.address))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
