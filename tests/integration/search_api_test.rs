// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{client, spawn_app, FakeUpstream};
use axum::http::StatusCode;
use serde_json::Value;

const SEARCH_PAGE: &str = r#"
<html><body>
    <a href="/wallpaper/nature-forest-4k"><img class="lazy" data-src="/files/full/forest.jpg"></a>
    <img class="lazy" data-src="/static/header-icon.png">
    <img class="lazy" data-src="/files/full/lake.jpg">
</body></html>
"#;

#[tokio::test]
async fn test_search_extracts_records_from_upstream_page() {
    let upstream = FakeUpstream::start_html(SEARCH_PAGE).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/search", app))
        .query(&[("q", "nature")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let records: Value = response.json().await.unwrap();
    let records = records.as_array().expect("response must be a JSON array");

    // The icon asset is excluded; document order is preserved
    assert_eq!(records.len(), 2);
    assert!(records[0]["previewUrl"]
        .as_str()
        .unwrap()
        .ends_with("/files/full/forest.jpg"));
    assert!(records[1]["previewUrl"]
        .as_str()
        .unwrap()
        .ends_with("/files/full/lake.jpg"));

    for record in records {
        assert_eq!(record["title"], "nature");
        assert!(record["previewUrl"].as_str().unwrap().contains("127.0.0.1"));
    }

    // The wrapped thumbnail points its download at the detail page asset
    assert!(records[0]["downloadUrl"]
        .as_str()
        .unwrap()
        .ends_with("/wallpaper/nature-forest-4k"));
    assert_eq!(records[1]["downloadUrl"], records[1]["previewUrl"]);

    assert_eq!(upstream.hits(), 1);
}

#[tokio::test]
async fn test_search_without_query_returns_400_and_no_fetch() {
    let upstream = FakeUpstream::start_html(SEARCH_PAGE).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/search", app))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_search_with_whitespace_query_returns_400_and_no_fetch() {
    let upstream = FakeUpstream::start_html(SEARCH_PAGE).await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/search", app))
        .query(&[("q", "   ")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upstream.hits(), 0);
}

#[tokio::test]
async fn test_search_maps_upstream_failure_to_500() {
    let upstream = FakeUpstream::start(503, None, b"").await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/search", app))
        .query(&[("q", "nature")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_with_no_matching_markup_returns_empty_array() {
    let upstream =
        FakeUpstream::start_html("<html><body><p>nothing to see</p></body></html>").await;
    let app = spawn_app(&upstream.address).await;

    let response = client()
        .get(format!("{}/api/search", app))
        .query(&[("q", "nature")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let records: Value = response.json().await.unwrap();
    assert_eq!(records.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_repeated_search_is_byte_identical() {
    let upstream = FakeUpstream::start_html(SEARCH_PAGE).await;
    let app = spawn_app(&upstream.address).await;

    let first = client()
        .get(format!("{}/api/search", app))
        .query(&[("q", "nature")])
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = first.bytes().await.unwrap();

    let second = client()
        .get(format!("{}/api/search", app))
        .query(&[("q", "nature")])
        .send()
        .await
        .unwrap();
    let second = second.bytes().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(upstream.hits(), 2);
}
