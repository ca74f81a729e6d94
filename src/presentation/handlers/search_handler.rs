// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    application::dto::search_query::SearchQueryDto,
    config::settings::Settings,
    domain::services::search_service::{SearchService, SearchServiceError},
    engines::traits::UpstreamEngine,
};

/// 处理搜索请求
///
/// # 参数
///
/// * `engine` - 上游抓取引擎实例
/// * `settings` - 应用配置
/// * `params` - 查询参数（`q` 为搜索关键词）
///
/// # 返回值
///
/// 返回实现了 `IntoResponse` 的响应，包含壁纸记录数组或错误信息
///
/// # 错误
///
/// 可能在以下情况下返回错误响应：
/// - 搜索关键词缺失或为空
/// - 上游站点抓取失败
pub async fn search(
    Extension(engine): Extension<Arc<dyn UpstreamEngine>>,
    Extension(settings): Extension<Arc<Settings>>,
    Query(params): Query<SearchQueryDto>,
) -> impl IntoResponse {
    let service = SearchService::new(engine, settings);
    match service.search(params).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

impl From<SearchServiceError> for (StatusCode, String) {
    fn from(err: SearchServiceError) -> Self {
        match err {
            SearchServiceError::ValidationError(details) => (StatusCode::BAD_REQUEST, details),
            SearchServiceError::Upstream(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}
