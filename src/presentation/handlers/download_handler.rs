// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    application::dto::download_query::DownloadQueryDto,
    config::settings::Settings,
    domain::services::download_service::{DownloadService, DownloadServiceError},
    engines::traits::UpstreamEngine,
};

/// 处理代理下载请求
///
/// # 参数
///
/// * `engine` - 上游抓取引擎实例
/// * `settings` - 应用配置
/// * `params` - 查询参数（`url` 为待下载的图片地址）
///
/// # 返回值
///
/// 成功时返回原始字节，附带派生的 `Content-Type` 与
/// `Content-Disposition: attachment` 响应头；失败时返回JSON错误信息
///
/// # 错误
///
/// 可能在以下情况下返回错误响应：
/// - `url` 缺失或不是合法的绝对URL
/// - `url` 的主机不在受信任域名上
/// - 上游站点抓取失败
pub async fn download(
    Extension(engine): Extension<Arc<dyn UpstreamEngine>>,
    Extension(settings): Extension<Arc<Settings>>,
    Query(params): Query<DownloadQueryDto>,
) -> impl IntoResponse {
    let service = DownloadService::new(engine, settings);
    match service.download(params).await {
        Ok(payload) => {
            let disposition = format!("attachment; filename=\"{}\"", payload.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, payload.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                payload.bytes,
            )
                .into_response()
        }
        Err(e) => {
            let (status, msg): (StatusCode, String) = e.into();
            (status, Json(json!({ "error": msg }))).into_response()
        }
    }
}

impl From<DownloadServiceError> for (StatusCode, String) {
    fn from(err: DownloadServiceError) -> Self {
        match err {
            DownloadServiceError::ValidationError(details) => (StatusCode::BAD_REQUEST, details),
            DownloadServiceError::InvalidUrl(url) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid download url: {}", url),
            ),
            DownloadServiceError::ForbiddenHost(host) => {
                (StatusCode::FORBIDDEN, format!("Host not allowed: {}", host))
            }
            DownloadServiceError::Upstream(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}
