// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::engines::traits::UpstreamEngine;
use crate::presentation::handlers::{download_handler, search_handler};
use crate::presentation::middleware::rate_limit_middleware::{
    build_rate_limiter, rate_limit_middleware,
};
use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `engine` - 上游抓取引擎实例
/// * `settings` - 应用配置
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(engine: Arc<dyn UpstreamEngine>, settings: Arc<Settings>) -> Router {
    let mut api_routes = Router::new()
        .route("/api/search", get(search_handler::search))
        .route("/api/download", get(download_handler::download))
        .layer(CorsLayer::permissive());

    if settings.rate_limiting.enabled {
        let limiter = build_rate_limiter(settings.rate_limiting.default_rpm);
        api_routes = api_routes.layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ));
    }

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version));

    Router::new()
        .merge(api_routes)
        .merge(public_routes)
        .layer(Extension(engine))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
