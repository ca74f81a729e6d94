// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota, RateLimiter};
use serde_json::json;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

/// 基于客户端IP的内存速率限制器
///
/// 服务不持有任何外部状态，限流桶保存在进程内
pub type IpRateLimiter = RateLimiter<IpAddr, DefaultKeyedStateStore<IpAddr>, DefaultClock>;

/// 创建速率限制器实例
///
/// # 参数
///
/// * `default_rpm` - 默认每分钟请求数限制
pub fn build_rate_limiter(default_rpm: u32) -> Arc<IpRateLimiter> {
    let rpm = NonZeroU32::new(default_rpm.max(1)).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::keyed(Quota::per_minute(rpm)))
}

/// 速率限制中间件
///
/// 按客户端IP限制API请求频率，超限时返回429
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<IpRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    // ConnectInfo is absent when the router is driven without a TCP
    // listener (in-process tests); those requests share one bucket
    let ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    if limiter.check_key(&ip).is_err() {
        warn!("Rate limit exceeded for {}", ip);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests" })),
        )
            .into_response();
    }

    next.run(request).await
}
