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

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use wallrs::config::settings::Settings;
use wallrs::engines::reqwest_engine::ReqwestEngine;
use wallrs::engines::traits::UpstreamEngine;
use wallrs::presentation::routes;
use wallrs::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting wallrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Initialize upstream engine
    let engine: Arc<dyn UpstreamEngine> = Arc::new(ReqwestEngine::new(&settings.upstream));
    info!("Upstream engine initialized: {}", engine.name());

    // 4. Start HTTP server
    let app = routes::routes(engine, settings.clone());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    // ConnectInfo is required by the per-IP rate limit middleware
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
