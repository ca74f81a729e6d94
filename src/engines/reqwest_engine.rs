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

use crate::config::settings::UpstreamSettings;
use crate::engines::traits::{BinaryResponse, EngineError, UpstreamEngine};
use async_trait::async_trait;
use std::time::Duration;

/// Realistic desktop browser user agent; the upstream site serves a reduced
/// page to unknown clients.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 抓取引擎
///
/// 基于reqwest实现的上游抓取引擎，HTML与二进制抓取
/// 分别使用各自的有界超时，单次尝试，不做重试
pub struct ReqwestEngine {
    client: reqwest::Client,
    html_timeout: Duration,
    binary_timeout: Duration,
}

impl ReqwestEngine {
    pub fn new(settings: &UpstreamSettings) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            html_timeout: Duration::from_secs(settings.search_timeout_secs),
            binary_timeout: Duration::from_secs(settings.download_timeout_secs),
        }
    }

    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response, EngineError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else {
                    EngineError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::BadStatus(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl UpstreamEngine for ReqwestEngine {
    /// 抓取HTML文档
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 文档内容
    /// * `Err(EngineError)` - 网络错误、超时或非2xx状态
    async fn fetch_html(&self, url: &str) -> Result<String, EngineError> {
        let response = self.get(url, self.html_timeout).await?;
        let content = response.text().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else {
                EngineError::from(e)
            }
        })?;
        Ok(content)
    }

    /// 抓取原始二进制内容
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(BinaryResponse)` - 原始字节与内容类型
    /// * `Err(EngineError)` - 网络错误、超时或非2xx状态
    async fn fetch_binary(&self, url: &str) -> Result<BinaryResponse, EngineError> {
        let response = self.get(url, self.binary_timeout).await?;

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let bytes = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout
            } else {
                EngineError::from(e)
            }
        })?;

        Ok(BinaryResponse {
            bytes,
            content_type,
        })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
