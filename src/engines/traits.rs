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

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 上游返回非成功状态码
    #[error("Upstream returned status {0}")]
    BadStatus(u16),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 二进制抓取响应
pub struct BinaryResponse {
    /// 原始字节
    pub bytes: Bytes,
    /// 上游响应的内容类型
    pub content_type: Option<String>,
}

/// 上游抓取引擎特质
///
/// 对上游站点的两类出站请求的抽象：HTML文档抓取与二进制下载。
/// 两个领域服务只依赖该特质，测试时可注入桩实现。
#[async_trait]
pub trait UpstreamEngine: Send + Sync {
    /// 抓取HTML文档，非2xx状态映射为错误
    async fn fetch_html(&self, url: &str) -> Result<String, EngineError>;

    /// 抓取原始二进制内容，非2xx状态映射为错误
    async fn fetch_binary(&self, url: &str) -> Result<BinaryResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
