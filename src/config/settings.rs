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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、上游站点和速率限制等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 上游站点配置
    pub upstream: UpstreamSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 上游站点配置设置
#[derive(Debug, Deserialize)]
pub struct UpstreamSettings {
    /// 上游站点基础URL
    pub base_url: String,
    /// 允许代理下载的域名（子串匹配）
    pub allowed_domain: String,
    /// 搜索页抓取超时时间（秒）
    pub search_timeout_secs: u64,
    /// 图片下载超时时间（秒）
    pub download_timeout_secs: u64,
    /// 单次搜索返回的最大结果数
    pub max_results: usize,
}

/// 速率限制配置设置
#[derive(Debug, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 默认每分钟请求数限制
    pub default_rpm: u32,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default upstream settings
            .set_default("upstream.base_url", "https://www.wallpaperflare.com")?
            .set_default("upstream.allowed_domain", "wallpaperflare.com")?
            .set_default("upstream.search_timeout_secs", 15)?
            .set_default("upstream.download_timeout_secs", 20)?
            .set_default("upstream.max_results", 40)?
            // Default Rate Limiting settings
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.default_rpm", 100)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("WALLRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
