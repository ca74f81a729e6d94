// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::download_query::DownloadQueryDto;
use crate::config::settings::Settings;
use crate::engines::traits::{EngineError, UpstreamEngine};
use crate::utils::url_utils::{derive_filename, host_is_allowed};
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Fallback content type when the upstream response carries none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Error, Debug)]
pub enum DownloadServiceError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid download url: {0}")]
    InvalidUrl(String),
    #[error("Host not allowed: {0}")]
    ForbiddenHost(String),
    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] EngineError),
}

/// 代理下载的响应载荷
///
/// 原始字节加上派生出的内容类型与文件名，不对字节做任何解析
pub struct DownloadPayload {
    pub bytes: Bytes,
    pub content_type: String,
    pub filename: String,
}

/// Download proxy service.
///
/// Validates a candidate image URL against the trusted-domain allow-list,
/// relays the binary payload through the upstream engine, and derives the
/// response headers. The allow-list check is the sole security boundary
/// keeping the proxy from acting as an open relay, so it runs before any
/// network activity.
pub struct DownloadService<E: ?Sized> {
    engine: Arc<E>,
    settings: Arc<Settings>,
}

impl<E> DownloadService<E>
where
    E: UpstreamEngine + ?Sized,
{
    pub fn new(engine: Arc<E>, settings: Arc<Settings>) -> Self {
        Self { engine, settings }
    }

    /// Proxy a single image download.
    ///
    /// # Arguments
    /// * `dto` - Validated query parameters (`url` must be an absolute URL)
    ///
    /// # Returns
    /// The relayed bytes with derived content type and filename, or
    /// `DownloadServiceError` when the URL is malformed, the host is not
    /// allow-listed, or the upstream fetch fails.
    pub async fn download(
        &self,
        dto: DownloadQueryDto,
    ) -> Result<DownloadPayload, DownloadServiceError> {
        let raw = dto.url.trim();
        if raw.is_empty() {
            return Err(DownloadServiceError::ValidationError(
                "Download url is required".to_string(),
            ));
        }

        let url = Url::parse(raw)
            .map_err(|_| DownloadServiceError::InvalidUrl(raw.to_string()))?;

        if !host_is_allowed(&url, &self.settings.upstream.allowed_domain) {
            return Err(DownloadServiceError::ForbiddenHost(
                url.host_str().unwrap_or_default().to_string(),
            ));
        }

        debug!("Proxying download: {}", url);
        let response = self.engine.fetch_binary(url.as_str()).await?;

        let content_type = response
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        let filename = derive_filename(&url);

        Ok(DownloadPayload {
            bytes: response.bytes,
            content_type,
            filename,
        })
    }
}

#[cfg(test)]
#[path = "download_service_test.rs"]
mod tests;
