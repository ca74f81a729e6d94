// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::search_query::SearchQueryDto;
use crate::config::settings::Settings;
use crate::domain::models::wallpaper::WallpaperRecord;
use crate::engines::traits::{EngineError, UpstreamEngine};
use crate::utils::url_utils::{host_is_allowed, is_icon_like_path, resolve_candidate};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

#[derive(Error, Debug)]
pub enum SearchServiceError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] EngineError),
}

/// Candidate source attributes, checked in priority order. Lazy-load
/// attributes come first because the upstream gallery hides the real image
/// URL behind them until the browser scrolls the element into view.
const SOURCE_ATTRIBUTES: [&str; 3] = ["data-src", "data-original", "src"];

/// Wallpaper search service following the web scraping approach.
///
/// Fetches the upstream search-results page for a query and extracts a
/// deduplicated, capped list of wallpaper records from its HTML. The
/// extraction is deliberately tolerant of markup drift: an element that
/// yields no usable candidate is skipped, and a page that yields nothing
/// is an empty result, not an error.
pub struct SearchService<E: ?Sized> {
    engine: Arc<E>,
    settings: Arc<Settings>,
}

impl<E> SearchService<E>
where
    E: UpstreamEngine + ?Sized,
{
    pub fn new(engine: Arc<E>, settings: Arc<Settings>) -> Self {
        Self { engine, settings }
    }

    /// Execute a wallpaper search against the upstream site.
    ///
    /// # Arguments
    /// * `dto` - Validated query parameters (`q` must be non-empty after trim)
    ///
    /// # Returns
    /// Deduplicated records in document order, capped at the configured
    /// maximum, or `SearchServiceError` if validation or the upstream
    /// fetch fails. Zero extracted records is a successful empty result.
    pub async fn search(
        &self,
        dto: SearchQueryDto,
    ) -> Result<Vec<WallpaperRecord>, SearchServiceError> {
        let query = dto.q.trim();
        if query.is_empty() {
            return Err(SearchServiceError::ValidationError(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = self.build_search_url(query);
        debug!("Fetching upstream search page: {}", url);
        let html = self.engine.fetch_html(&url).await?;

        let records = self.parse_results(&html, query);
        debug!("Extracted {} wallpaper records", records.len());
        Ok(records)
    }

    /// Build the upstream search URL for a query.
    ///
    /// The query is percent-encoded into the fixed `?wallpaper=` template
    /// against the configured base URL.
    pub fn build_search_url(&self, query: &str) -> String {
        let base = self.settings.upstream.base_url.trim_end_matches('/');
        let params = vec![("wallpaper", query)];
        format!(
            "{}/search?{}",
            base,
            serde_urlencoded::to_string(&params).unwrap_or_default()
        )
    }

    /// Parse an upstream HTML document into wallpaper records.
    ///
    /// Scans all `<img>` elements, reading the candidate source URL from
    /// `data-src`, then `data-original`, then `src`. Candidates are
    /// normalized against the upstream origin, filtered to the trusted
    /// domain, stripped of icon/sprite/favicon/logo assets, and
    /// deduplicated by exact URL while preserving document order.
    pub fn parse_results(&self, html: &str, query: &str) -> Vec<WallpaperRecord> {
        let upstream = &self.settings.upstream;
        let base = match Url::parse(&upstream.base_url) {
            Ok(url) => url,
            Err(e) => {
                warn!("Invalid upstream base_url {}: {}", upstream.base_url, e);
                return Vec::new();
            }
        };

        // "img" is a valid selector, parse cannot fail here
        let Ok(selector) = Selector::parse("img") else {
            return Vec::new();
        };

        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for element in document.select(&selector) {
            let Some(candidate) = SOURCE_ATTRIBUTES
                .iter()
                .find_map(|attr| element.value().attr(attr))
            else {
                continue;
            };

            let Some(preview) = resolve_candidate(&base, candidate) else {
                continue;
            };

            if !host_is_allowed(&preview, &upstream.allowed_domain) || is_icon_like_path(&preview)
            {
                continue;
            }

            let preview = preview.to_string();
            if !seen.insert(preview.clone()) {
                continue;
            }

            // The anchor wrapping a thumbnail usually points at the
            // higher-resolution detail asset; fall back to the preview
            // when there is none on the trusted host.
            let download = self
                .anchor_download_url(element, &base, &upstream.allowed_domain)
                .unwrap_or_else(|| preview.clone());

            records.push(WallpaperRecord::new(query.to_string(), preview, download));
            if records.len() >= upstream.max_results {
                break;
            }
        }

        records
    }

    /// 查找包裹图片元素的链接并归一化其地址
    ///
    /// 仅当链接地址归一化后仍位于受信任域名上时才采用
    fn anchor_download_url(
        &self,
        element: ElementRef,
        base: &Url,
        allowed_domain: &str,
    ) -> Option<String> {
        let anchor = element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "a")?;
        let href = anchor.value().attr("href")?;
        let url = resolve_candidate(base, href)?;
        if !host_is_allowed(&url, allowed_domain) {
            return None;
        }
        Some(url.to_string())
    }
}

#[cfg(test)]
#[path = "search_service_test.rs"]
mod tests;
