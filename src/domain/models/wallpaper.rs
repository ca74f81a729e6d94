// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 壁纸记录
///
/// 一次搜索请求中提取出的单条壁纸结果，
/// 仅在单次请求的生命周期内存在，不做任何持久化
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WallpaperRecord {
    /// 标题，取自搜索关键词
    pub title: String,
    /// 预览图URL，始终位于受信任域名上
    pub preview_url: String,
    /// 下载URL；无更高清链接时等于预览URL
    pub download_url: String,
}

impl WallpaperRecord {
    pub fn new(title: String, preview_url: String, download_url: String) -> Self {
        Self {
            title,
            preview_url,
            download_url,
        }
    }
}
