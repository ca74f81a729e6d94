// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

/// `/api/download` 的查询参数
///
/// `url` 缺省时反序列化为空串，统一走"地址缺失"的校验路径
#[derive(Debug, Deserialize)]
pub struct DownloadQueryDto {
    #[serde(default)]
    pub url: String,
}
