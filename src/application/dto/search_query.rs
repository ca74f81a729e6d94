// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;

/// `/api/search` 的查询参数
///
/// `q` 缺省时反序列化为空串，统一走"查询为空"的校验路径
#[derive(Debug, Deserialize)]
pub struct SearchQueryDto {
    #[serde(default)]
    pub q: String,
}
