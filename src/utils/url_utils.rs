// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::Url;

/// Path tokens that identify site chrome rather than wallpaper assets.
/// Matched case-insensitively as substrings of the URL path.
const ICON_PATH_TOKENS: [&str; 4] = ["icon", "sprite", "favicon", "logo"];

/// 将候选URL归一化为绝对URL
///
/// 协议相对地址（`//host/path`）升级为 `https://`，
/// 相对路径基于受信任源解析；仅接受 http/https 方案
pub fn resolve_candidate(base: &Url, candidate: &str) -> Option<Url> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }

    let url = if let Some(rest) = candidate.strip_prefix("//") {
        Url::parse(&format!("https://{}", rest)).ok()?
    } else {
        base.join(candidate).ok()?
    };

    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

/// 判断URL的主机是否位于受信任域名上（子串匹配）
pub fn host_is_allowed(url: &Url, allowed_domain: &str) -> bool {
    url.host_str()
        .is_some_and(|host| host.contains(allowed_domain))
}

/// 判断URL路径是否指向图标/雪碧图等站点装饰资源
pub fn is_icon_like_path(url: &Url) -> bool {
    let path = url.path().to_ascii_lowercase();
    ICON_PATH_TOKENS.iter().any(|token| path.contains(token))
}

/// 从URL路径派生下载文件名
///
/// 取最后一个非空路径段；无路径段或无扩展名时
/// 保证回退出一个带 `.jpg` 扩展名的文件名
pub fn derive_filename(url: &Url) -> String {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last();

    match segment {
        None => "wallpaper.jpg".to_string(),
        Some(segment) => match segment.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => segment.to_string(),
            _ => format!("{}.jpg", segment.trim_end_matches('.')),
        },
    }
}
