use std::fs;
use std::path::{Path, PathBuf};

use gallery_scanner::image_mime_type;
use log::warn;

use crate::responses::ApiResponse;

/// 将 URL 中的相对部分映射到 `base` 下的文件。
///
/// 逐段做百分号解码；空段被忽略，`.`、`..` 以及含分隔符的段一律拒绝。
pub fn resolve_static(base: &Path, url_path: &str) -> Option<PathBuf> {
    let mut path = base.to_path_buf();
    for raw in url_path.split('/').filter(|s| !s.is_empty()) {
        let segment = urlencoding::decode(raw).ok()?;
        if segment == "." || segment == ".." || segment.contains(['/', '\\', '\0']) {
            return None;
        }
        path.push(segment.as_ref());
    }
    Some(path)
}

pub fn content_type_for(path: &Path) -> &'static str {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if let Some(mime) = image_mime_type(&name) {
        return mime;
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// 读取 `base` 下的文件；目录请求返回其中的 index.html
pub fn serve_file(base: &Path, url_path: &str) -> ApiResponse {
    let Some(mut path) = resolve_static(base, url_path) else {
        return ApiResponse::not_found();
    };
    if path.is_dir() {
        path.push("index.html");
    }
    if !path.is_file() {
        return ApiResponse::not_found();
    }

    match fs::read(&path) {
        Ok(body) => ApiResponse::bytes(200, content_type_for(&path), body),
        Err(e) => {
            warn!("cannot read {}: {}", path.display(), e);
            ApiResponse::not_found()
        }
    }
}
