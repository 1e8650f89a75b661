use std::panic::{self, AssertUnwindSafe};

use gallery_common::{ServerConfig, IMAGE_URL_PREFIX};
use gallery_domain::FolderStructure;
use gallery_scanner::scan_root;
use log::{error, info};
use tiny_http::Method;

use crate::responses::{server_time, ApiResponse};
use crate::static_files::serve_file;

pub const FOLDER_STRUCTURE_PATH: &str = "/api/folder-structure";
const FOLDER_STRUCTURE_ERROR: &str = "Failed to read folder structure";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    FolderStructure,
    /// 图片根目录下的相对路径
    Image(String),
    /// 前端静态资源目录下的相对路径
    Public(String),
    Preflight,
    NotFound,
}

/// 只按路径部分匹配，查询串忽略
pub fn route(method: &Method, url: &str, has_public_dir: bool) -> Route {
    let path = url.split(['?', '#']).next().unwrap_or("");

    match method {
        Method::Options => return Route::Preflight,
        Method::Get | Method::Head => {}
        _ => return Route::NotFound,
    }

    if path == FOLDER_STRUCTURE_PATH || path == "/api/folder-structure/" {
        Route::FolderStructure
    } else if let Some(rel) = path.strip_prefix(IMAGE_URL_PREFIX) {
        Route::Image(rel.to_string())
    } else if has_public_dir && !path.starts_with("/api/") {
        Route::Public(path.trim_start_matches('/').to_string())
    } else {
        Route::NotFound
    }
}

/// 处理一个请求；处理过程中的 panic 被转换为 500，不影响进程
pub fn handle(config: &ServerConfig, method: &Method, url: &str) -> ApiResponse {
    let route = route(method, url, config.public_dir.is_some());
    let result = panic::catch_unwind(AssertUnwindSafe(|| dispatch(config, route)));
    result.unwrap_or_else(|cause| {
        let message = panic_message(cause.as_ref());
        error!("{} {} panicked: {}", method, url, message);
        ApiResponse::internal_error("Internal server error", message)
    })
}

fn dispatch(config: &ServerConfig, route: Route) -> ApiResponse {
    match route {
        Route::FolderStructure => folder_structure(config),
        Route::Image(rel) => serve_file(&config.image_root, &rel),
        Route::Public(rel) => match &config.public_dir {
            Some(dir) => serve_file(dir, &rel),
            None => ApiResponse::not_found(),
        },
        Route::Preflight => ApiResponse::no_content(),
        Route::NotFound => ApiResponse::not_found(),
    }
}

/// 每次请求都重新扫描图片根目录；根目录缺失时返回空树
pub fn folder_structure(config: &ServerConfig) -> ApiResponse {
    let outcome = scan_root(&config.image_root);
    if outcome.root_found {
        info!(
            "folder structure of {}: {} images",
            config.image_root.display(),
            outcome.tree.total_images()
        );
    }

    let body = FolderStructure {
        tree: outcome.tree,
        server_time: Some(server_time()),
    };
    ApiResponse::json(200, &body).unwrap_or_else(|e| {
        error!("Error reading folder structure: {}", e);
        ApiResponse::internal_error(FOLDER_STRUCTURE_ERROR, e.to_string())
    })
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
