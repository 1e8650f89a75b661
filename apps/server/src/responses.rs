use std::io::Cursor;

use chrono::{SecondsFormat, Utc};
use gallery_common::GalleryError;
use gallery_domain::ErrorBody;
use log::warn;
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// 与传输层无关的响应，便于在不启动服务的情况下测试路由
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Result<Self, GalleryError> {
        Ok(Self {
            status,
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: serde_json::to_vec(value)?,
        })
    }

    pub fn bytes(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: Some(content_type.to_string()),
            body,
        }
    }

    /// CORS 预检
    pub fn no_content() -> Self {
        Self {
            status: 204,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn not_found() -> Self {
        Self::error_body(404, &ErrorBody::not_found())
    }

    /// 500 响应，带错误信息与服务端时间
    pub fn internal_error(error: &str, message: impl Into<String>) -> Self {
        let body = ErrorBody {
            error: error.to_string(),
            message: Some(message.into()),
            server_time: Some(server_time()),
        };
        Self::error_body(500, &body)
    }

    // ErrorBody 只含字符串字段，序列化失败时退回纯文本
    fn error_body(status: u16, body: &ErrorBody) -> Self {
        Self::json(status, body).unwrap_or_else(|e| {
            warn!("failed to encode error body: {}", e);
            Self::bytes(status, "text/plain; charset=utf-8", body.error.clone().into_bytes())
        })
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or("")
    }
}

/// ISO-8601 时间，毫秒精度，UTC
pub fn server_time() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn cors_headers(origin: &str) -> [(&'static str, String); 3] {
    [
        ("Access-Control-Allow-Origin", origin.to_string()),
        ("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS".to_string()),
        (
            "Access-Control-Allow-Headers",
            "Origin, X-Requested-With, Content-Type, Accept".to_string(),
        ),
    ]
}

/// 转换为 tiny_http 响应并附加 CORS 头
pub fn into_http(response: ApiResponse, cors_origin: &str) -> tiny_http::Response<Cursor<Vec<u8>>> {
    let mut http = tiny_http::Response::from_data(response.body).with_status_code(response.status);

    let content_type = response
        .content_type
        .map(|ct| ("Content-Type", ct));
    for (name, value) in cors_headers(cors_origin).into_iter().chain(content_type) {
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => http.add_header(header),
            Err(()) => warn!("invalid header value for {}: {:?}", name, value),
        }
    }
    http
}
