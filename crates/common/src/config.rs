use std::path::PathBuf;

use crate::error::{GalleryError, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_IMAGE_ROOT: &str = "public/imgs";
/// 图片静态资源的 URL 前缀，与 TreeNode 中的相对路径拼接即得到图片地址
pub const IMAGE_URL_PREFIX: &str = "/imgs/";

/// 服务端配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 图片根目录，目录树以此为根计算相对路径
    pub image_root: PathBuf,
    /// 可选的前端静态资源目录，挂载在 `/`
    pub public_dir: Option<PathBuf>,
    /// `Access-Control-Allow-Origin` 的取值
    pub cors_origin: String,
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            image_root: PathBuf::from(DEFAULT_IMAGE_ROOT),
            public_dir: None,
            cors_origin: "*".to_string(),
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

impl ServerConfig {
    /// 从进程环境变量读取配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意查找函数读取配置，未设置或为空白的变量使用默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = port
                .parse()
                .map_err(|_| GalleryError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(host) = get("GALLERY_HOST") {
            config.host = host;
        }
        if let Some(root) = get("GALLERY_ROOT") {
            config.image_root = PathBuf::from(root);
        }
        config.public_dir = get("GALLERY_PUBLIC_DIR").map(PathBuf::from);
        if let Some(origin) = get("GALLERY_CORS_ORIGIN") {
            config.cors_origin = origin;
        }
        if let Some(workers) = get("GALLERY_WORKERS") {
            config.workers = match workers.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(GalleryError::Config(format!(
                        "GALLERY_WORKERS must be a positive integer: {}",
                        workers
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.image_root, PathBuf::from("public/imgs"));
        assert_eq!(config.cors_origin, "*");
        assert!(config.public_dir.is_none());
        assert!(config.workers >= 1);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("GALLERY_HOST", "127.0.0.1"),
            ("GALLERY_ROOT", "/srv/photos"),
            ("GALLERY_PUBLIC_DIR", "/srv/site"),
            ("GALLERY_CORS_ORIGIN", "https://example.org"),
            ("GALLERY_WORKERS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.listen_addr(), "127.0.0.1:8080");
        assert_eq!(config.image_root, PathBuf::from("/srv/photos"));
        assert_eq!(config.public_dir, Some(PathBuf::from("/srv/site")));
        assert_eq!(config.cors_origin, "https://example.org");
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[("PORT", "  "), ("GALLERY_ROOT", "")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.image_root, PathBuf::from(DEFAULT_IMAGE_ROOT));
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("PORT", "http")])).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = ServerConfig::from_lookup(lookup_from(&[("GALLERY_WORKERS", "0")])).unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }
}
