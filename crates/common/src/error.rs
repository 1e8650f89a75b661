use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl GalleryError {
    /// 将 io::Error 按权限问题与其他问题区分，附带出错路径
    pub fn from_io(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            GalleryError::PermissionDenied(path.display().to_string())
        } else {
            GalleryError::Io(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_io_permission_denied() {
        let e = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = GalleryError::from_io(Path::new("/srv/imgs"), e);
        assert!(matches!(err, GalleryError::PermissionDenied(ref p) if p == "/srv/imgs"));
    }

    #[test]
    fn test_from_io_other() {
        let e = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = GalleryError::from_io(Path::new("/srv/imgs"), e);
        assert!(matches!(err, GalleryError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }
}
