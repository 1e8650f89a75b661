/// 识别为图片的扩展名（小写，不含点）
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// 按扩展名判断是否为图片，大小写不敏感
pub fn is_image_file(name: &str) -> bool {
    extension_of(name)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// 图片的 MIME 类型，非图片返回 None
pub fn image_mime_type(name: &str) -> Option<&'static str> {
    let mime = match extension_of(name)?.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(mime)
}

fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_case_insensitive() {
        for name in ["a.jpg", "b.JPEG", "c.Png", "d.gif", "e.WebP", "x.y.jpg"] {
            assert!(is_image_file(name), "{name} should be an image");
        }
    }

    #[test]
    fn test_non_images_ignored() {
        for name in ["notes.txt", "jpg", "archive.jpg.zip", "README", "photo.tiff", ""] {
            assert!(!is_image_file(name), "{name} should not be an image");
        }
    }

    #[test]
    fn test_hidden_image_file() {
        assert!(is_image_file(".jpg"));
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(image_mime_type("A.JPG"), Some("image/jpeg"));
        assert_eq!(image_mime_type("a.webp"), Some("image/webp"));
        assert_eq!(image_mime_type("a.svg"), None);
    }
}
