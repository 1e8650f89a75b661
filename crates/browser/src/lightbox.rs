use gallery_domain::ImageNode;
use serde::Serialize;

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 3.0;
/// 双击/按钮切换时的放大倍数
pub const TOGGLE_ZOOM: f32 = 2.0;
pub const WHEEL_ZOOM_STEP: f32 = 0.1;

/// 大图浏览状态。幻灯片为打开时当前视图中的图片，首尾不循环。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lightbox {
    slides: Vec<ImageNode>,
    index: usize,
    zoom: f32,
}

impl Lightbox {
    /// 定位到 `image_path`；找不到时停在第一张，没有图片时返回 None
    pub fn open(slides: Vec<ImageNode>, image_path: &str) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        let index = slides
            .iter()
            .position(|img| img.path == image_path)
            .unwrap_or(0);
        Some(Self {
            slides,
            index,
            zoom: MIN_ZOOM,
        })
    }

    pub fn current(&self) -> &ImageNode {
        &self.slides[self.index]
    }

    pub fn slides(&self) -> &[ImageNode] {
        &self.slides
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom > MIN_ZOOM
    }

    pub fn is_beginning(&self) -> bool {
        self.index == 0
    }

    pub fn is_end(&self) -> bool {
        self.index + 1 == self.slides.len()
    }

    pub fn next(self) -> Self {
        let index = (self.index + 1).min(self.slides.len() - 1);
        self.slide_to(index)
    }

    pub fn prev(self) -> Self {
        let index = self.index.saturating_sub(1);
        self.slide_to(index)
    }

    /// 切换幻灯片时复位缩放
    pub fn slide_to(self, index: usize) -> Self {
        if index == self.index || index >= self.slides.len() {
            return self;
        }
        Self {
            index,
            zoom: MIN_ZOOM,
            ..self
        }
    }

    pub fn toggle_zoom(self) -> Self {
        let zoom = if self.is_zoomed() { MIN_ZOOM } else { TOGGLE_ZOOM };
        Self { zoom, ..self }
    }

    /// 滚轮缩放：向上滚放大，向下滚缩小，每格 0.1 倍
    pub fn wheel_zoom(self, delta_y: f32) -> Self {
        let step = if delta_y > 0.0 {
            -WHEEL_ZOOM_STEP
        } else if delta_y < 0.0 {
            WHEEL_ZOOM_STEP
        } else {
            0.0
        };
        let zoom = ((self.zoom + step) * 10.0).round() / 10.0;
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(n: usize) -> Vec<ImageNode> {
        (0..n)
            .map(|i| ImageNode {
                name: format!("{i}.png"),
                path: format!("album/{i}.png"),
                last_modified: 0,
                size: 0,
            })
            .collect()
    }

    #[test]
    fn test_open_at_path() {
        let lb = Lightbox::open(slides(3), "album/2.png").unwrap();
        assert_eq!(lb.index(), 2);
        assert!(lb.is_end());
        assert_eq!(lb.current().name, "2.png");
    }

    #[test]
    fn test_open_unknown_path_starts_at_first() {
        let lb = Lightbox::open(slides(3), "elsewhere.png").unwrap();
        assert_eq!(lb.index(), 0);
        assert!(lb.is_beginning());
    }

    #[test]
    fn test_open_without_images() {
        assert!(Lightbox::open(Vec::new(), "a.png").is_none());
    }

    #[test]
    fn test_navigation_stops_at_ends() {
        let lb = Lightbox::open(slides(2), "album/0.png").unwrap();
        let lb = lb.prev();
        assert_eq!(lb.index(), 0);
        let lb = lb.next().next();
        assert_eq!(lb.index(), 1);
    }

    #[test]
    fn test_zoom_toggle_and_reset_on_slide() {
        let lb = Lightbox::open(slides(2), "album/0.png").unwrap().toggle_zoom();
        assert_eq!(lb.zoom(), TOGGLE_ZOOM);
        assert!(lb.is_zoomed());

        let lb = lb.next();
        assert_eq!(lb.zoom(), MIN_ZOOM);

        let lb = lb.toggle_zoom().toggle_zoom();
        assert!(!lb.is_zoomed());
    }

    #[test]
    fn test_staying_on_slide_keeps_zoom() {
        let lb = Lightbox::open(slides(1), "album/0.png").unwrap().toggle_zoom().next();
        assert_eq!(lb.zoom(), TOGGLE_ZOOM);
    }

    #[test]
    fn test_wheel_zoom_clamped() {
        let mut lb = Lightbox::open(slides(1), "album/0.png").unwrap();
        lb = lb.wheel_zoom(100.0);
        assert_eq!(lb.zoom(), MIN_ZOOM);

        for _ in 0..5 {
            lb = lb.wheel_zoom(-1.0);
        }
        assert!((lb.zoom() - 1.5).abs() < 1e-6);

        for _ in 0..50 {
            lb = lb.wheel_zoom(-1.0);
        }
        assert_eq!(lb.zoom(), MAX_ZOOM);
    }
}
