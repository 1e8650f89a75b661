//! 画廊会话状态。
//!
//! 所有状态转换都返回新的 `GallerySession`，原值保持不变；
//! 当前位置只以路径字符串保存，节点上不存父引用。

use chrono::{DateTime, TimeZone};
use gallery_domain::{GalleryItem, TreeNode};
use log::warn;
use serde::Serialize;

use crate::filters::{apply_filters, FilterParams};
use crate::lightbox::Lightbox;
use crate::navigator::{breadcrumbs, normalize_path, resolve, Breadcrumb};
use crate::pagination::{paginate_node, Page, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone, PartialEq)]
pub struct GallerySession {
    path: String,
    page: usize,
    page_size: usize,
    filters: FilterParams,
    lightbox: Option<Lightbox>,
}

impl Default for GallerySession {
    fn default() -> Self {
        Self {
            path: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filters: FilterParams::default(),
            lightbox: None,
        }
    }
}

/// 交给渲染层的一帧内容
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub path: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub page: Page<GalleryItem>,
}

impl GallerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    /// 进入 `path`；路径不存在时记录警告并保持原状态
    pub fn navigate(&self, tree: &TreeNode, path: &str) -> Self {
        if resolve(tree, path).is_none() {
            warn!("Path not found: {}", path);
            return self.clone();
        }
        Self {
            path: normalize_path(path),
            page: 1,
            lightbox: None,
            ..self.clone()
        }
    }

    /// 更换筛选条件，页码回到第一页
    pub fn with_filters(&self, filters: FilterParams) -> Self {
        Self {
            filters,
            page: 1,
            ..self.clone()
        }
    }

    pub fn go_to_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// 当前路径下经过筛选与排序的内容
    pub fn filtered_content<Tz: TimeZone>(
        &self,
        tree: &TreeNode,
        now: &DateTime<Tz>,
    ) -> Option<TreeNode> {
        resolve(tree, &self.path).map(|node| apply_filters(node, &self.filters, now))
    }

    pub fn view<Tz: TimeZone>(&self, tree: &TreeNode, now: &DateTime<Tz>) -> Option<GalleryView> {
        let Some(content) = self.filtered_content(tree, now) else {
            warn!("Path not found: {}", self.path);
            return None;
        };
        Some(GalleryView {
            path: self.path.clone(),
            breadcrumbs: breadcrumbs(&self.path),
            page: paginate_node(&content, self.page, self.page_size),
        })
    }

    /// 以当前视图中的图片为幻灯片打开大图
    pub fn open_lightbox<Tz: TimeZone>(
        &self,
        tree: &TreeNode,
        now: &DateTime<Tz>,
        image_path: &str,
    ) -> Self {
        let slides = self
            .filtered_content(tree, now)
            .map(|content| content.images)
            .unwrap_or_default();
        Self {
            lightbox: Lightbox::open(slides, image_path),
            ..self.clone()
        }
    }

    pub fn close_lightbox(&self) -> Self {
        Self {
            lightbox: None,
            ..self.clone()
        }
    }

    pub fn lightbox_next(&self) -> Self {
        self.map_lightbox(Lightbox::next)
    }

    pub fn lightbox_prev(&self) -> Self {
        self.map_lightbox(Lightbox::prev)
    }

    pub fn lightbox_toggle_zoom(&self) -> Self {
        self.map_lightbox(Lightbox::toggle_zoom)
    }

    pub fn lightbox_wheel_zoom(&self, delta_y: f32) -> Self {
        self.map_lightbox(|lb| lb.wheel_zoom(delta_y))
    }

    fn map_lightbox(&self, f: impl FnOnce(Lightbox) -> Lightbox) -> Self {
        Self {
            lightbox: self.lightbox.clone().map(f),
            ..self.clone()
        }
    }
}
