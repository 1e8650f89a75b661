use gallery_domain::{gallery_items, GalleryItem, TreeNode};
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 30;

/// 一页内容与分页信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 从 1 开始
    pub page_number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    /// 只有一页或没有内容时不显示分页按钮
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// 取第 `page_number` 页；页码越界（含 0）时返回空页而不是错误
pub fn paginate<T: Clone>(items: &[T], page_number: usize, page_size: usize) -> Page<T> {
    let total_pages = total_pages(items.len(), page_size);
    let page_items = if page_number == 0 || page_number > total_pages {
        Vec::new()
    } else {
        let start = (page_number - 1) * page_size;
        let end = (start + page_size).min(items.len());
        items[start..end].to_vec()
    };

    Page {
        items: page_items,
        page_number,
        total_pages,
        total_items: items.len(),
    }
}

/// 文件夹在前、图片在后合并后分页
pub fn paginate_node(node: &TreeNode, page_number: usize, page_size: usize) -> Page<GalleryItem> {
    paginate(&gallery_items(node), page_number, page_size)
}
