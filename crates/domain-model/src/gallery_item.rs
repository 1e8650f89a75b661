use serde::{Deserialize, Serialize};

use crate::{FolderNode, ImageNode, TreeNode};

/// 画廊中的一个格子：文件夹或图片，序列化时带 `type` 标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GalleryItem {
    Folder(FolderNode),
    Image(ImageNode),
}

impl GalleryItem {
    pub fn name(&self) -> &str {
        match self {
            GalleryItem::Folder(f) => &f.name,
            GalleryItem::Image(i) => &i.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            GalleryItem::Folder(f) => &f.path,
            GalleryItem::Image(i) => &i.path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, GalleryItem::Folder(_))
    }
}

/// 文件夹在前、图片在后，保持各自原有顺序
pub fn gallery_items(node: &TreeNode) -> Vec<GalleryItem> {
    node.folders
        .iter()
        .cloned()
        .map(GalleryItem::Folder)
        .chain(node.images.iter().cloned().map(GalleryItem::Image))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folders_first_then_images() {
        let node: TreeNode = serde_json::from_str(
            r#"{
                "folders": [{"name":"b","path":"b"},{"name":"a","path":"a"}],
                "images": [{"name":"z.png","path":"z.png"},{"name":"y.png","path":"y.png"}]
            }"#,
        )
        .unwrap();
        let items = gallery_items(&node);
        let names: Vec<_> = items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["b", "a", "z.png", "y.png"]);
        assert!(items[1].is_folder());
        assert!(!items[2].is_folder());
    }

    #[test]
    fn test_type_tag() {
        let item = GalleryItem::Image(ImageNode {
            name: "a.png".to_string(),
            path: "2023/a.png".to_string(),
            last_modified: 1,
            size: 2,
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["path"], "2023/a.png");
    }
}
