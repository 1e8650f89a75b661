use serde::{Deserialize, Serialize};

/// 一层目录的内容：子文件夹与图片
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(default)]
    pub folders: Vec<FolderNode>,
    #[serde(default)]
    pub images: Vec<ImageNode>,
}

/// 子目录节点，`content` 为完整展开的下一层
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNode {
    pub name: String,
    /// 相对图片根目录的路径，始终以 `/` 分隔
    pub path: String,
    /// Unix 时间戳（毫秒），最近修改时间
    #[serde(default)]
    pub last_modified: u64,
    #[serde(default)]
    pub content: TreeNode,
}

/// 图片文件节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    pub name: String,
    pub path: String,
    /// Unix 时间戳（毫秒），最近修改时间
    #[serde(default)]
    pub last_modified: u64,
    #[serde(default)]
    pub size: u64,
}

impl TreeNode {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.images.is_empty()
    }

    /// 当前层的条目数（不含子目录内容）
    pub fn len(&self) -> usize {
        self.folders.len() + self.images.len()
    }

    /// 整棵子树中的图片总数
    pub fn total_images(&self) -> usize {
        self.images.len()
            + self
                .folders
                .iter()
                .map(|f| f.content.total_images())
                .sum::<usize>()
    }
}

/// 文件夹与图片共享的排序/筛选字段
pub trait Entry {
    fn name(&self) -> &str;
    fn last_modified(&self) -> u64;
}

impl Entry for FolderNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_modified(&self) -> u64 {
        self.last_modified
    }
}

impl Entry for ImageNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_modified(&self) -> u64 {
        self.last_modified
    }
}
