use gallery_common::IMAGE_URL_PREFIX;
use gallery_domain::TreeNode;
use serde::Serialize;

/// 路径的非空片段，忽略首尾与重复的 `/`
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// 规范化路径：`"/2023//vacation/"` -> `"2023/vacation"`
pub fn normalize_path(path: &str) -> String {
    path_segments(path).collect::<Vec<_>>().join("/")
}

/// 拼接子路径，父路径为空时不带前导 `/`
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = normalize_path(parent);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// 按文件夹名逐段下钻；任一段找不到时返回 None
pub fn resolve<'a>(tree: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
    path_segments(path).try_fold(tree, |current, segment| {
        current
            .folders
            .iter()
            .find(|f| f.name == segment)
            .map(|f| &f.content)
    })
}

/// 面包屑导航的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub path: String,
    /// 当前所在位置，渲染时不可点击
    pub active: bool,
}

pub const HOME_LABEL: &str = "Home";

pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let segments: Vec<&str> = path_segments(path).collect();
    let mut crumbs = Vec::with_capacity(segments.len() + 1);
    crumbs.push(Breadcrumb {
        name: HOME_LABEL.to_string(),
        path: String::new(),
        active: segments.is_empty(),
    });

    let mut current = String::new();
    for (i, segment) in segments.iter().enumerate() {
        current = join_path(&current, segment);
        crumbs.push(Breadcrumb {
            name: segment.to_string(),
            path: current.clone(),
            active: i + 1 == segments.len(),
        });
    }
    crumbs
}

/// 侧边栏目录树的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub name: String,
    pub path: String,
    pub depth: usize,
    /// 该文件夹直接包含的图片数
    pub image_count: usize,
    pub has_subfolders: bool,
}

/// 深度优先展开所有文件夹，供侧边栏渲染
pub fn folder_outline(tree: &TreeNode) -> Vec<OutlineEntry> {
    let mut out = Vec::new();
    push_outline(tree, "", 0, &mut out);
    out
}

fn push_outline(node: &TreeNode, parent: &str, depth: usize, out: &mut Vec<OutlineEntry>) {
    for folder in &node.folders {
        let path = join_path(parent, &folder.name);
        out.push(OutlineEntry {
            name: folder.name.clone(),
            path: path.clone(),
            depth,
            image_count: folder.content.images.len(),
            has_subfolders: !folder.content.folders.is_empty(),
        });
        push_outline(&folder.content, &path, depth + 1, out);
    }
}

/// 图片的访问地址，逐段做百分号编码
pub fn image_url(path: &str) -> String {
    let encoded: Vec<String> = path_segments(path)
        .map(|s| urlencoding::encode(s).into_owned())
        .collect();
    format!("{}{}", IMAGE_URL_PREFIX, encoded.join("/"))
}
