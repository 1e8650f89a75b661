use std::fs::{self, DirEntry, Metadata};
use std::path::{Component, Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use gallery_common::GalleryError;
use gallery_domain::{FolderNode, ImageNode, TreeNode};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::filters::is_image_file;

/// 一次扫描的结果
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub tree: TreeNode,
    /// 根目录是否存在且为目录；不存在时 `tree` 为空
    pub root_found: bool,
}

enum Child {
    Folder(FolderNode),
    Image(ImageNode),
}

/// 递归构建 `root` 下的目录树。
///
/// 任何读取失败都只影响出错的那一层：无法读取的目录得到空节点，
/// 无法 stat 的条目使用当前时间与 0 字节。
pub fn build_tree(root: &Path) -> TreeNode {
    build_level(root, root)
}

fn build_level(root: &Path, dir: &Path) -> TreeNode {
    let entries: Vec<DirEntry> = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("skipping unreadable entry in {}: {}", dir.display(), e);
                    None
                }
            })
            .collect(),
        Err(e) => {
            warn!(
                "cannot read directory {}: {}",
                dir.display(),
                GalleryError::from_io(dir, e)
            );
            return TreeNode::default();
        }
    };

    // 并行处理子项，collect 保持枚举顺序
    let children: Vec<Option<Child>> = entries
        .par_iter()
        .map(|entry| classify(root, entry))
        .collect();

    let mut node = TreeNode::default();
    for child in children.into_iter().flatten() {
        match child {
            Child::Folder(folder) => node.folders.push(folder),
            Child::Image(image) => node.images.push(image),
        }
    }

    // 稳定排序：修改时间相同的条目保持枚举顺序
    node.folders
        .sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    node.images
        .sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    node
}

fn classify(root: &Path, entry: &DirEntry) -> Option<Child> {
    let path = entry.path();
    // 非 UTF-8 文件名无法通过 URL 还原到磁盘上的同一文件
    let name = match entry.file_name().into_string() {
        Ok(name) => name,
        Err(_) => {
            warn!("skipping non UTF-8 name {}", path.display());
            return None;
        }
    };

    // file_type 不跟随符号链接；指向目录的链接不展开，避免环路
    let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
    let metadata = if is_symlink {
        fs::metadata(&path)
    } else {
        entry.metadata()
    };
    let metadata = match metadata {
        Ok(m) => Some(m),
        Err(e) => {
            warn!("cannot stat {}: {}", path.display(), e);
            None
        }
    };

    if is_symlink {
        if !metadata.as_ref().is_some_and(|m| m.is_file()) {
            debug!("skipping symlink {}", path.display());
            return None;
        }
    } else if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
        return Some(Child::Folder(FolderNode {
            path: relative_path(root, &path, &name),
            last_modified: modified_millis(metadata.as_ref()),
            content: build_level(root, &path),
            name,
        }));
    }

    if !is_image_file(&name) {
        return None;
    }
    Some(Child::Image(ImageNode {
        path: relative_path(root, &path, &name),
        last_modified: modified_millis(metadata.as_ref()),
        size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
        name,
    }))
}

/// 相对 `root` 的路径，分隔符统一为 `/`
fn relative_path(root: &Path, path: &Path, name: &str) -> String {
    match path.strip_prefix(root) {
        Ok(rel) => rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => {
            warn!("{} is outside of {}", path.display(), root.display());
            name.to_string()
        }
    }
}

fn modified_millis(metadata: Option<&Metadata>) -> u64 {
    metadata
        .and_then(|m| m.modified().ok())
        .map(system_time_millis)
        .unwrap_or_else(|| system_time_millis(SystemTime::now()))
}

fn system_time_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// 规范化路径（支持正斜杠、去除首尾空白）
fn normalize_path(path: &str) -> PathBuf {
    let s = path.trim();
    #[cfg(windows)]
    let s = s.replace('/', "\\");
    PathBuf::from(s)
}

/// 扫描图片根目录；根目录不存在或不可读时返回空树而不是错误
pub fn scan_root(root: &Path) -> ScanOutcome {
    let root_found = root.is_dir();
    if !root_found {
        info!("image root {} not found, serving empty tree", root.display());
        return ScanOutcome {
            tree: TreeNode::default(),
            root_found,
        };
    }

    ScanOutcome {
        tree: build_tree(root),
        root_found,
    }
}

/// 按字符串路径扫描
pub fn scan_path(path: &str) -> ScanOutcome {
    scan_root(&normalize_path(path))
}
