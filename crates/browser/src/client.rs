use gallery_common::GalleryError;
use gallery_domain::{FolderStructure, TreeNode};
use log::{error, info};

pub const FOLDER_STRUCTURE_ENDPOINT: &str = "/api/folder-structure";

/// 拉取完整目录树；任何失败都记录日志并返回空树，界面照常可用
pub async fn fetch_folder_structure(base_url: &str) -> TreeNode {
    match try_fetch_folder_structure(base_url).await {
        Ok(structure) => {
            info!(
                "loaded folder structure: {} folders, {} images at root",
                structure.tree.folders.len(),
                structure.tree.images.len()
            );
            structure.tree
        }
        Err(e) => {
            error!("Error loading folder structure: {}", e);
            TreeNode::default()
        }
    }
}

pub async fn try_fetch_folder_structure(base_url: &str) -> Result<FolderStructure, GalleryError> {
    let url = format!(
        "{}{}",
        base_url.trim_end_matches('/'),
        FOLDER_STRUCTURE_ENDPOINT
    );
    let response = reqwest::get(&url)
        .await
        .map_err(|e| GalleryError::Http(format!("GET {} failed: {}", url, e)))?
        .error_for_status()
        .map_err(|e| GalleryError::Http(e.to_string()))?;

    response
        .json::<FolderStructure>()
        .await
        .map_err(|e| GalleryError::Http(format!("invalid folder structure body: {}", e)))
}
