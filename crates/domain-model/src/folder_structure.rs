use serde::{Deserialize, Serialize};

use crate::TreeNode;

/// `/api/folder-structure` 的响应体：根节点内容加服务端时间
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderStructure {
    #[serde(flatten)]
    pub tree: TreeNode,
    /// ISO-8601 时间，仅用于诊断
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
}

/// 出错时的 JSON 响应体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_time: Option<String>,
}

impl ErrorBody {
    pub fn not_found() -> Self {
        Self {
            error: "Not found".to_string(),
            message: None,
            server_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_tree_with_server_time() {
        let body = FolderStructure {
            tree: TreeNode::default(),
            server_time: Some("2024-06-01T00:00:00Z".to_string()),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"folders":[],"images":[],"serverTime":"2024-06-01T00:00:00Z"}"#
        );

        let back: FolderStructure = serde_json::from_str(&json).unwrap();
        assert!(back.tree.is_empty());
    }

    #[test]
    fn test_plain_tree_decodes_as_structure() {
        let body: FolderStructure =
            serde_json::from_str(r#"{"folders":[],"images":[{"name":"a.gif","path":"a.gif"}]}"#).unwrap();
        assert_eq!(body.tree.images.len(), 1);
        assert!(body.server_time.is_none());
    }

    #[test]
    fn test_not_found_body() {
        let json = serde_json::to_string(&ErrorBody::not_found()).unwrap();
        assert_eq!(json, r#"{"error":"Not found"}"#);
    }
}
