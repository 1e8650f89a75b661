pub mod scanner;
pub mod filters;

pub use scanner::{build_tree, scan_path, scan_root, ScanOutcome};
pub use filters::*;
pub use gallery_domain::{FolderNode, ImageNode, TreeNode};
