pub mod navigator;
pub mod filters;
pub mod pagination;
pub mod lightbox;
pub mod session;
pub mod client;

pub use navigator::*;
pub use filters::*;
pub use pagination::*;
pub use lightbox::*;
pub use session::*;
pub use client::{fetch_folder_structure, try_fetch_folder_structure, FOLDER_STRUCTURE_ENDPOINT};
pub use gallery_domain::{gallery_items, FolderNode, GalleryItem, ImageNode, TreeNode};
