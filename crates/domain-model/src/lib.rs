pub mod tree_node;
pub mod gallery_item;
pub mod folder_structure;

pub use tree_node::*;
pub use gallery_item::*;
pub use folder_structure::*;
