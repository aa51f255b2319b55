pub mod error;
mod populate;
pub mod scene_tree;
pub mod tree_node;
