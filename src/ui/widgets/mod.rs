pub mod file_tree;
pub mod progress;
pub mod tree_browser;
