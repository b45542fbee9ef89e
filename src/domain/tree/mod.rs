//! File tree navigation
//!
//! - `node` - listing entries as delivered by the enumeration service
//! - `model` - arena-backed TreeModel with expand and selection state

mod model;
mod node;

pub use model::{
    NodeView, SelectionEvent, TreeError, TreeModel, Walk, DEFAULT_AUTO_EXPAND_DEPTH,
};
pub use node::{FileClass, NodeKind, TreeNode};
