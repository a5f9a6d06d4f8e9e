mod build;
mod config;
mod error;
mod flatten;
mod item;
mod mutate;
mod projection;
mod reorder;
mod session;
mod state;
mod visible;

pub use build::build_tree;
pub use config::{DEFAULT_INDENTATION_WIDTH, IndentationWidth, SortableTreeConfig};
pub use error::TreeError;
pub use flatten::flatten_tree;
pub use item::{FlattenedItem, ItemId, TreeItem, validate_unique_ids};
pub use mutate::{
    Children, Collapsed, ItemField, child_count, find_item, find_item_deep, remove_item,
    set_property,
};
pub use projection::{Projection, get_projection};
pub use reorder::{move_element, move_subtree};
pub use session::{DragPhase, DragSession, StartPosition};
pub use state::{SortableTreeState, TreeRow};
pub use visible::{collapsed_ids, remove_children_of, visible_items};
