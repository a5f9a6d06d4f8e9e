use crate::item::ItemId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TreeError {
    /// A flattened row names a parent that was not emitted before it.
    #[error("item `{id}` refers to parent `{parent_id}`, which does not precede it")]
    MissingParent { id: ItemId, parent_id: ItemId },

    #[error("item id `{0}` appears more than once")]
    DuplicateId(ItemId),

    #[error("indentation width must be a positive finite number, got {0}")]
    InvalidIndentationWidth(f64),
}
