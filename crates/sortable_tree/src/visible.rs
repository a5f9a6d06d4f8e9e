use std::collections::HashSet;

use crate::flatten::flatten_tree;
use crate::item::{FlattenedItem, ItemId, TreeItem};

/// Drop every row that has one of `hidden_root_ids` among its ancestors.
///
/// The hidden roots themselves stay. Surviving rows are returned unchanged,
/// so their `depth`, `parent_id` and `index` still describe the full forest.
/// Expects pre-order input, where a parent always precedes its descendants.
pub fn remove_children_of(
    flat: &[FlattenedItem],
    hidden_root_ids: impl IntoIterator<Item = ItemId>,
) -> Vec<FlattenedItem> {
    let mut excluded: HashSet<ItemId> = hidden_root_ids.into_iter().collect();
    if excluded.is_empty() {
        return flat.to_vec();
    }

    flat.iter()
        .filter(|row| match row.parent_id() {
            Some(parent_id) if excluded.contains(parent_id) => {
                excluded.insert(row.id().clone());
                false
            }
            _ => true,
        })
        .cloned()
        .collect()
}

/// Ids of rows whose children are currently folded away.
///
/// A collapsed leaf hides nothing and is not reported.
pub fn collapsed_ids(flat: &[FlattenedItem]) -> Vec<ItemId> {
    flat.iter()
        .filter(|row| row.is_collapsed() && row.has_children())
        .map(|row| row.id().clone())
        .collect()
}

/// The rows a list should display: the flattened forest without the children
/// of collapsed items and, while dragging, without the dragged item's
/// descendants.
pub fn visible_items(items: &[TreeItem], active_id: Option<&ItemId>) -> Vec<FlattenedItem> {
    let flat = flatten_tree(items);
    let mut hidden = collapsed_ids(&flat);
    if let Some(active_id) = active_id {
        hidden.push(active_id.clone());
    }
    remove_children_of(&flat, hidden)
}
