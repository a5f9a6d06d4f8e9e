use crate::item::{FlattenedItem, ItemId, TreeItem};

/// A field of [`TreeItem`] that [`set_property`] can replace.
pub trait ItemField {
    type Value;

    fn slot(item: &mut TreeItem) -> &mut Self::Value;
}

/// The `collapsed` display flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct Collapsed;

impl ItemField for Collapsed {
    type Value = bool;

    fn slot(item: &mut TreeItem) -> &mut bool {
        &mut item.collapsed
    }
}

/// The ordered child list.
#[derive(Clone, Copy, Debug, Default)]
pub struct Children;

impl ItemField for Children {
    type Value = Vec<TreeItem>;

    fn slot(item: &mut TreeItem) -> &mut Vec<TreeItem> {
        &mut item.children
    }
}

/// Return a forest without the item `id` and its subtree. Unknown ids leave
/// the forest as it was.
pub fn remove_item(items: &[TreeItem], id: &ItemId) -> Vec<TreeItem> {
    items
        .iter()
        .filter(|item| item.id != *id)
        .map(|item| TreeItem {
            id: item.id.clone(),
            children: remove_item(&item.children, id),
            collapsed: item.collapsed,
        })
        .collect()
}

/// Return a forest where `F` of the item `id` is replaced by
/// `update(&current)`. Unknown ids leave the forest as it was.
pub fn set_property<F, U>(items: &[TreeItem], id: &ItemId, _field: F, update: U) -> Vec<TreeItem>
where
    F: ItemField,
    U: FnOnce(&F::Value) -> F::Value,
{
    let mut out = items.to_vec();
    let mut update = Some(update);
    update_in_place::<F, U>(&mut out, id, &mut update);
    out
}

fn update_in_place<F, U>(items: &mut [TreeItem], id: &ItemId, update: &mut Option<U>) -> bool
where
    F: ItemField,
    U: FnOnce(&F::Value) -> F::Value,
{
    for item in items.iter_mut() {
        if item.id == *id {
            if let Some(update) = update.take() {
                let slot = F::slot(item);
                *slot = update(slot);
            }
            return true;
        }
        if update_in_place::<F, U>(&mut item.children, id, update) {
            return true;
        }
    }
    false
}

/// Row for `id` in a flattened sequence.
pub fn find_item<'a>(flat: &'a [FlattenedItem], id: &ItemId) -> Option<&'a FlattenedItem> {
    flat.iter().find(|row| row.id() == id)
}

pub fn find_item_deep<'a>(items: &'a [TreeItem], id: &ItemId) -> Option<&'a TreeItem> {
    for item in items {
        if item.id == *id {
            return Some(item);
        }
        if let Some(found) = find_item_deep(&item.children, id) {
            return Some(found);
        }
    }
    None
}

/// Number of descendants of `id`; 0 for leaves and unknown ids.
pub fn child_count(items: &[TreeItem], id: &ItemId) -> usize {
    fn count(items: &[TreeItem]) -> usize {
        items
            .iter()
            .map(|item| 1 + count(&item.children))
            .sum()
    }

    find_item_deep(items, id).map_or(0, |item| count(&item.children))
}
