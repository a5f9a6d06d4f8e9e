use crate::item::{FlattenedItem, ItemId, TreeItem};

/// Linearize a forest in depth-first pre-order.
///
/// Roots get depth 0 and no parent; every child sits one level below its
/// parent and keeps its sibling order. `index` is the row's position in the
/// returned vector.
pub fn flatten_tree(items: &[TreeItem]) -> Vec<FlattenedItem> {
    let mut out = Vec::new();
    add_entries(items, 0, None, &mut out);
    out
}

fn add_entries(
    items: &[TreeItem],
    depth: usize,
    parent_id: Option<&ItemId>,
    out: &mut Vec<FlattenedItem>,
) {
    for item in items {
        let index = out.len();
        out.push(FlattenedItem {
            id: item.id.clone(),
            parent_id: parent_id.cloned(),
            depth,
            index,
            collapsed: item.collapsed,
            children_len: item.children.len(),
        });
        add_entries(&item.children, depth + 1, Some(&item.id), out);
    }
}
