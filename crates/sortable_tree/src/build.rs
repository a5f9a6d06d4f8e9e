use std::collections::HashMap;

use crate::error::TreeError;
use crate::item::{FlattenedItem, ItemId, TreeItem};

/// Rebuild the nested forest from a flat sequence.
///
/// Rows are attached to their `parent_id` in sequence order, so every parent
/// must appear before its children. `depth` and `index` are ignored; the
/// parent links alone define the structure. A row whose parent has not been
/// seen yet fails with [`TreeError::MissingParent`], and a repeated id with
/// [`TreeError::DuplicateId`]. Nothing is silently promoted to a root.
pub fn build_tree(flat: &[FlattenedItem]) -> Result<Vec<TreeItem>, TreeError> {
    let mut slots: HashMap<&ItemId, usize> = HashMap::with_capacity(flat.len());
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    let mut roots = Vec::new();

    for (ix, row) in flat.iter().enumerate() {
        if slots.contains_key(&row.id) {
            return Err(TreeError::DuplicateId(row.id.clone()));
        }

        match row.parent_id.as_ref() {
            None => roots.push(ix),
            Some(parent_id) => {
                let Some(&parent_ix) = slots.get(parent_id) else {
                    return Err(TreeError::MissingParent {
                        id: row.id.clone(),
                        parent_id: parent_id.clone(),
                    });
                };
                children[parent_ix].push(ix);
            }
        }

        slots.insert(&row.id, ix);
    }

    Ok(roots
        .into_iter()
        .map(|ix| assemble(flat, &children, ix))
        .collect())
}

fn assemble(flat: &[FlattenedItem], children: &[Vec<usize>], ix: usize) -> TreeItem {
    let row = &flat[ix];
    TreeItem {
        id: row.id.clone(),
        children: children[ix]
            .iter()
            .map(|&child_ix| assemble(flat, children, child_ix))
            .collect(),
        collapsed: row.collapsed,
    }
}
