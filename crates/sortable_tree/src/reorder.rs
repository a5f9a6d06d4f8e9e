use std::ops::Range;

use crate::item::FlattenedItem;

/// Return a copy of `items` with the element at `from` moved to `to`, shifting
/// the elements in between. Out-of-range indices leave the order unchanged
/// (`to` is clamped to the last slot).
pub fn move_element<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut out = items.to_vec();
    if from >= out.len() {
        return out;
    }
    let to = to.min(out.len() - 1);
    if from != to {
        let item = out.remove(from);
        out.insert(to, item);
    }
    out
}

/// End (exclusive) of the subtree that starts at `start_ix`, judged by depth.
pub(crate) fn subtree_end_ix(flat: &[FlattenedItem], start_ix: usize) -> usize {
    let item_count = flat.len();
    let start_depth = flat[start_ix].depth;
    let mut ix = start_ix + 1;
    while ix < item_count && flat[ix].depth > start_depth {
        ix += 1;
    }
    ix
}

/// Move the row at `from` together with its descendants so that the row lands
/// where [`move_element`] would put it, then renumber `index`.
///
/// Returns the new range of the moved block, or `None` when an index is out of
/// range or `to` points inside the moved subtree.
pub fn move_subtree(
    flat: &mut Vec<FlattenedItem>,
    from: usize,
    to: usize,
) -> Option<Range<usize>> {
    if from >= flat.len() || to >= flat.len() {
        return None;
    }

    let end = subtree_end_ix(flat, from);
    if to == from {
        return Some(from..end);
    }
    if (from..end).contains(&to) {
        return None;
    }

    let block: Vec<FlattenedItem> = flat.drain(from..end).collect();
    let len = block.len();
    let insert_at = if to < from { to } else { to + 1 - len };
    flat.splice(insert_at..insert_at, block);

    for (ix, row) in flat.iter_mut().enumerate() {
        row.index = ix;
    }
    Some(insert_at..insert_at + len)
}
