use crate::config::IndentationWidth;
use crate::item::{FlattenedItem, ItemId};
use crate::reorder::move_element;

/// Where the dragged item would land if it were dropped now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection {
    pub depth: usize,
    pub parent_id: Option<ItemId>,
    pub max_depth: usize,
    pub min_depth: usize,
}

/// Compute the legal depth and parent for an in-progress drag.
///
/// `flat` is the visible sequence, with the dragged item's descendants
/// already removed. The dragged item is placed at `over_id`'s slot and the
/// horizontal offset, measured in indentation steps, is added to its current
/// depth. The result is clamped between the depth of the row that would
/// follow it and one level below the row that would precede it; if those
/// bounds cross, the upper bound wins.
///
/// Returns `None` when `active_id` or `over_id` is not in `flat`.
pub fn get_projection(
    flat: &[FlattenedItem],
    active_id: &ItemId,
    over_id: &ItemId,
    offset_left: f64,
    indentation_width: IndentationWidth,
) -> Option<Projection> {
    let over_index = flat.iter().position(|row| row.id() == over_id)?;
    let active_index = flat.iter().position(|row| row.id() == active_id)?;
    let active_item = &flat[active_index];

    let new_items = move_element(flat, active_index, over_index);
    let previous_item = over_index
        .checked_sub(1)
        .and_then(|ix| new_items.get(ix));
    let next_item = new_items.get(over_index + 1);

    let drag_depth = indentation_width.depth_delta(offset_left);
    let projected_depth = (active_item.depth() as isize).saturating_add(drag_depth);
    let max_depth = previous_item.map_or(0, |item| item.depth() + 1);
    let min_depth = next_item.map_or(0, FlattenedItem::depth);

    // Applied in this order so that `max_depth` wins when the bounds cross.
    let depth = projected_depth
        .max(min_depth as isize)
        .min(max_depth as isize) as usize;

    let parent_id = resolve_parent_id(&new_items, over_index, previous_item, depth);

    tracing::trace!(
        target: "sortable_tree::projection",
        active = %active_id,
        over = %over_id,
        drag_depth,
        min_depth,
        max_depth,
        depth,
        "projected drag position"
    );

    Some(Projection {
        depth,
        parent_id,
        max_depth,
        min_depth,
    })
}

fn resolve_parent_id(
    new_items: &[FlattenedItem],
    over_index: usize,
    previous_item: Option<&FlattenedItem>,
    depth: usize,
) -> Option<ItemId> {
    let previous_item = match previous_item {
        Some(item) if depth > 0 => item,
        _ => return None,
    };

    if depth == previous_item.depth() {
        return previous_item.parent_id().cloned();
    }
    if depth > previous_item.depth() {
        return Some(previous_item.id().clone());
    }

    new_items[..over_index]
        .iter()
        .rev()
        .find(|item| item.depth() == depth)
        .and_then(|item| item.parent_id().cloned())
}
