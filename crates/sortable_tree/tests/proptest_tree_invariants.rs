//! Property-based invariant tests for flattening, filtering, projection and
//! rebuilding.
//!
//! 1. build_tree(flatten_tree(t)) == t, collapsed flags included.
//! 2. depth == 0 iff parent is None, otherwise parent depth + 1.
//! 3. index equals position and every subtree is a contiguous run after its root.
//! 4. remove_children_of is idempotent.
//! 5. Projected depth stays within its bounds for any finite offset and width,
//!    and depth 0 means no parent.
//! 6. A full drag gesture keeps the same set of ids and a valid forest.
//! 7. remove_item leaves no trace of the removed subtree.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use proptest::sample::Index;
use sortable_tree::{
    FlattenedItem, IndentationWidth, ItemId, SortableTreeState, TreeItem, build_tree, child_count,
    flatten_tree, get_projection, remove_children_of, remove_item, validate_unique_ids,
};

// ── Helpers ─────────────────────────────────────────────────────────────

/// Each entry describes one node: an optional pick among the earlier nodes as
/// its parent, and its collapsed flag.
fn forest_shape(max_len: usize) -> impl Strategy<Value = Vec<(Option<Index>, bool)>> {
    proptest::collection::vec((proptest::option::of(any::<Index>()), any::<bool>()), 0..=max_len)
}

fn forest_from_shape(shape: &[(Option<Index>, bool)]) -> Vec<TreeItem> {
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); shape.len()];
    let mut roots = Vec::new();
    for (ix, (parent, _)) in shape.iter().enumerate() {
        match parent {
            Some(parent) if ix > 0 => children[parent.index(ix)].push(ix),
            _ => roots.push(ix),
        }
    }

    fn make(ix: usize, shape: &[(Option<Index>, bool)], children: &[Vec<usize>]) -> TreeItem {
        TreeItem::new(format!("n{ix}"))
            .collapsed(shape[ix].1)
            .children(
                children[ix]
                    .iter()
                    .map(|&child| make(child, shape, children))
                    .collect::<Vec<_>>(),
            )
    }

    roots
        .into_iter()
        .map(|ix| make(ix, shape, &children))
        .collect()
}

/// Mostly pointer-sized offsets, sometimes any finite value.
fn any_offset() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => -400.0f64..400.0,
        1 => any::<f64>().prop_filter("finite offset", |x| x.is_finite()),
    ]
}

fn any_width() -> impl Strategy<Value = f64> {
    prop_oneof![3 => 1.0f64..80.0, 1 => 1e-12f64..1e-3]
}

fn all_ids(items: &[TreeItem]) -> BTreeSet<ItemId> {
    flatten_tree(items).into_iter().map(|row| row.id().clone()).collect()
}

fn ancestors<'a>(flat: &'a [FlattenedItem], row: &'a FlattenedItem) -> Vec<&'a ItemId> {
    let by_id: HashMap<&ItemId, &FlattenedItem> = flat.iter().map(|r| (r.id(), r)).collect();
    let mut out = Vec::new();
    let mut current = row.parent_id();
    while let Some(parent_id) = current {
        out.push(parent_id);
        current = by_id.get(parent_id).copied().and_then(FlattenedItem::parent_id);
    }
    out
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rebuild_inverts_flatten(shape in forest_shape(40)) {
        let items = forest_from_shape(&shape);
        let rebuilt = build_tree(&flatten_tree(&items)).unwrap();
        prop_assert_eq!(rebuilt, items);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Depth and pre-order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn depth_follows_parent_chain(shape in forest_shape(40)) {
        let flat = flatten_tree(&forest_from_shape(&shape));
        let depth_of: HashMap<&ItemId, usize> =
            flat.iter().map(|row| (row.id(), row.depth())).collect();

        for row in &flat {
            match row.parent_id() {
                None => prop_assert_eq!(row.depth(), 0),
                Some(parent_id) => {
                    prop_assert!(row.depth() > 0);
                    prop_assert_eq!(row.depth(), depth_of[parent_id] + 1);
                }
            }
        }
    }

    #[test]
    fn subtrees_are_contiguous(shape in forest_shape(40)) {
        let items = forest_from_shape(&shape);
        let flat = flatten_tree(&items);
        let position: HashMap<&ItemId, usize> =
            flat.iter().enumerate().map(|(ix, row)| (row.id(), ix)).collect();

        for (ix, row) in flat.iter().enumerate() {
            prop_assert_eq!(row.index(), ix);
            if let Some(parent_id) = row.parent_id() {
                prop_assert!(position[parent_id] < ix);
            }

            let descendants = child_count(&items, row.id());
            for follower in &flat[ix + 1..ix + 1 + descendants] {
                prop_assert!(
                    ancestors(&flat, follower).contains(&row.id()),
                    "{} should sit inside the subtree of {}", follower.id(), row.id()
                );
            }
            if let Some(next) = flat.get(ix + 1 + descendants) {
                prop_assert!(!ancestors(&flat, next).contains(&row.id()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Visibility filter idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn filter_is_idempotent(
        shape in forest_shape(40),
        hidden in proptest::collection::vec(any::<Index>(), 0..5),
    ) {
        let flat = flatten_tree(&forest_from_shape(&shape));
        prop_assume!(!flat.is_empty());
        let hidden: Vec<ItemId> = hidden
            .iter()
            .map(|ix| flat[ix.index(flat.len())].id().clone())
            .collect();

        let once = remove_children_of(&flat, hidden.clone());
        let twice = remove_children_of(&once, hidden.clone());
        prop_assert_eq!(&once, &twice);

        for row in &once {
            for ancestor in ancestors(&flat, row) {
                prop_assert!(!hidden.contains(ancestor));
            }
        }
        for row in &flat {
            let outermost = hidden.contains(row.id())
                && !ancestors(&flat, row).into_iter().any(|ancestor| hidden.contains(ancestor));
            if outermost {
                prop_assert!(once.iter().any(|kept| kept.id() == row.id()));
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Projection bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn projection_respects_bounds(
        shape in forest_shape(30),
        active in any::<Index>(),
        over in any::<Index>(),
        offset_left in any_offset(),
        width in any_width(),
    ) {
        let flat = flatten_tree(&forest_from_shape(&shape));
        prop_assume!(!flat.is_empty());
        let active_id = flat[active.index(flat.len())].id().clone();
        let visible = remove_children_of(&flat, [active_id.clone()]);
        let over_id = visible[over.index(visible.len())].id().clone();

        let projection = get_projection(
            &visible,
            &active_id,
            &over_id,
            offset_left,
            IndentationWidth::new(width).unwrap(),
        )
        .unwrap();

        prop_assert!(projection.min_depth <= projection.max_depth);
        prop_assert!(projection.depth >= projection.min_depth);
        prop_assert!(projection.depth <= projection.max_depth);
        prop_assert_eq!(projection.depth == 0, projection.parent_id.is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Full gesture keeps a valid forest
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drop_preserves_ids(
        shape in forest_shape(30),
        active in any::<Index>(),
        over in any::<Index>(),
        offset_left in any_offset(),
    ) {
        let items = forest_from_shape(&shape);
        let ids_before = all_ids(&items);
        let mut state = SortableTreeState::new(items).unwrap();

        let visible: Vec<ItemId> =
            state.visible_items().iter().map(|row| row.id().clone()).collect();
        prop_assume!(!visible.is_empty());
        let active_id = visible[active.index(visible.len())].clone();
        state.drag_start(&active_id).unwrap();

        let over_candidates: Vec<ItemId> =
            state.visible_items().iter().map(|row| row.id().clone()).collect();
        let over_id = over_candidates[over.index(over_candidates.len())].clone();
        state.drag_over(Some(over_id)).unwrap();
        state.drag_move(offset_left).unwrap();
        let projection = state.projection().unwrap();
        state.drag_end().unwrap();

        prop_assert!(validate_unique_ids(state.items()).is_ok());
        prop_assert_eq!(all_ids(state.items()), ids_before);

        let flat = flatten_tree(state.items());
        let landed = flat.iter().find(|row| *row.id() == active_id).unwrap();
        prop_assert_eq!(landed.depth(), projection.depth);
        prop_assert_eq!(landed.parent_id(), projection.parent_id.as_ref());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Removal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removal_drops_whole_subtree(shape in forest_shape(40), pick in any::<Index>()) {
        let items = forest_from_shape(&shape);
        let flat = flatten_tree(&items);
        prop_assume!(!flat.is_empty());
        let id = flat[pick.index(flat.len())].id().clone();
        let removed_count = 1 + child_count(&items, &id);

        let remaining = flatten_tree(&remove_item(&items, &id));
        prop_assert_eq!(remaining.len(), flat.len() - removed_count);
        for row in &remaining {
            prop_assert!(row.id() != &id);
            prop_assert!(!ancestors(&remaining, row).contains(&&id));
        }
    }
}
