use crate::build::build_tree;
use crate::config::{IndentationWidth, SortableTreeConfig};
use crate::error::TreeError;
use crate::flatten::flatten_tree;
use crate::item::{FlattenedItem, ItemId, TreeItem, validate_unique_ids};
use crate::mutate::{
    Collapsed, child_count, find_item, find_item_deep, remove_item, set_property,
};
use crate::projection::Projection;
use crate::reorder::move_subtree;
use crate::session::{DragPhase, DragSession};
use crate::visible::visible_items;

/// What a row renderer needs to know about one visible item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub id: ItemId,
    /// Projected depth for the dragged item, the real depth otherwise.
    pub depth: usize,
    /// Collapsed and actually hiding children.
    pub collapsed: bool,
    pub can_collapse: bool,
    pub can_remove: bool,
    /// This is the item being dragged.
    pub ghost: bool,
    pub indicator: bool,
    /// Number of descendants travelling with the dragged item.
    pub child_count: Option<usize>,
}

struct VisibleCache {
    revision: u64,
    active_id: Option<ItemId>,
    rows: Vec<FlattenedItem>,
}

/// Host-side model of a sortable tree: owns the forest and the drag gesture.
pub struct SortableTreeState {
    items: Vec<TreeItem>,
    config: SortableTreeConfig,
    indentation_width: IndentationWidth,
    revision: u64,
    session: Option<DragSession>,
    visible_cache: Option<VisibleCache>,
}

impl SortableTreeState {
    pub fn new(items: impl Into<Vec<TreeItem>>) -> Result<Self, TreeError> {
        Self::with_config(items, SortableTreeConfig::default())
    }

    pub fn with_config(
        items: impl Into<Vec<TreeItem>>,
        config: SortableTreeConfig,
    ) -> Result<Self, TreeError> {
        let indentation_width = config.validate()?;
        let items = items.into();
        validate_unique_ids(&items)?;
        Ok(Self {
            items,
            config,
            indentation_width,
            revision: 0,
            session: None,
            visible_cache: None,
        })
    }

    /// Set the indentation width used to turn horizontal movement into depth.
    ///
    /// This should match the indentation used by your row renderer.
    pub fn indentation_width(mut self, width: f64) -> Result<Self, TreeError> {
        self.indentation_width = IndentationWidth::new(width)?;
        self.config.indentation_width = width;
        Ok(self)
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.config.collapsible = collapsible;
        self
    }

    pub fn removable(mut self, removable: bool) -> Self {
        self.config.removable = removable;
        self
    }

    pub fn indicator(mut self, indicator: bool) -> Self {
        self.config.indicator = indicator;
        self
    }

    pub fn config(&self) -> &SortableTreeConfig {
        &self.config
    }

    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    /// Replace the forest. Any drag in progress is abandoned.
    pub fn set_items(&mut self, items: impl Into<Vec<TreeItem>>) -> Result<(), TreeError> {
        let items = items.into();
        validate_unique_ids(&items)?;
        self.items = items;
        self.session = None;
        self.bump_revision();
        Ok(())
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Rows to display: collapsed children and the dragged item's descendants
    /// are left out. Recomputed only when the forest or the dragged item
    /// changes.
    pub fn visible_items(&mut self) -> &[FlattenedItem] {
        let active_id = self.session.as_ref().map(|s| s.active_id().clone());
        let fresh = self
            .visible_cache
            .as_ref()
            .is_some_and(|cache| cache.revision == self.revision && cache.active_id == active_id);
        if !fresh {
            self.visible_cache = None;
        }

        let cache = self.visible_cache.get_or_insert_with(|| VisibleCache {
            revision: self.revision,
            rows: visible_items(&self.items, active_id.as_ref()),
            active_id,
        });
        &cache.rows
    }

    /// Projection for the current drag, if any.
    pub fn projection(&mut self) -> Option<Projection> {
        let session = self.session.clone()?;
        let indentation_width = self.indentation_width;
        session.projection(self.visible_items(), indentation_width)
    }

    pub fn drag_start(&mut self, active_id: &ItemId) -> Option<DragPhase> {
        self.session = None;
        let active = find_item(self.visible_items(), active_id)?;
        let session = DragSession::start(active);

        tracing::debug!(
            target: "sortable_tree::drag",
            active = %active_id,
            parent = ?session.start_position().parent_id,
            "drag started"
        );
        self.session = Some(session);
        Some(DragPhase::Started {
            active_id: active_id.clone(),
        })
    }

    /// Record the pointer's horizontal distance from where the drag began.
    pub fn drag_move(&mut self, delta_x: f64) -> Option<DragPhase> {
        let session = self.session.take()?;
        self.session = Some(session.moved(delta_x));
        Some(DragPhase::Updated {
            projection: self.projection(),
        })
    }

    pub fn drag_over(&mut self, over_id: Option<ItemId>) -> Option<DragPhase> {
        let session = self.session.take()?;
        self.session = Some(session.over(over_id));
        Some(DragPhase::Updated {
            projection: self.projection(),
        })
    }

    /// Finish the gesture and apply the latest projection.
    pub fn drag_end(&mut self) -> Option<DragPhase> {
        let projection = self.projection();
        let session = self.session.take()?;

        let moved = match (projection, session.over_id()) {
            (Some(projection), Some(over_id)) => {
                match self.apply_drop(session.active_id(), over_id, &projection) {
                    Ok(moved) => moved,
                    Err(err) => {
                        tracing::warn!(
                            target: "sortable_tree::drag",
                            active = %session.active_id(),
                            "drop rejected: {err}"
                        );
                        false
                    }
                }
            }
            _ => false,
        };

        tracing::debug!(
            target: "sortable_tree::drag",
            active = %session.active_id(),
            moved,
            "drag ended"
        );
        Some(DragPhase::Ended { moved })
    }

    pub fn drag_cancel(&mut self) -> Option<DragPhase> {
        let session = self.session.take()?;
        tracing::debug!(
            target: "sortable_tree::drag",
            active = %session.active_id(),
            "drag cancelled"
        );
        Some(DragPhase::Cancelled)
    }

    fn apply_drop(
        &mut self,
        active_id: &ItemId,
        over_id: &ItemId,
        projection: &Projection,
    ) -> Result<bool, TreeError> {
        let mut flat = flatten_tree(&self.items);
        let Some(active_ix) = flat.iter().position(|row| row.id() == active_id) else {
            return Ok(false);
        };
        let Some(over_ix) = flat.iter().position(|row| row.id() == over_id) else {
            return Ok(false);
        };

        let old_depth = flat[active_ix].depth;
        let Some(block) = move_subtree(&mut flat, active_ix, over_ix) else {
            return Ok(false);
        };

        flat[block.start].parent_id = projection.parent_id.clone();
        for row in &mut flat[block] {
            row.depth = row.depth - old_depth + projection.depth;
        }

        let items = build_tree(&flat)?;
        if items == self.items {
            return Ok(false);
        }

        tracing::debug!(
            target: "sortable_tree::drag",
            active = %active_id,
            over = %over_id,
            depth = projection.depth,
            parent = ?projection.parent_id,
            "applied drop"
        );
        self.items = items;
        self.bump_revision();
        Ok(true)
    }

    /// Remove `id` and its subtree. Only allowed when the tree is removable.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        if !self.config.removable || find_item_deep(&self.items, id).is_none() {
            return false;
        }
        self.items = remove_item(&self.items, id);
        self.bump_revision();
        true
    }

    /// Flip the collapsed flag of an item that has children. Only allowed when
    /// the tree is collapsible.
    pub fn toggle_collapse(&mut self, id: &ItemId) -> bool {
        if !self.config.collapsible
            || !find_item_deep(&self.items, id).is_some_and(TreeItem::has_children)
        {
            return false;
        }
        self.items = set_property(&self.items, id, Collapsed, |collapsed| !collapsed);
        self.bump_revision();
        true
    }

    pub fn rows(&mut self) -> Vec<TreeRow> {
        let projection = self.projection();
        let active_id = self.session.as_ref().map(|s| s.active_id().clone());
        let dragged_child_count = active_id
            .as_ref()
            .map(|id| child_count(&self.items, id));
        let SortableTreeConfig {
            collapsible,
            removable,
            indicator,
            ..
        } = self.config;

        self.visible_items()
            .iter()
            .map(|row| {
                let ghost = active_id.as_ref() == Some(row.id());
                let depth = match &projection {
                    Some(projection) if ghost => projection.depth,
                    _ => row.depth(),
                };
                TreeRow {
                    id: row.id().clone(),
                    depth,
                    collapsed: row.is_collapsed() && row.has_children(),
                    can_collapse: collapsible && row.has_children(),
                    can_remove: removable,
                    ghost,
                    indicator: indicator && ghost,
                    child_count: if ghost { dragged_child_count } else { None },
                }
            })
            .collect()
    }
}
