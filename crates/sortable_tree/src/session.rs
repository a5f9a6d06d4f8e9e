use crate::config::IndentationWidth;
use crate::item::{FlattenedItem, ItemId};
use crate::projection::{Projection, get_projection};

/// Where the dragged item was when the gesture began.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartPosition {
    pub parent_id: Option<ItemId>,
    pub over_id: ItemId,
}

/// State of one drag gesture.
///
/// Values are never edited in place: every pointer event produces a new
/// session that replaces the previous one, and the session is dropped when the
/// gesture ends or is cancelled.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    active_id: ItemId,
    over_id: Option<ItemId>,
    offset_left: f64,
    start: StartPosition,
}

impl DragSession {
    /// Begin dragging `active`. The item starts out hovering itself.
    pub fn start(active: &FlattenedItem) -> Self {
        Self {
            active_id: active.id().clone(),
            over_id: Some(active.id().clone()),
            offset_left: 0.0,
            start: StartPosition {
                parent_id: active.parent_id().cloned(),
                over_id: active.id().clone(),
            },
        }
    }

    /// Replace the horizontal pointer offset measured from the drag origin.
    pub fn moved(self, offset_left: f64) -> Self {
        Self {
            offset_left,
            ..self
        }
    }

    /// Replace the hovered item; `None` when the pointer is over no item.
    pub fn over(self, over_id: Option<ItemId>) -> Self {
        Self { over_id, ..self }
    }

    #[inline]
    pub fn active_id(&self) -> &ItemId {
        &self.active_id
    }

    #[inline]
    pub fn over_id(&self) -> Option<&ItemId> {
        self.over_id.as_ref()
    }

    #[inline]
    pub fn offset_left(&self) -> f64 {
        self.offset_left
    }

    #[inline]
    pub fn start_position(&self) -> &StartPosition {
        &self.start
    }

    /// Project this session onto the visible rows.
    pub fn projection(
        &self,
        visible: &[FlattenedItem],
        indentation_width: IndentationWidth,
    ) -> Option<Projection> {
        let over_id = self.over_id.as_ref()?;
        get_projection(
            visible,
            &self.active_id,
            over_id,
            self.offset_left,
            indentation_width,
        )
    }
}

/// Drag lifecycle transitions reported back to the host, which owns any
/// presentation side effects (cursor, animations).
#[derive(Clone, Debug, PartialEq)]
pub enum DragPhase {
    Started { active_id: ItemId },
    Updated { projection: Option<Projection> },
    /// `moved` is true when the drop changed the forest.
    Ended { moved: bool },
    Cancelled,
}
