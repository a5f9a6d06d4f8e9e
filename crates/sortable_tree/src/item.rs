use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TreeError;

/// Opaque identity of a tree item, unique across the whole forest.
///
/// Cloning is cheap; the text is shared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(Arc<str>);

impl ItemId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id.into())
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string().into())
    }
}

// Host data may use numeric ids; they are kept as their decimal text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItemId {
    Text(String),
    Number(u64),
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawItemId::deserialize(deserializer)? {
            RawItemId::Text(text) => Self::from(text),
            RawItemId::Number(number) => Self::from(number),
        })
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node of the nested forest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub id: ItemId,
    #[serde(default)]
    pub children: Vec<TreeItem>,
    /// Display hint only; a collapsed item keeps its children.
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
}

impl TreeItem {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
            collapsed: false,
        }
    }

    pub fn child(mut self, child: TreeItem) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl Into<Vec<TreeItem>>) -> Self {
        self.children.extend(children.into());
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One row of the pre-order linearization of a forest.
///
/// Carries the item's own attributes plus its position in the forest. The
/// subtree itself is not cloned into the row; only the number of direct
/// children is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlattenedItem {
    pub(crate) id: ItemId,
    pub(crate) parent_id: Option<ItemId>,
    pub(crate) depth: usize,
    pub(crate) index: usize,
    pub(crate) collapsed: bool,
    pub(crate) children_len: usize,
}

impl FlattenedItem {
    /// Build a row by hand. Rows produced this way are not checked against
    /// each other; `build_tree` reports inconsistencies.
    pub fn new(
        id: impl Into<ItemId>,
        parent_id: Option<ItemId>,
        depth: usize,
        index: usize,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id,
            depth,
            index,
            collapsed: false,
            children_len: 0,
        }
    }

    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    #[inline]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    #[inline]
    pub fn parent_id(&self) -> Option<&ItemId> {
        self.parent_id.as_ref()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.children_len > 0
    }

    #[inline]
    pub fn children_len(&self) -> usize {
        self.children_len
    }
}

/// Check that no id appears twice anywhere in `items`.
pub fn validate_unique_ids(items: &[TreeItem]) -> Result<(), TreeError> {
    fn walk<'a>(items: &'a [TreeItem], seen: &mut HashSet<&'a ItemId>) -> Result<(), TreeError> {
        for item in items {
            if !seen.insert(&item.id) {
                return Err(TreeError::DuplicateId(item.id.clone()));
            }
            walk(&item.children, seen)?;
        }
        Ok(())
    }

    walk(items, &mut HashSet::new())
}
