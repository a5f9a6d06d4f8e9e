use serde::{Deserialize, Serialize};

use crate::error::TreeError;

pub const DEFAULT_INDENTATION_WIDTH: f64 = 50.0;

fn default_indentation_width() -> f64 {
    DEFAULT_INDENTATION_WIDTH
}

/// Horizontal distance, in pointer units, that corresponds to one depth level.
///
/// Always positive and finite.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct IndentationWidth(f64);

impl IndentationWidth {
    pub fn new(width: f64) -> Result<Self, TreeError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(TreeError::InvalidIndentationWidth(width));
        }
        Ok(Self(width))
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Number of depth levels covered by a horizontal offset, rounding halves up.
    ///
    /// Huge offsets saturate at half of `isize`'s range so callers can add a
    /// depth without overflowing.
    pub fn depth_delta(self, offset_left: f64) -> isize {
        const LIMIT: isize = isize::MAX / 2;

        if !offset_left.is_finite() {
            return 0;
        }
        let steps = offset_left / self.0;
        let whole = steps.floor();
        // `steps + 0.5` can round up on its own, so compare the fraction instead.
        let rounded = if steps - whole >= 0.5 { whole + 1.0 } else { whole };
        (rounded as isize).clamp(-LIMIT, LIMIT)
    }
}

impl Default for IndentationWidth {
    fn default() -> Self {
        Self(DEFAULT_INDENTATION_WIDTH)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SortableTreeConfig {
    #[serde(default = "default_indentation_width")]
    pub indentation_width: f64,
    /// Items with children can be collapsed and expanded.
    #[serde(default)]
    pub collapsible: bool,
    #[serde(default)]
    pub removable: bool,
    /// Render the dragged row as a drop indicator line instead of a ghost row.
    #[serde(default)]
    pub indicator: bool,
}

impl Default for SortableTreeConfig {
    fn default() -> Self {
        Self {
            indentation_width: DEFAULT_INDENTATION_WIDTH,
            collapsible: false,
            removable: false,
            indicator: false,
        }
    }
}

impl SortableTreeConfig {
    pub fn validate(&self) -> Result<IndentationWidth, TreeError> {
        IndentationWidth::new(self.indentation_width)
    }
}
