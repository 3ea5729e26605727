//! Model and controller configuration.

/// Construction-time settings for a selection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionConfig {
    /// Number of addressable indices at creation.
    pub length: usize,

    /// When a reordering removes every selected item, select the item now
    /// sitting at the old lead position (clamped to the last item) instead
    /// of leaving the selection empty.
    pub reselect_after_delete: bool,
}

impl SelectionConfig {
    /// Create a config for a list of `length` items.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    /// Enable the reselect-after-delete fallback.
    pub fn reselect_after_delete(mut self) -> Self {
        self.reselect_after_delete = true;
        self
    }
}

/// Layout knowledge the controller needs for keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Items per row. 1 for a plain list; more for a grid, where Up/Down move
    /// by a whole row and Left/Right by one item.
    pub columns: usize,

    /// Rows moved by PageUp/PageDown.
    pub page_size: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            columns: 1,
            page_size: 10,
        }
    }
}

impl ControllerConfig {
    /// Grid layout with `columns` items per row.
    pub fn grid(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Set the page size (in rows).
    pub fn page_size(mut self, rows: usize) -> Self {
        self.page_size = rows.max(1);
        self
    }
}
