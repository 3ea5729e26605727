//! The contract shared by every selection model.

use crate::error::Result;
use crate::permutation::Permutation;
use crate::set::SelectionSet;

/// Public operations of a list selection model.
///
/// Implemented by [`SelectionModel`](crate::SelectionModel),
/// [`SingleSelectionModel`](crate::SingleSelectionModel) and
/// [`CheckSelectModel`](crate::CheckSelectModel). Every mutating call emits
/// at most one change notification, and none if it fails or changes nothing.
pub trait ListSelection {
    /// Current state.
    fn selection(&self) -> &SelectionSet;

    /// Whether more than one index can be selected.
    fn is_multiple(&self) -> bool;

    fn length(&self) -> usize {
        self.selection().length()
    }

    /// Selected indices, ascending.
    fn selected_indexes(&self) -> Vec<usize> {
        self.selection().selected_indexes()
    }

    /// The lowest selected index.
    fn selected_index(&self) -> Option<usize> {
        self.selection().first()
    }

    fn selected_count(&self) -> usize {
        self.selection().count()
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selection().contains(index)
    }

    fn lead_index(&self) -> Option<usize> {
        self.selection().lead()
    }

    fn anchor_index(&self) -> Option<usize> {
        self.selection().anchor()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn select(&mut self, index: usize) -> Result<()>;

    fn deselect(&mut self, index: usize) -> Result<()>;

    fn toggle(&mut self, index: usize) -> Result<()>;

    fn set_index_selected(&mut self, index: usize, selected: bool) -> Result<()> {
        if selected {
            self.select(index)
        } else {
            self.deselect(index)
        }
    }

    /// Select the inclusive range between `anchor` and `index`. Lead and
    /// anchor are left where they are.
    fn select_range(&mut self, anchor: usize, index: usize) -> Result<()>;

    /// Make `index` the only selected item, and the lead and anchor.
    fn select_only(&mut self, index: usize) -> Result<()>;

    /// Replace the selection. Lead and anchor move to the first given index.
    fn set_selected_indexes(&mut self, indexes: &[usize]) -> Result<()>;

    fn select_all(&mut self);

    /// Deselect everything; lead and anchor stay.
    fn unselect_all(&mut self);

    /// Shrink to zero length, dropping selection, lead and anchor.
    fn clear(&mut self);

    // -------------------------------------------------------------------------
    // Lead / anchor
    // -------------------------------------------------------------------------

    fn set_lead_index(&mut self, index: Option<usize>) -> Result<()>;

    fn set_anchor_index(&mut self, index: Option<usize>) -> Result<()>;

    // -------------------------------------------------------------------------
    // List mutations
    // -------------------------------------------------------------------------

    /// Resize without reordering.
    fn adjust_length(&mut self, length: usize);

    /// Follow a list mutation described by `permutation`. The new length is
    /// derived from the permutation.
    fn adjust_to_reordering(&mut self, permutation: &Permutation) -> Result<()>;

    /// Follow a list mutation, with the new length given explicitly.
    fn adjust_to_reordering_with_length(
        &mut self,
        permutation: &Permutation,
        length: usize,
    ) -> Result<()>;

    // -------------------------------------------------------------------------
    // Batching
    // -------------------------------------------------------------------------

    /// Hold notifications until the matching [`end_change`](Self::end_change).
    fn begin_change(&mut self);

    fn end_change(&mut self);

    // -------------------------------------------------------------------------
    // Check-select
    // -------------------------------------------------------------------------

    /// Whether the model is in check-select mode. Always false unless the
    /// model supports it.
    fn check_select_mode(&self) -> bool {
        false
    }

    /// Request check-select mode. Ignored unless the model supports it.
    fn set_check_select_mode(&mut self, _enabled: bool) {}
}
