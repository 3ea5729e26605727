//! Multi-select selection model.
//!
//! [`SelectionModel`] is the primary state machine: it selects, deselects and
//! toggles indices and ranges, follows list mutations through
//! [`Permutation`]s, and notifies listeners once per logical mutation.
//!
//! The mutation logic itself lives in [`Core`], which the single-select and
//! check-select models reuse without going through this type's listeners.

use crate::change::{self, Batch, Listener, ListenerId, Listeners, SelectionChange};
use crate::config::SelectionConfig;
use crate::error::Result;
use crate::permutation::Permutation;
use crate::set::SelectionSet;
use crate::traits::ListSelection;

// =============================================================================
// Core
// =============================================================================

/// Selection state plus batching. Every method runs inside a batch and
/// returns the change to deliver, if the outermost batch just closed.
#[derive(Debug, Default)]
pub(crate) struct Core {
    pub(crate) set: SelectionSet,
    batch: Batch,
    reselect_after_delete: bool,
}

impl Core {
    pub(crate) fn new(config: &SelectionConfig) -> Self {
        Self {
            set: SelectionSet::new(config.length),
            batch: Batch::default(),
            reselect_after_delete: config.reselect_after_delete,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.batch.begin(&self.set);
    }

    pub(crate) fn end(&mut self) -> Option<SelectionChange> {
        self.batch.end(&self.set)
    }

    /// Run `f` inside a batch.
    ///
    /// `f` must validate before it mutates: on error the set is expected to
    /// be untouched.
    pub(crate) fn apply<F>(&mut self, f: F) -> Result<Option<SelectionChange>>
    where
        F: FnOnce(&mut SelectionSet) -> Result<()>,
    {
        self.begin();
        let result = f(&mut self.set);
        let change = self.end();
        result.map(|()| change)
    }

    /// Like [`apply`](Self::apply) for operations that cannot fail.
    pub(crate) fn apply_infallible<F>(&mut self, f: F) -> Option<SelectionChange>
    where
        F: FnOnce(&mut SelectionSet),
    {
        self.begin();
        f(&mut self.set);
        self.end()
    }

    // -------------------------------------------------------------------------
    // Multi-select semantics
    // -------------------------------------------------------------------------

    pub(crate) fn select(&mut self, index: usize) -> Result<Option<SelectionChange>> {
        self.apply(|set| set.insert(index).map(drop))
    }

    pub(crate) fn deselect(&mut self, index: usize) -> Result<Option<SelectionChange>> {
        self.apply(|set| set.remove(index).map(drop))
    }

    pub(crate) fn toggle(&mut self, index: usize) -> Result<Option<SelectionChange>> {
        self.apply(|set| set.toggle(index).map(drop))
    }

    pub(crate) fn select_range(
        &mut self,
        anchor: usize,
        index: usize,
    ) -> Result<Option<SelectionChange>> {
        self.apply(|set| set.insert_range(anchor, index).map(drop))
    }

    pub(crate) fn select_only(&mut self, index: usize) -> Result<Option<SelectionChange>> {
        self.apply(|set| {
            set.check(index)?;
            set.replace(&[index])?;
            set.set_lead(Some(index))?;
            set.set_anchor(Some(index))
        })
    }

    pub(crate) fn set_selected_indexes(
        &mut self,
        indexes: &[usize],
    ) -> Result<Option<SelectionChange>> {
        self.apply(|set| {
            set.replace(indexes)?;
            let first = indexes.first().copied();
            set.set_lead(first)?;
            set.set_anchor(first)
        })
    }

    pub(crate) fn select_all(&mut self) -> Option<SelectionChange> {
        self.apply_infallible(|set| {
            set.insert_all();
        })
    }

    pub(crate) fn unselect_all(&mut self) -> Option<SelectionChange> {
        self.apply_infallible(|set| {
            set.clear_selected();
        })
    }

    pub(crate) fn clear(&mut self) -> Option<SelectionChange> {
        self.apply_infallible(SelectionSet::reset)
    }

    pub(crate) fn set_lead(&mut self, index: Option<usize>) -> Result<Option<SelectionChange>> {
        self.apply(|set| set.set_lead(index))
    }

    pub(crate) fn set_anchor(&mut self, index: Option<usize>) -> Result<Option<SelectionChange>> {
        self.apply(|set| set.set_anchor(index))
    }

    pub(crate) fn adjust_length(&mut self, length: usize) -> Option<SelectionChange> {
        self.apply_infallible(|set| set.set_length(length))
    }

    /// Remap through `permutation`, then apply the reselect fallback if
    /// configured.
    pub(crate) fn reorder(
        &mut self,
        permutation: &Permutation,
        length: Option<usize>,
    ) -> Result<Option<SelectionChange>> {
        let old_count = self.set.count();
        let old_lead = self.set.lead();
        let reselect = self.reselect_after_delete;

        self.apply(|set| {
            set.remap(permutation, length)?;
            if reselect && old_count > 0 && set.is_empty() && set.length() > 0 {
                if let Some(lead) = old_lead {
                    let index = lead.min(set.length() - 1);
                    log::debug!("all selected items removed, reselecting {}", index);
                    set.insert(index)?;
                    set.set_lead(Some(index))?;
                    set.set_anchor(Some(index))?;
                }
            }
            Ok(())
        })
    }
}

// =============================================================================
// SelectionModel
// =============================================================================

/// Multi-select list selection model.
///
/// ```
/// use listsel::{ListSelection, Permutation, SelectionModel};
///
/// let mut model = SelectionModel::new(5);
/// model.select(2).unwrap();
/// model.select(4).unwrap();
/// model.set_lead_index(Some(4)).unwrap();
///
/// // Old index 2 removed, everything after it shifts left.
/// model
///     .adjust_to_reordering(&Permutation::from_raw(&[0, 1, -1, 2, 3]).unwrap())
///     .unwrap();
/// assert_eq!(model.selected_indexes(), vec![3]);
/// assert_eq!(model.lead_index(), Some(3));
/// ```
#[derive(Debug, Default)]
pub struct SelectionModel {
    pub(crate) core: Core,
    listeners: Listeners<SelectionModel>,
}

impl SelectionModel {
    /// Create a model over `length` items with nothing selected.
    pub fn new(length: usize) -> Self {
        Self::with_config(&SelectionConfig::new(length))
    }

    pub fn with_config(config: &SelectionConfig) -> Self {
        Self {
            core: Core::new(config),
            listeners: Listeners::default(),
        }
    }

    /// Register a change listener. Listeners run in registration order.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut SelectionModel, &SelectionChange) + 'static,
    {
        let boxed: Listener<SelectionModel> = Box::new(listener);
        self.listeners.add(boxed)
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn commit(&mut self, change: Option<SelectionChange>) {
        if let Some(change) = change {
            change::dispatch(self, change, |model| &mut model.listeners);
        }
    }

    fn commit_result(&mut self, change: Result<Option<SelectionChange>>) -> Result<()> {
        let change = change?;
        self.commit(change);
        Ok(())
    }
}

impl ListSelection for SelectionModel {
    fn selection(&self) -> &SelectionSet {
        &self.core.set
    }

    fn is_multiple(&self) -> bool {
        true
    }

    fn select(&mut self, index: usize) -> Result<()> {
        let change = self.core.select(index);
        self.commit_result(change)
    }

    fn deselect(&mut self, index: usize) -> Result<()> {
        let change = self.core.deselect(index);
        self.commit_result(change)
    }

    fn toggle(&mut self, index: usize) -> Result<()> {
        let change = self.core.toggle(index);
        self.commit_result(change)
    }

    fn select_range(&mut self, anchor: usize, index: usize) -> Result<()> {
        let change = self.core.select_range(anchor, index);
        self.commit_result(change)
    }

    fn select_only(&mut self, index: usize) -> Result<()> {
        let change = self.core.select_only(index);
        self.commit_result(change)
    }

    fn set_selected_indexes(&mut self, indexes: &[usize]) -> Result<()> {
        let change = self.core.set_selected_indexes(indexes);
        self.commit_result(change)
    }

    fn select_all(&mut self) {
        let change = self.core.select_all();
        self.commit(change);
    }

    fn unselect_all(&mut self) {
        let change = self.core.unselect_all();
        self.commit(change);
    }

    fn clear(&mut self) {
        let change = self.core.clear();
        self.commit(change);
    }

    fn set_lead_index(&mut self, index: Option<usize>) -> Result<()> {
        let change = self.core.set_lead(index);
        self.commit_result(change)
    }

    fn set_anchor_index(&mut self, index: Option<usize>) -> Result<()> {
        let change = self.core.set_anchor(index);
        self.commit_result(change)
    }

    fn adjust_length(&mut self, length: usize) {
        let change = self.core.adjust_length(length);
        self.commit(change);
    }

    fn adjust_to_reordering(&mut self, permutation: &Permutation) -> Result<()> {
        let change = self.core.reorder(permutation, None);
        self.commit_result(change)
    }

    fn adjust_to_reordering_with_length(
        &mut self,
        permutation: &Permutation,
        length: usize,
    ) -> Result<()> {
        let change = self.core.reorder(permutation, Some(length));
        self.commit_result(change)
    }

    fn begin_change(&mut self) {
        self.core.begin();
    }

    fn end_change(&mut self) {
        let change = self.core.end();
        self.commit(change);
    }
}
