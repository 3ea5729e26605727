//! Single-select selection model.
//!
//! Every operation that adds an index first clears the current selection,
//! inside the same batch, so listeners never see more than one index.

use crate::change::{self, Listener, ListenerId, Listeners, SelectionChange};
use crate::config::SelectionConfig;
use crate::error::Result;
use crate::model::Core;
use crate::permutation::Permutation;
use crate::set::SelectionSet;
use crate::traits::ListSelection;

/// Selection model that holds at most one selected index.
#[derive(Debug, Default)]
pub struct SingleSelectionModel {
    core: Core,
    listeners: Listeners<SingleSelectionModel>,
}

impl SingleSelectionModel {
    pub fn new(length: usize) -> Self {
        Self::with_config(&SelectionConfig::new(length))
    }

    pub fn with_config(config: &SelectionConfig) -> Self {
        Self {
            core: Core::new(config),
            listeners: Listeners::default(),
        }
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut SingleSelectionModel, &SelectionChange) + 'static,
    {
        let boxed: Listener<SingleSelectionModel> = Box::new(listener);
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

    /// Replace the selection with the lead alone. No-op without a lead.
    fn select_lead(&mut self) -> Result<()> {
        match self.lead_index() {
            Some(lead) => self.replace(lead),
            None => Ok(()),
        }
    }

    /// Replace the selection with `index` alone.
    fn replace(&mut self, index: usize) -> Result<()> {
        let change = self.core.apply(|set| set.replace(&[index]))?;
        self.commit(change);
        Ok(())
    }
}

impl ListSelection for SingleSelectionModel {
    fn selection(&self) -> &SelectionSet {
        &self.core.set
    }

    fn is_multiple(&self) -> bool {
        false
    }

    fn select(&mut self, index: usize) -> Result<()> {
        self.replace(index)
    }

    fn deselect(&mut self, index: usize) -> Result<()> {
        let change = self.core.deselect(index)?;
        self.commit(change);
        Ok(())
    }

    fn toggle(&mut self, index: usize) -> Result<()> {
        if self.is_selected(index) {
            self.deselect(index)
        } else {
            self.replace(index)
        }
    }

    /// Only `index` ends up selected.
    fn select_range(&mut self, anchor: usize, index: usize) -> Result<()> {
        self.core.set.check(anchor)?;
        self.replace(index)
    }

    fn select_only(&mut self, index: usize) -> Result<()> {
        let change = self.core.select_only(index)?;
        self.commit(change);
        Ok(())
    }

    /// Keeps only the last given index.
    fn set_selected_indexes(&mut self, indexes: &[usize]) -> Result<()> {
        for &index in indexes {
            self.core.set.check(index)?;
        }
        let last = &indexes[indexes.len().saturating_sub(1)..];
        let change = self.core.set_selected_indexes(last)?;
        self.commit(change);
        Ok(())
    }

    /// Selects the lead item, if any.
    fn select_all(&mut self) {
        if let Err(e) = self.select_lead() {
            log::warn!("lead out of range on select_all: {}", e);
        }
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
        let change = self.core.set_lead(index)?;
        self.commit(change);
        Ok(())
    }

    fn set_anchor_index(&mut self, index: Option<usize>) -> Result<()> {
        let change = self.core.set_anchor(index)?;
        self.commit(change);
        Ok(())
    }

    fn adjust_length(&mut self, length: usize) {
        let change = self.core.adjust_length(length);
        self.commit(change);
    }

    fn adjust_to_reordering(&mut self, permutation: &Permutation) -> Result<()> {
        let change = self.core.reorder(permutation, None)?;
        self.commit(change);
        Ok(())
    }

    fn adjust_to_reordering_with_length(
        &mut self,
        permutation: &Permutation,
        length: usize,
    ) -> Result<()> {
        let change = self.core.reorder(permutation, Some(length))?;
        self.commit(change);
        Ok(())
    }

    fn begin_change(&mut self) {
        self.core.begin();
    }

    fn end_change(&mut self) {
        let change = self.core.end();
        self.commit(change);
    }
}
