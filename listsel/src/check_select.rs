//! Check-select mode on top of a multi-select model.
//!
//! In check-select mode a click on an item toggles its checkbox-style
//! selection instead of opening it. The mode follows the size of the
//! selection:
//!
//! - nothing selected: off
//! - two or more selected: on
//! - exactly one selected: left alone; pointer and keyboard handlers set it
//!   to tell "click to open" from "click to check"
//!
//! The mode is recomputed inside every mutating call, before this model's
//! listeners run, so listeners always observe the post-mutation mode.

use crate::change::{self, Listener, ListenerId, Listeners, SelectionChange};
use crate::config::SelectionConfig;
use crate::error::Result;
use crate::model::SelectionModel;
use crate::permutation::Permutation;
use crate::set::SelectionSet;
use crate::traits::ListSelection;

#[derive(Debug, Default)]
pub struct CheckSelectModel {
    inner: SelectionModel,
    check_select: bool,
    listeners: Listeners<CheckSelectModel>,
}

impl CheckSelectModel {
    pub fn new(length: usize) -> Self {
        Self::with_config(&SelectionConfig::new(length))
    }

    pub fn with_config(config: &SelectionConfig) -> Self {
        Self {
            inner: SelectionModel::with_config(config),
            check_select: false,
            listeners: Listeners::default(),
        }
    }

    /// The wrapped model. Its own listeners are not called while it is
    /// wrapped; register on the decorator instead.
    pub fn inner(&self) -> &SelectionModel {
        &self.inner
    }

    pub fn into_inner(self) -> SelectionModel {
        self.inner
    }

    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&mut CheckSelectModel, &SelectionChange) + 'static,
    {
        let boxed: Listener<CheckSelectModel> = Box::new(listener);
        self.listeners.add(boxed)
    }

    pub fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(id);
    }

    fn set_mode(&mut self, enabled: bool) {
        if self.check_select != enabled {
            log::debug!("check-select mode {}", if enabled { "on" } else { "off" });
            self.check_select = enabled;
        }
    }

    /// Size rule, applied before listeners see a change.
    fn update_mode(&mut self) {
        match self.selected_count() {
            0 => self.set_mode(false),
            1 => {}
            _ => self.set_mode(true),
        }
    }

    fn commit(&mut self, change: Option<SelectionChange>) {
        if let Some(change) = change {
            self.update_mode();
            change::dispatch(self, change, |model| &mut model.listeners);
        }
    }

    fn commit_result(&mut self, change: Result<Option<SelectionChange>>) -> Result<()> {
        let change = change?;
        self.commit(change);
        Ok(())
    }

    /// Reorder, leaving check-select mode when every selected item was
    /// removed from a list that is still non-empty.
    fn reorder(&mut self, permutation: &Permutation, length: Option<usize>) -> Result<()> {
        let old_count = self.selected_count();
        let old_lead = self.lead_index();
        let survivors = self
            .selection()
            .selected()
            .filter(|&i| permutation.get(i).is_some())
            .count();

        let change = self.inner.core.reorder(permutation, length)?;

        if old_count > 0 && survivors == 0 && self.length() > 0 && old_lead.is_some() {
            self.set_mode(false);
        }
        self.commit(change);
        Ok(())
    }
}

impl ListSelection for CheckSelectModel {
    fn selection(&self) -> &SelectionSet {
        self.inner.selection()
    }

    fn is_multiple(&self) -> bool {
        true
    }

    fn select(&mut self, index: usize) -> Result<()> {
        let change = self.inner.core.select(index);
        self.commit_result(change)
    }

    fn deselect(&mut self, index: usize) -> Result<()> {
        let change = self.inner.core.deselect(index);
        self.commit_result(change)
    }

    fn toggle(&mut self, index: usize) -> Result<()> {
        let change = self.inner.core.toggle(index);
        self.commit_result(change)
    }

    fn select_range(&mut self, anchor: usize, index: usize) -> Result<()> {
        let change = self.inner.core.select_range(anchor, index);
        self.commit_result(change)
    }

    fn select_only(&mut self, index: usize) -> Result<()> {
        let change = self.inner.core.select_only(index);
        self.commit_result(change)
    }

    fn set_selected_indexes(&mut self, indexes: &[usize]) -> Result<()> {
        let change = self.inner.core.set_selected_indexes(indexes);
        self.commit_result(change)
    }

    fn select_all(&mut self) {
        let change = self.inner.core.select_all();
        self.commit(change);
    }

    fn unselect_all(&mut self) {
        let change = self.inner.core.unselect_all();
        self.commit(change);
    }

    fn clear(&mut self) {
        let change = self.inner.core.clear();
        self.commit(change);
    }

    fn set_lead_index(&mut self, index: Option<usize>) -> Result<()> {
        let change = self.inner.core.set_lead(index);
        self.commit_result(change)
    }

    fn set_anchor_index(&mut self, index: Option<usize>) -> Result<()> {
        let change = self.inner.core.set_anchor(index);
        self.commit_result(change)
    }

    fn adjust_length(&mut self, length: usize) {
        let change = self.inner.core.adjust_length(length);
        self.commit(change);
    }

    fn adjust_to_reordering(&mut self, permutation: &Permutation) -> Result<()> {
        self.reorder(permutation, None)
    }

    fn adjust_to_reordering_with_length(
        &mut self,
        permutation: &Permutation,
        length: usize,
    ) -> Result<()> {
        self.reorder(permutation, Some(length))
    }

    fn begin_change(&mut self) {
        self.inner.core.begin();
    }

    fn end_change(&mut self) {
        let change = self.inner.core.end();
        self.commit(change);
    }

    fn check_select_mode(&self) -> bool {
        self.check_select
    }

    fn set_check_select_mode(&mut self, enabled: bool) {
        self.set_mode(enabled);
    }
}
