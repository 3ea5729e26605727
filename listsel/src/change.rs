//! Change notifications, batching and listener dispatch.
//!
//! Models record a [`Snapshot`] when the outermost batch opens and diff
//! against it when the batch closes. At most one [`SelectionChange`] comes out
//! of a batch, and only if something observable moved.
//!
//! Listeners receive the model itself, so they may mutate it. Changes raised
//! while listeners are running are queued and delivered in order before the
//! outermost call returns.

use std::collections::VecDeque;
use std::fmt;

use crate::set::{SelectionSet, Snapshot};

/// One index whose selected state flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    pub index: usize,
    pub selected: bool,
}

/// Payload of the "selection changed" notification.
///
/// Carries the state before the mutation; listeners read the current state
/// from the model they are handed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// Selected indices before the mutation, ascending.
    pub old_selected: Vec<usize>,
    pub old_lead: Option<usize>,
    pub old_anchor: Option<usize>,
    /// Indices whose selected state differs from before, ascending.
    ///
    /// After a reordering these are in new-index space: an item that kept its
    /// selection but moved shows up as selected at its new index (and as
    /// deselected at its old one, if nothing selected took its place).
    pub changes: Vec<IndexChange>,
}

impl SelectionChange {
    fn between(old: Snapshot, new: &SelectionSet) -> Option<Self> {
        let new_selected = new.selected_indexes();
        if old.selected == new_selected && old.lead == new.lead() && old.anchor == new.anchor() {
            return None;
        }

        let mut changes = Vec::new();
        let (mut a, mut b) = (old.selected.iter().peekable(), new_selected.iter().peekable());
        loop {
            match (a.peek(), b.peek()) {
                (Some(&&x), Some(&&y)) if x == y => {
                    a.next();
                    b.next();
                }
                (Some(&&x), Some(&&y)) if x < y => {
                    changes.push(IndexChange { index: x, selected: false });
                    a.next();
                }
                (Some(_), Some(&&y)) => {
                    changes.push(IndexChange { index: y, selected: true });
                    b.next();
                }
                (Some(&&x), None) => {
                    changes.push(IndexChange { index: x, selected: false });
                    a.next();
                }
                (None, Some(&&y)) => {
                    changes.push(IndexChange { index: y, selected: true });
                    b.next();
                }
                (None, None) => break,
            }
        }

        Some(Self {
            old_selected: old.selected,
            old_lead: old.lead,
            old_anchor: old.anchor,
            changes,
        })
    }

    /// Whether the set of selected indices changed (not just lead/anchor).
    pub fn selection_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

// =============================================================================
// Batching
// =============================================================================

/// Nesting counter plus the state captured when the outermost batch opened.
#[derive(Debug, Default)]
pub(crate) struct Batch {
    depth: usize,
    opened_with: Option<Snapshot>,
}

impl Batch {
    pub(crate) fn begin(&mut self, set: &SelectionSet) {
        if self.depth == 0 {
            self.opened_with = Some(set.snapshot());
        }
        self.depth += 1;
    }

    /// Close one level. Returns the change when the outermost level closes.
    pub(crate) fn end(&mut self, set: &SelectionSet) -> Option<SelectionChange> {
        match self.depth {
            0 => {
                log::warn!("end_change called without matching begin_change");
                None
            }
            1 => {
                self.depth = 0;
                self.opened_with
                    .take()
                    .and_then(|old| SelectionChange::between(old, set))
            }
            _ => {
                self.depth -= 1;
                None
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_open(&self) -> bool {
        self.depth > 0
    }
}

// =============================================================================
// Listeners
// =============================================================================

/// Handle returned by `add_listener`, used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Callback invoked with the model that changed and the change itself.
pub type Listener<M> = Box<dyn FnMut(&mut M, &SelectionChange)>;

/// Listener registry for a model of type `M`.
pub(crate) struct Listeners<M> {
    entries: Vec<(ListenerId, Listener<M>)>,
    queue: VecDeque<SelectionChange>,
    removed: Vec<ListenerId>,
    dispatching: bool,
    next_id: u64,
}

impl<M> Default for Listeners<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            queue: VecDeque::new(),
            removed: Vec::new(),
            dispatching: false,
            next_id: 0,
        }
    }
}

impl<M> fmt::Debug for Listeners<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .field("queued", &self.queue.len())
            .field("dispatching", &self.dispatching)
            .finish()
    }
}

impl<M> Listeners<M> {
    pub(crate) fn add(&mut self, listener: Listener<M>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) {
        self.entries.retain(|(entry, _)| *entry != id);
        if self.dispatching {
            // The running set is checked out; remember the id until it returns.
            self.removed.push(id);
        }
    }
}

/// Deliver `change` to every listener of `model`.
///
/// `access` projects the model onto its registry. If a delivery is already
/// running further up the stack the change is only queued.
pub(crate) fn dispatch<M>(
    model: &mut M,
    change: SelectionChange,
    access: fn(&mut M) -> &mut Listeners<M>,
) {
    let listeners = access(model);
    listeners.queue.push_back(change);
    if listeners.dispatching {
        log::trace!("change queued behind running dispatch");
        return;
    }
    listeners.dispatching = true;

    while let Some(change) = access(model).queue.pop_front() {
        let mut running = std::mem::take(&mut access(model).entries);
        log::debug!(
            "selection changed: {} index changes, lead {:?} -> listeners: {}",
            change.changes.len(),
            change.old_lead,
            running.len()
        );

        for (id, callback) in running.iter_mut() {
            if access(model).removed.contains(id) {
                continue;
            }
            callback(model, &change);
        }

        // Listeners added during delivery were pushed onto the empty vec.
        let listeners = access(model);
        running.append(&mut listeners.entries);
        let removed = std::mem::take(&mut listeners.removed);
        running.retain(|(id, _)| !removed.contains(id));
        listeners.entries = running;
    }

    access(model).dispatching = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(length: usize, selected: &[usize], lead: Option<usize>) -> SelectionSet {
        let mut set = SelectionSet::new(length);
        set.replace(selected).unwrap();
        set.set_lead(lead).unwrap();
        set
    }

    #[test]
    fn diff_lists_flipped_indices() {
        let old = set_with(6, &[1, 2, 4], None).snapshot();
        let new = set_with(6, &[2, 3, 5], None);
        let change = SelectionChange::between(old, &new).unwrap();
        assert_eq!(
            change.changes,
            vec![
                IndexChange { index: 1, selected: false },
                IndexChange { index: 3, selected: true },
                IndexChange { index: 4, selected: false },
                IndexChange { index: 5, selected: true },
            ]
        );
    }

    #[test]
    fn lead_only_move_is_a_change() {
        let old = set_with(3, &[1], Some(0)).snapshot();
        let new = set_with(3, &[1], Some(2));
        let change = SelectionChange::between(old, &new).unwrap();
        assert!(!change.selection_changed());
        assert_eq!(change.old_lead, Some(0));
    }

    #[test]
    fn listener_ids_are_distinct() {
        let mut listeners: Listeners<()> = Listeners::default();
        let first = listeners.add(Box::new(|_, _| {}));
        let second = listeners.add(Box::new(|_, _| {}));
        assert_ne!(first, second);
        assert_eq!(second.to_string(), "listener#1");
    }

    #[test]
    fn nested_batch_reports_once() {
        let mut set = SelectionSet::new(4);
        let mut batch = Batch::default();
        batch.begin(&set);
        batch.begin(&set);
        set.insert(1).unwrap();
        assert_eq!(batch.end(&set), None);
        set.insert(2).unwrap();
        let change = batch.end(&set).unwrap();
        assert_eq!(change.changes.len(), 2);
        assert!(!batch.is_open());
    }
}
