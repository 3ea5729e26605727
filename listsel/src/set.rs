//! Selected indices plus lead and anchor, with range invariants.
//!
//! This is the data layer shared by every selection model. It knows nothing
//! about single/multi modes, batching or listeners; it only guarantees that
//! every index it holds lies in `[0, length)`.

use std::collections::BTreeSet;

use crate::error::{Result, SelectionError};
use crate::permutation::Permutation;

/// Copy of the observable state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    pub selected: Vec<usize>,
    pub lead: Option<usize>,
    pub anchor: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    length: usize,
    selected: BTreeSet<usize>,
    lead: Option<usize>,
    anchor: Option<usize>,
}

impl SelectionSet {
    /// Create an empty selection over `length` items.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            ..Default::default()
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Selected indices in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn selected_indexes(&self) -> Vec<usize> {
        self.selected().collect()
    }

    /// The lowest selected index.
    pub fn first(&self) -> Option<usize> {
        self.selected.first().copied()
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn lead(&self) -> Option<usize> {
        self.lead
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selected: self.selected_indexes(),
            lead: self.lead,
            anchor: self.anchor,
        }
    }

    /// Fail with [`SelectionError::IndexOutOfRange`] unless `index < length`.
    pub fn check(&self, index: usize) -> Result<()> {
        if index < self.length {
            Ok(())
        } else {
            log::debug!("rejecting index {} (length {})", index, self.length);
            Err(SelectionError::IndexOutOfRange {
                index,
                length: self.length,
            })
        }
    }

    fn check_optional(&self, index: Option<usize>) -> Result<()> {
        index.map_or(Ok(()), |i| self.check(i))
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Add `index`. Returns true if it was not selected before.
    pub fn insert(&mut self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.selected.insert(index))
    }

    /// Remove `index`. Returns true if it was selected.
    pub fn remove(&mut self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.selected.remove(&index))
    }

    /// Flip `index`. Returns its new state.
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        self.check(index)?;
        if self.selected.remove(&index) {
            Ok(false)
        } else {
            self.selected.insert(index);
            Ok(true)
        }
    }

    /// Add the inclusive range between `a` and `b`, in either order.
    /// Returns true if anything was added.
    pub fn insert_range(&mut self, a: usize, b: usize) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let mut added = false;
        for index in start..=end {
            added |= self.selected.insert(index);
        }
        Ok(added)
    }

    /// Select every index. Returns true if anything was added.
    pub fn insert_all(&mut self) -> bool {
        let before = self.selected.len();
        self.selected.extend(0..self.length);
        self.selected.len() != before
    }

    /// Replace the selection with `indexes`. All must be in range.
    pub fn replace(&mut self, indexes: &[usize]) -> Result<()> {
        for &index in indexes {
            self.check(index)?;
        }
        self.selected = indexes.iter().copied().collect();
        Ok(())
    }

    /// Deselect everything. Returns true if anything was selected.
    pub fn clear_selected(&mut self) -> bool {
        let had = !self.selected.is_empty();
        self.selected.clear();
        had
    }

    // -------------------------------------------------------------------------
    // Lead / anchor
    // -------------------------------------------------------------------------

    pub fn set_lead(&mut self, lead: Option<usize>) -> Result<()> {
        self.check_optional(lead)?;
        self.lead = lead;
        Ok(())
    }

    pub fn set_anchor(&mut self, anchor: Option<usize>) -> Result<()> {
        self.check_optional(anchor)?;
        self.anchor = anchor;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Length changes
    // -------------------------------------------------------------------------

    /// Resize. Selected indices, lead and anchor at or past the new length
    /// are dropped.
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
        self.selected.retain(|&i| i < length);
        self.lead = self.lead.filter(|&i| i < length);
        self.anchor = self.anchor.filter(|&i| i < length);
    }

    /// Drop everything and shrink to zero length.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Map every held index through `permutation`.
    ///
    /// The new length is `length` when given, otherwise
    /// [`Permutation::new_len`]. On error nothing is modified.
    pub fn remap(&mut self, permutation: &Permutation, length: Option<usize>) -> Result<()> {
        if permutation.len() != self.length {
            return Err(SelectionError::PermutationLength {
                expected: self.length,
                actual: permutation.len(),
            });
        }

        let new_length = match length {
            Some(length) => {
                if let Some((index, target)) = permutation
                    .iter()
                    .find_map(|(old, new)| new.filter(|&n| n >= length).map(|n| (old, n)))
                {
                    return Err(SelectionError::PermutationTarget {
                        index,
                        target,
                        length,
                    });
                }
                length
            }
            None => permutation.new_len()?,
        };

        if permutation.has_collisions() {
            log::warn!("permutation maps several indices to the same target");
        }

        let map = |index: Option<usize>| index.and_then(|i| permutation.get(i));
        self.selected = self
            .selected
            .iter()
            .filter_map(|&i| permutation.get(i))
            .collect();
        self.lead = map(self.lead);
        self.anchor = map(self.anchor);
        self.length = new_length;

        log::trace!(
            "remapped selection: {} selected, lead {:?}, length {}",
            self.selected.len(),
            self.lead,
            self.length
        );
        Ok(())
    }
}
