//! Old-index to new-index maps describing list mutations.
//!
//! A host that reorders, splices or sorts its list describes the mutation to
//! the selection model as a [`Permutation`]: entry `i` holds the new index of
//! the item that used to live at `i`, or `None` if it was removed.

use std::collections::HashSet;

use crate::error::{Result, SelectionError};

/// Marker used by the raw integer form for a removed index.
pub const REMOVED: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Permutation {
    targets: Vec<Option<usize>>,
}

impl Permutation {
    /// Create a permutation from explicit targets.
    pub fn new(targets: Vec<Option<usize>>) -> Self {
        Self { targets }
    }

    /// Parse the integer form where `-1` marks a removed index.
    ///
    /// ```
    /// use listsel::Permutation;
    ///
    /// let p = Permutation::from_raw(&[0, 1, -1, 2, 3]).unwrap();
    /// assert_eq!(p.get(2), None);
    /// assert_eq!(p.get(4), Some(3));
    /// ```
    pub fn from_raw(raw: &[i64]) -> Result<Self> {
        let targets = raw
            .iter()
            .enumerate()
            .map(|(index, &value)| match value {
                REMOVED => Ok(None),
                v => usize::try_from(v)
                    .map(Some)
                    .map_err(|_| SelectionError::InvalidPermutationEntry { index, value: v }),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { targets })
    }

    /// Identity permutation over `len` items.
    pub fn identity(len: usize) -> Self {
        Self {
            targets: (0..len).map(Some).collect(),
        }
    }

    /// Permutation for removing `removed` indices from a list of `len` items.
    ///
    /// Survivors keep their relative order and close the gaps. Indices at or
    /// beyond `len` are ignored.
    pub fn removal(len: usize, removed: &[usize]) -> Self {
        let mut gone = vec![false; len];
        for &index in removed {
            if let Some(slot) = gone.get_mut(index) {
                *slot = true;
            }
        }

        let mut next = 0;
        let targets = gone
            .into_iter()
            .map(|is_gone| {
                if is_gone {
                    None
                } else {
                    next += 1;
                    Some(next - 1)
                }
            })
            .collect();
        Self { targets }
    }

    /// Permutation for a splice on a list of `len` items: `remove` items are
    /// taken out at `at` and `insert` new ones put in their place.
    pub fn splice(len: usize, at: usize, remove: usize, insert: usize) -> Self {
        let at = at.min(len);
        let end = at.saturating_add(remove).min(len);
        let targets = (0..len)
            .map(|i| {
                if i < at {
                    Some(i)
                } else if i < end {
                    None
                } else {
                    Some(i - (end - at) + insert)
                }
            })
            .collect();
        Self { targets }
    }

    /// Permutation from a new ordering, where `order[new] == old`.
    ///
    /// This is what a sort produces when it sorts a vector of old indices.
    /// Old indices missing from `order` are treated as removed.
    pub fn from_order(len: usize, order: &[usize]) -> Self {
        let mut targets = vec![None; len];
        for (new, &old) in order.iter().enumerate() {
            if let Some(slot) = targets.get_mut(old) {
                *slot = Some(new);
            }
        }
        Self { targets }
    }

    /// Number of entries (the length of the list before the mutation).
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// New index for `old`, or `None` if it was removed or is out of range.
    pub fn get(&self, old: usize) -> Option<usize> {
        self.targets.get(old).copied().flatten()
    }

    /// Iterate `(old, new)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<usize>)> + '_ {
        self.targets.iter().copied().enumerate()
    }

    /// Number of entries that survive the mutation.
    pub fn kept(&self) -> usize {
        self.targets.iter().filter(|t| t.is_some()).count()
    }

    /// Length of the list after the mutation, as far as the permutation can
    /// tell: enough room for every kept entry and for the highest target.
    ///
    /// Fails if a target is `usize::MAX`, which leaves no room for a length.
    pub fn new_len(&self) -> Result<usize> {
        let mut highest = 0;
        for (index, target) in self.iter() {
            if let Some(target) = target {
                let end = target
                    .checked_add(1)
                    .ok_or(SelectionError::PermutationOverflow { index, target })?;
                highest = highest.max(end);
            }
        }
        Ok(highest.max(self.kept()))
    }

    /// Whether two old indices map to the same new index.
    pub fn has_collisions(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.targets.len());
        self.targets.iter().flatten().any(|&target| !seen.insert(target))
    }
}

impl From<Vec<Option<usize>>> for Permutation {
    fn from(targets: Vec<Option<usize>>) -> Self {
        Self::new(targets)
    }
}
