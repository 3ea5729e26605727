//! Directory contents as the list behind the selection model.
//!
//! Every mutation returns the [`Permutation`] the selection model needs to
//! follow it.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use listsel::Permutation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Size,
}

#[derive(Clone, Copy, Debug)]
pub struct SortOptions {
    pub sort_by: SortBy,
    pub descending: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            sort_by: SortBy::Name,
            descending: false,
        }
    }
}

impl SortOptions {
    pub fn cycle_sort_by(&mut self) {
        self.sort_by = match self.sort_by {
            SortBy::Name => SortBy::Size,
            SortBy::Size => SortBy::Name,
        };
    }

    pub fn toggle_order(&mut self) {
        self.descending = !self.descending;
    }
}

#[derive(Debug, Default)]
pub struct Listing {
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub sort: SortOptions,
}

impl Listing {
    pub fn read(dir: &Path, sort: SortOptions) -> io::Result<Self> {
        let mut listing = Self {
            dir: dir.to_path_buf(),
            entries: read_entries(dir)?,
            sort,
        };
        listing.sort();
        Ok(listing)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Re-sort with the current options.
    pub fn sort(&mut self) -> Permutation {
        let sort = self.sort;
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&self.entries[a], &self.entries[b]);
            let ordering = match sort.sort_by {
                SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortBy::Size => a.size.cmp(&b.size),
            };
            let ordering = if sort.descending {
                ordering.reverse()
            } else {
                ordering
            };
            // Directories first regardless of order.
            b.is_dir.cmp(&a.is_dir).then(ordering)
        });

        let permutation = Permutation::from_order(self.entries.len(), &order);
        let mut old: Vec<Option<Entry>> = std::mem::take(&mut self.entries)
            .into_iter()
            .map(Some)
            .collect();
        self.entries = order.iter().filter_map(|&i| old[i].take()).collect();
        permutation
    }

    /// Drop `indexes` from the view (the files themselves are untouched).
    pub fn hide(&mut self, indexes: &[usize]) -> Permutation {
        let permutation = Permutation::removal(self.entries.len(), indexes);
        let mut position = 0;
        self.entries.retain(|_| {
            position += 1;
            permutation.get(position - 1).is_some()
        });
        permutation
    }

    /// Re-read the directory. Entries are matched by name; new ones are
    /// placed by the current sort.
    pub fn rescan(&mut self) -> io::Result<(Permutation, usize)> {
        let fresh = read_entries(&self.dir)?;
        Ok(self.replace_entries(fresh))
    }

    fn replace_entries(&mut self, fresh: Vec<Entry>) -> (Permutation, usize) {
        let old_names: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        self.entries = fresh;
        self.sort();

        let positions: HashMap<&str, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name.as_str(), i))
            .collect();
        let targets = old_names
            .iter()
            .map(|name| positions.get(name.as_str()).copied())
            .collect();
        (Permutation::new(targets), self.entries.len())
    }
}

fn read_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(metadata) = entry.metadata() else {
            log::debug!("skipping {:?}: no metadata", entry.path());
            continue;
        };
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
        });
    }
    Ok(entries)
}
