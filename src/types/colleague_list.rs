#![forbid(unsafe_code)]

//! Ordered collection of colleagues
//!
//! Insertion order is display order. Callers address entries by 1-based
//! position; internally everything is a plain index into the owned `Vec`, and
//! positions are only computed at the edges (removal and rendering).

use super::colleague::Colleague;
use serde::Serialize;
use thiserror::Error;

/// Errors from positional operations on a [`ColleagueList`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("no colleagues to remove")]
    EmptyList,

    #[error("no colleague at position {position} (valid positions are 1 to {len})")]
    InvalidIndex { position: i64, len: usize },
}

/// An ordered list of colleagues
///
/// Serializes transparently as a JSON array of colleague objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColleagueList {
    colleagues: Vec<Colleague>,
}

impl ColleagueList {
    /// Creates an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a colleague to the end of the list
    ///
    /// Duplicates are allowed: two colleagues may share a name.
    pub fn add(&mut self, colleague: Colleague) {
        self.colleagues.push(colleague);
    }

    /// Removes the colleague at the given 1-based position
    ///
    /// Later entries shift down by one so positions stay contiguous. The list
    /// is untouched on error.
    pub fn remove(&mut self, position: i64) -> Result<Colleague, ListError> {
        if self.colleagues.is_empty() {
            return Err(ListError::EmptyList);
        }

        let index = self.index_of(position).ok_or(ListError::InvalidIndex {
            position,
            len: self.colleagues.len(),
        })?;

        Ok(self.colleagues.remove(index))
    }

    /// All colleagues whose name matches `name`, ignoring case
    ///
    /// Returns an empty vector when nothing matches.
    pub fn find_by_name(&self, name: &str) -> Vec<&Colleague> {
        self.colleagues
            .iter()
            .filter(|c| c.name_matches(name))
            .collect()
    }

    /// Like [`find_by_name`](Self::find_by_name), paired with each match's
    /// 1-based position in the full list
    pub fn find_positions_by_name(&self, name: &str) -> Vec<(usize, &Colleague)> {
        self.iter_positions()
            .filter(|(_, c)| c.name_matches(name))
            .collect()
    }

    /// The full list in order
    pub fn all(&self) -> &[Colleague] {
        &self.colleagues
    }

    /// Iterates over `(position, colleague)` pairs, positions starting at 1
    pub fn iter_positions(&self) -> impl Iterator<Item = (usize, &Colleague)> {
        self.colleagues.iter().enumerate().map(|(i, c)| (i + 1, c))
    }

    pub fn len(&self) -> usize {
        self.colleagues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colleagues.is_empty()
    }

    pub fn into_vec(self) -> Vec<Colleague> {
        self.colleagues
    }

    fn index_of(&self, position: i64) -> Option<usize> {
        let index = usize::try_from(position).ok()?.checked_sub(1)?;
        (index < self.colleagues.len()).then_some(index)
    }
}
