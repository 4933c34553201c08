//! # Set Algebra
//!
//! k-way intersection and concatenation of handle sets.
//!
//! ## Intersection
//!
//! Each input chain is consumed into an array and sorted. One cursor per
//! array walks forward: when every cursor points at the same handle, that
//! handle is emitted and all cursors advance; otherwise every cursor behind
//! the largest current handle is moved up to it. The merge stops as soon as
//! any cursor runs off its array.
//!
//! Output is ascending. A handle held `m_i` times by input `i` is emitted
//! `min(m_i)` times, because matching positions advance in lockstep.

use crate::handle_set::HandleSet;
use crate::{AtomSetError, Handle};

impl HandleSet {
    /// Intersect any number of sets.
    ///
    /// No sets, or any empty set, gives the empty set; all inputs are
    /// released either way.
    pub fn intersection(sets: Vec<HandleSet>) -> Result<HandleSet, AtomSetError> {
        if sets.is_empty() {
            return Ok(HandleSet::new());
        }
        if sets.iter().any(HandleSet::is_empty) {
            tracing::debug!(inputs = sets.len(), "intersection with an empty input");
            return Ok(HandleSet::new());
        }

        let inputs = sets.len();
        let mut arrays = Vec::with_capacity(inputs);
        for set in sets {
            let mut handles = set.into_counted_vec("intersection")?;
            handles.sort_unstable();
            arrays.push(handles);
        }

        let matches = merge_sorted(&arrays);
        tracing::debug!(inputs, matched = matches.len(), "intersection complete");
        Ok(matches.into_iter().collect())
    }

    /// Intersect this set with one other set.
    pub fn intersect(self, other: HandleSet) -> Result<HandleSet, AtomSetError> {
        Self::intersection(vec![self, other])
    }

    /// Splice `other` onto the end of this set.
    ///
    /// Order of both inputs is kept; an empty `self` returns `other`.
    #[must_use]
    pub fn concat(mut self, other: HandleSet) -> HandleSet {
        if self.is_empty() {
            return other;
        }
        self.append(other);
        self
    }
}

/// Run the cursor merge over sorted arrays, collecting every match.
fn merge_sorted(arrays: &[Vec<Handle>]) -> Vec<Handle> {
    let mut cursors = vec![0usize; arrays.len()];
    let mut matches = Vec::new();
    while let Some(handle) = next_match(arrays, &mut cursors) {
        matches.push(handle);
    }
    matches
}

/// Advance the cursors to the next position where all arrays agree.
fn next_match(arrays: &[Vec<Handle>], cursors: &mut [usize]) -> Option<Handle> {
    loop {
        let mut reference = None;
        let mut max = Handle::UNDEFINED;
        let mut agree = true;

        for (array, &cursor) in arrays.iter().zip(cursors.iter()) {
            let current = *array.get(cursor)?;
            max = max.max(current);
            match reference {
                None => reference = Some(current),
                Some(first) if first != current => agree = false,
                Some(_) => {}
            }
        }

        if agree {
            for cursor in cursors.iter_mut() {
                *cursor += 1;
            }
            return reference;
        }

        for (array, cursor) in arrays.iter().zip(cursors.iter_mut()) {
            while *array.get(*cursor)? < max {
                *cursor += 1;
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
