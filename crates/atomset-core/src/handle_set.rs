//! # Handle Sets
//!
//! The owned, ordered chain of handles that every query produces.
//!
//! A `HandleSet` owns its nodes exclusively. The empty set is the absence of
//! a chain (`head == None`), so every operation is defined on it and returns
//! an empty set where a result set is expected.
//!
//! ## Ownership
//!
//! Consuming operations (filters, removal, intersection, concatenation) take
//! the set by value. Rejected nodes are released during the pass and the
//! caller can no longer reach the input chain.
//!
//! ## Iterative Tear-Down
//!
//! Chains can be long enough to overflow the stack if dropped recursively.
//! `Entry` unlinks its successors in a loop, and cloning builds the copy by
//! appending at a tail cursor, so neither depends on chain length for stack
//! depth.

use crate::{AtomSetError, Handle};
use std::convert::Infallible;
use std::fmt;

type Link = Option<Box<Entry>>;

/// One node of a chain.
struct Entry {
    handle: Handle,
    next: Link,
}

impl Entry {
    fn new(handle: Handle) -> Box<Self> {
        Box::new(Self { handle, next: None })
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            // `node` is dropped at the end of the iteration with no successor.
            next = node.next.take();
        }
    }
}

// =============================================================================
// HANDLE SET
// =============================================================================

/// An ordered, owned sequence of handles.
///
/// Duplicates are allowed and kept. Order is insertion order, except for the
/// result of an intersection, which is ascending.
#[derive(Default)]
pub struct HandleSet {
    head: Link,
}

impl HandleSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Create a one-element set.
    #[must_use]
    pub fn single(handle: Handle) -> Self {
        Self {
            head: Some(Entry::new(handle)),
        }
    }

    /// Build a set with exactly the order of `handles`.
    ///
    /// The chain is built back to front, prepending one node per handle.
    #[must_use]
    pub fn from_handles(handles: &[Handle]) -> Self {
        let mut set = Self::new();
        for &handle in handles.iter().rev() {
            set.push_front(handle);
        }
        set
    }

    /// Check whether the set has no chain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Count the nodes. O(n).
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Get the first handle.
    #[must_use]
    pub fn first(&self) -> Option<Handle> {
        self.head.as_ref().map(|node| node.handle)
    }

    /// Get the last handle. O(n).
    #[must_use]
    pub fn last(&self) -> Option<Handle> {
        self.iter().last()
    }

    /// Check whether any node holds `handle`. O(n).
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.iter().any(|h| h == handle)
    }

    /// Iterate over the handles in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Prepend one handle.
    pub fn push_front(&mut self, handle: Handle) {
        let mut node = Entry::new(handle);
        node.next = self.head.take();
        self.head = Some(node);
    }

    /// Detach and return the first handle.
    pub fn pop_front(&mut self) -> Option<Handle> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        Some(node.handle)
    }

    /// Remove every node holding `handle`.
    #[must_use]
    pub fn remove_all(self, handle: Handle) -> Self {
        self.retain(|h| h != handle)
    }

    /// Keep only the handles for which `keep` returns true, in order.
    #[must_use]
    pub fn retain<F>(self, mut keep: F) -> Self
    where
        F: FnMut(Handle) -> bool,
    {
        let Ok(set) = self.try_retain(|h| Ok::<bool, Infallible>(keep(h)));
        set
    }

    /// Keep only the handles accepted by a fallible predicate.
    ///
    /// Runs in two phases: rejected nodes at the front are dropped until the
    /// head is accepted, then a single forward pass splices out every
    /// rejected successor. The first error aborts the sweep and releases the
    /// whole chain.
    pub fn try_retain<E, F>(self, mut keep: F) -> Result<Self, E>
    where
        F: FnMut(Handle) -> Result<bool, E>,
    {
        let mut removed = 0usize;
        let mut head = self.head;

        while let Some(mut node) = head.take() {
            if keep(node.handle)? {
                head = Some(node);
                break;
            }
            head = node.next.take();
            removed += 1;
        }

        if let Some(first) = head.as_mut() {
            let mut cursor = first;
            while let Some(mut next) = cursor.next.take() {
                if keep(next.handle)? {
                    cursor = cursor.next.insert(next);
                } else {
                    cursor.next = next.next.take();
                    removed += 1;
                }
            }
        }

        tracing::trace!(removed, "handle set sweep complete");
        Ok(Self { head })
    }

    /// Copy the handles into a vector, in order.
    #[must_use]
    pub fn to_handle_vec(&self) -> Vec<Handle> {
        self.iter().collect()
    }

    /// Copy the handles into an array sized by a prior count of the chain.
    ///
    /// A fill that disagrees with the count is a consistency fault.
    pub fn to_handle_array(&self) -> Result<Box<[Handle]>, AtomSetError> {
        let expected = self.len();
        let mut array = Vec::with_capacity(expected);
        array.extend(self.iter());
        check_count("handle array", expected, array.len())?;
        Ok(array.into_boxed_slice())
    }

    /// Consume the chain into a vector, checking the walk against a count.
    pub(crate) fn into_counted_vec(
        mut self,
        context: &'static str,
    ) -> Result<Vec<Handle>, AtomSetError> {
        let expected = self.len();
        let mut handles = Vec::with_capacity(expected);
        while let Some(handle) = self.pop_front() {
            handles.push(handle);
        }
        check_count(context, expected, handles.len())?;
        Ok(handles)
    }

    /// Link `other`'s chain after this set's last node. O(len of self).
    pub(crate) fn append(&mut self, other: HandleSet) {
        if other.is_empty() {
            return;
        }
        let mut slot = &mut self.head;
        while let Some(node) = slot {
            slot = &mut node.next;
        }
        *slot = other.head;
    }
}

fn check_count(
    context: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), AtomSetError> {
    if expected == actual {
        return Ok(());
    }
    tracing::error!(context, expected, actual, "handle set consistency check failed");
    Err(AtomSetError::Inconsistent {
        context,
        expected,
        actual,
    })
}

// =============================================================================
// STANDARD TRAITS
// =============================================================================

impl Clone for HandleSet {
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl PartialEq for HandleSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for HandleSet {}

impl fmt::Debug for HandleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Handle> for HandleSet {
    fn from_iter<I: IntoIterator<Item = Handle>>(iter: I) -> Self {
        let mut set = Self::new();
        let mut tail = &mut set.head;
        for handle in iter {
            tail = &mut tail.insert(Entry::new(handle)).next;
        }
        set
    }
}

impl From<&[Handle]> for HandleSet {
    fn from(handles: &[Handle]) -> Self {
        Self::from_handles(handles)
    }
}

impl From<Vec<Handle>> for HandleSet {
    fn from(handles: Vec<Handle>) -> Self {
        Self::from_handles(&handles)
    }
}

impl From<HandleSet> for Vec<Handle> {
    fn from(set: HandleSet) -> Self {
        set.into_iter().collect()
    }
}

// =============================================================================
// ITERATORS
// =============================================================================

/// Borrowing iterator over a set's handles.
pub struct Iter<'a> {
    next: Option<&'a Entry>,
}

impl Iterator for Iter<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node.handle
        })
    }
}

/// Owning iterator; releases each node as it is yielded.
pub struct IntoIter {
    set: HandleSet,
}

impl Iterator for IntoIter {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        self.set.pop_front()
    }
}

impl IntoIterator for HandleSet {
    type Item = Handle;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter { set: self }
    }
}

impl<'a> IntoIterator for &'a HandleSet {
    type Item = Handle;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
