//! Common traits for the heap engines
//!
//! Every engine in this crate implements the same two-tier contract:
//!
//! - [`MinHeap`]: insert, peek-min, extract-min, size, emptiness
//! - [`MergeableHeap`]: adds the destructive union of two heaps
//!
//! The engines differ only in how they pay for these operations; the
//! observable behavior (a min-ordered multiset of entries) is identical,
//! which is what the shared conformance suite in `tests/` relies on.

use thiserror::Error;

/// Error returned by [`MinHeap::peek_min`] and [`MinHeap::extract_min`]
/// when the heap holds no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("collection is empty")]
pub struct EmptyCollectionError;

/// Error returned at construction when a tuning parameter is outside its
/// documented range (for example a d-ary arity below 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid configuration: {reason}")]
pub struct InvalidConfigurationError {
    /// Which parameter was out of range, and what the bound is.
    pub reason: &'static str,
}

/// Base trait for the min-oriented priority queue engines
///
/// Entries need only a total order ([`Ord`]); the engine never mutates an
/// entry, it only moves it between slots or nodes. Behavior is unspecified
/// if the `Ord` implementation is not a valid total order; the engines do
/// not attempt to detect a broken comparator.
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::MinHeap;
/// use mergeable_heaps::dary::DaryHeap;
///
/// let mut heap = DaryHeap::new();
/// heap.insert(3);
/// heap.insert(1);
/// heap.insert(2);
///
/// assert_eq!(heap.peek_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(2));
/// ```
pub trait MinHeap<T: Ord> {
    /// Creates a new empty heap with default configuration
    fn new() -> Self;

    /// Returns true if the heap holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries in the heap
    fn len(&self) -> usize;

    /// Inserts an entry
    ///
    /// # Time Complexity
    /// O(log n) for the array heap, O(1) amortized (or better) for the
    /// node-based engines.
    fn insert(&mut self, entry: T);

    /// Returns a reference to the minimal entry without removing it
    ///
    /// # Errors
    /// [`EmptyCollectionError`] if the heap is empty.
    fn peek_min(&self) -> Result<&T, EmptyCollectionError>;

    /// Removes and returns the minimal entry
    ///
    /// # Errors
    /// [`EmptyCollectionError`] if the heap is empty.
    ///
    /// # Time Complexity
    /// O(log n), amortized for the lazy-consolidated and pairing engines.
    fn extract_min(&mut self) -> Result<T, EmptyCollectionError>;
}

/// Heaps supporting destructive union
///
/// `merge` consumes the donor heap: ownership of every donor node moves
/// into the receiver, and the move makes reuse of the drained donor a
/// compile error rather than a documented precondition.
pub trait MergeableHeap<T: Ord>: MinHeap<T> {
    /// Merges another heap into this one, consuming it
    ///
    /// After the call `self.len()` is the sum of both previous sizes.
    ///
    /// # Time Complexity
    /// O(1) for the pairing heap, O(log n) for the binomial heap,
    /// O(m log n) for the array heap (re-insertion), O(m) for the
    /// lazy-consolidated heap (arena absorption of the smaller operand).
    fn merge(&mut self, other: Self);
}
