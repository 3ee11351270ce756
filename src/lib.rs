//! Mergeable Minimum-Priority Queues
//!
//! This crate provides four independent min-heap engines that implement one
//! common contract (insert, peek-min, extract-min, destructive merge) over
//! radically different internal representations, each trading insertion,
//! extraction, and merge cost differently:
//!
//! - **D-ary array heap**: implicit complete tree over a growable array;
//!   O(log n) insert and extract, merge by re-insertion
//! - **Binomial heap**: forest of rank-distinct binomial trees; O(log n)
//!   extract and merge via binary-addition-style carries
//! - **Lazy-consolidated heap** (Fibonacci-style): circular root/child
//!   rings in an arena; O(1) insert, consolidation deferred to extraction
//! - **Pairing heap**: left-child/right-sibling tree; O(1) insert and
//!   merge, two-pass combine at extraction
//!
//! None of the engines supports decrease-key; they are pure mergeable
//! queues, which keeps every structure free of parent pointers and marks.
//!
//! # Example
//!
//! ```rust
//! use mergeable_heaps::{MergeableHeap, MinHeap};
//! use mergeable_heaps::binomial::BinomialHeap;
//!
//! let mut left = BinomialHeap::new();
//! left.insert(2);
//! left.insert(7);
//!
//! let mut right = BinomialHeap::new();
//! right.insert(1);
//! right.insert(9);
//!
//! left.merge(right);
//! assert_eq!(left.len(), 4);
//! assert_eq!(left.extract_min(), Ok(1));
//! assert_eq!(left.extract_min(), Ok(2));
//! ```

pub mod binomial;
pub mod dary;
pub mod lazy;
pub mod pairing;
pub mod traits;

// Re-export the contract for convenience
pub use traits::{EmptyCollectionError, InvalidConfigurationError, MergeableHeap, MinHeap};
