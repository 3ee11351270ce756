//! Binomial heap
//!
//! A forest of binomial trees, at most one of each rank, kept in a root
//! list sorted by strictly increasing rank. The rank-k tree B_k has exactly
//! 2^k nodes: its root carries k children of ranks k-1 down to 0, stored
//! highest-rank-first on the child chain. Because the root list mirrors the
//! binary representation of the size, every operation reduces to a
//! sorted-list merge followed by binary-addition-style carries.
//!
//! Nodes are plain owning `Box`es wired forward-only (first child, next
//! sibling), so the whole structure is a tree of ownership with no parent
//! or back pointers.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity                      |
//! |---------------|---------------------------------|
//! | `insert`      | O(log n) worst, O(1) amortized  |
//! | `peek_min`    | O(log n)                        |
//! | `extract_min` | O(log n)                        |
//! | `merge`       | O(log n)                        |

use crate::traits::{EmptyCollectionError, MergeableHeap, MinHeap};

/// Left-child/right-sibling binomial tree node.
///
/// `rank` is the number of children; the children hang off `child` in
/// decreasing rank order. Roots chain through `sibling` in increasing rank
/// order.
struct Node<T> {
    entry: T,
    rank: u32,
    child: Option<Box<Node<T>>>,
    sibling: Option<Box<Node<T>>>,
}

/// Binomial min-heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{MergeableHeap, MinHeap};
/// use mergeable_heaps::binomial::BinomialHeap;
///
/// let mut a = BinomialHeap::new();
/// a.insert(2);
/// a.insert(7);
///
/// let mut b = BinomialHeap::new();
/// b.insert(1);
/// b.insert(9);
///
/// a.merge(b);
/// assert_eq!(a.len(), 4);
/// assert_eq!(a.extract_min(), Ok(1));
/// ```
pub struct BinomialHeap<T: Ord> {
    /// Head of the root list, lowest rank first.
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T: Ord> MinHeap<T> for BinomialHeap<T> {
    fn new() -> Self {
        Self { head: None, len: 0 }
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Wraps the entry in a rank-0 singleton and unions it into the forest.
    fn insert(&mut self, entry: T) {
        let singleton = Box::new(Node {
            entry,
            rank: 0,
            child: None,
            sibling: None,
        });
        self.head = Self::union(self.head.take(), Some(singleton));
        self.len += 1;
    }

    /// Scans the root list; the minimum is always at some root.
    fn peek_min(&self) -> Result<&T, EmptyCollectionError> {
        let mut best: Option<&T> = None;
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if best.map_or(true, |b| node.entry < *b) {
                best = Some(&node.entry);
            }
            cur = node.sibling.as_deref();
        }
        best.ok_or(EmptyCollectionError)
    }

    /// Detaches the minimal root, then unions its reversed child chain
    /// (children are stored highest-rank-first, the root list needs
    /// lowest-first) back into the remaining forest.
    fn extract_min(&mut self) -> Result<T, EmptyCollectionError> {
        let mut min = self.detach_min_root().ok_or(EmptyCollectionError)?;

        let mut reversed: Option<Box<Node<T>>> = None;
        let mut cur = min.child.take();
        while let Some(mut node) = cur {
            cur = node.sibling.take();
            node.sibling = reversed;
            reversed = Some(node);
        }

        self.head = Self::union(self.head.take(), reversed);
        self.len -= 1;

        let Node { entry, .. } = *min;
        Ok(entry)
    }
}

impl<T: Ord> MergeableHeap<T> for BinomialHeap<T> {
    fn merge(&mut self, mut other: Self) {
        self.head = Self::union(self.head.take(), other.head.take());
        self.len += other.len;
        other.len = 0;
    }
}

impl<T: Ord> BinomialHeap<T> {
    /// Unions two rank-sorted root lists: a sorted-list merge, then one
    /// carry pass restoring "at most one tree per rank".
    fn union(a: Option<Box<Node<T>>>, b: Option<Box<Node<T>>>) -> Option<Box<Node<T>>> {
        Self::carry_pass(Self::meld_roots(a, b))
    }

    /// Merges two root lists by rank, like merging two sorted linked lists.
    /// The result may hold up to two trees of a rank; `carry_pass` fixes
    /// that up.
    fn meld_roots(
        mut a: Option<Box<Node<T>>>,
        mut b: Option<Box<Node<T>>>,
    ) -> Option<Box<Node<T>>> {
        let mut head: Option<Box<Node<T>>> = None;
        let mut tail = &mut head;
        loop {
            let node = match (a.take(), b.take()) {
                (Some(mut x), Some(y)) => {
                    if x.rank <= y.rank {
                        a = x.sibling.take();
                        b = Some(y);
                        x
                    } else {
                        let mut y = y;
                        b = y.sibling.take();
                        a = Some(x);
                        y
                    }
                }
                (rest, None) | (None, rest) => {
                    *tail = rest;
                    return head;
                }
            };
            tail = &mut tail.insert(node).sibling;
        }
    }

    /// Walks a rank-sorted list linking equal-rank neighbours, the way a
    /// binary adder propagates carries. When three trees of one rank meet
    /// (two originals plus a carry), the first is emitted untouched and the
    /// trailing pair is linked, which keeps the output sorted.
    fn carry_pass(mut list: Option<Box<Node<T>>>) -> Option<Box<Node<T>>> {
        let mut head: Option<Box<Node<T>>> = None;
        let mut tail = &mut head;
        let mut current: Option<Box<Node<T>>> = None;

        while let Some(mut next) = list {
            list = next.sibling.take();
            match current.take() {
                None => current = Some(next),
                Some(cur) => {
                    if cur.rank < next.rank {
                        // cur is done: every remaining rank is larger
                        tail = &mut tail.insert(cur).sibling;
                        current = Some(next);
                    } else if list.as_ref().map_or(false, |third| third.rank == cur.rank) {
                        // three of a kind: pass cur through, let the
                        // trailing two link on the next iteration
                        tail = &mut tail.insert(cur).sibling;
                        current = Some(next);
                    } else {
                        current = Some(Self::link(cur, next));
                    }
                }
            }
        }
        if let Some(cur) = current {
            *tail = Some(cur);
        }
        head
    }

    /// Links two equal-rank trees; the larger entry becomes the new
    /// highest-rank child of the smaller. Ties keep the left operand as
    /// parent.
    fn link(a: Box<Node<T>>, b: Box<Node<T>>) -> Box<Node<T>> {
        debug_assert_eq!(a.rank, b.rank);
        let (mut parent, mut child) = if a.entry <= b.entry { (a, b) } else { (b, a) };
        child.sibling = parent.child.take();
        parent.child = Some(child);
        parent.rank += 1;
        parent
    }

    /// Finds the minimal root and unlinks it from the root list.
    fn detach_min_root(&mut self) -> Option<Box<Node<T>>> {
        let mut best = 0usize;
        {
            let mut best_entry: Option<&T> = None;
            let mut idx = 0usize;
            let mut cur = self.head.as_deref();
            while let Some(node) = cur {
                if best_entry.map_or(true, |b| node.entry < *b) {
                    best_entry = Some(&node.entry);
                    best = idx;
                }
                idx += 1;
                cur = node.sibling.as_deref();
            }
            best_entry?;
        }

        let mut link = &mut self.head;
        for _ in 0..best {
            match link {
                Some(node) => link = &mut node.sibling,
                None => return None,
            }
        }
        let mut min = link.take()?;
        *link = min.sibling.take();
        Some(min)
    }

    /// Checks the full representation invariant. Intended for tests.
    ///
    /// Verifies strictly increasing root ranks, well-formed binomial trees
    /// (a rank-k root has children of ranks k-1..0 and 2^k descendants),
    /// heap order on every edge, and that `len` matches the forest.
    pub fn verify_internal_structure(&self) -> bool {
        let mut total = 0usize;
        let mut prev_rank: Option<u32> = None;
        let mut cur = self.head.as_deref();
        while let Some(root) = cur {
            if prev_rank.map_or(false, |p| p >= root.rank) {
                return false;
            }
            prev_rank = Some(root.rank);
            match Self::tree_size(root) {
                Some(size) => total += size,
                None => return false,
            }
            cur = root.sibling.as_deref();
        }
        total == self.len
    }

    /// Size of a well-formed binomial tree, or `None` if malformed.
    fn tree_size(node: &Node<T>) -> Option<usize> {
        let mut size = 1usize;
        let mut expected = node.rank;
        let mut cur = node.child.as_deref();
        while let Some(child) = cur {
            if expected == 0 || child.rank != expected - 1 || child.entry < node.entry {
                return None;
            }
            expected -= 1;
            size += Self::tree_size(child)?;
            cur = child.sibling.as_deref();
        }
        (expected == 0 && size == 1usize << node.rank).then_some(size)
    }
}

impl<T: Ord> Default for BinomialHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Drop for BinomialHeap<T> {
    /// Worklist teardown; the default recursive drop would otherwise
    /// descend the longest child/sibling path.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.head.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.child.take());
            stack.extend(node.sibling.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = BinomialHeap::new();
        assert!(heap.is_empty());

        heap.insert(5);
        heap.insert(3);
        heap.insert(7);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_min(), Ok(&3));
        assert!(heap.verify_internal_structure());

        assert_eq!(heap.extract_min(), Ok(3));
        assert_eq!(heap.peek_min(), Ok(&5));
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap: BinomialHeap<i32> = BinomialHeap::new();
        assert_eq!(heap.peek_min(), Err(EmptyCollectionError));
        assert_eq!(heap.extract_min(), Err(EmptyCollectionError));
    }

    #[test]
    fn test_merge_known_sequence() {
        let mut a = BinomialHeap::new();
        a.insert(2);
        a.insert(7);

        let mut b = BinomialHeap::new();
        b.insert(1);
        b.insert(9);

        a.merge(b);
        assert_eq!(a.len(), 4);
        assert!(a.verify_internal_structure());

        assert_eq!(a.extract_min(), Ok(1));
        assert_eq!(a.extract_min(), Ok(2));
        assert_eq!(a.extract_min(), Ok(7));
        assert_eq!(a.extract_min(), Ok(9));
        assert_eq!(a.extract_min(), Err(EmptyCollectionError));
    }

    #[test]
    fn test_forest_shape_tracks_binary_representation() {
        let mut heap = BinomialHeap::new();
        for entry in 0..64 {
            heap.insert(entry);
            assert!(heap.verify_internal_structure());
        }
        // 64 entries: a single B_6 tree
        let root = heap.head.as_deref().unwrap();
        assert_eq!(root.rank, 6);
        assert!(root.sibling.is_none());
    }

    #[test]
    fn test_interleaved_operations() {
        let mut heap = BinomialHeap::new();
        for entry in [13, 4, 9, 4, 21, 0, 8] {
            heap.insert(entry);
        }
        assert_eq!(heap.extract_min(), Ok(0));
        heap.insert(2);
        heap.insert(17);
        assert_eq!(heap.extract_min(), Ok(2));
        assert_eq!(heap.extract_min(), Ok(4));
        assert!(heap.verify_internal_structure());
        assert_eq!(heap.len(), 5);
    }

    #[test]
    fn test_merge_empty_cases() {
        let mut a: BinomialHeap<i32> = BinomialHeap::new();
        let b = BinomialHeap::new();
        a.merge(b);
        assert!(a.is_empty());

        let mut c = BinomialHeap::new();
        c.insert(1);
        let d = BinomialHeap::new();
        c.merge(d);
        assert_eq!(c.len(), 1);

        let mut e = BinomialHeap::new();
        let mut f = BinomialHeap::new();
        f.insert(2);
        f.insert(3);
        e.merge(f);
        assert_eq!(e.len(), 2);
        assert_eq!(e.extract_min(), Ok(2));
    }

    #[test]
    fn test_duplicates() {
        let mut heap = BinomialHeap::new();
        for _ in 0..33 {
            heap.insert(7);
        }
        assert!(heap.verify_internal_structure());
        for _ in 0..33 {
            assert_eq!(heap.extract_min(), Ok(7));
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_deep_drop_does_not_overflow() {
        let mut heap = BinomialHeap::new();
        for entry in 0..100_000 {
            heap.insert(entry);
        }
        drop(heap);
    }
}
