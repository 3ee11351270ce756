//! Lazy-consolidated heap (Fibonacci-style)
//!
//! Roots sit on a circular doubly linked list, every node's children form
//! another such ring, and a dedicated pointer tracks the minimal root.
//! Insert and merge just splice rings and are cheap; all restructuring is
//! deferred to `extract_min`, which consolidates the root list until at
//! most one root of each degree remains.
//!
//! Instead of aliased pointers, nodes live in a [`slotmap`] arena and link
//! to each other by key. Ring surgery becomes key reassignment, a stale
//! key is caught by the arena instead of dereferencing freed memory, and
//! teardown is the arena dropping its slots (no recursion to overflow).
//! The price is paid in `merge`: absorbing the donor's arena re-keys its
//! nodes, so union of two heaps costs O(min(n, m)) rather than the O(1)
//! splice of the aliased-pointer layout.
//!
//! This engine omits decrease-key, and with it the marks and cascading
//! cuts of the full Fibonacci heap; trees only ever get wider, never cut.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity          |
//! |---------------|---------------------|
//! | `insert`      | O(1)                |
//! | `peek_min`    | O(1)                |
//! | `extract_min` | O(log n) amortized  |
//! | `merge`       | O(min(n, m))        |

use crate::traits::{EmptyCollectionError, MergeableHeap, MinHeap};
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use smallvec::SmallVec;
use std::mem;

new_key_type! {
    /// Arena key for heap nodes.
    struct NodeKey;
}

/// A member of two rings at once: the sibling ring it shares with its
/// neighbours (`left`/`right`) and, through `child`, the ring of its own
/// children. A node alone in its ring is its own left and right neighbour.
struct Node<T> {
    entry: T,
    left: NodeKey,
    right: NodeKey,
    child: Option<NodeKey>,
    /// Number of children, i.e. the length of the ring under `child`.
    degree: usize,
}

/// Lazy-consolidated min-heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{MergeableHeap, MinHeap};
/// use mergeable_heaps::lazy::LazyHeap;
///
/// let mut heap = LazyHeap::new();
/// heap.insert(5);
/// heap.insert(1);
/// heap.insert(3);
///
/// assert_eq!(heap.peek_min(), Ok(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// ```
pub struct LazyHeap<T: Ord> {
    nodes: SlotMap<NodeKey, Node<T>>,
    /// Entry-minimal root; `None` exactly when the arena is empty.
    min: Option<NodeKey>,
}

impl<T: Ord> MinHeap<T> for LazyHeap<T> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            min: None,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Splices a singleton into the root ring next to the minimum.
    fn insert(&mut self, entry: T) {
        let key = self.nodes.insert_with_key(|k| Node {
            entry,
            left: k,
            right: k,
            child: None,
            degree: 0,
        });
        match self.min {
            Some(min) => {
                self.ring_insert(min, key);
                if self.nodes[key].entry < self.nodes[min].entry {
                    self.min = Some(key);
                }
            }
            None => self.min = Some(key),
        }
    }

    fn peek_min(&self) -> Result<&T, EmptyCollectionError> {
        self.min
            .map(|key| &self.nodes[key].entry)
            .ok_or(EmptyCollectionError)
    }

    /// Excises the minimal root, promotes its children, consolidates.
    fn extract_min(&mut self) -> Result<T, EmptyCollectionError> {
        let min_key = self.min.ok_or(EmptyCollectionError)?;

        if let Some(child) = self.nodes[min_key].child.take() {
            self.ring_splice(min_key, child);
        }
        let survivor = self.ring_remove(min_key);
        let node = self.nodes.remove(min_key).ok_or(EmptyCollectionError)?;

        match survivor {
            Some(start) => self.consolidate(start),
            None => self.min = None,
        }
        Ok(node.entry)
    }
}

impl<T: Ord> MergeableHeap<T> for LazyHeap<T> {
    /// Absorbs the donor's arena and splices its root ring into ours.
    ///
    /// The smaller operand is always the one re-keyed, so a long series of
    /// unions does not repeatedly pay for the large side.
    fn merge(&mut self, mut other: Self) {
        if other.nodes.is_empty() {
            return;
        }
        if self.nodes.is_empty() {
            *self = other;
            return;
        }
        if self.nodes.len() < other.nodes.len() {
            mem::swap(self, &mut other);
        }

        let donor = mem::take(&mut other.nodes);
        let donor_min = other.min.take();

        // move the donor nodes across, remembering each key translation
        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::new();
        for (old_key, node) in donor {
            let new_key = self.nodes.insert(node);
            remap.insert(old_key, new_key);
        }
        // second pass: the moved nodes still link to each other through
        // donor keys; rewrite them through the translation
        for (_, &new_key) in remap.iter() {
            let (left, right, child) = {
                let node = &self.nodes[new_key];
                (node.left, node.right, node.child)
            };
            let node = &mut self.nodes[new_key];
            node.left = remap[left];
            node.right = remap[right];
            node.child = child.map(|c| remap[c]);
        }

        if let (Some(self_min), Some(donor_min)) = (self.min, donor_min) {
            let donor_min = remap[donor_min];
            self.ring_splice(self_min, donor_min);
            if self.nodes[donor_min].entry < self.nodes[self_min].entry {
                self.min = Some(donor_min);
            }
        }
    }
}

impl<T: Ord> LazyHeap<T> {
    /// Inserts `node` (a singleton ring) into the ring holding `at`,
    /// immediately to its left.
    fn ring_insert(&mut self, at: NodeKey, node: NodeKey) {
        let left = self.nodes[at].left;
        self.nodes[node].left = left;
        self.nodes[node].right = at;
        self.nodes[left].right = node;
        self.nodes[at].left = node;
    }

    /// Concatenates the ring holding `b` into the ring holding `a`.
    /// The two rings must be distinct.
    fn ring_splice(&mut self, a: NodeKey, b: NodeKey) {
        let a_left = self.nodes[a].left;
        let b_left = self.nodes[b].left;
        self.nodes[a_left].right = b;
        self.nodes[b].left = a_left;
        self.nodes[b_left].right = a;
        self.nodes[a].left = b_left;
    }

    /// Detaches `node` from its ring, leaving it a singleton. Returns a
    /// remaining ring member, or `None` if `node` was alone.
    fn ring_remove(&mut self, node: NodeKey) -> Option<NodeKey> {
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;
        if right == node {
            return None;
        }
        self.nodes[left].right = right;
        self.nodes[right].left = left;
        self.nodes[node].left = node;
        self.nodes[node].right = node;
        Some(right)
    }

    /// Hangs `child` (a root) under `parent`.
    fn link(&mut self, parent: NodeKey, child: NodeKey) {
        self.ring_remove(child);
        match self.nodes[parent].child {
            Some(head) => self.ring_insert(head, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Combines equal-degree roots until each degree appears at most once,
    /// then re-aims the minimum pointer at the smallest survivor.
    ///
    /// When two roots of one degree meet, the larger entry goes under the
    /// smaller; on equal entries the tree that reached the degree table
    /// first (the left operand of the link) stays on top.
    fn consolidate(&mut self, start: NodeKey) {
        // snapshot the surviving roots before linking rewires the ring
        let mut roots: SmallVec<[NodeKey; 32]> = SmallVec::new();
        let mut cur = start;
        loop {
            roots.push(cur);
            cur = self.nodes[cur].right;
            if cur == start {
                break;
            }
        }

        let mut by_degree: Vec<Option<NodeKey>> = Vec::new();
        for &root in &roots {
            let mut tree = root;
            loop {
                let degree = self.nodes[tree].degree;
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(tree);
                        break;
                    }
                    Some(occupant) => {
                        let (parent, child) =
                            if self.nodes[tree].entry < self.nodes[occupant].entry {
                                (tree, occupant)
                            } else {
                                (occupant, tree)
                            };
                        self.link(parent, child);
                        tree = parent;
                    }
                }
            }
        }

        let mut min: Option<NodeKey> = None;
        for key in by_degree.into_iter().flatten() {
            min = Some(match min {
                Some(best) if self.nodes[best].entry <= self.nodes[key].entry => best,
                _ => key,
            });
        }
        self.min = min;
    }

    /// Checks the full representation invariant. Intended for tests.
    ///
    /// Verifies that `left`/`right` are mutually inverse and every ring
    /// closes, that `degree` counts the child ring, heap order on every
    /// parent/child edge, that the minimum pointer is minimal among roots,
    /// and that every arena slot is reachable.
    pub fn verify_internal_structure(&self) -> bool {
        let total = self.nodes.len();
        let Some(min) = self.min else {
            return total == 0;
        };
        let Some(min_node) = self.nodes.get(min) else {
            return false;
        };

        let mut visited = 0usize;
        let mut rings: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];
        while let Some((head, parent)) = rings.pop() {
            let mut members = 0usize;
            let mut cur = head;
            loop {
                let Some(node) = self.nodes.get(cur) else {
                    return false;
                };
                let Some(right) = self.nodes.get(node.right) else {
                    return false;
                };
                if right.left != cur {
                    return false;
                }
                match parent {
                    Some(p) => {
                        let Some(parent_node) = self.nodes.get(p) else {
                            return false;
                        };
                        if node.entry < parent_node.entry {
                            return false;
                        }
                    }
                    None => {
                        if node.entry < min_node.entry {
                            return false;
                        }
                    }
                }
                match node.child {
                    Some(child) => rings.push((child, Some(cur))),
                    None => {
                        if node.degree != 0 {
                            return false;
                        }
                    }
                }
                visited += 1;
                members += 1;
                if members > total {
                    // ring does not close; bail instead of spinning
                    return false;
                }
                cur = node.right;
                if cur == head {
                    break;
                }
            }
            if let Some(p) = parent {
                match self.nodes.get(p) {
                    Some(parent_node) if parent_node.degree == members => {}
                    _ => return false,
                }
            }
        }
        visited == total
    }
}

impl<T: Ord> Default for LazyHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Degrees of the roots, walking the root ring from the minimum.
    fn root_degrees<T: Ord>(heap: &LazyHeap<T>) -> Vec<usize> {
        let mut degrees = Vec::new();
        if let Some(min) = heap.min {
            let mut cur = min;
            loop {
                degrees.push(heap.nodes[cur].degree);
                cur = heap.nodes[cur].right;
                if cur == min {
                    break;
                }
            }
        }
        degrees
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = LazyHeap::new();
        assert!(heap.is_empty());

        heap.insert(5);
        heap.insert(1);
        heap.insert(3);

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek_min(), Ok(&1));
        assert!(heap.verify_internal_structure());

        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.peek_min(), Ok(&3));
        assert_eq!(heap.extract_min(), Ok(3));
        assert_eq!(heap.extract_min(), Ok(5));
        assert_eq!(heap.extract_min(), Err(EmptyCollectionError));
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap: LazyHeap<i32> = LazyHeap::new();
        assert_eq!(heap.peek_min(), Err(EmptyCollectionError));
        assert_eq!(heap.extract_min(), Err(EmptyCollectionError));
    }

    #[test]
    fn test_insert_is_lazy_extract_consolidates() {
        let mut heap = LazyHeap::new();
        for entry in 0..16 {
            heap.insert(entry);
        }
        // nothing consolidated yet: sixteen singleton roots
        assert_eq!(root_degrees(&heap), vec![0; 16]);

        assert_eq!(heap.extract_min(), Ok(0));
        // consolidation leaves pairwise-distinct root degrees
        let mut degrees = root_degrees(&heap);
        degrees.sort_unstable();
        let before = degrees.len();
        degrees.dedup();
        assert_eq!(degrees.len(), before);
        assert!(heap.verify_internal_structure());
    }

    #[test]
    fn test_merge() {
        let mut a = LazyHeap::new();
        a.insert(5);
        a.insert(10);

        let mut b = LazyHeap::new();
        b.insert(3);
        b.insert(7);

        a.merge(b);
        assert_eq!(a.len(), 4);
        assert_eq!(a.peek_min(), Ok(&3));
        assert!(a.verify_internal_structure());

        for expected in [3, 5, 7, 10] {
            assert_eq!(a.extract_min(), Ok(expected));
        }
    }

    #[test]
    fn test_merge_after_consolidation() {
        let mut a = LazyHeap::new();
        for entry in [9, 4, 6, 2, 11] {
            a.insert(entry);
        }
        assert_eq!(a.extract_min(), Ok(2));

        let mut b = LazyHeap::new();
        for entry in [8, 1, 5] {
            b.insert(entry);
        }
        assert_eq!(b.extract_min(), Ok(1));

        a.merge(b);
        assert_eq!(a.len(), 6);
        assert!(a.verify_internal_structure());

        let mut drained = Vec::new();
        while let Ok(entry) = a.extract_min() {
            drained.push(entry);
        }
        assert_eq!(drained, vec![4, 5, 6, 8, 9, 11]);
    }

    #[test]
    fn test_merge_empty_cases() {
        let mut a: LazyHeap<i32> = LazyHeap::new();
        a.merge(LazyHeap::new());
        assert!(a.is_empty());

        let mut b = LazyHeap::new();
        b.insert(4);
        b.merge(LazyHeap::new());
        assert_eq!(b.len(), 1);

        let mut c = LazyHeap::new();
        let mut d = LazyHeap::new();
        d.insert(6);
        d.insert(2);
        c.merge(d);
        assert_eq!(c.len(), 2);
        assert_eq!(c.extract_min(), Ok(2));
    }

    #[test]
    fn test_duplicates() {
        let mut heap = LazyHeap::new();
        for _ in 0..25 {
            heap.insert(3);
        }
        for _ in 0..25 {
            assert_eq!(heap.extract_min(), Ok(3));
        }
        assert!(heap.is_empty());
        assert_eq!(heap.nodes.len(), 0);
    }

    #[test]
    fn test_arena_reclaims_per_extraction() {
        let mut heap = LazyHeap::new();
        for entry in 0..100 {
            heap.insert(entry);
        }
        for expected in 0..100 {
            assert_eq!(heap.extract_min(), Ok(expected));
            // the extracted node's slot is released immediately
            assert_eq!(heap.nodes.len(), 99 - expected as usize);
        }
    }

    #[test]
    fn test_interleaved_operations() {
        let mut heap = LazyHeap::new();
        for entry in [20, 3, 15, 3, 42] {
            heap.insert(entry);
        }
        assert_eq!(heap.extract_min(), Ok(3));
        heap.insert(1);
        assert_eq!(heap.extract_min(), Ok(1));
        assert_eq!(heap.extract_min(), Ok(3));
        assert!(heap.verify_internal_structure());
        assert_eq!(heap.len(), 3);
    }
}
