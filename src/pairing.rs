//! Pairing heap
//!
//! A single heap-ordered tree in left-child/right-sibling form. Melding
//! two trees is one pointer move (the larger root becomes the leftmost
//! child of the smaller), which makes insert and merge O(1); the deferred
//! work is paid at `extract_min`, where the orphaned children are combined
//! with the classic two-pass pairing scheme.
//!
//! Both the two-pass combine and teardown are iterative. A heap built by n
//! inserts is one root with an O(n)-long child chain, so anything recursive
//! over siblings would overflow the stack exactly on the inputs that matter.
//!
//! # Time Complexity
//!
//! | Operation     | Complexity          |
//! |---------------|---------------------|
//! | `insert`      | O(1)                |
//! | `peek_min`    | O(1)                |
//! | `extract_min` | O(log n) amortized  |
//! | `merge`       | O(1)                |

use crate::traits::{EmptyCollectionError, MergeableHeap, MinHeap};
use smallvec::SmallVec;

struct Node<T> {
    entry: T,
    /// Leftmost child.
    child: Option<Box<Node<T>>>,
    /// Next sibling on the parent's child chain.
    sibling: Option<Box<Node<T>>>,
}

/// Pairing min-heap
///
/// # Example
///
/// ```rust
/// use mergeable_heaps::{MergeableHeap, MinHeap};
/// use mergeable_heaps::pairing::PairingHeap;
///
/// let mut heap = PairingHeap::new();
/// heap.insert(5);
/// heap.insert(3);
/// heap.insert(7);
///
/// assert_eq!(heap.peek_min(), Ok(&3));
/// assert_eq!(heap.extract_min(), Ok(3));
/// assert_eq!(heap.extract_min(), Ok(5));
/// ```
pub struct PairingHeap<T: Ord> {
    /// The root; always the global minimum.
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T: Ord> MinHeap<T> for PairingHeap<T> {
    fn new() -> Self {
        Self { head: None, len: 0 }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn insert(&mut self, entry: T) {
        let singleton = Box::new(Node {
            entry,
            child: None,
            sibling: None,
        });
        self.head = Some(match self.head.take() {
            Some(head) => Self::meld(head, singleton),
            None => singleton,
        });
        self.len += 1;
    }

    fn peek_min(&self) -> Result<&T, EmptyCollectionError> {
        self.head
            .as_deref()
            .map(|node| &node.entry)
            .ok_or(EmptyCollectionError)
    }

    fn extract_min(&mut self) -> Result<T, EmptyCollectionError> {
        let mut head = self.head.take().ok_or(EmptyCollectionError)?;
        self.head = head.child.take().and_then(Self::combine_siblings);
        self.len -= 1;

        let Node { entry, .. } = *head;
        Ok(entry)
    }
}

impl<T: Ord> MergeableHeap<T> for PairingHeap<T> {
    fn merge(&mut self, mut other: Self) {
        self.head = match (self.head.take(), other.head.take()) {
            (Some(a), Some(b)) => Some(Self::meld(a, b)),
            (root, None) | (None, root) => root,
        };
        self.len += other.len;
        other.len = 0;
    }
}

impl<T: Ord> PairingHeap<T> {
    /// Melds two trees: the larger entry is pushed onto the smaller's child
    /// chain. Ties keep the left operand as the new root.
    fn meld(a: Box<Node<T>>, b: Box<Node<T>>) -> Box<Node<T>> {
        let (mut parent, mut child) = if a.entry <= b.entry { (a, b) } else { (b, a) };
        child.sibling = parent.child.take();
        parent.child = Some(child);
        parent
    }

    /// Two-pass combine of a detached sibling chain.
    ///
    /// Pass one melds adjacent pairs left to right; pass two folds the
    /// melded trees right to left into a single root.
    fn combine_siblings(first: Box<Node<T>>) -> Option<Box<Node<T>>> {
        let mut melded: SmallVec<[Box<Node<T>>; 16]> = SmallVec::new();
        let mut cur = Some(first);
        while let Some(mut a) = cur {
            cur = a.sibling.take();
            match cur {
                Some(mut b) => {
                    cur = b.sibling.take();
                    melded.push(Self::meld(a, b));
                }
                None => melded.push(a),
            }
        }

        let mut result: Option<Box<Node<T>>> = None;
        while let Some(tree) = melded.pop() {
            result = Some(match result {
                Some(acc) => Self::meld(tree, acc),
                None => tree,
            });
        }
        result
    }

    /// Checks heap order along every child chain and that the node count
    /// matches `len`. Intended for tests.
    pub fn verify_internal_structure(&self) -> bool {
        let mut count = 0usize;
        let mut stack: Vec<(&Node<T>, Option<&T>)> = Vec::new();
        if let Some(root) = self.head.as_deref() {
            stack.push((root, None));
        }
        while let Some((node, bound)) = stack.pop() {
            if bound.map_or(false, |b| node.entry < *b) {
                return false;
            }
            count += 1;
            if let Some(sibling) = node.sibling.as_deref() {
                // siblings share this node's parent bound
                stack.push((sibling, bound));
            }
            if let Some(child) = node.child.as_deref() {
                stack.push((child, Some(&node.entry)));
            }
        }
        count == self.len
    }
}

impl<T: Ord> Default for PairingHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Drop for PairingHeap<T> {
    /// Worklist teardown; child chains can be as long as the heap itself.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.head.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.child.take());
            stack.extend(node.sibling.take());
        }
    }
}
