//! Order-statistics AVL tree
//!
//! A height-balanced binary tree keyed by in-order *position*, not by value.
//! Each node caches its subtree size, so positional get/insert/remove all
//! descend by comparing the target index against the left subtree's size:
//!
//!   index < size(left)   → go left
//!   index = size(left)   → this node
//!   index > size(left)   → go right with index - size(left) - 1
//!
//! Values are never compared; the tree is a sequence, not a sorted set.

mod node;
mod traversal;

pub use traversal::{InvariantViolation, Iter, TreeShape};

use node::{Link, TreeNode};
use thiserror::Error;

/// Positional access outside the valid range
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Index outside `0..len` (reads/removes) or `0..=len` (inserts)
    #[error("index {index} out of range for tree of length {len}")]
    OutOfRange {
        /// Requested position
        index: usize,
        /// Tree length at the time of the call
        len: usize,
    },

    /// `get` on a tree with no elements
    #[error("tree is empty")]
    EmptyStructure,
}

/// Sequence stored in an order-statistics AVL tree
///
/// All operations are O(log n) except iteration and [`verify`](Self::verify).
#[derive(Debug, Clone)]
pub struct OrderStatisticTree<T> {
    root: Link<T>,
}

impl<T> Default for OrderStatisticTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderStatisticTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Number of stored elements, O(1)
    #[inline]
    pub fn len(&self) -> usize {
        node::size(&self.root)
    }

    /// Alias for [`len`](Self::len)
    #[inline]
    pub fn size(&self) -> usize {
        self.len()
    }

    /// True when no elements are stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the root (0 when empty)
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Element at in-order position `index`
    pub fn get(&self, index: usize) -> Result<&T, TreeError> {
        self.check_get(index)?;
        TreeNode::get(&self.root, index).ok_or(TreeError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Insert `value` so it becomes in-order position `index`.
    ///
    /// Valid for `index ≤ len()`; `index == len()` appends. Elements at
    /// positions ≥ `index` shift right by one.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), TreeError> {
        let len = self.len();
        if index > len {
            return Err(TreeError::OutOfRange { index, len });
        }
        self.root = Some(TreeNode::insert(self.root.take(), index, value));
        Ok(())
    }

    /// Append `value` at the end
    pub fn push(&mut self, value: T) {
        let len = self.len();
        self.root = Some(TreeNode::insert(self.root.take(), len, value));
    }

    /// Remove and return the element at in-order position `index`.
    ///
    /// Elements at positions > `index` shift left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T, TreeError> {
        let len = self.len();
        if index >= len {
            return Err(TreeError::OutOfRange { index, len });
        }
        let (root, removed) = TreeNode::remove(self.root.take(), index);
        self.root = root;
        removed.ok_or(TreeError::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// In-order iterator over all elements
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::starting_at(&self.root, 0)
    }

    /// In-order iterator starting at position `start` (empty if past the end)
    pub fn iter_from(&self, start: usize) -> Iter<'_, T> {
        Iter::starting_at(&self.root, start)
    }

    /// Check every node's cached size and height and the AVL balance.
    pub fn verify(&self) -> Result<TreeShape, InvariantViolation> {
        traversal::verify(&self.root)
    }

    fn check_get(&self, index: usize) -> Result<(), TreeError> {
        let len = self.len();
        if len == 0 {
            Err(TreeError::EmptyStructure)
        } else if index >= len {
            Err(TreeError::OutOfRange { index, len })
        } else {
            Ok(())
        }
    }
}

impl<T: Clone> OrderStatisticTree<T> {
    /// Copy the contents out in order
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Extend<T> for OrderStatisticTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for OrderStatisticTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T> IntoIterator for &'a OrderStatisticTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
