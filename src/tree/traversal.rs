//! In-order traversal and structural verification
//!
//! The iterator keeps only the pending left spine on its stack, so it uses
//! O(log n) space and can start at any position after an O(log n) descent.

use std::cmp::Ordering;

use thiserror::Error;

use super::node::{height, size, Link, TreeNode};

/// In-order iterator over an [`OrderStatisticTree`](super::OrderStatisticTree)
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    /// Nodes whose value is still to be yielded, deepest on top
    stack: Vec<&'a TreeNode<T>>,

    /// Elements left to yield
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    /// Iterator positioned at in-order position `start` of `root`
    pub(crate) fn starting_at(root: &'a Link<T>, start: usize) -> Self {
        let total = size(root);
        let mut stack = Vec::with_capacity(height(root));
        let mut link = root;
        let mut index = start;

        while let Some(node) = link {
            let left_size = size(&node.left);
            match index.cmp(&left_size) {
                Ordering::Less => {
                    stack.push(node.as_ref());
                    link = &node.left;
                }
                Ordering::Equal => {
                    stack.push(node.as_ref());
                    break;
                }
                Ordering::Greater => {
                    index -= left_size + 1;
                    link = &node.right;
                }
            }
        }

        Self {
            stack,
            remaining: total.saturating_sub(start),
        }
    }

    fn push_left_spine(&mut self, mut link: &'a Link<T>) {
        while let Some(node) = link {
            self.stack.push(node.as_ref());
            link = &node.left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(&node.right);
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}

/// Shape of a tree that passed [`verify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeShape {
    /// Number of stored elements
    pub len: usize,

    /// Height of the root (0 when empty)
    pub height: usize,
}

/// Structural invariant broken at some node
///
/// `position` is the in-order position of the offending node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Cached subtree size disagrees with the actual node count
    #[error("stale size at position {position}: cached {cached}, actual {actual}")]
    StaleSize {
        /// In-order position of the node
        position: usize,
        /// Size stored in the node
        cached: usize,
        /// Size computed from the children
        actual: usize,
    },

    /// Cached height disagrees with the children's heights
    #[error("stale height at position {position}: cached {cached}, actual {actual}")]
    StaleHeight {
        /// In-order position of the node
        position: usize,
        /// Height stored in the node
        cached: usize,
        /// Height computed from the children
        actual: usize,
    },

    /// Child heights differ by more than one
    #[error("unbalanced at position {position}: left height {left}, right height {right}")]
    Unbalanced {
        /// In-order position of the node
        position: usize,
        /// Height of the left subtree
        left: usize,
        /// Height of the right subtree
        right: usize,
    },
}

/// Walk the whole tree and check every cached field and the AVL balance.
pub(crate) fn verify<T>(root: &Link<T>) -> Result<TreeShape, InvariantViolation> {
    let (len, height) = check(root, 0)?;
    Ok(TreeShape { len, height })
}

/// Returns the actual (size, height) of the subtree whose leftmost element
/// sits at in-order position `offset`.
fn check<T>(link: &Link<T>, offset: usize) -> Result<(usize, usize), InvariantViolation> {
    let Some(node) = link else {
        return Ok((0, 0));
    };

    let (left_size, left_height) = check(&node.left, offset)?;
    let position = offset + left_size;
    let (right_size, right_height) = check(&node.right, position + 1)?;

    let actual_size = 1 + left_size + right_size;
    if node.size != actual_size {
        return Err(InvariantViolation::StaleSize {
            position,
            cached: node.size,
            actual: actual_size,
        });
    }

    let actual_height = 1 + left_height.max(right_height);
    if node.height != actual_height {
        return Err(InvariantViolation::StaleHeight {
            position,
            cached: node.height,
            actual: actual_height,
        });
    }

    if left_height.abs_diff(right_height) > 1 {
        return Err(InvariantViolation::Unbalanced {
            position,
            left: left_height,
            right: right_height,
        });
    }

    Ok((actual_size, actual_height))
}
