//! Owned AVL node with cached subtree size
//!
//! Every mutating operation takes a subtree by value and hands back the new
//! subtree root, so rotations never need parent links.
//!
//! Node invariants (restored on the way back up from every insert/remove):
//!   size   = 1 + size(left) + size(right)
//!   height = 1 + max(height(left), height(right))
//!   |height(left) - height(right)| ≤ 1

use std::cmp::Ordering;
use std::mem;

/// Optional owned subtree
pub(crate) type Link<T> = Option<Box<TreeNode<T>>>;

/// Tree node keyed by in-order position
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<T> {
    pub(crate) value: T,

    /// Height of the subtree rooted here (leaf = 1)
    pub(crate) height: usize,

    /// Number of nodes in the subtree, including this one
    pub(crate) size: usize,

    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

/// Cached size of a possibly empty subtree
#[inline]
pub(crate) fn size<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Cached height of a possibly empty subtree
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<T> TreeNode<T> {
    /// Create a detached leaf
    pub(crate) fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 1,
            size: 1,
            left: None,
            right: None,
        })
    }

    /// Recompute height and size from the children
    #[inline]
    fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    /// height(left) - height(right)
    #[inline]
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Right rotation around `node`; its left child becomes the subtree root.
    ///
    /// ```text
    ///       y            x
    ///      / \          / \
    ///     x   C   →    A   y
    ///    / \              / \
    ///   A   B            B   C
    /// ```
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = node.left.take() else {
            return node;
        };
        node.left = pivot.right.take();
        node.update();
        pivot.right = Some(node);
        pivot.update();
        pivot
    }

    /// Mirror image of [`TreeNode::rotate_right`].
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = node.right.take() else {
            return node;
        };
        node.right = pivot.left.take();
        node.update();
        pivot.left = Some(node);
        pivot.update();
        pivot
    }

    /// Refresh cached fields and restore AVL balance at `node`.
    ///
    /// Children must already be balanced, so the factor here is at most ±2.
    pub(crate) fn rebalance(mut node: Box<Self>) -> Box<Self> {
        node.update();
        let factor = node.balance_factor();

        if factor > 1 {
            // Left-right: straighten the left child first
            if let Some(left) = node.left.take() {
                node.left = Some(if left.balance_factor() < 0 {
                    Self::rotate_left(left)
                } else {
                    left
                });
            }
            Self::rotate_right(node)
        } else if factor < -1 {
            // Right-left: straighten the right child first
            if let Some(right) = node.right.take() {
                node.right = Some(if right.balance_factor() > 0 {
                    Self::rotate_right(right)
                } else {
                    right
                });
            }
            Self::rotate_left(node)
        } else {
            node
        }
    }

    /// Value at in-order position `index` of the subtree
    pub(crate) fn get(mut link: &Link<T>, mut index: usize) -> Option<&T> {
        while let Some(node) = link {
            let left_size = size(&node.left);
            match index.cmp(&left_size) {
                Ordering::Less => link = &node.left,
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => {
                    index -= left_size + 1;
                    link = &node.right;
                }
            }
        }
        None
    }

    /// Insert `value` so that it lands at in-order position `index`.
    ///
    /// Callers guarantee `index ≤ size(link)`; larger indices append.
    pub(crate) fn insert(link: Link<T>, index: usize, value: T) -> Box<Self> {
        let Some(mut node) = link else {
            return Self::leaf(value);
        };

        let left_size = size(&node.left);
        if index <= left_size {
            node.left = Some(Self::insert(node.left.take(), index, value));
        } else {
            node.right = Some(Self::insert(node.right.take(), index - left_size - 1, value));
        }

        Self::rebalance(node)
    }

    /// Remove the node at in-order position `index`.
    ///
    /// Returns the new subtree root and the removed value (`None` if the
    /// index was past the end of the subtree).
    pub(crate) fn remove(link: Link<T>, index: usize) -> (Link<T>, Option<T>) {
        let Some(mut node) = link else {
            return (None, None);
        };

        let left_size = size(&node.left);
        let removed = match index.cmp(&left_size) {
            Ordering::Less => {
                let (left, removed) = Self::remove(node.left.take(), index);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(node.right.take(), index - left_size - 1);
                node.right = right;
                removed
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, only) | (only, None) => {
                    let TreeNode { value, .. } = *node;
                    return (only, Some(value));
                }
                (Some(left), Some(right)) => {
                    // Two children: pull the in-order successor into this slot
                    let (right, successor) = Self::take_min(right);
                    node.left = Some(left);
                    node.right = right;
                    Some(mem::replace(&mut node.value, successor))
                }
            },
        };

        (Some(Self::rebalance(node)), removed)
    }

    /// Detach the leftmost node of a non-empty subtree.
    fn take_min(mut node: Box<Self>) -> (Link<T>, T) {
        match node.left.take() {
            None => {
                let TreeNode { value, right, .. } = *node;
                (right, value)
            }
            Some(left) => {
                let (left, min) = Self::take_min(left);
                node.left = left;
                (Some(Self::rebalance(node)), min)
            }
        }
    }
}
