// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scapegoat ordered set.
//!
//! A binary search tree that keeps its height within `log_{1/α}(n)` without
//! rotations or parent links. When an insertion lands deeper than that
//! bound, the insertion path is walked back up to the first ancestor whose
//! child holds more than `α` of its weight (the scapegoat). That subtree is
//! flattened in order and relinked as a perfectly balanced subtree, reusing
//! the existing arena slots.
//!
//! Insertion is amortized `O(log n)`; search is `O(log n)` worst case.

use std::cmp::Ordering;

use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::keys::NodeKey;

/// Weight-balance factor used by [`ScapegoatSet::new`].
pub const DEFAULT_BALANCE_FACTOR: f64 = 0.7;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
}

/// Ordered set of unique keys stored in a scapegoat tree.
///
/// # Example
///
/// ```
/// use obj_lite_tree::ScapegoatSet;
///
/// let mut set = ScapegoatSet::new();
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
///
/// let keys: Vec<_> = set.keys().copied().collect();
/// assert_eq!(keys, vec![1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct ScapegoatSet<K> {
    nodes: SlotMap<NodeKey, Node<K>>,
    root: Option<NodeKey>,
    balance_factor: f64,
    rebuilds: usize,
}

impl<K: Ord> ScapegoatSet<K> {
    /// Creates an empty set with [`DEFAULT_BALANCE_FACTOR`].
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            balance_factor: DEFAULT_BALANCE_FACTOR,
            rebuilds: 0,
        }
    }

    /// Creates an empty set with the given weight-balance factor.
    ///
    /// Values closer to 0.5 keep the tree tighter at the cost of more
    /// frequent rebuilds.
    pub fn with_balance_factor(balance_factor: f64) -> Result<Self> {
        Self::with_capacity_and_balance_factor(0, balance_factor)
    }

    /// Creates an empty set with room for `capacity` keys.
    pub fn with_capacity_and_balance_factor(capacity: usize, balance_factor: f64) -> Result<Self> {
        if !(balance_factor > 0.5 && balance_factor < 1.0) {
            return Err(Error::InvalidBalanceFactor(balance_factor));
        }
        Ok(Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            root: None,
            balance_factor,
            rebuilds: 0,
        })
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set holds no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the weight-balance factor.
    pub fn balance_factor(&self) -> f64 {
        self.balance_factor
    }

    /// Number of subtree rebuilds performed so far.
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// Deepest node depth (root at 0) allowed for the current size.
    pub fn depth_limit(&self) -> usize {
        depth_limit(self.nodes.len(), self.balance_factor)
    }

    /// Number of levels in the tree (0 for an empty set).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeKey, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((key, level)) = stack.pop() {
            height = height.max(level);
            let node = &self.nodes[key];
            stack.extend(node.left.map(|k| (k, level + 1)));
            stack.extend(node.right.map(|k| (k, level + 1)));
        }
        height
    }

    /// Inserts `key`. Returns `false` and leaves the set unchanged if an
    /// equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let mut path: Vec<NodeKey> = Vec::with_capacity(self.depth_limit() + 2);
        let mut current = self.root;
        let mut went_left = false;

        while let Some(node_key) = current {
            let node = &self.nodes[node_key];
            match key.cmp(&node.key) {
                Ordering::Equal => return false,
                Ordering::Less => {
                    current = node.left;
                    went_left = true;
                }
                Ordering::Greater => {
                    current = node.right;
                    went_left = false;
                }
            }
            path.push(node_key);
        }

        let inserted = self.nodes.insert(Node {
            key,
            left: None,
            right: None,
        });

        match path.last() {
            None => self.root = Some(inserted),
            Some(&parent) if went_left => self.nodes[parent].left = Some(inserted),
            Some(&parent) => self.nodes[parent].right = Some(inserted),
        }

        if path.len() > self.depth_limit() {
            self.rebalance(&path, inserted);
        }

        true
    }

    /// Returns the handle of the node holding `key`, if present.
    pub fn find(&self, key: &K) -> Option<NodeKey> {
        let mut current = self.root;
        while let Some(node_key) = current {
            let node = &self.nodes[node_key];
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(node_key),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Returns `true` if the set contains `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the key stored under `handle`, or `None` if it is stale.
    pub fn get(&self, handle: NodeKey) -> Option<&K> {
        self.nodes.get(handle).map(|node| &node.key)
    }

    /// In-order iterator over `(handle, key)` pairs, ascending.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.nodes, self.root)
    }

    /// In-order iterator over keys, ascending.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(_, key)| key)
    }

    /// Removes every key. Existing handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Find the scapegoat on the insertion path and rebuild its subtree.
    fn rebalance(&mut self, path: &[NodeKey], inserted: NodeKey) {
        let mut child = inserted;
        let mut child_size = 1usize;

        for (i, &ancestor) in path.iter().enumerate().rev() {
            let node = &self.nodes[ancestor];
            let sibling = if node.left == Some(child) {
                node.right
            } else {
                node.left
            };
            let size = child_size + self.subtree_size(sibling) + 1;

            if child_size as f64 > self.balance_factor * size as f64 {
                let parent = i.checked_sub(1).map(|p| path[p]);
                self.rebuild(ancestor, parent, size);
                return;
            }

            child = ancestor;
            child_size = size;
        }
    }

    fn subtree_size(&self, root: Option<NodeKey>) -> usize {
        let mut size = 0;
        let mut stack: Vec<NodeKey> = root.into_iter().collect();
        while let Some(key) = stack.pop() {
            size += 1;
            let node = &self.nodes[key];
            stack.extend(node.left);
            stack.extend(node.right);
        }
        size
    }

    /// Relink the subtree at `root` into a perfectly balanced shape.
    fn rebuild(&mut self, root: NodeKey, parent: Option<NodeKey>, size: usize) {
        let mut sorted = Vec::with_capacity(size);
        sorted.extend(Iter::new(&self.nodes, Some(root)).map(|(handle, _)| handle));

        let new_root = self.link_balanced(&sorted);
        match parent {
            None => self.root = new_root,
            Some(parent) => {
                let parent = &mut self.nodes[parent];
                if parent.left == Some(root) {
                    parent.left = new_root;
                } else {
                    parent.right = new_root;
                }
            }
        }

        self.rebuilds += 1;
        tracing::trace!(size, total = self.nodes.len(), "rebuilt scapegoat subtree");
    }

    fn link_balanced(&mut self, sorted: &[NodeKey]) -> Option<NodeKey> {
        if sorted.is_empty() {
            return None;
        }
        let mid = sorted.len() / 2;
        let left = self.link_balanced(&sorted[..mid]);
        let right = self.link_balanced(&sorted[mid + 1..]);
        let node = &mut self.nodes[sorted[mid]];
        node.left = left;
        node.right = right;
        Some(sorted[mid])
    }
}

/// `floor(log_{1/α}(n))`, the depth bound for `n` nodes.
fn depth_limit(n: usize, balance_factor: f64) -> usize {
    if n <= 1 {
        return 0;
    }
    ((n as f64).ln() / (1.0 / balance_factor).ln()).floor() as usize
}

impl<K: Ord> Default for ScapegoatSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> Extend<K> for ScapegoatSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for ScapegoatSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, K: Ord> IntoIterator for &'a ScapegoatSet<K> {
    type Item = (NodeKey, &'a K);
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// In-order iterator over a [`ScapegoatSet`].
pub struct Iter<'a, K> {
    nodes: &'a SlotMap<NodeKey, Node<K>>,
    stack: Vec<NodeKey>,
    next: Option<NodeKey>,
}

impl<'a, K> Iter<'a, K> {
    fn new(nodes: &'a SlotMap<NodeKey, Node<K>>, root: Option<NodeKey>) -> Self {
        Self {
            nodes,
            stack: Vec::new(),
            next: root,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = (NodeKey, &'a K);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(key) = self.next {
            self.stack.push(key);
            self.next = self.nodes[key].left;
        }
        let key = self.stack.pop()?;
        let node = &self.nodes[key];
        self.next = node.right;
        Some((key, &node.key))
    }
}
