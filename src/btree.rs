use crate::error::{Error, Result};

use node::Node;

pub(crate) mod node;

/// Configuration for a [`BtreeIndex`].
#[derive(Debug, Clone)]
pub struct BtreeConfig {
    order: usize,
}

impl Default for BtreeConfig {
    fn default() -> Self {
        BtreeConfig { order: 2 }
    }
}

impl BtreeConfig {
    /// Set the order (minimum degree) of the tree.
    ///
    /// A node holds between `order - 1` and `2 * order - 1` keys, the root
    /// excepted. The default of 2 keeps nodes tiny so that even small key
    /// sets exercise splitting and merging.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }
}

/// In-memory B-tree index over an ordered key type.
///
/// Operations similar to the interface of [`std::collections::BTreeSet`] are
/// implemented: [`insert`](BtreeIndex::insert), [`remove`](BtreeIndex::remove)
/// and [`contains`](BtreeIndex::contains). Inserting an already present key
/// and removing an absent key are both no-ops that report `false`.
///
/// Each node is exclusively owned by its parent (the root by the index
/// itself), so dropping the index drops the whole tree and no node is ever
/// reachable from two places.
pub struct BtreeIndex<K> {
    root: Option<Node<K>>,
    order: usize,
    nr_elements: usize,
}

impl<K> BtreeIndex<K>
where
    K: Ord,
{
    /// Create a new empty index with the given configuration.
    pub fn with_config(config: BtreeConfig) -> Result<BtreeIndex<K>> {
        if config.order < 2 {
            return Err(Error::OrderTooSmall(config.order));
        }
        Ok(BtreeIndex {
            root: None,
            order: config.order,
            nr_elements: 0,
        })
    }

    /// Returns whether the index contains the given key.
    pub fn contains(&self, key: &K) -> bool {
        match &self.root {
            Some(root) => root.search(key),
            None => false,
        }
    }

    /// Insert a new key into the index.
    ///
    /// Returns `true` if the key was not present before. Inserting an
    /// existing key leaves the index unchanged and returns `false`.
    pub fn insert(&mut self, key: K) -> bool {
        let order = self.order;
        let root = self.root.get_or_insert_with(Node::empty_leaf);

        if root.is_full(order) {
            // A duplicate key must not restructure the tree, so rule it out
            // before committing to the root split below.
            if root.search(&key) {
                return false;
            }
            // Splitting a full root before descending is the only way the
            // tree grows in height.
            let old_root = std::mem::replace(root, Node::empty_leaf());
            *root = Node::split_root(old_root, order);
        }

        let inserted = root.insert_nonfull(key, order);
        if inserted {
            self.nr_elements += 1;
        }
        inserted
    }

    /// Remove a key from the index.
    ///
    /// Returns `true` if the key was present. Removing an absent key leaves
    /// the key set unchanged and returns `false`; note that the descent may
    /// still rebalance nodes (and even lower the root) on the way down, so
    /// the tree shape can change while all invariants and check results stay
    /// intact.
    pub fn remove(&mut self, key: &K) -> bool {
        let root = match self.root.as_mut() {
            Some(root) => root,
            None => return false,
        };

        let removed = root.remove(key, self.order);
        if removed {
            self.nr_elements -= 1;
        }

        // Rebalancing can leave the root without any key: a keyless internal
        // root is replaced by its single remaining child (height shrinks by
        // one), a keyless leaf root means the tree is now empty.
        if root.keys().is_empty() {
            self.root = match self.root.take() {
                Some(Node::Internal { mut children, .. }) => Some(children.remove(0)),
                _ => None,
            };
        }

        removed
    }

    /// Returns true if the index does not contain any elements.
    pub fn is_empty(&self) -> bool {
        self.nr_elements == 0
    }

    /// Returns the number of keys in the index.
    pub fn len(&self) -> usize {
        self.nr_elements
    }

    /// The order (minimum degree) this index was created with.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of node levels: 0 for the empty tree, 1 for a single leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node = self.root.as_ref();
        while let Some(n) = node {
            height += 1;
            node = n.children().first();
        }
        height
    }

    /// Return an iterator over all keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut stack = Vec::new();
        if let Some(root) = &self.root {
            stack.push(StackEntry::Node(root));
        }
        Iter { stack }
    }

    pub(crate) fn root(&self) -> Option<&Node<K>> {
        self.root.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn from_raw_parts(root: Option<Node<K>>, order: usize) -> BtreeIndex<K> {
        let nr_elements = root.as_ref().map_or(0, |r| r.count_keys());
        BtreeIndex {
            root,
            order,
            nr_elements,
        }
    }
}

enum StackEntry<'a, K> {
    /// A node whose entries still have to be expanded onto the stack.
    Node(&'a Node<K>),
    /// A single key ready to be emitted.
    Key(&'a K),
}

/// Iterator over the keys of a [`BtreeIndex`] in ascending order.
pub struct Iter<'a, K> {
    stack: Vec<StackEntry<'a, K>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.stack.pop() {
            match entry {
                StackEntry::Key(key) => return Some(key),
                StackEntry::Node(node) => match node {
                    Node::Leaf { keys } => {
                        // Push in reverse so the smallest key is popped first
                        for key in keys.iter().rev() {
                            self.stack.push(StackEntry::Key(key));
                        }
                    }
                    Node::Internal { keys, children } => {
                        for i in (0..children.len()).rev() {
                            if i < keys.len() {
                                self.stack.push(StackEntry::Key(&keys[i]));
                            }
                            self.stack.push(StackEntry::Node(&children[i]));
                        }
                    }
                },
            }
        }
        None
    }
}
