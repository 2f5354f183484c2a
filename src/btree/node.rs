/// A single node of the tree.
///
/// Leaf and internal nodes share the ordered key vector, only internal nodes
/// carry children. The capacity invariant (between `order - 1` and
/// `2 * order - 1` keys for every non-root node) is maintained by
/// [`split_child`](Node::split_child) on the way down during insertion and by
/// [`fill_child`](Node::fill_child) on the way down during removal, so no
/// operation ever has to re-ascend the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node<K> {
    Leaf { keys: Vec<K> },
    Internal { keys: Vec<K>, children: Vec<Node<K>> },
}

impl<K> Node<K> {
    pub(crate) fn empty_leaf() -> Node<K> {
        Node::Leaf { keys: Vec::new() }
    }

    pub(crate) fn keys(&self) -> &[K] {
        match self {
            Node::Leaf { keys } | Node::Internal { keys, .. } => keys,
        }
    }

    fn keys_mut(&mut self) -> &mut Vec<K> {
        match self {
            Node::Leaf { keys } | Node::Internal { keys, .. } => keys,
        }
    }

    pub(crate) fn children(&self) -> &[Node<K>] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Internal { children, .. } => children,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub(crate) fn is_full(&self, order: usize) -> bool {
        self.keys().len() == (2 * order) - 1
    }

    fn child_mut(&mut self, i: usize) -> &mut Node<K> {
        match self {
            Node::Internal { children, .. } => &mut children[i],
            Node::Leaf { .. } => unreachable!("leaf nodes have no children"),
        }
    }

    /// Total number of keys in the subtree rooted at this node.
    #[cfg(test)]
    pub(crate) fn count_keys(&self) -> usize {
        self.keys().len()
            + self
                .children()
                .iter()
                .map(|c| c.count_keys())
                .sum::<usize>()
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    /// Search for a key in the subtree rooted at this node.
    ///
    /// A missing child at the descent position counts as not-found, so the
    /// membership check stays panic-free even on a malformed tree.
    pub(crate) fn search(&self, key: &K) -> bool {
        match self.keys().binary_search(key) {
            Ok(_) => true,
            Err(i) => match self {
                Node::Leaf { .. } => false,
                Node::Internal { children, .. } => {
                    children.get(i).map_or(false, |child| child.search(key))
                }
            },
        }
    }

    /// Turn a full root into a new root with a single key and two children.
    pub(crate) fn split_root(old_root: Node<K>, order: usize) -> Node<K> {
        let mut new_root = Node::Internal {
            keys: Vec::new(),
            children: vec![old_root],
        };
        new_root.split_child(0, order);
        new_root
    }

    /// Insert into a subtree whose root is guaranteed not to be full.
    ///
    /// Full children are split before descending into them, so the target
    /// leaf always has room. Returns `false` if the key was already present.
    pub(crate) fn insert_nonfull(&mut self, key: K, order: usize) -> bool {
        let mut i = match self.keys().binary_search(&key) {
            Ok(_) => return false,
            Err(i) => i,
        };

        if self.is_leaf() {
            self.keys_mut().insert(i, key);
            return true;
        }

        if self.children()[i].is_full(order) {
            // Splitting is reserved for new keys: a duplicate sitting in the
            // full child must leave it untouched.
            if self.children()[i].search(&key) {
                return false;
            }
            self.split_child(i, order);
            // The median of the split child moved up to position i and cannot
            // be the key itself, compare against it to pick the half that
            // receives the key.
            if key > self.keys()[i] {
                i += 1;
            }
        }
        self.child_mut(i).insert_nonfull(key, order)
    }

    /// Split the full child at position `i`, promoting its median key into
    /// this node.
    fn split_child(&mut self, i: usize, order: usize) {
        let Node::Internal { keys, children } = self else {
            unreachable!("only internal nodes can split a child");
        };
        let (median, right) = children[i].split_off_upper_half(order);
        keys.insert(i, median);
        children.insert(i + 1, right);
    }

    /// Split a full node (`2 * order - 1` keys) in half, returning the median
    /// key and the newly allocated right half. `self` keeps the lower half.
    fn split_off_upper_half(&mut self, order: usize) -> (K, Node<K>) {
        match self {
            Node::Leaf { keys } => {
                let upper_keys = keys.split_off(order);
                let median = keys.remove(order - 1);
                (median, Node::Leaf { keys: upper_keys })
            }
            Node::Internal { keys, children } => {
                let upper_keys = keys.split_off(order);
                let median = keys.remove(order - 1);
                let upper_children = children.split_off(order);
                (
                    median,
                    Node::Internal {
                        keys: upper_keys,
                        children: upper_children,
                    },
                )
            }
        }
    }

    /// Remove a key from the subtree rooted at this node.
    ///
    /// Children are topped up to at least `order` keys before descending into
    /// them, so removing a single key can never underflow a node below the
    /// current one. Only the root itself may end up keyless, which the index
    /// resolves by collapsing it.
    pub(crate) fn remove(&mut self, key: &K, order: usize) -> bool {
        match self.keys().binary_search(key) {
            Ok(i) => {
                if self.is_leaf() {
                    self.keys_mut().remove(i);
                    true
                } else {
                    self.remove_from_internal(key, i, order)
                }
            }
            Err(i) => {
                if self.is_leaf() {
                    // Not in the tree, removal is a no-op
                    return false;
                }
                let i = self.fill_child(i, order);
                self.child_mut(i).remove(key, order)
            }
        }
    }

    /// Remove the key at position `i` of an internal node by substituting its
    /// in-order predecessor or successor, or by merging the two neighbouring
    /// children when both are at minimum capacity.
    fn remove_from_internal(&mut self, key: &K, i: usize, order: usize) -> bool {
        let (left_len, right_len) = {
            let children = self.children();
            (children[i].keys().len(), children[i + 1].keys().len())
        };

        if left_len >= order {
            let predecessor = self.child_mut(i).remove_max(order);
            self.keys_mut()[i] = predecessor;
        } else if right_len >= order {
            let successor = self.child_mut(i + 1).remove_min(order);
            self.keys_mut()[i] = successor;
        } else {
            // Both neighbours are minimal: pull the key down into the merged
            // child and delete it there.
            self.merge_children(i);
            return self.child_mut(i).remove(key, order);
        }
        true
    }

    /// Remove and return the largest key of this subtree.
    fn remove_max(&mut self, order: usize) -> K {
        if let Node::Leaf { keys } = self {
            return keys.remove(keys.len() - 1);
        }
        let last = self.children().len() - 1;
        let last = self.fill_child(last, order);
        self.child_mut(last).remove_max(order)
    }

    /// Remove and return the smallest key of this subtree.
    fn remove_min(&mut self, order: usize) -> K {
        if let Node::Leaf { keys } = self {
            return keys.remove(0);
        }
        let first = self.fill_child(0, order);
        self.child_mut(first).remove_min(order)
    }

    /// Make sure the child at position `i` holds at least `order` keys before
    /// it is descended into, either by borrowing a key from an immediate
    /// sibling or by merging with one.
    ///
    /// Returns the position of the (possibly merged) child to descend into.
    fn fill_child(&mut self, i: usize, order: usize) -> usize {
        if self.children()[i].keys().len() >= order {
            return i;
        }

        let left_can_lend = i > 0 && self.children()[i - 1].keys().len() >= order;
        let right_can_lend =
            i + 1 < self.children().len() && self.children()[i + 1].keys().len() >= order;

        if left_can_lend {
            self.borrow_from_left(i);
            i
        } else if right_can_lend {
            self.borrow_from_right(i);
            i
        } else if i > 0 {
            self.merge_children(i - 1);
            i - 1
        } else {
            self.merge_children(i);
            i
        }
    }

    /// Rotate one key from the left sibling through the parent into the child
    /// at position `i` (plus the sibling's last child for internal nodes).
    fn borrow_from_left(&mut self, i: usize) {
        let Node::Internal { keys, children } = self else {
            unreachable!("only internal nodes can rebalance children");
        };
        let (left_of_i, from_i) = children.split_at_mut(i);
        let left = &mut left_of_i[i - 1];
        let child = &mut from_i[0];

        let moved_key = left.pop_last_key();
        let separator = std::mem::replace(&mut keys[i - 1], moved_key);
        child.keys_mut().insert(0, separator);
        if let (Node::Internal { children: from, .. }, Node::Internal { children: to, .. }) =
            (left, child)
        {
            if let Some(moved_child) = from.pop() {
                to.insert(0, moved_child);
            }
        }
    }

    /// Mirror image of [`borrow_from_left`](Node::borrow_from_left).
    fn borrow_from_right(&mut self, i: usize) {
        let Node::Internal { keys, children } = self else {
            unreachable!("only internal nodes can rebalance children");
        };
        let (up_to_i, right_of_i) = children.split_at_mut(i + 1);
        let child = &mut up_to_i[i];
        let right = &mut right_of_i[0];

        let moved_key = right.keys_mut().remove(0);
        let separator = std::mem::replace(&mut keys[i], moved_key);
        child.keys_mut().push(separator);
        if let (Node::Internal { children: to, .. }, Node::Internal { children: from, .. }) =
            (child, right)
        {
            if !from.is_empty() {
                to.push(from.remove(0));
            }
        }
    }

    /// Merge the child at position `i + 1` and the separating key at position
    /// `i` into the child at position `i`.
    fn merge_children(&mut self, i: usize) {
        let Node::Internal { keys, children } = self else {
            unreachable!("only internal nodes can merge children");
        };
        let separator = keys.remove(i);
        let right = children.remove(i + 1);
        children[i].absorb(separator, right);
    }

    /// Append the separating key and the contents of the right sibling.
    fn absorb(&mut self, separator: K, right: Node<K>) {
        match (self, right) {
            (Node::Leaf { keys }, Node::Leaf { keys: right_keys }) => {
                keys.push(separator);
                keys.extend(right_keys);
            }
            (
                Node::Internal { keys, children },
                Node::Internal {
                    keys: right_keys,
                    children: right_children,
                },
            ) => {
                keys.push(separator);
                keys.extend(right_keys);
                children.extend(right_children);
            }
            _ => unreachable!("siblings are always at the same depth"),
        }
    }

    fn pop_last_key(&mut self) -> K {
        let keys = self.keys_mut();
        keys.remove(keys.len() - 1)
    }
}

#[cfg(test)]
mod tests;
