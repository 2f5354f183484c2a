//! A fixed battery of named invariant checks for a [`BtreeIndex`].
//!
//! Each check is an independent boolean predicate over a fully built tree.
//! A failing invariant is a result, never an error: the whole point of the
//! self-test mode is to surface structural faults as data. The checks
//! traverse defensively so that even a deliberately corrupted tree cannot
//! panic the battery.

use crate::btree::node::Node;
use crate::btree::BtreeIndex;
use crate::error::Result;
use serde_derive::Serialize;

/// Verdicts of the invariant battery, one field per named check.
///
/// The field order is the reporting order and is stable, but the checks are
/// independent of each other. Serializes to a flat JSON object mapping the
/// check name to `1` (pass) or `0` (fail), e.g.
/// `{"sorted_order":1,"balanced_height":1,"node_fill":1,"child_count":1,"membership":1}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// An in-order traversal yields a strictly increasing key sequence.
    pub sorted_order: u8,
    /// Every leaf sits at the same depth below the root.
    pub balanced_height: u8,
    /// Every non-root node holds between `order - 1` and `2 * order - 1`
    /// keys, a present root between `1` and `2 * order - 1`.
    pub node_fill: u8,
    /// Every internal node has exactly one more child than keys.
    pub child_count: u8,
    /// Every expected key is found by searching from the root.
    pub membership: u8,
}

impl CheckReport {
    /// Whether every check of the battery passed.
    pub fn all_passed(&self) -> bool {
        self.sorted_order == 1
            && self.balanced_height == 1
            && self.node_fill == 1
            && self.child_count == 1
            && self.membership == 1
    }

    /// Serialize the verdicts as a flat JSON object.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Run the full battery against an index.
///
/// `expected_keys` are the keys the caller believes to be present (inserted
/// minus deleted, duplicates allowed) and drive the `membership` check.
pub fn run_checks<K>(index: &BtreeIndex<K>, expected_keys: &[K]) -> CheckReport
where
    K: Ord,
{
    CheckReport {
        sorted_order: check_sorted_order(index) as u8,
        balanced_height: check_balanced_height(index) as u8,
        node_fill: check_node_fill(index) as u8,
        child_count: check_child_count(index) as u8,
        membership: check_membership(index, expected_keys) as u8,
    }
}

/// Vacuously true for the empty tree.
fn check_sorted_order<K: Ord>(index: &BtreeIndex<K>) -> bool {
    let mut previous: Option<&K> = None;
    for key in index.iter() {
        if let Some(previous) = previous {
            if previous >= key {
                return false;
            }
        }
        previous = Some(key);
    }
    true
}

fn check_balanced_height<K: Ord>(index: &BtreeIndex<K>) -> bool {
    let mut leaf_depths = Vec::new();
    if let Some(root) = index.root() {
        collect_leaf_depths(root, 0, &mut leaf_depths);
    }
    leaf_depths.windows(2).all(|w| w[0] == w[1])
}

fn collect_leaf_depths<K>(node: &Node<K>, depth: usize, depths: &mut Vec<usize>) {
    match node {
        Node::Leaf { .. } => depths.push(depth),
        Node::Internal { children, .. } => {
            for child in children {
                collect_leaf_depths(child, depth + 1, depths);
            }
        }
    }
}

fn check_node_fill<K: Ord>(index: &BtreeIndex<K>) -> bool {
    let order = index.order();
    match index.root() {
        None => true,
        Some(root) => {
            let root_keys = root.keys().len();
            (1..=(2 * order) - 1).contains(&root_keys)
                && root.children().iter().all(|c| node_fill_ok(c, order))
        }
    }
}

fn node_fill_ok<K>(node: &Node<K>, order: usize) -> bool {
    let nr_keys = node.keys().len();
    (order - 1..=(2 * order) - 1).contains(&nr_keys)
        && node.children().iter().all(|c| node_fill_ok(c, order))
}

fn check_child_count<K: Ord>(index: &BtreeIndex<K>) -> bool {
    index.root().map_or(true, child_count_ok)
}

fn child_count_ok<K>(node: &Node<K>) -> bool {
    match node {
        Node::Leaf { .. } => true,
        Node::Internal { keys, children } => {
            children.len() == keys.len() + 1 && children.iter().all(child_count_ok)
        }
    }
}

fn check_membership<K: Ord>(index: &BtreeIndex<K>, expected_keys: &[K]) -> bool {
    expected_keys.iter().all(|key| index.contains(key))
}

#[cfg(test)]
mod tests;
