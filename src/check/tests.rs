use super::*;
use crate::btree::node::Node;
use crate::btree::{BtreeConfig, BtreeIndex};

fn leaf(keys: Vec<u64>) -> Node<u64> {
    Node::Leaf { keys }
}

#[test]
fn json_field_order_is_stable() {
    let report = CheckReport {
        sorted_order: 1,
        balanced_height: 1,
        node_fill: 0,
        child_count: 1,
        membership: 1,
    };

    assert_eq!(
        r#"{"sorted_order":1,"balanced_height":1,"node_fill":0,"child_count":1,"membership":1}"#,
        report.to_json().unwrap()
    );
    assert_eq!(false, report.all_passed());
}

#[test]
fn empty_tree_passes_vacuously() {
    let t: BtreeIndex<u64> = BtreeIndex::with_config(BtreeConfig::default()).unwrap();
    let report = run_checks(&t, &[]);
    assert!(report.all_passed(), "{:?}", report);
}

#[test]
fn built_tree_passes_all_checks() {
    let mut t: BtreeIndex<u64> = BtreeIndex::with_config(BtreeConfig::default()).unwrap();
    let keys: Vec<u64> = (0..64).collect();
    for &k in &keys {
        t.insert(k);
    }

    let report = run_checks(&t, &keys);
    assert!(report.all_passed(), "{:?}", report);
    assert_eq!(
        r#"{"sorted_order":1,"balanced_height":1,"node_fill":1,"child_count":1,"membership":1}"#,
        report.to_json().unwrap()
    );
}

#[test]
fn detects_out_of_order_keys() {
    // Children swapped: the in-order traversal yields 9, 5, 1
    let root = Node::Internal {
        keys: vec![5],
        children: vec![leaf(vec![9]), leaf(vec![1])],
    };
    let t = BtreeIndex::from_raw_parts(Some(root), 2);

    let report = run_checks(&t, &[1, 5, 9]);
    assert_eq!(0, report.sorted_order);
    assert_eq!(0, report.membership);
    assert_eq!(1, report.balanced_height);
    assert_eq!(1, report.node_fill);
    assert_eq!(1, report.child_count);
}

#[test]
fn detects_wrong_child_count() {
    // Two keys but only two children instead of three
    let root = Node::Internal {
        keys: vec![5, 7],
        children: vec![leaf(vec![1]), leaf(vec![6])],
    };
    let t = BtreeIndex::from_raw_parts(Some(root), 2);

    let report = run_checks(&t, &[1, 5, 6, 7]);
    assert_eq!(0, report.child_count);
    assert_eq!(1, report.sorted_order);
    assert_eq!(1, report.membership);
}

#[test]
fn detects_unbalanced_leaves() {
    let root = Node::Internal {
        keys: vec![5],
        children: vec![
            Node::Internal {
                keys: vec![2],
                children: vec![leaf(vec![1]), leaf(vec![3])],
            },
            leaf(vec![9]),
        ],
    };
    let t = BtreeIndex::from_raw_parts(Some(root), 2);

    let report = run_checks(&t, &[1, 2, 3, 5, 9]);
    assert_eq!(0, report.balanced_height);
    assert_eq!(1, report.sorted_order);
    assert_eq!(1, report.child_count);
    assert_eq!(1, report.membership);
}

#[test]
fn detects_underfull_node() {
    // With order 3 every non-root node needs at least 2 keys
    let root = Node::Internal {
        keys: vec![10],
        children: vec![leaf(vec![5]), leaf(vec![20, 30])],
    };
    let t = BtreeIndex::from_raw_parts(Some(root), 3);

    let report = run_checks(&t, &[5, 10, 20, 30]);
    assert_eq!(0, report.node_fill);
    assert_eq!(1, report.sorted_order);
    assert_eq!(1, report.balanced_height);
    assert_eq!(1, report.child_count);
    assert_eq!(1, report.membership);
}

#[test]
fn membership_tracks_deletions() {
    let mut t: BtreeIndex<u64> = BtreeIndex::with_config(BtreeConfig::default()).unwrap();
    let keys: Vec<u64> = (0..32).collect();
    for &k in &keys {
        t.insert(k);
    }
    t.remove(&17);

    // The stale expectation still contains 17
    let report = run_checks(&t, &keys);
    assert_eq!(0, report.membership);

    let remaining: Vec<u64> = keys.iter().copied().filter(|&k| k != 17).collect();
    let report = run_checks(&t, &remaining);
    assert!(report.all_passed(), "{:?}", report);
}
