use super::*;

#[test]
fn split_full_leaf() {
    let order = 2;
    let mut left: Node<u64> = Node::Leaf {
        keys: vec![1, 2, 3],
    };

    let (median, right) = left.split_off_upper_half(order);

    assert_eq!(2, median);
    assert_eq!(&[1], left.keys());
    assert_eq!(&[3], right.keys());
}

#[test]
fn split_full_internal() {
    let order = 2;
    let leaf = |k: u64| Node::Leaf { keys: vec![k] };
    let mut left: Node<u64> = Node::Internal {
        keys: vec![10, 20, 30],
        children: vec![leaf(5), leaf(15), leaf(25), leaf(35)],
    };

    let (median, right) = left.split_off_upper_half(order);

    assert_eq!(20, median);
    assert_eq!(&[10], left.keys());
    assert_eq!(&[30], right.keys());
    assert_eq!(2, left.children().len());
    assert_eq!(2, right.children().len());
}

#[test]
fn merge_sibling_leaves() {
    let mut parent: Node<u64> = Node::Internal {
        keys: vec![10, 20],
        children: vec![
            Node::Leaf { keys: vec![5] },
            Node::Leaf { keys: vec![15] },
            Node::Leaf { keys: vec![25, 30] },
        ],
    };

    parent.merge_children(0);

    assert_eq!(&[20], parent.keys());
    assert_eq!(2, parent.children().len());
    assert_eq!(&[5, 10, 15], parent.children()[0].keys());
}

#[test]
fn borrow_rotates_through_parent() {
    let mut parent: Node<u64> = Node::Internal {
        keys: vec![10],
        children: vec![
            Node::Leaf { keys: vec![3, 5] },
            Node::Leaf { keys: vec![15] },
        ],
    };

    // The right child is minimal, the left sibling can lend its largest key
    parent.borrow_from_left(1);

    assert_eq!(&[5], parent.keys());
    assert_eq!(&[3], parent.children()[0].keys());
    assert_eq!(&[10, 15], parent.children()[1].keys());
}
