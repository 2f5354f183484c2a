#![no_main]
use libfuzzer_sys::fuzz_target;

use checked_btree_index::check::run_checks;
use checked_btree_index::{BtreeConfig, BtreeIndex};
use std::collections::BTreeSet;

fuzz_target!(|data: (Vec<(bool, u32)>, u8)| {
    let order = data.1.max(2) as usize;
    let mut m = BTreeSet::new();
    let mut fixture: BtreeIndex<u32> =
        BtreeIndex::with_config(BtreeConfig::default().with_order(order)).unwrap();

    for (is_remove, key) in data.0 {
        if is_remove {
            assert_eq!(m.remove(&key), fixture.remove(&key));
        } else {
            assert_eq!(m.insert(key), fixture.insert(key));
        }
    }

    // Check len() function
    assert_eq!(m.len(), fixture.len());

    // The in-order traversals must be identical
    let m: Vec<u32> = m.into_iter().collect();
    let fixture_keys: Vec<u32> = fixture.iter().copied().collect();
    assert_eq!(m, fixture_keys);

    // Every structural invariant has to hold after arbitrary operations
    let report = run_checks(&fixture, &fixture_keys);
    assert!(report.all_passed(), "{:?}", report);
});
