//! Orchestration of the self-test protocol: load keys, build a tree by
//! repeated insertion, run the invariant battery.

use std::path::Path;

use crate::btree::{BtreeConfig, BtreeIndex};
use crate::check::{self, CheckReport};
use crate::error::Result;
use crate::input;

/// Build a tree from the key file at `path` and run all invariant checks
/// against it.
///
/// The tree uses the default order of 2, so even small fixtures force root
/// splits and multi-level rebalancing. Environment problems (unreadable
/// file, malformed key line) are returned as errors; failing invariants are
/// not errors but verdicts inside the returned [`CheckReport`].
pub fn run_test_file<P: AsRef<Path>>(path: P) -> Result<CheckReport> {
    let keys = input::read_keys(path)?;

    let mut index = BtreeIndex::with_config(BtreeConfig::default())?;
    for &key in &keys {
        index.insert(key);
    }

    Ok(check::run_checks(&index, &keys))
}
