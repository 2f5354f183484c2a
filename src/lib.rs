//! An in-memory B-tree index that can verify its own structural invariants.
//!
//! The index implements insertion, deletion and search for any ordered key
//! type. A fixed battery of named invariant checks ([`check::run_checks`])
//! can be evaluated against a populated index, and the self-test harness
//! ([`run_test_file`]) builds an index from a newline-delimited key file and
//! reports the verdicts as a flat JSON object.

mod btree;
pub mod check;
mod error;
pub mod input;
mod selftest;

pub use btree::{BtreeConfig, BtreeIndex};
pub use check::CheckReport;
pub use error::{Error, Result};
pub use selftest::run_test_file;
