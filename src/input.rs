//! Loader for the newline-delimited key files consumed by the self-test
//! harness.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Read a key file: UTF-8 text with one unsigned integer per line.
///
/// The returned order is the file order, which is also the insertion order
/// into the tree. Surrounding whitespace is tolerated and blank lines are
/// skipped. A non-integer token fails the whole load with
/// [`Error::InvalidInput`] before any key is handed to the tree.
pub fn read_keys<P: AsRef<Path>>(path: P) -> Result<Vec<u64>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut keys = Vec::new();
    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        let key = token.parse::<u64>().map_err(|_| Error::InvalidInput {
            line: line_idx + 1,
            token: token.to_string(),
        })?;
        keys.push(key);
    }
    Ok(keys)
}
