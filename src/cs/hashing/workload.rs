//! # Collision Workload
//!
//! The deterministic driver that fills a [`ChainedHashTable`] with the key sequence
//! `i * 7 + 3`, looks up twice as many keys as it inserted, tallies chain lengths,
//! deletes every third key and finally tears the table down.
//!
//! With the fixed table size the run always produces the same [`WorkloadReport`]:
//!
//! ```rust
//! use hashbench::cs::hashing::workload::run_workload;
//!
//! let report = run_workload().unwrap();
//! assert_eq!((report.found, report.not_found), (400, 200));
//! assert_eq!((report.total_nodes, report.max_chain), (200, 4));
//! assert_eq!(report.deleted, 67);
//! ```

use std::fmt;

use log::debug;

use super::separate::ChainedHashTable;
use crate::error::{Error, Result};

/// Number of keys inserted by the workload.
pub const NUM_KEYS: i32 = 200;

/// Every third generated key is deleted.
pub const DELETE_STRIDE: usize = 3;

/// Largest key count the driver accepts. Lookups run over `2 * num_keys`
/// indices, so the last generated key `(2 * num_keys - 1) * 7 + 3` must still fit
/// in an `i32`.
pub const MAX_NUM_KEYS: i32 = (i32::MAX - 3) / 14;

/// The `i`-th key of the workload, `i * 7 + 3`, or `None` if it overflows.
/// Consecutive keys land in different buckets, but the sequence wraps the table
/// every 64 keys.
pub fn workload_key(i: i32) -> Option<i32> {
    i.checked_mul(7)?.checked_add(3)
}

fn check_key_count(num_keys: i32) -> Result<()> {
    if (0..=MAX_NUM_KEYS).contains(&num_keys) {
        Ok(())
    } else {
        Err(Error::KeyCountOutOfRange {
            requested: num_keys,
            max: MAX_NUM_KEYS,
        })
    }
}

fn key_at(i: i32, num_keys: i32) -> Result<i32> {
    workload_key(i).ok_or(Error::KeyCountOutOfRange {
        requested: num_keys,
        max: MAX_NUM_KEYS,
    })
}

/// Outcome of one workload run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkloadReport {
    /// Lookup hits, counting hits on an even value twice.
    pub found: usize,
    pub not_found: usize,
    /// Sum of the capped per-bucket chain counts.
    pub total_nodes: usize,
    pub max_chain: usize,
    pub deleted: usize,
    /// Entries still alive at teardown.
    pub released: usize,
}

impl fmt::Display for WorkloadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Found: {}, Not found: {}", self.found, self.not_found)?;
        writeln!(
            f,
            "Total nodes: {}, Max chain length: {}",
            self.total_nodes, self.max_chain
        )?;
        write!(f, "Deleted {} keys", self.deleted)
    }
}

/// Inserts `value = i * 10` under `workload_key(i)` for every `i` in `0..num_keys`.
pub fn populate(table: &mut ChainedHashTable, num_keys: i32) -> Result<()> {
    check_key_count(num_keys)?;
    table.reserve(num_keys as usize)?;
    for i in 0..num_keys {
        table.insert(key_at(i, num_keys)?, i * 10)?;
    }
    Ok(())
}

/// Looks up `workload_key(i)` for `i` in `0..2 * num_keys`.
///
/// Returns `(found, not_found)`, where a hit on an even value counts twice.
pub fn probe(table: &ChainedHashTable, num_keys: i32) -> Result<(usize, usize)> {
    check_key_count(num_keys)?;
    let mut found = 0;
    let mut not_found = 0;

    for i in 0..num_keys * 2 {
        match table.lookup(key_at(i, num_keys)?) {
            Some(value) => {
                found += 1;
                if value % 2 == 0 {
                    found += 1;
                }
            }
            None => not_found += 1,
        }
    }

    Ok((found, not_found))
}

/// Sums the capped chain count of every bucket and tracks the longest one.
pub fn chain_stats(table: &ChainedHashTable) -> Result<(usize, usize)> {
    let mut total = 0;
    let mut max = 0;

    for bucket in 0..table.bucket_count() {
        let len = table.count_chain_length(bucket)?;
        total += len;
        max = max.max(len);
    }

    Ok((total, max))
}

/// Deletes `workload_key(i)` for every third `i` in `0..num_keys` and returns
/// how many deletes found their key.
pub fn prune(table: &mut ChainedHashTable, num_keys: i32) -> Result<usize> {
    check_key_count(num_keys)?;
    let mut deleted = 0;
    for i in (0..num_keys).step_by(DELETE_STRIDE) {
        if table.delete(key_at(i, num_keys)?) {
            deleted += 1;
        }
    }
    Ok(deleted)
}

/// Runs the complete workload on a fresh table.
pub fn run_workload() -> Result<WorkloadReport> {
    run_workload_with(NUM_KEYS, |_| {})
}

/// Runs the workload with `num_keys` keys, handing each line of the progress
/// transcript to `emit` as soon as it is known.
///
/// Fails with [`Error::KeyCountOutOfRange`] before touching the table if
/// `num_keys` is negative or above [`MAX_NUM_KEYS`].
pub fn run_workload_with<F>(num_keys: i32, mut emit: F) -> Result<WorkloadReport>
where
    F: FnMut(&str),
{
    check_key_count(num_keys)?;
    let mut table = ChainedHashTable::new();
    let mut report = WorkloadReport::default();

    emit("Inserting keys...");
    populate(&mut table, num_keys)?;
    debug!("inserted {} entries", table.len());

    emit("Looking up keys...");
    (report.found, report.not_found) = probe(&table, num_keys)?;
    emit(&format!(
        "Found: {}, Not found: {}",
        report.found, report.not_found
    ));

    emit("Counting collision chains...");
    (report.total_nodes, report.max_chain) = chain_stats(&table)?;
    emit(&format!(
        "Total nodes: {}, Max chain length: {}",
        report.total_nodes, report.max_chain
    ));

    emit("Deleting keys...");
    report.deleted = prune(&mut table, num_keys)?;
    emit(&format!("Deleted {} keys", report.deleted));
    debug!("{} entries left after deletes", table.len());

    report.released = table.teardown();
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_run() {
        let report = run_workload().unwrap();
        assert_eq!(
            report,
            WorkloadReport {
                found: 400,
                not_found: 200,
                total_nodes: 200,
                max_chain: 4,
                deleted: 67,
                released: 133,
            }
        );
    }

    #[test]
    fn test_transcript() {
        let mut lines = Vec::new();
        run_workload_with(NUM_KEYS, |line| lines.push(line.to_string())).unwrap();
        assert_eq!(
            lines,
            vec![
                "Inserting keys...",
                "Looking up keys...",
                "Found: 400, Not found: 200",
                "Counting collision chains...",
                "Total nodes: 200, Max chain length: 4",
                "Deleting keys...",
                "Deleted 67 keys",
            ]
        );
    }

    #[test]
    fn test_small_run() {
        let report = run_workload_with(5, |_| {}).unwrap();
        assert_eq!(report.found, 10);
        assert_eq!(report.not_found, 5);
        assert_eq!(report.total_nodes, 5);
        assert_eq!(report.max_chain, 1);
        // i = 0 and i = 3
        assert_eq!(report.deleted, 2);
        assert_eq!(report.released, 3);
    }

    #[test]
    fn test_empty_run() {
        let report = run_workload_with(0, |_| {}).unwrap();
        assert_eq!(report, WorkloadReport::default());
    }

    #[test]
    fn test_report_display() {
        let report = WorkloadReport {
            found: 400,
            not_found: 200,
            total_nodes: 200,
            max_chain: 4,
            deleted: 67,
            released: 133,
        };
        assert_eq!(
            report.to_string(),
            "Found: 400, Not found: 200\nTotal nodes: 200, Max chain length: 4\nDeleted 67 keys"
        );
    }

    #[test]
    fn test_key_count_bounds() {
        let table = ChainedHashTable::new();
        let too_many = Err(Error::KeyCountOutOfRange {
            requested: i32::MAX / 2 + 1,
            max: MAX_NUM_KEYS,
        });
        assert_eq!(probe(&table, i32::MAX / 2 + 1), too_many);
        assert_eq!(
            probe(&table, MAX_NUM_KEYS + 1).unwrap_err(),
            Error::KeyCountOutOfRange {
                requested: MAX_NUM_KEYS + 1,
                max: MAX_NUM_KEYS,
            }
        );

        let mut table = ChainedHashTable::new();
        assert!(populate(&mut table, -1).is_err());
        assert!(prune(&mut table, i32::MAX).is_err());
        assert!(table.is_empty());

        let mut lines = 0;
        assert!(run_workload_with(i32::MIN, |_| lines += 1).is_err());
        assert_eq!(lines, 0);
    }

    #[test]
    fn test_workload_key_overflow() {
        assert_eq!(workload_key(0), Some(3));
        assert_eq!(workload_key(2), Some(17));
        assert_eq!(workload_key(2 * MAX_NUM_KEYS - 1), Some(2_147_483_628));
        assert_eq!(workload_key(i32::MAX / 7 + 1), None);
        assert_eq!(workload_key(i32::MIN), None);
    }

    #[test]
    fn test_probe_empty_table() {
        let table = ChainedHashTable::new();
        assert_eq!(probe(&table, 3).unwrap(), (0, 6));
    }

    #[test]
    fn test_chain_stats_caps_long_chains() {
        let mut table = ChainedHashTable::new();
        // 640 consecutive keys put 10 entries in every bucket.
        for key in 0..640 {
            table.insert(key, key).unwrap();
        }
        assert_eq!(chain_stats(&table).unwrap(), (64 * 6, 6));
    }
}
