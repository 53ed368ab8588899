use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the hash table and its workload.
///
/// A missing key is not an error: lookups return `Option` and deletes return `bool`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The entry arena could not acquire memory for another entry.
    #[error("out of memory: could not reserve space for {requested} more entries")]
    OutOfMemory { requested: usize },

    /// A bucket index outside `0..buckets` was requested.
    #[error("bucket index {index} out of range for table with {buckets} buckets")]
    BucketOutOfRange { index: usize, buckets: usize },

    /// The workload was asked for a key count whose keys would not fit in an `i32`.
    #[error("key count {requested} outside supported range 0..={max}")]
    KeyCountOutOfRange { requested: i32, max: i32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::OutOfMemory { requested: 1 };
        assert_eq!(
            err.to_string(),
            "out of memory: could not reserve space for 1 more entries"
        );

        let err = Error::BucketOutOfRange {
            index: 70,
            buckets: 64,
        };
        assert_eq!(
            err.to_string(),
            "bucket index 70 out of range for table with 64 buckets"
        );

        let err = Error::KeyCountOutOfRange {
            requested: -1,
            max: 10,
        };
        assert_eq!(err.to_string(), "key count -1 outside supported range 0..=10");
    }
}
