pub mod arena;
pub mod separate;
pub mod workload;

pub use arena::{Entry, EntryArena, EntryIndex};
pub use separate::{hash, ChainedHashTable, CHAIN_COUNT_CAP, NOT_FOUND, TABLE_SIZE};
pub use workload::{run_workload, run_workload_with, WorkloadReport, NUM_KEYS};
