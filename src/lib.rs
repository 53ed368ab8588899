pub mod cs;
pub mod error;
pub mod logger;

pub use cs::hashing;
pub use error::{Error, Result};
