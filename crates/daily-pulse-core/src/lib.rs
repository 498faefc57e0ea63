pub mod error;
pub mod types;

#[cfg(feature = "performance")]
pub mod performance;

pub use error::PulseError;
pub use types::*;

/// Standard result type for all daily-pulse operations
pub type PulseResult<T> = Result<T, PulseError>;
