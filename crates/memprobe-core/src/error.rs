//! Error type shared by every benchmark kernel.

use thiserror::Error;

/// Failures surfaced by benchmark setup and the allocation cycler.
///
/// None of these are recoverable inside a run: the driver aborts the
/// benchmark under measurement when one reaches it.
#[derive(Debug, Error)]
pub enum MemprobeError {
    #[error("allocator returned no block for a {size}-byte request")]
    AllocationFailed { size: usize },
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("entropy source unavailable: {0}")]
    Entropy(#[from] getrandom::Error),
}

impl MemprobeError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MemprobeError>;
