//! Base error type.
//!
//! Sub-crates define their own enums (`FleetError`, `SimError`, …) and wrap
//! `HmError` where they need configuration validation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what} out of range: {value} (allowed {min}..={max})")]
    OutOfRange {
        what:  &'static str,
        value: u64,
        min:   u64,
        max:   u64,
    },
}

/// Shorthand result type for `hm-core`.
pub type HmResult<T> = Result<T, HmError>;
