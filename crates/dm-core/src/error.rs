//! Engine-wide error type.
//!
//! Sub-crates define their own error enums and wrap `DmError` as one variant
//! through a `From` impl.

use thiserror::Error;

/// The base error type for `dm-core` and the crates above it.
#[derive(Debug, Error)]
pub enum DmError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `dm-*` crates.
pub type DmResult<T> = Result<T, DmError>;
