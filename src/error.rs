//! Error types for registry and harness operations.
//!
//! Provides strongly-typed errors using `thiserror`. Every error aborts the
//! enclosing call with zero state change; batch operations have no
//! partial-success mode.

use thiserror::Error;

use crate::policy::OperationKind;
use crate::types::Address;

/// Errors that can occur during registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Malformed or out-of-range input
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    /// The capability predicate denied the caller
    #[error("caller {caller} is not authorized for {operation}")]
    Unauthorized {
        caller: Address,
        operation: OperationKind,
    },
    /// The call cannot complete its invariants and was rolled back
    #[error("execution reverted: {reason}")]
    ExecutionReverted { reason: String },
}

/// Result type alias for registry operations.
pub type Result<T> = core::result::Result<T, RegistryError>;
