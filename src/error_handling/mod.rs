//! Error taxonomy and categorization.
//!
//! This module provides:
//! - Error type definitions (initialization, validation, network kinds)
//! - Categorization of transport failures into pattern-matchable kinds
//!
//! The taxonomy follows the propagation policy of the harness: per-attempt
//! remote failures are absorbed by the request executor and reported inside
//! the response envelope; only configuration errors and local validation
//! errors propagate as hard failures to the caller.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_network_error;
pub use types::{InitializationError, NetworkErrorKind, ValidationError};
