//! Network transport.
//!
//! This module provides:
//! - [`Session`]: the pooled, reusable connection channel to one base endpoint
//! - [`RawOutcome`]: the uniform result of a single network exchange
//!
//! The transport layer reports every failure as a distinct, pattern-matchable
//! value; nothing at this layer panics or raises for remote failures.

mod outcome;
mod session;

pub use outcome::RawOutcome;
pub use session::Session;
