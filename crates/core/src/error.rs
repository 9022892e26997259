//! Error types for the seatplan engine.

use thiserror::Error;

/// Result type alias using the engine's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the seating engine.
///
/// The engine is best-effort by design: capacity shortfalls, unsatisfiable
/// avoid-pairs, and degenerate layouts never fail an operation — they are
/// reported as [`Advisory`](crate::report::Advisory) values on the result.
/// `Error` is reserved for input malformed beyond best-effort
/// interpretation, such as a zero group count or a round table whose
/// per-seat arrays disagree with its seat count.
#[derive(Debug, Error)]
pub enum Error {
    /// A placed item is structurally malformed.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// A partition policy cannot be interpreted.
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    /// Internal invariant violation.
    #[error("internal error: {0}")]
    Internal(String),
}
