// Error types for the wavetable host layer
//
// Structured errors with stable numeric codes, so the engine core can react
// to a failed host call without parsing messages.

mod host;

pub use host::{log_host_error, HostError, HostErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the engine boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
