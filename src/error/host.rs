// Host layer error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Host error code constants
///
/// Single source of truth for the numeric codes the engine core receives
/// for failed host operations.
///
/// Error code range: 3001-3007
pub struct HostErrorCodes {}

impl HostErrorCodes {
    /// Caller passed an argument the host cannot act on
    pub const INVALID_PARAMETER: i32 = 3001;

    /// Handle has no usable resource, or open/resolve/release failed
    pub const INVALID_HANDLE: i32 = 3002;

    /// Lower-level I/O error during a read
    pub const READ_FAILED: i32 = 3003;

    /// Resource exhausted before a fixed-size read completed
    pub const END_OF_FILE: i32 = 3004;

    /// Seek rejected by the operating system
    pub const SEEK_FAILED: i32 = 3005;

    /// Position query failed
    pub const POSITION_FAILED: i32 = 3006;

    /// Operation needs a facility this platform does not provide
    pub const UNSUPPORTED: i32 = 3007;
}

/// Log a host error with structured context
///
/// Emits the numeric code, the failing component, and the message so that
/// a reporting sink can filter on any of them.
pub fn log_host_error(err: &HostError, context: &str) {
    error!(
        "Host error in {}: code={}, component=HostLayer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Host-related errors
///
/// Every file, memory and lifecycle operation of the host layer reports
/// failure through this type rather than panicking.
///
/// Error code range: 3001-3007
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Argument rejected (negative size, out-of-range setting)
    InvalidParameter { reason: String },

    /// Resource reference absent, or OS-level open/resolve/release failed
    InvalidHandle { reason: String },

    /// I/O error after `bytes_read` bytes had been transferred
    ReadFailed { bytes_read: usize, details: String },

    /// Resource exhausted during a fixed-size read
    EndOfFile,

    /// Seek rejected
    SeekFailed { details: String },

    /// Position query failed
    PositionFailed { details: String },

    /// Capability missing on this platform
    Unsupported { operation: &'static str },
}

impl ErrorCode for HostError {
    fn code(&self) -> i32 {
        match self {
            HostError::InvalidParameter { .. } => HostErrorCodes::INVALID_PARAMETER,
            HostError::InvalidHandle { .. } => HostErrorCodes::INVALID_HANDLE,
            HostError::ReadFailed { .. } => HostErrorCodes::READ_FAILED,
            HostError::EndOfFile => HostErrorCodes::END_OF_FILE,
            HostError::SeekFailed { .. } => HostErrorCodes::SEEK_FAILED,
            HostError::PositionFailed { .. } => HostErrorCodes::POSITION_FAILED,
            HostError::Unsupported { .. } => HostErrorCodes::UNSUPPORTED,
        }
    }

    fn message(&self) -> String {
        match self {
            HostError::InvalidParameter { reason } => {
                format!("Invalid parameter: {}", reason)
            }
            HostError::InvalidHandle { reason } => {
                format!("Invalid file handle: {}", reason)
            }
            HostError::ReadFailed {
                bytes_read,
                details,
            } => {
                format!("Read failed after {} bytes: {}", bytes_read, details)
            }
            HostError::EndOfFile => "End of file reached".to_string(),
            HostError::SeekFailed { details } => format!("Seek failed: {}", details),
            HostError::PositionFailed { details } => {
                format!("Position query failed: {}", details)
            }
            HostError::Unsupported { operation } => {
                format!("{} is not supported on this platform", operation)
            }
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HostError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for HostError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_codes() {
        assert_eq!(
            HostError::InvalidParameter {
                reason: "test".to_string()
            }
            .code(),
            HostErrorCodes::INVALID_PARAMETER
        );
        assert_eq!(
            HostError::InvalidHandle {
                reason: "test".to_string()
            }
            .code(),
            HostErrorCodes::INVALID_HANDLE
        );
        assert_eq!(
            HostError::ReadFailed {
                bytes_read: 0,
                details: "test".to_string()
            }
            .code(),
            HostErrorCodes::READ_FAILED
        );
        assert_eq!(HostError::EndOfFile.code(), HostErrorCodes::END_OF_FILE);
        assert_eq!(
            HostError::SeekFailed {
                details: "test".to_string()
            }
            .code(),
            HostErrorCodes::SEEK_FAILED
        );
        assert_eq!(
            HostError::PositionFailed {
                details: "test".to_string()
            }
            .code(),
            HostErrorCodes::POSITION_FAILED
        );
        assert_eq!(
            HostError::Unsupported {
                operation: "duplicate"
            }
            .code(),
            HostErrorCodes::UNSUPPORTED
        );
    }

    #[test]
    fn test_host_error_messages() {
        let err = HostError::ReadFailed {
            bytes_read: 3,
            details: "device gone".to_string(),
        };
        assert_eq!(err.message(), "Read failed after 3 bytes: device gone");

        let err = HostError::EndOfFile;
        assert_eq!(err.message(), "End of file reached");

        let err = HostError::Unsupported {
            operation: "duplicate",
        };
        assert!(err.message().contains("not supported"));
    }

    #[test]
    fn test_host_error_display() {
        let err = HostError::SeekFailed {
            details: "negative offset".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("HostError"));
        assert!(display.contains(&err.code().to_string()));
    }

    #[test]
    fn test_code_range() {
        assert_eq!(HostErrorCodes::INVALID_PARAMETER, 3001);
        assert_eq!(HostErrorCodes::UNSUPPORTED, 3007);
    }
}
