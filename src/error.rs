//! Error types for netsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Only pre-scan
//! validation failures surface here; individual probe failures are
//! absorbed into the result model as negative findings.

use crate::types::{PortError, TargetError};
use thiserror::Error;

/// Main error type for scanning operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetError),

    #[error("invalid port specification: {0}")]
    InvalidPortSpec(#[from] PortError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_error_conversion() {
        // Report writing routes its io::Error through this variant.
        let err = ScanError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert!(matches!(err, ScanError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_validation_errors_are_distinct() {
        let target: ScanError = TargetError::InvalidCidr("bogus".to_string()).into();
        let ports: ScanError = PortError::InvalidRange(80, 79).into();
        assert!(matches!(target, ScanError::InvalidTarget(_)));
        assert!(matches!(ports, ScanError::InvalidPortSpec(_)));
    }
}
