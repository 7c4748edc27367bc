use crate::pen_type::PenType;
use thiserror::Error;

/// Main error type for SWIMA attribute operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwimaError {
    #[error("Insufficient data: need {needed} bytes, have {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("Malformed {attr} attribute at offset {offset}: {reason}")]
    Malformed {
        attr: PenType,
        offset: usize,
        reason: String,
    },

    #[error("Inconsistent length for {attr}: consumed {offset} of {length} bytes")]
    LengthMismatch {
        attr: PenType,
        offset: usize,
        length: usize,
    },

    #[error("Attribute too large: declared {length} bytes, limit is {limit}")]
    AttributeTooLarge { length: usize, limit: usize },
}

impl SwimaError {
    /// Number of attribute value bytes consumed before the failure
    ///
    /// This is the diagnostic offset a PA-TNC error attribute reports back
    /// to the sender. Variants that are not tied to a position report 0.
    pub fn offset(&self) -> usize {
        match self {
            SwimaError::Malformed { offset, .. } | SwimaError::LengthMismatch { offset, .. } => {
                *offset
            }
            _ => 0,
        }
    }
}

/// Result type alias for SWIMA operations
pub type SwimaResult<T> = Result<T, SwimaError>;
