use crate::format::FormatCode;
use enough::StopReason;

/// Errors from Netpbm parsing and transcoding.
///
/// Every variant is fatal: the pipeline stops at the first one and output
/// already written is left as is.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PnmError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("invalid byte 0x{0:02x} in decimal number")]
    InvalidDigit(u8),

    #[error("sample {value} exceeds maximum {max}")]
    SampleOutOfRange { value: u32, max: u16 },

    #[error("max sample value {0} exceeds 255")]
    MaxSampleTooLarge(u32),

    #[error("cannot downsample {0:?}: already bilevel")]
    UnsupportedConversion(FormatCode),

    #[error("exactly one of downsample or convert mode must be selected")]
    ModeConflict,

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PnmError {
    fn from(r: StopReason) -> Self {
        PnmError::Cancelled(r)
    }
}
