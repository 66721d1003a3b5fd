use thiserror::Error;

/// Errors produced while decoding a Draco bitstream.
///
/// The variants follow the status codes of the reference Draco library so that
/// callers can tell a corrupt stream apart from a stream that uses a feature
/// this decoder does not implement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DracoError {
    #[error("General error: {0}")]
    DracoError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),
    #[error("Unknown version: {0}")]
    UnknownVersion(String),
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
    #[error("Buffer decode error: {0}")]
    BufferError(String),
}

pub type Status = Result<(), DracoError>;

pub fn error_status(msg: impl Into<String>) -> DracoError {
    DracoError::DracoError(msg.into())
}

pub fn unsupported(msg: impl Into<String>) -> DracoError {
    DracoError::UnsupportedFeature(msg.into())
}
