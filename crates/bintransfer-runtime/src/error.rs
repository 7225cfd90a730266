//! Engine errors

use bintransfer_codec::CodecError;
use thiserror::Error;

/// Engine result type
pub type Result<T> = std::result::Result<T, EngineError>;

/// Encode, decode and registry errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown container name \"{0}\"")]
    UnknownContainerName(String),

    #[error("unknown container header {0}")]
    UnknownContainerId(u32),

    #[error("missing required property \"{property}\" of {container}")]
    MissingRequiredProperty { container: String, property: String },

    #[error("duplicate container name \"{0}\"")]
    DuplicateContainerName(String),

    #[error("containers \"{first}\" and \"{second}\" share the id {id}")]
    DuplicateContainerId { id: u32, first: String, second: String },

    #[error("invalid size for param \"{param}\": expected {expected} but got {actual}")]
    InvalidParamSize {
        param: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid header for param \"{param}\": expected {} but got {found}", join_ids(.expected))]
    InvalidHeaderForParam {
        param: String,
        expected: Vec<u32>,
        found: u32,
    },

    #[error("invalid buffer type for param \"{param}\": cannot convert {found} to bytes")]
    InvalidBufferType { param: String, found: &'static str },

    #[error("type mismatch for param \"{param}\": expected {expected}, found {found}")]
    TypeMismatch {
        param: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("param \"{param}\" of {container} has inconsistent flags")]
    MalformedParam { container: String, param: String },

    #[error("containers nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}
