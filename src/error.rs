use thiserror::Error;

/// Errors raised by the effect library.
///
/// Effects are deterministic, so none of these are worth retrying: the same
/// input always fails the same way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EffectError {
    /// Input image is empty or otherwise unusable
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// A parameter is outside its valid domain
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, EffectError>;
