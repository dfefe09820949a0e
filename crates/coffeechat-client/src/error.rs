//! Client error types.

use std::fmt;

use coffeechat_core::CoreError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// Invalid schedule or timezone input.
    Core(CoreError),
    /// Match file could not be parsed.
    Input(String),
    /// Reached-out store could not be written.
    Store(String),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Core(err) => write!(f, "{}", err),
            Self::Input(msg) => write!(f, "invalid input: {}", msg),
            Self::Store(msg) => write!(f, "store error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Core(err) => Some(err),
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}
