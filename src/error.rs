//! Error types for the generation pipeline.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenError>;

/// An error raised while configuring, generating, serializing or writing.
#[derive(Debug, Error)]
pub enum GenError {
    /// Invalid generation parameters, detected before any generation runs.
    #[error("ConfigError: {0}")]
    Config(String),
    /// An event that cannot be represented in the SMF byte layout.
    #[error("SerializationError: {0}")]
    Serialization(String),
    /// The output destination could not be created or written.
    #[error("IOError: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConfigError,
    SerializationError,
    IOError,
}

impl GenError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::ConfigError,
            Self::Serialization(_) => ErrorKind::SerializationError,
            Self::Io(_) => ErrorKind::IOError,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConfigError => "ConfigError",
            Self::SerializationError => "SerializationError",
            Self::IOError => "IOError",
        };
        f.write_str(name)
    }
}
