//! Error types for the Chiptone cosimulator.
//!
//! This module provides a unified error type [`ChiptoneError`] that covers
//! all error conditions that can occur during configuration validation,
//! component construction, and WAV finalization.

use thiserror::Error;

/// Result type alias using [`ChiptoneError`].
pub type Result<T> = std::result::Result<T, ChiptoneError>;

/// Unified error type for all Chiptone operations.
#[derive(Error, Debug)]
pub enum ChiptoneError {
    // ============ Configuration Errors ============
    /// Invalid simulation parameter
    #[error("Invalid simulation parameter: {message}")]
    InvalidConfig { message: String },

    /// Invalid component value
    #[error("Invalid value for component '{component}': {message}")]
    InvalidComponent { component: String, message: String },

    // ============ I/O Errors ============
    /// Error writing the WAV file
    #[error("Failed to write WAV file '{path}': {source}")]
    WavWrite {
        path: String,
        #[source]
        source: hound::Error,
    },
}

impl ChiptoneError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a component error
    pub fn component(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a WAV write error
    pub fn wav_write(path: impl Into<String>, source: hound::Error) -> Self {
        Self::WavWrite {
            path: path.into(),
            source,
        }
    }
}
