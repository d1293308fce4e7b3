//! Error taxonomy shared across the workspace.
//!
//! Business-rule violations and classified collaborator failures are expected
//! outcomes of a conversation and are reported as values. `DomainError` is
//! reserved for conditions that stop a conversation from running at all.

use std::time::Duration;

use thiserror::Error;

/// A classified failure raised by an external collaborator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorFailure {
    /// The platform answered with an error status.
    #[error("api error {code}: {message}")]
    Api {
        /// Numeric status code (400, 401, 403, ...).
        code: u16,
        /// Message returned by the platform.
        message: String,
    },

    /// The call did not complete within the caller-supplied timeout.
    #[error("{operation} timed out after {timeout_ms} ms")]
    Timeout {
        /// Name of the collaborator operation.
        operation: &'static str,
        /// The timeout that expired, in milliseconds.
        timeout_ms: u64,
    },
}

impl CollaboratorFailure {
    /// Convenience constructor for an API failure.
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Builds a timeout failure for `operation`.
    #[must_use]
    pub fn timeout(operation: &'static str, timeout: Duration) -> Self {
        Self::Timeout {
            operation,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the numeric status code, if the failure carries one.
    #[must_use]
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Timeout { .. } => None,
        }
    }
}

/// Failure of the interactive input source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The input stream reached end-of-file before a valid answer arrived.
    #[error("input closed before a valid answer was given")]
    Closed,

    /// Reading or writing the terminal failed.
    #[error("input i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for InputError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An event was recorded while the conversation was in the wrong phase.
    #[error("invalid phase: expected {expected}, found {actual}")]
    InvalidPhase {
        /// Phase the operation requires.
        expected: &'static str,
        /// Phase the conversation is actually in.
        actual: &'static str,
    },

    /// A draft reached validation with a field still unset.
    #[error("draft incomplete: {0} is unset")]
    IncompleteDraft(&'static str),

    /// The interactive input source failed.
    #[error(transparent)]
    Input(#[from] InputError),
}
