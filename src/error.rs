//! Errors returned while building handlers and writing records.
//!
//! Construction problems are reported as [`Error::CreationFailed`] and only
//! ever come out of handler construction. Everything else is a steady-state
//! failure from [`Handler::handle`] and is passed through as-is.
//!
//! [`Handler::handle`]: crate::handler::Handler::handle

use std::io;
use thiserror::Error;

/// Error type for building handlers and writing records.
#[derive(Debug, Error)]
pub enum Error {
    /// The lexer, renderer, or theme couldn't be resolved.
    #[error("failed to create prettyjson handler: {0}")]
    CreationFailed(#[from] CreationError),

    /// Writing to the sink failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// The record couldn't be serialized or re-indented.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    /// The lexer rejected the serialized record.
    #[error(transparent)]
    Tokenize(#[from] syntect::parsing::ParsingError),

    /// A global default subscriber was already installed.
    #[error(transparent)]
    SetGlobalDefault(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// The lookup that made handler construction fail.
#[derive(Debug, Error)]
pub enum CreationError {
    #[error("failed to get lexer for {0}")]
    MissingLexer(&'static str),

    #[error("failed to get renderer for {0:?}")]
    MissingRenderer(String),

    #[error("failed to get style for {0:?}")]
    UnknownStyle(String),
}

impl Error {
    /// Returns `true` if this error came out of handler construction.
    pub fn is_creation_failed(&self) -> bool {
        matches!(self, Error::CreationFailed(_))
    }
}
