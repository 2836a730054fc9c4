//! Error types for the protocol engine.

use std::io;

use thiserror::Error;

/// Errors that can arise while scanning or decoding fields.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The next field's delimiter has not arrived yet.
    ///
    /// Not a failure: the message is retried from its start once more
    /// bytes are appended.
    #[error("field not yet terminated, waiting for more bytes")]
    Incomplete,

    /// A field's text does not parse as the type its position requires.
    #[error("malformed {kind} field: {text:?}")]
    MalformedField { kind: &'static str, text: String },

    /// A message type tag this client does not know.
    #[error("unknown message type: {0}")]
    UnknownMessageType(i32),
}

impl ProtocolError {
    /// Returns `true` if this only means "come back with more bytes".
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ProtocolError::Incomplete)
    }

    pub(crate) fn malformed(kind: &'static str, field: &[u8]) -> Self {
        ProtocolError::MalformedField {
            kind,
            text: String::from_utf8_lossy(field).into_owned(),
        }
    }
}

/// Fatal outcomes of driving a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server speaks an older protocol than we support.
    #[error("server version {server_version} is below the minimum supported {min_version}")]
    ServerTooOld { server_version: i32, min_version: i32 },

    /// The inbound stream can no longer be trusted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// `connect` was called on a session that is not disconnected.
    #[error("session already connected or connecting")]
    AlreadyConnected,

    /// An operation that needs a live connection was attempted without one.
    #[error("not connected")]
    NotConnected,

    /// Writing to the transport failed.
    #[error("transport error: {0}")]
    Io(#[from] io::Error),
}
