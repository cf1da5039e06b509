//! Error type shared by the connection, registry and server.

use std::io;

use protocol::{ProtocolError, StatusCode};
use thiserror::Error;

/// Errors raised by the server core.
///
/// Every variant maps onto a STATUS code through [`ServerError::status_code`]
/// so the dispatcher can answer the request that triggered it.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The client referenced a handle that is not open.
    #[error("unknown handle {0:?}")]
    UnknownHandle(String),

    /// The filesystem refused the operation.
    #[error("filesystem error: {0}")]
    Filesystem(#[from] io::Error),

    /// An inbound frame or body could not be decoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// A client path could not be represented on this platform.
    #[error("invalid path {0:?}")]
    InvalidPath(String),

    /// Reading from or writing to the peer failed.
    #[error("transport error: {0}")]
    Transport(#[source] io::Error),

    /// The write side of the connection has already been closed.
    #[error("connection closed")]
    ConnectionClosed,
}

impl ServerError {
    /// Returns the STATUS code that best describes this error to a client.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownHandle(_) => StatusCode::FAILURE,
            Self::Filesystem(err) => StatusCode::from(err),
            Self::Protocol(ProtocolError::UnknownExtendedRequest { .. }) => {
                StatusCode::OP_UNSUPPORTED
            }
            Self::Protocol(_) => StatusCode::BAD_MESSAGE,
            Self::InvalidPath(_) => StatusCode::NO_SUCH_FILE,
            Self::Transport(_) | Self::ConnectionClosed => StatusCode::CONNECTION_LOST,
        }
    }

    /// Reports whether the error came from a stale or forged handle.
    #[must_use]
    pub const fn is_unknown_handle(&self) -> bool {
        matches!(self, Self::UnknownHandle(_))
    }

    /// Wraps an I/O error raised by the peer stream.
    ///
    /// Framing errors travel through `io::Error` with a [`ProtocolError`]
    /// payload; those are unwrapped so callers can match on them.
    pub(crate) fn transport(err: io::Error) -> Self {
        match err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<ProtocolError>())
        {
            Some(protocol) => Self::Protocol(protocol.clone()),
            None => Self::Transport(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filesystem_errors_map_through_kind() {
        let err = ServerError::from(io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(err.status_code(), StatusCode::NO_SUCH_FILE);

        let err = ServerError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.status_code(), StatusCode::PERMISSION_DENIED);

        let err = ServerError::from(io::Error::from(io::ErrorKind::AlreadyExists));
        assert_eq!(err.status_code(), StatusCode::FAILURE);
    }

    #[test]
    fn unknown_extended_maps_to_unsupported() {
        let err = ServerError::from(ProtocolError::UnknownExtendedRequest {
            id: 3,
            name: "limits@openssh.com".to_owned(),
        });
        assert_eq!(err.status_code(), StatusCode::OP_UNSUPPORTED);

        let err = ServerError::from(ProtocolError::short(4, 1));
        assert_eq!(err.status_code(), StatusCode::BAD_MESSAGE);
    }

    #[test]
    fn handle_and_path_errors() {
        let err = ServerError::UnknownHandle("42".to_owned());
        assert!(err.is_unknown_handle());
        assert_eq!(err.status_code(), StatusCode::FAILURE);
        assert_eq!(err.to_string(), "unknown handle \"42\"");

        let err = ServerError::InvalidPath("a\0b".to_owned());
        assert_eq!(err.status_code(), StatusCode::NO_SUCH_FILE);
    }

    #[test]
    fn transport_unwraps_protocol_payload() {
        let io_err = io::Error::from(ProtocolError::EmptyFrame);
        assert!(matches!(
            ServerError::transport(io_err),
            ServerError::Protocol(ProtocolError::EmptyFrame)
        ));

        let io_err = io::Error::from(io::ErrorKind::BrokenPipe);
        let err = ServerError::transport(io_err);
        assert!(matches!(err, ServerError::Transport(_)));
        assert_eq!(err.status_code(), StatusCode::CONNECTION_LOST);
    }
}
