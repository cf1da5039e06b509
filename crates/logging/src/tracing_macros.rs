//! crates/logging/src/tracing_macros.rs
//! Convenience macros for SFTP subsystem tracing.
//!
//! Each macro forwards to `tracing::debug!` with the target of one
//! [`Subsystem`](crate::Subsystem), so filters such as
//! `sftp::handle=debug` select exactly that subsystem. Callers must depend
//! on `tracing` themselves.

/// Emit a packet encode/decode trace.
///
/// # Example
/// ```ignore
/// trace_packet!(id, code = %status.code, "request failed");
/// ```
#[macro_export]
macro_rules! trace_packet {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "sftp::packet", $($arg)*);
    };
}

/// Emit a handle registry trace.
///
/// # Example
/// ```ignore
/// trace_handle!(handle = %handle, "handle allocated");
/// ```
#[macro_export]
macro_rules! trace_handle {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "sftp::handle", $($arg)*);
    };
}

/// Emit a connection I/O trace.
///
/// # Example
/// ```ignore
/// trace_conn!(len = frame.len(), "frame sent");
/// ```
#[macro_export]
macro_rules! trace_conn {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "sftp::conn", $($arg)*);
    };
}

/// Emit a path resolution trace.
///
/// # Example
/// ```ignore
/// trace_path!("resolved {} to {}", requested, local.display());
/// ```
#[macro_export]
macro_rules! trace_path {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "sftp::path", $($arg)*);
    };
}
