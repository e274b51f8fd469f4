//! Unified error type.

use thiserror::Error;

/// The error type returned by roster's fallible infrastructure operations.
///
/// Application-level outcomes (an unknown student id, a malformed body) are
/// expressed as HTTP [`Response`](crate::Response) values, not as `Error`s.
/// This type surfaces the failures that happen around them: reading the
/// configuration, binding the listener, decoding a request body.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),
}
