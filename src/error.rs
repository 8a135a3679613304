use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures when turning an external identifier back into an [`AccessSpec`].
///
/// Every variant carries the offending identifier so an import surface can
/// report it verbatim.
///
/// [`AccessSpec`]: crate::AccessSpec
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DecodeError {
    #[error("invalid identifier '{identifier}': unexpected number of fields ({token_count})")]
    InvalidArity {
        identifier: String,
        token_count: usize,
    },

    #[error("invalid identifier '{identifier}': field '{field}' is not a valid number")]
    InvalidNumber { identifier: String, field: String },

    #[error("invalid identifier '{identifier}': unknown protocol '{protocol}'")]
    UnknownProtocol {
        identifier: String,
        protocol: String,
    },

    #[error(
        "invalid identifier '{identifier}': a remote port requires protocol 'portforward', found '{protocol}'"
    )]
    UnexpectedRemotePort {
        identifier: String,
        protocol: String,
    },

    #[error("invalid identifier '{identifier}': {reason}")]
    InvalidShape { identifier: String, reason: String },
}

/// Construction errors for access specifications built from loose parts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SpecError {
    #[error("either 'user' or 'protocol' must be set")]
    MissingPrincipal,

    #[error("'user' and 'protocol' cannot both be set")]
    AmbiguousPrincipal,

    #[error("unknown protocol '{0}'")]
    UnknownProtocol(String),

    #[error("'remote_port' is only valid with protocol 'portforward'")]
    RemotePortRequiresPortForward,

    #[error("proxy is missing '{missing}'")]
    IncompleteProxy { missing: String },
}
