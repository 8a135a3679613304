//! Protocols an access can be restricted to instead of a login user.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The closed set of protocol restrictions understood by the bastion.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    Sftp,
    ScpUpload,
    ScpDownload,
    Rsync,
    /// Reverse port forwarding; the only protocol that may carry a remote port.
    PortForward,
}

impl Protocol {
    /// Prefix used by the remote listing to mark protocol-restricted rows.
    pub const USER_PREFIX: char = '!';

    /// Render as the remote system's pseudo-username, e.g. `!sftp`.
    pub fn as_remote_user(&self) -> String {
        format!("{}{}", Self::USER_PREFIX, self.as_ref())
    }

    /// Parse a remote pseudo-username back to a protocol.
    ///
    /// Returns `None` for plain usernames; unknown protocol names are an error.
    pub fn from_remote_user(user: &str) -> Option<Result<Self, strum::ParseError>> {
        user.strip_prefix(Self::USER_PREFIX).map(str::parse)
    }

    pub fn allows_remote_port(&self) -> bool {
        matches!(self, Protocol::PortForward)
    }
}
