//! Who an access is granted to: a login user or a protocol restriction.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SpecError;

use super::protocol::Protocol;

/// The acting side of an access rule. Exactly one of user or protocol.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Principal {
    /// A login name, or the wildcard `*`.
    User(String),
    Protocol(Protocol),
}

impl Principal {
    /// Build a principal from the two mutually exclusive configuration fields.
    ///
    /// Empty strings count as unset.
    pub fn from_parts(user: Option<&str>, protocol: Option<&str>) -> Result<Self, SpecError> {
        let user = user.filter(|u| !u.is_empty());
        let protocol = protocol.filter(|p| !p.is_empty());
        match (user, protocol) {
            (Some(_), Some(_)) => Err(SpecError::AmbiguousPrincipal),
            (None, None) => Err(SpecError::MissingPrincipal),
            (Some(user), None) => Ok(Principal::User(user.to_string())),
            (None, Some(protocol)) => protocol
                .parse()
                .map(Principal::Protocol)
                .map_err(|_| SpecError::UnknownProtocol(protocol.to_string())),
        }
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Principal::User(name) => Some(name.as_str()),
            Principal::Protocol(_) => None,
        }
    }

    pub fn protocol(&self) -> Option<Protocol> {
        match self {
            Principal::User(_) => None,
            Principal::Protocol(protocol) => Some(*protocol),
        }
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Principal::User(name) => write!(f, "{name}"),
            Principal::Protocol(protocol) => write!(f, "{}", protocol.as_remote_user()),
        }
    }
}
