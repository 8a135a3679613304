//! Proxy hop for accesses that jump through an intermediate host.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SpecError;

/// A fully populated proxy hop. Port and user may be the wildcard `*`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct Proxy {
    address: String,
    port: String,
    user: String,
}

impl Proxy {
    pub fn new(
        address: impl Into<String>,
        port: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Proxy {
            address: address.into(),
            port: port.into(),
            user: user.into(),
        }
    }

    /// Build an optional proxy from loose configuration fields.
    ///
    /// All three absent means no proxy; any partial combination is an error
    /// naming the first missing field. Empty strings count as absent.
    pub fn from_parts(
        address: Option<&str>,
        port: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Self>, SpecError> {
        fn set(v: Option<&str>) -> Option<&str> {
            v.filter(|s| !s.is_empty())
        }
        match (set(address), set(port), set(user)) {
            (None, None, None) => Ok(None),
            (Some(address), Some(port), Some(user)) => Ok(Some(Proxy::new(address, port, user))),
            (None, _, _) => Err(missing("proxy_ip")),
            (_, None, _) => Err(missing("proxy_port")),
            (_, _, None) => Err(missing("proxy_user")),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

fn missing(field: &str) -> SpecError {
    SpecError::IncompleteProxy {
        missing: field.to_string(),
    }
}
