//! The desired-state description of one access rule.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SpecError;

use super::port::WILDCARD;
use super::principal::Principal;
use super::protocol::Protocol;
use super::proxy::Proxy;
use super::scope::Scope;

/// One access rule: who may reach which address and port, optionally via a proxy.
///
/// Instances are immutable once built; the `with_*` methods consume and
/// return a new value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
pub struct AccessSpec {
    scope: Scope,
    /// IPv4/IPv6 literal or CIDR subnet, stored verbatim.
    address: String,
    /// Numeric port or `*`.
    port: String,
    principal: Principal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remote_port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    proxy: Option<Proxy>,
}

impl AccessSpec {
    pub fn new(
        scope: Scope,
        address: impl Into<String>,
        port: impl Into<String>,
        principal: Principal,
    ) -> Self {
        AccessSpec {
            scope,
            address: address.into(),
            port: port.into(),
            principal,
            remote_port: None,
            proxy: None,
        }
    }

    /// Shorthand for a login-user access.
    pub fn for_user(
        scope: Scope,
        address: impl Into<String>,
        port: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self::new(scope, address, port, Principal::User(user.into()))
    }

    /// Shorthand for a protocol-restricted access.
    pub fn for_protocol(
        scope: Scope,
        address: impl Into<String>,
        port: impl Into<String>,
        protocol: Protocol,
    ) -> Self {
        Self::new(scope, address, port, Principal::Protocol(protocol))
    }

    /// Attach a reverse port forward target. Only valid for `portforward`.
    pub fn with_remote_port(mut self, remote_port: u16) -> Result<Self, SpecError> {
        match self.principal {
            Principal::Protocol(p) if p.allows_remote_port() => {
                self.remote_port = Some(remote_port);
                Ok(self)
            }
            _ => Err(SpecError::RemotePortRequiresPortForward),
        }
    }

    pub fn with_proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn remote_port(&self) -> Option<u16> {
        self.remote_port
    }

    pub fn proxy(&self) -> Option<&Proxy> {
        self.proxy.as_ref()
    }
}

/// Renders the canonical identifier.
impl Display for AccessSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", crate::identifier::encode(self))
    }
}

fn default_port() -> String {
    WILDCARD.to_string()
}

/// An access rule as written in declarative configuration.
///
/// `group` is always required; `account` turns the rule into a guest access.
/// `user` and `protocol` are mutually exclusive, and the three proxy fields
/// must be set together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AccessConfig {
    pub group: String,
    #[serde(default)]
    pub account: Option<String>,
    pub ip: String,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub remote_port: Option<u16>,
    #[serde(default)]
    pub proxy_ip: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<String>,
    #[serde(default)]
    pub proxy_user: Option<String>,
}

impl TryFrom<AccessConfig> for AccessSpec {
    type Error = SpecError;

    fn try_from(config: AccessConfig) -> Result<Self, Self::Error> {
        let scope = match config.account {
            Some(account) => Scope::guest(config.group, account),
            None => Scope::group(config.group),
        };
        let principal = Principal::from_parts(config.user.as_deref(), config.protocol.as_deref())?;
        let proxy = Proxy::from_parts(
            config.proxy_ip.as_deref(),
            config.proxy_port.as_deref(),
            config.proxy_user.as_deref(),
        )?;

        let mut spec = AccessSpec::new(scope, config.ip, config.port, principal);
        if let Some(remote_port) = config.remote_port {
            spec = spec.with_remote_port(remote_port)?;
        }
        if let Some(proxy) = proxy {
            spec = spec.with_proxy(proxy);
        }
        Ok(spec)
    }
}
