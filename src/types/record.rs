//! Access rows as listed by the remote bastion.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::SpecError;

use super::port::{PortValue, WILDCARD, or_wildcard};
use super::principal::Principal;
use super::protocol::Protocol;
use super::proxy::Proxy;
use super::scope::Scope;
use super::spec::AccessSpec;

/// One row of a remote access listing.
///
/// Wildcards are absent fields, and protocol restrictions are a user of the
/// form `!protocol`. The shape is fixed by the remote system and only read here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessRecord {
    pub ip: String,
    #[serde(default)]
    pub port: Option<PortValue>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub proxy_ip: Option<String>,
    #[serde(default)]
    pub proxy_port: Option<PortValue>,
    #[serde(default)]
    pub proxy_user: Option<String>,
    #[serde(default)]
    pub remote_port: Option<PortValue>,
    #[serde(default)]
    pub local_port: Option<PortValue>,
    /// Raw protocol column. Matching reads the `!protocol` user instead.
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub force_password: Option<String>,
    #[serde(default)]
    pub force_key: Option<String>,
    #[serde(default)]
    pub reverse_dns: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user_comment: Option<String>,
    #[serde(default)]
    pub added_by: Option<String>,
    #[serde(default)]
    pub added_date: Option<String>,
    #[serde(default)]
    pub expiry: Option<i64>,
}

impl AccessRecord {
    /// Parse a listing payload (a JSON array of rows).
    pub fn list_from_json(payload: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(payload)
    }

    /// Reconstruct the specification this row describes, for the given scope.
    ///
    /// Absent port, user and proxy port become `*`. A remote port is kept
    /// only on `portforward` rows, and only if numeric.
    pub fn observed(&self, scope: Scope) -> Result<AccessSpec, SpecError> {
        let principal = match self.user.as_deref() {
            None => Principal::User(WILDCARD.to_string()),
            Some(user) => match Protocol::from_remote_user(user) {
                None => Principal::User(user.to_string()),
                Some(Ok(protocol)) => Principal::Protocol(protocol),
                Some(Err(_)) => {
                    return Err(SpecError::UnknownProtocol(
                        user.trim_start_matches(Protocol::USER_PREFIX).to_string(),
                    ));
                }
            },
        };

        let mut spec = AccessSpec::new(scope, self.ip.clone(), or_wildcard(self.port.as_ref()), principal);

        let remote_port = self
            .remote_port
            .as_ref()
            .and_then(PortValue::as_number)
            .and_then(|n| u16::try_from(n).ok());
        #[allow(clippy::collapsible_if)] // https://github.com/rust-lang/rust/issues/53667
        if let Some(remote_port) = remote_port {
            if spec.principal().protocol().is_some_and(|p| p.allows_remote_port()) {
                spec = spec.with_remote_port(remote_port)?;
            }
        }

        if let Some(proxy_ip) = &self.proxy_ip {
            let proxy_user = self.proxy_user.as_deref().ok_or_else(|| SpecError::IncompleteProxy {
                missing: "proxy_user".to_string(),
            })?;
            spec = spec.with_proxy(Proxy::new(
                proxy_ip.clone(),
                or_wildcard(self.proxy_port.as_ref()),
                proxy_user,
            ));
        }

        Ok(spec)
    }
}
