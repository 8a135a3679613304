//! Data model for access rules.
//!
//! Canonical identifier forms (see [`crate::identifier`]):
//! - User access: `group:10.0.0.1:22:root`
//! - Guest access: `group:account:10.0.0.1:22:root`
//! - Protocol access: `group:10.0.0.1:22::sftp`
//! - Port forward: `group:10.0.0.1:22::portforward:8080`
//! - Proxied: any of the above followed by `:proxy_ip:proxy_port:proxy_user`
//!
//! IPv6 addresses are always bracketed inside identifiers, e.g. `[2001:db8::1]`.

mod address;
mod port;
mod principal;
mod protocol;
mod proxy;
mod record;
mod scope;
mod spec;

pub use address::{unwrap as unwrap_address, wrap as wrap_address};
pub use port::{PortValue, WILDCARD};
pub use principal::Principal;
pub use protocol::Protocol;
pub use proxy::Proxy;
pub use record::AccessRecord;
pub use scope::{Scope, ScopeKind};
pub use spec::{AccessConfig, AccessSpec};

pub(crate) use port::or_wildcard as port_or_wildcard;
