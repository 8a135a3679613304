//! Canonical identifiers and reconciliation matching for SSH bastion access rules.
//!
//! An [`AccessSpec`] describes one desired access: scope, address, port, a
//! user or protocol restriction, an optional reverse port forward target and
//! an optional proxy hop. [`encode`] renders it as a single reversible
//! identifier and [`decode`] parses one back. [`matches`] and [`find_match`]
//! compare a spec against the [`AccessRecord`] rows a remote listing returns.
//!
//! Everything here is pure and synchronous.
pub use error::{DecodeError, SpecError};
pub use identifier::{decode, decode_group, decode_guest, encode};
pub use matcher::{find_match, matches};
pub use tokenizer::tokenize;
pub use types::{
    AccessConfig, AccessRecord, AccessSpec, PortValue, Principal, Protocol, Proxy, Scope,
    ScopeKind, WILDCARD, unwrap_address, wrap_address,
};

mod error;
pub mod identifier;
mod matcher;
mod tokenizer;
pub mod types;
