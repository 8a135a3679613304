//! Canonical identifiers for access rules.
//!
//! Layout, fields joined by `:`:
//!
//! ```text
//! <scope...>:<address>:<port>:<user>
//! <scope...>:<address>:<port>::<protocol>[:<remote_port>]
//! ... followed, when proxied, by :<proxy_address>:<proxy_port>:<proxy_user>
//! ```
//!
//! `<scope...>` is `group` or `group:account`. Addresses containing a colon
//! are wrapped in brackets. [`encode`] and [`decode`] are a matched pair:
//! any change to the field order must be made to both.

use itertools::Itertools;
use tracing::{debug, trace};

use crate::error::DecodeError;
use crate::tokenizer::tokenize;
use crate::types::{AccessSpec, Principal, Protocol, Proxy, Scope, ScopeKind, wrap_address};

/// Fields after scope, address and port.
const FIXED_FIELDS: usize = 2;
const PROXY_FIELDS: usize = 3;

/// Render the canonical identifier of `spec`.
pub fn encode(spec: &AccessSpec) -> String {
    let mut fields: Vec<String> = spec.scope().fields().into_iter().map(str::to_string).collect();
    fields.push(wrap_address(spec.address()));
    fields.push(spec.port().to_string());

    match spec.principal() {
        Principal::User(name) => fields.push(name.clone()),
        Principal::Protocol(protocol) => {
            fields.push(String::new());
            fields.push(protocol.to_string());
            if let Some(remote_port) = spec.remote_port() {
                fields.push(remote_port.to_string());
            }
        }
    }

    if let Some(proxy) = spec.proxy() {
        fields.push(wrap_address(proxy.address()));
        fields.push(proxy.port().to_string());
        fields.push(proxy.user().to_string());
    }

    fields.iter().join(":")
}

/// The principal part of an identifier, as classified by field count.
enum Shape<'a> {
    User(&'a str),
    Protocol {
        protocol: &'a str,
        remote_port: Option<&'a str>,
    },
}

/// Parse a canonical identifier whose scope has the layout `kind`.
pub fn decode(kind: ScopeKind, identifier: &str) -> Result<AccessSpec, DecodeError> {
    let tokens = tokenize(identifier);
    let prefix = kind.arity() + FIXED_FIELDS;

    trace!(
        event = "Decode",
        phase = "Tokenized",
        identifier,
        token_count = tokens.len()
    );

    let result = classify(kind, identifier, &tokens, prefix);
    if let Err(err) = &result {
        debug!(event = "Decode", phase = "Rejected", identifier, error = %err);
    }
    result
}

/// Parse a group (server) access identifier: `group:address:port:...`.
pub fn decode_group(identifier: &str) -> Result<AccessSpec, DecodeError> {
    decode(ScopeKind::Group, identifier)
}

/// Parse a guest access identifier: `group:account:address:port:...`.
pub fn decode_guest(identifier: &str) -> Result<AccessSpec, DecodeError> {
    decode(ScopeKind::Guest, identifier)
}

fn classify(
    kind: ScopeKind,
    identifier: &str,
    tokens: &[String],
    prefix: usize,
) -> Result<AccessSpec, DecodeError> {
    let invalid_arity = || DecodeError::InvalidArity {
        identifier: identifier.to_string(),
        token_count: tokens.len(),
    };
    let invalid_shape = |reason: &str| DecodeError::InvalidShape {
        identifier: identifier.to_string(),
        reason: reason.to_string(),
    };

    if tokens.len() <= prefix {
        return Err(invalid_arity());
    }
    let rest = &tokens[prefix..];
    let user_is_empty = rest[0].is_empty();

    let (shape, proxy_fields) = match rest.len() {
        1 => (Shape::User(rest[0].as_str()), None),
        // No protocol layout has four fields, so the user is taken verbatim.
        4 => (Shape::User(rest[0].as_str()), Some(&rest[1..])),
        2 | 3 | 5 | 6 if user_is_empty => {
            let protocol = rest[1].as_str();
            match rest.len() {
                2 => (Shape::Protocol { protocol, remote_port: None }, None),
                3 => (Shape::Protocol { protocol, remote_port: Some(rest[2].as_str()) }, None),
                5 => (Shape::Protocol { protocol, remote_port: None }, Some(&rest[2..])),
                _ => (Shape::Protocol { protocol, remote_port: Some(rest[2].as_str()) }, Some(&rest[3..])),
            }
        }
        2 | 3 | 5 | 6 => return Err(invalid_shape("a protocol access must leave the user field empty")),
        _ => return Err(invalid_arity()),
    };

    let scope = Scope::from_fields(kind, tokens);
    let address = tokens[kind.arity()].clone();
    let port = tokens[kind.arity() + 1].clone();

    let mut spec = match shape {
        Shape::User(user) => {
            trace!(event = "Decode", phase = "Classified", shape = "user", proxied = proxy_fields.is_some());
            AccessSpec::for_user(scope, address, port, user)
        }
        Shape::Protocol { protocol, remote_port } => {
            trace!(
                event = "Decode",
                phase = "Classified",
                shape = "protocol",
                remote_port = remote_port.is_some(),
                proxied = proxy_fields.is_some()
            );
            let protocol: Protocol = protocol.parse().map_err(|_| DecodeError::UnknownProtocol {
                identifier: identifier.to_string(),
                protocol: protocol.to_string(),
            })?;
            let spec = AccessSpec::for_protocol(scope, address, port, protocol);
            match remote_port {
                None => spec,
                Some(raw) => {
                    let remote_port: u16 = raw.parse().map_err(|_| DecodeError::InvalidNumber {
                        identifier: identifier.to_string(),
                        field: "remote_port".to_string(),
                    })?;
                    spec.with_remote_port(remote_port).map_err(|_| DecodeError::UnexpectedRemotePort {
                        identifier: identifier.to_string(),
                        protocol: protocol.to_string(),
                    })?
                }
            }
        }
    };

    if let Some(fields) = proxy_fields {
        debug_assert_eq!(fields.len(), PROXY_FIELDS);
        spec = spec.with_proxy(Proxy::new(
            fields[0].clone(),
            fields[1].clone(),
            fields[2].clone(),
        ));
    }

    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use yare::parameterized;

    fn portforward(scope: Scope, address: &str, remote_port: u16) -> AccessSpec {
        AccessSpec::for_protocol(scope, address, "22", Protocol::PortForward)
            .with_remote_port(remote_port)
            .unwrap()
    }

    #[test]
    fn test_encode_full_portforward_with_proxy() {
        let spec = portforward(Scope::group("grp"), "2001:db8::1", 8080)
            .with_proxy(Proxy::new("fd00::1", "22", "proxy_user"));
        assert_snapshot!(encode(&spec), @"grp:[2001:db8::1]:22::portforward:8080:[fd00::1]:22:proxy_user");
    }

    #[test]
    fn test_encode_guest_user() {
        let spec = AccessSpec::for_user(Scope::guest("ops", "alice"), "192.168.1.100", "22", "root");
        assert_snapshot!(encode(&spec), @"ops:alice:192.168.1.100:22:root");
    }

    #[test]
    fn test_encode_protocol_leaves_user_empty() {
        let spec = AccessSpec::for_protocol(Scope::group("g"), "192.168.1.50", "22", Protocol::Sftp);
        assert_eq!(encode(&spec), "g:192.168.1.50:22::sftp");
    }

    #[test]
    fn test_display_renders_identifier() {
        let spec = AccessSpec::for_user(Scope::group("g"), "::1", "*", "*");
        assert_eq!(spec.to_string(), "g:[::1]:*:*");
    }

    #[parameterized(
        user = { "testgrpsrv1:192.168.1.100:22:root" },
        wildcards = { "g:10.0.0.0/8:*:*" },
        ipv6_user = { "testgrpsrvipv6:[::1]:22:root" },
        user_proxy = { "testgrpsrv4:10.0.0.50:22:admin:192.168.1.1:22:proxy_user" },
        ipv6_user_proxy = { "g:[2001:db8::1]:22:admin:[fd00::1]:22:proxy_user" },
        protocol = { "testgrpsrvsftp:192.168.1.50:22::sftp" },
        protocol_proxy = { "g:10.1.0.50:22::sftp:192.168.1.1:22:proxy_user" },
        portforward = { "g:10.0.0.1:22::portforward:8080" },
        portforward_proxy = { "grp:[2001:db8::1]:22::portforward:8080:[fd00::1]:*:proxy_user" },
        portforward_without_remote_port = { "g:10.0.0.1:22::portforward" },
    )]
    fn test_group_identifier_round_trip(identifier: &str) {
        let spec = decode_group(identifier).unwrap();
        assert_eq!(spec.scope().kind(), ScopeKind::Group);
        assert_eq!(encode(&spec), identifier);
    }

    #[parameterized(
        user = { "ops:alice:192.168.1.100:22:root" },
        protocol = { "ops:alice:10.0.0.1:22::rsync" },
        portforward = { "ops:alice:[fe80::1]:22::portforward:3000" },
        user_proxy = { "ops:alice:10.0.0.1:22:root:10.0.0.254:2222:jump" },
        protocol_proxy = { "ops:alice:10.0.0.1:22::scpupload:10.0.0.254:22:jump" },
        portforward_proxy = { "ops:alice:10.0.0.1:22::portforward:3000:10.0.0.254:22:jump" },
    )]
    fn test_guest_identifier_round_trip(identifier: &str) {
        let spec = decode_guest(identifier).unwrap();
        assert_eq!(spec.scope(), &Scope::guest("ops", "alice"));
        assert_eq!(encode(&spec), identifier);
    }

    #[test]
    fn test_decode_end_to_end_portforward_with_proxy() {
        let spec = decode_group("grp:[2001:db8::1]:22::portforward:8080:[fd00::1]:22:proxy_user").unwrap();
        let expected = portforward(Scope::group("grp"), "2001:db8::1", 8080)
            .with_proxy(Proxy::new("fd00::1", "22", "proxy_user"));
        assert_eq!(spec, expected);
    }

    #[test]
    fn test_decode_user_with_proxy_fields() {
        let spec = decode_group("g:10.0.0.50:22:admin:192.168.1.1:22:proxy_user").unwrap();
        assert_eq!(spec.address(), "10.0.0.50");
        assert_eq!(spec.port(), "22");
        assert_eq!(spec.principal(), &Principal::User("admin".to_string()));
        assert_eq!(spec.remote_port(), None);
        assert_eq!(spec.proxy(), Some(&Proxy::new("192.168.1.1", "22", "proxy_user")));
    }

    #[test]
    fn test_empty_user_with_proxy_round_trips() {
        let spec = AccessSpec::for_user(Scope::group("grp"), "10.0.0.1", "22", "")
            .with_proxy(Proxy::new("10.0.0.254", "22", "jump"));
        let identifier = encode(&spec);
        assert_eq!(identifier, "grp:10.0.0.1:22::10.0.0.254:22:jump");
        assert_eq!(decode_group(&identifier), Ok(spec));
    }

    #[parameterized(
        too_few = { "g:1.2.3.4:22", 3 },
        scope_only = { "g", 1 },
        empty = { "", 1 },
        too_many = { "g:1.2.3.4:22::portforward:8080:10.0.0.1:22:u:extra", 10 },
    )]
    fn test_decode_rejects_arity(identifier: &str, token_count: usize) {
        assert_eq!(
            decode_group(identifier),
            Err(DecodeError::InvalidArity {
                identifier: identifier.to_string(),
                token_count,
            })
        );
    }

    #[test]
    fn test_decode_guest_needs_account_field() {
        // Valid as a group identifier, one field short as a guest identifier.
        assert!(decode_group("ops:10.0.0.1:22:root").is_ok());
        assert!(matches!(
            decode_guest("ops:10.0.0.1:22:root"),
            Err(DecodeError::InvalidArity { token_count: 4, .. })
        ));
    }

    #[parameterized(
        user_then_protocol = { "g:10.0.0.1:22:root:sftp" },
        user_protocol_remote = { "g:10.0.0.1:22:root:portforward:8080" },
        user_protocol_proxy = { "g:10.0.0.1:22:root:sftp:10.0.0.2:22:u" },
    )]
    fn test_decode_rejects_shape(identifier: &str) {
        assert!(matches!(decode_group(identifier), Err(DecodeError::InvalidShape { .. })));
    }

    #[parameterized(
        not_numeric = { "g:10.0.0.1:22::portforward:http" },
        out_of_range = { "g:10.0.0.1:22::portforward:70000" },
        negative = { "g:10.0.0.1:22::portforward:-1" },
        with_proxy = { "g:10.0.0.1:22::portforward:x:10.0.0.2:22:u" },
    )]
    fn test_decode_rejects_remote_port(identifier: &str) {
        assert_eq!(
            decode_group(identifier),
            Err(DecodeError::InvalidNumber {
                identifier: identifier.to_string(),
                field: "remote_port".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_rejects_unknown_protocol() {
        assert_eq!(
            decode_group("g:10.0.0.1:22::telnet"),
            Err(DecodeError::UnknownProtocol {
                identifier: "g:10.0.0.1:22::telnet".to_string(),
                protocol: "telnet".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_rejects_remote_port_on_other_protocols() {
        assert_eq!(
            decode_group("g:10.0.0.1:22::sftp:8080"),
            Err(DecodeError::UnexpectedRemotePort {
                identifier: "g:10.0.0.1:22::sftp:8080".to_string(),
                protocol: "sftp".to_string(),
            })
        );
    }
}
