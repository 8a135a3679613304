//! Reconciles desired access specifications against remote listings.
//!
//! The remote system reports wildcards as absent fields and protocol
//! restrictions as a `!protocol` user. Matching applies those conventions
//! field by field and stops at the first mismatch. Addresses and proxy users
//! are compared byte for byte.

use tracing::{debug, trace};

use crate::types::{AccessRecord, AccessSpec, PortValue, Principal, WILDCARD, port_or_wildcard};

/// True when `record` describes the same rule as `spec`.
pub fn matches(spec: &AccessSpec, record: &AccessRecord) -> bool {
    if spec.address() != record.ip {
        return false;
    }

    if spec.port() != port_or_wildcard(record.port.as_ref()) {
        return false;
    }

    let record_user = record.user.as_deref();
    let principal_matches = match spec.principal() {
        Principal::Protocol(protocol) => record_user == Some(protocol.as_remote_user().as_str()),
        Principal::User(name) => record_user.unwrap_or(WILDCARD) == name,
    };
    if !principal_matches {
        return false;
    }

    match (spec.remote_port(), record.remote_port.as_ref()) {
        (None, None) => {}
        (Some(wanted), Some(found)) if remote_port_eq(wanted, found) => {}
        _ => return false,
    }

    match (spec.proxy(), record.proxy_ip.as_deref()) {
        (None, None) => true,
        (Some(proxy), Some(proxy_ip)) => {
            proxy.address() == proxy_ip
                && proxy.port() == port_or_wildcard(record.proxy_port.as_ref())
                && record.proxy_user.as_deref() == Some(proxy.user())
        }
        _ => false,
    }
}

fn remote_port_eq(wanted: u16, found: &PortValue) -> bool {
    found.as_number() == Some(i64::from(wanted))
}

/// The first record in `records` that matches `spec`.
///
/// `None` means the rule no longer exists remotely.
pub fn find_match<'a>(spec: &AccessSpec, records: &'a [AccessRecord]) -> Option<&'a AccessRecord> {
    let found = records.iter().position(|record| matches(spec, record));
    debug!(
        event = "Reconcile",
        phase = "Lookup",
        identifier = %spec,
        scanned = records.len(),
        found = found.is_some()
    );
    found.map(|idx| {
        trace!(event = "Reconcile", phase = "Matched", index = idx);
        &records[idx]
    })
}
