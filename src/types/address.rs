//! Bracket handling for addresses embedded in colon-delimited identifiers.

/// Wrap an address in `[` `]` when it contains a colon (IPv6 literals and
/// IPv6 subnets). Tokens that are already wrapped are returned unchanged.
pub fn wrap(address: &str) -> String {
    if is_wrapped(address) || !address.contains(':') {
        return address.to_string();
    }
    format!("[{address}]")
}

/// Strip exactly one leading `[` and one trailing `]`, if both are present.
pub fn unwrap(token: &str) -> &str {
    token
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(token)
}

fn is_wrapped(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('[') && token.ends_with(']')
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        ipv4 = { "192.168.1.100", "192.168.1.100" },
        ipv4_subnet = { "10.0.0.0/8", "10.0.0.0/8" },
        hostname = { "db.example.com", "db.example.com" },
        ipv6 = { "2001:db8::1", "[2001:db8::1]" },
        ipv6_loopback = { "::1", "[::1]" },
        ipv6_subnet = { "fd00::/64", "[fd00::/64]" },
        already_wrapped = { "[::1]", "[::1]" },
        empty = { "", "" },
    )]
    fn test_wrap(input: &str, expected: &str) {
        assert_eq!(wrap(input), expected);
    }

    #[parameterized(
        wrapped_ipv6 = { "[2001:db8::1]", "2001:db8::1" },
        plain = { "10.0.0.1", "10.0.0.1" },
        only_leading = { "[abc", "[abc" },
        only_trailing = { "abc]", "abc]" },
        double_wrapped = { "[[::1]]", "[::1]" },
        empty_brackets = { "[]", "" },
    )]
    fn test_unwrap(input: &str, expected: &str) {
        assert_eq!(unwrap(input), expected);
    }

    #[parameterized(
        ipv4 = { "1.2.3.4" },
        ipv6 = { "fe80::1" },
        star = { "*" },
        empty = { "" },
    )]
    fn test_unwrap_inverts_wrap(address: &str) {
        assert_eq!(unwrap(&wrap(address)), address);
    }

    #[parameterized(
        ipv6 = { "[fe80::1]" },
        subnet = { "[2001:db8::/32]" },
    )]
    fn test_wrap_inverts_unwrap(token: &str) {
        assert_eq!(wrap(unwrap(token)), token);
    }
}
