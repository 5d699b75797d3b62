//! Network predicates: IP addresses, ports, hostnames, MAC addresses.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

pub(crate) fn is_ip(input: &str) -> bool {
    input.parse::<IpAddr>().is_ok()
}

pub(crate) fn is_ipv4(input: &str) -> bool {
    input.parse::<Ipv4Addr>().is_ok()
}

pub(crate) fn is_ipv6(input: &str) -> bool {
    input.parse::<Ipv6Addr>().is_ok()
}

/// 1..=65535; port 0 is reserved and rejected.
pub(crate) fn is_port(input: &str) -> bool {
    input.parse::<u16>().is_ok_and(|port| port != 0)
}

/// RFC 1123 hostname: up to 253 chars of dot-separated labels, each label
/// 1..=63 chars of `[a-zA-Z0-9-]` not starting or ending with a hyphen.
/// A trailing dot (FQDN notation) is accepted.
pub(crate) fn is_hostname(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    let hostname = input.strip_suffix('.').unwrap_or(input);
    if hostname.is_empty() || hostname.len() > 253 {
        return false;
    }
    hostname.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

/// MAC address in colon, hyphen, Cisco dot, or bare notation.
pub(crate) fn is_mac_address(input: &str) -> bool {
    let hex_only = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_hexdigit());

    if input.contains(':') || input.contains('-') {
        let sep = if input.contains(':') { ':' } else { '-' };
        let groups: Vec<&str> = input.split(sep).collect();
        return groups.len() == 6 && groups.iter().all(|g| hex_only(g, 2));
    }
    if input.contains('.') {
        let groups: Vec<&str> = input.split('.').collect();
        return groups.len() == 3 && groups.iter().all(|g| hex_only(g, 4));
    }
    hex_only(input, 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ip_families() {
        assert!(is_ip("192.168.0.1"));
        assert!(is_ip("::1"));
        assert!(is_ipv4("10.0.0.1"));
        assert!(!is_ipv4("::1"));
        assert!(is_ipv6("2001:db8::1"));
        assert!(!is_ipv6("10.0.0.1"));
        assert!(!is_ip("999.0.0.1"));
    }

    #[test]
    fn port_range() {
        assert!(is_port("1"));
        assert!(is_port("8080"));
        assert!(is_port("65535"));
        assert!(!is_port("0"));
        assert!(!is_port("65536"));
        assert!(!is_port("http"));
    }

    #[test]
    fn hostnames() {
        assert!(is_hostname("example.com"));
        assert!(is_hostname("localhost"));
        assert!(is_hostname("example.com."));
        assert!(!is_hostname(""));
        assert!(!is_hostname("-bad.com"));
        assert!(!is_hostname("bad-.com"));
        assert!(!is_hostname("double..dot"));
    }

    #[test]
    fn mac_formats() {
        assert!(is_mac_address("AA:BB:CC:DD:EE:FF"));
        assert!(is_mac_address("aa:bb:cc:dd:ee:ff"));
        assert!(is_mac_address("AA-BB-CC-DD-EE-FF"));
        assert!(is_mac_address("AABB.CCDD.EEFF"));
        assert!(is_mac_address("AABBCCDDEEFF"));
        assert!(!is_mac_address("GG:HH:II:JJ:KK:LL"));
        assert!(!is_mac_address("AA:BB:CC"));
    }
}
