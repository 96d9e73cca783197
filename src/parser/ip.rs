use regex::Regex;
use std::sync::LazyLock;

// Octets are pattern-matched only, 999.999.999.999 is accepted.
static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").unwrap()
});

const IPV4_REVERSE_SUFFIX: &str = "in-addr.arpa.";

/// Checks that `s` is four groups of 1-3 ASCII digits separated by dots.
pub fn is_valid_ipv4(s: &str) -> bool {
    DOTTED_QUAD.is_match(s)
}

fn octets(ip: &str) -> Option<[&str; 4]> {
    if !is_valid_ipv4(ip) {
        return None;
    }

    let mut parts = ip.split('.');

    Some([parts.next()?, parts.next()?, parts.next()?, parts.next()?])
}

/// 192.168.1.5 -> 1.168.192
pub fn reverse_network(ip: &str) -> Option<String> {
    let [first, second, third, _] = octets(ip)?;

    Some(format!("{}.{}.{}", third, second, first))
}

/// 192.168.1.97 -> 97.1.168.192.in-addr.arpa.
pub fn ptr_name(ip: &str) -> Option<String> {
    let [.., host] = octets(ip)?;
    let network = reverse_network(ip)?;

    Some(format!("{}.{}.{}", host, network, IPV4_REVERSE_SUFFIX))
}

/// The reverse zone origin for the network `ip` lives in, without the trailing dot.
pub fn reverse_zone_origin(ip: &str) -> Option<String> {
    let network = reverse_network(ip)?;

    Some(format!("{}.{}", network, IPV4_REVERSE_SUFFIX.trim_end_matches('.')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dotted_quads() {
        assert!(is_valid_ipv4("192.168.1.5"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("10.1.22.255"));
    }

    #[test]
    fn test_out_of_range_octets_are_accepted() {
        // Octet range is not checked, only the shape of the address
        assert!(is_valid_ipv4("999.999.999.999"));
        assert!(is_valid_ipv4("256.0.0.1"));
    }

    #[test]
    fn test_invalid_dotted_quads() {
        assert!(!is_valid_ipv4("192.168.1"));
        assert!(!is_valid_ipv4("abc.def.1.1"));
        assert!(!is_valid_ipv4(""));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("1234.1.1.1"));
        assert!(!is_valid_ipv4(" 192.168.1.5"));
        assert!(!is_valid_ipv4("192.168.1.5\n"));
        assert!(!is_valid_ipv4("192.168..5"));
        assert!(!is_valid_ipv4("192.168.1.5/24"));
        // Non-ASCII digits must not slip through
        assert!(!is_valid_ipv4("١٩٢.168.1.5"));
    }

    #[test]
    fn test_reverse_network() {
        assert_eq!(reverse_network("192.168.1.5").as_deref(), Some("1.168.192"));
        assert_eq!(reverse_network("10.0.20.7").as_deref(), Some("20.0.10"));
        assert_eq!(reverse_network("192.168.1"), None);
    }

    #[test]
    fn test_ptr_name() {
        assert_eq!(ptr_name("192.168.1.97").as_deref(), Some("97.1.168.192.in-addr.arpa."));
        assert_eq!(ptr_name("999.999.999.999").as_deref(), Some("999.999.999.999.in-addr.arpa."));
        assert_eq!(ptr_name("not-an-ip"), None);
    }

    #[test]
    fn test_reverse_zone_origin() {
        assert_eq!(reverse_zone_origin("192.168.1.5").as_deref(), Some("1.168.192.in-addr.arpa"));
        assert_eq!(reverse_zone_origin("192.168.1.5.1"), None);
    }
}
