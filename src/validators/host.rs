use crate::patterns::{HOSTNAME_LABEL, HOSTNAME_LABEL_NO_UNDERSCORE, IPV4, IPV6};

/// The longest hostname DNS allows, dots included.
const MAX_HOSTNAME_LEN: usize = 253;

/// Which kinds of host [`is_hostname_with`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostnameOptions {
    pub ipv4: bool,       // Accept dotted-quad IPv4 addresses
    pub ipv6: bool,       // Accept IPv6 literals, bracketed or bare
    pub underscore: bool, // Allow '_' inside labels
}

impl Default for HostnameOptions {
    fn default() -> Self {
        Self {
            ipv4: true,
            ipv6: true,
            underscore: true,
        }
    }
}

/// Validate a hostname or IP literal with every family enabled.
pub fn is_hostname(value: &str) -> Option<String> {
    is_hostname_with(value, HostnameOptions::default())
}

/// Validate a hostname or IP literal.
///
/// One trailing dot is dropped. Four all-numeric labels are only ever
/// checked as IPv4. Anything whose labels are not RFC 1123 labels is given
/// a second chance as an IP literal; IPv6 results always come back in
/// square brackets.
///
/// # Arguments
/// * `value` - The candidate host
/// * `options` - Which address families and label characters are allowed
///
/// # Returns
/// * `Option<String>` - The normalised host, or `None` if it is not valid
pub fn is_hostname_with(value: &str, options: HostnameOptions) -> Option<String> {
    if value.is_empty() || value.len() > MAX_HOSTNAME_LEN {
        return None;
    }

    let hostname = value.strip_suffix('.').unwrap_or(value);
    let labels: Vec<&str> = hostname.split('.').collect();

    if labels.len() == 4 && hostname.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return ip_literal(hostname, options.ipv4, false);
    }

    let label = if options.underscore {
        &*HOSTNAME_LABEL
    } else {
        &*HOSTNAME_LABEL_NO_UNDERSCORE
    };

    if labels.iter().all(|l| label.is_match(l)) {
        Some(hostname.to_string())
    } else {
        ip_literal(hostname, options.ipv4, options.ipv6)
    }
}

/// Validate an IPv4 or IPv6 address; hostnames are not accepted.
pub fn is_ipaddr(value: &str) -> Option<String> {
    ip_literal(value, true, true)
}

pub fn is_ipv4(value: &str) -> Option<String> {
    IPV4.is_match(value).then(|| value.to_string())
}

/// Validate an IPv6 literal and return it bracketed.
pub fn is_ipv6(value: &str) -> Option<String> {
    if value.starts_with('[') != value.ends_with(']') {
        return None;
    }
    IPV6.captures(value).map(|caps| format!("[{}]", &caps["ip"]))
}

fn ip_literal(value: &str, ipv4: bool, ipv6: bool) -> Option<String> {
    if ipv4 {
        if let Some(ip) = is_ipv4(value) {
            return Some(ip);
        }
    }
    if ipv6 {
        return is_ipv6(value);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn families(ipv4: bool, ipv6: bool) -> HostnameOptions {
        HostnameOptions {
            ipv4,
            ipv6,
            ..HostnameOptions::default()
        }
    }

    #[test]
    fn test_valid_hostnames() {
        assert_eq!(is_hostname("yahoo.ca").as_deref(), Some("yahoo.ca"));
        assert_eq!(is_hostname("yahoo.ca.").as_deref(), Some("yahoo.ca"));
        assert_eq!(
            is_hostname("valid-underscores_in_host.ca").as_deref(),
            Some("valid-underscores_in_host.ca")
        );
        assert_eq!(
            is_hostname_with("cloud.a.example.com", families(false, false)).as_deref(),
            Some("cloud.a.example.com")
        );
    }

    #[test]
    fn test_underscore_toggle() {
        let options = HostnameOptions {
            underscore: false,
            ..HostnameOptions::default()
        };
        assert!(is_hostname_with("valid_dashes_in_host.ca", options).is_none());
        assert!(is_hostname_with("valid-dashes-in-host.ca", options).is_some());
    }

    #[test]
    fn test_invalid_hostnames() {
        assert!(is_hostname("-hostname.that.starts.with.a.dash").is_none());
        assert!(is_hostname("invalid-characters_#^.ca").is_none());
        assert!(is_hostname("    spaces   ").is_none());
        assert!(is_hostname("       ").is_none());
        assert!(is_hostname("").is_none());
        assert!(is_hostname(&"a".repeat(254)).is_none());

        // Labels may not end with a dash or an underscore
        assert!(is_hostname("bad-.example.com").is_none());
        assert!(is_hostname("host_.example.com").is_none());
        assert!(is_hostname("example.com-").is_none());
        assert!(is_hostname(&format!("{}.com", "a".repeat(64))).is_none());
        assert!(is_hostname(&format!("{}.com", "a".repeat(63))).is_some());
    }

    #[test]
    fn test_ipv4() {
        assert_eq!(is_hostname("127.0.0.1").as_deref(), Some("127.0.0.1"));
        assert_eq!(is_hostname("255.255.255.255").as_deref(), Some("255.255.255.255"));
        assert!(is_hostname_with("127.0.0.1", families(false, true)).is_none());
        assert!(is_hostname("1.2.3").is_none());
        assert!(is_hostname("256.256.256.256").is_none());
        assert!(is_hostname("999.0.0.0").is_none());
        assert!(is_hostname("1.2.3.4.5").is_none());
        assert!(is_hostname("    127.0.0.1   ").is_none());
    }

    #[test]
    fn test_ipv6_is_bracketed() {
        assert_eq!(is_hostname("::1").as_deref(), Some("[::1]"));
        assert_eq!(is_hostname("0:0:0:0:0:0:0:1").as_deref(), Some("[0:0:0:0:0:0:0:1]"));
        assert_eq!(
            is_hostname("2001:0db8:85a3:0000:0000:8a2e:0370:7334").as_deref(),
            Some("[2001:0db8:85a3:0000:0000:8a2e:0370:7334]")
        );
        assert_eq!(
            is_hostname("[2001:db8:002a:3256:adfe:05c0:0003:0006]").as_deref(),
            Some("[2001:db8:002a:3256:adfe:05c0:0003:0006]")
        );
        assert!(is_hostname_with("[::1]", families(true, false)).is_none());
        assert!(is_ipv6("[::1").is_none());
    }

    #[test]
    fn test_is_ipaddr() {
        assert_eq!(is_ipaddr("0.0.0.0").as_deref(), Some("0.0.0.0"));
        assert_eq!(is_ipaddr("::1").as_deref(), Some("[::1]"));
        assert!(is_ipaddr("localhost").is_none());
        assert!(is_ipaddr("").is_none());
    }
}
