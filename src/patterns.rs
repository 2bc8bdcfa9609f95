//! Precompiled grammar shared by the parser, the validators and the bulk
//! splitters. Every pattern is compiled once on first use and only read
//! afterwards.

use once_cell::sync::Lazy;
use regex::Regex;

/// `schema://` at the very start of a (trimmed) URL.
pub static URL_SCHEMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<schema>[a-z0-9+.\-]+)://").unwrap()
});

/// Schema lookup used when routing a URL to a registered handler.
pub static GET_SCHEMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?P<schema>[a-z0-9]{1,12})://").unwrap()
});

pub static REPEATED_SLASHES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/{2,}").unwrap()
});

/// Separators accepted by the list parsers.
pub static STRING_DELIMITERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\[\];,\s]+").unwrap()
});

pub static IPV4: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<ip>((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?))$",
    )
    .unwrap()
});

/// Full, compressed, link-local and IPv4-mapped IPv6 forms, with optional
/// RFC 2732 square brackets.
pub static IPV6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^\[?(?P<ip>(",
        r"([0-9a-f]{1,4}:){7,7}[0-9a-f]{1,4}",
        r"|([0-9a-f]{1,4}:){1,7}:",
        r"|([0-9a-f]{1,4}:){1,6}:[0-9a-f]{1,4}",
        r"|([0-9a-f]{1,4}:){1,5}(:[0-9a-f]{1,4}){1,2}",
        r"|([0-9a-f]{1,4}:){1,4}(:[0-9a-f]{1,4}){1,3}",
        r"|([0-9a-f]{1,4}:){1,3}(:[0-9a-f]{1,4}){1,4}",
        r"|([0-9a-f]{1,4}:){1,2}(:[0-9a-f]{1,4}){1,5}",
        r"|[0-9a-f]{1,4}:((:[0-9a-f]{1,4}){1,6})",
        r"|:((:[0-9a-f]{1,4}){1,7}|:)",
        r"|fe80:(:[0-9a-f]{0,4}){0,4}%[0-9a-z]{1,}",
        r"|::(ffff(:0{1,4}){0,1}:){0,1}((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])",
        r"|([0-9a-f]{1,4}:){1,4}:((25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])\.){3,3}(25[0-5]|(2[0-4]|1{0,1}[0-9]){0,1}[0-9])",
        r"))\]?$",
    ))
    .unwrap()
});

/// One DNS label: starts and ends alphanumeric, at most 63 characters. A
/// single character label must be a letter.
pub static HOSTNAME_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z0-9][a-z0-9_-]{0,61}[a-z0-9]|[a-z])$").unwrap()
});

pub static HOSTNAME_LABEL_NO_UNDERSCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([a-z0-9][a-z0-9-]{0,61}[a-z0-9]|[a-z])$").unwrap()
});

/// `Display Name <label+user@domain>` and its looser spellings. Anchored at
/// the start only; trailing text after the address is ignored.
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?i)^(([\s"']+)?(?P<name>[^:<"']+)?[:<\s"']+)?"#,
        r"(?P<full_email>((?P<label>[^+]+)\+)?",
        r"(?P<email>(?P<userid>[a-z0-9$%=_~-]+(?:\.[a-z0-9$%+=_~-]+)*)@(?P<domain>(",
        r"(?:[a-z0-9](?:[a-z0-9_-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9_-]*[a-z0-9]))",
        r"|[a-z0-9][a-z0-9_-]{5,})))",
        r"\s*>?",
    ))
    .unwrap()
});

/// Rough shape check run before a phone number is picked apart.
pub static PHONE_NO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?(?P<phone>[0-9\s)(+\-]+)\s*$").unwrap()
});

/// Start of a URL inside free text.
pub static URL_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[a-z0-9]+://").unwrap()
});

/// What must follow a URL for it to end: delimiters and another schema.
pub static URL_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\s,]+[a-z0-9]{2,9}://").unwrap()
});

/// What must follow an address for it to end: delimiters, an optional
/// display name and another `user@domain`.
pub static EMAIL_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\s,]+(?:[^:<]+?[:<\s]+?)?[^@\s,]+@[^\s,]+").unwrap()
});

pub static PHONE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s,+(]+[0-9]").unwrap()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_pattern() {
        let caps = URL_SCHEMA.captures("HTTPS+Legacy.v2://host").unwrap();
        assert_eq!(&caps["schema"], "HTTPS+Legacy.v2");
        assert!(!URL_SCHEMA.is_match("host/path://x"));
        assert!(!URL_SCHEMA.is_match(" http://host"));
    }

    #[test]
    fn test_get_schema_allows_leading_space() {
        let caps = GET_SCHEMA.captures("  file://path").unwrap();
        assert_eq!(&caps["schema"], "file");
        assert!(GET_SCHEMA.captures("/tmp/file.gif").is_none());
    }

    #[test]
    fn test_boundaries() {
        assert!(URL_BOUNDARY.is_match(", gnome://"));
        assert!(!URL_BOUNDARY.is_match("=https://"));
        assert!(EMAIL_BOUNDARY.is_match(", Chuck Norris roundhouse@kick.com"));
        assert!(!EMAIL_BOUNDARY.is_match(",test2"));
        assert!(PHONE_BOUNDARY.is_match("  , + 1"));
        assert!(!PHONE_BOUNDARY.is_match("-"));
    }
}
