use tracing::{debug, instrument, trace};

use crate::error::UrlError;
use crate::patterns::URL_SCHEMA;
use crate::validators::{is_hostname, is_ipv6};

use super::url_processor::{normalize_path, parse_qsd, split_path_query};
use super::url_reconstructor::reconstruct_url;
use super::{ParseOptions, ParsedUrl};

/// Characters that end the part of a query string that could still be
/// mistaken for the tail of a password.
const QUERY_KEY_END: [char; 4] = ['/', '&', '=', ';'];

impl ParsedUrl {
    /// Decompose `url` into its components.
    ///
    /// The input is trimmed first. Without a `schema://` prefix the whole
    /// string is read as `host[:port][/path]` under `options.default_schema`.
    /// The query string starts at the first `?`, unless that `?` sits inside
    /// the credentials, in which case the input is rejected.
    ///
    /// # Arguments
    /// * `url` - The text to decompose
    /// * `options` - Host verification, default schema and port strictness
    ///
    /// # Returns
    /// * `Result<ParsedUrl, UrlError>` - The components, or why they could not be found
    #[instrument(level = "trace", skip_all, fields(verify_host = options.verify_host))]
    pub fn parse(url: &str, options: &ParseOptions) -> Result<Self, UrlError> {
        let url = url.trim();
        if url.is_empty() && options.verify_host {
            return Err(UrlError::Empty);
        }

        let (schema, remainder) = match URL_SCHEMA.captures(url) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                (caps["schema"].to_lowercase(), &url[end..])
            }
            None => {
                trace!("No schema found, assuming {}", options.default_schema);
                (options.default_schema.to_lowercase(), url)
            }
        };

        let (before_query, query_string) = match remainder.split_once('?') {
            Some((before, qs)) => (before, Some(qs)),
            None => (remainder, None),
        };

        if let Some(qs) = query_string {
            if question_mark_in_credentials(before_query, qs) {
                return Err(UrlError::QueryInCredentials);
            }
        }

        // Fragments are never part of the canonical form.
        let before_query = before_query
            .split_once('#')
            .map_or(before_query, |(head, _)| head);

        let stripped = before_query.trim_start_matches('/');
        let (authority, raw_path) = match stripped.find('/') {
            Some(idx) => stripped.split_at(idx),
            None => (stripped, ""),
        };

        let (user, password, host_port) = split_credentials(authority);
        let (mut host, port_text) = split_host_port(host_port.trim());

        let mut port = None;
        if let Some(text) = port_text {
            match parse_port(text) {
                Some(value) => port = Some(value),
                None if options.verify_host || options.strict_port => {
                    return Err(UrlError::InvalidPort(text.to_string()));
                }
                None => {
                    trace!("Keeping unusable port as part of the host");
                    host = host_port.trim().to_string();
                }
            }
        }

        if options.verify_host {
            if host.is_empty() {
                return Err(UrlError::MissingHost);
            }
            host = is_hostname(&host).ok_or_else(|| UrlError::InvalidHost(host.clone()))?;
        } else if let Some(ip) = is_ipv6(&host) {
            host = ip;
        }

        let fullpath = normalize_path(raw_path);
        let (path, query) = match fullpath.as_deref() {
            Some(fullpath) => {
                let (path, query) = split_path_query(fullpath);
                (Some(path), query)
            }
            None => (None, None),
        };

        let args = query_string.map(parse_qsd).unwrap_or_default();

        let url = reconstruct_url(
            &schema,
            user.as_deref(),
            password.as_deref(),
            &host,
            port,
            fullpath.as_deref(),
        );
        debug!(schema = %schema, args = args.qsd.len(), "Parsed URL");

        Ok(ParsedUrl {
            schema,
            host,
            port,
            user,
            password,
            path,
            fullpath,
            query,
            url,
            qsd: args.qsd,
            qsd_add: args.qsd_add,
            qsd_del: args.qsd_del,
            qsd_colon: args.qsd_colon,
        })
    }
}

/// A `?` belongs to a password when the text before it reads as an
/// unfinished `user:password` and the text after it reaches an `@` before
/// any path or argument separator. A completed userinfo, a numeric port or
/// an IPv6 literal in front of the `?` all mean it starts a query string.
fn question_mark_in_credentials(before_query: &str, qs: &str) -> bool {
    let authority = before_query.trim_start_matches('/');
    if authority.contains(['/', '@']) {
        return false;
    }

    let Some((_, tail)) = authority.split_once(':') else {
        return false;
    };
    if tail.contains(':') {
        return false;
    }
    if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    qs.split(QUERY_KEY_END)
        .next()
        .is_some_and(|head| head.contains('@'))
}

/// Split `user:password@host:port` at the last `@`, then the credentials at
/// their last `:`. Both credentials are `None` when there is no `@`.
fn split_credentials(authority: &str) -> (Option<String>, Option<String>, &str) {
    let Some(at) = authority.rfind('@') else {
        return (None, None, authority);
    };

    let userinfo = authority[..at].trim_end_matches('@');
    let host_port = &authority[at + 1..];

    match userinfo.rfind(':') {
        Some(colon) => (
            Some(userinfo[..colon].trim_end_matches(':').to_string()),
            Some(userinfo[colon + 1..].to_string()),
            host_port,
        ),
        None => (Some(userinfo.to_string()), None, host_port),
    }
}

/// Separate a port from the host. Bracketed IPv6 literals carry their port
/// after `]:`; a bare string with more than one `:` is taken as an unbracketed
/// IPv6 literal with no port.
fn split_host_port(host_port: &str) -> (String, Option<&str>) {
    if host_port.starts_with('[') {
        if let Some(close) = host_port.find(']') {
            let rest = &host_port[close + 1..];
            return match rest.strip_prefix(':') {
                Some(port) => (host_port[..=close].to_string(), Some(port)),
                None => (host_port.to_string(), None),
            };
        }
    }

    if host_port.matches(':').count() == 1 {
        if let Some((host, port)) = host_port.split_once(':') {
            return (host.trim().to_string(), Some(port.trim()));
        }
    }

    (host_port.to_string(), None)
}

/// Digits only, 1 through 65535.
fn parse_port(text: &str) -> Option<u16> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<u16>().ok().filter(|port| *port > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_credentials() {
        assert_eq!(split_credentials("host"), (None, None, "host"));
        assert_eq!(
            split_credentials("user:pass@host"),
            (Some("user".into()), Some("pass".into()), "host")
        );
        assert_eq!(
            split_credentials(":@host"),
            (Some("".into()), Some("".into()), "host")
        );
        assert_eq!(split_credentials("user@host"), (Some("user".into()), None, "host"));
        assert_eq!(
            split_credentials("a@b:c@host"),
            (Some("a@b".into()), Some("c".into()), "host")
        );
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("host:80"), ("host".into(), Some("80")));
        assert_eq!(split_host_port("host:"), ("host".into(), Some("")));
        assert_eq!(split_host_port("[::1]:25"), ("[::1]".into(), Some("25")));
        assert_eq!(split_host_port("[::1]"), ("[::1]".into(), None));
        assert_eq!(split_host_port("fe80::1"), ("fe80::1".into(), None));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("80"), Some(80));
        assert_eq!(parse_port("65535"), Some(65535));
        assert_eq!(parse_port("0"), None);
        assert_eq!(parse_port("65536"), None);
        assert_eq!(parse_port("+80"), None);
        assert_eq!(parse_port(""), None);
    }

    #[test]
    fn test_question_mark_in_credentials() {
        assert!(question_mark_in_credentials("user:pa", "ss@host/path"));
        assert!(question_mark_in_credentials("user:", "secret@host"));
        assert!(!question_mark_in_credentials("host", "email=a@b.com"));
        assert!(!question_mark_in_credentials("host/path", "x@y"));

        // Nothing in front of the '?' looks like a password
        assert!(!question_mark_in_credentials("hostname", "user@example.com"));
        assert!(!question_mark_in_credentials("localhost", "to:a@b.com"));
        assert!(!question_mark_in_credentials("hostname:8080", "a@b.com"));
        assert!(!question_mark_in_credentials("user:pass@host", "a@b.com"));
        assert!(!question_mark_in_credentials("[::1]", "a@b.com"));
        assert!(!question_mark_in_credentials("fe80::1", "a@b.com"));
    }
}
