/// Reassemble a canonical URL from its components.
///
/// Produces `schema://[user[:password]@]host[:port][fullpath]`. A password is
/// only emitted when a user is present.
pub fn reconstruct_url(
    schema: &str,
    user: Option<&str>,
    password: Option<&str>,
    host: &str,
    port: Option<u16>,
    fullpath: Option<&str>,
) -> String {
    let mut url = format!("{schema}://");

    if let Some(user) = user {
        url.push_str(user);
        if let Some(password) = password {
            url.push(':');
            url.push_str(password);
        }
        url.push('@');
    }

    url.push_str(host);

    if let Some(port) = port {
        url.push(':');
        url.push_str(&port.to_string());
    }

    if let Some(fullpath) = fullpath {
        url.push_str(fullpath);
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct_minimal() {
        assert_eq!(reconstruct_url("http", None, None, "host", None, None), "http://host");
    }

    #[test]
    fn test_reconstruct_full() {
        assert_eq!(
            reconstruct_url("mailto", Some("user"), Some("pass"), "[::1]", Some(25), Some("/a/b")),
            "mailto://user:pass@[::1]:25/a/b"
        );
    }

    #[test]
    fn test_reconstruct_empty_credentials() {
        assert_eq!(
            reconstruct_url("crazy", Some(""), Some(""), "", None, Some("/x")),
            "crazy://:@/x"
        );
        assert_eq!(reconstruct_url("json", Some("u"), None, "h", None, None), "json://u@h");
    }
}
