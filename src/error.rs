//! Reasons a URL is rejected by the parser.

use thiserror::Error;

/// Why [`ParsedUrl::parse`](crate::url_parser::ParsedUrl::parse) refused an
/// input. The sentinel API ([`parse_url`](crate::parse_url)) collapses all of
/// these into `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// Nothing but whitespace was supplied while host verification was on.
    #[error("URL is empty")]
    Empty,

    /// No host could be located in the input.
    #[error("URL has no host")]
    MissingHost,

    /// The host is neither a hostname nor an IP address.
    #[error("invalid host: {0}")]
    InvalidHost(String),

    /// A port separator was present but the port is not in 1-65535.
    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    /// A `?` appeared inside the credentials, so the query start is ambiguous.
    #[error("credentials may not contain '?'")]
    QueryInCredentials,
}
