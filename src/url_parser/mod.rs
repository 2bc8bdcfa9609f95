//! Tolerant URL decomposition.
//!
//! The grammar accepted here is wider than RFC 3986: schemas are optional,
//! slashes may repeat, credentials may be empty and hosts are only checked
//! when asked to. Every successful parse can be turned back into a
//! canonical URL string with [`ParsedUrl::to_url`].

pub mod parser;
pub mod url_processor;
pub mod url_reconstructor;


use std::collections::HashMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

pub use url_processor::{parse_qsd, ParsedQuery};

/// Schema assumed for input that does not carry one.
pub const DEFAULT_SCHEMA: &str = "http";

/// Knobs for [`ParsedUrl::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Require a valid hostname or IP literal and a valid port.
    pub verify_host: bool,
    /// Schema used when the input has no `schema://` prefix.
    pub default_schema: String,
    /// Reject an invalid port even when `verify_host` is off.
    pub strict_port: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            verify_host: true,
            default_schema: DEFAULT_SCHEMA.to_string(),
            strict_port: false,
        }
    }
}

impl ParseOptions {
    /// Options with host verification switched off.
    pub fn lenient() -> Self {
        Self {
            verify_host: false,
            ..Self::default()
        }
    }
}

/// Insertion-ordered query arguments. Re-inserting a key replaces its value
/// in place and keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>, // key -> position in `entries`
}

impl QueryArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = QueryArgs::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

impl Serialize for QueryArgs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// The components of a URL.
///
/// `schema` is always lowercase; `host` keeps its case. `url` is the
/// canonical reassembly of schema, credentials, host, port and `fullpath`;
/// the query string is not part of it. The three sigil buckets hold the
/// query keys that started with `+`, `-` or `:`, stripped of the sigil and
/// with their case preserved; each of them is mirrored in `qsd` under the
/// lowercase, sigil-prefixed key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParsedUrl {
    pub schema: String,
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub path: Option<String>,
    pub fullpath: Option<String>,
    pub query: Option<String>,
    pub url: String,
    pub qsd: QueryArgs,
    #[serde(rename = "qsd+")]
    pub qsd_add: QueryArgs,
    #[serde(rename = "qsd-")]
    pub qsd_del: QueryArgs,
    #[serde(rename = "qsd:")]
    pub qsd_colon: QueryArgs,
}

impl ParsedUrl {
    /// Rebuild the canonical URL from the individual components.
    pub fn to_url(&self) -> String {
        url_reconstructor::reconstruct_url(
            &self.schema,
            self.user.as_deref(),
            self.password.as_deref(),
            &self.host,
            self.port,
            self.fullpath.as_deref(),
        )
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Parse with the default options (`http` schema, host verification on).
pub fn parse_url(url: &str) -> Option<ParsedUrl> {
    parse_url_with(url, &ParseOptions::default())
}

/// Parse `url`, returning `None` for anything that cannot be decomposed.
pub fn parse_url_with(url: &str, options: &ParseOptions) -> Option<ParsedUrl> {
    match ParsedUrl::parse(url, options) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(reason = %err, verify_host = options.verify_host, "URL rejected");
            None
        }
    }
}
