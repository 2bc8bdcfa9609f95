//! Routing of URLs to the handler registered for their schema.
//!
//! The table is assembled once through [`SchemaRegistryBuilder`] and is
//! read-only afterwards, so a built [`SchemaRegistry`] can be shared across
//! threads freely.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::patterns::GET_SCHEMA;
use crate::url_parser::url_processor::quote;
use crate::url_parser::{parse_url_with, ParseOptions, ParsedUrl};

/// Something that consumes parsed URLs for one or more schemas.
pub trait SchemaHandler: Send + Sync {
    /// Human readable name, used in log lines.
    fn name(&self) -> &str;

    /// Turn `url` into its components. Uses the default parser (host
    /// verification on) unless overridden.
    fn parse_url(&self, url: &str) -> Option<ParsedUrl> {
        parse_url_with(url, &ParseOptions::default())
    }

    /// Final say over a parsed URL, e.g. to require a path.
    fn accepts(&self, _parsed: &ParsedUrl) -> bool {
        true
    }
}

/// The lowercase schema of `url`, if it starts with one.
pub fn detect_schema(url: &str) -> Option<String> {
    GET_SCHEMA
        .captures(url)
        .map(|caps| caps["schema"].to_lowercase())
}

/// A handler together with the URL it accepted.
#[derive(Clone)]
pub struct Resolved {
    pub handler: Arc<dyn SchemaHandler>,
    pub parsed: ParsedUrl,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("handler", &self.handler.name())
            .field("parsed", &self.parsed)
            .finish()
    }
}

#[derive(Default)]
pub struct SchemaRegistryBuilder {
    handlers: HashMap<String, Arc<dyn SchemaHandler>>,
    fallback: Option<String>,
}

impl SchemaRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `schema` (case-insensitive) to `handler`. A later registration
    /// for the same schema replaces the earlier one.
    pub fn register(mut self, schema: &str, handler: Arc<dyn SchemaHandler>) -> Self {
        self.handlers.insert(schema.to_lowercase(), handler);
        self
    }

    /// Schema used for input that carries none, such as a bare file path.
    pub fn fallback(mut self, schema: &str) -> Self {
        self.fallback = Some(schema.to_lowercase());
        self
    }

    pub fn build(self) -> SchemaRegistry {
        SchemaRegistry {
            handlers: self.handlers,
            fallback: self.fallback,
        }
    }
}

/// Read-only schema to handler table.
pub struct SchemaRegistry {
    handlers: HashMap<String, Arc<dyn SchemaHandler>>,
    fallback: Option<String>,
}

impl SchemaRegistry {
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::new()
    }

    pub fn get(&self, schema: &str) -> Option<&Arc<dyn SchemaHandler>> {
        self.handlers.get(&schema.to_lowercase())
    }

    pub fn contains(&self, schema: &str) -> bool {
        self.get(schema).is_some()
    }

    /// Registered schemas, sorted.
    pub fn schemas(&self) -> Vec<&str> {
        let mut schemas: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        schemas.sort_unstable();
        schemas
    }

    /// Find the handler for `url` and let it parse the URL.
    ///
    /// Input without a schema goes to the fallback schema, if one was set,
    /// with the whole input percent-quoted as the path.
    ///
    /// # Arguments
    /// * `url` - The URL to route
    ///
    /// # Returns
    /// * `Option<Resolved>` - The handler and parsed URL, or `None` if no handler took it
    pub fn resolve(&self, url: &str) -> Option<Resolved> {
        let (schema, url) = match detect_schema(url) {
            Some(schema) => (schema, url.to_string()),
            None => {
                let Some(fallback) = self.fallback.as_deref() else {
                    warn!("URL has no schema and no fallback is configured");
                    return None;
                };
                debug!("No schema found, routing to {}://", fallback);
                (fallback.to_string(), format!("{}://{}", fallback, quote(url.trim())))
            }
        };

        let Some(handler) = self.handlers.get(&schema) else {
            warn!("Unsupported schema {}", schema);
            return None;
        };

        let Some(parsed) = handler.parse_url(&url) else {
            warn!("{} could not parse the {}:// URL", handler.name(), schema);
            return None;
        };

        if !handler.accepts(&parsed) {
            warn!("{} rejected the {}:// URL", handler.name(), schema);
            return None;
        }

        Some(Resolved {
            handler: Arc::clone(handler),
            parsed,
        })
    }
}
