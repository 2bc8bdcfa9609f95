use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::patterns::URL_SCHEMA;
use crate::url_parser::ParseOptions;
use crate::utils::anonymizer::RedactOptions;
use crate::validators::PHONE_MIN_LEN;

/// Prefix of the environment variables that override settings, e.g.
/// `NOTIFY_URL__VERIFY_HOST=false`.
pub const ENV_PREFIX: &str = "NOTIFY_URL";

/// Configuration file picked up from the working directory when no path is
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "notify-url.toml";

/// Runtime settings for the command line front end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Schema assumed for input without one
    pub default_schema: String,

    /// Verify hosts and ports while parsing
    pub verify_host: bool,

    /// Minimum number of digits in a phone number
    pub phone_min_len: usize,

    /// Tag that matches any tag set
    pub match_all: String,

    /// Character class changes before a word is masked
    pub redact_threshold: usize,

    /// Filter used when RUST_LOG is not set
    pub log_level: String,

    /// Write logs to a timestamped file here instead of stderr
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_schema: "http".to_string(),
            verify_host: true,
            phone_min_len: PHONE_MIN_LEN,
            match_all: "all".to_string(),
            redact_threshold: RedactOptions::default().threshold,
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl Settings {
    /// Build the settings from the defaults, then the TOML file (`path`, or
    /// `notify-url.toml` if it exists), then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = config::Config::builder()
            .set_default("default_schema", defaults.default_schema)?
            .set_default("verify_host", defaults.verify_host)?
            .set_default("phone_min_len", defaults.phone_min_len as u64)?
            .set_default("match_all", defaults.match_all)?
            .set_default("redact_threshold", defaults.redact_threshold as u64)?
            .set_default("log_level", defaults.log_level)?;

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false)),
        };

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if !URL_SCHEMA.is_match(&format!("{}://", self.default_schema)) {
            bail!("default_schema {:?} is not a valid schema", self.default_schema);
        }
        if self.match_all.trim().is_empty() {
            bail!("match_all must not be empty");
        }
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            verify_host: self.verify_host,
            default_schema: self.default_schema.clone(),
            ..ParseOptions::default()
        }
    }

    pub fn redact_options(&self) -> RedactOptions {
        RedactOptions {
            threshold: self.redact_threshold,
            ..RedactOptions::default()
        }
    }
}
