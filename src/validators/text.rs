use regex::RegexBuilder;
use tracing::warn;
use uuid::{Uuid, Variant};

use crate::bulk::Entry;

/// Canonical hyphenated UUID length.
const UUID_LEN: usize = 36;

/// True for a hyphenated RFC 4122 version 4 UUID.
pub fn is_uuid(value: &str) -> bool {
    if value.len() != UUID_LEN {
        return false;
    }
    match Uuid::parse_str(value) {
        Ok(uuid) => uuid.get_version_num() == 4 && uuid.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}

/// Read a yes/no style answer. Only the first two characters matter, so
/// `Enabled`, `yes`, `TRUE`, `on` and `1` are true while `Disabled`, `no`,
/// `never`, `off` and `0` are false. Anything else yields `default`.
pub fn parse_bool(value: &str, default: bool) -> bool {
    let prefix: String = value.trim().to_lowercase().chars().take(2).collect();
    match prefix.as_str() {
        "de" | "di" | "ne" | "f" | "fa" | "n" | "no" | "of" | "0" => false,
        "en" | "al" | "t" | "tr" | "y" | "ye" | "on" | "1" => true,
        _ => default,
    }
}

/// [`parse_bool`] for loosely typed input: lists are true when they are
/// not empty and anything else that is not text is false.
pub fn parse_bool_value(value: &Entry, default: bool) -> bool {
    match value {
        Entry::Text(text) => parse_bool(text, default),
        Entry::Seq(items) => !items.is_empty(),
        Entry::Other => false,
    }
}

/// Settings for [`validate_regex_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexOptions<'a> {
    pub pattern: &'a str,
    /// Inline flag letters: `i`, `m`, `s`, `x` and `u`. Unknown letters are
    /// ignored.
    pub flags: &'a str,
    pub strip: bool,
    /// Template whose `{name}` placeholders are filled from named groups.
    pub fmt: Option<&'a str>,
}

impl Default for RegexOptions<'_> {
    fn default() -> Self {
        Self {
            pattern: r"[^\s]+",
            flags: "i",
            strip: true,
            fmt: None,
        }
    }
}

/// [`validate_regex_with`] using a "no whitespace" pattern.
pub fn validate_regex(value: &str) -> Option<String> {
    validate_regex_with(value, &RegexOptions::default())
}

/// Match `value` against a pattern anchored at its start.
///
/// # Arguments
/// * `value` - The text to validate, trimmed first when `strip` is set
/// * `options` - The pattern, its flags and an optional output template
///
/// # Returns
/// * `Option<String>` - The value (or the filled template) on a match
pub fn validate_regex_with(value: &str, options: &RegexOptions<'_>) -> Option<String> {
    let value = if options.strip { value.trim() } else { value };
    if value.is_empty() {
        return None;
    }

    let mut builder = RegexBuilder::new(&format!("^(?:{})", options.pattern));
    for flag in options.flags.chars() {
        match flag {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            'u' => builder.unicode(true),
            _ => continue,
        };
    }

    let regex = match builder.build() {
        Ok(regex) => regex,
        Err(err) => {
            warn!("Invalid validation pattern {:?}: {}", options.pattern, err);
            return None;
        }
    };

    let caps = regex.captures(value)?;

    let result = match options.fmt {
        Some(fmt) => regex
            .capture_names()
            .flatten()
            .fold(fmt.to_string(), |out, name| {
                let group = caps.name(name).map_or("", |m| m.as_str());
                out.replace(&format!("{{{name}}}"), group)
            }),
        None => value.to_string(),
    };

    Some(if options.strip {
        result.trim().to_string()
    } else {
        result
    })
}
