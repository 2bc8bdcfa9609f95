//! Masking of secrets before they reach a log line (CWE-312).

use crate::url_parser::{parse_url_with, ParseOptions};
use crate::validators::{is_hostname_with, HostnameOptions};

/// Query argument names whose values are always masked.
const SECRET_KEYS: [&str; 8] = ["password", "secret", "pass", "token", "key", "id", "apikey", "to"];

/// Any word this long is masked.
const MAX_PLAIN_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedactOptions {
    pub force: bool,      // Always mask
    pub advanced: bool,   // Mask words that mix character classes a lot
    pub threshold: usize, // Class changes needed before masking
}

impl Default for RedactOptions {
    fn default() -> Self {
        Self {
            force: false,
            advanced: true,
            threshold: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Digit,
    Upper,
    Lower,
    Special,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_numeric() {
            CharClass::Digit
        } else if c.is_uppercase() {
            CharClass::Upper
        } else if c.is_lowercase() {
            CharClass::Lower
        } else {
            CharClass::Special
        }
    }
}

fn mask(word: &str) -> String {
    let first = word.chars().next().map(String::from).unwrap_or_default();
    let last = word.chars().last().map(String::from).unwrap_or_default();
    format!("{first}...{last}")
}

/// Count how often consecutive characters change class. Every special
/// character after the first position counts on its own.
fn obscurity(word: &str) -> usize {
    let mut count = 0;
    let mut last = None;
    for class in word.chars().map(CharClass::of) {
        if let Some(previous) = last {
            if class == CharClass::Special || class != previous {
                count += 1;
            }
        }
        last = Some(class);
    }
    count
}

/// Mask a word with the default options.
pub fn cwe312_word(word: &str) -> String {
    cwe312_word_with(word, RedactOptions::default())
}

/// Mask `word` down to `first...last` when it looks like it could be a
/// secret.
///
/// Blank input comes back untouched; anything else is trimmed. A word is
/// masked when forced, when it is not a plain hostname, when it is 16
/// characters or longer, or (in advanced mode) when its character classes
/// change at least `threshold` times.
pub fn cwe312_word_with(word: &str, options: RedactOptions) -> String {
    if word.trim().is_empty() {
        return word.to_string();
    }
    let word = word.trim();

    if options.force {
        return mask(word);
    }

    let len = word.chars().count();
    let plain_host = HostnameOptions {
        underscore: false,
        ..HostnameOptions::default()
    };
    if len > 1 && is_hostname_with(word, plain_host).is_none() {
        return mask(word);
    }
    if len >= MAX_PLAIN_LEN {
        return mask(word);
    }

    if options.advanced && obscurity(word) >= options.threshold {
        return mask(word);
    }

    word.to_string()
}

/// Mask the secrets in a URL with the default options. Input that cannot be
/// parsed, such as a password holding a `?`, is masked whole.
pub fn cwe312_url(url: &str) -> String {
    cwe312_url_with(url, RedactOptions::default())
}

/// Rebuild `url` with its credentials and anything secret-looking masked.
///
/// Passwords and the values of well known secret arguments are always
/// masked and other argument values are checked with `options`. The user,
/// host and path segments are checked too, without the character class
/// heuristic for `http` and `https`. Input that cannot be parsed at all is
/// masked whole.
pub fn cwe312_url_with(url: &str, options: RedactOptions) -> String {
    let forced = RedactOptions { force: true, ..options };

    let Some(parsed) = parse_url_with(url, &ParseOptions::lenient()) else {
        return cwe312_word_with(url, forced);
    };

    let word_options = if parsed.schema.starts_with("http") {
        RedactOptions { advanced: false, ..options }
    } else {
        options
    };

    let user = parsed.user.as_deref().unwrap_or_default();
    let password = parsed.password.as_deref().unwrap_or_default();
    let auth = match (user.is_empty(), password.is_empty()) {
        (true, _) => String::new(),
        (false, true) => format!("{}@", cwe312_word_with(user, word_options)),
        (false, false) => format!(
            "{}:{}@",
            cwe312_word_with(user, word_options),
            cwe312_word_with(password, forced)
        ),
    };

    let port = parsed.port.map(|p| format!(":{p}")).unwrap_or_default();

    let fullpath = match parsed.fullpath.as_deref() {
        None => String::new(),
        Some(path) if path.trim_matches('/').is_empty() => path.to_string(),
        Some(path) => {
            let segments: Vec<String> = path
                .trim_matches('/')
                .split('/')
                .map(|segment| cwe312_word_with(segment, word_options))
                .collect();
            format!("/{}", segments.join("/"))
        }
    };

    let params: Vec<String> = parsed
        .qsd
        .iter()
        .map(|(key, value)| {
            let value_options = if SECRET_KEYS.contains(&key) { forced } else { options };
            format!("{}={}", key, cwe312_word_with(value, value_options))
        })
        .collect();
    let params = if params.is_empty() {
        String::new()
    } else {
        format!("?{}", params.join("&"))
    };

    format!(
        "{}://{}{}{}{}{}",
        parsed.schema,
        auth,
        cwe312_word_with(&parsed.host, word_options),
        port,
        fullpath,
        params
    )
}
