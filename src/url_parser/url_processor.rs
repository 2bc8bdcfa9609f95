use tracing::trace;

use crate::patterns::REPEATED_SLASHES;

use super::QueryArgs;

/// Query string arguments split into the plain bucket and the three sigil
/// buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub qsd: QueryArgs,       // Every argument, lowercase key
    pub qsd_add: QueryArgs,   // Keys that started with '+' (or ' ')
    pub qsd_del: QueryArgs,   // Keys that started with '-'
    pub qsd_colon: QueryArgs, // Keys that started with ':'
}

/// Percent-decode `value`, leaving malformed escapes untouched and
/// replacing invalid UTF-8 with U+FFFD.
pub fn unquote(value: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(value.as_bytes())).into_owned()
}

/// Percent-encode `value`, keeping `/` and the unreserved characters.
pub fn quote(value: &str) -> String {
    value
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Collapse runs of `/` into a single slash and strip surrounding
/// whitespace.
pub fn tidy_path(path: &str) -> String {
    REPEATED_SLASHES.replace_all(path.trim(), "/").into_owned()
}

/// Normalise a raw path: collapse slashes, then decode and re-encode it so
/// equivalent spellings end up identical.
///
/// # Arguments
/// * `raw` - Everything after the authority, up to the query string
///
/// # Returns
/// * `Option<String>` - The normalised path, or `None` when nothing is left
pub fn normalize_path(raw: &str) -> Option<String> {
    let tidy = tidy_path(raw);
    if tidy.is_empty() {
        return None;
    }
    Some(quote(&unquote(&tidy)))
}

/// Split a normalised path at its last slash into the directory part and the
/// trailing segment. An empty trailing segment becomes `None`.
pub fn split_path_query(fullpath: &str) -> (String, Option<String>) {
    match fullpath.rfind('/') {
        Some(idx) => {
            let (path, query) = fullpath.split_at(idx + 1);
            let query = (!query.is_empty()).then(|| query.to_string());
            (path.to_string(), query)
        }
        None => (String::new(), Some(fullpath.to_string())),
    }
}

/// Parse a query string into its buckets.
///
/// Arguments are separated by `&` or `;`. The first character of a key is
/// kept as typed so a `+` sigil survives; any later `+` means a space, as
/// does every `+` in a value. Keys and values are then percent-decoded and
/// values trimmed. A key with no `=` gets an empty value; empty keys are
/// ignored.
///
/// # Arguments
/// * `qs` - The query string, without the leading `?`
///
/// # Returns
/// * `ParsedQuery` - The decoded arguments
pub fn parse_qsd(qs: &str) -> ParsedQuery {
    let mut result = ParsedQuery::default();

    for pair in qs.split(['&', ';']) {
        if pair.is_empty() {
            continue;
        }

        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));

        let mut chars = raw_key.chars();
        let key = match chars.next() {
            Some(first) => {
                let rest = chars.as_str().replace('+', " ");
                unquote(&format!("{first}{rest}"))
            }
            None => continue,
        };
        if key.trim().is_empty() {
            trace!("Skipping query argument with an empty key");
            continue;
        }

        let value = unquote(&raw_value.replace('+', " ")).trim().to_string();

        result.qsd.insert(key.to_lowercase().trim(), value.clone());

        let mut chars = key.chars();
        let bucket = match chars.next() {
            Some('+') | Some(' ') => Some(&mut result.qsd_add),
            Some('-') => Some(&mut result.qsd_del),
            Some(':') => Some(&mut result.qsd_colon),
            _ => None,
        };
        if let Some(bucket) = bucket {
            bucket.insert(chars.as_str(), value);
        }
    }

    result
}
