//! Splitting of multi-value configuration input.
//!
//! Values arrive as plain strings, nested lists or JSON. They are modelled
//! as an [`Entry`] tree; anything that is neither text nor a list becomes
//! [`Entry::Other`] and is skipped.

pub mod detect;

use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;

use tracing::trace;

use crate::patterns::STRING_DELIMITERS;

/// A loosely typed input value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Text(String),
    Seq(Vec<Entry>),
    /// Numbers, nulls, objects; never produces tokens.
    Other,
}

impl Entry {
    /// Text built from the `Display` form of `value`.
    pub fn display(value: &impl Display) -> Self {
        Entry::Text(value.to_string())
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Text(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::Text(value)
    }
}

impl From<&String> for Entry {
    fn from(value: &String) -> Self {
        Entry::Text(value.clone())
    }
}

impl<T: Into<Entry>> From<Vec<T>> for Entry {
    fn from(values: Vec<T>) -> Self {
        Entry::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Entry>, const N: usize> From<[T; N]> for Entry {
    fn from(values: [T; N]) -> Self {
        Entry::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Entry>> From<&[T]> for Entry {
    fn from(values: &[T]) -> Self {
        Entry::Seq(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Entry>> From<HashSet<T>> for Entry {
    fn from(values: HashSet<T>) -> Self {
        Entry::Seq(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Entry>> From<BTreeSet<T>> for Entry {
    fn from(values: BTreeSet<T>) -> Self {
        Entry::Seq(values.into_iter().map(Into::into).collect())
    }
}

/// `None` is an empty list.
impl<T: Into<Entry>> From<Option<T>> for Entry {
    fn from(value: Option<T>) -> Self {
        value.map_or(Entry::Seq(Vec::new()), Into::into)
    }
}

impl From<serde_json::Value> for Entry {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Entry::Text(text),
            serde_json::Value::Array(items) => items.into(),
            _ => Entry::Other,
        }
    }
}

/// Split every string in `value` on commas, semicolons, brackets and
/// whitespace, and return the distinct non-empty tokens in sorted order.
pub fn parse_list(value: impl Into<Entry>) -> Vec<String> {
    let mut tokens = BTreeSet::new();
    collect_tokens(&value.into(), &mut tokens);
    tokens.into_iter().collect()
}

fn collect_tokens(entry: &Entry, tokens: &mut BTreeSet<String>) {
    match entry {
        Entry::Text(text) => tokens.extend(split_delimited(text).map(str::to_string)),
        Entry::Seq(items) => items.iter().for_each(|item| collect_tokens(item, tokens)),
        Entry::Other => {}
    }
}

fn split_delimited(text: &str) -> impl Iterator<Item = &str> {
    STRING_DELIMITERS.split(text).filter(|token| !token.is_empty())
}

/// Pull URLs out of `value`, keeping input order and duplicates.
///
/// When a string holds no URL at all and `store_unparseable` is set, its
/// delimiter-separated words are returned instead so the caller can report
/// them.
pub fn parse_urls(value: impl Into<Entry>, store_unparseable: bool) -> Vec<String> {
    let mut found = Vec::new();
    collect_detected(&value.into(), store_unparseable, detect::find_urls, &mut found);
    found
}

/// Pull email addresses (with any display names) out of `value`. See
/// [`parse_urls`] for the handling of unparseable text.
pub fn parse_emails(value: impl Into<Entry>, store_unparseable: bool) -> Vec<String> {
    let mut found = Vec::new();
    collect_detected(&value.into(), store_unparseable, detect::find_emails, &mut found);
    found
}

/// Pull phone numbers out of `value`, as written. See [`parse_urls`] for the
/// handling of unparseable text.
pub fn parse_phone_no(value: impl Into<Entry>, store_unparseable: bool) -> Vec<String> {
    let mut found = Vec::new();
    collect_detected(&value.into(), store_unparseable, detect::find_phone_numbers, &mut found);
    found
}

fn collect_detected(
    entry: &Entry,
    store_unparseable: bool,
    detector: fn(&str) -> Vec<&str>,
    found: &mut Vec<String>,
) {
    match entry {
        Entry::Text(text) if !text.is_empty() => {
            let detected = detector(text);
            if !detected.is_empty() {
                found.extend(detected.into_iter().map(str::to_string));
            } else if store_unparseable {
                trace!("Nothing recognised, keeping the raw words");
                found.extend(split_delimited(text).map(str::to_string));
            }
        }
        Entry::Seq(items) => {
            for item in items {
                collect_detected(item, store_unparseable, detector, found);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_flattens_and_sorts() {
        let results = parse_list(vec![
            Entry::from(".mkv,.avi,.divx,.xvid,.mov,.wmv,.mp4,.mpg .mpeg,.vob,,; ;"),
            Entry::from(vec![".mkv,.avi,.divx,.xvid,.mov    ", "    .wmv,.mp4;.mpg,.mpeg,"]),
            Entry::from(".vob,.iso"),
            Entry::from(vec![Entry::from(".vob"), Entry::from(vec![".vob", ".mkv"])]),
            Entry::display(&".avi"),
        ]);
        assert_eq!(
            results,
            vec![".avi", ".divx", ".iso", ".mkv", ".mov", ".mp4", ".mpeg", ".mpg", ".vob", ".wmv", ".xvid"]
        );
    }

    #[test]
    fn test_parse_list_drops_garbage() {
        assert!(parse_list(vec![Entry::Other, Entry::from(None::<String>)]).is_empty());
        assert!(parse_list(serde_json::json!([null, 42, {"a": 1}])).is_empty());
        assert_eq!(parse_list(vec!["", "  ", "b", "a"]), vec!["a", "b"]);
    }

    #[test]
    fn test_json_entry() {
        let value = serde_json::json!(["x y", ["z"], 3]);
        assert_eq!(
            Entry::from(value),
            Entry::Seq(vec![
                Entry::from("x y"),
                Entry::Seq(vec![Entry::from("z")]),
                Entry::Other,
            ])
        );
    }

    #[test]
    fn test_unparseable_words() {
        let text = "this is not a parseable url at all";
        assert_eq!(parse_urls(text, true).len(), 8);
        assert!(parse_urls(text, false).is_empty());
        assert_eq!(parse_emails(text, true).len(), 8);
        assert_eq!(parse_phone_no(text, true).len(), 8);
        assert!(parse_emails("garbage", false).is_empty());
    }

    #[test]
    fn test_empty_input() {
        for value in ["", ",", ",  ,, , ,,, "] {
            assert!(parse_urls(value, true).is_empty(), "{value:?}");
            assert!(parse_emails(value, true).is_empty(), "{value:?}");
            assert!(parse_phone_no(value, true).is_empty(), "{value:?}");
        }
        assert!(parse_urls(Entry::Other, true).is_empty());
        assert!(parse_emails(vec![Entry::Other, Entry::from(None::<&str>)], true).is_empty());
    }

    #[test]
    fn test_order_and_duplicates_kept() {
        assert_eq!(
            parse_phone_no("911, 123-123-1234, 911", false),
            vec!["911", "123-123-1234", "911"]
        );
        assert_eq!(
            parse_urls(vec!["b://", "a://", "b://"], true),
            vec!["b://", "a://", "b://"]
        );
    }
}
